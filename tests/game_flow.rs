//! End-to-end rounds driven through logical time.

use memory_match::{Card, Delay, GameConfig, GameMachine, Phase, State};
use std::time::Duration;

const REVEAL: Duration = Duration::from_millis(5_000);

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn running_machine(total_cards: usize, game_time_secs: u32) -> GameMachine {
    let mut machine = GameMachine::new(GameConfig {
        total_cards,
        game_time_secs,
        ..GameConfig::default()
    })
    .unwrap();
    machine.start();
    machine.advance(REVEAL);
    assert_eq!(machine.phase(), Phase::ACTIVE);
    machine
}

/// a, b, c, d with values 1, 2, 1, 2.
fn board() -> [Card; 4] {
    [Card::new(1), Card::new(2), Card::new(1), Card::new(2)]
}

#[test]
fn matching_every_pair_wins() {
    let mut machine = running_machine(4, 30);
    let [a, b, c, d] = board();

    machine.open_card(&a);
    assert_eq!(machine.context().temp_cards(), &[a.clone()]);

    machine.open_card(&c);
    assert_eq!(machine.phase(), Phase::ACTIVE);
    assert!(machine.context().temp_cards().is_empty());
    assert!(machine.context().is_revealed(a.id()));
    assert!(machine.context().is_revealed(c.id()));

    machine.open_card(&b);
    assert_eq!(machine.context().temp_cards(), &[b.clone()]);

    machine.open_card(&d);
    assert_eq!(machine.phase(), Phase::GameWon);
    assert_eq!(machine.context().revealed_cards().len(), 4);
    assert!(!machine.is_clock_running());
    assert_eq!(machine.next_deadline(), None);
}

#[test]
fn running_out_of_ticks_loses() {
    let mut machine = running_machine(4, 5);

    for left in (1..5).rev() {
        machine.tick();
        assert_eq!(machine.context().remaining_time(), left);
        assert!(machine.phase().is_running());
    }
    machine.tick();

    assert_eq!(machine.phase(), Phase::GameOver);
    assert_eq!(machine.context().remaining_time(), 0);
    assert!(machine.phase().is_final());
}

#[test]
fn the_clock_ticks_once_per_second_while_running() {
    let mut machine = running_machine(4, 3);

    machine.advance(ms(2_500));
    assert_eq!(machine.context().remaining_time(), 1);

    machine.advance(ms(500));
    assert_eq!(machine.phase(), Phase::GameOver);
}

#[test]
fn the_clock_is_idle_before_the_reveal_ends() {
    let mut machine = GameMachine::new(GameConfig::default()).unwrap();
    machine.start();

    machine.advance(ms(4_999));
    assert_eq!(machine.phase(), Phase::PreGameRevealing);
    assert_eq!(machine.context().remaining_time(), 30);
    assert!(!machine.is_clock_running());
    assert!(!machine.tick());
}

#[test]
fn a_mismatch_is_shown_for_the_showcase_delay() {
    let mut machine = running_machine(4, 30);
    let [a, b, ..] = board();

    machine.open_card(&a);
    machine.open_card(&b);
    assert_eq!(machine.phase(), Phase::SHOWCASE);
    assert_eq!(machine.context().temp_cards().len(), 2);

    machine.advance(ms(999));
    assert_eq!(machine.phase(), Phase::SHOWCASE);

    machine.advance(ms(1));
    assert_eq!(machine.phase(), Phase::ACTIVE);
    assert!(machine.context().temp_cards().is_empty());
    assert!(machine.context().revealed_cards().is_empty());
}

#[test]
fn clicks_during_the_showcase_are_ignored() {
    let mut machine = running_machine(4, 30);
    let [a, b, c, _] = board();

    machine.open_card(&a);
    machine.open_card(&b);

    assert!(!machine.open_card(&c));
    assert_eq!(machine.context().temp_cards(), &[a, b]);
}

#[test]
fn a_lone_card_closes_after_the_inactivity_delay() {
    let mut machine = running_machine(4, 30);
    let [a, ..] = board();

    machine.open_card(&a);
    machine.advance(ms(999));
    assert!(machine.context().is_temp(a.id()));

    machine.advance(ms(1));
    assert!(machine.context().temp_cards().is_empty());
    assert_eq!(machine.phase(), Phase::ACTIVE);
}

#[test]
fn each_click_restarts_the_inactivity_delay() {
    let mut machine = running_machine(4, 30);
    let [a, b, ..] = board();

    machine.advance(ms(800));
    machine.open_card(&a);
    machine.advance(ms(800));
    assert!(machine.context().is_temp(a.id()));
    assert_eq!(machine.pending_delays(Delay::SingleCard), 1);

    machine.open_card(&b);
    assert_eq!(machine.phase(), Phase::SHOWCASE);
    assert_eq!(machine.pending_delays(Delay::SingleCard), 0);
}

#[test]
fn the_same_card_cannot_be_opened_twice() {
    let mut machine = running_machine(4, 30);
    let [a, ..] = board();

    assert!(machine.open_card(&a));
    assert!(!machine.open_card(&a));
    assert_eq!(machine.context().temp_cards().len(), 1);
}

#[test]
fn matched_cards_cannot_be_reopened() {
    let mut machine = running_machine(4, 30);
    let [a, _, c, _] = board();

    machine.open_card(&a);
    machine.open_card(&c);

    assert!(!machine.open_card(&a));
    assert!(machine.context().temp_cards().is_empty());
}

#[test]
fn time_running_out_during_a_showcase_ends_the_game() {
    let mut machine = running_machine(4, 1);
    let [a, b, ..] = board();

    machine.open_card(&a);
    machine.open_card(&b);
    machine.advance(ms(1_000));

    assert_eq!(machine.phase(), Phase::GameOver);
    assert_eq!(machine.next_deadline(), None);
    assert_eq!(machine.pending_delays(Delay::Showcase), 0);
}

#[test]
fn restarting_mid_round_resets_everything() {
    let mut machine = running_machine(4, 30);
    let [a, b, c, _] = board();

    machine.open_card(&a);
    machine.open_card(&c);
    machine.open_card(&b);
    machine.advance(ms(3_000));

    assert!(machine.start());
    assert_eq!(machine.phase(), Phase::PreGameRevealing);
    assert_eq!(machine.context().remaining_time(), 30);
    assert!(machine.context().revealed_cards().is_empty());
    assert!(machine.context().temp_cards().is_empty());
    assert!(!machine.is_clock_running());
    assert_eq!(machine.pending_delays(Delay::PreGameReveal), 1);

    machine.advance(REVEAL);
    assert_eq!(machine.phase(), Phase::ACTIVE);
}

#[test]
fn a_finished_game_can_be_replayed() {
    let mut machine = running_machine(2, 30);
    let a = Card::new(1);
    let b = Card::new(1);
    machine.open_card(&a);
    machine.open_card(&b);
    assert_eq!(machine.phase(), Phase::GameWon);

    assert!(!machine.open_card(&Card::new(1)));
    assert!(machine.start());
    machine.advance(REVEAL);
    assert!(machine.context().revealed_cards().is_empty());
    assert_eq!(machine.phase(), Phase::ACTIVE);
}

#[test]
fn history_records_every_phase_change_since_start() {
    let mut machine = running_machine(4, 30);
    let [a, b, ..] = board();
    machine.open_card(&a);
    machine.open_card(&b);
    machine.advance(ms(1_000));

    let path: Vec<&str> = machine
        .history()
        .get_path()
        .into_iter()
        .map(|phase| phase.name())
        .collect();
    assert_eq!(
        path,
        vec![
            "not_started",
            "pre_game_revealing",
            "running.active",
            "running.active",
            "running.showcase",
            "running.active",
        ]
    );
}

#[test]
fn snapshots_serialize_the_running_sub_phase() {
    let machine = running_machine(4, 30);
    let json = machine.snapshot().to_json().unwrap();

    assert!(json.contains(r#""phase":{"running":"active"}"#));
    assert!(json.contains(r#""total_cards":4"#));
}
