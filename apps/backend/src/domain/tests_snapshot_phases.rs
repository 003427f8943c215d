//! Snapshot API tests covering all session phases.

use crate::domain::profile::{AttributeName, AttributeValue};
use crate::domain::rules::RevealPolicy;
use crate::domain::session::Phase;
use crate::domain::snapshot::snapshot;
use crate::domain::test_state_helpers::Table;

#[test]
fn lobby_snapshot_smoke() {
    let t = Table::lobby(RevealPolicy::FullRotation, &["Alice", "Bob"]);
    let snap = snapshot(&t.session);

    assert_eq!(snap.game.phase, Phase::Lobby);
    assert!(!snap.game.started);
    assert_eq!(snap.game.current_round, 0);
    assert_eq!(snap.game.current_turn, None);
    assert_eq!(snap.game.player_count, 8);
    assert_eq!(snap.game.bunker_spots, 2);
    assert_eq!(snap.game.version, 2);
    assert_eq!(snap.players.len(), 2);
    assert!(snap.players[0].is_host);
    assert!(snap.players.iter().all(|p| p.revealed.is_empty()));
}

#[test]
fn turn_snapshot_exposes_only_disclosed_attributes() {
    let mut t = Table::started(RevealPolicy::FullRotation, &["Alice", "Bob", "Carol"]);
    let alice_card = t.session.participant(t.id("Alice")).unwrap().card().clone();
    t.reveal("Alice", "profession").unwrap();

    let snap = snapshot(&t.session);
    assert_eq!(snap.game.phase, Phase::Turn);
    assert_eq!(snap.game.current_turn, Some(t.id("Bob")));

    let alice = &snap.players[0];
    assert_eq!(alice.revealed.len(), 1);
    assert_eq!(alice.revealed[0].attribute, AttributeName::Profession);
    assert_eq!(
        alice.revealed[0].value,
        AttributeValue::Text(alice_card.profession)
    );

    // Hidden slots never reach the wire.
    let json = serde_json::to_value(&snap).unwrap();
    let text = json.to_string();
    assert!(!text.contains("\"card\""));
    assert!(!text.contains(alice_card.fact1));
    assert_eq!(json["players"][1]["revealed"], serde_json::json!([]));
}

#[test]
fn voting_snapshot_counts_ballots_without_targets() {
    let mut t = Table::started(RevealPolicy::SingleReveal, &["Alice", "Bob", "Carol"]);
    t.reveal("Alice", "hobby").unwrap();
    t.vote("Bob", "Carol").unwrap();

    let snap = snapshot(&t.session);
    assert_eq!(snap.game.phase, Phase::Voting);
    assert_eq!(snap.game.current_turn, None);
    assert_eq!(snap.game.votes_cast, 1);
    assert_eq!(snap.game.survivors, 3);
    assert_eq!(snap.game.reveal_policy, RevealPolicy::SingleReveal);
}

#[test]
fn over_snapshot_marks_eliminated() {
    let mut t = Table::started(RevealPolicy::SingleReveal, &["Alice", "Bob", "Carol"]);
    t.reveal("Alice", "hobby").unwrap();
    t.vote("Bob", "Carol").unwrap();
    t.vote("Carol", "Bob").unwrap();
    t.vote("Alice", "Bob").unwrap();

    let snap = snapshot(&t.session);
    assert_eq!(snap.game.phase, Phase::Over);
    assert_eq!(snap.game.survivors, 2);
    let flags: Vec<_> = snap.players.iter().map(|p| p.is_eliminated).collect();
    assert_eq!(flags, vec![false, true, false]);
}
