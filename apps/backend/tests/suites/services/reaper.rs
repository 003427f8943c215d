// Idle-session retention and the background reaper.

use std::time::Duration;

use bunker_backend::domain::{ParticipantId, RevealPolicy};
use bunker_backend::services::sessions::spawn_reaper;

use crate::support::recording_sink::service_with_sink;

/// Drive a 3-player SingleReveal game to Over; returns its id.
fn finished_game(service: &bunker_backend::SessionService) -> bunker_backend::domain::SessionId {
    let [a, b, c] = [
        ParticipantId::random(),
        ParticipantId::random(),
        ParticipantId::random(),
    ];
    let id = service.create_and_join(8, 2, a, "Alice").unwrap();
    service.join(id, b, "Bob").unwrap();
    service.join(id, c, "Carol").unwrap();
    service.start(id, a).unwrap();
    service.reveal(id, a, "gender").unwrap();
    service.vote(id, a, b).unwrap();
    service.vote(id, b, a).unwrap();
    service.vote(id, c, b).unwrap();
    id
}

#[test]
fn purge_keeps_populated_lobbies_and_live_games() {
    let (service, sink) = service_with_sink(RevealPolicy::SingleReveal);

    let never_joined = service.create_session(8, 2).unwrap();
    let lobby = service
        .create_and_join(8, 2, ParticipantId::random(), "Host")
        .unwrap();
    let over = finished_game(&service);

    let purged = service.purge_idle(Duration::ZERO);
    assert_eq!(purged, 2);

    assert!(service.snapshot(lobby).is_ok());
    assert!(service.snapshot(never_joined).is_err());
    assert!(service.snapshot(over).is_err());

    let mut closed = sink.closed();
    closed.sort();
    let mut expected = vec![never_joined, over];
    expected.sort();
    assert_eq!(closed, expected);
}

#[test]
fn purge_respects_retention_window() {
    let (service, _sink) = service_with_sink(RevealPolicy::SingleReveal);
    let over = finished_game(&service);

    assert_eq!(service.purge_idle(Duration::from_secs(3600)), 0);
    assert!(service.snapshot(over).is_ok());
}

#[tokio::test]
async fn reaper_task_purges_in_background() {
    let (service, sink) = service_with_sink(RevealPolicy::SingleReveal);
    let over = finished_game(&service);

    let handle = spawn_reaper(
        service.clone(),
        Duration::ZERO,
        Duration::from_millis(10),
    );

    let start = tokio::time::Instant::now();
    while service.snapshot(over).is_ok() {
        assert!(
            start.elapsed() < Duration::from_secs(2),
            "reaper did not purge the finished session"
        );
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    handle.abort();

    assert!(service.registry().is_empty());
    assert_eq!(sink.closed(), vec![over]);
}
