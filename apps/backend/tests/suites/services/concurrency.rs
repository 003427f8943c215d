// Concurrent access to one session and to many sessions.

use std::sync::Arc;
use std::thread;

use bunker_backend::domain::notification::{Audience, Notification};
use bunker_backend::domain::{ParticipantId, RevealPolicy};
use bunker_backend::errors::DomainError;

use crate::support::recording_sink::{service_with_sink, Record};

#[test]
fn concurrent_joins_fill_exactly_to_capacity() {
    let (service, _sink) = service_with_sink(RevealPolicy::FullRotation);
    let id = service.create_session(8, 2).unwrap();

    let results: Vec<Result<_, DomainError>> = thread::scope(|scope| {
        let handles: Vec<_> = (0..20)
            .map(|i| {
                let service = Arc::clone(&service);
                scope.spawn(move || service.join(id, ParticipantId::random(), &format!("p{i}")))
            })
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().expect("join thread panicked"))
            .collect()
    });

    let joined = results.iter().filter(|r| r.is_ok()).count();
    let full = results
        .iter()
        .filter(|r| matches!(r, Err(DomainError::SessionFull { capacity: 8 })))
        .count();
    assert_eq!(joined, 8);
    assert_eq!(full, 12);

    let snap = service.snapshot(id).unwrap();
    assert_eq!(snap.players.len(), 8);
    assert_eq!(snap.players.iter().filter(|p| p.is_host).count(), 1);
    assert_eq!(snap.game.version, 8);
}

#[test]
fn concurrent_duplicate_names_admit_one() {
    let (service, _sink) = service_with_sink(RevealPolicy::FullRotation);
    let id = service.create_session(8, 2).unwrap();

    let outcomes: Vec<bool> = thread::scope(|scope| {
        let handles: Vec<_> = (0..6)
            .map(|_| {
                let service = Arc::clone(&service);
                scope.spawn(move || service.join(id, ParticipantId::random(), "Alice").is_ok())
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(outcomes.iter().filter(|ok| **ok).count(), 1);
    assert_eq!(service.snapshot(id).unwrap().players.len(), 1);
}

#[test]
fn sessions_progress_independently() {
    let (service, sink) = service_with_sink(RevealPolicy::SingleReveal);

    let games: Vec<_> = (0..8)
        .map(|_| {
            let players: Vec<ParticipantId> = (0..3).map(|_| ParticipantId::random()).collect();
            let id = service.create_and_join(8, 2, players[0], "Alice").unwrap();
            service.join(id, players[1], "Bob").unwrap();
            service.join(id, players[2], "Carol").unwrap();
            (id, players)
        })
        .collect();

    thread::scope(|scope| {
        for (id, players) in &games {
            let service = Arc::clone(&service);
            scope.spawn(move || {
                let [a, b, c] = [players[0], players[1], players[2]];
                service.start(*id, a).unwrap();
                service.reveal(*id, a, "age").unwrap();
                service.vote(*id, a, c).unwrap();
                service.vote(*id, b, c).unwrap();
                service.vote(*id, c, b).unwrap();
            });
        }
    });

    for (id, _) in &games {
        let snap = service.snapshot(*id).unwrap();
        assert_eq!(snap.game.survivors, 2);
        assert!(snap.players[2].is_eliminated);
        assert!(!snap.players[0].is_eliminated);
    }

    // Each session's batches stay in order: game_over is the last event of every session.
    for (id, _) in &games {
        let last = sink
            .records()
            .into_iter()
            .filter_map(|r| match r {
                Record::Deliver {
                    session_id,
                    audience: Audience::Session,
                    notification,
                } if session_id == *id => Some(notification),
                _ => None,
            })
            .last();
        assert!(matches!(last, Some(Notification::GameOver { .. })));
    }
}
