// Service-level properties over random action sequences.

use bunker_backend::domain::{ParticipantId, Phase, RevealPolicy};
use bunker_backend::errors::DomainError;
use proptest::prelude::*;

use crate::common::proptest_prelude::proptest_prelude_config;
use crate::support::recording_sink::service_with_sink;

#[derive(Debug, Clone)]
enum Step {
    Reveal { who: usize, attribute: usize },
    Vote { who: usize, target: usize },
    Disconnect { who: usize },
}

const ATTRIBUTES: [&str; 10] = [
    "profession", "health", "hobby", "phobia", "baggage", "fact1", "fact2", "gender", "age",
    "shoe_size",
];

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        4 => (0..8usize, 0..ATTRIBUTES.len()).prop_map(|(who, attribute)| Step::Reveal { who, attribute }),
        6 => (0..8usize, 0..8usize).prop_map(|(who, target)| Step::Vote { who, target }),
        1 => (0..8usize).prop_map(|who| Step::Disconnect { who }),
    ]
}

fn policy() -> impl Strategy<Value = RevealPolicy> {
    prop_oneof![Just(RevealPolicy::FullRotation), Just(RevealPolicy::SingleReveal)]
}

proptest! {
    #![proptest_config(proptest_prelude_config())]

    /// Accepted actions bump the version by exactly one, rejected ones leave
    /// it alone, and the survivor count never drops below the quota.
    #[test]
    fn version_and_quota_hold_under_random_play(
        policy in policy(),
        seats in 3usize..=8,
        steps in prop::collection::vec(step(), 1..120),
    ) {
        let (service, _sink) = service_with_sink(policy);
        let players: Vec<ParticipantId> = (0..seats).map(|_| ParticipantId::random()).collect();
        let id = service.create_and_join(8, 2, players[0], "p0").unwrap();
        for (i, p) in players.iter().enumerate().skip(1) {
            service.join(id, *p, &format!("p{i}")).unwrap();
        }
        service.start(id, players[0]).unwrap();

        for step in steps {
            let before = service.snapshot(id).unwrap();
            // Leaving after elimination changes nothing.
            let no_op = match step {
                Step::Disconnect { who } => before.players[who % seats].is_eliminated,
                _ => false,
            };
            let result = match step {
                Step::Reveal { who, attribute } => {
                    service.reveal(id, players[who % seats], ATTRIBUTES[attribute])
                }
                Step::Vote { who, target } => {
                    service.vote(id, players[who % seats], players[target % seats])
                }
                Step::Disconnect { who } => service.disconnect(id, players[who % seats]),
            };
            let after = service.snapshot(id).unwrap();

            match &result {
                Ok(_) if no_op && before.game.phase != Phase::Over => {
                    prop_assert_eq!(&after, &before);
                }
                Ok(_) => prop_assert_eq!(after.game.version, before.game.version + 1),
                Err(err) => {
                    prop_assert!(!matches!(err, DomainError::SessionNotFound));
                    prop_assert_eq!(&after, &before);
                }
            }

            prop_assert!(after.game.survivors >= 2);
            if after.game.phase == Phase::Over {
                prop_assert_eq!(after.game.survivors, 2);
            }
        }
    }
}
