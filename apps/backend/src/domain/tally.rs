//! Vote counting and the elimination tie-break.
//!
//! Tie-break rule: among targets sharing the greatest count, the target with
//! the lowest roster index (earliest joiner) is eliminated. Counts are
//! gathered per roster index, so the result never depends on ballot
//! iteration order.

use crate::domain::notification::{PlayerRef, VoteCount};
use crate::domain::session::{Ballot, Participant};

/// Votes received by the participant at `index`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tallied {
    pub index: usize,
    pub votes: u32,
}

/// Count ballots per target. Only targets with at least one vote are listed,
/// in ascending roster order.
pub fn count_votes(roster: &[Participant], ballot: &Ballot) -> Vec<Tallied> {
    let mut counts = vec![0u32; roster.len()];
    for target in ballot.values() {
        if let Some(idx) = roster.iter().position(|p| p.id() == *target) {
            counts[idx] += 1;
        }
    }
    counts
        .into_iter()
        .enumerate()
        .filter(|(_, votes)| *votes > 0)
        .map(|(index, votes)| Tallied { index, votes })
        .collect()
}

/// Roster index of the participant to eliminate, `None` for an empty tally.
pub fn elimination_pick(tally: &[Tallied]) -> Option<usize> {
    let mut best: Option<Tallied> = None;
    for entry in tally {
        match best {
            Some(b) if entry.votes <= b.votes => {}
            _ => best = Some(*entry),
        }
    }
    best.map(|b| b.index)
}

pub fn to_vote_counts(roster: &[Participant], tally: &[Tallied]) -> Vec<VoteCount> {
    tally
        .iter()
        .map(|t| VoteCount {
            player: PlayerRef::from(&roster[t.index]),
            votes: t.votes,
        })
        .collect()
}
