use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::domain::DomainError;

/// Minimum roster size for Start, independent of capacity.
pub const MIN_PLAYERS: usize = 3;

/// Inclusive age range printed on character cards.
pub const AGE_MIN: u8 = 21;
pub const AGE_MAX: u8 = 111;

/// Supported (capacity, survivor quota) pairings.
pub const SUPPORTED_SIZES: [(u8, u8); 2] = [(8, 2), (12, 6)];

/// Survivor quota for a capacity; `None` for unsupported capacities.
pub fn quota_for_capacity(capacity: u8) -> Option<u8> {
    SUPPORTED_SIZES
        .iter()
        .find(|(c, _)| *c == capacity)
        .map(|(_, q)| *q)
}

/// How the turn moves after a reveal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevealPolicy {
    /// Every surviving participant reveals once per round, in roster order;
    /// voting opens when the turn passes the last roster entry.
    #[default]
    FullRotation,
    /// Voting opens right after the turn-holder's reveal.
    SingleReveal,
}

impl RevealPolicy {
    pub const fn as_str(&self) -> &'static str {
        match self {
            RevealPolicy::FullRotation => "full_rotation",
            RevealPolicy::SingleReveal => "single_reveal",
        }
    }
}

impl fmt::Display for RevealPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RevealPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "full_rotation" => Ok(RevealPolicy::FullRotation),
            "single_reveal" => Ok(RevealPolicy::SingleReveal),
            other => Err(format!(
                "unknown reveal policy '{other}' (expected full_rotation or single_reveal)"
            )),
        }
    }
}

/// Fixed parameters of a session, validated at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SessionConfig {
    capacity: u8,
    quota: u8,
    reveal_policy: RevealPolicy,
}

impl SessionConfig {
    /// Accepts only the supported capacity/quota pairings (8/2 and 12/6).
    pub fn new(capacity: u8, quota: u8, reveal_policy: RevealPolicy) -> Result<Self, DomainError> {
        let expected = quota_for_capacity(capacity).ok_or_else(|| {
            DomainError::invalid_configuration("player count must be 8 or 12")
        })?;
        if quota != expected {
            return Err(DomainError::invalid_configuration(format!(
                "{capacity} players require {expected} bunker spots, got {quota}"
            )));
        }
        Ok(Self {
            capacity,
            quota,
            reveal_policy,
        })
    }

    pub fn capacity(&self) -> u8 {
        self.capacity
    }

    pub fn quota(&self) -> u8 {
        self.quota
    }

    pub fn reveal_policy(&self) -> RevealPolicy {
        self.reveal_policy
    }
}
