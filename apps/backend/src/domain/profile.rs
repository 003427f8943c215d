//! Character cards: the private attribute set dealt to each participant.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::domain::rules::{AGE_MAX, AGE_MIN};
use crate::domain::vocab::{BAGGAGE, FACTS, GENDERS, HEALTH, HOBBIES, PHOBIAS, PROFESSIONS};
use crate::errors::domain::DomainError;

/// The nine fixed slots of a card, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeName {
    Profession,
    Health,
    Hobby,
    Phobia,
    Baggage,
    Fact1,
    Fact2,
    Gender,
    Age,
}

impl AttributeName {
    pub const ALL: [AttributeName; 9] = [
        AttributeName::Profession,
        AttributeName::Health,
        AttributeName::Hobby,
        AttributeName::Phobia,
        AttributeName::Baggage,
        AttributeName::Fact1,
        AttributeName::Fact2,
        AttributeName::Gender,
        AttributeName::Age,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            AttributeName::Profession => "profession",
            AttributeName::Health => "health",
            AttributeName::Hobby => "hobby",
            AttributeName::Phobia => "phobia",
            AttributeName::Baggage => "baggage",
            AttributeName::Fact1 => "fact1",
            AttributeName::Fact2 => "fact2",
            AttributeName::Gender => "gender",
            AttributeName::Age => "age",
        }
    }
}

impl fmt::Display for AttributeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exact, case-sensitive match against the wire names.
impl FromStr for AttributeName {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AttributeName::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| DomainError::InvalidAttribute(s.to_string()))
    }
}

/// Value of a single slot as shown to other players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Text(&'static str),
    Age(u8),
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Text(s) => f.write_str(s),
            AttributeValue::Age(age) => write!(f, "{age}"),
        }
    }
}

/// A participant's private card. Generated once at join, never modified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttributeSet {
    pub profession: &'static str,
    pub health: &'static str,
    pub hobby: &'static str,
    pub phobia: &'static str,
    pub baggage: &'static str,
    pub fact1: &'static str,
    pub fact2: &'static str,
    pub gender: &'static str,
    pub age: u8,
}

impl AttributeSet {
    pub fn value(&self, name: AttributeName) -> AttributeValue {
        match name {
            AttributeName::Profession => AttributeValue::Text(self.profession),
            AttributeName::Health => AttributeValue::Text(self.health),
            AttributeName::Hobby => AttributeValue::Text(self.hobby),
            AttributeName::Phobia => AttributeValue::Text(self.phobia),
            AttributeName::Baggage => AttributeValue::Text(self.baggage),
            AttributeName::Fact1 => AttributeValue::Text(self.fact1),
            AttributeName::Fact2 => AttributeValue::Text(self.fact2),
            AttributeName::Gender => AttributeValue::Text(self.gender),
            AttributeName::Age => AttributeValue::Age(self.age),
        }
    }
}

fn pick<R: Rng + ?Sized>(rng: &mut R, vocab: &'static [&'static str]) -> &'static str {
    vocab[rng.random_range(0..vocab.len())]
}

/// Deal a card from the thread-local RNG.
pub fn generate() -> AttributeSet {
    generate_with(&mut rand::rng())
}

/// Deal a card from `rng`. Both facts come from the same vocabulary and
/// `fact2` is redrawn until it differs from `fact1`.
pub fn generate_with<R: Rng + ?Sized>(rng: &mut R) -> AttributeSet {
    let profession = pick(rng, PROFESSIONS);
    let health = pick(rng, HEALTH);
    let hobby = pick(rng, HOBBIES);
    let phobia = pick(rng, PHOBIAS);
    let baggage = pick(rng, BAGGAGE);
    let fact1 = pick(rng, FACTS);
    let fact2 = loop {
        let candidate = pick(rng, FACTS);
        if candidate != fact1 {
            break candidate;
        }
    };
    let gender = pick(rng, GENDERS);
    let age = rng.random_range(AGE_MIN..=AGE_MAX);

    AttributeSet {
        profession,
        health,
        hobby,
        phobia,
        baggage,
        fact1,
        fact2,
        gender,
        age,
    }
}
