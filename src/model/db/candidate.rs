use std::ops::{Deref, DerefMut};

use chrono::{DateTime, Utc};
use mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime;
use serde::{Deserialize, Serialize};

use crate::model::mongodb::Id;

/// Core candidate data: a name, a blurb, and a running tally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateCore {
    pub name: String,
    pub description: String,
    /// Running tally. Only ever mutated by the vote coordinator, inside a
    /// transaction.
    pub votes: u64,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

impl CandidateCore {
    /// Create a new candidate with a zeroed tally.
    pub fn new(name: String, description: String) -> Self {
        Self {
            name,
            description,
            votes: 0,
            created_at: Utc::now(),
        }
    }
}

/// A candidate without an ID.
pub type NewCandidate = CandidateCore;

/// A candidate from the database, with its unique ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    #[serde(rename = "_id")]
    pub id: Id,
    #[serde(flatten)]
    pub candidate: CandidateCore,
}

impl Deref for Candidate {
    type Target = CandidateCore;

    fn deref(&self) -> &Self::Target {
        &self.candidate
    }
}

impl DerefMut for Candidate {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.candidate
    }
}

/// Example data for tests.
#[cfg(test)]
mod examples {
    use super::*;

    impl CandidateCore {
        pub fn example() -> Self {
            Self::new(
                "Alice Allister".to_string(),
                "More bike lanes, fewer potholes".to_string(),
            )
        }

        pub fn example2() -> Self {
            Self::new(
                "Bob Babbage".to_string(),
                "A fountain in every plaza".to_string(),
            )
        }
    }
}
