use std::ops::{Deref, DerefMut};

use chrono::{DateTime, Utc};
use mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime;
use serde::{Deserialize, Serialize};

use crate::model::mongodb::Id;

/// Core voter data, as stored in the database.
///
/// `has_voted` and `candidate` always change together: a voter either has not
/// voted (`false`, `None`) or has voted for exactly one candidate
/// (`true`, `Some`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoterCore {
    /// Externally supplied unique identifier, e.g. a document number.
    /// Trusted as given; uniqueness is enforced by the database index.
    pub identifier: String,
    pub has_voted: bool,
    pub candidate: Option<Id>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

impl VoterCore {
    /// Create a new voter who has not yet voted.
    pub fn new(identifier: String) -> Self {
        Self {
            identifier,
            has_voted: false,
            candidate: None,
            created_at: Utc::now(),
        }
    }
}

/// A voter without an ID.
pub type NewVoter = VoterCore;

/// A voter from the database, with its unique ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voter {
    #[serde(rename = "_id")]
    pub id: Id,
    #[serde(flatten)]
    pub voter: VoterCore,
}

impl Deref for Voter {
    type Target = VoterCore;

    fn deref(&self) -> &Self::Target {
        &self.voter
    }
}

impl DerefMut for Voter {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.voter
    }
}
