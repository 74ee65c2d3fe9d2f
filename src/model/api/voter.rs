use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::db::Voter;

/// A new voter, as submitted on registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoterSpec {
    pub identifier: String,
}

/// Voter data as presented over the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoterDescription {
    pub id: String,
    pub identifier: String,
    pub has_voted: bool,
    pub candidate: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Voter> for VoterDescription {
    fn from(voter: Voter) -> Self {
        Self {
            id: voter.id.to_hex(),
            identifier: voter.voter.identifier,
            has_voted: voter.voter.has_voted,
            candidate: voter.voter.candidate.map(|id| id.to_hex()),
            created_at: voter.voter.created_at,
        }
    }
}

/// The answer to "has this voter voted yet?".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoterStatus {
    pub has_voted: bool,
}

impl From<Voter> for VoterStatus {
    fn from(voter: Voter) -> Self {
        Self {
            has_voted: voter.has_voted,
        }
    }
}
