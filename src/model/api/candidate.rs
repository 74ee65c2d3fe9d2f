use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::db::Candidate;

/// A new candidate, as submitted by an admin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateSpec {
    pub name: String,
    pub description: String,
}

/// Candidate data as presented over the API: IDs become hex strings and
/// datetimes plain RFC 3339.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateDescription {
    pub id: String,
    pub name: String,
    pub description: String,
    pub votes: u64,
    pub created_at: DateTime<Utc>,
}

impl From<Candidate> for CandidateDescription {
    fn from(candidate: Candidate) -> Self {
        Self {
            id: candidate.id.to_hex(),
            name: candidate.candidate.name,
            description: candidate.candidate.description,
            votes: candidate.candidate.votes,
            created_at: candidate.candidate.created_at,
        }
    }
}

/// Example data for tests.
#[cfg(test)]
mod examples {
    use super::*;

    impl CandidateSpec {
        pub fn example() -> Self {
            Self {
                name: "Alice Allister".to_string(),
                description: "More bike lanes, fewer potholes".to_string(),
            }
        }
    }
}
