use serde::{Deserialize, Serialize};

/// A vote that a voter wishes to cast, naming the candidate by ID.
///
/// `voter_id` carries the voter's external identifier, not a database ID;
/// this mirrors what the ballot form submits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteRequest {
    pub voter_id: String,
    pub candidate_id: String,
}
