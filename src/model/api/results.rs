use serde::{Deserialize, Serialize};

use crate::coordinator::Ranking;
use crate::model::api::candidate::CandidateDescription;

/// The full election results: every candidate ranked by tally, plus the
/// designated winner (absent only when no candidates exist).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElectionResults {
    pub candidates: Vec<CandidateDescription>,
    pub winner: Option<CandidateDescription>,
}

impl From<Ranking> for ElectionResults {
    fn from(ranking: Ranking) -> Self {
        let winner = ranking.winner().cloned().map(CandidateDescription::from);
        Self {
            candidates: ranking
                .candidates
                .into_iter()
                .map(CandidateDescription::from)
                .collect(),
            winner,
        }
    }
}
