use crate::error::{Error, Result};
use crate::model::db::{Candidate, Voter};
use crate::model::mongodb::Id;
use crate::storage::{CandidateStore, MongoStorage, VoterStore};

/// The coordinator the server actually runs.
pub type Coordinator = VoteCoordinator<MongoStorage>;

/// Executes vote casting as a single all-or-nothing unit.
///
/// Owns the invariant "one voter, at most one vote, exactly one tally
/// increment": the voter's has-voted flag and the chosen candidate's tally
/// only ever change together, inside one storage transaction. Everything
/// else it does is plain reads.
#[derive(Debug, Clone)]
pub struct VoteCoordinator<S> {
    storage: S,
}

impl<S> VoteCoordinator<S>
where
    S: CandidateStore + VoterStore,
{
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Cast a vote: check the voter exists and has not voted, check the
    /// candidate exists, bump the tally, and mark the voter, all inside one
    /// transaction. Any precondition failure aborts the transaction before
    /// the error is returned, so no partial state survives.
    ///
    /// Safe to retry after an unknown outcome: if the first attempt really
    /// committed, the retry fails with `AlreadyVoted` instead of double
    /// counting.
    pub async fn cast_vote(&self, voter_identifier: &str, candidate_id: Id) -> Result<()> {
        let mut txn = self.storage.begin().await?;
        match self
            .cast_vote_in(voter_identifier, candidate_id, &mut txn)
            .await
        {
            Ok(()) => {
                self.storage.commit(txn).await?;
                info!("Recorded vote from voter '{voter_identifier}'");
                Ok(())
            }
            Err(err) => {
                // The abort outcome must not mask the original failure.
                if let Err(abort_err) = self.storage.abort(txn).await {
                    warn!("Failed to abort vote transaction: {abort_err}");
                }
                Err(err)
            }
        }
    }

    /// The preconditions and writes of a single vote, inside `txn`.
    async fn cast_vote_in(
        &self,
        voter_identifier: &str,
        candidate_id: Id,
        txn: &mut S::Txn,
    ) -> Result<()> {
        let voter = self
            .storage
            .voter_by_identifier_in(voter_identifier, txn)
            .await?
            .ok_or_else(|| Error::VoterNotFound(voter_identifier.to_string()))?;
        if voter.has_voted {
            return Err(Error::AlreadyVoted(voter_identifier.to_string()));
        }
        let candidate = self
            .storage
            .candidate_by_id_in(candidate_id, txn)
            .await?
            .ok_or_else(|| Error::CandidateNotFound(candidate_id.to_string()))?;
        self.storage.increment_votes(candidate.id, txn).await?;
        self.storage.mark_voted(voter.id, candidate.id, txn).await?;
        Ok(())
    }

    /// Look up a voter, registering them if absent.
    ///
    /// Losing the registration race to a concurrent caller means the voter
    /// exists now, so that counts as success and the existing record is
    /// returned.
    pub async fn find_or_register(&self, identifier: &str) -> Result<Voter> {
        if let Some(voter) = self.storage.voter_by_identifier(identifier).await? {
            return Ok(voter);
        }
        match self.storage.register_voter(identifier).await {
            Ok(voter) => {
                info!("Registered voter '{identifier}'");
                Ok(voter)
            }
            Err(Error::DuplicateVoter(_)) => self
                .storage
                .voter_by_identifier(identifier)
                .await?
                .ok_or_else(|| Error::VoterNotFound(identifier.to_string())),
            Err(err) => Err(err),
        }
    }

    /// Rank all candidates by tally.
    ///
    /// Under concurrent voting the snapshot may be stale, but it never shows
    /// a half-applied vote.
    pub async fn compute_results(&self) -> Result<Ranking> {
        let mut candidates = self.storage.all_candidates().await?;
        // Stable sort: equal tallies keep the store's listing (insertion)
        // order, so the ranking is deterministic without a secondary key.
        candidates.sort_by(|a, b| b.votes.cmp(&a.votes));
        Ok(Ranking { candidates })
    }
}

/// Candidates ordered by descending tally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ranking {
    pub candidates: Vec<Candidate>,
}

impl Ranking {
    /// The designated winner: the first-ranked candidate, if any.
    /// A zero-vote candidate still wins a non-empty, all-zero field.
    pub fn winner(&self) -> Option<&Candidate> {
        self.candidates.first()
    }
}
