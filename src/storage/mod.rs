//! Storage contracts consumed by the vote coordinator.
//!
//! The two entity stores share a transaction type through their common
//! [`TransactionalStorage`] supertrait, so a single transaction can span a
//! candidate write and a voter write. Plain (non-`_in`) operations are
//! independent reads/writes with no cross-entity invariant to protect and
//! run outside any transaction.

mod mongo;
pub use mongo::MongoStorage;

#[cfg(test)]
pub mod memory;

use crate::error::Result;
use crate::model::db::{Candidate, Voter};
use crate::model::mongodb::Id;

/// Session-scoped atomic multi-document transactions.
#[rocket::async_trait]
pub trait TransactionalStorage: Send + Sync {
    type Txn: Send;

    /// Open a transaction. Reads and writes made through it see an isolated
    /// snapshot until committed.
    async fn begin(&self) -> Result<Self::Txn>;

    /// Atomically publish every write made in the transaction.
    /// On failure no partial state becomes visible.
    async fn commit(&self, txn: Self::Txn) -> Result<()>;

    /// Discard the transaction; none of its writes become visible.
    async fn abort(&self, txn: Self::Txn) -> Result<()>;
}

/// Create, list and tally candidates.
#[rocket::async_trait]
pub trait CandidateStore: TransactionalStorage {
    /// Insert a new candidate with a zeroed tally.
    async fn create_candidate(&self, name: &str, description: &str) -> Result<Candidate>;

    /// All candidates, in insertion order.
    async fn all_candidates(&self) -> Result<Vec<Candidate>>;

    async fn candidate_by_id(&self, id: Id) -> Result<Option<Candidate>>;

    /// Transaction-scoped lookup.
    async fn candidate_by_id_in(&self, id: Id, txn: &mut Self::Txn) -> Result<Option<Candidate>>;

    /// Add exactly one vote to the candidate's tally, within the supplied
    /// transaction.
    async fn increment_votes(&self, id: Id, txn: &mut Self::Txn) -> Result<()>;
}

/// Register and look up voters.
#[rocket::async_trait]
pub trait VoterStore: TransactionalStorage {
    /// Insert a new voter who has not voted. Fails with
    /// [`Error::DuplicateVoter`](crate::error::Error::DuplicateVoter) if the
    /// identifier is already registered.
    async fn register_voter(&self, identifier: &str) -> Result<Voter>;

    async fn voter_by_identifier(&self, identifier: &str) -> Result<Option<Voter>>;

    /// Transaction-scoped lookup.
    async fn voter_by_identifier_in(
        &self,
        identifier: &str,
        txn: &mut Self::Txn,
    ) -> Result<Option<Voter>>;

    /// Record the voter's choice: sets the has-voted flag and the candidate
    /// reference in a single write, within the supplied transaction.
    async fn mark_voted(&self, id: Id, candidate_id: Id, txn: &mut Self::Txn) -> Result<()>;
}
