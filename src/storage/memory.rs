//! In-memory storage backing the test suite.

use std::sync::Arc;

use rocket::tokio::sync::{Mutex, OwnedMutexGuard};

use crate::error::{Error, Result};
use crate::model::db::{Candidate, NewCandidate, NewVoter, Voter};
use crate::model::mongodb::Id;
use crate::storage::{CandidateStore, TransactionalStorage, VoterStore};

#[derive(Debug, Clone, Default)]
struct MemoryState {
    candidates: Vec<Candidate>,
    voters: Vec<Voter>,
}

/// Lock-serialized transactional storage over plain vectors.
///
/// `begin` takes the state lock and clones a working copy; transactional
/// reads and writes go to the copy. `commit` publishes the copy wholesale,
/// `abort` drops it. The lock is held from `begin` until the outcome, so
/// transactions are fully serialized.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

pub struct MemoryTransaction {
    guard: OwnedMutexGuard<MemoryState>,
    working: MemoryState,
}

#[rocket::async_trait]
impl TransactionalStorage for MemoryStorage {
    type Txn = MemoryTransaction;

    async fn begin(&self) -> Result<MemoryTransaction> {
        let guard = Arc::clone(&self.state).lock_owned().await;
        let working = guard.clone();
        Ok(MemoryTransaction { guard, working })
    }

    async fn commit(&self, txn: MemoryTransaction) -> Result<()> {
        let MemoryTransaction { mut guard, working } = txn;
        *guard = working;
        Ok(())
    }

    async fn abort(&self, txn: MemoryTransaction) -> Result<()> {
        drop(txn);
        Ok(())
    }
}

#[rocket::async_trait]
impl CandidateStore for MemoryStorage {
    async fn create_candidate(&self, name: &str, description: &str) -> Result<Candidate> {
        let candidate = Candidate {
            id: Id::new(),
            candidate: NewCandidate::new(name.to_string(), description.to_string()),
        };
        self.state.lock().await.candidates.push(candidate.clone());
        Ok(candidate)
    }

    async fn all_candidates(&self) -> Result<Vec<Candidate>> {
        Ok(self.state.lock().await.candidates.clone())
    }

    async fn candidate_by_id(&self, id: Id) -> Result<Option<Candidate>> {
        Ok(self
            .state
            .lock()
            .await
            .candidates
            .iter()
            .find(|candidate| candidate.id == id)
            .cloned())
    }

    async fn candidate_by_id_in(
        &self,
        id: Id,
        txn: &mut MemoryTransaction,
    ) -> Result<Option<Candidate>> {
        Ok(txn
            .working
            .candidates
            .iter()
            .find(|candidate| candidate.id == id)
            .cloned())
    }

    async fn increment_votes(&self, id: Id, txn: &mut MemoryTransaction) -> Result<()> {
        let candidate = txn
            .working
            .candidates
            .iter_mut()
            .find(|candidate| candidate.id == id)
            .ok_or_else(|| Error::CandidateNotFound(id.to_string()))?;
        candidate.votes += 1;
        Ok(())
    }
}

#[rocket::async_trait]
impl VoterStore for MemoryStorage {
    async fn register_voter(&self, identifier: &str) -> Result<Voter> {
        let mut state = self.state.lock().await;
        if state.voters.iter().any(|voter| voter.identifier == identifier) {
            return Err(Error::DuplicateVoter(identifier.to_string()));
        }
        let voter = Voter {
            id: Id::new(),
            voter: NewVoter::new(identifier.to_string()),
        };
        state.voters.push(voter.clone());
        Ok(voter)
    }

    async fn voter_by_identifier(&self, identifier: &str) -> Result<Option<Voter>> {
        Ok(self
            .state
            .lock()
            .await
            .voters
            .iter()
            .find(|voter| voter.identifier == identifier)
            .cloned())
    }

    async fn voter_by_identifier_in(
        &self,
        identifier: &str,
        txn: &mut MemoryTransaction,
    ) -> Result<Option<Voter>> {
        Ok(txn
            .working
            .voters
            .iter()
            .find(|voter| voter.identifier == identifier)
            .cloned())
    }

    async fn mark_voted(&self, id: Id, candidate_id: Id, txn: &mut MemoryTransaction) -> Result<()> {
        let voter = txn
            .working
            .voters
            .iter_mut()
            .find(|voter| voter.id == id)
            .ok_or_else(|| Error::VoterNotFound(id.to_string()))?;
        voter.has_voted = true;
        voter.candidate = Some(candidate_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[rocket::async_test]
    async fn commit_publishes_writes() {
        let storage = MemoryStorage::new();
        let spec = NewCandidate::example();
        let candidate = storage
            .create_candidate(&spec.name, &spec.description)
            .await
            .unwrap();

        let mut txn = storage.begin().await.unwrap();
        storage.increment_votes(candidate.id, &mut txn).await.unwrap();
        // The write is visible inside the transaction before commit.
        let inside = storage
            .candidate_by_id_in(candidate.id, &mut txn)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(inside.votes, 1);
        storage.commit(txn).await.unwrap();

        let committed = storage.candidate_by_id(candidate.id).await.unwrap().unwrap();
        assert_eq!(committed.votes, 1);
    }

    #[rocket::async_test]
    async fn abort_discards_writes() {
        let storage = MemoryStorage::new();
        let spec = NewCandidate::example();
        let candidate = storage
            .create_candidate(&spec.name, &spec.description)
            .await
            .unwrap();
        let identifier = NewVoter::example().identifier;
        let voter = storage.register_voter(&identifier).await.unwrap();

        let mut txn = storage.begin().await.unwrap();
        storage.increment_votes(candidate.id, &mut txn).await.unwrap();
        storage
            .mark_voted(voter.id, candidate.id, &mut txn)
            .await
            .unwrap();
        storage.abort(txn).await.unwrap();

        let candidate = storage.candidate_by_id(candidate.id).await.unwrap().unwrap();
        assert_eq!(candidate.votes, 0);
        let voter = storage
            .voter_by_identifier(&identifier)
            .await
            .unwrap()
            .unwrap();
        assert!(!voter.has_voted);
        assert_eq!(voter.candidate, None);
    }

    #[rocket::async_test]
    async fn duplicate_identifier_is_rejected() {
        let storage = MemoryStorage::new();
        let identifier = NewVoter::example().identifier;
        storage.register_voter(&identifier).await.unwrap();
        let err = storage.register_voter(&identifier).await.unwrap_err();
        assert!(matches!(err, Error::DuplicateVoter(_)));
    }
}
