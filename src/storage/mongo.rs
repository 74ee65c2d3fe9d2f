use mongodb::{bson::doc, Client, ClientSession, Database};
use rocket::futures::TryStreamExt;

use crate::error::{Error, Result};
use crate::model::db::{Candidate, NewCandidate, NewVoter, Voter};
use crate::model::mongodb::{is_duplicate_key_error, Coll, Id};
use crate::storage::{CandidateStore, TransactionalStorage, VoterStore};

/// Production storage: MongoDB collections behind the store contracts, with
/// multi-document transactions on the vote path.
#[derive(Clone)]
pub struct MongoStorage {
    client: Client,
    db: Database,
}

impl MongoStorage {
    pub fn new(client: Client, db: Database) -> Self {
        Self { client, db }
    }

    fn candidates(&self) -> Coll<Candidate> {
        Coll::from_db(&self.db)
    }

    fn voters(&self) -> Coll<Voter> {
        Coll::from_db(&self.db)
    }
}

#[rocket::async_trait]
impl TransactionalStorage for MongoStorage {
    type Txn = ClientSession;

    async fn begin(&self) -> Result<ClientSession> {
        let mut session = self.client.start_session(None).await?;
        session.start_transaction(None).await?;
        Ok(session)
    }

    async fn commit(&self, mut txn: ClientSession) -> Result<()> {
        txn.commit_transaction()
            .await
            .map_err(Error::TransactionFailed)
    }

    async fn abort(&self, mut txn: ClientSession) -> Result<()> {
        txn.abort_transaction().await?;
        Ok(())
    }
}

#[rocket::async_trait]
impl CandidateStore for MongoStorage {
    async fn create_candidate(&self, name: &str, description: &str) -> Result<Candidate> {
        let candidate = NewCandidate::new(name.to_string(), description.to_string());
        let id: Id = Coll::<NewCandidate>::from_db(&self.db)
            .insert_one(&candidate, None)
            .await?
            .inserted_id
            .as_object_id()
            .unwrap() // Valid because the ID comes directly from the DB
            .into();
        Ok(Candidate { id, candidate })
    }

    async fn all_candidates(&self) -> Result<Vec<Candidate>> {
        // Unsorted: the natural listing order is the ranking tie-break.
        let candidates = self
            .candidates()
            .find(None, None)
            .await?
            .try_collect()
            .await?;
        Ok(candidates)
    }

    async fn candidate_by_id(&self, id: Id) -> Result<Option<Candidate>> {
        Ok(self.candidates().find_one(id.as_doc(), None).await?)
    }

    async fn candidate_by_id_in(
        &self,
        id: Id,
        txn: &mut ClientSession,
    ) -> Result<Option<Candidate>> {
        Ok(self
            .candidates()
            .find_one_with_session(id.as_doc(), None, txn)
            .await?)
    }

    async fn increment_votes(&self, id: Id, txn: &mut ClientSession) -> Result<()> {
        let update = doc! { "$inc": { "votes": 1 } };
        let result = self
            .candidates()
            .update_one_with_session(id.as_doc(), update, None, txn)
            .await?;
        if result.matched_count == 0 {
            return Err(Error::CandidateNotFound(id.to_string()));
        }
        Ok(())
    }
}

#[rocket::async_trait]
impl VoterStore for MongoStorage {
    async fn register_voter(&self, identifier: &str) -> Result<Voter> {
        let voter = NewVoter::new(identifier.to_string());
        let result = Coll::<NewVoter>::from_db(&self.db)
            .insert_one(&voter, None)
            .await;
        match result {
            Ok(insert) => {
                let id: Id = insert
                    .inserted_id
                    .as_object_id()
                    .unwrap() // Valid because the ID comes directly from the DB
                    .into();
                Ok(Voter { id, voter })
            }
            Err(err) if is_duplicate_key_error(&err) => {
                Err(Error::DuplicateVoter(identifier.to_string()))
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn voter_by_identifier(&self, identifier: &str) -> Result<Option<Voter>> {
        let filter = doc! { "identifier": identifier };
        Ok(self.voters().find_one(filter, None).await?)
    }

    async fn voter_by_identifier_in(
        &self,
        identifier: &str,
        txn: &mut ClientSession,
    ) -> Result<Option<Voter>> {
        let filter = doc! { "identifier": identifier };
        Ok(self
            .voters()
            .find_one_with_session(filter, None, txn)
            .await?)
    }

    async fn mark_voted(&self, id: Id, candidate_id: Id, txn: &mut ClientSession) -> Result<()> {
        // A single write keeps the flag and the reference in lockstep.
        let update = doc! { "$set": { "hasVoted": true, "candidate": *candidate_id } };
        let result = self
            .voters()
            .update_one_with_session(id.as_doc(), update, None, txn)
            .await?;
        if result.matched_count == 0 {
            return Err(Error::VoterNotFound(id.to_string()));
        }
        Ok(())
    }
}
