use rocket::{http::Status, serde::json::Json, Route, State};

use crate::coordinator::Coordinator;
use crate::error::{Error, Result};
use crate::model::api::{VoterDescription, VoterSpec, VoterStatus};
use crate::storage::{MongoStorage, VoterStore};

pub fn routes() -> Vec<Route> {
    routes![register_voter, get_voter_status, find_or_register_voter]
}

#[post("/voters", data = "<spec>", format = "json")]
async fn register_voter(
    spec: Json<VoterSpec>,
    storage: &State<MongoStorage>,
) -> Result<(Status, Json<VoterDescription>)> {
    let identifier = spec.identifier.trim();
    if identifier.is_empty() {
        return Err(Error::BadRequest(
            "Voter identifier must not be empty".to_string(),
        ));
    }

    let voter = storage.register_voter(identifier).await?;
    Ok((Status::Created, Json(voter.into())))
}

#[get("/voters/<identifier>")]
async fn get_voter_status(
    identifier: &str,
    storage: &State<MongoStorage>,
) -> Result<Json<VoterStatus>> {
    let voter = storage
        .voter_by_identifier(identifier)
        .await?
        .ok_or_else(|| Error::VoterNotFound(identifier.to_string()))?;
    Ok(Json(voter.into()))
}

/// Idempotent registration: an existing voter is returned as-is, a new one
/// is created, and losing the creation race to a concurrent request still
/// succeeds.
#[put("/voters/<identifier>")]
async fn find_or_register_voter(
    identifier: &str,
    coordinator: &State<Coordinator>,
) -> Result<Json<VoterDescription>> {
    let voter = coordinator.find_or_register(identifier).await?;
    Ok(Json(voter.into()))
}
