use rocket::{http::Status, serde::json::Json, Route, State};

use crate::error::{Error, Result};
use crate::model::api::{CandidateDescription, CandidateSpec};
use crate::storage::{CandidateStore, MongoStorage};

pub fn routes() -> Vec<Route> {
    routes![create_candidate, get_candidates]
}

#[post("/candidates", data = "<spec>", format = "json")]
async fn create_candidate(
    spec: Json<CandidateSpec>,
    storage: &State<MongoStorage>,
) -> Result<(Status, Json<CandidateDescription>)> {
    let name = spec.name.trim();
    let description = spec.description.trim();
    if name.is_empty() {
        return Err(Error::BadRequest(
            "Candidate name must not be empty".to_string(),
        ));
    }
    if description.is_empty() {
        return Err(Error::BadRequest(
            "Candidate description must not be empty".to_string(),
        ));
    }

    let candidate = storage.create_candidate(name, description).await?;
    Ok((Status::Created, Json(candidate.into())))
}

#[get("/candidates")]
async fn get_candidates(
    storage: &State<MongoStorage>,
) -> Result<Json<Vec<CandidateDescription>>> {
    let candidates = storage.all_candidates().await?;
    Ok(Json(candidates.into_iter().map(Into::into).collect()))
}
