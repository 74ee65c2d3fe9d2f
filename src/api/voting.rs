use rocket::{serde::json::Json, Route, State};

use crate::coordinator::Coordinator;
use crate::error::{Error, Result};
use crate::model::api::{ElectionResults, VoteRequest};
use crate::model::mongodb::Id;

pub fn routes() -> Vec<Route> {
    routes![cast_vote, get_results]
}

#[post("/vote", data = "<request>", format = "json")]
async fn cast_vote(request: Json<VoteRequest>, coordinator: &State<Coordinator>) -> Result<()> {
    let request = request.into_inner();
    let voter_id = request.voter_id.trim();
    if voter_id.is_empty() {
        return Err(Error::BadRequest(
            "Voter identifier must not be empty".to_string(),
        ));
    }
    // An unparseable ID cannot name any stored candidate.
    let candidate_id = request
        .candidate_id
        .parse::<Id>()
        .map_err(|_| Error::CandidateNotFound(request.candidate_id.clone()))?;

    coordinator.cast_vote(voter_id, candidate_id).await
}

#[get("/results")]
async fn get_results(coordinator: &State<Coordinator>) -> Result<Json<ElectionResults>> {
    let ranking = coordinator.compute_results().await?;
    Ok(Json(ranking.into()))
}
