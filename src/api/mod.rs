use rocket::Route;

mod candidate;
mod voter;
mod voting;

pub fn routes() -> Vec<Route> {
    let mut routes = Vec::new();
    routes.extend(candidate::routes());
    routes.extend(voter::routes());
    routes.extend(voting::routes());
    routes
}
