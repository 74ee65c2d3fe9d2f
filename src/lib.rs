#[macro_use]
extern crate rocket;

#[macro_use]
extern crate log;

pub mod api;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod logging;
pub mod model;
pub mod storage;

use rocket::{Build, Rocket};

use crate::config::DatabaseFairing;
use crate::logging::LoggerFairing;

/// Assemble the server: routes, request logging, and database wiring.
/// The returned instance is ready to ignite.
pub fn build() -> Rocket<Build> {
    rocket::build()
        .mount("/", api::routes())
        .attach(LoggerFairing)
        .attach(DatabaseFairing)
}
