//! API-compatible types: the request and response bodies of the HTTP
//! surface, serialised in a browser-friendly way (hex IDs, RFC 3339
//! datetimes, camelCase keys).

mod candidate;
pub use candidate::{CandidateDescription, CandidateSpec};

mod results;
pub use results::ElectionResults;

mod vote;
pub use vote::VoteRequest;

mod voter;
pub use voter::{VoterDescription, VoterSpec, VoterStatus};
