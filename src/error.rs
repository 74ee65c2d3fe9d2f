use mongodb::error::Error as DbError;
use rocket::{
    http::{Status, StatusClass},
    response::Responder,
    Request,
};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Voter '{0}' not found")]
    VoterNotFound(String),
    #[error("Candidate '{0}' not found")]
    CandidateNotFound(String),
    #[error("Voter '{0}' has already cast their vote")]
    AlreadyVoted(String),
    #[error("Voter '{0}' is already registered")]
    DuplicateVoter(String),
    #[error("Bad request: {0}")]
    BadRequest(String),
    #[error("Vote transaction failed to commit: {0}")]
    TransactionFailed(#[source] DbError),
    #[error(transparent)]
    Db(#[from] DbError),
}

impl Error {
    /// The HTTP status this error is reported as.
    pub fn status(&self) -> Status {
        match self {
            Self::VoterNotFound(_) | Self::CandidateNotFound(_) => Status::NotFound,
            Self::AlreadyVoted(_) | Self::DuplicateVoter(_) | Self::BadRequest(_) => {
                Status::BadRequest
            }
            Self::TransactionFailed(_) | Self::Db(_) => Status::InternalServerError,
        }
    }
}

impl<'r, 'o: 'r> Responder<'r, 'o> for Error {
    fn respond_to(self, _: &'r Request<'_>) -> rocket::response::Result<'o> {
        let status = self.status();
        // Business rejections are routine; infrastructure faults are not.
        if status.class() == StatusClass::ServerError {
            error!("{self}");
        } else {
            warn!("{self}");
        }
        Err(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses() {
        assert_eq!(
            Error::VoterNotFound("V1".to_string()).status(),
            Status::NotFound
        );
        assert_eq!(
            Error::CandidateNotFound("abc".to_string()).status(),
            Status::NotFound
        );
        assert_eq!(
            Error::AlreadyVoted("V1".to_string()).status(),
            Status::BadRequest
        );
        assert_eq!(
            Error::DuplicateVoter("V1".to_string()).status(),
            Status::BadRequest
        );
        assert_eq!(
            Error::BadRequest("empty name".to_string()).status(),
            Status::BadRequest
        );
    }
}
