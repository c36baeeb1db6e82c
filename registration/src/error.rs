use std::path::PathBuf;

use thiserror::Error;
use types::ValidatorKey;

#[derive(Debug, Error)]
pub enum Error {
    #[error("key shares file {path:?} contains more than one key share for validator {public_key}")]
    DuplicateKeyShare {
        path: PathBuf,
        public_key: ValidatorKey,
    },
    #[error("key shares file {path:?} is malformed")]
    MalformedKeyShares {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("bad request to registration relay (relay response: {message})")]
    BadRequest { message: String },
    #[error("registration relay internal error (relay response: {message})")]
    RelayInternalError { message: String },
}
