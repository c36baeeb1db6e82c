pub use crate::{
    network::Network,
    redacting_url::RedactingUrl,
    validator_key::{Error as ValidatorKeyError, ValidatorKey},
    validator_status::ValidatorStatus,
};

use std::collections::BTreeMap;

pub mod network;
pub mod redacting_url;

mod validator_key;
mod validator_status;

/// Last observed status of every tracked validator.
///
/// Ordered so that persisted files and logs are stable across runs.
pub type StatusRecord = BTreeMap<ValidatorKey, ValidatorStatus>;
