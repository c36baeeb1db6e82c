use std::collections::{BTreeMap, BTreeSet};

use itertools::Itertools as _;
use log::{debug, warn};
use reqwest::{Client, StatusCode};
use thiserror::Error;
use types::{RedactingUrl, ValidatorKey, ValidatorStatus};

use crate::containers::{StateValidatorsResponse, ValidatorInfo};

const STATE_VALIDATORS_PATH: &str = "/eth/v1/beacon/states/head/validators";

pub type ValidatorStatuses = BTreeMap<ValidatorKey, ValidatorInfo>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("no validator public keys to query")]
    NoKeys,
    #[error("failed to reach beacon node")]
    Transport { source: reqwest::Error },
    #[error("beacon node responded with status {status} (response: {message})")]
    UnexpectedStatus { status: StatusCode, message: String },
    #[error("beacon node response could not be parsed")]
    MalformedBody { source: serde_json::Error },
}

impl From<reqwest::Error> for Error {
    fn from(source: reqwest::Error) -> Self {
        Self::Transport { source }
    }
}

/// Client for the subset of the Beacon Node API needed to follow validator activation.
///
/// Performs no retries. Callers decide when to try again.
pub struct Api {
    client: Client,
    base_url: RedactingUrl,
}

impl Api {
    #[must_use]
    pub const fn new(client: Client, base_url: RedactingUrl) -> Self {
        Self { client, base_url }
    }

    #[must_use]
    pub const fn base_url(&self) -> &RedactingUrl {
        &self.base_url
    }

    /// Fetches the current status of `keys` with a single request.
    ///
    /// Duplicate keys are queried once. Keys unknown to the beacon node are absent from the result.
    pub async fn fetch(
        &self,
        keys: impl IntoIterator<Item = ValidatorKey>,
    ) -> Result<ValidatorStatuses, Error> {
        let keys = keys.into_iter().collect::<BTreeSet<_>>();

        if keys.is_empty() {
            return Err(Error::NoKeys);
        }

        let url = self.base_url.join_path(STATE_VALIDATORS_PATH);

        debug!("fetching statuses of {} validators from {url}", keys.len());

        let response = self
            .client
            .get(url.into_url())
            .query(&state_validators_query(&keys))
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let message = response.text().await?;
            return Err(Error::UnexpectedStatus { status, message });
        }

        let bytes = response.bytes().await?;

        let StateValidatorsResponse {
            execution_optimistic,
            data,
        } = serde_json::from_slice(&bytes).map_err(|source| Error::MalformedBody { source })?;

        if execution_optimistic {
            warn!("beacon node head is optimistic, reported validator statuses may be reverted");
        }

        let statuses = data
            .into_iter()
            .map(Into::into)
            .collect::<ValidatorStatuses>();

        debug!(
            "beacon node reported statuses of {} out of {} validators",
            statuses.len(),
            keys.len(),
        );

        Ok(statuses)
    }
}

// Every status is requested explicitly rather than leaving the filter out.
// Filtering by status happens on our side by choosing which keys to query.
fn state_validators_query(keys: &BTreeSet<ValidatorKey>) -> Vec<(&'static str, String)> {
    let statuses = ValidatorStatus::ALL.iter().join(",");

    core::iter::once(("status", statuses))
        .chain(keys.iter().map(|key| ("id", key.to_string())))
        .collect()
}
