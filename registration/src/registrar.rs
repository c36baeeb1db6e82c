use anyhow::{Result, bail};
use async_trait::async_trait;
use log::debug;
use reqwest::{Client, Response};
use types::RedactingUrl;

use crate::{Error, KeyShare};

/// Submits key shares to a validator-management network.
#[async_trait]
pub trait Registrar: Send + Sync {
    async fn register(&self, key_shares: &[KeyShare]) -> Result<()>;
}

/// Forwards key shares to an HTTP relay that signs and submits the registration transactions.
pub struct RelayRegistrar {
    client: Client,
    url: RedactingUrl,
}

impl RelayRegistrar {
    #[must_use]
    pub const fn new(client: Client, url: RedactingUrl) -> Self {
        Self { client, url }
    }

    #[must_use]
    pub const fn url(&self) -> &RedactingUrl {
        &self.url
    }
}

#[async_trait]
impl Registrar for RelayRegistrar {
    async fn register(&self, key_shares: &[KeyShare]) -> Result<()> {
        debug!(
            "submitting {} key shares to registration relay at {}",
            key_shares.len(),
            self.url,
        );

        let response = self
            .client
            .post(self.url.clone().into_url())
            .json(key_shares)
            .send()
            .await?;

        handle_error(response).await?;

        Ok(())
    }
}

async fn handle_error(response: Response) -> Result<Response> {
    if response.status().is_client_error() {
        let message = response.text().await?;
        bail!(Error::BadRequest { message });
    }

    if response.status().is_server_error() {
        let message = response.text().await?;
        bail!(Error::RelayInternalError { message });
    }

    Ok(response)
}
