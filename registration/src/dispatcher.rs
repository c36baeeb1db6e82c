use itertools::Itertools as _;
use log::{error, info, warn};
use parse_display::{Display, FromStr};
use types::ValidatorKey;

use crate::{KeyShare, KeyShares, Registrar};

// Relays reject request bodies with more registrations than this.
pub const MAX_KEY_SHARES_PER_REGISTRATION: usize = 500;

#[derive(Clone, Copy, PartialEq, Eq, Default, Debug, Display, FromStr)]
#[display(style = "kebab-case")]
pub enum RegistrationMode {
    /// Submit key shares in batches of up to [`MAX_KEY_SHARES_PER_REGISTRATION`].
    #[default]
    Bulk,
    /// Submit every key share in a separate request.
    PerKey,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum RegistrationOutcome {
    Registered,
    MissingPayload,
    Failed { message: String },
}

pub struct Dispatcher<R> {
    registrar: R,
    mode: RegistrationMode,
}

impl<R: Registrar> Dispatcher<R> {
    #[must_use]
    pub const fn new(registrar: R, mode: RegistrationMode) -> Self {
        Self { registrar, mode }
    }

    #[must_use]
    pub const fn mode(&self) -> RegistrationMode {
        self.mode
    }

    /// Registers the validators behind `keys`, consuming their key shares.
    ///
    /// Never fails as a whole. The outcome of every key is returned in key order.
    pub async fn dispatch(
        &self,
        keys: impl IntoIterator<Item = ValidatorKey>,
        key_shares: &mut KeyShares,
    ) -> Vec<(ValidatorKey, RegistrationOutcome)> {
        let mut outcomes = vec![];
        let mut resolved = vec![];

        for key in keys.into_iter().sorted().dedup() {
            match key_shares.take(&key) {
                Some(share) => resolved.push(share),
                None => {
                    warn!("no key share for activated validator {key}, skipping registration");
                    outcomes.push((key, RegistrationOutcome::MissingPayload));
                }
            }
        }

        let batch_size = match self.mode {
            RegistrationMode::Bulk => MAX_KEY_SHARES_PER_REGISTRATION,
            RegistrationMode::PerKey => 1,
        };

        for batch in resolved.chunks(batch_size) {
            let outcome = self.register_batch(batch).await;

            outcomes.extend(batch.iter().map(|share| (share.public_key, outcome.clone())));
        }

        outcomes.sort_by_key(|(key, _)| *key);
        outcomes
    }

    async fn register_batch(&self, batch: &[KeyShare]) -> RegistrationOutcome {
        let keys = batch.iter().map(|share| share.public_key).format(", ");

        match self.registrar.register(batch).await {
            Ok(()) => {
                info!("registered validators: [{keys}]");
                RegistrationOutcome::Registered
            }
            Err(registration_error) => {
                error!("failed to register validators [{keys}]: {registration_error:#}");

                RegistrationOutcome::Failed {
                    message: format!("{registration_error:#}"),
                }
            }
        }
    }
}
