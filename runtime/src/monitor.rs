use core::{future::Future, pin::pin, task::Poll, time::Duration};

use anyhow::Result;
use beacon_api::BeaconApi;
use log::{debug, info, warn};
use reconciler::Reconciliation;
use registration::{Dispatcher, KeyShares, Registrar, RegistrationOutcome};
use status_store::StatusStore;
use types::ValidatorKey;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum CycleOutcome {
    /// No tracked validator is pending. The store has been cleared.
    Done,
    /// Statuses were updated and some validators are still pending.
    Pending { remaining: usize },
    /// The beacon node could not be queried. Nothing was changed.
    Skipped,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum RunOutcome {
    Completed,
    Interrupted,
}

pub struct Registration<R> {
    pub dispatcher: Dispatcher<R>,
    pub key_shares: KeyShares,
}

/// Polls the beacon node until every tracked validator has left the activation queue.
pub struct Monitor<R> {
    store: StatusStore,
    beacon_api: BeaconApi,
    registration: Option<Registration<R>>,
    poll_interval: Duration,
}

impl<R: Registrar> Monitor<R> {
    #[must_use]
    pub const fn new(
        store: StatusStore,
        beacon_api: BeaconApi,
        registration: Option<Registration<R>>,
        poll_interval: Duration,
    ) -> Self {
        Self {
            store,
            beacon_api,
            registration,
            poll_interval,
        }
    }

    /// Starts tracking `keys` as `pending_queued` unless they are tracked already.
    pub fn seed(&self, keys: impl IntoIterator<Item = ValidatorKey>) -> Result<usize> {
        let mut record = self.store.load();
        let seeded = reconciler::seed(&mut record, keys);

        if seeded > 0 {
            self.store.save(&record)?;
        }

        info!(
            "tracking {seeded} new validators ({} in total) in {:?}",
            record.len(),
            self.store.path(),
        );

        Ok(seeded)
    }

    /// Runs cycles until no validator is pending or `shutdown` resolves.
    ///
    /// `shutdown` is checked before every cycle and while sleeping between cycles.
    /// A cycle in progress is always finished.
    pub async fn run(&mut self, shutdown: impl Future<Output = Result<()>>) -> Result<RunOutcome> {
        let mut shutdown = pin!(shutdown);

        loop {
            if let Poll::Ready(result) = futures::poll!(shutdown.as_mut()) {
                result?;
                info!("received shutdown signal, stopping");
                return Ok(RunOutcome::Interrupted);
            }

            match self.run_cycle().await? {
                CycleOutcome::Done => return Ok(RunOutcome::Completed),
                CycleOutcome::Pending { remaining } => info!(
                    "{remaining} validators still pending activation, checking again in {:?}",
                    self.poll_interval,
                ),
                CycleOutcome::Skipped => {}
            }

            tokio::select! {
                biased;

                result = shutdown.as_mut() => {
                    result?;
                    info!("received shutdown signal, stopping");
                    return Ok(RunOutcome::Interrupted);
                }
                () = tokio::time::sleep(self.poll_interval) => {}
            }
        }
    }

    /// Performs a single poll of the beacon node.
    ///
    /// Only persistence failures are returned as errors.
    /// Beacon node failures are logged and reported as [`CycleOutcome::Skipped`].
    pub async fn run_cycle(&mut self) -> Result<CycleOutcome> {
        let previous = self.store.load();
        let pending = reconciler::pending_keys(&previous);

        if pending.is_empty() {
            info!("no validators pending activation");
            self.store.clear()?;
            return Ok(CycleOutcome::Done);
        }

        debug!("querying statuses of {} pending validators", pending.len());

        let observed = match self.beacon_api.fetch(pending).await {
            Ok(observed) => observed,
            Err(error) => {
                let error = anyhow::Error::new(error);

                warn!(
                    "failed to fetch validator statuses from {}: {error:#}; retrying in {:?}",
                    self.beacon_api.base_url(),
                    self.poll_interval,
                );

                return Ok(CycleOutcome::Skipped);
            }
        };

        let Reconciliation {
            record,
            activated,
            pending,
        } = reconciler::reconcile(
            &previous,
            observed.iter().map(|(key, info)| (*key, info.status)),
        );

        for key in &activated {
            if let Some(info) = observed.get(key) {
                info!(
                    "validator {key} (index {}) activated at epoch {}",
                    info.index, info.activation_epoch,
                );
            }
        }

        if !activated.is_empty() {
            self.register(activated).await;
        }

        if pending.is_empty() {
            info!("all tracked validators are active");
            self.store.clear()?;
            return Ok(CycleOutcome::Done);
        }

        self.store.save(&record)?;

        Ok(CycleOutcome::Pending {
            remaining: pending.len(),
        })
    }

    async fn register(&mut self, activated: impl IntoIterator<Item = ValidatorKey>) {
        let Some(Registration {
            dispatcher,
            key_shares,
        }) = self.registration.as_mut()
        else {
            debug!("no registration relay configured, not registering activated validators");
            return;
        };

        let outcomes = dispatcher.dispatch(activated, key_shares).await;

        let failed = outcomes
            .iter()
            .filter(|(_, outcome)| matches!(outcome, RegistrationOutcome::Failed { .. }))
            .count();

        // TODO: Track registration separately from status so that failed registrations are retried.
        if failed > 0 {
            warn!(
                "registration of {failed} validators failed; \
                 they are active now and will not be registered automatically",
            );
        }
    }
}
