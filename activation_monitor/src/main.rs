use core::future::Future;
use std::process::ExitCode;

use anyhow::{Result, bail};
use beacon_api::BeaconApi;
use clap::{Error as ClapError, Parser as _};
use log::{error, info};
use monitor_version::APPLICATION_VERSION_WITH_PLATFORM;
use registration::{Dispatcher, KeyShares, RelayRegistrar};
use reqwest::ClientBuilder;
use runtime::{Monitor, Registration, RunOutcome};
use status_store::StatusStore;
use thiserror::Error;
use tokio::runtime::Builder;

use crate::{
    monitor_args::MonitorArgs,
    monitor_config::{MonitorConfig, RegistrationConfig},
};

mod commands;
mod monitor_args;
mod monitor_config;

#[derive(Debug, Error)]
enum Error {
    #[error("--beacon-node-url must be specified to monitor validators")]
    MissingBeaconNodeUrl,
}

fn main() -> ExitCode {
    match try_main() {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            if let Some(clap_error) = error.downcast_ref::<ClapError>() {
                // Help and version requests are reported through errors too.
                if clap_error.print().is_ok() && !clap_error.use_stderr() {
                    return ExitCode::SUCCESS;
                }
            } else {
                error!("{error:?}");
            }

            ExitCode::FAILURE
        }
    }
}

fn try_main() -> Result<()> {
    binary_utils::initialize_logger(module_path!(), false)?;

    let config = MonitorArgs::try_parse()?
        .try_into_config()
        .map_err(MonitorArgs::clap_error)?;

    config.report();

    let MonitorConfig {
        beacon_node_url,
        status_file,
        registration,
        poll_interval,
        request_timeout,
        public_keys,
        command,
        ..
    } = config;

    let store = StatusStore::new(status_file);

    if let Some(command) = command {
        return command.run(&store);
    }

    let Some(beacon_node_url) = beacon_node_url else {
        bail!(Error::MissingBeaconNodeUrl);
    };

    let client = ClientBuilder::new()
        .timeout(request_timeout)
        .user_agent(APPLICATION_VERSION_WITH_PLATFORM)
        .build()?;

    let registration = registration
        .map(|registration_config| {
            let RegistrationConfig {
                url,
                key_shares_file,
                mode,
            } = registration_config;

            let key_shares = KeyShares::load(key_shares_file)?;

            info!("loaded {} key shares", key_shares.len());

            Ok::<_, anyhow::Error>(Registration {
                dispatcher: Dispatcher::new(RelayRegistrar::new(client.clone(), url), mode),
                key_shares,
            })
        })
        .transpose()?;

    let mut monitor = Monitor::new(
        store,
        BeaconApi::new(client, beacon_node_url),
        registration,
        poll_interval,
    );

    monitor.seed(public_keys)?;

    info!("starting validator activation monitor");

    match block_on(monitor.run(runtime::wait_for_signal()))? {
        RunOutcome::Completed => info!("all tracked validators are active, exiting"),
        RunOutcome::Interrupted => info!("monitoring interrupted, progress is saved"),
    }

    Ok(())
}

fn block_on<T>(future: impl Future<Output = Result<T>>) -> Result<T> {
    // Cycles run strictly one after another, so a single thread is enough.
    Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(future)
}
