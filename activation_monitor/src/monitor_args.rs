use core::{fmt::Display, time::Duration};
use std::path::PathBuf;

use anyhow::{Result, ensure};
use clap::{CommandFactory as _, Error as ClapError, Parser, error::ErrorKind};
use directories::Directories;
use monitor_version::{APPLICATION_NAME, APPLICATION_VERSION};
use registration::RegistrationMode;
use thiserror::Error;
use types::{Network, RedactingUrl, ValidatorKey};

use crate::{
    commands::MonitorCommand,
    monitor_config::{MonitorConfig, RegistrationConfig},
};

const DEFAULT_REQUEST_TIMEOUT: u64 = 30000;

/// Follows validators through the activation queue
/// and registers them with a validator-management network once they become active
#[derive(Parser)]
#[clap(
    display_name = APPLICATION_NAME,
    verbatim_doc_comment,
    version = APPLICATION_VERSION,
    subcommand_negates_reqs = true,
)]
pub struct MonitorArgs {
    /// Beacon Node API endpoint to query validator statuses from
    #[clap(long, env = "BEACON_NODE_URL", required = true)]
    beacon_node_url: Option<RedactingUrl>,

    /// Name of the Eth2 network the validators belong to
    #[clap(long, env = "NETWORK", default_value_t = Network::default())]
    network: Network,

    /// Path to a custom directory for application data
    /// [default: $HOME/.activation_monitor/NETWORK]
    #[clap(long, env = "DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Path to the file that stores validator statuses between runs
    /// [default: DATA_DIR/validator_statuses.json]
    #[clap(long, env = "STATUS_FILE")]
    status_file: Option<PathBuf>,

    /// Path to a JSON array of key shares to register validators with once they are active
    #[clap(long, env = "KEY_SHARES_FILE", requires = "registration_url")]
    key_shares_file: Option<PathBuf>,

    /// Endpoint of the relay that submits key shares to the validator-management network
    #[clap(long, env = "REGISTRATION_URL", requires = "key_shares_file")]
    registration_url: Option<RedactingUrl>,

    /// Whether to submit key shares in batches (bulk) or one at a time (per-key)
    #[clap(long, env = "REGISTRATION_MODE", default_value_t = RegistrationMode::default())]
    registration_mode: RegistrationMode,

    /// Delay between beacon node queries in seconds
    /// [default: duration of an epoch in NETWORK]
    #[clap(long, env = "POLL_INTERVAL", value_name = "SECONDS")]
    poll_interval: Option<u64>,

    /// Timeout of every HTTP request in milliseconds
    #[clap(
        long,
        env = "REQUEST_TIMEOUT",
        value_name = "MILLISECONDS",
        default_value_t = DEFAULT_REQUEST_TIMEOUT,
    )]
    request_timeout: u64,

    /// Public keys of validators to start tracking
    #[clap(value_name = "PUBLIC_KEY")]
    public_keys: Vec<ValidatorKey>,

    #[clap(subcommand)]
    command: Option<MonitorCommand>,
}

#[derive(Debug, Error)]
enum Error {
    #[error("--poll-interval must be greater than zero")]
    ZeroPollInterval,
    #[error("--request-timeout must be greater than zero")]
    ZeroRequestTimeout,
}

impl MonitorArgs {
    pub fn try_into_config(self) -> Result<MonitorConfig> {
        let Self {
            beacon_node_url,
            network,
            data_dir,
            status_file,
            key_shares_file,
            registration_url,
            registration_mode,
            poll_interval,
            request_timeout,
            public_keys,
            command,
        } = self;

        ensure!(poll_interval != Some(0), Error::ZeroPollInterval);
        ensure!(request_timeout != 0, Error::ZeroRequestTimeout);

        let Directories { status_file, .. } = Directories {
            data_dir,
            status_file,
        }
        .set_defaults(network);

        let status_file = status_file.unwrap_or_default();

        let registration = key_shares_file.zip(registration_url).map(|(key_shares_file, url)| {
            RegistrationConfig {
                url,
                key_shares_file,
                mode: registration_mode,
            }
        });

        let poll_interval = poll_interval.map_or_else(|| network.epoch_duration(), Duration::from_secs);

        Ok(MonitorConfig {
            network,
            beacon_node_url,
            status_file,
            registration,
            poll_interval,
            request_timeout: Duration::from_millis(request_timeout),
            public_keys,
            command,
        })
    }

    pub fn clap_error(message: impl Display) -> ClapError {
        Self::command().error(ErrorKind::ValueValidation, message)
    }
}
