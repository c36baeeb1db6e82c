use core::time::Duration;
use std::path::PathBuf;

use log::info;
use registration::RegistrationMode;
use types::{Network, RedactingUrl, ValidatorKey};

use crate::commands::MonitorCommand;

#[derive(Debug)]
#[cfg_attr(test, derive(PartialEq, Eq))]
pub struct MonitorConfig {
    pub network: Network,
    pub beacon_node_url: Option<RedactingUrl>,
    pub status_file: PathBuf,
    pub registration: Option<RegistrationConfig>,
    pub poll_interval: Duration,
    pub request_timeout: Duration,
    pub public_keys: Vec<ValidatorKey>,
    pub command: Option<MonitorCommand>,
}

#[derive(Debug)]
#[cfg_attr(test, derive(PartialEq, Eq))]
pub struct RegistrationConfig {
    pub url: RedactingUrl,
    pub key_shares_file: PathBuf,
    pub mode: RegistrationMode,
}

impl MonitorConfig {
    pub fn report(&self) {
        for line in self.report_lines() {
            info!("{line}");
        }
    }

    // Subcommands only touch the status file, so the rest of the configuration is left out.
    fn report_lines(&self) -> Vec<String> {
        let Self {
            network,
            beacon_node_url,
            status_file,
            registration,
            poll_interval,
            request_timeout,
            public_keys,
            command,
        } = self;

        let mut lines = vec![
            format!("network: {network}"),
            format!("validator status file: {status_file:?}"),
        ];

        if command.is_some() {
            return lines;
        }

        if let Some(beacon_node_url) = beacon_node_url {
            lines.push(format!("beacon node: {beacon_node_url}"));
        }

        match registration {
            Some(RegistrationConfig {
                url,
                key_shares_file,
                mode,
            }) => {
                lines.push(format!("registration relay: {url} ({mode})"));
                lines.push(format!("key shares file: {key_shares_file:?}"));
            }
            None => lines.push(
                "registration relay: none, activated validators will not be registered".to_owned(),
            ),
        }

        lines.push(format!("poll interval: {poll_interval:?}"));
        lines.push(format!("request timeout: {request_timeout:?}"));

        if !public_keys.is_empty() {
            lines.push(format!(
                "validators to start tracking: {}",
                public_keys.len(),
            ));
        }

        lines
    }
}
