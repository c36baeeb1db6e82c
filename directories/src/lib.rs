use std::path::PathBuf;

use types::Network;

const DATA_DIRECTORY_NAME: &str = ".activation_monitor";
const STATUS_FILE_NAME: &str = "validator_statuses.json";

#[derive(Debug, Default)]
pub struct Directories {
    pub data_dir: Option<PathBuf>,
    pub status_file: Option<PathBuf>,
}

impl Directories {
    #[must_use]
    pub fn set_defaults(mut self, network: Network) -> Self {
        let Self {
            data_dir,
            status_file,
        } = &mut self;

        // `~/.activation_monitor` or `.activation_monitor`
        if data_dir.is_none() {
            *data_dir = Some(dirs::home_dir().unwrap_or_default().join(DATA_DIRECTORY_NAME));
        }

        // `~/.activation_monitor/NETWORK_NAME`
        if let Some(data_dir) = data_dir.as_mut() {
            data_dir.push(network.to_string());
        }

        // `~/.activation_monitor/NETWORK_NAME/validator_statuses.json`
        if status_file.is_none() {
            *status_file = data_dir
                .as_ref()
                .map(|data_dir| data_dir.join(STATUS_FILE_NAME));
        }

        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_defaults_places_status_file_in_network_directory() {
        let directories = Directories {
            data_dir: Some("/var/lib/monitor".into()),
            status_file: None,
        }
        .set_defaults(Network::Holesky);

        assert_eq!(
            directories.data_dir,
            Some(PathBuf::from("/var/lib/monitor/holesky")),
        );
        assert_eq!(
            directories.status_file,
            Some(PathBuf::from("/var/lib/monitor/holesky/validator_statuses.json")),
        );
    }

    #[test]
    fn set_defaults_keeps_explicit_status_file() {
        let directories = Directories {
            data_dir: None,
            status_file: Some("statuses.json".into()),
        }
        .set_defaults(Network::Mainnet);

        assert_eq!(directories.status_file, Some(PathBuf::from("statuses.json")));
        assert!(
            directories
                .data_dir
                .is_some_and(|data_dir| data_dir.ends_with(".activation_monitor/mainnet")),
        );
    }
}
