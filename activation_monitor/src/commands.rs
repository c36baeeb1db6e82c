use anyhow::Result;
use clap::Subcommand;
use log::info;
use status_store::StatusStore;

#[derive(Clone, Copy, Debug, Subcommand)]
#[cfg_attr(test, derive(PartialEq, Eq))]
pub enum MonitorCommand {
    /// Show tracked validators with their last observed statuses
    /// (example: activation_monitor status)
    Status,

    /// Stop tracking all validators
    /// (example: activation_monitor clear)
    Clear,
}

impl MonitorCommand {
    pub fn run(self, store: &StatusStore) -> Result<()> {
        match self {
            Self::Status => {
                let record = store.load();

                if record.is_empty() {
                    info!("no validators tracked in {:?}", store.path());
                    return Ok(());
                }

                for (key, status) in &record {
                    info!("{key}: {status}");
                }

                for (status, count) in reconciler::status_counts(&record) {
                    info!("{count} validators {status}");
                }
            }
            Self::Clear => {
                store.clear()?;
                info!("stopped tracking all validators in {:?}", store.path());
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;
    use types::{StatusRecord, ValidatorKey, ValidatorStatus};

    use super::*;

    fn store_with_validator(directory: &TempDir) -> Result<(StatusStore, StatusRecord)> {
        let store = StatusStore::new(directory.path().join("validator_statuses.json"));
        let record = StatusRecord::from([(ValidatorKey::from([1; 48]), ValidatorStatus::PendingQueued)]);

        store.save(&record)?;

        Ok((store, record))
    }

    #[test]
    fn status_leaves_store_unchanged() -> Result<()> {
        let directory = TempDir::new()?;
        let (store, record) = store_with_validator(&directory)?;

        MonitorCommand::Status.run(&store)?;

        assert_eq!(store.load(), record);

        Ok(())
    }

    #[test]
    fn clear_empties_store() -> Result<()> {
        let directory = TempDir::new()?;
        let (store, _) = store_with_validator(&directory)?;

        MonitorCommand::Clear.run(&store)?;

        assert_eq!(fs_err::read_to_string(store.path())?, "{}\n");

        Ok(())
    }
}
