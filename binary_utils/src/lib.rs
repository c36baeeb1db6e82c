use std::io::{self, IsTerminal as _, Write as _};

use anyhow::Result;
use chrono::{Local, SecondsFormat};
use env_logger::{Builder, WriteStyle};
use log::LevelFilter;

const LOG_ENVIRONMENT_VARIABLE: &str = "ACTIVATION_MONITOR_LOG";

const WORKSPACE_CRATES: &[&str] = &[
    "beacon_api",
    "binary_utils",
    "reconciler",
    "registration",
    "runtime",
    "status_store",
];

/// Installs the global logger.
///
/// Crates of this workspace and `module_path` log at `info`.
/// Everything else is silent unless enabled through `ACTIVATION_MONITOR_LOG`.
pub fn initialize_logger(module_path: &str, always_write_style: bool) -> Result<()> {
    logger_builder(module_path, always_write_style).try_init()?;
    Ok(())
}

fn logger_builder(module_path: &str, always_write_style: bool) -> Builder {
    let mut builder = Builder::new();

    builder.filter_level(LevelFilter::Off);

    for module in WORKSPACE_CRATES.iter().copied().chain([module_path]) {
        builder.filter_module(module, LevelFilter::Info);
    }

    if let Ok(filters) = std::env::var(LOG_ENVIRONMENT_VARIABLE) {
        builder.parse_filters(&filters);
    }

    let write_style = if always_write_style || io::stdout().is_terminal() {
        WriteStyle::Always
    } else {
        WriteStyle::Never
    };

    builder
        .write_style(write_style)
        .format(|formatter, record| {
            let level_style = formatter.default_level_style(record.level());

            writeln!(
                formatter,
                "[{}] {level_style}{:5}{level_style:#} {}: {}",
                Local::now().to_rfc3339_opts(SecondsFormat::Millis, true),
                record.level(),
                record.target(),
                record.args(),
            )
        });

    builder
}
