use std::env::consts::{ARCH, OS};

use const_format::concatcp;

pub const APPLICATION_NAME: &str = "ActivationMonitor";
pub const APPLICATION_VERSION: &str = env!("CARGO_PKG_VERSION");

// Parts of a client version are conventionally separated with slashes.
pub const APPLICATION_VERSION_WITH_PLATFORM: &str =
    concatcp!(APPLICATION_NAME, "/", APPLICATION_VERSION, "/", ARCH, "-", OS);
