pub use crate::{
    monitor::{CycleOutcome, Monitor, Registration, RunOutcome},
    signal::wait_for_signal,
};

mod monitor;
mod signal;
