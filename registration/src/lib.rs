pub use crate::{
    dispatcher::{Dispatcher, RegistrationMode, RegistrationOutcome},
    error::Error,
    key_share::{KeyShare, KeyShares},
    registrar::{Registrar, RelayRegistrar},
};

mod dispatcher;
mod error;
mod key_share;
mod registrar;
