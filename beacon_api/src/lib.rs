pub use crate::{
    api::{Api as BeaconApi, Error, ValidatorStatuses},
    containers::ValidatorInfo,
};

mod api;
mod containers;
