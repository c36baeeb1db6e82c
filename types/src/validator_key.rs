use core::{
    fmt::{Debug, Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use hex::FromHex as _;
use serde_with::{DeserializeFromStr, SerializeDisplay};
use thiserror::Error;

pub const COMPRESSED_SIZE: usize = 48;

const PREFIX: &str = "0x";

#[derive(Debug, Error, PartialEq)]
pub enum Error {
    #[error("validator public key {input:?} is missing the 0x prefix")]
    MissingPrefix { input: String },
    #[error(
        "validator public key {input:?} has {actual} hex digits, expected {}",
        COMPRESSED_SIZE * 2
    )]
    InvalidLength { input: String, actual: usize },
    #[error("validator public key {input:?} is not valid hex")]
    InvalidHex {
        input: String,
        source: hex::FromHexError,
    },
}

/// Compressed BLS public key identifying a validator.
///
/// Parsing requires the `0x` prefix and exactly 96 hex digits in either case.
/// The textual form is always lowercase, which is also how it is serialized.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, DeserializeFromStr, SerializeDisplay)]
pub struct ValidatorKey([u8; COMPRESSED_SIZE]);

impl From<[u8; COMPRESSED_SIZE]> for ValidatorKey {
    fn from(bytes: [u8; COMPRESSED_SIZE]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for ValidatorKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl FromStr for ValidatorKey {
    type Err = Error;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let Some(digits) = input.strip_prefix(PREFIX) else {
            return Err(Error::MissingPrefix {
                input: input.to_owned(),
            });
        };

        if digits.len() != COMPRESSED_SIZE * 2 {
            return Err(Error::InvalidLength {
                input: input.to_owned(),
                actual: digits.len(),
            });
        }

        <[u8; COMPRESSED_SIZE]>::from_hex(digits)
            .map(Self)
            .map_err(|source| Error::InvalidHex {
                input: input.to_owned(),
                source,
            })
    }
}

impl Display for ValidatorKey {
    fn fmt(&self, formatter: &mut Formatter) -> FmtResult {
        write!(formatter, "{PREFIX}{}", hex::encode(self.0))
    }
}

impl Debug for ValidatorKey {
    fn fmt(&self, formatter: &mut Formatter) -> FmtResult {
        Display::fmt(self, formatter)
    }
}

impl ValidatorKey {
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; COMPRESSED_SIZE] {
        &self.0
    }
}
