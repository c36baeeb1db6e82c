use std::{
    collections::{HashMap, hash_map::Entry},
    path::Path,
};

use anyhow::Result;
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use types::ValidatorKey;

use crate::Error;

/// Pre-generated registration payload of a single validator.
///
/// Everything except the public key is opaque and forwarded to the relay unchanged.
#[derive(Clone, PartialEq, Eq, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyShare {
    pub public_key: ValidatorKey,
    #[serde(flatten)]
    pub credentials: Map<String, Value>,
}

/// Key shares indexed by validator public key.
///
/// Each key share can be taken out once.
#[derive(Default, Debug)]
pub struct KeyShares {
    shares: HashMap<ValidatorKey, KeyShare>,
}

impl KeyShares {
    /// Reads a JSON array of key shares.
    ///
    /// Fails if the file cannot be read, is not a valid array of key shares,
    /// or contains two key shares for the same validator.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs_err::read(path)?;

        let shares = serde_json::from_slice::<Vec<KeyShare>>(&bytes).map_err(|source| {
            Error::MalformedKeyShares {
                path: path.to_owned(),
                source,
            }
        })?;

        let key_shares = Self::from_shares(shares).map_err(|public_key| {
            Error::DuplicateKeyShare {
                path: path.to_owned(),
                public_key,
            }
        })?;

        debug!("loaded {} key shares from {path:?}", key_shares.len());

        Ok(key_shares)
    }

    /// Indexes `shares` by public key, returning the first key that occurs twice.
    pub fn from_shares(shares: impl IntoIterator<Item = KeyShare>) -> Result<Self, ValidatorKey> {
        let mut indexed = HashMap::new();

        for share in shares {
            match indexed.entry(share.public_key) {
                Entry::Vacant(vacant) => {
                    vacant.insert(share);
                }
                Entry::Occupied(occupied) => return Err(*occupied.key()),
            }
        }

        Ok(Self { shares: indexed })
    }

    /// Removes and returns the key share of `public_key`.
    pub fn take(&mut self, public_key: &ValidatorKey) -> Option<KeyShare> {
        self.shares.remove(public_key)
    }

    #[must_use]
    pub fn contains(&self, public_key: &ValidatorKey) -> bool {
        self.shares.contains_key(public_key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.shares.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shares.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use tempfile::TempDir;

    use super::*;

    const KEY_1: &str = "0x93247f2209abcacf57b75a51dafae777f9dd38bc7053d1af526f220a7489a6d3a2753e5f3e8b1cfe39b56f43611df74a";
    const KEY_2: &str = "0xb301803f8b5ac4a1133581fc676dfedc60d891dd5fa99028805e5ea5b08d3491af75d0707adab3b70c6a6a580217bf81";

    fn write_key_shares(directory: &TempDir, value: &Value) -> Result<std::path::PathBuf> {
        let path = directory.path().join("key_shares.json");
        fs_err::write(&path, serde_json::to_vec(value)?)?;
        Ok(path)
    }

    #[test]
    fn key_share_keeps_opaque_fields() -> Result<()> {
        let value = json!({
            "publicKey": KEY_1,
            "operatorIds": [1, 2, 3, 4],
            "sharesData": "0xabcdef",
        });

        let share = serde_json::from_value::<KeyShare>(value.clone())?;

        assert_eq!(share.public_key, KEY_1.parse::<ValidatorKey>()?);
        assert_eq!(share.credentials.len(), 2);
        assert_eq!(serde_json::to_value(&share)?, value);

        Ok(())
    }

    #[test]
    fn load_indexes_key_shares_by_public_key() -> Result<()> {
        let directory = TempDir::new()?;
        let path = write_key_shares(
            &directory,
            &json!([
                { "publicKey": KEY_1, "sharesData": "0x01" },
                { "publicKey": KEY_2, "sharesData": "0x02" },
            ]),
        )?;

        let mut key_shares = KeyShares::load(path)?;
        let key_1 = KEY_1.parse::<ValidatorKey>()?;

        assert_eq!(key_shares.len(), 2);

        let share = key_shares.take(&key_1).expect("key share should be present");

        assert_eq!(share.credentials["sharesData"], "0x01");
        assert!(key_shares.take(&key_1).is_none());
        assert!(key_shares.contains(&KEY_2.parse()?));
        assert_eq!(key_shares.len(), 1);

        Ok(())
    }

    #[test]
    fn load_rejects_duplicate_public_keys() -> Result<()> {
        let directory = TempDir::new()?;
        let path = write_key_shares(
            &directory,
            &json!([
                { "publicKey": KEY_1, "sharesData": "0x01" },
                { "publicKey": KEY_1, "sharesData": "0x02" },
            ]),
        )?;

        let error = KeyShares::load(path).expect_err("duplicate key shares should be rejected");

        assert!(matches!(
            error.downcast_ref::<Error>(),
            Some(Error::DuplicateKeyShare { public_key, .. }) if public_key.to_string() == KEY_1,
        ));

        Ok(())
    }

    #[test]
    fn load_rejects_malformed_public_key() -> Result<()> {
        let directory = TempDir::new()?;
        let path = write_key_shares(&directory, &json!([{ "publicKey": "0x1234" }]))?;

        let error = KeyShares::load(path).expect_err("malformed key shares should be rejected");

        assert!(matches!(
            error.downcast_ref::<Error>(),
            Some(Error::MalformedKeyShares { .. }),
        ));

        Ok(())
    }

    #[test]
    fn load_fails_on_missing_file() -> Result<()> {
        let directory = TempDir::new()?;

        assert!(KeyShares::load(directory.path().join("missing.json")).is_err());

        Ok(())
    }
}
