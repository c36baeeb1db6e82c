use core::time::Duration;

use strum::{Display, EnumString};

/// Public networks the monitor knows the slot timing of.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Network {
    #[default]
    Mainnet,
    Sepolia,
    Holesky,
    Hoodi,
}

impl Network {
    #[must_use]
    pub const fn seconds_per_slot(self) -> u64 {
        match self {
            Self::Mainnet | Self::Sepolia | Self::Holesky | Self::Hoodi => 12,
        }
    }

    #[must_use]
    pub const fn slots_per_epoch(self) -> u64 {
        match self {
            Self::Mainnet | Self::Sepolia | Self::Holesky | Self::Hoodi => 32,
        }
    }

    #[must_use]
    pub const fn epoch_duration(self) -> Duration {
        Duration::from_secs(self.slots_per_epoch() * self.seconds_per_slot())
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case(Network::Mainnet)]
    #[test_case(Network::Hoodi)]
    fn epoch_lasts_384_seconds_on_public_networks(network: Network) {
        assert_eq!(network.epoch_duration(), Duration::from_secs(384));
    }

    #[test_case("mainnet", Network::Mainnet)]
    #[test_case("holesky", Network::Holesky)]
    fn network_string_round_trip(string: &str, network: Network) {
        assert_eq!(string.parse(), Ok(network));
        assert_eq!(network.to_string(), string);
    }
}
