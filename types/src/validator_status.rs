use parse_display::{Display, FromStr};
use serde_with::{DeserializeFromStr, SerializeDisplay};

/// Validator lifecycle stages reported by the Beacon Node API.
///
/// Variants are declared in lifecycle order, so the derived [`Ord`] follows it.
#[derive(
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Debug,
    Display,
    FromStr,
    DeserializeFromStr,
    SerializeDisplay,
)]
#[display(style = "snake_case")]
pub enum ValidatorStatus {
    PendingInitialized,
    PendingQueued,
    ActiveOngoing,
    ActiveExiting,
    ActiveSlashed,
    ExitedUnslashed,
    ExitedSlashed,
    WithdrawalPossible,
    WithdrawalDone,
}

impl ValidatorStatus {
    pub const ALL: [Self; 9] = [
        Self::PendingInitialized,
        Self::PendingQueued,
        Self::ActiveOngoing,
        Self::ActiveExiting,
        Self::ActiveSlashed,
        Self::ExitedUnslashed,
        Self::ExitedSlashed,
        Self::WithdrawalPossible,
        Self::WithdrawalDone,
    ];

    /// Whether the validator has not reached `active_ongoing` or any later stage yet.
    #[must_use]
    pub fn is_pending(self) -> bool {
        self < Self::ActiveOngoing
    }

    /// Whether entering this status makes the validator eligible for registration.
    #[must_use]
    pub const fn triggers_registration(self) -> bool {
        matches!(self, Self::ActiveOngoing)
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case(ValidatorStatus::PendingInitialized => true)]
    #[test_case(ValidatorStatus::PendingQueued      => true)]
    #[test_case(ValidatorStatus::ActiveOngoing      => false)]
    #[test_case(ValidatorStatus::ActiveSlashed      => false)]
    #[test_case(ValidatorStatus::ExitedUnslashed    => false)]
    #[test_case(ValidatorStatus::WithdrawalDone     => false)]
    fn validator_status_is_pending(status: ValidatorStatus) -> bool {
        status.is_pending()
    }

    #[test]
    fn only_active_ongoing_triggers_registration() {
        let triggering = ValidatorStatus::ALL
            .into_iter()
            .filter(|status| status.triggers_registration())
            .collect::<Vec<_>>();

        assert_eq!(triggering, [ValidatorStatus::ActiveOngoing]);
    }

    #[test]
    fn all_statuses_are_in_lifecycle_order() {
        assert!(ValidatorStatus::ALL.is_sorted());
    }

    #[test_case("pending_initialized", ValidatorStatus::PendingInitialized)]
    #[test_case("pending_queued",      ValidatorStatus::PendingQueued)]
    #[test_case("active_ongoing",      ValidatorStatus::ActiveOngoing)]
    #[test_case("exited_slashed",      ValidatorStatus::ExitedSlashed)]
    #[test_case("withdrawal_possible", ValidatorStatus::WithdrawalPossible)]
    fn validator_status_round_trip(string: &str, validator_status: ValidatorStatus) {
        assert_eq!(string.parse(), Ok(validator_status));
        assert_eq!(validator_status.to_string(), string);
    }

    #[test_case("active")]
    #[test_case("ActiveOngoing")]
    #[test_case("")]
    fn validator_status_rejects_unknown_values(string: &str) {
        assert!(string.parse::<ValidatorStatus>().is_err());
        assert!(serde_json::from_str::<ValidatorStatus>(&format!("{string:?}")).is_err());
    }
}
