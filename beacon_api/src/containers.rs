use serde::Deserialize;
use serde_with::{DisplayFromStr, PickFirst, serde_as};
use types::{ValidatorKey, ValidatorStatus};

pub type Epoch = u64;
pub type Gwei = u64;
pub type ValidatorIndex = u64;

// The Beacon Node API quotes integers, but some proxies pass them through as numbers.
type Quoted = PickFirst<(DisplayFromStr, serde_with::Same)>;

#[derive(Deserialize)]
pub struct StateValidatorsResponse {
    pub execution_optimistic: bool,
    pub data: Vec<StateValidatorResponse>,
}

#[serde_as]
#[derive(Deserialize)]
pub struct StateValidatorResponse {
    #[serde_as(as = "Quoted")]
    pub index: ValidatorIndex,
    #[serde_as(as = "Quoted")]
    pub balance: Gwei,
    pub status: ValidatorStatus,
    pub validator: Validator,
}

#[serde_as]
#[derive(Deserialize)]
pub struct Validator {
    pub pubkey: ValidatorKey,
    #[serde_as(as = "Quoted")]
    pub effective_balance: Gwei,
    pub slashed: bool,
    #[serde_as(as = "Quoted")]
    pub activation_eligibility_epoch: Epoch,
    #[serde_as(as = "Quoted")]
    pub activation_epoch: Epoch,
    #[serde_as(as = "Quoted")]
    pub exit_epoch: Epoch,
    #[serde_as(as = "Quoted")]
    pub withdrawable_epoch: Epoch,
}

/// Status of a single validator as reported by the beacon node at the head of the chain.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ValidatorInfo {
    pub index: ValidatorIndex,
    pub balance: Gwei,
    pub status: ValidatorStatus,
    pub effective_balance: Gwei,
    pub slashed: bool,
    pub activation_eligibility_epoch: Epoch,
    pub activation_epoch: Epoch,
    pub exit_epoch: Epoch,
    pub withdrawable_epoch: Epoch,
}

impl From<StateValidatorResponse> for (ValidatorKey, ValidatorInfo) {
    fn from(response: StateValidatorResponse) -> Self {
        let StateValidatorResponse {
            index,
            balance,
            status,
            validator,
        } = response;

        let Validator {
            pubkey,
            effective_balance,
            slashed,
            activation_eligibility_epoch,
            activation_epoch,
            exit_epoch,
            withdrawable_epoch,
        } = validator;

        let info = ValidatorInfo {
            index,
            balance,
            status,
            effective_balance,
            slashed,
            activation_eligibility_epoch,
            activation_epoch,
            exit_epoch,
            withdrawable_epoch,
        };

        (pubkey, info)
    }
}
