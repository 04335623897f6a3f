//! Genesis gate: verifies a generated account list before anything is
//! written to disk.

use num_bigint::BigInt;
use num_traits::{Signed, Zero};
use shardgen_core::{GenError, InitialAccount};
use tracing::info;

/// Checks the conservation and staking invariants of a genesis account
/// list against the configured node price and total supply.
#[derive(Debug, Clone)]
pub struct InitialAccountsChecker {
    node_price: BigInt,
    total_supply: BigInt,
}

impl InitialAccountsChecker {
    pub fn new(node_price: Option<BigInt>, total_supply: Option<BigInt>) -> Result<Self, GenError> {
        let node_price = node_price.ok_or(GenError::NilValue { field: "nodePrice" })?;
        let total_supply = total_supply.ok_or(GenError::NilValue { field: "totalSupply" })?;
        if !node_price.is_positive() {
            return Err(GenError::ZeroOrNegative { field: "nodePrice" });
        }
        if !total_supply.is_positive() {
            return Err(GenError::ZeroOrNegative { field: "totalSupply" });
        }

        Ok(Self {
            node_price,
            total_supply,
        })
    }

    pub fn check_initial_accounts(&self, accounts: &[InitialAccount]) -> Result<(), GenError> {
        if accounts.is_empty() {
            return Err(GenError::EmptyInitialAccounts);
        }

        let mut total_supply = BigInt::zero();
        let mut total_staked = BigInt::zero();
        let mut total_balance = BigInt::zero();
        let mut total_delegated = BigInt::zero();
        for account in accounts {
            let supply = self.check_account(account)?;

            total_supply += supply;
            total_balance += &account.balance;
            total_staked += &account.staking_value;
            total_delegated += &account.delegation.value;
        }

        if total_supply != self.total_supply {
            return Err(GenError::TotalSupplyMismatch {
                computed: total_supply,
                provided: self.total_supply.clone(),
            });
        }

        info!(
            total_supply = %total_supply,
            total_staked = %total_staked,
            total_balance = %total_balance,
            total_delegated = %total_delegated,
            "checked values"
        );
        Ok(())
    }

    /// Per-account checks. Returns the recomputed supply.
    fn check_account(&self, account: &InitialAccount) -> Result<BigInt, GenError> {
        let negative = |field: &'static str| GenError::NegativeValue {
            address: account.address.clone(),
            field,
        };
        if account.staking_value.is_negative() {
            return Err(negative("StakingValue"));
        }
        if account.balance.is_negative() {
            return Err(negative("Balance"));
        }
        if account.supply.is_negative() {
            return Err(negative("Supply"));
        }
        if account.delegation.value.is_negative() {
            return Err(negative("Delegation.Value"));
        }

        let supply = &account.balance + &account.staking_value + &account.delegation.value;
        if supply != account.supply {
            return Err(GenError::SupplyMismatch {
                address: account.address.clone(),
            });
        }

        if !(&account.staking_value % &self.node_price).is_zero() {
            return Err(GenError::StakingValueError {
                address: account.address.clone(),
            });
        }

        if account.delegation.value.is_positive() && account.delegation.address.is_empty() {
            return Err(GenError::DelegationValues {
                address: account.address.clone(),
            });
        }

        Ok(supply)
    }
}
