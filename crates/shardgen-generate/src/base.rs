use std::sync::Arc;

use num_bigint::BigInt;
use num_traits::{Signed, Zero};
use shardgen_core::{BlsKey, DelegationData, GenError, InitialAccount, InitialNode, WalletKey};
use shardgen_crypto::{IntRandomizer, PubkeyConverter};

use crate::args::ArgBaseGenerator;
use crate::validator_keys::ValidatorKeyGenerator;
use crate::wallet_keys::WalletKeyGenerator;

/// Split `balance` over `num_wallets` wallets.
///
/// Returns `(per_wallet, remainder)`. In richest-account mode, when the equal
/// share exceeds `minimum_balance`, every wallet gets only the minimum and
/// the remainder carries the rest of the balance.
pub fn compute_wallet_balance(
    num_wallets: usize,
    balance: &BigInt,
    minimum_balance: &BigInt,
    richest_account_mode: bool,
) -> Result<(BigInt, BigInt), GenError> {
    if num_wallets == 0 {
        return Err(GenError::InvalidNumberOfWalletKeys);
    }

    let n = BigInt::from(num_wallets);
    let per_wallet = balance / &n;
    let remainder = balance % &n;
    if !richest_account_mode || &per_wallet <= minimum_balance {
        return Ok((per_wallet, remainder));
    }

    let remainder = balance - &n * minimum_balance;
    Ok((minimum_balance.clone(), remainder))
}

/// State and helpers shared by the generation strategies.
pub(crate) struct BaseGenerator {
    pub vkg: ValidatorKeyGenerator,
    pub wkg: WalletKeyGenerator,
    pub wallet_converter: Arc<dyn PubkeyConverter>,
    pub validator_converter: Arc<dyn PubkeyConverter>,
    pub num_validator_bls_keys: usize,
    pub num_observer_bls_keys: usize,
    pub num_additional_wallet_keys: usize,
    pub richest_account_mode: bool,
    pub total_supply: BigInt,
    pub minimum_balance: BigInt,
    pub initial_rating: u32,
}

impl BaseGenerator {
    pub fn new(arg: ArgBaseGenerator, randomizer: Box<dyn IntRandomizer>) -> Result<Self, GenError> {
        let wallet_converter = arg
            .wallet_pub_key_converter
            .ok_or(GenError::NilPubKeyConverter { field: "wallets" })?;
        let validator_converter = arg
            .validator_pub_key_converter
            .ok_or(GenError::NilPubKeyConverter { field: "validators" })?;
        if arg.minimum_balance.is_negative() {
            return Err(GenError::InvalidValue { field: "MinimumBalance" });
        }

        let vkg = ValidatorKeyGenerator::new(arg.key_generator_for_validators)?;
        let wkg = WalletKeyGenerator::new(
            arg.key_generator_for_wallets,
            Some(randomizer),
            arg.node_price,
            arg.num_shards,
            arg.generate_in_all_shards,
        )?;

        Ok(Self {
            vkg,
            wkg,
            wallet_converter,
            validator_converter,
            num_validator_bls_keys: arg.num_validator_bls_keys,
            num_observer_bls_keys: arg.num_observer_bls_keys,
            num_additional_wallet_keys: arg.num_additional_wallet_keys,
            richest_account_mode: arg.richest_account_mode,
            total_supply: arg.total_supply,
            minimum_balance: arg.minimum_balance,
            initial_rating: arg.initial_rating,
        })
    }

    pub fn node_price(&self) -> &BigInt {
        self.wkg.node_price()
    }

    /// Validators first, then observers.
    pub fn generate_validators_and_observers(&self) -> Result<(Vec<BlsKey>, Vec<BlsKey>), GenError> {
        let validators = self.vkg.generate_keys(self.num_validator_bls_keys)?;
        let observers = self.vkg.generate_keys(self.num_observer_bls_keys)?;
        Ok((validators, observers))
    }

    /// `total_supply - used`, failing when the supply cannot cover `used`.
    pub fn remaining_balance(&self, used: &BigInt) -> Result<BigInt, GenError> {
        let balance = &self.total_supply - used;
        if balance.is_negative() {
            return Err(GenError::TotalSupplyTooSmall {
                total_supply: self.total_supply.clone(),
                used_balance: used.clone(),
            });
        }
        Ok(balance)
    }

    /// Spread `balance` over `wallets` followed by `additional`. The first
    /// wallet of the combined sequence receives the remainder.
    pub fn distribute_balance(
        &self,
        wallets: &mut [WalletKey],
        additional: &mut [WalletKey],
        balance: &BigInt,
    ) -> Result<(), GenError> {
        let n = wallets.len() + additional.len();
        let (per_wallet, remainder) =
            compute_wallet_balance(n, balance, &self.minimum_balance, self.richest_account_mode)?;

        for (i, wallet) in wallets.iter_mut().chain(additional.iter_mut()).enumerate() {
            wallet.balance = per_wallet.clone();
            if i == 0 {
                wallet.balance += &remainder;
            }
        }
        Ok(())
    }

    /// Genesis account of a wallet that holds balance and possibly direct
    /// stake but no delegation.
    pub fn wallet_account(&self, wallet: &WalletKey) -> Result<InitialAccount, GenError> {
        Ok(InitialAccount::new(
            self.wallet_converter.encode(&wallet.pub_key_bytes)?,
            wallet.balance.clone(),
            wallet.staked_value.clone(),
            DelegationData::none(),
        ))
    }

    /// Genesis account of a delegator: claim-gas balance plus delegation.
    pub fn delegator_account(&self, delegator: &WalletKey) -> Result<InitialAccount, GenError> {
        let delegation = DelegationData {
            address: self.wallet_converter.encode(&delegator.delegated_pub_key_bytes)?,
            value: delegator.delegated_value.clone(),
        };
        Ok(InitialAccount::new(
            self.wallet_converter.encode(&delegator.pub_key_bytes)?,
            delegator.balance.clone(),
            BigInt::zero(),
            delegation,
        ))
    }

    /// One node per BLS key owned by `wallet`, addressed to the wallet.
    pub fn initial_nodes_for_wallet(&self, wallet: &WalletKey) -> Result<Vec<InitialNode>, GenError> {
        let address = self.wallet_converter.encode(&wallet.pub_key_bytes)?;
        self.initial_nodes_for(&wallet.bls_keys, &address)
    }

    /// One node per key in `bls_keys`, all addressed to `address`.
    pub fn initial_nodes_for(&self, bls_keys: &[BlsKey], address: &str) -> Result<Vec<InitialNode>, GenError> {
        bls_keys
            .iter()
            .map(|key| {
                Ok(InitialNode {
                    pub_key: self.validator_converter.encode(&key.pub_key_bytes)?,
                    address: address.to_string(),
                    initial_rating: self.initial_rating,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn big(v: u64) -> BigInt {
        BigInt::from(v)
    }

    #[test]
    fn equal_split_with_remainder() {
        let (per, rem) = compute_wallet_balance(3, &big(100), &big(1), false).unwrap();
        assert_eq!((per, rem), (big(33), big(1)));
    }

    #[test]
    fn richest_mode_below_minimum_keeps_equal_split() {
        let (per, rem) = compute_wallet_balance(4, &big(10), &big(5), true).unwrap();
        assert_eq!((per, rem), (big(2), big(2)));
        // share exactly at the minimum
        let (per, rem) = compute_wallet_balance(4, &big(20), &big(5), true).unwrap();
        assert_eq!((per, rem), (big(5), big(0)));
    }

    #[test]
    fn richest_mode_concentrates_leftover() {
        let (per, rem) = compute_wallet_balance(4, &big(1000), &big(5), true).unwrap();
        assert_eq!(per, big(5));
        assert_eq!(rem, big(980));
        assert_eq!(&per * big(4) + rem, big(1000));
    }

    #[test]
    fn zero_wallets_rejected() {
        assert!(matches!(
            compute_wallet_balance(0, &big(1), &big(1), false),
            Err(GenError::InvalidNumberOfWalletKeys)
        ));
    }
}
