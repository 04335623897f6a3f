use num_bigint::BigInt;
use shardgen_core::{BlsKey, GenError, InitialNode, WalletKey};
use shardgen_crypto::{generate_sc_address, IntRandomizer};
use tracing::debug;

use crate::args::ArgDelegatedStakingGenerator;
use crate::base::BaseGenerator;

/// Shared part of the strategies that stake through the delegation
/// contract.
pub(crate) struct DelegatedBaseGenerator {
    pub base: BaseGenerator,
    pub delegation_sc_address: String,
    pub delegation_sc_bytes: Vec<u8>,
    pub num_delegators: usize,
}

pub(crate) fn check_delegated_staking_argument(arg: &ArgDelegatedStakingGenerator) -> Result<(), GenError> {
    if arg.base.wallet_pub_key_converter.is_none() {
        return Err(GenError::NilPubKeyConverter { field: "wallets" });
    }
    if arg.base.validator_pub_key_converter.is_none() {
        return Err(GenError::NilPubKeyConverter { field: "validators" });
    }
    if arg.num_delegators == 0 {
        return Err(GenError::InvalidValue { field: "NumDelegators" });
    }
    Ok(())
}

impl DelegatedBaseGenerator {
    /// Build the key generators and derive the delegation contract address.
    pub fn prepare_fields_from_arguments(
        arg: ArgDelegatedStakingGenerator,
        randomizer: Box<dyn IntRandomizer>,
    ) -> Result<Self, GenError> {
        check_delegated_staking_argument(&arg)?;

        let base = BaseGenerator::new(arg.base, randomizer)?;
        let delegation_sc_address = generate_sc_address(
            &arg.delegation_owner_pk_string,
            arg.delegation_owner_nonce,
            &arg.vm_type,
            base.wallet_converter.as_ref(),
            arg.address_deriver.as_ref(),
        )?;
        let delegation_sc_bytes = base.wallet_converter.decode(&delegation_sc_address)?;
        debug!(address = %delegation_sc_address, "derived delegation contract address");

        Ok(Self {
            base,
            delegation_sc_address,
            delegation_sc_bytes,
            num_delegators: arg.num_delegators,
        })
    }

    /// Spread the stake of `num_delegated_validators` nodes over
    /// `delegators`, giving each the minimum balance to pay claim gas.
    /// Returns the supply consumed by the delegators.
    pub fn prepare_delegators(&self, delegators: &mut [WalletKey], num_delegated_validators: usize) -> BigInt {
        if delegators.is_empty() {
            return BigInt::from(0);
        }

        let total_delegated = self.base.node_price() * BigInt::from(num_delegated_validators);
        let n = BigInt::from(delegators.len());
        let per_delegator = &total_delegated / &n;
        let remainder = &total_delegated % &n;

        for (i, delegator) in delegators.iter_mut().enumerate() {
            delegator.delegated_pub_key_bytes = self.delegation_sc_bytes.clone();
            delegator.delegated_value = per_delegator.clone();
            if i == 0 {
                delegator.delegated_value += &remainder;
            }
            delegator.balance = self.base.minimum_balance.clone();
        }

        total_delegated + &self.base.minimum_balance * n
    }

    /// Nodes staked through the contract are all addressed to it.
    pub fn delegated_initial_nodes(&self, validators: &[BlsKey]) -> Result<Vec<InitialNode>, GenError> {
        self.base.initial_nodes_for(validators, &self.delegation_sc_address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{base_arg, mint, CONTRACT, OWNER};
    use shardgen_crypto::DisabledRandomizer;

    fn arg(num_delegators: usize) -> ArgDelegatedStakingGenerator {
        ArgDelegatedStakingGenerator {
            base: base_arg(),
            delegation_owner_pk_string: OWNER.into(),
            delegation_owner_nonce: 0,
            num_delegators,
            ..Default::default()
        }
    }

    fn prepare(arg: ArgDelegatedStakingGenerator) -> Result<DelegatedBaseGenerator, GenError> {
        DelegatedBaseGenerator::prepare_fields_from_arguments(arg, Box::new(DisabledRandomizer))
    }

    #[test]
    fn argument_checks() {
        assert!(matches!(
            prepare(arg(0)),
            Err(GenError::InvalidValue { field: "NumDelegators" })
        ));

        let mut a = arg(3);
        a.base.wallet_pub_key_converter = None;
        assert!(matches!(prepare(a), Err(GenError::NilPubKeyConverter { .. })));

        let mut a = arg(3);
        a.delegation_owner_pk_string = "not-an-address".into();
        assert!(matches!(prepare(a), Err(GenError::PubKeyConversion(_))));
    }

    #[test]
    fn derives_contract_address() {
        let gen = prepare(arg(3)).unwrap();
        assert_eq!(gen.delegation_sc_address, CONTRACT);
        assert_eq!(gen.delegation_sc_bytes.len(), 32);
    }

    #[test]
    fn delegators_split_the_stake() {
        let gen = prepare(arg(3)).unwrap();
        let mut delegators = vec![WalletKey::default(); 3];
        let consumed = gen.prepare_delegators(&mut delegators, 2);

        let total = mint(5_000);
        let per = &total / BigInt::from(3);
        let rem = &total % BigInt::from(3);
        assert_eq!(delegators[0].delegated_value, &per + &rem);
        assert_eq!(delegators[1].delegated_value, per);
        assert_eq!(delegators[2].delegated_value, per);
        for d in &delegators {
            assert_eq!(d.balance, mint(1));
            assert_eq!(d.delegated_pub_key_bytes, gen.delegation_sc_bytes);
        }

        let delegated: BigInt = delegators.iter().map(|d| &d.delegated_value).sum();
        assert_eq!(delegated, total);
        assert_eq!(consumed, total + mint(3));
    }

    #[test]
    fn delegators_beyond_the_stake_keep_the_contract_address() {
        let mut a = arg(5);
        a.base.node_price = Some(BigInt::from(2));
        let gen = prepare(a).unwrap();
        let mut delegators = vec![
            WalletKey {
                pub_key_bytes: vec![7u8; 32],
                ..Default::default()
            };
            5
        ];
        gen.prepare_delegators(&mut delegators, 1);

        // 2 base units over 5 delegators: the first takes both, the rest get
        // nothing but still point at the contract
        let values: Vec<_> = delegators.iter().map(|d| d.delegated_value.clone()).collect();
        assert_eq!(values, [2, 0, 0, 0, 0].map(BigInt::from).to_vec());
        for d in &delegators {
            let account = gen.base.delegator_account(d).unwrap();
            assert_eq!(account.delegation.address, CONTRACT);
            assert_eq!(account.balance, mint(1));
        }
    }
}
