use shardgen_core::{GenError, GeneratorOutput};
use shardgen_crypto::DisabledRandomizer;
use tracing::info;

use crate::args::ArgDelegatedStakingGenerator;
use crate::delegated_base::DelegatedBaseGenerator;

/// Every validator is staked through the delegation contract. Validators
/// still get one unstaked wallet each, and the stake is spread across the
/// delegators.
pub struct DelegatedStakingGenerator {
    inner: DelegatedBaseGenerator,
}

impl DelegatedStakingGenerator {
    pub fn new(arg: ArgDelegatedStakingGenerator) -> Result<Self, GenError> {
        let inner = DelegatedBaseGenerator::prepare_fields_from_arguments(arg, Box::new(DisabledRandomizer))?;
        Ok(Self { inner })
    }

    pub fn generate(&mut self) -> Result<GeneratorOutput, GenError> {
        let base = &mut self.inner.base;
        let (validators, observers) = base.generate_validators_and_observers()?;
        let mut wallets = base.wkg.generate_additional_keys(validators.len())?;
        let mut delegators = base.wkg.generate_additional_keys(self.inner.num_delegators)?;
        let mut additional = base.wkg.generate_additional_keys(base.num_additional_wallet_keys)?;
        if wallets.is_empty() {
            return Err(GenError::InvalidNumberOfWalletKeys);
        }

        let used = self.inner.prepare_delegators(&mut delegators, validators.len());
        let base = &self.inner.base;
        let balance = base.remaining_balance(&used)?;
        base.distribute_balance(&mut wallets, &mut additional, &balance)?;

        let mut initial_accounts = Vec::with_capacity(delegators.len() + wallets.len() + additional.len());
        for delegator in &delegators {
            initial_accounts.push(base.delegator_account(delegator)?);
        }
        for wallet in wallets.iter().chain(&additional) {
            initial_accounts.push(base.wallet_account(wallet)?);
        }
        let initial_nodes = self.inner.delegated_initial_nodes(&validators)?;

        info!(
            validators = validators.len(),
            observers = observers.len(),
            delegators = delegators.len(),
            additional = additional.len(),
            contract = %self.inner.delegation_sc_address,
            "generated delegated staking data"
        );

        Ok(GeneratorOutput {
            validator_bls_keys: validators,
            observer_bls_keys: observers,
            wallet_keys: wallets,
            additional_keys: additional,
            delegator_keys: delegators,
            initial_accounts,
            initial_nodes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{base_arg, check, mint, CONTRACT, OWNER};
    use num_bigint::BigInt;
    use num_traits::Zero;

    fn arg(num_validators: usize, num_delegators: usize, additional: usize) -> ArgDelegatedStakingGenerator {
        let mut base = base_arg();
        base.num_validator_bls_keys = num_validators;
        base.num_observer_bls_keys = 1;
        base.num_additional_wallet_keys = additional;
        ArgDelegatedStakingGenerator {
            base,
            delegation_owner_pk_string: OWNER.into(),
            num_delegators,
            ..Default::default()
        }
    }

    #[test]
    fn accounts_and_nodes_layout() {
        let mut gen = DelegatedStakingGenerator::new(arg(4, 10, 2)).unwrap();
        let out = gen.generate().unwrap();

        assert_eq!(out.wallet_keys.len(), 4);
        assert_eq!(out.delegator_keys.len(), 10);
        assert_eq!(out.additional_keys.len(), 2);
        assert_eq!(out.initial_accounts.len(), 16);
        assert_eq!(out.initial_nodes.len(), 4);
        assert!(out.initial_nodes.iter().all(|n| n.address == CONTRACT));

        for acc in &out.initial_accounts[..10] {
            assert_eq!(acc.delegation.address, CONTRACT);
            assert_eq!(acc.balance, mint(1));
            assert!(acc.staking_value.is_zero());
        }
        for acc in &out.initial_accounts[10..] {
            assert!(acc.delegation.value.is_zero());
            assert!(acc.staking_value.is_zero());
        }

        let delegated: BigInt = out.initial_accounts.iter().map(|a| &a.delegation.value).sum();
        assert_eq!(delegated, mint(10_000));
        check(&out.initial_accounts, &mint(20_000_000));
    }

    #[test]
    fn requires_validators() {
        let mut gen = DelegatedStakingGenerator::new(arg(0, 3, 2)).unwrap();
        assert!(matches!(gen.generate(), Err(GenError::InvalidNumberOfWalletKeys)));
    }

    #[test]
    fn supply_too_small() {
        let mut a = arg(4, 10, 0);
        // stake fits, claim gas for the delegators does not
        a.base.total_supply = mint(10_005);
        let mut gen = DelegatedStakingGenerator::new(a).unwrap();
        assert!(matches!(gen.generate(), Err(GenError::TotalSupplyTooSmall { .. })));
    }

    #[test]
    fn rejects_zero_delegators() {
        assert!(matches!(
            DelegatedStakingGenerator::new(arg(4, 0, 0)),
            Err(GenError::InvalidValue { field: "NumDelegators" })
        ));
    }
}
