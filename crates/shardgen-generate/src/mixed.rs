use num_bigint::BigInt;
use shardgen_core::{BlsKey, GenError, GeneratorOutput, WalletKey};
use tracing::info;

use crate::args::ArgMixedStakingGenerator;
use crate::delegated_base::DelegatedBaseGenerator;
use crate::direct::total_staked;

/// The first `num_delegated_nodes` validators are staked through the
/// delegation contract, the rest are grouped under owners staking
/// directly.
pub struct MixedStakingGenerator {
    inner: DelegatedBaseGenerator,
    num_delegated_nodes: usize,
    max_num_nodes_on_owner: usize,
}

impl MixedStakingGenerator {
    pub fn new(arg: ArgMixedStakingGenerator) -> Result<Self, GenError> {
        let num_validators = arg.delegated.base.num_validator_bls_keys;
        if arg.num_delegated_nodes == 0 || arg.num_delegated_nodes > num_validators {
            return Err(GenError::InvalidValue { field: "NumDelegatedNodes" });
        }
        if arg.max_num_nodes_on_owner == 0 {
            return Err(GenError::InvalidValue { field: "MaxNumNodesOnOwner" });
        }
        let randomizer = arg.int_randomizer.ok_or(GenError::NilRandomizer)?;
        let inner = DelegatedBaseGenerator::prepare_fields_from_arguments(arg.delegated, randomizer)?;

        Ok(Self {
            inner,
            num_delegated_nodes: arg.num_delegated_nodes,
            max_num_nodes_on_owner: arg.max_num_nodes_on_owner,
        })
    }

    pub fn generate(&mut self) -> Result<GeneratorOutput, GenError> {
        let (validators, observers) = self.inner.base.generate_validators_and_observers()?;
        let (delegated, staked) = validators.split_at(self.num_delegated_nodes.min(validators.len()));

        let base = &mut self.inner.base;
        let mut delegators = base.wkg.generate_additional_keys(self.inner.num_delegators)?;
        let mut additional = base.wkg.generate_additional_keys(base.num_additional_wallet_keys)?;
        let mut wallets = self.generate_wallet_keys(staked)?;

        let delegated_value = self.inner.prepare_delegators(&mut delegators, delegated.len());
        let used = delegated_value + total_staked(&wallets);
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

        let mut initial_nodes = self.inner.delegated_initial_nodes(delegated)?;
        for wallet in &wallets {
            initial_nodes.extend(base.initial_nodes_for_wallet(wallet)?);
        }

        info!(
            validators = validators.len(),
            observers = observers.len(),
            delegated = delegated.len(),
            owners = wallets.len(),
            delegators = delegators.len(),
            additional = additional.len(),
            "generated mixed staking data"
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

    /// Owner wallets for the directly staked validators.
    fn generate_wallet_keys(&mut self, staked: &[BlsKey]) -> Result<Vec<WalletKey>, GenError> {
        let wallets = self
            .inner
            .base
            .wkg
            .generate_keys(staked, self.max_num_nodes_on_owner)?;
        debug_assert_eq!(
            total_staked(&wallets),
            self.inner.base.node_price() * BigInt::from(staked.len())
        );
        Ok(wallets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::ArgDelegatedStakingGenerator;
    use crate::test_util::{base_arg, check, hex_of, mint, CONTRACT, OWNER};
    use shardgen_crypto::mock::{IntRandomizerStub, KeyGeneratorStub};
    use shardgen_crypto::IntRandomizer;

    fn arg(
        num_validators: usize,
        num_delegated: usize,
        num_delegators: usize,
        additional: usize,
    ) -> ArgMixedStakingGenerator {
        let mut base = base_arg();
        base.num_validator_bls_keys = num_validators;
        base.num_observer_bls_keys = 3;
        base.num_additional_wallet_keys = additional;
        ArgMixedStakingGenerator {
            delegated: ArgDelegatedStakingGenerator {
                base,
                delegation_owner_pk_string: OWNER.into(),
                num_delegators,
                ..Default::default()
            },
            num_delegated_nodes: num_delegated,
            max_num_nodes_on_owner: 1,
            int_randomizer: Some(Box::new(IntRandomizerStub::default())),
        }
    }

    #[test]
    fn constructor_errors() {
        assert!(matches!(
            MixedStakingGenerator::new(arg(5, 0, 3, 0)),
            Err(GenError::InvalidValue { field: "NumDelegatedNodes" })
        ));
        assert!(matches!(
            MixedStakingGenerator::new(arg(5, 6, 3, 0)),
            Err(GenError::InvalidValue { field: "NumDelegatedNodes" })
        ));

        let mut a = arg(5, 2, 3, 0);
        a.max_num_nodes_on_owner = 0;
        assert!(matches!(
            MixedStakingGenerator::new(a),
            Err(GenError::InvalidValue { field: "MaxNumNodesOnOwner" })
        ));

        let mut a = arg(5, 2, 3, 0);
        a.int_randomizer = None;
        assert!(matches!(MixedStakingGenerator::new(a), Err(GenError::NilRandomizer)));

        assert!(matches!(
            MixedStakingGenerator::new(arg(5, 2, 0, 0)),
            Err(GenError::InvalidValue { field: "NumDelegators" })
        ));
    }

    #[test]
    fn mixed_layout() {
        let mut gen = MixedStakingGenerator::new(arg(33, 9, 47, 3)).unwrap();
        let out = gen.generate().unwrap();

        assert_eq!(out.validator_bls_keys.len(), 33);
        assert_eq!(out.observer_bls_keys.len(), 3);
        assert_eq!(out.initial_nodes.len(), 33);
        assert_eq!(out.wallet_keys.len(), 24);
        assert_eq!(out.delegator_keys.len(), 47);
        assert_eq!(out.additional_keys.len(), 3);
        assert_eq!(out.initial_accounts.len(), 74);

        for (i, node) in out.initial_nodes.iter().enumerate() {
            assert_eq!(node.pub_key, hex_of(&out.validator_bls_keys[i].pub_key_bytes));
            if i < 9 {
                assert_eq!(node.address, CONTRACT);
            } else {
                assert_ne!(node.address, CONTRACT);
            }
        }

        let delegated: BigInt = out.initial_accounts[..47].iter().map(|a| &a.delegation.value).sum();
        assert_eq!(delegated, mint(2_500) * BigInt::from(9));
        let staked: BigInt = out.initial_accounts.iter().map(|a| &a.staking_value).sum();
        assert_eq!(staked, mint(2_500) * BigInt::from(24));

        check(&out.initial_accounts, &mint(20_000_000));
    }

    #[test]
    fn shard_rotation_runs_through_delegators_then_additional_then_owners() {
        let mut a = arg(5, 2, 4, 1);
        a.delegated.base.num_shards = 3;
        a.delegated.base.generate_in_all_shards = true;
        let mut gen = MixedStakingGenerator::new(a).unwrap();
        let out = gen.generate().unwrap();

        let last = |keys: &[WalletKey]| keys.iter().map(|k| k.pub_key_bytes[31]).collect::<Vec<_>>();
        assert_eq!(last(&out.delegator_keys), vec![0, 1, 2, 0]);
        assert_eq!(last(&out.additional_keys), vec![1]);
        assert_eq!(last(&out.wallet_keys), vec![2, 0, 1]);
        check(&out.initial_accounts, &mint(20_000_000));
    }

    #[test]
    fn all_delegated_with_additional_only() {
        let mut gen = MixedStakingGenerator::new(arg(4, 4, 2, 2)).unwrap();
        let out = gen.generate().unwrap();
        assert!(out.wallet_keys.is_empty());
        assert_eq!(out.initial_accounts.len(), 4);
        check(&out.initial_accounts, &mint(20_000_000));
    }

    #[test]
    fn all_delegated_without_wallets() {
        let mut gen = MixedStakingGenerator::new(arg(4, 4, 2, 0)).unwrap();
        assert!(matches!(gen.generate(), Err(GenError::InvalidNumberOfWalletKeys)));
    }

    #[test]
    fn same_stubs_same_output() {
        let scripted = || -> Box<dyn IntRandomizer> {
            let mut step = 0usize;
            Box::new(IntRandomizerStub::with(move |n| {
                step += 1;
                step % n
            }))
        };
        let run = || {
            let mut a = arg(20, 5, 7, 2);
            a.max_num_nodes_on_owner = 4;
            a.int_randomizer = Some(scripted());
            a.delegated.base.key_generator_for_validators = Some(Box::new(KeyGeneratorStub::new(96, 32)));
            a.delegated.base.key_generator_for_wallets = Some(Box::new(KeyGeneratorStub::new(32, 64)));
            MixedStakingGenerator::new(a).unwrap().generate().unwrap()
        };

        let first = run();
        let second = run();
        assert_eq!(first.initial_accounts, second.initial_accounts);
        assert_eq!(first.initial_nodes, second.initial_nodes);
        assert_eq!(first.wallet_keys, second.wallet_keys);
        assert_eq!(first.delegator_keys, second.delegator_keys);
        check(&first.initial_accounts, &mint(20_000_000));
    }
}
