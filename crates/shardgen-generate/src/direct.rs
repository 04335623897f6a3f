use num_bigint::BigInt;
use shardgen_core::{GenError, GeneratorOutput, WalletKey};
use tracing::info;

use crate::args::ArgDirectStakingGenerator;
use crate::base::BaseGenerator;

/// Every validator is staked directly by the owner wallet it is grouped
/// under.
pub struct DirectStakingGenerator {
    base: BaseGenerator,
    max_num_nodes_on_owner: usize,
}

impl DirectStakingGenerator {
    pub fn new(arg: ArgDirectStakingGenerator) -> Result<Self, GenError> {
        if arg.max_num_nodes_on_owner == 0 {
            return Err(GenError::InvalidValue { field: "MaxNumNodesOnOwner" });
        }
        let randomizer = arg.int_randomizer.ok_or(GenError::NilRandomizer)?;
        let base = BaseGenerator::new(arg.base, randomizer)?;

        Ok(Self {
            base,
            max_num_nodes_on_owner: arg.max_num_nodes_on_owner,
        })
    }

    pub fn generate(&mut self) -> Result<GeneratorOutput, GenError> {
        let (validators, observers) = self.base.generate_validators_and_observers()?;
        let mut wallets = self
            .base
            .wkg
            .generate_keys(&validators, self.max_num_nodes_on_owner)?;
        let mut additional = self
            .base
            .wkg
            .generate_additional_keys(self.base.num_additional_wallet_keys)?;
        if wallets.is_empty() && additional.is_empty() {
            return Err(GenError::InvalidNumberOfWalletKeys);
        }

        let used = total_staked(&wallets);
        let balance = self.base.remaining_balance(&used)?;
        self.base.distribute_balance(&mut wallets, &mut additional, &balance)?;

        let mut initial_accounts = Vec::with_capacity(wallets.len() + additional.len());
        let mut initial_nodes = Vec::with_capacity(validators.len());
        for wallet in &wallets {
            initial_accounts.push(self.base.wallet_account(wallet)?);
            initial_nodes.extend(self.base.initial_nodes_for_wallet(wallet)?);
        }
        for wallet in &additional {
            initial_accounts.push(self.base.wallet_account(wallet)?);
        }

        info!(
            validators = validators.len(),
            observers = observers.len(),
            owners = wallets.len(),
            additional = additional.len(),
            staked = %used,
            "generated direct staking data"
        );

        Ok(GeneratorOutput {
            validator_bls_keys: validators,
            observer_bls_keys: observers,
            wallet_keys: wallets,
            additional_keys: additional,
            delegator_keys: Vec::new(),
            initial_accounts,
            initial_nodes,
        })
    }
}

pub(crate) fn total_staked(wallets: &[WalletKey]) -> BigInt {
    wallets.iter().map(|w| &w.staked_value).sum()
}
