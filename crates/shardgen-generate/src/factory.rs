use std::fmt;
use std::str::FromStr;

use shardgen_core::constants::{DELEGATED_STAKE_TYPE, MIXED_TYPE, STAKED_TYPE};
use shardgen_core::{GenError, GeneratorOutput};
use tracing::info;

use crate::args::{ArgDataGenerator, ArgDelegatedStakingGenerator, ArgDirectStakingGenerator, ArgMixedStakingGenerator};
use crate::delegated::DelegatedStakingGenerator;
use crate::direct::DirectStakingGenerator;
use crate::mixed::MixedStakingGenerator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationType {
    Direct,
    Delegated,
    Mixed,
}

impl GenerationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            GenerationType::Direct => STAKED_TYPE,
            GenerationType::Delegated => DELEGATED_STAKE_TYPE,
            GenerationType::Mixed => MIXED_TYPE,
        }
    }
}

impl FromStr for GenerationType {
    type Err = GenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            STAKED_TYPE => Ok(GenerationType::Direct),
            DELEGATED_STAKE_TYPE => Ok(GenerationType::Delegated),
            MIXED_TYPE => Ok(GenerationType::Mixed),
            other => Err(GenError::UnknownGenerationType(other.to_string())),
        }
    }
}

impl fmt::Display for GenerationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The strategy picked by [`create_data_generator`].
pub enum GenerationStrategy {
    Direct(DirectStakingGenerator),
    Delegated(DelegatedStakingGenerator),
    Mixed(MixedStakingGenerator),
}

impl GenerationStrategy {
    pub fn generate(&mut self) -> Result<GeneratorOutput, GenError> {
        match self {
            GenerationStrategy::Direct(g) => g.generate(),
            GenerationStrategy::Delegated(g) => g.generate(),
            GenerationStrategy::Mixed(g) => g.generate(),
        }
    }

    pub fn generation_type(&self) -> GenerationType {
        match self {
            GenerationStrategy::Direct(_) => GenerationType::Direct,
            GenerationStrategy::Delegated(_) => GenerationType::Delegated,
            GenerationStrategy::Mixed(_) => GenerationType::Mixed,
        }
    }
}

/// Build the strategy named by `arg.generation_type`.
pub fn create_data_generator(arg: ArgDataGenerator) -> Result<GenerationStrategy, GenError> {
    let generation_type: GenerationType = arg.generation_type.parse()?;
    info!(generation_type = %generation_type, "creating data generator");

    let strategy = match generation_type {
        GenerationType::Direct => GenerationStrategy::Direct(DirectStakingGenerator::new(ArgDirectStakingGenerator {
            base: arg.base,
            max_num_nodes_on_owner: arg.max_num_nodes_on_owner,
            int_randomizer: arg.int_randomizer,
        })?),
        GenerationType::Delegated => GenerationStrategy::Delegated(DelegatedStakingGenerator::new(delegated_arg(arg))?),
        GenerationType::Mixed => {
            let num_delegated_nodes = arg.num_delegated_nodes;
            let max_num_nodes_on_owner = arg.max_num_nodes_on_owner;
            let mut arg = arg;
            let int_randomizer = arg.int_randomizer.take();
            GenerationStrategy::Mixed(MixedStakingGenerator::new(ArgMixedStakingGenerator {
                delegated: delegated_arg(arg),
                num_delegated_nodes,
                max_num_nodes_on_owner,
                int_randomizer,
            })?)
        }
    };

    Ok(strategy)
}

fn delegated_arg(arg: ArgDataGenerator) -> ArgDelegatedStakingGenerator {
    ArgDelegatedStakingGenerator {
        base: arg.base,
        delegation_owner_pk_string: arg.delegation_owner_pk_string,
        delegation_owner_nonce: arg.delegation_owner_nonce,
        vm_type: arg.vm_type,
        num_delegators: arg.num_delegators,
        address_deriver: arg.address_deriver,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{base_arg, check, mint, OWNER};
    use shardgen_crypto::mock::IntRandomizerStub;

    fn arg(generation_type: &str) -> ArgDataGenerator {
        let mut base = base_arg();
        base.num_validator_bls_keys = 6;
        base.num_additional_wallet_keys = 1;
        ArgDataGenerator {
            generation_type: generation_type.into(),
            base,
            max_num_nodes_on_owner: 2,
            int_randomizer: Some(Box::new(IntRandomizerStub::default())),
            delegation_owner_pk_string: OWNER.into(),
            num_delegators: 4,
            num_delegated_nodes: 2,
            ..Default::default()
        }
    }

    #[test]
    fn parse_generation_type() {
        assert_eq!("direct".parse::<GenerationType>().unwrap(), GenerationType::Direct);
        assert_eq!("delegated".parse::<GenerationType>().unwrap(), GenerationType::Delegated);
        assert_eq!("mixed".parse::<GenerationType>().unwrap(), GenerationType::Mixed);
        assert_eq!(GenerationType::Mixed.to_string(), "mixed");
    }

    #[test]
    fn unknown_type() {
        match create_data_generator(arg("staked-ish")) {
            Err(GenError::UnknownGenerationType(t)) => assert_eq!(t, "staked-ish"),
            Err(e) => panic!("unexpected error: {e}"),
            Ok(_) => panic!("expected an error"),
        }
    }

    #[test]
    fn every_strategy_conserves_supply() {
        for t in ["direct", "delegated", "mixed"] {
            let mut strategy = create_data_generator(arg(t)).unwrap();
            assert_eq!(strategy.generation_type().as_str(), t);
            let out = strategy.generate().unwrap();
            assert_eq!(out.initial_nodes.len(), 6);
            check(&out.initial_accounts, &mint(20_000_000));
        }
    }
}
