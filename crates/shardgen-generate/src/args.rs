use std::sync::Arc;

use num_bigint::BigInt;
use shardgen_core::constants::{
    default_amount, DEFAULT_INITIAL_RATING, DEFAULT_MINIMUM_INITIAL_BALANCE, DEFAULT_TOTAL_SUPPLY,
    DEFAULT_VM_TYPE,
};
use shardgen_crypto::{AddressDeriver, IntRandomizer, KeccakAddressDeriver, KeyGenerator, PubkeyConverter};

/// Inputs shared by every generation strategy.
pub struct ArgBaseGenerator {
    pub key_generator_for_validators: Option<Box<dyn KeyGenerator>>,
    pub key_generator_for_wallets: Option<Box<dyn KeyGenerator>>,
    pub wallet_pub_key_converter: Option<Arc<dyn PubkeyConverter>>,
    pub validator_pub_key_converter: Option<Arc<dyn PubkeyConverter>>,
    pub num_validator_bls_keys: usize,
    pub num_observer_bls_keys: usize,
    pub num_additional_wallet_keys: usize,
    pub richest_account_mode: bool,
    pub node_price: Option<BigInt>,
    pub total_supply: BigInt,
    /// Floor balance of every wallet in richest-account mode, and the
    /// claim-gas balance of every delegator.
    pub minimum_balance: BigInt,
    pub initial_rating: u32,
    pub num_shards: u32,
    /// Force wallet keys to rotate through the shards by their last byte.
    pub generate_in_all_shards: bool,
}

impl Default for ArgBaseGenerator {
    fn default() -> Self {
        Self {
            key_generator_for_validators: None,
            key_generator_for_wallets: None,
            wallet_pub_key_converter: None,
            validator_pub_key_converter: None,
            num_validator_bls_keys: 0,
            num_observer_bls_keys: 0,
            num_additional_wallet_keys: 0,
            richest_account_mode: false,
            node_price: None,
            total_supply: default_amount(DEFAULT_TOTAL_SUPPLY),
            minimum_balance: default_amount(DEFAULT_MINIMUM_INITIAL_BALANCE),
            initial_rating: DEFAULT_INITIAL_RATING,
            num_shards: 1,
            generate_in_all_shards: false,
        }
    }
}

#[derive(Default)]
pub struct ArgDirectStakingGenerator {
    pub base: ArgBaseGenerator,
    pub max_num_nodes_on_owner: usize,
    pub int_randomizer: Option<Box<dyn IntRandomizer>>,
}

pub struct ArgDelegatedStakingGenerator {
    pub base: ArgBaseGenerator,
    /// Encoded address of the account deploying the delegation contract.
    pub delegation_owner_pk_string: String,
    pub delegation_owner_nonce: u64,
    /// Hex-encoded VM type of the delegation contract.
    pub vm_type: String,
    pub num_delegators: usize,
    pub address_deriver: Box<dyn AddressDeriver>,
}

impl Default for ArgDelegatedStakingGenerator {
    fn default() -> Self {
        Self {
            base: ArgBaseGenerator::default(),
            delegation_owner_pk_string: String::new(),
            delegation_owner_nonce: 0,
            vm_type: DEFAULT_VM_TYPE.to_string(),
            num_delegators: 0,
            address_deriver: Box::new(KeccakAddressDeriver::default()),
        }
    }
}

#[derive(Default)]
pub struct ArgMixedStakingGenerator {
    pub delegated: ArgDelegatedStakingGenerator,
    pub num_delegated_nodes: usize,
    pub max_num_nodes_on_owner: usize,
    pub int_randomizer: Option<Box<dyn IntRandomizer>>,
}

/// Flat argument set handed to the factory; the generation type picks which
/// fields are used.
pub struct ArgDataGenerator {
    pub generation_type: String,
    pub base: ArgBaseGenerator,
    pub max_num_nodes_on_owner: usize,
    pub int_randomizer: Option<Box<dyn IntRandomizer>>,
    pub delegation_owner_pk_string: String,
    pub delegation_owner_nonce: u64,
    pub vm_type: String,
    pub num_delegators: usize,
    pub num_delegated_nodes: usize,
    pub address_deriver: Box<dyn AddressDeriver>,
}

impl Default for ArgDataGenerator {
    fn default() -> Self {
        let delegated = ArgDelegatedStakingGenerator::default();
        Self {
            generation_type: shardgen_core::STAKED_TYPE.to_string(),
            base: delegated.base,
            max_num_nodes_on_owner: 1,
            int_randomizer: None,
            delegation_owner_pk_string: delegated.delegation_owner_pk_string,
            delegation_owner_nonce: delegated.delegation_owner_nonce,
            vm_type: delegated.vm_type,
            num_delegators: 0,
            num_delegated_nodes: 0,
            address_deriver: delegated.address_deriver,
        }
    }
}
