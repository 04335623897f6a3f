pub mod args;
pub mod base;
pub mod delegated;
mod delegated_base;
pub mod demo;
pub mod direct;
pub mod factory;
pub mod mixed;
pub mod validator_keys;
pub mod wallet_keys;

#[cfg(test)]
mod test_util;

pub use args::{
    ArgBaseGenerator, ArgDataGenerator, ArgDelegatedStakingGenerator, ArgDirectStakingGenerator,
    ArgMixedStakingGenerator,
};
pub use base::compute_wallet_balance;
pub use delegated::DelegatedStakingGenerator;
pub use demo::{apply_demo_addresses, DemoAddresses};
pub use direct::DirectStakingGenerator;
pub use factory::{create_data_generator, GenerationStrategy, GenerationType};
pub use mixed::MixedStakingGenerator;
pub use validator_keys::ValidatorKeyGenerator;
pub use wallet_keys::WalletKeyGenerator;
