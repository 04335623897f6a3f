use std::sync::Arc;

use num_bigint::BigInt;
use shardgen_check::InitialAccountsChecker;
use shardgen_core::constants::{default_amount, BASE_UNITS_PER_TOKEN};
use shardgen_core::InitialAccount;
use shardgen_crypto::mock::KeyGeneratorStub;
use shardgen_crypto::{Bech32PubkeyConverter, HexPubkeyConverter, PubkeyConverter};

use crate::args::ArgBaseGenerator;

pub const OWNER: &str = "erd1ulhw20j7jvgfgak5p05kv667k5k9f320sgef5ayxkt9784ql0zssrzyhjp";
pub const CONTRACT: &str = "erd1qqqqqqqqqqqqqpgqvyvaeu6mnr9fq25kt0gyaymtn6zgjmp80zssuqmp6l";

pub fn mint(tokens: u64) -> BigInt {
    BigInt::from(tokens) * default_amount(BASE_UNITS_PER_TOKEN)
}

/// Stubbed keys, bech32 wallets, 2500-token node price and a 20M supply.
pub fn base_arg() -> ArgBaseGenerator {
    ArgBaseGenerator {
        key_generator_for_validators: Some(Box::new(KeyGeneratorStub::new(96, 32))),
        key_generator_for_wallets: Some(Box::new(KeyGeneratorStub::new(32, 64))),
        wallet_pub_key_converter: Some(Arc::new(Bech32PubkeyConverter::new(32, "erd").unwrap())),
        validator_pub_key_converter: Some(Arc::new(HexPubkeyConverter::new(96).unwrap())),
        node_price: Some(mint(2_500)),
        total_supply: mint(20_000_000),
        ..Default::default()
    }
}

pub fn hex_of(bls_pub_key: &[u8]) -> String {
    HexPubkeyConverter::new(96).unwrap().encode(bls_pub_key).unwrap()
}

/// Run the genesis checker with the node price of [`base_arg`].
pub fn check(accounts: &[InitialAccount], total_supply: &BigInt) {
    let checker = InitialAccountsChecker::new(Some(mint(2_500)), Some(total_supply.clone())).unwrap();
    checker.check_initial_accounts(accounts).unwrap();
}
