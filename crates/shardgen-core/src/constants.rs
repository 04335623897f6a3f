//! ─── Shardgen Constants ─────────────────────────────────────────────────────
//!
//! Defaults for the genesis generator. Amounts are expressed in base units
//! (1 token = 10^18 base units) and kept as strings because `BigInt`
//! values cannot be built in a `const` context.

use num_bigint::BigInt;

// ── Amounts ──────────────────────────────────────────────────────────────────

/// 1 token expressed in base units.
pub const BASE_UNITS_PER_TOKEN: &str = "1000000000000000000";

/// Default balance every ordinary wallet gets in richest-account mode, and
/// the claim-gas balance given to each delegator.
pub const DEFAULT_MINIMUM_INITIAL_BALANCE: &str = BASE_UNITS_PER_TOKEN;

/// Default total supply: 20,000,000 tokens.
pub const DEFAULT_TOTAL_SUPPLY: &str = "20000000000000000000000000";

/// Default node price: 2,500 tokens per validator slot.
pub const DEFAULT_NODE_PRICE: &str = "2500000000000000000000";

/// Parse one of the decimal constants above.
pub fn default_amount(value: &str) -> BigInt {
    value.parse().unwrap_or_default()
}

// ── Generation types ─────────────────────────────────────────────────────────

/// Every validator owner stakes directly.
pub const STAKED_TYPE: &str = "direct";

/// All validators are staked through the delegation contract.
pub const DELEGATED_STAKE_TYPE: &str = "delegated";

/// First validators delegated, the rest staked directly.
pub const MIXED_TYPE: &str = "mixed";

// ── Keys / addresses ─────────────────────────────────────────────────────────

/// Wallet public key (and address) length in bytes.
pub const WALLET_PUB_KEY_LEN: usize = 32;

/// Compressed BLS12-381 G2 public key length in bytes.
pub const VALIDATOR_PUB_KEY_LEN: usize = 96;

/// Default bech32 human-readable part for wallet addresses.
pub const DEFAULT_WALLET_HRP: &str = "erd";

/// Default VM type (hex) used when deriving the delegation contract address.
pub const DEFAULT_VM_TYPE: &str = "0500";

/// Number of leading bytes of a contract address carrying the VM type.
pub const NUM_INIT_BYTES_FOR_SC_ADDRESS: usize = 10;

/// VM type length in bytes.
pub const VM_TYPE_LEN: usize = 2;

/// Trailing bytes of a contract address copied from the creator (shard id).
pub const SHARD_IDENTIFIER_LEN: usize = 2;

// ── Nodes setup ──────────────────────────────────────────────────────────────

pub const DEFAULT_INITIAL_RATING: u32 = 5_000_001;
pub const DEFAULT_ROUND_DURATION_MS: u64 = 6_000;
pub const DEFAULT_HYSTERESIS: f32 = 0.2;
pub const DEFAULT_CHAIN_ID: &str = "testnet";
pub const DEFAULT_MIN_TX_VERSION: u32 = 1;
