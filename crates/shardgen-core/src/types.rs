use num_bigint::BigInt;
use std::fmt;

use crate::account::{InitialAccount, InitialNode};

// ── BlsKey ───────────────────────────────────────────────────────────────────

/// A validator or observer identity: BLS public + private key bytes.
#[derive(Clone, PartialEq, Eq)]
pub struct BlsKey {
    pub pub_key_bytes: Vec<u8>,
    pub priv_key_bytes: Vec<u8>,
}

impl fmt::Debug for BlsKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BlsKey({})", short_hex(&self.pub_key_bytes))
    }
}

// ── WalletKey ────────────────────────────────────────────────────────────────

/// Key material of one genesis account, plus the validator keys it owns and
/// the amounts assigned to it by a generation strategy.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct WalletKey {
    pub pub_key_bytes: Vec<u8>,
    pub priv_key_bytes: Vec<u8>,
    /// Validator keys this wallet stakes for (empty for non-owners).
    pub bls_keys: Vec<BlsKey>,
    /// Spendable funds.
    pub balance: BigInt,
    /// Amount placed in the delegation contract.
    pub delegated_value: BigInt,
    /// Raw address of the delegation contract (empty when not delegating).
    pub delegated_pub_key_bytes: Vec<u8>,
    /// Amount staked directly on `bls_keys`.
    pub staked_value: BigInt,
}

impl WalletKey {
    pub fn new(pub_key_bytes: Vec<u8>, priv_key_bytes: Vec<u8>) -> Self {
        Self {
            pub_key_bytes,
            priv_key_bytes,
            ..Default::default()
        }
    }
}

impl fmt::Debug for WalletKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WalletKey")
            .field("pub_key", &short_hex(&self.pub_key_bytes))
            .field("bls_keys", &self.bls_keys.len())
            .field("balance", &self.balance)
            .field("staked_value", &self.staked_value)
            .field("delegated_value", &self.delegated_value)
            .finish()
    }
}

// ── GeneratorOutput ──────────────────────────────────────────────────────────

/// Everything one generation run produces. Handed to the checker and then
/// to the output handler.
#[derive(Debug, Clone, Default)]
pub struct GeneratorOutput {
    pub validator_bls_keys: Vec<BlsKey>,
    pub observer_bls_keys: Vec<BlsKey>,
    /// Wallets holding validator stake (direct/mixed) or one per validator
    /// (delegated).
    pub wallet_keys: Vec<WalletKey>,
    /// Balance-only wallets.
    pub additional_keys: Vec<WalletKey>,
    pub delegator_keys: Vec<WalletKey>,
    pub initial_accounts: Vec<InitialAccount>,
    pub initial_nodes: Vec<InitialNode>,
}

fn short_hex(bytes: &[u8]) -> String {
    let h = hex::encode(bytes);
    if h.len() > 16 {
        format!("{}…", &h[..16])
    } else {
        h
    }
}
