use num_bigint::BigInt;
use serde::{Deserialize, Serialize};

use crate::amount::decimal;

// ── Genesis ledger entries ───────────────────────────────────────────────────

/// Delegation part of an initial account.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DelegationData {
    /// Encoded delegation contract address, empty when nothing is delegated.
    pub address: String,
    #[serde(with = "decimal")]
    pub value: BigInt,
}

impl DelegationData {
    pub fn none() -> Self {
        Self::default()
    }
}

/// One genesis account. `supply` must equal
/// `balance + staking_value + delegation.value`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitialAccount {
    pub address: String,
    #[serde(with = "decimal")]
    pub supply: BigInt,
    #[serde(with = "decimal")]
    pub balance: BigInt,
    #[serde(with = "decimal")]
    pub staking_value: BigInt,
    pub delegation: DelegationData,
}

impl InitialAccount {
    /// Build an account whose supply is derived from its parts.
    pub fn new(
        address: String,
        balance: BigInt,
        staking_value: BigInt,
        delegation: DelegationData,
    ) -> Self {
        let supply = &balance + &staking_value + &delegation.value;
        Self {
            address,
            supply,
            balance,
            staking_value,
            delegation,
        }
    }
}

// ── Nodes setup ──────────────────────────────────────────────────────────────

/// Maps a validator public key to the address economically responsible for
/// its stake (owner wallet or delegation contract).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitialNode {
    pub pub_key: String,
    pub address: String,
    pub initial_rating: u32,
}

/// The node-setup descriptor written to `nodesSetup.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodesSetup {
    pub start_time: i64,
    pub round_duration: u64,
    pub consensus_group_size: u32,
    pub min_nodes_per_shard: u32,
    pub meta_chain_consensus_group_size: u32,
    pub meta_chain_min_nodes: u32,
    pub hysteresis: f32,
    pub adaptivity: bool,
    #[serde(rename = "chainID")]
    pub chain_id: String,
    pub min_transaction_version: u32,
    pub initial_nodes: Vec<InitialNode>,
}
