use shardgen_core::constants::{DEFAULT_CHAIN_ID, DEFAULT_HYSTERESIS, DEFAULT_MIN_TX_VERSION, DEFAULT_ROUND_DURATION_MS};

/// Network parameters copied verbatim into `nodesSetup.json`.
#[derive(Debug, Clone, PartialEq)]
pub struct NodesSetupConfig {
    /// Round duration in milliseconds.
    pub round_duration: u64,
    pub consensus_group_size: u32,
    /// Minimum number of nodes per shard (the validators per shard).
    pub num_of_nodes_per_shard: u32,
    pub metachain_consensus_group_size: u32,
    pub num_of_metachain_nodes: u32,
    pub hysteresis: f32,
    pub adaptivity: bool,
    pub chain_id: String,
    pub min_transaction_version: u32,
}

impl Default for NodesSetupConfig {
    fn default() -> Self {
        Self {
            round_duration: DEFAULT_ROUND_DURATION_MS,
            consensus_group_size: 1,
            num_of_nodes_per_shard: 1,
            metachain_consensus_group_size: 1,
            num_of_metachain_nodes: 1,
            hysteresis: DEFAULT_HYSTERESIS,
            adaptivity: false,
            chain_id: DEFAULT_CHAIN_ID.into(),
            min_transaction_version: DEFAULT_MIN_TX_VERSION,
        }
    }
}
