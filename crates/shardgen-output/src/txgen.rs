use std::collections::BTreeMap;

use num_bigint::BigInt;
use serde::{Deserialize, Serialize};
use shardgen_core::amount::decimal;
use shardgen_core::{GenError, WalletKey};
use shardgen_crypto::PubkeyConverter;

use crate::shard::ShardCoordinator;

/// Account entry consumed by the transaction generator tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TxgenAccount {
    pub pub_key: String,
    /// Hex-encoded private key.
    pub priv_key: String,
    pub last_nonce: u64,
    #[serde(with = "decimal")]
    pub balance: BigInt,
    #[serde(with = "decimal")]
    pub token_balance: BigInt,
    pub can_reuse_nonce: bool,
}

/// Group `keys` by the shard their address lands in.
pub fn txgen_accounts(
    keys: &[WalletKey],
    converter: &dyn PubkeyConverter,
    coordinator: &ShardCoordinator,
) -> Result<BTreeMap<u32, Vec<TxgenAccount>>, GenError> {
    let mut by_shard: BTreeMap<u32, Vec<TxgenAccount>> = BTreeMap::new();
    for key in keys {
        let shard_id = coordinator.compute_id(&key.pub_key_bytes);
        by_shard.entry(shard_id).or_default().push(TxgenAccount {
            pub_key: converter.encode(&key.pub_key_bytes)?,
            priv_key: hex::encode(&key.priv_key_bytes),
            last_nonce: 0,
            balance: key.balance.clone(),
            token_balance: BigInt::from(0),
            can_reuse_nonce: true,
        });
    }
    Ok(by_shard)
}
