use num_bigint::BigInt;
use shardgen_core::{BlsKey, GenError, WalletKey};
use shardgen_crypto::{IntRandomizer, KeyGenerator};
use tracing::debug;

/// Upper bound on the shard counter when keys must land in every shard: the
/// shard is matched against a single byte.
const MAX_SHARDS_FOR_AFFINITY: u32 = 256;

/// Rotating shard counter for shard-affinity mode.
#[derive(Debug, Clone, Copy)]
struct ShardRotation {
    current: u32,
    num_shards: u32,
    enabled: bool,
}

impl ShardRotation {
    fn accepts(&self, pub_key: &[u8]) -> bool {
        if !self.enabled {
            return true;
        }
        pub_key.last().is_some_and(|b| u32::from(*b) == self.current)
    }

    fn advance(&mut self) {
        self.current = (self.current + 1) % self.num_shards;
    }
}

/// Generates wallet keys, grouping validator keys under owners.
pub struct WalletKeyGenerator {
    key_gen: Box<dyn KeyGenerator>,
    randomizer: Box<dyn IntRandomizer>,
    node_price: BigInt,
    rotation: ShardRotation,
}

impl WalletKeyGenerator {
    pub fn new(
        key_gen: Option<Box<dyn KeyGenerator>>,
        randomizer: Option<Box<dyn IntRandomizer>>,
        node_price: Option<BigInt>,
        num_shards: u32,
        generate_in_all_shards: bool,
    ) -> Result<Self, GenError> {
        let key_gen = key_gen.ok_or(GenError::NilKeyGenerator)?;
        let randomizer = randomizer.ok_or(GenError::NilRandomizer)?;
        let node_price = node_price.ok_or(GenError::NilNodePrice)?;
        if num_shards == 0 {
            return Err(GenError::NumShardsIsZero);
        }
        if generate_in_all_shards && num_shards > MAX_SHARDS_FOR_AFFINITY {
            return Err(GenError::InvalidValue { field: "NumShards" });
        }

        Ok(Self {
            key_gen,
            randomizer,
            node_price,
            rotation: ShardRotation {
                current: 0,
                num_shards,
                enabled: generate_in_all_shards,
            },
        })
    }

    pub fn node_price(&self) -> &BigInt {
        &self.node_price
    }

    /// Group `bls_keys` in order into owner wallets of at most
    /// `max_num_keys_on_owner` keys each. Every owner stakes `node_price`
    /// per owned key.
    pub fn generate_keys(
        &mut self,
        bls_keys: &[BlsKey],
        max_num_keys_on_owner: usize,
    ) -> Result<Vec<WalletKey>, GenError> {
        if max_num_keys_on_owner < 1 {
            return Err(GenError::InvalidValue { field: "maxNumKeysOnOwner" });
        }

        let mut wallets = Vec::new();
        let mut pool = bls_keys;
        while !pool.is_empty() {
            let batch = self.batch_size(max_num_keys_on_owner).min(pool.len());
            let (owned, rest) = pool.split_at(batch);
            pool = rest;

            let index = wallets.len();
            let mut wallet = self.generate_key().map_err(|e| e.at_index(index))?;
            wallet.bls_keys = owned.to_vec();
            wallet.staked_value = &self.node_price * BigInt::from(owned.len());
            wallets.push(wallet);
        }

        debug!(
            owners = wallets.len(),
            validators = bls_keys.len(),
            "grouped validators under owner wallets"
        );
        Ok(wallets)
    }

    /// Generate `num_keys` balance-only wallets.
    pub fn generate_additional_keys(&mut self, num_keys: usize) -> Result<Vec<WalletKey>, GenError> {
        (0..num_keys)
            .map(|i| self.generate_key().map_err(|e| e.at_index(i)))
            .collect()
    }

    fn batch_size(&mut self, max_num_keys_on_owner: usize) -> usize {
        if max_num_keys_on_owner == 1 {
            return 1;
        }
        self.randomizer.intn(max_num_keys_on_owner - 1) + 1
    }

    fn generate_key(&mut self) -> Result<WalletKey, GenError> {
        let wallet = loop {
            let (sk, pk) = self.key_gen.generate_pair();
            let pub_key_bytes = pk.to_bytes()?;
            if pub_key_bytes.is_empty() {
                return Err(GenError::KeySerialization("empty wallet public key".into()));
            }
            if !self.rotation.accepts(&pub_key_bytes) {
                continue;
            }
            break WalletKey::new(pub_key_bytes, sk.to_bytes()?);
        };
        self.rotation.advance();

        Ok(wallet)
    }
}
