use shardgen_core::{BlsKey, GenError};
use shardgen_crypto::KeyGenerator;

/// Generates validator and observer BLS key pairs.
pub struct ValidatorKeyGenerator {
    key_gen: Box<dyn KeyGenerator>,
}

impl ValidatorKeyGenerator {
    pub fn new(key_gen: Option<Box<dyn KeyGenerator>>) -> Result<Self, GenError> {
        let key_gen = key_gen.ok_or(GenError::NilKeyGenerator)?;
        Ok(Self { key_gen })
    }

    /// Generate `num_keys` independent key pairs. A serialization failure is
    /// reported with the index of the offending pair.
    pub fn generate_keys(&self, num_keys: usize) -> Result<Vec<BlsKey>, GenError> {
        (0..num_keys)
            .map(|i| self.generate_key().map_err(|e| e.at_index(i)))
            .collect()
    }

    fn generate_key(&self) -> Result<BlsKey, GenError> {
        let (sk, pk) = self.key_gen.generate_pair();
        Ok(BlsKey {
            pub_key_bytes: pk.to_bytes()?,
            priv_key_bytes: sk.to_bytes()?,
        })
    }
}
