use blstrs::{G2Affine, G2Projective, Scalar};
use ed25519_dalek::{SigningKey, VerifyingKey};
use ff::Field;
use group::{Curve, Group};
use rand::rngs::OsRng;
use shardgen_core::GenError;

/// Private half of a generated key pair.
pub trait PrivateKey: Send {
    fn to_bytes(&self) -> Result<Vec<u8>, GenError>;
}

/// Public half of a generated key pair.
pub trait PublicKey: Send {
    fn to_bytes(&self) -> Result<Vec<u8>, GenError>;
}

/// Capability to produce fresh key pairs.
pub trait KeyGenerator: Send + Sync {
    fn generate_pair(&self) -> (Box<dyn PrivateKey>, Box<dyn PublicKey>);
}

// ── Ed25519 (wallets) ────────────────────────────────────────────────────────

/// Wallet key generator. Private keys serialize as 64 bytes
/// (seed followed by the public key), public keys as 32 bytes.
#[derive(Debug, Default, Clone, Copy)]
pub struct Ed25519KeyGenerator;

struct Ed25519PrivateKey(SigningKey);
struct Ed25519PublicKey(VerifyingKey);

impl PrivateKey for Ed25519PrivateKey {
    fn to_bytes(&self) -> Result<Vec<u8>, GenError> {
        Ok(self.0.to_keypair_bytes().to_vec())
    }
}

impl PublicKey for Ed25519PublicKey {
    fn to_bytes(&self) -> Result<Vec<u8>, GenError> {
        Ok(self.0.to_bytes().to_vec())
    }
}

impl KeyGenerator for Ed25519KeyGenerator {
    fn generate_pair(&self) -> (Box<dyn PrivateKey>, Box<dyn PublicKey>) {
        let sk = SigningKey::generate(&mut OsRng);
        let pk = sk.verifying_key();
        (Box::new(Ed25519PrivateKey(sk)), Box::new(Ed25519PublicKey(pk)))
    }
}

// ── BLS12-381 (validators) ───────────────────────────────────────────────────

/// Validator key generator. Secret scalars serialize little-endian
/// (32 bytes); public keys are compressed G2 points (96 bytes).
#[derive(Debug, Default, Clone, Copy)]
pub struct BlsKeyGenerator;

struct BlsPrivateKey(Scalar);
struct BlsPublicKey(G2Affine);

impl PrivateKey for BlsPrivateKey {
    fn to_bytes(&self) -> Result<Vec<u8>, GenError> {
        Ok(self.0.to_bytes_le().to_vec())
    }
}

impl PublicKey for BlsPublicKey {
    fn to_bytes(&self) -> Result<Vec<u8>, GenError> {
        Ok(self.0.to_compressed().to_vec())
    }
}

impl KeyGenerator for BlsKeyGenerator {
    fn generate_pair(&self) -> (Box<dyn PrivateKey>, Box<dyn PublicKey>) {
        let sk = Scalar::random(OsRng);
        let pk = (G2Projective::generator() * sk).to_affine();
        (Box::new(BlsPrivateKey(sk)), Box::new(BlsPublicKey(pk)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shardgen_core::{VALIDATOR_PUB_KEY_LEN, WALLET_PUB_KEY_LEN};

    #[test]
    fn ed25519_sizes() {
        let (sk, pk) = Ed25519KeyGenerator.generate_pair();
        let sk = sk.to_bytes().unwrap();
        let pk = pk.to_bytes().unwrap();
        assert_eq!(pk.len(), WALLET_PUB_KEY_LEN);
        assert_eq!(sk.len(), 64);
        // The keypair encoding ends with the public key.
        assert_eq!(&sk[32..], &pk[..]);
    }

    #[test]
    fn bls_sizes() {
        let (sk, pk) = BlsKeyGenerator.generate_pair();
        assert_eq!(sk.to_bytes().unwrap().len(), 32);
        assert_eq!(pk.to_bytes().unwrap().len(), VALIDATOR_PUB_KEY_LEN);
    }

    #[test]
    fn pairs_are_fresh() {
        let (_, a) = Ed25519KeyGenerator.generate_pair();
        let (_, b) = Ed25519KeyGenerator.generate_pair();
        assert_ne!(a.to_bytes().unwrap(), b.to_bytes().unwrap());
    }
}
