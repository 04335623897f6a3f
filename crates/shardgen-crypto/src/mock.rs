//! Deterministic stand-ins for the key-generation and randomizer
//! capabilities, used by the generator tests.

use std::sync::atomic::{AtomicU64, Ordering};

use sha3::{Digest, Keccak256};
use shardgen_core::GenError;

use crate::keygen::{KeyGenerator, PrivateKey, PublicKey};
use crate::randomizer::IntRandomizer;

/// Produces keys derived from an internal counter, so two fresh stubs yield
/// the same sequence of key pairs.
pub struct KeyGeneratorStub {
    counter: AtomicU64,
    pub_len: usize,
    priv_len: usize,
    fail_from: Option<u64>,
}

impl KeyGeneratorStub {
    pub fn new(pub_len: usize, priv_len: usize) -> Self {
        Self {
            counter: AtomicU64::new(0),
            pub_len,
            priv_len,
            fail_from: None,
        }
    }

    /// Keys generated from the `n`-th call onwards fail to serialize.
    pub fn failing_from(mut self, n: u64) -> Self {
        self.fail_from = Some(n);
        self
    }
}

struct StubKey {
    bytes: Vec<u8>,
    fail: bool,
}

impl StubKey {
    fn bytes(&self) -> Result<Vec<u8>, GenError> {
        if self.fail {
            return Err(GenError::KeySerialization("stub serialization failure".into()));
        }
        Ok(self.bytes.clone())
    }
}

impl PrivateKey for StubKey {
    fn to_bytes(&self) -> Result<Vec<u8>, GenError> {
        self.bytes()
    }
}

impl PublicKey for StubKey {
    fn to_bytes(&self) -> Result<Vec<u8>, GenError> {
        self.bytes()
    }
}

fn derive_bytes(tag: u8, index: u64, len: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(len);
    let mut block = 0u32;
    while out.len() < len {
        let mut hasher = Keccak256::new();
        hasher.update([tag]);
        hasher.update(index.to_le_bytes());
        hasher.update(block.to_le_bytes());
        out.extend_from_slice(&hasher.finalize());
        block += 1;
    }
    out.truncate(len);
    out
}

impl KeyGenerator for KeyGeneratorStub {
    fn generate_pair(&self) -> (Box<dyn PrivateKey>, Box<dyn PublicKey>) {
        let index = self.counter.fetch_add(1, Ordering::SeqCst);
        let fail = self.fail_from.is_some_and(|n| index >= n);
        let sk = StubKey {
            bytes: derive_bytes(0, index, self.priv_len),
            fail,
        };
        let pk = StubKey {
            bytes: derive_bytes(1, index, self.pub_len),
            fail,
        };
        (Box::new(sk), Box::new(pk))
    }
}

/// Randomizer driven by a closure; returns 0 when none is set.
#[derive(Default)]
pub struct IntRandomizerStub {
    pub intn_called: Option<Box<dyn FnMut(usize) -> usize + Send>>,
}

impl IntRandomizerStub {
    pub fn with(f: impl FnMut(usize) -> usize + Send + 'static) -> Self {
        Self {
            intn_called: Some(Box::new(f)),
        }
    }
}

impl IntRandomizer for IntRandomizerStub {
    fn intn(&mut self, n: usize) -> usize {
        match self.intn_called.as_mut() {
            Some(f) => f(n),
            None => 0,
        }
    }
}
