pub mod address;
pub mod converter;
pub mod keygen;
pub mod randomizer;

#[cfg(feature = "mock")]
pub mod mock;

pub use address::{generate_sc_address, AddressDeriver, KeccakAddressDeriver};
pub use converter::{Bech32PubkeyConverter, HexPubkeyConverter, PubkeyConverter};
pub use keygen::{BlsKeyGenerator, Ed25519KeyGenerator, KeyGenerator, PrivateKey, PublicKey};
pub use randomizer::{DisabledRandomizer, IntRandomizer, SeededRandomizer};
