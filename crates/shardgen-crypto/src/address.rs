use sha3::{Digest, Keccak256};
use shardgen_core::constants::{NUM_INIT_BYTES_FOR_SC_ADDRESS, SHARD_IDENTIFIER_LEN, VM_TYPE_LEN};
use shardgen_core::GenError;

use crate::converter::PubkeyConverter;

/// Derives the address of a contract deployed by `creator` at `nonce`.
pub trait AddressDeriver: Send + Sync {
    fn new_address(&self, creator: &[u8], nonce: u64, vm_type: &[u8]) -> Result<Vec<u8>, GenError>;
}

/// Contract address scheme: `keccak256(creator ‖ nonce_le)` with the first
/// ten bytes replaced by eight zero bytes plus the VM type, and the last two
/// bytes taken from the creator so the contract lands in the creator's shard.
#[derive(Debug, Clone, Copy)]
pub struct KeccakAddressDeriver {
    address_len: usize,
}

impl KeccakAddressDeriver {
    pub fn new(address_len: usize) -> Self {
        Self { address_len }
    }
}

impl Default for KeccakAddressDeriver {
    fn default() -> Self {
        Self::new(shardgen_core::WALLET_PUB_KEY_LEN)
    }
}

impl AddressDeriver for KeccakAddressDeriver {
    fn new_address(&self, creator: &[u8], nonce: u64, vm_type: &[u8]) -> Result<Vec<u8>, GenError> {
        if creator.len() != self.address_len {
            return Err(GenError::AddressDerivation(format!(
                "creator address length {} not correct, expected {}",
                creator.len(),
                self.address_len
            )));
        }
        if vm_type.len() != VM_TYPE_LEN {
            return Err(GenError::AddressDerivation(format!(
                "vm type length {} not correct, expected {VM_TYPE_LEN}",
                vm_type.len()
            )));
        }

        let mut hasher = Keccak256::new();
        hasher.update(creator);
        hasher.update(nonce.to_le_bytes());
        let mut address = hasher.finalize().to_vec();

        let zeros = NUM_INIT_BYTES_FOR_SC_ADDRESS - VM_TYPE_LEN;
        address[..zeros].fill(0);
        address[zeros..NUM_INIT_BYTES_FOR_SC_ADDRESS].copy_from_slice(vm_type);

        let n = address.len();
        address[n - SHARD_IDENTIFIER_LEN..]
            .copy_from_slice(&creator[creator.len() - SHARD_IDENTIFIER_LEN..]);

        Ok(address)
    }
}

/// Compute the encoded address of the contract deployed by the encoded
/// `owner` at `nonce` for the hex-encoded `vm_type`.
pub fn generate_sc_address(
    owner: &str,
    nonce: u64,
    vm_type: &str,
    converter: &dyn PubkeyConverter,
    deriver: &dyn AddressDeriver,
) -> Result<String, GenError> {
    let owner_bytes = converter.decode(owner)?;
    let vm_type_bytes = hex::decode(vm_type)
        .map_err(|e| GenError::AddressDerivation(format!("vm type {vm_type}: {e}")))?;
    let sc_bytes = deriver.new_address(&owner_bytes, nonce, &vm_type_bytes)?;

    converter.encode(&sc_bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::converter::Bech32PubkeyConverter;

    #[test]
    fn known_delegation_address() {
        let conv = Bech32PubkeyConverter::new(32, "erd").unwrap();
        let sc = generate_sc_address(
            "erd1ulhw20j7jvgfgak5p05kv667k5k9f320sgef5ayxkt9784ql0zssrzyhjp",
            0,
            "0500",
            &conv,
            &KeccakAddressDeriver::default(),
        )
        .unwrap();
        assert_eq!(
            sc,
            "erd1qqqqqqqqqqqqqpgqvyvaeu6mnr9fq25kt0gyaymtn6zgjmp80zssuqmp6l"
        );
    }

    #[test]
    fn layout_of_derived_address() {
        let creator = [7u8; 32];
        let addr = KeccakAddressDeriver::default()
            .new_address(&creator, 3, &[5, 0])
            .unwrap();
        assert_eq!(addr.len(), 32);
        assert_eq!(&addr[..8], &[0u8; 8]);
        assert_eq!(&addr[8..10], &[5, 0]);
        assert_eq!(&addr[30..], &[7, 7]);
    }

    #[test]
    fn nonce_changes_address() {
        let d = KeccakAddressDeriver::default();
        let a = d.new_address(&[1u8; 32], 0, &[5, 0]).unwrap();
        let b = d.new_address(&[1u8; 32], 1, &[5, 0]).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn rejects_bad_lengths() {
        let d = KeccakAddressDeriver::default();
        assert!(d.new_address(&[1u8; 31], 0, &[5, 0]).is_err());
        assert!(d.new_address(&[1u8; 32], 0, &[5]).is_err());
    }

    #[test]
    fn rejects_bad_vm_type_hex() {
        let conv = Bech32PubkeyConverter::new(32, "erd").unwrap();
        let err = generate_sc_address(
            "erd1ulhw20j7jvgfgak5p05kv667k5k9f320sgef5ayxkt9784ql0zssrzyhjp",
            0,
            "zz",
            &conv,
            &KeccakAddressDeriver::default(),
        )
        .unwrap_err();
        assert!(matches!(err, GenError::AddressDerivation(_)));
    }
}
