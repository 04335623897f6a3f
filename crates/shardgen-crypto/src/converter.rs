use bech32::{FromBase32, ToBase32, Variant};
use shardgen_core::GenError;

/// Converts raw public keys to their human-readable form and back.
pub trait PubkeyConverter: Send + Sync {
    /// Expected raw key length in bytes.
    fn address_len(&self) -> usize;
    fn encode(&self, pk_bytes: &[u8]) -> Result<String, GenError>;
    fn decode(&self, human_readable: &str) -> Result<Vec<u8>, GenError>;
}

fn check_len(expected: usize, got: usize) -> Result<(), GenError> {
    if expected != got {
        return Err(GenError::PubKeyConversion(format!(
            "wrong size, expected {expected} bytes, got {got}"
        )));
    }
    Ok(())
}

// ── Bech32 ───────────────────────────────────────────────────────────────────

/// Bech32 converter used for wallet and contract addresses.
#[derive(Debug, Clone)]
pub struct Bech32PubkeyConverter {
    len: usize,
    hrp: String,
}

impl Bech32PubkeyConverter {
    pub fn new(len: usize, hrp: &str) -> Result<Self, GenError> {
        if len == 0 {
            return Err(GenError::InvalidValue { field: "address length" });
        }
        if hrp.is_empty() {
            return Err(GenError::InvalidValue { field: "bech32 hrp" });
        }
        Ok(Self {
            len,
            hrp: hrp.to_lowercase(),
        })
    }
}

impl PubkeyConverter for Bech32PubkeyConverter {
    fn address_len(&self) -> usize {
        self.len
    }

    fn encode(&self, pk_bytes: &[u8]) -> Result<String, GenError> {
        check_len(self.len, pk_bytes.len())?;
        bech32::encode(&self.hrp, pk_bytes.to_base32(), Variant::Bech32)
            .map_err(|e| GenError::PubKeyConversion(e.to_string()))
    }

    fn decode(&self, human_readable: &str) -> Result<Vec<u8>, GenError> {
        let (hrp, data, variant) = bech32::decode(human_readable)
            .map_err(|e| GenError::PubKeyConversion(format!("{human_readable}: {e}")))?;
        if hrp != self.hrp {
            return Err(GenError::PubKeyConversion(format!(
                "invalid hrp {hrp}, expected {}",
                self.hrp
            )));
        }
        if variant != Variant::Bech32 {
            return Err(GenError::PubKeyConversion("bech32m is not supported".into()));
        }
        let bytes = Vec::<u8>::from_base32(&data)
            .map_err(|e| GenError::PubKeyConversion(e.to_string()))?;
        check_len(self.len, bytes.len())?;
        Ok(bytes)
    }
}

// ── Hex ──────────────────────────────────────────────────────────────────────

/// Hex converter used for validator public keys.
#[derive(Debug, Clone)]
pub struct HexPubkeyConverter {
    len: usize,
}

impl HexPubkeyConverter {
    pub fn new(len: usize) -> Result<Self, GenError> {
        if len == 0 {
            return Err(GenError::InvalidValue { field: "public key length" });
        }
        Ok(Self { len })
    }
}

impl PubkeyConverter for HexPubkeyConverter {
    fn address_len(&self) -> usize {
        self.len
    }

    fn encode(&self, pk_bytes: &[u8]) -> Result<String, GenError> {
        check_len(self.len, pk_bytes.len())?;
        Ok(hex::encode(pk_bytes))
    }

    fn decode(&self, human_readable: &str) -> Result<Vec<u8>, GenError> {
        let bytes = hex::decode(human_readable)
            .map_err(|e| GenError::PubKeyConversion(format!("{human_readable}: {e}")))?;
        check_len(self.len, bytes.len())?;
        Ok(bytes)
    }
}
