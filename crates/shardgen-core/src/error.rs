use num_bigint::BigInt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenError {
    // ── Construction-time validation ─────────────────────────────────────────
    #[error("nil key generator")]
    NilKeyGenerator,

    #[error("nil randomizer")]
    NilRandomizer,

    #[error("nil node price")]
    NilNodePrice,

    #[error("nil pub key converter for the {field}")]
    NilPubKeyConverter { field: &'static str },

    #[error("number of shards is zero")]
    NumShardsIsZero,

    #[error("zero or negative value for {field}")]
    ZeroOrNegative { field: &'static str },

    #[error("nil value for {field}")]
    NilValue { field: &'static str },

    #[error("nil file handler for {field}")]
    NilFileHandler { field: &'static str },

    #[error("invalid value for {field}")]
    InvalidValue { field: &'static str },

    // ── Generation ───────────────────────────────────────────────────────────
    #[error("total supply too small, total supply: {total_supply}, usedBalance: {used_balance}")]
    TotalSupplyTooSmall {
        total_supply: BigInt,
        used_balance: BigInt,
    },

    #[error("invalid number of wallet keys")]
    InvalidNumberOfWalletKeys,

    #[error("{source} at index {index}")]
    AtIndex {
        index: usize,
        #[source]
        source: Box<GenError>,
    },

    #[error("unknown data generation type: {0}")]
    UnknownGenerationType(String),

    // ── Initial accounts checks ──────────────────────────────────────────────
    #[error("empty initial accounts list")]
    EmptyInitialAccounts,

    #[error("negative value for address {address}, field {field}")]
    NegativeValue {
        address: String,
        field: &'static str,
    },

    #[error("supply mismatch for address {address}")]
    SupplyMismatch { address: String },

    #[error("staking value error for address {address}")]
    StakingValueError { address: String },

    #[error("delegation values error for address {address}")]
    DelegationValues { address: String },

    #[error("total supply mismatch computed: {computed}, provided: {provided}")]
    TotalSupplyMismatch { computed: BigInt, provided: BigInt },

    // ── Conversion / encoding ────────────────────────────────────────────────
    #[error("string is not a number: {0}")]
    StringIsNotANumber(String),

    #[error("negative value: {0}")]
    NegativeNumber(String),

    #[error("pub key conversion error: {0}")]
    PubKeyConversion(String),

    #[error("address derivation error: {0}")]
    AddressDerivation(String),

    #[error("key serialization error: {0}")]
    KeySerialization(String),

    // ── Serialization / io ───────────────────────────────────────────────────
    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl GenError {
    /// Wrap `self` with the index of the item that failed.
    pub fn at_index(self, index: usize) -> Self {
        GenError::AtIndex {
            index,
            source: Box::new(self),
        }
    }
}

impl From<serde_json::Error> for GenError {
    fn from(e: serde_json::Error) -> Self {
        GenError::Serialization(e.to_string())
    }
}
