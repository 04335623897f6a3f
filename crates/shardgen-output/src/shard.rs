use shardgen_core::GenError;

/// Maps an address to its shard from the trailing byte(s) of the address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShardCoordinator {
    num_shards: u32,
    mask_high: u32,
    mask_low: u32,
}

impl ShardCoordinator {
    pub fn new(num_shards: u32) -> Result<Self, GenError> {
        if num_shards == 0 {
            return Err(GenError::NumShardsIsZero);
        }
        let (mask_high, mask_low) = calculate_masks(num_shards);
        Ok(Self {
            num_shards,
            mask_high,
            mask_low,
        })
    }

    pub fn compute_id(&self, address: &[u8]) -> u32 {
        let bytes_needed = match self.num_shards {
            0..=256 => 1,
            257..=65_536 => 2,
            65_537..=16_777_216 => 3,
            _ => 4,
        };
        let start = address.len().saturating_sub(bytes_needed);
        let addr = address[start..]
            .iter()
            .fold(0u32, |acc, b| (acc << 8) | u32::from(*b));

        let shard = addr & self.mask_high;
        if shard > self.num_shards - 1 {
            return addr & self.mask_low;
        }
        shard
    }
}

/// `2^ceil(log2 n) - 1` and the mask one bit narrower.
fn calculate_masks(num_shards: u32) -> (u32, u32) {
    let bits = u32::BITS - (num_shards - 1).leading_zeros();
    let high = ((1u64 << bits) - 1) as u32;
    let low = if bits == 0 { 0 } else { ((1u64 << (bits - 1)) - 1) as u32 };
    (high, low)
}
