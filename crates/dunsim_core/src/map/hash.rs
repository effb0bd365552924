//! Chunk coordinate hashing.
//!
//! Byte-wise FNV-1a over the three coordinates (order-sensitive), finished
//! with a 64-bit avalanche mix so neighboring chunks scatter across slots
//! and the high bits are usable as a probe step.

use super::coord::ChunkCoord;

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

#[inline]
fn mix_word(mut hash: u64, word: i32) -> u64 {
    for byte in word.to_le_bytes() {
        hash ^= u64::from(byte);
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

/// Hashes a chunk coordinate into a 64-bit value.
///
/// Deterministic across runs and platforms.
#[inline]
#[must_use]
pub fn hash_chunk(chunk: ChunkCoord) -> u64 {
    let mut hash = FNV_OFFSET_BASIS;
    hash = mix_word(hash, chunk.x);
    hash = mix_word(hash, chunk.y);
    hash = mix_word(hash, chunk.floor);

    // Finalizer from splitmix64.
    hash ^= hash >> 30;
    hash = hash.wrapping_mul(0xbf58_476d_1ce4_e5b9);
    hash ^= hash >> 27;
    hash = hash.wrapping_mul(0x94d0_49bb_1331_11eb);
    hash ^= hash >> 31;
    hash
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_hash_is_deterministic() {
        let chunk = ChunkCoord::new(12, -4, 1);
        assert_eq!(hash_chunk(chunk), hash_chunk(chunk));
    }

    #[test]
    fn test_hash_is_order_sensitive() {
        assert_ne!(
            hash_chunk(ChunkCoord::new(1, 2, 0)),
            hash_chunk(ChunkCoord::new(2, 1, 0))
        );
        assert_ne!(
            hash_chunk(ChunkCoord::new(0, 0, 1)),
            hash_chunk(ChunkCoord::new(1, 0, 0))
        );
    }

    #[test]
    fn test_adjacent_chunks_scatter() {
        let mask = (1u64 << 12) - 1;
        let slots: HashSet<u64> = (-8..8)
            .flat_map(|x| (-8..8).map(move |y| ChunkCoord::new(x, y, 0)))
            .map(|chunk| hash_chunk(chunk) & mask)
            .collect();
        // 256 neighbors into 4096 slots: a decent mix leaves few collisions.
        assert!(slots.len() > 230, "only {} distinct slots", slots.len());
    }
}
