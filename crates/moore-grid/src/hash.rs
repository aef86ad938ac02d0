//! Grid state fingerprints.
//!
//! Uses FNV-1a over the side length and every cell's `f32::to_bits()`.
//! Not cryptographic; meant for fast equality checks between runs.

/// FNV-1a offset basis for 64-bit.
const FNV_OFFSET: u64 = 0xcbf29ce484222325;
/// FNV-1a prime for 64-bit.
const FNV_PRIME: u64 = 0x00000100000001B3;

#[inline]
fn fnv1a_u32(mut hash: u64, v: u32) -> u64 {
    for &b in &v.to_le_bytes() {
        hash = (hash ^ b as u64).wrapping_mul(FNV_PRIME);
    }
    hash
}

/// Hash a square grid's cells.
pub fn cells_hash(size: u32, cells: &[f32]) -> u64 {
    let mut hash = fnv1a_u32(FNV_OFFSET, size);
    for &v in cells {
        hash = fnv1a_u32(hash, v.to_bits());
    }
    hash
}
