/// Largest prime below `2^32`, used to fold 64-bit keys before bucket selection.
pub const LARGE_PRIME: u64 = 4_294_967_291;

/// Polynomial mix of two `u64` values.
///
/// ```text
/// (a, b) -> a * 31 + b
/// ```
pub fn mix2(a: u64, b: u64) -> u64 {
    a.wrapping_mul(31).wrapping_add(b)
}

/// Polynomial mix of three `u64` values.
///
/// ```text
/// (a, b, c) -> (a * 31 + b) * 17 + c
/// ```
pub fn mix3(a: u64, b: u64, c: u64) -> u64 {
    mix2(a, b).wrapping_mul(17).wrapping_add(c)
}

/// Reduce a 64-bit hash into `0..buckets`, going through [`LARGE_PRIME`] first.
pub fn reduce(hash: u64, buckets: usize) -> usize {
    assert_ne!(buckets, 0, "Bucket count should not be zero");
    ((hash % LARGE_PRIME) % buckets as u64) as usize
}

pub trait MyHash {
    fn hash(&self) -> u64;
}

impl MyHash for (u64, u64) {
    fn hash(&self) -> u64 {
        mix2(self.0, self.1)
    }
}

impl MyHash for (u64, u64, u64) {
    fn hash(&self) -> u64 {
        mix3(self.0, self.1, self.2)
    }
}
