use std::fmt;
use std::hash::Hasher;

use metrohash::MetroHash128;

/// Seed shared by every digest in the crate, so hashes are comparable across runs.
const HASH_SEED: u64 = 0x736e_6170_7472_6565;

/// 128-bit content digest of a file or a folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ContentHash(pub u128);

impl ContentHash {
    pub fn as_u128(&self) -> u128 {
        self.0
    }

    pub fn to_be_bytes(&self) -> [u8; 16] {
        self.0.to_be_bytes()
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", self.0)
    }
}

/// Incremental MetroHash128 digest.
///
/// `write` feeds raw bytes and is meant for streaming file contents.
/// `write_part` prefixes every part with its length, so that the sequence
/// `["ab", "c"]` never collides with `["a", "bc"]`.
pub struct ContentHasher {
    inner: MetroHash128,
}

impl Default for ContentHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentHasher {
    pub fn new() -> Self {
        Self {
            inner: MetroHash128::with_seed(HASH_SEED),
        }
    }

    pub fn write(&mut self, bytes: &[u8]) {
        self.inner.write(bytes);
    }

    pub fn write_part(&mut self, part: &[u8]) {
        self.inner.write(&(part.len() as u64).to_le_bytes());
        self.inner.write(part);
    }

    pub fn finish(&self) -> ContentHash {
        let (high, low) = self.inner.finish128();
        ContentHash((u128::from(high) << 64) | u128::from(low))
    }
}

/// Digest of an ordered sequence of parts.
pub fn hash_multiple<I, P>(parts: I) -> ContentHash
where
    I: IntoIterator<Item = P>,
    P: AsRef<[u8]>,
{
    let mut hasher = ContentHasher::new();
    for part in parts {
        hasher.write_part(part.as_ref());
    }
    hasher.finish()
}
