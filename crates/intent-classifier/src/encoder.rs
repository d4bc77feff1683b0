/// Black-box text-to-vector boundary.
///
/// A backend must be deterministic: the same text always encodes to the same
/// vector. The vocabulary table and every probe must go through the same
/// backend instance; mixing encoder identities invalidates all comparisons.
pub trait TextEncoder {
    /// Fixed output dimension of this backend.
    fn dim(&self) -> usize;

    fn encode(&self, text: &str) -> Vec<f32>;
}

impl<T: TextEncoder + ?Sized> TextEncoder for Box<T> {
    fn dim(&self) -> usize {
        (**self).dim()
    }

    fn encode(&self, text: &str) -> Vec<f32> {
        (**self).encode(text)
    }
}

/// Deterministic hashed bag-of-words embedding.
///
/// A model-free stand-in with the contract shape of a sentence-embedding
/// backend: whitespace tokens of the lower-cased text are FNV-1a hashed into a
/// fixed-dimension count vector. Good enough to exercise the similarity
/// ranking; not a semantic model.
#[cfg(feature = "mock")]
pub struct HashedBowEncoder {
    dim: usize,
}

#[cfg(feature = "mock")]
impl HashedBowEncoder {
    pub fn new(dim: usize) -> Self {
        Self { dim: dim.max(1) }
    }
}

#[cfg(feature = "mock")]
impl Default for HashedBowEncoder {
    fn default() -> Self {
        Self::new(512)
    }
}

#[cfg(feature = "mock")]
impl TextEncoder for HashedBowEncoder {
    fn dim(&self) -> usize {
        self.dim
    }

    fn encode(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0; self.dim];
        for token in text.to_lowercase().split_whitespace() {
            let slot = (fnv1a(token) % self.dim as u64) as usize;
            vector[slot] += 1.0;
        }
        vector
    }
}

#[cfg(feature = "mock")]
fn fnv1a(token: &str) -> u64 {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for byte in token.bytes() {
        hash ^= u64::from(byte);
        hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
    }
    hash
}
