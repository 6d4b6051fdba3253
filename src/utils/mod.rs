pub mod url_normalizer;

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub use url_normalizer::{normalize_url, UrlNormalizeError};

/// 别名字符表：大小写字母 + 数字，共 62 个字符
pub const ALIAS_ALPHABET: &[u8; 62] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Random alias generator.
///
/// Owns its RNG instead of reaching for process-global random state, so
/// tests can inject a seeded generator and replay the exact sequence.
/// Uniqueness against the store is the caller's responsibility.
pub struct AliasGenerator {
    length: usize,
    rng: Mutex<StdRng>,
}

impl AliasGenerator {
    /// Generator seeded from OS entropy. Not cryptographically secure;
    /// aliases must not be relied on for unpredictability.
    pub fn new(length: usize) -> Self {
        Self::with_rng(length, StdRng::from_os_rng())
    }

    /// Deterministic generator for tests.
    pub fn from_seed(length: usize, seed: u64) -> Self {
        Self::with_rng(length, StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(length: usize, rng: StdRng) -> Self {
        AliasGenerator {
            length,
            rng: Mutex::new(rng),
        }
    }

    pub fn length(&self) -> usize {
        self.length
    }

    /// 生成配置长度的随机别名
    pub fn generate(&self) -> String {
        self.generate_with_length(self.length)
    }

    /// Generate an alias of an explicit length. Each character is drawn
    /// independently and uniformly from [`ALIAS_ALPHABET`].
    pub fn generate_with_length(&self, length: usize) -> String {
        let mut rng = self.rng.lock();
        (0..length)
            .map(|_| ALIAS_ALPHABET[rng.random_range(0..ALIAS_ALPHABET.len())] as char)
            .collect()
    }
}
