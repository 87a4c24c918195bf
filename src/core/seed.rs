//! Session-seeded string hashing.
//!
//! One seed is drawn per process so that every assignment pass within a
//! session picks the same category for a location, while a fresh session
//! spreads icons differently. Nothing here is meant to be unpredictable.

use crate::core::constants::SEED_RANGE;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

static SESSION_SEED: Lazy<SessionSeed> = Lazy::new(SessionSeed::random);

/// Integer seed for [`hash_str`], fixed for the lifetime of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionSeed(u32);

impl SessionSeed {
    /// The seed drawn for this process. Drawn on first use, constant afterwards.
    pub fn current() -> Self {
        *SESSION_SEED
    }

    /// A caller-chosen seed, for reproducible assignments
    pub fn fixed(value: u32) -> Self {
        Self(value)
    }

    /// Draws a fresh seed in `0..SEED_RANGE`
    pub fn random() -> Self {
        let mut buf = [0u8; 4];
        let raw = match getrandom::getrandom(&mut buf) {
            Ok(()) => u32::from_le_bytes(buf),
            Err(e) => {
                log::warn!("OS randomness unavailable ({}), seeding from the clock", e);
                std::time::SystemTime::now()
                    .duration_since(std::time::UNIX_EPOCH)
                    .map(|d| d.subsec_nanos())
                    .unwrap_or_default()
            }
        };
        let seed = Self(raw % SEED_RANGE);
        log::debug!("session seed drawn: {}", seed.0);
        seed
    }

    pub fn value(&self) -> u32 {
        self.0
    }

    /// Hashes `text` under this seed, see [`hash_str`]
    pub fn hash(&self, text: &str) -> u32 {
        hash_str(*self, text)
    }

    /// Picks `candidates[hash(text) % len]`, or `None` for an empty slice
    pub fn pick<'a, T>(&self, text: &str, candidates: &'a [T]) -> Option<&'a T> {
        if candidates.is_empty() {
            return None;
        }
        let index = self.hash(text) as usize % candidates.len();
        candidates.get(index)
    }
}

/// 32-bit polynomial rolling hash (`h * 31 + unit`) over the UTF-16 code
/// units of `text`, starting from the seed. The absolute value is returned,
/// so `i32::MIN` maps to `2^31`.
pub fn hash_str(seed: SessionSeed, text: &str) -> u32 {
    let mut hash = seed.0 as i32;
    for unit in text.encode_utf16() {
        hash = hash
            .wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(i32::from(unit));
    }
    hash.unsigned_abs()
}
