//! Built-in collation backend driven by Unicode normalization.
//!
//! Approximates locale collation without a native library by comparing
//! normalized collation keys:
//!
//! - `Primary`: lowercase, NFKD, combining marks stripped (case- and
//!   accent-insensitive).
//! - `Secondary`: lowercase, NFD (accents distinguish, case does not).
//! - `Tertiary`: NFC (case and accents both distinguish).
//! - `Identical`: the raw bytes.
//!
//! Locale tags are accepted as-is; tags this backend does not know fall
//! back to root (codepoint) ordering over the normalized key. Hashes are
//! computed over the key bytes, so strings equal under a strength hash
//! equal at that strength.
//!
//! ## Example Usage
//!
//! ```
//! use std::cmp::Ordering;
//!
//! use collatekit::engine::{CollationEngine, NativeCollationEngine, Strength};
//!
//! let engine = NativeCollationEngine::new();
//! let collator = engine.make_collator("en", Strength::Primary).unwrap();
//! assert_eq!(collator.compare(b"resume", "R\u{c9}SUM\u{c9}".as_bytes()), Ordering::Equal);
//! ```

use std::cmp::Ordering;
use std::hash::Hasher;
use std::sync::Arc;

use rustc_hash::FxHasher;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::engine::{CollationEngine, Collator, Strength};
use crate::error::CollationError;

/// Normalization-based collation engine with no external dependencies on a
/// platform locale library.
#[derive(Debug, Default)]
pub struct NativeCollationEngine;

impl NativeCollationEngine {
    /// Creates the engine.
    pub fn new() -> Self {
        Self
    }
}

impl CollationEngine for NativeCollationEngine {
    fn make_collator(
        &self,
        _locale_tag: &str,
        strength: Strength,
    ) -> Result<Arc<dyn Collator>, CollationError> {
        // Root-locale fallback: the tag only selects tailorings, which this
        // backend does not carry.
        Ok(Arc::new(NativeCollator { strength }))
    }
}

/// Collator comparing normalized key bytes at a fixed strength.
#[derive(Debug)]
struct NativeCollator {
    strength: Strength,
}

impl NativeCollator {
    /// Builds the collation key for `value`.
    ///
    /// Invalid UTF-8 is replaced (U+FFFD) rather than rejected; the decoder
    /// side of the crate is where malformed input is surfaced as an error.
    fn collation_key(&self, value: &[u8]) -> Vec<u8> {
        if self.strength == Strength::Identical {
            return value.to_vec();
        }
        let text = String::from_utf8_lossy(value);
        match self.strength {
            Strength::Primary => text
                .to_lowercase()
                .nfkd()
                .filter(|c| !is_combining_mark(*c))
                .collect::<String>()
                .into_bytes(),
            Strength::Secondary => text
                .to_lowercase()
                .nfd()
                .collect::<String>()
                .into_bytes(),
            Strength::Tertiary => text.nfc().collect::<String>().into_bytes(),
            Strength::Identical => unreachable!("handled above"),
        }
    }
}

impl Collator for NativeCollator {
    fn compare(&self, a: &[u8], b: &[u8]) -> Ordering {
        self.collation_key(a).cmp(&self.collation_key(b))
    }

    fn key_hash(&self, value: &[u8]) -> u64 {
        let mut hasher = FxHasher::default();
        hasher.write(&self.collation_key(value));
        hasher.finish()
    }
}
