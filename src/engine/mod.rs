//! Collation engine capability.
//!
//! The registry does not interpret ordering itself; it delegates to a
//! pluggable [`CollationEngine`] that turns a `(locale tag, strength)` pair
//! into an opaque [`Collator`]. Backends are interchangeable (ICU bindings,
//! platform locale APIs, or the built-in [`NativeCollationEngine`]) and are
//! selected by handing the registry a different engine at construction.
//!
//! ## Key Concepts
//!
//! - **Strength**: granularity of distinctions a collation honors, from
//!   [`Strength::Primary`] (base letter only) to [`Strength::Identical`]
//!   (full exact distinction).
//! - **Collator**: an immutable comparison/hash capability over UTF-8 byte
//!   strings. Byte strings equal under the collation's equality must hash
//!   equal; downstream grouping and sorting depend on this.

use std::cmp::Ordering;
use std::sync::Arc;

use crate::error::CollationError;

pub mod native;

pub use native::NativeCollationEngine;

/// Granularity of distinctions a collation honors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strength {
    /// Base letters only; case and accents are ignored.
    Primary,
    /// Accents distinguish; case is ignored.
    Secondary,
    /// Case and accents both distinguish.
    Tertiary,
    /// Full exact distinction, down to raw bytes.
    Identical,
}

impl Strength {
    /// Parses a strength token, matching case-insensitively.
    pub fn parse(token: &str) -> Result<Self, CollationError> {
        if token.eq_ignore_ascii_case("primary") {
            Ok(Strength::Primary)
        } else if token.eq_ignore_ascii_case("secondary") {
            Ok(Strength::Secondary)
        } else if token.eq_ignore_ascii_case("tertiary") {
            Ok(Strength::Tertiary)
        } else if token.eq_ignore_ascii_case("identical") {
            Ok(Strength::Identical)
        } else {
            Err(CollationError::InvalidStrength(token.to_string()))
        }
    }
}

/// Locale-aware comparison and hashing over UTF-8 byte strings.
///
/// Implementations close over an immutable collator handle; they carry no
/// mutable state and are shared freely across threads.
pub trait Collator: Send + Sync {
    /// Orders two byte strings under this collation.
    fn compare(&self, a: &[u8], b: &[u8]) -> Ordering;

    /// Hashes the collation key for `value`.
    ///
    /// Values equal under [`compare`](Collator::compare) must hash equal.
    fn key_hash(&self, value: &[u8]) -> u64;
}

/// Factory for collators, parameterized by locale tag and strength.
pub trait CollationEngine: Send + Sync {
    /// Builds a collator for `locale_tag` at `strength`.
    ///
    /// Behavior for an unresolvable locale tag is engine-defined; backends
    /// may fall back to a root locale rather than fail.
    fn make_collator(
        &self,
        locale_tag: &str,
        strength: Strength,
    ) -> Result<Arc<dyn Collator>, CollationError>;
}
