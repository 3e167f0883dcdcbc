//! Process-wide collation identity registry.
//!
//! Maps collation names of the form `"<localeTag>-<strength>"` to stable
//! integer IDs and to comparator handles closing over engine-built
//! collators. The registry is append-only for the life of the process:
//! entries are created on first install and never evicted or reused.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                   CollationRegistry                          │
//! │                                                              │
//! │   RwLock<RegistryState>                                      │
//! │   ┌──────────────────────────┬─────────────────────────────┐ │
//! │   │ name_to_id: FxHashMap    │ comparators: Vec<Comparator>│ │
//! │   │                          │                             │ │
//! │   │ "en-primary"   → 1       │ [0] collator("en", PRIMARY) │ │
//! │   │ "fr-secondary" → 2       │ [1] collator("fr", SECOND.) │ │
//! │   └──────────────────────────┴─────────────────────────────┘ │
//! │                                                              │
//! │   ID 0 = binary/default, never stored in either structure    │
//! │   ID n ≥ 1 lives at comparators[n - 1]                       │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Concepts
//!
//! - **Dense IDs**: positive IDs are assigned starting at 1, strictly
//!   increasing, never reused, a bijection with installed names.
//! - **Atomic triple-publish**: map entry and comparator slot grow together
//!   under one write lock, so a reader never observes an ID without its
//!   comparator or a name resolved to a half-published entry.
//! - **Sentinels**: `""` and `"default"` short-circuit to ID 0 (raw binary
//!   comparison) without touching the engine or the tables.
//!
//! ## Example Usage
//!
//! ```
//! use std::sync::Arc;
//!
//! use collatekit::engine::NativeCollationEngine;
//! use collatekit::registry::CollationRegistry;
//!
//! let registry = CollationRegistry::new(Arc::new(NativeCollationEngine::new()));
//! let id = registry.install("en-primary").unwrap();
//! assert_eq!(registry.install("en-primary").unwrap(), id);
//!
//! let cmp = registry.comparator(id).unwrap();
//! assert_eq!(cmp.compare(b"resume", b"RESUME"), std::cmp::Ordering::Equal);
//! ```
//!
//! ## Thread Safety
//!
//! Installs are serialized by the write lock; collator construction happens
//! outside the critical section and a second existence check under the lock
//! resolves install races. Post-publish lookups take the read lock only.

use std::cmp::Ordering;
use std::fmt;
use std::hash::Hasher;
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::{FxHashMap, FxHasher};

use crate::engine::{CollationEngine, Collator, Strength};
use crate::error::CollationError;

/// Stable identifier for an installed collation.
pub type CollationId = u32;

/// Identifier reserved for raw binary comparison; never backed by a
/// registry entry.
pub const BINARY_COLLATION_ID: CollationId = 0;

// ---------------------------------------------------------------------------
// Comparator
// ---------------------------------------------------------------------------

/// Cheap-to-clone comparison/hash handle over an installed collator.
#[derive(Clone)]
pub struct Comparator {
    collator: Arc<dyn Collator>,
}

impl Comparator {
    fn new(collator: Arc<dyn Collator>) -> Self {
        Self { collator }
    }

    /// Orders two byte strings under the installed collation.
    pub fn compare(&self, a: &[u8], b: &[u8]) -> Ordering {
        self.collator.compare(a, b)
    }

    /// Hashes the collation key for `value`. Values equal under
    /// [`compare`](Comparator::compare) hash equal.
    pub fn key_hash(&self, value: &[u8]) -> u64 {
        self.collator.key_hash(value)
    }
}

impl fmt::Debug for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Comparator").finish_non_exhaustive()
    }
}

/// Raw binary ordering, the ID-0 semantics.
pub fn binary_compare(a: &[u8], b: &[u8]) -> Ordering {
    a.cmp(b)
}

/// Hash matching [`binary_compare`] equality: raw bytes, engine bypassed.
fn binary_hash(value: &[u8]) -> u64 {
    let mut hasher = FxHasher::default();
    hasher.write(value);
    hasher.finish()
}

// ---------------------------------------------------------------------------
// CollationRegistry
// ---------------------------------------------------------------------------

/// Both append-only structures live under one lock so they grow as a unit.
#[derive(Default)]
struct RegistryState {
    name_to_id: FxHashMap<String, CollationId>,
    comparators: Vec<Comparator>,
}

/// Process-wide registry of collation names, IDs, and comparators.
pub struct CollationRegistry {
    engine: Arc<dyn CollationEngine>,
    state: RwLock<RegistryState>,
}

impl CollationRegistry {
    /// Creates an empty registry backed by `engine`.
    pub fn new(engine: Arc<dyn CollationEngine>) -> Self {
        Self {
            engine,
            state: RwLock::new(RegistryState::default()),
        }
    }

    /// Resolves `name` to its ID, installing it on first use.
    ///
    /// `""` and `"default"` short-circuit to [`BINARY_COLLATION_ID`] with no
    /// validation and no side effects. Resolving the same valid name twice
    /// returns the same ID.
    pub fn resolve(&self, name: &str) -> Result<CollationId, CollationError> {
        self.install(name)
    }

    /// Installs `name`, returning its ID. Idempotent: if `name` already has
    /// an ID, that ID is returned unchanged.
    pub fn install(&self, name: &str) -> Result<CollationId, CollationError> {
        if is_sentinel(name) {
            return Ok(BINARY_COLLATION_ID);
        }
        let (locale, strength) = parse_name(name)?;
        if let Some(&id) = self.state.read().name_to_id.get(name) {
            return Ok(id);
        }

        // Collator construction stays outside the critical section; only the
        // triple publish needs exclusion.
        let collator = self.engine.make_collator(locale, strength)?;

        let mut state = self.state.write();
        if let Some(&id) = state.name_to_id.get(name) {
            // Lost the install race; the winner's entry stands.
            return Ok(id);
        }
        let id = (state.comparators.len() + 1) as CollationId;
        state.comparators.push(Comparator::new(collator));
        state.name_to_id.insert(name.to_string(), id);
        Ok(id)
    }

    /// Fetches the comparator for an installed ID, O(1).
    ///
    /// Fails with [`CollationError::UnknownId`] for ID 0 and for any ID
    /// never returned by [`install`](CollationRegistry::install).
    pub fn comparator(&self, id: CollationId) -> Result<Comparator, CollationError> {
        let index = (id as usize)
            .checked_sub(1)
            .ok_or(CollationError::UnknownId(id))?;
        let state = self.state.read();
        state
            .comparators
            .get(index)
            .cloned()
            .ok_or(CollationError::UnknownId(id))
    }

    /// Collation-aware hash of `value` under the named collation.
    ///
    /// The name is strength-parsed and the collator rebuilt on every call;
    /// this path does not consult the comparator cache. Sentinel names hash
    /// the raw bytes.
    pub fn collation_hash(&self, value: &[u8], name: &str) -> Result<u64, CollationError> {
        if is_sentinel(name) {
            return Ok(binary_hash(value));
        }
        let (locale, strength) = parse_name(name)?;
        let collator = self.engine.make_collator(locale, strength)?;
        Ok(collator.key_hash(value))
    }

    /// Collation-aware hash of `value` under a previously installed ID.
    ///
    /// ID 0 hashes the raw bytes, bypassing the engine entirely.
    pub fn collation_hash_by_id(
        &self,
        value: &[u8],
        id: CollationId,
    ) -> Result<u64, CollationError> {
        if id == BINARY_COLLATION_ID {
            return Ok(binary_hash(value));
        }
        Ok(self.comparator(id)?.key_hash(value))
    }

    /// Number of installed collations (excludes ID 0).
    pub fn installed_len(&self) -> usize {
        self.state.read().comparators.len()
    }
}

impl fmt::Debug for CollationRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CollationRegistry")
            .field("installed", &self.installed_len())
            .finish_non_exhaustive()
    }
}

/// `""` and `"default"` map to ID 0 before any parsing happens.
fn is_sentinel(name: &str) -> bool {
    name.is_empty() || name == "default"
}

/// Splits `name` into `(locale, strength)`.
///
/// The name must split on `-` into exactly two parts; the strength token is
/// matched case-insensitively.
fn parse_name(name: &str) -> Result<(&str, Strength), CollationError> {
    let parts: Vec<&str> = name.split('-').collect();
    if parts.len() != 2 {
        return Err(CollationError::InvalidName(name.to_string()));
    }
    let strength = Strength::parse(parts[1])?;
    Ok((parts[0], strength))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
