//! Error types for the collatekit library.
//!
//! ## Key Components
//!
//! - [`CollationError`]: Returned by the collation registry and engine when
//!   a collation name is malformed, a strength token is unrecognized, or an
//!   ID was never installed.
//! - [`DecodeError`]: Returned by [`Utf8View`](crate::decode::Utf8View) on
//!   bounds violations and malformed UTF-8 input.
//!
//! All errors are synchronous and surfaced directly to the caller; none are
//! retried. They indicate programming errors or malformed input, not
//! transient conditions. A decode failure invalidates the whole requested
//! access, not just one code unit.
//!
//! ## Example Usage
//!
//! ```
//! use collatekit::error::DecodeError;
//! use collatekit::decode::Utf8View;
//!
//! let mut view = Utf8View::new(b"abc");
//! let err = view.char_at(3).unwrap_err();
//! assert_eq!(err, DecodeError::IndexOutOfRange { index: 3, length: 3 });
//! ```

use std::fmt;

use crate::registry::CollationId;

// ---------------------------------------------------------------------------
// CollationError
// ---------------------------------------------------------------------------

/// Error returned by registry and engine operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollationError {
    /// Collation name does not split into exactly `<locale>-<strength>`.
    InvalidName(String),
    /// Strength token is not one of primary/secondary/tertiary/identical.
    /// Carries the offending token.
    InvalidStrength(String),
    /// Lookup of an ID that was never installed. Normal callers only pass
    /// IDs previously returned by `install`/`resolve`, so hitting this
    /// indicates caller misuse.
    UnknownId(CollationId),
}

impl fmt::Display for CollationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CollationError::InvalidName(name) => {
                write!(f, "invalid collation name: {:?}", name)
            },
            CollationError::InvalidStrength(token) => {
                write!(f, "invalid collation strength: {:?}", token)
            },
            CollationError::UnknownId(id) => {
                write!(f, "unknown collation id: {}", id)
            },
        }
    }
}

impl std::error::Error for CollationError {}

// ---------------------------------------------------------------------------
// DecodeError
// ---------------------------------------------------------------------------

/// Error returned by `Utf8View` accessors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// Requested index (or range endpoint) is outside `[0, length]`.
    IndexOutOfRange { index: usize, length: usize },
    /// Sequential decode hit a byte that cannot lead a UTF-8 sequence, or a
    /// sequence whose trailing bytes are truncated or not continuations.
    /// Carries the lead byte of the offending sequence.
    MalformedLeadByte(u8),
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::IndexOutOfRange { index, length } => {
                write!(f, "index out of range: {} (length: {})", index, length)
            },
            DecodeError::MalformedLeadByte(byte) => {
                write!(f, "malformed UTF-8 lead byte: 0x{:02X}", byte)
            },
        }
    }
}

impl std::error::Error for DecodeError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
