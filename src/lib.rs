//! collatekit: collation identity registry and lazy UTF-8 decoding views.
//!
//! See `DESIGN.md` for internal architecture and invariants.

pub mod decode;
pub mod engine;
pub mod error;
pub mod prelude;
pub mod registry;
