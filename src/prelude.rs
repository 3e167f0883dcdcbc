pub use crate::decode::{Utf8View, UTF8_SEQUENCE_LENGTH};
pub use crate::engine::{CollationEngine, Collator, NativeCollationEngine, Strength};
pub use crate::error::{CollationError, DecodeError};
pub use crate::registry::{
    binary_compare, CollationId, CollationRegistry, Comparator, BINARY_COLLATION_ID,
};
