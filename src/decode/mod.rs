//! Lazy UTF-8 decoding adapters.

pub mod byte_len;
pub mod view;

pub use byte_len::UTF8_SEQUENCE_LENGTH;
pub use view::Utf8View;
