//! Lazy, character-indexed views over UTF-8 byte buffers.
//!
//! [`Utf8View`] presents a byte range as a sequence of fixed-width 16-bit
//! code units with amortized O(1) random access, without eagerly decoding
//! the whole buffer.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        Utf8View access paths                    │
//! │                                                                 │
//! │   char_at(i)                                                    │
//! │       │                                                         │
//! │       ├── Latin-only?  ──► bytes[i] widened         O(1)        │
//! │       │                                                         │
//! │       └── non-Latin                                             │
//! │             ├── i < decoded_up_to ──► units[i]      O(1)        │
//! │             │                                                   │
//! │             └── decode forward, one whole sequence              │
//! │                 at a time, caching each unit and                │
//! │                 advancing the cursor, until i is                │
//! │                 reached                     amortized O(1)      │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Concepts
//!
//! - **Latin fast path**: decided once at construction; if no byte has its
//!   high bit set, every access is a direct byte read and no cache is
//!   allocated.
//! - **Sequential decode**: UTF-8 sequence boundaries cannot be located by
//!   random seek, so the non-Latin path consumes whole leading-byte groups
//!   forward from a monotone cursor. Cache slots are written once.
//! - **One slot per sequence**: the view's length is the number of UTF-8
//!   leading bytes in the range, and every sequence decodes into a single
//!   `u16` slot. Supplementary-plane sequences (4 bytes) therefore truncate
//!   to the low 16 bits instead of expanding to a surrogate pair; callers
//!   needing full codepoints must not rely on this view for them.
//!
//! ## Thread Safety
//!
//! Not safe for concurrent use: `char_at` mutates the decode cursor and
//! cache, so a view is a single-owner, non-reentrant object. Rust's borrow
//! rules enforce this through the `&mut self` receiver. Views produced by
//! [`Utf8View::sub_view`] are independent and share no mutable state with
//! their parent.
//!
//! ## Example Usage
//!
//! ```
//! use collatekit::decode::Utf8View;
//!
//! // "é" encodes as 0xC3 0xA9.
//! let mut view = Utf8View::new(&[0xC3, 0xA9]);
//! assert_eq!(view.len(), 1);
//! assert_eq!(view.char_at(0).unwrap(), 0x00E9);
//! ```

use crate::decode::byte_len::{is_leading_byte, UTF8_SEQUENCE_LENGTH};
use crate::error::DecodeError;

/// Character-indexed view over a UTF-8 byte range.
#[derive(Debug)]
pub struct Utf8View<'a> {
    bytes: &'a [u8],
    is_latin_only: bool,
    length: usize,
    // Non-Latin decode state: `decoded_up_to` counts finished code units,
    // `byte_cursor` is the offset of the next undecoded sequence. Both only
    // move forward.
    decoded_up_to: usize,
    byte_cursor: usize,
    units: Vec<u16>,
}

impl<'a> Utf8View<'a> {
    /// Wraps `bytes`, scanning the range exactly once to classify it and to
    /// count leading bytes (the view's length in the non-Latin case).
    pub fn new(bytes: &'a [u8]) -> Self {
        let mut is_latin_only = true;
        let mut leading_bytes = 0usize;
        for &b in bytes {
            if b & 0x80 != 0 {
                is_latin_only = false;
            }
            if is_leading_byte(b) {
                leading_bytes += 1;
            }
        }

        if is_latin_only {
            Self {
                bytes,
                is_latin_only,
                length: bytes.len(),
                decoded_up_to: 0,
                byte_cursor: 0,
                units: Vec::new(),
            }
        } else {
            Self {
                bytes,
                is_latin_only,
                length: leading_bytes,
                decoded_up_to: 0,
                byte_cursor: 0,
                units: vec![0; leading_bytes],
            }
        }
    }

    /// Number of code units in the view: the byte count when Latin-only,
    /// otherwise the number of UTF-8 leading bytes in the range.
    pub fn len(&self) -> usize {
        self.length
    }

    /// Returns `true` if the view holds no code units.
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Returns `true` if every byte in the range is single-byte (`< 0x80`).
    pub fn is_latin_only(&self) -> bool {
        self.is_latin_only
    }

    /// The underlying byte range.
    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// Code unit at `index`.
    ///
    /// Latin path reads the byte directly with no mutation. Non-Latin path
    /// serves cached units below the cursor and otherwise decodes strictly
    /// forward until `index` is covered.
    pub fn char_at(&mut self, index: usize) -> Result<u16, DecodeError> {
        if index >= self.length {
            return Err(DecodeError::IndexOutOfRange {
                index,
                length: self.length,
            });
        }
        if self.is_latin_only {
            return Ok(u16::from(self.bytes[index]));
        }
        while self.decoded_up_to <= index {
            self.decode_next()?;
        }
        Ok(self.units[index])
    }

    /// Independent view over code units `[start, end)`.
    ///
    /// Latin path slices the byte range directly, O(1). Non-Latin path
    /// re-walks the buffer from its start to find the byte offsets for
    /// `start` and `end` (linear in the scanned prefix); the parent's decode
    /// cache is not reused.
    pub fn sub_view(&self, start: usize, end: usize) -> Result<Utf8View<'a>, DecodeError> {
        if start > end || end > self.length {
            return Err(DecodeError::IndexOutOfRange {
                index: if start > end { start } else { end },
                length: self.length,
            });
        }
        if self.is_latin_only {
            return Ok(Utf8View::new(&self.bytes[start..end]));
        }

        let mut unit = 0usize;
        let mut byte = 0usize;
        let mut start_byte = 0usize;
        loop {
            if unit == start {
                start_byte = byte;
            }
            if unit == end {
                return Ok(Utf8View::new(&self.bytes[start_byte..byte]));
            }
            let len = sequence_len(self.bytes, byte)?;
            byte += len;
            unit += 1;
        }
    }

    /// Decodes the sequence at the byte cursor into the next unit slot.
    fn decode_next(&mut self) -> Result<(), DecodeError> {
        let offset = self.byte_cursor;
        let len = sequence_len(self.bytes, offset)?;
        let seq = &self.bytes[offset..offset + len];

        let value: u32 = match len {
            1 => u32::from(seq[0]),
            2 => (u32::from(seq[0] & 0x1F) << 6) | u32::from(seq[1] & 0x3F),
            3 => {
                (u32::from(seq[0] & 0x0F) << 12)
                    | (u32::from(seq[1] & 0x3F) << 6)
                    | u32::from(seq[2] & 0x3F)
            },
            _ => {
                (u32::from(seq[0] & 0x07) << 18)
                    | (u32::from(seq[1] & 0x3F) << 12)
                    | (u32::from(seq[2] & 0x3F) << 6)
                    | u32::from(seq[3] & 0x3F)
            },
        };

        // One slot per sequence: supplementary-plane values truncate here.
        self.units[self.decoded_up_to] = value as u16;
        self.decoded_up_to += 1;
        self.byte_cursor = offset + len;
        Ok(())
    }
}

/// Validated length of the UTF-8 sequence starting at `offset`.
///
/// The lead byte must be valid per [`UTF8_SEQUENCE_LENGTH`], the sequence
/// must fit inside the buffer, and its trailing bytes must be continuation
/// bytes. Any violation is reported against the lead byte, and callers stop
/// at the first failure.
fn sequence_len(bytes: &[u8], offset: usize) -> Result<usize, DecodeError> {
    let lead = bytes[offset];
    let len = UTF8_SEQUENCE_LENGTH[lead as usize] as usize;
    if len == 0 {
        return Err(DecodeError::MalformedLeadByte(lead));
    }
    let end = offset + len;
    if end > bytes.len() || bytes[offset + 1..end].iter().any(|&b| is_leading_byte(b)) {
        return Err(DecodeError::MalformedLeadByte(lead));
    }
    Ok(len)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_buffer_is_latin_only_with_byte_length() {
        let mut view = Utf8View::new(b"hello");
        assert!(view.is_latin_only());
        assert_eq!(view.len(), 5);
        for (i, &b) in b"hello".iter().enumerate() {
            assert_eq!(view.char_at(i).unwrap(), u16::from(b));
        }
    }

    #[test]
    fn every_latin1_range_byte_reads_back_raw() {
        let bytes: Vec<u8> = (0x00..=0x7F).collect();
        let mut view = Utf8View::new(&bytes);
        assert_eq!(view.len(), bytes.len());
        for (i, &b) in bytes.iter().enumerate() {
            assert_eq!(view.char_at(i).unwrap(), u16::from(b));
        }
    }

    #[test]
    fn two_byte_sequence_decodes_to_one_unit() {
        // U+00E9.
        let mut view = Utf8View::new(&[0xC3, 0xA9]);
        assert!(!view.is_latin_only());
        assert_eq!(view.len(), 1);
        assert_eq!(view.char_at(0).unwrap(), 0x00E9);
    }

    #[test]
    fn three_byte_sequence_decodes_to_one_unit() {
        // "€" is U+20AC: 0xE2 0x82 0xAC.
        let mut view = Utf8View::new("\u{20ac}".as_bytes());
        assert_eq!(view.len(), 1);
        assert_eq!(view.char_at(0).unwrap(), 0x20AC);
    }

    #[test]
    fn four_byte_sequence_truncates_to_low_sixteen_bits() {
        // U+1F600 occupies one slot; the value wraps to 0xF600.
        let mut view = Utf8View::new("\u{1f600}".as_bytes());
        assert_eq!(view.len(), 1);
        assert_eq!(view.char_at(0).unwrap(), 0xF600);
    }

    #[test]
    fn mixed_buffer_decodes_in_and_out_of_order() {
        // "aéz" = 0x61, 0xC3 0xA9, 0x7A.
        let bytes = "a\u{e9}z".as_bytes();
        let mut view = Utf8View::new(bytes);
        assert_eq!(view.len(), 3);
        // Jump past the cursor first, then read back through the cache.
        assert_eq!(view.char_at(2).unwrap(), u16::from(b'z'));
        assert_eq!(view.char_at(0).unwrap(), u16::from(b'a'));
        assert_eq!(view.char_at(1).unwrap(), 0x00E9);
        // Repeated reads serve the cache.
        assert_eq!(view.char_at(1).unwrap(), 0x00E9);
    }

    #[test]
    fn char_at_rejects_out_of_range_index() {
        let mut view = Utf8View::new(b"abc");
        assert_eq!(
            view.char_at(3).unwrap_err(),
            DecodeError::IndexOutOfRange {
                index: 3,
                length: 3
            }
        );
        let mut empty = Utf8View::new(b"");
        assert!(matches!(
            empty.char_at(0).unwrap_err(),
            DecodeError::IndexOutOfRange { .. }
        ));
    }

    #[test]
    fn continuation_byte_as_lead_is_malformed() {
        // 0x80 cannot start a sequence; length still counts the later lead.
        let mut view = Utf8View::new(&[0x80, 0xC3, 0xA9]);
        assert_eq!(view.len(), 1);
        assert_eq!(
            view.char_at(0).unwrap_err(),
            DecodeError::MalformedLeadByte(0x80)
        );
    }

    #[test]
    fn truncated_tail_sequence_is_malformed() {
        // Lead byte claims two bytes but the buffer ends.
        let mut view = Utf8View::new(&[0x61, 0xC3]);
        assert_eq!(view.len(), 2);
        assert_eq!(view.char_at(0).unwrap(), u16::from(b'a'));
        assert_eq!(
            view.char_at(1).unwrap_err(),
            DecodeError::MalformedLeadByte(0xC3)
        );
    }

    #[test]
    fn broken_trail_byte_is_malformed() {
        // 0x41 where a continuation byte belongs.
        let mut view = Utf8View::new(&[0xC3, 0x41]);
        assert_eq!(
            view.char_at(0).unwrap_err(),
            DecodeError::MalformedLeadByte(0xC3)
        );
    }

    #[test]
    fn empty_sub_view_on_any_input() {
        let ascii = Utf8View::new(b"abc");
        assert_eq!(ascii.sub_view(0, 0).unwrap().len(), 0);
        let accented = Utf8View::new("\u{e9}\u{e8}".as_bytes());
        assert_eq!(accented.sub_view(0, 0).unwrap().len(), 0);
        assert_eq!(accented.sub_view(2, 2).unwrap().len(), 0);
    }

    #[test]
    fn latin_sub_view_slices_bytes_directly() {
        let view = Utf8View::new(b"hello");
        let mut sub = view.sub_view(1, 4).unwrap();
        assert_eq!(sub.len(), 3);
        assert_eq!(sub.as_bytes(), b"ell");
        assert_eq!(sub.char_at(0).unwrap(), u16::from(b'e'));
    }

    #[test]
    fn non_latin_sub_view_walks_sequence_boundaries() {
        // "aébz" with a 2-byte é: units a, é, b, z.
        let bytes = "a\u{e9}bz".as_bytes();
        let view = Utf8View::new(bytes);
        assert_eq!(view.len(), 4);

        let mut sub = view.sub_view(1, 3).unwrap();
        assert_eq!(sub.len(), 2);
        assert_eq!(sub.char_at(0).unwrap(), 0x00E9);
        assert_eq!(sub.char_at(1).unwrap(), u16::from(b'b'));

        // A suffix ending at len() walks to the buffer end.
        let mut tail = view.sub_view(2, 4).unwrap();
        assert_eq!(tail.len(), 2);
        assert!(tail.is_latin_only());
        assert_eq!(tail.char_at(1).unwrap(), u16::from(b'z'));
    }

    #[test]
    fn sub_view_is_independent_of_parent() {
        let bytes = "\u{e9}\u{e8}".as_bytes();
        let mut view = Utf8View::new(bytes);
        assert_eq!(view.char_at(0).unwrap(), 0x00E9);
        let mut sub = view.sub_view(1, 2).unwrap();
        // Fresh cursor, fresh cache.
        assert_eq!(sub.char_at(0).unwrap(), 0x00E8);
        assert_eq!(view.char_at(1).unwrap(), 0x00E8);
    }

    #[test]
    fn sub_view_rejects_bad_ranges() {
        let view = Utf8View::new(b"abc");
        assert!(matches!(
            view.sub_view(2, 1).unwrap_err(),
            DecodeError::IndexOutOfRange { .. }
        ));
        assert!(matches!(
            view.sub_view(0, 4).unwrap_err(),
            DecodeError::IndexOutOfRange { .. }
        ));
    }

    #[test]
    fn non_latin_sub_view_surfaces_malformed_prefix() {
        // The walk crosses the bad lead before reaching the range.
        let view = Utf8View::new(&[0x80, 0x61, 0xC3, 0xA9]);
        assert_eq!(view.len(), 2);
        assert_eq!(
            view.sub_view(1, 2).unwrap_err(),
            DecodeError::MalformedLeadByte(0x80)
        );
    }
}
