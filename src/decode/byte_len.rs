//! Lead-byte length table for UTF-8 sequences.

/// Number of bytes in the UTF-8 sequence led by each byte value, or 0 for
/// bytes that cannot lead a sequence: continuation bytes (`0x80..=0xBF`),
/// overlong leads (`0xC0`, `0xC1`), and values past the last valid lead
/// (`0xF5..=0xFF`).
pub const UTF8_SEQUENCE_LENGTH: [u8; 256] = build_table();

const fn build_table() -> [u8; 256] {
    let mut table = [0u8; 256];
    let mut b = 0usize;
    while b < 256 {
        table[b] = match b {
            0x00..=0x7F => 1,
            0xC2..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF4 => 4,
            _ => 0,
        };
        b += 1;
    }
    table
}

/// Returns `true` if `byte` starts a UTF-8 sequence, i.e. its top two bits
/// are not `10`.
pub(crate) const fn is_leading_byte(byte: u8) -> bool {
    byte & 0xC0 != 0x80
}
