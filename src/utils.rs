use crate::consts;

/// Splits an opcode into its four nibbles, most significant first.
pub fn nibble_split(code: u16) -> (u8, u8, u8, u8) {
    let [hi, lo] = code.to_be_bytes();
    ((hi & 0xF0) >> 4, hi & 0x0F, (lo & 0xF0) >> 4, lo & 0x0F)
}

/// Joins two big-endian bytes into an opcode.
pub fn join_bytes(bytes: &[u8; consts::OP_CODE_BYTES]) -> u16 {
    u16::from_be_bytes(*bytes)
}

/// True when `len` bytes starting at `start` fit inside `capacity`.
pub fn bounds_check(start: usize, len: usize, capacity: usize) -> bool {
    start
        .checked_add(len)
        .map_or(false, |end| end <= capacity)
}
