//! Token byte values and bit masks from the Smile format specification.
//!
//! A Smile document is a four byte header followed by a token stream. Every token starts with a single dispatch
//! byte drawn from one of two tables: the value table, used wherever a value is expected, and the key table, used
//! for object field names. Some dispatch bytes encode their payload length in their low bits; the constants here
//! name the base byte of each such range.

/// The first three bytes of every Smile document.
pub const HEADER: [u8; 3] = [b':', b')', b'\n'];

/// Header flag bit enabling back-references for repeated object keys.
pub const FLAG_SHARED_NAMES: u8 = 0x01;

/// Header flag bit enabling back-references for repeated short string values.
pub const FLAG_SHARED_VALUES: u8 = 0x02;

/// Header flag bit declaring raw binary support.
///
/// The flag round-trips through the header but no raw binary token is ever written or accepted.
pub const FLAG_RAW_BINARY: u8 = 0x04;

/// The empty string, in both value and key position.
pub const EMPTY_STRING: u8 = 0x20;

/// Null.
pub const NULL: u8 = 0x21;

/// Boolean false.
pub const FALSE: u8 = 0x22;

/// Boolean true.
pub const TRUE: u8 = 0x23;

/// A 32-bit integer: four big-endian bytes of the ZigZag encoding follow.
pub const INT_32: u8 = 0x24;

/// A 64-bit integer: eight big-endian bytes of the ZigZag encoding follow.
pub const INT_64: u8 = 0x25;

/// A 32-bit float: four big-endian IEEE-754 bytes follow. Accepted but never produced.
pub const FLOAT_32: u8 = 0x28;

/// A 64-bit float: eight big-endian IEEE-754 bytes follow.
pub const FLOAT_64: u8 = 0x29;

/// Base byte for ASCII strings of 1 to 32 bytes; the low 5 bits hold the length minus 1.
pub const TINY_ASCII: u8 = 0x40;

/// Base byte for ASCII strings of 33 to 64 bytes; the low 5 bits hold the length minus 33.
pub const SMALL_ASCII: u8 = 0x60;

/// Base byte for Unicode strings of 2 to 33 bytes; the low 5 bits hold the length minus 2.
pub const TINY_UNICODE: u8 = 0x80;

/// Base byte for Unicode strings of 34 to 64 bytes; the low 5 bits hold the length minus 34.
pub const SMALL_UNICODE: u8 = 0xA0;

/// Base byte for integers in `[-16, 15]`; the low 5 bits hold the value in two's complement.
pub const SMALL_INT: u8 = 0xC0;

/// An ASCII string longer than 64 bytes: length VInt, the bytes, then [`STRING_END`].
pub const LONG_ASCII: u8 = 0xE0;

/// A Unicode string longer than 64 bytes: length VInt, the bytes, then [`STRING_END`].
pub const LONG_UNICODE: u8 = 0xE4;

/// A shared string reference to an index in `[31, 286]`: one byte holding the index minus 31 follows.
///
/// Indices up to 30 are referenced by the bare bytes `0x01..=0x1F` instead, each holding the index plus 1.
pub const LONG_SHARED_STRING: u8 = 0xEC;

/// Start of an array.
pub const START_ARRAY: u8 = 0xF8;

/// End of an array.
pub const END_ARRAY: u8 = 0xF9;

/// Start of an object.
pub const START_OBJECT: u8 = 0xFA;

/// End of an object.
pub const END_OBJECT: u8 = 0xFB;

/// Terminator for the long string and long key forms.
pub const STRING_END: u8 = 0xFC;

/// Optional end-of-stream marker.
pub const END_OF_STREAM: u8 = 0xFF;

/// A shared key reference to any table index: two big-endian index bytes follow.
pub const KEY_LONG_SHARED: u8 = 0x30;

/// A key longer than 64 bytes: length VInt, the bytes, then [`STRING_END`].
pub const KEY_LONG_NAME: u8 = 0x34;

/// Base byte for shared key references to indices in `[0, 63]`; the low 6 bits hold the index.
pub const KEY_SHORT_SHARED: u8 = 0x40;

/// Base byte for ASCII keys of 1 to 64 bytes; the low 6 bits hold the length minus 1.
pub const KEY_ASCII: u8 = 0x80;

/// Base byte for Unicode keys of 1 to 64 bytes; the low 6 bits hold the length minus 1.
pub const KEY_UNICODE: u8 = 0xC0;

/// Maximum byte length of a string value eligible for the shared value table.
pub const MAX_SHARED_STRING_LEN: usize = 64;

/// Maximum number of entries in either back-reference table.
///
/// Once a table is full, further strings are written inline and the table is left untouched; entries are never
/// evicted within a document.
pub const MAX_SHARED_ENTRIES: usize = 1024;

/// Largest shared value table index expressible as a reference token.
///
/// The table itself can grow to [`MAX_SHARED_ENTRIES`]; entries past this index are always written inline.
pub const MAX_SHARED_STRING_REF: u16 = 286;
