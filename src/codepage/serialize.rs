//! Binary layout of the finished lookup tables.
//!
//! The artifact is 131072 little-endian 16-bit values (262144 bytes). The
//! canonical half order follows the downstream transcoder's convention: the
//! Unicode-to-codepage table occupies the first 65536 elements and the
//! codepage-to-Unicode table the second. The element offsets below are the
//! single source of truth for that ordering.

use std::io::Write;

use byteorder::{LittleEndian, WriteBytesExt};

use super::tables::{LookupTables, TABLE_LEN};

/// Element offset of the Unicode-to-codepage half in the serialized artifact.
pub const FROM_UNICODE_OFFSET: usize = 0;

/// Element offset of the codepage-to-Unicode half. Consumers index the
/// artifact as `u16` elements and add this offset to decode.
pub const TO_UNICODE_OFFSET: usize = TABLE_LEN;

/// Total artifact size in bytes: two tables of 65536 16-bit values.
pub const SERIALIZED_LEN: usize = 2 * TABLE_LEN * 2;

impl LookupTables {
    /// Write the canonical byte layout to `writer`.
    ///
    /// Emits exactly [`SERIALIZED_LEN`] bytes, each value least-significant
    /// byte first: the `from_unicode` half at [`FROM_UNICODE_OFFSET`], then
    /// the `to_unicode` half at [`TO_UNICODE_OFFSET`].
    pub fn write_to(&self, writer: &mut impl Write) -> std::io::Result<()> {
        for &cp in self.from_unicode_table() {
            writer.write_u16::<LittleEndian>(cp)?;
        }
        for &uni in self.to_unicode_table() {
            writer.write_u16::<LittleEndian>(uni)?;
        }
        Ok(())
    }

    /// The canonical byte layout as an owned buffer.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(SERIALIZED_LEN);
        for &value in self
            .from_unicode_table()
            .iter()
            .chain(self.to_unicode_table())
        {
            buf.extend_from_slice(&value.to_le_bytes());
        }
        buf
    }
}
