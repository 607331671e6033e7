//! ELF64 file header parsing.
//!
//! Decodes the fixed 64-byte file header using safe field extraction via
//! `from_le_bytes()`. Only the fields needed to locate the section header
//! table are kept; the remaining identification bytes are validated and
//! discarded.

use crate::error::ElfError;

/// ELF magic bytes: `\x7fELF`.
pub(crate) const ELF_MAGIC: [u8; 4] = [0x7f, b'E', b'L', b'F'];

/// ELF class: 64-bit.
pub(crate) const ELFCLASS64: u8 = 2;

/// ELF data encoding: little-endian.
pub(crate) const ELFDATA2LSB: u8 = 1;

/// Size of an ELF64 file header (64 bytes).
pub const ELF64_EHDR_SIZE: usize = 64;

/// Read a little-endian `u16` from `data` at byte offset `off`.
///
/// # Panics
///
/// Panics if `off + 2 > data.len()`. Callers must bounds-check first.
pub(crate) fn le_u16(data: &[u8], off: usize) -> u16 {
    u16::from_le_bytes(*data[off..].first_chunk().unwrap())
}

/// Read a little-endian `u32` from `data` at byte offset `off`.
pub(crate) fn le_u32(data: &[u8], off: usize) -> u32 {
    u32::from_le_bytes(*data[off..].first_chunk().unwrap())
}

/// Read a little-endian `u64` from `data` at byte offset `off`.
pub(crate) fn le_u64(data: &[u8], off: usize) -> u64 {
    u64::from_le_bytes(*data[off..].first_chunk().unwrap())
}

/// Parsed ELF64 file header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileHeader {
    /// Offset of the program (segment) header table in the image.
    pub segment_header_offset: u64,
    /// Offset of the section header table in the image.
    pub section_header_offset: u64,
    /// Size of the file header itself, as recorded at offset 52.
    pub segment_header_size: u16,
    /// Size of each program header entry.
    pub segment_header_entry_size: u16,
    /// Number of program header entries.
    pub segment_header_entry_count: u16,
    /// Size of each section header entry.
    pub section_header_entry_size: u16,
    /// Number of section header entries.
    pub section_header_entry_count: u16,
    /// Index of the section holding section names.
    pub string_table_index: u16,
}

impl FileHeader {
    /// Parse an ELF64 file header from raw bytes.
    ///
    /// Validates the magic, class and data encoding, in that order. Bytes
    /// past the first 64 are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ElfError::TooShort`] if `data` holds fewer than 64 bytes,
    /// or the matching identification error if validation fails.
    pub fn parse(data: &[u8]) -> Result<Self, ElfError> {
        if data.len() < ELF64_EHDR_SIZE {
            return Err(ElfError::TooShort);
        }

        if data[..4] != ELF_MAGIC {
            return Err(ElfError::NotElf);
        }

        if data[4] != ELFCLASS64 {
            return Err(ElfError::UnsupportedClass);
        }

        if data[5] != ELFDATA2LSB {
            return Err(ElfError::UnsupportedEndianness);
        }

        // Offsets are safe because we checked len >= 64 above
        Ok(Self {
            segment_header_offset: le_u64(data, 32),
            section_header_offset: le_u64(data, 40),
            segment_header_size: le_u16(data, 52),
            segment_header_entry_size: le_u16(data, 54),
            segment_header_entry_count: le_u16(data, 56),
            section_header_entry_size: le_u16(data, 58),
            section_header_entry_count: le_u16(data, 60),
            string_table_index: le_u16(data, 62),
        })
    }

    /// Returns the absolute image offset of section header entry `index`.
    ///
    /// Returns `None` if the computation overflows `u64`.
    #[must_use]
    pub fn section_header_position(&self, index: u16) -> Option<u64> {
        u64::from(index)
            .checked_mul(u64::from(self.section_header_entry_size))?
            .checked_add(self.section_header_offset)
    }
}
