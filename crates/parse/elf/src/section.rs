//! ELF64 section header parsing.
//!
//! A section header entry is decoded from exactly one entry's worth of
//! bytes. The parser knows nothing about where the entry sits in the table;
//! the reader computes that from the [`FileHeader`](crate::FileHeader).

use crate::error::ElfError;
use crate::header::{le_u32, le_u64};

/// Section type: inactive entry.
pub const SHT_NULL: u32 = 0;

/// Section type: program-defined contents.
pub const SHT_PROGBITS: u32 = 1;

/// Section type: symbol table.
pub const SHT_SYMTAB: u32 = 2;

/// Section type: string table.
pub const SHT_STRTAB: u32 = 3;

/// Section type: note.
pub const SHT_NOTE: u32 = 7;

/// Section type: occupies no file space (`.bss`).
pub const SHT_NOBITS: u32 = 8;

/// Section flag: writable data.
pub const SHF_WRITE: u64 = 0x1;

/// Section flag: occupies memory during execution.
pub const SHF_ALLOC: u64 = 0x2;

/// Section flag: executable machine instructions.
pub const SHF_EXECINSTR: u64 = 0x4;

/// Size of an ELF64 section header entry (64 bytes).
pub const ELF64_SHDR_SIZE: usize = 64;

/// Parsed ELF64 section header entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionHeader {
    /// Offset into the section-name string table for this section's name.
    pub name_offset: u32,
    /// Section type (`SHT_PROGBITS`, `SHT_STRTAB`, etc.).
    pub section_type: u32,
    /// Section flags.
    pub flags: u64,
    /// Virtual address of the section in memory (0 for non-loaded sections).
    pub load_address: u64,
    /// Image offset of the section data.
    pub offset: u64,
    /// Size of the section data in bytes.
    pub size: u64,
    /// Associated section index.
    pub link: u32,
    /// Extra info (interpretation depends on section type).
    pub info: u32,
    /// Required alignment of the section.
    pub alignment: u64,
    /// Size of each entry (for sections with fixed-size entries).
    pub entry_size: u64,
}

impl SectionHeader {
    /// Parse one section header entry.
    ///
    /// `data` must hold exactly `entry_size` bytes, the table's declared
    /// entry size. Bytes beyond the 64-byte ELF64 layout are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ElfError::TooShort`] if `data.len() != entry_size` or if
    /// `entry_size` is smaller than an ELF64 section header.
    pub fn parse(data: &[u8], entry_size: u16) -> Result<Self, ElfError> {
        let entry_size = usize::from(entry_size);
        if data.len() != entry_size || entry_size < ELF64_SHDR_SIZE {
            return Err(ElfError::TooShort);
        }

        Ok(Self {
            name_offset: le_u32(data, 0),
            section_type: le_u32(data, 4),
            flags: le_u64(data, 8),
            load_address: le_u64(data, 16),
            offset: le_u64(data, 24),
            size: le_u64(data, 32),
            link: le_u32(data, 40),
            info: le_u32(data, 44),
            alignment: le_u64(data, 48),
            entry_size: le_u64(data, 56),
        })
    }

    /// Returns the image byte range `offset..offset + size`.
    ///
    /// Returns `None` if the end overflows `u64`.
    #[must_use]
    pub fn file_range(&self) -> Option<core::ops::Range<u64>> {
        let end = self.offset.checked_add(self.size)?;
        Some(self.offset..end)
    }
}
