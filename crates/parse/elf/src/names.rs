//! Section name resolution.
//!
//! Section headers refer to their names by byte offset into the string
//! table section named by `e_shstrndx`. The names are not stored in header
//! table order, so each index is resolved on its own by scanning from its
//! offset to the next NUL. The resulting [`NameTable`] is ordered by header
//! table index.

extern crate alloc;

use alloc::vec::Vec;
use core::ops::Range;

use crate::error::ElfError;
use crate::header::FileHeader;
use crate::section::SectionHeader;

/// Section names in header-table order.
///
/// Holds the raw string table bytes plus one byte span per section, so
/// names are preserved exactly even when they are not valid UTF-8.
/// Duplicate names are allowed; lookups return the first match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameTable {
    data: Vec<u8>,
    spans: Vec<Range<usize>>,
}

impl NameTable {
    /// Builds the name table for every index in
    /// `0..header.section_header_entry_count`.
    ///
    /// `section_header_at` supplies the parsed header for an index.
    /// `string_table` is the string table section as read from the source
    /// and `declared_size` is that section's `size` field.
    ///
    /// # Errors
    ///
    /// - [`ElfError::IncompleteRead`] if `string_table.len() != declared_size`.
    /// - [`ElfError::MalformedStringTable`] if a name offset is out of bounds
    ///   or its name has no NUL terminator.
    /// - Any error returned by `section_header_at`.
    pub fn build<F>(
        header: &FileHeader,
        mut section_header_at: F,
        string_table: Vec<u8>,
        declared_size: u64,
    ) -> Result<Self, ElfError>
    where
        F: FnMut(u16) -> Result<SectionHeader, ElfError>,
    {
        if string_table.len() as u64 != declared_size {
            return Err(ElfError::IncompleteRead);
        }

        let count = header.section_header_entry_count;
        let mut spans = Vec::with_capacity(usize::from(count));
        for index in 0..count {
            let shdr = section_header_at(index)?;
            let span = name_span(&string_table, shdr.name_offset)?;
            log::trace!(
                "section {index}: name at {}..{} ({:?})",
                span.start,
                span.end,
                core::str::from_utf8(&string_table[span.clone()]).unwrap_or("<non-utf8>")
            );
            spans.push(span);
        }

        Ok(Self {
            data: string_table,
            spans,
        })
    }

    /// Returns the number of names (one per section header).
    #[must_use]
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    /// Returns `true` if the image has no section headers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Returns the raw name bytes of section `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&[u8]> {
        let span = self.spans.get(index)?;
        Some(&self.data[span.clone()])
    }

    /// Returns the name of section `index`, if it is valid UTF-8.
    #[must_use]
    pub fn get_str(&self, index: usize) -> Option<&str> {
        core::str::from_utf8(self.get(index)?).ok()
    }

    /// Returns the first section index whose name equals `name` byte for byte.
    #[must_use]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.iter().position(|candidate| candidate == name.as_bytes())
    }

    /// Returns an iterator over raw names in header-table order.
    pub fn iter(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.spans.iter().map(|span| &self.data[span.clone()])
    }
}

/// Locates the NUL-terminated name starting at `offset` in `table`.
fn name_span(table: &[u8], offset: u32) -> Result<Range<usize>, ElfError> {
    let start = usize::try_from(offset).map_err(|_| ElfError::MalformedStringTable)?;
    let remaining = table.get(start..).ok_or(ElfError::MalformedStringTable)?;
    let len = remaining
        .iter()
        .position(|&b| b == 0)
        .ok_or(ElfError::MalformedStringTable)?;
    Ok(start..start + len)
}
