//! Error types shared by the parsers and the section reader.

use core::fmt;

use crate::source::SourceError;

/// Errors that can occur when parsing or reading an ELF image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElfError {
    /// The image does not start with the ELF magic bytes.
    NotElf,
    /// The ELF class is not 64-bit (`ELFCLASS64`).
    UnsupportedClass,
    /// The data encoding is not little-endian (`ELFDATA2LSB`).
    UnsupportedEndianness,
    /// A header or table entry is shorter than its fixed layout.
    TooShort,
    /// The source returned fewer section bytes than the header declares.
    TruncatedRead,
    /// The section-name string table could not be read in full.
    IncompleteRead,
    /// A name offset points past the string table or at an unterminated name.
    MalformedStringTable,
    /// No section carries the requested name.
    SectionNotFound,
    /// A section index is not below `section_header_entry_count`.
    SectionIndexOutOfRange,
    /// The underlying byte source failed.
    Source(SourceError),
}

impl fmt::Display for ElfError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotElf => write!(f, "invalid ELF magic bytes"),
            Self::UnsupportedClass => write!(f, "unsupported ELF class (expected ELFCLASS64)"),
            Self::UnsupportedEndianness => {
                write!(f, "unsupported data encoding (expected little-endian)")
            }
            Self::TooShort => write!(f, "header data too short"),
            Self::TruncatedRead => write!(f, "section data shorter than declared size"),
            Self::IncompleteRead => write!(f, "could not read the section name string table"),
            Self::MalformedStringTable => write!(f, "malformed section name string table"),
            Self::SectionNotFound => write!(f, "section not found"),
            Self::SectionIndexOutOfRange => write!(f, "section index out of range"),
            Self::Source(err) => write!(f, "byte source error: {err}"),
        }
    }
}

impl core::error::Error for ElfError {}

impl From<SourceError> for ElfError {
    fn from(err: SourceError) -> Self {
        Self::Source(err)
    }
}
