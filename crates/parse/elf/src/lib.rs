//! On-demand ELF64 section reader.
//!
//! Reads named sections out of 64-bit little-endian ELF images without
//! loading the whole file. Only the file header, the section header entries
//! and the section-name string table are read, followed by the requested
//! section's bytes. Parsing uses safe field extraction (`from_le_bytes`).
//!
//! # Usage
//!
//! ```
//! use lazy_elf::{ElfSectionReader, SliceSource, block_on};
//!
//! fn build_id(image: &[u8]) -> Option<Vec<u8>> {
//!     let mut reader = ElfSectionReader::new(SliceSource::new(image));
//!     block_on(reader.try_read_section(".note.gnu.build-id"))
//! }
//! ```

#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![forbid(unsafe_code)]

pub mod block_on;
pub mod error;
pub mod header;
pub mod names;
pub mod reader;
pub mod section;
pub mod source;

pub use block_on::block_on;
pub use error::ElfError;
pub use header::{ELF64_EHDR_SIZE, FileHeader};
pub use names::NameTable;
pub use reader::{ElfSectionReader, ReaderState};
pub use section::{
    ELF64_SHDR_SIZE, SHF_ALLOC, SHF_EXECINSTR, SHF_WRITE, SHT_NOBITS, SHT_NOTE, SHT_NULL,
    SHT_PROGBITS, SHT_STRTAB, SHT_SYMTAB, SectionHeader,
};
#[cfg(feature = "std")]
pub use source::FileSource;
pub use source::{ByteRangeSource, IoSource, SliceSource, SourceError};
