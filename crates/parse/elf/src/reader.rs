//! On-demand section reader.
//!
//! [`ElfSectionReader`] pulls only the byte ranges it needs from a
//! [`ByteRangeSource`]: the 64-byte file header, the section header entries,
//! the section-name string table, and finally the requested section's
//! contents. The file header and the name table are parsed once and cached
//! for the lifetime of the reader.

extern crate alloc;

use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::error::ElfError;
use crate::header::{ELF64_EHDR_SIZE, FileHeader};
use crate::names::NameTable;
use crate::section::SectionHeader;
use crate::source::ByteRangeSource;

/// Observable loading state of a reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReaderState {
    /// Nothing has been read yet.
    Uninitialized,
    /// The file header is parsed and cached.
    HeaderLoaded,
    /// The name table and every section header are parsed and cached.
    NameTableLoaded,
}

/// Structures cached once the name table is built.
struct Loaded {
    names: NameTable,
    /// Section headers in table order, read while building `names`.
    sections: Vec<SectionHeader>,
}

/// Reads named sections out of an ELF64 image without loading the whole file.
///
/// Operations take `&mut self`, so a reader serves one request at a time.
/// A cache step is committed only after it fully succeeds: dropping an
/// in-flight future or hitting an error leaves the previous state intact.
pub struct ElfSectionReader<S> {
    source: S,
    header: Option<FileHeader>,
    /// Only set once `header` is.
    loaded: Option<Box<Loaded>>,
}

impl<S> ElfSectionReader<S> {
    /// Creates a reader over `source`. No bytes are read until the first
    /// operation.
    pub fn new(source: S) -> Self {
        Self {
            source,
            header: None,
            loaded: None,
        }
    }

    /// Returns how much of the image structure is cached.
    #[must_use]
    pub fn state(&self) -> ReaderState {
        match (&self.header, &self.loaded) {
            (_, Some(_)) => ReaderState::NameTableLoaded,
            (Some(_), None) => ReaderState::HeaderLoaded,
            (None, None) => ReaderState::Uninitialized,
        }
    }

    /// Returns the underlying byte source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Consumes the reader and hands the source back to the caller, who is
    /// then responsible for releasing it.
    pub fn into_source(self) -> S {
        self.source
    }
}

#[cfg(feature = "std")]
impl ElfSectionReader<crate::source::FileSource> {
    /// Opens the file at `path` and wraps it in a reader.
    ///
    /// # Errors
    ///
    /// Returns the I/O error from opening the file.
    pub fn open(path: impl AsRef<std::path::Path>) -> std::io::Result<Self> {
        Ok(Self::new(crate::source::FileSource::open(path)?))
    }
}

impl<S: ByteRangeSource> ElfSectionReader<S> {
    /// Returns the file header, reading and parsing it on first use.
    ///
    /// # Errors
    ///
    /// Returns the source error or the file header parse error.
    pub async fn header(&mut self) -> Result<FileHeader, ElfError> {
        if let Some(header) = self.header {
            return Ok(header);
        }

        let data = self.source.read(0, ELF64_EHDR_SIZE as u64).await?;
        let header = FileHeader::parse(&data)?;
        log::debug!(
            "file header: {} sections at {:#x}, entry size {}, names in section {}",
            header.section_header_entry_count,
            header.section_header_offset,
            header.section_header_entry_size,
            header.string_table_index,
        );
        self.header = Some(header);
        Ok(header)
    }

    /// Returns the section names in header-table order, building the name
    /// table on first use.
    ///
    /// # Errors
    ///
    /// Returns any error from loading the header, reading section headers,
    /// or resolving names.
    pub async fn name_table(&mut self) -> Result<&NameTable, ElfError> {
        Ok(&self.loaded().await?.names)
    }

    /// Reads the full contents of the first section named `name`.
    ///
    /// The comparison is byte-exact and case-sensitive.
    ///
    /// # Errors
    ///
    /// - [`ElfError::SectionNotFound`] if no section has that name.
    /// - [`ElfError::TruncatedRead`] if the source returns fewer bytes than
    ///   the section's declared size.
    /// - Any error from loading the header or the name table.
    pub async fn read_section(&mut self, name: &str) -> Result<Vec<u8>, ElfError> {
        let loaded = self.loaded().await?;
        let index = loaded
            .names
            .index_of(name)
            .ok_or(ElfError::SectionNotFound)?;
        let shdr = loaded.sections[index];

        log::trace!(
            "section {name:?} is index {index}, {} bytes at {:#x}",
            shdr.size,
            shdr.offset
        );
        let data = self.source.read(shdr.offset, shdr.size).await?;
        if data.len() as u64 != shdr.size {
            log::debug!(
                "section {name:?}: expected {} bytes, source returned {}",
                shdr.size,
                data.len()
            );
            return Err(ElfError::TruncatedRead);
        }
        Ok(data)
    }

    /// Like [`read_section`](Self::read_section), but treats every failure
    /// as "not present".
    pub async fn try_read_section(&mut self, name: &str) -> Option<Vec<u8>> {
        match self.read_section(name).await {
            Ok(data) => Some(data),
            Err(err) => {
                log::debug!("section {name:?} unavailable: {err}");
                None
            }
        }
    }

    /// Returns the section header at `index`.
    ///
    /// Once the name table is loaded this is served from the cache.
    /// Before that, the entry is read and parsed on every call.
    ///
    /// # Errors
    ///
    /// Returns [`ElfError::SectionIndexOutOfRange`] if `index` is not below
    /// the section count, or any read or parse error.
    pub async fn read_section_header(&mut self, index: u16) -> Result<SectionHeader, ElfError> {
        let header = self.header().await?;
        if index >= header.section_header_entry_count {
            return Err(ElfError::SectionIndexOutOfRange);
        }
        if let Some(loaded) = &self.loaded {
            return Ok(loaded.sections[usize::from(index)]);
        }
        self.fetch_section_header(&header, index).await
    }

    /// Ensures the name table is loaded and returns the cached structures.
    async fn loaded(&mut self) -> Result<&Loaded, ElfError> {
        let loaded = match self.loaded.take() {
            Some(loaded) => loaded,
            None => {
                let header = self.header().await?;
                let loaded = self.load_names(header).await?;
                log::debug!("name table loaded: {} sections", loaded.names.len());
                Box::new(loaded)
            }
        };
        let loaded: &Loaded = self.loaded.insert(loaded);
        Ok(loaded)
    }

    /// Reads every section header and the string table, then resolves names.
    async fn load_names(&mut self, header: FileHeader) -> Result<Loaded, ElfError> {
        let count = header.section_header_entry_count;
        if count == 0 {
            let names = NameTable::build(
                &header,
                |_| Err(ElfError::SectionIndexOutOfRange),
                Vec::new(),
                0,
            )?;
            return Ok(Loaded {
                names,
                sections: Vec::new(),
            });
        }

        let strndx = header.string_table_index;
        if strndx >= count {
            log::debug!("string table index {strndx} not below section count {count}");
            return Err(ElfError::MalformedStringTable);
        }

        let strtab = self.fetch_section_header(&header, strndx).await?;
        log::trace!("string table: {} bytes at {:#x}", strtab.size, strtab.offset);
        let table = self.source.read(strtab.offset, strtab.size).await?;

        let mut sections = Vec::with_capacity(usize::from(count));
        for index in 0..count {
            let shdr = if index == strndx {
                strtab
            } else {
                self.fetch_section_header(&header, index).await?
            };
            sections.push(shdr);
        }

        let names = NameTable::build(
            &header,
            |index| Ok(sections[usize::from(index)]),
            table,
            strtab.size,
        )?;

        Ok(Loaded { names, sections })
    }

    /// Reads and parses the fixed-size section header entry at `index`.
    async fn fetch_section_header(
        &mut self,
        header: &FileHeader,
        index: u16,
    ) -> Result<SectionHeader, ElfError> {
        let position = header
            .section_header_position(index)
            .ok_or(ElfError::SectionIndexOutOfRange)?;
        let entry_size = header.section_header_entry_size;
        log::trace!("section header {index}: {entry_size} bytes at {position:#x}");
        let data = self.source.read(position, u64::from(entry_size)).await?;
        SectionHeader::parse(&data, entry_size)
    }
}
