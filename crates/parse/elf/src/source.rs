//! Byte-range sources.
//!
//! The reader never loads a whole image. It asks a [`ByteRangeSource`] for
//! the exact ranges it needs. A source may return fewer bytes than requested
//! when the range runs past the end of the data; the reader decides whether
//! that is an error.
//!
//! Provided backends:
//! - [`SliceSource`]: an in-memory buffer.
//! - [`IoSource`]: any `hadris_io::Read + hadris_io::Seek` stream.
//! - [`FileSource`] (`std` feature): a file on disk.

extern crate alloc;

use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

/// Errors reported by a byte-range source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceError {
    /// The requested range cannot be addressed on this platform.
    OutOfRange,
    /// The underlying stream or device reported an I/O error.
    Io,
    /// The source has been closed.
    Closed,
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange => f.write_str("range out of addressable bounds"),
            Self::Io => f.write_str("I/O error"),
            Self::Closed => f.write_str("source closed"),
        }
    }
}

/// Random-access reader of absolute byte ranges.
///
/// `read` may complete immediately or suspend while data is fetched. It may
/// return fewer than `len` bytes at end of data, but never more.
#[allow(async_fn_in_trait)]
pub trait ByteRangeSource {
    /// Reads up to `len` bytes starting at absolute `offset`.
    async fn read(&mut self, offset: u64, len: u64) -> Result<Vec<u8>, SourceError>;
}

impl<S: ByteRangeSource> ByteRangeSource for &mut S {
    async fn read(&mut self, offset: u64, len: u64) -> Result<Vec<u8>, SourceError> {
        (**self).read(offset, len).await
    }
}

// ---------------------------------------------------------------------------
// In-memory source
// ---------------------------------------------------------------------------

/// A source backed by a byte slice already in memory.
#[derive(Debug, Clone, Copy)]
pub struct SliceSource<'a> {
    data: &'a [u8],
}

impl<'a> SliceSource<'a> {
    /// Wraps `data`.
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }
}

impl ByteRangeSource for SliceSource<'_> {
    async fn read(&mut self, offset: u64, len: u64) -> Result<Vec<u8>, SourceError> {
        let start = usize::try_from(offset).map_err(|_| SourceError::OutOfRange)?;
        let Some(remaining) = self.data.get(start..) else {
            return Ok(Vec::new());
        };
        let take = usize::try_from(len).map_or(remaining.len(), |len| len.min(remaining.len()));
        Ok(remaining[..take].to_vec())
    }
}

// ---------------------------------------------------------------------------
// Stream-backed source
// ---------------------------------------------------------------------------

/// Largest chunk requested from the stream in one `read` call.
const IO_CHUNK: usize = 4096;

/// A source over any seekable `hadris_io` stream.
///
/// Each range read seeks to the absolute offset and then reads until the
/// range is filled or the stream reports end of data.
pub struct IoSource<R> {
    inner: R,
}

impl<R> IoSource<R> {
    /// Wraps a seekable stream.
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    /// Releases the wrapped stream.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: hadris_io::Read + hadris_io::Seek> ByteRangeSource for IoSource<R> {
    async fn read(&mut self, offset: u64, len: u64) -> Result<Vec<u8>, SourceError> {
        self.inner
            .seek(hadris_io::SeekFrom::Start(offset))
            .map_err(|_| SourceError::Io)?;

        let mut out = Vec::new();
        let mut chunk = vec![0u8; IO_CHUNK];
        while (out.len() as u64) < len {
            let want =
                usize::try_from(len - out.len() as u64).map_or(IO_CHUNK, |n| n.min(IO_CHUNK));
            let n = self
                .inner
                .read(&mut chunk[..want])
                .map_err(|_| SourceError::Io)?;
            if n == 0 {
                break;
            }
            out.extend_from_slice(&chunk[..n]);
        }
        Ok(out)
    }
}

// ---------------------------------------------------------------------------
// File source
// ---------------------------------------------------------------------------

#[cfg(feature = "std")]
pub use self::file::FileSource;

#[cfg(feature = "std")]
mod file {
    extern crate std;

    use std::fs::File;
    use std::io::{self, Read, Seek, SeekFrom};
    use std::path::Path;
    use std::vec::Vec;

    use super::{ByteRangeSource, SourceError};

    /// A source backed by a file handle.
    ///
    /// The handle stays open until the source is dropped or [`close`d](Self::close).
    #[derive(Debug)]
    pub struct FileSource {
        file: Option<File>,
    }

    impl FileSource {
        /// Opens the file at `path` for reading.
        ///
        /// # Errors
        ///
        /// Returns the I/O error from opening the file.
        pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
            Ok(Self::from_file(File::open(path)?))
        }

        /// Wraps an already opened file.
        #[must_use]
        pub fn from_file(file: File) -> Self {
            Self { file: Some(file) }
        }

        /// Closes the handle. Later reads fail with [`SourceError::Closed`].
        pub fn close(&mut self) {
            self.file = None;
        }

        /// Returns `true` while the handle is open.
        #[must_use]
        pub fn is_open(&self) -> bool {
            self.file.is_some()
        }
    }

    impl ByteRangeSource for FileSource {
        async fn read(&mut self, offset: u64, len: u64) -> Result<Vec<u8>, SourceError> {
            let file = self.file.as_mut().ok_or(SourceError::Closed)?;
            file.seek(SeekFrom::Start(offset)).map_err(|err| {
                log::debug!("seek to {offset:#x} failed: {err}");
                SourceError::Io
            })?;
            let mut out = Vec::new();
            file.take(len).read_to_end(&mut out).map_err(|err| {
                log::debug!("read of {len} bytes at {offset:#x} failed: {err}");
                SourceError::Io
            })?;
            Ok(out)
        }
    }
}
