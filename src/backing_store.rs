//! Read-only secondary storage that pages are demand-loaded from.
//!
//! Page `n` lives at byte offset `n * PAGE_SIZE`.

use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;

use log::debug;

use crate::constants::*;
use crate::error::{Result, VmError};

pub struct BackingStore<R = File> {
    reader: R,
    len: u64,
    pages_read: u64,
}

impl BackingStore<File> {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| VmError::OpenBackingStore {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(file).map_err(|e| match e {
            VmError::Io(source) => VmError::OpenBackingStore { path: path.to_path_buf(), source },
            other => other,
        })
    }
}

impl<R: Read + Seek> BackingStore<R> {
    /// Wrap any seekable source, e.g. an in-memory `Cursor`
    pub fn from_reader(mut reader: R) -> Result<Self> {
        let len = reader.seek(SeekFrom::End(0))?;
        Ok(BackingStore { reader, len, pages_read: 0 })
    }

    /// Read the full contents of `page`
    pub fn read_page(&mut self, page: u32) -> Result<[u8; PAGE_SIZE]> {
        let offset = page as u64 * PAGE_SIZE as u64;
        let fail = |source| VmError::BackingStoreRead { page, source };

        if offset + PAGE_SIZE as u64 > self.len {
            return Err(fail(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("page ends at byte {} but store is {} bytes", offset + PAGE_SIZE as u64, self.len),
            )));
        }

        let mut buf = [0u8; PAGE_SIZE];
        self.reader.seek(SeekFrom::Start(offset)).map_err(fail)?;
        self.reader.read_exact(&mut buf).map_err(fail)?;
        self.pages_read += 1;

        debug!("read page {} from backing store offset {}", page, offset);
        Ok(buf)
    }

    /// Size of the store in bytes
    pub fn len(&self) -> u64 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of complete pages the store holds
    pub fn page_count(&self) -> u64 {
        self.len / PAGE_SIZE as u64
    }

    pub fn pages_read(&self) -> u64 {
        self.pages_read
    }
}
