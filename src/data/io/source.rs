//! Resumable byte cursors over files and memory regions.
//!
//! A cursor hands out bounded chunks and is then told how many bytes of the
//! chunk were actually consumed. Unconsumed bytes are handed out again by the
//! next [`ByteCursor::next_chunk`], so the consumed ranges concatenate to the
//! source exactly once. [`ByteCursor::position`] is the running total.

use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};

use super::error::LoadError;

/// A source of bytes that can give back the unconsumed tail of a chunk.
pub(crate) trait ByteCursor {
    /// Next chunk of unread bytes. Empty means end of source.
    ///
    /// Every call must be followed by [`ByteCursor::consume`] before the next.
    fn next_chunk(&mut self) -> io::Result<&[u8]>;

    /// Commit `consumed` bytes of the last chunk; the rest will be re-read.
    fn consume(&mut self, consumed: usize) -> io::Result<()>;

    /// Total bytes consumed since the cursor was opened, including the start
    /// offset.
    fn position(&self) -> u64;

    /// Whether the cursor is known to have no bytes left. Sources that cannot
    /// tell without reading return `false`.
    fn is_drained(&self) -> bool {
        false
    }

    /// Check that the cursor may still be read from.
    fn check_readable(&self) -> Result<(), LoadError> {
        Ok(())
    }
}

// =============================================================================
// File cursor
// =============================================================================

/// File read in fixed-size chunks; the unconsumed tail is given back by
/// seeking the file backwards.
pub(crate) struct FileCursor {
    file: File,
    chunk: Vec<u8>,
    pending: usize,
    position: u64,
}

impl FileCursor {
    pub(crate) fn new(mut file: File, chunk_size: usize, start_offset: u64) -> io::Result<Self> {
        if start_offset > 0 {
            file.seek(SeekFrom::Start(start_offset))?;
        }
        Ok(Self {
            file,
            chunk: vec![0; chunk_size],
            pending: 0,
            position: start_offset,
        })
    }
}

impl ByteCursor for FileCursor {
    fn next_chunk(&mut self) -> io::Result<&[u8]> {
        let read = loop {
            match self.file.read(&mut self.chunk) {
                Ok(n) => break n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        };
        self.pending = read;
        Ok(&self.chunk[..read])
    }

    fn consume(&mut self, consumed: usize) -> io::Result<()> {
        debug_assert!(consumed <= self.pending);
        let unconsumed = self.pending - consumed;
        self.pending = 0;
        if unconsumed > 0 {
            log::trace!("rewinding file by {} unconsumed bytes", unconsumed);
            self.file.seek(SeekFrom::Current(-(unconsumed as i64)))?;
        }
        self.position += consumed as u64;
        Ok(())
    }

    fn position(&self) -> u64 {
        self.position
    }
}

// =============================================================================
// Memory cursor
// =============================================================================

/// Borrowed byte region; the whole remainder is one chunk.
pub(crate) struct MemoryCursor<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> MemoryCursor<'a> {
    pub(crate) fn new(data: &'a [u8], start_offset: u64) -> Result<Self, LoadError> {
        match usize::try_from(start_offset) {
            Ok(offset) if offset <= data.len() => Ok(Self { data, offset }),
            _ => Err(LoadError::Range {
                offset: start_offset,
                len: data.len(),
            }),
        }
    }
}

impl ByteCursor for MemoryCursor<'_> {
    fn next_chunk(&mut self) -> io::Result<&[u8]> {
        Ok(&self.data[self.offset..])
    }

    fn consume(&mut self, consumed: usize) -> io::Result<()> {
        debug_assert!(self.offset + consumed <= self.data.len());
        self.offset += consumed;
        Ok(())
    }

    fn position(&self) -> u64 {
        self.offset as u64
    }

    fn is_drained(&self) -> bool {
        self.offset >= self.data.len()
    }

    /// Reading at or past the end of the region is a range error.
    fn check_readable(&self) -> Result<(), LoadError> {
        if self.is_drained() {
            return Err(LoadError::Range {
                offset: self.offset as u64,
                len: self.data.len(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn drain(cursor: &mut dyn ByteCursor, take: usize) -> Vec<u8> {
        let mut out = Vec::new();
        loop {
            let chunk = cursor.next_chunk().unwrap();
            if chunk.is_empty() {
                cursor.consume(0).unwrap();
                return out;
            }
            let n = take.min(chunk.len());
            out.extend_from_slice(&chunk[..n]);
            cursor.consume(n).unwrap();
        }
    }

    #[test]
    fn file_cursor_rereads_unconsumed_tail() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"0123456789").unwrap();

        let mut cursor = FileCursor::new(file.reopen().unwrap(), 4, 0).unwrap();
        // Consume 3 of every 4-byte chunk; the 4th byte must come back.
        let bytes = drain(&mut cursor, 3);
        assert_eq!(bytes, b"0123456789");
        assert_eq!(cursor.position(), 10);
    }

    #[test]
    fn file_cursor_start_offset() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"skip|keep").unwrap();

        let mut cursor = FileCursor::new(file.reopen().unwrap(), 16, 5).unwrap();
        assert_eq!(cursor.position(), 5);
        assert_eq!(drain(&mut cursor, usize::MAX), b"keep");
        assert_eq!(cursor.position(), 9);
    }

    #[test]
    fn memory_cursor_consumes_prefix() {
        let mut cursor = MemoryCursor::new(b"abcdef", 0).unwrap();
        assert_eq!(cursor.next_chunk().unwrap(), b"abcdef");
        cursor.consume(2).unwrap();
        assert_eq!(cursor.next_chunk().unwrap(), b"cdef");
        cursor.consume(0).unwrap();
        assert_eq!(cursor.position(), 2);
        assert_eq!(drain(&mut cursor, 1), b"cdef");
    }

    #[test]
    fn memory_cursor_range_checks() {
        assert!(matches!(
            MemoryCursor::new(b"abc", 4),
            Err(LoadError::Range { offset: 4, len: 3 })
        ));

        let mut cursor = MemoryCursor::new(b"abc", 2).unwrap();
        assert!(cursor.check_readable().is_ok());
        assert!(!cursor.is_drained());
        assert_eq!(cursor.next_chunk().unwrap(), b"c");
        cursor.consume(1).unwrap();
        assert!(cursor.is_drained());
        assert!(matches!(
            cursor.check_readable(),
            Err(LoadError::Range { offset: 3, len: 3 })
        ));
    }

    #[test]
    fn empty_region_is_never_readable() {
        let cursor = MemoryCursor::new(b"", 0).unwrap();
        assert!(cursor.is_drained());
        assert!(matches!(
            cursor.check_readable(),
            Err(LoadError::Range { offset: 0, len: 0 })
        ));
    }

    #[test]
    fn file_cursor_is_always_readable() {
        let file = NamedTempFile::new().unwrap();
        let cursor = FileCursor::new(file.reopen().unwrap(), 4, 0).unwrap();
        assert!(!cursor.is_drained());
        assert!(cursor.check_readable().is_ok());
    }
}
