use std::fs::{self, OpenOptions};
use std::io::{self, Cursor, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::buffer::Buffer;
use crate::{Error, ErrorKind};

/// The access mode a [`MediaFile`] is currently in.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Mode {
    /// The file is open for reading.
    Read,
    /// The file is open for reading and writing.
    ReadWrite,
    /// The file is not open, reads and writes short-circuit.
    Closed,
}

#[derive(Debug)]
enum Backing {
    Disk { path: PathBuf, handle: Option<fs::File> },
    Memory { cursor: Cursor<Vec<u8>> },
}

/// A random access handle over a filesystem path or an owned memory buffer.
///
/// All stream access is gated on the mode and the corruption flag, a handle that was marked as
/// corrupt refuses any further operation.
#[derive(Debug)]
pub struct MediaFile {
    backing: Backing,
    mode: Mode,
    corruption: Option<String>,
}

impl MediaFile {
    /// Opens the file at the path for reading.
    pub fn open(path: impl AsRef<Path>) -> crate::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let handle = fs::File::open(&path)?;
        Ok(Self {
            backing: Backing::Disk { path, handle: Some(handle) },
            mode: Mode::Read,
            corruption: None,
        })
    }

    /// Creates a file over the owned byte image, open for reading.
    pub fn from_vec(data: Vec<u8>) -> Self {
        Self {
            backing: Backing::Memory { cursor: Cursor::new(data) },
            mode: Mode::Read,
            corruption: None,
        }
    }

    /// The current access mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Closes the handle. For disk backed files the OS handle is released, the path is retained
    /// so the file can be reopened.
    pub fn close(&mut self) {
        if let Backing::Disk { handle, .. } = &mut self.backing {
            *handle = None;
        }
        self.mode = Mode::Closed;
    }

    /// Reopens the handle in the requested mode.
    pub fn reopen(&mut self, mode: Mode) -> crate::Result<()> {
        self.check_corrupt()?;
        if mode == Mode::Closed {
            self.close();
            return Ok(());
        }
        if let Backing::Disk { path, handle } = &mut self.backing {
            let f = OpenOptions::new()
                .read(true)
                .write(mode == Mode::ReadWrite)
                .open(&*path)?;
            *handle = Some(f);
        }
        self.mode = mode;
        Ok(())
    }

    /// Marks the file as corrupt. Every operation afterwards fails with [`ErrorKind::Corrupt`].
    pub fn mark_corrupt(&mut self, reason: impl Into<String>) {
        if self.corruption.is_none() {
            self.corruption = Some(reason.into());
        }
    }

    pub fn is_corrupt(&self) -> bool {
        self.corruption.is_some()
    }

    /// The reason the file was marked corrupt, if it was.
    pub fn corruption_reason(&self) -> Option<&str> {
        self.corruption.as_deref()
    }

    /// Returns the total length of the file in bytes.
    pub fn len(&mut self) -> crate::Result<u64> {
        self.check_open()?;
        let pos = self.stream_position()?;
        let len = self.seek(SeekFrom::End(0))?;
        self.seek(SeekFrom::Start(pos))?;
        Ok(len)
    }

    /// Returns the current stream position.
    pub fn tell(&mut self) -> crate::Result<u64> {
        self.check_open()?;
        Ok(self.stream_position()?)
    }

    /// Reads `n` bytes at the current position.
    pub fn read_block(&mut self, n: u64) -> crate::Result<Buffer> {
        self.check_open()?;
        let mut buf = vec![0; n as usize];
        self.read_exact(&mut buf)?;
        Ok(Buffer::from(buf))
    }

    /// Splices `bytes` into the file at `at`, replacing `replace_len` bytes and shifting
    /// everything after the replaced range by the length difference.
    ///
    /// The tail is staged in memory before any byte of the file is touched, so a failure while
    /// reading leaves the file unchanged.
    pub fn insert(&mut self, bytes: &[u8], at: u64, replace_len: u64) -> crate::Result<()> {
        self.check_open()?;
        if self.mode != Mode::ReadWrite {
            return Err(Error::new(ErrorKind::InvalidMode, "File is not open for writing"));
        }

        let old_len = self.len()?;
        let tail_start = at.checked_add(replace_len).filter(|s| *s <= old_len).ok_or_else(
            || Error::new(ErrorKind::OutOfBounds, "Splice range exceeds file length"),
        )?;

        match &mut self.backing {
            Backing::Memory { cursor } => {
                let data = cursor.get_mut();
                let tail = data.split_off(tail_start as usize);
                data.truncate(at as usize);
                data.extend_from_slice(bytes);
                data.extend_from_slice(&tail);
            }
            Backing::Disk { handle: Some(f), .. } => {
                f.seek(SeekFrom::Start(tail_start))?;
                let mut tail = Vec::with_capacity((old_len - tail_start) as usize);
                f.read_to_end(&mut tail)?;

                f.seek(SeekFrom::Start(at))?;
                f.write_all(bytes)?;
                f.write_all(&tail)?;
                f.set_len(at + bytes.len() as u64 + tail.len() as u64)?;
                f.flush()?;
            }
            Backing::Disk { handle: None, .. } => unreachable!("checked by check_open"),
        }

        debug!(
            at,
            replace_len,
            new_len = bytes.len(),
            "spliced file region"
        );
        Ok(())
    }

    /// Truncates the file to the given length.
    pub fn truncate(&mut self, len: u64) -> crate::Result<()> {
        self.check_open()?;
        if self.mode != Mode::ReadWrite {
            return Err(Error::new(ErrorKind::InvalidMode, "File is not open for writing"));
        }
        match &mut self.backing {
            Backing::Memory { cursor } => {
                cursor.get_mut().truncate(len as usize);
            }
            Backing::Disk { handle: Some(f), .. } => f.set_len(len)?,
            Backing::Disk { handle: None, .. } => unreachable!("checked by check_open"),
        }
        Ok(())
    }

    /// Returns the byte image of a memory backed file.
    pub fn as_memory(&self) -> Option<&[u8]> {
        match &self.backing {
            Backing::Memory { cursor } => Some(cursor.get_ref()),
            Backing::Disk { .. } => None,
        }
    }

    fn check_corrupt(&self) -> crate::Result<()> {
        match &self.corruption {
            Some(r) => Err(Error::new(ErrorKind::Corrupt, r.clone())),
            None => Ok(()),
        }
    }

    fn check_open(&self) -> crate::Result<()> {
        self.check_corrupt()?;
        if self.mode == Mode::Closed {
            return Err(Error::new(ErrorKind::InvalidMode, "File is closed"));
        }
        Ok(())
    }

    fn io_gate(&self, write: bool) -> io::Result<()> {
        if self.corruption.is_some() {
            return Err(io::Error::new(io::ErrorKind::InvalidData, "file marked as corrupt"));
        }
        match (self.mode, write) {
            (Mode::Closed, _) => Err(io::Error::new(io::ErrorKind::NotConnected, "file is closed")),
            (Mode::Read, true) => {
                Err(io::Error::new(io::ErrorKind::PermissionDenied, "file is read-only"))
            }
            _ => Ok(()),
        }
    }
}

impl Read for MediaFile {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.io_gate(false)?;
        match &mut self.backing {
            Backing::Disk { handle: Some(f), .. } => f.read(buf),
            Backing::Disk { handle: None, .. } => {
                Err(io::Error::new(io::ErrorKind::NotConnected, "file is closed"))
            }
            Backing::Memory { cursor } => cursor.read(buf),
        }
    }
}

impl Seek for MediaFile {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.io_gate(false)?;
        match &mut self.backing {
            Backing::Disk { handle: Some(f), .. } => f.seek(pos),
            Backing::Disk { handle: None, .. } => {
                Err(io::Error::new(io::ErrorKind::NotConnected, "file is closed"))
            }
            Backing::Memory { cursor } => cursor.seek(pos),
        }
    }
}

impl Write for MediaFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.io_gate(true)?;
        match &mut self.backing {
            Backing::Disk { handle: Some(f), .. } => f.write(buf),
            Backing::Disk { handle: None, .. } => {
                Err(io::Error::new(io::ErrorKind::NotConnected, "file is closed"))
            }
            Backing::Memory { cursor } => cursor.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match &mut self.backing {
            Backing::Disk { handle: Some(f), .. } => f.flush(),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn memory_splice() {
        let mut file = MediaFile::from_vec(b"aabbcc".to_vec());
        file.reopen(Mode::ReadWrite).unwrap();
        file.insert(b"xyz", 2, 2).unwrap();
        assert_eq!(file.as_memory().unwrap(), b"aaxyzcc");
        assert_eq!(file.len().unwrap(), 7);
    }

    #[test]
    fn insert_requires_write_mode() {
        let mut file = MediaFile::from_vec(b"aabbcc".to_vec());
        let err = file.insert(b"xyz", 0, 0).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::InvalidMode));
    }

    #[test]
    fn corrupt_short_circuits() {
        let mut file = MediaFile::from_vec(b"aabbcc".to_vec());
        file.mark_corrupt("bad box");
        let err = file.read_block(2).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::Corrupt));
        assert_eq!(file.corruption_reason(), Some("bad box"));
    }

    #[test]
    fn closed_file_reads_fail() {
        let mut file = MediaFile::from_vec(b"aabbcc".to_vec());
        file.close();
        assert_eq!(file.mode(), Mode::Closed);
        assert!(file.read_block(1).is_err());
    }
}
