use std::fs::File;
use std::io::{self, BufRead, BufReader, Read, Write};
use std::path::{Path, PathBuf};

use crate::error::{FixtureError, Result};

/// One step of a forward-only byte read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Next {
    Byte(u8),
    /// The final byte, delivered together with the end of input.
    Last(u8),
    End,
}

/// Minimal capability the comparator needs from a candidate.
pub trait ByteSource {
    fn next_byte(&mut self) -> io::Result<Next>;

    /// Moves every unconsumed byte into `sink` and returns how many there were.
    fn drain_into(&mut self, sink: &mut dyn Write) -> io::Result<u64>;

    /// Whether a divergence should leave the unconsumed bytes in a dump file.
    /// A file on disk is its own evidence.
    fn keeps_evidence(&self) -> bool {
        true
    }
}

/// Any `Read`, consumed one byte at a time through a buffer.
pub struct StreamSource<R> {
    reader: BufReader<R>,
}

impl<R: Read> StreamSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader: BufReader::new(reader),
        }
    }
}

impl<R: Read> ByteSource for StreamSource<R> {
    fn next_byte(&mut self) -> io::Result<Next> {
        let byte = loop {
            match self.reader.fill_buf() {
                Ok([]) => return Ok(Next::End),
                Ok(buf) => break buf[0],
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        };
        self.reader.consume(1);
        Ok(Next::Byte(byte))
    }

    fn drain_into(&mut self, sink: &mut dyn Write) -> io::Result<u64> {
        io::copy(&mut self.reader, sink)
    }
}

/// A file opened for reading, used both for references and file candidates.
pub struct FileSource {
    path: PathBuf,
    inner: StreamSource<File>,
}

impl FileSource {
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| FixtureError::io(path, e))?;
        Ok(Self {
            path: path.to_path_buf(),
            inner: StreamSource::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ByteSource for FileSource {
    fn next_byte(&mut self) -> io::Result<Next> {
        self.inner.next_byte()
    }

    fn drain_into(&mut self, sink: &mut dyn Write) -> io::Result<u64> {
        self.inner.drain_into(sink)
    }

    fn keeps_evidence(&self) -> bool {
        false
    }
}

/// An in-memory buffer that is consumed as it is read.
#[derive(Debug, Clone, Default)]
pub struct BufferSource {
    bytes: Vec<u8>,
    pos: usize,
}

impl BufferSource {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
            pos: 0,
        }
    }

    /// Bytes not read yet.
    pub fn remaining(&self) -> &[u8] {
        &self.bytes[self.pos..]
    }
}

impl From<Vec<u8>> for BufferSource {
    fn from(bytes: Vec<u8>) -> Self {
        Self::new(bytes)
    }
}

impl From<&[u8]> for BufferSource {
    fn from(bytes: &[u8]) -> Self {
        Self::new(bytes)
    }
}

impl From<String> for BufferSource {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

impl From<&str> for BufferSource {
    fn from(text: &str) -> Self {
        Self::new(text.as_bytes())
    }
}

impl ByteSource for BufferSource {
    fn next_byte(&mut self) -> io::Result<Next> {
        match self.bytes.get(self.pos) {
            Some(&byte) => {
                self.pos += 1;
                Ok(Next::Byte(byte))
            }
            None => Ok(Next::End),
        }
    }

    fn drain_into(&mut self, sink: &mut dyn Write) -> io::Result<u64> {
        let rest = self.remaining();
        sink.write_all(rest)?;
        let n = rest.len();
        self.pos += n;
        Ok(n as u64)
    }
}
