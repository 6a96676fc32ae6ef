use std::io::{ErrorKind, Read};

use super::load_error::{LoadError, Section};

/// Little-endian primitive reader that attributes truncation to the section
/// currently being decoded.
pub(super) struct ByteReader<R> {
    reader: R,
    section: Section,
}

impl<R: Read> ByteReader<R> {
    pub(super) fn new(reader: R) -> Self {
        Self {
            reader,
            section: Section::Header,
        }
    }

    pub(super) fn enter(&mut self, section: Section) {
        self.section = section;
    }

    pub(super) fn section(&self) -> Section {
        self.section
    }

    fn eof(&self) -> LoadError {
        LoadError::UnexpectedEof {
            section: self.section,
        }
    }

    fn fill(&mut self, buf: &mut [u8]) -> Result<(), LoadError> {
        self.reader.read_exact(buf).map_err(|err| {
            if err.kind() == ErrorKind::UnexpectedEof {
                self.eof()
            } else {
                LoadError::from(err)
            }
        })
    }

    /// Reads one byte, or `None` when the stream ends exactly here.
    pub(super) fn try_read_u8(&mut self) -> Result<Option<u8>, LoadError> {
        let mut buf = [0u8; 1];
        loop {
            match self.reader.read(&mut buf) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(buf[0])),
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(err.into()),
            }
        }
    }

    pub(super) fn read_u8(&mut self) -> Result<u8, LoadError> {
        let mut buf = [0u8; 1];
        self.fill(&mut buf)?;
        Ok(buf[0])
    }

    pub(super) fn read_u16(&mut self) -> Result<u16, LoadError> {
        let mut buf = [0u8; 2];
        self.fill(&mut buf)?;
        Ok(u16::from_le_bytes(buf))
    }

    pub(super) fn read_u32(&mut self) -> Result<u32, LoadError> {
        let mut buf = [0u8; 4];
        self.fill(&mut buf)?;
        Ok(u32::from_le_bytes(buf))
    }

    pub(super) fn read_f64(&mut self) -> Result<f64, LoadError> {
        let mut buf = [0u8; 8];
        self.fill(&mut buf)?;
        Ok(f64::from_le_bytes(buf))
    }

    /// Reads `len` bytes without trusting `len` for the allocation size.
    pub(super) fn read_bytes(&mut self, len: usize) -> Result<Vec<u8>, LoadError> {
        let mut buf = Vec::new();
        (&mut self.reader)
            .take(len as u64)
            .read_to_end(&mut buf)
            .map_err(LoadError::from)?;
        if buf.len() < len {
            return Err(self.eof());
        }
        Ok(buf)
    }

    pub(super) fn read_text(&mut self, len: usize) -> Result<String, LoadError> {
        let bytes = self.read_bytes(len)?;
        String::from_utf8(bytes).map_err(|_| LoadError::InvalidUtf8 {
            section: self.section,
        })
    }
}
