//! Byte stream collaborators for export and import.
//!
//! The pipeline only needs to write one finished document or read one
//! whole document, so these traits are narrower than `Write` and `Read`.
//! Every `Write` is a [`ByteSink`] and every `Read` is a [`ByteSource`].

use std::io::{Read, Write};

/// Destination of an exported document.
pub trait ByteSink {
    /// Writes the whole document and flushes.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error.
    fn write_document(&mut self, bytes: &[u8]) -> std::io::Result<()>;
}

/// Origin of a document to import.
pub trait ByteSource {
    /// Reads until end of stream.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error.
    fn read_document(&mut self) -> std::io::Result<Vec<u8>>;
}

impl<W: Write + ?Sized> ByteSink for W {
    fn write_document(&mut self, bytes: &[u8]) -> std::io::Result<()> {
        self.write_all(bytes)?;
        self.flush()
    }
}

impl<R: Read + ?Sized> ByteSource for R {
    fn read_document(&mut self) -> std::io::Result<Vec<u8>> {
        let mut bytes = Vec::new();
        self.read_to_end(&mut bytes)?;
        Ok(bytes)
    }
}
