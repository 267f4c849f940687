use std::io::{ErrorKind, Read, Write};

use bytes::{BufMut, BytesMut};

use crate::error::{EmbedError, Result};

/// Fixed channel buffer size. One page amortizes the per-byte call overhead
/// of the transcode loop into one underlying I/O call per 4096 bytes.
pub const BUFFER_CAPACITY: usize = 4096;

/// Batches single-byte writes to any `Write` sink.
///
/// The buffer is flushed to the sink exactly when it reaches
/// [`BUFFER_CAPACITY`]; callers must invoke [`ByteWriter::flush`] before
/// discarding the writer or trailing bytes stay buffered.
pub struct ByteWriter<W> {
    inner: W,
    buf: BytesMut,
}

impl<W: Write> ByteWriter<W> {
    /// Create a buffered writer over a sink.
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            buf: BytesMut::with_capacity(BUFFER_CAPACITY),
        }
    }

    /// Append one byte, flushing the buffer when it fills.
    ///
    /// Bytes reach the sink in call order; none are dropped or reordered.
    pub fn write_byte(&mut self, byte: u8) -> Result<()> {
        self.buf.put_u8(byte);
        if self.buf.len() == BUFFER_CAPACITY {
            self.drain()?;
        }
        Ok(())
    }

    /// Write any buffered bytes to the sink and flush the sink itself.
    pub fn flush(&mut self) -> Result<()> {
        self.drain()?;
        loop {
            match self.inner.flush() {
                Ok(()) => return Ok(()),
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(EmbedError::Io(err)),
            }
        }
    }

    fn drain(&mut self) -> Result<()> {
        let mut offset = 0usize;
        while offset < self.buf.len() {
            match self.inner.write(&self.buf[offset..]) {
                Ok(0) => {
                    return Err(EmbedError::Io(std::io::Error::new(
                        ErrorKind::WriteZero,
                        "sink accepted no bytes",
                    )))
                }
                Ok(n) => offset += n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(EmbedError::Io(err)),
            }
        }
        self.buf.clear();
        Ok(())
    }

    /// Borrow the underlying sink.
    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    /// Mutably borrow the underlying sink.
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.inner
    }

    /// Consume the writer and return the inner sink.
    ///
    /// Buffered bytes are discarded; call [`ByteWriter::flush`] first.
    pub fn into_inner(self) -> W {
        self.inner
    }
}

/// Batches single-byte reads from any `Read` source.
///
/// Tracks how many bytes the last refill actually produced, so a partially
/// filled buffer is distinguished from an exhausted source.
pub struct ByteReader<R> {
    inner: R,
    buf: [u8; BUFFER_CAPACITY],
    pos: usize,
    filled: usize,
}

impl<R: Read> ByteReader<R> {
    /// Create a buffered reader over a source.
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            buf: [0u8; BUFFER_CAPACITY],
            pos: 0,
            filled: 0,
        }
    }

    /// Read the next byte, refilling the buffer when it is exhausted.
    ///
    /// Returns `Ok(None)` only at true end of source. A short refill is not
    /// end of data; only a zero-byte read terminates the stream.
    pub fn read_byte(&mut self) -> Result<Option<u8>> {
        if self.pos == self.filled {
            self.filled = loop {
                match self.inner.read(&mut self.buf) {
                    Ok(n) => break n,
                    Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                    Err(err) => return Err(EmbedError::Io(err)),
                }
            };
            self.pos = 0;
            if self.filled == 0 {
                return Ok(None);
            }
        }
        let byte = self.buf[self.pos];
        self.pos += 1;
        Ok(Some(byte))
    }

    /// Borrow the underlying source.
    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    /// Consume the reader and return the inner source.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    /// Yields one byte per `read` call, forcing short refills.
    struct TrickleReader {
        data: Vec<u8>,
        pos: usize,
    }

    impl Read for TrickleReader {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if self.pos == self.data.len() {
                return Ok(0);
            }
            buf[0] = self.data[self.pos];
            self.pos += 1;
            Ok(1)
        }
    }

    #[test]
    fn writer_preserves_order() {
        let mut writer = ByteWriter::new(Vec::new());
        for byte in 0u8..=255 {
            writer.write_byte(byte).unwrap();
        }
        writer.flush().unwrap();

        let sink = writer.into_inner();
        assert_eq!(sink, (0u8..=255).collect::<Vec<_>>());
    }

    #[test]
    fn writer_flushes_exactly_at_capacity() {
        let mut writer = ByteWriter::new(Vec::new());
        for _ in 0..BUFFER_CAPACITY {
            writer.write_byte(b'x').unwrap();
        }
        // Full buffer already drained without an explicit flush.
        assert_eq!(writer.get_ref().len(), BUFFER_CAPACITY);

        writer.write_byte(b'y').unwrap();
        assert_eq!(writer.get_ref().len(), BUFFER_CAPACITY);
        writer.flush().unwrap();
        assert_eq!(writer.get_ref().len(), BUFFER_CAPACITY + 1);
    }

    #[test]
    fn writer_flush_on_empty_buffer_is_noop() {
        let mut writer = ByteWriter::new(Vec::new());
        writer.flush().unwrap();
        assert!(writer.into_inner().is_empty());
    }

    #[test]
    fn reader_returns_bytes_in_source_order() {
        let data: Vec<u8> = (0..BUFFER_CAPACITY as u32 * 2 + 37)
            .map(|i| (i % 251) as u8)
            .collect();
        let mut reader = ByteReader::new(Cursor::new(data.clone()));

        let mut seen = Vec::new();
        while let Some(byte) = reader.read_byte().unwrap() {
            seen.push(byte);
        }
        assert_eq!(seen, data);
    }

    #[test]
    fn reader_eof_on_empty_source() {
        let mut reader = ByteReader::new(Cursor::new(Vec::<u8>::new()));
        assert_eq!(reader.read_byte().unwrap(), None);
        // EOF is sticky.
        assert_eq!(reader.read_byte().unwrap(), None);
    }

    #[test]
    fn reader_short_refill_is_not_eof() {
        let mut reader = ByteReader::new(TrickleReader {
            data: vec![7, 8, 9],
            pos: 0,
        });
        assert_eq!(reader.read_byte().unwrap(), Some(7));
        assert_eq!(reader.read_byte().unwrap(), Some(8));
        assert_eq!(reader.read_byte().unwrap(), Some(9));
        assert_eq!(reader.read_byte().unwrap(), None);
    }
}
