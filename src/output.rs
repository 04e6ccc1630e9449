//! Buffered output of window counts.
//!
//! Uses itoa for integer formatting to avoid allocation per line.

use std::io::{BufWriter, Write};

use crate::error::Result;
use crate::interval::Window;

/// Buffer size for WindowWriter (256KB default).
const DEFAULT_BUFFER_SIZE: usize = 256 * 1024;

/// Count of matching records in one window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowResult {
    pub window: Window,
    pub count: u64,
}

impl WindowResult {
    pub fn new(window: Window, count: u64) -> Self {
        Self { window, count }
    }

    /// True when no record matched the window.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Writes `target\tstart\tend\tcount` lines with 1-based inclusive coordinates.
pub struct WindowWriter<W: Write> {
    writer: BufWriter<W>,
    itoa_buf: itoa::Buffer,
}

impl<W: Write> WindowWriter<W> {
    /// Create a new WindowWriter with the default buffer.
    pub fn new(output: W) -> Self {
        Self::with_capacity(DEFAULT_BUFFER_SIZE, output)
    }

    /// Create a new WindowWriter with specified buffer size.
    pub fn with_capacity(capacity: usize, output: W) -> Self {
        Self {
            writer: BufWriter::with_capacity(capacity, output),
            itoa_buf: itoa::Buffer::new(),
        }
    }

    /// Write one window result followed by newline.
    #[inline]
    pub fn write_result(&mut self, result: &WindowResult) -> Result<()> {
        let window = &result.window;
        self.writer.write_all(window.target.as_bytes())?;
        self.writer.write_all(b"\t")?;
        self.write_int(window.one_based_start())?;
        self.writer.write_all(b"\t")?;
        self.write_int(window.end)?;
        self.writer.write_all(b"\t")?;
        self.write_int(result.count)?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    #[inline]
    fn write_int(&mut self, n: u64) -> Result<()> {
        self.writer.write_all(self.itoa_buf.format(n).as_bytes())?;
        Ok(())
    }

    /// Flush the output buffer.
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    /// Drop buffered lines without writing them.
    pub fn discard(self) {
        let (_output, buffered) = self.writer.into_parts();
        if let Ok(bytes) = buffered {
            log::debug!("Discarded {} bytes of buffered output", bytes.len());
        }
    }
}
