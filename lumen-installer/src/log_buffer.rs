//! In-memory capture of the installer log.
//!
//! The formatted subscriber output is tee'd: every line goes to stdout and
//! into a shared buffer, so the full log can be written to a file when a
//! run fails.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;

/// Shared buffer collecting everything the subscriber writes.
#[derive(Clone, Default)]
pub struct LogBuffer {
    inner: Arc<Mutex<Vec<u8>>>,
}

impl LogBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// The captured log so far.
    pub fn contents(&self) -> String {
        self.inner
            .lock()
            .map(|buf| String::from_utf8_lossy(&buf).into_owned())
            .unwrap_or_default()
    }
}

/// Writer handed to the subscriber: stdout plus the shared buffer.
pub struct TeeWriter {
    buffer: Arc<Mutex<Vec<u8>>>,
    stdout: io::Stdout,
}

impl Write for TeeWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let written = self.stdout.write(buf)?;
        if let Ok(mut captured) = self.buffer.lock() {
            captured.extend_from_slice(&buf[..written]);
        }
        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.stdout.flush()
    }
}

impl<'a> MakeWriter<'a> for LogBuffer {
    type Writer = TeeWriter;

    fn make_writer(&'a self) -> Self::Writer {
        TeeWriter {
            buffer: Arc::clone(&self.inner),
            stdout: io::stdout(),
        }
    }
}
