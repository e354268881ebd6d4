//! Newline-delimited JSON over a byte stream.
//!
//! One message per line. Reader and writer are separate so the inbound
//! side can be driven from its own task.

use thiserror::Error;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::trace;

/// Errors from the line transport.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Reading the input stream failed.
    #[error("read error: {0}")]
    Read(#[source] std::io::Error),
    /// Writing the output stream failed.
    #[error("write error: {0}")]
    Write(#[source] std::io::Error),
    /// An inbound message could not be serialized.
    #[error("encode error: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Reads one trimmed line at a time.
pub struct LineReader<R> {
    reader: BufReader<R>,
}

impl<R: AsyncRead + Unpin> LineReader<R> {
    /// Wrap `reader` in a buffered line reader.
    pub fn new(reader: R) -> Self {
        Self {
            reader: BufReader::new(reader),
        }
    }

    /// Next line with surrounding whitespace removed.
    ///
    /// Returns `None` on EOF. Blank lines come back as empty strings.
    pub async fn read_line(&mut self) -> Result<Option<String>, TransportError> {
        let mut line = String::new();
        let bytes_read = self
            .reader
            .read_line(&mut line)
            .await
            .map_err(TransportError::Read)?;

        if bytes_read == 0 {
            return Ok(None);
        }

        let trimmed = line.trim();
        trace!(len = trimmed.len(), "read line");
        Ok(Some(trimmed.to_owned()))
    }
}

/// Writes one line per message and flushes after each.
pub struct LineWriter<W> {
    writer: W,
}

impl<W: AsyncWrite + Unpin> LineWriter<W> {
    /// Wrap `writer`.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Write `line` followed by `\n`.
    pub async fn write_line(&mut self, line: &str) -> Result<(), TransportError> {
        trace!(len = line.len(), "writing line");
        self.writer
            .write_all(line.as_bytes())
            .await
            .map_err(TransportError::Write)?;
        self.writer
            .write_all(b"\n")
            .await
            .map_err(TransportError::Write)?;
        self.writer.flush().await.map_err(TransportError::Write)
    }

    /// Give back the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}
