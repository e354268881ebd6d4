//! Pump lines between a byte stream and the bridge ports.

use liff_bridge::{AppEndpoint, Bridge, BridgeError};
use liff_core::OutboundMessage;
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::task::JoinError;
use tracing::{debug, info, warn};

use crate::stdio::{LineReader, LineWriter, TransportError};

/// Errors that end a relay session.
#[derive(Debug, Error)]
pub enum RelayError {
    /// The byte stream failed.
    #[error(transparent)]
    Transport(#[from] TransportError),
    /// The bridge detached or its subscription failed.
    #[error(transparent)]
    Bridge(#[from] BridgeError),
    /// The inbound forwarder panicked.
    #[error("inbound forwarder failed: {0}")]
    Forwarder(#[from] JoinError),
}

/// Counts for one relay session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RelaySummary {
    /// Lines decoded and sent outbound.
    pub forwarded: usize,
    /// Lines that did not decode.
    pub skipped: usize,
}

/// Relay `input` lines outbound and inbound results to `output` until EOF.
///
/// Blank lines are ignored and undecodable lines are logged and skipped.
/// At EOF the outbound port is closed, outstanding host calls settle, and
/// every remaining result is written before the writer is handed back.
pub async fn run<R, W>(
    bridge: Bridge,
    app: AppEndpoint,
    input: R,
    output: W,
) -> Result<(RelaySummary, W), RelayError>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin + Send + 'static,
{
    let (outbound, mut inbound) = app.split();

    let forwarder = tokio::spawn(async move {
        let mut writer = LineWriter::new(output);
        while let Some(message) = inbound.recv().await {
            let line = serde_json::to_string(&message)?;
            writer.write_line(&line).await?;
        }
        Ok::<_, TransportError>(writer.into_inner())
    });

    let mut reader = LineReader::new(input);
    let mut summary = RelaySummary::default();
    while let Some(line) = reader.read_line().await? {
        if line.is_empty() {
            continue;
        }
        match OutboundMessage::from_json(&line) {
            Ok(message) => {
                outbound.send(message)?;
                summary.forwarded += 1;
            }
            Err(err) => {
                summary.skipped += 1;
                warn!(error = %err, "skipping undecodable line");
            }
        }
    }

    debug!("input closed, waiting for outstanding host calls");
    drop(outbound);
    bridge.closed().await?;
    let writer = forwarder.await??;

    info!(
        forwarded = summary.forwarded,
        skipped = summary.skipped,
        "relay finished"
    );
    Ok((summary, writer))
}
