//! [`SerialLink`]: the [`Link`] port over a byte stream.
//!
//! The stream sits behind a tokio [`Mutex`] whose guard is held for the whole
//! transaction: discard of stale input, command write, settle delay and
//! response drain. A second caller waits for the guard and can never see the
//! tail of someone else's response.

use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::Mutex;
use tokio::time::Instant;

use growlink_app::Liveness;
use growlink_app::ports::Link;
use growlink_domain::error::GrowlinkError;

use crate::config::LinkTiming;
use crate::error::SerialError;

/// Line terminator appended to every command.
const LINE_END: &[u8] = b"\n";

/// Upper bound on unsolicited input dropped before a single command.
const MAX_STALE_BYTES: usize = 4096;

struct Channel<S> {
    stream: BufReader<S>,
    /// Bytes of a line whose terminator has not arrived yet.
    pending: Vec<u8>,
}

impl<S> Channel<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// Drop whatever the board sent outside of a transaction.
    ///
    /// Stops after [`MAX_STALE_BYTES`] or once `limit` has passed, even if the
    /// board is still talking.
    async fn discard_stale(&mut self, limit: Duration) -> Result<(), SerialError> {
        let deadline = Instant::now() + limit;
        let mut stale = std::mem::take(&mut self.pending).len();
        let mut quiet = false;
        while stale < MAX_STALE_BYTES && Instant::now() < deadline {
            // `timeout` polls the read once before looking at the deadline,
            // so a zero duration only consumes bytes that are already there.
            match tokio::time::timeout(Duration::ZERO, self.stream.fill_buf()).await {
                Ok(Ok([])) => return Err(SerialError::Closed),
                Ok(Ok(buf)) => {
                    let len = buf.len();
                    stale += len;
                    self.stream.consume(len);
                }
                Ok(Err(err)) => return Err(err.into()),
                Err(_) => {
                    quiet = true;
                    break;
                }
            }
        }
        if !quiet {
            tracing::warn!(bytes = stale, "board still sending, writing command anyway");
        } else if stale > 0 {
            tracing::debug!(bytes = stale, "discarded unsolicited serial input");
        }
        Ok(())
    }

    async fn write_command(&mut self, command: &str, limit: Duration) -> Result<(), SerialError> {
        let write = async {
            let inner = self.stream.get_mut();
            inner.write_all(command.as_bytes()).await?;
            inner.write_all(LINE_END).await?;
            inner.flush().await
        };
        tokio::time::timeout(limit, write)
            .await
            .map_err(|_| SerialError::WriteTimeout)?
            .map_err(SerialError::from)
    }

    /// Read up to the next `\n`. `None` means end of stream.
    ///
    /// Safe to cancel: bytes read so far stay in `pending` instead of being
    /// lost inside the reader. A line cut short by a timed-out read is dropped
    /// along with other stale input when the next transaction starts.
    async fn read_line(&mut self) -> Result<Option<String>, SerialError> {
        let read = self.stream.read_until(b'\n', &mut self.pending).await?;
        if read == 0 {
            return Ok(None);
        }
        let bytes = std::mem::take(&mut self.pending);
        Ok(Some(String::from_utf8_lossy(&bytes).into_owned()))
    }
}

/// Exclusive, line-oriented request/response access to the board.
pub struct SerialLink<S> {
    channel: Mutex<Channel<S>>,
    timing: LinkTiming,
    liveness: Liveness,
}

impl<S> SerialLink<S>
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
{
    /// Wrap an open stream. `liveness` is marked down on the first failure.
    pub fn new(stream: S, timing: LinkTiming, liveness: Liveness) -> Self {
        Self {
            channel: Mutex::new(Channel {
                stream: BufReader::new(stream),
                pending: Vec::new(),
            }),
            timing,
            liveness,
        }
    }

    async fn exchange(&self, command: &str) -> Result<Vec<String>, SerialError> {
        if !self.liveness.is_alive() {
            return Err(SerialError::Closed);
        }

        let mut channel = self.channel.lock().await;

        channel.discard_stale(self.timing.read_timeout).await?;
        tracing::debug!(%command, "serial write");
        channel
            .write_command(command, self.timing.batch_timeout)
            .await?;

        tokio::time::sleep(self.timing.settle).await;

        let deadline = Instant::now() + self.timing.batch_timeout;
        let mut lines = Vec::new();
        loop {
            tokio::time::sleep(self.timing.read_poll).await;

            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                tracing::debug!(%command, count = lines.len(), "response drain hit batch timeout");
                break;
            }

            match tokio::time::timeout(self.timing.read_timeout.min(remaining), channel.read_line())
                .await
            {
                // No further data: end of batch.
                Err(_) => break,
                Ok(Ok(None)) => return Err(SerialError::Closed),
                Ok(Ok(Some(line))) => {
                    let line = line.trim();
                    if line.is_empty() {
                        break;
                    }
                    tracing::trace!(%line, "serial read");
                    lines.push(line.to_string());
                }
                Ok(Err(err)) => return Err(err),
            }
        }

        Ok(lines)
    }
}

impl<S> Link for SerialLink<S>
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
{
    async fn transact(&self, command: &str) -> Result<Vec<String>, GrowlinkError> {
        match self.exchange(command).await {
            Ok(lines) => Ok(lines),
            Err(err) => {
                if self.liveness.mark_down() {
                    tracing::error!(%err, "serial link lost");
                }
                Err(err.into())
            }
        }
    }
}
