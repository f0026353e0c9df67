//! The receiver loop: a long-lived reader bound to the session's own
//! mailbox.

use std::io;
use std::path::Path;

use tokio::io::{AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::unix::pipe;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use crate::Result;

/// Read buffer size for mailbox chunks.
const READ_BUF_LEN: usize = 1024;

/// Forward every byte chunk arriving on `mailbox` to `out` until cancelled.
///
/// Chunks are forwarded raw, with no line buffering: if several senders
/// write concurrently their bytes may appear interleaved.
///
/// The loop holds its own write end of the mailbox open for its lifetime.
/// A FIFO read returns 0 whenever no writer is attached, even under
/// non-blocking IO, so without a resident writer the loop would spin
/// through reopen cycles while the room is quiet; the held write end keeps
/// the read side parked until real data arrives. If end-of-transmission is
/// still observed, the mailbox is reopened rather than treated as closed.
///
/// Cancellation is checked at every suspension point; the read is raced
/// against the token, so the loop can never be left blocked with no way to
/// observe a shutdown request.
pub async fn receive_into<W>(
    mailbox: &Path,
    cancel: &CancellationToken,
    out: &mut W,
) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    let mut buf = [0u8; READ_BUF_LEN];

    'reopen: loop {
        if cancel.is_cancelled() {
            return Ok(());
        }

        let mut rx = pipe::OpenOptions::new().open_receiver(mailbox)?;
        // Hold our own write end so the read side never sees EOF merely
        // because the last remote sender closed. Opening the write end
        // cannot fail with ENXIO here: the read end is already open.
        let _write_guard = pipe::OpenOptions::new().open_sender(mailbox)?;

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    debug!(mailbox = %mailbox.display(), "receiver cancelled");
                    return Ok(());
                }
                res = rx.read(&mut buf) => match res {
                    Ok(0) => {
                        trace!(mailbox = %mailbox.display(), "mailbox EOF, reopening");
                        continue 'reopen;
                    }
                    Ok(n) => {
                        out.write_all(&buf[..n]).await?;
                        out.flush().await?;
                    }
                    Err(ref e) if e.kind() == io::ErrorKind::Interrupted => continue,
                    Err(e) => return Err(e.into()),
                }
            }
        }
    }
}
