//! Best-effort broadcast of a message to every other mailbox in a room.

use std::os::unix::fs::FileTypeExt;
use std::path::Path;

use tokio::net::unix::pipe;
use tracing::debug;

use crate::room::namespace;
use crate::Result;

/// Write `message` to every mailbox in `room_dir` except `self_user`'s.
///
/// Delivery is at-most-once and best-effort: every writer open is
/// non-blocking, so a mailbox with no attached reader fails immediately
/// (`ENXIO`) and is skipped without surfacing anything to the sender. Any
/// other per-recipient open or write failure is likewise skipped; partial
/// delivery is an accepted outcome, not an error. Entries that are not
/// FIFOs at send time are skipped silently, including ones that changed
/// type after enumeration.
///
/// Returns the number of recipients actually written to. The only error is
/// a failure to enumerate the room directory itself.
pub async fn broadcast(room_dir: &Path, self_user: &str, message: &[u8]) -> Result<usize> {
    let mut members = namespace::list_members(room_dir).await?;
    let mut delivered = 0;

    while let Some(entry) = members.next_entry().await? {
        let name = entry.file_name();
        if name == self_user {
            continue; // never deliver to the sender's own mailbox
        }

        // Re-check the type at send time; entries may have been replaced
        // since enumeration.
        match entry.file_type().await {
            Ok(file_type) if file_type.is_fifo() => {}
            _ => {
                debug!(member = ?name, "skipping non-FIFO room entry");
                continue;
            }
        }

        let path = entry.path();
        let sender = match pipe::OpenOptions::new().open_sender(&path) {
            Ok(sender) => sender,
            Err(e) => {
                // ENXIO means no reader is attached, the expected condition
                // for an offline member.
                debug!(member = ?name, error = %e, "skipping mailbox with no reader");
                continue;
            }
        };

        // Rendered messages are bounded well under PIPE_BUF, so a pipe
        // write transfers the whole line or fails with WouldBlock.
        match sender.try_write(message) {
            Ok(n) if n == message.len() => delivered += 1,
            Ok(n) => {
                debug!(member = ?name, written = n, "short write to mailbox");
                delivered += 1;
            }
            Err(e) => {
                debug!(member = ?name, error = %e, "dropping message for member");
            }
        }
    }

    Ok(delivered)
}
