//! The sender loop: read local input lines, broadcast them to the room.

use std::path::Path;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, warn};

use crate::chat::broadcast::broadcast;
use crate::chat::message::Message;
use crate::Result;

/// Write the input prompt to `out`.
async fn prompt<W>(out: &mut W, room: &str, user: &str) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    out.write_all(format!("[{room}] {user} > ").as_bytes())
        .await?;
    out.flush().await
}

/// Run the sender loop until input ends.
///
/// Each non-empty input line is formatted as a [`Message`] and broadcast to
/// every other mailbox in the room; the prompt is re-displayed after every
/// line regardless of how many recipients actually received it. A line that
/// is only a terminator re-displays the prompt without sending. End of
/// input terminates the loop normally.
pub async fn send_loop<R, W>(
    room_dir: &Path,
    room: &str,
    user: &str,
    input: &mut R,
    out: &mut W,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    prompt(out, room, user).await?;

    let mut line = String::new();
    loop {
        line.clear();
        let n = input.read_line(&mut line).await?;
        if n == 0 {
            // End of input is orderly termination, not an error.
            return Ok(());
        }

        if line == "\n" {
            prompt(out, room, user).await?;
            continue;
        }

        let message = Message::new(room, user, line.trim_end_matches('\n'));
        match broadcast(room_dir, user, message.render().as_bytes()).await {
            Ok(delivered) => debug!(room, delivered, "broadcast complete"),
            // Partial or zero delivery is already handled inside broadcast;
            // this only fires when the room directory itself could not be
            // enumerated. Keep the session alive regardless.
            Err(e) => warn!(room, error = %e, "broadcast failed"),
        }

        prompt(out, room, user).await?;
    }
}
