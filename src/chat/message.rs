//! Chat message formatting.

/// Maximum length in bytes of a rendered message line, including the
/// trailing newline.
///
/// A render that would exceed this is truncated by dropping whole trailing
/// characters of the formatted line until it fits; the newline is always
/// kept. Truncation is deterministic and never splits a UTF-8 sequence.
pub const MAX_MESSAGE_LEN: usize = 1400;

/// An immutable, fire-and-forget chat message.
///
/// Carries no sequence number, timestamp, or acknowledgment token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Room the message is addressed to.
    pub room: String,
    /// Sender's user name.
    pub sender: String,
    /// Message text, without its line terminator.
    pub payload: String,
}

impl Message {
    /// Create a new message.
    pub fn new(
        room: impl Into<String>,
        sender: impl Into<String>,
        payload: impl Into<String>,
    ) -> Self {
        Self {
            room: room.into(),
            sender: sender.into(),
            payload: payload.into(),
        }
    }

    /// Render the message to its single-line wire form:
    /// `"[{room}] {sender}: {payload}\n"`, capped at [`MAX_MESSAGE_LEN`].
    pub fn render(&self) -> String {
        let mut line = format!("[{}] {}: {}", self.room, self.sender, self.payload);
        if line.len() > MAX_MESSAGE_LEN - 1 {
            let mut cut = MAX_MESSAGE_LEN - 1;
            while !line.is_char_boundary(cut) {
                cut -= 1;
            }
            line.truncate(cut);
        }
        line.push('\n');
        line
    }
}
