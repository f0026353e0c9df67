//! The chat session: message formatting, broadcast fan-out, the receiver
//! and sender loops, and the coordinator that ties them together.

pub mod broadcast;
pub mod message;
pub mod receiver;
pub mod sender;
pub mod session;

pub use broadcast::broadcast;
pub use message::{Message, MAX_MESSAGE_LEN};
pub use receiver::receive_into;
pub use sender::send_loop;
pub use session::Session;
