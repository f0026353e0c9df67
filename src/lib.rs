//! pipechat - filesystem-mediated group chat over named pipes.
//!
//! Participants join a named room backed by a shared directory and exchange
//! text lines through per-user FIFOs; the directory layout itself is the
//! wire protocol, with no broker process and no network. Companion
//! subcommands provide two small text-inspection utilities.

pub mod chat;
pub mod config;
pub mod cut;
pub mod error;
pub mod logging;
pub mod pstat;
pub mod room;

pub use chat::{broadcast, Message, Session, MAX_MESSAGE_LEN};
pub use config::Config;
pub use error::{PipechatError, Result};
