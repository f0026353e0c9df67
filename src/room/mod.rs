//! Room namespace and mailbox management.
//!
//! A room is a shared directory; every participant owns one FIFO inside it,
//! named after the user. The directory layout is the wire protocol: any
//! process that creates a FIFO of the same name in the same room directory
//! is a full participant.

pub mod mailbox;
pub mod namespace;

pub use mailbox::ensure_mailbox;
pub use namespace::{ensure_room, list_members, resolve};
