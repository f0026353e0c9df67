//! Session coordinator: owns the receiver task and the sender loop, and the
//! cancellation that ties their shutdown together.

use std::path::PathBuf;

use tokio::io::BufReader;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::chat::receiver::receive_into;
use crate::chat::sender::send_loop;
use crate::config::ChatConfig;
use crate::room::{ensure_mailbox, ensure_room, namespace};
use crate::Result;

/// One participant's membership in one room.
///
/// Construction validates and materializes the shared filesystem state;
/// [`Session::run`] drives the two long-lived loops.
#[derive(Debug)]
pub struct Session {
    room: String,
    user: String,
    room_dir: PathBuf,
    mailbox: PathBuf,
    cancel: CancellationToken,
}

impl Session {
    /// Join a room: resolve and ensure the room directory, then ensure this
    /// user's mailbox inside it.
    ///
    /// Any failure here aborts before any concurrent context is started.
    pub fn join(config: &ChatConfig, room: &str, user: &str) -> Result<Self> {
        let room_dir = namespace::resolve(config, room)?;
        ensure_room(&room_dir)?;
        let mailbox = ensure_mailbox(&room_dir, user)?;

        info!(room, user, room_dir = %room_dir.display(), "joined room");
        Ok(Self {
            room: room.to_string(),
            user: user.to_string(),
            room_dir,
            mailbox,
            cancel: CancellationToken::new(),
        })
    }

    /// The room directory this session rendezvouses in.
    pub fn room_dir(&self) -> &std::path::Path {
        &self.room_dir
    }

    /// This session's own mailbox path.
    pub fn mailbox(&self) -> &std::path::Path {
        &self.mailbox
    }

    /// Cancellation token shared by both loops. Set exactly once.
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Run the session on stdin/stdout until input ends or an interrupt
    /// arrives.
    ///
    /// The receiver loop runs as an independent task bound to this user's
    /// mailbox; the sender loop runs in the current task. On interrupt or
    /// end of input the cancellation token is set and the receiver task is
    /// awaited before returning, so the process never exits with the
    /// receiver still running.
    pub async fn run(self) -> Result<()> {
        let cancel = self.cancel.clone();
        let mailbox = self.mailbox.clone();
        let receiver = tokio::spawn(async move {
            let mut out = tokio::io::stdout();
            receive_into(&mailbox, &cancel, &mut out).await
        });

        let mut stdout = tokio::io::stdout();
        {
            use tokio::io::AsyncWriteExt;
            stdout
                .write_all(format!("Welcome to {}!\n", self.room).as_bytes())
                .await?;
        }

        let mut stdin = BufReader::new(tokio::io::stdin());
        let result = tokio::select! {
            res = send_loop(&self.room_dir, &self.room, &self.user, &mut stdin, &mut stdout) => res,
            _ = tokio::signal::ctrl_c() => {
                info!(room = self.room, user = self.user, "interrupt received");
                Ok(())
            }
        };

        self.cancel.cancel();
        match receiver.await {
            Ok(Ok(())) => {}
            // A failed receiver is loop-fatal, not process-fatal; by this
            // point the session is ending anyway, so just record it.
            Ok(Err(e)) => warn!(error = %e, "receiver loop terminated with error"),
            Err(e) => warn!(error = %e, "receiver task aborted"),
        }

        info!(room = self.room, user = self.user, "session ended");
        result
    }
}
