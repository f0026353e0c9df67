//! Room namespace: mapping room names to rendezvous directories.

use std::io;
use std::path::{Path, PathBuf};

use crate::config::ChatConfig;
use crate::{PipechatError, Result};

/// Check that a room or user name can serve as a single path component.
pub(crate) fn validate_name(kind: &str, name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(PipechatError::InvalidName(format!(
            "{kind} name must not be empty"
        )));
    }
    if name.contains('/') || name.contains('\0') {
        return Err(PipechatError::InvalidName(format!(
            "{kind} name must not contain '/' or NUL"
        )));
    }
    Ok(())
}

/// Resolve a room name to its directory location.
///
/// The mapping is deterministic within a host:
/// `<base_dir>/<room_prefix><room>`.
pub fn resolve(config: &ChatConfig, room: &str) -> Result<PathBuf> {
    validate_name("room", room)?;
    Ok(Path::new(&config.base_dir).join(format!("{}{}", config.room_prefix, room)))
}

/// Ensure the room directory exists.
///
/// Idempotent: an existing directory is accepted as-is. A pre-existing
/// non-directory object at the location is a collision, never silently
/// redirected.
pub fn ensure_room(dir: &Path) -> Result<()> {
    match std::fs::metadata(dir) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(PipechatError::NamespaceCollision(
            dir.display().to_string(),
        )),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            std::fs::create_dir_all(dir).map_err(|e| PipechatError::NamespaceCreateFailed {
                path: dir.display().to_string(),
                source: e,
            })
        }
        Err(e) => Err(PipechatError::NamespaceCreateFailed {
            path: dir.display().to_string(),
            source: e,
        }),
    }
}

/// Enumerate the members of a room.
///
/// This is a live snapshot of the room directory, re-evaluated on every
/// call, so joiners and manual cleanup are visible on the next broadcast
/// with no subscription mechanism. `.` and `..` never appear.
pub async fn list_members(dir: &Path) -> Result<tokio::fs::ReadDir> {
    Ok(tokio::fs::read_dir(dir).await?)
}
