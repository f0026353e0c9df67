//! Per-user mailboxes: named FIFOs inside a room directory.

use std::ffi::CString;
use std::io;
use std::os::unix::ffi::OsStrExt;
use std::os::unix::fs::FileTypeExt;
use std::path::{Path, PathBuf};

use crate::room::namespace::validate_name;
use crate::{PipechatError, Result};

/// Permission bits for freshly created mailboxes: any local user may read
/// and write (subject to umask).
const MAILBOX_MODE: libc::mode_t = 0o666;

/// Ensure the user's mailbox FIFO exists inside the room directory.
///
/// Reuse-if-FIFO semantics: a pre-existing FIFO at the path is reused, which
/// lets a user leave and rejoin under the same identity without a presence
/// protocol. Any other object type at the path is a configuration error for
/// that user, so unrelated files are never treated as mailboxes.
///
/// Concurrent creation by two sessions for the same user races benignly:
/// losing the `mkfifo` race to another process that created a FIFO is
/// success.
pub fn ensure_mailbox(room_dir: &Path, user: &str) -> Result<PathBuf> {
    validate_name("user", user)?;
    let path = room_dir.join(user);

    match std::fs::symlink_metadata(&path) {
        Ok(meta) if meta.file_type().is_fifo() => return Ok(path),
        Ok(_) => {
            return Err(PipechatError::MailboxTypeConflict(
                path.display().to_string(),
            ))
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => {
            return Err(PipechatError::MailboxCreateFailed {
                path: path.display().to_string(),
                source: e,
            })
        }
    }

    match mkfifo(&path, MAILBOX_MODE) {
        Ok(()) => Ok(path),
        Err(e) if e.raw_os_error() == Some(libc::EEXIST) => {
            // Lost a creation race; accept the other session's FIFO.
            let meta = std::fs::symlink_metadata(&path).map_err(|e| {
                PipechatError::MailboxCreateFailed {
                    path: path.display().to_string(),
                    source: e,
                }
            })?;
            if meta.file_type().is_fifo() {
                Ok(path)
            } else {
                Err(PipechatError::MailboxTypeConflict(
                    path.display().to_string(),
                ))
            }
        }
        Err(e) => Err(PipechatError::MailboxCreateFailed {
            path: path.display().to_string(),
            source: e,
        }),
    }
}

/// Create a FIFO at `path` with the given mode.
fn mkfifo(path: &Path, mode: libc::mode_t) -> io::Result<()> {
    let path = CString::new(path.as_os_str().as_bytes())
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "path contains a NUL byte"))?;
    // SAFETY: `path` is a valid NUL-terminated string for the duration of
    // the call and mkfifo does not retain it.
    let rc = unsafe { libc::mkfifo(path.as_ptr(), mode) };
    if rc == 0 {
        Ok(())
    } else {
        Err(io::Error::last_os_error())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_mailbox_creates_fifo() {
        let room = tempfile::tempdir().unwrap();
        let path = ensure_mailbox(room.path(), "alice").unwrap();

        assert_eq!(path, room.path().join("alice"));
        let meta = std::fs::symlink_metadata(&path).unwrap();
        assert!(meta.file_type().is_fifo());
    }

    #[test]
    fn test_ensure_mailbox_reuse_idempotent() {
        let room = tempfile::tempdir().unwrap();
        let first = ensure_mailbox(room.path(), "alice").unwrap();
        let second = ensure_mailbox(room.path(), "alice").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_ensure_mailbox_type_conflict() {
        let room = tempfile::tempdir().unwrap();
        std::fs::write(room.path().join("alice"), b"a regular file").unwrap();

        let err = ensure_mailbox(room.path(), "alice").unwrap_err();
        assert!(matches!(err, PipechatError::MailboxTypeConflict(_)));
    }

    #[test]
    fn test_ensure_mailbox_empty_user() {
        let room = tempfile::tempdir().unwrap();
        let err = ensure_mailbox(room.path(), "").unwrap_err();
        assert!(matches!(err, PipechatError::InvalidName(_)));
    }

    #[test]
    fn test_ensure_mailbox_rejects_path_separator() {
        let room = tempfile::tempdir().unwrap();
        let err = ensure_mailbox(room.path(), "../../alice").unwrap_err();
        assert!(matches!(err, PipechatError::InvalidName(_)));
    }

    #[test]
    fn test_mkfifo_eexist_maps_to_reuse() {
        let room = tempfile::tempdir().unwrap();
        ensure_mailbox(room.path(), "alice").unwrap();

        // Direct mkfifo on the existing path fails with EEXIST...
        let err = mkfifo(&room.path().join("alice"), MAILBOX_MODE).unwrap_err();
        assert_eq!(err.raw_os_error(), Some(libc::EEXIST));
        // ...but ensure_mailbox treats the existing FIFO as success.
        ensure_mailbox(room.path(), "alice").unwrap();
    }
}
