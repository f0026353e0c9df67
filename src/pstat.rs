//! Process status inspector: a fixed summary of `/proc/<pid>/stat` and
//! `/proc/<pid>/status`.
//!
//! An independent, synchronous leaf tool with no shared state.

use std::io::Write;
use std::path::Path;

use crate::{PipechatError, Result};

/// Keys extracted from `/proc/<pid>/status`, in output order.
const STATUS_KEYS: &[&str] = &[
    "Name:", "State:", "PPid:", "Threads:", "VmSize:", "VmRSS:", "RssAnon:", "RssFile:", "Uid:",
    "Gid:",
];

/// The fields parsed out of `/proc/<pid>/stat`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcStat {
    pub pid: i32,
    pub comm: String,
    pub state: char,
    pub ppid: i32,
}

/// Parse the first line of `/proc/<pid>/stat`.
///
/// The format is `pid (comm) state ppid ...` where comm may itself contain
/// spaces and parentheses, so it is delimited by the first `(` and the
/// *last* `)`.
pub fn parse_stat(line: &str) -> Result<ProcStat> {
    let invalid = || PipechatError::Validation(format!("malformed stat line: {line}"));

    let lparen = line.find('(').ok_or_else(invalid)?;
    let rparen = line.rfind(')').ok_or_else(invalid)?;
    if rparen < lparen {
        return Err(invalid());
    }

    let pid: i32 = line[..lparen].trim().parse().map_err(|_| invalid())?;
    if pid <= 0 {
        return Err(invalid());
    }
    let comm = line[lparen + 1..rparen].to_string();

    let mut rest = line[rparen + 1..].split_ascii_whitespace();
    let state = rest
        .next()
        .and_then(|s| s.chars().next())
        .ok_or_else(invalid)?;
    let ppid: i32 = rest.next().ok_or_else(invalid)?.parse().map_err(|_| invalid())?;

    Ok(ProcStat {
        pid,
        comm,
        state,
        ppid,
    })
}

/// Find the first line of a status text starting with `key`.
pub fn status_line<'a>(status: &'a str, key: &str) -> Option<&'a str> {
    status
        .lines()
        .find(|line| line.len() > key.len() && line.starts_with(key))
}

fn read_proc_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| PipechatError::ProcRead {
        path: path.display().to_string(),
        source: e,
    })
}

/// Print the status summary for `pid` to `out`.
pub fn run<W: Write>(pid: u32, out: &mut W) -> Result<()> {
    let stat_path = Path::new("/proc").join(pid.to_string()).join("stat");
    let status_path = Path::new("/proc").join(pid.to_string()).join("status");

    let stat_text = read_proc_file(&stat_path)?;
    let stat_line = stat_text.lines().next().unwrap_or_default();
    let stat = parse_stat(stat_line)?;

    let status = read_proc_file(&status_path)?;

    writeln!(out, "=== pstat for PID {} ===", stat.pid)?;
    writeln!(out, "Comm: {}", stat.comm)?;
    writeln!(out, "State: {}", stat.state)?;
    writeln!(out, "PPid: {}", stat.ppid)?;

    for key in STATUS_KEYS {
        if let Some(line) = status_line(&status, key) {
            writeln!(out, "{line}")?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_stat_basic() {
        let stat = parse_stat("1234 (bash) S 1000 1234 1234 0 -1").unwrap();
        assert_eq!(
            stat,
            ProcStat {
                pid: 1234,
                comm: "bash".to_string(),
                state: 'S',
                ppid: 1000,
            }
        );
    }

    #[test]
    fn test_parse_stat_comm_with_spaces_and_parens() {
        let stat = parse_stat("42 (my (weird) proc) R 7 42 42 0 -1").unwrap();
        assert_eq!(stat.pid, 42);
        assert_eq!(stat.comm, "my (weird) proc");
        assert_eq!(stat.state, 'R');
        assert_eq!(stat.ppid, 7);
    }

    #[test]
    fn test_parse_stat_missing_parens() {
        assert!(parse_stat("1234 bash S 1000").is_err());
    }

    #[test]
    fn test_parse_stat_missing_fields_after_comm() {
        assert!(parse_stat("1234 (bash)").is_err());
    }

    #[test]
    fn test_parse_stat_nonnumeric_pid() {
        assert!(parse_stat("abc (bash) S 1").is_err());
    }

    #[test]
    fn test_status_line_found() {
        let status = "Name:\tbash\nState:\tS (sleeping)\nPPid:\t1000\n";
        assert_eq!(status_line(status, "Name:"), Some("Name:\tbash"));
        assert_eq!(status_line(status, "PPid:"), Some("PPid:\t1000"));
    }

    #[test]
    fn test_status_line_absent() {
        let status = "Name:\tbash\n";
        assert_eq!(status_line(status, "VmRSS:"), None);
    }

    #[test]
    fn test_status_line_requires_prefix_match() {
        // "State:" must not match a line that merely contains it.
        let status = "ThreadState:\tX\nState:\tS\n";
        assert_eq!(status_line(status, "State:"), Some("State:\tS"));
    }

    #[test]
    fn test_run_on_own_process() {
        let mut out = Vec::new();
        run(std::process::id(), &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("=== pstat for PID "));
        assert!(text.contains("\nComm: "));
        assert!(text.contains("\nName:"));
        assert!(text.contains("\nThreads:"));
    }

    #[test]
    fn test_run_missing_process() {
        // PID 0 has no /proc entry.
        let mut out = Vec::new();
        let err = run(0, &mut out).unwrap_err();
        assert!(matches!(err, PipechatError::ProcRead { .. }));
    }
}
