//! Log file preparation and tail reading.
//!
//! Each managed service owns one log file. The file is truncated on every
//! start so a failed launch always shows the output of the current
//! attempt, and the last lines are read back for error reporting.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;

/// Number of lines reported when a startup failure is diagnosed.
pub const TAIL_LINES: usize = 50;

/// Create the parent directory and open the log file truncated for writing.
///
/// The returned handle is passed to the child process as stdout/stderr.
pub fn prepare_log(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)
}

/// Read the last `max_lines` non-empty-trimmed lines of a log file.
///
/// A missing file yields an empty vector; startup failures frequently
/// happen before the child writes anything.
pub fn tail(path: &Path, max_lines: usize) -> io::Result<Vec<String>> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e),
    };

    let lines: Vec<String> = content
        .trim_end()
        .lines()
        .map(|line| line.to_string())
        .collect();

    let skip = lines.len().saturating_sub(max_lines);
    Ok(lines.into_iter().skip(skip).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_prepare_log_creates_parent_and_truncates() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("logs/web.log");

        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "stale content from last run").unwrap();

        let mut file = prepare_log(&path).expect("Should prepare log");
        writeln!(file, "fresh").unwrap();
        drop(file);

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "fresh\n");
    }

    #[test]
    fn test_prepare_log_creates_missing_directory() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("logs/nested/app.log");

        prepare_log(&path).expect("Should create parent directories");
        assert!(path.exists());
    }

    #[test]
    fn test_tail_returns_last_lines() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("web.log");

        let content: String = (1..=80).map(|i| format!("line {}\n", i)).collect();
        std::fs::write(&path, content).unwrap();

        let lines = tail(&path, 50).expect("Should read tail");
        assert_eq!(lines.len(), 50);
        assert_eq!(lines[0], "line 31");
        assert_eq!(lines[49], "line 80");
    }

    #[test]
    fn test_tail_short_file() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("web.log");
        std::fs::write(&path, "only line\n").unwrap();

        let lines = tail(&path, 50).expect("Should read tail");
        assert_eq!(lines, vec!["only line"]);
    }

    #[test]
    fn test_tail_missing_file_is_empty() {
        let dir = tempdir().expect("Failed to create temp dir");
        let lines = tail(&dir.path().join("nope.log"), 50).expect("Missing file is not an error");
        assert!(lines.is_empty());
    }
}
