//! Static log corpora and on-disk fixture helpers used across harnesses.

use std::path::{Path, PathBuf};

/// One line per level, plus one with no level keyword.
pub const CORPUS_LEVELS: &[&str] = &[
    "[2024-01-01] ERROR: Error message",
    "[2024-01-01] WARNING: Warning message",
    "[2024-01-01] INFO: Info message",
    "[2024-01-01] DEBUG: Debug message",
    "[2024-01-01] Something else",
];

/// One line per category, plus one that falls back to `general`.
pub const CORPUS_CATEGORIES: &[&str] = &[
    "[2024-01-01] ERROR: Database connection failed",
    "[2024-01-01] INFO: Payment transaction completed",
    "[2024-01-01] WARN: Authentication failed for user",
    "[2024-01-01] ERROR: API request timeout",
    "[2024-01-01] INFO: Security breach detected",
    "[2024-01-01] DEBUG: General debug message",
];

/// Two probe lines and two lines real traffic would produce.
pub const CORPUS_WITH_PROBES: &[&str] = &[
    "[2024-01-01] INFO: GET /health 200 (1ms)",
    "[2024-01-01] INFO: GET /api/v1/users 200 (12ms)",
    "[2024-01-01] INFO: GET /metrics 200 (2ms)",
    "[2024-01-01] ERROR: POST /api/v1/payments 502 (3012ms)",
];

/// `n` numbered INFO lines.
pub fn numbered_lines(n: usize) -> Vec<String> {
    (1..=n)
        .map(|i| format!("[2024-01-01] INFO: Log entry {i}"))
        .collect()
}

// ---------------------------------------------------------------------------
// LogDir
// ---------------------------------------------------------------------------

/// A temp directory of log files, removed on drop.
pub struct LogDir {
    dir: tempfile::TempDir,
}

impl LogDir {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp log dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write `lines` (newline-terminated) to `name`, creating parent
    /// directories as needed.
    pub fn write<S: AsRef<str>>(&self, name: &str, lines: &[S]) -> PathBuf {
        let content: String = lines
            .iter()
            .map(|l| format!("{}\n", l.as_ref()))
            .collect();
        self.write_raw(name, content.as_bytes())
    }

    pub fn write_raw(&self, name: &str, content: &[u8]) -> PathBuf {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create fixture dir");
        }
        std::fs::write(&path, content).expect("write fixture");
        path
    }
}

/// Remove all permissions from `path`. Returns `false` when the file is still
/// readable afterwards (e.g. when tests run as root), in which case callers
/// should skip their assertions.
#[cfg(unix)]
pub fn make_unreadable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o000)).expect("chmod 000");
    std::fs::File::open(path).is_err()
}

#[cfg(not(unix))]
pub fn make_unreadable(_path: &Path) -> bool {
    false
}
