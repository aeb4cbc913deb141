use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;

/// Timestamp layout of every audit line
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Append-only run log, one `<timestamp> - <message>` entry per call.
///
/// The file is opened in append mode and closed again for every entry, so
/// no handle outlives a write.
#[derive(Debug, Clone)]
pub struct AuditLog {
    path: PathBuf,
}

impl AuditLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one entry stamped with the local time
    pub async fn record(&self, message: &str) -> std::io::Result<()> {
        let line = format_entry(Local::now(), message);

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(line.as_bytes()).await?;
        file.flush().await
    }
}

/// Render one entry, newline included
pub fn format_entry(timestamp: DateTime<Local>, message: &str) -> String {
    format!("{} - {}\n", timestamp.format(TIMESTAMP_FORMAT), message)
}
