//! # Transcript
//!
//! Every submitted prompt is appended to a JSON Lines file, one object per line:
//!
//! ```text
//! {"id":"6f1c…","kind":"query","text":"…","submitted_at":"2026-10-18T09:12:44Z"}
//! ```
//!
//! Appends are async (run on the tokio runtime off the event loop). Loading is
//! synchronous and happens once at startup to fill the history pane; lines that
//! fail to parse are skipped.

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use chrono::{DateTime, Utc};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    /// Starts a new line of research
    Query,
    /// Asked about the current report
    FollowUp,
}

impl EntryKind {
    pub fn label(&self) -> &'static str {
        match self {
            EntryKind::Query => "Query",
            EntryKind::FollowUp => "Follow-up",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub id: Uuid,
    pub kind: EntryKind,
    pub text: String,
    pub submitted_at: DateTime<Utc>,
}

impl Entry {
    pub fn new(kind: EntryKind, text: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            text,
            submitted_at: Utc::now(),
        }
    }
}

#[derive(Debug)]
pub enum TranscriptError {
    Io(io::Error),
    Serialize(serde_json::Error),
}

impl fmt::Display for TranscriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TranscriptError::Io(e) => write!(f, "transcript I/O error: {e}"),
            TranscriptError::Serialize(e) => write!(f, "transcript encoding error: {e}"),
        }
    }
}

impl std::error::Error for TranscriptError {}

/// Append `entry` as one line, creating the file and its parent directory if needed.
pub async fn append(path: &Path, entry: &Entry) -> Result<(), TranscriptError> {
    let mut line = serde_json::to_string(entry).map_err(TranscriptError::Serialize)?;
    line.push('\n');

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(TranscriptError::Io)?;
    }

    let mut file = tokio::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .await
        .map_err(TranscriptError::Io)?;
    file.write_all(line.as_bytes())
        .await
        .map_err(TranscriptError::Io)?;
    file.flush().await.map_err(TranscriptError::Io)?;

    debug!("Appended entry {} to {}", entry.id, path.display());
    Ok(())
}

/// Read every entry from `path`. A missing file is an empty transcript.
pub fn load(path: &Path) -> Result<Vec<Entry>, TranscriptError> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(TranscriptError::Io(e)),
    };

    let entries: Vec<Entry> = contents
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .filter_map(|(n, line)| match serde_json::from_str(line) {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("Skipping transcript line {} in {}: {}", n + 1, path.display(), e);
                None
            }
        })
        .collect();

    debug!("Loaded {} entries from {}", entries.len(), path.display());
    Ok(entries)
}
