//! # Application State
//!
//! Everything the host application knows, with no TUI types in it. The input
//! widget's own state (buffer, cursor, height) lives in the `tui` module.
//!
//! ```text
//! App
//! ├── entries: Vec<Entry>           // submitted prompts, oldest first
//! ├── transcript_path: Option<Path> // where submissions are appended
//! ├── has_report: bool              // a query was recorded; prompts are follow-ups
//! ├── stopped: bool                 // input hidden (Ctrl+X)
//! ├── pending: bool                 // a transcript append is in flight
//! ├── status_message: String        // status bar text
//! └── error: Option<String>         // last recording failure
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::path::PathBuf;

use crate::core::config::ResolvedConfig;
use crate::core::transcript::{Entry, EntryKind};

pub struct App {
    pub entries: Vec<Entry>,
    pub transcript_path: Option<PathBuf>,
    pub has_report: bool,
    pub stopped: bool,
    pub pending: bool,
    pub status_message: String,
    pub error: Option<String>,
}

impl App {
    pub fn new(transcript_path: Option<PathBuf>) -> Self {
        Self {
            entries: Vec::new(),
            transcript_path,
            has_report: false,
            stopped: false,
            pending: false,
            status_message: String::new(),
            error: None,
        }
    }

    /// Build from resolved config, seeding history with previously recorded entries.
    pub fn from_config(config: &ResolvedConfig, history: Vec<Entry>) -> Self {
        let mut app = Self::new(config.transcript_path.clone());
        app.has_report = config.start_in_follow_up;
        if !history.is_empty() {
            app.status_message = format!("Loaded {} previous prompts", history.len());
        }
        app.entries = history;
        app
    }

    /// Kind the next submission will be recorded as.
    pub fn next_kind(&self) -> EntryKind {
        if self.has_report {
            EntryKind::FollowUp
        } else {
            EntryKind::Query
        }
    }

    /// The input accepts nothing while an append is in flight.
    pub fn input_disabled(&self) -> bool {
        self.pending
    }
}
