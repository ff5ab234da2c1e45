//! # Actions
//!
//! Everything that can happen in promptline becomes an `Action`.
//! The user presses Enter? That's `Action::Submit(text)`.
//! The transcript write finishes? That's `Action::SubmissionRecorded(entry)`.
//!
//! `update()` applies an action to the state and returns an `Effect` telling
//! the adapter what I/O to start. No I/O happens here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use log::{debug, info, warn};

use crate::core::state::App;
use crate::core::transcript::Entry;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Clear the previous outcome before a new submission
    Reset,
    Submit(String),
    SubmissionRecorded(Entry),
    SubmissionFailed { entry: Entry, error: String },
    ToggleStop,
    NewResearch,
    Quit,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    /// Append the entry to the transcript, then report back
    Record(Entry),
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Reset => {
            debug!("Reset before submission");
            app.error = None;
            app.status_message.clear();
            Effect::None
        }
        Action::Submit(text) => submit(app, text),
        Action::SubmissionRecorded(entry) => {
            app.pending = false;
            push_entry(app, entry);
            app.status_message = format!("Recorded prompt #{}", app.entries.len());
            Effect::None
        }
        Action::SubmissionFailed { entry, error } => {
            warn!("Failed to record entry {}: {}", entry.id, error);
            app.pending = false;
            push_entry(app, entry);
            app.status_message = "Prompt kept in history only".to_string();
            app.error = Some(error);
            Effect::None
        }
        Action::ToggleStop => {
            app.stopped = !app.stopped;
            info!("Input {}", if app.stopped { "stopped" } else { "resumed" });
            app.status_message = if app.stopped {
                "Input stopped".to_string()
            } else {
                "Input resumed".to_string()
            };
            Effect::None
        }
        Action::NewResearch => {
            app.has_report = false;
            app.status_message = "Starting new research".to_string();
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

fn submit(app: &mut App, text: String) -> Effect {
    if app.stopped {
        return Effect::None;
    }
    if app.pending {
        app.status_message = "Still recording the previous prompt".to_string();
        return Effect::None;
    }

    let text = text.trim();
    if text.is_empty() {
        app.status_message = "Nothing to submit".to_string();
        return Effect::None;
    }

    let entry = Entry::new(app.next_kind(), text.to_string());
    info!("Submitted {:?} ({} bytes)", entry.kind, entry.text.len());

    if app.transcript_path.is_some() {
        app.pending = true;
        app.status_message = "Recording…".to_string();
        Effect::Record(entry)
    } else {
        push_entry(app, entry);
        app.status_message = format!("Submitted prompt #{}", app.entries.len());
        Effect::None
    }
}

fn push_entry(app: &mut App, entry: Entry) {
    app.entries.push(entry);
    app.has_report = true;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::transcript::EntryKind;
    use std::path::PathBuf;

    fn recording_app() -> App {
        App::new(Some(PathBuf::from("transcript.jsonl")))
    }

    #[test]
    fn submit_with_transcript_requests_record() {
        let mut app = recording_app();
        let effect = update(&mut app, Action::Submit("  fusion timelines \n".to_string()));

        match effect {
            Effect::Record(entry) => {
                assert_eq!(entry.text, "fusion timelines");
                assert_eq!(entry.kind, EntryKind::Query);
            }
            other => panic!("Expected Record, got {other:?}"),
        }
        assert!(app.pending);
        assert!(app.input_disabled());
        assert!(app.entries.is_empty());
    }

    #[test]
    fn recorded_entry_joins_history_and_enables_follow_ups() {
        let mut app = recording_app();
        let Effect::Record(entry) = update(&mut app, Action::Submit("q".to_string())) else {
            panic!("Expected Record");
        };

        update(&mut app, Action::SubmissionRecorded(entry));
        assert!(!app.pending);
        assert_eq!(app.entries.len(), 1);
        assert_eq!(app.next_kind(), EntryKind::FollowUp);
        assert_eq!(app.status_message, "Recorded prompt #1");
    }

    #[test]
    fn failure_keeps_entry_and_sets_error() {
        let mut app = recording_app();
        let entry = Entry::new(EntryKind::Query, "q".to_string());
        app.pending = true;

        update(
            &mut app,
            Action::SubmissionFailed {
                entry,
                error: "permission denied".to_string(),
            },
        );
        assert!(!app.pending);
        assert_eq!(app.entries.len(), 1);
        assert_eq!(app.error.as_deref(), Some("permission denied"));
    }

    #[test]
    fn submit_without_transcript_records_in_memory() {
        let mut app = App::new(None);
        assert_eq!(update(&mut app, Action::Submit("q".to_string())), Effect::None);
        assert_eq!(app.entries.len(), 1);
        assert!(app.has_report);
    }

    #[test]
    fn blank_submission_is_ignored() {
        let mut app = recording_app();
        assert_eq!(update(&mut app, Action::Submit(" \n ".to_string())), Effect::None);
        assert!(!app.pending);
        assert_eq!(app.status_message, "Nothing to submit");
    }

    #[test]
    fn submit_while_pending_is_ignored() {
        let mut app = recording_app();
        app.pending = true;
        assert_eq!(update(&mut app, Action::Submit("again".to_string())), Effect::None);
        assert!(app.entries.is_empty());
    }

    #[test]
    fn reset_clears_error_and_status() {
        let mut app = App::new(None);
        app.error = Some("old".to_string());
        app.status_message = "old status".to_string();
        update(&mut app, Action::Reset);
        assert!(app.error.is_none());
        assert!(app.status_message.is_empty());
    }

    #[test]
    fn toggle_stop_and_new_research() {
        let mut app = App::new(None);
        app.has_report = true;

        update(&mut app, Action::ToggleStop);
        assert!(app.stopped);
        assert_eq!(update(&mut app, Action::Submit("hidden".to_string())), Effect::None);
        assert!(app.entries.is_empty());
        update(&mut app, Action::ToggleStop);
        assert!(!app.stopped);

        update(&mut app, Action::NewResearch);
        assert_eq!(app.next_kind(), EntryKind::Query);
    }

    #[test]
    fn quit_returns_quit_effect() {
        let mut app = App::new(None);
        assert_eq!(update(&mut app, Action::Quit), Effect::Quit);
    }
}
