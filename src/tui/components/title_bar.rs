//! # TitleBar Component
//!
//! One-line status bar at the top of the screen. Stateless: every field is a
//! prop taken from the core `App` each frame.
//!
//! Text layout, most important first so narrow terminals keep it:
//!
//! 1. `promptline | <mode>`
//! 2. `| <status>` when a status message is set
//! 3. `| error: <msg>` in red when the last submission failed

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

/// What the prompt is currently for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    NewResearch,
    FollowUp,
    Recording,
    Stopped,
}

impl Mode {
    pub fn label(&self) -> &'static str {
        match self {
            Mode::NewResearch => "New research",
            Mode::FollowUp => "Follow-up",
            Mode::Recording => "Recording…",
            Mode::Stopped => "Stopped (Ctrl+X to resume)",
        }
    }
}

pub struct TitleBar<'a> {
    pub mode: Mode,
    pub status_message: &'a str,
    pub error: Option<&'a str>,
}

impl Component for TitleBar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![
            Span::styled("promptline", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" | "),
            Span::styled(self.mode.label(), Style::default().fg(Color::Cyan)),
        ];

        if !self.status_message.is_empty() {
            spans.push(Span::raw(" | "));
            spans.push(Span::raw(self.status_message));
        }

        if let Some(error) = self.error {
            spans.push(Span::raw(" | "));
            spans.push(Span::styled(
                format!("error: {error}"),
                Style::default().fg(Color::Red),
            ));
        }

        frame.render_widget(Line::from(spans), area);
    }
}
