//! # HistoryPane Component
//!
//! Scrollable list of submitted prompts, newest at the bottom. Each entry is a
//! bordered paragraph titled with its kind and local submission time.
//!
//! Scroll position lives in `HistoryState` (owned by `TuiState`) so it
//! survives across frames; the pane itself is rebuilt every frame from props.
//! The view sticks to the bottom until the user scrolls up, and re-sticks once
//! they scroll back down to the end.

use chrono::Local;
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Paragraph, Wrap};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::transcript::{Entry, EntryKind};
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

pub struct HistoryState {
    pub scroll_state: ScrollViewState,
    pub stick_to_bottom: bool,
    /// Content and viewport heights from the last render
    content_height: u16,
    viewport_height: u16,
}

impl HistoryState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            stick_to_bottom: true,
            content_height: 0,
            viewport_height: 0,
        }
    }

    fn max_offset(&self) -> u16 {
        self.content_height.saturating_sub(self.viewport_height)
    }

    fn restick_if_at_bottom(&mut self) {
        if self.scroll_state.offset().y >= self.max_offset() {
            self.stick_to_bottom = true;
        }
    }
}

impl Default for HistoryState {
    fn default() -> Self {
        Self::new()
    }
}

impl EventHandler for HistoryState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<()> {
        match event {
            TuiEvent::ScrollUp => {
                self.stick_to_bottom = false;
                self.scroll_state.scroll_up();
            }
            TuiEvent::ScrollPageUp => {
                self.stick_to_bottom = false;
                self.scroll_state.scroll_page_up();
            }
            TuiEvent::ScrollDown => {
                self.scroll_state.scroll_down();
                self.restick_if_at_bottom();
            }
            TuiEvent::ScrollPageDown => {
                self.scroll_state.scroll_page_down();
                self.restick_if_at_bottom();
            }
            _ => return None,
        }
        Some(())
    }
}

pub struct HistoryPane<'a> {
    pub entries: &'a [Entry],
    pub state: &'a mut HistoryState,
}

impl HistoryPane<'_> {
    fn entry_paragraph(entry: &Entry) -> Paragraph<'_> {
        let color = match entry.kind {
            EntryKind::Query => Color::Yellow,
            EntryKind::FollowUp => Color::Blue,
        };
        let title = format!(
            "{} · {}",
            entry.kind.label(),
            entry.submitted_at.with_timezone(&Local).format("%H:%M:%S")
        );
        Paragraph::new(entry.text.as_str())
            .wrap(Wrap { trim: false })
            .block(
                Block::bordered()
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(color).add_modifier(Modifier::DIM))
                    .title(title),
            )
    }

    fn render_empty(frame: &mut Frame, area: Rect) {
        let hint = Paragraph::new(vec![
            Line::from("No prompts yet."),
            Line::from("Enter submits · Shift+Enter adds a line · Ctrl+X stops · Ctrl+N new research"),
        ])
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));

        let y = area.y + area.height / 2;
        let hint_area = Rect::new(area.x, y.saturating_sub(1), area.width, 2.min(area.height));
        frame.render_widget(hint, hint_area);
    }
}

impl Component for HistoryPane<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        if self.entries.is_empty() {
            self.state.content_height = 0;
            Self::render_empty(frame, area);
            return;
        }

        // Leave one column for the scrollbar
        let content_width = area.width.saturating_sub(1);
        let paragraphs: Vec<(Paragraph, u16)> = self
            .entries
            .iter()
            .map(|entry| {
                let paragraph = Self::entry_paragraph(entry);
                let height = paragraph.line_count(content_width).min(u16::MAX as usize) as u16;
                (paragraph, height)
            })
            .collect();

        let total_height: u16 = paragraphs
            .iter()
            .fold(0u16, |acc, (_, h)| acc.saturating_add(*h));
        self.state.content_height = total_height;
        self.state.viewport_height = area.height;

        let mut scroll_view = ScrollView::new(Size::new(content_width, total_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let mut y = 0u16;
        for (paragraph, height) in paragraphs {
            scroll_view.render_widget(paragraph, Rect::new(0, y, content_width, height));
            y = y.saturating_add(height);
        }

        if self.state.stick_to_bottom {
            self.state.scroll_state.scroll_to_bottom();
        }
        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}
