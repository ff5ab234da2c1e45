//! # InputArea Component
//!
//! Chat-style prompt box: a bordered text area that grows with its content and
//! a send button beside it.
//!
//! ## Responsibilities
//!
//! - Capture and edit text (chars, paste, backspace/delete, cursor and word motion)
//! - Enter submits, Shift+Enter inserts a newline
//! - Clicking the send button submits, exactly like Enter
//! - Grow/shrink to fit the content, debounced so a burst of keystrokes costs
//!   one height recalculation
//! - Show a placeholder chosen by whether follow-up questions are possible
//!
//! ## Props
//!
//! The parent sets these before each frame:
//!
//! - `disabled`: no editing, no submission
//! - `secondary`: a follow-up handler exists (selects the placeholder)
//! - `resettable`: the parent wants a reset before each submission
//! - `stopped`: the component renders nothing and ignores input
//!
//! ## Height
//!
//! `height()` is what the layout reserves. It only changes in `tick()`, once the
//! resize debouncer fires, and on submit, where it drops straight back to the
//! minimum. `calculate_height()` is the undebounced measurement.

mod cursor;
pub mod debounce;
mod text_wrap;

use std::time::{Duration, Instant};

use log::debug;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph};

use crate::core::config::{DEFAULT_FOLLOW_UP_PLACEHOLDER, DEFAULT_PLACEHOLDER, MAX_LINE_LIMIT};
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

use cursor::CursorState;
pub use debounce::Debouncer;
use text_wrap::{
    SEND_BUTTON_WIDTH, VERTICAL_OVERHEAD, inner_width, next_char_boundary, next_word_boundary,
    prev_char_boundary, prev_word_boundary, text_box_width, wrap_line_count, wrapped_lines,
};

/// High-level events emitted by the InputArea
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Enter or the send button. When `reset` is set the parent runs its
    /// reset before handling `text`.
    Submit { text: String, reset: bool },
    /// Buffer edited; a resize is now pending
    ContentChanged,
    /// Cursor moved without changing the text
    CursorMoved,
}

/// Placeholder text for the two modes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholders {
    pub primary: String,
    pub follow_up: String,
}

impl Default for Placeholders {
    fn default() -> Self {
        Self {
            primary: DEFAULT_PLACEHOLDER.to_string(),
            follow_up: DEFAULT_FOLLOW_UP_PLACEHOLDER.to_string(),
        }
    }
}

/// Bounds on the number of content rows the box may grow to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineLimits {
    pub min: u16,
    pub max: u16,
}

impl LineLimits {
    /// Both limits are clamped to `1..=MAX_LINE_LIMIT`, and `max` to at least `min`.
    pub fn new(min: u16, max: u16) -> Self {
        let min = min.clamp(1, MAX_LINE_LIMIT);
        Self {
            min,
            max: max.clamp(min, MAX_LINE_LIMIT),
        }
    }
}

impl Default for LineLimits {
    fn default() -> Self {
        Self::new(1, 6)
    }
}

pub struct InputArea {
    /// Current prompt text
    pub buffer: String,
    pub disabled: bool,
    pub secondary: bool,
    pub resettable: bool,
    pub stopped: bool,
    placeholders: Placeholders,
    limits: LineLimits,
    /// Rows currently reserved by the layout
    height: u16,
    resize: Debouncer,
    resize_count: u64,
    /// Full area width from the last render
    last_area_width: u16,
    cursor: CursorState,
    /// Where the send button was drawn, for click hit-testing
    send_button: Option<Rect>,
}

impl InputArea {
    const DEFAULT_AREA_WIDTH: u16 = 80;

    pub fn new(placeholders: Placeholders, limits: LineLimits, debounce: Duration) -> Self {
        Self {
            buffer: String::new(),
            disabled: false,
            secondary: false,
            resettable: false,
            stopped: false,
            placeholders,
            limits,
            height: limits.min.saturating_add(VERTICAL_OVERHEAD),
            resize: Debouncer::new(debounce),
            resize_count: 0,
            last_area_width: Self::DEFAULT_AREA_WIDTH,
            cursor: CursorState::new(),
            send_button: None,
        }
    }

    pub fn placeholder(&self) -> &str {
        if self.secondary {
            &self.placeholders.follow_up
        } else {
            &self.placeholders.primary
        }
    }

    /// Rows the layout should give this component. Zero when stopped.
    pub fn height(&self) -> u16 {
        if self.stopped { 0 } else { self.height }
    }

    pub fn min_height(&self) -> u16 {
        self.limits.min.saturating_add(VERTICAL_OVERHEAD)
    }

    /// Measure the rows the current buffer needs in an area `area_width` wide,
    /// clamped to the line limits. Zero when stopped.
    pub fn calculate_height(&self, area_width: u16) -> u16 {
        if self.stopped {
            return 0;
        }
        let width = inner_width(text_box_width(area_width));
        let lines = wrap_line_count(&self.buffer, width).clamp(self.limits.min, self.limits.max);
        lines.saturating_add(VERTICAL_OVERHEAD)
    }

    /// How many debounced height recalculations have run.
    pub fn resize_count(&self) -> u64 {
        self.resize_count
    }

    pub fn resize_pending(&self) -> bool {
        self.resize.is_pending()
    }

    /// Time until the pending resize is due, for the event loop's poll timeout.
    pub fn next_deadline(&self, now: Instant) -> Option<Duration> {
        self.resize.remaining(now)
    }

    /// Run the debounced height recalculation if it is due.
    ///
    /// Returns `true` when a recalculation ran (the caller should redraw).
    pub fn tick(&mut self, now: Instant) -> bool {
        if !self.resize.fire(now) {
            return false;
        }
        self.height = self.calculate_height(self.last_area_width).max(self.min_height());
        self.resize_count += 1;
        debug!(
            "Input height recalculated: {} rows ({} bytes)",
            self.height,
            self.buffer.len()
        );
        true
    }

    /// Handle `event` as if it arrived at `now`.
    pub fn handle_event_at(&mut self, event: &TuiEvent, now: Instant) -> Option<InputEvent> {
        if self.stopped {
            return None;
        }

        match event {
            TuiEvent::Submit => self.submit(),
            TuiEvent::MouseClick(col, row) => {
                let hit = self
                    .send_button
                    .is_some_and(|button| button.contains(Position::new(*col, *row)));
                if hit { self.submit() } else { None }
            }
            _ if self.disabled => None,
            TuiEvent::Newline => self.insert_str("\n", now),
            TuiEvent::InputChar(c) => {
                let mut utf8 = [0u8; 4];
                self.insert_str(c.encode_utf8(&mut utf8), now)
            }
            TuiEvent::Paste(text) => {
                // Some terminals paste CRLF
                let text = text.replace("\r\n", "\n").replace('\r', "\n");
                self.insert_str(&text, now)
            }
            TuiEvent::Backspace => {
                if self.cursor.pos == 0 {
                    return None;
                }
                let prev = prev_char_boundary(&self.buffer, self.cursor.pos);
                self.buffer.drain(prev..self.cursor.pos);
                self.cursor.pos = prev;
                self.content_changed(now)
            }
            TuiEvent::Delete => {
                if self.cursor.pos >= self.buffer.len() {
                    return None;
                }
                let next = next_char_boundary(&self.buffer, self.cursor.pos);
                self.buffer.drain(self.cursor.pos..next);
                self.content_changed(now)
            }
            TuiEvent::CursorLeft => {
                let target = match self.cursor.pos {
                    0 => 0,
                    pos => prev_char_boundary(&self.buffer, pos),
                };
                self.move_cursor(target)
            }
            TuiEvent::CursorRight => {
                let target = match self.cursor.pos {
                    pos if pos >= self.buffer.len() => pos,
                    pos => next_char_boundary(&self.buffer, pos),
                };
                self.move_cursor(target)
            }
            TuiEvent::WordLeft => self.move_cursor(prev_word_boundary(&self.buffer, self.cursor.pos)),
            TuiEvent::WordRight => self.move_cursor(next_word_boundary(&self.buffer, self.cursor.pos)),
            TuiEvent::CursorHome => {
                let line_start = self.buffer[..self.cursor.pos]
                    .rfind('\n')
                    .map(|i| i + 1)
                    .unwrap_or(0);
                self.move_cursor(line_start)
            }
            TuiEvent::CursorEnd => {
                let line_end = self.buffer[self.cursor.pos..]
                    .find('\n')
                    .map(|i| self.cursor.pos + i)
                    .unwrap_or(self.buffer.len());
                self.move_cursor(line_end)
            }
            TuiEvent::CursorUp => self
                .cursor
                .move_vertically(&self.buffer, -1)
                .then_some(InputEvent::CursorMoved),
            TuiEvent::CursorDown => self
                .cursor
                .move_vertically(&self.buffer, 1)
                .then_some(InputEvent::CursorMoved),
            _ => None,
        }
    }

    /// Enter and the send button both land here.
    fn submit(&mut self) -> Option<InputEvent> {
        if self.disabled {
            debug!("Submit ignored: input disabled");
            return None;
        }

        let text = std::mem::take(&mut self.buffer);
        self.cursor.reset();
        // A resize still pending would measure the old text
        self.resize.cancel();
        self.height = self.min_height();
        debug!("Submitting {} bytes (reset: {})", text.len(), self.resettable);

        Some(InputEvent::Submit {
            text,
            reset: self.resettable,
        })
    }

    fn insert_str(&mut self, text: &str, now: Instant) -> Option<InputEvent> {
        if text.is_empty() {
            return None;
        }
        self.buffer.insert_str(self.cursor.pos, text);
        self.cursor.pos += text.len();
        self.content_changed(now)
    }

    fn content_changed(&mut self, now: Instant) -> Option<InputEvent> {
        self.resize.schedule(now);
        Some(InputEvent::ContentChanged)
    }

    fn move_cursor(&mut self, target: usize) -> Option<InputEvent> {
        (self.cursor.pos != target).then(|| {
            self.cursor.pos = target;
            InputEvent::CursorMoved
        })
    }

    fn visible_text(&self, box_width: u16, visible_lines: u16) -> String {
        let lines = wrapped_lines(&self.buffer, inner_width(box_width));
        let start = (self.cursor.scroll_offset as usize).min(lines.len());
        let end = (start + visible_lines as usize).min(lines.len());
        lines[start..end].join("\n")
    }

    fn render_scrollbar(&self, frame: &mut Frame, area: Rect, visible_lines: u16) {
        use ratatui::widgets::{Scrollbar, ScrollbarOrientation, ScrollbarState};

        let total = wrap_line_count(&self.buffer, inner_width(area.width));
        if total <= visible_lines {
            return;
        }

        // content_length is the max scroll position, not the line count
        let mut state = ScrollbarState::default()
            .content_length(total.saturating_sub(visible_lines) as usize)
            .position(self.cursor.scroll_offset as usize);

        let track = Rect {
            x: area.x + area.width.saturating_sub(1),
            y: area.y + 1,
            width: 1,
            height: area.height.saturating_sub(2),
        };
        frame.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight),
            track,
            &mut state,
        );
    }

    fn render_send_button(&self, frame: &mut Frame, area: Rect) {
        let style = if self.disabled {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().fg(Color::Cyan)
        };
        let button = Paragraph::new("➤")
            .alignment(Alignment::Center)
            .style(style)
            .block(
                Block::bordered()
                    .border_type(BorderType::Rounded)
                    .border_style(style),
            );
        frame.render_widget(button, area);
    }
}

impl Component for InputArea {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        if self.stopped {
            self.send_button = None;
            return;
        }

        self.last_area_width = area.width;
        let [text_area, button_area] =
            Layout::horizontal([Constraint::Min(0), Constraint::Length(SEND_BUTTON_WIDTH)])
                .areas(area);

        let visible_lines = text_area.height.saturating_sub(VERTICAL_OVERHEAD).max(1);
        self.cursor.last_box_width = text_area.width;
        self.cursor
            .update_scroll_offset(&self.buffer, text_area.width, visible_lines);

        let border_style = if self.disabled {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .padding(Padding::horizontal(1));

        let paragraph = if self.buffer.is_empty() {
            Paragraph::new(self.placeholder().to_string()).style(
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            )
        } else {
            let style = if self.disabled {
                Style::default().fg(Color::DarkGray)
            } else {
                Style::default().fg(Color::Green)
            };
            Paragraph::new(self.visible_text(text_area.width, visible_lines)).style(style)
        };

        frame.render_widget(paragraph.block(block), text_area);
        self.render_scrollbar(frame, text_area, visible_lines);
        self.render_send_button(frame, button_area);
        self.send_button = Some(button_area);

        if !self.disabled {
            frame.set_cursor_position(self.cursor.screen_pos(&self.buffer, text_area));
        }
    }
}

impl EventHandler for InputArea {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        self.handle_event_at(event, Instant::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn input() -> InputArea {
        InputArea::new(
            Placeholders::default(),
            LineLimits::new(1, 4),
            Duration::from_millis(100),
        )
    }

    fn type_text(input: &mut InputArea, text: &str, now: Instant) {
        for c in text.chars() {
            input.handle_event_at(&TuiEvent::InputChar(c), now);
        }
    }

    fn render(input: &mut InputArea, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| input.render(f, f.area())).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn line_limits_are_capped() {
        let limits = LineLimits::new(u16::MAX, u16::MAX);
        assert_eq!(limits, LineLimits::new(MAX_LINE_LIMIT, MAX_LINE_LIMIT));

        let input = InputArea::new(Placeholders::default(), limits, Duration::from_millis(100));
        assert_eq!(input.min_height(), MAX_LINE_LIMIT + VERTICAL_OVERHEAD);
        assert_eq!(input.calculate_height(80), MAX_LINE_LIMIT + VERTICAL_OVERHEAD);
    }

    #[test]
    fn new_input_is_empty_at_min_height() {
        let input = input();
        assert!(input.buffer.is_empty());
        assert_eq!(input.height(), 3);
        assert_eq!(input.min_height(), 3);
        assert!(!input.resize_pending());
    }

    #[test]
    fn typing_edits_buffer_and_schedules_resize() {
        let mut input = input();
        let now = Instant::now();

        assert_eq!(
            input.handle_event_at(&TuiEvent::InputChar('a'), now),
            Some(InputEvent::ContentChanged)
        );
        type_text(&mut input, "bc", now);
        assert_eq!(input.buffer, "abc");
        assert!(input.resize_pending());

        input.handle_event_at(&TuiEvent::Backspace, now);
        assert_eq!(input.buffer, "ab");
        assert_eq!(input.handle_event_at(&TuiEvent::Delete, now), None);
    }

    #[test]
    fn enter_submits_and_clears() {
        let mut input = input();
        let now = Instant::now();
        type_text(&mut input, "quantum sensing", now);

        let event = input.handle_event_at(&TuiEvent::Submit, now);
        assert_eq!(
            event,
            Some(InputEvent::Submit {
                text: "quantum sensing".to_string(),
                reset: false
            })
        );
        assert!(input.buffer.is_empty());
        assert!(!input.resize_pending());
    }

    #[test]
    fn submit_carries_reset_flag() {
        let mut input = input();
        input.resettable = true;
        let event = input.handle_event_at(&TuiEvent::Submit, Instant::now());
        assert_eq!(
            event,
            Some(InputEvent::Submit {
                text: String::new(),
                reset: true
            })
        );
    }

    #[test]
    fn disabled_blocks_submit_and_editing() {
        let mut input = input();
        let now = Instant::now();
        type_text(&mut input, "keep me", now);
        input.disabled = true;

        assert_eq!(input.handle_event_at(&TuiEvent::Submit, now), None);
        assert_eq!(input.handle_event_at(&TuiEvent::InputChar('!'), now), None);
        assert_eq!(input.buffer, "keep me");
    }

    #[test]
    fn newline_does_not_submit() {
        let mut input = input();
        let now = Instant::now();
        type_text(&mut input, "line one", now);

        assert_eq!(
            input.handle_event_at(&TuiEvent::Newline, now),
            Some(InputEvent::ContentChanged)
        );
        type_text(&mut input, "line two", now);
        assert_eq!(input.buffer, "line one\nline two");
    }

    #[test]
    fn burst_of_edits_resizes_once_with_final_content() {
        let mut input = input();
        let t0 = Instant::now();
        let ms = Duration::from_millis;

        type_text(&mut input, "a", t0);
        input.handle_event_at(&TuiEvent::Newline, t0 + ms(30));
        type_text(&mut input, "b", t0 + ms(60));

        assert!(!input.tick(t0 + ms(100)));
        assert_eq!(input.height(), 3, "height holds until the window closes");

        assert!(input.tick(t0 + ms(160)));
        assert!(!input.tick(t0 + ms(400)));
        assert_eq!(input.resize_count(), 1);
        assert_eq!(input.height(), 4);
    }

    #[test]
    fn height_is_clamped_to_max_lines() {
        let mut input = input();
        let t0 = Instant::now();
        for _ in 0..10 {
            type_text(&mut input, "x", t0);
            input.handle_event_at(&TuiEvent::Newline, t0);
        }
        input.tick(t0 + Duration::from_millis(100));
        assert_eq!(input.height(), 6);
    }

    #[test]
    fn submit_restores_min_height() {
        let mut input = input();
        let t0 = Instant::now();
        input.handle_event_at(&TuiEvent::Newline, t0);
        input.handle_event_at(&TuiEvent::Newline, t0);
        input.tick(t0 + Duration::from_millis(100));
        assert_eq!(input.height(), 5);

        input.handle_event_at(&TuiEvent::Submit, t0 + Duration::from_millis(150));
        assert_eq!(input.height(), 3);
    }

    #[test]
    fn cursor_motion_and_mid_buffer_insert() {
        let mut input = input();
        let now = Instant::now();
        type_text(&mut input, "ac", now);

        assert_eq!(
            input.handle_event_at(&TuiEvent::CursorLeft, now),
            Some(InputEvent::CursorMoved)
        );
        type_text(&mut input, "b", now);
        assert_eq!(input.buffer, "abc");

        assert_eq!(
            input.handle_event_at(&TuiEvent::CursorHome, now),
            Some(InputEvent::CursorMoved)
        );
        assert_eq!(input.handle_event_at(&TuiEvent::CursorLeft, now), None);
        assert_eq!(
            input.handle_event_at(&TuiEvent::CursorEnd, now),
            Some(InputEvent::CursorMoved)
        );
        assert_eq!(input.handle_event_at(&TuiEvent::CursorRight, now), None);
    }

    #[test]
    fn paste_normalizes_carriage_returns() {
        let mut input = input();
        input.handle_event_at(&TuiEvent::Paste("a\r\nb\rc".to_string()), Instant::now());
        assert_eq!(input.buffer, "a\nb\nc");
    }

    #[test]
    fn placeholder_follows_secondary_prop() {
        let mut input = input();
        assert_eq!(input.placeholder(), DEFAULT_PLACEHOLDER);
        input.secondary = true;
        assert_eq!(input.placeholder(), DEFAULT_FOLLOW_UP_PLACEHOLDER);
    }

    #[test]
    fn render_shows_placeholder_and_button() {
        let mut input = input();
        let text = render(&mut input, 60, 3);
        assert!(text.contains("What would you like to research next?"));
        assert!(text.contains("➤"));
    }

    #[test]
    fn send_button_click_submits() {
        let mut input = input();
        type_text(&mut input, "click", Instant::now());
        render(&mut input, 60, 3);

        // Button occupies the rightmost SEND_BUTTON_WIDTH columns
        let miss = input.handle_event_at(&TuiEvent::MouseClick(10, 1), Instant::now());
        assert_eq!(miss, None);
        let hit = input.handle_event_at(&TuiEvent::MouseClick(57, 1), Instant::now());
        assert_eq!(
            hit,
            Some(InputEvent::Submit {
                text: "click".to_string(),
                reset: false
            })
        );
    }

    #[test]
    fn stopped_renders_nothing_and_ignores_input() {
        let mut input = input();
        input.stopped = true;

        let text = render(&mut input, 40, 3);
        assert!(text.trim().is_empty());
        assert_eq!(input.height(), 0);
        assert_eq!(input.calculate_height(40), 0);
        assert_eq!(input.handle_event_at(&TuiEvent::Submit, Instant::now()), None);
        assert_eq!(
            input.handle_event_at(&TuiEvent::InputChar('a'), Instant::now()),
            None
        );
    }

    #[test]
    fn calculate_height_wraps_to_width() {
        let mut input = input();
        input.buffer = "word ".repeat(20);
        // 45 wide: 40 for the text box, 36 of text per line
        assert_eq!(input.calculate_height(45), 3 + VERTICAL_OVERHEAD);
    }
}
