//! Cursor and scroll tracking for the InputArea.
//!
//! `CursorState` holds a byte offset into a buffer it does not own. Every
//! method takes the buffer explicitly, plus the number of content rows the
//! box currently shows (which lags the content while a resize is debounced).

use super::text_wrap::{
    BORDER_OFFSET, CONTENT_OFFSET_X, display_width, inner_width, wrap_line_count, wrap_options,
};
use ratatui::layout::Rect;

pub(super) struct CursorState {
    /// Byte offset in the buffer, always on a char boundary
    pub pos: usize,
    /// First wrapped line shown when the content overflows the box
    pub scroll_offset: u16,
    /// Text box width from the last render, used for vertical movement
    pub last_box_width: u16,
}

impl CursorState {
    const DEFAULT_WIDTH: u16 = 80;

    pub fn new() -> Self {
        Self {
            pos: 0,
            scroll_offset: 0,
            last_box_width: Self::DEFAULT_WIDTH,
        }
    }

    pub fn reset(&mut self) {
        self.pos = 0;
        self.scroll_offset = 0;
    }

    /// Move up (`direction < 0`) or down one wrapped line, keeping the column
    /// where possible. Returns `false` at the first/last line.
    pub fn move_vertically(&mut self, buffer: &str, direction: i16) -> bool {
        let width = inner_width(self.last_box_width);
        if width == 0 || buffer.is_empty() {
            return false;
        }

        let lines = textwrap::wrap(buffer, wrap_options(width));
        if lines.is_empty() {
            return false;
        }

        // Bytes a wrapped line spans, counting the newline that ended it
        let span = |line: &str, offset: usize| -> usize {
            let ends_in_newline = offset + line.len() < buffer.len()
                && buffer.as_bytes()[offset + line.len()] == b'\n';
            line.len() + usize::from(ends_in_newline)
        };

        let mut offset = 0;
        let mut line_idx = 0;
        let mut column = 0;
        for (idx, line) in lines.iter().enumerate() {
            if offset + line.len() >= self.pos {
                line_idx = idx;
                column = self.pos - offset;
                break;
            }
            offset += span(line, offset);
        }

        let target = match direction {
            d if d < 0 && line_idx == 0 => return false,
            d if d < 0 => line_idx - 1,
            _ if line_idx + 1 >= lines.len() => return false,
            _ => line_idx + 1,
        };

        let mut target_start = 0;
        for line in lines.iter().take(target) {
            target_start += span(line, target_start);
        }

        let target_line = &lines[target];
        let mut target_column = column.min(target_line.len());
        while !target_line.is_char_boundary(target_column) {
            target_column -= 1;
        }
        self.pos = target_start + target_column;
        true
    }

    /// Wrapped line (0-based) holding the cursor.
    pub fn line(&self, buffer: &str, box_width: u16) -> u16 {
        let width = inner_width(box_width);
        if width == 0 {
            return 0;
        }

        let before = &buffer[..self.pos];
        let lines = textwrap::wrap(before, wrap_options(width));
        let mut line = lines.len().saturating_sub(1) as u16;

        if self.pos > 0
            && buffer.as_bytes()[self.pos - 1] == b'\n'
            && !lines.last().is_some_and(|l| l.is_empty())
        {
            line += 1;
        }
        line
    }

    /// Keep the cursor inside a window of `visible_lines` rows.
    pub fn update_scroll_offset(&mut self, buffer: &str, box_width: u16, visible_lines: u16) {
        let visible_lines = visible_lines.max(1);
        let total = wrap_line_count(buffer, inner_width(box_width));

        if total <= visible_lines {
            self.scroll_offset = 0;
            return;
        }

        let line = self.line(buffer, box_width);
        if line < self.scroll_offset {
            self.scroll_offset = line;
        } else if line >= self.scroll_offset + visible_lines {
            self.scroll_offset = line - (visible_lines - 1);
        }
        self.scroll_offset = self.scroll_offset.min(total - visible_lines);
    }

    /// Screen (column, row) of the cursor inside the text box at `area`.
    pub fn screen_pos(&self, buffer: &str, area: Rect) -> (u16, u16) {
        let width = inner_width(area.width);
        if width == 0 {
            return (area.x + CONTENT_OFFSET_X.min(area.width), area.y + BORDER_OFFSET);
        }

        let options = wrap_options(width);
        let before = &buffer[..self.pos];
        let line = self.line(buffer, area.width);

        // Column comes from the raw text since the last newline: textwrap trims
        // trailing spaces, the cursor must not.
        let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
        let logical = &before[line_start..];
        let segments = textwrap::wrap(logical, options);

        let column = if segments.len() <= 1 {
            display_width(logical)
        } else {
            let consumed: usize = segments
                .iter()
                .take(segments.len() - 1)
                .map(|seg| seg.chars().count())
                .sum();
            let tail: String = logical.chars().skip(consumed).collect();
            display_width(tail.trim_start_matches(' '))
        };

        let row = line.saturating_sub(self.scroll_offset);
        (
            area.x + CONTENT_OFFSET_X + column.min(width),
            area.y + BORDER_OFFSET + row,
        )
    }
}
