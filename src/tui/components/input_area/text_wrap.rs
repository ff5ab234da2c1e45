//! Wrapping, measuring and boundary helpers for the InputArea.
//!
//! Nothing here knows about `InputArea` or `CursorState`; every function takes
//! the text and widths it needs.

use unicode_width::UnicodeWidthStr;

/// Left + right border plus one column of padding on each side
pub(super) const HORIZONTAL_OVERHEAD: u16 = 4;
/// Top + bottom borders
pub(super) const VERTICAL_OVERHEAD: u16 = 2;
/// Rows between the area's top edge and the first content row
pub(super) const BORDER_OFFSET: u16 = 1;
/// Columns between the area's left edge and the first content column
pub(super) const CONTENT_OFFSET_X: u16 = 2;
/// Width of the bordered send button to the right of the text box
pub(super) const SEND_BUTTON_WIDTH: u16 = 5;

pub(super) fn wrap_options(inner_width: u16) -> textwrap::Options<'static> {
    textwrap::Options::new(inner_width as usize)
        .break_words(true)
        .word_separator(textwrap::WordSeparator::AsciiSpace)
}

/// Width available for text inside a bordered, padded box of `box_width` columns.
pub(super) fn inner_width(box_width: u16) -> u16 {
    box_width.saturating_sub(HORIZONTAL_OVERHEAD)
}

/// Width of the text box once the send button has taken its share of `area_width`.
pub(super) fn text_box_width(area_width: u16) -> u16 {
    area_width.saturating_sub(SEND_BUTTON_WIDTH)
}

/// Wrap `text` into display lines. A trailing newline yields a trailing empty
/// line, which textwrap does not always produce on its own.
pub(super) fn wrapped_lines(text: &str, width: u16) -> Vec<String> {
    if width == 0 || text.is_empty() {
        return vec![String::new()];
    }

    let mut lines: Vec<String> = textwrap::wrap(text, wrap_options(width))
        .into_iter()
        .map(|line| line.into_owned())
        .collect();

    if text.ends_with('\n') && !lines.last().is_some_and(|l| l.is_empty()) {
        lines.push(String::new());
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// Number of display lines `text` occupies at `width`. Never less than 1.
pub(super) fn wrap_line_count(text: &str, width: u16) -> u16 {
    wrapped_lines(text, width).len().min(u16::MAX as usize) as u16
}

/// Terminal columns taken by `text`.
pub(super) fn display_width(text: &str) -> u16 {
    text.width().min(u16::MAX as usize) as u16
}

pub(super) fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

pub(super) fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .char_indices()
        .nth(1)
        .map(|(i, _)| pos + i)
        .unwrap_or(text.len())
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Byte offset of the start of the word before `pos` (readline `backward-word`).
pub(super) fn prev_word_boundary(text: &str, pos: usize) -> usize {
    let mut chars = text[..pos].char_indices().rev().peekable();

    while chars.peek().is_some_and(|&(_, c)| !is_word_char(c)) {
        chars.next();
    }

    let mut boundary = 0;
    while let Some(&(i, c)) = chars.peek() {
        if !is_word_char(c) {
            boundary = i + c.len_utf8();
            break;
        }
        boundary = i;
        chars.next();
    }
    boundary
}

/// Byte offset of the end of the word after `pos` (readline `forward-word`).
pub(super) fn next_word_boundary(text: &str, pos: usize) -> usize {
    let mut chars = text[pos..].char_indices().peekable();

    while chars.peek().is_some_and(|&(_, c)| !is_word_char(c)) {
        chars.next();
    }
    while chars.peek().is_some_and(|&(_, c)| is_word_char(c)) {
        chars.next();
    }

    match chars.peek() {
        Some(&(i, _)) => pos + i,
        None => text.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_is_one_line() {
        assert_eq!(wrap_line_count("", 40), 1);
        assert_eq!(wrapped_lines("", 40), vec![String::new()]);
    }

    #[test]
    fn zero_width_is_one_line() {
        assert_eq!(wrap_line_count("anything at all", 0), 1);
    }

    #[test]
    fn long_word_breaks_across_lines() {
        assert_eq!(wrap_line_count("abcdefghij", 4), 3);
    }

    #[test]
    fn explicit_newlines_count() {
        assert_eq!(wrap_line_count("one\ntwo\nthree", 40), 3);
    }

    #[test]
    fn trailing_newline_opens_a_line() {
        assert_eq!(wrap_line_count("query\n", 40), 2);
        assert_eq!(wrapped_lines("query\n", 40).last().map(String::as_str), Some(""));
    }

    #[test]
    fn inner_width_saturates() {
        assert_eq!(inner_width(3), 0);
        assert_eq!(inner_width(24), 20);
        assert_eq!(text_box_width(4), 0);
        assert_eq!(text_box_width(45), 40);
    }

    #[test]
    fn display_width_counts_wide_chars() {
        assert_eq!(display_width("abc"), 3);
        assert_eq!(display_width("日本"), 4);
    }

    #[test]
    fn char_boundaries_respect_utf8() {
        let s = "né🔥";
        assert_eq!(next_char_boundary(s, 0), 1);
        assert_eq!(next_char_boundary(s, 1), 3);
        assert_eq!(next_char_boundary(s, 3), s.len());
        assert_eq!(prev_char_boundary(s, s.len()), 3);
        assert_eq!(prev_char_boundary(s, 3), 1);
    }

    #[test]
    fn word_motion_skips_punctuation_and_spaces() {
        let s = "rust, async  runtimes";
        assert_eq!(prev_word_boundary(s, s.len()), 13);
        assert_eq!(prev_word_boundary(s, 13), 6);
        assert_eq!(prev_word_boundary(s, 6), 0);
        assert_eq!(next_word_boundary(s, 0), 4);
        assert_eq!(next_word_boundary(s, 4), 11);
        assert_eq!(next_word_boundary(s, 11), s.len());
    }

    #[test]
    fn underscores_join_words() {
        assert_eq!(next_word_boundary("snake_case word", 0), 10);
        assert_eq!(prev_word_boundary("snake_case word", 10), 0);
    }
}
