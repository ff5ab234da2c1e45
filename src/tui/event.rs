use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind,
};
use std::time::Duration;

/// TUI-specific input events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TuiEvent {
    // Routed to core::update
    Quit,
    ToggleStop,  // Ctrl+X
    NewResearch, // Ctrl+N

    // Routed to the InputArea
    Submit,  // Enter
    Newline, // Shift+Enter, Alt+Enter, Ctrl+J
    InputChar(char),
    Paste(String), // Bracketed paste, newlines preserved
    Backspace,
    Delete,
    CursorLeft,
    CursorRight,
    CursorUp,
    CursorDown,
    CursorHome,
    CursorEnd,
    WordLeft,
    WordRight,
    MouseClick(u16, u16),

    // Routed to the HistoryPane
    ScrollUp,
    ScrollDown,
    ScrollPageUp,
    ScrollPageDown,

    Resize,
}

/// Poll for an event, blocking up to `timeout`.
pub fn poll_event_timeout(timeout: Duration) -> std::io::Result<Option<TuiEvent>> {
    if event::poll(timeout)? {
        Ok(translate(event::read()?))
    } else {
        Ok(None)
    }
}

/// Poll for an event without blocking.
pub fn poll_event_immediate() -> std::io::Result<Option<TuiEvent>> {
    poll_event_timeout(Duration::ZERO)
}

/// Map a raw crossterm event to a `TuiEvent`.
pub fn translate(event: Event) -> Option<TuiEvent> {
    match event {
        Event::Key(key) => translate_key(key),
        Event::Mouse(mouse) => match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                Some(TuiEvent::MouseClick(mouse.column, mouse.row))
            }
            MouseEventKind::ScrollUp => Some(TuiEvent::ScrollUp),
            MouseEventKind::ScrollDown => Some(TuiEvent::ScrollDown),
            _ => None,
        },
        Event::Paste(data) => Some(TuiEvent::Paste(data)),
        Event::Resize(_, _) => Some(TuiEvent::Resize),
        _ => None,
    }
}

fn translate_key(key: KeyEvent) -> Option<TuiEvent> {
    // Keyboard enhancement reports releases too
    if key.kind == KeyEventKind::Release {
        return None;
    }
    log::debug!("Key event: {:?} with modifiers {:?}", key.code, key.modifiers);

    let word_motion = key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);

    match (key.modifiers, key.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(TuiEvent::Quit),
        (KeyModifiers::CONTROL, KeyCode::Char('x')) => Some(TuiEvent::ToggleStop),
        (KeyModifiers::CONTROL, KeyCode::Char('n')) => Some(TuiEvent::NewResearch),
        // ASCII LF; what Ctrl+Enter sends in most terminals
        (KeyModifiers::CONTROL, KeyCode::Char('j')) => Some(TuiEvent::Newline),
        (m, KeyCode::Enter) if m.intersects(KeyModifiers::SHIFT | KeyModifiers::ALT) => {
            Some(TuiEvent::Newline)
        }
        (_, KeyCode::Enter) => Some(TuiEvent::Submit),
        (m, KeyCode::Char(c)) if !m.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
            Some(TuiEvent::InputChar(c))
        }
        (_, KeyCode::Backspace) => Some(TuiEvent::Backspace),
        (_, KeyCode::Delete) => Some(TuiEvent::Delete),
        (_, KeyCode::Left) if word_motion => Some(TuiEvent::WordLeft),
        (_, KeyCode::Right) if word_motion => Some(TuiEvent::WordRight),
        (_, KeyCode::Left) => Some(TuiEvent::CursorLeft),
        (_, KeyCode::Right) => Some(TuiEvent::CursorRight),
        (_, KeyCode::Up) => Some(TuiEvent::CursorUp),
        (_, KeyCode::Down) => Some(TuiEvent::CursorDown),
        (_, KeyCode::Home) => Some(TuiEvent::CursorHome),
        (_, KeyCode::End) => Some(TuiEvent::CursorEnd),
        (_, KeyCode::PageUp) => Some(TuiEvent::ScrollPageUp),
        (_, KeyCode::PageDown) => Some(TuiEvent::ScrollPageDown),
        (_, KeyCode::Esc) => Some(TuiEvent::Quit),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent::new(code, modifiers))
    }

    #[test]
    fn enter_submits() {
        assert_eq!(
            translate(key(KeyCode::Enter, KeyModifiers::NONE)),
            Some(TuiEvent::Submit)
        );
    }

    #[test]
    fn shift_enter_inserts_newline() {
        assert_eq!(
            translate(key(KeyCode::Enter, KeyModifiers::SHIFT)),
            Some(TuiEvent::Newline)
        );
        assert_eq!(
            translate(key(KeyCode::Enter, KeyModifiers::ALT)),
            Some(TuiEvent::Newline)
        );
        assert_eq!(
            translate(key(KeyCode::Char('j'), KeyModifiers::CONTROL)),
            Some(TuiEvent::Newline)
        );
    }

    #[test]
    fn shifted_chars_are_plain_input() {
        assert_eq!(
            translate(key(KeyCode::Char('Q'), KeyModifiers::SHIFT)),
            Some(TuiEvent::InputChar('Q'))
        );
    }

    #[test]
    fn control_shortcuts() {
        assert_eq!(
            translate(key(KeyCode::Char('x'), KeyModifiers::CONTROL)),
            Some(TuiEvent::ToggleStop)
        );
        assert_eq!(
            translate(key(KeyCode::Char('n'), KeyModifiers::CONTROL)),
            Some(TuiEvent::NewResearch)
        );
        assert_eq!(
            translate(key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(TuiEvent::Quit)
        );
        assert_eq!(translate(key(KeyCode::Char('q'), KeyModifiers::CONTROL)), None);
    }

    #[test]
    fn key_release_is_ignored() {
        let mut release = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        assert_eq!(translate(Event::Key(release)), None);
    }

    #[test]
    fn alt_arrows_move_by_word() {
        assert_eq!(
            translate(key(KeyCode::Left, KeyModifiers::ALT)),
            Some(TuiEvent::WordLeft)
        );
        assert_eq!(
            translate(key(KeyCode::Right, KeyModifiers::CONTROL)),
            Some(TuiEvent::WordRight)
        );
        assert_eq!(
            translate(key(KeyCode::Right, KeyModifiers::NONE)),
            Some(TuiEvent::CursorRight)
        );
    }
}
