use ratatui::Frame;
use ratatui::layout::Rect;

/// A piece of UI that draws itself into a `Rect`.
///
/// Props are plain struct fields the parent sets before rendering. `render`
/// takes `&mut self` so a component can remember layout facts from the frame
/// it just drew (widths, hit-test rects, scroll offsets), the same way a
/// ratatui `StatefulWidget` would.
pub trait Component {
    fn render(&mut self, frame: &mut Frame, area: Rect);
}

/// A component that turns low-level `TuiEvent`s into its own events.
pub trait EventHandler {
    /// High-level event emitted to the parent.
    type Event;

    /// Returns `None` when the event was ignored or produced nothing worth reporting.
    fn handle_event(&mut self, event: &super::event::TuiEvent) -> Option<Self::Event>;
}
