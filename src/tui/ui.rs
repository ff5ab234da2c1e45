use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{HistoryPane, Mode, TitleBar};

/// Mode shown in the title bar.
pub fn mode(app: &App) -> Mode {
    if app.stopped {
        Mode::Stopped
    } else if app.pending {
        Mode::Recording
    } else if app.has_report {
        Mode::FollowUp
    } else {
        Mode::NewResearch
    }
}

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min};

    // Stopped input reports zero height, so history takes the whole body
    let input_height = tui.input_area.height();
    let [title_area, history_area, input_area] =
        Layout::vertical([Length(1), Min(0), Length(input_height)]).areas(frame.area());

    TitleBar {
        mode: mode(app),
        status_message: &app.status_message,
        error: app.error.as_deref(),
    }
    .render(frame, title_area);

    HistoryPane {
        entries: &app.entries,
        state: &mut tui.history,
    }
    .render(frame, history_area);

    tui.input_area.render(frame, input_area);
}
