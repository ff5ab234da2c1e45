//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI, and
//! translates keyboard and mouse events into `InputEvent`s and core `Action`s.
//!
//! ## Loop
//!
//! Each iteration: sync widget props from `App`, draw if anything changed,
//! block on input until the next event or the input's resize deadline, drain
//! every queued event, run the debounced resize if due, then apply actions
//! coming back from transcript writes.
//!
//! The poll timeout shrinks to the resize deadline so the trailing-edge
//! resize lands on time instead of waiting for the idle timeout.
//!
//! On quit the loop waits up to `SHUTDOWN_WAIT` for an in-flight transcript
//! write to report back before returning.

pub mod component;
pub mod components;
pub mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::path::PathBuf;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use crossterm::cursor::{SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::App;
use crate::core::transcript::{self, Entry};
use crate::tui::component::EventHandler;
use crate::tui::components::{HistoryState, InputArea, InputEvent, LineLimits, Placeholders};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

const IDLE_POLL: Duration = Duration::from_millis(500);
const SHUTDOWN_WAIT: Duration = Duration::from_secs(5);

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub input_area: InputArea,
    pub history: HistoryState,
}

impl TuiState {
    pub fn new(config: &ResolvedConfig) -> Self {
        let mut input_area = InputArea::new(
            Placeholders {
                primary: config.placeholder.clone(),
                follow_up: config.follow_up_placeholder.clone(),
            },
            LineLimits::new(config.min_lines, config.max_lines),
            config.debounce,
        );
        input_area.resettable = config.reset_on_submit;

        Self {
            input_area,
            history: HistoryState::new(),
        }
    }

    /// Push `App` state into the input's props.
    pub fn sync_props(&mut self, app: &App) {
        self.input_area.disabled = app.input_disabled();
        self.input_area.secondary = app.has_report;
        self.input_area.stopped = app.stopped;
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Kitty keyboard protocol lets Shift+Enter arrive as its own key;
        // terminals without it ignore the request
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableMouseCapture,
            DisableBracketedPaste,
            SetCursorStyle::DefaultUserShape
        );
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let history = match &config.transcript_path {
        Some(path) => transcript::load(path).unwrap_or_else(|e| {
            warn!("Could not load transcript {}: {}", path.display(), e);
            Vec::new()
        }),
        None => Vec::new(),
    };
    let mut app = App::from_config(&config, history);
    let mut tui = TuiState::new(&config);

    let mut terminal = ratatui::init();
    let result = TerminalModeGuard::new().and_then(|_guard| {
        event_loop(&mut terminal, &mut app, &mut tui)
    });
    ratatui::restore();

    info!("Exiting with {} prompts in history", app.entries.len());
    result
}

fn event_loop(
    terminal: &mut ratatui::DefaultTerminal,
    app: &mut App,
    tui: &mut TuiState,
) -> std::io::Result<()> {
    // Transcript writes report back here
    let (tx, rx) = mpsc::channel();
    let mut needs_redraw = true;

    loop {
        tui.sync_props(app);

        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, app, tui))?;
            needs_redraw = false;
        }

        let timeout = tui
            .input_area
            .next_deadline(Instant::now())
            .map_or(IDLE_POLL, |due| due.min(IDLE_POLL));

        // Drain everything queued before the next draw
        let mut events = Vec::new();
        if let Some(first) = poll_event_timeout(timeout)? {
            events.push(first);
            while let Some(next) = poll_event_immediate()? {
                events.push(next);
            }
        }

        for event in events {
            needs_redraw = true;
            tui.sync_props(app);
            if dispatch(&event, app, tui, &tx) == Effect::Quit {
                finish_pending(app, &rx, SHUTDOWN_WAIT);
                return Ok(());
            }
        }

        if tui.input_area.tick(Instant::now()) {
            needs_redraw = true;
        }

        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            if apply(app, action, &tx) == Effect::Quit {
                finish_pending(app, &rx, SHUTDOWN_WAIT);
                return Ok(());
            }
        }
    }
}

/// Route one event to core or to a component.
fn dispatch(
    event: &TuiEvent,
    app: &mut App,
    tui: &mut TuiState,
    tx: &mpsc::Sender<Action>,
) -> Effect {
    match event {
        TuiEvent::Resize => Effect::None,
        TuiEvent::Quit => apply(app, Action::Quit, tx),
        TuiEvent::ToggleStop => apply(app, Action::ToggleStop, tx),
        TuiEvent::NewResearch => apply(app, Action::NewResearch, tx),
        TuiEvent::ScrollUp
        | TuiEvent::ScrollDown
        | TuiEvent::ScrollPageUp
        | TuiEvent::ScrollPageDown => {
            tui.history.handle_event(event);
            Effect::None
        }
        _ => match tui.input_area.handle_event(event) {
            Some(InputEvent::Submit { text, reset }) => {
                if reset {
                    apply(app, Action::Reset, tx);
                }
                apply(app, Action::Submit(text), tx)
            }
            Some(InputEvent::ContentChanged | InputEvent::CursorMoved) | None => Effect::None,
        },
    }
}

/// Run `update` and start whatever I/O the effect asks for.
fn apply(app: &mut App, action: Action, tx: &mpsc::Sender<Action>) -> Effect {
    let effect = update(app, action);
    if let Effect::Record(entry) = &effect {
        match &app.transcript_path {
            Some(path) => spawn_record(path.clone(), entry.clone(), tx.clone()),
            None => warn!("Record requested without a transcript path"),
        }
    }
    effect
}

/// Block until the pending transcript write reports back, or `wait` runs out.
fn finish_pending(app: &mut App, rx: &mpsc::Receiver<Action>, wait: Duration) {
    let deadline = Instant::now() + wait;
    while app.pending {
        let remaining = deadline.saturating_duration_since(Instant::now());
        match rx.recv_timeout(remaining) {
            Ok(action) => {
                debug!("Applying before exit: {:?}", action);
                update(app, action);
            }
            Err(e) => {
                warn!("Exiting with a transcript write unfinished: {}", e);
                break;
            }
        }
    }
}

fn spawn_record(path: PathBuf, entry: Entry, tx: mpsc::Sender<Action>) {
    info!("Recording entry {} to {}", entry.id, path.display());
    tokio::spawn(async move {
        let action = match transcript::append(&path, &entry).await {
            Ok(()) => Action::SubmissionRecorded(entry),
            Err(e) => Action::SubmissionFailed {
                entry,
                error: e.to_string(),
            },
        };
        if tx.send(action).is_err() {
            warn!("Failed to report transcript result: receiver dropped");
        }
    });
}
