//! # TUI Components
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! - `TitleBar`: one-line mode and status bar
//! - `HistoryPane`: submitted prompts (scroll state lives in `HistoryState`)
//!
//! ### Stateful Components (Event-Driven)
//!
//! - `InputArea`: the prompt box; emits `InputEvent`s
//!
//! Components receive external data as props (struct fields set by the parent)
//! rather than reaching into `App`, and each file carries its own event types
//! and tests.
//!
//! ```text
//! components/
//! ├── mod.rs
//! ├── title_bar.rs
//! ├── history.rs
//! └── input_area/    (prompt box, cursor, wrapping, resize debounce)
//! ```

pub mod history;
pub mod input_area;
pub mod title_bar;

pub use history::{HistoryPane, HistoryState};
pub use input_area::{Debouncer, InputArea, InputEvent, LineLimits, Placeholders};
pub use title_bar::{Mode, TitleBar};
