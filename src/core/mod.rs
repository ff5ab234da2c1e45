//! # Core Application Logic
//!
//! What happens to a prompt once the input widget hands it over. Knows nothing
//! about ratatui or crossterm.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No terminal. No UI.    │
//!                    └───────────┬─────────────┘
//!                                │ Effect::Record
//!                                ▼
//!                    ┌─────────────────────────┐
//!                    │ transcript (JSONL file) │
//!                    └─────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct
//! - [`action`]: `Action`, `Effect` and `update()`
//! - [`config`]: TOML config, env and CLI resolution
//! - [`transcript`]: JSON Lines record of submitted prompts

pub mod action;
pub mod config;
pub mod state;
pub mod transcript;
