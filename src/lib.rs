// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. layout::LayoutTree)
    clippy::module_name_repetitions
)]

//! # Hexpane
//!
//! A terminal hex viewer with tiling panes.
//!
//! Hexpane shows one or more files as hex and character columns with:
//! - A tree of horizontal and vertical splits, each leaf a pane
//! - Per-pane cursor, selection and bytes-per-row
//! - Typed reads (`u8` through `i32`, `f32`) at the cursor
//! - A command line for splitting, opening and reloading files
//!
//! ## Architecture
//!
//! Hexpane uses The Elm Architecture (TEA) pattern:
//! - **Session**: Application state
//! - **Message**: Events and actions
//! - **Update**: Pure state transitions
//! - **View**: Render to terminal
//!
//! ## Modules
//!
//! - [`app`]: Event loop, session state and keybindings
//! - [`buffer`]: File contents held in memory
//! - [`pane`]: Cursor, selection and scroll of one pane
//! - [`layout`]: The split tree and pane geometry
//! - [`catalog`]: Value decoders for typed reads
//! - [`ui`]: Terminal UI components
//! - [`config`]: Saved default flags

pub mod app;
pub mod buffer;
pub mod catalog;
pub mod config;
pub mod layout;
pub mod pane;
pub mod perf;
pub mod ui;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Session, update};
    pub use crate::buffer::ByteBuffer;
    pub use crate::layout::{Direction, LayoutTree, Orientation};
    pub use crate::pane::PaneView;
}
