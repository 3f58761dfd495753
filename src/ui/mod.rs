//! Terminal UI components.
//!
//! This module contains all UI-related code including:
//! - [`render`]: the frame, pane by pane
//! - [`hex`]: hex and char rows of one pane
//! - [`style`]: Theming and colors

pub mod hex;
pub mod style;

mod overlays;
mod render;
mod status;

pub use overlays::{centered_popup_rect, outline_lines};
pub use render::{render, window_letter};
