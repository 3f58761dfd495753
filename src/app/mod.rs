//! Viewer state and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Session`]: The complete viewer state
//! - [`Message`]: All possible events and actions
//! - [`update`]: Pure function for state transitions
//! - [`App::run`]: Main event loop with rendering

mod command;
mod effects;
mod event_loop;
mod input;
mod model;
mod prompt;
mod update;

pub use command::{Command, CommandError};
pub use model::{IoRequest, Mode, Session, Settings, Status, StatusLevel};
pub use prompt::{PromptKind, PromptLine};
pub use update::{Message, update};

use std::path::PathBuf;

use crate::catalog::Endian;

/// Main application struct that owns the terminal and runs the event loop.
pub struct App {
    files: Vec<PathBuf>,
    settings: Settings,
    config_global_path: Option<PathBuf>,
    config_local_path: Option<PathBuf>,
}

impl App {
    /// Create a new application over the given files. No files opens an
    /// empty scratch buffer.
    pub fn new(files: Vec<PathBuf>) -> Self {
        Self {
            files,
            settings: Settings::default(),
            config_global_path: None,
            config_local_path: None,
        }
    }

    /// Bytes per row for new panes.
    pub fn with_columns(mut self, columns: u16) -> Self {
        self.settings.columns = columns.max(1);
        self
    }

    /// Rows kept between the cursor and the pane edge.
    pub const fn with_scroll_padding(mut self, padding: u16) -> Self {
        self.settings.scroll_padding = padding;
        self
    }

    /// Byte order for typed reads.
    pub const fn with_endian(mut self, endian: Endian) -> Self {
        self.settings.endian = endian;
        self
    }

    /// Set config paths to show in help.
    pub fn with_config_paths(
        mut self,
        global_path: Option<PathBuf>,
        local_path: Option<PathBuf>,
    ) -> Self {
        self.config_global_path = global_path;
        self.config_local_path = local_path;
        self
    }
}

#[cfg(test)]
mod tests;
