use std::time::Instant;

use anyhow::{Context, Result};
use crossterm::event;
use ratatui::DefaultTerminal;

use crate::app::{App, Session, StatusLevel, update};
use crate::buffer::ByteBuffer;

impl App {
    /// Run the main event loop.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal initialization, drawing, or reading
    /// input fails. Unreadable files are not errors; they open empty.
    pub fn run(&mut self) -> Result<()> {
        let _run_scope = crate::perf::scope("app.run.total");

        // Load every file before taking over the terminal
        let load_scope = crate::perf::scope("app.load_buffers");
        let mut warnings = Vec::new();
        let buffers = self
            .files
            .iter()
            .map(|path| {
                let (buffer, err) = ByteBuffer::load_lossy(path);
                if let Some(err) = err {
                    warnings.push(format!("{err:#}"));
                }
                buffer
            })
            .collect::<Vec<_>>();
        drop(load_scope);
        crate::perf::log_event(
            "init.buffers",
            format!("files={} failed={}", buffers.len(), warnings.len()),
        );

        let mut session = Session::new(buffers, self.settings);
        session
            .config_global_path
            .clone_from(&self.config_global_path);
        session.config_local_path.clone_from(&self.config_local_path);
        if !warnings.is_empty() {
            session.show_status(StatusLevel::Warning, warnings.join("; "));
        }

        let init_scope = crate::perf::scope("app.ratatui_init");
        let mut terminal = ratatui::try_init()
            .context("Failed to initialize terminal - hexpane requires an interactive terminal")?;
        drop(init_scope);

        let result = Self::event_loop(&mut terminal, &mut session);

        ratatui::restore();

        result
    }

    fn event_loop(terminal: &mut DefaultTerminal, session: &mut Session) -> Result<()> {
        let mut frame_idx: u64 = 0;

        loop {
            frame_idx += 1;
            let draw_start = Instant::now();
            terminal.draw(|frame| Self::view(session, frame))?;
            crate::perf::log_event(
                "frame.draw",
                format!(
                    "frame={} draw_ms={:.3}",
                    frame_idx,
                    draw_start.elapsed().as_secs_f64() * 1000.0
                ),
            );

            // One blocking read per frame
            let event = event::read().context("Failed to read terminal input")?;
            if let Some(msg) = Self::handle_event(&event, session) {
                crate::perf::log_event("event.message", format!("frame={frame_idx} msg={msg:?}"));
                let side_msg = msg.clone();
                *session = update(std::mem::take(session), msg);
                Self::handle_message_side_effects(session, &side_msg);
            }

            if session.should_quit {
                break;
            }
        }
        Ok(())
    }
}
