//! Opt-in timing and the render debug log.
//!
//! `--perf` turns on [`scope`] timings, reported through `tracing` under the
//! `hexpane::perf` target, which [`log_filter`] opens up to `info`. `--render-debug-log <PATH>` opens a plain text file
//! that receives every [`log_event`] plus the same scope timings, stamped with
//! the milliseconds since the log was opened.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use tracing_subscriber::EnvFilter;

const TARGET_DIRECTIVE: &str = "hexpane::perf=info";

static ENABLED: AtomicBool = AtomicBool::new(false);
static DEBUG_LOG: Mutex<Option<DebugLog>> = Mutex::new(None);

/// Timer that reports its lifetime when dropped.
#[derive(Debug)]
pub struct Scope {
    name: &'static str,
    start: Instant,
}

impl Drop for Scope {
    fn drop(&mut self) {
        let elapsed_ms = self.start.elapsed().as_secs_f64() * 1000.0;
        if is_enabled() {
            report_scope(self.name, elapsed_ms);
        }
        if let Some(log) = debug_log().as_mut() {
            log.write(self.name, &format!("{elapsed_ms:.3} ms"));
        }
    }
}

#[derive(Debug)]
struct DebugLog {
    opened: Instant,
    writer: BufWriter<File>,
}

impl DebugLog {
    fn write(&mut self, name: &str, detail: &str) {
        let stamp = self.opened.elapsed().as_secs_f64() * 1000.0;
        // Write errors are ignored.
        let _ = writeln!(self.writer, "[{stamp:>10.3} ms] {name}: {detail}");
        let _ = self.writer.flush();
    }
}

fn report_scope(name: &str, elapsed_ms: f64) {
    tracing::info!(target: "hexpane::perf", "{}: {:.2} ms", name, elapsed_ms);
}

/// `base` plus, when `perf` is set, the directive that lets scope timings
/// through regardless of the default level.
pub fn log_filter(base: EnvFilter, perf: bool) -> EnvFilter {
    if !perf {
        return base;
    }
    match TARGET_DIRECTIVE.parse() {
        Ok(directive) => base.add_directive(directive),
        Err(_) => base,
    }
}

fn debug_log() -> MutexGuard<'static, Option<DebugLog>> {
    DEBUG_LOG.lock().unwrap_or_else(PoisonError::into_inner)
}

pub fn set_enabled(enabled: bool) {
    ENABLED.store(enabled, Ordering::Relaxed);
}

pub fn is_enabled() -> bool {
    ENABLED.load(Ordering::Relaxed)
}

/// Start timing `name`; the result is reported when the guard drops.
pub fn scope(name: &'static str) -> Scope {
    Scope {
        name,
        start: Instant::now(),
    }
}

/// Open (or with `None`, close) the render debug log.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub fn set_debug_log_path(path: Option<&Path>) -> std::io::Result<()> {
    let mut log = debug_log();
    *log = None;
    if let Some(path) = path {
        let mut writer = BufWriter::new(File::create(path)?);
        writeln!(writer, "hexpane render debug log start")?;
        writer.flush()?;
        *log = Some(DebugLog {
            opened: Instant::now(),
            writer,
        });
    }
    Ok(())
}

pub fn is_debug_log_enabled() -> bool {
    debug_log().is_some()
}

/// Append one event line to the debug log, if it is open.
pub fn log_event(name: &str, detail: impl AsRef<str>) {
    if let Some(log) = debug_log().as_mut() {
        log.write(name, detail.as_ref());
    }
}
