//! Hexpane - A terminal hex viewer with tiling panes.
//!
//! # Usage
//!
//! ```bash
//! hexpane firmware.bin
//! hexpane --columns 8 left.bin right.bin
//! hexpane --endian big --save
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use hexpane::app::App;
use hexpane::catalog::Endian;
use hexpane::config::{
    ConfigFlags, DEFAULT_SCROLL_PADDING, clear_config_flags, global_config_path,
    load_config_flags, local_override_path, parse_flag_tokens, save_config_flags,
};
use hexpane::pane::DEFAULT_COLUMNS;
use hexpane::perf;

/// A terminal hex viewer with tiling panes and typed reads
#[derive(Parser, Debug)]
#[command(name = "hexpane", version, about, long_about = None)]
struct Cli {
    /// Files to open, one pane each
    #[arg(value_name = "FILE")]
    files: Vec<PathBuf>,

    /// Bytes shown per row
    #[arg(short, long, value_name = "N", value_parser = clap::value_parser!(u16).range(1..))]
    columns: Option<u16>,

    /// Rows kept between the cursor and the top or bottom of a pane
    #[arg(long, value_name = "N")]
    scroll_padding: Option<u16>,

    /// Byte order for typed reads
    #[arg(long, value_enum)]
    endian: Option<Endian>,

    /// Enable startup performance logging
    #[arg(long)]
    perf: bool,

    /// Write detailed render debug events to a file
    #[arg(long, value_name = "PATH")]
    render_debug_log: Option<PathBuf>,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let raw_args = std::env::args().collect::<Vec<_>>();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = parse_flag_tokens(&raw_args);

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    // Initialize logging once the flags are known
    tracing_subscriber::fmt()
        .with_env_filter(perf::log_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
            effective.perf,
        ))
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!(?effective, "effective flags");

    perf::set_enabled(effective.perf);
    let render_debug_log_path = effective
        .render_debug_log
        .clone()
        .or_else(|| std::env::var_os("HEXPANE_RENDER_DEBUG_LOG").map(PathBuf::from));
    if let Err(err) = perf::set_debug_log_path(render_debug_log_path.as_deref()) {
        eprintln!(
            "[warn] Failed to initialize render debug log {}: {}",
            render_debug_log_path
                .as_ref()
                .map_or_else(|| "<unset>".to_string(), |p| p.display().to_string()),
            err
        );
    }

    let mut app = App::new(cli.files)
        .with_columns(effective.columns.unwrap_or(DEFAULT_COLUMNS))
        .with_scroll_padding(effective.scroll_padding.unwrap_or(DEFAULT_SCROLL_PADDING))
        .with_endian(effective.endian.unwrap_or_default())
        .with_config_paths(
            Some(global_path.clone()),
            if local_path.exists() {
                Some(local_path.clone())
            } else {
                None
            },
        );

    app.run().context("Application error")
}
