//! Default flags saved on disk.
//!
//! Flag files hold the same tokens as the command line, one or more per
//! line, with `#` comments. The global file is read first, then the local
//! `.hexpanerc`, then the real command line; later sources win.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::catalog::Endian;

/// Rows kept between the cursor and the pane edge unless configured.
pub const DEFAULT_SCROLL_PADDING: u16 = 5;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub columns: Option<u16>,
    pub scroll_padding: Option<u16>,
    pub endian: Option<Endian>,
    pub perf: bool,
    pub render_debug_log: Option<PathBuf>,
}

impl ConfigFlags {
    /// Layer `other` over `self`: its valued options win, switches add up.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            columns: other.columns.or(self.columns),
            scroll_padding: other.scroll_padding.or(self.scroll_padding),
            endian: other.endian.or(self.endian),
            perf: self.perf || other.perf,
            render_debug_log: other
                .render_debug_log
                .clone()
                .or_else(|| self.render_debug_log.clone()),
        }
    }
}

const APP_DIR: &str = "hexpane";
const LOCAL_FILE: &str = ".hexpanerc";

/// Per-user flag file: `hexpane/config` under the platform config directory,
/// or `.hexpanerc` in the working directory when no home is known.
pub fn global_config_path() -> PathBuf {
    platform_config_dir().map_or_else(
        || PathBuf::from(LOCAL_FILE),
        |dir| dir.join(APP_DIR).join("config"),
    )
}

#[cfg(target_os = "windows")]
fn platform_config_dir() -> Option<PathBuf> {
    std::env::var_os("APPDATA").map(PathBuf::from)
}

#[cfg(target_os = "macos")]
fn platform_config_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .map(|home| PathBuf::from(home).join("Library").join("Application Support"))
}

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
fn platform_config_dir() -> Option<PathBuf> {
    std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))
}

/// Flag file in the working directory, applied over the global one.
pub fn local_override_path() -> PathBuf {
    PathBuf::from(LOCAL_FILE)
}

/// Read the flag tokens saved in `path`. A missing file means no flags.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read.
pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(|line| line.split_whitespace().map(ToOwned::to_owned))
        .collect::<Vec<_>>();
    Ok(parse_flag_tokens(&tokens))
}

/// Write `flags` to `path` as one flag per line, creating the directory.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be written.
pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = vec!["# hexpane defaults (saved with --save)".to_string()];
    if let Some(columns) = flags.columns {
        lines.push(format!("--columns {columns}"));
    }
    if let Some(padding) = flags.scroll_padding {
        lines.push(format!("--scroll-padding {padding}"));
    }
    if let Some(endian) = flags.endian {
        lines.push(format!("--endian {}", endian_name(endian)));
    }
    if flags.perf {
        lines.push("--perf".to_string());
    }
    if let Some(path) = &flags.render_debug_log {
        lines.push(format!("--render-debug-log {}", path.display()));
    }
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

/// Pick the known flags out of an argument list. Anything else is ignored.
pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = &tokens[i];
        if token == "--perf" {
            flags.perf = true;
        } else if let Some((name, value)) = token.split_once('=') {
            apply_valued(&mut flags, name, value);
        } else if is_valued(token) {
            if let Some(next) = tokens.get(i + 1) {
                apply_valued(&mut flags, token, next);
                i += 1;
            }
        }
        i += 1;
    }
    flags
}

fn is_valued(name: &str) -> bool {
    matches!(
        name,
        "-c" | "--columns" | "--scroll-padding" | "--endian" | "--render-debug-log"
    )
}

fn apply_valued(flags: &mut ConfigFlags, name: &str, value: &str) {
    match name {
        "-c" | "--columns" => {
            flags.columns = value.parse().ok().filter(|&c: &u16| c > 0);
        }
        "--scroll-padding" => flags.scroll_padding = value.parse().ok(),
        "--endian" => flags.endian = parse_endian(value),
        "--render-debug-log" => flags.render_debug_log = Some(PathBuf::from(value)),
        _ => {}
    }
}

const fn endian_name(endian: Endian) -> &'static str {
    match endian {
        Endian::Little => "little",
        Endian::Big => "big",
    }
}

fn parse_endian(s: &str) -> Option<Endian> {
    [Endian::Little, Endian::Big]
        .into_iter()
        .find(|&endian| endian_name(endian) == s)
}
