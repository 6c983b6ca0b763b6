//! File locations and atomic writes shared by the config and state files.

use std::io::Write;
use std::path::{Path, PathBuf};

/// File name of the AeroSpace configuration.
pub const CONFIG_FILE_NAME: &str = "aerospace.toml";

/// File name of the per-monitor workspace state.
pub const STATE_FILE_NAME: &str = "aerospace-utils-state.toml";

/// Resolve the AeroSpace config directory
/// (`$XDG_CONFIG_HOME/aerospace`, else `~/.config/aerospace`).
pub fn config_dir() -> PathBuf {
    let base = std::env::var_os("XDG_CONFIG_HOME")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| home_dir().join(".config"));
    base.join("aerospace")
}

fn home_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}

/// `explicit` with `~/` expanded, or `config_dir()/aerospace.toml`.
pub fn resolve_config_path(explicit: Option<&Path>) -> PathBuf {
    match explicit {
        Some(path) => expand_tilde(path),
        None => config_dir().join(CONFIG_FILE_NAME),
    }
}

/// `explicit` with `~/` expanded, or `config_dir()/aerospace-utils-state.toml`.
pub fn resolve_state_path(explicit: Option<&Path>) -> PathBuf {
    match explicit {
        Some(path) => expand_tilde(path),
        None => config_dir().join(STATE_FILE_NAME),
    }
}

/// Expand a leading `~` or `~/` to the home directory.
///
/// Paths such as `~user/x` are returned unchanged.
pub fn expand_tilde(path: &Path) -> PathBuf {
    let Some(text) = path.to_str() else {
        return path.to_path_buf();
    };
    if text == "~" {
        return home_dir();
    }
    match text.strip_prefix("~/") {
        Some(rest) => home_dir().join(rest),
        None => path.to_path_buf(),
    }
}

/// Write `contents` to `path` so readers see either the old or the new file.
///
/// The data goes to a temporary file in the same directory which is then
/// renamed over `path`.  Missing parent directories are created.
pub fn write_atomic(path: &Path, contents: &str) -> std::io::Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent)?;

    let mut temp = tempfile::NamedTempFile::new_in(parent)?;
    temp.write_all(contents.as_bytes())?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
