//! [`WindowManager`] implementation backed by the `aerospace` CLI.
//!
//! AeroSpace picks up edits to `aerospace.toml` only after
//! `aerospace reload-config`.  The binary is looked up on `PATH` the first
//! time a reload is requested, so commands that never reload (dry runs,
//! `--no-reload`) work on machines without AeroSpace installed.

use crate::traits::WindowManager;
use log::debug;
use std::path::{Path, PathBuf};
use std::process::Command;

const BINARY_NAME: &str = "aerospace";

/// Errors that can occur when talking to AeroSpace.
#[derive(Debug, thiserror::Error)]
pub enum AerospaceError {
    #[error("aerospace binary not found in PATH")]
    NotFound,
    #[error("failed to run {path}: {source}")]
    Spawn {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("aerospace reload-config failed: {0}")]
    ReloadFailed(String),
}

/// Handle on the `aerospace` command-line client.
#[derive(Debug, Clone, Default)]
pub struct AerospaceCli {
    binary: Option<PathBuf>,
}

impl AerospaceCli {
    /// Create a handle that searches `PATH` on first use.
    pub fn new() -> Self {
        Self { binary: None }
    }

    /// Create a handle that always runs `binary`.
    pub fn with_binary(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: Some(binary.into()),
        }
    }

    fn resolve_binary(&self) -> Result<PathBuf, AerospaceError> {
        if let Some(binary) = &self.binary {
            return Ok(binary.clone());
        }
        let path_var = std::env::var_os("PATH").ok_or(AerospaceError::NotFound)?;
        search_executable_in_paths(std::env::split_paths(&path_var))
            .ok_or(AerospaceError::NotFound)
    }
}

//  WindowManager implementation

impl WindowManager for AerospaceCli {
    type Error = AerospaceError;

    fn reload_config(&self) -> Result<(), AerospaceError> {
        let binary = self.resolve_binary()?;
        debug!("running {} reload-config", binary.display());

        let output = Command::new(&binary)
            .arg("reload-config")
            .output()
            .map_err(|e| AerospaceError::Spawn {
                path: binary.clone(),
                source: e,
            })?;

        if output.status.success() {
            return Ok(());
        }
        Err(AerospaceError::ReloadFailed(failure_message(
            &String::from_utf8_lossy(&output.stderr),
            &String::from_utf8_lossy(&output.stdout),
            output.status.code(),
        )))
    }
}

/// The most useful description of a failed run: stderr, else stdout, else
/// the exit code.
fn failure_message(stderr: &str, stdout: &str, code: Option<i32>) -> String {
    let stderr = stderr.trim();
    if !stderr.is_empty() {
        return stderr.to_string();
    }
    let stdout = stdout.trim();
    if !stdout.is_empty() {
        return stdout.to_string();
    }
    match code {
        Some(code) => format!("exit code {code}"),
        None => "terminated by signal".to_string(),
    }
}

/// First `aerospace` in `dirs` that is an executable regular file.
fn search_executable_in_paths<I>(dirs: I) -> Option<PathBuf>
where
    I: IntoIterator<Item = PathBuf>,
{
    dirs.into_iter()
        .map(|dir| dir.join(BINARY_NAME))
        .find(|candidate| is_executable(candidate))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    std::fs::metadata(path)
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[cfg(unix)]
    fn make_executable(path: &Path) {
        use std::os::unix::fs::PermissionsExt;
        fs::write(path, b"").unwrap();
        let mut perms = fs::metadata(path).unwrap().permissions();
        perms.set_mode(0o755);
        fs::set_permissions(path, perms).unwrap();
    }

    /// A system binary that ignores its arguments, if one exists here.
    fn system_binary(name: &str) -> Option<PathBuf> {
        ["/usr/bin", "/bin"]
            .iter()
            .map(|dir| Path::new(dir).join(name))
            .find(|p| p.is_file())
    }

    #[test]
    fn search_returns_none_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let bin = dir.path().join("bin");
        fs::create_dir_all(&bin).unwrap();
        assert!(search_executable_in_paths(vec![bin]).is_none());
    }

    #[cfg(unix)]
    #[test]
    fn search_skips_non_executable() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("first");
        let second = dir.path().join("second");
        fs::create_dir_all(&first).unwrap();
        fs::create_dir_all(&second).unwrap();

        fs::write(first.join("aerospace"), b"").unwrap();
        make_executable(&second.join("aerospace"));

        assert_eq!(
            search_executable_in_paths(vec![first, second.clone()]),
            Some(second.join("aerospace"))
        );
    }

    #[test]
    fn directories_are_not_executable() {
        let dir = tempfile::tempdir().unwrap();
        let sub = dir.path().join("aerospace");
        fs::create_dir_all(&sub).unwrap();
        assert!(!is_executable(&sub));
        assert!(!is_executable(Path::new("/nonexistent/path/aerospace")));
    }

    #[test]
    fn failure_message_prefers_stderr_then_stdout() {
        assert_eq!(failure_message(" boom \n", "ignored", Some(1)), "boom");
        assert_eq!(failure_message("", "config invalid\n", Some(1)), "config invalid");
        assert_eq!(failure_message("  ", "", Some(3)), "exit code 3");
        assert_eq!(failure_message("", "", None), "terminated by signal");
    }

    #[test]
    fn reload_runs_injected_binary() {
        let Some(ok) = system_binary("true") else {
            return;
        };
        AerospaceCli::with_binary(ok).reload_config().unwrap();
    }

    #[test]
    fn reload_reports_exit_code() {
        let Some(fail) = system_binary("false") else {
            return;
        };
        let err = AerospaceCli::with_binary(fail).reload_config().unwrap_err();
        assert_eq!(err.to_string(), "aerospace reload-config failed: exit code 1");
    }

    #[test]
    fn missing_injected_binary_fails_to_spawn() {
        let err = AerospaceCli::with_binary("/nonexistent/aerospace")
            .reload_config()
            .unwrap_err();
        assert!(matches!(err, AerospaceError::Spawn { .. }));
    }
}
