//! Per-monitor workspace state.
//!
//! The state file remembers, for every monitor name, the last applied
//! percentage (`current`), a sticky fallback (`default`), and a horizontal
//! `shift`.  It is a small TOML document:
//!
//! ```toml
//! [monitors.main]
//! current = 50
//! default = 60
//! shift = 10
//!
//! [monitors."Dell U2722D"]
//! current = 80
//! default = 80
//! ```
//!
//! Two older layouts are still read and migrated to `main` on the next
//! save: a bare integer, and a single `[workspace]` table with
//! `current`/`default` keys.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::paths::write_atomic;

/// Percentage applied when no state has ever been recorded.
pub const INITIAL_PERCENTAGE: i64 = 60;

/// Monitor name that legacy single-monitor state is migrated to.
pub const LEGACY_MONITOR: &str = "main";

/// Persisted values for one monitor.  Every field may be unset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitorState {
    /// Last percentage applied to this monitor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current: Option<i64>,
    /// Fallback used when no explicit or current percentage exists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<i64>,
    /// Horizontal shift in percentage points; unset means centered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shift: Option<i64>,
}

/// Errors from reading or writing the state file.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("failed to read state file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file exists but matches neither the current nor a legacy layout.
    #[error("unrecognized state file format in {path}: {reason}")]
    UnrecognizedFormat { path: PathBuf, reason: String },

    #[error("failed to encode state: {0}")]
    Encode(#[from] toml::ser::Error),

    #[error("failed to write state file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// On-disk layout of the current format.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StateFile {
    #[serde(default)]
    monitors: BTreeMap<String, MonitorState>,
}

/// The pre-multi-monitor `[workspace]` table.
#[derive(Debug, Deserialize)]
struct LegacyStateFile {
    workspace: LegacyWorkspace,
}

#[derive(Debug, Deserialize)]
struct LegacyWorkspace {
    current: Option<i64>,
    default: Option<i64>,
}

/// Result of parsing state file contents.
#[derive(Debug, PartialEq)]
struct Parsed {
    monitors: BTreeMap<String, MonitorState>,
    migrated: bool,
}

fn legacy_monitors(current: Option<i64>, default: Option<i64>) -> BTreeMap<String, MonitorState> {
    let mut monitors = BTreeMap::new();
    monitors.insert(
        LEGACY_MONITOR.to_string(),
        MonitorState {
            current,
            default,
            shift: None,
        },
    );
    monitors
}

/// Parse state file contents, accepting the current and legacy layouts.
fn parse_contents(contents: &str) -> Result<Parsed, String> {
    let trimmed = contents.trim();
    if trimmed.is_empty() {
        return Ok(Parsed {
            monitors: BTreeMap::new(),
            migrated: false,
        });
    }

    if let Ok(value) = trimmed.parse::<i64>() {
        return Ok(Parsed {
            monitors: legacy_monitors(Some(value), Some(value)),
            migrated: true,
        });
    }

    let table: toml::Table = toml::from_str(trimmed).map_err(|e| e.to_string())?;

    if table.contains_key("monitors") {
        let file: StateFile = toml::from_str(trimmed).map_err(|e| e.to_string())?;
        if file.monitors.is_empty() {
            return Err("[monitors] table has no entries".to_string());
        }
        return Ok(Parsed {
            monitors: file.monitors,
            migrated: false,
        });
    }

    if table.contains_key("workspace") {
        let legacy: LegacyStateFile = toml::from_str(trimmed).map_err(|e| e.to_string())?;
        return Ok(Parsed {
            monitors: legacy_monitors(legacy.workspace.current, legacy.workspace.default),
            migrated: true,
        });
    }

    Err("expected a [monitors] table".to_string())
}

/// In-memory view of the state file.
///
/// Mutations only touch memory; [`save`](WorkspaceState::save) persists the
/// whole map in one atomic write.
#[derive(Debug, Clone)]
pub struct WorkspaceState {
    path: PathBuf,
    monitors: BTreeMap<String, MonitorState>,
    migrated: bool,
}

impl WorkspaceState {
    /// An empty store that will be saved to `path`.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            monitors: BTreeMap::new(),
            migrated: false,
        }
    }

    /// Load the store from `path`.  A missing file is an empty store.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StateError> {
        let path = path.as_ref();
        let contents = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::new(path)),
            Err(e) => {
                return Err(StateError::Read {
                    path: path.to_path_buf(),
                    source: e,
                })
            }
        };

        let parsed = parse_contents(&contents).map_err(|reason| StateError::UnrecognizedFormat {
            path: path.to_path_buf(),
            reason,
        })?;

        Ok(Self {
            path: path.to_path_buf(),
            monitors: parsed.monitors,
            migrated: parsed.migrated,
        })
    }

    /// Path the store is loaded from and saved to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the contents were read from a legacy layout.
    pub fn migrated(&self) -> bool {
        self.migrated
    }

    /// Whether no monitor has any record at all.
    pub fn is_empty(&self) -> bool {
        self.monitors.is_empty()
    }

    /// All monitor records, sorted by name.
    pub fn monitors(&self) -> &BTreeMap<String, MonitorState> {
        &self.monitors
    }

    /// The record for `name`, zero-valued if there is none.
    pub fn monitor_state(&self, name: &str) -> MonitorState {
        self.monitors.get(name).copied().unwrap_or_default()
    }

    fn monitor_mut(&mut self, name: &str) -> &mut MonitorState {
        self.monitors.entry(name.to_string()).or_default()
    }

    /// Pick the percentage to apply to `name`.
    ///
    /// Order: `explicit`, then [`INITIAL_PERCENTAGE`] if the store has no
    /// records at all, then the monitor's `current`, then its `default`.
    /// Returns `None` when an established store knows nothing about `name`.
    pub fn resolve_percentage(&self, name: &str, explicit: Option<i64>) -> Option<i64> {
        if let Some(p) = explicit {
            return Some(p);
        }
        if self.is_empty() {
            return Some(INITIAL_PERCENTAGE);
        }
        let record = self.monitors.get(name)?;
        if let Some(current) = record.current {
            return Some(current);
        }
        record.default
    }

    /// Record `percentage` as the monitor's current value.
    ///
    /// `default` is overwritten when `also_set_default` is set, and filled in
    /// when it was previously unset.
    pub fn update_current(&mut self, name: &str, percentage: i64, also_set_default: bool) {
        let record = self.monitor_mut(name);
        record.current = Some(percentage);
        if also_set_default || record.default.is_none() {
            record.default = Some(percentage);
        }
    }

    /// Current shift for `name`; 0 when unset.
    pub fn shift(&self, name: &str) -> i64 {
        self.monitors
            .get(name)
            .and_then(|m| m.shift)
            .unwrap_or(0)
    }

    /// Set the shift for `name`.  A zero shift is stored as unset.
    pub fn set_shift(&mut self, name: &str, shift: i64) {
        self.monitor_mut(name).shift = (shift != 0).then_some(shift);
    }

    /// Serialise the store in the current layout.
    pub fn to_toml(&self) -> Result<String, StateError> {
        let file = StateFile {
            monitors: self.monitors.clone(),
        };
        Ok(toml::to_string(&file)?)
    }

    /// Atomically write the store to its path.
    pub fn save(&mut self) -> Result<(), StateError> {
        let contents = self.to_toml()?;
        write_atomic(&self.path, &contents).map_err(|e| StateError::Write {
            path: self.path.clone(),
            source: e,
        })?;
        self.migrated = false;
        Ok(())
    }
}

//  Tests
