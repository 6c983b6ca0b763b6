//! Format-preserving access to `aerospace.toml`.
//!
//! Workspace width is expressed through the per-monitor outer gaps:
//!
//! ```toml
//! [gaps]
//! inner.horizontal = 20
//! inner.vertical = 20
//! outer.left  = [{ monitor.main = 300 }, { monitor."Dell U2722D" = 120 }, 24]
//! outer.right = [{ monitor.main = 300 }, { monitor."Dell U2722D" = 120 }, 24]
//! outer.top = 10
//! outer.bottom = 10
//! ```
//!
//! Only the integers inside `monitor` inline tables of `gaps.outer.left` and
//! `gaps.outer.right` are ever rewritten.  The document is held as a
//! [`toml_edit::DocumentMut`], so comments, ordering and spacing elsewhere
//! survive a round trip untouched.

use crate::paths::write_atomic;
use log::debug;
use std::path::{Path, PathBuf};
use toml_edit::{DocumentMut, InlineTable, Item, Value};

/// Errors from reading, patching or writing `aerospace.toml`.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml_edit::TomlError,
    },

    /// No `monitor` entry for this name under `gaps.outer.left`/`right`.
    #[error("monitor {monitor:?} not found in gaps.outer.left/right (configured: {configured})")]
    MonitorNotFound { monitor: String, configured: String },

    #[error("failed to write config {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// One `monitor.<name> = <gap>` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorGap {
    pub name: String,
    pub value: i64,
}

/// The gap settings shown by `workspace current`.
///
/// Scalar fields hold either a plain integer or, for per-monitor arrays,
/// the trailing scalar default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GapSummary {
    pub inner_horizontal: Option<i64>,
    pub inner_vertical: Option<i64>,
    pub outer_top: Option<i64>,
    pub outer_bottom: Option<i64>,
    pub left_gaps: Vec<MonitorGap>,
    pub right_gaps: Vec<MonitorGap>,
}

#[derive(Debug, Clone, Copy)]
enum Side {
    Left,
    Right,
}

impl Side {
    fn key(self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

/// A loaded `aerospace.toml`.
#[derive(Debug, Clone)]
pub struct AerospaceConfig {
    path: PathBuf,
    document: DocumentMut,
}

impl AerospaceConfig {
    /// Read and parse the config at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(path, &contents)
    }

    fn parse(path: &Path, contents: &str) -> Result<Self, ConfigError> {
        let document = contents
            .parse::<DocumentMut>()
            .map_err(|e| ConfigError::Parse {
                path: path.to_path_buf(),
                source: e,
            })?;
        Ok(Self {
            path: path.to_path_buf(),
            document,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Collect the gap settings.  Missing tables yield empty values.
    pub fn summary(&self) -> GapSummary {
        let gaps = self.document.get("gaps");
        let inner = gaps.and_then(|g| g.get("inner"));
        let outer = gaps.and_then(|g| g.get("outer"));

        GapSummary {
            inner_horizontal: inner.and_then(|i| i.get("horizontal")).and_then(scalar_gap),
            inner_vertical: inner.and_then(|i| i.get("vertical")).and_then(scalar_gap),
            outer_top: outer.and_then(|o| o.get("top")).and_then(scalar_gap),
            outer_bottom: outer.and_then(|o| o.get("bottom")).and_then(scalar_gap),
            left_gaps: outer
                .and_then(|o| o.get(Side::Left.key()))
                .map(monitor_gaps)
                .unwrap_or_default(),
            right_gaps: outer
                .and_then(|o| o.get(Side::Right.key()))
                .map(monitor_gaps)
                .unwrap_or_default(),
        }
    }

    /// Distinct monitor names with an outer gap entry, in file order.
    pub fn monitor_names(&self) -> Vec<String> {
        let summary = self.summary();
        let mut names: Vec<String> = Vec::new();
        for gap in summary.left_gaps.iter().chain(&summary.right_gaps) {
            if !names.contains(&gap.name) {
                names.push(gap.name.clone());
            }
        }
        names
    }

    /// Set both outer gaps of `monitor` to `gap`.
    ///
    /// Succeeds when at least one side has an entry for the monitor.
    pub fn set_monitor_gaps(&mut self, monitor: &str, gap: i64) -> Result<(), ConfigError> {
        let left = self.update_side(Side::Left, monitor, gap);
        let right = self.update_side(Side::Right, monitor, gap);
        if !left && !right {
            return Err(self.monitor_not_found(monitor));
        }
        debug!("set {monitor} outer gaps to {gap}px (left: {left}, right: {right})");
        Ok(())
    }

    /// Set the left and right outer gaps of `monitor` independently.
    ///
    /// Both sides must have an entry for the monitor.
    pub fn set_monitor_asymmetric_gaps(
        &mut self,
        monitor: &str,
        left: i64,
        right: i64,
    ) -> Result<(), ConfigError> {
        let left_found = self.update_side(Side::Left, monitor, left);
        let right_found = self.update_side(Side::Right, monitor, right);
        if !left_found || !right_found {
            return Err(self.monitor_not_found(monitor));
        }
        debug!("set {monitor} outer gaps to left {left}px, right {right}px");
        Ok(())
    }

    /// Atomically replace the file with the (possibly patched) document.
    pub fn write(&self) -> Result<(), ConfigError> {
        write_atomic(&self.path, &self.document.to_string()).map_err(|e| ConfigError::Write {
            path: self.path.clone(),
            source: e,
        })
    }

    fn monitor_not_found(&self, monitor: &str) -> ConfigError {
        let names = self.monitor_names();
        ConfigError::MonitorNotFound {
            monitor: monitor.to_string(),
            configured: if names.is_empty() {
                "none".to_string()
            } else {
                names.join(", ")
            },
        }
    }

    /// Rewrite every matching entry on one side; returns whether any matched.
    fn update_side(&mut self, side: Side, monitor: &str, gap: i64) -> bool {
        let Some(array) = self
            .document
            .get_mut("gaps")
            .and_then(|g| g.get_mut("outer"))
            .and_then(|o| o.get_mut(side.key()))
            .and_then(Item::as_array_mut)
        else {
            return false;
        };

        let mut updated = false;
        for entry in array.iter_mut() {
            let Some(monitors) = entry
                .as_inline_table_mut()
                .and_then(|t| t.get_mut("monitor"))
                .and_then(Value::as_inline_table_mut)
            else {
                continue;
            };
            updated |= update_entry(monitors, monitor, gap);
        }
        updated
    }
}

fn update_entry(monitors: &mut InlineTable, monitor: &str, gap: i64) -> bool {
    let mut updated = false;
    for (key, value) in monitors.iter_mut() {
        if key.get().eq_ignore_ascii_case(monitor) {
            replace_keeping_decor(value, gap);
            updated = true;
        }
    }
    updated
}

fn replace_keeping_decor(slot: &mut Value, gap: i64) {
    let decor = slot.decor().clone();
    *slot = Value::from(gap);
    *slot.decor_mut() = decor;
}

/// An integer, or the last integer in a per-monitor array.
fn scalar_gap(item: &Item) -> Option<i64> {
    match item.as_value()? {
        Value::Integer(i) => Some(*i.value()),
        Value::Array(array) => array.iter().filter_map(Value::as_integer).last(),
        _ => None,
    }
}

fn monitor_gaps(item: &Item) -> Vec<MonitorGap> {
    let Some(array) = item.as_array() else {
        return Vec::new();
    };
    array
        .iter()
        .filter_map(|entry| entry.as_inline_table()?.get("monitor")?.as_inline_table())
        .flat_map(|monitors| {
            monitors.iter().filter_map(|(name, value)| {
                Some(MonitorGap {
                    name: name.to_string(),
                    value: value.as_integer()?,
                })
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const MULTI_MONITOR: &str = r#"# Managed by hand; gaps patched by aerospace-utils.
start-at-login = true

[gaps]
inner.horizontal = 12
inner.vertical = 14
# per-monitor side gaps
outer.left  = [{ monitor.main = 300 }, { monitor."DeskPad Display" = 0 }, 24]
outer.right = [{ monitor.main = 300 }, { monitor."DeskPad Display" = 0 }, 24]
outer.top = [{ monitor.main = 8 }, 10]
outer.bottom = 6

[mode.main.binding]
alt-h = 'focus left'
"#;

    fn config(contents: &str) -> AerospaceConfig {
        AerospaceConfig::parse(Path::new("/unused/aerospace.toml"), contents).unwrap()
    }

    fn gap(name: &str, value: i64) -> MonitorGap {
        MonitorGap {
            name: name.into(),
            value,
        }
    }

    #[test]
    fn summary_reads_all_gaps() {
        let summary = config(MULTI_MONITOR).summary();
        assert_eq!(
            summary,
            GapSummary {
                inner_horizontal: Some(12),
                inner_vertical: Some(14),
                outer_top: Some(10),
                outer_bottom: Some(6),
                left_gaps: vec![gap("main", 300), gap("DeskPad Display", 0)],
                right_gaps: vec![gap("main", 300), gap("DeskPad Display", 0)],
            }
        );
    }

    #[test]
    fn summary_takes_last_integer_of_array() {
        let summary = config("[gaps]\ninner.horizontal = [4, { monitor.main = 2 }, 9]\n").summary();
        assert_eq!(summary.inner_horizontal, Some(9));
        assert_eq!(summary.inner_vertical, None);
    }

    #[test]
    fn summary_reads_nested_monitor_tables() {
        let summary = config(
            r#"
[gaps]
outer.left  = [{ monitor = { main = 250, "Studio Display" = 40 } }, 24]
outer.right = [{ monitor.main = 300 }, 24]
"#,
        )
        .summary();
        assert_eq!(summary.left_gaps, vec![gap("main", 250), gap("Studio Display", 40)]);
        assert_eq!(summary.right_gaps, vec![gap("main", 300)]);
        assert_eq!(summary.inner_horizontal, None);
    }

    #[test]
    fn summary_without_gaps_is_empty() {
        assert_eq!(config("start-at-login = true\n").summary(), GapSummary::default());
    }

    #[test]
    fn monitor_names_are_distinct() {
        assert_eq!(
            config(MULTI_MONITOR).monitor_names(),
            vec!["main".to_string(), "DeskPad Display".to_string()]
        );
    }

    #[test]
    fn set_gaps_touches_only_the_monitor() {
        let mut cfg = config(MULTI_MONITOR);
        cfg.set_monitor_gaps("main", 111).unwrap();

        let summary = cfg.summary();
        assert_eq!(summary.left_gaps, vec![gap("main", 111), gap("DeskPad Display", 0)]);
        assert_eq!(summary.right_gaps, vec![gap("main", 111), gap("DeskPad Display", 0)]);
        // Per-monitor top gap is a different key and stays put.
        assert_eq!(summary.outer_top, Some(10));

        let text = cfg.document.to_string();
        assert_eq!(text.matches("monitor.main = 111").count(), 2);
        assert!(text.contains("monitor.main = 8"));
    }

    #[test]
    fn set_gaps_preserves_everything_else() {
        let mut cfg = config(MULTI_MONITOR);
        cfg.set_monitor_gaps("main", 300).unwrap();
        // Same value written back: byte-identical document.
        assert_eq!(cfg.document.to_string(), MULTI_MONITOR);
    }

    #[test]
    fn monitor_match_ignores_ascii_case() {
        let mut cfg = config(MULTI_MONITOR);
        cfg.set_monitor_gaps("deskpad display", 42).unwrap();
        let summary = cfg.summary();
        assert_eq!(summary.left_gaps[1], gap("DeskPad Display", 42));
        assert_eq!(summary.right_gaps[1], gap("DeskPad Display", 42));
    }

    #[test]
    fn set_gaps_accepts_single_side() {
        let mut cfg = config(
            r#"
[gaps]
outer.left  = [{ monitor.main = 300 }, 24]
outer.right = 24
"#,
        );
        cfg.set_monitor_gaps("main", 200).unwrap();
        assert_eq!(cfg.summary().left_gaps, vec![gap("main", 200)]);
    }

    #[test]
    fn asymmetric_gaps_need_both_sides() {
        let mut cfg = config(
            r#"
[gaps]
outer.left  = [{ monitor.main = 300 }, 24]
outer.right = 24
"#,
        );
        let err = cfg.set_monitor_asymmetric_gaps("main", 400, 200).unwrap_err();
        assert!(matches!(err, ConfigError::MonitorNotFound { .. }));
    }

    #[test]
    fn asymmetric_gaps_write_each_side() {
        let mut cfg = config(MULTI_MONITOR);
        cfg.set_monitor_asymmetric_gaps("main", 672, 288).unwrap();
        let summary = cfg.summary();
        assert_eq!(summary.left_gaps[0], gap("main", 672));
        assert_eq!(summary.right_gaps[0], gap("main", 288));
    }

    #[test]
    fn unknown_monitor_lists_configured_names() {
        let mut cfg = config(MULTI_MONITOR);
        let err = cfg.set_monitor_gaps("LG UltraFine", 10).unwrap_err();
        assert_eq!(
            err.to_string(),
            "monitor \"LG UltraFine\" not found in gaps.outer.left/right \
             (configured: main, DeskPad Display)"
        );
    }

    #[test]
    fn missing_gaps_table_is_monitor_not_found() {
        let mut cfg = config("start-at-login = true\n");
        let err = cfg.set_monitor_gaps("main", 10).unwrap_err();
        assert!(err.to_string().contains("(configured: none)"));
    }

    #[test]
    fn write_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("aerospace.toml");
        std::fs::write(&path, MULTI_MONITOR).unwrap();

        let mut cfg = AerospaceConfig::load(&path).unwrap();
        cfg.set_monitor_gaps("main", 480).unwrap();
        cfg.write().unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("# Managed by hand"));
        assert!(text.contains("alt-h = 'focus left'"));
        let reloaded = AerospaceConfig::load(&path).unwrap();
        assert_eq!(reloaded.summary().left_gaps[0], gap("main", 480));
    }

    #[test]
    fn load_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("aerospace.toml");
        std::fs::write(&path, "[gaps\n").unwrap();
        assert!(matches!(
            AerospaceConfig::load(&path),
            Err(ConfigError::Parse { .. })
        ));
    }
}
