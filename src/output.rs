//! User-facing rendering of operation results.
//!
//! Everything the binary prints on success goes through the [`Display`](std::fmt::Display)
//! impls here, so the wording is tested in one place.

use crate::config::{GapSummary, MonitorGap};
use crate::state::MonitorState;
use crate::workspace::{Applied, CurrentReport, GapLayout, ReloadStatus, ReportSection};
use std::collections::BTreeMap;
use std::fmt;

impl fmt::Display for GapLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GapLayout::Symmetric(gap) => write!(f, "({gap}px gaps)"),
            GapLayout::Shifted(g) => write!(
                f,
                "(left: {}px ({}%), right: {}px ({}%))",
                g.left_gap_pixels, g.left_gap_percent, g.right_gap_pixels, g.right_gap_percent
            ),
        }
    }
}

impl fmt::Display for ReloadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReloadStatus::Reloaded => f.write_str("(reloaded)"),
            ReloadStatus::Skipped => f.write_str("(reload skipped)"),
            ReloadStatus::Failed(message) => write!(f, "(reload failed: {message})"),
        }
    }
}

/// Direction text for a shift, e.g. `10% right` or `centered`.
fn shift_direction(shift: i64) -> String {
    match shift {
        0 => "centered".to_string(),
        s if s > 0 => format!("{s}% right"),
        s => format!("{}% left", s.unsigned_abs()),
    }
}

impl fmt::Display for Applied {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(adj) = self.adjusted_from {
            writeln!(
                f,
                "Adjusting {} from {}% by {} to {}%.",
                self.monitor, adj.from, adj.by, self.percentage
            )?;
        }

        if self.dry_run {
            f.write_str("[dry-run] Would set ")?;
        } else {
            f.write_str("Set ")?;
        }
        write!(f, "{} to {}% {}", self.monitor, self.percentage, self.layout)?;

        if self.set_default {
            f.write_str(", set as default")?;
        }
        match self.shifted {
            Some(0) => f.write_str(" (centered)")?,
            Some(shift) => write!(f, " (shifted {})", shift_direction(shift))?,
            None => {}
        }
        if self.shift_reset {
            f.write_str(" (shift reset to center)")?;
        }
        if !self.dry_run {
            write!(f, " {}", self.reload)?;
        }
        Ok(())
    }
}

//  workspace current

fn gap_value(value: Option<i64>) -> String {
    value.map_or_else(|| "not set".to_string(), |v| v.to_string())
}

fn monitor_gaps(gaps: &[MonitorGap]) -> String {
    if gaps.is_empty() {
        return "not set".to_string();
    }
    gaps.iter()
        .map(|g| format!("{}={}", g.name, g.value))
        .collect::<Vec<_>>()
        .join(", ")
}

fn write_summary(f: &mut fmt::Formatter<'_>, summary: &GapSummary) -> fmt::Result {
    writeln!(f, "  Inner gap horizontal: {}", gap_value(summary.inner_horizontal))?;
    writeln!(f, "  Inner gap vertical: {}", gap_value(summary.inner_vertical))?;
    writeln!(f, "  Outer gap top: {}", gap_value(summary.outer_top))?;
    writeln!(f, "  Outer gap bottom: {}", gap_value(summary.outer_bottom))?;
    writeln!(f, "  Left gaps: {}", monitor_gaps(&summary.left_gaps))?;
    writeln!(f, "  Right gaps: {}", monitor_gaps(&summary.right_gaps))
}

fn percent(value: Option<i64>) -> String {
    value.map_or_else(|| "not set".to_string(), |v| format!("{v}%"))
}

fn write_monitors(
    f: &mut fmt::Formatter<'_>,
    monitors: &BTreeMap<String, MonitorState>,
) -> fmt::Result {
    if monitors.is_empty() {
        return writeln!(f, "  (no monitors recorded)");
    }
    for (name, state) in monitors {
        writeln!(
            f,
            "  {}: current {}, default {}, shift {}",
            name,
            percent(state.current),
            percent(state.default),
            shift_direction(state.shift.unwrap_or(0))
        )?;
    }
    Ok(())
}

impl fmt::Display for CurrentReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Config: {}", self.config_path.display())?;
        match &self.config {
            ReportSection::Loaded(summary) => write_summary(f, summary)?,
            ReportSection::Missing => writeln!(f, "  Config file not found.")?,
            ReportSection::Error(e) => writeln!(f, "  error: {e}")?,
        }

        writeln!(f, "State: {}", self.state_path.display())?;
        match &self.state {
            ReportSection::Loaded(monitors) => write_monitors(f, monitors),
            ReportSection::Missing => writeln!(f, "  State file not found."),
            ReportSection::Error(e) => writeln!(f, "  error: {e}"),
        }
    }
}
