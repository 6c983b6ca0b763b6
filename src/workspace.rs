//! The orchestrator that ties gap math, the state file, the AeroSpace config
//! and the window manager together.
//!
//! [`WorkspaceSizer`] implements the `workspace` subcommands.  Each
//! operation follows the same order: resolve and validate every input,
//! stop there on a dry run, write the config, write the state, then reload.
//! Nothing is written unless every validation passed.

use crate::config::{AerospaceConfig, ConfigError, GapSummary};
use crate::display::{resolve_monitor_width, MonitorWidthError};
use crate::gaps::{
    calculate_gap_size, calculate_shifted_gaps, validate_percentage, validate_shift, GapError,
    ShiftedGaps,
};
use crate::state::{MonitorState, StateError, WorkspaceState};
use crate::traits::{DisplaySource, WindowManager};
use log::{debug, info, warn};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Possible errors from the workspace operations.
#[derive(Debug, thiserror::Error)]
pub enum WorkspaceError {
    #[error("no percentage specified and no current/default set for monitor {0:?}")]
    NoResolvablePercentage(String),

    #[error("no current percentage set for monitor {0:?}; use 'workspace use' first")]
    NoCurrentPercentage(String),

    #[error("adjusted percentage {percentage} is invalid: {source}")]
    InvalidAdjustment {
        percentage: i64,
        #[source]
        source: GapError,
    },

    #[error(
        "config file not found: {}\nCreate it manually or run 'aerospace' to generate a default config",
        .0.display()
    )]
    ConfigNotFound(PathBuf),

    #[error(transparent)]
    Gap(#[from] GapError),

    #[error(transparent)]
    MonitorWidth(#[from] MonitorWidthError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    State(#[from] StateError),
}

/// Everything the operations need to know besides their own arguments.
#[derive(Debug, Clone)]
pub struct SizerOptions {
    pub config_path: PathBuf,
    pub state_path: PathBuf,
    /// Monitor name as used in the config and state file.
    pub monitor: String,
    /// Width override; skips display detection when set.
    pub monitor_width: Option<i64>,
    /// Run `aerospace reload-config` after writing.
    pub reload: bool,
    /// Compute and report without writing anything.
    pub dry_run: bool,
}

/// Outer gaps written for a monitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GapLayout {
    /// Same gap on both sides, in pixels.
    Symmetric(i64),
    /// Different left and right gaps.
    Shifted(ShiftedGaps),
}

/// What happened to the window manager after a write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReloadStatus {
    Reloaded,
    /// Reload disabled, or nothing was written.
    Skipped,
    /// The reload failed; the files were still written.
    Failed(String),
}

/// An `adjust` step: the percentage before and the requested delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Adjustment {
    pub from: i64,
    pub by: i64,
}

/// Result of `use`, `adjust` and `shift`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Applied {
    pub monitor: String,
    pub percentage: i64,
    pub layout: GapLayout,
    /// Shift requested by the `shift` operation.
    pub shifted: Option<i64>,
    /// A stored shift no longer fit and was reset to center.
    pub shift_reset: bool,
    pub set_default: bool,
    pub dry_run: bool,
    pub reload: ReloadStatus,
    pub adjusted_from: Option<Adjustment>,
}

/// One half of a [`CurrentReport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportSection<T> {
    Loaded(T),
    Missing,
    Error(String),
}

/// Config and state as shown by `workspace current`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentReport {
    pub config_path: PathBuf,
    pub config: ReportSection<GapSummary>,
    pub state_path: PathBuf,
    pub state: ReportSection<BTreeMap<String, MonitorState>>,
}

/// Runs the workspace operations against one monitor.
///
/// Generic over the [`DisplaySource`] used for width detection and the
/// [`WindowManager`] that is asked to reload, so tests can swap in doubles
/// for both.
pub struct WorkspaceSizer<D: DisplaySource, W: WindowManager> {
    options: SizerOptions,
    displays: D,
    wm: W,
}

impl<D: DisplaySource, W: WindowManager> WorkspaceSizer<D, W> {
    pub fn new(options: SizerOptions, displays: D, wm: W) -> Self {
        Self {
            options,
            displays,
            wm,
        }
    }

    pub fn options(&self) -> &SizerOptions {
        &self.options
    }

    /// Apply `explicit`, or the remembered percentage, to the monitor.
    ///
    /// A stored shift is kept when it still fits the new percentage and is
    /// reset to center otherwise.
    pub fn use_percentage(
        &self,
        explicit: Option<i64>,
        set_default: bool,
    ) -> Result<Applied, WorkspaceError> {
        let state = self.load_state()?;
        self.apply(state, explicit, set_default)
    }

    /// Change the monitor's current percentage by `by` points.
    pub fn adjust(&self, by: i64) -> Result<Applied, WorkspaceError> {
        let state = self.load_state()?;
        let from = self.current_percentage(&state)?;
        let percentage = from.saturating_add(by);
        validate_percentage(percentage)
            .map_err(|source| WorkspaceError::InvalidAdjustment { percentage, source })?;
        info!(
            "adjusting {} from {}% by {} to {}%",
            self.options.monitor, from, by, percentage
        );

        let mut applied = self.apply(state, Some(percentage), false)?;
        applied.adjusted_from = Some(Adjustment { from, by });
        Ok(applied)
    }

    /// Move the workspace `by` percentage points of the monitor width.
    ///
    /// Positive values move right, negative left, zero re-centers.  The
    /// current percentage is kept.
    pub fn shift(&self, by: i64) -> Result<Applied, WorkspaceError> {
        let monitor = self.options.monitor.as_str();
        let mut state = self.load_state()?;
        let percentage = self.current_percentage(&state)?;
        validate_percentage(percentage)?;
        let width = self.monitor_width()?;
        validate_shift(width, percentage, by)?;

        let gaps = calculate_shifted_gaps(width, percentage, by);
        debug!("shifted gaps for {monitor}: {gaps:?}");

        let mut applied = Applied {
            monitor: monitor.to_string(),
            percentage,
            layout: GapLayout::Shifted(gaps),
            shifted: Some(by),
            shift_reset: false,
            set_default: false,
            dry_run: self.options.dry_run,
            reload: ReloadStatus::Skipped,
            adjusted_from: None,
        };
        if self.options.dry_run {
            return Ok(applied);
        }

        self.write_config(&applied.layout)?;
        state.set_shift(monitor, by);
        state.save()?;

        applied.reload = self.reload();
        Ok(applied)
    }

    /// Summarise the config and state files.  Never fails; problems with
    /// either file are reported in its section.
    pub fn current(&self) -> CurrentReport {
        let config_path = self.options.config_path.clone();
        let config = if !config_path.exists() {
            ReportSection::Missing
        } else {
            match AerospaceConfig::load(&config_path) {
                Ok(cfg) => ReportSection::Loaded(cfg.summary()),
                Err(e) => ReportSection::Error(e.to_string()),
            }
        };

        let state_path = self.options.state_path.clone();
        let state = if !state_path.exists() {
            ReportSection::Missing
        } else {
            match WorkspaceState::load(&state_path) {
                Ok(s) => ReportSection::Loaded(s.monitors().clone()),
                Err(e) => ReportSection::Error(e.to_string()),
            }
        };

        CurrentReport {
            config_path,
            config,
            state_path,
            state,
        }
    }

    //  Helpers

    fn load_state(&self) -> Result<WorkspaceState, WorkspaceError> {
        let path = &self.options.state_path;
        debug!("state file: {}", path.display());
        let state = WorkspaceState::load(path)?;
        if state.migrated() {
            info!("legacy state in {} will be migrated on save", path.display());
        }
        Ok(state)
    }

    fn current_percentage(&self, state: &WorkspaceState) -> Result<i64, WorkspaceError> {
        let monitor = &self.options.monitor;
        state
            .monitor_state(monitor)
            .current
            .ok_or_else(|| WorkspaceError::NoCurrentPercentage(monitor.clone()))
    }

    fn monitor_width(&self) -> Result<i64, WorkspaceError> {
        let width = resolve_monitor_width(
            &self.displays,
            &self.options.monitor,
            self.options.monitor_width,
        )?;
        debug!("monitor {} is {}px wide", self.options.monitor, width);
        Ok(width)
    }

    fn apply(
        &self,
        mut state: WorkspaceState,
        explicit: Option<i64>,
        set_default: bool,
    ) -> Result<Applied, WorkspaceError> {
        let monitor = self.options.monitor.as_str();
        let percentage = state
            .resolve_percentage(monitor, explicit)
            .ok_or_else(|| WorkspaceError::NoResolvablePercentage(monitor.to_string()))?;
        validate_percentage(percentage)?;
        let width = self.monitor_width()?;

        let stored_shift = state.shift(monitor);
        let (layout, shift_reset) = if stored_shift == 0 {
            (GapLayout::Symmetric(calculate_gap_size(width, percentage)), false)
        } else if validate_shift(width, percentage, stored_shift).is_ok() {
            let gaps = calculate_shifted_gaps(width, percentage, stored_shift);
            (GapLayout::Shifted(gaps), false)
        } else {
            debug!("stored shift {stored_shift} no longer fits {percentage}%, resetting");
            (GapLayout::Symmetric(calculate_gap_size(width, percentage)), true)
        };
        debug!("gaps for {monitor} at {percentage}%: {layout:?}");

        let mut applied = Applied {
            monitor: monitor.to_string(),
            percentage,
            layout,
            shifted: None,
            shift_reset,
            set_default,
            dry_run: self.options.dry_run,
            reload: ReloadStatus::Skipped,
            adjusted_from: None,
        };
        if self.options.dry_run {
            return Ok(applied);
        }

        self.write_config(&layout)?;
        state.update_current(monitor, percentage, set_default);
        if shift_reset {
            state.set_shift(monitor, 0);
        }
        state.save()?;

        applied.reload = self.reload();
        Ok(applied)
    }

    fn write_config(&self, layout: &GapLayout) -> Result<(), WorkspaceError> {
        let path: &Path = &self.options.config_path;
        if !path.exists() {
            return Err(WorkspaceError::ConfigNotFound(path.to_path_buf()));
        }
        debug!("config file: {}", path.display());

        let mut config = AerospaceConfig::load(path)?;
        let monitor = &self.options.monitor;
        match layout {
            GapLayout::Symmetric(gap) => config.set_monitor_gaps(monitor, *gap)?,
            GapLayout::Shifted(gaps) => config.set_monitor_asymmetric_gaps(
                monitor,
                gaps.left_gap_pixels,
                gaps.right_gap_pixels,
            )?,
        }
        config.write()?;
        Ok(())
    }

    fn reload(&self) -> ReloadStatus {
        if !self.options.reload {
            return ReloadStatus::Skipped;
        }
        match self.wm.reload_config() {
            Ok(()) => {
                info!("aerospace config reloaded");
                ReloadStatus::Reloaded
            }
            Err(e) => {
                warn!("aerospace reload failed: {e}");
                ReloadStatus::Failed(e.to_string())
            }
        }
    }
}

//  Tests
