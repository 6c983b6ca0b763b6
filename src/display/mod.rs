//! Display detection.
//!
//! Gap sizes depend on the monitor width, which is either given on the
//! command line or looked up through a [`DisplaySource`].  The platform
//! backends shell out to the system's own display report:
//!
//! * macOS: `system_profiler SPDisplaysDataType -json` ([`system_profiler`])
//! * Linux: `xrandr --query` ([`xrandr`])
//!
//! Both parsers are plain functions over the command output so they can be
//! exercised on any platform.

pub mod system_profiler;
pub mod xrandr;

use crate::traits::DisplaySource;
use log::debug;

/// Monitor name that selects the main (primary) display.
pub const MAIN_MONITOR: &str = "main";

/// A display as reported by the operating system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayInfo {
    /// Human-readable name (e.g. `"DELL U2722D"` or `"DP-1"`).
    pub name: String,
    /// Width in the units AeroSpace uses for gaps.
    pub width: i64,
    /// Whether this is the main / primary display.
    pub main: bool,
}

/// Errors from querying the operating system for displays.
#[derive(Debug, thiserror::Error)]
pub enum DisplayError {
    #[error("display detection not available on this platform")]
    Unavailable,
    #[error("failed to run {command}: {source}")]
    Spawn {
        command: &'static str,
        #[source]
        source: std::io::Error,
    },
    #[error("{command} failed: {message}")]
    CommandFailed {
        command: &'static str,
        message: String,
    },
    #[error("failed to parse {command} output: {message}")]
    Parse {
        command: &'static str,
        message: String,
    },
    #[error("no displays found via {0}")]
    NoDisplays(&'static str),
}

/// Errors from turning a monitor name into a width.
#[derive(Debug, thiserror::Error)]
pub enum MonitorWidthError {
    #[error("monitor width must be positive (got {0})")]
    InvalidOverride(i64),
    #[error("{0}\nHint: use --monitor-width to override detection.")]
    Detection(String),
    #[error("no main display found")]
    NoMainDisplay,
    #[error("monitor {name:?} not found; available: {available} (use --monitor-width to specify)")]
    NotFound { name: String, available: String },
}

/// The [`DisplaySource`] for the current platform.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemDisplays;

impl SystemDisplays {
    pub fn new() -> Self {
        Self
    }
}

impl DisplaySource for SystemDisplays {
    type Error = DisplayError;

    #[cfg(target_os = "macos")]
    fn displays(&self) -> Result<Vec<DisplayInfo>, DisplayError> {
        system_profiler::query()
    }

    #[cfg(target_os = "linux")]
    fn displays(&self) -> Result<Vec<DisplayInfo>, DisplayError> {
        xrandr::query()
    }

    #[cfg(not(any(target_os = "macos", target_os = "linux")))]
    fn displays(&self) -> Result<Vec<DisplayInfo>, DisplayError> {
        Err(DisplayError::Unavailable)
    }
}

/// Mark the first display as main when the backend reported none.
pub(crate) fn ensure_main(displays: &mut [DisplayInfo]) {
    if !displays.iter().any(|d| d.main) {
        if let Some(first) = displays.first_mut() {
            first.main = true;
        }
    }
}

/// Leading integer of a `"W x H ..."` or `"WxH+X+Y"` string.
pub(crate) fn leading_width(text: &str) -> Option<i64> {
    let head = text.trim().split('x').next()?;
    head.trim().parse().ok()
}

/// Width of `monitor`, honouring an explicit `width_override`.
///
/// `"main"` (any case) selects the main display; any other name must match
/// a display name case-insensitively.
pub fn resolve_monitor_width<D: DisplaySource>(
    source: &D,
    monitor: &str,
    width_override: Option<i64>,
) -> Result<i64, MonitorWidthError> {
    if let Some(width) = width_override {
        if width <= 0 {
            return Err(MonitorWidthError::InvalidOverride(width));
        }
        return Ok(width);
    }

    let displays = source
        .displays()
        .map_err(|e| MonitorWidthError::Detection(e.to_string()))?;
    debug!("detected {} display(s): {:?}", displays.len(), displays);

    if monitor.eq_ignore_ascii_case(MAIN_MONITOR) {
        return displays
            .iter()
            .find(|d| d.main)
            .map(|d| d.width)
            .ok_or(MonitorWidthError::NoMainDisplay);
    }

    if let Some(display) = displays
        .iter()
        .find(|d| d.name.to_lowercase() == monitor.to_lowercase())
    {
        return Ok(display.width);
    }

    let available = displays
        .iter()
        .map(|d| d.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    Err(MonitorWidthError::NotFound {
        name: monitor.to_string(),
        available,
    })
}
