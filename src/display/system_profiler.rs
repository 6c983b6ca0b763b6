//! macOS display detection through `system_profiler`.
//!
//! `system_profiler SPDisplaysDataType -json` groups displays by GPU:
//!
//! ```json
//! {
//!   "SPDisplaysDataType": [{
//!     "_name": "Apple M1 Pro",
//!     "spdisplays_ndrvs": [{
//!       "_name": "Color LCD",
//!       "_spdisplays_pixels": "3024 x 1964",
//!       "_spdisplays_resolution": "1512 x 982 @ 120.00Hz",
//!       "spdisplays_main": "spdisplays_yes"
//!     }]
//!   }]
//! }
//! ```
//!
//! `_spdisplays_resolution` is the logical ("looks like") resolution, which
//! is what AeroSpace gaps are measured in; `_spdisplays_pixels` is only used
//! when the former is missing.

use super::{ensure_main, leading_width, DisplayError, DisplayInfo};
use log::warn;
use serde::Deserialize;
use std::process::Command;

const COMMAND: &str = "system_profiler";

#[derive(Deserialize)]
struct Report {
    #[serde(rename = "SPDisplaysDataType", default)]
    gpus: Vec<Gpu>,
}

#[derive(Deserialize)]
struct Gpu {
    #[serde(rename = "spdisplays_ndrvs", default)]
    displays: Vec<DisplayJson>,
}

#[derive(Deserialize)]
struct DisplayJson {
    #[serde(rename = "_name")]
    name: String,
    #[serde(rename = "_spdisplays_resolution")]
    resolution: Option<String>,
    #[serde(rename = "_spdisplays_pixels")]
    pixels: Option<String>,
    #[serde(rename = "spdisplays_main")]
    main: Option<String>,
}

/// Parse the JSON report into displays.
///
/// Displays without a readable width are skipped.
pub fn parse(json: &str) -> Result<Vec<DisplayInfo>, DisplayError> {
    let report: Report = serde_json::from_str(json).map_err(|e| DisplayError::Parse {
        command: COMMAND,
        message: e.to_string(),
    })?;

    let mut displays = Vec::new();
    for d in report.gpus.into_iter().flat_map(|g| g.displays) {
        let width = d
            .resolution
            .as_deref()
            .and_then(leading_width)
            .or_else(|| d.pixels.as_deref().and_then(leading_width));
        let Some(width) = width else {
            warn!("skipping display {:?}: no resolution reported", d.name);
            continue;
        };
        displays.push(DisplayInfo {
            name: d.name,
            width,
            main: d.main.as_deref() == Some("spdisplays_yes"),
        });
    }

    if displays.is_empty() {
        return Err(DisplayError::NoDisplays(COMMAND));
    }
    ensure_main(&mut displays);
    Ok(displays)
}

/// Run `system_profiler` and parse its report.
pub fn query() -> Result<Vec<DisplayInfo>, DisplayError> {
    let output = Command::new(COMMAND)
        .args(["SPDisplaysDataType", "-json"])
        .output()
        .map_err(|e| DisplayError::Spawn {
            command: COMMAND,
            source: e,
        })?;

    if !output.status.success() {
        return Err(DisplayError::CommandFailed {
            command: COMMAND,
            message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    parse(&String::from_utf8_lossy(&output.stdout))
}
