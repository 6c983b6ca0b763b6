//! Linux display detection through `xrandr --query`.
//!
//! Only active outputs are considered, i.e. lines of the form
//! `DP-1 connected primary 2560x1440+0+0 (normal left ...) 597mm x 336mm`.

use super::{ensure_main, leading_width, DisplayError, DisplayInfo};
use std::process::Command;

const COMMAND: &str = "xrandr";

fn parse_line(line: &str) -> Option<DisplayInfo> {
    let mut tokens = line.split_whitespace();
    let name = tokens.next()?;
    if tokens.next()? != "connected" {
        return None;
    }
    let mut geometry = tokens.next()?;
    let main = geometry == "primary";
    if main {
        geometry = tokens.next()?;
    }
    // Connected but disabled outputs have no geometry.
    if !geometry.contains('+') {
        return None;
    }
    Some(DisplayInfo {
        name: name.to_string(),
        width: leading_width(geometry)?,
        main,
    })
}

/// Parse `xrandr --query` output.  Without a primary output the first
/// active one is treated as main.
pub fn parse(output: &str) -> Result<Vec<DisplayInfo>, DisplayError> {
    let mut displays: Vec<DisplayInfo> = output.lines().filter_map(parse_line).collect();
    if displays.is_empty() {
        return Err(DisplayError::NoDisplays(COMMAND));
    }
    ensure_main(&mut displays);
    Ok(displays)
}

/// Run `xrandr --query` and parse its output.
pub fn query() -> Result<Vec<DisplayInfo>, DisplayError> {
    let output = Command::new(COMMAND)
        .arg("--query")
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
