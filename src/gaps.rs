//! Gap arithmetic.
//!
//! A workspace that should occupy `percentage`% of a monitor's width is
//! produced by giving the monitor a left and a right outer gap that together
//! absorb the remaining width.  Without a shift both gaps are equal; a
//! *shift* (in percentage points of the monitor width) moves pixels from one
//! side to the other while the workspace keeps its width.
//!
//! Every function here is pure.  Validation ([`validate_percentage`],
//! [`validate_shift`]) and the transforms ([`calculate_gap_size`],
//! [`calculate_shifted_gaps`]) are separate steps: the transforms assume
//! their inputs were validated first.

/// Errors produced when validating a percentage or a shift.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GapError {
    /// The workspace percentage is outside `1..=100`.
    #[error("percentage must be between 1 and 100 (got {0})")]
    InvalidPercentage(i64),

    /// The shift needs more pixels than one side gap has available.
    #[error(
        "shift of {shift}% ({shift_pixels}px) exceeds the {base_gap}px gap available at \
         {percentage}%; reduce the shift or use a smaller workspace percentage first"
    )]
    InvalidShift {
        shift: i64,
        shift_pixels: i64,
        base_gap: i64,
        percentage: i64,
    },
}

/// Left and right gaps for a shifted workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShiftedGaps {
    pub left_gap_pixels: i64,
    pub right_gap_pixels: i64,
    /// `left_gap_pixels` as a rounded percentage of the monitor width.
    pub left_gap_percent: i64,
    /// `right_gap_pixels` as a rounded percentage of the monitor width.
    pub right_gap_percent: i64,
}

/// Check that `percentage` lies in `1..=100`.
pub fn validate_percentage(percentage: i64) -> Result<(), GapError> {
    if (1..=100).contains(&percentage) {
        Ok(())
    } else {
        Err(GapError::InvalidPercentage(percentage))
    }
}

/// Gap on each side, in pixels, for a centered workspace.
///
/// `round(monitor_width * (100 - percentage) / 100 / 2)`, rounding half away
/// from zero.
pub fn calculate_gap_size(monitor_width: i64, percentage: i64) -> i64 {
    let fraction = (100 - percentage) as f64 / 100.0;
    (monitor_width as f64 * fraction / 2.0).round() as i64
}

/// Pixels corresponding to `shift` percentage points of the monitor width.
fn shift_pixels(monitor_width: i64, shift: i64) -> i64 {
    (monitor_width as f64 * shift as f64 / 100.0).round() as i64
}

fn percent_of(pixels: i64, monitor_width: i64) -> i64 {
    if monitor_width == 0 {
        return 0;
    }
    (pixels as f64 * 100.0 / monitor_width as f64).round() as i64
}

/// Check that shifting by `shift` keeps both gaps non-negative.
///
/// Zero is always valid.
pub fn validate_shift(monitor_width: i64, percentage: i64, shift: i64) -> Result<(), GapError> {
    let base_gap = calculate_gap_size(monitor_width, percentage);
    let pixels = (monitor_width as f64 * (shift as f64).abs() / 100.0).round() as i64;
    if pixels > base_gap {
        return Err(GapError::InvalidShift {
            shift,
            shift_pixels: pixels,
            base_gap,
            percentage,
        });
    }
    Ok(())
}

/// Compute asymmetric gaps for a workspace shifted by `shift` points.
///
/// A positive shift moves the workspace right (grows the left gap).  The
/// shift is not checked here; call [`validate_shift`] first.
pub fn calculate_shifted_gaps(monitor_width: i64, percentage: i64, shift: i64) -> ShiftedGaps {
    let base_gap = calculate_gap_size(monitor_width, percentage);
    let pixels = shift_pixels(monitor_width, shift);
    let left = base_gap + pixels;
    let right = base_gap - pixels;

    ShiftedGaps {
        left_gap_pixels: left,
        right_gap_pixels: right,
        left_gap_percent: percent_of(left, monitor_width),
        right_gap_percent: percent_of(right, monitor_width),
    }
}

//  Tests
