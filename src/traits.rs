//! Core traits that decouple workspace sizing from the operating system and
//! from AeroSpace itself.
//!
//! Every concrete backend (the platform display report, the `aerospace`
//! CLI, a test harness, …) implements one of these traits.  The
//! [`WorkspaceSizer`](crate::workspace::WorkspaceSizer) only depends on
//! these abstractions.

use crate::display::DisplayInfo;

/// A source of connected displays and their widths.
///
/// An implementation might shell out to `system_profiler` or `xrandr`, or
/// it might return a fixed list in tests.
pub trait DisplaySource {
    /// The error type produced by this source.
    type Error: std::error::Error + Send + 'static;

    /// Return every active display.  Exactly one should be marked `main`.
    fn displays(&self) -> Result<Vec<DisplayInfo>, Self::Error>;
}

/// Abstraction over the window manager whose configuration is rewritten.
pub trait WindowManager {
    /// The error type produced by this window manager.
    type Error: std::error::Error + Send + 'static;

    /// Ask the window manager to re-read its configuration file.
    ///
    /// Called after the config has been written; a failure here is reported
    /// but never undoes the write.
    fn reload_config(&self) -> Result<(), Self::Error>;
}
