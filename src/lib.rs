//! **aerospace-utils**: workspace sizing for the AeroSpace window manager.
//!
//! AeroSpace has no notion of a workspace width, but it does support
//! per-monitor outer gaps.  A workspace that should cover `p`% of a monitor
//! is produced by giving that monitor left and right gaps that absorb the
//! remaining width; a *shift* moves pixels from one side to the other.
//!
//! # Architecture
//!
//! The crate is organised around two traits:
//!
//! * [`traits::DisplaySource`]: abstracts display detection so the gap
//!   logic is not coupled to any specific operating system.
//! * [`traits::WindowManager`]: abstracts the config reload so the
//!   orchestration is not coupled to the `aerospace` binary.
//!
//! [`workspace::WorkspaceSizer`] ties the pure gap math in [`gaps`], the
//! per-monitor [`state`] file and the format-preserving [`config`] editor
//! together.  Concrete backends live in [`display`] (`system_profiler`,
//! `xrandr`) and [`aerospace`] (the `aerospace` CLI).

pub mod aerospace;
pub mod command;
pub mod config;
pub mod display;
pub mod gaps;
pub mod output;
pub mod paths;
pub mod state;
pub mod traits;
pub mod workspace;
