//! AeroSpace-specific implementations.
//!
//! This module provides the concrete backend for the
//! [`WindowManager`](crate::traits::WindowManager) trait, powered by the
//! `aerospace` command-line client.
//!
//! Nothing outside this module should run `aerospace` directly.

pub mod cli;

pub use cli::{AerospaceCli, AerospaceError};
