//! Command-line surface.
//!
//! ```text
//! aerospace-utils [GLOBAL] workspace use [PERCENT] [--set-default]
//! aerospace-utils [GLOBAL] workspace adjust [-b|--by N]
//! aerospace-utils [GLOBAL] workspace shift  [-b|--by N]
//! aerospace-utils [GLOBAL] workspace current
//! ```
//!
//! Global options may appear before or after the subcommand.

use crate::display::MAIN_MONITOR;
use crate::paths::{resolve_config_path, resolve_state_path};
use crate::workspace::SizerOptions;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Size AeroSpace workspaces by adjusting per-monitor outer gaps.
#[derive(Parser, Debug)]
#[command(name = "aerospace-utils", version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOptions,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every subcommand.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct GlobalOptions {
    /// Path to aerospace.toml (default: ~/.config/aerospace/aerospace.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config_path: Option<PathBuf>,

    /// Path to the state file (default: ~/.config/aerospace/aerospace-utils-state.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub state_path: Option<PathBuf>,

    /// Monitor name as used in aerospace.toml
    #[arg(long, global = true, default_value = MAIN_MONITOR)]
    pub monitor: String,

    /// Monitor width in pixels, skipping display detection
    #[arg(long, global = true, hide = true, value_name = "PX")]
    pub monitor_width: Option<i64>,

    /// Do not run `aerospace reload-config` after writing
    #[arg(long, global = true)]
    pub no_reload: bool,

    /// Show what would change without writing anything
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Log paths, widths and gap sizes
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl GlobalOptions {
    /// Resolve default paths and build the options for a
    /// [`WorkspaceSizer`](crate::workspace::WorkspaceSizer).
    pub fn sizer_options(&self) -> SizerOptions {
        SizerOptions {
            config_path: resolve_config_path(self.config_path.as_deref()),
            state_path: resolve_state_path(self.state_path.as_deref()),
            monitor: self.monitor.clone(),
            monitor_width: self.monitor_width,
            reload: !self.no_reload,
            dry_run: self.dry_run,
        }
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Manage workspace size and position
    Workspace {
        #[command(subcommand)]
        action: WorkspaceCommand,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum WorkspaceCommand {
    /// Set the workspace width as a percentage of the monitor
    ///
    /// Without PERCENT the monitor's current, then default, percentage is
    /// re-applied (60 on first use).
    Use {
        /// Workspace width in percent (1-100)
        #[arg(allow_negative_numbers = true)]
        percent: Option<i64>,

        /// Also remember this percentage as the monitor's default
        #[arg(long)]
        set_default: bool,
    },

    /// Grow or shrink the workspace relative to its current size
    Adjust {
        /// Percentage points to add (negative to shrink)
        #[arg(short, long, default_value_t = 5, allow_negative_numbers = true)]
        by: i64,
    },

    /// Move the workspace left or right
    ///
    /// With a 50% workspace the side gaps are 25% each; `-b 5` makes them
    /// 30% left and 20% right.  Without --by the workspace is re-centered.
    Shift {
        /// Percentage points to move (positive = right, negative = left)
        #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
        by: i64,
    },

    /// Show gap settings and stored percentages
    Current,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("aerospace-utils").chain(args.iter().copied())).unwrap()
    }

    fn action(args: &[&str]) -> WorkspaceCommand {
        let Commands::Workspace { action } = parse(args).command;
        action
    }

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn use_with_and_without_percent() {
        assert_eq!(
            action(&["workspace", "use", "50"]),
            WorkspaceCommand::Use {
                percent: Some(50),
                set_default: false,
            }
        );
        assert_eq!(
            action(&["workspace", "use", "--set-default"]),
            WorkspaceCommand::Use {
                percent: None,
                set_default: true,
            }
        );
    }

    #[test]
    fn use_passes_out_of_range_values_through() {
        // Range checks happen later so the error names the value.
        assert_eq!(
            action(&["workspace", "use", "-5"]),
            WorkspaceCommand::Use {
                percent: Some(-5),
                set_default: false,
            }
        );
    }

    #[test]
    fn adjust_and_shift_defaults() {
        assert_eq!(action(&["workspace", "adjust"]), WorkspaceCommand::Adjust { by: 5 });
        assert_eq!(action(&["workspace", "shift"]), WorkspaceCommand::Shift { by: 0 });
    }

    #[test]
    fn negative_by_values() {
        assert_eq!(
            action(&["workspace", "adjust", "-b", "-10"]),
            WorkspaceCommand::Adjust { by: -10 }
        );
        assert_eq!(
            action(&["workspace", "shift", "--by", "-5"]),
            WorkspaceCommand::Shift { by: -5 }
        );
    }

    #[test]
    fn global_defaults() {
        let cli = parse(&["workspace", "current"]);
        assert_eq!(cli.global.monitor, "main");
        assert_eq!(cli.global.monitor_width, None);
        assert!(!cli.global.no_reload);
        assert!(!cli.global.dry_run);
        assert!(!cli.global.verbose);
    }

    #[test]
    fn global_options_after_subcommand() {
        let cli = parse(&[
            "workspace",
            "use",
            "40",
            "--monitor",
            "Dell U2722D",
            "--monitor-width",
            "2560",
            "--no-reload",
            "--dry-run",
            "-v",
        ]);
        assert_eq!(cli.global.monitor, "Dell U2722D");
        assert_eq!(cli.global.monitor_width, Some(2560));
        assert!(cli.global.no_reload);
        assert!(cli.global.dry_run);
        assert!(cli.global.verbose);
    }

    #[test]
    fn sizer_options_from_globals() {
        let cli = parse(&[
            "--config-path",
            "/tmp/a.toml",
            "--state-path",
            "/tmp/s.toml",
            "--no-reload",
            "workspace",
            "current",
        ]);
        let options = cli.global.sizer_options();
        assert_eq!(options.config_path, PathBuf::from("/tmp/a.toml"));
        assert_eq!(options.state_path, PathBuf::from("/tmp/s.toml"));
        assert_eq!(options.monitor, "main");
        assert!(!options.reload);
        assert!(!options.dry_run);
    }

    #[test]
    fn non_numeric_percent_rejected() {
        assert!(Cli::try_parse_from(["aerospace-utils", "workspace", "use", "half"]).is_err());
    }
}
