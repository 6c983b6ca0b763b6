//! Entry point for the **aerospace-utils** CLI.
//!
//! Parses the command line, wires the platform display detection and the
//! `aerospace` binary into a [`WorkspaceSizer`], and prints the result.
//! Any error is printed as `error: <message>` and exits with status 1.

use aerospace_utils::aerospace::AerospaceCli;
use aerospace_utils::command::{Cli, Commands, WorkspaceCommand};
use aerospace_utils::display::SystemDisplays;
use aerospace_utils::workspace::{WorkspaceError, WorkspaceSizer};
use clap::Parser;
use log::debug;

/// `RUST_LOG` wins; otherwise `warn`, or `debug` with `--verbose`.
fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

fn run(cli: Cli) -> Result<(), WorkspaceError> {
    let options = cli.global.sizer_options();
    debug!(
        "config: {}, state: {}, monitor: {}",
        options.config_path.display(),
        options.state_path.display(),
        options.monitor
    );
    let sizer = WorkspaceSizer::new(options, SystemDisplays::new(), AerospaceCli::new());

    let Commands::Workspace { action } = cli.command;
    match action {
        WorkspaceCommand::Use {
            percent,
            set_default,
        } => println!("{}", sizer.use_percentage(percent, set_default)?),
        WorkspaceCommand::Adjust { by } => println!("{}", sizer.adjust(by)?),
        WorkspaceCommand::Shift { by } => println!("{}", sizer.shift(by)?),
        WorkspaceCommand::Current => print!("{}", sizer.current()),
    }
    Ok(())
}

//  Main

fn main() {
    let cli = Cli::parse();
    init_logging(cli.global.verbose);

    if let Err(e) = run(cli) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
