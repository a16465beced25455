mod commands;
mod environment;
mod error;
mod interaction;
mod logging;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use crate::commands::{Commands, ReleaseArgs};
use crate::error::CliError;

#[derive(Parser)]
#[command(name = "ubump")]
#[command(bin_name = "ubump")]
#[command(version)]
#[command(
    about = "Bump, tag and subtree-split a Unity project and its packages",
    long_about = "Without a subcommand, starts the interactive release: bump the project and \
                  its packages, commit, push, tag, and split every bumped package into its own \
                  branch."
)]
struct Cli {
    /// Relative or absolute path to a Unity project (default: current directory)
    #[arg(long = "project-path", short = 'C', global = true)]
    project_path: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    release: ReleaseArgs,
}

fn main() -> ExitCode {
    logging::init();
    let cli = Cli::parse();

    let project_path = match resolve_project_path(cli.project_path) {
        Ok(path) => path,
        Err(e) => {
            print_error(&e);
            return ExitCode::FAILURE;
        }
    };

    let result = match cli.command {
        Some(command) => command.execute(&project_path),
        None => commands::release::run(cli.release, &project_path),
    };

    if let Err(e) = result {
        print_error(&e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn resolve_project_path(path: Option<PathBuf>) -> Result<PathBuf, CliError> {
    match path {
        Some(p) => Ok(p),
        None => std::env::current_dir().map_err(CliError::CurrentDir),
    }
}

fn print_error(error: &CliError) {
    eprintln!("error: {error}");

    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        eprintln!("caused by: {cause}");
        source = std::error::Error::source(cause);
    }
}
