mod commands;
mod helpers;

use clap::Parser;
use lmpread_core::domain::LmpError;
use lmpread_core::plan::PlanError;
use tracing_subscriber::EnvFilter;

pub fn run_from_env() -> i32 {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();
    match parse_and_dispatch(args) {
        Ok(code) => code,
        Err(error) => {
            let diagnostic = error.as_lmp_error();
            eprintln!("{}", diagnostic.diagnostic_line());
            diagnostic.exit_code()
        }
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();
}

fn parse_and_dispatch(args: Vec<String>) -> Result<i32, CliError> {
    match Cli::try_parse_from(&args) {
        Ok(cli) => dispatch_parsed(cli.command),
        Err(err) => match err.kind() {
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                print!("{}", err);
                Ok(0)
            }
            _ => Err(CliError::Usage(err.to_string())),
        },
    }
}

#[derive(Parser)]
#[command(name = "lmpread", about = "Structured readers for MD solver text output")]
struct Cli {
    #[command(subcommand)]
    command: CliCommand,
}

#[derive(clap::Subcommand)]
enum CliCommand {
    /// Summarize the per-timestep snapshots of a trajectory dump
    Trajectory(commands::TrajectoryArgs),
    /// Query scalar values and molecule counts in a run log
    Log(commands::LogArgs),
    /// Read a time-averaged property table
    Timeavg(commands::TimeavgArgs),
    /// Read a key-value print-property table
    Printprop(commands::PrintpropArgs),
    /// Read the timestep-keyed blocks of a segmented profile file
    Profile(commands::ProfileArgs),
    /// Run every decoder named by a JSON harvest plan and emit a report
    Report(commands::ReportArgs),
}

fn dispatch_parsed(command: CliCommand) -> Result<i32, CliError> {
    match command {
        CliCommand::Trajectory(args) => commands::run_trajectory_command(args),
        CliCommand::Log(args) => commands::run_log_command(args),
        CliCommand::Timeavg(args) => commands::run_timeavg_command(args),
        CliCommand::Printprop(args) => commands::run_printprop_command(args),
        CliCommand::Profile(args) => commands::run_profile_command(args),
        CliCommand::Report(args) => commands::run_report_command(args),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error("{0}")]
    Parse(#[from] LmpError),
    #[error("{0}")]
    Plan(#[from] PlanError),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl CliError {
    fn as_lmp_error(&self) -> LmpError {
        match self {
            Self::Usage(message) => LmpError::format("FORMAT.CLI_USAGE", message.clone()),
            Self::Parse(error) => error.clone(),
            Self::Plan(error) => LmpError::io_system("IO.CLI_PLAN", error.to_string()),
            Self::Internal(error) => LmpError::io_system("IO.CLI", format!("{error:#}")),
        }
    }
}
