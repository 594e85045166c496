use super::CliError;
use super::helpers::{render_scalar, write_report_file};
use clap::Args;
use lmpread_core::plan::{load_plan, run_plan};
use lmpread_core::readers::{
    LogReader, PrintPropReader, ProfileReader, TimeAvgReader, TrajectoryReader,
};
use lmpread_core::source::LineSource;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct TrajectoryArgs {
    /// Trajectory dump file
    pub file: PathBuf,
}

pub fn run_trajectory_command(args: TrajectoryArgs) -> Result<i32, CliError> {
    let mut reader = TrajectoryReader::new(LineSource::from_path(&args.file));
    let snapshots = reader.parse()?;

    println!("{}: {} snapshot(s)", args.file.display(), snapshots.len());
    for snapshot in snapshots {
        println!(
            "  timestep {:>12}  atoms {:>8}  columns: {}",
            snapshot.timestep,
            snapshot.atoms.row_count(),
            snapshot.atoms.column_names().join(" ")
        );
    }
    Ok(0)
}

#[derive(Debug, Args)]
pub struct LogArgs {
    /// Solver run log
    pub file: PathBuf,
    /// Variable name(s) to resolve via `variable <name> equal` lines
    #[arg(long = "variable")]
    pub variables: Vec<String>,
    /// Free-text label(s); the first number on the first matching line
    #[arg(long = "label")]
    pub labels: Vec<String>,
    /// List every `Number of molecules for <name>: <count>` pair
    #[arg(long)]
    pub molecules: bool,
}

pub fn run_log_command(args: LogArgs) -> Result<i32, CliError> {
    let mut reader = LogReader::new(LineSource::from_path(&args.file));

    for name in &args.variables {
        let value = reader.variable_value(name)?;
        println!("variable {} = {}", name, render_scalar(value));
    }
    for label in &args.labels {
        let value = reader.labeled_value(label)?;
        println!("label '{}' = {}", label, render_scalar(value));
    }
    if args.molecules {
        for (name, count) in reader.molecule_counts()? {
            println!("molecules {} = {}", name, count);
        }
    }
    Ok(0)
}

#[derive(Debug, Args)]
pub struct TimeavgArgs {
    /// Time-averaged property table
    pub file: PathBuf,
    /// 0-indexed line number of the `#`-prefixed column header
    #[arg(long, default_value_t = 1)]
    pub header_line: usize,
    /// Column to aggregate (mean and sample standard deviation)
    #[arg(long)]
    pub stats_column: Option<String>,
    /// Keep only rows with timestep strictly greater than this cutoff
    #[arg(long, default_value_t = 0.0)]
    pub after: f64,
}

pub fn run_timeavg_command(args: TimeavgArgs) -> Result<i32, CliError> {
    let mut reader = TimeAvgReader::new(LineSource::from_path(&args.file), args.header_line);
    let table = reader.read()?;

    println!(
        "{}: {} row(s), columns: {}",
        args.file.display(),
        table.row_count(),
        table.column_names().join(" ")
    );

    if let Some(column) = &args.stats_column {
        let timestep_column = table
            .column_names()
            .first()
            .map(|name| (*name).to_owned())
            .unwrap_or_default();
        let stats = table.stats_after(&timestep_column, args.after, column)?;
        println!(
            "{}: mean {:.6} std {:.6} over {} sample(s) after {} > {}",
            column, stats.mean, stats.std_dev, stats.samples, timestep_column, args.after
        );
    }
    Ok(0)
}

#[derive(Debug, Args)]
pub struct PrintpropArgs {
    /// Print-property file of `key: value` pairs
    pub file: PathBuf,
    /// Column to aggregate (mean and sample standard deviation)
    #[arg(long)]
    pub stats_column: Option<String>,
    /// Keep only rows with timestep strictly greater than this cutoff
    #[arg(long, default_value_t = 0.0)]
    pub after: f64,
}

pub fn run_printprop_command(args: PrintpropArgs) -> Result<i32, CliError> {
    let mut reader = PrintPropReader::new(LineSource::from_path(&args.file));
    let table = reader.read()?;

    println!(
        "{}: {} row(s), columns: {}",
        args.file.display(),
        table.row_count(),
        table.column_names().join(" ")
    );

    if let Some(column) = &args.stats_column {
        let timestep_column = table
            .column_names()
            .first()
            .map(|name| (*name).to_owned())
            .unwrap_or_default();
        let stats = table.stats_after(&timestep_column, args.after, column)?;
        println!(
            "{}: mean {:.6} std {:.6} over {} sample(s) after {} > {}",
            column, stats.mean, stats.std_dev, stats.samples, timestep_column, args.after
        );
    }
    Ok(0)
}

#[derive(Debug, Args)]
pub struct ProfileArgs {
    /// Segmented profile or radial-distribution file
    pub file: PathBuf,
    /// Inclusive start timestep
    #[arg(long)]
    pub start: i64,
    /// End timestep; the end marker's own block is excluded
    #[arg(long)]
    pub end: i64,
    /// Exact token count that identifies a timestep marker line
    #[arg(long)]
    pub marker_tokens: usize,
}

pub fn run_profile_command(args: ProfileArgs) -> Result<i32, CliError> {
    let mut reader = ProfileReader::new(
        LineSource::from_path(&args.file),
        args.start,
        args.end,
        args.marker_tokens,
    );
    let blocks = reader.read()?;

    println!(
        "{}: {} block(s) in [{}, {})",
        args.file.display(),
        blocks.len(),
        args.start,
        args.end
    );
    for block in blocks {
        println!(
            "  timestep {:>12}  rows {:>6}",
            block.timestep,
            block.data.row_count()
        );
    }
    Ok(0)
}

#[derive(Debug, Args)]
pub struct ReportArgs {
    /// JSON harvest plan
    pub plan: PathBuf,
    /// Write the JSON report here instead of stdout
    #[arg(long)]
    pub output: Option<PathBuf>,
}

pub fn run_report_command(args: ReportArgs) -> Result<i32, CliError> {
    tracing::info!(plan = %args.plan.display(), "running harvest plan");
    let plan = load_plan(&args.plan)?;
    let report = run_plan(&plan)?;

    match &args.output {
        Some(path) => {
            write_report_file(path, &report)?;
            println!("report written to {}", path.display());
        }
        None => {
            let rendered = serde_json::to_string_pretty(&report)
                .map_err(|error| CliError::Internal(error.into()))?;
            println!("{}", rendered);
        }
    }
    Ok(0)
}
