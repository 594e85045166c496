//! Manifest-driven extraction: a harvest plan names the output files of one
//! simulation case and the queries to run against them; executing the plan
//! drives every decoder and collects the results into a serializable report.

use crate::domain::LmpResult;
use crate::readers::{LogReader, PrintPropReader, ProfileReader, TimeAvgReader, TrajectoryReader};
use crate::source::LineSource;
use crate::table::DataTable;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HarvestPlan {
    #[serde(rename = "caseId")]
    pub case_id: String,
    #[serde(default)]
    pub trajectory: Option<TrajectoryInput>,
    #[serde(default)]
    pub log: Option<LogInput>,
    #[serde(rename = "timeAveraged", default)]
    pub time_averaged: Vec<TimeAvgInput>,
    #[serde(rename = "printProperties", default)]
    pub print_properties: Vec<PrintPropInput>,
    #[serde(default)]
    pub profiles: Vec<ProfileInput>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TrajectoryInput {
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LogInput {
    pub path: PathBuf,
    #[serde(default)]
    pub variables: Vec<String>,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(rename = "moleculeCounts", default)]
    pub molecule_counts: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TimeAvgInput {
    pub path: PathBuf,
    #[serde(rename = "headerLine")]
    pub header_line: usize,
    #[serde(default)]
    pub stats: Vec<StatsRequest>,
}

/// Filter rows where `timestepColumn > afterTimestep`, then aggregate
/// `column` (the original post-processor contract).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StatsRequest {
    #[serde(rename = "timestepColumn")]
    pub timestep_column: String,
    #[serde(rename = "afterTimestep")]
    pub after_timestep: f64,
    pub column: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PrintPropInput {
    pub path: PathBuf,
    #[serde(default)]
    pub stats: Vec<StatsRequest>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProfileInput {
    pub path: PathBuf,
    #[serde(rename = "startTimestep")]
    pub start_timestep: i64,
    #[serde(rename = "endTimestep")]
    pub end_timestep: i64,
    #[serde(rename = "markerTokens")]
    pub marker_tokens: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    #[error("failed to read harvest plan '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse harvest plan '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

pub fn load_plan(path: &Path) -> Result<HarvestPlan, PlanError> {
    let text = fs::read_to_string(path).map_err(|source| PlanError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| PlanError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HarvestReport {
    #[serde(rename = "caseId")]
    pub case_id: String,
    pub trajectory: Option<TrajectorySummary>,
    pub log: Option<LogSummary>,
    #[serde(rename = "timeAveraged")]
    pub time_averaged: Vec<TableSummary>,
    #[serde(rename = "printProperties")]
    pub print_properties: Vec<TableSummary>,
    pub profiles: Vec<ProfileSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrajectorySummary {
    pub path: String,
    pub snapshots: usize,
    #[serde(rename = "firstTimestep")]
    pub first_timestep: Option<i64>,
    #[serde(rename = "lastTimestep")]
    pub last_timestep: Option<i64>,
    #[serde(rename = "atomColumns")]
    pub atom_columns: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogSummary {
    pub path: String,
    pub variables: Vec<ScalarResult>,
    pub labels: Vec<ScalarResult>,
    #[serde(rename = "moleculeCounts")]
    pub molecule_counts: Vec<MoleculeCount>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScalarResult {
    pub name: String,
    pub value: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoleculeCount {
    pub name: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableSummary {
    pub path: String,
    pub rows: usize,
    pub columns: Vec<String>,
    pub stats: Vec<StatsResult>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsResult {
    pub column: String,
    pub mean: f64,
    #[serde(rename = "stdDev")]
    pub std_dev: f64,
    pub samples: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileSummary {
    pub path: String,
    pub blocks: usize,
    #[serde(rename = "firstTimestep")]
    pub first_timestep: Option<i64>,
    #[serde(rename = "lastTimestep")]
    pub last_timestep: Option<i64>,
}

/// Executes every decoder the plan names. Fresh reader instances per input;
/// any structural failure aborts the whole run.
pub fn run_plan(plan: &HarvestPlan) -> LmpResult<HarvestReport> {
    let trajectory = match &plan.trajectory {
        Some(input) => Some(summarize_trajectory(input)?),
        None => None,
    };
    let log = match &plan.log {
        Some(input) => Some(summarize_log(input)?),
        None => None,
    };

    let mut time_averaged = Vec::with_capacity(plan.time_averaged.len());
    for input in &plan.time_averaged {
        time_averaged.push(summarize_table(input)?);
    }

    let mut print_properties = Vec::with_capacity(plan.print_properties.len());
    for input in &plan.print_properties {
        print_properties.push(summarize_print_properties(input)?);
    }

    let mut profiles = Vec::with_capacity(plan.profiles.len());
    for input in &plan.profiles {
        profiles.push(summarize_profile(input)?);
    }

    Ok(HarvestReport {
        case_id: plan.case_id.clone(),
        trajectory,
        log,
        time_averaged,
        print_properties,
        profiles,
    })
}

fn summarize_trajectory(input: &TrajectoryInput) -> LmpResult<TrajectorySummary> {
    let mut reader = TrajectoryReader::new(LineSource::from_path(&input.path));
    let snapshots = reader.parse()?;

    Ok(TrajectorySummary {
        path: input.path.display().to_string(),
        snapshots: snapshots.len(),
        first_timestep: snapshots.first().map(|snapshot| snapshot.timestep),
        last_timestep: snapshots.last().map(|snapshot| snapshot.timestep),
        atom_columns: snapshots
            .first()
            .map(|snapshot| {
                snapshot
                    .atoms
                    .column_names()
                    .into_iter()
                    .map(str::to_owned)
                    .collect()
            })
            .unwrap_or_default(),
    })
}

fn summarize_log(input: &LogInput) -> LmpResult<LogSummary> {
    let mut reader = LogReader::new(LineSource::from_path(&input.path));

    let mut variables = Vec::with_capacity(input.variables.len());
    for name in &input.variables {
        variables.push(ScalarResult {
            name: name.clone(),
            value: reader.variable_value(name)?,
        });
    }

    let mut labels = Vec::with_capacity(input.labels.len());
    for label in &input.labels {
        labels.push(ScalarResult {
            name: label.clone(),
            value: reader.labeled_value(label)?,
        });
    }

    let molecule_counts = if input.molecule_counts {
        reader
            .molecule_counts()?
            .into_iter()
            .map(|(name, count)| MoleculeCount { name, count })
            .collect()
    } else {
        Vec::new()
    };

    Ok(LogSummary {
        path: input.path.display().to_string(),
        variables,
        labels,
        molecule_counts,
    })
}

fn summarize_table(input: &TimeAvgInput) -> LmpResult<TableSummary> {
    let mut reader = TimeAvgReader::new(LineSource::from_path(&input.path), input.header_line);
    let table = reader.read()?;
    table_summary(&input.path, table, &input.stats)
}

fn summarize_print_properties(input: &PrintPropInput) -> LmpResult<TableSummary> {
    let mut reader = PrintPropReader::new(LineSource::from_path(&input.path));
    let table = reader.read()?;
    table_summary(&input.path, table, &input.stats)
}

fn table_summary(
    path: &Path,
    table: &DataTable,
    requests: &[StatsRequest],
) -> LmpResult<TableSummary> {
    let mut stats = Vec::with_capacity(requests.len());
    for request in requests {
        let column_stats = table.stats_after(
            &request.timestep_column,
            request.after_timestep,
            &request.column,
        )?;
        stats.push(StatsResult {
            column: request.column.clone(),
            mean: column_stats.mean,
            std_dev: column_stats.std_dev,
            samples: column_stats.samples,
        });
    }

    Ok(TableSummary {
        path: path.display().to_string(),
        rows: table.row_count(),
        columns: table
            .column_names()
            .into_iter()
            .map(str::to_owned)
            .collect(),
        stats,
    })
}

fn summarize_profile(input: &ProfileInput) -> LmpResult<ProfileSummary> {
    let mut reader = ProfileReader::new(
        LineSource::from_path(&input.path),
        input.start_timestep,
        input.end_timestep,
        input.marker_tokens,
    );
    let blocks = reader.read()?;

    Ok(ProfileSummary {
        path: input.path.display().to_string(),
        blocks: blocks.len(),
        first_timestep: blocks.first().map(|block| block.timestep),
        last_timestep: blocks.last().map(|block| block.timestep),
    })
}
