use super::CliError;
use anyhow::Context;
use lmpread_core::plan::HarvestReport;
use std::fs;
use std::path::Path;

pub(super) fn render_scalar(value: Option<f64>) -> String {
    match value {
        Some(value) => value.to_string(),
        None => "<not found>".to_string(),
    }
}

pub(super) fn write_report_file(path: &Path, report: &HarvestReport) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(report)
        .with_context(|| "failed to serialize harvest report")?;

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create report directory '{}'", parent.display()))?;
    }
    fs::write(path, rendered)
        .with_context(|| format!("failed to write report '{}'", path.display()))?;
    Ok(())
}
