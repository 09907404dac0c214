//! Result artifacts: text report and JSON record

use std::fmt::Write as _;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

use allocation_facade::AllocationResult;

use crate::CliResult;

/// Render the human-readable report
pub fn render_text(result: &AllocationResult) -> String {
    let mut out = String::from("Forecast:\n");
    for (name, entity) in &result.entities {
        let _ = writeln!(out, "{}: {:.2}", name, entity.window_average);
    }
    out.push_str("\nAllocation:\n");
    for (name, entity) in &result.entities {
        let _ = writeln!(out, "{}: {:.2}", name, entity.allocation);
    }
    out
}

/// Paths of the artifacts written for one run
#[derive(Debug)]
pub struct Artifacts {
    pub report: PathBuf,
    pub record: PathBuf,
}

/// Write `results_<stamp>.txt` and `results_<stamp>.json` into `dir`
pub fn write_artifacts(
    result: &AllocationResult,
    dir: &Path,
    stamp: &str,
) -> CliResult<Artifacts> {
    fs::create_dir_all(dir)
        .map_err(|e| format!("Failed to create {}: {}", dir.display(), e))?;

    let report = dir.join(format!("results_{}.txt", stamp));
    fs::write(&report, render_text(result))
        .map_err(|e| format!("Failed to write report: {}", e))?;

    let record = dir.join(format!("results_{}.json", stamp));
    let mut file = File::create(&record).map_err(|e| format!("Failed to create output: {}", e))?;
    serde_json::to_writer_pretty(&mut file, result)
        .map_err(|e| format!("Failed to write JSON: {}", e))?;

    Ok(Artifacts { report, record })
}
