use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use log::{info, warn};

use crate::config::RunConfig;
use crate::data::loader::{load_report, parse_report};
use crate::data::model::StepCurve;
use crate::data::step::build_step_curve;
use crate::report::chart::render_chart;
use crate::report::table::{export_rows, write_table};

// ---------------------------------------------------------------------------
// Run outcome
// ---------------------------------------------------------------------------

/// How a run ended when nothing went wrong structurally.
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    /// The input report does not exist; nothing was written.
    MissingInput(PathBuf),
    Completed(RunSummary),
}

/// Key figures of a completed run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub mode_count: usize,
    pub total_mass: f64,
    /// Accumulated percentage after the last mode, x/y/z.
    pub maxima: [f64; 3],
    /// `None` when the chart could not be rendered.
    pub chart_path: Option<PathBuf>,
    pub table_path: PathBuf,
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Read the configured report, derive the step curves and write both outputs.
///
/// Any structural problem in the report aborts the run before an output file
/// is created.
pub fn run(config: &RunConfig) -> Result<RunOutcome> {
    let input = config.input_path();
    if !input.exists() {
        warn!("input report {} does not exist", input.display());
        return Ok(RunOutcome::MissingInput(input));
    }

    let report = load_report(&input)?;
    let modal = parse_report(&report)
        .with_context(|| format!("processing modal report {}", input.display()))?;
    info!(
        "{}: {} modes, total mass {}",
        input.display(),
        modal.mode_count,
        modal.total_mass
    );

    let curves = modal.tables.each_ref().map(build_step_curve);
    let maxima = curves.each_ref().map(StepCurve::max_percent);
    let rows = export_rows(&curves)?;

    fs::create_dir_all(&config.output_dir)
        .with_context(|| format!("creating {}", config.output_dir.display()))?;

    let chart_path = config.chart_path();
    let chart_path = match render_chart(&curves, modal.mode_count, &chart_path, &config.chart_style())
    {
        Ok(()) => {
            info!("Wrote plot: {}", chart_path.display());
            Some(chart_path)
        }
        Err(err) => {
            warn!("Skipping PNG render ({}): {err:#}", chart_path.display());
            None
        }
    };

    let table_path = config.table_path();
    write_table(&rows, &table_path)?;
    info!("Wrote table: {}", table_path.display());

    Ok(RunOutcome::Completed(RunSummary {
        mode_count: modal.mode_count,
        total_mass: modal.total_mass,
        maxima,
        chart_path,
        table_path,
    }))
}
