//! Accumulated effective-mass participation from ANSYS modal output.
//!
//! The report is carved into its mode count, total mass and the three
//! participation-factor tables; each table's mass ratios are accumulated and
//! turned into a staircase curve, then charted and exported.

pub mod color;
pub mod config;
pub mod data;
pub mod pipeline;
pub mod report;

pub use data::error::{ParseError, RowFault};
pub use data::model::{Axis, AxisTable, ModalReport, ModeRow, Report, StepCurve, StepPoint};
pub use pipeline::{run, RunOutcome, RunSummary};
