use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use log::{debug, error};

use super::error::{ParseError, RowFault};
use super::model::{Axis, AxisTable, ModalReport, ModeRow, Report};

/// Label of the line holding the declared mode count.
pub const MODES_MARKER: &str = "NUMBER OF MODES";
/// Label of the line holding the model's total mass.
pub const MASS_MARKER: &str = "TOTAL MASS";

/// Width of the mode count field at the end of its line.
const MODES_FIELD_WIDTH: usize = 4;
/// Width of the total mass field at the end of its line.
const MASS_FIELD_WIDTH: usize = 12;
/// Table rows start this many lines after the direction marker.
const TABLE_BODY_OFFSET: usize = 3;

type TableResult = Result<AxisTable, ParseError>;

/// Character ranges (end-exclusive) of the eight columns of a table row.
pub const ROW_FIELDS: [(usize, usize); 8] = [
    (0, 6),
    (7, 18),
    (19, 36),
    (37, 50),
    (51, 66),
    (67, 82),
    (83, 98),
    (99, 114),
];

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Read a report from disk in one go.
pub fn load_report(path: &Path) -> Result<Report> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("reading modal report {}", path.display()))?;
    let report = Report::from_bytes(&bytes);
    debug!("read {} lines from {}", report.len(), path.display());
    Ok(report)
}

/// Extract mode count, total mass and the three axis tables from a report.
///
/// Sections are located in order: each search starts where the previous one
/// stopped. A missing marker is fatal straight away. Table failures are
/// collected for all three axes and returned together, so a bad x table
/// never hides a bad y or z table.
pub fn parse_report(report: &Report) -> Result<ModalReport, ParseError> {
    let lines = report.lines();

    let modes_at = require_marker(lines, 0, MODES_MARKER)?;
    let (start, end) = trailing_field(&lines[modes_at], MODES_FIELD_WIDTH);
    let mode_count: usize = extract_scalar(&lines[modes_at], start, end, "number of modes")?;
    if mode_count == 0 {
        return Err(ParseError::NoModes);
    }

    let mass_at = require_marker(lines, modes_at, MASS_MARKER)?;
    let (start, end) = trailing_field(&lines[mass_at], MASS_FIELD_WIDTH);
    let total_mass: f64 = extract_scalar(&lines[mass_at], start, end, "total mass")?;
    debug!("report declares {mode_count} modes, total mass {total_mass}");

    let mut cursor = mass_at;
    let [x, y, z] = Axis::ALL.map(|axis| -> Result<TableResult, ParseError> {
        let header = require_marker(lines, cursor, axis.marker())?;
        let body_start = (header + TABLE_BODY_OFFSET).min(lines.len());
        cursor = body_start;
        let parsed = parse_axis_table(axis, &lines[body_start..], mode_count);
        if let Err(err) = &parsed {
            error!("{axis} axis: {err}");
        }
        Ok(parsed)
    });
    let (x, y, z) = (x?, y?, z?);

    match (x, y, z) {
        (Ok(x), Ok(y), Ok(z)) => Ok(ModalReport {
            mode_count,
            total_mass,
            tables: [x, y, z],
        }),
        (x, y, z) => Err(ParseError::AxisTablesFailed(
            [x, y, z].into_iter().filter_map(Result::err).collect(),
        )),
    }
}

// ---------------------------------------------------------------------------
// Section locator
// ---------------------------------------------------------------------------

/// Index of the first line containing `marker` (case-sensitive substring).
pub fn find_marker<S: AsRef<str>>(lines: &[S], marker: &str) -> Option<usize> {
    lines.iter().position(|line| line.as_ref().contains(marker))
}

/// Absolute index of `marker` searching from `from` onwards.
fn require_marker(lines: &[String], from: usize, marker: &str) -> Result<usize, ParseError> {
    let window = lines.get(from..).unwrap_or(&[]);
    find_marker(window, marker)
        .map(|offset| from + offset)
        .ok_or_else(|| ParseError::MarkerNotFound {
            marker: marker.to_string(),
        })
}

// ---------------------------------------------------------------------------
// Scalar extractor
// ---------------------------------------------------------------------------

/// Character range covering the last `width` characters of `line`.
pub fn trailing_field(line: &str, width: usize) -> (usize, usize) {
    let len = line.chars().count();
    (len.saturating_sub(width), len)
}

/// Parse the characters `[start, end)` of `line`, ignoring surrounding blanks.
pub fn extract_scalar<T: FromStr>(
    line: &str,
    start: usize,
    end: usize,
    label: &'static str,
) -> Result<T, ParseError> {
    let text = slice_field(line, start, end).trim();
    text.parse().map_err(|_| ParseError::InvalidScalar {
        label,
        text: text.to_string(),
    })
}

/// Characters `[start, end)` of `line`; out-of-range bounds are clamped.
fn slice_field(line: &str, start: usize, end: usize) -> &str {
    let byte_at = |pos: usize| line.char_indices().nth(pos).map_or(line.len(), |(i, _)| i);
    let from = byte_at(start);
    let to = byte_at(end.max(start));
    &line[from..to]
}

// ---------------------------------------------------------------------------
// Axis table parser
// ---------------------------------------------------------------------------

/// Parse exactly `mode_count` rows from the start of `body`.
///
/// Fails with [`ParseError::ModeCountMismatch`] when a row is missing or
/// malformed, or when a further complete data row follows the last one.
pub fn parse_axis_table<S: AsRef<str>>(
    axis: Axis,
    body: &[S],
    mode_count: usize,
) -> Result<AxisTable, ParseError> {
    let mismatch = |extracted: usize, fault: RowFault| ParseError::ModeCountMismatch {
        axis,
        requested: mode_count,
        extracted,
        fault,
    };

    let mut rows = Vec::with_capacity(mode_count);
    for index in 0..mode_count {
        let line = body
            .get(index)
            .ok_or_else(|| mismatch(index, RowFault::MissingRow { row: index + 1 }))?;
        let fields = parse_row(line.as_ref(), index + 1).map_err(|fault| mismatch(index, fault))?;
        rows.push(ModeRow::from_fields(fields));
    }

    let extra = body
        .iter()
        .skip(mode_count)
        .take_while(|line| parse_row(line.as_ref(), 0).is_ok())
        .count();
    if extra > 0 {
        return Err(mismatch(mode_count + extra, RowFault::ExtraRows { extra }));
    }

    Ok(AxisTable::from_rows(axis, rows))
}

/// Read the eight fixed-width columns of one row (`row` is 1-based, for errors).
fn parse_row(line: &str, row: usize) -> Result<[f64; 8], RowFault> {
    let mut fields = [0.0; 8];
    for (column, (&(start, end), slot)) in ROW_FIELDS.iter().zip(fields.iter_mut()).enumerate() {
        let text = slice_field(line, start, end).trim();
        *slot = text.parse().map_err(|_| RowFault::InvalidField {
            row,
            column: column + 1,
            text: text.to_string(),
        })?;
    }
    Ok(fields)
}

/// Lay out eight values in the fixed-width row format read by [`parse_axis_table`].
pub fn format_row(fields: &[f64; 8]) -> String {
    format!(
        "{:>6.0} {:>11.5} {:>17.5} {:>13.5} {:>15.6} {:>15.6e} {:>15.6e} {:>15.6e}",
        fields[0], fields[1], fields[2], fields[3], fields[4], fields[5], fields[6], fields[7]
    )
}
