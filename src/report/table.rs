use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::data::model::StepCurve;

/// Comment marker that opens the header line.
pub const COMMENT_PREFIX: &str = "# ";
/// Column labels, written after [`COMMENT_PREFIX`].
pub const TABLE_LABELS: &str = " Freq[Hz] Acc.rMassX[%] Acc.rMassY[%] Acc.rMassZ[%]";

/// One line of the export table: a step-curve point of every axis.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ExportRow {
    pub frequency: f64,
    pub x_percent: f64,
    pub y_percent: f64,
    pub z_percent: f64,
}

/// Zip the x, y and z curves point by point; frequencies come from x.
pub fn export_rows(curves: &[StepCurve; 3]) -> Result<Vec<ExportRow>> {
    let [x, y, z] = curves;
    if x.len() != y.len() || x.len() != z.len() {
        bail!(
            "step curves differ in length (x: {}, y: {}, z: {})",
            x.len(),
            y.len(),
            z.len()
        );
    }
    Ok(x.points
        .iter()
        .zip(&y.points)
        .zip(&z.points)
        .map(|((px, py), pz)| ExportRow {
            frequency: px.frequency,
            x_percent: px.percent,
            y_percent: py.percent,
            z_percent: pz.percent,
        })
        .collect())
}

// ---------------------------------------------------------------------------
// Writer
// ---------------------------------------------------------------------------

pub fn write_table(rows: &[ExportRow], path: &Path) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    write_table_to(rows, file).with_context(|| format!("writing table {}", path.display()))
}

/// Header comment, then one space-separated row per point, three decimals.
pub fn write_table_to<W: Write>(rows: &[ExportRow], mut out: W) -> Result<()> {
    writeln!(out, "{COMMENT_PREFIX}{TABLE_LABELS}")?;
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b' ')
        .has_headers(false)
        .from_writer(out);
    for row in rows {
        writer.write_record([
            format!("{:.3}", row.frequency),
            format!("{:.3}", row.x_percent),
            format!("{:.3}", row.y_percent),
            format!("{:.3}", row.z_percent),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Reader
// ---------------------------------------------------------------------------

pub fn read_table(path: &Path) -> Result<Vec<ExportRow>> {
    let file = File::open(path).with_context(|| format!("opening table {}", path.display()))?;
    read_table_from(file)
}

pub fn read_table_from<R: Read>(input: R) -> Result<Vec<ExportRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b' ')
        .has_headers(false)
        .comment(Some(b'#'))
        .from_reader(input);
    reader
        .deserialize::<ExportRow>()
        .enumerate()
        .map(|(i, row)| row.with_context(|| format!("table row {}", i + 1)))
        .collect()
}

/// Maxima per axis as recorded in the last table row.
pub fn table_maxima(rows: &[ExportRow]) -> Option<[f64; 3]> {
    rows.last()
        .map(|row| [row.x_percent, row.y_percent, row.z_percent])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Axis, StepPoint};

    fn curve(axis: Axis, points: &[(f64, f64)]) -> StepCurve {
        StepCurve {
            axis,
            points: points.iter().map(|&(f, p)| StepPoint::new(f, p)).collect(),
        }
    }

    fn sample_curves() -> [StepCurve; 3] {
        [
            curve(Axis::X, &[(5.0, 0.0), (5.0, 30.000000000000004), (8.0, 30.0), (8.0, 50.0)]),
            curve(Axis::Y, &[(5.0, 0.0), (5.0, 1.25), (8.0, 1.25), (8.0, 61.0)]),
            curve(Axis::Z, &[(5.0, 0.0), (5.0, 0.0), (8.0, 0.0), (8.0, 0.1234)]),
        ]
    }

    #[test]
    fn writes_commented_header_and_fixed_decimals() {
        let rows = export_rows(&sample_curves()).unwrap();
        let mut out = Vec::new();
        write_table_to(&rows, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(
            lines[0],
            "#  Freq[Hz] Acc.rMassX[%] Acc.rMassY[%] Acc.rMassZ[%]"
        );
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[1], "5.000 0.000 0.000 0.000");
        assert_eq!(lines[2], "5.000 30.000 1.250 0.000");
        assert_eq!(lines[4], "8.000 50.000 61.000 0.123");
    }

    #[test]
    fn reading_back_recovers_maxima() {
        let curves = sample_curves();
        let rows = export_rows(&curves).unwrap();
        let mut out = Vec::new();
        write_table_to(&rows, &mut out).unwrap();

        let parsed = read_table_from(out.as_slice()).unwrap();
        assert_eq!(parsed.len(), 4);
        let maxima = table_maxima(&parsed).unwrap();
        for (curve, max) in curves.iter().zip(maxima) {
            assert!((curve.max_percent() - max).abs() <= 0.0005 + 1e-12);
        }
    }

    #[test]
    fn mismatched_curves_are_rejected() {
        let mut curves = sample_curves();
        curves[2].points.pop();
        assert!(export_rows(&curves).is_err());
        assert_eq!(table_maxima(&[]), None);
    }
}
