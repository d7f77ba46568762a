use super::model::{AxisTable, StepCurve, StepPoint};

// ---------------------------------------------------------------------------
// Step-curve builder
// ---------------------------------------------------------------------------

/// Turn an axis table into a right-continuous staircase.
///
/// Each mode contributes two points at its frequency: the level reached by
/// the previous mode (0 for the first) and then its own accumulated level,
/// both in percent. Connected in order, the points draw flat runs between
/// modes and vertical jumps at each mode's frequency.
pub fn build_step_curve(table: &AxisTable) -> StepCurve {
    let mut points = Vec::with_capacity(2 * table.rows.len());
    let mut previous = 0.0;
    for row in &table.rows {
        let level = 100.0 * row.cumulative_ratio;
        points.push(StepPoint::new(row.frequency, previous));
        points.push(StepPoint::new(row.frequency, level));
        previous = level;
    }
    StepCurve {
        axis: table.axis,
        points,
    }
}
