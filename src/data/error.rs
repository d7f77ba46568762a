//! Structural errors raised while carving a modal report into tables.

use thiserror::Error;

use super::model::Axis;

/// Error returned when a report does not follow the expected layout.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ParseError {
    /// Returned when a required section marker does not occur in the report.
    #[error("marker '{marker}' not found; the report does not have the expected layout")]
    MarkerNotFound {
        /// The text that was searched for.
        marker: String,
    },
    /// Returned when a labelled scalar cannot be read from its line.
    #[error("cannot read {label} from '{text}'")]
    InvalidScalar {
        /// Name of the scalar, e.g. "number of modes".
        label: &'static str,
        /// The sliced text that failed to parse.
        text: String,
    },
    /// Returned when the report declares zero modes.
    #[error("report declares no modes")]
    NoModes,
    /// Returned when an axis table does not hold exactly the declared number of rows.
    #[error(
        "cannot process {axis} table ({fault}); check that number of modes extracted \
         ({extracted}) equals number of modes requested ({requested})"
    )]
    ModeCountMismatch {
        /// Axis whose table failed.
        axis: Axis,
        /// Mode count declared by the report.
        requested: usize,
        /// Consecutive data rows actually found.
        extracted: usize,
        /// What went wrong at the first offending row.
        fault: RowFault,
    },
    /// Returned when one or more axis tables failed; every failure is kept.
    #[error("{} axis table(s) failed: {}", .0.len(), join_errors(.0))]
    AxisTablesFailed(Vec<ParseError>),
}

/// The specific defect found at the first offending table row.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RowFault {
    /// The report ended before row `row` (1-based).
    #[error("row {row} is missing")]
    MissingRow { row: usize },
    /// A field of row `row` is empty or not a number.
    #[error("row {row}, column {column}: '{text}' is not a number")]
    InvalidField {
        row: usize,
        column: usize,
        text: String,
    },
    /// Data rows continue past the declared mode count.
    #[error("{extra} data row(s) follow the last declared mode")]
    ExtraRows { extra: usize },
}

impl ParseError {
    /// Axis of a table-level failure, if any.
    pub fn axis(&self) -> Option<Axis> {
        match self {
            ParseError::ModeCountMismatch { axis, .. } => Some(*axis),
            _ => None,
        }
    }
}

fn join_errors(errors: &[ParseError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mismatch_message_names_requested_and_extracted() {
        let error = ParseError::ModeCountMismatch {
            axis: Axis::Y,
            requested: 6,
            extracted: 4,
            fault: RowFault::MissingRow { row: 5 },
        };
        let text = error.to_string();
        assert!(text.contains("y table"));
        assert!(text.contains("row 5 is missing"));
        assert!(text.contains("extracted (4)"));
        assert!(text.contains("requested (6)"));
        assert_eq!(error.axis(), Some(Axis::Y));
    }

    #[test]
    fn aggregate_lists_every_failure() {
        let failures = vec![
            ParseError::ModeCountMismatch {
                axis: Axis::X,
                requested: 3,
                extracted: 2,
                fault: RowFault::MissingRow { row: 3 },
            },
            ParseError::ModeCountMismatch {
                axis: Axis::Z,
                requested: 3,
                extracted: 4,
                fault: RowFault::ExtraRows { extra: 1 },
            },
        ];
        let text = ParseError::AxisTablesFailed(failures).to_string();
        assert!(text.starts_with("2 axis table(s) failed"));
        assert!(text.contains("x table"));
        assert!(text.contains("z table"));
    }
}
