use std::fmt;

// ---------------------------------------------------------------------------
// Axis – one of the three translational excitation directions
// ---------------------------------------------------------------------------

/// Spatial direction of a participation-factor table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// All axes in report order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Text that introduces this axis' table in the report.
    pub fn marker(self) -> &'static str {
        match self {
            Axis::X => "X  DIRECTION",
            Axis::Y => "Y  DIRECTION",
            Axis::Z => "Z  DIRECTION",
        }
    }

    /// Position of the axis inside [`Axis::ALL`].
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        };
        write!(f, "{name}")
    }
}

// ---------------------------------------------------------------------------
// Report – the raw text, split into lines
// ---------------------------------------------------------------------------

/// A modal output report as an ordered list of lines (terminators removed).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Report {
    lines: Vec<String>,
}

impl Report {
    /// Decode raw bytes as Latin-1, so every byte is exactly one character
    /// and fixed column offsets stay valid whatever the file contains.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let text: String = bytes.iter().map(|&b| b as char).collect();
        Self::from_text(&text)
    }

    /// Split already-decoded text into lines (`\n` and `\r\n` both accepted).
    pub fn from_text(text: &str) -> Self {
        Report {
            lines: text.lines().map(str::to_string).collect(),
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

// ---------------------------------------------------------------------------
// ModeRow / AxisTable – one parsed participation-factor table
// ---------------------------------------------------------------------------

/// One row of a participation-factor table.
///
/// The first eight fields mirror the report columns; `cumulative_ratio` is
/// derived while parsing and is the running sum of `mass_ratio` up to and
/// including this mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModeRow {
    /// Mode number, kept as a float like every other column.
    pub mode: f64,
    /// Natural frequency in Hz.
    pub frequency: f64,
    /// Period in seconds.
    pub period: f64,
    pub participation_factor: f64,
    /// Participation factor relative to the largest one in the table.
    pub participation_ratio: f64,
    pub effective_mass: f64,
    /// Cumulative mass fraction as printed by the solver.
    pub mass_fraction: f64,
    /// Ratio of effective mass to total mass for this mode alone.
    pub mass_ratio: f64,
    /// Running sum of `mass_ratio` over the table, in file order.
    pub cumulative_ratio: f64,
}

impl ModeRow {
    /// Build a row from the eight report columns, with no accumulation yet.
    pub fn from_fields(fields: [f64; 8]) -> Self {
        let [
            mode,
            frequency,
            period,
            participation_factor,
            participation_ratio,
            effective_mass,
            mass_fraction,
            mass_ratio,
        ] = fields;
        ModeRow {
            mode,
            frequency,
            period,
            participation_factor,
            participation_ratio,
            effective_mass,
            mass_fraction,
            mass_ratio,
            cumulative_ratio: 0.0,
        }
    }

    /// All nine columns in table order.
    pub fn columns(&self) -> [f64; 9] {
        [
            self.mode,
            self.frequency,
            self.period,
            self.participation_factor,
            self.participation_ratio,
            self.effective_mass,
            self.mass_fraction,
            self.mass_ratio,
            self.cumulative_ratio,
        ]
    }
}

/// Participation-factor table of one axis, one row per mode in file order.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisTable {
    pub axis: Axis,
    pub rows: Vec<ModeRow>,
}

impl AxisTable {
    /// Build a table and fill in the cumulative column.
    pub fn from_rows(axis: Axis, mut rows: Vec<ModeRow>) -> Self {
        let mut cumulative = 0.0;
        for row in &mut rows {
            cumulative += row.mass_ratio;
            row.cumulative_ratio = cumulative;
        }
        AxisTable { axis, rows }
    }

    pub fn mode_count(&self) -> usize {
        self.rows.len()
    }

    /// Total participation of this axis (last cumulative value).
    pub fn total_ratio(&self) -> f64 {
        self.rows.last().map_or(0.0, |row| row.cumulative_ratio)
    }
}

// ---------------------------------------------------------------------------
// StepCurve – plottable staircase of accumulated participation
// ---------------------------------------------------------------------------

/// A point on a step curve: frequency in Hz, accumulated ratio in percent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepPoint {
    pub frequency: f64,
    pub percent: f64,
}

impl StepPoint {
    pub fn new(frequency: f64, percent: f64) -> Self {
        StepPoint { frequency, percent }
    }
}

/// Staircase curve with two points per mode.
#[derive(Debug, Clone, PartialEq)]
pub struct StepCurve {
    pub axis: Axis,
    pub points: Vec<StepPoint>,
}

impl StepCurve {
    /// Accumulated percentage reached after the last mode.
    pub fn max_percent(&self) -> f64 {
        self.points.last().map_or(0.0, |p| p.percent)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

// ---------------------------------------------------------------------------
// ModalReport – everything extracted from one report
// ---------------------------------------------------------------------------

/// Parsed content of a modal output report.
#[derive(Debug, Clone, PartialEq)]
pub struct ModalReport {
    /// Number of modes declared by the report; every table has this many rows.
    pub mode_count: usize,
    /// Total mass of the model. Informational only.
    pub total_mass: f64,
    /// Tables in [`Axis::ALL`] order.
    pub tables: [AxisTable; 3],
}

impl ModalReport {
    pub fn table(&self, axis: Axis) -> &AxisTable {
        &self.tables[axis.index()]
    }
}
