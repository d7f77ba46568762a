use std::path::{Path, PathBuf};

use crate::report::chart::ChartStyle;

// ---------------------------------------------------------------------------
// Definitions
// ---------------------------------------------------------------------------

/// Directory holding the modal output report.
pub const INPUT_DIR: &str = "data";
/// File name of the modal output report inside [`INPUT_DIR`].
pub const DATA_FILE: &str = "Modal_Output.txt";
/// Prefix shared by the chart and the table file names.
pub const OUTPUT_PREFIX: &str = "RatioAccMass_";

/// Everything one run needs to know, independent of the report content.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub input_dir: PathBuf,
    pub data_file: String,
    /// Where the chart and table are written.
    pub output_dir: PathBuf,
    pub output_prefix: String,
    /// Chart size in inches (width, height).
    pub figure_size: (f64, f64),
    pub dpi: f64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from(INPUT_DIR),
            data_file: DATA_FILE.to_string(),
            output_dir: PathBuf::from("."),
            output_prefix: OUTPUT_PREFIX.to_string(),
            figure_size: (10.0, 6.0),
            dpi: 300.0,
        }
    }
}

impl RunConfig {
    pub fn input_path(&self) -> PathBuf {
        self.input_dir.join(&self.data_file)
    }

    /// `<prefix><data file stem>.png` in the output directory.
    pub fn chart_path(&self) -> PathBuf {
        let stem = Path::new(&self.data_file)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.output_dir
            .join(format!("{}{}.png", self.output_prefix, stem))
    }

    /// `<prefix><data file name>` in the output directory.
    pub fn table_path(&self) -> PathBuf {
        self.output_dir
            .join(format!("{}{}", self.output_prefix, self.data_file))
    }

    pub fn chart_style(&self) -> ChartStyle {
        let (width, height) = self.figure_size;
        ChartStyle {
            width: (width * self.dpi).round() as u32,
            height: (height * self.dpi).round() as u32,
            dpi: self.dpi,
        }
    }
}
