use std::ops::Range;
use std::panic;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use log::debug;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::{FontDesc, FontFamily, FontStyle};

use crate::color::series_color;
use crate::data::model::StepCurve;

pub const SUPTITLE: &str = "Accumulated ratio modal mass to total mass";
const X_DESC: &str = "Frequency [Hz]";
const Y_DESC: &str = "Acc. ratio mass to total mass [%]";
const GRID: RGBColor = RGBColor(0x99, 0x99, 0x99);

/// Pixel size and resolution of the rendered chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartStyle {
    pub width: u32,
    pub height: u32,
    /// Dots per inch; font sizes and line widths are given in points and
    /// scaled by this.
    pub dpi: f64,
}

impl ChartStyle {
    /// Convert a size in typographic points to pixels.
    fn px(&self, points: f64) -> f64 {
        points * self.dpi / 72.0
    }

    fn text(&self, points: f64) -> TextStyle<'static> {
        FontDesc::new(FontFamily::SansSerif, self.px(points), FontStyle::Normal).color(&BLACK)
    }
}

/// Second title line: maxima per axis and mode count.
pub fn chart_subtitle(maxima: [f64; 3], mode_count: usize) -> String {
    format!(
        "Max. ratio in (x,y,z) = ({:2.1},{:2.1},{:2.1})[%], Number of modes = {}",
        maxima[0], maxima[1], maxima[2], mode_count
    )
}

/// Render the three step curves into a PNG at `path`.
///
/// The chart is drawn into an RGB buffer and encoded separately, so the
/// plotting backend never touches the filesystem. A panic inside the
/// backend (font loading, mostly) is turned into an error.
pub fn render_chart(
    curves: &[StepCurve; 3],
    mode_count: usize,
    path: &Path,
    style: &ChartStyle,
) -> Result<()> {
    panic::catch_unwind(panic::AssertUnwindSafe(|| {
        render_png(curves, mode_count, path, style)
    }))
    .map_err(|_| anyhow!("plotting backend panicked"))?
}

fn render_png(
    curves: &[StepCurve; 3],
    mode_count: usize,
    path: &Path,
    style: &ChartStyle,
) -> Result<()> {
    let mut buffer = vec![0u8; style.width as usize * style.height as usize * 3];
    {
        let root =
            BitMapBackend::with_buffer(&mut buffer, (style.width, style.height)).into_drawing_area();
        draw_chart(&root, curves, mode_count, style)?;
        root.present()?;
    }

    image::save_buffer(
        path,
        &buffer,
        style.width,
        style.height,
        image::ColorType::Rgb8,
    )
    .with_context(|| format!("encoding chart {}", path.display()))?;
    debug!("chart {}x{} px written to {}", style.width, style.height, path.display());
    Ok(())
}

fn draw_chart<DB>(
    root: &DrawingArea<DB, Shift>,
    curves: &[StepCurve; 3],
    mode_count: usize,
    style: &ChartStyle,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;
    let area = root.titled(SUPTITLE, style.text(16.0))?;

    let maxima = curves.each_ref().map(StepCurve::max_percent);
    let label_px = style.px(10.0);
    let mut chart = ChartBuilder::on(&area)
        .caption(chart_subtitle(maxima, mode_count), style.text(10.0))
        .margin(style.px(8.0) as i32)
        .x_label_area_size((label_px * 3.0) as i32)
        .y_label_area_size((label_px * 4.0) as i32)
        .build_cartesian_2d(frequency_range(curves), 0.0..100.0)?;

    chart
        .configure_mesh()
        .x_desc(X_DESC)
        .y_desc(Y_DESC)
        .bold_line_style(&GRID.mix(0.5))
        .light_line_style(&GRID.mix(0.2))
        .x_max_light_lines(5)
        .y_max_light_lines(5)
        .label_style(style.text(10.0))
        .axis_desc_style(style.text(10.0))
        .draw()?;

    let stroke = style.px(1.5).round().max(1.0) as u32;
    for curve in curves {
        let color = series_color(curve.axis);
        chart
            .draw_series(LineSeries::new(
                curve.points.iter().map(|p| (p.frequency, p.percent)),
                color.stroke_width(stroke),
            ))?
            .label(format!("Acc. {}-Mass", curve.axis))
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 3 * label_px as i32, y)], color.stroke_width(stroke))
            });
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK.mix(0.3))
        .label_font(style.text(10.0))
        .position(SeriesLabelPosition::LowerRight)
        .draw()?;

    Ok(())
}

/// Frequency span of all curves with a 5% margin on each side.
fn frequency_range(curves: &[StepCurve; 3]) -> Range<f64> {
    let (lo, hi) = curves
        .iter()
        .flat_map(|c| c.points.iter())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
            (lo.min(p.frequency), hi.max(p.frequency))
        });
    if !lo.is_finite() || !hi.is_finite() {
        return 0.0..1.0;
    }
    let span = hi - lo;
    if span <= f64::EPSILON * hi.abs().max(1.0) {
        return (lo - 1.0)..(hi + 1.0);
    }
    let pad = 0.05 * span;
    (lo - pad)..(hi + pad)
}
