use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;

use crate::model::metrics::metric_order;
use crate::report::{MetricMeans, ReportError};

const WIDTH: u32 = 480;
const HEIGHT: u32 = 320;
const MAX_X_LABELS: usize = 10;
const MAX_Y_LABELS: usize = 6;
const SERIES_COLOR: RGBColor = RGBColor(31, 119, 180);
const MUTED_COLOR: RGBColor = RGBColor(136, 136, 136);
const FONT: &str = "sans-serif";
pub const EMPTY_LABEL: &str = "no scored rows";

type DrawResult = Result<(), DrawingAreaErrorKind<std::io::Error>>;

pub fn render_metrics_chart(means: Option<&MetricMeans>) -> Result<String, ReportError> {
    render_svg(|root| draw_metrics(root, means))
}

pub fn render_processing_chart(seconds: &[f64]) -> Result<String, ReportError> {
    render_svg(|root| draw_processing(root, seconds))
}

fn render_svg<F>(draw: F) -> Result<String, ReportError>
where
    F: FnOnce(&DrawingArea<SVGBackend<'_>, Shift>) -> DrawResult,
{
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (WIDTH, HEIGHT)).into_drawing_area();
        draw(&root)
            .and_then(|()| root.present())
            .map_err(|e| ReportError::Chart(e.to_string()))?;
    }
    Ok(svg)
}

fn draw_metrics(root: &DrawingArea<SVGBackend<'_>, Shift>, means: Option<&MetricMeans>) -> DrawResult {
    root.fill(&WHITE)?;

    let names: Vec<&str> = metric_order().iter().map(|m| m.name()).collect();
    let values: Vec<f64> = metric_order()
        .iter()
        .map(|&m| means.map_or(0.0, |v| v.get(m)))
        .collect();

    let mut chart = ChartBuilder::on(root)
        .caption("Overall Metrics", (FONT, 18))
        .margin(10)
        .x_label_area_size(32)
        .y_label_area_size(56)
        .build_cartesian_2d(names.as_slice().into_segmented(), 0f64..axis_top(&values))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .y_desc("Score")
        .y_labels(MAX_Y_LABELS)
        .x_label_formatter(&|v| match v {
            SegmentValue::CenterOf(name) => name.to_string(),
            _ => String::new(),
        })
        .draw()?;

    if means.is_none() {
        return draw_empty(root);
    }

    chart.draw_series(
        Histogram::vertical(&chart)
            .style(SERIES_COLOR.filled())
            .margin(24)
            .data(names.iter().zip(&values).map(|(name, &v)| (name, v))),
    )?;
    Ok(())
}

fn draw_processing(root: &DrawingArea<SVGBackend<'_>, Shift>, seconds: &[f64]) -> DrawResult {
    root.fill(&WHITE)?;

    let last_x = seconds.len().saturating_sub(1).max(1) as i32;
    let mut chart = ChartBuilder::on(root)
        .caption("Processing Time per Data Entry", (FONT, 18))
        .margin(10)
        .x_label_area_size(32)
        .y_label_area_size(64)
        .build_cartesian_2d(0i32..last_x, 0f64..axis_top(seconds))?;

    chart
        .configure_mesh()
        .y_desc("Processing Time (s)")
        .x_labels(seconds.len().clamp(2, MAX_X_LABELS))
        .y_labels(MAX_Y_LABELS)
        .draw()?;

    if seconds.is_empty() {
        return draw_empty(root);
    }

    let points: Vec<(i32, f64)> = seconds
        .iter()
        .enumerate()
        .map(|(i, &s)| (i as i32, s))
        .collect();
    chart.draw_series(LineSeries::new(points.iter().copied(), &SERIES_COLOR))?;
    chart.draw_series(
        points
            .iter()
            .map(|&p| Circle::new(p, 3, SERIES_COLOR.filled())),
    )?;
    Ok(())
}

fn draw_empty(root: &DrawingArea<SVGBackend<'_>, Shift>) -> DrawResult {
    let (w, h) = root.dim_in_pixel();
    let style = (FONT, 14).into_font().color(&MUTED_COLOR);
    root.draw(&Text::new(
        EMPTY_LABEL,
        (w as i32 / 2 - 48, h as i32 / 2),
        style,
    ))
}

fn axis_top(values: &[f64]) -> f64 {
    let peak = values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(0.0f64, f64::max);
    if peak > 0.0 { peak * 1.1 } else { 1.0 }
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/chart.rs"]
mod tests;
