//! Chart Renderer: draws a [`ChartSpec`] onto a PNG bitmap backend.
//!
//! The renderer owns everything visual: axis extents, tick placement at
//! exactly the observed thread counts, per-series colors from the
//! configured palette, markers and the legend box. The composer never
//! computes layout.

use std::error::Error;

use plotters::prelude::*;
use plotters::style::full_palette::{ORANGE, PURPLE};
use tracing::warn;

use crate::config::ChartConfig;
use crate::series::{ChartSeries, ChartSpec, Marker};

const FALLBACK_PALETTE: [RGBColor; 4] = [BLUE, RED, GREEN, PURPLE];

/// Renders `spec` to `spec.path`, overwriting any existing file.
pub fn render_chart(
    spec: &ChartSpec,
    style: &ChartConfig,
    width: u32,
    height: u32,
) -> Result<(), Box<dyn Error>> {
    let root = BitMapBackend::new(&spec.path, (width, height)).into_drawing_area();
    root.fill(&WHITE)?;

    let (x_ticks, x_lo, x_hi) = x_axis(&spec.series);
    let (y_lo, y_hi) = y_extent(&spec.series);

    let mut chart = ChartBuilder::on(&root)
        .caption(&spec.title, ("sans-serif", style.font_size as i32))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d((x_lo..x_hi).with_key_points(x_ticks), y_lo..y_hi)?;

    chart
        .configure_mesh()
        .x_desc(spec.x_label.clone())
        .y_desc(spec.y_label.clone())
        .draw()?;

    let marker_size = style.marker_size as i32;
    for series in &spec.series {
        let color = series_color(style, series.palette_slot);
        let anno = chart.draw_series(LineSeries::new(
            series.points.iter().copied(),
            color.stroke_width(style.line_width),
        ))?;
        if spec.legend {
            anno.label(series.label.clone())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
        }

        match series.marker {
            Marker::Circle => {
                chart.draw_series(
                    series
                        .points
                        .iter()
                        .map(|&(x, y)| Circle::new((x, y), marker_size, color.filled())),
                )?;
            }
            Marker::Square => {
                chart.draw_series(series.points.iter().map(|&(x, y)| {
                    EmptyElement::at((x, y))
                        + Rectangle::new(
                            [(-marker_size, -marker_size), (marker_size, marker_size)],
                            color.filled(),
                        )
                }))?;
            }
            Marker::Triangle => {
                chart.draw_series(
                    series
                        .points
                        .iter()
                        .map(|&(x, y)| TriangleMarker::new((x, y), marker_size, color.filled())),
                )?;
            }
            Marker::Diamond => {
                chart.draw_series(series.points.iter().map(|&(x, y)| {
                    EmptyElement::at((x, y))
                        + Polygon::new(
                            vec![
                                (0, -marker_size),
                                (marker_size, 0),
                                (0, marker_size),
                                (-marker_size, 0),
                            ],
                            color.filled(),
                        )
                }))?;
            }
        }
    }

    if spec.legend {
        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
    }

    root.present()?;
    Ok(())
}

/// Tick list (every thread count observed in any series, deduplicated) and
/// the x range enclosing them.
fn x_axis(series: &[ChartSeries]) -> (Vec<u32>, u32, u32) {
    let mut ticks: Vec<u32> = series
        .iter()
        .flat_map(|s| s.points.iter().map(|&(x, _)| x))
        .collect();
    ticks.sort_unstable();
    ticks.dedup();
    let lo = ticks.first().copied().unwrap_or(1);
    let hi = ticks.last().copied().unwrap_or(lo).max(lo + 1);
    (ticks, lo, hi)
}

fn y_extent(series: &[ChartSeries]) -> (f64, f64) {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for s in series {
        for &(_, y) in &s.points {
            if y.is_finite() {
                lo = lo.min(y);
                hi = hi.max(y);
            }
        }
    }
    if !lo.is_finite() || !hi.is_finite() {
        return (0.0, 1.0);
    }
    // Anchor non-negative data at zero like the axis auto-scaling the
    // charts are compared against.
    lo = lo.min(0.0);
    let span = hi - lo;
    if span < 1e-9 {
        return (lo - 1.0, hi + 1.0);
    }
    (lo, hi + span * 0.05)
}

fn series_color(style: &ChartConfig, slot: usize) -> RGBColor {
    if style.palette.is_empty() {
        return FALLBACK_PALETTE[slot % FALLBACK_PALETTE.len()];
    }
    let name = &style.palette[slot % style.palette.len()];
    match color_by_name(name) {
        Some(color) => color,
        None => {
            warn!(color = %name, "unknown palette color, falling back to black");
            BLACK
        }
    }
}

fn color_by_name(name: &str) -> Option<RGBColor> {
    match name.to_ascii_lowercase().as_str() {
        "blue" => Some(BLUE),
        "red" => Some(RED),
        "green" => Some(GREEN),
        "purple" => Some(PURPLE),
        "orange" => Some(ORANGE),
        "black" => Some(BLACK),
        "magenta" => Some(MAGENTA),
        "cyan" => Some(CYAN),
        "yellow" => Some(YELLOW),
        _ => None,
    }
}
