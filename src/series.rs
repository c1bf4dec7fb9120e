//! Metric definitions and series composition.
//!
//! A [`MetricSeries`] is the unit the loader produces and the composer
//! consumes: one y-sequence over the shared thread-count x-sequence.
//! Composition turns one or more of them into a [`ChartSpec`] that the
//! renderer draws without looking back at the input tables.

use std::path::PathBuf;

use crate::error::{Result, SortbenchError};

/// The four derived metrics stored in a result table, keyed by their fixed
/// CSV column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Time,
    Speedup,
    Efficiency,
    Amdahl,
}

impl Metric {
    pub const ALL: [Metric; 4] = [
        Metric::Time,
        Metric::Speedup,
        Metric::Efficiency,
        Metric::Amdahl,
    ];

    /// 0-based column index in a result table.
    pub fn column(self) -> usize {
        match self {
            Metric::Time => 2,
            Metric::Speedup => 3,
            Metric::Efficiency => 4,
            Metric::Amdahl => 5,
        }
    }

    /// Palette slot used whenever this metric appears on a chart.
    pub fn palette_slot(self) -> usize {
        match self {
            Metric::Time => 0,
            Metric::Speedup => 1,
            Metric::Efficiency => 2,
            Metric::Amdahl => 3,
        }
    }

    pub fn axis_label(self) -> &'static str {
        match self {
            Metric::Time => "Execution Time (ms)",
            Metric::Speedup => "Speedup",
            Metric::Efficiency => "Efficiency (%)",
            Metric::Amdahl => "F Amdahl",
        }
    }

    pub fn chart_title(self) -> &'static str {
        match self {
            Metric::Time => "QuickSort Execution Time with Increasing Threads",
            Metric::Speedup => "QuickSort Speedup with Increasing Threads",
            Metric::Efficiency => "QuickSort Efficiency with Increasing Threads",
            Metric::Amdahl => "QuickSort Amdahl's Law Factor with Increasing Threads",
        }
    }

    /// Destination of the per-metric chart in the single-source variant.
    pub fn chart_file(self) -> &'static str {
        match self {
            Metric::Time => "quicksort_time.png",
            Metric::Speedup => "quicksort_speedup.png",
            Metric::Efficiency => "quicksort_efficiency.png",
            Metric::Amdahl => "quicksort_amdahl.png",
        }
    }

    pub fn comparison_title(self) -> &'static str {
        match self {
            Metric::Time => "QuickSort Execution Time Comparison Across Workloads",
            Metric::Speedup => "QuickSort Speedup Comparison Across Workloads",
            Metric::Efficiency => "QuickSort Efficiency Comparison Across Workloads",
            Metric::Amdahl => "QuickSort Amdahl's Law Factor Comparison Across Workloads",
        }
    }

    /// Destination of the per-metric chart in the multi-source variant.
    pub fn comparison_file(self) -> &'static str {
        match self {
            Metric::Time => "final_time_comparison.png",
            Metric::Speedup => "final_speedup_comparison.png",
            Metric::Efficiency => "final_efficiency_comparison.png",
            Metric::Amdahl => "final_amdahl_comparison.png",
        }
    }
}

/// One named y-sequence over the shared thread-count x-sequence, in input
/// row order.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricSeries {
    pub label: String,
    pub thread_counts: Vec<u32>,
    pub values: Vec<f64>,
}

impl MetricSeries {
    pub fn new(label: impl Into<String>, thread_counts: Vec<u32>, values: Vec<f64>) -> Self {
        Self {
            label: label.into(),
            thread_counts,
            values,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn points(&self) -> impl Iterator<Item = (u32, f64)> + '_ {
        self.thread_counts
            .iter()
            .copied()
            .zip(self.values.iter().copied())
    }

    pub fn max_value(&self) -> f64 {
        self.values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }
}

/// Divides every element by the series maximum, so the largest value maps
/// to 1.0. Fails with [`SortbenchError::DegenerateSeries`] when the maximum
/// is zero, negative or non-finite instead of emitting non-finite values.
pub fn normalize_by_max(series: &MetricSeries) -> Result<MetricSeries> {
    let max = series.max_value();
    if !max.is_finite() || max <= 0.0 {
        return Err(SortbenchError::DegenerateSeries {
            label: series.label.clone(),
        });
    }
    Ok(MetricSeries {
        label: series.label.clone(),
        thread_counts: series.thread_counts.clone(),
        values: series.values.iter().map(|v| v / max).collect(),
    })
}

/// Percentage to fraction: elementwise division by 100.
pub fn scale_percent(series: &MetricSeries) -> MetricSeries {
    MetricSeries {
        label: series.label.clone(),
        thread_counts: series.thread_counts.clone(),
        values: series.values.iter().map(|v| v / 100.0).collect(),
    }
}

/// Point marker drawn on top of a line series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Circle,
    Square,
    Triangle,
    Diamond,
}

/// One render-ready series: points plus the style hooks the renderer
/// resolves against the configured palette.
#[derive(Debug, Clone)]
pub struct ChartSeries {
    pub label: String,
    pub palette_slot: usize,
    pub marker: Marker,
    pub points: Vec<(u32, f64)>,
}

impl ChartSeries {
    fn from_series(series: &MetricSeries, palette_slot: usize, marker: Marker) -> Self {
        Self {
            label: series.label.clone(),
            palette_slot,
            marker,
            points: series.points().collect(),
        }
    }
}

/// A chart ready for rendering: series, labels, title and destination.
#[derive(Debug, Clone)]
pub struct ChartSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub path: PathBuf,
    pub series: Vec<ChartSeries>,
    pub legend: bool,
}

/// Single-source mode: one metric, one chart.
pub fn metric_chart(series: &MetricSeries, metric: Metric) -> ChartSpec {
    ChartSpec {
        title: metric.chart_title().to_string(),
        x_label: "Number of Threads".to_string(),
        y_label: metric.axis_label().to_string(),
        path: PathBuf::from(metric.chart_file()),
        series: vec![ChartSeries::from_series(
            series,
            metric.palette_slot(),
            Marker::Circle,
        )],
        legend: false,
    }
}

/// Single-source mode: the combined overlay of all four metrics. Time is
/// normalized by its own maximum, efficiency scaled from percent to a
/// fraction, speedup and the Amdahl factor plotted as-is.
pub fn combined_chart(
    times: &MetricSeries,
    speedups: &MetricSeries,
    efficiencies: &MetricSeries,
    f_amdahls: &MetricSeries,
) -> Result<ChartSpec> {
    let mut normalized_times = normalize_by_max(times)?;
    normalized_times.label = "Normalized Time".to_string();
    let mut speedups = speedups.clone();
    speedups.label = "Speedup".to_string();
    let mut scaled_efficiencies = scale_percent(efficiencies);
    scaled_efficiencies.label = "Efficiency".to_string();
    let mut f_amdahls = f_amdahls.clone();
    f_amdahls.label = "F Amdahl".to_string();

    Ok(ChartSpec {
        title: "QuickSort Performance Metrics with Increasing Threads".to_string(),
        x_label: "Number of Threads".to_string(),
        y_label: "Metric Value".to_string(),
        path: PathBuf::from("quicksort_combined.png"),
        series: vec![
            ChartSeries::from_series(&normalized_times, 0, Marker::Circle),
            ChartSeries::from_series(&speedups, 1, Marker::Square),
            ChartSeries::from_series(&scaled_efficiencies, 2, Marker::Triangle),
            ChartSeries::from_series(&f_amdahls, 3, Marker::Diamond),
        ],
        legend: true,
    })
}

/// Multi-source mode: the same metric from several load conditions on one
/// chart. The series keep their source labels.
pub fn comparison_chart(metric: Metric, sources: &[MetricSeries]) -> ChartSpec {
    ChartSpec {
        title: metric.comparison_title().to_string(),
        x_label: "Number of Threads".to_string(),
        y_label: metric.axis_label().to_string(),
        path: PathBuf::from(metric.comparison_file()),
        series: sources
            .iter()
            .enumerate()
            .map(|(slot, s)| ChartSeries::from_series(s, slot, Marker::Circle))
            .collect(),
        legend: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(values: &[f64]) -> MetricSeries {
        let threads = (1..=values.len() as u32).collect();
        MetricSeries::new("test", threads, values.to_vec())
    }

    #[test]
    fn normalize_maps_maximum_to_one() {
        let normalized = normalize_by_max(&series(&[100.0, 55.0, 30.0])).expect("normalize");
        assert_eq!(normalized.values, vec![1.0, 0.55, 0.30]);
        assert_eq!(normalized.max_value(), 1.0);
        assert!(normalized.values.iter().all(|v| (0.0..=1.0).contains(v)));
    }

    #[test]
    fn normalize_rejects_all_zero_series() {
        let err = normalize_by_max(&series(&[0.0, 0.0, 0.0])).unwrap_err();
        assert!(matches!(err, SortbenchError::DegenerateSeries { .. }));
    }

    #[test]
    fn normalize_rejects_empty_series() {
        let err = normalize_by_max(&series(&[])).unwrap_err();
        assert!(matches!(err, SortbenchError::DegenerateSeries { .. }));
    }

    #[test]
    fn metric_columns_are_fixed() {
        assert_eq!(Metric::Time.column(), 2);
        assert_eq!(Metric::Speedup.column(), 3);
        assert_eq!(Metric::Efficiency.column(), 4);
        assert_eq!(Metric::Amdahl.column(), 5);
    }
}
