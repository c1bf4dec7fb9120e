use std::fs;
use std::path::PathBuf;

use sortbench::error::SortbenchError;
use sortbench::loader::load_table;
use sortbench::series::{
    Marker, Metric, MetricSeries, combined_chart, comparison_chart, metric_chart,
    normalize_by_max, scale_percent,
};

fn unique_path(name: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!(
        "sortbench_series_{}_{}",
        name,
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    path
}

fn assert_close(a: f64, b: f64, label: &str) {
    let diff = (a - b).abs();
    assert!(diff <= 1e-9, "{label} mismatch: {a} vs {b}");
}

#[test]
fn example_table_composes_into_the_documented_values() {
    let path = unique_path("example.csv");
    fs::write(
        &path,
        "Array Size,Thread Count,Time (ms),Speedup,Efficiency (%),F Amdahl\n\
         t1,1,100.0,1.0,100.0,1.0\n\
         t2,2,55.0,1.818,90.9,1.818\n\
         t3,4,30.0,3.33,83.3,3.33\n",
    )
    .expect("write table");

    let table = load_table(&path).expect("load table");
    let normalized = normalize_by_max(&table.series(Metric::Time, "time")).expect("normalize");
    assert_eq!(normalized.values, vec![1.0, 0.55, 0.30]);

    let scaled = scale_percent(&table.series(Metric::Efficiency, "efficiency"));
    assert_close(scaled.values[0], 1.0, "scaled[0]");
    assert_close(scaled.values[1], 0.909, "scaled[1]");
    assert_close(scaled.values[2], 0.833, "scaled[2]");

    let _ = fs::remove_file(&path);
}

#[test]
fn scaling_is_invertible() {
    let series = MetricSeries::new("eff", vec![1, 2], vec![100.0, 87.5]);
    let scaled = scale_percent(&series);
    for (scaled_v, original) in scaled.values.iter().zip(&series.values) {
        assert_close(scaled_v * 100.0, *original, "scale roundtrip");
    }
}

#[test]
fn combined_chart_overlays_all_four_metrics() {
    let threads = vec![1, 2, 4];
    let times = MetricSeries::new("t", threads.clone(), vec![100.0, 55.0, 30.0]);
    let speedups = MetricSeries::new("s", threads.clone(), vec![1.0, 1.818, 3.33]);
    let efficiencies = MetricSeries::new("e", threads.clone(), vec![100.0, 90.9, 83.3]);
    let f_amdahls = MetricSeries::new("f", threads, vec![1.0, 1.818, 3.33]);

    let spec = combined_chart(&times, &speedups, &efficiencies, &f_amdahls).expect("compose");
    assert_eq!(spec.path, PathBuf::from("quicksort_combined.png"));
    assert!(spec.legend);
    assert_eq!(spec.series.len(), 4);

    let labels: Vec<&str> = spec.series.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(
        labels,
        vec!["Normalized Time", "Speedup", "Efficiency", "F Amdahl"]
    );
    let markers: Vec<Marker> = spec.series.iter().map(|s| s.marker).collect();
    assert_eq!(
        markers,
        vec![Marker::Circle, Marker::Square, Marker::Triangle, Marker::Diamond]
    );

    // Times enter normalized, efficiencies as fractions.
    assert_eq!(spec.series[0].points[0], (1, 1.0));
    assert!(spec.series[2].points.iter().all(|&(_, v)| v <= 1.0));
}

#[test]
fn combined_chart_rejects_an_all_zero_time_series() {
    let threads = vec![1, 2];
    let times = MetricSeries::new("t", threads.clone(), vec![0.0, 0.0]);
    let other = MetricSeries::new("x", threads, vec![1.0, 1.0]);

    let err = combined_chart(&times, &other, &other, &other).expect_err("degenerate");
    assert!(matches!(err, SortbenchError::DegenerateSeries { .. }));
}

#[test]
fn single_metric_chart_has_no_legend() {
    let series = MetricSeries::new("run", vec![1, 2], vec![100.0, 55.0]);
    let spec = metric_chart(&series, Metric::Speedup);
    assert_eq!(spec.title, "QuickSort Speedup with Increasing Threads");
    assert_eq!(spec.path, PathBuf::from("quicksort_speedup.png"));
    assert_eq!(spec.y_label, "Speedup");
    assert!(!spec.legend);
}

#[test]
fn comparison_chart_keeps_source_labels_in_order() {
    let sources = vec![
        MetricSeries::new("Light Load", vec![1, 2], vec![10.0, 6.0]),
        MetricSeries::new("Medium Load", vec![1, 2], vec![100.0, 60.0]),
        MetricSeries::new("Hard Load", vec![1, 2], vec![1000.0, 600.0]),
    ];

    let spec = comparison_chart(Metric::Time, &sources);
    assert_eq!(spec.path, PathBuf::from("final_time_comparison.png"));
    assert!(spec.legend);
    let labels: Vec<&str> = spec.series.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(labels, vec!["Light Load", "Medium Load", "Hard Load"]);
    let slots: Vec<usize> = spec.series.iter().map(|s| s.palette_slot).collect();
    assert_eq!(slots, vec![0, 1, 2]);
}
