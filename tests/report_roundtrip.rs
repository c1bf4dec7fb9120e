use std::fs;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;

use sortbench::bench::{self, PerfRecord, Strategy, SweepParams};
use sortbench::loader::load_table;
use sortbench::report::{ReportWriter, load_baseline, save_baseline};

fn unique_path(name: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!(
        "sortbench_report_{}_{}",
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
fn sweep_records_survive_the_writer_and_loader() {
    let table_path = unique_path("sweep.csv");

    let data = bench::generate_data(3_000, Some(11));
    let baseline_ms = bench::measure_baseline(&data);
    let params = SweepParams {
        max_threads: 4,
        spawn_threshold: 500,
        strategy: Strategy::Recursive,
        seed: Some(11),
    };

    let (tx, rx) = crossbeam_channel::unbounded();
    let writer = ReportWriter::run(rx, table_path.clone());
    bench::run_sweep(&data, baseline_ms, &params, &tx, &AtomicBool::new(false));
    drop(tx);
    let rows = writer.join().expect("join writer").expect("write table");
    assert_eq!(rows, 4);

    let table = load_table(&table_path).expect("reload table");
    assert_eq!(table.len(), 4);
    assert_eq!(table.thread_counts, vec![1, 2, 3, 4]);
    for i in 0..table.len() {
        assert!(table.times[i] >= 0.0);
        let p = table.thread_counts[i] as f64;
        assert_close(
            table.efficiencies[i],
            table.speedups[i] / p * 100.0,
            "efficiency",
        );
    }
    assert_eq!(table.f_amdahls[0], 0.0);

    let _ = fs::remove_file(&table_path);
}

#[test]
fn appending_keeps_earlier_rows_under_one_header() {
    let table_path = unique_path("append.csv");

    let mut writer = ReportWriter::open(&table_path).expect("open new table");
    writer
        .append(&PerfRecord::derive(1000, 1, 100.0, 100.0))
        .expect("first row");
    writer.finish().expect("flush");

    let mut writer = ReportWriter::open(&table_path).expect("reopen table");
    writer
        .append(&PerfRecord::derive(1000, 2, 100.0, 55.0))
        .expect("second row");
    writer.finish().expect("flush");

    let table = load_table(&table_path).expect("reload table");
    assert_eq!(table.len(), 2);
    assert_eq!(table.thread_counts, vec![1, 2]);
    assert_eq!(table.times, vec![100.0, 55.0]);

    let _ = fs::remove_file(&table_path);
}

#[test]
fn baseline_survives_a_round_trip() {
    let path = unique_path("baseline.txt");

    save_baseline(&path, 42.125).expect("save baseline");
    assert_eq!(load_baseline(&path).expect("load baseline"), Some(42.125));

    let _ = fs::remove_file(&path);
}
