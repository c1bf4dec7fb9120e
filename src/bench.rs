//! Benchmark sweep: workload data generation, timing and metric
//! derivation.
//!
//! The sweep itself stays on the calling thread; finished records are
//! pushed over a channel so file I/O never sits inside a timed region.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use clap::ValueEnum;
use crossbeam_channel::Sender;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{info, warn};

use crate::config::BenchConfig;
use crate::sort;

/// Named workload preset; the element count comes from the config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Workload {
    Light,
    Medium,
    Hard,
}

impl Workload {
    pub const ALL: [Workload; 3] = [Workload::Light, Workload::Medium, Workload::Hard];

    pub fn name(self) -> &'static str {
        match self {
            Workload::Light => "light",
            Workload::Medium => "medium",
            Workload::Hard => "hard",
        }
    }

    /// Series label used on the comparison charts.
    pub fn label(self) -> &'static str {
        match self {
            Workload::Light => "Light Load",
            Workload::Medium => "Medium Load",
            Workload::Hard => "Hard Load",
        }
    }

    /// Result table name in the multi-source naming scheme.
    pub fn csv_file(self) -> String {
        format!("quicksort_performance_{}.csv", self.name())
    }

    pub fn size(self, cfg: &BenchConfig) -> usize {
        match self {
            Workload::Light => cfg.light_size,
            Workload::Medium => cfg.medium_size,
            Workload::Hard => cfg.hard_size,
        }
    }
}

/// Which parallel sort the sweep times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Strategy {
    /// Recursive quicksort with budgeted branch spawning.
    Recursive,
    /// Chunk-per-thread sort followed by a k-way merge.
    SplitMerge,
}

/// One result-table row.
#[derive(Debug, Clone, PartialEq)]
pub struct PerfRecord {
    pub array_size: usize,
    pub thread_count: u32,
    pub time_ms: f64,
    pub speedup: f64,
    pub efficiency_pct: f64,
    pub f_amdahl: f64,
}

impl PerfRecord {
    /// Derives the metric columns from the baseline and this run's time.
    pub fn derive(array_size: usize, thread_count: u32, baseline_ms: f64, time_ms: f64) -> Self {
        let speedup = if time_ms > 0.0 {
            baseline_ms / time_ms
        } else {
            0.0
        };
        Self {
            array_size,
            thread_count,
            time_ms,
            speedup,
            efficiency_pct: efficiency_pct(speedup, thread_count),
            f_amdahl: f_amdahl(speedup, thread_count),
        }
    }
}

/// Speedup divided by thread count, as a percentage.
pub fn efficiency_pct(speedup: f64, thread_count: u32) -> f64 {
    if thread_count == 0 {
        return 0.0;
    }
    speedup / thread_count as f64 * 100.0
}

/// Estimated parallelizable fraction per Amdahl's law,
/// `f = p * (1 - 1/speedup) / (p - 1)`. One thread means nothing was
/// parallelized, so the factor is zero.
pub fn f_amdahl(speedup: f64, thread_count: u32) -> f64 {
    if thread_count <= 1 || speedup <= 0.0 {
        return 0.0;
    }
    let p = thread_count as f64;
    p * (1.0 - 1.0 / speedup) / (p - 1.0)
}

/// Sweep knobs shared by every run of one workload.
#[derive(Debug, Clone)]
pub struct SweepParams {
    pub max_threads: u32,
    pub spawn_threshold: usize,
    pub strategy: Strategy,
    pub seed: Option<u64>,
}

/// Uniform values in `1..=10*len`, from the given seed or OS entropy.
pub fn generate_data(len: usize, seed: Option<u64>) -> Vec<u64> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let hi = (len as u64).saturating_mul(10).max(1);
    (0..len).map(|_| rng.random_range(1..=hi)).collect()
}

/// Times the sequential sort on a copy of `data`, in milliseconds.
pub fn measure_baseline(data: &[u64]) -> f64 {
    let mut run_data = data.to_vec();
    let elapsed = time_run(|| sort::quicksort(&mut run_data));
    debug_assert!(run_data.is_sorted());
    elapsed
}

/// Sweeps thread counts `1..=max_threads`, sending one record per run.
/// Checks the stop flag between runs; a run in flight always completes.
/// Returns how many records were sent.
pub fn run_sweep(
    data: &[u64],
    baseline_ms: f64,
    params: &SweepParams,
    tx: &Sender<PerfRecord>,
    stop: &AtomicBool,
) -> usize {
    let mut sent = 0;
    for thread_count in 1..=params.max_threads {
        if stop.load(Ordering::SeqCst) {
            info!("sweep interrupted before the {thread_count}-thread run");
            break;
        }

        let mut run_data = data.to_vec();
        let elapsed = time_run(|| match params.strategy {
            Strategy::Recursive => sort::quicksort_parallel(
                &mut run_data,
                thread_count as usize,
                params.spawn_threshold,
            ),
            Strategy::SplitMerge => sort::sort_split_merge(&mut run_data, thread_count as usize),
        });
        if !run_data.is_sorted() {
            warn!("{thread_count}-thread run produced an unsorted array");
        }

        let record = PerfRecord::derive(data.len(), thread_count, baseline_ms, elapsed);
        info!(
            thread_count,
            time_ms = record.time_ms,
            speedup = record.speedup,
            "run complete"
        );
        if tx.send(record).is_err() {
            break;
        }
        sent += 1;
    }
    sent
}

fn time_run<F: FnOnce()>(work: F) -> f64 {
    let start = Instant::now();
    work();
    start.elapsed().as_secs_f64() * 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::unbounded;
    use std::sync::atomic::AtomicBool;

    #[test]
    fn metric_derivations_match_known_values() {
        let record = PerfRecord::derive(100_000, 2, 100.0, 55.0);
        assert!((record.speedup - 1.8181818).abs() < 1e-6);
        assert!((record.efficiency_pct - 90.909_09).abs() < 1e-4);
        assert!((record.f_amdahl - 0.9).abs() < 1e-6);
    }

    #[test]
    fn single_thread_run_has_no_parallel_fraction() {
        let record = PerfRecord::derive(100_000, 1, 100.0, 100.0);
        assert_eq!(record.speedup, 1.0);
        assert_eq!(record.efficiency_pct, 100.0);
        assert_eq!(record.f_amdahl, 0.0);
    }

    #[test]
    fn efficiency_guards_zero_threads() {
        assert_eq!(efficiency_pct(1.5, 0), 0.0);
    }

    #[test]
    fn amdahl_guards_degenerate_speedup() {
        assert_eq!(f_amdahl(0.0, 4), 0.0);
        assert_eq!(f_amdahl(-1.0, 4), 0.0);
    }

    #[test]
    fn seeded_generation_is_reproducible() {
        let a = generate_data(1000, Some(42));
        let b = generate_data(1000, Some(42));
        let c = generate_data(1000, Some(43));
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a.iter().all(|&v| (1..=10_000).contains(&v)));
    }

    #[test]
    fn sweep_sends_one_record_per_thread_count() {
        let data = generate_data(2_000, Some(1));
        let baseline = measure_baseline(&data);
        let params = SweepParams {
            max_threads: 3,
            spawn_threshold: 500,
            strategy: Strategy::Recursive,
            seed: Some(1),
        };
        let (tx, rx) = unbounded();
        let stop = AtomicBool::new(false);

        let sent = run_sweep(&data, baseline, &params, &tx, &stop);
        drop(tx);

        assert_eq!(sent, 3);
        let records: Vec<PerfRecord> = rx.iter().collect();
        assert_eq!(records.len(), 3);
        for (i, record) in records.iter().enumerate() {
            assert_eq!(record.thread_count, i as u32 + 1);
            assert_eq!(record.array_size, 2_000);
            assert!(record.time_ms >= 0.0);
        }
    }

    #[test]
    fn raised_stop_flag_ends_the_sweep_immediately() {
        let data = generate_data(500, Some(2));
        let params = SweepParams {
            max_threads: 8,
            spawn_threshold: 500,
            strategy: Strategy::SplitMerge,
            seed: Some(2),
        };
        let (tx, rx) = unbounded();
        let stop = AtomicBool::new(true);

        let sent = run_sweep(&data, 10.0, &params, &tx, &stop);
        drop(tx);

        assert_eq!(sent, 0);
        assert!(rx.iter().next().is_none());
    }
}
