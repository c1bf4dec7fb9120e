//! Benchmark binary: measures the sequential baseline, sweeps thread
//! counts over the chosen workloads and appends one result row per run.

use std::error::Error;
use std::path::PathBuf;
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use sortbench::bench::{self, SweepParams, Workload};
use sortbench::cli::Args;
use sortbench::config::AppConfig;
use sortbench::report::{self, BASELINE_FILE, ReportWriter, SINGLE_RESULT_FILE};

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = AppConfig::load_or_default(&args.config);

    let stop_flag = Arc::new(AtomicBool::new(false));
    let stop_for_ctrlc = stop_flag.clone();
    ctrlc::set_handler(move || {
        stop_for_ctrlc.store(true, Ordering::SeqCst);
    })?;

    // Keep first occurrence of each requested workload.
    let mut workloads: Vec<Workload> = Vec::new();
    for workload in &args.workloads {
        if !workloads.contains(workload) {
            workloads.push(*workload);
        }
    }
    let single = workloads.len() == 1;

    let params = SweepParams {
        max_threads: args.resolve_max_threads(),
        spawn_threshold: args.threshold.unwrap_or(config.bench.spawn_threshold),
        strategy: args.strategy,
        seed: args.seed,
    };
    info!(
        max_threads = params.max_threads,
        spawn_threshold = params.spawn_threshold,
        strategy = ?params.strategy,
        "sweep configured"
    );

    std::fs::create_dir_all(&args.out_dir)?;
    let baseline_path = args.out_dir.join(BASELINE_FILE);
    let mut tables: Vec<PathBuf> = Vec::new();

    for workload in &workloads {
        if stop_flag.load(Ordering::SeqCst) {
            break;
        }

        let size = workload.size(&config.bench);
        info!(workload = workload.name(), size, "generating data");
        let data = bench::generate_data(size, params.seed);

        let baseline_ms = match report::load_baseline(&baseline_path)? {
            Some(saved) if single => {
                info!("reusing saved baseline: {saved:.3} ms");
                saved
            }
            _ => {
                let measured = bench::measure_baseline(&data);
                report::save_baseline(&baseline_path, measured)?;
                info!("sequential baseline: {measured:.3} ms");
                measured
            }
        };

        let table_path = if single {
            args.out_dir.join(SINGLE_RESULT_FILE)
        } else {
            args.out_dir.join(workload.csv_file())
        };
        let (tx, rx) = crossbeam_channel::unbounded();
        let writer = ReportWriter::run(rx, table_path.clone());

        bench::run_sweep(&data, baseline_ms, &params, &tx, &stop_flag);
        drop(tx);

        let rows = writer
            .join()
            .map_err(|_| "result writer thread panicked")??;
        info!(rows, table = %table_path.display(), "table written");
        tables.push(table_path);
    }

    if stop_flag.load(Ordering::SeqCst) {
        println!("Benchmark interrupted; partial results kept.");
    } else {
        println!("Benchmark complete.");
    }
    println!("Result tables:");
    for table in &tables {
        println!("  {}", table.display());
    }

    Ok(())
}
