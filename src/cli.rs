use std::path::PathBuf;

use clap::Parser;

use crate::bench::{Strategy, Workload};

#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
pub struct Args {
    /// Workload presets to sweep
    #[arg(long, value_delimiter = ',', default_values_t = [Workload::Medium], value_enum)]
    pub workloads: Vec<Workload>,

    /// Highest thread count in the sweep (defaults to available parallelism)
    #[arg(long)]
    pub max_threads: Option<u32>,

    /// Slice length below which the parallel sort stops spawning (overrides config)
    #[arg(long)]
    pub threshold: Option<usize>,

    /// Seed for data generation; omit for a fresh array each run
    #[arg(long)]
    pub seed: Option<u64>,

    /// Parallel sort under test
    #[arg(long, value_enum, default_value_t = Strategy::Recursive)]
    pub strategy: Strategy,

    /// Directory for result tables and the baseline file
    #[arg(long, default_value = ".")]
    pub out_dir: PathBuf,

    /// Path to config TOML
    #[arg(long, default_value = "sortbench.toml")]
    pub config: String,
}

impl Args {
    /// Sweep ceiling: the flag when given, otherwise what the host offers.
    pub fn resolve_max_threads(&self) -> u32 {
        self.max_threads.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get() as u32)
                .unwrap_or(1)
        })
    }
}
