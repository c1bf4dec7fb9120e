//! Renders the four per-metric charts and the combined overlay from
//! `quicksort_performance.csv`.

use std::error::Error;
use std::path::Path;

use tracing_subscriber::EnvFilter;

use sortbench::chart::render_chart;
use sortbench::config::AppConfig;
use sortbench::loader::load_table;
use sortbench::report::SINGLE_RESULT_FILE;
use sortbench::series::{self, Metric};

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = AppConfig::load_if_present("sortbench.toml");
    let style = &config.chart;

    let table = load_table(Path::new(SINGLE_RESULT_FILE))?;

    let mut saved = Vec::new();
    for metric in Metric::ALL {
        let spec = series::metric_chart(&table.series(metric, "QuickSort"), metric);
        render_chart(&spec, style, style.width, style.height)?;
        saved.push(spec.path);
    }

    let combined = series::combined_chart(
        &table.series(Metric::Time, "Time"),
        &table.series(Metric::Speedup, "Speedup"),
        &table.series(Metric::Efficiency, "Efficiency"),
        &table.series(Metric::Amdahl, "F Amdahl"),
    )?;
    render_chart(&combined, style, style.combined_width, style.combined_height)?;
    saved.push(combined.path);

    println!("All visualization images have been saved:");
    for path in &saved {
        println!("- {}", path.display());
    }

    Ok(())
}
