//! Renders the four cross-workload comparison charts from the
//! per-workload result tables.

use std::error::Error;
use std::path::Path;

use tracing_subscriber::EnvFilter;

use sortbench::bench::Workload;
use sortbench::chart::render_chart;
use sortbench::config::AppConfig;
use sortbench::loader::load_metric;
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

    let mut saved = Vec::new();
    for metric in Metric::ALL {
        let mut sources = Vec::new();
        for workload in Workload::ALL {
            let table_name = workload.csv_file();
            sources.push(load_metric(Path::new(&table_name), metric, workload.label())?);
        }
        let spec = series::comparison_chart(metric, &sources);
        render_chart(&spec, style, style.combined_width, style.combined_height)?;
        saved.push(spec.path);
    }

    println!("All visualization images have been saved:");
    for path in &saved {
        println!("- {}", path.display());
    }

    Ok(())
}
