//! Result-table output and baseline persistence.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::thread::JoinHandle;

use crossbeam_channel::Receiver;
use csv::WriterBuilder;

use crate::bench::PerfRecord;
use crate::error::{Result, SortbenchError};

/// Result table written when a single workload is swept.
pub const SINGLE_RESULT_FILE: &str = "quicksort_performance.csv";

/// Where the sequential baseline time is persisted between runs.
pub const BASELINE_FILE: &str = "baseline_time.txt";

/// Header row of every result table.
pub const RESULT_HEADER: [&str; 6] = [
    "Array Size",
    "Thread Count",
    "Time (ms)",
    "Speedup",
    "Efficiency (%)",
    "F Amdahl",
];

/// Appends [`PerfRecord`] rows to a result table. The file is opened in
/// append mode; the header is written only when the table is new, so
/// successive runs accumulate rows under a single header.
pub struct ReportWriter {
    path: PathBuf,
    writer: csv::Writer<std::fs::File>,
}

impl ReportWriter {
    pub fn open(path: &Path) -> Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let new_table = file.metadata()?.len() == 0;
        let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);
        if new_table {
            writer
                .write_record(RESULT_HEADER)
                .map_err(|source| SortbenchError::Csv {
                    path: path.to_path_buf(),
                    source,
                })?;
        }
        Ok(Self {
            path: path.to_path_buf(),
            writer,
        })
    }

    pub fn append(&mut self, record: &PerfRecord) -> Result<()> {
        self.writer
            .write_record(&[
                record.array_size.to_string(),
                record.thread_count.to_string(),
                record.time_ms.to_string(),
                record.speedup.to_string(),
                record.efficiency_pct.to_string(),
                record.f_amdahl.to_string(),
            ])
            .map_err(|source| SortbenchError::Csv {
                path: self.path.clone(),
                source,
            })
    }

    pub fn finish(mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    /// Spawns the writer thread. It drains `rx` until every sender is
    /// dropped, then flushes; the handle yields the number of rows written.
    pub fn run(rx: Receiver<PerfRecord>, path: PathBuf) -> JoinHandle<Result<usize>> {
        std::thread::spawn(move || {
            let mut writer = ReportWriter::open(&path)?;
            let mut rows = 0;
            while let Ok(record) = rx.recv() {
                writer.append(&record)?;
                rows += 1;
            }
            writer.finish()?;
            Ok(rows)
        })
    }
}

/// Persists the sequential baseline, overwriting any earlier value.
pub fn save_baseline(path: &Path, time_ms: f64) -> Result<()> {
    std::fs::write(path, format!("{time_ms}\n"))?;
    Ok(())
}

/// Loads a previously saved baseline; `None` when no file is present.
pub fn load_baseline(path: &Path) -> Result<Option<f64>> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(SortbenchError::Io(err)),
    };
    let value = text.trim();
    value
        .parse::<f64>()
        .map(Some)
        .map_err(|_| SortbenchError::Parse {
            path: path.to_path_buf(),
            row: 0,
            column: 0,
            value: value.to_string(),
            expected: "float",
        })
}
