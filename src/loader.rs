//! CSV Loader: projects benchmark result tables into metric series.
//!
//! The column layout is fixed (see [`crate::series::Metric::column`]); the
//! header row is discarded without inspecting its content, and every data
//! row is consumed 1:1 in file order. A malformed cell aborts the whole
//! load; no partial series is ever returned.

use std::fs::File;
use std::io;
use std::path::Path;
use std::str::FromStr;

use csv::{ReaderBuilder, StringRecord};

use crate::error::{Result, SortbenchError};
use crate::series::{Metric, MetricSeries};

/// Column holding the thread count, shared by every extracted series.
pub const THREAD_COUNT_COLUMN: usize = 1;

/// All four metric columns of one result table over the shared
/// thread-count sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultTable {
    pub thread_counts: Vec<u32>,
    pub times: Vec<f64>,
    pub speedups: Vec<f64>,
    pub efficiencies: Vec<f64>,
    pub f_amdahls: Vec<f64>,
}

impl ResultTable {
    pub fn len(&self) -> usize {
        self.thread_counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.thread_counts.is_empty()
    }

    pub fn series(&self, metric: Metric, label: &str) -> MetricSeries {
        let values = match metric {
            Metric::Time => &self.times,
            Metric::Speedup => &self.speedups,
            Metric::Efficiency => &self.efficiencies,
            Metric::Amdahl => &self.f_amdahls,
        };
        MetricSeries::new(label, self.thread_counts.clone(), values.clone())
    }
}

/// Reads the requested float columns plus the thread-count column. Returns
/// one value sequence per requested index, all of equal length.
pub fn load_columns(path: &Path, columns: &[usize]) -> Result<(Vec<u32>, Vec<Vec<f64>>)> {
    let file = open_input(path)?;
    let mut reader = ReaderBuilder::new().has_headers(true).from_reader(file);

    let mut thread_counts = Vec::new();
    let mut extracted: Vec<Vec<f64>> = vec![Vec::new(); columns.len()];
    for (row_idx, record) in reader.records().enumerate() {
        let record = record.map_err(|source| SortbenchError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        let row = row_idx + 1;
        thread_counts.push(parse_field::<u32>(
            path,
            &record,
            row,
            THREAD_COUNT_COLUMN,
            "integer",
        )?);
        for (slot, &column) in columns.iter().enumerate() {
            extracted[slot].push(parse_field::<f64>(path, &record, row, column, "float")?);
        }
    }
    Ok((thread_counts, extracted))
}

/// Reads the full table (all four metrics).
pub fn load_table(path: &Path) -> Result<ResultTable> {
    let metric_columns: Vec<usize> = Metric::ALL.iter().map(|m| m.column()).collect();
    let (thread_counts, mut columns) = load_columns(path, &metric_columns)?;
    let f_amdahls = columns.pop().unwrap_or_default();
    let efficiencies = columns.pop().unwrap_or_default();
    let speedups = columns.pop().unwrap_or_default();
    let times = columns.pop().unwrap_or_default();
    Ok(ResultTable {
        thread_counts,
        times,
        speedups,
        efficiencies,
        f_amdahls,
    })
}

/// Reads a single metric as a labeled series, for the multi-source
/// comparison mode.
pub fn load_metric(path: &Path, metric: Metric, label: &str) -> Result<MetricSeries> {
    let (thread_counts, mut columns) = load_columns(path, &[metric.column()])?;
    let values = columns.pop().unwrap_or_default();
    Ok(MetricSeries::new(label, thread_counts, values))
}

fn open_input(path: &Path) -> Result<File> {
    File::open(path).map_err(|err| {
        if err.kind() == io::ErrorKind::NotFound {
            SortbenchError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            SortbenchError::Io(err)
        }
    })
}

fn parse_field<T: FromStr>(
    path: &Path,
    record: &StringRecord,
    row: usize,
    column: usize,
    expected: &'static str,
) -> Result<T> {
    let raw = record.get(column).unwrap_or("");
    raw.parse().map_err(|_| SortbenchError::Parse {
        path: path.to_path_buf(),
        row,
        column,
        value: raw.to_string(),
        expected,
    })
}

