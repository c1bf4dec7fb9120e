//! Multithreaded quicksort benchmark: sweep harness, CSV result tables
//! and chart rendering for the derived performance metrics.

pub mod bench;
pub mod chart;
pub mod cli;
pub mod config;
pub mod error;
pub mod loader;
pub mod report;
pub mod series;
pub mod sort;
