//! Q Analysis - effective Q and FFT sizing for embedded constant-Q displays
//!
//! This library measures how a frequency-scaled analysis window behaves
//! against a true constant-Q transform, and estimates what each FFT size
//! costs in time and memory.

pub mod analysis;
pub mod config;
pub mod error;
pub mod model;
pub mod presets;
pub mod report;

pub use analysis::{analyze_q, analyze_q_truncated, estimate_fft_cost, estimate_memory};
pub use config::{OutputFormat, ReportConfig};
pub use error::AnalysisError;
pub use model::{AnalysisParameters, QueryResult};
