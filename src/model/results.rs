use crate::error::{AnalysisError, Result};
use serde::Serialize;

/// Corrected-variant result for one query frequency
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QueryResult {
    pub frequency_hz: f64,

    /// frequency / min frequency
    pub factor: f64,

    /// Real-valued window length, before truncation
    pub window_length_samples: f64,

    /// Window length truncated toward zero
    pub window_length_samples_int: u32,

    pub duration_ms: f64,
    pub effective_q: f64,
    pub bandwidth_hz: f64,
    pub bandwidth_semitones: f64,
    pub bandwidth_cents: f64,
}

impl QueryResult {
    /// Fail when the window truncates to zero samples
    pub fn check_window(&self) -> Result<()> {
        if self.window_length_samples_int == 0 {
            return Err(AnalysisError::DegenerateWindow {
                frequency_hz: self.frequency_hz,
                window_length_samples: self.window_length_samples,
            });
        }
        Ok(())
    }

    pub fn is_degenerate(&self) -> bool {
        self.check_window().is_err()
    }
}

/// Initial-variant result: Q is taken from the truncated window
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TruncatedQueryResult {
    pub frequency_hz: f64,
    pub window_length_samples_int: u32,
    pub effective_q: f64,

    /// None when the window truncated to zero samples
    pub bandwidth_hz: Option<f64>,
    pub bandwidth_semitones: Option<f64>,
}

/// FFT cost estimate for one size
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CostResult {
    pub fft_size: u32,

    /// N log2 N
    pub ops: f64,

    /// ops relative to the base size
    pub relative_cost: f64,

    pub estimated_time_ms: f64,
}

/// Memory estimate for one size, in bytes
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MemoryResult {
    pub fft_size: u32,
    pub samples_bytes: f64,
    pub fft_output_bytes: f64,
    pub kernel_bytes: f64,
    pub total_bytes: f64,
}

impl MemoryResult {
    pub fn total_kib(&self) -> f64 {
        self.total_bytes / 1024.0
    }
}
