//! Parallel sweeps over frequency and size lists
//!
//! Every query is independent, so sweeps fan out with rayon. Results come
//! back in input order.

use super::constant_q::{plan_kernel_window, KernelWindow};
use super::cost::{estimate_fft_cost_with, estimate_memory_with};
use super::q_factor::{analyze_q, analyze_q_truncated};
use crate::error::Result;
use crate::model::{
    AnalysisParameters, CostModel, CostResult, MemoryModel, MemoryResult, QueryResult,
    TruncatedQueryResult,
};
use rayon::prelude::*;
use serde::Serialize;

/// One row of a corrected-variant sweep
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QRow {
    #[serde(flatten)]
    pub result: QueryResult,

    /// Window truncates to zero samples
    pub degenerate: bool,
}

/// Run [`analyze_q`] over `frequencies`
///
/// Stops at the first formula error. Degenerate windows are logged and
/// flagged on the row rather than failing the sweep.
pub fn sweep_q(params: &AnalysisParameters, frequencies: &[f64]) -> Result<Vec<QRow>> {
    log::debug!(
        "Sweeping {} frequencies (fs={} Hz, N={}, fmin={} Hz)",
        frequencies.len(),
        params.sample_rate_hz(),
        params.fft_size(),
        params.min_frequency_hz()
    );

    let results: Vec<QueryResult> = frequencies
        .par_iter()
        .map(|&f| analyze_q(params, f))
        .collect::<Result<_>>()?;

    Ok(results
        .into_iter()
        .map(|result| {
            let degenerate = match result.check_window() {
                Ok(()) => false,
                Err(e) => {
                    log::warn!("{}", e);
                    true
                }
            };
            QRow { result, degenerate }
        })
        .collect())
}

/// Run [`analyze_q_truncated`] over `frequencies`
pub fn sweep_q_truncated(
    params: &AnalysisParameters,
    frequencies: &[f64],
) -> Result<Vec<TruncatedQueryResult>> {
    frequencies
        .par_iter()
        .map(|&f| analyze_q_truncated(params, f))
        .collect()
}

/// Cost estimates for each FFT size
pub fn sweep_cost(sizes: &[u32], model: &CostModel) -> Result<Vec<CostResult>> {
    sizes
        .par_iter()
        .map(|&n| estimate_fft_cost_with(n, model))
        .collect()
}

/// Memory estimates for each FFT size
pub fn sweep_memory(sizes: &[u32], model: &MemoryModel) -> Result<Vec<MemoryResult>> {
    sizes
        .par_iter()
        .map(|&n| estimate_memory_with(n, model))
        .collect()
}

/// Plan a kernel window per center frequency, taking each design Q from `q_for`
pub fn plan_kernels<F>(
    centers: &[f64],
    sample_rate_hz: f64,
    fft_size: u32,
    q_for: F,
) -> Result<Vec<KernelWindow>>
where
    F: Fn(f64) -> f64 + Sync,
{
    centers
        .par_iter()
        .map(|&f| plan_kernel_window(q_for(f), sample_rate_hz, f, fft_size))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AnalysisError;

    fn esp32() -> AnalysisParameters {
        AnalysisParameters::new(44100.0, 4096, 20.0).unwrap()
    }

    #[test]
    fn test_sweep_preserves_order() {
        let freqs = [20000.0, 20.0, 440.0, 100.0];
        let rows = sweep_q(&esp32(), &freqs).unwrap();
        let got: Vec<f64> = rows.iter().map(|r| r.result.frequency_hz).collect();
        assert_eq!(got, freqs);
    }

    #[test]
    fn test_sweep_flags_degenerate_window() {
        // Above N × fmin = 81920 Hz the window drops below one sample
        let rows = sweep_q(&esp32(), &[440.0, 100000.0]).unwrap();
        assert!(!rows[0].degenerate);
        assert!(rows[1].degenerate);
        assert_eq!(rows[1].result.window_length_samples_int, 0);
    }

    #[test]
    fn test_sweep_propagates_errors() {
        let err = sweep_q(&esp32(), &[440.0, 0.0]).unwrap_err();
        assert!(matches!(err, AnalysisError::DivisionByZero { .. }));
    }

    #[test]
    fn test_sweep_cost_and_memory() {
        let sizes = [4096, 8192, 16384];
        let cost = sweep_cost(&sizes, &CostModel::default()).unwrap();
        assert_eq!(cost.len(), 3);
        assert_eq!(cost[0].relative_cost, 1.0);
        assert!(cost.windows(2).all(|w| w[0].ops < w[1].ops));

        let mem = sweep_memory(&sizes, &MemoryModel::default()).unwrap();
        assert_eq!(mem[2].fft_size, 16384);
        assert!(mem.windows(2).all(|w| w[0].total_bytes < w[1].total_bytes));
    }

    #[test]
    fn test_plan_kernels_constant_q() {
        let kernels = plan_kernels(&[20.0, 1000.0], 44100.0, 4096, |_| 17.0).unwrap();
        assert_eq!(kernels[0].window_length, 4096);
        assert_eq!(kernels[1].window_length, 749);
    }
}
