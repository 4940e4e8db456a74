//! FFT cost and memory estimates
//!
//! Rough sizing for choosing an FFT length on a microcontroller: radix-2
//! op count, time at a given clock, and the buffers a sparse-kernel
//! constant-Q transform keeps resident.

use crate::error::{AnalysisError, Result};
use crate::model::{CostModel, CostResult, MemoryModel, MemoryResult};

/// Bytes per f32 sample
const SAMPLE_BYTES: f64 = 4.0;
/// Bytes per complex f32 value
const COMPLEX_BYTES: f64 = 8.0;

/// Estimate op count, relative cost and run time of an `fft_size`-point FFT
pub fn estimate_fft_cost(
    fft_size: u32,
    base_size: u32,
    cycles_per_op: f64,
    clock_hz: f64,
) -> Result<CostResult> {
    if fft_size == 0 {
        return Err(AnalysisError::invalid("FFT size", 0.0));
    }
    // log2(1) = 0 would make the baseline cost zero
    if base_size < 2 {
        return Err(AnalysisError::invalid("base size", f64::from(base_size)));
    }
    if !(cycles_per_op.is_finite() && cycles_per_op >= 0.0) {
        return Err(AnalysisError::invalid("cycles per op", cycles_per_op));
    }
    if !(clock_hz.is_finite() && clock_hz > 0.0) {
        return Err(AnalysisError::invalid("clock", clock_hz));
    }

    let ops = n_log2_n(fft_size);
    let relative_cost = ops / n_log2_n(base_size);
    let estimated_time_ms = ops * cycles_per_op / clock_hz * 1000.0;

    Ok(CostResult {
        fft_size,
        ops,
        relative_cost,
        estimated_time_ms,
    })
}

/// [`estimate_fft_cost`] with the parameters taken from a [`CostModel`]
pub fn estimate_fft_cost_with(fft_size: u32, model: &CostModel) -> Result<CostResult> {
    estimate_fft_cost(fft_size, model.base_size, model.cycles_per_op, model.clock_hz)
}

/// Estimate resident memory for an `fft_size`-point real FFT feeding
/// `num_bins` sparse kernels
pub fn estimate_memory(fft_size: u32, num_bins: u32, sparsity_fraction: f64) -> Result<MemoryResult> {
    if fft_size == 0 {
        return Err(AnalysisError::invalid("FFT size", 0.0));
    }
    if !(0.0..=1.0).contains(&sparsity_fraction) {
        return Err(AnalysisError::invalid("sparsity fraction", sparsity_fraction));
    }

    // Real FFT keeps N/2 + 1 complex bins (integer halving)
    let spectrum_bins = f64::from(fft_size / 2 + 1);

    let samples_bytes = f64::from(fft_size) * SAMPLE_BYTES;
    let fft_output_bytes = spectrum_bins * COMPLEX_BYTES;
    let kernel_bytes = f64::from(num_bins) * spectrum_bins * COMPLEX_BYTES * sparsity_fraction;

    Ok(MemoryResult {
        fft_size,
        samples_bytes,
        fft_output_bytes,
        kernel_bytes,
        total_bytes: samples_bytes + fft_output_bytes + kernel_bytes,
    })
}

/// [`estimate_memory`] with the parameters taken from a [`MemoryModel`]
pub fn estimate_memory_with(fft_size: u32, model: &MemoryModel) -> Result<MemoryResult> {
    estimate_memory(fft_size, model.num_bins, model.sparsity_fraction)
}

fn n_log2_n(n: u32) -> f64 {
    let n = f64::from(n);
    n * n.log2()
}
