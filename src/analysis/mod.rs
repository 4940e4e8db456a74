//! Q-factor and cost analysis
//!
//! Pure formulas for the frequency-scaled window scheme, the FFT cost and
//! memory estimates, and the constant-Q reference they are measured against.
//! Sweeps run the formulas over lists in parallel.

mod constant_q;
mod cost;
mod q_factor;
mod sweep;

pub use constant_q::{
    center_frequencies, ideal_q, plan_kernel_window, variable_q, KernelWindow, QSummary,
    WindowClamp, MAX_CENTER_BINS, MIN_KERNEL_WINDOW,
};
pub use cost::{estimate_fft_cost, estimate_fft_cost_with, estimate_memory, estimate_memory_with};
pub use q_factor::{analyze_q, analyze_q_truncated};
pub use sweep::{plan_kernels, sweep_cost, sweep_memory, sweep_q, sweep_q_truncated, QRow};
