use crate::error::{AnalysisError, Result};
use serde::Serialize;

/// Fixed inputs of the windowing scheme for one analysis run
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AnalysisParameters {
    /// Sample rate in Hz
    sample_rate_hz: f64,

    /// FFT size in samples; also the window length at the minimum frequency
    fft_size: u32,

    /// Lowest analysed frequency in Hz
    min_frequency_hz: f64,
}

impl AnalysisParameters {
    /// Build parameters, rejecting non-positive or non-finite values
    pub fn new(sample_rate_hz: f64, fft_size: u32, min_frequency_hz: f64) -> Result<Self> {
        if !(sample_rate_hz.is_finite() && sample_rate_hz > 0.0) {
            return Err(AnalysisError::invalid("sample rate", sample_rate_hz));
        }
        if fft_size == 0 {
            return Err(AnalysisError::invalid("FFT size", 0.0));
        }
        if !(min_frequency_hz.is_finite() && min_frequency_hz > 0.0) {
            return Err(AnalysisError::invalid("minimum frequency", min_frequency_hz));
        }

        Ok(Self {
            sample_rate_hz,
            fft_size,
            min_frequency_hz,
        })
    }

    pub fn sample_rate_hz(&self) -> f64 {
        self.sample_rate_hz
    }

    pub fn fft_size(&self) -> u32 {
        self.fft_size
    }

    pub fn min_frequency_hz(&self) -> f64 {
        self.min_frequency_hz
    }

    pub fn nyquist_hz(&self) -> f64 {
        self.sample_rate_hz / 2.0
    }

    /// Q the corrected scheme yields at every frequency: N × fmin / fs
    pub fn expected_q(&self) -> f64 {
        f64::from(self.fft_size) * self.min_frequency_hz / self.sample_rate_hz
    }
}

/// Machine model for the FFT time estimate
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CostModel {
    /// FFT size every other size is compared against
    pub base_size: u32,

    /// Clock cycles per butterfly operation
    pub cycles_per_op: f64,

    /// Clock frequency in Hz
    pub clock_hz: f64,
}

impl Default for CostModel {
    fn default() -> Self {
        Self {
            base_size: 4096,
            cycles_per_op: 10.0,
            clock_hz: 1e9,
        }
    }
}

/// Kernel storage model for the memory estimate
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MemoryModel {
    /// Number of constant-Q bins, one kernel each
    pub num_bins: u32,

    /// Fraction of each kernel's FFT bins kept after sparsification
    pub sparsity_fraction: f64,
}

impl Default for MemoryModel {
    fn default() -> Self {
        Self {
            num_bins: 120,
            sparsity_fraction: 0.3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_positive_inputs() {
        assert!(AnalysisParameters::new(0.0, 4096, 20.0).is_err());
        assert!(AnalysisParameters::new(44100.0, 0, 20.0).is_err());
        assert!(AnalysisParameters::new(44100.0, 4096, -1.0).is_err());
        assert!(AnalysisParameters::new(f64::NAN, 4096, 20.0).is_err());
        assert!(AnalysisParameters::new(44100.0, 4096, f64::INFINITY).is_err());
    }

    #[test]
    fn test_expected_q() {
        let params = AnalysisParameters::new(44100.0, 4096, 20.0).unwrap();
        assert!((params.expected_q() - 4096.0 * 20.0 / 44100.0).abs() < 1e-12);
        assert_eq!(params.nyquist_hz(), 22050.0);
    }
}
