//! Firmware constants and the frequency/size lists swept by default

use crate::error::Result;
use crate::model::AnalysisParameters;

/// Capture sample rate
pub const SAMPLE_RATE_HZ: f64 = 44100.0;

/// Number of constant-Q bins (10 octaves × 12)
pub const CQT_BINS: u32 = 120;
pub const BINS_PER_OCTAVE: u32 = 12;
/// FFT size of the constant-Q path; larger for sub-bass resolution
pub const CQT_FFT_SIZE: u32 = 4096;
/// Sub-bass floor for electronic music
pub const CQT_MIN_FREQ_HZ: f64 = 20.0;
/// Nearest note to 20 kHz
pub const CQT_MAX_FREQ_HZ: f64 = 20480.0;

/// FFT size of the variable-Q path
pub const VQT_FFT_SIZE: u32 = 8192;

/// Fraction of kernel bins kept after sparsification
pub const KERNEL_SPARSITY: f64 = 0.3;

/// Frequencies checked against the truncated-window scheme
pub const INITIAL_SWEEP_HZ: &[f64] = &[
    20.0, 27.5, 50.0, 100.0, 200.0, 440.0, 1000.0, 2000.0, 5000.0, 10000.0, 20000.0,
];

/// Ten octaves from the sub-bass floor, mostly on A
pub const CORRECTED_SWEEP_HZ: &[f64] = &[
    20.0, 27.5, 40.0, 55.0, 80.0, 110.0, 160.0, 220.0, 440.0, 880.0, 1760.0, 3520.0, 7040.0,
    14080.0, 20000.0,
];

/// FFT sizes compared by the cost estimate
pub const COST_SIZES: &[u32] = &[4096, 8192, 16384, 32768, 65536];

/// Frame rates whose per-frame budget the cost table is checked against
pub const FRAME_RATES: &[f64] = &[60.0, 30.0];

/// Parameters of the firmware's constant-Q path
pub fn cqt_parameters() -> Result<AnalysisParameters> {
    AnalysisParameters::new(SAMPLE_RATE_HZ, CQT_FFT_SIZE, CQT_MIN_FREQ_HZ)
}

/// Parameters of the firmware's variable-Q path
pub fn vqt_parameters() -> Result<AnalysisParameters> {
    AnalysisParameters::new(SAMPLE_RATE_HZ, VQT_FFT_SIZE, CQT_MIN_FREQ_HZ)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_valid() {
        assert_eq!(cqt_parameters().unwrap().fft_size(), 4096);
        assert_eq!(vqt_parameters().unwrap().fft_size(), 8192);
    }

    #[test]
    fn test_sweeps_ascend() {
        assert!(INITIAL_SWEEP_HZ.windows(2).all(|w| w[0] < w[1]));
        assert!(CORRECTED_SWEEP_HZ.windows(2).all(|w| w[0] < w[1]));
        assert!(COST_SIZES.iter().all(|n| n.is_power_of_two()));
    }
}
