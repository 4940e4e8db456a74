//! Constant-Q reference values and kernel window planning
//!
//! A true constant-Q transform picks each kernel's window as
//! `Q × fs / f`, so Q stays fixed and the window grows toward the bass.
//! On a fixed FFT buffer the low bins get clipped to the FFT size, which
//! lowers their effective Q. The variable-Q schedule trades Q for fit.

use crate::error::{AnalysisError, Result};
use serde::Serialize;

/// Shortest kernel window the firmware will build
pub const MIN_KERNEL_WINDOW: u32 = 32;

/// Most center frequencies [`center_frequencies`] will lay out
pub const MAX_CENTER_BINS: usize = 4096;

/// Q of a constant-Q transform with `bins_per_octave` geometric bins
///
/// `Q = 1 / (2^(1/b) - 1)`, about 16.8 for 12 bins per octave.
pub fn ideal_q(bins_per_octave: u32) -> Result<f64> {
    if bins_per_octave == 0 {
        return Err(AnalysisError::invalid("bins per octave", 0.0));
    }
    Ok(1.0 / (2f64.powf(1.0 / f64::from(bins_per_octave)) - 1.0))
}

/// Geometrically spaced center frequencies starting at `min_hz`
///
/// If the top bin would land above `max_hz`, every bin is scaled down by the
/// same ratio so the top bin sits exactly on `max_hz`.
pub fn center_frequencies(
    num_bins: usize,
    bins_per_octave: u32,
    min_hz: f64,
    max_hz: f64,
) -> Result<Vec<f64>> {
    if bins_per_octave == 0 {
        return Err(AnalysisError::invalid("bins per octave", 0.0));
    }
    if num_bins > MAX_CENTER_BINS {
        return Err(AnalysisError::invalid("number of bins", num_bins as f64));
    }
    if !(min_hz.is_finite() && min_hz > 0.0) {
        return Err(AnalysisError::invalid("minimum frequency", min_hz));
    }
    if !(max_hz.is_finite() && max_hz >= min_hz) {
        return Err(AnalysisError::invalid("maximum frequency", max_hz));
    }

    let step = 2f64.powf(1.0 / f64::from(bins_per_octave));
    let mut freqs: Vec<f64> = (0..num_bins).map(|i| min_hz * step.powf(i as f64)).collect();

    if let Some(&top) = freqs.last() {
        if top > max_hz {
            let scale = max_hz / top;
            log::debug!("Top bin {:.1} Hz above {:.1} Hz, scaling by {:.4}", top, max_hz, scale);
            freqs.iter_mut().for_each(|f| *f *= scale);
        }
    }

    Ok(freqs)
}

/// Designed Q of the variable-Q schedule for an 8K FFT
///
/// Bass bins get a lower Q so their windows fit the buffer; treble bins get
/// a lower Q for a smoother display.
pub fn variable_q(center_hz: f64) -> f64 {
    match center_hz {
        f if f < 25.0 => 7.4,
        f if f < 30.0 => 9.2,
        f if f < 40.0 => 11.5,
        f if f < 50.0 => 14.5,
        f if f < 65.0 => 16.0,
        f if f < 160.0 => 17.0,
        f if f < 320.0 => 15.0,
        f if f < 640.0 => 13.0,
        _ => 11.0,
    }
}

/// How a planned window was forced into range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WindowClamp {
    None,
    /// Raised to [`MIN_KERNEL_WINDOW`]
    ToMinimum,
    /// Cut to the FFT size
    ToFftSize,
}

/// Planned kernel window for one center frequency
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct KernelWindow {
    pub center_hz: f64,
    pub design_q: f64,
    pub window_length: u32,

    /// Q actually achieved by `window_length`
    pub effective_q: f64,
    pub clamp: WindowClamp,
}

/// Plan the window of a kernel designed for `design_q` at `center_hz`
///
/// `window = trunc(Q × fs / f)`, raised to [`MIN_KERNEL_WINDOW`] and cut to
/// `fft_size`. The FFT size wins when the two bounds conflict.
pub fn plan_kernel_window(
    design_q: f64,
    sample_rate_hz: f64,
    center_hz: f64,
    fft_size: u32,
) -> Result<KernelWindow> {
    if !(design_q.is_finite() && design_q > 0.0) {
        return Err(AnalysisError::invalid("design Q", design_q));
    }
    if !(sample_rate_hz.is_finite() && sample_rate_hz > 0.0) {
        return Err(AnalysisError::invalid("sample rate", sample_rate_hz));
    }
    if !(center_hz.is_finite() && center_hz > 0.0) {
        return Err(AnalysisError::invalid("center frequency", center_hz));
    }
    if fft_size == 0 {
        return Err(AnalysisError::invalid("FFT size", 0.0));
    }

    let designed = (design_q * sample_rate_hz / center_hz) as u32;

    let (window_length, clamp) = if designed > fft_size {
        (fft_size, WindowClamp::ToFftSize)
    } else if designed < MIN_KERNEL_WINDOW {
        (MIN_KERNEL_WINDOW.min(fft_size), WindowClamp::ToMinimum)
    } else {
        (designed, WindowClamp::None)
    };

    let effective_q = f64::from(window_length) * center_hz / sample_rate_hz;

    if clamp == WindowClamp::ToFftSize {
        log::warn!(
            "{:.1} Hz: Q designed={:.1}, window={}, Q effective={:.1} (truncated)",
            center_hz,
            design_q,
            window_length,
            effective_q
        );
    }

    Ok(KernelWindow {
        center_hz,
        design_q,
        window_length,
        effective_q,
        clamp,
    })
}

/// Spread of effective Q over a sweep, against the ideal constant Q
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QSummary {
    pub min_q: f64,
    pub max_q: f64,
    pub mean_q: f64,
    pub ideal_q: f64,

    /// How many times lower than ideal the mean Q is
    pub shortfall: f64,
}

impl QSummary {
    /// Summarize a set of Q values; `None` when the set is empty
    pub fn from_q_values<I>(values: I, ideal_q: f64) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut count = 0usize;
        let mut sum = 0.0;
        let mut min_q = f64::INFINITY;
        let mut max_q = f64::NEG_INFINITY;

        for q in values {
            count += 1;
            sum += q;
            min_q = min_q.min(q);
            max_q = max_q.max(q);
        }

        if count == 0 {
            return None;
        }

        let mean_q = sum / count as f64;
        Some(Self {
            min_q,
            max_q,
            mean_q,
            ideal_q,
            shortfall: ideal_q / mean_q,
        })
    }

    /// True when the spread of Q is within `rel_tol` of the mean
    pub fn is_constant(&self, rel_tol: f64) -> bool {
        (self.max_q - self.min_q) <= rel_tol * self.mean_q.abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ideal_q_twelve_bins() {
        let q = ideal_q(12).unwrap();
        assert!((q - 16.8172).abs() < 1e-3);
        assert!(ideal_q(0).is_err());
    }

    #[test]
    fn test_center_frequencies_semitone_spacing() {
        let freqs = center_frequencies(13, 12, 20.0, 20480.0).unwrap();
        assert_eq!(freqs.len(), 13);
        assert_eq!(freqs[0], 20.0);
        assert!((freqs[12] - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_center_frequencies_scaled_to_max() {
        // 121 bins would reach 20 * 2^10 = 20480 Hz; cap at 10 kHz
        let freqs = center_frequencies(121, 12, 20.0, 10000.0).unwrap();
        let top = *freqs.last().unwrap();
        assert!((top - 10000.0).abs() < 1e-6);
        assert!(freqs[0] < 20.0);
    }

    #[test]
    fn test_center_frequencies_empty() {
        assert!(center_frequencies(0, 12, 20.0, 20480.0).unwrap().is_empty());
        assert!(center_frequencies(10, 12, 100.0, 50.0).is_err());
    }

    #[test]
    fn test_center_frequencies_bin_limit() {
        let freqs = center_frequencies(MAX_CENTER_BINS, 12, 20.0, 20480.0).unwrap();
        assert_eq!(freqs.len(), MAX_CENTER_BINS);
        assert!((freqs.last().unwrap() - 20480.0).abs() < 1e-6);
        // spacing stays geometric across the whole range
        assert!(freqs.windows(2).all(|w| w[1] > w[0]));

        let err = center_frequencies(MAX_CENTER_BINS + 1, 12, 20.0, 20480.0).unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidParameter { .. }));
    }

    #[test]
    fn test_variable_q_schedule() {
        assert_eq!(variable_q(20.0), 7.4);
        assert_eq!(variable_q(25.0), 9.2);
        assert_eq!(variable_q(70.0), 17.0);
        assert_eq!(variable_q(440.0), 13.0);
        assert_eq!(variable_q(10000.0), 11.0);
    }

    #[test]
    fn test_plan_clamps_bass_to_fft_size() {
        let q = ideal_q(12).unwrap();
        let w = plan_kernel_window(q, 44100.0, 20.0, 4096).unwrap();
        assert_eq!(w.window_length, 4096);
        assert_eq!(w.clamp, WindowClamp::ToFftSize);
        assert!(w.effective_q < q);
    }

    #[test]
    fn test_plan_raises_treble_to_minimum() {
        let w = plan_kernel_window(10.0, 44100.0, 20000.0, 4096).unwrap();
        assert_eq!(w.window_length, MIN_KERNEL_WINDOW);
        assert_eq!(w.clamp, WindowClamp::ToMinimum);
    }

    #[test]
    fn test_plan_fft_size_below_minimum_window() {
        // 10 * 44100 / 20000 = 22.05: above a 16-point FFT
        let w = plan_kernel_window(10.0, 44100.0, 20000.0, 16).unwrap();
        assert_eq!(w.window_length, 16);
        assert_eq!(w.clamp, WindowClamp::ToFftSize);

        // 4.5 * 44100 / 20000 = 9.9: below the minimum, which itself exceeds the FFT
        let w = plan_kernel_window(4.5, 44100.0, 20000.0, 16).unwrap();
        assert_eq!(w.window_length, 16);
        assert_eq!(w.clamp, WindowClamp::ToMinimum);

        for fft_size in [1, 8, 31, 32] {
            let w = plan_kernel_window(4.5, 44100.0, 20000.0, fft_size).unwrap();
            assert!(w.window_length <= fft_size);
        }
    }

    #[test]
    fn test_plan_unclamped() {
        // 17 * 44100 / 1000 = 749.7
        let w = plan_kernel_window(17.0, 44100.0, 1000.0, 4096).unwrap();
        assert_eq!(w.window_length, 749);
        assert_eq!(w.clamp, WindowClamp::None);
        assert!((w.effective_q - 749.0 * 1000.0 / 44100.0).abs() < 1e-12);
    }

    #[test]
    fn test_summary() {
        let s = QSummary::from_q_values([1.0, 2.0, 3.0], 16.8).unwrap();
        assert_eq!(s.min_q, 1.0);
        assert_eq!(s.max_q, 3.0);
        assert_eq!(s.mean_q, 2.0);
        assert!((s.shortfall - 8.4).abs() < 1e-12);
        assert!(!s.is_constant(1e-9));
        assert!(QSummary::from_q_values(std::iter::empty(), 16.8).is_none());
    }
}
