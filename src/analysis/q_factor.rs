//! Effective Q of the frequency-scaled window scheme
//!
//! The scheme shrinks the analysis window in proportion to frequency:
//! `window = N / (f / fmin)`. Because the window shrinks exactly as fast as
//! the frequency grows, `Q = window × f / fs` collapses to `N × fmin / fs`,
//! the same value at every frequency.

use crate::error::{AnalysisError, Result};
use crate::model::{AnalysisParameters, QueryResult, TruncatedQueryResult};

/// Analyze one frequency using the real-valued window length
///
/// Frequencies below the minimum frequency are computed, not rejected; they
/// produce windows longer than the FFT size.
///
/// # Errors
/// * `InvalidParameter` for a non-finite frequency, or one so close to 0 Hz
///   that the window overflows to infinity
/// * `DivisionByZero` if the effective Q is zero (frequency of 0 Hz)
/// * `DomainError` if a logarithm argument or the lower band edge is not
///   positive (bandwidth at least twice the frequency, negative frequencies)
pub fn analyze_q(params: &AnalysisParameters, frequency_hz: f64) -> Result<QueryResult> {
    if !frequency_hz.is_finite() {
        return Err(AnalysisError::invalid("frequency", frequency_hz));
    }
    if frequency_hz == 0.0 {
        return Err(zero_frequency());
    }

    let fs = params.sample_rate_hz();
    let factor = frequency_hz / params.min_frequency_hz();
    let window_length_samples = f64::from(params.fft_size()) / factor;
    if !window_length_samples.is_finite() {
        return Err(AnalysisError::invalid("frequency", frequency_hz));
    }
    // `as` truncates toward zero and saturates, like an integer cast
    let window_length_samples_int = window_length_samples as u32;

    let duration_ms = window_length_samples / fs * 1000.0;
    let effective_q = window_length_samples * frequency_hz / fs;
    let bandwidth_hz = bandwidth(effective_q, frequency_hz)?;
    let bandwidth_semitones = semitones(bandwidth_hz, frequency_hz)?;
    let bandwidth_cents = cents(bandwidth_hz, frequency_hz)?;

    log::debug!(
        "{:.1} Hz: window={:.3} ({}), Q={:.4}, BW={:.2} Hz / {:.1} cents",
        frequency_hz,
        window_length_samples,
        window_length_samples_int,
        effective_q,
        bandwidth_hz,
        bandwidth_cents
    );

    Ok(QueryResult {
        frequency_hz,
        factor,
        window_length_samples,
        window_length_samples_int,
        duration_ms,
        effective_q,
        bandwidth_hz,
        bandwidth_semitones,
        bandwidth_cents,
    })
}

/// Analyze one frequency the way the first version of the scheme did:
/// truncate the window to whole samples before computing Q
///
/// A window that truncates to zero gives Q = 0 and no defined bandwidth.
/// 0 Hz fails with `DivisionByZero` as in [`analyze_q`]. Unlike
/// [`analyze_q`], negative frequencies are rejected as `InvalidParameter`:
/// a negative window has no whole-sample length to truncate to.
pub fn analyze_q_truncated(
    params: &AnalysisParameters,
    frequency_hz: f64,
) -> Result<TruncatedQueryResult> {
    if frequency_hz == 0.0 {
        return Err(zero_frequency());
    }
    if !(frequency_hz.is_finite() && frequency_hz > 0.0) {
        return Err(AnalysisError::invalid("frequency", frequency_hz));
    }

    let factor = frequency_hz / params.min_frequency_hz();
    let window_length_samples = f64::from(params.fft_size()) / factor;
    if !window_length_samples.is_finite() {
        return Err(AnalysisError::invalid("frequency", frequency_hz));
    }
    let window_length_samples_int = window_length_samples as u32;
    let effective_q =
        f64::from(window_length_samples_int) * frequency_hz / params.sample_rate_hz();

    let (bandwidth_hz, bandwidth_semitones) = if effective_q > 0.0 {
        let bw = frequency_hz / effective_q;
        (Some(bw), Some(semitones(bw, frequency_hz)?))
    } else {
        log::warn!(
            "{:.1} Hz: window truncates to 0 samples, bandwidth undefined",
            frequency_hz
        );
        (None, None)
    };

    Ok(TruncatedQueryResult {
        frequency_hz,
        window_length_samples_int,
        effective_q,
        bandwidth_hz,
        bandwidth_semitones,
    })
}

// f = 0 makes the window infinite and Q = inf × 0, so it is caught up front
fn zero_frequency() -> AnalysisError {
    AnalysisError::DivisionByZero {
        quantity: "bandwidth",
        frequency_hz: 0.0,
    }
}

fn bandwidth(effective_q: f64, frequency_hz: f64) -> Result<f64> {
    if effective_q == 0.0 {
        return Err(AnalysisError::DivisionByZero {
            quantity: "bandwidth",
            frequency_hz,
        });
    }
    Ok(frequency_hz / effective_q)
}

fn semitones(bandwidth_hz: f64, frequency_hz: f64) -> Result<f64> {
    let ratio = 1.0 + bandwidth_hz / frequency_hz;
    if !(ratio > 0.0) {
        return Err(AnalysisError::DomainError {
            quantity: "bandwidth in semitones",
            frequency_hz,
            argument: ratio,
        });
    }
    Ok(12.0 * ratio.log2())
}

fn cents(bandwidth_hz: f64, frequency_hz: f64) -> Result<f64> {
    let upper = frequency_hz + bandwidth_hz / 2.0;
    let lower = frequency_hz - bandwidth_hz / 2.0;
    let ratio = upper / lower;
    // A band edge at or below 0 Hz has no pitch, even when the ratio is positive
    if lower <= 0.0 || !(ratio > 0.0) {
        return Err(AnalysisError::DomainError {
            quantity: "bandwidth in cents",
            frequency_hz,
            argument: if lower <= 0.0 { lower } else { ratio },
        });
    }
    Ok(1200.0 * ratio.log2())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn esp32() -> AnalysisParameters {
        AnalysisParameters::new(44100.0, 4096, 20.0).unwrap()
    }

    #[test]
    fn test_concert_a() {
        let r = analyze_q(&esp32(), 440.0).unwrap();

        assert!((r.factor - 22.0).abs() < 1e-12);
        assert!((r.window_length_samples - 186.1818).abs() < 1e-3);
        assert_eq!(r.window_length_samples_int, 186);
        assert!((r.duration_ms - 4.2218).abs() < 1e-3);
        assert!((r.effective_q - 1.8576).abs() < 1e-3);
        assert!((r.bandwidth_hz - 236.865).abs() < 1e-2);
        assert!((r.bandwidth_semitones - 7.456).abs() < 1e-2);
        assert!((r.bandwidth_cents - 955.5).abs() < 0.1);
    }

    #[test]
    fn test_window_at_min_frequency_is_fft_size() {
        let r = analyze_q(&esp32(), 20.0).unwrap();
        assert_eq!(r.window_length_samples, 4096.0);
        assert_eq!(r.window_length_samples_int, 4096);
        assert!((r.duration_ms - 92.88).abs() < 1e-2);
    }

    #[test]
    fn test_below_min_frequency_is_computed() {
        let r = analyze_q(&esp32(), 10.0).unwrap();
        assert_eq!(r.window_length_samples, 8192.0);
        assert!(!r.is_degenerate());
    }

    #[test]
    fn test_truncation_toward_zero() {
        // 4096 * 20 / 30 = 2730.67
        let r = analyze_q(&esp32(), 30.0).unwrap();
        assert_eq!(r.window_length_samples_int, 2730);
    }

    #[test]
    fn test_zero_frequency_is_division_by_zero() {
        let err = analyze_q(&esp32(), 0.0).unwrap_err();
        assert!(matches!(err, AnalysisError::DivisionByZero { .. }));
    }

    #[test]
    fn test_wide_bandwidth_is_domain_error() {
        // Q = 256 * 20 / 44100 ≈ 0.116, bandwidth ≈ 8.6 f
        let params = AnalysisParameters::new(44100.0, 256, 20.0).unwrap();
        let err = analyze_q(&params, 1000.0).unwrap_err();
        assert!(matches!(err, AnalysisError::DomainError { .. }));
    }

    #[test]
    fn test_bandwidth_exactly_twice_frequency_is_domain_error() {
        // Q = 0.5 gives bw = 2f and a zero lower edge
        let params = AnalysisParameters::new(1000.0, 50, 10.0).unwrap();
        let err = analyze_q(&params, 100.0).unwrap_err();
        assert!(matches!(err, AnalysisError::DomainError { .. }));
    }

    #[test]
    fn test_non_finite_frequency_rejected() {
        assert!(analyze_q(&esp32(), f64::NAN).is_err());
        assert!(analyze_q_truncated(&esp32(), f64::INFINITY).is_err());
    }

    #[test]
    fn test_truncated_variant_uses_integer_window() {
        let r = analyze_q_truncated(&esp32(), 440.0).unwrap();
        assert_eq!(r.window_length_samples_int, 186);
        assert!((r.effective_q - 186.0 * 440.0 / 44100.0).abs() < 1e-12);
        assert!((r.bandwidth_hz.unwrap() - 237.097).abs() < 1e-2);
    }

    #[test]
    fn test_truncated_variant_zero_window_has_no_bandwidth() {
        let params = AnalysisParameters::new(44100.0, 256, 20.0).unwrap();
        let r = analyze_q_truncated(&params, 20000.0).unwrap();
        assert_eq!(r.window_length_samples_int, 0);
        assert_eq!(r.effective_q, 0.0);
        assert!(r.bandwidth_hz.is_none());
        assert!(r.bandwidth_semitones.is_none());
    }

    #[test]
    fn test_negative_frequency_with_negative_log_argument_is_domain_error() {
        // Q ≈ 0.116: lower edge is positive but the upper edge is negative
        let params = AnalysisParameters::new(44100.0, 256, 20.0).unwrap();
        match analyze_q(&params, -1000.0) {
            Err(AnalysisError::DomainError { argument, .. }) => assert!(argument <= 0.0),
            other => panic!("expected DomainError, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_frequency_reports_non_positive_band_edge() {
        // both edges negative, so the ratio alone would look valid
        match analyze_q(&esp32(), -440.0) {
            Err(AnalysisError::DomainError { argument, .. }) => assert!(argument <= 0.0),
            other => panic!("expected DomainError, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_frequency_handled_alike_by_both_variants() {
        let err = analyze_q_truncated(&esp32(), 0.0).unwrap_err();
        assert!(matches!(err, AnalysisError::DivisionByZero { .. }));

        // negative frequencies only reach the formulas in the real-window variant
        let err = analyze_q_truncated(&esp32(), -440.0).unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidParameter { .. }));
        assert!(matches!(
            analyze_q(&esp32(), -440.0).unwrap_err(),
            AnalysisError::DomainError { .. }
        ));
    }

    #[test]
    fn test_infinite_window_rejected() {
        // subnormal frequency: N / (f / fmin) overflows to infinity
        let err = analyze_q(&esp32(), 1e-310).unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidParameter { .. }));

        let err = analyze_q_truncated(&esp32(), 1e-310).unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidParameter { .. }));
    }
}
