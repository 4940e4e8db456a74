//! Error types for the Q and cost formulas

use thiserror::Error;

/// Failure of a single analysis query
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    /// Effective Q collapsed to zero, so bandwidth = f / Q is undefined
    #[error("division by zero computing {quantity} at {frequency_hz} Hz")]
    DivisionByZero {
        quantity: &'static str,
        frequency_hz: f64,
    },

    /// Logarithm of a non-positive argument, or a band edge at or below 0 Hz
    #[error("non-positive value {argument} computing {quantity} at {frequency_hz} Hz")]
    DomainError {
        quantity: &'static str,
        frequency_hz: f64,
        argument: f64,
    },

    /// Input outside the range the formulas accept
    #[error("invalid {name}: {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    /// Window shorter than one sample after truncation
    #[error("window at {frequency_hz} Hz is {window_length_samples:.3} samples (truncates to 0)")]
    DegenerateWindow {
        frequency_hz: f64,
        window_length_samples: f64,
    },
}

impl AnalysisError {
    pub(crate) fn invalid(name: &'static str, value: f64) -> Self {
        AnalysisError::InvalidParameter { name, value }
    }
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
