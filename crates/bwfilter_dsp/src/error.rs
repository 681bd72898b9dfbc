//! DSP Error Types

use thiserror::Error;

/// Errors that can occur while designing or running a filter
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DspError {
    #[error(
        "Invalid filter order: {0} (must be between 1 and {max})",
        max = crate::design::MAX_ORDER
    )]
    InvalidOrder(usize),

    #[error("Invalid {name}: {value} (must lie strictly between 0 and 1)")]
    InvalidFrequency { name: &'static str, value: f64 },

    #[error("Invalid bandwidth: {0} (must lie strictly between 0 and 1)")]
    InvalidBandwidth(f64),

    #[error("Invalid band edges: low {low} must be below high {high}")]
    InvalidBandEdges { low: f64, high: f64 },

    #[error("Filter used before coefficients were configured")]
    NotConfigured,

    #[error("Filter design produced a non-finite coefficient in section {section}")]
    DesignFailure { section: usize },

    #[error("Section count mismatch: {numerator} numerator vs {denominator} denominator sections")]
    SectionCountMismatch { numerator: usize, denominator: usize },
}

impl DspError {
    /// Whether the caller passed an out-of-range design parameter.
    ///
    /// These are recoverable: reject the request and ask again. Everything
    /// else is a programming error or a broken design invariant.
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(
            self,
            Self::InvalidOrder(_)
                | Self::InvalidFrequency { .. }
                | Self::InvalidBandwidth(_)
                | Self::InvalidBandEdges { .. }
        )
    }
}
