//! Cascaded IIR Filter
//!
//! Runs samples through a chain of second-order sections, each in
//! Direct-Form-II-Transposed.

use std::sync::Arc;

use crate::coefficients::FilterCoefficients;
use crate::error::DspError;

/// Two-element delay line of one DF2T section
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DelayLine {
    pub u0: f64,
    pub u1: f64,
}

/// Stateful cascade of biquad sections
///
/// Starts unconfigured; [`CascadeFilter::configure`] assigns coefficients and
/// zeroes one delay line per section. One instance per stream: `process`
/// takes `&mut self`, so concurrent use needs separate instances (which may
/// share the same `Arc<FilterCoefficients>`).
#[derive(Debug, Clone, Default)]
pub struct CascadeFilter {
    coefficients: Option<Arc<FilterCoefficients>>,
    delay: Vec<DelayLine>,
}

impl CascadeFilter {
    /// Create an unconfigured filter
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a filter that is ready to process
    pub fn with_coefficients(coefficients: impl Into<Arc<FilterCoefficients>>) -> Self {
        let mut filter = Self::new();
        filter.configure(coefficients);
        filter
    }

    /// Assign coefficients and reset the delay state to zero
    ///
    /// The delay buffer is resized to the new section count, so reassigning a
    /// different design never carries state over from the old one.
    pub fn configure(&mut self, coefficients: impl Into<Arc<FilterCoefficients>>) {
        let coefficients = coefficients.into();
        self.delay.clear();
        self.delay
            .resize(coefficients.section_count(), DelayLine::default());
        self.coefficients = Some(coefficients);
    }

    pub fn is_configured(&self) -> bool {
        self.coefficients.is_some()
    }

    pub fn coefficients(&self) -> Option<&Arc<FilterCoefficients>> {
        self.coefficients.as_ref()
    }

    /// Current delay state, one entry per section
    pub fn delay_lines(&self) -> &[DelayLine] {
        &self.delay
    }

    /// Clear delay lines, keeping the coefficients
    pub fn reset(&mut self) {
        self.delay.fill(DelayLine::default());
    }

    /// Filter one sample through every section in order
    ///
    /// No allocation. O(section count).
    #[inline]
    pub fn process(&mut self, sample: f64) -> Result<f64, DspError> {
        let coefficients = self.coefficients.as_ref().ok_or(DspError::NotConfigured)?;

        let mut x = sample;
        let mut y = 0.0;
        for ((n, d), u) in coefficients.sections().zip(self.delay.iter_mut()) {
            y = (n.a0 * x + u.u0) / d.b0;
            u.u0 = n.a1 * x - d.b1 * y + u.u1;
            u.u1 = n.a2 * x - d.b2 * y;
            x = y;
        }

        Ok(y)
    }

    /// Filter a buffer in place, sample by sample
    pub fn process_buffer(&mut self, buffer: &mut [f64]) -> Result<(), DspError> {
        if !self.is_configured() {
            return Err(DspError::NotConfigured);
        }

        for sample in buffer.iter_mut() {
            *sample = self.process(*sample)?;
        }
        Ok(())
    }
}
