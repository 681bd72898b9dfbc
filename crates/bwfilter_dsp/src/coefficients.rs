//! Cascade Coefficient Model
//!
//! A digital filter stored as a product of second-order sections.
//! Each section is a numerator/denominator pair of 3-term records.

use serde::Serialize;

use crate::error::DspError;

/// Numerator of one section: `a0 + a1·z⁻¹ + a2·z⁻²`
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Numerator {
    pub a0: f64,
    pub a1: f64,
    pub a2: f64,
}

impl Numerator {
    pub const fn new(a0: f64, a1: f64, a2: f64) -> Self {
        Self { a0, a1, a2 }
    }

    /// Terms in ascending index order
    pub fn terms(&self) -> [f64; 3] {
        [self.a0, self.a1, self.a2]
    }

    /// Back-to-front copy, used to mirror a low-pass prototype into a high-pass one
    pub fn reversed(self) -> Self {
        Self::new(self.a2, self.a1, self.a0)
    }

    pub fn scaled(self, factor: f64) -> Self {
        Self::new(self.a0 * factor, self.a1 * factor, self.a2 * factor)
    }

    fn is_finite(&self) -> bool {
        self.terms().iter().all(|t| t.is_finite())
    }
}

/// Denominator of one section: `b0 + b1·z⁻¹ + b2·z⁻²`
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Denominator {
    pub b0: f64,
    pub b1: f64,
    pub b2: f64,
}

impl Denominator {
    pub const fn new(b0: f64, b1: f64, b2: f64) -> Self {
        Self { b0, b1, b2 }
    }

    pub fn terms(&self) -> [f64; 3] {
        [self.b0, self.b1, self.b2]
    }

    pub fn reversed(self) -> Self {
        Self::new(self.b2, self.b1, self.b0)
    }

    pub fn scaled(self, factor: f64) -> Self {
        Self::new(self.b0 * factor, self.b1 * factor, self.b2 * factor)
    }

    fn is_finite(&self) -> bool {
        self.terms().iter().all(|t| t.is_finite())
    }
}

/// Digital filter as a cascade of biquad sections
///
/// The whole cascade gain lives in section 0's numerator; every other
/// section's numerator starts with 1. Immutable once built; share it between
/// filters with `Arc`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterCoefficients {
    numerator: Vec<Numerator>,
    denominator: Vec<Denominator>,
    sections: usize,
    order: usize,
}

impl FilterCoefficients {
    /// Build a coefficient set, checking section counts and finiteness
    pub fn new(
        order: usize,
        numerator: Vec<Numerator>,
        denominator: Vec<Denominator>,
    ) -> Result<Self, DspError> {
        if numerator.len() != denominator.len() {
            return Err(DspError::SectionCountMismatch {
                numerator: numerator.len(),
                denominator: denominator.len(),
            });
        }

        // Rust pattern: `position` finds the first offending section index
        if let Some(section) = numerator
            .iter()
            .zip(&denominator)
            .position(|(n, d)| !n.is_finite() || !d.is_finite())
        {
            return Err(DspError::DesignFailure { section });
        }

        Ok(Self {
            sections: numerator.len(),
            numerator,
            denominator,
            order,
        })
    }

    pub fn numerator(&self) -> &[Numerator] {
        &self.numerator
    }

    pub fn denominator(&self) -> &[Denominator] {
        &self.denominator
    }

    /// Number of biquad sections in the cascade
    pub fn section_count(&self) -> usize {
        self.sections
    }

    /// Order the filter was designed for (diagnostics only)
    pub fn order(&self) -> usize {
        self.order
    }

    /// Iterate over `(numerator, denominator)` pairs in cascade order
    pub fn sections(&self) -> impl Iterator<Item = (&Numerator, &Denominator)> + '_ {
        self.numerator.iter().zip(self.denominator.iter())
    }

    /// Convert every section into `biquad` crate coefficients
    ///
    /// The `biquad` crate assumes a leading denominator term of 1, so each
    /// section is divided through by its own `b0`.
    pub fn to_biquads(&self) -> Vec<biquad::Coefficients<f64>> {
        self.sections()
            .map(|(n, d)| biquad::Coefficients {
                a1: d.b1 / d.b0,
                a2: d.b2 / d.b0,
                b0: n.a0 / d.b0,
                b1: n.a1 / d.b0,
                b2: n.a2 / d.b0,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reverse_triples() {
        let n = Numerator::new(1.0, 2.0, 3.0).reversed();
        assert_eq!(n.terms(), [3.0, 2.0, 1.0]);

        let d = Denominator::new(4.0, 5.0, 6.0).reversed();
        assert_eq!(d.terms(), [6.0, 5.0, 4.0]);
    }

    #[test]
    fn test_scaling() {
        let n = Numerator::new(1.0, -2.0, 0.5).scaled(2.0);
        assert_eq!(n, Numerator::new(2.0, -4.0, 1.0));
    }

    #[test]
    fn test_new_counts_sections() {
        let coeffs = FilterCoefficients::new(
            3,
            vec![Numerator::new(1.0, 0.0, 0.0); 2],
            vec![Denominator::new(1.0, 0.0, 0.0); 2],
        )
        .unwrap();

        assert_eq!(coeffs.section_count(), 2);
        assert_eq!(coeffs.order(), 3);
        assert_eq!(coeffs.sections().count(), 2);
    }

    #[test]
    fn test_mismatched_sections_rejected() {
        let err = FilterCoefficients::new(
            2,
            vec![Numerator::default(); 2],
            vec![Denominator::default(); 1],
        )
        .unwrap_err();

        assert_eq!(
            err,
            DspError::SectionCountMismatch {
                numerator: 2,
                denominator: 1
            }
        );
    }

    #[test]
    fn test_non_finite_rejected() {
        let err = FilterCoefficients::new(
            4,
            vec![Numerator::new(1.0, 0.0, 0.0), Numerator::new(1.0, f64::NAN, 0.0)],
            vec![Denominator::new(1.0, 0.0, 0.0); 2],
        )
        .unwrap_err();
        assert_eq!(err, DspError::DesignFailure { section: 1 });

        let err = FilterCoefficients::new(
            1,
            vec![Numerator::new(1.0, 0.0, 0.0)],
            vec![Denominator::new(1.0, f64::INFINITY, 0.0)],
        )
        .unwrap_err();
        assert_eq!(err, DspError::DesignFailure { section: 0 });
    }

    #[test]
    fn test_biquad_conversion_normalizes_b0() {
        let coeffs = FilterCoefficients::new(
            2,
            vec![Numerator::new(2.0, 4.0, 2.0)],
            vec![Denominator::new(2.0, 1.0, 0.5)],
        )
        .unwrap();

        let bq = coeffs.to_biquads();
        assert_eq!(bq.len(), 1);
        assert_eq!(bq[0].b0, 1.0);
        assert_eq!(bq[0].b1, 2.0);
        assert_eq!(bq[0].b2, 1.0);
        assert_eq!(bq[0].a1, 0.5);
        assert_eq!(bq[0].a2, 0.25);
    }

    #[test]
    fn test_serializes_named_fields() {
        let coeffs = FilterCoefficients::new(
            1,
            vec![Numerator::new(0.5, 0.5, 0.0)],
            vec![Denominator::new(1.0, 0.0, 0.0)],
        )
        .unwrap();

        let json = serde_json::to_string(&coeffs).unwrap();
        assert!(json.contains("\"a0\":0.5"));
        assert!(json.contains("\"b1\":0.0"));
        assert!(json.contains("\"sections\":1"));
        assert!(json.contains("\"order\":1"));
    }
}
