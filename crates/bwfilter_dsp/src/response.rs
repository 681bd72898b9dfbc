//! Frequency Response Analysis
//!
//! Two views of a designed cascade:
//! - analytic: evaluate every section's transfer function on the unit circle
//! - measured: FFT of the impulse response produced by [`CascadeFilter`]
//!
//! Frequencies are normalized to Nyquist, as everywhere else in the crate:
//! 0 is DC and 1 is half the sample rate.

use std::sync::Arc;

use rustfft::{num_complex::Complex64, FftPlanner};

use crate::coefficients::FilterCoefficients;
use crate::error::DspError;
use crate::filter::CascadeFilter;

/// Floor for dB conversion so a perfect zero does not produce -inf
const MIN_MAGNITUDE: f64 = 1e-20;

/// Complex response H(e^{jπw}) at normalized frequency `w`
pub fn frequency_response(coefficients: &FilterCoefficients, w: f64) -> Complex64 {
    // z⁻¹ on the unit circle
    let z1 = Complex64::from_polar(1.0, -std::f64::consts::PI * w);
    let z2 = z1 * z1;

    coefficients
        .sections()
        .fold(Complex64::new(1.0, 0.0), |acc, (n, d)| {
            let num = n.a0 + z1 * n.a1 + z2 * n.a2;
            let den = d.b0 + z1 * d.b1 + z2 * d.b2;
            acc * num / den
        })
}

/// |H| at normalized frequency `w`
pub fn magnitude(coefficients: &FilterCoefficients, w: f64) -> f64 {
    frequency_response(coefficients, w).norm()
}

/// 20·log10 |H| at normalized frequency `w`
pub fn magnitude_db(coefficients: &FilterCoefficients, w: f64) -> f64 {
    to_db(magnitude(coefficients, w))
}

pub fn to_db(magnitude: f64) -> f64 {
    20.0 * magnitude.max(MIN_MAGNITUDE).log10()
}

/// First `len` samples of the cascade's impulse response
pub fn impulse_response(
    coefficients: &Arc<FilterCoefficients>,
    len: usize,
) -> Result<Vec<f64>, DspError> {
    let mut filter = CascadeFilter::with_coefficients(Arc::clone(coefficients));
    let mut response = vec![0.0; len];
    if let Some(first) = response.first_mut() {
        *first = 1.0;
    }
    filter.process_buffer(&mut response)?;
    Ok(response)
}

/// Magnitude response measured from an FFT of the impulse response
///
/// Returns `fft_size / 2 + 1` bins; bin `k` sits at normalized frequency
/// `2k / fft_size`. The impulse response is truncated to `fft_size`
/// samples, so slowly decaying (very narrow) designs need a larger size.
pub fn measured_magnitude(
    coefficients: &Arc<FilterCoefficients>,
    fft_size: usize,
) -> Result<Vec<f64>, DspError> {
    if fft_size == 0 {
        return Ok(Vec::new());
    }

    let mut buffer: Vec<Complex64> = impulse_response(coefficients, fft_size)?
        .into_iter()
        .map(|x| Complex64::new(x, 0.0))
        .collect();

    let mut planner = FftPlanner::<f64>::new();
    let fft = planner.plan_fft_forward(fft_size);
    fft.process(&mut buffer);

    Ok(buffer[..=fft_size / 2].iter().map(|c| c.norm()).collect())
}

/// Normalized frequency of FFT bin `bin` for a transform of `fft_size` points
pub fn bin_frequency(bin: usize, fft_size: usize) -> f64 {
    2.0 * bin as f64 / fft_size as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::design::{
        design_band_pass, design_band_stop, design_high_pass, design_low_pass,
    };

    #[test]
    fn test_low_pass_response_shape() {
        let coeffs = design_low_pass(4, 0.2).unwrap();

        assert!((magnitude(&coeffs, 0.0) - 1.0).abs() < 1e-9);
        // Pre-warping puts the -3 dB point exactly on the requested cutoff
        assert!((magnitude(&coeffs, 0.2) - std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-9);
        assert!(magnitude(&coeffs, 1.0) < 1e-9);
        assert!(magnitude_db(&coeffs, 0.6) < -40.0);
    }

    #[test]
    fn test_high_pass_response_shape() {
        for order in [3, 4] {
            let coeffs = design_high_pass(order, 0.3).unwrap();

            assert!(magnitude(&coeffs, 0.0) < 1e-9);
            assert!((magnitude(&coeffs, 0.3) - std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-9);
            assert!((magnitude(&coeffs, 1.0) - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_band_stop_notches_center() {
        let center = 0.04;
        let coeffs = design_band_stop(5, center, 0.01).unwrap();

        assert!(magnitude(&coeffs, center) < 1e-6);
        assert!(magnitude_db(&coeffs, center) < -100.0);
        // Far from the band the response is flat
        assert!(magnitude_db(&coeffs, 0.0).abs() < 0.01);
        assert!(magnitude_db(&coeffs, 0.5).abs() < 0.1);
        assert!(magnitude_db(&coeffs, 1.0).abs() < 0.01);
    }

    #[test]
    fn test_band_pass_is_inverse_of_band_stop() {
        let center = 0.3;
        let pass = design_band_pass(4, center, 0.05).unwrap();
        let stop = design_band_stop(4, center, 0.05).unwrap();

        assert!((magnitude(&pass, center) - 1.0).abs() < 1e-6);
        assert!(magnitude(&stop, center) < 1e-6);

        // Band-pass zeros sit on DC and Nyquist
        assert!(magnitude(&pass, 0.0) < 1e-9);
        assert!(magnitude(&pass, 1.0) < 1e-9);
        assert!((magnitude(&stop, 0.0) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_odd_band_pass_unity_at_center() {
        let pass = design_band_pass(5, 0.2, 0.04).unwrap();
        assert!((magnitude(&pass, 0.2) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_impulse_response_length() {
        let coeffs = Arc::new(design_low_pass(2, 0.3).unwrap());
        assert_eq!(impulse_response(&coeffs, 16).unwrap().len(), 16);
        assert!(impulse_response(&coeffs, 0).unwrap().is_empty());
    }

    #[test]
    fn test_impulse_response_shares_coefficients() {
        let coeffs = Arc::new(design_band_pass(3, 0.2, 0.05).unwrap());
        let response = impulse_response(&coeffs, 64).unwrap();

        // The temporary filter only held a second handle to the same set
        assert_eq!(Arc::strong_count(&coeffs), 1);

        let mut filter = CascadeFilter::with_coefficients(Arc::clone(&coeffs));
        let mut expected = vec![0.0; 64];
        expected[0] = 1.0;
        filter.process_buffer(&mut expected).unwrap();
        assert_eq!(response, expected);
    }

    #[test]
    fn test_measured_matches_analytic() {
        let coeffs = Arc::new(design_low_pass(4, 0.2).unwrap());
        let fft_size = 1024;
        let measured = measured_magnitude(&coeffs, fft_size).unwrap();
        assert_eq!(measured.len(), fft_size / 2 + 1);

        for (bin, m) in measured.iter().enumerate() {
            let analytic = magnitude(&coeffs, bin_frequency(bin, fft_size));
            assert!((m - analytic).abs() < 1e-6, "bin {}: {} vs {}", bin, m, analytic);
        }
    }

    #[test]
    fn test_to_db_floor() {
        assert_eq!(to_db(1.0), 0.0);
        assert!((to_db(0.1) + 20.0).abs() < 1e-12);
        assert!((to_db(0.0) + 400.0).abs() < 1e-9);
    }
}
