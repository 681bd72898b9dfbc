//! Butterworth Filter Design
//!
//! Places normalized analog Butterworth poles, builds analog second-order
//! sections (low/high-pass directly, band filters through a band
//! transformation) and maps them to the z-plane with the bilinear transform.
//!
//! All frequencies are normalized to the Nyquist frequency, i.e. a cutoff of
//! `Fc` at sample rate `Fs` is passed as `2·Fc/Fs` and must lie in (0, 1).

use std::f64::consts::{FRAC_PI_2, PI};

use crate::coefficients::{Denominator, FilterCoefficients, Numerator};
use crate::error::DspError;

/// Highest Butterworth order the designer accepts
pub const MAX_ORDER: usize = 64;

/// Response shape of a Butterworth design
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    LowPass,
    HighPass,
    BandStop,
    BandPass,
}

impl FilterKind {
    pub const ALL: [FilterKind; 4] = [
        FilterKind::LowPass,
        FilterKind::HighPass,
        FilterKind::BandStop,
        FilterKind::BandPass,
    ];

    pub fn is_band(self) -> bool {
        matches!(self, FilterKind::BandStop | FilterKind::BandPass)
    }

    pub fn name(self) -> &'static str {
        match self {
            FilterKind::LowPass => "low-pass",
            FilterKind::HighPass => "high-pass",
            FilterKind::BandStop => "band-stop",
            FilterKind::BandPass => "band-pass",
        }
    }
}

/// How a band filter's band is specified
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Band {
    /// Center frequency and bandwidth, used as given
    Centered { center: f64, bandwidth: f64 },
    /// Lower and upper band edges, converted to center/bandwidth first
    Edges { low: f64, high: f64 },
}

impl Band {
    /// Resolve into `(center, bandwidth)` in the normalized digital domain
    ///
    /// For band edges the center is the geometric mean of the pre-warped
    /// edges, mapped back through the inverse warp. The bandwidth is the
    /// plain edge difference and is not pre-warped.
    pub fn resolve(self) -> Result<(f64, f64), DspError> {
        match self {
            Band::Centered { center, bandwidth } => Ok((center, bandwidth)),
            Band::Edges { low, high } => {
                check_frequency("low band edge", low)?;
                check_frequency("high band edge", high)?;
                if low >= high {
                    return Err(DspError::InvalidBandEdges { low, high });
                }

                let center_analog = (prewarp(low) * prewarp(high)).sqrt();
                Ok((unwarp(center_analog), high - low))
            }
        }
    }
}

/// A complete design request: kind, order and frequencies
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FilterDesign {
    LowPass { order: usize, cutoff: f64 },
    HighPass { order: usize, cutoff: f64 },
    BandStop { order: usize, band: Band },
    BandPass { order: usize, band: Band },
}

impl FilterDesign {
    pub fn kind(&self) -> FilterKind {
        match self {
            FilterDesign::LowPass { .. } => FilterKind::LowPass,
            FilterDesign::HighPass { .. } => FilterKind::HighPass,
            FilterDesign::BandStop { .. } => FilterKind::BandStop,
            FilterDesign::BandPass { .. } => FilterKind::BandPass,
        }
    }

    pub fn order(&self) -> usize {
        match *self {
            FilterDesign::LowPass { order, .. }
            | FilterDesign::HighPass { order, .. }
            | FilterDesign::BandStop { order, .. }
            | FilterDesign::BandPass { order, .. } => order,
        }
    }

    /// Run the designer for this request
    pub fn design(&self) -> Result<FilterCoefficients, DspError> {
        match *self {
            FilterDesign::LowPass { order, cutoff } => design_low_pass(order, cutoff),
            FilterDesign::HighPass { order, cutoff } => design_high_pass(order, cutoff),
            FilterDesign::BandStop { order, band } => design_band_stop_with(order, band),
            FilterDesign::BandPass { order, band } => design_band_pass_with(order, band),
        }
    }
}

/// Butterworth low-pass with normalized cutoff in (0, 1)
pub fn design_low_pass(order: usize, cutoff: f64) -> Result<FilterCoefficients, DspError> {
    low_high(order, cutoff, FilterKind::LowPass)
}

/// Butterworth high-pass with normalized cutoff in (0, 1)
pub fn design_high_pass(order: usize, cutoff: f64) -> Result<FilterCoefficients, DspError> {
    low_high(order, cutoff, FilterKind::HighPass)
}

/// Butterworth band-stop from center frequency and bandwidth
///
/// Odd orders map the real prototype pole to a single section. That section
/// only reproduces the exact band transform while `Qa >= 0.5`; for wider
/// bands the DC and Nyquist gain of odd-order designs drops below 1.
pub fn design_band_stop(
    order: usize,
    center: f64,
    bandwidth: f64,
) -> Result<FilterCoefficients, DspError> {
    band(order, center, bandwidth, FilterKind::BandStop)
}

/// Butterworth band-pass from center frequency and bandwidth
///
/// As with [`design_band_stop`], odd orders lose unity gain at the center
/// once the band is wide enough that `Qa < 0.5`.
pub fn design_band_pass(
    order: usize,
    center: f64,
    bandwidth: f64,
) -> Result<FilterCoefficients, DspError> {
    band(order, center, bandwidth, FilterKind::BandPass)
}

/// Butterworth band-stop from either band specification
pub fn design_band_stop_with(order: usize, band: Band) -> Result<FilterCoefficients, DspError> {
    check_order(order)?;
    let (center, bandwidth) = band.resolve()?;
    design_band_stop(order, center, bandwidth)
}

/// Butterworth band-pass from either band specification
pub fn design_band_pass_with(order: usize, band: Band) -> Result<FilterCoefficients, DspError> {
    check_order(order)?;
    let (center, bandwidth) = band.resolve()?;
    design_band_pass(order, center, bandwidth)
}

/// Map a normalized digital frequency to the analog frequency that lands on
/// it after the bilinear transform
pub fn prewarp(normalized: f64) -> f64 {
    2.0 / PI * (FRAC_PI_2 * normalized).tan()
}

/// Inverse of [`prewarp`]
pub fn unwarp(analog: f64) -> f64 {
    2.0 / PI * (FRAC_PI_2 * analog).atan()
}

/// One analog section `(a0 + a1·s + a2·s²) / (b0 + b1·s + b2·s²)`
#[derive(Debug, Clone, Copy, PartialEq)]
enum AnalogSection {
    /// The real pole of odd-order low/high-pass designs; `s` has unit weight
    FirstOrder { num: Numerator, den: Denominator },
    SecondOrder { num: Numerator, den: Denominator },
}

impl AnalogSection {
    /// Low-pass prototype to high-pass prototype
    fn mirrored(self) -> Self {
        match self {
            // Only two terms are populated, so swap them instead of reversing three
            AnalogSection::FirstOrder { num, den } => AnalogSection::FirstOrder {
                num: Numerator::new(num.a1, num.a0, 0.0),
                den: Denominator::new(den.b1, den.b0, 0.0),
            },
            AnalogSection::SecondOrder { num, den } => AnalogSection::SecondOrder {
                num: num.reversed(),
                den: den.reversed(),
            },
        }
    }
}

fn check_order(order: usize) -> Result<(), DspError> {
    if !(1..=MAX_ORDER).contains(&order) {
        return Err(DspError::InvalidOrder(order));
    }
    Ok(())
}

fn check_frequency(name: &'static str, value: f64) -> Result<(), DspError> {
    // Written as a negated range test so NaN is rejected too
    if !(value > 0.0 && value < 1.0) {
        return Err(DspError::InvalidFrequency { name, value });
    }
    Ok(())
}

/// Pole angles of the normalized Butterworth polynomial in the upper half
/// s-plane, measured from the negative real axis
///
/// Odd orders start with the real pole (angle 0).
fn pole_angles(order: usize) -> Vec<f64> {
    let n = order as f64;
    let count = order / 2 + order % 2;

    if order % 2 != 0 {
        (0..count).map(|k| k as f64 * PI / n).collect()
    } else {
        (0..count).map(|k| (2 * k + 1) as f64 * PI / (2.0 * n)).collect()
    }
}

fn low_high(order: usize, cutoff: f64, kind: FilterKind) -> Result<FilterCoefficients, DspError> {
    check_order(order)?;
    check_frequency("cutoff", cutoff)?;

    let wc = prewarp(cutoff);
    let odd = order % 2 != 0;

    let sections: Vec<AnalogSection> = pole_angles(order)
        .into_iter()
        .enumerate()
        .map(|(k, angle)| {
            let section = if k == 0 && odd {
                AnalogSection::FirstOrder {
                    num: Numerator::new(1.0, 0.0, 0.0),
                    den: Denominator::new(1.0, 1.0, 0.0),
                }
            } else {
                AnalogSection::SecondOrder {
                    num: Numerator::new(1.0, 0.0, 0.0),
                    den: Denominator::new(1.0, 2.0 * angle.cos(), 1.0),
                }
            };

            match kind {
                FilterKind::HighPass => section.mirrored(),
                _ => section,
            }
        })
        .collect();

    bilinear(order, wc, &sections)
}

fn band(
    order: usize,
    center: f64,
    bandwidth: f64,
    kind: FilterKind,
) -> Result<FilterCoefficients, DspError> {
    check_order(order)?;
    check_frequency("center frequency", center)?;
    if !(bandwidth > 0.0 && bandwidth < 1.0) {
        return Err(DspError::InvalidBandwidth(bandwidth));
    }

    let wa = prewarp(center);
    // Bandwidth warp carries a first-order correction in the center frequency
    let ba = (1.0 + PI * PI / 4.0 * wa) * prewarp(bandwidth);
    let qa = wa / ba;

    let odd = order % 2 != 0;
    let num = match kind {
        FilterKind::BandStop => Numerator::new(1.0, 0.0, 1.0),
        _ => Numerator::new(0.0, 1.0 / qa, 0.0),
    };

    let q2 = qa * qa;
    let scale = 1.0 / (2.0 * 2.0_f64.sqrt()) * (1.0 / q2 + 4.0).sqrt();
    let skew = 4.0 * qa / (1.0 + 4.0 * q2);
    let spread = (1.0 - 4.0 * q2) / (1.0 + 4.0 * q2);

    let mut sections = Vec::with_capacity(order);
    for (k, angle) in pole_angles(order).into_iter().enumerate() {
        let cos = angle.cos();
        let root = (1.0 - cos * cos * skew * skew).max(0.0).sqrt();

        let ceta = scale * (1.0 - root).max(0.0).sqrt();
        let ap = scale * ((1.0 + root).sqrt() + (spread + root).max(0.0).sqrt());

        sections.push(AnalogSection::SecondOrder {
            num,
            den: Denominator::new(1.0, 2.0 * ap * ceta, ap * ap),
        });

        // The real pole of an odd order maps to a single section
        if k > 0 || !odd {
            sections.push(AnalogSection::SecondOrder {
                num,
                den: Denominator::new(1.0, 2.0 / ap * ceta, 1.0 / (ap * ap)),
            });
        }
    }

    bilinear(order, wa, &sections)
}

/// Bilinear transform of analog sections with pre-warped frequency `warped`
///
/// Also folds the gain of every section into section 0 so the cascade needs
/// no separate gain stage.
fn bilinear(
    order: usize,
    warped: f64,
    analog: &[AnalogSection],
) -> Result<FilterCoefficients, DspError> {
    let h = 1.0 / (warped * FRAC_PI_2);
    let h2 = h * h;

    let (mut numerator, denominator): (Vec<Numerator>, Vec<Denominator>) = analog
        .iter()
        .map(|section| match *section {
            AnalogSection::FirstOrder { num, den } => {
                let bb = 1.0 / (h + den.b0);
                (
                    Numerator::new(num.a1 * h + num.a0, -num.a1 * h + num.a0, 0.0).scaled(bb),
                    Denominator::new(h + den.b0, -h + den.b0, 0.0).scaled(bb),
                )
            }
            AnalogSection::SecondOrder { num, den } => {
                let bb = 1.0 / (h2 + den.b1 * h + den.b2);
                (
                    Numerator::new(
                        num.a2 * h2 + num.a1 * h + num.a0,
                        2.0 * (num.a0 - num.a2 * h2),
                        num.a2 * h2 - num.a1 * h + num.a0,
                    )
                    .scaled(bb),
                    Denominator::new(
                        h2 + den.b1 * h + den.b2,
                        2.0 * (den.b2 - h2),
                        h2 - den.b1 * h + den.b2,
                    )
                    .scaled(bb),
                )
            }
        })
        .unzip();

    let mut gain = 1.0;
    for n in numerator.iter_mut() {
        let lead = n.a0;
        gain *= lead;
        *n = Numerator::new(1.0, n.a1 / lead, n.a2 / lead);
    }
    if let Some(first) = numerator.first_mut() {
        *first = first.scaled(gain);
    }

    FilterCoefficients::new(order, numerator, denominator)
}
