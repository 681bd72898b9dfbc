//! bwfilter DSP - Butterworth Design and Cascaded Filtering
//!
//! This crate provides the numeric core of bwfilter:
//! - Butterworth low-pass, high-pass, band-stop and band-pass design
//! - Bilinear transform into second-order sections with the cascade gain
//!   folded into the first section
//! - A Direct-Form-II-Transposed biquad cascade that consumes those sections
//! - Analytic and FFT-measured frequency response
//!
//! # Architecture
//!
//! Design functions are pure: same inputs, same coefficients, no shared
//! state. A [`CascadeFilter`] owns only its delay lines and shares immutable
//! [`FilterCoefficients`] through an `Arc`, so any number of streams can run
//! one filter each on separate threads.

mod coefficients;
mod design;
mod error;
mod filter;
pub mod response;

pub use coefficients::{Denominator, FilterCoefficients, Numerator};
pub use design::{
    design_band_pass, design_band_pass_with, design_band_stop, design_band_stop_with,
    design_high_pass, design_low_pass, prewarp, unwarp, Band, FilterDesign, FilterKind,
    MAX_ORDER,
};
pub use error::DspError;
pub use filter::{CascadeFilter, DelayLine};
