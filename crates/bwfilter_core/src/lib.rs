//! bwfilter Core - Filter Bank Driver
//!
//! This crate wires the pure design/filter math of `bwfilter_dsp` to files:
//! - Design configuration in Hz, validated and persisted as JSON
//! - A four-filter bank (low-pass, high-pass, band-stop, band-pass)
//! - Parallel multi-channel filtering with shared coefficients
//! - Sample file reading and tab-separated result writing
//!
//! # Architecture
//!
//! ```text
//! DesignConfig ──design──▶ FilterBank ──rows──▶ result file
//!                              ▲
//! sample file ──read_samples───┘
//! ```

mod bank;
mod config;
mod error;
mod io;
mod job;
mod settings;

pub use bank::{filter_channels, BankRow, FilterBank};
pub use config::DesignConfig;
pub use error::{CoreError, CoreResult};
pub use io::{output_path_for, read_sample_file, read_samples, write_row_file, write_rows};
pub use job::{FilterJob, JobReport};

// Re-export DSP types for convenience
pub use bwfilter_dsp::{CascadeFilter, FilterCoefficients, FilterDesign, FilterKind, MAX_ORDER};
