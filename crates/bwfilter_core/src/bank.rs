//! Filter Bank
//!
//! Runs one input stream through low-pass, high-pass, band-stop and
//! band-pass filters side by side, and fans independent channels out to
//! worker threads that share one coefficient set.
//!
//! ```text
//!            ┌──▶ low-pass  ──▶ ┐
//!  sample ───┼──▶ high-pass ──▶ ┼──▶ BankRow { raw, low, high, stop, pass }
//!            ├──▶ band-stop ──▶ ┤
//!            └──▶ band-pass ──▶ ┘
//! ```

use std::sync::Arc;
use std::thread;

use tracing::{debug, info};

use bwfilter_dsp::{CascadeFilter, FilterCoefficients, FilterKind};

use crate::config::DesignConfig;
use crate::error::{CoreError, CoreResult};

/// One input sample and its four filtered versions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BankRow {
    pub raw: f64,
    pub low_pass: f64,
    pub high_pass: f64,
    pub band_stop: f64,
    pub band_pass: f64,
}

impl BankRow {
    /// Columns in output order
    pub fn columns(&self) -> [f64; 5] {
        [
            self.raw,
            self.low_pass,
            self.high_pass,
            self.band_stop,
            self.band_pass,
        ]
    }
}

/// Four Butterworth filters designed from one [`DesignConfig`]
#[derive(Debug, Clone)]
pub struct FilterBank {
    config: DesignConfig,
    low_pass: CascadeFilter,
    high_pass: CascadeFilter,
    band_stop: CascadeFilter,
    band_pass: CascadeFilter,
}

impl FilterBank {
    /// Validate `config` and design all four filters
    pub fn new(config: DesignConfig) -> CoreResult<Self> {
        config.validate()?;

        let build = |kind: FilterKind| -> CoreResult<CascadeFilter> {
            let design = config.design_for(kind);
            let coefficients = design.design()?;
            debug!(
                "Designed {} filter: order {}, {} sections",
                kind.name(),
                coefficients.order(),
                coefficients.section_count()
            );
            Ok(CascadeFilter::with_coefficients(coefficients))
        };

        let bank = Self {
            low_pass: build(FilterKind::LowPass)?,
            high_pass: build(FilterKind::HighPass)?,
            band_stop: build(FilterKind::BandStop)?,
            band_pass: build(FilterKind::BandPass)?,
            config,
        };

        info!(
            "Filter bank ready: order {}, cutoff {} Hz, bandwidth {} Hz at {} Hz",
            bank.config.order,
            bank.config.cutoff_hz,
            bank.config.bandwidth_hz,
            bank.config.sample_rate
        );
        Ok(bank)
    }

    pub fn config(&self) -> &DesignConfig {
        &self.config
    }

    /// The filter of the given kind
    pub fn filter(&self, kind: FilterKind) -> &CascadeFilter {
        match kind {
            FilterKind::LowPass => &self.low_pass,
            FilterKind::HighPass => &self.high_pass,
            FilterKind::BandStop => &self.band_stop,
            FilterKind::BandPass => &self.band_pass,
        }
    }

    /// Push one sample through all four filters
    #[inline]
    pub fn process(&mut self, sample: f64) -> CoreResult<BankRow> {
        Ok(BankRow {
            raw: sample,
            low_pass: self.low_pass.process(sample)?,
            high_pass: self.high_pass.process(sample)?,
            band_stop: self.band_stop.process(sample)?,
            band_pass: self.band_pass.process(sample)?,
        })
    }

    /// Process a whole sample sequence in order
    pub fn run(&mut self, samples: &[f64]) -> CoreResult<Vec<BankRow>> {
        let rows = samples
            .iter()
            .map(|x| self.process(*x))
            .collect::<CoreResult<Vec<_>>>()?;
        debug!("Filtered {} samples", rows.len());
        Ok(rows)
    }

    /// Clear every filter's delay lines
    pub fn reset(&mut self) {
        self.low_pass.reset();
        self.high_pass.reset();
        self.band_stop.reset();
        self.band_pass.reset();
    }
}

/// Filter independent channels in parallel, one worker thread per channel
///
/// Every worker owns its own [`CascadeFilter`]; only the immutable
/// coefficients are shared. Output is identical to filtering each channel
/// on its own.
pub fn filter_channels(
    coefficients: Arc<FilterCoefficients>,
    channels: &[Vec<f64>],
) -> CoreResult<Vec<Vec<f64>>> {
    thread::scope(|scope| {
        let workers = channels
            .iter()
            .enumerate()
            .map(|(index, channel)| {
                let coefficients = Arc::clone(&coefficients);
                thread::Builder::new()
                    .name(format!("bwfilter-channel-{}", index))
                    .spawn_scoped(scope, move || -> CoreResult<Vec<f64>> {
                        let mut filter = CascadeFilter::with_coefficients(coefficients);
                        let mut output = channel.clone();
                        filter.process_buffer(&mut output)?;
                        Ok(output)
                    })
                    .map_err(|e| CoreError::WorkerError(e.to_string()))
            })
            .collect::<CoreResult<Vec<_>>>()?;

        workers
            .into_iter()
            .map(|worker| {
                worker
                    .join()
                    .map_err(|_| CoreError::WorkerError("channel worker panicked".into()))?
            })
            .collect()
    })
}
