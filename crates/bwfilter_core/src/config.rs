//! Filter Bank Configuration

use serde::{Deserialize, Serialize};

use bwfilter_dsp::{Band, FilterDesign, FilterKind, MAX_ORDER};

use crate::error::{CoreError, CoreResult};

/// Physical design parameters of the four-filter bank
///
/// Frequencies are in Hz; [`DesignConfig::normalized_cutoff`] and
/// [`DesignConfig::normalized_bandwidth`] convert them to the fraction of
/// Nyquist that the designer expects. The cutoff doubles as the center
/// frequency of the band filters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignConfig {
    /// Sample rate in Hz
    pub sample_rate: f64,

    /// Low/high-pass cutoff and band center in Hz
    pub cutoff_hz: f64,

    /// Band filter width in Hz
    pub bandwidth_hz: f64,

    /// Butterworth order shared by all four filters
    pub order: usize,
}

impl Default for DesignConfig {
    fn default() -> Self {
        Self {
            sample_rate: 1000.0,
            cutoff_hz: 20.0,
            bandwidth_hz: 5.0,
            order: 5,
        }
    }
}

impl DesignConfig {
    pub fn nyquist(&self) -> f64 {
        self.sample_rate / 2.0
    }

    /// Cutoff as a fraction of Nyquist (`2·Fc/Fs`)
    pub fn normalized_cutoff(&self) -> f64 {
        self.cutoff_hz / self.sample_rate * 2.0
    }

    /// Bandwidth as a fraction of Nyquist
    pub fn normalized_bandwidth(&self) -> f64 {
        self.bandwidth_hz / self.sample_rate * 2.0
    }

    /// Validate configuration
    pub fn validate(&self) -> CoreResult<()> {
        if !(self.sample_rate.is_finite() && self.sample_rate > 0.0) {
            return Err(CoreError::ConfigError(format!(
                "Invalid sample rate: {}",
                self.sample_rate
            )));
        }
        if self.order == 0 || self.order > MAX_ORDER {
            return Err(CoreError::ConfigError(format!(
                "Filter order {} must lie between 1 and {}",
                self.order, MAX_ORDER
            )));
        }
        if !(self.cutoff_hz > 0.0 && self.cutoff_hz < self.nyquist()) {
            return Err(CoreError::ConfigError(format!(
                "Cutoff {} Hz must lie between 0 and Nyquist ({} Hz)",
                self.cutoff_hz,
                self.nyquist()
            )));
        }
        if !(self.bandwidth_hz > 0.0 && self.bandwidth_hz < self.nyquist()) {
            return Err(CoreError::ConfigError(format!(
                "Bandwidth {} Hz must lie between 0 and Nyquist ({} Hz)",
                self.bandwidth_hz,
                self.nyquist()
            )));
        }
        Ok(())
    }

    /// Design request for one filter of the bank
    pub fn design_for(&self, kind: FilterKind) -> FilterDesign {
        let order = self.order;
        let cutoff = self.normalized_cutoff();
        let band = Band::Centered {
            center: cutoff,
            bandwidth: self.normalized_bandwidth(),
        };

        match kind {
            FilterKind::LowPass => FilterDesign::LowPass { order, cutoff },
            FilterKind::HighPass => FilterDesign::HighPass { order, cutoff },
            FilterKind::BandStop => FilterDesign::BandStop { order, band },
            FilterKind::BandPass => FilterDesign::BandPass { order, band },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DesignConfig::default();
        assert_eq!(config.sample_rate, 1000.0);
        assert_eq!(config.cutoff_hz, 20.0);
        assert_eq!(config.bandwidth_hz, 5.0);
        assert_eq!(config.order, 5);
    }

    #[test]
    fn test_normalization() {
        let config = DesignConfig::default();
        assert!((config.normalized_cutoff() - 0.04).abs() < 1e-12);
        assert!((config.normalized_bandwidth() - 0.01).abs() < 1e-12);
        assert_eq!(config.nyquist(), 500.0);
    }

    #[test]
    fn test_validation() {
        assert!(DesignConfig::default().validate().is_ok());

        let invalid_rate = DesignConfig {
            sample_rate: 0.0,
            ..Default::default()
        };
        assert!(invalid_rate.validate().is_err());

        let invalid_order = DesignConfig {
            order: 0,
            ..Default::default()
        };
        assert!(invalid_order.validate().is_err());

        let huge_order = DesignConfig {
            order: usize::MAX,
            ..Default::default()
        };
        assert!(matches!(huge_order.validate(), Err(CoreError::ConfigError(_))));

        let max_order = DesignConfig {
            order: MAX_ORDER,
            ..Default::default()
        };
        assert!(max_order.validate().is_ok());

        let above_nyquist = DesignConfig {
            cutoff_hz: 600.0,
            ..Default::default()
        };
        assert!(above_nyquist.validate().is_err());

        let invalid_bandwidth = DesignConfig {
            bandwidth_hz: -1.0,
            ..Default::default()
        };
        assert!(invalid_bandwidth.validate().is_err());
    }

    #[test]
    fn test_design_for_each_kind() {
        let config = DesignConfig::default();
        for kind in FilterKind::ALL {
            let design = config.design_for(kind);
            assert_eq!(design.kind(), kind);
            assert_eq!(design.order(), 5);
        }

        match config.design_for(FilterKind::BandPass) {
            FilterDesign::BandPass {
                band: Band::Centered { center, bandwidth },
                ..
            } => {
                assert!((center - 0.04).abs() < 1e-12);
                assert!((bandwidth - 0.01).abs() < 1e-12);
            }
            other => panic!("unexpected design {:?}", other),
        }
    }

    #[test]
    fn test_config_serialization() {
        let config = DesignConfig {
            order: 3,
            ..Default::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: DesignConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(config, deserialized);
    }
}
