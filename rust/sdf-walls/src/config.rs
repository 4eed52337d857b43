// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Conversion configuration

use crate::error::{Error, Result};
use crate::image_ops::Threshold;
use serde::{Deserialize, Serialize};

/// Model name used when none is given
pub const DEFAULT_MODEL_NAME: &str = "UnnamedWallsFromImage";

/// Default wall extrusion height
pub const DEFAULT_WALL_HEIGHT: f64 = 1.0;

/// Which decomposer turns the grid into rectangles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Strategy {
    /// Run-length table scan (authoritative)
    #[default]
    RunLength,
    /// Per-cell probing
    Probing { clear_consumed: bool },
}

/// Document format written by the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OutputFormat {
    #[default]
    Sdf,
    Json,
}

/// Parameters for converting an image into a wall model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionConfig {
    /// Meters per pixel
    pub scale: f64,
    /// Wall extrusion height in meters
    pub wall_height: f64,
    /// Name of the generated model
    pub model_name: String,
    /// Foreground/background policy for image pixels
    pub threshold: Threshold,
    pub strategy: Strategy,
    pub format: OutputFormat,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            scale: 1.0,
            wall_height: DEFAULT_WALL_HEIGHT,
            model_name: DEFAULT_MODEL_NAME.to_string(),
            threshold: Threshold::default(),
            strategy: Strategy::default(),
            format: OutputFormat::default(),
        }
    }
}

impl ConversionConfig {
    pub fn new(scale: f64) -> Self {
        Self {
            scale,
            ..Default::default()
        }
    }

    /// Reject values that would produce a meaningless scene
    pub fn validate(&self) -> Result<()> {
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(Error::Argument(format!(
                "scale must be a positive number, got {}",
                self.scale
            )));
        }
        if !self.wall_height.is_finite() || self.wall_height <= 0.0 {
            return Err(Error::Argument(format!(
                "wall height must be a positive number, got {}",
                self.wall_height
            )));
        }
        if self.model_name.trim().is_empty() {
            return Err(Error::Argument("model name must not be empty".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ConversionConfig::new(0.05);
        assert_eq!(config.scale, 0.05);
        assert_eq!(config.wall_height, 1.0);
        assert_eq!(config.model_name, "UnnamedWallsFromImage");
        assert_eq!(config.strategy, Strategy::RunLength);
        assert_eq!(config.format, OutputFormat::Sdf);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        for scale in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                ConversionConfig::new(scale).validate(),
                Err(Error::Argument(_))
            ));
        }

        let config = ConversionConfig {
            wall_height: 0.0,
            ..ConversionConfig::new(1.0)
        };
        assert!(config.validate().is_err());

        let config = ConversionConfig {
            model_name: "  ".into(),
            ..ConversionConfig::new(1.0)
        };
        assert!(config.validate().is_err());
    }
}
