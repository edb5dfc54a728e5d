use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::brush::{self, BrushConfig, BrushSize, PaintColor};
use crate::error::ConfigError;

/// Startup settings for a [`crate::DrawingSurface`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)] // missing fields fall back to their defaults
pub struct SurfaceConfig {
    /// Pixels per device-independent unit
    pub display_density: f32,
    /// Initial pen color token
    pub default_color: String,
    /// Initial pen size in device-independent units
    pub brush_size_dp: f32,
    /// Fill shown where no background image covers the raster
    pub background_fill: String,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            display_density: 1.0,
            default_color: "#FF000000".to_owned(),
            brush_size_dp: BrushSize::default().dp(),
            background_fill: "white".to_owned(),
        }
    }
}

impl SurfaceConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        log::info!("Loading surface config from {}", path.display());
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("display_density", self.display_density),
            ("brush_size_dp", self.brush_size_dp),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidValue { field, value });
            }
        }
        self.default_color()?;
        self.background_fill()?;
        Ok(())
    }

    pub fn default_color(&self) -> Result<PaintColor, ConfigError> {
        brush::parse_color(&self.default_color).map_err(|source| ConfigError::InvalidColor {
            field: "default_color",
            source,
        })
    }

    pub fn background_fill(&self) -> Result<PaintColor, ConfigError> {
        brush::parse_color(&self.background_fill).map_err(|source| ConfigError::InvalidColor {
            field: "background_fill",
            source,
        })
    }

    /// Brush state this config starts with
    pub fn brush(&self) -> Result<BrushConfig, ConfigError> {
        let mut brush = BrushConfig::new(self.display_density);
        brush.set_color(self.default_color()?);
        brush.set_thickness(self.brush_size_dp);
        Ok(brush)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brush::{BLACK, WHITE};

    #[test]
    fn test_defaults() {
        let config = SurfaceConfig::default();
        assert!(config.validate().is_ok());
        let brush = config.brush().unwrap();
        assert_eq!(brush.color(), BLACK);
        assert_eq!(brush.thickness(), 20.0);
        assert_eq!(config.background_fill().unwrap(), WHITE);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = SurfaceConfig::from_json_str(r#"{ "display_density": 2.0 }"#).unwrap();
        assert_eq!(config.display_density, 2.0);
        assert_eq!(config.brush_size_dp, 20.0);
        assert_eq!(config.brush().unwrap().thickness(), 40.0);
    }

    #[test]
    fn test_rejects_bad_values() {
        let err = SurfaceConfig::from_json_str(r#"{ "brush_size_dp": 0.0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { field: "brush_size_dp", .. }));

        let err = SurfaceConfig::from_json_str(r#"{ "background_fill": "mauve" }"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidColor { field: "background_fill", .. }));

        let err = SurfaceConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
