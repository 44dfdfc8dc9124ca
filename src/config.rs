//! Render configuration.
//!
//! Every tunable of the rendering core lives here. Values are checked once
//! when the configuration is built, so rendering itself never fails.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::geo::DEFAULT_CIRCLE_SEGMENTS;
use crate::route::DEFAULT_ROUTE_SEGMENTS;
use crate::tissot::IndicatrixGrid;

/// Target drawing area in plane units.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Result<Self, ConfigError> {
        let viewport = Self { width, height };
        viewport.validate()?;
        Ok(viewport)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let ok = |v: f64| v.is_finite() && v > 0.0;
        if ok(self.width) && ok(self.height) {
            Ok(())
        } else {
            Err(ConfigError::InvalidViewport {
                width: self.width,
                height: self.height,
            })
        }
    }

    /// Loose acceptance box for projected points: x in [-w, 2w], y in [-h, 2h].
    pub fn within_margin(&self, x: f64, y: f64) -> bool {
        x >= -self.width
            && x <= 2.0 * self.width
            && y >= -self.height
            && y <= 2.0 * self.height
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 900.0,
            height: 600.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub viewport: Viewport,
    pub grid: IndicatrixGrid,
    /// Number of segments in each great-circle route polyline.
    pub route_segments: usize,
    /// Number of segments in each indicatrix ring.
    pub circle_segments: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            viewport: Viewport::default(),
            grid: IndicatrixGrid::default(),
            route_segments: DEFAULT_ROUTE_SEGMENTS,
            circle_segments: DEFAULT_CIRCLE_SEGMENTS,
        }
    }
}

impl RenderConfig {
    pub fn new(
        viewport: Viewport,
        grid: IndicatrixGrid,
        route_segments: usize,
        circle_segments: usize,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            viewport,
            grid,
            route_segments,
            circle_segments,
        };
        config.validate()?;
        Ok(config)
    }

    /// Parse a JSON document; missing fields take their defaults.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_viewport(mut self, viewport: Viewport) -> Result<Self, ConfigError> {
        viewport.validate()?;
        self.viewport = viewport;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.viewport.validate()?;
        self.grid.validate()?;
        if self.route_segments < 2 {
            return Err(ConfigError::InvalidSampleCount(self.route_segments));
        }
        if self.circle_segments < 3 {
            return Err(ConfigError::InvalidCircleSegments(self.circle_segments));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = RenderConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.viewport, Viewport { width: 900.0, height: 600.0 });
        assert_eq!(config.route_segments, 100);
        assert_eq!(config.circle_segments, 64);
    }

    #[test]
    fn test_invalid_viewport() {
        assert!(Viewport::new(0.0, 600.0).is_err());
        assert!(Viewport::new(900.0, -1.0).is_err());
        assert!(Viewport::new(f64::INFINITY, 600.0).is_err());
        assert!(Viewport::new(f64::NAN, 600.0).is_err());
        assert!(Viewport::new(1.0, 1.0).is_ok());
    }

    #[test]
    fn test_invalid_sample_counts() {
        let err = RenderConfig::new(Viewport::default(), IndicatrixGrid::default(), 1, 64);
        assert!(matches!(err, Err(ConfigError::InvalidSampleCount(1))));

        let err = RenderConfig::new(Viewport::default(), IndicatrixGrid::default(), 100, 2);
        assert!(matches!(err, Err(ConfigError::InvalidCircleSegments(2))));
    }

    #[test]
    fn test_margin() {
        let vp = Viewport::default();
        assert!(vp.within_margin(0.0, 0.0));
        assert!(vp.within_margin(-900.0, 1200.0));
        assert!(!vp.within_margin(-900.1, 0.0));
        assert!(!vp.within_margin(0.0, 1200.1));
        assert!(!vp.within_margin(f64::NAN, 0.0));
    }

    #[test]
    fn test_from_json_partial() {
        let config = RenderConfig::from_json_str(
            r#"{"viewport": {"width": 1200, "height": 800}, "grid": {"spacing": 30}}"#,
        )
        .unwrap();
        assert_eq!(config.viewport.width, 1200.0);
        assert_eq!(config.grid.spacing, 30.0);
        assert_eq!(config.grid.radius, 2.0);
        assert_eq!(config.route_segments, 100);
    }

    #[test]
    fn test_from_json_rejects_too_fine_grid() {
        assert!(matches!(
            RenderConfig::from_json_str(r#"{"grid": {"spacing": 0.001}}"#),
            Err(ConfigError::InvalidGridSpacing(_))
        ));
        assert!(RenderConfig::from_json_str(r#"{"grid": {"spacing": 0.5}}"#).is_ok());
    }

    #[test]
    fn test_from_json_rejects_invalid() {
        assert!(matches!(
            RenderConfig::from_json_str(r#"{"grid": {"spacing": 0}}"#),
            Err(ConfigError::InvalidGridSpacing(_))
        ));
        assert!(matches!(
            RenderConfig::from_json_str(r#"{"route_segments": 0}"#),
            Err(ConfigError::InvalidSampleCount(0))
        ));
        assert!(matches!(
            RenderConfig::from_json_str("[1, 2"),
            Err(ConfigError::Parse(_))
        ));
    }
}
