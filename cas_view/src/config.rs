// config.rs - View configuration

//! Configuration for the simulation view.
//!
//! Every struct deserializes with `#[serde(default)]`, so a configuration
//! file only needs to name the settings it changes. Loading the file is left
//! to the host.

use anyhow::{ensure, Result};
use egui::Color32;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub viewport: ViewportConfig,
    /// Side of one cell in grid units, before zoom is applied.
    pub cell_size: f32,
    /// Maximum number of history rows completed per frame.
    pub feedback_rate: usize,
    pub zoom: ZoomConfig,
    pub colors: ColorScheme,
    pub inspector: InspectorConfig,
    pub keys: KeyBindings,
    /// Above this scale cells are separated by background-colored grid lines.
    pub gridline_threshold: f32,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            viewport: ViewportConfig::default(),
            cell_size: 100.0,
            feedback_rate: 60,
            zoom: ZoomConfig::default(),
            colors: ColorScheme::default(),
            inspector: InspectorConfig::default(),
            keys: KeyBindings::default(),
            gridline_threshold: 0.16,
        }
    }
}

impl ViewConfig {
    /// One pixel per cell, no zoom, no inspector.
    pub fn unscaled() -> Self {
        Self {
            cell_size: 1.0,
            zoom: ZoomConfig {
                min_scale: 1.0,
                max_scale: 1.0,
                base: 2.0,
            },
            inspector: InspectorConfig {
                available: false,
                ..InspectorConfig::default()
            },
            gridline_threshold: f32::MAX,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.viewport.width > 0.0 && self.viewport.height > 0.0,
            "viewport must have a positive size, got {}x{}",
            self.viewport.width,
            self.viewport.height
        );
        ensure!(self.cell_size > 0.0, "cell_size must be positive, got {}", self.cell_size);
        ensure!(self.feedback_rate > 0, "feedback_rate must be at least 1");
        ensure!(
            self.zoom.min_scale > 0.0,
            "zoom.min_scale must be positive, got {}",
            self.zoom.min_scale
        );
        ensure!(
            self.zoom.max_scale >= self.zoom.min_scale,
            "zoom.max_scale ({}) is below zoom.min_scale ({})",
            self.zoom.max_scale,
            self.zoom.min_scale
        );
        ensure!(self.zoom.base > 1.0, "zoom.base must be greater than 1, got {}", self.zoom.base);
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: 582.0,
            height: 582.0,
        }
    }
}

/// Discrete zoom: `scale = min_scale * base^exponent`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomConfig {
    pub min_scale: f32,
    pub max_scale: f32,
    pub base: f32,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            min_scale: 0.01,
            max_scale: 1.28,
            base: 2.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorScheme {
    pub background: Color32,
    pub dead: Color32,
    pub alive: Color32,
    /// Change of the inspector glow channel per frame.
    pub inspector_glow_step: u8,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self {
            background: Color32::from_gray(204),
            dead: Color32::WHITE,
            alive: Color32::BLACK,
            inspector_glow_step: 5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InspectorConfig {
    /// When false the toggle key does nothing.
    pub available: bool,
    /// Outline stroke width as a fraction of the cell size.
    pub stroke_ratio: f32,
}

impl Default for InspectorConfig {
    fn default() -> Self {
        Self {
            available: true,
            stroke_ratio: 0.2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub zoom_out: char,
    pub zoom_in: char,
    pub toggle_inspector: char,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            zoom_out: '1',
            zoom_in: '2',
            toggle_inspector: '3',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn defaults_are_valid() {
        let config = ViewConfig::default();
        config.validate().unwrap();
        assert_eq!(config.viewport.width, 582.0);
        assert_eq!(config.feedback_rate, 60);
        assert_eq!(config.zoom.max_scale, 1.28);
        ViewConfig::unscaled().validate().unwrap();
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config: ViewConfig =
            serde_json::from_str(r#"{ "feedback_rate": 5, "zoom": { "base": 3.0 } }"#).unwrap();
        assert_eq!(config.feedback_rate, 5);
        assert_eq!(config.zoom.base, 3.0);
        assert_eq!(config.zoom.min_scale, 0.01);
        assert_eq!(config.cell_size, 100.0);
        assert_eq!(config.keys.zoom_in, '2');
    }

    #[test]
    fn invalid_values_are_rejected() {
        let mut config = ViewConfig::default();
        config.feedback_rate = 0;
        assert!(config.validate().is_err());

        let mut config = ViewConfig::default();
        config.zoom.max_scale = 0.001;
        assert!(config.validate().is_err());

        let mut config = ViewConfig::default();
        config.zoom.base = 1.0;
        assert!(config.validate().is_err());
    }
}
