// settings.rs - Desktop configuration file

use std::path::Path;
use std::time::Duration;

use anyhow::{ensure, Context, Result};
use cas_view::ViewConfig;
use log::{info, warn};
use serde::{Deserialize, Serialize};

/// Environment variable naming a JSON configuration file.
pub const CONFIG_ENV: &str = "CAS_VIEW_CONFIG";

/// How cells are mapped to the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    /// Zoom, pan and the neighborhood inspector.
    #[default]
    Scaled,
    /// One pixel per cell, fixed scale, no inspector.
    Unscaled,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DesktopConfig {
    pub mode: ViewMode,
    pub view: ViewConfig,
    pub simulation: SimulationSettings,
}

impl DesktopConfig {
    /// Reads the file named by [`CONFIG_ENV`]. Defaults are used when the
    /// variable is not set or the file is rejected.
    pub fn load() -> Self {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::load_or_default(Path::new(&path)),
            None => {
                info!("{} not set, using default configuration", CONFIG_ENV);
                Self::default()
            }
        }
    }

    pub fn load_or_default(path: &Path) -> Self {
        Self::from_file(path).unwrap_or_else(|e| {
            warn!("{:#}; using default configuration", e);
            Self::default()
        })
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file {}", path.display()))?;
        let config = Self::from_json(&text)
            .with_context(|| format!("Invalid configuration in {}", path.display()))?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.view.validate()?;
        self.simulation.validate()
    }

    /// The view configuration for the selected mode. The unscaled mode keeps
    /// the viewport, colors, keys and feedback rate of `view`.
    pub fn view_config(&self) -> ViewConfig {
        match self.mode {
            ViewMode::Scaled => self.view.clone(),
            ViewMode::Unscaled => ViewConfig {
                viewport: self.view.viewport,
                feedback_rate: self.view.feedback_rate,
                colors: self.view.colors,
                keys: self.view.keys,
                ..ViewConfig::unscaled()
            },
        }
    }
}

/// How the demo automaton starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InitialPattern {
    /// One live cell in the middle of the row.
    Single,
    Random { seed: u64 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    /// Wolfram rule number.
    pub rule: u8,
    /// Row width; the row wraps around.
    pub width: usize,
    /// Generations to run, `null` to run until closed.
    pub absolute_limit: Option<usize>,
    /// Pause after each published row.
    pub row_interval_ms: u64,
    pub initial: InitialPattern,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            rule: 30,
            width: 101,
            absolute_limit: Some(300),
            row_interval_ms: 20,
            initial: InitialPattern::Single,
        }
    }
}

impl SimulationSettings {
    pub fn row_interval(&self) -> Duration {
        Duration::from_millis(self.row_interval_ms)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(self.width > 0, "simulation.width must be at least 1");
        Ok(())
    }
}
