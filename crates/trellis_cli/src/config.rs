//! Playground configuration file handling
//!
//! The playground reads an optional `trellis.toml`:
//!
//! ```toml
//! [callout]
//! placement = "bottom-edge-aligned-left"
//! width = 160
//! height = 90
//!
//! [callout.arrow]
//! size = 12
//! ratio = 0.6
//!
//! [waterfall]
//! orientation = "vertical"
//! max_columns = 3
//! items = [{ width = 100, height = 30 }, { width = 100, height = 50 }]
//! ```
//!
//! Every table and key is optional. Command-line flags override file values.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use trellis_core::Size;
use trellis_layout::WaterfallConfig;
use trellis_paint::{ArrowGeometry, ArrowPlacement};

pub const CONFIG_FILE: &str = "trellis.toml";

/// Root of `trellis.toml`
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct PlaygroundConfig {
    #[serde(default)]
    pub callout: CalloutConfig,
    #[serde(default)]
    pub waterfall: WaterfallSection,
}

/// `[callout]` table
#[derive(Debug, Deserialize, Serialize)]
pub struct CalloutConfig {
    #[serde(default)]
    pub placement: ArrowPlacement,
    #[serde(default = "default_width")]
    pub width: f64,
    #[serde(default = "default_height")]
    pub height: f64,
    #[serde(default)]
    pub arrow: ArrowGeometry,
}

fn default_width() -> f64 {
    160.0
}

fn default_height() -> f64 {
    90.0
}

impl Default for CalloutConfig {
    fn default() -> Self {
        Self {
            placement: ArrowPlacement::default(),
            width: default_width(),
            height: default_height(),
            arrow: ArrowGeometry::default(),
        }
    }
}

/// `[waterfall]` table
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct WaterfallSection {
    #[serde(flatten)]
    pub panel: WaterfallConfig,
    /// Item sizes, in input order
    #[serde(default)]
    pub items: Vec<Size>,
}

impl PlaygroundConfig {
    /// Load `trellis.toml` from a directory, or defaults when it is absent
    pub fn load_from_dir(path: &Path) -> Result<Self> {
        let config_path = path.join(CONFIG_FILE);

        if !config_path.exists() {
            tracing::debug!("No {} in {}, using defaults", CONFIG_FILE, path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;

        Self::parse(&content).with_context(|| format!("Failed to parse {}", config_path.display()))
    }

    /// Parse and validate playground settings
    pub fn parse(content: &str) -> Result<Self> {
        let config: PlaygroundConfig = toml::from_str(content)?;
        config.callout.arrow.validate()?;
        config.waterfall.panel.validate()?;
        Ok(config)
    }
}
