//! YAML noise configs.
//!
//! ```yaml
//! noise:
//!   family: voronoi
//!   distance: worley
//!   function: f2-minus-f1
//!   tiling: true
//! settings:
//!   seed: 7
//!   frequency: 6
//! domain:
//!   rotation: [0.0, 45.0, 0.0]
//! ```
//!
//! `noise` may also be a preset name (`noise: simplex-turbulence`). Every
//! section and field is optional.

use anyhow::{Context, Result};
use grain_core::{NoiseType, Settings};
use grain_math::Trs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Noise selector in a config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NoiseSpec {
    /// A name from `grain list`.
    Preset(String),
    /// Fully spelled out selector.
    Full(NoiseType),
}

/// Contents of a `--config` file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NoiseConfig {
    pub noise: Option<NoiseSpec>,
    pub settings: Option<Settings>,
    pub domain: Option<Trs>,
}

impl NoiseConfig {
    /// Config with every section filled in.
    pub fn complete(noise_type: NoiseType) -> Self {
        Self {
            noise: Some(NoiseSpec::Full(noise_type)),
            settings: Some(Settings::default()),
            domain: Some(Trs::default()),
        }
    }

    /// Reads and parses a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("Invalid config: {}", path.display()))
    }

    /// Parses YAML text.
    pub fn parse(text: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Loads `path` if given, otherwise an empty config.
    pub fn load_optional(path: Option<&Path>) -> Result<Self> {
        path.map_or_else(|| Ok(Self::default()), Self::load)
    }

    /// Selector from the `noise` section, resolving preset names.
    pub fn noise_type(&self) -> Result<Option<NoiseType>> {
        match &self.noise {
            None => Ok(None),
            Some(NoiseSpec::Preset(name)) => Ok(Some(name.parse()?)),
            Some(NoiseSpec::Full(noise_type)) => Ok(Some(*noise_type)),
        }
    }

    /// Serialises back to YAML.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}
