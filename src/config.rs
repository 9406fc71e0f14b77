//! Render configuration — optional YAML loaded from ~/.chordline/render.yaml
//! or an explicit path.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::audio::{Normalization, Renderer, SampleFormat, SAMPLE_RATE};
use crate::instrument::{OrganParams, PluckParams, SynthParams};
use crate::notation::{NotationOptions, TrackStateMode};

/// Errors from loading an explicitly requested config file.
#[derive(Debug)]
pub enum ConfigError {
    /// The file could not be read.
    Io(PathBuf, std::io::Error),
    /// The file is not valid YAML for [`RenderConfig`].
    Yaml(PathBuf, serde_yaml::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(path, e) => write!(f, "cannot read {}: {e}", path.display()),
            ConfigError::Yaml(path, e) => write!(f, "invalid config {}: {e}", path.display()),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(_, e) => Some(e),
            ConfigError::Yaml(_, e) => Some(e),
        }
    }
}

/// Everything that tunes a render. Every field is optional in YAML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Output sample rate in Hz.
    pub sample_rate: u32,
    /// Noise seed for the guitar. None = different every run.
    pub seed: Option<u64>,
    pub normalization: Normalization,
    pub track_state: TrackStateMode,
    pub sample_format: SampleFormat,
    pub organ: OrganParams,
    pub guitar: PluckParams,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            sample_rate: SAMPLE_RATE,
            seed: None,
            normalization: Normalization::default(),
            track_state: TrackStateMode::default(),
            sample_format: SampleFormat::default(),
            organ: OrganParams::default(),
            guitar: PluckParams::default(),
        }
    }
}

/// Get the default config file path.
fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".chordline").join("render.yaml"))
}

impl RenderConfig {
    /// Load from ~/.chordline/render.yaml.
    /// Returns None if the file doesn't exist or doesn't parse.
    pub fn load() -> Option<Self> {
        Self::load_optional(&config_path()?)
    }

    /// Load from `path` if it exists; a bad file is logged and skipped.
    fn load_optional(path: &Path) -> Option<Self> {
        let content = std::fs::read_to_string(path).ok()?;
        match serde_yaml::from_str(&content) {
            Ok(config) => {
                log::debug!("loaded config from {}", path.display());
                Some(config)
            }
            Err(e) => {
                log::warn!("ignoring {}: {e}", path.display());
                None
            }
        }
    }

    /// Load from an explicit path; any failure is an error.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        serde_yaml::from_str(&content).map_err(|e| ConfigError::Yaml(path.to_path_buf(), e))
    }

    /// The explicit file if given, else the home config, else defaults.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::load_from(path),
            None => Ok(Self::load().unwrap_or_default()),
        }
    }

    pub fn synth_params(&self) -> SynthParams {
        SynthParams {
            organ: self.organ,
            guitar: self.guitar,
        }
    }

    pub fn notation_options(&self) -> NotationOptions {
        NotationOptions {
            track_state: self.track_state,
        }
    }

    /// A renderer set up from this config.
    pub fn renderer(&self) -> Renderer {
        Renderer::new(self.sample_rate, self.synth_params())
            .with_seed(self.seed)
            .with_normalization(self.normalization)
    }
}
