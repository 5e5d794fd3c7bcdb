//! Configuration management for focus stacking
//!
//! Tunables for the sharpness filter, loadable from and savable to TOML.

use crate::errors::{Result, StackError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Width of the LoG kernel applied before stacking.
pub const DEFAULT_KERNEL_SIZE: usize = 13;

/// Sigma of the LoG kernel applied before stacking.
pub const DEFAULT_SIGMA: f64 = 1.6;

/// Sharpness filter configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StackConfig {
    /// Kernel width and height; even values are bumped to the next odd size
    pub kernel_size: usize,
    /// Gaussian scale of the kernel
    pub sigma: f64,
}

impl Default for StackConfig {
    fn default() -> Self {
        Self {
            kernel_size: DEFAULT_KERNEL_SIZE,
            sigma: DEFAULT_SIGMA,
        }
    }
}

impl StackConfig {
    /// Load configuration from a TOML file, falling back to defaults when it does not exist
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            log::info!("Config file not found at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        Self::load_existing(path)
    }

    /// Load configuration from a TOML file the caller named explicitly.
    ///
    /// Unlike [`StackConfig::load_from_file`], a missing file is an error.
    pub fn load_existing<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let contents = fs::read_to_string(path).map_err(|e| StackError::io(path, e))?;

        let config: StackConfig = toml::from_str(&contents).map_err(|e| {
            StackError::InvalidConfig(format!("Failed to parse {:?}: {}", path, e))
        })?;
        config.validate()?;

        log::info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| StackError::io(parent, e))?;
            }
        }

        let toml_string = toml::to_string_pretty(self).map_err(|e| {
            StackError::InvalidConfig(format!("Failed to serialize config: {}", e))
        })?;

        fs::write(path, toml_string).map_err(|e| StackError::io(path, e))?;

        log::info!("Saved configuration to {:?}", path);
        Ok(())
    }

    pub fn default_path() -> PathBuf {
        PathBuf::from("focusstack.toml")
    }

    /// Load from the default location or use defaults
    pub fn load_or_default() -> Self {
        Self::load_from_file(Self::default_path()).unwrap_or_else(|e| {
            log::warn!("Failed to load config, using defaults: {}", e);
            Self::default()
        })
    }

    /// Kernel size actually used once even sizes are bumped
    pub fn effective_kernel_size(&self) -> usize {
        if self.kernel_size % 2 == 0 {
            self.kernel_size + 1
        } else {
            self.kernel_size
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.kernel_size == 0 {
            return Err(StackError::InvalidConfig(
                "Kernel size must be positive".to_string(),
            ));
        }
        if !self.sigma.is_finite() || self.sigma <= 0.0 {
            return Err(StackError::InvalidConfig(format!(
                "Sigma must be a positive finite number, got {}",
                self.sigma
            )));
        }
        Ok(())
    }
}
