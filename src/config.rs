//! Shop configuration parser
//!
//! Parses `seedcycle.toml`. Every key is optional; a missing file means
//! defaults.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

/// Shop-level settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShopSettings {
    /// WhatsApp number orders are sent to, international format, digits only
    #[serde(default = "default_whatsapp_number")]
    pub whatsapp_number: String,
    /// Directory holding orders, customers and the plan log
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

fn default_whatsapp_number() -> String {
    "919347122416".to_string()
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(".seedcycle")
}

impl Default for ShopSettings {
    fn default() -> Self {
        Self {
            whatsapp_number: default_whatsapp_number(),
            data_dir: default_data_dir(),
        }
    }
}

/// Accepted range for the average cycle length on intake
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct IntakeLimits {
    /// Shortest accepted cycle (default: 20)
    #[serde(default = "default_min_cycle_length")]
    pub min_cycle_length: u32,
    /// Longest accepted cycle (default: 45)
    #[serde(default = "default_max_cycle_length")]
    pub max_cycle_length: u32,
}

const fn default_min_cycle_length() -> u32 {
    20
}

const fn default_max_cycle_length() -> u32 {
    45
}

impl Default for IntakeLimits {
    fn default() -> Self {
        Self {
            min_cycle_length: default_min_cycle_length(),
            max_cycle_length: default_max_cycle_length(),
        }
    }
}

impl IntakeLimits {
    /// Reject a cycle length outside the configured range
    pub fn check(&self, length: u32) -> Result<()> {
        if !(self.min_cycle_length..=self.max_cycle_length).contains(&length) {
            bail!(
                "Average cycle length must be between {} and {} days, got {length}",
                self.min_cycle_length,
                self.max_cycle_length
            );
        }
        Ok(())
    }
}

/// Top-level configuration parsed from seedcycle.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShopConfig {
    /// Shop settings
    #[serde(default)]
    pub shop: ShopSettings,
    /// Intake validation
    #[serde(default)]
    pub intake: IntakeLimits,
}

impl ShopConfig {
    /// Parse a seedcycle.toml file from a path
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content)
    }

    /// Like [`Self::from_path`], but a missing file yields the defaults
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::from_path(path)
    }

    /// Parse seedcycle.toml content from a string
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("Failed to parse seedcycle.toml")?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        let number = &self.shop.whatsapp_number;
        if number.is_empty() || !number.chars().all(|c| c.is_ascii_digit()) {
            bail!("Invalid whatsapp_number '{number}': expected digits only, e.g. 919812345678");
        }

        if self.intake.min_cycle_length == 0 {
            bail!("min_cycle_length must be at least 1");
        }

        if self.intake.min_cycle_length > self.intake.max_cycle_length {
            bail!(
                "min_cycle_length ({}) is greater than max_cycle_length ({})",
                self.intake.min_cycle_length,
                self.intake.max_cycle_length
            );
        }

        Ok(())
    }
}
