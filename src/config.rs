// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Configuration file and environment overrides

use crate::frame::{Dimensions, FrameParameters, LayoutConfig};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Looked up in the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "portalframe.toml";

pub const ENV_ANGLE: &str = "PORTALFRAME_ANGLE";
pub const ENV_PURLINS: &str = "PORTALFRAME_PURLINS";
pub const ENV_JOINT_TOLERANCE: &str = "PORTALFRAME_JOINT_TOLERANCE";

/// Generator configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameConfig {
    /// Rafter angle in degrees. Prompted for when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rafter_angle: Option<f64>,
    /// Purlins on the left rafter. Prompted for when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purlin_count: Option<usize>,
    pub dimensions: Dimensions,
    pub layout: LayoutConfig,
}

impl FrameConfig {
    /// Load configuration from file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        let config: FrameConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path.as_ref()))?;
        Ok(config)
    }

    /// Load `path`, else `portalframe.toml` if present, else defaults,
    /// then apply environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None if PathBuf::from(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(DEFAULT_CONFIG_FILE)?
            }
            None => Self::default(),
        };

        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply overrides from `lookup`, keyed by the `PORTALFRAME_*` names
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(angle) = lookup(ENV_ANGLE) {
            self.rafter_angle = Some(
                angle
                    .trim()
                    .parse()
                    .with_context(|| format!("Invalid {ENV_ANGLE}: {angle:?}"))?,
            );
        }

        if let Some(purlins) = lookup(ENV_PURLINS) {
            self.purlin_count = Some(
                purlins
                    .trim()
                    .parse()
                    .with_context(|| format!("Invalid {ENV_PURLINS}: {purlins:?}"))?,
            );
        }

        if let Some(tolerance) = lookup(ENV_JOINT_TOLERANCE) {
            self.layout.joint_tolerance = tolerance
                .trim()
                .parse()
                .with_context(|| format!("Invalid {ENV_JOINT_TOLERANCE}: {tolerance:?}"))?;
        }

        Ok(())
    }

    /// Save configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = self.to_toml()?;
        std::fs::write(path.as_ref(), content)
            .with_context(|| format!("Failed to write config file: {:?}", path.as_ref()))?;
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }

    /// Parameters for one build with the two user inputs resolved
    pub fn parameters(&self, rafter_angle: f64, purlin_count: usize) -> FrameParameters {
        FrameParameters::new(self.dimensions, rafter_angle, purlin_count)
    }
}
