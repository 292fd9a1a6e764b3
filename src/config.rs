/*
 * This file is part of Hyperfan.
 *
 * Copyright (C) 2025 Hyperfan contributors
 *
 * Hyperfan is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * Hyperfan is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with Hyperfan. If not, see <https://www.gnu.org/licenses/>.
 */

//! Discovery configuration
//!
//! The sysfs root is injected here rather than read from global state, so
//! tests and containers can point discovery at any directory tree.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::constants::{env as env_keys, paths};
use crate::error::{Result, SensorsError};

fn default_root() -> PathBuf {
    PathBuf::from(paths::SYSFS_MOUNT)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SysfsConfig {
    /// Mount point of sysfs
    #[serde(default = "default_root")]
    pub root: PathBuf,
    /// Treat duplicate subfeatures and out-of-range channels as errors
    /// instead of skipping them
    #[serde(default)]
    pub strict: bool,
}

impl Default for SysfsConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            strict: false,
        }
    }
}

impl SysfsConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            strict: false,
        }
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Defaults overridden by `HF_SENSORS_SYSFS_ROOT` and `HF_SENSORS_STRICT`
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(root) = env::var_os(env_keys::SYSFS_ROOT).filter(|v| !v.is_empty()) {
            config.root = PathBuf::from(root);
        }

        if let Ok(value) = env::var(env_keys::STRICT) {
            match parse_bool(&value) {
                Some(strict) => config.strict = strict,
                None => warn!(
                    var = env_keys::STRICT,
                    value = %value,
                    "Ignoring unrecognised boolean"
                ),
            }
        }

        debug!(root = ?config.root, strict = config.strict, "Loaded sysfs config from environment");
        config
    }

    /// Load a JSON config file; missing keys take their defaults
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| SensorsError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Self = serde_json::from_str(&content)?;
        if config.root.as_os_str().is_empty() {
            return Err(SensorsError::config(format!(
                "{}: sysfs root must not be empty",
                path.display()
            )));
        }

        debug!(path = ?path, root = ?config.root, strict = config.strict, "Loaded sysfs config");
        Ok(config)
    }

    /// `<root>/class/<class_name>`
    pub fn class_dir(&self, class_name: &str) -> PathBuf {
        self.root.join(paths::CLASS_DIR).join(class_name)
    }

    /// `<root>/bus/<bus_type>/devices`
    pub fn bus_devices_dir(&self, bus_type: &str) -> PathBuf {
        self.root
            .join(paths::BUS_DIR)
            .join(bus_type)
            .join(paths::DEVICES_DIR)
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "" | "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
