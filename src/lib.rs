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

//! hf-sensors - hwmon chip discovery for Linux
//!
//! Finds every hardware monitoring chip the kernel exposes through sysfs,
//! works out which bus it sits on, and builds a dense table of its
//! features (temp1, fan2, in0, ...) and their subfeatures (input, max,
//! alarm, ...). Values are read and written in physical units.
//!
//! # Module Structure
//!
//! - `data/` - Chip, bus, feature and subfeature types
//! - `hw/` - sysfs enumeration, name parsing, bus resolution, value I/O
//! - `registry` - Where discovered chips and adapters are delivered
//!
//! # Example
//!
//! ```no_run
//! use hf_sensors::{discover_chips, read_value, SubfeatureType, SysfsConfig};
//!
//! let chips = discover_chips(&SysfsConfig::default()).unwrap();
//! for chip in &chips {
//!     for feature in chip.features() {
//!         if let Some(input) = chip.subfeature(feature, SubfeatureType::TempInput) {
//!             println!("{} {}: {}", chip.chip.prefix, feature.name,
//!                      read_value(&chip.chip, input).unwrap());
//!         }
//!     }
//! }
//! ```

// Grouped modules
pub mod data;
pub mod hw;

// Standalone modules
pub mod config;
pub mod constants;
pub mod error;
pub mod registry;

#[cfg(test)]
pub mod test_utils;

pub use config::SysfsConfig;
pub use data::{
    BusId, BusType, Chip, ChipFeatures, Feature, FeatureTable, FeatureType, I2cAdapter,
    Subfeature, SubfeatureFlags, SubfeatureType,
};
pub use error::{Result, SensorsError};
pub use hw::{
    discover, discover_buses, discover_chips, read_value, sysfs_available, write_value,
    BusAddress,
};
pub use registry::{ChipCatalog, Registry};
