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

//! Destinations for discovered chips and buses

use serde::{Deserialize, Serialize};

use crate::config::SysfsConfig;
use crate::data::{BusId, ChipFeatures, I2cAdapter};
use crate::error::Result;
use crate::hw::{discover, discover_buses};

/// Receives chips and i2c adapters as discovery finds them
#[cfg_attr(test, mockall::automock)]
pub trait Registry {
    fn add_chip(&mut self, chip: ChipFeatures);

    /// Adapters are only reported by [`discover_buses`]; most callers can
    /// ignore them.
    fn add_bus(&mut self, _bus: I2cAdapter) {}
}

impl Registry for Vec<ChipFeatures> {
    fn add_chip(&mut self, chip: ChipFeatures) {
        self.push(chip);
    }
}

/// Everything discovery found on one system
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChipCatalog {
    pub chips: Vec<ChipFeatures>,
    pub buses: Vec<I2cAdapter>,
}

impl ChipCatalog {
    /// Discover adapters, then chips, under `config.root`
    pub fn scan(config: &SysfsConfig) -> Result<Self> {
        let mut catalog = Self::default();
        discover_buses(config, &mut catalog)?;
        discover(config, &mut catalog)?;
        Ok(catalog)
    }

    /// Chips whose `name` attribute equals `prefix`
    pub fn chips_named<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = &'a ChipFeatures> {
        self.chips.iter().filter(move |c| c.chip.prefix == prefix)
    }

    /// Adapter name of an i2c bus, if the adapter was found
    pub fn adapter_name(&self, bus: BusId) -> Option<&str> {
        self.buses
            .iter()
            .find(|b| b.bus == bus)
            .map(|b| b.adapter.as_str())
    }
}

impl Registry for ChipCatalog {
    fn add_chip(&mut self, chip: ChipFeatures) {
        self.chips.push(chip);
    }

    fn add_bus(&mut self, bus: I2cAdapter) {
        self.buses.push(bus);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{BusType, Chip, FeatureTable};
    use std::path::PathBuf;

    fn chip(prefix: &str) -> ChipFeatures {
        ChipFeatures::new(
            Chip {
                prefix: prefix.to_string(),
                path: PathBuf::from("/sys/class/hwmon").join(prefix),
                bus: BusId::first(BusType::Virtual),
                addr: 0,
            },
            FeatureTable {
                features: Vec::new(),
                subfeatures: Vec::new(),
            },
        )
    }

    #[test]
    fn test_vec_ignores_buses() {
        let mut chips: Vec<ChipFeatures> = Vec::new();
        chips.add_chip(chip("acpitz"));
        chips.add_bus(I2cAdapter {
            bus: BusId::new(BusType::I2c, 0),
            adapter: "SMBus".to_string(),
        });
        assert_eq!(chips.len(), 1);
    }

    #[test]
    fn test_catalog_lookups() {
        let mut catalog = ChipCatalog::default();
        catalog.add_chip(chip("coretemp"));
        catalog.add_chip(chip("nvme"));
        catalog.add_chip(chip("nvme"));
        catalog.add_bus(I2cAdapter {
            bus: BusId::new(BusType::I2c, 3),
            adapter: "SMBus I801 adapter at efa0".to_string(),
        });

        assert_eq!(catalog.chips_named("nvme").count(), 2);
        assert_eq!(catalog.chips_named("k10temp").count(), 0);
        assert_eq!(
            catalog.adapter_name(BusId::new(BusType::I2c, 3)),
            Some("SMBus I801 adapter at efa0")
        );
        assert_eq!(catalog.adapter_name(BusId::new(BusType::I2c, 0)), None);
    }
}
