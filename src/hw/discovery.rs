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

//! Chip discovery
//!
//! Walks `class/hwmon` (or `bus/i2c/devices` on kernels that predate the
//! hwmon class), works out each chip's bus and feature tables, and hands the
//! result to a [`Registry`].

use std::fs;
use std::io;
use std::path::Path;

use tracing::{debug, info, trace};

use super::attr::read_attr;
use super::bus::resolve_bus;
use super::enumerate::{for_each_busdev, for_each_classdev};
use super::features::read_dynamic_chip;
use super::scan::scan_dec;
use crate::config::SysfsConfig;
use crate::constants::{bus, paths};
use crate::data::{BusId, BusType, Chip, ChipFeatures, I2cAdapter};
use crate::error::{Result, SensorsError};
use crate::registry::Registry;

/// True when `config.root` looks like a mounted sysfs (a non-empty directory)
pub fn sysfs_available(config: &SysfsConfig) -> bool {
    match fs::read_dir(&config.root) {
        Ok(mut entries) => entries.next().is_some(),
        Err(e) => {
            debug!(root = ?config.root, error = %e, "sysfs not available");
            false
        }
    }
}

/// Discover every sensor chip and add it to `registry`.
///
/// The first error from any chip aborts the scan; chips already added stay in
/// the registry.
pub fn discover<R>(config: &SysfsConfig, registry: &mut R) -> Result<()>
where
    R: Registry + ?Sized,
{
    let mut found = 0usize;

    let modern = for_each_classdev(config, paths::HWMON_CLASS, |entry, name| {
        if add_hwmon_device(config, registry, entry, name)? {
            found += 1;
        }
        Ok(())
    });

    match modern {
        Err(e) if e.is_not_found() => {
            debug!(error = %e, "No hwmon class, scanning i2c devices");
            let legacy = for_each_busdev(config, paths::I2C_BUS, |entry, name| {
                if read_one_chip(config, registry, entry, Some(entry), name)? {
                    found += 1;
                }
                Ok(())
            });
            match legacy {
                Err(e) if e.is_not_found() => {
                    debug!(error = %e, "No i2c devices either");
                }
                other => other?,
            }
        }
        other => other?,
    }

    info!(root = ?config.root, chips = found, "Sensor chip discovery complete");
    Ok(())
}

/// Discover every sensor chip into a new vector
pub fn discover_chips(config: &SysfsConfig) -> Result<Vec<ChipFeatures>> {
    let mut chips = Vec::new();
    discover(config, &mut chips)?;
    Ok(chips)
}

/// Discover i2c adapters and report them through [`Registry::add_bus`]
pub fn discover_buses<R>(config: &SysfsConfig, registry: &mut R) -> Result<()>
where
    R: Registry + ?Sized,
{
    let result = for_each_classdev(config, paths::I2C_ADAPTER_CLASS, |entry, name| {
        add_i2c_bus(registry, entry, name);
        Ok(())
    });

    match result {
        Err(e) if e.is_not_found() => {
            let legacy = for_each_busdev(config, paths::I2C_BUS, |entry, name| {
                add_i2c_bus(registry, entry, name);
                Ok(())
            });
            match legacy {
                Err(e) if e.is_not_found() => Ok(()),
                other => other,
            }
        }
        other => other,
    }
}

fn add_i2c_bus<R>(registry: &mut R, entry: &Path, name: &str)
where
    R: Registry + ?Sized,
{
    let Some((nr, _)) = name
        .strip_prefix(bus::I2C_ADAPTER_PREFIX)
        .and_then(scan_dec)
    else {
        return;
    };
    let Ok(nr) = u16::try_from(nr) else { return };
    if nr == bus::LEGACY_ISA_BUS {
        return;
    }

    let Some(adapter) = read_attr(entry, paths::attr::NAME)
        .or_else(|| read_attr(entry, paths::attr::DEVICE_NAME))
    else {
        trace!(entry = ?entry, "Adapter has no name");
        return;
    };

    debug!(nr, adapter = %adapter, "Found i2c adapter");
    registry.add_bus(I2cAdapter {
        bus: BusId::new(BusType::I2c, nr),
        adapter,
    });
}

/// Handle one `class/hwmon/<name>` entry. Returns whether a chip was added.
fn add_hwmon_device<R>(
    config: &SysfsConfig,
    registry: &mut R,
    entry: &Path,
    name: &str,
) -> Result<bool>
where
    R: Registry + ?Sized,
{
    let link = entry.join(paths::attr::DEVICE);
    match fs::read_link(&link) {
        Ok(target) => {
            let dev_name = target
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            // Drivers expose their attributes on either the device or the class node
            if read_one_chip(config, registry, &link, Some(&link), &dev_name)? {
                return Ok(true);
            }
            read_one_chip(config, registry, entry, Some(&link), &dev_name)
        }
        Err(e) if matches!(e.kind(), io::ErrorKind::NotFound | io::ErrorKind::InvalidInput) => {
            read_one_chip(config, registry, entry, None, name)
        }
        Err(e) => Err(SensorsError::kernel(link, e)),
    }
}

/// Build the chip whose attributes live in `hwmon_path` and register it.
///
/// Returns `Ok(false)` when the directory has no `name`, the bus is not
/// supported, or no subfeature was recognised.
fn read_one_chip<R>(
    config: &SysfsConfig,
    registry: &mut R,
    hwmon_path: &Path,
    device: Option<&Path>,
    dev_name: &str,
) -> Result<bool>
where
    R: Registry + ?Sized,
{
    let Some(prefix) = read_attr(hwmon_path, paths::attr::NAME) else {
        trace!(path = ?hwmon_path, "No name attribute, skipping");
        return Ok(false);
    };

    let Some(address) = resolve_bus(config, device, dev_name)? else {
        return Ok(false);
    };

    let Some(table) = read_dynamic_chip(hwmon_path, config.strict)? else {
        debug!(chip = %prefix, path = ?hwmon_path, "No subfeatures, discarding chip");
        return Ok(false);
    };

    info!(
        chip = %prefix,
        bus = %address.bus.bus_type,
        nr = address.bus.nr,
        addr = address.addr,
        features = table.features.len(),
        "Found sensor chip"
    );

    let chip = Chip {
        prefix,
        path: hwmon_path.to_path_buf(),
        bus: address.bus,
        addr: address.addr,
    };
    registry.add_chip(ChipFeatures::new(chip, table));
    Ok(true)
}
