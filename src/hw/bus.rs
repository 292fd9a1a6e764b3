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

//! Bus topology resolution
//!
//! Works out which bus a hwmon device hangs off and its address on that bus
//! from the device's `subsystem` link and the kernel's device naming.

use std::fs;
use std::io;
use std::path::Path;

use tracing::{debug, trace};

use super::attr::read_attr;
use super::scan::{scan_dec, scan_hex, scan_ident};
use crate::config::SysfsConfig;
use crate::constants::{bus, paths};
use crate::data::{BusId, BusType};
use crate::error::{Result, SensorsError};

/// Where a chip sits: bus plus bus-specific address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusAddress {
    pub bus: BusId,
    pub addr: u32,
}

impl BusAddress {
    fn new(bus_type: BusType, nr: u16, addr: u32) -> Self {
        Self {
            bus: BusId::new(bus_type, nr),
            addr,
        }
    }

    /// Address of a chip with no backing device
    pub fn virtual_device() -> Self {
        Self::new(BusType::Virtual, 0, 0)
    }
}

/// Resolve the bus of `device`, whose kernel name is `dev_name`.
///
/// `None` as device means a virtual chip. `Ok(None)` means the device sits on
/// a bus this library does not know about and should be ignored.
pub fn resolve_bus(
    config: &SysfsConfig,
    device: Option<&Path>,
    dev_name: &str,
) -> Result<Option<BusAddress>> {
    let Some(device) = device else {
        return Ok(Some(BusAddress::virtual_device()));
    };

    let subsystem = read_subsystem(device)?;
    let subsystem = subsystem.as_deref();
    let accepts = |name: &str| subsystem.map_or(true, |s| s == name);

    if accepts("i2c") {
        if let Some((nr, addr)) = parse_i2c_name(dev_name) {
            return Ok(Some(i2c_address(config, nr, addr)));
        }
    }

    if accepts("spi") {
        if let Some((nr, addr)) = parse_spi_name(dev_name) {
            return Ok(Some(BusAddress::new(BusType::Spi, nr, addr)));
        }
    }

    if accepts("pci") {
        if let Some(addr) = parse_pci_name(dev_name) {
            return Ok(Some(BusAddress::new(BusType::Pci, 0, addr)));
        }
    }

    let resolved = match subsystem {
        None | Some("platform" | "of_platform") => {
            let addr = parse_platform_name(dev_name).unwrap_or(0);
            Some(BusAddress::new(BusType::Isa, 0, addr))
        }
        Some("acpi") => Some(BusAddress::new(BusType::Acpi, 0, 0)),
        Some("hid") => {
            parse_hid_name(dev_name).map(|(nr, id)| BusAddress::new(BusType::Hid, nr, id))
        }
        Some(_) => None,
    };

    match &resolved {
        Some(address) => trace!(device = dev_name, ?address, "Resolved bus"),
        None => debug!(device = dev_name, ?subsystem, "Ignoring device on unsupported bus"),
    }
    Ok(resolved)
}

/// Name of the subsystem `device` belongs to, `None` when the kernel
/// exposes neither the `subsystem` nor the older `bus` link
fn read_subsystem(device: &Path) -> Result<Option<String>> {
    let mut link = device.join(paths::attr::SUBSYSTEM);
    let mut target = fs::read_link(&link);
    if matches!(&target, Err(e) if e.kind() == io::ErrorKind::NotFound) {
        link = device.join(paths::attr::BUS);
        target = fs::read_link(&link);
    }

    match target {
        Ok(target) => Ok(Some(
            target
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default(),
        )),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(SensorsError::kernel(link, e)),
    }
}

/// i2c chips sitting behind an ISA bridge adapter are reported as ISA
fn i2c_address(config: &SysfsConfig, nr: u16, addr: u32) -> BusAddress {
    if nr == bus::LEGACY_ISA_BUS {
        return BusAddress::new(BusType::Isa, 0, addr);
    }

    let adapter_dir = config
        .class_dir(paths::I2C_ADAPTER_CLASS)
        .join(format!("{}{}", bus::I2C_ADAPTER_PREFIX, nr));
    match read_attr(&adapter_dir, paths::attr::DEVICE_NAME) {
        Some(name) if name.starts_with(bus::ISA_ADAPTER_PREFIX) => {
            BusAddress::new(BusType::Isa, 0, addr)
        }
        _ => BusAddress::new(BusType::I2c, nr, addr),
    }
}

/// `<bus>-<addr>`, e.g. `0-002d`
fn parse_i2c_name(name: &str) -> Option<(u16, u32)> {
    let (nr, rest) = scan_dec(name)?;
    let (addr, _) = scan_hex(rest.strip_prefix('-')?)?;
    Some((u16::try_from(nr).ok()?, u32::try_from(addr).ok()?))
}

/// `spi<bus>.<chip select>`, e.g. `spi0.1`
fn parse_spi_name(name: &str) -> Option<(u16, u32)> {
    let (nr, rest) = scan_dec(name.strip_prefix(bus::SPI_DEVICE_PREFIX)?)?;
    let (addr, _) = scan_dec(rest.strip_prefix('.')?)?;
    Some((u16::try_from(nr).ok()?, u32::try_from(addr).ok()?))
}

/// Four hex fields separated as `a:b:c.d`
fn parse_hex_quad(name: &str) -> Option<[u64; 4]> {
    let (a, rest) = scan_hex(name)?;
    let (b, rest) = scan_hex(rest.strip_prefix(':')?)?;
    let (c, rest) = scan_hex(rest.strip_prefix(':')?)?;
    let (d, _) = scan_hex(rest.strip_prefix('.')?)?;
    Some([a, b, c, d])
}

/// `<domain>:<bus>:<slot>.<function>`, packed into one address
fn parse_pci_name(name: &str) -> Option<u32> {
    let [domain, bus, slot, function] =
        parse_hex_quad(name)?.map(|f| f.min(u64::from(u32::MAX)));
    let addr = (domain << 16) + (bus << 8) + (slot << 3) + function;
    u32::try_from(addr).ok()
}

/// `<driver>.<id>`, e.g. `it87.656`
fn parse_platform_name(name: &str) -> Option<u32> {
    let rest = scan_ident(name)?;
    let (addr, _) = scan_dec(rest.strip_prefix('.')?)?;
    u32::try_from(addr).ok()
}

/// `<bus>:<vendor>:<product>.<id>`, e.g. `0003:046D:C52B.0001`
fn parse_hid_name(name: &str) -> Option<(u16, u32)> {
    let [nr, _vendor, _product, id] = parse_hex_quad(name)?;
    Some((u16::try_from(nr).ok()?, u32::try_from(id).ok()?))
}
