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

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Interconnect a chip sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BusType {
    Virtual,
    I2c,
    Spi,
    Pci,
    Isa,
    Acpi,
    Hid,
}

impl fmt::Display for BusType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Virtual => "virtual",
            Self::I2c => "i2c",
            Self::Spi => "spi",
            Self::Pci => "pci",
            Self::Isa => "isa",
            Self::Acpi => "acpi",
            Self::Hid => "hid",
        };
        f.write_str(name)
    }
}

/// Bus type plus bus number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BusId {
    pub bus_type: BusType,
    pub nr: u16,
}

impl BusId {
    pub fn new(bus_type: BusType, nr: u16) -> Self {
        Self { bus_type, nr }
    }

    /// Bus number 0 of the given type, used by every bus without numbering
    pub fn first(bus_type: BusType) -> Self {
        Self::new(bus_type, 0)
    }
}

/// Identity of one sensor chip
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chip {
    /// Contents of the chip's `name` attribute
    pub prefix: String,
    /// Directory the chip's attribute files live in
    pub path: PathBuf,
    pub bus: BusId,
    /// Bus-specific address (i2c address, PCI devfn, platform id, ...)
    pub addr: u32,
}

/// An i2c adapter found while scanning for buses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct I2cAdapter {
    pub bus: BusId,
    /// Adapter name as reported by the driver
    pub adapter: String,
}
