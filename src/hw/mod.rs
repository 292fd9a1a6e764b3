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

//! sysfs access
//!
//! Everything that touches the filesystem: enumeration, name parsing, bus
//! resolution, feature table construction and value I/O.

mod attr;
mod bus;
mod classify;
mod discovery;
mod enumerate;
mod features;
mod scan;

pub use attr::{attr_mode, read_attr, read_value, write_value};
pub use bus::{resolve_bus, BusAddress};
pub use classify::{classify, Classified};
pub use discovery::{discover, discover_buses, discover_chips, sysfs_available};
pub use enumerate::{for_each_busdev, for_each_classdev, for_each_entry};
pub use features::read_dynamic_chip;
