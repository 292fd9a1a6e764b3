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

//! Constants for hwmon sysfs discovery
//!
//! Centralizes the sysfs layout, table limits, and value scales.
//! Never use magic numbers in other files - add them here first.

/// Sysfs layout, relative to the configured mount point
pub mod paths {
    /// Default sysfs mount point
    pub const SYSFS_MOUNT: &str = "/sys";

    /// Directory holding all device classes
    pub const CLASS_DIR: &str = "class";

    /// Directory holding all bus types
    pub const BUS_DIR: &str = "bus";

    /// Per-bus device directory (`bus/<type>/devices`)
    pub const DEVICES_DIR: &str = "devices";

    /// Modern hardware monitoring class
    pub const HWMON_CLASS: &str = "hwmon";

    /// I2C adapter class
    pub const I2C_ADAPTER_CLASS: &str = "i2c-adapter";

    /// I2C bus type, used by the pre-hwmon-class layout
    pub const I2C_BUS: &str = "i2c";

    /// Attribute and link names inside a chip or device directory
    pub mod attr {
        /// Chip identifier, mandatory for every chip
        pub const NAME: &str = "name";
        /// Link from a class device to its backing device
        pub const DEVICE: &str = "device";
        /// Link from a device to its subsystem
        pub const SUBSYSTEM: &str = "subsystem";
        /// Pre-2.6.18 spelling of the subsystem link
        pub const BUS: &str = "bus";
        /// Adapter name behind an i2c-adapter class device on old kernels
        pub const DEVICE_NAME: &str = "device/name";
    }
}

/// Sizes of the sparse subfeature table
///
/// The table has one slot per `(class, channel, alarm bit, index)` combination,
/// followed by one slot per VID channel and a single beep-enable slot.
pub mod limits {
    /// Channels per sensor class (in0..in19, temp1..temp20, ...)
    pub const MAX_SENSORS_PER_TYPE: usize = 20;

    /// Subfeatures per half group (non-alarm or alarm)
    pub const MAX_SUBFEATURES: usize = 8;

    /// Grouped sensor classes: in, fan, temp, power, energy, curr
    pub const MAX_SENSOR_TYPES: usize = 6;

    /// Slots taken by one channel (non-alarm half + alarm half)
    pub const CHANNEL_SLOTS: usize = MAX_SUBFEATURES * 2;

    /// First slot of the trailing VID / beep-enable region
    pub const TRAILING_REGION: usize =
        MAX_SENSORS_PER_TYPE * MAX_SUBFEATURES * MAX_SENSOR_TYPES * 2;

    /// Slot of the beep-enable subfeature
    pub const BEEP_ENABLE_SLOT: usize = TRAILING_REGION + MAX_SENSORS_PER_TYPE;

    /// Total slots in the sparse table
    pub const ALL_POSSIBLE_SUBFEATURES: usize = BEEP_ENABLE_SLOT + 1;

    /// Longest attribute line read from sysfs, newline included
    pub const ATTR_MAX: usize = 128;
}

/// Bus detection constants
pub mod bus {
    /// Pseudo i2c bus number old kernels used for ISA chips
    pub const LEGACY_ISA_BUS: u16 = 9191;

    /// Adapter name prefix marking an i2c adapter as an ISA bridge
    pub const ISA_ADAPTER_PREFIX: &str = "ISA ";

    /// Prefix of i2c adapter class entries (`i2c-<n>`)
    pub const I2C_ADAPTER_PREFIX: &str = "i2c-";

    /// Prefix of SPI device names (`spi<bus>.<cs>`)
    pub const SPI_DEVICE_PREFIX: &str = "spi";
}

/// Divisors between raw sysfs integers and physical units
pub mod scale {
    /// Millivolts, millidegrees, milliamperes, milliseconds
    pub const MILLI: f64 = 1000.0;

    /// Microwatts, microjoules
    pub const MICRO: f64 = 1_000_000.0;

    /// RPM, alarms, and other discrete values
    pub const UNIT: f64 = 1.0;
}

/// Environment variables read by [`crate::SysfsConfig::from_env`]
pub mod env {
    /// Overrides the sysfs mount point
    pub const SYSFS_ROOT: &str = "HF_SENSORS_SYSFS_ROOT";

    /// Enables strict mode ("1", "true", "yes", "on")
    pub const STRICT: &str = "HF_SENSORS_STRICT";
}
