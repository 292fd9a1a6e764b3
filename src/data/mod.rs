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

//! Data types for discovered chips
//!
//! A discovery pass produces one [`ChipFeatures`] per chip: the chip's identity
//! plus dense, immutable feature and subfeature tables.

mod chip;
mod feature;

pub use chip::{BusId, BusType, Chip, I2cAdapter};
pub use feature::{
    ChipFeatures, Feature, FeatureTable, FeatureType, Subfeature, SubfeatureFlags,
    SubfeatureType,
};
