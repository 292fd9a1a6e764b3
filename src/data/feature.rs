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

//! Feature and subfeature types
//!
//! Every [`SubfeatureType`] has a 16-bit code laid out as
//! `class << 8 | alarm_bit | index`, where `alarm_bit` (0x80) separates
//! alarm, fault and other discrete attributes from measured values. The
//! feature table builder sorts on this code, so the discriminants below are
//! part of the ordering contract and must not be renumbered.

use serde::{Deserialize, Serialize};

use super::chip::Chip;
use crate::constants::scale;

/// Class of a feature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u16)]
pub enum FeatureType {
    In = 0x00,
    Fan = 0x01,
    Temp = 0x02,
    Power = 0x03,
    Energy = 0x04,
    Curr = 0x05,
    Vid = 0x10,
    BeepEnable = 0x18,
}

impl FeatureType {
    /// Classes whose features group several `<class><n>_<suffix>` files
    pub fn is_grouped(self) -> bool {
        !matches!(self, Self::Vid | Self::BeepEnable)
    }

    /// Classes numbered from 1 on disk (temp1, fan1, ...) rather than from 0
    pub fn is_one_based(self) -> bool {
        matches!(
            self,
            Self::Fan | Self::Temp | Self::Power | Self::Energy | Self::Curr
        )
    }
}

/// Fine-grained type of a single attribute file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u16)]
pub enum SubfeatureType {
    InInput = 0x000,
    InMin = 0x001,
    InMax = 0x002,
    InAlarm = 0x080,
    InMinAlarm = 0x081,
    InMaxAlarm = 0x082,

    FanInput = 0x100,
    FanMin = 0x101,
    FanAlarm = 0x180,
    FanFault = 0x181,
    FanDiv = 0x182,

    TempInput = 0x200,
    TempMax = 0x201,
    TempMaxHyst = 0x202,
    TempMin = 0x203,
    TempCrit = 0x204,
    TempCritHyst = 0x205,
    TempAlarm = 0x280,
    TempMaxAlarm = 0x281,
    TempMinAlarm = 0x282,
    TempCritAlarm = 0x283,
    TempFault = 0x284,
    TempType = 0x285,
    TempOffset = 0x286,

    PowerAverage = 0x300,
    PowerAverageHighest = 0x301,
    PowerAverageLowest = 0x302,
    PowerInput = 0x303,
    PowerInputHighest = 0x304,
    PowerInputLowest = 0x305,
    PowerAverageInterval = 0x380,

    EnergyInput = 0x400,

    CurrInput = 0x500,
    CurrMin = 0x501,
    CurrMax = 0x502,
    CurrAlarm = 0x580,
    CurrMinAlarm = 0x581,
    CurrMaxAlarm = 0x582,

    Vid = 0x1000,
    BeepEnable = 0x1800,
}

impl SubfeatureType {
    const ALARM_BIT: u16 = 0x80;
    const INDEX_MASK: u16 = 0x7F;

    /// Stable numeric code, `class << 8 | alarm_bit | index`
    pub fn code(self) -> u16 {
        self as u16
    }

    /// Class the subfeature belongs to
    pub fn feature_type(self) -> FeatureType {
        use SubfeatureType::*;
        match self {
            InInput | InMin | InMax | InAlarm | InMinAlarm | InMaxAlarm => FeatureType::In,
            FanInput | FanMin | FanAlarm | FanFault | FanDiv => FeatureType::Fan,
            TempInput | TempMax | TempMaxHyst | TempMin | TempCrit | TempCritHyst
            | TempAlarm | TempMaxAlarm | TempMinAlarm | TempCritAlarm | TempFault
            | TempType | TempOffset => FeatureType::Temp,
            PowerAverage | PowerAverageHighest | PowerAverageLowest | PowerInput
            | PowerInputHighest | PowerInputLowest | PowerAverageInterval => FeatureType::Power,
            EnergyInput => FeatureType::Energy,
            CurrInput | CurrMin | CurrMax | CurrAlarm | CurrMinAlarm | CurrMaxAlarm => {
                FeatureType::Curr
            }
            Vid => FeatureType::Vid,
            BeepEnable => FeatureType::BeepEnable,
        }
    }

    /// True for alarms, faults and other discrete (non-measured) attributes
    pub fn is_alarm(self) -> bool {
        self.code() & Self::ALARM_BIT != 0
    }

    /// Position within the alarm or non-alarm half of the class
    pub fn index(self) -> usize {
        usize::from(self.code() & Self::INDEX_MASK)
    }

    /// Divisor turning the raw sysfs integer into physical units
    pub fn scale(self) -> f64 {
        use SubfeatureType::*;
        if !self.is_alarm() {
            match self.feature_type() {
                FeatureType::In | FeatureType::Temp | FeatureType::Curr => return scale::MILLI,
                FeatureType::Fan => return scale::UNIT,
                FeatureType::Power | FeatureType::Energy => return scale::MICRO,
                FeatureType::Vid | FeatureType::BeepEnable => {}
            }
        }
        match self {
            PowerAverageInterval | Vid | TempOffset => scale::MILLI,
            _ => scale::UNIT,
        }
    }
}

bitflags::bitflags! {
    /// Access and conversion flags of a subfeature
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct SubfeatureFlags: u8 {
        /// Owner may read the attribute
        const READABLE = 0x01;
        /// Owner may write the attribute
        const WRITABLE = 0x02;
        /// Value takes part in linear compute mappings
        const COMPUTE_MAPPING = 0x04;
    }
}

/// A named group of related subfeatures, e.g. everything about `temp1`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feature {
    pub name: String,
    /// Dense index within the chip
    pub number: usize,
    pub feature_type: FeatureType,
    /// Index of this feature's first entry in the chip's subfeature table
    pub first_subfeature: usize,
}

/// One readable and/or writable attribute file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subfeature {
    /// Attribute file name
    pub name: String,
    /// Dense index within the chip
    pub number: usize,
    pub subfeature_type: SubfeatureType,
    /// Number of the owning feature
    pub mapping: usize,
    pub flags: SubfeatureFlags,
}

/// Dense feature and subfeature tables of one chip
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureTable {
    pub features: Vec<Feature>,
    pub subfeatures: Vec<Subfeature>,
}

/// A discovered chip together with its feature tables
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChipFeatures {
    pub chip: Chip,
    pub features: Vec<Feature>,
    pub subfeatures: Vec<Subfeature>,
}

impl ChipFeatures {
    pub fn new(chip: Chip, table: FeatureTable) -> Self {
        Self {
            chip,
            features: table.features,
            subfeatures: table.subfeatures,
        }
    }

    /// Features in number order
    pub fn features(&self) -> impl Iterator<Item = &Feature> {
        self.features.iter()
    }

    /// Feature by its exact name, e.g. `"temp1"`
    pub fn feature_by_name(&self, name: &str) -> Option<&Feature> {
        self.features.iter().find(|f| f.name == name)
    }

    /// The contiguous run of subfeatures owned by `feature`
    pub fn subfeatures_of(&self, feature: &Feature) -> &[Subfeature] {
        let start = feature.first_subfeature.min(self.subfeatures.len());
        let len = self.subfeatures[start..]
            .iter()
            .take_while(|sf| sf.mapping == feature.number)
            .count();
        &self.subfeatures[start..start + len]
    }

    /// Subfeature of the given type within `feature`
    pub fn subfeature(
        &self,
        feature: &Feature,
        subfeature_type: SubfeatureType,
    ) -> Option<&Subfeature> {
        self.subfeatures_of(feature)
            .iter()
            .find(|sf| sf.subfeature_type == subfeature_type)
    }
}
