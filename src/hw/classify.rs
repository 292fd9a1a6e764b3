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

//! Attribute name classification
//!
//! Maps a file name such as `temp1_crit_alarm` to its subfeature type and
//! 0-based channel. Files that are not sensor values (`name`, `uevent`,
//! `temp1_label`, ...) classify to `None` and are ignored by callers.

use super::scan::scan_dec;
use crate::data::SubfeatureType::{self, *};

type SuffixTable = &'static [(&'static str, SubfeatureType)];

const TEMP_MATCHES: SuffixTable = &[
    ("input", TempInput),
    ("max", TempMax),
    ("max_hyst", TempMaxHyst),
    ("min", TempMin),
    ("crit", TempCrit),
    ("crit_hyst", TempCritHyst),
    ("alarm", TempAlarm),
    ("min_alarm", TempMinAlarm),
    ("max_alarm", TempMaxAlarm),
    ("crit_alarm", TempCritAlarm),
    ("fault", TempFault),
    ("type", TempType),
    ("offset", TempOffset),
];

const IN_MATCHES: SuffixTable = &[
    ("input", InInput),
    ("min", InMin),
    ("max", InMax),
    ("alarm", InAlarm),
    ("min_alarm", InMinAlarm),
    ("max_alarm", InMaxAlarm),
];

const FAN_MATCHES: SuffixTable = &[
    ("input", FanInput),
    ("min", FanMin),
    ("div", FanDiv),
    ("alarm", FanAlarm),
    ("fault", FanFault),
];

const POWER_MATCHES: SuffixTable = &[
    ("average", PowerAverage),
    ("average_highest", PowerAverageHighest),
    ("average_lowest", PowerAverageLowest),
    ("input", PowerInput),
    ("input_highest", PowerInputHighest),
    ("input_lowest", PowerInputLowest),
    ("average_interval", PowerAverageInterval),
];

const ENERGY_MATCHES: SuffixTable = &[("input", EnergyInput)];

const CURR_MATCHES: SuffixTable = &[
    ("input", CurrInput),
    ("min", CurrMin),
    ("max", CurrMax),
    ("alarm", CurrAlarm),
    ("min_alarm", CurrMinAlarm),
    ("max_alarm", CurrMaxAlarm),
];

const CPU_MATCHES: SuffixTable = &[("vid", Vid)];

/// Class keywords in match order. The first keyword followed by a number
/// claims the name; later keywords are not tried even if the suffix then
/// fails to match.
const CLASS_MATCHES: [(&str, SuffixTable); 7] = [
    ("temp", TEMP_MATCHES),
    ("in", IN_MATCHES),
    ("fan", FAN_MATCHES),
    ("cpu", CPU_MATCHES),
    ("power", POWER_MATCHES),
    ("curr", CURR_MATCHES),
    ("energy", ENERGY_MATCHES),
];

const BEEP_ENABLE: &str = "beep_enable";

/// A recognised attribute file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classified {
    pub subfeature_type: SubfeatureType,
    /// 0-based channel; may be out of range and must be checked by the caller
    pub channel: i32,
}

/// Classify an attribute file name
pub fn classify(name: &str) -> Option<Classified> {
    if name == BEEP_ENABLE {
        return Some(Classified {
            subfeature_type: BeepEnable,
            channel: 0,
        });
    }

    let (number, rest, suffixes) = CLASS_MATCHES.iter().find_map(|&(keyword, suffixes)| {
        let (number, rest) = scan_dec(name.strip_prefix(keyword)?)?;
        Some((number, rest, suffixes))
    })?;

    let suffix = rest.strip_prefix('_')?;
    let subfeature_type = suffixes
        .iter()
        .find(|&&(s, _)| s == suffix)
        .map(|&(_, t)| t)?;

    let mut channel = i32::try_from(number).ok()?;
    if subfeature_type.feature_type().is_one_based() {
        channel -= 1;
    }

    Some(Classified {
        subfeature_type,
        channel,
    })
}
