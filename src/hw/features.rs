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

//! Feature table construction
//!
//! Attribute files of a chip directory are first dropped into a sparse table
//! whose slot order is the canonical feature order, then compacted into
//! dense feature and subfeature vectors. Because placement depends only on
//! the file name, the result does not depend on directory listing order.
//!
//! Slot layout (see [`slot_index`]):
//!
//! ```text
//! [class 0: in    ] 20 channels x (8 value + 8 alarm) slots
//! [class 1: fan   ] ...
//!   ...
//! [class 5: curr  ]
//! [vid 0..19      ] one slot per channel, each its own feature
//! [beep_enable    ] single slot
//! ```

use std::fs;
use std::io;
use std::path::Path;

use tracing::{debug, trace};

use super::attr::attr_mode;
use super::classify::{classify, Classified};
use super::enumerate::for_each_entry;
use crate::constants::limits::{
    ALL_POSSIBLE_SUBFEATURES, BEEP_ENABLE_SLOT, CHANNEL_SLOTS, MAX_SENSORS_PER_TYPE,
    MAX_SUBFEATURES, TRAILING_REGION,
};
use crate::data::{Feature, FeatureTable, Subfeature, SubfeatureFlags, SubfeatureType};
use crate::error::{Result, SensorsError};

#[derive(Debug)]
struct Slot {
    name: String,
    subfeature_type: SubfeatureType,
    flags: SubfeatureFlags,
}

/// Position of a subfeature in the sparse table.
///
/// `channel` must already be within `0..MAX_SENSORS_PER_TYPE`.
pub(crate) fn slot_index(subfeature_type: SubfeatureType, channel: usize) -> usize {
    match subfeature_type {
        SubfeatureType::Vid => TRAILING_REGION + channel,
        SubfeatureType::BeepEnable => BEEP_ENABLE_SLOT,
        _ => {
            let class = subfeature_type.feature_type() as usize;
            let half = usize::from(subfeature_type.is_alarm());
            class * MAX_SENSORS_PER_TYPE * CHANNEL_SLOTS
                + channel * CHANNEL_SLOTS
                + half * MAX_SUBFEATURES
                + subfeature_type.index()
        }
    }
}

/// Whether the slot at `index` opens a new feature after `prev_group`
fn starts_feature(index: usize, prev_group: Option<usize>) -> bool {
    index >= TRAILING_REGION || prev_group != Some(index / CHANNEL_SLOTS)
}

/// Feature name derived from its first subfeature's file name
fn feature_name(slot: &Slot) -> String {
    if slot.subfeature_type.feature_type().is_grouped() {
        match slot.name.split_once('_') {
            Some((prefix, _)) => prefix.to_string(),
            None => slot.name.clone(),
        }
    } else {
        slot.name.clone()
    }
}

/// Build the feature tables of the chip whose attributes live in `dir`.
///
/// Returns `Ok(None)` when the directory holds no recognised attribute.
/// In strict mode duplicate subfeatures and out-of-range channels are errors;
/// otherwise they are logged and skipped.
pub fn read_dynamic_chip(dir: &Path, strict: bool) -> Result<Option<FeatureTable>> {
    let mut entries = Vec::new();
    for_each_entry(dir, |path, name| {
        // Only regular files; symlinks such as `device` or `subsystem` are not followed
        match fs::symlink_metadata(path) {
            Ok(meta) if meta.file_type().is_file() => {}
            Ok(_) => return Ok(()),
            Err(e) => {
                trace!(path = ?path, error = %e, "Skipping unreadable entry");
                return Ok(());
            }
        }
        if classify(name).is_some() {
            entries.push((name.to_string(), attr_mode(dir, name)));
        }
        Ok(())
    })
    .map_err(|e| match e {
        // The chip directory vanishing is not a reason to fall back to another layout
        SensorsError::NotFound(path) => {
            SensorsError::kernel(path, io::Error::from(io::ErrorKind::NotFound))
        }
        e => e,
    })?;

    build_feature_table(dir, entries, strict)
}

/// Build feature tables from attribute names and their access flags.
///
/// Entries that do not classify are ignored. The result is the same for any
/// ordering of `entries`; `dir` only names the chip in errors and logs.
pub(crate) fn build_feature_table<I>(
    dir: &Path,
    entries: I,
    strict: bool,
) -> Result<Option<FeatureTable>>
where
    I: IntoIterator<Item = (String, SubfeatureFlags)>,
{
    let mut sparse: Vec<Option<Slot>> = Vec::new();
    sparse.resize_with(ALL_POSSIBLE_SUBFEATURES, || None);
    let mut occupied = 0usize;

    for (name, access) in entries {
        let Some(Classified {
            subfeature_type,
            channel,
        }) = classify(&name)
        else {
            continue;
        };

        let channel = match usize::try_from(channel) {
            Ok(channel) if channel < MAX_SENSORS_PER_TYPE => channel,
            _ => {
                if strict {
                    return Err(SensorsError::ChannelOutOfRange {
                        name,
                        channel,
                        max: MAX_SENSORS_PER_TYPE,
                    });
                }
                debug!(attr = %name, channel, "Channel out of range, ignoring");
                continue;
            }
        };

        let flags = slot_flags(access, subfeature_type);
        let index = slot_index(subfeature_type, channel);
        if let Some(existing) = &mut sparse[index] {
            if strict {
                return Err(SensorsError::DuplicateSubfeature {
                    name,
                    path: dir.to_path_buf(),
                });
            }
            debug!(attr = %name, existing = %existing.name, "Duplicate subfeature, ignoring");
            // Keep the lowest name so the survivor does not depend on listing order
            if name < existing.name {
                existing.name = name;
                existing.flags = flags;
            }
            continue;
        }

        sparse[index] = Some(Slot {
            name,
            subfeature_type,
            flags,
        });
        occupied += 1;
    }

    if occupied == 0 {
        trace!(dir = ?dir, "No subfeatures");
        return Ok(None);
    }

    let mut feature_count = 0;
    let mut prev_group = None;
    for (index, _) in sparse.iter().enumerate().filter(|(_, s)| s.is_some()) {
        if starts_feature(index, prev_group) {
            feature_count += 1;
            prev_group = Some(index / CHANNEL_SLOTS);
        }
    }

    let mut features: Vec<Feature> = Vec::with_capacity(feature_count);
    let mut subfeatures = Vec::with_capacity(occupied);
    let mut prev_group = None;
    for (index, slot) in sparse.into_iter().enumerate() {
        let Some(slot) = slot else { continue };

        if starts_feature(index, prev_group) {
            prev_group = Some(index / CHANNEL_SLOTS);
            features.push(Feature {
                name: feature_name(&slot),
                number: features.len(),
                feature_type: slot.subfeature_type.feature_type(),
                first_subfeature: subfeatures.len(),
            });
        }

        subfeatures.push(Subfeature {
            name: slot.name,
            number: subfeatures.len(),
            subfeature_type: slot.subfeature_type,
            mapping: features.len() - 1,
            flags: slot.flags,
        });
    }

    trace!(
        dir = ?dir,
        features = features.len(),
        subfeatures = subfeatures.len(),
        "Built feature table"
    );
    Ok(Some(FeatureTable {
        features,
        subfeatures,
    }))
}

fn slot_flags(access: SubfeatureFlags, subfeature_type: SubfeatureType) -> SubfeatureFlags {
    let mut flags = access & (SubfeatureFlags::READABLE | SubfeatureFlags::WRITABLE);
    if !subfeature_type.is_alarm() {
        flags |= SubfeatureFlags::COMPUTE_MAPPING;
    }
    flags
}
