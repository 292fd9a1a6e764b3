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

//! Directory enumeration with short-circuiting visitors

use std::fs;
use std::io;
use std::path::Path;

use tracing::trace;

use crate::config::SysfsConfig;
use crate::error::{Result, SensorsError};

/// Call `visit(entry_path, entry_name)` for every non-hidden entry of `dir`.
///
/// Stops at the first visitor error and returns it. A missing `dir` yields
/// [`SensorsError::NotFound`] so callers can fall back to another layout; any
/// other failure to list the directory is a kernel interface error.
pub fn for_each_entry<F>(dir: &Path, mut visit: F) -> Result<()>
where
    F: FnMut(&Path, &str) -> Result<()>,
{
    let entries = fs::read_dir(dir).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => SensorsError::NotFound(dir.to_path_buf()),
        _ => SensorsError::kernel(dir, e),
    })?;

    for entry in entries {
        let entry = entry.map_err(|e| SensorsError::kernel(dir, e))?;
        let file_name = entry.file_name();
        let Some(name) = file_name.to_str() else {
            trace!(entry = ?file_name, "Skipping non-UTF-8 entry");
            continue;
        };
        if name.starts_with('.') {
            continue;
        }
        visit(&entry.path(), name)?;
    }
    Ok(())
}

/// Visit every device of `<root>/class/<class_name>`
pub fn for_each_classdev<F>(config: &SysfsConfig, class_name: &str, visit: F) -> Result<()>
where
    F: FnMut(&Path, &str) -> Result<()>,
{
    for_each_entry(&config.class_dir(class_name), visit)
}

/// Visit every device of `<root>/bus/<bus_type>/devices`
pub fn for_each_busdev<F>(config: &SysfsConfig, bus_type: &str, visit: F) -> Result<()>
where
    F: FnMut(&Path, &str) -> Result<()>,
{
    for_each_entry(&config.bus_devices_dir(bus_type), visit)
}
