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

//! Attribute file access
//!
//! Every hwmon value file holds a single decimal integer in fixed units
//! (millivolts, millidegrees Celsius, RPM, microwatts, ...). Reads divide by
//! the subfeature type's scale and writes multiply by it, so callers only see
//! physical units.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, Read, Write};
use std::os::unix::fs::PermissionsExt;
use std::path::Path;

use tracing::trace;

use crate::constants::limits;
use crate::data::{Chip, Subfeature, SubfeatureFlags};
use crate::error::{Result, SensorsError};

/// Read the first line of `<dir>/<attr>`, without its trailing newline.
///
/// Missing, unreadable and empty attributes all yield `None`.
pub fn read_attr(dir: &Path, attr: &str) -> Option<String> {
    let path = dir.join(attr);
    let file = match File::open(&path) {
        Ok(file) => file,
        Err(e) => {
            trace!(path = ?path, error = %e, "Attribute not readable");
            return None;
        }
    };

    let mut line = String::new();
    let mut reader = BufReader::new(file.take(limits::ATTR_MAX as u64 - 1));
    match reader.read_line(&mut line) {
        Ok(0) => None,
        Ok(_) => {
            if line.ends_with('\n') {
                line.pop();
            }
            Some(line)
        }
        Err(e) => {
            trace!(path = ?path, error = %e, "Failed to read attribute");
            None
        }
    }
}

/// Owner read/write permission of `<dir>/<attr>` as subfeature flags
pub fn attr_mode(dir: &Path, attr: &str) -> SubfeatureFlags {
    let mut flags = SubfeatureFlags::empty();
    if let Ok(meta) = fs::metadata(dir.join(attr)) {
        let mode = meta.permissions().mode();
        if mode & libc::S_IRUSR as u32 != 0 {
            flags |= SubfeatureFlags::READABLE;
        }
        if mode & libc::S_IWUSR as u32 != 0 {
            flags |= SubfeatureFlags::WRITABLE;
        }
    }
    flags
}

/// Direction of a value file access, selecting the access error variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Access {
    Read,
    Write,
}

fn access_error(access: Access, path: &Path, reason: String) -> SensorsError {
    match access {
        Access::Read => SensorsError::access_read(path, reason),
        Access::Write => SensorsError::access_write(path, reason),
    }
}

/// Permission problems are per-attribute; any other open failure means the
/// kernel interface itself is missing or broken
fn open_error(access: Access, path: &Path, e: io::Error) -> SensorsError {
    match e.kind() {
        io::ErrorKind::PermissionDenied => access_error(access, path, e.to_string()),
        _ => SensorsError::kernel(path, e),
    }
}

/// EIO means the device failed to answer; anything else is an access error
fn transfer_error(access: Access, path: &Path, e: io::Error) -> SensorsError {
    if e.raw_os_error() == Some(libc::EIO) {
        SensorsError::Io {
            path: path.to_path_buf(),
            source: e,
        }
    } else {
        access_error(access, path, e.to_string())
    }
}

/// Read a subfeature and convert it to physical units
pub fn read_value(chip: &Chip, subfeature: &Subfeature) -> Result<f64> {
    let path = chip.path.join(&subfeature.name);
    let mut file = File::open(&path).map_err(|e| open_error(Access::Read, &path, e))?;

    let mut content = String::new();
    file.read_to_string(&mut content)
        .map_err(|e| transfer_error(Access::Read, &path, e))?;

    let raw = parse_number(&content).ok_or_else(|| {
        SensorsError::access_read(&path, format!("not a number: {:?}", content.trim()))
    })?;

    let value = raw / subfeature.subfeature_type.scale();
    trace!(path = ?path, raw, value, "Read subfeature");
    Ok(value)
}

/// Convert a physical value to the subfeature's raw unit and write it.
///
/// The scaled value is truncated toward zero.
pub fn write_value(chip: &Chip, subfeature: &Subfeature, value: f64) -> Result<()> {
    let path = chip.path.join(&subfeature.name);
    let mut file = OpenOptions::new()
        .write(true)
        .truncate(true)
        .open(&path)
        .map_err(|e| open_error(Access::Write, &path, e))?;

    let raw = (value * subfeature.subfeature_type.scale()) as i64;
    file.write_all(raw.to_string().as_bytes())
        .and_then(|()| file.flush())
        .map_err(|e| transfer_error(Access::Write, &path, e))?;

    trace!(path = ?path, value, raw, "Wrote subfeature");
    Ok(())
}

/// First whitespace-delimited token of `content` as a number
fn parse_number(content: &str) -> Option<f64> {
    content
        .split_whitespace()
        .next()?
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}
