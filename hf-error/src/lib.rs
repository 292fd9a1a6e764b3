//! Unified error handling for hf-sensors
//!
//! One error type covers sysfs discovery, attribute access and configuration.
//! The variants follow the kernel-interface taxonomy callers rely on:
//!
//! - [`SensorsError::NotFound`] is benign. Discovery treats it as "skip this
//!   chip" or "try the fallback layout", never as a failure of the whole scan.
//! - [`SensorsError::Kernel`] means sysfs did not look the way the hwmon ABI
//!   promises (enumeration, symlink or open failures).
//! - [`SensorsError::Io`] is a device-level failure (`EIO`) on a value file.
//! - [`SensorsError::AccessRead`] / [`SensorsError::AccessWrite`] cover
//!   permission problems and non-numeric content.

use std::io;
use std::path::PathBuf;

/// Result type alias using SensorsError
pub type Result<T> = std::result::Result<T, SensorsError>;

/// Unified error type for all hf-sensors operations
#[derive(thiserror::Error, Debug)]
pub enum SensorsError {
    // ============================================================================
    // Discovery Errors
    // ============================================================================
    #[error("Not found: {0}")]
    NotFound(PathBuf),

    #[error("Kernel interface error at {path}: {source}")]
    Kernel {
        path: PathBuf,
        source: io::Error,
    },

    #[error("Channel {channel} of {name} is outside 0..{max}")]
    ChannelOutOfRange {
        name: String,
        channel: i32,
        max: usize,
    },

    #[error("Duplicate subfeature {name} in {path}")]
    DuplicateSubfeature {
        name: String,
        path: PathBuf,
    },

    // ============================================================================
    // Attribute Access Errors
    // ============================================================================
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: io::Error,
    },

    #[error("Can't read {path}: {reason}")]
    AccessRead {
        path: PathBuf,
        reason: String,
    },

    #[error("Can't write {path}: {reason}")]
    AccessWrite {
        path: PathBuf,
        reason: String,
    },

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: io::Error,
    },
}

impl SensorsError {
    /// Create a kernel interface error for a path
    pub fn kernel(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Kernel {
            path: path.into(),
            source,
        }
    }

    /// Create a read access error
    pub fn access_read(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::AccessRead {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a write access error
    pub fn access_write(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::AccessWrite {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a config error from a string
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// True when a scanned directory is absent and discovery should fall
    /// back to another layout. Kernel errors are never benign, even when
    /// caused by a vanished file.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
