/*
 * Test utilities for hf-sensors
 *
 * This module builds throwaway sysfs trees so discovery can be tested
 * against real directories, symlinks and attribute files.
 */

#[cfg(test)]
pub mod test_utils {
    use crate::config::SysfsConfig;
    use std::fs;
    use std::os::unix::fs::symlink;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    /// A sysfs root in a temporary directory
    pub struct FakeSysfs {
        dir: TempDir,
    }

    impl Default for FakeSysfs {
        fn default() -> Self {
            Self::new()
        }
    }

    impl FakeSysfs {
        pub fn new() -> Self {
            Self {
                dir: TempDir::new().expect("create temp sysfs root"),
            }
        }

        pub fn root(&self) -> &Path {
            self.dir.path()
        }

        pub fn config(&self) -> SysfsConfig {
            SysfsConfig::new(self.root())
        }

        /// Creates `devices/<rel>` linked to `bus/<subsystem>`
        pub fn device(&self, rel: &str, subsystem: Option<&str>) -> PathBuf {
            let dev = self.root().join("devices").join(rel);
            fs::create_dir_all(&dev).unwrap();
            if let Some(subsystem) = subsystem {
                let bus = self.root().join("bus").join(subsystem);
                fs::create_dir_all(&bus).unwrap();
                symlink(&bus, dev.join("subsystem")).unwrap();
            }
            dev
        }

        /// Creates `class/hwmon/<id>`, optionally with a `device` link
        pub fn hwmon(&self, id: &str, device: Option<&Path>) -> PathBuf {
            let entry = self.root().join("class/hwmon").join(id);
            fs::create_dir_all(&entry).unwrap();
            if let Some(device) = device {
                symlink(device, entry.join("device")).unwrap();
            }
            entry
        }

        /// Creates `class/i2c-adapter/i2c-<nr>` with its adapter name
        pub fn i2c_adapter(&self, nr: u16, name: &str) -> PathBuf {
            let entry = self.root().join(format!("class/i2c-adapter/i2c-{}", nr));
            write_attrs(&entry, &[("name", name)]);
            entry
        }
    }

    /// Writes `name` files holding `value` plus a newline, creating `dir`
    pub fn write_attrs(dir: &Path, attrs: &[(&str, &str)]) {
        fs::create_dir_all(dir).unwrap();
        for (name, value) in attrs {
            fs::write(dir.join(name), format!("{}\n", value)).unwrap();
        }
    }
}
