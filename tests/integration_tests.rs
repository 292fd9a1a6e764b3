/*
 * Integration tests for hf-sensors
 *
 * These tests build a complete fake sysfs tree and drive discovery,
 * lookup and value I/O through the public API only.
 */

use hf_sensors::{
    discover_chips, read_value, sysfs_available, write_value, BusId, BusType, ChipCatalog,
    ChipFeatures, FeatureType, SensorsError, SubfeatureFlags, SubfeatureType, SysfsConfig,
};
use serial_test::serial;
use std::fs;
use std::os::unix::fs::symlink;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// Test utilities
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn write_attrs(dir: &Path, attrs: &[(&str, &str)]) {
    fs::create_dir_all(dir).unwrap();
    for (name, value) in attrs {
        fs::write(dir.join(name), format!("{}\n", value)).unwrap();
    }
}

/// Device directory under `devices/` linked to `bus/<subsystem>`
fn add_device(root: &Path, rel: &str, subsystem: &str) -> PathBuf {
    let dev = root.join("devices").join(rel);
    let bus = root.join("bus").join(subsystem);
    fs::create_dir_all(&dev).unwrap();
    fs::create_dir_all(&bus).unwrap();
    symlink(&bus, dev.join("subsystem")).unwrap();
    dev
}

fn add_hwmon(root: &Path, id: &str, device: Option<&Path>) -> PathBuf {
    let entry = root.join("class/hwmon").join(id);
    fs::create_dir_all(&entry).unwrap();
    if let Some(device) = device {
        symlink(device, entry.join("device")).unwrap();
    }
    entry
}

/// A desktop board: Super-I/O on the platform bus, CPU sensor on PCI,
/// an SMBus sensor, an ACPI thermal zone and a virtual chip
fn create_desktop_sysfs() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();

    let adapter = root.join("class/i2c-adapter/i2c-0");
    write_attrs(&adapter, &[("name", "SMBus I801 adapter at efa0")]);

    let superio = add_device(root, "platform/nct6775.656", "platform");
    write_attrs(
        &superio,
        &[
            ("name", "nct6798"),
            ("in0_input", "1032"),
            ("in0_min", "0"),
            ("in0_max", "1744"),
            ("in0_alarm", "0"),
            ("fan1_input", "1185"),
            ("fan1_min", "0"),
            ("fan1_alarm", "0"),
            ("temp1_input", "38000"),
            ("temp1_max", "80000"),
            ("temp1_max_hyst", "75000"),
            ("temp1_type", "4"),
            ("temp1_offset", "0"),
            ("temp1_label", "SYSTIN"),
            ("cpu0_vid", "1100"),
            ("beep_enable", "0"),
            ("pwm1", "128"),
        ],
    );
    add_hwmon(root, "hwmon3", Some(&superio));

    let k10 = add_device(root, "pci0000:00/0000:00:18.3", "pci");
    let k10_entry = add_hwmon(root, "hwmon1", Some(&k10));
    write_attrs(&k10_entry, &[("name", "k10temp"), ("temp1_input", "45250")]);

    let lm75 = add_device(root, "pci0000:00/0000:00:1f.4/i2c-0/0-0048", "i2c");
    write_attrs(
        &lm75,
        &[("name", "lm75"), ("temp1_input", "31500"), ("temp1_max", "80000")],
    );
    add_hwmon(root, "hwmon2", Some(&lm75));

    let acpi = add_device(root, "LNXSYSTM:00/LNXTHERM:00", "acpi");
    let acpi_entry = add_hwmon(root, "hwmon0", Some(&acpi));
    write_attrs(&acpi_entry, &[("name", "acpitz"), ("temp1_input", "27800")]);

    let battery = add_hwmon(root, "hwmon4", None);
    write_attrs(
        &battery,
        &[
            ("name", "BAT0"),
            ("in0_input", "12400"),
            ("curr1_input", "1500"),
            ("power1_average", "18600000"),
            ("energy1_input", "41000000"),
        ],
    );

    dir
}

fn find<'a>(chips: &'a [ChipFeatures], prefix: &str) -> &'a ChipFeatures {
    chips
        .iter()
        .find(|c| c.chip.prefix == prefix)
        .unwrap_or_else(|| panic!("chip {} not discovered", prefix))
}

#[test]
fn test_full_discovery() {
    init_tracing();
    let dir = create_desktop_sysfs();
    let config = SysfsConfig::new(dir.path());
    assert!(sysfs_available(&config));

    let chips = discover_chips(&config).unwrap();
    assert_eq!(chips.len(), 5);

    let superio = find(&chips, "nct6798");
    assert_eq!(superio.chip.bus, BusId::first(BusType::Isa));
    assert_eq!(superio.chip.addr, 656);

    let k10 = find(&chips, "k10temp");
    assert_eq!(k10.chip.bus, BusId::first(BusType::Pci));
    assert_eq!(k10.chip.addr, 0xc3);

    let lm75 = find(&chips, "lm75");
    assert_eq!(lm75.chip.bus, BusId::new(BusType::I2c, 0));
    assert_eq!(lm75.chip.addr, 0x48);

    let acpi = find(&chips, "acpitz");
    assert_eq!(acpi.chip.bus, BusId::first(BusType::Acpi));

    let battery = find(&chips, "BAT0");
    assert_eq!(battery.chip.bus, BusId::first(BusType::Virtual));
}

#[test]
fn test_feature_layout() {
    let dir = create_desktop_sysfs();
    let chips = discover_chips(&SysfsConfig::new(dir.path())).unwrap();
    let superio = find(&chips, "nct6798");

    let names: Vec<_> = superio.features().map(|f| f.name.as_str()).collect();
    assert_eq!(names, ["in0", "fan1", "temp1", "cpu0_vid", "beep_enable"]);

    let temp1 = superio.feature_by_name("temp1").unwrap();
    assert_eq!(temp1.feature_type, FeatureType::Temp);
    let temp_subs: Vec<_> = superio
        .subfeatures_of(temp1)
        .iter()
        .map(|s| s.subfeature_type)
        .collect();
    assert_eq!(
        temp_subs,
        [
            SubfeatureType::TempInput,
            SubfeatureType::TempMax,
            SubfeatureType::TempMaxHyst,
            SubfeatureType::TempType,
            SubfeatureType::TempOffset,
        ]
    );

    for feature in superio.features() {
        assert_eq!(superio.subfeatures[feature.first_subfeature].mapping, feature.number);
    }

    let vid = superio.feature_by_name("cpu0_vid").unwrap();
    let vid_sub = superio.subfeature(vid, SubfeatureType::Vid).unwrap();
    assert!(vid_sub.flags.contains(SubfeatureFlags::COMPUTE_MAPPING));
    let alarm = superio
        .subfeature(superio.feature_by_name("fan1").unwrap(), SubfeatureType::FanAlarm)
        .unwrap();
    assert!(!alarm.flags.contains(SubfeatureFlags::COMPUTE_MAPPING));
}

#[test]
fn test_read_values_in_physical_units() {
    let dir = create_desktop_sysfs();
    let chips = discover_chips(&SysfsConfig::new(dir.path())).unwrap();

    let superio = find(&chips, "nct6798");
    let read = |feature: &str, t: SubfeatureType| {
        let feature = superio.feature_by_name(feature).unwrap();
        read_value(&superio.chip, superio.subfeature(feature, t).unwrap()).unwrap()
    };
    assert!((read("in0", SubfeatureType::InInput) - 1.032).abs() < 1e-9);
    assert_eq!(read("fan1", SubfeatureType::FanInput), 1185.0);
    assert_eq!(read("temp1", SubfeatureType::TempInput), 38.0);
    assert_eq!(read("cpu0_vid", SubfeatureType::Vid), 1.1);

    let battery = find(&chips, "BAT0");
    let power = battery.feature_by_name("power1").unwrap();
    let average = battery.subfeature(power, SubfeatureType::PowerAverage).unwrap();
    assert!((read_value(&battery.chip, average).unwrap() - 18.6).abs() < 1e-9);
    let energy = battery.feature_by_name("energy1").unwrap();
    let input = battery.subfeature(energy, SubfeatureType::EnergyInput).unwrap();
    assert_eq!(read_value(&battery.chip, input).unwrap(), 41.0);
}

#[test]
fn test_write_then_read_round_trip() {
    let dir = create_desktop_sysfs();
    let chips = discover_chips(&SysfsConfig::new(dir.path())).unwrap();
    let lm75 = find(&chips, "lm75");
    let temp1 = lm75.feature_by_name("temp1").unwrap();
    let max = lm75.subfeature(temp1, SubfeatureType::TempMax).unwrap();

    for value in [72.5, 0.0, -12.25, 100.0009] {
        write_value(&lm75.chip, max, value).unwrap();
        let back = read_value(&lm75.chip, max).unwrap();
        assert!((back - value).abs() < 1.0 / SubfeatureType::TempMax.scale(), "{}", value);
    }

    assert_eq!(
        fs::read_to_string(lm75.chip.path.join("temp1_max")).unwrap(),
        "100000"
    );
}

#[test]
fn test_round_trip_at_unit_and_micro_scale() {
    let dir = create_desktop_sysfs();
    let chips = discover_chips(&SysfsConfig::new(dir.path())).unwrap();

    // Scale 1: the whole fraction is truncated away
    let superio = find(&chips, "nct6798");
    let fan1 = superio.feature_by_name("fan1").unwrap();
    let fan_min = superio.subfeature(fan1, SubfeatureType::FanMin).unwrap();
    for value in [899.9, 0.75, 1500.0] {
        write_value(&superio.chip, fan_min, value).unwrap();
        let back = read_value(&superio.chip, fan_min).unwrap();
        assert!((back - value).abs() < 1.0, "{} read back as {}", value, back);
        assert_eq!(back, value.trunc());
    }

    // Scale 1 000 000: microwatts
    let battery = find(&chips, "BAT0");
    let power1 = battery.feature_by_name("power1").unwrap();
    let average = battery.subfeature(power1, SubfeatureType::PowerAverage).unwrap();
    for value in [18.625, 0.0000015, 250.25] {
        write_value(&battery.chip, average, value).unwrap();
        let back = read_value(&battery.chip, average).unwrap();
        assert!(
            (back - value).abs() < 1.0 / SubfeatureType::PowerAverage.scale(),
            "{} read back as {}",
            value,
            back
        );
    }
    assert_eq!(
        fs::read_to_string(battery.chip.path.join("power1_average")).unwrap(),
        "250250000"
    );
}

#[test]
fn test_write_to_missing_attribute() {
    let dir = create_desktop_sysfs();
    let chips = discover_chips(&SysfsConfig::new(dir.path())).unwrap();
    let acpi = find(&chips, "acpitz");
    let temp1 = acpi.feature_by_name("temp1").unwrap();
    let mut input = acpi.subfeature(temp1, SubfeatureType::TempInput).unwrap().clone();
    input.name = "temp9_input".to_string();

    let err = write_value(&acpi.chip, &input, 50.0).unwrap_err();
    assert!(matches!(err, SensorsError::Kernel { .. }));
    assert!(!acpi.chip.path.join("temp9_input").exists());
}

#[test]
fn test_catalog_collects_buses_and_chips() {
    let dir = create_desktop_sysfs();
    let catalog = ChipCatalog::scan(&SysfsConfig::new(dir.path())).unwrap();

    assert_eq!(catalog.chips.len(), 5);
    assert_eq!(catalog.buses.len(), 1);
    let lm75 = catalog.chips_named("lm75").next().unwrap();
    assert_eq!(
        catalog.adapter_name(lm75.chip.bus),
        Some("SMBus I801 adapter at efa0")
    );

    let json = serde_json::to_string(&catalog).unwrap();
    let back: ChipCatalog = serde_json::from_str(&json).unwrap();
    assert_eq!(back, catalog);
}

#[test]
fn test_discovery_is_repeatable() {
    let dir = create_desktop_sysfs();
    let config = SysfsConfig::new(dir.path());

    let mut first = discover_chips(&config).unwrap();
    let mut second = discover_chips(&config).unwrap();
    first.sort_by(|a, b| a.chip.path.cmp(&b.chip.path));
    second.sort_by(|a, b| a.chip.path.cmp(&b.chip.path));
    assert_eq!(first, second);
}

#[test]
#[serial]
fn test_config_from_environment() {
    let dir = create_desktop_sysfs();
    std::env::set_var("HF_SENSORS_SYSFS_ROOT", dir.path());
    std::env::set_var("HF_SENSORS_STRICT", "yes");

    let config = SysfsConfig::from_env();
    std::env::remove_var("HF_SENSORS_SYSFS_ROOT");
    std::env::remove_var("HF_SENSORS_STRICT");

    assert_eq!(config.root, dir.path());
    assert!(config.strict);
    assert_eq!(discover_chips(&config).unwrap().len(), 5);
}

#[test]
fn test_config_file() {
    let dir = create_desktop_sysfs();
    let config_path = dir.path().join("sensors.json");
    fs::write(
        &config_path,
        format!(r#"{{ "root": {:?}, "strict": false }}"#, dir.path().to_str().unwrap()),
    )
    .unwrap();

    let config = SysfsConfig::load(&config_path).unwrap();
    assert_eq!(discover_chips(&config).unwrap().len(), 5);
}

#[test]
fn test_missing_sysfs() {
    let dir = TempDir::new().unwrap();
    let config = SysfsConfig::new(dir.path().join("sys"));

    assert!(!sysfs_available(&config));
    assert!(discover_chips(&config).unwrap().is_empty());
}
