//! GPIO lines through the Linux sysfs interface
//!
//! A line is exported by writing its number to `<root>/export`, which makes
//! `<root>/gpio<N>/direction` and `<root>/gpio<N>/value` appear. Lines this
//! process exported are unexported again on drop.
//!
//! Callers name lines by their offset on the SoC GPIO controller (the BCM
//! number). Sysfs numbers are global: each controller owns a range starting
//! at `<root>/gpiochip<B>/base`, which is 512 on recent Raspberry Pi kernels.

use super::{DigitalInput, DigitalOutput, Level};
use crate::error::{GameError, Result};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

/// Default sysfs GPIO directory
pub const SYSFS_GPIO_ROOT: &str = "/sys/class/gpio";

/// Labels of the controllers driving the Raspberry Pi header, most specific
/// first: a Pi 5 lists both RP1 (the header) and the BCM2712's own pins
const SOC_CHIP_LABELS: &[&str] = &[
    "pinctrl-rp1",
    "pinctrl-bcm2711",
    "pinctrl-bcm2835",
    "pinctrl-bcm2712",
];

/// udev may need a moment to fix permissions on a freshly exported line
const EXPORT_RETRIES: u32 = 20;
const EXPORT_RETRY_DELAY: Duration = Duration::from_millis(10);

/// Global sysfs number of SoC line `offset`
///
/// Falls back to base 0 when no SoC controller is listed under `root`, which
/// is how older kernels number the lines.
pub fn sysfs_number(root: &Path, offset: u32) -> u32 {
    soc_chip_base(root).unwrap_or(0) + offset
}

fn soc_chip_base(root: &Path) -> Option<u32> {
    let mut chips = Vec::new();
    for entry in fs::read_dir(root).ok()?.flatten() {
        if !entry.file_name().to_string_lossy().starts_with("gpiochip") {
            continue;
        }
        let chip_dir = entry.path();
        let label = fs::read_to_string(chip_dir.join("label")).ok();
        let base = fs::read_to_string(chip_dir.join("base"))
            .ok()
            .and_then(|b| b.trim().parse::<u32>().ok());
        if let (Some(label), Some(base)) = (label, base) {
            chips.push((label.trim().to_string(), base));
        }
    }

    SOC_CHIP_LABELS.iter().find_map(|wanted| {
        let (label, base) = chips.iter().find(|(label, _)| label.as_str() == *wanted)?;
        log::debug!("GPIO controller {} at base {}", label, base);
        Some(*base)
    })
}

/// One exported GPIO line
#[derive(Debug)]
pub struct SysfsGpio {
    /// SoC offset, as configured
    line: u32,
    /// Global sysfs number
    number: u32,
    root: PathBuf,
    value_path: PathBuf,
    exported_here: bool,
}

impl SysfsGpio {
    /// Open SoC line `line` as an output, driven low
    pub fn output(line: u32) -> Result<Self> {
        Self::output_at(SYSFS_GPIO_ROOT, line)
    }

    /// Open SoC line `line` as an input
    pub fn input(line: u32) -> Result<Self> {
        Self::input_at(SYSFS_GPIO_ROOT, line)
    }

    pub fn output_at(root: impl AsRef<Path>, line: u32) -> Result<Self> {
        // "low" sets the direction and the initial level in one write
        Self::open(root.as_ref(), line, "low")
    }

    pub fn input_at(root: impl AsRef<Path>, line: u32) -> Result<Self> {
        Self::open(root.as_ref(), line, "in")
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    /// Number the line is exported under
    pub fn sysfs_number(&self) -> u32 {
        self.number
    }

    fn open(root: &Path, line: u32, direction: &str) -> Result<Self> {
        let gpio_err = |source: io::Error| GameError::Gpio { line, source };
        let number = sysfs_number(root, line);
        let line_dir = root.join(format!("gpio{}", number));
        let direction_path = line_dir.join("direction");

        let exported_here = if line_dir.exists() {
            false
        } else {
            fs::write(root.join("export"), number.to_string()).map_err(gpio_err)?;
            true
        };

        let mut attempt = 0;
        loop {
            match fs::write(&direction_path, direction) {
                Ok(()) => break,
                Err(e) if attempt < EXPORT_RETRIES => {
                    log::debug!("GPIO {} not ready ({}), retrying", line, e);
                    attempt += 1;
                    thread::sleep(EXPORT_RETRY_DELAY);
                }
                Err(e) => return Err(gpio_err(e)),
            }
        }

        log::debug!("GPIO {} (sysfs {}) opened ({})", line, number, direction);
        Ok(Self {
            line,
            number,
            root: root.to_path_buf(),
            value_path: line_dir.join("value"),
            exported_here,
        })
    }

    fn write_value(&self, value: &str) -> Result<()> {
        fs::write(&self.value_path, value).map_err(|source| GameError::Gpio {
            line: self.line,
            source,
        })
    }
}

impl DigitalOutput for SysfsGpio {
    fn set_high(&mut self) -> Result<()> {
        self.write_value("1")
    }

    fn set_low(&mut self) -> Result<()> {
        self.write_value("0")
    }
}

impl DigitalInput for SysfsGpio {
    fn read(&mut self) -> Result<Level> {
        let raw = fs::read_to_string(&self.value_path).map_err(|source| GameError::Gpio {
            line: self.line,
            source,
        })?;
        Ok(if raw.trim() == "0" { Level::Low } else { Level::High })
    }
}

impl Drop for SysfsGpio {
    fn drop(&mut self) {
        if self.exported_here {
            let _ = fs::write(self.root.join("unexport"), self.number.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn fake_root(line: u32) -> TempDir {
        let root = tempfile::tempdir().unwrap();
        let line_dir = root.path().join(format!("gpio{}", line));
        fs::create_dir(&line_dir).unwrap();
        fs::write(line_dir.join("direction"), "in").unwrap();
        fs::write(line_dir.join("value"), "1").unwrap();
        root
    }

    fn add_chip(root: &TempDir, base: u32, label: &str) {
        let chip_dir = root.path().join(format!("gpiochip{}", base));
        fs::create_dir(&chip_dir).unwrap();
        fs::write(chip_dir.join("base"), format!("{}\n", base)).unwrap();
        fs::write(chip_dir.join("label"), format!("{}\n", label)).unwrap();
    }

    fn read_file(root: &TempDir, line: u32, name: &str) -> String {
        fs::read_to_string(root.path().join(format!("gpio{}", line)).join(name)).unwrap()
    }

    #[test]
    fn output_sets_direction_and_level() {
        let root = fake_root(21);
        let mut led = SysfsGpio::output_at(root.path(), 21).unwrap();
        assert_eq!(read_file(&root, 21, "direction"), "low");

        led.set_high().unwrap();
        assert_eq!(read_file(&root, 21, "value"), "1");
        led.set_low().unwrap();
        assert_eq!(read_file(&root, 21, "value"), "0");
    }

    #[test]
    fn input_reads_levels() {
        let root = fake_root(25);
        let mut button = SysfsGpio::input_at(root.path(), 25).unwrap();
        assert_eq!(read_file(&root, 25, "direction"), "in");
        assert_eq!(button.read().unwrap(), Level::High);

        fs::write(root.path().join("gpio25").join("value"), "0\n").unwrap();
        assert_eq!(button.read().unwrap(), Level::Low);
    }

    #[test]
    fn already_exported_line_is_left_exported() {
        let root = fake_root(25);
        drop(SysfsGpio::input_at(root.path(), 25).unwrap());
        assert!(!root.path().join("unexport").exists());
        assert!(!root.path().join("export").exists());
    }

    #[test]
    fn missing_line_reports_gpio_error() {
        let root = tempfile::tempdir().unwrap();
        fs::write(root.path().join("export"), "").unwrap();
        let err = SysfsGpio::input_at(root.path(), 7).unwrap_err();
        assert!(matches!(err, GameError::Gpio { line: 7, .. }));
    }

    #[test]
    fn numbers_are_offset_by_the_soc_chip_base() {
        let root = tempfile::tempdir().unwrap();
        add_chip(&root, 512, "pinctrl-bcm2711");
        add_chip(&root, 570, "raspberrypi-exp-gpio");
        assert_eq!(sysfs_number(root.path(), 25), 537);
        assert_eq!(sysfs_number(root.path(), 21), 533);
    }

    #[test]
    fn without_a_soc_chip_numbers_are_unchanged() {
        let root = tempfile::tempdir().unwrap();
        add_chip(&root, 0, "some-expander");
        assert_eq!(sysfs_number(root.path(), 25), 25);
    }

    #[test]
    fn header_chip_wins_on_pi5() {
        let root = tempfile::tempdir().unwrap();
        add_chip(&root, 512, "pinctrl-bcm2712");
        add_chip(&root, 571, "pinctrl-rp1");
        assert_eq!(sysfs_number(root.path(), 25), 596);
    }

    #[test]
    fn exports_the_global_number() {
        let root = tempfile::tempdir().unwrap();
        add_chip(&root, 512, "pinctrl-bcm2711");
        fs::write(root.path().join("export"), "").unwrap();
        // No gpio537 directory appears, so opening fails after the export write
        let err = SysfsGpio::input_at(root.path(), 25).unwrap_err();
        assert!(matches!(err, GameError::Gpio { line: 25, .. }));
        assert_eq!(
            fs::read_to_string(root.path().join("export")).unwrap(),
            "537"
        );
    }

    #[test]
    fn opens_the_line_under_its_global_number() {
        let root = fake_root(537);
        add_chip(&root, 512, "pinctrl-bcm2711");
        let mut button = SysfsGpio::input_at(root.path(), 25).unwrap();
        assert_eq!(button.line(), 25);
        assert_eq!(button.sysfs_number(), 537);
        assert_eq!(read_file(&root, 537, "direction"), "in");
        assert_eq!(button.read().unwrap(), Level::High);
    }
}
