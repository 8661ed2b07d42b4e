//! Digital I/O capabilities used by the LED indicator and the button input

mod sysfs;

pub use sysfs::{sysfs_number, SysfsGpio, SYSFS_GPIO_ROOT};

use crate::error::Result;

/// Logic level of a digital line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    High,
    Low,
}

impl Level {
    pub fn is_low(&self) -> bool {
        *self == Level::Low
    }
}

/// A line that can be driven high or low
pub trait DigitalOutput {
    fn set_high(&mut self) -> Result<()>;

    fn set_low(&mut self) -> Result<()>;

    fn write(&mut self, level: Level) -> Result<()> {
        match level {
            Level::High => self.set_high(),
            Level::Low => self.set_low(),
        }
    }
}

/// A line whose level can be sampled
pub trait DigitalInput {
    fn read(&mut self) -> Result<Level>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingOutput;

    #[test]
    fn write_dispatches_on_level() {
        let mut output = RecordingOutput::new();
        output.write(Level::High).unwrap();
        output.write(Level::Low).unwrap();
        assert_eq!(output.writes(), vec![Level::High, Level::Low]);
    }

    #[test]
    fn only_low_counts_as_low() {
        assert!(Level::Low.is_low());
        assert!(!Level::High.is_low());
    }
}
