//! Ready and go signals shown to the player

use crate::config::{Config, IndicatorMode};
use crate::error::Result;
use crate::hardware::{DigitalOutput, Level, SysfsGpio};
use std::io::{self, Write};
use std::thread;
use std::time::Duration;

/// Printed before every round
pub const READY_MESSAGE: &str = "READY...";
/// Printed instead of lighting the LED
pub const GO_MESSAGE: &str = "***GO***";
/// Blinks in the ready pattern
pub const READY_BLINKS: usize = 3;

/// Signals readiness and activation to the player
pub trait Indicator {
    /// Announce the next round
    fn flash_ready(&mut self) -> Result<()>;

    /// Show the go signal
    fn on(&mut self) -> Result<()>;

    /// Clear the go signal
    fn off(&mut self) -> Result<()>;
}

/// LED on a digital output line
pub struct LedIndicator<O: DigitalOutput, W: Write> {
    output: O,
    out: W,
    blink: Duration,
    state: Level,
}

impl<O: DigitalOutput, W: Write> LedIndicator<O, W> {
    /// Wrap `output` and switch the LED off
    pub fn new(output: O, out: W, blink: Duration) -> Result<Self> {
        let mut led = Self {
            output,
            out,
            blink,
            state: Level::Low,
        };
        led.off()?;
        log::debug!("LED indicator initialized");
        Ok(led)
    }

    pub fn is_lit(&self) -> bool {
        self.state == Level::High
    }

    fn set(&mut self, level: Level) -> Result<()> {
        self.output.write(level)?;
        self.state = level;
        Ok(())
    }
}

impl<O: DigitalOutput, W: Write> Indicator for LedIndicator<O, W> {
    fn flash_ready(&mut self) -> Result<()> {
        writeln!(self.out, "{}", READY_MESSAGE)?;
        self.out.flush()?;
        for _ in 0..READY_BLINKS {
            self.set(Level::High)?;
            thread::sleep(self.blink);
            self.set(Level::Low)?;
            thread::sleep(self.blink);
        }
        Ok(())
    }

    fn on(&mut self) -> Result<()> {
        self.set(Level::High)
    }

    fn off(&mut self) -> Result<()> {
        self.set(Level::Low)
    }
}

/// Screen-only play: prompts instead of an LED
pub struct TextIndicator<W: Write> {
    out: W,
}

impl<W: Write> TextIndicator<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> Indicator for TextIndicator<W> {
    fn flash_ready(&mut self) -> Result<()> {
        writeln!(self.out, "{}", READY_MESSAGE)?;
        self.out.flush()?;
        Ok(())
    }

    fn on(&mut self) -> Result<()> {
        writeln!(self.out, "{}", GO_MESSAGE)?;
        self.out.flush()?;
        Ok(())
    }

    fn off(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Build the indicator selected by `config`, writing prompts to stdout
pub fn from_config(config: &Config) -> Result<Box<dyn Indicator>> {
    Ok(match config.indicator {
        IndicatorMode::Led => Box::new(LedIndicator::new(
            SysfsGpio::output(config.pins.led)?,
            io::stdout(),
            config.timing.ready_blink,
        )?),
        IndicatorMode::Text => Box::new(TextIndicator::new(io::stdout())),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{RecordingOutput, SharedBuffer};

    fn led(blink_ms: u64) -> (LedIndicator<RecordingOutput, SharedBuffer>, RecordingOutput, SharedBuffer) {
        let output = RecordingOutput::new();
        let buffer = SharedBuffer::new();
        let led = LedIndicator::new(output.clone(), buffer.clone(), Duration::from_millis(blink_ms))
            .unwrap();
        (led, output, buffer)
    }

    #[test]
    fn led_starts_off() {
        let (led, output, _) = led(0);
        assert_eq!(output.writes(), vec![Level::Low]);
        assert!(!led.is_lit());
    }

    #[test]
    fn led_flash_ready_blinks_three_times() {
        let (mut led, output, buffer) = led(0);
        led.flash_ready().unwrap();

        let mut expected = vec![Level::Low];
        for _ in 0..READY_BLINKS {
            expected.push(Level::High);
            expected.push(Level::Low);
        }
        assert_eq!(output.writes(), expected);
        assert_eq!(buffer.contents(), "READY...\n");
        assert!(!led.is_lit());
    }

    #[test]
    fn led_flash_ready_takes_six_blink_intervals() {
        let (mut led, _, _) = led(20);
        let start = std::time::Instant::now();
        led.flash_ready().unwrap();
        assert!(start.elapsed() >= Duration::from_millis(120));
    }

    #[test]
    fn led_on_and_off_drive_the_line() {
        let (mut led, output, buffer) = led(0);
        led.on().unwrap();
        assert_eq!(output.last(), Some(Level::High));
        assert!(led.is_lit());
        led.off().unwrap();
        assert_eq!(output.last(), Some(Level::Low));
        assert!(!led.is_lit());
        // No go prompt when the LED carries the signal
        assert!(buffer.contents().is_empty());
    }

    #[test]
    fn text_indicator_prints_prompts() {
        let buffer = SharedBuffer::new();
        let mut text = TextIndicator::new(buffer.clone());
        text.flash_ready().unwrap();
        text.on().unwrap();
        text.off().unwrap();
        assert_eq!(buffer.contents(), "READY...\n***GO***\n");
    }

    #[test]
    fn text_indicator_off_prints_nothing() {
        let buffer = SharedBuffer::new();
        let mut text = TextIndicator::new(buffer.clone());
        text.off().unwrap();
        assert!(buffer.contents().is_empty());
    }
}
