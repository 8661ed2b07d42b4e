//! Player input: a push button on a GPIO line or a key on the terminal

mod button;
mod keyboard;

pub use button::ButtonInput;
pub use keyboard::{key_to_byte, KeyReader, KeyboardInput, RawModeGuard, TerminalKeys, ESC};

use crate::config::{Config, InputMode};
use crate::error::Result;
use crate::hardware::SysfsGpio;

/// Press state of the input, reset to `Released` on every wait
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PressState {
    #[default]
    Released,
    Pressed,
}

/// How a wait for the player ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    /// The player reacted
    Pressed,
    /// The player asked to leave the game
    Quit,
}

/// Source of the player's reaction
pub trait InputSource {
    /// Block until the player reacts or asks to quit. There is no timeout.
    fn wait_for_activation(&mut self) -> Result<Activation>;

    /// State left by the last wait
    fn state(&self) -> PressState;

    fn mode(&self) -> InputMode;
}

/// Build the input selected by `config`
pub fn from_config(config: &Config) -> Result<Box<dyn InputSource>> {
    let source: Box<dyn InputSource> = match config.input {
        InputMode::Button => Box::new(ButtonInput::new(
            SysfsGpio::input(config.pins.button)?,
            config.timing.poll_interval,
        )),
        InputMode::Keyboard => Box::new(KeyboardInput::new(TerminalKeys)),
    };
    log::debug!("input initialized: {}", source.mode().name());
    Ok(source)
}
