//! Game configuration
//!
//! A [`Config`] is built once from the command line and handed by reference
//! to the game loop and to the indicator and input constructors. Nothing in
//! the crate mutates it afterwards.
//!
//! ## Default GPIO wiring
//!
//! | Signal | Board pin | GPIO line (BCM) |
//! |--------|-----------|-----------------|
//! | LED (+500 ohm to GND) | 40 | 21 |
//! | Button (1K ohm to GND, pulled up) | 22 | 25 |

use std::time::Duration;

/// Number of rounds in one game
pub const ROUNDS: usize = 3;

/// How the player signals a reaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Physical push button on a GPIO line (active-low)
    Button,
    /// Any key on the controlling terminal
    Keyboard,
}

impl InputMode {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Button => "btn",
            Self::Keyboard => "kbd",
        }
    }
}

/// How the game shows the ready and go signals
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorMode {
    /// LED on a GPIO line
    Led,
    /// Text prompts on stdout
    Text,
}

/// Delays used during a game
#[derive(Debug, Clone, PartialEq)]
pub struct Timing {
    /// Shortest randomized wait before the indicator goes on
    pub delay_small: Duration,
    /// Longest randomized wait before the indicator goes on
    pub delay_big: Duration,
    /// On and off time of each ready blink
    pub ready_blink: Duration,
    /// Button polling interval
    pub poll_interval: Duration,
    /// Fixed pause between rounds
    pub inter_round: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            delay_small: Duration::from_millis(1500),
            delay_big: Duration::from_millis(4500),
            ready_blink: Duration::from_millis(100),
            poll_interval: Duration::from_millis(10),
            inter_round: Duration::from_millis(1500),
        }
    }
}

/// GPIO line numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pins {
    pub led: u32,
    pub button: u32,
}

impl Default for Pins {
    fn default() -> Self {
        Self { led: 21, button: 25 }
    }
}

/// Immutable game configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub input: InputMode,
    pub indicator: IndicatorMode,
    /// Verbose diagnostics
    pub debug: bool,
    pub timing: Timing,
    pub pins: Pins,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: InputMode::Button,
            indicator: IndicatorMode::Led,
            debug: false,
            timing: Timing::default(),
            pins: Pins::default(),
        }
    }
}

impl Config {
    /// Keyboard input and text prompts, playable on any machine
    pub fn terminal_only() -> Self {
        Self {
            input: InputMode::Keyboard,
            indicator: IndicatorMode::Text,
            ..Self::default()
        }
    }

    /// Replace the delays, e.g. with shorter ones for tests
    pub fn with_timing(mut self, timing: Timing) -> Self {
        self.timing = timing;
        self
    }

    /// Whether any GPIO line has to be opened for this configuration
    pub fn requires_gpio(&self) -> bool {
        self.input == InputMode::Button || self.indicator == IndicatorMode::Led
    }
}
