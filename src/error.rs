//! Error type shared by the game components

use std::io;
use thiserror::Error;

/// Errors that abort a game run
#[derive(Debug, Error)]
pub enum GameError {
    /// `Timer::stop` was called with no measurement in flight
    #[error("timer stopped before it was started")]
    TimerNotStarted,
    /// The player pressed Ctrl-C while the terminal was in raw mode
    #[error("interrupted by user")]
    Interrupted,
    /// Reading from or configuring the terminal failed
    #[error("terminal error")]
    Terminal(#[source] io::Error),
    /// Accessing a GPIO line failed
    #[error("GPIO line {line}")]
    Gpio {
        line: u32,
        #[source]
        source: io::Error,
    },
    /// Writing player-facing text failed
    #[error("output error")]
    Output(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, GameError>;
