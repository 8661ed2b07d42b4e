//! Reaction Timer - a reaction time game for the Raspberry Pi
//!
//! Flashes a ready signal, waits a random time, turns the LED on and measures
//! how long the player takes to press the button. After three rounds the
//! reaction times are printed. With keyboard input and text prompts the game
//! runs on any terminal.

pub mod cli;
pub mod config;
pub mod error;
pub mod game;
pub mod hardware;
pub mod indicator;
pub mod input;
pub mod testing;
pub mod timer;

pub use config::Config;
pub use error::GameError;
pub use game::{GameLoop, GameState, Outcome};
