//! Push button on an active-low GPIO line
//!
//! The button pulls the line to ground against an external pull-up, so a
//! low reading means pressed.

use super::{Activation, InputSource, PressState};
use crate::config::InputMode;
use crate::error::Result;
use crate::hardware::DigitalInput;
use std::thread;
use std::time::Duration;

pub struct ButtonInput<I: DigitalInput> {
    line: I,
    poll_interval: Duration,
    state: PressState,
}

impl<I: DigitalInput> ButtonInput<I> {
    pub fn new(line: I, poll_interval: Duration) -> Self {
        log::debug!("button input initialized");
        Self {
            line,
            poll_interval,
            state: PressState::Released,
        }
    }
}

impl<I: DigitalInput> InputSource for ButtonInput<I> {
    fn wait_for_activation(&mut self) -> Result<Activation> {
        self.state = PressState::Released;
        log::debug!("waiting for button");
        // Sleep between samples to keep the CPU idle
        while !self.line.read()?.is_low() {
            thread::sleep(self.poll_interval);
        }
        log::debug!("Button pressed");
        self.state = PressState::Pressed;
        Ok(Activation::Pressed)
    }

    fn state(&self) -> PressState {
        self.state
    }

    fn mode(&self) -> InputMode {
        InputMode::Button
    }
}
