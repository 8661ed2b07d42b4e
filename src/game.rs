//! The game loop: three timed rounds, then the results

use crate::config::{Config, Timing, ROUNDS};
use crate::error::Result;
use crate::hardware::SYSFS_GPIO_ROOT;
use crate::indicator::{self, Indicator};
use crate::input::{self, Activation, InputSource};
use crate::timer::Timer;
use std::io::{self, Stdout, Write};

/// Where the game loop currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    /// Constructed, no round started
    Idle,
    /// Ready signal and randomized wait
    RoundSetup,
    /// Indicator on, timer running
    Armed,
    /// Waiting for the player
    Measuring,
    /// Reaction recorded
    RoundComplete,
    /// All rounds played and reported
    Finished,
    /// The player left with the quit key
    Quit,
}

/// How a game ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// All rounds were played; reaction times in milliseconds
    Finished(Vec<u64>),
    /// The player quit; nothing was reported
    Quit,
}

pub struct GameLoop<W: Write> {
    timing: Timing,
    indicator: Box<dyn Indicator>,
    input: Box<dyn InputSource>,
    timer: Timer,
    rounds_played: usize,
    state: GameState,
    out: W,
}

impl GameLoop<Stdout> {
    /// Open the hardware or terminal selected by `config`
    pub fn from_config(config: &Config) -> Result<Self> {
        if config.requires_gpio() {
            log::debug!(
                "using GPIO under {} (LED line {}, button line {})",
                SYSFS_GPIO_ROOT,
                config.pins.led,
                config.pins.button
            );
        }
        let input = input::from_config(config)?;
        let indicator = indicator::from_config(config)?;
        Ok(Self::new(config, indicator, input, io::stdout()))
    }
}

impl<W: Write> GameLoop<W> {
    pub fn new(
        config: &Config,
        indicator: Box<dyn Indicator>,
        input: Box<dyn InputSource>,
        out: W,
    ) -> Self {
        Self {
            timing: config.timing.clone(),
            indicator,
            input,
            timer: Timer::new(),
            rounds_played: 0,
            state: GameState::Idle,
            out,
        }
    }

    /// Use `timer` instead of a freshly seeded one
    pub fn with_timer(mut self, timer: Timer) -> Self {
        self.timer = timer;
        self
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn rounds_played(&self) -> usize {
        self.rounds_played
    }

    pub fn history(&self) -> &[u64] {
        self.timer.history()
    }

    /// Play every round, then print the results
    pub fn run(&mut self) -> Result<Outcome> {
        while self.rounds_played < ROUNDS {
            if self.play_round()? == Activation::Quit {
                self.state = GameState::Quit;
                return Ok(Outcome::Quit);
            }
            if self.rounds_played < ROUNDS {
                self.timer.pause(self.timing.inter_round);
            }
        }

        self.state = GameState::Finished;
        self.report()?;
        Ok(Outcome::Finished(self.timer.history().to_vec()))
    }

    fn play_round(&mut self) -> Result<Activation> {
        self.state = GameState::RoundSetup;
        self.indicator.flash_ready()?;
        self.timer
            .random_delay(self.timing.delay_small, self.timing.delay_big);

        self.state = GameState::Armed;
        self.indicator.on()?;
        self.timer.start();

        self.state = GameState::Measuring;
        if self.input.wait_for_activation()? == Activation::Quit {
            self.indicator.off()?;
            return Ok(Activation::Quit);
        }
        log::debug!("Main->button pressed");

        self.state = GameState::RoundComplete;
        let reaction_ms = self.timer.stop()?;
        self.indicator.off()?;
        self.rounds_played += 1;
        log::debug!("round {}: {} ms", self.rounds_played, reaction_ms);
        Ok(Activation::Pressed)
    }

    fn report(&mut self) -> Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "Your times were:")?;
        self.timer.show_history(&mut self.out)?;
        self.out.flush()?;
        Ok(())
    }
}
