//! Command line options

use crate::config::{Config, IndicatorMode, InputMode};
use clap::{ArgAction, Parser};

const ABOUT: &str = "Reaction Time Game on the Pi";

const LONG_ABOUT: &str = "\
Reaction Time Game on the Pi

Blinks the LED (3x), then pauses signaling ready, then turns on the LED.
The gamer presses the button as quickly as possible, which turns off the LED.
The game measures the reaction time, and prints it after 3 rounds.

Press ESC to quit when playing with the keyboard.
Can be played on a non-Raspberry Pi with the -k -n options.";

#[derive(Debug, Clone, Parser)]
#[command(
    name = "reaction-timer",
    about = ABOUT,
    long_about = LONG_ABOUT,
    disable_help_flag = true
)]
pub struct Cli {
    /// Use keyboard (instead of button)
    #[arg(short = 'k', long = "kbd")]
    pub kbd: bool,

    /// Don't use LED (instead print prompts)
    #[arg(short = 'n', long = "noled")]
    pub noled: bool,

    /// Display debug info
    #[arg(short = 'd', long = "debug")]
    pub debug: bool,

    /// Print this help
    #[allow(dead_code)]
    #[arg(short = 'h', long = "help", short_alias = '?', action = ArgAction::HelpLong)]
    help: Option<bool>,
}

impl Cli {
    pub fn input_mode(&self) -> InputMode {
        if self.kbd {
            InputMode::Keyboard
        } else {
            InputMode::Button
        }
    }

    pub fn indicator_mode(&self) -> IndicatorMode {
        if self.noled {
            IndicatorMode::Text
        } else {
            IndicatorMode::Led
        }
    }

    pub fn into_config(self) -> Config {
        Config {
            input: self.input_mode(),
            indicator: self.indicator_mode(),
            debug: self.debug,
            ..Config::default()
        }
    }

    /// Dump the effective options at debug level
    pub fn log_options(&self) {
        log::debug!("option=--kbd \t value={}", self.kbd);
        log::debug!("option=--noled \t value={}", self.noled);
        log::debug!("option=--debug \t value={}", self.debug);
        log::debug!("keyboard:{}", self.input_mode().name());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("reaction-timer").chain(args.iter().copied()))
    }

    #[test]
    fn defaults_use_hardware() {
        let config = parse(&[]).unwrap().into_config();
        assert_eq!(config.input, InputMode::Button);
        assert_eq!(config.indicator, IndicatorMode::Led);
        assert!(!config.debug);
    }

    #[test]
    fn short_flags() {
        let config = parse(&["-k", "-n", "-d"]).unwrap().into_config();
        assert_eq!(config.input, InputMode::Keyboard);
        assert_eq!(config.indicator, IndicatorMode::Text);
        assert!(config.debug);
    }

    #[test]
    fn grouped_short_flags() {
        let cli = parse(&["-kn"]).unwrap();
        assert!(cli.kbd && cli.noled && !cli.debug);
    }

    #[test]
    fn long_flags() {
        let config = parse(&["--kbd", "--noled", "--debug"]).unwrap().into_config();
        assert_eq!(config, Config { debug: true, ..Config::terminal_only() });
    }

    #[test]
    fn help_flags_exit_zero() {
        for flag in ["-h", "-?", "--help"] {
            let err = parse(&[flag]).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::DisplayHelp, "{}", flag);
            assert_eq!(err.exit_code(), 0);
            assert!(err.to_string().contains("Reaction Time Game on the Pi"));
        }
    }

    #[test]
    fn unknown_flag_exits_two() {
        let err = parse(&["-x"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn positional_arguments_are_rejected() {
        assert_eq!(parse(&["extra"]).unwrap_err().exit_code(), 2);
    }
}
