//! Reaction Timer - reaction time game for the Raspberry Pi or any terminal

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::terminal::disable_raw_mode;
use std::env;
use std::ffi::OsString;
use std::process;

use reaction_timer::{cli::Cli, Config, GameError, GameLoop, Outcome};

fn init_logger(debug: bool) {
    let level = if debug {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

/// Whether errors should capture a backtrace without the user asking for one
///
/// An explicit `RUST_LIB_BACKTRACE` or `RUST_BACKTRACE` setting always wins.
fn force_backtraces(lib_var: Option<OsString>, rust_var: Option<OsString>) -> bool {
    lib_var.is_none() && rust_var.is_none()
}

/// Make every error carry the trace printed by "Exception Detected"
fn capture_error_backtraces() {
    if force_backtraces(env::var_os("RUST_LIB_BACKTRACE"), env::var_os("RUST_BACKTRACE")) {
        // Still single-threaded: no other thread reads the environment yet
        env::set_var("RUST_LIB_BACKTRACE", "1");
    }
}

fn run(config: &Config) -> Result<Outcome> {
    let mut game = GameLoop::from_config(config).context("failed to set up the game")?;
    Ok(game.run()?)
}

fn main() {
    capture_error_backtraces();

    // Exits 0 after printing help, 2 on bad arguments
    let cli = Cli::parse();
    init_logger(cli.debug);
    cli.log_options();
    let config = cli.into_config();

    // Raw mode turns Ctrl-C into a key, so this only fires outside a keypress wait
    if let Err(e) = ctrlc::set_handler(|| {
        let _ = disable_raw_mode();
        println!("Detected ^C");
        process::exit(1);
    }) {
        log::warn!("Could not install Ctrl-C handler: {}", e);
    }

    match run(&config) {
        Ok(Outcome::Finished(times)) => {
            log::debug!("game finished: {:?}", times);
        }
        Ok(Outcome::Quit) => {
            log::debug!("game quit by player");
        }
        Err(err) if matches!(err.downcast_ref::<GameError>(), Some(GameError::Interrupted)) => {
            println!("Detected ^C");
            process::exit(1);
        }
        Err(err) => {
            log::error!("game aborted: {:#}", err);
            eprintln!("Exception Detected");
            eprintln!("{:#}", err);
            eprintln!("{:?}", err);
            process::exit(1);
        }
    }
}
