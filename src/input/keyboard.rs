//! Single raw keypresses from the controlling terminal

use super::{Activation, InputSource, PressState};
use crate::config::InputMode;
use crate::error::{GameError, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal;

/// ASCII escape, the quit key
pub const ESC: u8 = 27;

/// Reads one key as a raw byte, blocking
pub trait KeyReader {
    fn read_key(&mut self) -> Result<u8>;
}

/// Terminal raw mode, held until dropped
///
/// Raw mode is switched off again on every path out of the scope that holds
/// the guard, including early returns and `?`.
#[derive(Debug)]
pub struct RawModeGuard {
    _private: (),
}

impl RawModeGuard {
    pub fn acquire() -> Result<Self> {
        terminal::enable_raw_mode().map_err(GameError::Terminal)?;
        Ok(Self { _private: () })
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

/// Keys from the real terminal via crossterm
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalKeys;

impl KeyReader for TerminalKeys {
    fn read_key(&mut self) -> Result<u8> {
        let _raw = RawModeGuard::acquire()?;
        loop {
            if let Event::Key(key) = event::read().map_err(GameError::Terminal)? {
                // Release and repeat events only show up with enhanced keyboard reporting
                if key.kind == KeyEventKind::Press {
                    return key_to_byte(key);
                }
            }
        }
    }
}

/// Byte a raw-mode terminal would deliver for `key`
///
/// Keys without a single-byte encoding map to 0, which still counts as a
/// press. Ctrl-C does not raise SIGINT in raw mode, so it is reported as
/// [`GameError::Interrupted`] here.
pub fn key_to_byte(key: KeyEvent) -> Result<u8> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    Ok(match key.code {
        KeyCode::Char(c) if ctrl && c.eq_ignore_ascii_case(&'c') => {
            return Err(GameError::Interrupted)
        }
        KeyCode::Char(c) if ctrl && c.is_ascii_alphabetic() => (c.to_ascii_lowercase() as u8) & 0x1f,
        KeyCode::Char(c) if c.is_ascii() => c as u8,
        KeyCode::Esc => ESC,
        KeyCode::Enter => b'\r',
        KeyCode::Tab => b'\t',
        KeyCode::Backspace => 0x7f,
        _ => 0,
    })
}

/// Keyboard input: any key reacts, ESC quits
pub struct KeyboardInput<R: KeyReader> {
    reader: R,
    state: PressState,
}

impl<R: KeyReader> KeyboardInput<R> {
    pub fn new(reader: R) -> Self {
        log::debug!("keyboard input initialized");
        Self {
            reader,
            state: PressState::Released,
        }
    }
}

impl<R: KeyReader> InputSource for KeyboardInput<R> {
    fn wait_for_activation(&mut self) -> Result<Activation> {
        self.state = PressState::Released;
        let key = self.reader.read_key()?;
        if key == ESC {
            log::debug!("quit key pressed");
            return Ok(Activation::Quit);
        }
        self.state = PressState::Pressed;
        log::debug!("key {} -> {:?}", key, self.state);
        Ok(Activation::Pressed)
    }

    fn state(&self) -> PressState {
        self.state
    }

    fn mode(&self) -> InputMode {
        InputMode::Keyboard
    }
}
