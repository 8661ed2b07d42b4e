//! Test doubles for the hardware and terminal seams
//!
//! Every double is cheap to clone and clones share state, so a test can keep
//! one handle while the game owns the other.

use crate::error::{GameError, Result};
use crate::hardware::{DigitalInput, DigitalOutput, Level};
use crate::input::KeyReader;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::io::{self, Write};
use std::rc::Rc;
use std::thread;
use std::time::Duration;

pub use crate::input::ESC;

/// Output line that records every level written to it
#[derive(Debug, Clone, Default)]
pub struct RecordingOutput {
    writes: Rc<RefCell<Vec<Level>>>,
}

impl RecordingOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn writes(&self) -> Vec<Level> {
        self.writes.borrow().clone()
    }

    pub fn last(&self) -> Option<Level> {
        self.writes.borrow().last().copied()
    }
}

impl DigitalOutput for RecordingOutput {
    fn set_high(&mut self) -> Result<()> {
        self.writes.borrow_mut().push(Level::High);
        Ok(())
    }

    fn set_low(&mut self) -> Result<()> {
        self.writes.borrow_mut().push(Level::Low);
        Ok(())
    }
}

/// Input line that reads high a fixed number of times, then low forever
#[derive(Debug, Clone)]
pub struct ScriptedInput {
    high_reads: usize,
    reads: Rc<RefCell<usize>>,
}

impl ScriptedInput {
    pub fn pressed_after(high_reads: usize) -> Self {
        Self {
            high_reads,
            reads: Rc::new(RefCell::new(0)),
        }
    }

    /// Number of times the line was sampled
    pub fn reads(&self) -> usize {
        *self.reads.borrow()
    }
}

impl DigitalInput for ScriptedInput {
    fn read(&mut self) -> Result<Level> {
        let mut reads = self.reads.borrow_mut();
        *reads += 1;
        Ok(if *reads > self.high_reads { Level::Low } else { Level::High })
    }
}

/// Input line whose every read fails
#[derive(Debug, Clone, Copy)]
pub struct BrokenInput {
    pub line: u32,
}

impl DigitalInput for BrokenInput {
    fn read(&mut self) -> Result<Level> {
        Err(GameError::Gpio {
            line: self.line,
            source: io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
        })
    }
}

/// Key reader that replays a script of delayed keypresses
#[derive(Debug, Clone, Default)]
pub struct ScriptedKeys {
    script: Rc<RefCell<VecDeque<(Duration, u8)>>>,
}

impl ScriptedKeys {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `key`, delivered `delay` after `read_key` is called
    pub fn push(&self, delay: Duration, key: u8) -> &Self {
        self.script.borrow_mut().push_back((delay, key));
        self
    }

    pub fn remaining(&self) -> usize {
        self.script.borrow().len()
    }
}

impl KeyReader for ScriptedKeys {
    fn read_key(&mut self) -> Result<u8> {
        let next = self.script.borrow_mut().pop_front();
        match next {
            Some((delay, key)) => {
                thread::sleep(delay);
                Ok(key)
            }
            None => Err(GameError::Terminal(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "key script exhausted",
            ))),
        }
    }
}

/// In-memory writer whose contents stay readable after it is moved
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer {
    bytes: Rc<RefCell<Vec<u8>>>,
}

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.bytes.borrow()).into_owned()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
