//! Terminal access.
//!
//! The animation never talks to the platform directly. Everything it needs
//! from the terminal goes through the [`Terminal`] trait:
//!
//! - **ansi**: `/dev/tty` + ANSI escape sequences (every non-Windows target)
//! - **console**: `CONOUT$` + Win32 console API (Windows)
//!
//! The concrete backend is picked at build time via [`PlatformTerminal`].

#[cfg(not(windows))]
pub mod ansi;
#[cfg(windows)]
pub mod console;
#[cfg(test)]
pub mod virtual_term;

use std::io::{self, Write};
use thiserror::Error;
use tracing::{info, warn};

/// Width used when the terminal cannot tell us its own.
pub const DEFAULT_WIDTH: u16 = 80;

#[derive(Error, Debug)]
pub enum TerminalError {
    #[error("Failed to query terminal size: {0}")]
    WidthQuery(#[source] io::Error),

    #[error("Terminal reported zero columns")]
    ZeroWidth,

    #[cfg(windows)]
    #[error("Console API call failed: {0}")]
    Console(#[source] windows::core::Error),
}

/// Capabilities the renderer needs from an output terminal.
pub trait Terminal: Write {
    /// Current number of character columns.
    fn width(&self) -> Result<u16, TerminalError>;

    /// Move the cursor `rows` lines up.
    fn cursor_up(&mut self, rows: u16) -> io::Result<()>;

    /// Move the cursor to a zero-based column on the current line.
    fn move_to_column(&mut self, column: u16) -> io::Result<()>;

    /// Terminate a sprite line whose next free column is `last_column`.
    fn end_line(&mut self, _last_column: i32, _width: u16) -> io::Result<()> {
        self.write_all(b"\n")
    }
}

/// Whether a line ending at `last_column` still needs a newline on a
/// terminal that wraps as soon as the right-most column is filled.
#[cfg_attr(not(windows), allow(dead_code))]
pub fn needs_newline(last_column: i32, width: u16) -> bool {
    last_column < i32::from(width)
}

#[cfg(not(windows))]
pub type PlatformTerminal = ansi::AnsiTerminal;
#[cfg(windows)]
pub type PlatformTerminal = console::ConsoleTerminal;

/// An open terminal together with the width read when it was opened.
#[derive(Debug)]
pub struct Session<T: Terminal> {
    term: T,
    width: u16,
}

impl Session<PlatformTerminal> {
    /// Open the controlling terminal of this process.
    pub fn open() -> Self {
        Self::new(PlatformTerminal::open())
    }
}

impl<T: Terminal> Session<T> {
    /// Wrap an already opened terminal, reading its width once.
    pub fn new(term: T) -> Self {
        let width = match term.width() {
            Ok(0) => {
                warn!("{}, using {} columns", TerminalError::ZeroWidth, DEFAULT_WIDTH);
                DEFAULT_WIDTH
            }
            Ok(w) => w,
            Err(e) => {
                warn!("{}, using {} columns", e, DEFAULT_WIDTH);
                DEFAULT_WIDTH
            }
        };
        info!("Terminal width: {}", width);
        Self { term, width }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    #[allow(dead_code)]
    pub fn terminal(&self) -> &T {
        &self.term
    }

    pub fn terminal_mut(&mut self) -> &mut T {
        &mut self.term
    }
}
