//! ANSI terminal backend
//!
//! Writes to the controlling terminal (`/dev/tty`) so that redirecting
//! standard output does not break the animation. Falls back to stdout when
//! there is no controlling terminal.

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};

use crossterm::cursor::{MoveToColumn, MoveUp};
use crossterm::queue;
use tracing::{debug, warn};

use super::{Terminal, TerminalError};

const TTY_PATH: &str = "/dev/tty";

/// Where the escape sequences end up.
#[derive(Debug)]
pub enum Output {
    Tty(BufWriter<File>),
    Stdout(io::Stdout),
}

impl Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Output::Tty(w) => w.write(buf),
            Output::Stdout(w) => w.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Output::Tty(w) => w.flush(),
            Output::Stdout(w) => w.flush(),
        }
    }
}

#[derive(Debug)]
pub struct AnsiTerminal<W: Write = Output> {
    out: W,
}

impl AnsiTerminal {
    /// Open `/dev/tty`, or stdout if that fails.
    pub fn open() -> Self {
        let out = match OpenOptions::new().write(true).open(TTY_PATH) {
            Ok(file) => {
                debug!("Opened {}", TTY_PATH);
                Output::Tty(BufWriter::new(file))
            }
            Err(e) => {
                warn!("Cannot open {}: {}, falling back to stdout", TTY_PATH, e);
                Output::Stdout(io::stdout())
            }
        };
        Self { out }
    }
}

impl<W: Write> AnsiTerminal<W> {
    #[allow(dead_code)]
    pub fn with_writer(out: W) -> Self {
        Self { out }
    }

    #[allow(dead_code)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Write for AnsiTerminal<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.out.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

impl<W: Write> Terminal for AnsiTerminal<W> {
    fn width(&self) -> Result<u16, TerminalError> {
        // crossterm asks /dev/tty first and only then stdout
        let (cols, _rows) = crossterm::terminal::size().map_err(TerminalError::WidthQuery)?;
        Ok(cols)
    }

    fn cursor_up(&mut self, rows: u16) -> io::Result<()> {
        if rows == 0 {
            return Ok(());
        }
        queue!(self.out, MoveUp(rows))
    }

    fn move_to_column(&mut self, column: u16) -> io::Result<()> {
        queue!(self.out, MoveToColumn(column))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_up_sequence() {
        let mut term = AnsiTerminal::with_writer(Vec::new());
        term.cursor_up(11).unwrap();
        assert_eq!(term.into_inner(), b"\x1b[11A".to_vec());
    }

    #[test]
    fn test_cursor_up_zero_is_noop() {
        let mut term = AnsiTerminal::with_writer(Vec::new());
        term.cursor_up(0).unwrap();
        assert!(term.into_inner().is_empty());
    }

    #[test]
    fn test_move_to_column_is_one_based_on_the_wire() {
        let mut term = AnsiTerminal::with_writer(Vec::new());
        term.move_to_column(5).unwrap();
        assert_eq!(term.into_inner(), b"\x1b[6G".to_vec());
    }

    #[test]
    fn test_end_line_writes_newline() {
        let mut term = AnsiTerminal::with_writer(Vec::new());
        term.write_all(b"=^.^=").unwrap();
        term.end_line(5, 80).unwrap();
        assert_eq!(term.into_inner(), b"=^.^=\n".to_vec());
    }
}
