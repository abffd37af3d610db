//! Windows console backend
//!
//! Cursor movement goes through the console API instead of escape sequences.
//! Buffered text is flushed before every cursor call so the two stay ordered.

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::os::windows::io::AsRawHandle;

use tracing::{debug, warn};
use windows::Win32::Foundation::HANDLE;
use windows::Win32::System::Console::{
    GetConsoleScreenBufferInfo, GetStdHandle, SetConsoleCursorPosition,
    CONSOLE_SCREEN_BUFFER_INFO, COORD, STD_OUTPUT_HANDLE,
};

use super::{needs_newline, Terminal, TerminalError};

const CONSOLE_PATH: &str = "CONOUT$";

enum Output {
    Console(BufWriter<File>),
    Stdout(io::Stdout),
}

pub struct ConsoleTerminal {
    out: Output,
    handle: HANDLE,
}

impl std::fmt::Debug for ConsoleTerminal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsoleTerminal")
            .field("handle", &self.handle)
            .finish()
    }
}

fn console_error(e: windows::core::Error) -> io::Error {
    io::Error::new(io::ErrorKind::Other, TerminalError::Console(e))
}

impl ConsoleTerminal {
    /// Open `CONOUT$`, or the standard output handle if that fails.
    pub fn open() -> Self {
        match OpenOptions::new().read(true).write(true).open(CONSOLE_PATH) {
            Ok(file) => {
                debug!("Opened {}", CONSOLE_PATH);
                let handle = HANDLE(file.as_raw_handle());
                Self {
                    out: Output::Console(BufWriter::new(file)),
                    handle,
                }
            }
            Err(e) => {
                warn!("Cannot open {}: {}, falling back to stdout", CONSOLE_PATH, e);
                let handle = unsafe { GetStdHandle(STD_OUTPUT_HANDLE) }.unwrap_or_default();
                Self {
                    out: Output::Stdout(io::stdout()),
                    handle,
                }
            }
        }
    }

    fn buffer_info(&self) -> Result<CONSOLE_SCREEN_BUFFER_INFO, TerminalError> {
        let mut info = CONSOLE_SCREEN_BUFFER_INFO::default();
        unsafe { GetConsoleScreenBufferInfo(self.handle, &mut info) }
            .map_err(TerminalError::Console)?;
        Ok(info)
    }

    fn set_cursor(&mut self, pos: COORD) -> io::Result<()> {
        unsafe { SetConsoleCursorPosition(self.handle, pos) }.map_err(console_error)
    }

    fn cursor(&mut self) -> io::Result<COORD> {
        self.flush()?;
        let info = self.buffer_info().map_err(|e| match e {
            TerminalError::Console(e) => console_error(e),
            other => io::Error::new(io::ErrorKind::Other, other),
        })?;
        Ok(info.dwCursorPosition)
    }
}

impl Write for ConsoleTerminal {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match &mut self.out {
            Output::Console(w) => w.write(buf),
            Output::Stdout(w) => w.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match &mut self.out {
            Output::Console(w) => w.flush(),
            Output::Stdout(w) => w.flush(),
        }
    }
}

impl Terminal for ConsoleTerminal {
    fn width(&self) -> Result<u16, TerminalError> {
        let info = self.buffer_info()?;
        Ok(u16::try_from(info.dwSize.X).unwrap_or(0))
    }

    fn cursor_up(&mut self, rows: u16) -> io::Result<()> {
        let mut pos = self.cursor()?;
        pos.X = 0;
        pos.Y = pos.Y.saturating_sub(i16::try_from(rows).unwrap_or(i16::MAX)).max(0);
        self.set_cursor(pos)
    }

    fn move_to_column(&mut self, column: u16) -> io::Result<()> {
        let mut pos = self.cursor()?;
        pos.X = i16::try_from(column).unwrap_or(i16::MAX);
        self.set_cursor(pos)
    }

    fn end_line(&mut self, last_column: i32, width: u16) -> io::Result<()> {
        if needs_newline(last_column, width) {
            self.write_all(b"\n")?;
        }
        Ok(())
    }
}
