//! In-memory terminal used by the tests.
//!
//! Models a grid of characters with a cursor. Writing past the right edge
//! does not wrap; such writes are counted in `overflow` instead.

use std::io::{self, Write};

use super::{Terminal, TerminalError};

#[derive(Debug)]
pub struct VirtualTerminal {
    width: Option<u16>,
    pub rows: Vec<Vec<char>>,
    pub row: usize,
    pub col: usize,
    pub overflow: usize,
    pub flushes: usize,
}

impl VirtualTerminal {
    pub fn new(width: u16) -> Self {
        Self {
            width: Some(width),
            rows: vec![Vec::new()],
            row: 0,
            col: 0,
            overflow: 0,
            flushes: 0,
        }
    }

    /// A terminal whose size query always fails.
    pub fn failing_width() -> Self {
        Self {
            width: None,
            ..Self::new(0)
        }
    }

    fn columns(&self) -> usize {
        usize::from(self.width.unwrap_or(0))
    }

    fn ensure_row(&mut self) {
        let cols = self.columns();
        while self.rows.len() <= self.row {
            self.rows.push(Vec::new());
        }
        let line = &mut self.rows[self.row];
        if line.len() < cols {
            line.resize(cols, ' ');
        }
    }

    fn put(&mut self, ch: char) {
        if ch == '\n' {
            self.row += 1;
            self.col = 0;
            self.ensure_row();
            return;
        }
        self.ensure_row();
        if self.col < self.columns() {
            self.rows[self.row][self.col] = ch;
        } else {
            self.overflow += 1;
        }
        self.col += 1;
    }

    /// Text of a row with trailing blanks removed.
    pub fn line(&self, row: usize) -> String {
        self.rows
            .get(row)
            .map(|r| r.iter().collect::<String>().trim_end().to_string())
            .unwrap_or_default()
    }

    pub fn is_blank(&self) -> bool {
        self.rows.iter().flatten().all(|&c| c == ' ')
    }
}

impl Write for VirtualTerminal {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let text = std::str::from_utf8(buf)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        for ch in text.chars() {
            self.put(ch);
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.flushes += 1;
        Ok(())
    }
}

impl Terminal for VirtualTerminal {
    fn width(&self) -> Result<u16, TerminalError> {
        self.width.ok_or_else(|| {
            TerminalError::WidthQuery(io::Error::new(io::ErrorKind::Unsupported, "no tty"))
        })
    }

    fn cursor_up(&mut self, rows: u16) -> io::Result<()> {
        self.row = self.row.saturating_sub(usize::from(rows));
        Ok(())
    }

    fn move_to_column(&mut self, column: u16) -> io::Result<()> {
        self.col = usize::from(column);
        Ok(())
    }
}
