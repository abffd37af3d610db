//! Sprite renderer
//!
//! Draws a creature inside a band of rows reserved below the cursor's
//! starting position. Every line is clipped to `[0, width)`: characters that
//! fall outside are dropped, never wrapped.

use std::io;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::sprite::Creature;
use crate::terminal::{Session, Terminal};

pub struct Renderer<T: Terminal> {
    session: Session<T>,
    creature: &'static Creature,
}

impl<T: Terminal> Renderer<T> {
    pub fn new(session: Session<T>, creature: &'static Creature) -> Self {
        Self { session, creature }
    }

    #[allow(dead_code)]
    pub fn session(&self) -> &Session<T> {
        &self.session
    }

    pub fn width(&self) -> u16 {
        self.session.width()
    }

    fn band_height(&self) -> u16 {
        u16::try_from(self.creature.height()).unwrap_or(u16::MAX)
    }

    /// Push the prompt up by emitting one newline per band row.
    pub fn reserve_band(&mut self) -> io::Result<()> {
        let padding = "\n".repeat(usize::from(self.band_height()));
        let term = self.session.terminal_mut();
        term.write_all(padding.as_bytes())?;
        term.flush()
    }

    /// Move the cursor to the first row of the band.
    pub fn move_to_top(&mut self) -> io::Result<()> {
        let rows = self.band_height();
        self.session.terminal_mut().cursor_up(rows)
    }

    /// Park the cursor at the top of the band once the walk is over.
    pub fn finish(&mut self) -> io::Result<()> {
        self.move_to_top()?;
        self.session.terminal_mut().flush()
    }

    /// Draw the creature with its leftmost column at `offset`.
    pub fn draw_frame(&mut self, offset: i32) -> io::Result<()> {
        self.move_to_top()?;
        for line in self.creature.frame(offset) {
            self.line_at(offset, line)?;
        }
        self.session.terminal_mut().flush()
    }

    /// Overwrite what [`draw_frame`](Self::draw_frame) drew at `offset`.
    pub fn clear_frame(&mut self, offset: i32) -> io::Result<()> {
        self.move_to_top()?;
        for line in self.creature.frame(offset) {
            let blank = " ".repeat(line.width());
            self.line_at(offset, &blank)?;
        }
        self.session.terminal_mut().flush()
    }

    /// Write one line starting at column `start`, clipped to the terminal.
    fn line_at(&mut self, start: i32, text: &str) -> io::Result<()> {
        let width = self.session.width();
        let right = i32::from(width);

        let mut visible = String::with_capacity(text.len());
        let mut column = start;
        let mut end = 0;
        for ch in text.chars() {
            let w = ch.width().map_or(0, |w| i32::try_from(w).unwrap_or(i32::MAX));
            if column >= 0 && column < right && column + w <= right {
                visible.push(ch);
                end = column + w;
            }
            column += w;
        }

        let term = self.session.terminal_mut();
        if start > 0 && start < right && !visible.is_empty() {
            term.move_to_column(u16::try_from(start).unwrap_or(u16::MAX))?;
        }
        term.write_all(visible.as_bytes())?;
        term.end_line(end.min(right), width)?;
        term.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sprite::CAT;
    use crate::terminal::virtual_term::VirtualTerminal;

    fn renderer(width: u16) -> Renderer<VirtualTerminal> {
        let mut r = Renderer::new(Session::new(VirtualTerminal::new(width)), &CAT);
        r.reserve_band().unwrap();
        r
    }

    fn term(r: &Renderer<VirtualTerminal>) -> &VirtualTerminal {
        r.session().terminal()
    }

    #[test]
    fn test_reserve_band_leaves_cursor_below_band() {
        let r = renderer(80);
        assert_eq!(term(&r).row, 11);
        assert_eq!(term(&r).col, 0);
    }

    #[test]
    fn test_draw_fully_visible() {
        let mut r = renderer(80);
        r.draw_frame(10).unwrap();

        let t = term(&r);
        for (row, line) in CAT.frame(10).enumerate() {
            let expected = format!("{}{}", " ".repeat(10), line);
            assert_eq!(t.line(row), expected.trim_end());
        }
        assert_eq!(t.row, 11);
        assert_eq!(t.overflow, 0);
    }

    #[test]
    fn test_negative_offset_drops_leading_columns() {
        let mut r = renderer(80);
        let line: String = ('a'..='z').chain('A'..='Y').collect();
        assert_eq!(line.len(), 51);

        r.move_to_top().unwrap();
        r.line_at(-15, &line).unwrap();

        assert_eq!(term(&r).line(0), &line[15..]);
    }

    #[test]
    fn test_right_edge_drops_trailing_columns() {
        let mut r = renderer(20);
        r.move_to_top().unwrap();
        r.line_at(15, "0123456789").unwrap();

        let t = term(&r);
        assert_eq!(t.line(0), format!("{}01234", " ".repeat(15)));
        assert_eq!(t.overflow, 0);
        assert_eq!(t.row, 1);
    }

    #[test]
    fn test_line_past_right_edge_still_advances() {
        let mut r = renderer(20);
        r.move_to_top().unwrap();
        r.line_at(25, "hidden").unwrap();

        assert_eq!(term(&r).row, 1);
        assert!(term(&r).is_blank());
    }

    #[test]
    fn test_wide_glyph_straddling_edge_is_dropped() {
        let mut r = renderer(4);
        r.move_to_top().unwrap();
        r.line_at(1, "ab\u{732b}").unwrap();

        assert_eq!(term(&r).line(0), " ab");
        assert_eq!(term(&r).overflow, 0);
    }

    #[test]
    fn test_never_writes_outside_terminal() {
        for width in [1u16, 7, 30, 80] {
            let mut r = renderer(width);
            for offset in -25..i32::from(width) + 5 {
                r.draw_frame(offset).unwrap();
                r.clear_frame(offset).unwrap();
            }
            assert_eq!(term(&r).overflow, 0, "width {}", width);
            for row in &term(&r).rows {
                assert!(row.len() <= usize::from(width));
            }
        }
    }

    #[test]
    fn test_clear_undoes_draw() {
        for offset in [-30, -15, 0, 1, 2, 40, 79, 85] {
            let mut r = renderer(80);
            r.draw_frame(offset).unwrap();
            r.clear_frame(offset).unwrap();
            assert!(term(&r).is_blank(), "offset {}", offset);
            assert_eq!(term(&r).row, 11);
        }
    }

    #[test]
    fn test_every_line_is_flushed() {
        let mut r = renderer(80);
        let before = term(&r).flushes;
        r.draw_frame(0).unwrap();
        assert_eq!(term(&r).flushes - before, CAT.height() + 1);
    }
}
