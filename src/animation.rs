//! The walk itself.
//!
//! One pass from just off the left edge to the right edge. Each frame is
//! drawn, held for the frame delay, then erased. The loop cannot be cancelled.

use std::io;
use std::ops::Range;
use std::time::Duration;

use tracing::{debug, info};

use crate::renderer::Renderer;
use crate::terminal::Terminal;

/// How far left of column 0 the walk starts
pub const WALK_IN: i32 = 20;

/// Offsets visited for a terminal `width` columns wide.
pub fn offsets(width: u16) -> Range<i32> {
    -WALK_IN..i32::from(width)
}

pub struct Animation<T: Terminal> {
    renderer: Renderer<T>,
    delay: Duration,
}

impl<T: Terminal> Animation<T> {
    pub fn new(renderer: Renderer<T>, delay: Duration) -> Self {
        Self { renderer, delay }
    }

    #[allow(dead_code)]
    pub fn renderer(&self) -> &Renderer<T> {
        &self.renderer
    }

    /// Run the walk to completion, returning the number of frames shown.
    /// `sleep` is called once per frame with the frame delay.
    pub fn run(&mut self, mut sleep: impl FnMut(Duration)) -> io::Result<usize> {
        let width = self.renderer.width();
        info!("Walking across {} columns, {:?} per frame", width, self.delay);

        self.renderer.reserve_band()?;
        let mut frames = 0;
        for offset in offsets(width) {
            self.renderer.draw_frame(offset)?;
            sleep(self.delay);
            self.renderer.clear_frame(offset)?;
            frames += 1;
        }
        debug!("Drew {} frames", frames);

        self.renderer.finish()?;
        Ok(frames)
    }
}
