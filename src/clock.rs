//! Frame timing.
//!
//! The walk takes `width + 20` frames, so the per-frame delay shrinks as the
//! terminal grows to keep the whole traversal roughly the same length.

use std::time::Duration;

/// Speed used when `CAT_SPEED` is unset or unreadable
pub const DEFAULT_SPEED: u32 = 100;

/// Environment variable overriding the speed
pub const SPEED_ENV: &str = "CAT_SPEED";

const TRAVERSAL_MICROS: u64 = 10_000_000;

/// Parse a speed override from its leading run of digits, so `"400 fast"`
/// reads as 400. No digits, a sign, or overflow yields [`DEFAULT_SPEED`].
pub fn parse_speed(value: Option<&str>) -> u32 {
    value
        .and_then(|v| {
            let v = v.trim_start();
            let digits = v.find(|c: char| !c.is_ascii_digit()).unwrap_or(v.len());
            v[..digits].parse::<u32>().ok()
        })
        .unwrap_or(DEFAULT_SPEED)
}

/// Delay between drawing a frame and erasing it.
pub fn frame_delay(speed: u32, width: u16) -> Duration {
    let micros = TRAVERSAL_MICROS / (u64::from(speed) + u64::from(width) + 1);
    Duration::from_micros(micros.max(1))
}
