use std::time::Duration;

/// Delay used when a container declares no (or a zero) frame delay.
pub const DEFAULT_FRAME_DELAY: Duration = Duration::from_millis(100);

/// Physical/emulated LED matrix parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MatrixOptions {
    /// Number of LED rows (canvas height).
    pub rows: u32,
    /// Number of LED columns (canvas width).
    pub cols: u32,
    /// Emulated LED pitch in screen pixels.
    pub pixel_size: u32,
    /// Brightness percent (1..=100).
    pub brightness: u8,
}

impl Default for MatrixOptions {
    fn default() -> Self {
        Self {
            rows: 32,
            cols: 64,
            pixel_size: 16,
            brightness: 100,
        }
    }
}

/// Playback tuning parameters shared by the decode and playback stages.
#[derive(Clone, Debug)]
pub struct PlaybackConfig {
    /// Reorder the playlist at the start of every cycle.
    pub shuffle: bool,
    /// Substituted for missing or zero frame delays.
    pub default_frame_delay: Duration,
    /// Sleep slice used while waiting out a frame; bounds interrupt latency.
    pub cancel_poll: Duration,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            shuffle: false,
            default_frame_delay: DEFAULT_FRAME_DELAY,
            cancel_poll: Duration::from_millis(10),
        }
    }
}
