//! Playback loop wiring: decode + normalize a whole cycle, then push frames with their timing.
//!
//! Single-threaded. The only suspension points are the per-frame waits, which poll the optional
//! cancel flag so an interrupt unwinds the loop at the next slice boundary.

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use crate::config::PlaybackConfig;
use crate::decode::{Frame, open_animation};
use crate::error::{PlayerError, Result};
use crate::normalize::{Canvas, normalize_frame};
use crate::playlist::{Playlist, display_names};
use crate::sink::DisplaySink;
use crate::status::{PlaybackSummary, RunState};

/// Optional knobs for a single playback run.
#[derive(Clone, Debug, Default)]
pub struct PlaybackSessionOptions {
    /// Cooperative stop flag; when set, the loop stops at the next check.
    pub cancel: Option<Arc<AtomicBool>>,
    /// Stop after this many completed cycles. `None` loops until cancelled.
    pub max_cycles: Option<u64>,
}

fn is_cancelled(cancel: Option<&AtomicBool>) -> bool {
    cancel.map(|c| c.load(Ordering::Relaxed)).unwrap_or(false)
}

/// Sleep for `duration` in `poll`-sized slices.
///
/// Returns `false` if `cancel` was raised before the full duration elapsed.
pub fn wait_or_cancel(duration: Duration, poll: Duration, cancel: Option<&AtomicBool>) -> bool {
    let Some(cancel) = cancel else {
        std::thread::sleep(duration);
        return true;
    };
    let poll = poll.max(Duration::from_millis(1));
    let deadline = Instant::now() + duration;
    loop {
        if cancel.load(Ordering::Relaxed) {
            return false;
        }
        let now = Instant::now();
        if now >= deadline {
            return true;
        }
        std::thread::sleep((deadline - now).min(poll));
    }
}

/// Decode and normalize every frame of every file in `order`, concatenated.
///
/// `cancel` is checked before each file and each frame; `Ok(None)` means it was raised.
pub fn load_cycle(
    order: &[PathBuf],
    canvas: Canvas,
    config: &PlaybackConfig,
    cancel: Option<&AtomicBool>,
) -> Result<Option<Vec<Frame>>> {
    let mut frames = Vec::new();
    for path in order {
        if is_cancelled(cancel) {
            return Ok(None);
        }
        let before = frames.len();
        for frame in open_animation(path, config.default_frame_delay)? {
            if is_cancelled(cancel) {
                return Ok(None);
            }
            frames.push(normalize_frame(frame?, canvas));
        }
        tracing::info!(
            path = %path.display(),
            frames = frames.len() - before,
            "loaded frames"
        );
    }
    Ok(Some(frames))
}

/// Push one frame, refusing anything that is not exactly the sink's size.
pub fn push_frame<S: DisplaySink + ?Sized>(sink: &mut S, frame: &Frame) -> Result<()> {
    let expected = (sink.width(), sink.height());
    let actual = frame.image.dimensions();
    if expected != actual {
        return Err(PlayerError::CanvasMismatch { expected, actual });
    }
    sink.set_image(&frame.image)
}

/// Play `playlist` on `sink` in cycles until cancelled (or `max_cycles` is reached).
///
/// Every path is checked for existence before each cycle decodes anything. Each cycle re-decodes
/// all files from disk in the cycle's order (shuffled when `config.shuffle`), then shows each frame
/// for its duration.
pub fn play_playlist<S: DisplaySink + ?Sized>(
    sink: &mut S,
    playlist: &Playlist,
    config: &PlaybackConfig,
    rng: &mut fastrand::Rng,
    opts: PlaybackSessionOptions,
) -> Result<PlaybackSummary> {
    let canvas = Canvas::new(sink.width(), sink.height());
    let cancel = opts.cancel.as_deref();
    let mut state = RunState::Idle;
    let mut frames_shown = 0u64;

    tracing::info!(
        files = playlist.len(),
        width = canvas.width,
        height = canvas.height,
        "starting playback"
    );

    let stop = |state: &mut RunState, frames_shown: u64, interrupted: bool| {
        let cycles = state.cycle().unwrap_or(0);
        *state = state.stop();
        PlaybackSummary {
            cycles,
            frames_shown,
            final_state: *state,
            interrupted,
        }
    };

    loop {
        if is_cancelled(cancel) {
            return Ok(stop(&mut state, frames_shown, true));
        }
        if let (Some(max), Some(done)) = (opts.max_cycles, state.cycle()) {
            if done >= max {
                return Ok(stop(&mut state, frames_shown, false));
            }
        }

        playlist.ensure_exists()?;
        state = state.advance();
        let order = playlist.cycle_order(config.shuffle, rng);
        if config.shuffle {
            tracing::info!(cycle = ?state.cycle(), order = ?display_names(&order), "playing in order");
        }
        let Some(frames) = load_cycle(&order, canvas, config, cancel)? else {
            return Ok(stop(&mut state, frames_shown, true));
        };

        state = state.advance();
        tracing::info!(cycle = ?state.cycle(), frames = frames.len(), "animating");

        for frame in &frames {
            if is_cancelled(cancel) {
                return Ok(stop(&mut state, frames_shown, true));
            }
            push_frame(sink, frame)?;
            frames_shown += 1;
            if !wait_or_cancel(frame.duration, config.cancel_poll, cancel) {
                return Ok(stop(&mut state, frames_shown, true));
            }
        }

        if config.shuffle {
            tracing::info!("cycle complete, reshuffling");
        } else {
            tracing::debug!(cycle = ?state.cycle(), "cycle complete");
        }
    }
}
