//! Animation runtime helpers.
//!
//! Wires the interrupt flag, the display sink and the playback loop together.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{Context, Result};
use matrix_player::pipeline::{self, PlaybackSessionOptions};
use matrix_player::playlist::Playlist;
use matrix_player::sink::{DisplaySink, NullMatrix, TerminalMatrix};
use matrix_player::status::PlaybackSummary;

use crate::cli::DisplayKind;
use crate::config::{AnimConfig, MatrixOptions};

/// Install a Ctrl-C handler that raises the returned flag instead of killing the process.
pub fn install_interrupt_flag() -> Result<Arc<AtomicBool>> {
    let cancel = Arc::new(AtomicBool::new(false));
    let for_signal = cancel.clone();
    ctrlc::set_handler(move || {
        for_signal.store(true, Ordering::Relaxed);
    })
    .context("install interrupt handler")?;
    Ok(cancel)
}

fn open_sink(kind: DisplayKind, matrix: MatrixOptions) -> Result<Box<dyn DisplaySink>> {
    let sink: Box<dyn DisplaySink> = match kind {
        DisplayKind::Terminal => Box::new(TerminalMatrix::stdout(matrix)?),
        DisplayKind::Headless => Box::new(NullMatrix::new(matrix)),
    };
    Ok(sink)
}

/// Validate inputs, open the display and play until `cancel` is raised.
///
/// Missing files are reported before the display is touched.
pub fn run_animation(config: AnimConfig, cancel: Arc<AtomicBool>) -> Result<PlaybackSummary> {
    let playlist = Playlist::new(config.files)?;
    playlist.ensure_exists()?;

    tracing::info!(files = playlist.len(), "loading animation file(s)");
    tracing::info!(
        width = config.matrix.cols,
        height = config.matrix.rows,
        brightness = config.matrix.brightness,
        "matrix size"
    );
    if config.playback.shuffle {
        tracing::info!("shuffle mode enabled, file order is randomized after each cycle");
    }

    let mut sink = open_sink(config.display, config.matrix)?;
    let mut rng = fastrand::Rng::new();
    let summary = pipeline::play_playlist(
        sink.as_mut(),
        &playlist,
        &config.playback,
        &mut rng,
        PlaybackSessionOptions {
            cancel: Some(cancel),
            max_cycles: None,
        },
    )?;
    drop(sink);

    if summary.interrupted {
        tracing::info!(
            cycles = summary.cycles,
            frames = summary.frames_shown,
            "animation stopped by user"
        );
    }
    Ok(summary)
}
