//! Matrix Anim: plays animated images on an RGB LED matrix (or a terminal emulation of one).
//!
//! ## Pipeline
//! 1. **Decode**: every file of the cycle is decoded with `image` into RGB frames + delays.
//! 2. **Normalize**: frames are fitted and letterboxed onto a black `cols x rows` canvas.
//! 3. **Play**: frames are pushed to the display one by one, sleeping each frame's delay.
//!
//! The cycle repeats forever (reshuffling with `--shuffle`) until Ctrl-C, which exits with 0.

use anyhow::Result;
use clap::Parser;
use matrix_anim::{cli, config::AnimConfig, runtime};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = cli::Args::parse();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,matrix_anim=info,matrix_player=info")),
        )
        .init();

    let cancel = runtime::install_interrupt_flag()?;
    runtime::run_animation(AnimConfig::from(args), cancel)?;
    Ok(())
}
