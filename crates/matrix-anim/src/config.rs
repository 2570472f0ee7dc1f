use std::path::PathBuf;

pub use matrix_player::config::{MatrixOptions, PlaybackConfig};

use crate::cli::{Args, DisplayKind};

/// Everything a single animation run needs, resolved from the command line.
#[derive(Clone, Debug)]
pub struct AnimConfig {
    pub files: Vec<PathBuf>,
    pub matrix: MatrixOptions,
    pub playback: PlaybackConfig,
    pub display: DisplayKind,
}

impl From<Args> for AnimConfig {
    fn from(args: Args) -> Self {
        Self {
            files: args.files,
            matrix: MatrixOptions {
                rows: args.led_rows,
                cols: args.led_cols,
                pixel_size: args.pixel_size,
                brightness: args.led_brightness,
            },
            playback: PlaybackConfig {
                shuffle: args.shuffle,
                ..PlaybackConfig::default()
            },
            display: args.display,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn from_args_maps_matrix_and_playback() {
        let args = Args::try_parse_from([
            "matrix-anim",
            "--led-rows",
            "64",
            "--led-brightness",
            "70",
            "--shuffle",
            "x.gif",
        ])
        .unwrap();
        let cfg = AnimConfig::from(args);
        assert_eq!(cfg.matrix.rows, 64);
        assert_eq!(cfg.matrix.cols, 64);
        assert_eq!(cfg.matrix.brightness, 70);
        assert!(cfg.playback.shuffle);
        assert_eq!(
            cfg.playback.default_frame_delay,
            matrix_player::config::DEFAULT_FRAME_DELAY
        );
        assert_eq!(cfg.files, vec![PathBuf::from("x.gif")]);
    }
}
