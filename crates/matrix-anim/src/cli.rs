use std::path::PathBuf;

use clap::{Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(
    name = "matrix-anim",
    version = env!("MATRIX_ANIM_VERSION"),
    about = "Display animated GIF/WebP/APNG files on an RGB LED matrix"
)]
pub struct Args {
    /// Path(s) to animation file(s)
    pub files: Vec<PathBuf>,

    /// Display rows
    #[arg(long, default_value_t = 32, value_parser = clap::value_parser!(u32).range(1..=512))]
    pub led_rows: u32,

    /// Panel columns
    #[arg(long, default_value_t = 64, value_parser = clap::value_parser!(u32).range(1..=512))]
    pub led_cols: u32,

    /// Emulated LED size in screen pixels
    #[arg(long, default_value_t = 16, value_parser = clap::value_parser!(u32).range(1..))]
    pub pixel_size: u32,

    /// Brightness level (percent)
    #[arg(long, default_value_t = 100, value_parser = clap::value_parser!(u8).range(1..=100))]
    pub led_brightness: u8,

    /// Randomize file order after each complete cycle
    #[arg(long)]
    pub shuffle: bool,

    /// Where frames are drawn
    #[arg(long, value_enum, default_value_t = DisplayKind::Terminal)]
    pub display: DisplayKind,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum DisplayKind {
    /// Truecolor terminal emulator of the LED panel
    Terminal,
    /// Decode and time frames without drawing them
    #[value(name = "none")]
    Headless,
}
