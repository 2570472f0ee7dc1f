//! Display sinks.
//!
//! The playback loop only needs the canvas size and a "show this image" call; everything about
//! how the image reaches LEDs (or a terminal) lives behind [`DisplaySink`].

use std::io::{self, Write};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, queue};
use image::{Rgb, RgbImage};

use crate::config::MatrixOptions;
use crate::error::{PlayerError, Result};

/// Screen pixels per terminal glyph column at `pixel_size` scale 1.
const PIXELS_PER_GLYPH: u32 = 16;
/// Upper half block: foreground paints the top LED, background the bottom one.
const HALF_BLOCK: char = '\u{2580}';

/// A full-canvas image consumer. The playback loop is its only writer.
pub trait DisplaySink {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    /// Replace whatever is shown with `image`; `image` is exactly `width x height`.
    fn set_image(&mut self, image: &RgbImage) -> Result<()>;
}

/// Scale one color channel by a brightness percent.
pub fn dim(value: u8, brightness: u8) -> u8 {
    (u16::from(value) * u16::from(brightness.min(100)) / 100) as u8
}

fn dimmed(px: &Rgb<u8>, brightness: u8) -> Color {
    Color::Rgb {
        r: dim(px[0], brightness),
        g: dim(px[1], brightness),
        b: dim(px[2], brightness),
    }
}

/// LED matrix emulator drawing into a truecolor terminal.
///
/// Two LED rows share one text line. The writer is switched to the alternate screen with the
/// cursor hidden for the sink's lifetime and restored on drop.
pub struct TerminalMatrix<W: Write> {
    out: W,
    options: MatrixOptions,
    glyph: String,
}

impl TerminalMatrix<io::Stdout> {
    pub fn stdout(options: MatrixOptions) -> Result<Self> {
        Self::new(io::stdout(), options)
    }
}

impl<W: Write> TerminalMatrix<W> {
    pub fn new(mut out: W, options: MatrixOptions) -> Result<Self> {
        execute!(out, EnterAlternateScreen, Hide, Clear(ClearType::All)).map_err(PlayerError::Display)?;
        let repeat = (options.pixel_size / PIXELS_PER_GLYPH).max(1) as usize;
        Ok(Self {
            out,
            options,
            glyph: HALF_BLOCK.to_string().repeat(repeat),
        })
    }

    fn draw(&mut self, image: &RgbImage) -> io::Result<()> {
        let black = Rgb([0, 0, 0]);
        let brightness = self.options.brightness;
        for line in 0..self.options.rows.div_ceil(2) {
            let top_y = line * 2;
            queue!(self.out, MoveTo(0, line as u16))?;
            for x in 0..self.options.cols {
                let top = image.get_pixel(x, top_y);
                let bottom = if top_y + 1 < self.options.rows {
                    image.get_pixel(x, top_y + 1)
                } else {
                    &black
                };
                queue!(
                    self.out,
                    SetForegroundColor(dimmed(top, brightness)),
                    SetBackgroundColor(dimmed(bottom, brightness)),
                    Print(&self.glyph)
                )?;
            }
            queue!(self.out, ResetColor)?;
        }
        self.out.flush()
    }
}

impl<W: Write> DisplaySink for TerminalMatrix<W> {
    fn width(&self) -> u32 {
        self.options.cols
    }

    fn height(&self) -> u32 {
        self.options.rows
    }

    fn set_image(&mut self, image: &RgbImage) -> Result<()> {
        self.draw(image).map_err(PlayerError::Display)
    }
}

impl<W: Write> Drop for TerminalMatrix<W> {
    fn drop(&mut self) {
        let _ = execute!(self.out, ResetColor, LeaveAlternateScreen, Show);
    }
}

/// Headless sink that accepts frames and counts them.
#[derive(Debug)]
pub struct NullMatrix {
    width: u32,
    height: u32,
    shown: u64,
}

impl NullMatrix {
    pub fn new(options: MatrixOptions) -> Self {
        Self {
            width: options.cols,
            height: options.rows,
            shown: 0,
        }
    }
}

impl DisplaySink for NullMatrix {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn set_image(&mut self, _image: &RgbImage) -> Result<()> {
        self.shown += 1;
        tracing::trace!(frame = self.shown, "frame (headless)");
        Ok(())
    }
}
