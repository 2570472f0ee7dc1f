//! Animated image decode stage.
//!
//! Uses the `image` crate to:
//! - sniff the container format from the file contents
//! - walk the frames of GIF / WebP / APNG animations lazily
//! - treat any other still image as a one-frame animation
//!
//! Every yielded [`Frame`] carries an RGB buffer and a strictly positive display duration.

use std::fs::File;
use std::io::BufReader;
use std::iter::Peekable;
use std::path::{Path, PathBuf};
use std::time::Duration;

use image::codecs::gif::GifDecoder;
use image::codecs::png::PngDecoder;
use image::codecs::webp::WebPDecoder;
use image::{AnimationDecoder, Delay, DynamicImage, Frames, ImageFormat, ImageReader, RgbImage};

use crate::error::{PlayerError, Result};

/// One displayable image plus how long it stays on screen.
#[derive(Clone, Debug)]
pub struct Frame {
    pub image: RgbImage,
    pub duration: Duration,
}

impl Frame {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

/// Lazy, single-pass frame sequence for one file.
///
/// Not restartable; call [`open_animation`] again to decode the file another time.
pub struct FrameDecoder {
    path: PathBuf,
    frames: Peekable<Frames<'static>>,
    default_delay: Duration,
}

/// Open `path` and prepare a lazy frame sequence.
///
/// Fails when the file cannot be opened, the format is not recognised, or the container holds no
/// frames at all. Errors on later frames are reported by the iterator.
pub fn open_animation(path: &Path, default_delay: Duration) -> Result<FrameDecoder> {
    let open_err = |source| PlayerError::Open {
        path: path.to_path_buf(),
        source,
    };
    let reader = ImageReader::open(path)
        .and_then(|r| r.with_guessed_format())
        .map_err(open_err)?;
    let format = reader.format();
    let inner = reader.into_inner();

    let frames = frames_for_format(inner, format).map_err(|source| PlayerError::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    let mut frames = frames.peekable();
    if frames.peek().is_none() {
        return Err(PlayerError::EmptyAnimation {
            path: path.to_path_buf(),
        });
    }

    Ok(FrameDecoder {
        path: path.to_path_buf(),
        frames,
        default_delay,
    })
}

impl Iterator for FrameDecoder {
    type Item = Result<Frame>;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.frames.next()?;
        Some(
            next.map(|frame| {
                let duration = delay_to_duration(frame.delay(), self.default_delay);
                Frame {
                    image: DynamicImage::ImageRgba8(frame.into_buffer()).into_rgb8(),
                    duration,
                }
            })
            .map_err(|source| PlayerError::Decode {
                path: self.path.clone(),
                source,
            }),
        )
    }
}

fn frames_for_format(
    inner: BufReader<File>,
    format: Option<ImageFormat>,
) -> image::ImageResult<Frames<'static>> {
    let Some(format) = format else {
        return Err(image::ImageError::Unsupported(
            image::error::UnsupportedError::from_format_and_kind(
                image::error::ImageFormatHint::Unknown,
                image::error::UnsupportedErrorKind::Format(image::error::ImageFormatHint::Unknown),
            ),
        ));
    };

    match format {
        ImageFormat::Gif => Ok(GifDecoder::new(inner)?.into_frames()),
        ImageFormat::WebP => {
            let decoder = WebPDecoder::new(inner)?;
            if decoder.has_animation() {
                Ok(decoder.into_frames())
            } else {
                Ok(still_frame(DynamicImage::from_decoder(decoder)?))
            }
        }
        ImageFormat::Png => {
            let decoder = PngDecoder::new(inner)?;
            if decoder.is_apng()? {
                Ok(decoder.apng()?.into_frames())
            } else {
                Ok(still_frame(DynamicImage::from_decoder(decoder)?))
            }
        }
        other => Ok(still_frame(image::load(inner, other)?)),
    }
}

/// Wrap a still image as a single frame with no declared delay.
fn still_frame(img: DynamicImage) -> Frames<'static> {
    let frame = image::Frame::from_parts(img.into_rgba8(), 0, 0, Delay::from_numer_denom_ms(0, 1));
    Frames::new(Box::new(std::iter::once(Ok(frame))))
}

/// Convert a container delay into a positive duration, falling back to `default` for zero.
fn delay_to_duration(delay: Delay, default: Duration) -> Duration {
    let (numer, denom) = delay.numer_denom_ms();
    if numer == 0 || denom == 0 {
        return default;
    }
    Duration::from_nanos(u64::from(numer) * 1_000_000 / u64::from(denom))
}
