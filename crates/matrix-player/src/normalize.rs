//! Frame normalize stage.
//!
//! Fits a decoded frame inside the display canvas (never upscaling), then letterboxes it onto a
//! black canvas of exactly the display size. Pure functions; no I/O.

use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage};

use crate::decode::Frame;

/// Display canvas dimensions in LEDs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Where a scaled frame lands on the canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Placement {
    pub scaled_width: u32,
    pub scaled_height: u32,
    pub offset_x: u32,
    pub offset_y: u32,
}

/// Compute the aspect-preserving fit of a `src_w x src_h` image inside `canvas`.
///
/// Images already inside the canvas keep their size. Otherwise the limiting axis is scaled to
/// exactly the canvas size and the other axis is rounded, clamped to `1..=canvas`.
pub fn fit_placement(src_w: u32, src_h: u32, canvas: Canvas) -> Placement {
    let (scaled_width, scaled_height) = fit_size(src_w, src_h, canvas);
    Placement {
        scaled_width,
        scaled_height,
        offset_x: (canvas.width - scaled_width) / 2,
        offset_y: (canvas.height - scaled_height) / 2,
    }
}

fn fit_size(src_w: u32, src_h: u32, canvas: Canvas) -> (u32, u32) {
    let (w, h) = (src_w.max(1) as u64, src_h.max(1) as u64);
    let (cw, ch) = (canvas.width as u64, canvas.height as u64);
    if w <= cw && h <= ch {
        return (w as u32, h as u32);
    }

    // Width limits when w/h >= cw/ch.
    if w * ch >= h * cw {
        let nh = ((h * cw + w / 2) / w).clamp(1, ch);
        (cw as u32, nh as u32)
    } else {
        let nw = ((w * ch + h / 2) / h).clamp(1, cw);
        (nw as u32, ch as u32)
    }
}

/// Scale and center `image` on a black canvas of exactly `canvas` size.
pub fn letterbox(image: &RgbImage, canvas: Canvas) -> RgbImage {
    let placement = fit_placement(image.width(), image.height(), canvas);
    let mut out = RgbImage::from_pixel(canvas.width, canvas.height, Rgb([0, 0, 0]));

    if placement.scaled_width == image.width() && placement.scaled_height == image.height() {
        imageops::replace(
            &mut out,
            image,
            placement.offset_x as i64,
            placement.offset_y as i64,
        );
    } else {
        let scaled = imageops::resize(
            image,
            placement.scaled_width,
            placement.scaled_height,
            FilterType::Lanczos3,
        );
        imageops::replace(
            &mut out,
            &scaled,
            placement.offset_x as i64,
            placement.offset_y as i64,
        );
    }
    out
}

/// Normalize a decoded frame to the canvas, keeping its duration.
pub fn normalize_frame(frame: Frame, canvas: Canvas) -> Frame {
    Frame {
        image: letterbox(&frame.image, canvas),
        duration: frame.duration,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MATRIX: Canvas = Canvas {
        width: 64,
        height: 32,
    };

    #[test]
    fn fit_placement_keeps_small_images_and_centers_them() {
        let p = fit_placement(20, 10, MATRIX);
        assert_eq!(
            p,
            Placement {
                scaled_width: 20,
                scaled_height: 10,
                offset_x: 22,
                offset_y: 11,
            }
        );
    }

    #[test]
    fn fit_placement_scales_wide_images_to_canvas_width() {
        let p = fit_placement(640, 160, MATRIX);
        assert_eq!(p.scaled_width, 64);
        assert_eq!(p.scaled_height, 16);
        assert_eq!(p.offset_x, 0);
        assert_eq!(p.offset_y, 8);
    }

    #[test]
    fn fit_placement_scales_tall_images_to_canvas_height() {
        let p = fit_placement(100, 400, MATRIX);
        assert_eq!(p.scaled_height, 32);
        assert_eq!(p.scaled_width, 8);
        assert_eq!(p.offset_x, 28);
        assert_eq!(p.offset_y, 0);
    }

    #[test]
    fn fit_placement_never_crops_large_images() {
        for (w, h) in [(65, 32), (64, 33), (1000, 999), (3, 500), (500, 3), (129, 64), (480, 270)] {
            let p = fit_placement(w, h, MATRIX);
            assert!(p.scaled_width <= MATRIX.width && p.scaled_height <= MATRIX.height);
            assert!(
                p.scaled_width == MATRIX.width || p.scaled_height == MATRIX.height,
                "{w}x{h} -> {p:?}"
            );
            assert_eq!(p.offset_x, (MATRIX.width - p.scaled_width) / 2);
            assert_eq!(p.offset_y, (MATRIX.height - p.scaled_height) / 2);
        }
    }

    #[test]
    fn letterbox_output_always_matches_canvas() {
        for (w, h) in [(1, 1), (10, 50), (64, 32), (200, 20), (33, 17)] {
            let src = RgbImage::from_pixel(w, h, Rgb([200, 100, 50]));
            let out = letterbox(&src, MATRIX);
            assert_eq!(out.dimensions(), (64, 32));
        }
    }

    #[test]
    fn letterbox_pads_with_black_around_centered_image() {
        let src = RgbImage::from_pixel(10, 10, Rgb([255, 255, 255]));
        let out = letterbox(&src, MATRIX);
        // x offset 27, y offset 11
        assert_eq!(out.get_pixel(26, 15), &Rgb([0, 0, 0]));
        assert_eq!(out.get_pixel(27, 11), &Rgb([255, 255, 255]));
        assert_eq!(out.get_pixel(36, 20), &Rgb([255, 255, 255]));
        assert_eq!(out.get_pixel(37, 15), &Rgb([0, 0, 0]));
        assert_eq!(out.get_pixel(30, 10), &Rgb([0, 0, 0]));
        assert_eq!(out.get_pixel(30, 21), &Rgb([0, 0, 0]));
    }

    #[test]
    fn normalize_frame_keeps_duration() {
        let frame = Frame {
            image: RgbImage::new(128, 128),
            duration: std::time::Duration::from_millis(40),
        };
        let out = normalize_frame(frame, MATRIX);
        assert_eq!(out.duration, std::time::Duration::from_millis(40));
        assert_eq!(out.image.dimensions(), (64, 32));
    }
}
