// SPDX-License-Identifier: GPL-3.0-only

//! Downsample-then-blur for the camera switch freeze-frame
//!
//! The captured frame is shrunk first (bilinear), then a stack blur runs on
//! the small image. The small result is what the overlay displays; it keeps
//! the source dimensions so the overlay can scale it back up.
//!
//! Stack blur weighs a pixel at distance `d` from the centre with
//! `radius + 1 - d`, which sums to `(radius + 1)^2` over the window. Edges
//! are clamped. Integer arithmetic keeps the output byte-identical across runs.

use crate::backends::camera::types::CameraFrame;
use crate::constants::transition;
use image::RgbaImage;
use image::imageops::{self, FilterType};
use std::sync::Arc;
use tracing::debug;

/// Blurred still shown on the overlay
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlurredFrame {
    /// Width of the blurred (downsampled) image
    pub width: u32,
    /// Height of the blurred (downsampled) image
    pub height: u32,
    /// Width of the frame it was derived from
    pub source_width: u32,
    /// Height of the frame it was derived from
    pub source_height: u32,
    /// Tightly packed RGBA pixels
    pub data: Arc<[u8]>,
}

impl BlurredFrame {
    /// 1x1 transparent frame used when there was nothing to blur
    pub fn blank() -> Self {
        Self {
            width: 1,
            height: 1,
            source_width: 0,
            source_height: 0,
            data: Arc::from(vec![0u8; 4]),
        }
    }

    pub fn to_rgba_image(&self) -> Option<RgbaImage> {
        RgbaImage::from_raw(self.width, self.height, self.data.to_vec())
    }
}

/// Blur with the fixed transition parameters (scale 0.25, radius 25)
pub fn transition_blur(frame: &CameraFrame) -> BlurredFrame {
    fast_blur(frame, transition::BLUR_SCALE, transition::BLUR_RADIUS)
}

/// Downsample `frame` by `scale`, then stack blur it with `radius`
///
/// Empty frames produce [`BlurredFrame::blank`]. A radius of 0 returns the
/// downsampled image unchanged; radii above 254 are clamped.
pub fn fast_blur(frame: &CameraFrame, scale: f32, radius: u32) -> BlurredFrame {
    let Some(source) = frame.to_rgba_image() else {
        debug!("Empty frame, substituting blank overlay");
        return BlurredFrame::blank();
    };

    let (source_width, source_height) = source.dimensions();
    let (width, height) = scaled_dimensions(source_width, source_height, scale);

    let mut small = if (width, height) == (source_width, source_height) {
        source
    } else {
        imageops::resize(&source, width, height, FilterType::Triangle)
    };

    let radius = radius.min(transition::MAX_BLUR_RADIUS);
    if radius > 0 {
        stack_blur_rgba(&mut small, radius as usize);
    }

    debug!(
        source_width,
        source_height, width, height, radius, "Blurred transition frame"
    );

    BlurredFrame {
        width,
        height,
        source_width,
        source_height,
        data: Arc::from(small.into_raw()),
    }
}

/// Output size for a downsample by `scale`, never below 1x1
pub fn scaled_dimensions(width: u32, height: u32, scale: f32) -> (u32, u32) {
    let scale = if scale.is_finite() && scale > 0.0 {
        scale.min(1.0)
    } else {
        1.0
    };
    let scaled = |v: u32| ((v as f32 * scale).round() as u32).max(1);
    (scaled(width), scaled(height))
}

/// Triangle weights for offsets `-radius..=radius`
fn stack_kernel(radius: usize) -> Vec<u32> {
    (0..=2 * radius)
        .map(|i| (radius + 1 - i.abs_diff(radius)) as u32)
        .collect()
}

/// In-place stack blur over all four channels
///
/// Radii above 254 are clamped so the accumulators stay within `u32`.
pub fn stack_blur_rgba(image: &mut RgbaImage, radius: usize) {
    let radius = radius.min(transition::MAX_BLUR_RADIUS as usize);
    let (width, height) = image.dimensions();
    let (width, height) = (width as usize, height as usize);
    if radius == 0 || width == 0 || height == 0 {
        return;
    }

    let kernel = stack_kernel(radius);
    let divisor = ((radius + 1) * (radius + 1)) as u32;
    let data: &mut [u8] = &mut **image;
    let mut temp = vec![0u8; data.len()];

    // Horizontal pass: data -> temp
    for y in 0..height {
        let row = y * width;
        for x in 0..width {
            let mut sum = [0u32; 4];
            for (k, &w) in kernel.iter().enumerate() {
                let sx = (x + k).saturating_sub(radius).min(width - 1);
                let px = (row + sx) * 4;
                for c in 0..4 {
                    sum[c] += data[px + c] as u32 * w;
                }
            }
            let out = (row + x) * 4;
            for c in 0..4 {
                temp[out + c] = (sum[c] / divisor) as u8;
            }
        }
    }

    // Vertical pass: temp -> data
    for y in 0..height {
        for x in 0..width {
            let mut sum = [0u32; 4];
            for (k, &w) in kernel.iter().enumerate() {
                let sy = (y + k).saturating_sub(radius).min(height - 1);
                let px = (sy * width + x) * 4;
                for c in 0..4 {
                    sum[c] += temp[px + c] as u32 * w;
                }
            }
            let out = (y * width + x) * 4;
            for c in 0..4 {
                data[out + c] = (sum[c] / divisor) as u8;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn checkerboard(size: u32) -> CameraFrame {
        let image = RgbaImage::from_fn(size, size, |x, y| {
            if (x + y) % 2 == 0 {
                Rgba([255, 255, 255, 255])
            } else {
                Rgba([0, 0, 0, 255])
            }
        });
        CameraFrame::from_rgba_image(image, None)
    }

    #[test]
    fn kernel_weights_sum_to_divisor() {
        for radius in [1usize, 2, 25] {
            let sum: u32 = stack_kernel(radius).iter().sum();
            assert_eq!(sum, ((radius + 1) * (radius + 1)) as u32);
        }
        assert_eq!(stack_kernel(2), vec![1, 2, 3, 2, 1]);
    }

    #[test]
    fn uniform_image_is_unchanged() {
        let mut image = RgbaImage::from_pixel(9, 7, Rgba([12, 200, 99, 255]));
        stack_blur_rgba(&mut image, 3);
        assert!(image.pixels().all(|p| *p == Rgba([12, 200, 99, 255])));
    }

    #[test]
    fn downsamples_by_quarter() {
        let frame = CameraFrame::from_rgba_image(RgbaImage::new(640, 480), None);
        let blurred = transition_blur(&frame);
        assert_eq!((blurred.width, blurred.height), (160, 120));
        assert_eq!((blurred.source_width, blurred.source_height), (640, 480));
        assert_eq!(blurred.data.len(), 160 * 120 * 4);
    }

    #[test]
    fn tiny_frames_keep_one_pixel() {
        assert_eq!(scaled_dimensions(2, 1, 0.25), (1, 1));
        assert_eq!(scaled_dimensions(100, 10, 1.5), (100, 10));
    }

    #[test]
    fn empty_frame_gives_blank() {
        assert_eq!(transition_blur(&CameraFrame::blank()), BlurredFrame::blank());
    }

    #[test]
    fn blur_smooths_checkerboard() {
        let frame = checkerboard(16);
        let blurred = fast_blur(&frame, 1.0, 2);
        let red: Vec<u8> = blurred.data.chunks(4).map(|p| p[0]).collect();
        let spread = red.iter().max().unwrap() - red.iter().min().unwrap();
        assert!(spread < 128, "spread {} too large", spread);
        assert!(blurred.data.chunks(4).all(|p| p[3] == 255));
    }

    #[test]
    fn huge_radius_is_clamped() {
        let mut image = RgbaImage::from_pixel(4, 4, Rgba([255, 255, 255, 255]));
        stack_blur_rgba(&mut image, 5000);
        assert!(image.pixels().all(|p| *p == Rgba([255, 255, 255, 255])));
    }

    #[test]
    fn zero_radius_only_downsamples() {
        let frame = checkerboard(8);
        let blurred = fast_blur(&frame, 1.0, 0);
        assert_eq!(&blurred.data[..], &frame.data[..]);
    }
}
