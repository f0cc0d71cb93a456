//! Watermark compositing.
//!
//! The mark is scaled to fit inside its corner footprint, given a
//! uniform opacity (with the black background knocked out), and
//! forward alpha blended onto the photo:
//! `out = alpha * mark + (1 - alpha) * photo`.

use image::imageops::FilterType;
use image::{RgbImage, RgbaImage};

use crate::error::{Error, Result};
use crate::placement::Footprint;
use crate::stats::Corner;

/// Scale a `wm_w` x `wm_h` mark to fit within `max_w` x `max_h`,
/// preserving aspect ratio. Dimensions are clamped to at least 1x1.
#[must_use]
pub fn fitted_size(wm_w: u32, wm_h: u32, max_w: u32, max_h: u32) -> (u32, u32) {
    #[allow(clippy::cast_precision_loss)]
    let scale = (max_w as f32 / wm_w.max(1) as f32).min(max_h as f32 / wm_h.max(1) as f32);
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    #[allow(clippy::cast_precision_loss)]
    let (w, h) = (
        ((wm_w as f32 * scale) as u32).max(1),
        ((wm_h as f32 * scale) as u32).max(1),
    );
    (w, h)
}

/// Resize the mark to the target size and apply opacity.
///
/// Every pixel gets a uniform alpha of `opacity * 255`, except pure
/// black pixels (`R=G=B=0`) which become fully transparent: the mark's
/// blank background is black and must not dim the photo beneath it.
#[must_use]
pub fn prepare_watermark(
    watermark: &RgbaImage,
    target_w: u32,
    target_h: u32,
    opacity: f32,
) -> RgbaImage {
    let mut scaled =
        image::imageops::resize(watermark, target_w, target_h, FilterType::Nearest);

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let alpha = (255.0 * opacity.clamp(0.0, 1.0)) as u8;
    for px in scaled.pixels_mut() {
        px[3] = if px[0] == 0 && px[1] == 0 && px[2] == 0 {
            0
        } else {
            alpha
        };
    }
    scaled
}

/// Blend a prepared mark onto the photo at the given position.
///
/// Operates in place, clipped to image bounds. Fully transparent mark
/// pixels leave the photo untouched.
pub fn overlay(image: &mut RgbImage, mark: &RgbaImage, pos_x: u32, pos_y: u32) {
    let img_w = image.width();
    let img_h = image.height();

    // Clip to image bounds
    let x2 = (pos_x + mark.width()).min(img_w);
    let y2 = (pos_y + mark.height()).min(img_h);
    if pos_x >= x2 || pos_y >= y2 {
        return;
    }

    for dy in 0..(y2 - pos_y) {
        for dx in 0..(x2 - pos_x) {
            let src = mark.get_pixel(dx, dy);
            if src[3] == 0 {
                continue;
            }

            let alpha = f32::from(src[3]) / 255.0;
            let inv_alpha = 1.0 - alpha;

            let px = image.get_pixel_mut(pos_x + dx, pos_y + dy);
            for ch in 0..3 {
                let blended = alpha * f32::from(src[ch]) + inv_alpha * f32::from(px[ch]);
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                {
                    px[ch] = blended.clamp(0.0, 255.0) as u8;
                }
            }
        }
    }
}

/// Composite a watermark into the given corner of a photo, in place.
///
/// The mark is scaled to fit the corner's footprint, made
/// semi-transparent per `opacity`, anchored flush into `corner`, and
/// alpha blended onto the photo.
///
/// # Errors
///
/// Returns [`Error::OutOfRange`] if `opacity` falls outside `[0.0, 1.0]`.
pub fn composite_watermark(
    image: &mut RgbImage,
    watermark: &RgbaImage,
    corner: Corner,
    footprint: Footprint,
    opacity: f32,
) -> Result<()> {
    if !(0.0..=1.0).contains(&opacity) {
        return Err(Error::OutOfRange {
            name: "opacity",
            value: opacity,
        });
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    #[allow(clippy::cast_precision_loss)]
    let (max_w, max_h) = (
        (image.width() as f32 * footprint.width_proportion()) as u32,
        (image.height() as f32 * footprint.height_proportion()) as u32,
    );
    let (target_w, target_h) = fitted_size(watermark.width(), watermark.height(), max_w, max_h);

    let prepared = prepare_watermark(watermark, target_w, target_h, opacity);
    let (pos_x, pos_y) =
        corner.region_origin(image.width(), image.height(), target_w, target_h);
    overlay(image, &prepared, pos_x, pos_y);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, Rgba};

    fn solid_mark(w: u32, h: u32, color: [u8; 3]) -> RgbaImage {
        RgbaImage::from_pixel(w, h, Rgba([color[0], color[1], color[2], 255]))
    }

    #[test]
    fn fitted_size_limited_by_width() {
        // 2:1 mark into a square box: width is the binding constraint.
        let (w, h) = fitted_size(200, 100, 50, 50);
        assert_eq!((w, h), (50, 25));
    }

    #[test]
    fn fitted_size_limited_by_height() {
        let (w, h) = fitted_size(100, 200, 50, 50);
        assert_eq!((w, h), (25, 50));
    }

    #[test]
    fn fitted_size_never_collapses_to_zero() {
        let (w, h) = fitted_size(200, 100, 0, 0);
        assert!(w >= 1 && h >= 1);
    }

    #[test]
    fn prepare_watermark_sets_uniform_alpha() {
        let mark = solid_mark(10, 10, [200, 200, 200]);
        let prepared = prepare_watermark(&mark, 10, 10, 0.5);
        for px in prepared.pixels() {
            assert_eq!(px[3], 127);
        }
    }

    #[test]
    fn prepare_watermark_knocks_out_black_background() {
        let mut mark = solid_mark(10, 10, [255, 255, 255]);
        mark.put_pixel(3, 3, Rgba([0, 0, 0, 255]));
        let prepared = prepare_watermark(&mark, 10, 10, 1.0);
        assert_eq!(prepared.get_pixel(3, 3)[3], 0);
        assert_eq!(prepared.get_pixel(0, 0)[3], 255);
    }

    #[test]
    fn overlay_blends_at_half_opacity() {
        let mut img = RgbImage::from_pixel(20, 20, Rgb([0, 0, 0]));
        let mark = prepare_watermark(&solid_mark(4, 4, [255, 255, 255]), 4, 4, 0.5);
        overlay(&mut img, &mark, 0, 0);

        let blended = img.get_pixel(0, 0);
        // alpha 127/255 over black, allow one step of float truncation
        assert!((126..=127).contains(&blended[0]), "got {}", blended[0]);
        // Outside the mark the photo is untouched.
        assert_eq!(img.get_pixel(10, 10)[0], 0);
    }

    #[test]
    fn overlay_clips_to_image_bounds() {
        let mut img = RgbImage::from_pixel(10, 10, Rgb([0, 0, 0]));
        let mark = prepare_watermark(&solid_mark(8, 8, [255, 255, 255]), 8, 8, 1.0);
        // Anchored so most of the mark hangs off the edge.
        overlay(&mut img, &mark, 6, 6);
        assert_eq!(img.get_pixel(9, 9)[0], 255);
        assert_eq!(img.get_pixel(5, 5)[0], 0);
    }

    #[test]
    fn composite_rejects_out_of_range_opacity() {
        let mut img = RgbImage::new(100, 100);
        let mark = solid_mark(10, 10, [255, 255, 255]);
        let err = composite_watermark(
            &mut img,
            &mark,
            Corner::UpperLeft,
            Footprint::default(),
            1.5,
        );
        assert!(err.is_err());
    }

    #[test]
    fn composite_places_mark_flush_in_lower_right() {
        let mut img = RgbImage::from_pixel(100, 100, Rgb([10, 10, 10]));
        let mark = solid_mark(10, 10, [255, 255, 255]);
        composite_watermark(
            &mut img,
            &mark,
            Corner::LowerRight,
            Footprint::new(0.2, 0.2).unwrap(),
            1.0,
        )
        .unwrap();

        // Mark scales to 20x20, anchored at (80, 80).
        assert_eq!(img.get_pixel(99, 99)[0], 255);
        assert_eq!(img.get_pixel(80, 80)[0], 255);
        assert_eq!(img.get_pixel(79, 79)[0], 10);
        assert_eq!(img.get_pixel(0, 0)[0], 10);
    }

    #[test]
    fn composite_at_zero_opacity_leaves_photo_unchanged() {
        let mut img = RgbImage::from_pixel(50, 50, Rgb([42, 42, 42]));
        let before = img.clone();
        let mark = solid_mark(10, 10, [255, 255, 255]);
        composite_watermark(
            &mut img,
            &mark,
            Corner::UpperRight,
            Footprint::default(),
            0.0,
        )
        .unwrap();
        assert_eq!(img, before);
    }
}
