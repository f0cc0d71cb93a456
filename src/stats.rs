//! Color statistics over rectangular corner regions.
//!
//! The placement decision is driven by two numbers per corner: the mean
//! RGB color (how bright the corner is) and the per-channel standard
//! deviation (how visually busy it is). Both are computed over the
//! rectangle a watermark of the configured proportions would cover.

use image::RgbImage;

/// One of the four corners of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Corner {
    /// Top-left corner.
    UpperLeft,
    /// Top-right corner.
    UpperRight,
    /// Bottom-left corner.
    LowerLeft,
    /// Bottom-right corner.
    LowerRight,
}

impl Corner {
    /// All four corners, in evaluation order.
    pub const ALL: [Corner; 4] = [
        Corner::UpperLeft,
        Corner::UpperRight,
        Corner::LowerLeft,
        Corner::LowerRight,
    ];

    /// Top-left origin of a `region_w` x `region_h` rectangle anchored
    /// in this corner of a `img_w` x `img_h` image.
    ///
    /// Regions larger than the image are pinned to `(0, 0)` on the
    /// overflowing axis rather than wrapping.
    #[must_use]
    pub fn region_origin(self, img_w: u32, img_h: u32, region_w: u32, region_h: u32) -> (u32, u32) {
        let x = match self {
            Corner::UpperLeft | Corner::LowerLeft => 0,
            Corner::UpperRight | Corner::LowerRight => img_w.saturating_sub(region_w),
        };
        let y = match self {
            Corner::UpperLeft | Corner::UpperRight => 0,
            Corner::LowerLeft | Corner::LowerRight => img_h.saturating_sub(region_h),
        };
        (x, y)
    }
}

impl std::fmt::Display for Corner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Corner::UpperLeft => "upper left",
            Corner::UpperRight => "upper right",
            Corner::LowerLeft => "lower left",
            Corner::LowerRight => "lower right",
        };
        f.write_str(name)
    }
}

/// A rectangular sub-region of an image, in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    /// X coordinate of the region's top-left pixel.
    pub x: u32,
    /// Y coordinate of the region's top-left pixel.
    pub y: u32,
    /// Region width in pixels.
    pub width: u32,
    /// Region height in pixels.
    pub height: u32,
}

impl Region {
    /// Number of pixels covered by the region.
    #[must_use]
    pub fn pixel_count(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }
}

/// Compute the corner region covered by a watermark of the given
/// proportions.
///
/// The region spans `image_width * width_proportion` by
/// `image_height * height_proportion` pixels (truncated), anchored in
/// `corner`. Proportions outside `[0.0, 1.0]` are the caller's bug;
/// results are clamped to the image bounds regardless.
#[must_use]
pub fn corner_region(
    image: &RgbImage,
    corner: Corner,
    width_proportion: f32,
    height_proportion: f32,
) -> Region {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    #[allow(clippy::cast_precision_loss)]
    let (w, h) = (
        ((image.width() as f32 * width_proportion).max(0.0) as u32).min(image.width()),
        ((image.height() as f32 * height_proportion).max(0.0) as u32).min(image.height()),
    );
    let (x, y) = corner.region_origin(image.width(), image.height(), w, h);
    Region {
        x,
        y,
        width: w,
        height: h,
    }
}

/// Per-channel mean RGB color of a region.
///
/// An empty region yields `[0.0, 0.0, 0.0]`.
#[must_use]
pub fn channel_means(image: &RgbImage, region: Region) -> [f32; 3] {
    let count = region.pixel_count();
    if count == 0 {
        return [0.0; 3];
    }

    let mut sums = [0.0_f64; 3];
    for dy in 0..region.height {
        for dx in 0..region.width {
            let px = image.get_pixel(region.x + dx, region.y + dy);
            for ch in 0..3 {
                sums[ch] += f64::from(px[ch]);
            }
        }
    }

    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    let means = [
        (sums[0] / count as f64) as f32,
        (sums[1] / count as f64) as f32,
        (sums[2] / count as f64) as f32,
    ];
    means
}

/// Per-channel standard deviation of RGB colors in a region.
///
/// Computed as `sqrt(E[x^2] - mean^2)` in a single pass over the
/// pixels. An empty region yields `[0.0, 0.0, 0.0]`.
#[must_use]
pub fn channel_stddevs(image: &RgbImage, region: Region) -> [f32; 3] {
    let count = region.pixel_count();
    if count == 0 {
        return [0.0; 3];
    }

    let mut sums = [0.0_f64; 3];
    let mut sq_sums = [0.0_f64; 3];
    for dy in 0..region.height {
        for dx in 0..region.width {
            let px = image.get_pixel(region.x + dx, region.y + dy);
            for ch in 0..3 {
                let v = f64::from(px[ch]);
                sums[ch] += v;
                sq_sums[ch] += v * v;
            }
        }
    }

    let mut stddevs = [0.0_f32; 3];
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    for ch in 0..3 {
        let mean = sums[ch] / count as f64;
        let variance = (sq_sums[ch] / count as f64 - mean * mean).max(0.0);
        stddevs[ch] = variance.sqrt() as f32;
    }
    stddevs
}

/// Mean of a three-channel statistic, collapsing it to a single score.
#[must_use]
pub fn channel_mean(channels: [f32; 3]) -> f32 {
    (channels[0] + channels[1] + channels[2]) / 3.0
}
