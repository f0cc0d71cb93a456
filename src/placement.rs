//! The watermark placement decision.
//!
//! Two picks are made per photo: which corner to use (the one with the
//! lowest mean per-channel color standard deviation, i.e. the least
//! visually busy), and which watermark variant to use (dark on bright
//! corners, light on dark corners).

use image::RgbImage;

use crate::error::{Error, Result};
use crate::stats::{channel_mean, channel_means, channel_stddevs, corner_region, Corner};

/// Brightness cutoff above which a corner counts as bright and gets
/// the dark watermark variant.
pub const DEFAULT_CUTOFF: u8 = 150;

/// The watermark variant to composite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// Light mark, for dark corners.
    Light,
    /// Dark mark, for bright corners.
    Dark,
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Variant::Light => "light",
            Variant::Dark => "dark",
        })
    }
}

/// Maximum watermark-to-image size ratios, validated to `[0.0, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Footprint {
    width_proportion: f32,
    height_proportion: f32,
}

impl Footprint {
    /// Create a footprint from width and height proportions.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if either proportion falls outside
    /// `[0.0, 1.0]`.
    pub fn new(width_proportion: f32, height_proportion: f32) -> Result<Self> {
        if !(0.0..=1.0).contains(&width_proportion) {
            return Err(Error::OutOfRange {
                name: "width_proportion",
                value: width_proportion,
            });
        }
        if !(0.0..=1.0).contains(&height_proportion) {
            return Err(Error::OutOfRange {
                name: "height_proportion",
                value: height_proportion,
            });
        }
        Ok(Self {
            width_proportion,
            height_proportion,
        })
    }

    /// Maximum watermark / image width ratio.
    #[must_use]
    pub fn width_proportion(&self) -> f32 {
        self.width_proportion
    }

    /// Maximum watermark / image height ratio.
    #[must_use]
    pub fn height_proportion(&self) -> f32 {
        self.height_proportion
    }
}

impl Default for Footprint {
    fn default() -> Self {
        Self {
            width_proportion: 0.15,
            height_proportion: 0.15,
        }
    }
}

/// Pick the least visually busy corner out of `corners`.
///
/// Each candidate corner's region (sized by `footprint`) is scored by
/// the mean of its three per-channel color standard deviations; the
/// corner with the lowest score wins. Ties resolve to the corner
/// listed first.
///
/// # Errors
///
/// Returns [`Error::NoCorners`] if `corners` is empty.
pub fn pick_corner(image: &RgbImage, corners: &[Corner], footprint: Footprint) -> Result<Corner> {
    let mut best: Option<(Corner, f32)> = None;
    for &corner in corners {
        let region = corner_region(
            image,
            corner,
            footprint.width_proportion,
            footprint.height_proportion,
        );
        let score = channel_mean(channel_stddevs(image, region));
        match best {
            Some((_, best_score)) if score >= best_score => {}
            _ => best = Some((corner, score)),
        }
    }
    best.map(|(corner, _)| corner).ok_or(Error::NoCorners)
}

/// Pick the watermark variant that contrasts best against `corner`.
///
/// The corner region's mean brightness (mean of the three channel
/// means) is compared against `cutoff`: brighter corners get the dark
/// mark, darker corners the light one.
#[must_use]
pub fn pick_variant(
    image: &RgbImage,
    corner: Corner,
    footprint: Footprint,
    cutoff: u8,
) -> Variant {
    let region = corner_region(
        image,
        corner,
        footprint.width_proportion,
        footprint.height_proportion,
    );
    let brightness = channel_mean(channel_means(image, region));
    if brightness > f32::from(cutoff) {
        Variant::Dark
    } else {
        Variant::Light
    }
}
