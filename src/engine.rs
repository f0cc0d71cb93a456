//! Batch watermarking engine.

use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageFormat, RgbImage, RgbaImage};
use log::{info, warn};

use crate::assets;
use crate::compositing;
use crate::error::{Error, Result};
use crate::placement::{self, Footprint, Variant, DEFAULT_CUTOFF};
use crate::stats::Corner;

/// Name of the output subdirectory created inside the input folder
/// when no explicit output directory is given.
pub const OUTPUT_SUBDIR: &str = "with-watermark";

/// Options controlling watermark placement and appearance.
#[derive(Debug, Clone)]
pub struct ProcessOptions {
    /// Maximum watermark / image width ratio (0.0-1.0).
    pub width_proportion: f32,
    /// Maximum watermark / image height ratio (0.0-1.0).
    pub height_proportion: f32,
    /// Watermark opacity (0.0 transparent, 1.0 opaque).
    pub opacity: f32,
    /// Corner brightness above which the dark variant is used.
    pub cutoff_color: u8,
    /// Candidate corners to choose from.
    pub corners: Vec<Corner>,
}

impl Default for ProcessOptions {
    fn default() -> Self {
        Self {
            width_proportion: 0.15,
            height_proportion: 0.15,
            opacity: 0.5,
            cutoff_color: DEFAULT_CUTOFF,
            corners: Corner::ALL.to_vec(),
        }
    }
}

impl ProcessOptions {
    /// Validate proportions, opacity, and the corner list.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] for values outside `[0.0, 1.0]`
    /// and [`Error::NoCorners`] for an empty corner list.
    pub fn validate(&self) -> Result<Footprint> {
        let footprint = Footprint::new(self.width_proportion, self.height_proportion)?;
        if !(0.0..=1.0).contains(&self.opacity) {
            return Err(Error::OutOfRange {
                name: "opacity",
                value: self.opacity,
            });
        }
        if self.corners.is_empty() {
            return Err(Error::NoCorners);
        }
        Ok(footprint)
    }
}

/// Result of processing a single photo.
#[derive(Debug)]
pub struct ProcessResult {
    /// Path of the processed file.
    pub path: PathBuf,
    /// Whether processing succeeded.
    pub success: bool,
    /// Whether the file was skipped (unsupported format).
    pub skipped: bool,
    /// The corner the mark was placed in, when processed.
    pub corner: Option<Corner>,
    /// The watermark variant used, when processed.
    pub variant: Option<Variant>,
    /// Human-readable status message.
    pub message: String,
}

impl ProcessResult {
    fn pending(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            success: false,
            skipped: false,
            corner: None,
            variant: None,
            message: String::new(),
        }
    }
}

/// The watermarking engine holding the decoded light and dark marks.
///
/// Create once with [`WatermarkEngine::new()`] (embedded defaults) or
/// [`WatermarkEngine::with_watermarks()`] (custom PNG files) and reuse
/// across photos.
pub struct WatermarkEngine {
    light: RgbaImage,
    dark: RgbaImage,
}

impl WatermarkEngine {
    /// Create an engine from the embedded default watermarks.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmbeddedWatermarkDecode`] if the embedded PNGs
    /// cannot be decoded (corrupted binary).
    pub fn new() -> Result<Self> {
        let light = image::load_from_memory(assets::WATERMARK_LIGHT_PNG)
            .map_err(Error::EmbeddedWatermarkDecode)?
            .to_rgba8();
        let dark = image::load_from_memory(assets::WATERMARK_DARK_PNG)
            .map_err(Error::EmbeddedWatermarkDecode)?
            .to_rgba8();
        Ok(Self { light, dark })
    }

    /// Create an engine from user-supplied watermark files.
    ///
    /// Both files must exist and carry a `.png` extension.
    ///
    /// # Errors
    ///
    /// Returns [`Error::WatermarkNotFound`] or
    /// [`Error::UnsupportedWatermarkFormat`] for invalid paths, and
    /// [`Error::Image`] if a file fails to decode.
    pub fn with_watermarks(light_path: &Path, dark_path: &Path) -> Result<Self> {
        let light = load_watermark(light_path)?;
        let dark = load_watermark(dark_path)?;
        Ok(Self { light, dark })
    }

    /// The mark image for a given variant.
    #[must_use]
    pub fn watermark(&self, variant: Variant) -> &RgbaImage {
        match variant {
            Variant::Light => &self.light,
            Variant::Dark => &self.dark,
        }
    }

    /// Pick a corner and variant, then composite the mark onto the
    /// photo in place. Returns the placement that was used.
    ///
    /// # Errors
    ///
    /// Returns an error if `opts` fail validation.
    pub fn apply(&self, image: &mut RgbImage, opts: &ProcessOptions) -> Result<(Corner, Variant)> {
        let footprint = opts.validate()?;
        let corner = placement::pick_corner(image, &opts.corners, footprint)?;
        let variant = placement::pick_variant(image, corner, footprint, opts.cutoff_color);
        compositing::composite_watermark(
            image,
            self.watermark(variant),
            corner,
            footprint,
            opts.opacity,
        )?;
        Ok((corner, variant))
    }

    /// Process a single photo file: load, place, composite, save.
    ///
    /// The original file is never modified. Returns a
    /// [`ProcessResult`] indicating success, skip, or failure.
    #[must_use]
    pub fn process_file(&self, input: &Path, output: &Path, opts: &ProcessOptions) -> ProcessResult {
        let mut result = ProcessResult::pending(input);

        if !is_supported_photo(input) {
            result.skipped = true;
            result.success = true;
            result.message = "Unsupported file format (supported: .jpg, .jpeg)".to_string();
            return result;
        }

        let dyn_img = match image::open(input) {
            Ok(img) => img,
            Err(e) => {
                result.message = format!("Failed to load: {e}");
                return result;
            }
        };
        let mut rgb_img = dyn_img.to_rgb8();

        let (corner, variant) = match self.apply(&mut rgb_img, opts) {
            Ok(placement) => placement,
            Err(e) => {
                result.message = format!("Failed to place watermark: {e}");
                return result;
            }
        };
        result.corner = Some(corner);
        result.variant = Some(variant);

        if let Some(parent) = output.parent() {
            if !parent.exists() {
                if let Err(e) = std::fs::create_dir_all(parent) {
                    result.message = format!("Failed to create output directory: {e}");
                    return result;
                }
            }
        }

        match save_image(&rgb_img, output) {
            Ok(()) => {
                result.success = true;
                result.message = format!("Added {variant} watermark in {corner} corner");
            }
            Err(e) => {
                result.message = format!("Failed to save: {e}");
            }
        }

        result
    }

    /// Process all supported photos in a directory, sequentially.
    ///
    /// Creates `output_dir` if missing and writes each result as
    /// `{stem}_watermark.{ext}`. Unsupported files are reported as
    /// skipped. Returns a [`ProcessResult`] per regular file found.
    #[must_use]
    pub fn process_directory(
        &self,
        input_dir: &Path,
        output_dir: &Path,
        opts: &ProcessOptions,
    ) -> Vec<ProcessResult> {
        let entries: Vec<_> = match std::fs::read_dir(input_dir) {
            Ok(rd) => rd
                .filter_map(std::result::Result::ok)
                .filter(|e| e.file_type().map(|ft| ft.is_file()).unwrap_or(false))
                .collect(),
            Err(e) => {
                return vec![ProcessResult {
                    message: format!("Failed to read directory: {e}"),
                    ..ProcessResult::pending(input_dir)
                }];
            }
        };

        if !output_dir.exists() {
            if let Err(e) = std::fs::create_dir_all(output_dir) {
                return vec![ProcessResult {
                    message: format!("Failed to create output directory: {e}"),
                    ..ProcessResult::pending(output_dir)
                }];
            }
            info!("created {}", output_dir.display());
        }
        info!("watermarked photos will be saved to {}", output_dir.display());

        entries
            .iter()
            .map(|entry| {
                let input_path = entry.path();
                let output_path = watermarked_output_path(&input_path, output_dir);
                let result = self.process_file(&input_path, &output_path, opts);
                if result.skipped {
                    warn!("skipping {}: {}", input_path.display(), result.message);
                } else if result.success {
                    info!("{}: {}", input_path.display(), result.message);
                }
                result
            })
            .collect()
    }
}

fn load_watermark(path: &Path) -> Result<RgbaImage> {
    if !path.exists() {
        return Err(Error::WatermarkNotFound(path.to_path_buf()));
    }
    let is_png = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));
    if !is_png {
        return Err(Error::UnsupportedWatermarkFormat {
            path: path.to_path_buf(),
        });
    }
    Ok(image::open(path)?.to_rgba8())
}

/// Check if a file has a supported photo extension.
#[must_use]
pub fn is_supported_photo(path: &Path) -> bool {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => matches!(ext.to_lowercase().as_str(), "jpg" | "jpeg"),
        None => false,
    }
}

/// Save a photo with format-specific quality settings.
///
/// # Errors
///
/// Returns an error if the format is unsupported or writing fails.
pub fn save_image(img: &RgbImage, path: &Path) -> Result<()> {
    let format =
        ImageFormat::from_path(path).map_err(|e| Error::UnsupportedFormat(e.to_string()))?;

    match format {
        ImageFormat::Jpeg => {
            let file = std::fs::File::create(path)?;
            let mut encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(file, 100);
            encoder.encode_image(&DynamicImage::ImageRgb8(img.clone()))?;
        }
        ImageFormat::Png => {
            img.save(path)?;
        }
        _ => {
            return Err(Error::UnsupportedFormat(format!("{format:?}")));
        }
    }

    Ok(())
}

/// Output path for a photo: `{stem}_watermark.{ext}` inside `output_dir`.
#[must_use]
pub fn watermarked_output_path(input: &Path, output_dir: &Path) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    let ext = input.extension().unwrap_or_default().to_string_lossy();
    output_dir.join(format!("{stem}_watermark.{ext}"))
}

/// Default output directory: a `with-watermark` subdirectory of the
/// input folder.
#[must_use]
pub fn default_output_dir(input_dir: &Path) -> PathBuf {
    input_dir.join(OUTPUT_SUBDIR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_initializes_from_embedded_defaults() {
        let engine = WatermarkEngine::new().unwrap();
        assert!(engine.watermark(Variant::Light).width() > 0);
        assert!(engine.watermark(Variant::Dark).width() > 0);
    }

    #[test]
    fn options_validation_catches_bad_values() {
        let mut opts = ProcessOptions::default();
        assert!(opts.validate().is_ok());

        opts.opacity = 1.5;
        assert!(opts.validate().is_err());

        opts.opacity = 0.5;
        opts.width_proportion = -0.2;
        assert!(opts.validate().is_err());

        opts.width_proportion = 0.15;
        opts.corners.clear();
        assert!(matches!(opts.validate(), Err(Error::NoCorners)));
    }

    #[test]
    fn watermarked_output_path_appends_suffix() {
        let p = watermarked_output_path(Path::new("/photos/trip.jpg"), Path::new("/photos/out"));
        assert_eq!(p, PathBuf::from("/photos/out/trip_watermark.jpg"));
    }

    #[test]
    fn default_output_dir_is_subdirectory() {
        let d = default_output_dir(Path::new("/photos"));
        assert_eq!(d, PathBuf::from("/photos/with-watermark"));
    }

    #[test]
    fn is_supported_photo_accepts_jpeg_only() {
        assert!(is_supported_photo(Path::new("a.jpg")));
        assert!(is_supported_photo(Path::new("a.JPEG")));
        assert!(!is_supported_photo(Path::new("a.png")));
        assert!(!is_supported_photo(Path::new("a.gif")));
        assert!(!is_supported_photo(Path::new("a")));
    }

    #[test]
    fn load_watermark_rejects_missing_file() {
        let err = load_watermark(Path::new("/nonexistent/mark.png")).unwrap_err();
        assert!(matches!(err, Error::WatermarkNotFound(_)));
    }

    #[test]
    fn load_watermark_rejects_non_png_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mark.jpg");
        std::fs::write(&path, b"not an image").unwrap();
        let err = load_watermark(&path).unwrap_err();
        assert!(matches!(err, Error::UnsupportedWatermarkFormat { .. }));
    }

    #[test]
    fn process_file_skips_unsupported_format() {
        let engine = WatermarkEngine::new().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("notes.txt");
        std::fs::write(&input, b"hello").unwrap();

        let result = engine.process_file(
            &input,
            &dir.path().join("notes_watermark.txt"),
            &ProcessOptions::default(),
        );
        assert!(result.skipped);
        assert!(result.success);
        assert!(result.corner.is_none());
    }

    #[test]
    fn apply_reports_placement() {
        let engine = WatermarkEngine::new().unwrap();
        // Bright flat lower-right quadrant: expect lower-right + dark mark.
        let mut img = RgbImage::new(200, 200);
        for (x, y, px) in img.enumerate_pixels_mut() {
            if x >= 100 && y >= 100 {
                *px = image::Rgb([220, 220, 220]);
            } else {
                let v = if (x + y) % 2 == 0 { 0 } else { 255 };
                *px = image::Rgb([v, v, v]);
            }
        }

        let (corner, variant) = engine.apply(&mut img, &ProcessOptions::default()).unwrap();
        assert_eq!(corner, Corner::LowerRight);
        assert_eq!(variant, Variant::Dark);
    }
}
