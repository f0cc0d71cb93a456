//! Overlay a watermark onto batches of photos, picking the corner and
//! the light/dark mark variant that fit each photo best.
//!
//! For every photo the least visually busy corner is chosen (lowest
//! mean per-channel color standard deviation over the corner region),
//! then a light or dark watermark variant is picked by the corner's
//! mean brightness, and the mark is scaled, made semi-transparent, and
//! alpha blended into that corner. Originals are never modified.
//!
//! # Quick Start
//!
//! ```no_run
//! use corner_watermark::{ProcessOptions, WatermarkEngine};
//!
//! let engine = WatermarkEngine::new().expect("failed to init engine");
//! let mut img = image::open("photo.jpg").unwrap().to_rgb8();
//! let (corner, variant) = engine.apply(&mut img, &ProcessOptions::default()).unwrap();
//! println!("placed {variant} mark in {corner} corner");
//! img.save("photo_watermark.jpg").unwrap();
//! ```
//!
//! # Batch processing
//!
//! ```no_run
//! use std::path::Path;
//! use corner_watermark::{default_output_dir, ProcessOptions, WatermarkEngine};
//!
//! let engine = WatermarkEngine::new().expect("failed to init engine");
//! let input = Path::new("vacation-photos");
//! let results = engine.process_directory(input, &default_output_dir(input), &ProcessOptions::default());
//! for r in &results {
//!     println!("{}: {}", r.path.display(), r.message);
//! }
//! ```

#![deny(missing_docs)]

mod assets;
pub mod compositing;
mod engine;
pub mod error;
pub mod placement;
pub mod stats;

pub use engine::{
    default_output_dir, is_supported_photo, save_image, watermarked_output_path, ProcessOptions,
    ProcessResult, WatermarkEngine, OUTPUT_SUBDIR,
};
pub use error::{Error, Result};
pub use placement::{Footprint, Variant, DEFAULT_CUTOFF};
pub use stats::Corner;
