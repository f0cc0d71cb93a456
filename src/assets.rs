//! Default watermark images embedded in the binary.

/// Light watermark variant, white mark on a black background.
pub const WATERMARK_LIGHT_PNG: &[u8] = include_bytes!("../assets/watermark-light.png");

/// Dark watermark variant, dark gray mark on a black background.
pub const WATERMARK_DARK_PNG: &[u8] = include_bytes!("../assets/watermark-dark.png");
