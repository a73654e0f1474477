use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{GenericImageView, ImageReader};

/// Longest edge of an encoded frame, in pixels.
pub const MAX_EDGE: u32 = 768;

/// JPEG quality for encoded frames.
pub const JPEG_QUALITY: u8 = 75;

/// Re-encode arbitrary image bytes as a bounded JPEG.
///
/// Frames larger than [`MAX_EDGE`] on either side are scaled down to fit,
/// preserving aspect ratio. Invalid image data is a real error and
/// propagates.
pub fn bound_jpeg(data: &[u8]) -> anyhow::Result<Vec<u8>> {
    let img = ImageReader::new(Cursor::new(data))
        .with_guessed_format()?
        .decode()?;
    let (width, height) = img.dimensions();
    let img = if width > MAX_EDGE || height > MAX_EDGE {
        img.resize(MAX_EDGE, MAX_EDGE, FilterType::Triangle)
    } else {
        img
    };
    let mut out = Vec::new();
    img.write_with_encoder(JpegEncoder::new_with_quality(&mut out, JPEG_QUALITY))?;
    tracing::trace!(bytes = out.len(), "frame encoded");
    Ok(out)
}
