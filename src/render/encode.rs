//! Image encoding for frames and atlases.

use std::io::Cursor;

use image::buffer::ConvertBuffer;
use image::codecs::jpeg::JpegEncoder;
use image::{ColorType, ImageFormat, RgbImage};

use super::rasterize::FrameBuffer;
use crate::error::{IsothermError, Result};

/// JPEG quality used for atlases (0.92 on a 0..1 scale)
pub const ATLAS_JPEG_QUALITY: u8 = 92;

/// Output format for encoded imagery
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    Jpeg,
}

impl OutputFormat {
    /// Parse `png`, `jpeg` or `jpg`
    pub fn parse(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "png" => Ok(OutputFormat::Png),
            "jpeg" | "jpg" => Ok(OutputFormat::Jpeg),
            other => Err(IsothermError::invalid_parameter(
                "format",
                format!("Format must be 'png' or 'jpeg', got '{}'", other),
            )),
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            OutputFormat::Png => "image/png",
            OutputFormat::Jpeg => "image/jpeg",
        }
    }
}

/// Lossless PNG encoding
pub fn encode_png(frame: &FrameBuffer) -> Result<Vec<u8>> {
    let mut buffer = Cursor::new(Vec::new());
    frame
        .write_to(&mut buffer, ImageFormat::Png)
        .map_err(|e| IsothermError::Encoding {
            message: format!("Failed to encode PNG: {}", e),
        })?;
    Ok(buffer.into_inner())
}

/// Lossy JPEG encoding. Alpha is dropped; frames are always opaque.
pub fn encode_jpeg(frame: &FrameBuffer, quality: u8) -> Result<Vec<u8>> {
    let rgb: RgbImage = frame.convert();
    let mut bytes = Vec::new();
    JpegEncoder::new_with_quality(&mut bytes, quality)
        .encode(rgb.as_raw(), rgb.width(), rgb.height(), ColorType::Rgb8)
        .map_err(|e| IsothermError::Encoding {
            message: format!("Failed to encode JPEG: {}", e),
        })?;
    Ok(bytes)
}

/// Encode in the requested format; JPEG uses [`ATLAS_JPEG_QUALITY`].
pub fn encode(frame: &FrameBuffer, format: OutputFormat) -> Result<Vec<u8>> {
    match format {
        OutputFormat::Png => encode_png(frame),
        OutputFormat::Jpeg => encode_jpeg(frame, ATLAS_JPEG_QUALITY),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_output_format() {
        assert_eq!(OutputFormat::parse("PNG").unwrap(), OutputFormat::Png);
        assert_eq!(OutputFormat::parse("jpg").unwrap(), OutputFormat::Jpeg);
        assert!(OutputFormat::parse("gif").is_err());
        assert_eq!(OutputFormat::Jpeg.content_type(), "image/jpeg");
    }

    #[test]
    fn test_encodings_decode() {
        let frame = FrameBuffer::from_pixel(32, 16, Rgba([200, 40, 10, 255]));

        let png = encode_png(&frame).unwrap();
        assert_eq!(image::guess_format(&png).unwrap(), ImageFormat::Png);
        let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
        assert_eq!(decoded, frame);

        let jpeg = encode_jpeg(&frame, ATLAS_JPEG_QUALITY).unwrap();
        assert_eq!(image::guess_format(&jpeg).unwrap(), ImageFormat::Jpeg);
        let decoded = image::load_from_memory(&jpeg).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (32, 16));
    }
}
