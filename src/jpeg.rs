//! JPEG via the `image` crate's baseline codec.
//!
//! Decoding converts every input (grayscale, CMYK, ...) to RGB; alpha is
//! set to 255. Encoding drops alpha.

use std::fs::File;
use std::io::{BufWriter, Cursor, Write};
use std::path::Path;

use image::codecs::jpeg::{JpegDecoder, JpegEncoder};
use image::{DynamicImage, ExtendedColorType, ImageDecoder};
use rgb::RGBA8;

use crate::codec::ImageCodec;
use crate::error::CodecError;
use crate::format::ImageFormat;
use crate::limits::Limits;
use crate::pixel::Image;

/// Quality used when none is configured (the libjpeg default).
pub const DEFAULT_QUALITY: u8 = 75;

/// JPEG load/save.
#[derive(Clone, Debug)]
pub struct JpegCodec {
    quality: u8,
    limits: Option<Limits>,
}

impl Default for JpegCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl JpegCodec {
    pub fn new() -> Self {
        Self {
            quality: DEFAULT_QUALITY,
            limits: None,
        }
    }

    /// Encoder quality, clamped to 1..=100.
    pub fn with_quality(mut self, quality: u8) -> Self {
        self.quality = quality.clamp(1, 100);
        self
    }

    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    pub fn quality(&self) -> u8 {
        self.quality
    }

    pub fn decode(&self, data: &[u8]) -> Result<Image, CodecError> {
        let decoder = JpegDecoder::new(Cursor::new(data))?;
        let (width, height) = decoder.dimensions();
        log::debug!("JPEG {width}x{height}, {:?}", decoder.color_type());
        if let Some(limits) = &self.limits {
            limits.check_image(width, height)?;
        }

        let rgb = DynamicImage::from_decoder(decoder)?.into_rgb8();
        let pixels = rgb
            .as_raw()
            .chunks_exact(3)
            .map(|c| RGBA8::new(c[0], c[1], c[2], 255))
            .collect();
        Image::from_pixels(width, height, pixels)
    }

    /// Stream a JPEG into any writer.
    pub fn write_to<W: Write>(&self, out: &mut W, image: &Image) -> Result<(), CodecError> {
        if !image.is_valid() {
            return Err(CodecError::EmptyImage);
        }
        let mut rgb = Vec::with_capacity(image.pixels().len() * 3);
        for px in image.pixels() {
            rgb.extend_from_slice(&[px.r, px.g, px.b]);
        }
        JpegEncoder::new_with_quality(out, self.quality).encode(
            &rgb,
            image.width(),
            image.height(),
            ExtendedColorType::Rgb8,
        )?;
        Ok(())
    }

    pub fn encode(&self, image: &Image) -> Result<Vec<u8>, CodecError> {
        let mut out = Vec::new();
        self.write_to(&mut out, image)?;
        Ok(out)
    }
}

impl ImageCodec for JpegCodec {
    fn format(&self) -> ImageFormat {
        ImageFormat::Jpeg
    }

    fn load(&self, path: &Path) -> Result<Image, CodecError> {
        let data = std::fs::read(path)?;
        log::debug!("read {} bytes from {}", data.len(), path.display());
        self.decode(&data)
    }

    fn save(&self, path: &Path, image: &Image) -> Result<(), CodecError> {
        if !image.is_valid() {
            return Err(CodecError::EmptyImage);
        }
        let mut out = BufWriter::new(File::create(path)?);
        self.write_to(&mut out, image)?;
        out.flush()?;
        log::debug!("wrote JPEG (quality {}) to {}", self.quality, path.display());
        Ok(())
    }
}
