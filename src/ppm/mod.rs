//! Binary PPM (P6).
//!
//! An ASCII header (`P6`, width, height, maxval) followed by top-down RGB
//! rows with no padding. Encoding always writes maxval 255.

mod decode;
mod encode;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use enough::{Stop, Unstoppable};

use crate::codec::ImageCodec;
use crate::error::CodecError;
use crate::format::ImageFormat;
use crate::limits::Limits;
use crate::pixel::Image;

/// PPM load/save.
#[derive(Clone, Debug, Default)]
pub struct PpmCodec {
    limits: Option<Limits>,
}

impl PpmCodec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    pub fn decode(&self, data: &[u8], stop: impl Stop) -> Result<Image, CodecError> {
        decode::decode_ppm(data, self.limits.as_ref(), &stop)
    }

    pub fn encode(&self, image: &Image, stop: impl Stop) -> Result<Vec<u8>, CodecError> {
        encode::encode_ppm(image, &stop)
    }
}

impl ImageCodec for PpmCodec {
    fn format(&self) -> ImageFormat {
        ImageFormat::Ppm
    }

    fn load(&self, path: &Path) -> Result<Image, CodecError> {
        let data = std::fs::read(path)?;
        log::debug!("read {} bytes from {}", data.len(), path.display());
        self.decode(&data, Unstoppable)
    }

    fn save(&self, path: &Path, image: &Image) -> Result<(), CodecError> {
        // Reject before creating the file.
        if !image.is_valid() {
            return Err(CodecError::EmptyImage);
        }
        let mut out = BufWriter::new(File::create(path)?);
        let written = encode::write_ppm(&mut out, image, &Unstoppable)?;
        out.flush()?;
        log::debug!("wrote {written} bytes to {}", path.display());
        Ok(())
    }
}

/// Decode P6 bytes with default settings.
pub fn decode_ppm(data: &[u8], stop: impl Stop) -> Result<Image, CodecError> {
    PpmCodec::new().decode(data, stop)
}

/// Encode `image` as P6.
pub fn encode_ppm(image: &Image, stop: impl Stop) -> Result<Vec<u8>, CodecError> {
    PpmCodec::new().encode(image, stop)
}
