//! Uncompressed 24-bit BMP.
//!
//! Files are a 14-byte file header, a 40-byte info header, then rows stored
//! bottom-up as B, G, R triples, each row zero-padded to a multiple of four
//! bytes (see [`row_stride`]).

mod decode;
mod encode;
mod header;

pub use decode::{MAX_ZERO_FILL_BYTES, Permissiveness};
pub use header::{FileHeader, InfoHeader, row_stride};

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use enough::{Stop, Unstoppable};

use crate::codec::ImageCodec;
use crate::error::CodecError;
use crate::format::ImageFormat;
use crate::limits::Limits;
use crate::pixel::Image;

/// BMP load/save with configurable header validation and limits.
#[derive(Clone, Debug, Default)]
pub struct BmpCodec {
    permissiveness: Permissiveness,
    limits: Option<Limits>,
}

impl BmpCodec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_permissiveness(mut self, permissiveness: Permissiveness) -> Self {
        self.permissiveness = permissiveness;
        self
    }

    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    pub fn permissiveness(&self) -> Permissiveness {
        self.permissiveness
    }

    /// Decode BMP bytes (RGBA8 output, alpha 255).
    pub fn decode(&self, data: &[u8], stop: impl Stop) -> Result<Image, CodecError> {
        decode::decode_bmp(data, self.permissiveness, self.limits.as_ref(), &stop)
    }

    /// Encode to an in-memory BMP.
    pub fn encode(&self, image: &Image, stop: impl Stop) -> Result<Vec<u8>, CodecError> {
        encode::encode_bmp(image, &stop)
    }

    /// Stream a BMP into any writer. Returns the number of bytes written.
    pub fn write_to<W: Write>(
        &self,
        out: &mut W,
        image: &Image,
        stop: impl Stop,
    ) -> Result<u64, CodecError> {
        encode::write_bmp(out, image, &stop)
    }
}

impl ImageCodec for BmpCodec {
    fn format(&self) -> ImageFormat {
        ImageFormat::Bmp
    }

    fn load(&self, path: &Path) -> Result<Image, CodecError> {
        let data = std::fs::read(path)?;
        log::debug!("read {} bytes from {}", data.len(), path.display());
        self.decode(&data, Unstoppable)
    }

    fn save(&self, path: &Path, image: &Image) -> Result<(), CodecError> {
        let mut out = BufWriter::new(File::create(path)?);
        let written = self.write_to(&mut out, image, Unstoppable)?;
        out.flush()?;
        log::debug!("wrote {written} bytes to {}", path.display());
        Ok(())
    }
}

/// Parse the two header records without decoding pixels or validating them.
pub fn read_headers(data: &[u8]) -> Result<(FileHeader, InfoHeader), CodecError> {
    let (Some(file), Some(info)) = (
        data.first_chunk::<{ header::FILE_HEADER_SIZE }>(),
        data.get(header::FILE_HEADER_SIZE..)
            .and_then(|rest| rest.first_chunk::<{ header::INFO_HEADER_SIZE }>()),
    ) else {
        return Err(CodecError::UnexpectedEof);
    };
    Ok((FileHeader::from_bytes(file), InfoHeader::from_bytes(info)))
}

/// Decode BMP bytes with default settings.
pub fn decode_bmp(data: &[u8], stop: impl Stop) -> Result<Image, CodecError> {
    BmpCodec::new().decode(data, stop)
}

/// Encode `image` as a 24-bit BMP.
pub fn encode_bmp(image: &Image, stop: impl Stop) -> Result<Vec<u8>, CodecError> {
    BmpCodec::new().encode(image, stop)
}
