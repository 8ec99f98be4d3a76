//! BMP decoder for uncompressed 24-bit bottom-up bitmaps.

use enough::Stop;
use rgb::RGBA8;

use super::header::{
    FILE_HEADER_SIZE, FileHeader, INFO_HEADER_SIZE, InfoHeader, PIXEL_DATA_OFFSET, row_stride,
};
use crate::error::CodecError;
use crate::limits::Limits;
use crate::pixel::Image;

// ── Permissiveness ──────────────────────────────────────────────────

/// Controls how strictly the BMP decoder validates input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Permissiveness {
    /// Reject files whose header fields disagree with the file, even harmlessly.
    /// On top of `Standard`: planes == 1, info header size == 40, pixel data
    /// at offset 54, and file size / image size fields matching the data.
    Strict,

    /// Default behavior. Requires the "BM" signature, an info header of at
    /// least 40 bytes, 24 bits per pixel, no compression, positive
    /// dimensions, and enough bytes for every row. Honors the declared pixel
    /// data offset.
    #[default]
    Standard,

    /// Trust the headers. No signature, size, depth, or compression checks;
    /// pixel data is read from offset 54 whatever the header says; a
    /// negative height is taken by magnitude; rows past end of file decode
    /// as black, up to [`MAX_ZERO_FILL_BYTES`] of missing pixel data.
    Permissive,
}

/// Most missing pixel data `Permissive` will zero-fill. Headers claiming
/// more than this beyond the end of the file are rejected as truncated.
pub const MAX_ZERO_FILL_BYTES: usize = 64 << 20;

// ── Cursor for reading from &[u8] ───────────────────────────────────

struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
    /// When true, reads beyond EOF return zeros instead of errors.
    permissive: bool,
    /// Set once a permissive read ran past EOF.
    truncated: bool,
}

impl<'a> Cursor<'a> {
    fn new(data: &'a [u8], permissive: bool) -> Self {
        Self {
            data,
            pos: 0,
            permissive,
            truncated: false,
        }
    }

    fn set_position(&mut self, pos: usize) -> Result<(), CodecError> {
        if pos > self.data.len() {
            if self.permissive {
                self.pos = self.data.len();
                self.truncated = true;
                return Ok(());
            }
            return Err(CodecError::UnexpectedEof);
        }
        self.pos = pos;
        Ok(())
    }

    fn read_fixed_bytes<const N: usize>(&mut self) -> Result<[u8; N], CodecError> {
        let mut buf = [0u8; N];
        self.read_exact_bytes(&mut buf)?;
        Ok(buf)
    }

    fn read_exact_bytes(&mut self, buf: &mut [u8]) -> Result<(), CodecError> {
        let n = buf.len();
        let available = self.data.len().saturating_sub(self.pos);
        if n > available {
            if self.permissive {
                buf[..available].copy_from_slice(&self.data[self.pos..]);
                buf[available..].fill(0);
                self.pos = self.data.len();
                self.truncated = true;
                return Ok(());
            }
            return Err(CodecError::UnexpectedEof);
        }
        buf.copy_from_slice(&self.data[self.pos..self.pos + n]);
        self.pos += n;
        Ok(())
    }
}

// ── Header validation ───────────────────────────────────────────────

/// Validated header fields needed for pixel decoding.
#[derive(Debug, Clone, Copy)]
pub(crate) struct BmpLayout {
    pub width: u32,
    pub height: u32,
    pub stride: usize,
    pub data_offset: usize,
}

/// Parse both header records and check them against `permissiveness`.
pub(crate) fn parse_headers(
    data: &[u8],
    permissiveness: Permissiveness,
) -> Result<BmpLayout, CodecError> {
    let mut cursor = Cursor::new(data, permissiveness == Permissiveness::Permissive);
    let file = FileHeader::from_bytes(&cursor.read_fixed_bytes::<FILE_HEADER_SIZE>()?);
    let info = InfoHeader::from_bytes(&cursor.read_fixed_bytes::<INFO_HEADER_SIZE>()?);
    match permissiveness {
        Permissiveness::Permissive => permissive_layout(&file, &info, data.len()),
        Permissiveness::Standard => checked_layout(&file, &info, data.len(), false),
        Permissiveness::Strict => checked_layout(&file, &info, data.len(), true),
    }
}

fn permissive_layout(
    file: &FileHeader,
    info: &InfoHeader,
    data_len: usize,
) -> Result<BmpLayout, CodecError> {
    if file.data_offset as usize != PIXEL_DATA_OFFSET {
        log::warn!(
            "ignoring BMP pixel data offset {}, reading from {PIXEL_DATA_OFFSET}",
            file.data_offset
        );
    }
    let width = info.width.max(0) as u32;
    let height = info.height.unsigned_abs();
    let stride = row_stride(width).ok_or(CodecError::DimensionsTooLarge { width, height })?;
    let pixel_bytes = stride
        .checked_mul(height as usize)
        .ok_or(CodecError::DimensionsTooLarge { width, height })?;
    let missing = pixel_bytes.saturating_sub(data_len.saturating_sub(PIXEL_DATA_OFFSET));
    if missing > MAX_ZERO_FILL_BYTES {
        log::warn!("BMP header claims {width}x{height}, {missing} bytes past end of file");
        return Err(CodecError::UnexpectedEof);
    }
    Ok(BmpLayout {
        width,
        height,
        stride,
        data_offset: PIXEL_DATA_OFFSET,
    })
}

fn checked_layout(
    file: &FileHeader,
    info: &InfoHeader,
    data_len: usize,
    strict: bool,
) -> Result<BmpLayout, CodecError> {
    if &file.signature != b"BM" {
        return Err(CodecError::UnrecognizedFormat);
    }
    if (info.header_size as usize) < INFO_HEADER_SIZE {
        return Err(CodecError::InvalidHeader(format!(
            "info header size {} is smaller than {INFO_HEADER_SIZE}",
            info.header_size
        )));
    }
    if info.bits_per_pixel != 24 {
        return Err(CodecError::UnsupportedVariant(format!(
            "{} bits per pixel (only 24 is supported)",
            info.bits_per_pixel
        )));
    }
    if info.compression != 0 {
        return Err(CodecError::UnsupportedVariant(format!(
            "compression type {}",
            info.compression
        )));
    }
    if info.width <= 0 {
        return Err(CodecError::InvalidHeader(format!(
            "width {} is not positive",
            info.width
        )));
    }
    if info.height == 0 {
        return Err(CodecError::InvalidHeader("height is zero".into()));
    }
    if info.height < 0 {
        return Err(CodecError::UnsupportedVariant(
            "top-down bitmap (negative height)".into(),
        ));
    }
    let data_offset = file.data_offset as usize;
    if data_offset < PIXEL_DATA_OFFSET {
        return Err(CodecError::InvalidHeader(format!(
            "pixel data offset {data_offset} overlaps the headers"
        )));
    }

    let width = info.width as u32;
    let height = info.height as u32;
    let too_large = CodecError::DimensionsTooLarge { width, height };
    let stride = row_stride(width).ok_or(CodecError::DimensionsTooLarge { width, height })?;
    let pixel_bytes = stride.checked_mul(height as usize).ok_or(too_large)?;

    if strict {
        if info.planes != 1 {
            return Err(CodecError::InvalidHeader(format!(
                "planes is {}, expected 1",
                info.planes
            )));
        }
        if info.header_size as usize != INFO_HEADER_SIZE {
            return Err(CodecError::UnsupportedVariant(format!(
                "info header size {}",
                info.header_size
            )));
        }
        if data_offset != PIXEL_DATA_OFFSET {
            return Err(CodecError::InvalidHeader(format!(
                "pixel data offset {data_offset}, expected {PIXEL_DATA_OFFSET}"
            )));
        }
        if file.file_size as usize != data_len {
            return Err(CodecError::InvalidHeader(format!(
                "BMP file size field ({}) doesn't match actual size ({data_len})",
                file.file_size
            )));
        }
        if info.image_size as usize != pixel_bytes {
            return Err(CodecError::InvalidHeader(format!(
                "image size field ({}) doesn't match height * stride ({pixel_bytes})",
                info.image_size
            )));
        }
    }

    // Reject truncated files before allocating the output.
    let end = data_offset
        .checked_add(pixel_bytes)
        .ok_or(CodecError::UnexpectedEof)?;
    if end > data_len {
        return Err(CodecError::UnexpectedEof);
    }

    Ok(BmpLayout {
        width,
        height,
        stride,
        data_offset,
    })
}

// ── Full decode ─────────────────────────────────────────────────────

/// Decode a 24-bit BMP into an RGBA8 image (alpha 255).
pub(crate) fn decode_bmp(
    data: &[u8],
    permissiveness: Permissiveness,
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<Image, CodecError> {
    let layout = parse_headers(data, permissiveness)?;
    let BmpLayout {
        width,
        height,
        stride,
        data_offset,
    } = layout;
    log::debug!("BMP {width}x{height}, stride {stride}, pixel data at {data_offset}");

    if let Some(limits) = limits {
        limits.check_image(width, height)?;
    }
    stop.check()?;

    let mut image = Image::try_new(width, height)?;
    if !image.is_valid() {
        return Ok(image);
    }

    let mut cursor = Cursor::new(data, permissiveness == Permissiveness::Permissive);
    cursor.set_position(data_offset)?;

    // Rows are stored bottom-up: the i-th stored row is image row height-1-i.
    let mut row_buf = vec![0u8; stride];
    for i in 0..height {
        if cursor.truncated {
            // The remaining rows stay black.
            break;
        }
        if i % 16 == 0 {
            stop.check()?;
        }
        cursor.read_exact_bytes(&mut row_buf)?;
        let y = height - 1 - i;
        for (px, bgr) in image.row_mut(y).iter_mut().zip(row_buf.chunks_exact(3)) {
            *px = RGBA8::new(bgr[2], bgr[1], bgr[0], 255);
        }
    }

    if cursor.truncated {
        log::warn!("BMP pixel data truncated; missing rows decoded as black");
    }

    Ok(image)
}
