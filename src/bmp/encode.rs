//! BMP encoder: uncompressed 24-bit, bottom-up, BGR.

use std::io::Write;

use enough::Stop;

use super::header::{headers_for, row_stride};
use crate::error::CodecError;
use crate::pixel::Image;

/// Stream `image` as a 24-bit BMP into `out`. Returns the number of bytes
/// written.
///
/// Alpha is dropped. A zero-width image produces zero-length rows.
pub(crate) fn write_bmp<W: Write>(
    out: &mut W,
    image: &Image,
    stop: &dyn Stop,
) -> Result<u64, CodecError> {
    let (file, info) = headers_for(image.width(), image.height())?;
    let stride = row_stride(image.width()).ok_or(CodecError::DimensionsTooLarge {
        width: image.width(),
        height: image.height(),
    })?;

    out.write_all(&file.to_bytes())?;
    out.write_all(&info.to_bytes())?;

    // Padding bytes past width * 3 are never touched and stay zero.
    let mut row_buf = vec![0u8; stride];
    for (i, row) in image.rows().rev().enumerate() {
        if i % 16 == 0 {
            stop.check()?;
        }
        for (dst, px) in row_buf.chunks_exact_mut(3).zip(row) {
            dst[0] = px.b;
            dst[1] = px.g;
            dst[2] = px.r;
        }
        out.write_all(&row_buf)?;
    }

    Ok(u64::from(file.file_size))
}

/// Encode `image` to an in-memory BMP.
pub(crate) fn encode_bmp(image: &Image, stop: &dyn Stop) -> Result<Vec<u8>, CodecError> {
    let (file, _) = headers_for(image.width(), image.height())?;
    let mut out = Vec::with_capacity(file.file_size as usize);
    write_bmp(&mut out, image, stop)?;
    Ok(out)
}
