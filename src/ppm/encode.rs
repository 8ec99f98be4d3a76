//! PPM encoder: binary P6, maxval 255.

use std::io::Write;

use enough::Stop;

use crate::error::CodecError;
use crate::pixel::Image;

/// Stream `image` as P6 into `out`. Returns the number of bytes written.
pub(crate) fn write_ppm<W: Write>(
    out: &mut W,
    image: &Image,
    stop: &dyn Stop,
) -> Result<u64, CodecError> {
    if !image.is_valid() {
        return Err(CodecError::EmptyImage);
    }
    let header = format!("P6\n{} {}\n255\n", image.width(), image.height());
    out.write_all(header.as_bytes())?;

    let mut row_buf = vec![0u8; image.width() as usize * 3];
    for (i, row) in image.rows().enumerate() {
        if i % 16 == 0 {
            stop.check()?;
        }
        for (dst, px) in row_buf.chunks_exact_mut(3).zip(row) {
            dst[0] = px.r;
            dst[1] = px.g;
            dst[2] = px.b;
        }
        out.write_all(&row_buf)?;
    }

    Ok(header.len() as u64 + row_buf.len() as u64 * u64::from(image.height()))
}

pub(crate) fn encode_ppm(image: &Image, stop: &dyn Stop) -> Result<Vec<u8>, CodecError> {
    let mut out = Vec::with_capacity(32 + image.pixels().len() * 3);
    write_ppm(&mut out, image, stop)?;
    Ok(out)
}
