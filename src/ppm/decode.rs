//! PPM decoder: binary P6 with maxval up to 255.

use enough::Stop;
use rgb::RGBA8;

use crate::error::CodecError;
use crate::limits::Limits;
use crate::pixel::Image;

/// Parsed P6 header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PpmHeader {
    pub width: u32,
    pub height: u32,
    pub maxval: u32,
    pub data_offset: usize,
}

/// Parse a P6 header. Comments (`#` to end of line) may appear between tokens.
pub(crate) fn parse_header(data: &[u8]) -> Result<PpmHeader, CodecError> {
    if data.len() < 2 {
        return Err(CodecError::UnexpectedEof);
    }
    match &data[0..2] {
        b"P6" => {}
        [b'P', b'1'..=b'7'] => {
            return Err(CodecError::UnsupportedVariant(format!(
                "{} (only binary P6 is supported)",
                String::from_utf8_lossy(&data[0..2])
            )));
        }
        _ => return Err(CodecError::UnrecognizedFormat),
    }

    let mut pos = 2;
    let width = read_number(data, &mut pos, "width")?;
    let height = read_number(data, &mut pos, "height")?;
    let maxval = read_number(data, &mut pos, "maxval")?;

    // Exactly one whitespace byte separates maxval from the raster.
    match data.get(pos) {
        Some(b) if b.is_ascii_whitespace() => pos += 1,
        Some(_) => {
            return Err(CodecError::InvalidHeader(
                "missing whitespace after maxval".into(),
            ));
        }
        None => return Err(CodecError::UnexpectedEof),
    }

    if width == 0 || height == 0 {
        return Err(CodecError::InvalidHeader(format!(
            "zero dimension {width}x{height}"
        )));
    }
    if maxval == 0 {
        return Err(CodecError::InvalidHeader("maxval is zero".into()));
    }
    if maxval > 255 {
        return Err(CodecError::UnsupportedVariant(format!(
            "16-bit PPM (maxval {maxval})"
        )));
    }

    Ok(PpmHeader {
        width,
        height,
        maxval,
        data_offset: pos,
    })
}

fn skip_whitespace_and_comments(data: &[u8], pos: &mut usize) {
    while let Some(&b) = data.get(*pos) {
        if b == b'#' {
            while let Some(&c) = data.get(*pos) {
                *pos += 1;
                if c == b'\n' || c == b'\r' {
                    break;
                }
            }
        } else if b.is_ascii_whitespace() {
            *pos += 1;
        } else {
            break;
        }
    }
}

fn read_number(data: &[u8], pos: &mut usize, what: &str) -> Result<u32, CodecError> {
    skip_whitespace_and_comments(data, pos);
    let start = *pos;
    let mut value: u32 = 0;
    while let Some(&b) = data.get(*pos) {
        if !b.is_ascii_digit() {
            break;
        }
        value = value
            .checked_mul(10)
            .and_then(|v| v.checked_add(u32::from(b - b'0')))
            .ok_or_else(|| CodecError::InvalidHeader(format!("{what} out of range")))?;
        *pos += 1;
    }
    if *pos == start {
        return match data.get(*pos) {
            None => Err(CodecError::UnexpectedEof),
            Some(_) => Err(CodecError::InvalidHeader(format!("expected {what}"))),
        };
    }
    Ok(value)
}

/// Decode P6 pixel data into an RGBA8 image (alpha 255).
pub(crate) fn decode_ppm(
    data: &[u8],
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<Image, CodecError> {
    let header = parse_header(data)?;
    let PpmHeader {
        width,
        height,
        maxval,
        data_offset,
    } = header;
    log::debug!("PPM {width}x{height}, maxval {maxval}");

    if let Some(limits) = limits {
        limits.check_image(width, height)?;
    }

    let row_bytes = (width as usize)
        .checked_mul(3)
        .ok_or(CodecError::DimensionsTooLarge { width, height })?;
    let expected = row_bytes
        .checked_mul(height as usize)
        .ok_or(CodecError::DimensionsTooLarge { width, height })?;
    let raster = data
        .get(data_offset..)
        .and_then(|d| d.get(..expected))
        .ok_or(CodecError::UnexpectedEof)?;

    stop.check()?;

    let scale = |v: u8| -> u8 {
        if maxval == 255 {
            v
        } else {
            let v = u32::from(v).min(maxval);
            ((v * 255 + maxval / 2) / maxval) as u8
        }
    };

    let mut image = Image::try_new(width, height)?;
    for (y, src) in raster.chunks_exact(row_bytes).enumerate() {
        if y % 16 == 0 {
            stop.check()?;
        }
        for (px, rgb) in image.row_mut(y as u32).iter_mut().zip(src.chunks_exact(3)) {
            *px = RGBA8::new(scale(rgb[0]), scale(rgb[1]), scale(rgb[2]), 255);
        }
    }

    Ok(image)
}
