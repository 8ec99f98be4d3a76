//! On-disk BMP header records.
//!
//! Both records are serialized field by field in little-endian order with no
//! padding, independent of native struct layout.

use crate::error::CodecError;

pub(crate) const FILE_HEADER_SIZE: usize = 14;
pub(crate) const INFO_HEADER_SIZE: usize = 40;
/// Offset of the pixel data in files this codec writes.
pub(crate) const PIXEL_DATA_OFFSET: usize = FILE_HEADER_SIZE + INFO_HEADER_SIZE;

/// 300 DPI in pixels per meter.
const RESOLUTION: i32 = 11811;
const IMPORTANT_COLORS: i32 = 0x100_0000;

/// Byte length of one padded 24-bit row: `width * 3` rounded up to a
/// multiple of 4.
///
/// Returns `None` if the result does not fit in `usize`.
pub fn row_stride(width: u32) -> Option<usize> {
    (width as usize)
        .checked_mul(3)
        .and_then(|r| r.checked_add(3))
        .map(|r| r & !3)
}

/// The 14-byte BITMAPFILEHEADER.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FileHeader {
    pub signature: [u8; 2],
    /// Total file length: headers plus pixel data.
    pub file_size: u32,
    pub reserved: u32,
    pub data_offset: u32,
}

impl FileHeader {
    pub fn to_bytes(&self) -> [u8; FILE_HEADER_SIZE] {
        let mut out = [0u8; FILE_HEADER_SIZE];
        out[0..2].copy_from_slice(&self.signature);
        out[2..6].copy_from_slice(&self.file_size.to_le_bytes());
        out[6..10].copy_from_slice(&self.reserved.to_le_bytes());
        out[10..14].copy_from_slice(&self.data_offset.to_le_bytes());
        out
    }

    pub fn from_bytes(b: &[u8; FILE_HEADER_SIZE]) -> Self {
        Self {
            signature: [b[0], b[1]],
            file_size: le_u32(b, 2),
            reserved: le_u32(b, 6),
            data_offset: le_u32(b, 10),
        }
    }
}

/// The 40-byte BITMAPINFOHEADER.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InfoHeader {
    pub header_size: u32,
    pub width: i32,
    /// Positive for bottom-up storage.
    pub height: i32,
    pub planes: u16,
    pub bits_per_pixel: u16,
    pub compression: u32,
    /// Pixel data length: `height * stride`.
    pub image_size: u32,
    pub x_resolution: i32,
    pub y_resolution: i32,
    pub used_colors: i32,
    pub important_colors: i32,
}

impl InfoHeader {
    pub fn to_bytes(&self) -> [u8; INFO_HEADER_SIZE] {
        let mut out = [0u8; INFO_HEADER_SIZE];
        out[0..4].copy_from_slice(&self.header_size.to_le_bytes());
        out[4..8].copy_from_slice(&self.width.to_le_bytes());
        out[8..12].copy_from_slice(&self.height.to_le_bytes());
        out[12..14].copy_from_slice(&self.planes.to_le_bytes());
        out[14..16].copy_from_slice(&self.bits_per_pixel.to_le_bytes());
        out[16..20].copy_from_slice(&self.compression.to_le_bytes());
        out[20..24].copy_from_slice(&self.image_size.to_le_bytes());
        out[24..28].copy_from_slice(&self.x_resolution.to_le_bytes());
        out[28..32].copy_from_slice(&self.y_resolution.to_le_bytes());
        out[32..36].copy_from_slice(&self.used_colors.to_le_bytes());
        out[36..40].copy_from_slice(&self.important_colors.to_le_bytes());
        out
    }

    pub fn from_bytes(b: &[u8; INFO_HEADER_SIZE]) -> Self {
        Self {
            header_size: le_u32(b, 0),
            width: le_u32(b, 4) as i32,
            height: le_u32(b, 8) as i32,
            planes: le_u16(b, 12),
            bits_per_pixel: le_u16(b, 14),
            compression: le_u32(b, 16),
            image_size: le_u32(b, 20),
            x_resolution: le_u32(b, 24) as i32,
            y_resolution: le_u32(b, 28) as i32,
            used_colors: le_u32(b, 32) as i32,
            important_colors: le_u32(b, 36) as i32,
        }
    }
}

/// Build the header pair for a 24-bit bottom-up image.
///
/// Fails with [`CodecError::DimensionsTooLarge`] when a dimension does not
/// fit the signed header fields or the file size overflows 32 bits.
pub(crate) fn headers_for(width: u32, height: u32) -> Result<(FileHeader, InfoHeader), CodecError> {
    let too_large = CodecError::DimensionsTooLarge { width, height };
    let (Ok(w), Ok(h)) = (i32::try_from(width), i32::try_from(height)) else {
        return Err(too_large);
    };
    let image_size = row_stride(width)
        .and_then(|s| s.checked_mul(height as usize))
        .and_then(|s| u32::try_from(s).ok());
    let Some(image_size) = image_size else {
        return Err(too_large);
    };
    let Some(file_size) = image_size.checked_add(PIXEL_DATA_OFFSET as u32) else {
        return Err(too_large);
    };

    let file = FileHeader {
        signature: *b"BM",
        file_size,
        reserved: 0,
        data_offset: PIXEL_DATA_OFFSET as u32,
    };
    let info = InfoHeader {
        header_size: INFO_HEADER_SIZE as u32,
        width: w,
        height: h,
        planes: 1,
        bits_per_pixel: 24,
        compression: 0,
        image_size,
        x_resolution: RESOLUTION,
        y_resolution: RESOLUTION,
        used_colors: 0,
        important_colors: IMPORTANT_COLORS,
    };
    Ok((file, info))
}

fn le_u16(b: &[u8], at: usize) -> u16 {
    u16::from_le_bytes([b[at], b[at + 1]])
}

fn le_u32(b: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([b[at], b[at + 1], b[at + 2], b[at + 3]])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stride_is_padded_to_four() {
        assert_eq!(row_stride(0), Some(0));
        assert_eq!(row_stride(1), Some(4));
        assert_eq!(row_stride(2), Some(8));
        assert_eq!(row_stride(3), Some(12));
        assert_eq!(row_stride(4), Some(12));
        assert_eq!(row_stride(5), Some(16));
        for w in 0..2000u32 {
            let s = row_stride(w).unwrap();
            let raw = w as usize * 3;
            assert_eq!(s % 4, 0, "width {w}");
            assert!(s >= raw && s < raw + 4, "width {w}: stride {s}");
        }
    }

    #[test]
    fn header_layout_matches_fixed_offsets() {
        let (file, info) = headers_for(2, 2).unwrap();
        let fb = file.to_bytes();
        let ib = info.to_bytes();

        assert_eq!(&fb[0..2], b"BM");
        assert_eq!(le_u32(&fb, 2), 70);
        assert_eq!(le_u32(&fb, 6), 0);
        assert_eq!(le_u32(&fb, 10), 54);

        // Offsets below are relative to the info header (file offset - 14).
        assert_eq!(le_u32(&ib, 0), 40);
        assert_eq!(le_u32(&ib, 4), 2);
        assert_eq!(le_u32(&ib, 8), 2);
        assert_eq!(le_u16(&ib, 12), 1);
        assert_eq!(le_u16(&ib, 14), 24);
        assert_eq!(le_u32(&ib, 16), 0);
        assert_eq!(le_u32(&ib, 20), 16);
        assert_eq!(le_u32(&ib, 24), 11811);
        assert_eq!(le_u32(&ib, 28), 11811);
        assert_eq!(le_u32(&ib, 32), 0);
        assert_eq!(le_u32(&ib, 36), 0x100_0000);
    }

    #[test]
    fn parse_is_inverse_of_serialize() {
        let (file, info) = headers_for(17, 9).unwrap();
        assert_eq!(FileHeader::from_bytes(&file.to_bytes()), file);
        assert_eq!(InfoHeader::from_bytes(&info.to_bytes()), info);
    }

    #[test]
    fn negative_height_parses_signed() {
        let (_, mut info) = headers_for(1, 1).unwrap();
        info.height = -5;
        assert_eq!(InfoHeader::from_bytes(&info.to_bytes()).height, -5);
    }

    #[test]
    fn oversized_dimensions_rejected() {
        assert!(matches!(
            headers_for(u32::MAX, 1),
            Err(CodecError::DimensionsTooLarge { .. })
        ));
        assert!(matches!(
            headers_for(40_000, 40_000),
            Err(CodecError::DimensionsTooLarge { .. })
        ));
    }
}
