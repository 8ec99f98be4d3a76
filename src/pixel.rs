use rgb::RGBA8;

use crate::error::CodecError;

/// Opaque black, the fill color of freshly allocated images.
pub const BLACK: RGBA8 = RGBA8 {
    r: 0,
    g: 0,
    b: 0,
    a: 255,
};

/// An owned, row-major RGBA8 pixel buffer.
///
/// Rows are stored top to bottom, each exactly `width` pixels long. An image
/// with zero width or zero height is the "no image" value: it is what
/// [`Image::default`] returns and [`Image::is_valid`] reports `false` for it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Image {
    width: u32,
    height: u32,
    pixels: Vec<RGBA8>,
}

impl Image {
    /// Allocate a `width` x `height` image filled with opaque black.
    ///
    /// # Panics
    ///
    /// If `width * height` overflows `usize`. Decoders use [`Image::try_new`].
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, BLACK)
    }

    /// Allocate a `width` x `height` image filled with `color`.
    ///
    /// # Panics
    ///
    /// If `width * height` overflows `usize`.
    pub fn filled(width: u32, height: u32, color: RGBA8) -> Self {
        let Some(count) = pixel_count(width, height) else {
            panic!("{width}x{height} image does not fit in memory");
        };
        Self {
            width,
            height,
            pixels: vec![color; count],
        }
    }

    /// Fallible [`Image::new`] for dimensions taken from untrusted headers.
    ///
    /// Returns [`CodecError::DimensionsTooLarge`] if the pixel count overflows
    /// or the buffer cannot be allocated.
    pub fn try_new(width: u32, height: u32) -> Result<Self, CodecError> {
        let too_large = CodecError::DimensionsTooLarge { width, height };
        let count = pixel_count(width, height).ok_or(too_large)?;
        let mut pixels = Vec::new();
        pixels
            .try_reserve_exact(count)
            .map_err(|_| CodecError::DimensionsTooLarge { width, height })?;
        pixels.resize(count, BLACK);
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Wrap an existing row-major pixel vector.
    ///
    /// Returns [`CodecError::BufferTooSmall`] unless `pixels.len()` is exactly
    /// `width * height`.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<RGBA8>) -> Result<Self, CodecError> {
        let needed =
            pixel_count(width, height).ok_or(CodecError::DimensionsTooLarge { width, height })?;
        if pixels.len() != needed {
            return Err(CodecError::BufferTooSmall {
                needed,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// `false` for the empty image (zero width or zero height).
    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// All pixels, row-major.
    pub fn pixels(&self) -> &[RGBA8] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [RGBA8] {
        &mut self.pixels
    }

    pub fn into_pixels(self) -> Vec<RGBA8> {
        self.pixels
    }

    /// Row `y` (0 = top). Panics if `y >= height`.
    pub fn row(&self, y: u32) -> &[RGBA8] {
        let w = self.width as usize;
        let start = y as usize * w;
        &self.pixels[start..start + w]
    }

    /// Mutable row `y` (0 = top). Panics if `y >= height`.
    pub fn row_mut(&mut self, y: u32) -> &mut [RGBA8] {
        let w = self.width as usize;
        let start = y as usize * w;
        &mut self.pixels[start..start + w]
    }

    /// Iterate rows top to bottom.
    pub fn rows(&self) -> impl DoubleEndedIterator<Item = &[RGBA8]> + ExactSizeIterator {
        // width 0 means an empty pixel vector, so the chunk size only has to be non-zero
        self.pixels.chunks_exact((self.width as usize).max(1))
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<RGBA8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[y as usize * self.width as usize + x as usize])
    }

    /// Set one pixel; out-of-bounds coordinates are ignored.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: RGBA8) {
        if x < self.width && y < self.height {
            self.pixels[y as usize * self.width as usize + x as usize] = color;
        }
    }

    /// Borrow as an [`imgref::ImgRef`]. `None` for the empty image.
    #[cfg(feature = "imgref")]
    pub fn as_imgref(&self) -> Option<imgref::ImgRef<'_, RGBA8>> {
        if !self.is_valid() {
            return None;
        }
        Some(imgref::ImgRef::new(
            &self.pixels,
            self.width as usize,
            self.height as usize,
        ))
    }
}

fn pixel_count(width: u32, height: u32) -> Option<usize> {
    usize::try_from(width)
        .ok()?
        .checked_mul(usize::try_from(height).ok()?)
}

#[cfg(feature = "imgref")]
impl TryFrom<imgref::ImgVec<RGBA8>> for Image {
    type Error = CodecError;

    fn try_from(img: imgref::ImgVec<RGBA8>) -> Result<Self, CodecError> {
        let (Ok(width), Ok(height)) = (u32::try_from(img.width()), u32::try_from(img.height()))
        else {
            return Err(CodecError::DimensionsTooLarge {
                width: u32::MAX,
                height: u32::MAX,
            });
        };
        // Drop any stride padding.
        let pixels = img.pixels().collect();
        Ok(Self {
            width,
            height,
            pixels,
        })
    }
}
