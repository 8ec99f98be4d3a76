use std::fmt;
use std::path::Path;

use crate::codec::ImageCodec;

/// Image format, chosen purely from the file extension.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    /// Uncompressed 24-bit Windows bitmap.
    Bmp,
    /// JPEG/JFIF.
    Jpeg,
    /// Binary PPM (P6).
    Ppm,
}

impl ImageFormat {
    pub const ALL: [ImageFormat; 3] = [ImageFormat::Bmp, ImageFormat::Jpeg, ImageFormat::Ppm];

    /// Recognized extensions, without the leading dot. Matching is
    /// case-sensitive.
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            ImageFormat::Bmp => &["bmp"],
            ImageFormat::Jpeg => &["jpg", "jpeg"],
            ImageFormat::Ppm => &["ppm"],
        }
    }

    /// Look up an extension (without the dot). `None` for anything unknown,
    /// including upper-case spellings.
    pub fn from_extension(ext: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|f| f.extensions().contains(&ext))
    }

    /// Format of `path` by its final extension. Never touches the file system.
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        let ext = path.as_ref().extension()?.to_str()?;
        Self::from_extension(ext)
    }

    /// A fresh codec with default settings.
    ///
    /// `None` for JPEG when the crate is built without the `jpeg` feature.
    pub fn codec(self) -> Option<Box<dyn ImageCodec>> {
        match self {
            ImageFormat::Bmp => Some(Box::new(crate::bmp::BmpCodec::new())),
            ImageFormat::Ppm => Some(Box::new(crate::ppm::PpmCodec::new())),
            #[cfg(feature = "jpeg")]
            ImageFormat::Jpeg => Some(Box::new(crate::jpeg::JpegCodec::new())),
            #[cfg(not(feature = "jpeg"))]
            ImageFormat::Jpeg => None,
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ImageFormat::Bmp => "BMP",
            ImageFormat::Jpeg => "JPEG",
            ImageFormat::Ppm => "PPM",
        })
    }
}
