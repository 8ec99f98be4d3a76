use std::path::Path;

use crate::error::CodecError;
use crate::format::ImageFormat;
use crate::pixel::Image;

/// File-level load/save for one image format.
///
/// `load` produces a fresh, caller-owned image; `save` borrows it. Both open
/// the file for a single sequential pass and close it on every path. A
/// failed `save` may leave a partially written file behind.
pub trait ImageCodec: Send + Sync {
    fn format(&self) -> ImageFormat;

    fn load(&self, path: &Path) -> Result<Image, CodecError>;

    fn save(&self, path: &Path, image: &Image) -> Result<(), CodecError>;
}

/// Resolve a default codec from the extension of `path`.
///
/// `None` is the only failure signal: no file-system or content checks happen.
pub fn codec_for_path(path: impl AsRef<Path>) -> Option<Box<dyn ImageCodec>> {
    ImageFormat::from_path(path)?.codec()
}
