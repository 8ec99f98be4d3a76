//! File-to-file conversion.

use std::path::Path;

use crate::bmp::BmpCodec;
use crate::codec::ImageCodec;
use crate::error::{CodecError, ConvertError};
use crate::format::ImageFormat;
use crate::limits::Limits;
use crate::ppm::PpmCodec;

/// Resolves codecs for an input and an output path and runs one load
/// followed by one save.
#[derive(Clone, Debug, Default)]
pub struct Converter {
    bmp: BmpCodec,
    limits: Option<Limits>,
}

impl Converter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Codec used for `.bmp` paths.
    pub fn with_bmp_codec(mut self, bmp: BmpCodec) -> Self {
        self.bmp = bmp;
        self
    }

    /// Decode limits for every format. Overrides limits set on the BMP codec.
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Configured codec for `format`, or `None` if it is not compiled in.
    pub fn codec(&self, format: ImageFormat) -> Option<Box<dyn ImageCodec>> {
        let limits = self.limits.clone();
        match format {
            ImageFormat::Bmp => {
                let bmp = match limits {
                    Some(l) => self.bmp.clone().with_limits(l),
                    None => self.bmp.clone(),
                };
                Some(Box::new(bmp))
            }
            ImageFormat::Ppm => {
                let ppm = match limits {
                    Some(l) => PpmCodec::new().with_limits(l),
                    None => PpmCodec::new(),
                };
                Some(Box::new(ppm))
            }
            #[cfg(feature = "jpeg")]
            ImageFormat::Jpeg => {
                let jpeg = match limits {
                    Some(l) => crate::jpeg::JpegCodec::new().with_limits(l),
                    None => crate::jpeg::JpegCodec::new(),
                };
                Some(Box::new(jpeg))
            }
            #[cfg(not(feature = "jpeg"))]
            ImageFormat::Jpeg => None,
        }
    }

    fn codec_for_path(&self, path: &Path) -> Option<Box<dyn ImageCodec>> {
        self.codec(ImageFormat::from_path(path)?)
    }

    /// Convert `input` to `output`, choosing both formats by extension.
    ///
    /// Both codecs are resolved before anything is read, so an unknown
    /// output extension never touches the input file.
    pub fn convert(
        &self,
        input: impl AsRef<Path>,
        output: impl AsRef<Path>,
    ) -> Result<(), ConvertError> {
        let input = input.as_ref();
        let output = output.as_ref();

        let reader = self
            .codec_for_path(input)
            .ok_or_else(|| ConvertError::UnknownInputFormat(input.to_path_buf()))?;
        let writer = self
            .codec_for_path(output)
            .ok_or_else(|| ConvertError::UnknownOutputFormat(output.to_path_buf()))?;
        log::debug!(
            "converting {} ({}) to {} ({})",
            input.display(),
            reader.format(),
            output.display(),
            writer.format()
        );

        let load_err = |source| ConvertError::Load {
            path: input.to_path_buf(),
            source,
        };
        let image = reader.load(input).map_err(load_err)?;
        if !image.is_valid() {
            return Err(load_err(CodecError::EmptyImage));
        }

        writer
            .save(output, &image)
            .map_err(|source| ConvertError::Save {
                path: output.to_path_buf(),
                source,
            })
    }
}

/// Convert `input` to `output` with default codec settings.
pub fn convert(input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<(), ConvertError> {
    Converter::new().convert(input, output)
}
