//! # zenconvert
//!
//! Convert images between BMP, PPM and JPEG files, choosing the format of
//! each side from its file extension.
//!
//! ## Supported Formats
//!
//! ### BMP
//! - Uncompressed 24-bit, bottom-up, BGR with rows padded to 4 bytes.
//! - Header validation is configurable via [`Permissiveness`].
//!
//! ### PPM
//! - Binary P6, maxval up to 255 (always written as 255).
//!
//! ### JPEG (`jpeg` feature, on by default)
//! - Baseline encode/decode through the [`image`](https://docs.rs/image) crate.
//!
//! ## Non-Goals
//!
//! - Format detection from file content
//! - BMP bit depths other than 24, palettes, RLE
//! - Animated formats
//! - Color management
//!
//! ## Usage
//!
//! ```no_run
//! use zenconvert::{convert, ConvertError};
//!
//! match convert("photo.jpg", "photo.bmp") {
//!     Ok(()) => println!("Successfully converted"),
//!     Err(e) => {
//!         eprintln!("{e}");
//!         std::process::exit(i32::from(e.exit_code()));
//!     }
//! }
//! ```
//!
//! Byte-level codecs are available too:
//!
//! ```
//! use zenconvert::{decode_bmp, encode_bmp, Image, Unstoppable, RGBA8};
//!
//! let mut img = Image::new(2, 2);
//! img.set_pixel(0, 0, RGBA8::new(255, 0, 0, 255));
//! let bmp = encode_bmp(&img, Unstoppable)?;
//! assert_eq!(bmp.len(), 54 + 2 * 8);
//! assert_eq!(decode_bmp(&bmp, Unstoppable)?, img);
//! # Ok::<(), zenconvert::CodecError>(())
//! ```

#![forbid(unsafe_code)]

mod codec;
mod convert;
mod error;
mod format;
mod limits;
mod pixel;

pub mod bmp;
pub mod ppm;

#[cfg(feature = "jpeg")]
pub mod jpeg;

// Re-exports
pub use bmp::{BmpCodec, Permissiveness, decode_bmp, encode_bmp, row_stride};
pub use codec::{ImageCodec, codec_for_path};
pub use convert::{Converter, convert};
pub use enough::{Stop, Unstoppable};
pub use error::{CodecError, ConvertError};
pub use format::ImageFormat;
#[cfg(feature = "jpeg")]
pub use jpeg::JpegCodec;
pub use limits::Limits;
pub use pixel::{BLACK, Image};
pub use ppm::{PpmCodec, decode_ppm, encode_ppm};
pub use rgb::RGBA8;
