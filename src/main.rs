use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use zenconvert::{BmpCodec, Converter, Limits, Permissiveness};

/// Exit code for bad command-line usage.
const EXIT_USAGE: u8 = 1;

/// Convert an image to another format, chosen by the output file extension.
///
/// Supported extensions: .bmp, .ppm, .jpg, .jpeg (case-sensitive).
#[derive(Parser, Debug)]
#[command(name = "zenconvert", version)]
struct Args {
    /// Input image.
    in_file: PathBuf,

    /// Output image.
    out_file: PathBuf,

    /// Trust BMP headers and zero-fill truncated pixel data.
    #[arg(long, conflicts_with = "strict")]
    permissive: bool,

    /// Reject BMP files whose header fields disagree with the data.
    #[arg(long)]
    strict: bool,

    /// Refuse to load images with more than N pixels.
    #[arg(long, value_name = "N")]
    max_pixels: Option<u64>,
}

impl Args {
    fn converter(&self) -> Converter {
        let permissiveness = if self.permissive {
            Permissiveness::Permissive
        } else if self.strict {
            Permissiveness::Strict
        } else {
            Permissiveness::Standard
        };
        let converter =
            Converter::new().with_bmp_codec(BmpCodec::new().with_permissiveness(permissiveness));
        match self.max_pixels {
            Some(max) => converter.with_limits(Limits {
                max_pixels: Some(max),
                ..Default::default()
            }),
            None => converter,
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::from(EXIT_USAGE)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    match args.converter().convert(&args.in_file, &args.out_file) {
        Ok(()) => {
            println!("Successfully converted");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{e}");
            ExitCode::from(e.exit_code())
        }
    }
}
