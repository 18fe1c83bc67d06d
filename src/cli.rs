use crate::constants::{DEFAULT_QUALITY, QUALITY_ENV};
use crate::options::{ConversionOptions, Invocation};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "convrt",
    about = "Convert, resize and optimize images",
    long_about = "convrt re-encodes images into another format or an optimized version of \
                  their own format, optionally resizing them with Lanczos3 resampling. \
                  Supported targets: jpg, jpeg, png, gif, tiff, webp.",
    version,
    disable_help_flag = true,
    allow_negative_numbers = true
)]
pub struct Args {
    #[arg(help = "Input file, directory, or glob pattern")]
    pub input: Option<String>,

    #[arg(
        value_parser = parse_target_extension,
        help = "Target extension such as .png",
        long_help = "Convert into the format named by this extension. \
                     The output is written next to the input with the extension replaced."
    )]
    pub target: Option<String>,

    #[arg(
        short = 'o',
        long,
        help = "Optimize the image in its own format",
        long_help = "Re-encode in the source format at quality 75. \
                     The output is named <name>_optimized.<ext>."
    )]
    pub optimize: bool,

    #[arg(
        short = 'q',
        long,
        env = QUALITY_ENV,
        default_value_t = i64::from(DEFAULT_QUALITY),
        help = "Quality for lossy targets (1-100, default: 90)",
        long_help = "Quality used by JPEG and WebP targets. \
                     Values outside 1-100 are clamped. Ignored in optimize mode."
    )]
    pub quality: i64,

    #[arg(short = 'w', long, default_value_t = 0, help = "Resize to width N")]
    pub width: i64,

    #[arg(short = 'h', long, default_value_t = 0, help = "Resize to height N")]
    pub height: i64,

    #[arg(
        short = 'r',
        long,
        help = "Process directories recursively",
        long_help = "Accepted for compatibility. Directory inputs are always walked recursively."
    )]
    pub recursive: bool,

    #[arg(short = 'v', long, help = "Print debug diagnostics")]
    pub verbose: bool,

    #[arg(long, help = "Only print errors")]
    pub quiet: bool,

    #[arg(long, help = "Print usage")]
    pub help: bool,
}

impl Args {
    pub fn into_invocation(self) -> Invocation {
        Invocation {
            input: self.input,
            options: ConversionOptions::new(
                self.quality,
                self.optimize,
                self.width,
                self.height,
                self.recursive,
                self.target,
            ),
            verbose: self.verbose,
            quiet: self.quiet,
            help: self.help,
        }
    }
}

fn parse_target_extension(value: &str) -> Result<String, String> {
    if value.starts_with('.') && value.len() > 1 {
        Ok(value.to_string())
    } else {
        Err(format!(
            "'{}' is not a target extension; expected something like .png",
            value
        ))
    }
}
