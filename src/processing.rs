use crate::constants::{OPTIMIZED_SUFFIX, OPTIMIZE_QUALITY, PROGRESS_SPINNER_TEMPLATE};
use crate::error::{ConvertError, Result};
use crate::formats::{encoder_for_extension, encoder_for_image_format, Codec, EncodeSettings};
use crate::logger;
use crate::options::ConversionOptions;
use crate::reporter;
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, ImageReader};
use indicatif::{ProgressBar, ProgressStyle};
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Result of converting one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutcome {
    pub input: PathBuf,
    pub output: PathBuf,
    pub input_size: u64,
    pub output_size: u64,
}

/// Where and how one decoded image gets written.
#[derive(Debug)]
pub struct OutputPlan {
    pub path: PathBuf,
    pub codec: &'static Codec,
    pub settings: EncodeSettings,
}

impl OutputPlan {
    /// Picks the output mode for `input`.
    ///
    /// An explicit target extension wins over `optimize`. Optimize mode keeps
    /// the source format, found from the decoded content, and always encodes
    /// lossy formats at quality 75.
    pub fn resolve(
        input: &Path,
        source_format: ImageFormat,
        options: &ConversionOptions,
    ) -> Result<Self> {
        if let Some(extension) = options.target_extension.as_deref() {
            Ok(Self {
                path: converted_output_path(input, extension),
                codec: encoder_for_extension(extension)?,
                settings: EncodeSettings {
                    quality: options.quality,
                    optimize: false,
                },
            })
        } else if options.optimize {
            Ok(Self {
                path: optimized_output_path(input),
                codec: encoder_for_image_format(source_format)?,
                settings: EncodeSettings {
                    quality: OPTIMIZE_QUALITY,
                    optimize: true,
                },
            })
        } else {
            Err(ConvertError::InvalidInvocation)
        }
    }
}

/// Validates that a file exists at the given path.
///
/// # Example
/// ```
/// use std::path::Path;
/// use convrt::validate_file_exists;
///
/// let result = validate_file_exists(Path::new("nonexistent.jpg"));
/// assert!(result.is_err());
/// ```
pub fn validate_file_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(ConvertError::FileNotFound(path.to_path_buf()));
    }
    Ok(())
}

/// Converts a single file: load -> resize -> encode -> write.
///
/// # Returns
/// * `Ok(ProcessOutcome)` - Paths and sizes in bytes of input and output
/// * `Err(ConvertError)` - If any step fails; no output file is left behind
pub fn process_file(input_path: &Path, options: &ConversionOptions) -> Result<ProcessOutcome> {
    validate_file_exists(input_path)?;
    let input_size = fs::metadata(input_path)?.len();

    let spinner = create_progress_spinner("Processing");
    let converted = convert(input_path, options, &spinner);
    spinner.finish_and_clear();
    let output = converted?;

    let output_size = fs::metadata(&output)?.len();
    Ok(ProcessOutcome {
        input: input_path.to_path_buf(),
        output,
        input_size,
        output_size,
    })
}

fn convert(input_path: &Path, options: &ConversionOptions, spinner: &ProgressBar) -> Result<PathBuf> {
    let (mut img, source_format) = load_image(input_path)?;
    debug!(
        path = %input_path.display(),
        format = ?source_format,
        width = img.width(),
        height = img.height(),
        "decoded image"
    );

    if options.wants_resize() {
        reporter::resizing(options.width, options.height);
        img = resize_image(img, options.width, options.height);
    }

    let plan = OutputPlan::resolve(input_path, source_format, options)?;
    debug!(
        output = %plan.path.display(),
        codec = %plan.codec.format,
        quality = plan.settings.quality,
        "encoding"
    );
    let bytes = plan.codec.encode(&img, &plan.settings)?;
    write_output(&plan.path, &bytes, spinner)?;
    Ok(plan.path)
}

/// Decodes an image, detecting its format from the file content rather than
/// the extension.
pub fn load_image(input_path: &Path) -> Result<(DynamicImage, ImageFormat)> {
    let file = File::open(input_path)?;
    let reader = ImageReader::new(BufReader::new(file)).with_guessed_format()?;
    let format = reader.format();
    let img = reader.decode().map_err(ConvertError::Decode)?;
    // decode() only succeeds once a format has been detected
    let format = format.ok_or_else(|| ConvertError::unsupported("unknown"))?;
    Ok((img, format))
}

/// Output dimensions for a resize request, or `None` when both are 0.
///
/// With only one side given the other follows the original aspect ratio,
/// rounded and never below 1. With both given they are used as is.
pub fn compute_target_dimensions(
    original_width: u32,
    original_height: u32,
    width: u32,
    height: u32,
) -> Option<(u32, u32)> {
    let scaled = |side: u32, num: u32, den: u32| -> u32 {
        let value = (f64::from(side) * f64::from(num) / f64::from(den)).round();
        value.clamp(1.0, f64::from(u32::MAX)) as u32
    };

    match (width, height) {
        (0, 0) => None,
        (0, h) => Some((scaled(original_width, h, original_height.max(1)), h)),
        (w, 0) => Some((w, scaled(original_height, w, original_width.max(1)))),
        (w, h) => Some((w, h)),
    }
}

pub fn resize_image(img: DynamicImage, width: u32, height: u32) -> DynamicImage {
    match compute_target_dimensions(img.width(), img.height(), width, height) {
        Some((w, h)) => img.resize_exact(w, h, FilterType::Lanczos3),
        None => img,
    }
}

/// `<input-without-ext><extension>`, e.g. `photo.jpg` + `.png` -> `photo.png`.
pub fn converted_output_path(input: &Path, extension: &str) -> PathBuf {
    input.with_extension(extension.strip_prefix('.').unwrap_or(extension))
}

/// `<stem>_optimized<original-ext>`, e.g. `photo.jpg` -> `photo_optimized.jpg`.
pub fn optimized_output_path(input: &Path) -> PathBuf {
    let mut name = input
        .file_stem()
        .map(OsString::from)
        .unwrap_or_default();
    name.push(OPTIMIZED_SUFFIX);
    if let Some(extension) = input.extension() {
        name.push(".");
        name.push(extension);
    }
    input.with_file_name(name)
}

fn write_output(path: &Path, bytes: &[u8], progress: &ProgressBar) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = progress.wrap_write(file);
    if let Err(e) = writer.write_all(bytes).and_then(|_| writer.flush()) {
        drop(writer);
        let _ = fs::remove_file(path);
        return Err(e.into());
    }
    Ok(())
}

fn create_progress_spinner(message: &str) -> ProgressBar {
    if logger::is_quiet() {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template(PROGRESS_SPINNER_TEMPLATE) {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb
}
