use crate::constants::{DEFAULT_QUALITY, MAX_QUALITY, MIN_QUALITY};

/// Settings shared by every file of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionOptions {
    pub quality: u8,
    pub optimize: bool,
    /// Target width in pixels, 0 when unspecified
    pub width: u32,
    /// Target height in pixels, 0 when unspecified
    pub height: u32,
    /// Accepted for compatibility; directory inputs are always walked recursively
    pub recursive: bool,
    /// Explicit target such as `.png`, leading dot included
    pub target_extension: Option<String>,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            quality: DEFAULT_QUALITY,
            optimize: false,
            width: 0,
            height: 0,
            recursive: false,
            target_extension: None,
        }
    }
}

impl ConversionOptions {
    /// Builds options from raw command-line values. Quality is clamped into
    /// `[1, 100]` and negative dimensions become 0.
    pub fn new(
        quality: i64,
        optimize: bool,
        width: i64,
        height: i64,
        recursive: bool,
        target_extension: Option<String>,
    ) -> Self {
        Self {
            quality: clamp_quality(quality),
            optimize,
            width: clamp_dimension(width),
            height: clamp_dimension(height),
            recursive,
            target_extension,
        }
    }

    pub fn wants_resize(&self) -> bool {
        self.width > 0 || self.height > 0
    }
}

pub fn clamp_quality(quality: i64) -> u8 {
    quality.clamp(i64::from(MIN_QUALITY), i64::from(MAX_QUALITY)) as u8
}

pub fn clamp_dimension(value: i64) -> u32 {
    value.clamp(0, i64::from(u32::MAX)) as u32
}

/// Everything the binary needs from the command line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Invocation {
    pub input: Option<String>,
    pub options: ConversionOptions,
    pub verbose: bool,
    pub quiet: bool,
    pub help: bool,
}

impl Invocation {
    /// Legacy permissive parsing. `args[0]` is the program name.
    ///
    /// Unknown tokens are ignored. A numeric flag whose value does not start
    /// with an integer keeps its previous value, and that value token is then
    /// scanned as a flag itself.
    pub fn from_lenient_args(args: &[String]) -> Self {
        let mut quality = i64::from(DEFAULT_QUALITY);
        let mut width = 0;
        let mut height = 0;
        let mut optimize = false;
        let mut recursive = false;

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "-o" | "--optimize" => optimize = true,
                "-r" | "--recursive" => recursive = true,
                "-q" | "--quality" | "-w" | "--width" | "-h" | "--height" => {
                    if let Some(value) = args.get(i + 1).and_then(|v| scan_leading_int(v)) {
                        match args[i].as_str() {
                            "-q" | "--quality" => quality = value,
                            "-w" | "--width" => width = value,
                            _ => height = value,
                        }
                        i += 1;
                    }
                }
                _ => {}
            }
            i += 1;
        }

        let target_extension = args.get(2).filter(|arg| arg.starts_with('.')).cloned();

        Self {
            input: args.get(1).cloned(),
            options: ConversionOptions::new(
                quality,
                optimize,
                width,
                height,
                recursive,
                target_extension,
            ),
            verbose: false,
            quiet: false,
            help: false,
        }
    }
}

/// Reads a decimal integer from the start of `token` the way `%d` scanning
/// does: leading whitespace and an optional sign are accepted, trailing text
/// is ignored.
fn scan_leading_int(token: &str) -> Option<i64> {
    let trimmed = token.trim_start();
    let sign_len = usize::from(trimmed.starts_with(['+', '-']));
    let digits = trimmed[sign_len..]
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .count();
    if digits == 0 {
        return None;
    }
    trimmed[..sign_len + digits].parse().ok()
}
