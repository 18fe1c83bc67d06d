pub const DEFAULT_QUALITY: u8 = 90;
pub const MIN_QUALITY: u8 = 1;
pub const MAX_QUALITY: u8 = 100;

/// Quality used by every lossy codec in optimize mode, whatever `-q` says.
pub const OPTIMIZE_QUALITY: u8 = 75;

pub const OPTIMIZED_SUFFIX: &str = "_optimized";

pub const OXIPNG_PRESET: u8 = 4;
pub const LIBDEFLATER_HIGH_LEVEL: u8 = 12;

pub const PROGRESS_SPINNER_TEMPLATE: &str = "{spinner:.green} {msg} [{bytes}]";

pub const BYTES_PER_KIB: f64 = 1024.0;

pub const WILDCARD_CHARS: &[char] = &['*', '?', '['];

pub const QUALITY_ENV: &str = "CONVRT_QUALITY";
pub const LENIENT_ARGS_ENV: &str = "CONVRT_LENIENT_ARGS";

pub const SUCCESS_PREFIX: &str = "✓";
