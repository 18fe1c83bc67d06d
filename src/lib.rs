pub mod batch;
pub mod cli;
pub mod constants;
pub mod error;
pub mod formats;
pub mod logger;
pub mod options;
pub mod processing;
pub mod reporter;

pub use batch::{collect_directory_files, expand_input, run_batch, BatchSummary};
pub use error::{ConvertError, Result};
pub use formats::{codec_for_extension, supported_extensions, Codec, CodecFormat, EncodeSettings};
pub use options::{ConversionOptions, Invocation};
pub use processing::{
    compute_target_dimensions, converted_output_path, load_image, optimized_output_path,
    process_file, resize_image, validate_file_exists, OutputPlan, ProcessOutcome,
};
