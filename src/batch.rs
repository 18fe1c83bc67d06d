use crate::constants::WILDCARD_CHARS;
use crate::error::Result;
use crate::options::ConversionOptions;
use crate::processing::process_file;
use crate::reporter;
use glob::glob;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Counters for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub processed: usize,
    pub failed: usize,
    pub bytes_before: u64,
    pub bytes_after: u64,
}

impl BatchSummary {
    pub fn attempted(&self) -> usize {
        self.processed + self.failed
    }
}

/// Converts everything `input` names, one file at a time in resolution
/// order. A failing file is reported and counted; it never stops the run.
pub fn run_batch(input: &str, options: &ConversionOptions) -> BatchSummary {
    let mut summary = BatchSummary::default();

    for path in expand_input(input) {
        if path.is_dir() {
            if !options.recursive {
                debug!(path = %path.display(), "walking directory recursively although -r was not given");
            }
            match collect_directory_files(&path) {
                Ok(files) => {
                    for file in files {
                        process_one(&file, options, &mut summary);
                    }
                }
                Err(e) => {
                    reporter::failure(&path, &e);
                    summary.failed += 1;
                }
            }
        } else {
            process_one(&path, options, &mut summary);
        }
    }

    summary
}

fn process_one(path: &Path, options: &ConversionOptions, summary: &mut BatchSummary) {
    match process_file(path, options) {
        Ok(outcome) => {
            reporter::success(&outcome);
            summary.processed += 1;
            summary.bytes_before += outcome.input_size;
            summary.bytes_after += outcome.output_size;
        }
        Err(e) => {
            reporter::failure(path, &e);
            summary.failed += 1;
        }
    }
}

/// Expands one command-line argument into paths.
///
/// Arguments with a wildcard are glob-expanded; an invalid pattern or one
/// without matches falls back to the literal path, as does any argument
/// without a wildcard.
pub fn expand_input(input: &str) -> Vec<PathBuf> {
    if input.contains(WILDCARD_CHARS) {
        match glob(input) {
            Ok(paths) => {
                let matches: Vec<PathBuf> = paths.flatten().collect();
                if !matches.is_empty() {
                    debug!(pattern = input, matches = matches.len(), "expanded glob");
                    return matches;
                }
            }
            Err(e) => warn!(pattern = input, error = %e, "invalid glob pattern, using it as a path"),
        }
    }
    vec![PathBuf::from(input)]
}

/// Every regular file beneath `dir`, at any depth, sorted by name within
/// each directory. The listing is complete before it is returned, so files
/// written into `dir` afterwards are not picked up.
pub fn collect_directory_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }
    debug!(dir = %dir.display(), files = files.len(), "collected directory");
    Ok(files)
}
