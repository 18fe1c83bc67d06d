//! Terminal output for users.
//!
//! Progress and success lines go to stdout and are suppressed in quiet mode;
//! failures always go to stderr.

use crate::batch::BatchSummary;
use crate::constants::{BYTES_PER_KIB, SUCCESS_PREFIX};
use crate::error::ConvertError;
use crate::logger::is_quiet;
use crate::processing::ProcessOutcome;
use colored::Colorize;
use std::path::Path;

pub fn usage_text() -> String {
    [
        "",
        "Options:",
        "  -o, --optimize     Optimize the image",
        "  -q, --quality N    Set quality (1-100, default: 90)",
        "  -w, --width N      Resize to width N",
        "  -h, --height N     Resize to height N",
        "  -r, --recursive    Process directories recursively",
        "  -v, --verbose      Print debug diagnostics",
        "      --quiet        Only print errors",
        "",
        "Examples:",
        "  convrt image.jpg .png              # Convert to PNG",
        "  convrt image.png .jpg -q 85        # Convert to JPEG with quality 85",
        "  convrt image.jpg -o                # Optimize the image",
        "  convrt image.jpg .webp -w 800      # Convert to WebP and resize width to 800px",
        "  convrt \"images/*.jpg\" .webp        # Convert all JPGs to WebP",
        "  convrt images/ -o -r               # Optimize all images in directory recursively",
    ]
    .join("\n")
}

pub fn print_usage() {
    println!("{}", "Usage: convrt [input] [.format] [options]".blue());
    println!("{}", usage_text());
}

pub fn resizing(width: u32, height: u32) {
    if !is_quiet() {
        println!("{}", format!("Resizing image to {}x{}", width, height).blue());
    }
}

pub fn size_in_kib(bytes: u64) -> f64 {
    bytes as f64 / BYTES_PER_KIB
}

/// Percentage saved going from `input_size` to `output_size`, or `None`
/// unless the output is strictly smaller.
pub fn size_reduction(input_size: u64, output_size: u64) -> Option<f64> {
    let input_kib = size_in_kib(input_size);
    let output_kib = size_in_kib(output_size);
    if input_kib <= 0.0 {
        return None;
    }
    let reduction = (input_kib - output_kib) / input_kib * 100.0;
    (reduction > 0.0).then_some(reduction)
}

pub fn success_lines(outcome: &ProcessOutcome) -> Vec<String> {
    let mut lines = vec![
        format!(
            "Input:  {} ({:.2} KB)",
            outcome.input.display(),
            size_in_kib(outcome.input_size)
        ),
        format!(
            "Output: {} ({:.2} KB)",
            outcome.output.display(),
            size_in_kib(outcome.output_size)
        ),
    ];
    if let Some(reduction) = size_reduction(outcome.input_size, outcome.output_size) {
        lines.push(format!("Size reduced by {:.2}%", reduction));
    }
    lines
}

pub fn success(outcome: &ProcessOutcome) {
    if is_quiet() {
        return;
    }
    println!(
        "{}",
        format!("\n{} Successfully processed image!", SUCCESS_PREFIX).green()
    );
    for line in success_lines(outcome) {
        if line.starts_with("Size reduced") {
            println!("{}", line.green());
        } else {
            println!("{}", line);
        }
    }
}

pub fn failure(path: &Path, error: &ConvertError) {
    eprintln!(
        "{}",
        format!("Error processing {}: {}", path.display(), error).red()
    );
}

pub fn summary_line(summary: &BatchSummary) -> String {
    let mut line = format!(
        "Processed {} of {} files",
        summary.processed,
        summary.attempted()
    );
    if summary.failed > 0 {
        line.push_str(&format!(", {} failed", summary.failed));
    }
    if let Some(reduction) = size_reduction(summary.bytes_before, summary.bytes_after) {
        line.push_str(&format!(", total size reduced by {:.2}%", reduction));
    }
    line
}

/// Printed only for runs that touched more than one file.
pub fn batch_summary(summary: &BatchSummary) {
    if is_quiet() || summary.attempted() <= 1 {
        return;
    }
    let line = summary_line(summary);
    if summary.failed > 0 {
        println!("\n{}", line.yellow());
    } else {
        println!("\n{}", line.green());
    }
}
