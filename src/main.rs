use anyhow::Context;
use clap::error::ErrorKind;
use clap::Parser;
use convrt::cli::Args;
use convrt::constants::LENIENT_ARGS_ENV;
use convrt::{logger, reporter, run_batch, Invocation};
use std::env;
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> anyhow::Result<ExitCode> {
    let argv: Vec<String> = env::args_os()
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect();

    if argv.len() < 2 {
        reporter::print_usage();
        return Ok(ExitCode::from(1));
    }

    let invocation = if lenient_args_enabled() {
        Invocation::from_lenient_args(&argv)
    } else {
        match Args::try_parse_from(&argv) {
            Ok(args) => args.into_invocation(),
            Err(e) if e.kind() == ErrorKind::DisplayVersion => e.exit(),
            Err(e) => {
                let _ = e.print();
                reporter::print_usage();
                return Ok(ExitCode::from(2));
            }
        }
    };

    let input = match invocation.input {
        Some(input) if !invocation.help => input,
        _ => {
            reporter::print_usage();
            return Ok(ExitCode::from(1));
        }
    };

    logger::init(invocation.verbose, invocation.quiet)
        .context("failed to initialise logging")?;

    let summary = run_batch(&input, &invocation.options);
    reporter::batch_summary(&summary);

    // Per-file failures have already been reported; they do not change the exit status
    Ok(ExitCode::SUCCESS)
}

fn lenient_args_enabled() -> bool {
    env::var(LENIENT_ARGS_ENV)
        .map(|value| !matches!(value.trim(), "" | "0" | "false"))
        .unwrap_or(false)
}
