use clap::Parser;
use downlink_strip::validate_and_strip;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "strip-header", about = "Validate and strip the control header from a downlinked file")]
struct Cli {
    /// Downlinked file: 36-byte control header followed by the payload
    input: PathBuf,
    /// Destination for the payload; left untouched if validation fails
    output: PathBuf,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .init();

    let cli = Cli::parse();
    match validate_and_strip(&cli.input, &cli.output) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(input = %cli.input.display(), "{e}");
            ExitCode::FAILURE
        }
    }
}
