//! Command-line interface for converting LibGuides exports.

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use lgx::{clean, decode};

#[derive(Parser)]
#[command(name = "lgx", version)]
#[command(about = "Convert LibGuides XML exports to JSON")]
#[command(after_help = "EXAMPLES:
    lgx export.xml > export.json
    lgx --pretty export.xml")]
struct Cli {
    /// Path to the XML export file
    input: PathBuf,

    /// Pretty-print the JSON output
    #[arg(short, long)]
    pretty: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> lgx::Result<()> {
    let src = std::fs::read(&cli.input)?;
    let export = decode(&clean(&src))?;
    let json = if cli.pretty {
        export.to_json_pretty()?
    } else {
        export.to_json()?
    };

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(&json)?;
    stdout.write_all(b"\n")?;
    Ok(())
}
