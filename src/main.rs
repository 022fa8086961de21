mod cli;

use crate::cli::Cli;
use clap::Parser;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.run() {
        Err(err) => {
            eprintln!("\x1b[31m{}\x1b[0m", report(&err));
            ExitCode::from(1)
        }
        Ok(_) => ExitCode::from(0),
    }
}

// The "Caused by" block only shows up when there is a cause to show.
fn report(err: &eyre::Report) -> String {
    let mut out = format!("Error: {}", err);
    if err.chain().count() > 1 {
        out.push_str(&format!("\n\nCaused by:\n  {}", err.root_cause()));
    }
    out
}
