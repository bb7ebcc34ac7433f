//! Command-line entry point: validate a robots.txt file.
//!
//! Prints `true` and exits 0 when the file is legal, prints `false` and
//! exits 1 when it is not, and exits 2 when the file cannot be read. With
//! `--json` the parsed directives are printed instead of `true`.

use facet::Facet;
use robotcheck::{load, parse_lines, IdentifierClass, ParseOptions};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

const DEFAULT_PATH: &str = "./robots.txt";

/// Command-line arguments.
#[derive(Facet)]
struct Args {
    /// Path to the robots.txt file (default: `./robots.txt`).
    #[facet(positional, default)]
    path: Option<String>,

    /// Print the parsed directives as JSON.
    #[facet(named, short = 'j', default)]
    json: bool,

    /// Skip misplaced and unrecognized lines instead of rejecting the file.
    #[facet(named, short = 'i', default)]
    ignore_unsupported: bool,

    /// Widen user-agent identifiers to admit spaces, dots and slashes.
    #[facet(named, short = 'l', default)]
    legacy_identifiers: bool,
}

impl Args {
    fn options(&self) -> ParseOptions {
        let identifiers = if self.legacy_identifiers {
            IdentifierClass::Legacy
        } else {
            IdentifierClass::Standard
        };
        ParseOptions {
            ignore_unsupported: self.ignore_unsupported,
            identifiers,
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Args = match facet_args::from_std_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::from(2);
        }
    };
    let path = args.path.as_deref().unwrap_or(DEFAULT_PATH);

    let lines = match load(path) {
        Ok(lines) => lines,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::from(2);
        }
    };

    match parse_lines(&lines, &args.options()) {
        Ok(map) => {
            if args.json {
                println!("{}", map.to_json());
            } else {
                println!("true");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            println!("false");
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
