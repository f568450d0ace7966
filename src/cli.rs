// File: ./src/cli.rs
//! Command-line flags and help text for the binary.
use crate::model::CommandKind;
use std::path::PathBuf;
use strum::IntoEnumIterator;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliAction {
    Run { root: Option<PathBuf> },
    Help,
    Version,
}

/// Parses arguments after the binary name.
pub fn parse_args<I, S>(args: I) -> Result<CliAction, String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut root = None;
    let mut args = args.into_iter().map(Into::into);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" | "help" => return Ok(CliAction::Help),
            "-V" | "--version" => return Ok(CliAction::Version),
            "-r" | "--root" => {
                let value = args
                    .next()
                    .ok_or_else(|| format!("{arg} requires a directory argument"))?;
                root = Some(PathBuf::from(value));
            }
            other => {
                if let Some(value) = other.strip_prefix("--root=") {
                    root = Some(PathBuf::from(value));
                } else {
                    return Err(format!("Unknown argument: {other}"));
                }
            }
        }
    }

    Ok(CliAction::Run { root })
}

pub fn print_help(binary_name: &str) {
    println!(
        "Echo v{} - a small conversational task tracker",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("USAGE:");
    println!("    {} [--root <path>]", binary_name);
    println!("    {} --help", binary_name);
    println!();
    println!("OPTIONS:");
    println!("    -r, --root <path>     Use a different directory for config and data.");
    println!("    -h, --help            Show this help message.");
    println!("    -V, --version         Show the version.");
    println!();
    println!("COMMANDS (inside the app):");
    println!("    todo <description>");
    println!("    deadline <description> /by <yyyy-mm-dd HHmm>");
    println!("    event <description> /from <yyyy-mm-dd HHmm> /to <yyyy-mm-dd HHmm>");
    println!("    list");
    println!("    mark <n> | unmark <n> | delete <n>");
    println!("    find <keyword>");
    println!("    bye");
    println!();
    let keywords: Vec<String> = CommandKind::iter().map(|k| k.to_string()).collect();
    println!("Keywords are case-insensitive: {}", keywords.join(", "));
    println!();
    println!("EXAMPLES:");
    println!("    deadline return book /by 2026-06-06 1400");
    println!("    event project meeting /from 2026-01-27 1200 /to 2026-01-27 1500");
}
