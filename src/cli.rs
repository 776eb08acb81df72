//! Command-line parsing.

use std::ffi::OsString;
use std::io::Write;

use clap::error::{ContextKind, ContextValue};
use clap::{Arg, ArgAction, Command};

use crate::core::process_tree::SiblingOrder;
use crate::error::{PstreeError, Result};

pub const USAGE: &str =
    "Usage: pstree [-p | --show-pids] [-n | --numeric-sort] [-V | --version]";

const VERSION_TOKENS: [&str; 2] = ["-V", "--version"];

/// Every token the command line accepts, spelled exactly
const KNOWN_TOKENS: [&str; 8] = [
    "-p",
    "--show-pids",
    "-n",
    "--numeric-sort",
    "-V",
    "--version",
    "-h",
    "--help",
];

/// Options for printing the process tree
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Options {
    pub show_pids: bool,
    pub sibling_order: SiblingOrder,
}

/// What the command line asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Invocation {
    Run(Options),
    Version,
    Help,
}

pub fn build_cli() -> Command {
    Command::new("pstree")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Display a tree of processes")
        .override_usage(USAGE)
        .disable_version_flag(true)
        .disable_help_flag(true)
        .args_override_self(true)
        .arg(
            Arg::new("show-pids")
                .short('p')
                .long("show-pids")
                .help("Show the pid of each process")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("numeric-sort")
                .short('n')
                .long("numeric-sort")
                .help("Sort sibling processes by pid instead of discovery order")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("version")
                .short('V')
                .long("version")
                .help("Print version information")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("help")
                .short('h')
                .long("help")
                .help("Print usage")
                .action(ArgAction::SetTrue),
        )
}

/// Parse a full argument list, including the program name.
///
/// Each token must be one of the documented flags spelled out in full, so
/// clustered shorts (`-pn`), `--` and `--flag=value` are all rejected with
/// the whole token echoed back.
pub fn parse_from<I, T>(args: I) -> Result<Invocation>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();

    // Tokens are checked left to right, so a version flag before a bad token wins
    for arg in args.iter().skip(1) {
        let lossy = arg.to_string_lossy();
        let token: &str = &lossy;
        if VERSION_TOKENS.contains(&token) {
            return Ok(Invocation::Version);
        }
        if !KNOWN_TOKENS.contains(&token) {
            return Err(PstreeError::invalid_option(token));
        }
    }

    let matches = build_cli().try_get_matches_from(&args).map_err(|err| {
        log::debug!("Argument parsing failed: {}", err.kind());
        PstreeError::invalid_option(offending_token(&err))
    })?;

    if matches.get_flag("help") {
        return Ok(Invocation::Help);
    }

    let sibling_order = if matches.get_flag("numeric-sort") {
        SiblingOrder::Numeric
    } else {
        SiblingOrder::Discovery
    };

    Ok(Invocation::Run(Options {
        show_pids: matches.get_flag("show-pids"),
        sibling_order,
    }))
}

pub fn print_usage<W: Write>(out: &mut W) {
    // Nothing useful can be done if stderr itself is gone
    let _ = writeln!(out, "{}", USAGE);
}

fn offending_token(err: &clap::Error) -> String {
    match err.get(ContextKind::InvalidArg) {
        Some(ContextValue::String(token)) => token.clone(),
        _ => err.kind().to_string(),
    }
}
