use std::env;
use std::io::{self, BufWriter};
use std::process::ExitCode;

use pstree::commands;
use pstree::core::ProcfsSource;

fn main() -> ExitCode {
    pstree::init_logging();

    let source = ProcfsSource::new();
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let mut err = io::stderr();

    ExitCode::from(commands::run(env::args_os(), &source, &mut out, &mut err))
}
