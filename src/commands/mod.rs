// Command handlers module
pub mod tree;
pub mod version;

use std::ffi::OsString;
use std::io::Write;

use crate::cli::{self, Invocation};
use crate::core::ProcessSource;
use crate::error::PstreeError;

/// Run pstree end to end and return the process exit status.
///
/// The tree goes to `out`; diagnostics, usage and the version banner go to `err`.
pub fn run<I, T, S, W, E>(args: I, source: &S, out: &mut W, err: &mut E) -> u8
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
    S: ProcessSource + ?Sized,
    W: Write,
    E: Write,
{
    let invocation = match cli::parse_from(args) {
        Ok(invocation) => invocation,
        Err(e) => {
            // A failed diagnostic write has nowhere left to be reported
            let _ = writeln!(err, "pstree: {}", e);
            cli::print_usage(err);
            return e.exit_code();
        }
    };

    let result = match invocation {
        Invocation::Version => version::execute(err),
        Invocation::Help => {
            cli::print_usage(err);
            Ok(())
        }
        Invocation::Run(options) => tree::run(&options, source, out),
    };

    match result {
        Ok(()) => 0,
        Err(e) => {
            // Same for the final error report
            let _ = writeln!(err, "pstree: {:#}", e);
            e.downcast_ref::<PstreeError>()
                .map_or(1, PstreeError::exit_code)
        }
    }
}
