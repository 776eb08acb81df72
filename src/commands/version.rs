use anyhow::Result;
use std::io::Write;

pub fn banner() -> String {
    format!("pstree {}\nCopyleft (C) 0000-0000", env!("CARGO_PKG_VERSION"))
}

/// Print the version banner to `err`
pub fn execute<W: Write>(err: &mut W) -> Result<()> {
    writeln!(err, "{}", banner())?;
    Ok(())
}
