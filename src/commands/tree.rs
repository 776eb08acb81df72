// Tree command - collects the process snapshot, builds the tree and prints it

use std::io::Write;

use anyhow::Result;

use crate::cli::Options;
use crate::core::{build_process_tree, ProcessSource};
use crate::ui::{write_tree, RenderOptions};

/// Print the tree for `source` to `out`
pub fn run<S, W>(options: &Options, source: &S, out: &mut W) -> Result<()>
where
    S: ProcessSource + ?Sized,
    W: Write,
{
    let records = source.collect()?;
    log::debug!(
        "Building tree from {} records ({:?} order)",
        records.len(),
        options.sibling_order
    );

    let root = build_process_tree(records, options.sibling_order);
    log::debug!("Tree holds {} processes", root.descendant_count());
    let render_options = RenderOptions {
        show_pids: options.show_pids,
    };
    write_tree(out, &root, &render_options)?;

    Ok(())
}
