//! Implementation of the `gcc` subcommand.

use std::path::PathBuf;

use anyhow::Context;
use anyhow::Result;
use clap::Parser;
use flagtree_grammar::gcc::option_records;
use flagtree_hierarchy::GccConventions;
use flagtree_hierarchy::GraphBuilder;
use tracing::info;

use super::DisplayArgs;
use super::print_graph;
use super::read_source;

/// Arguments for the `gcc` subcommand.
#[derive(Parser, Debug)]
pub struct Args {
    /// The option files to read (for example, `gcc/common.opt`).
    #[arg(required = true, value_name = "OPTION_FILE")]
    pub files: Vec<PathBuf>,

    /// Which flags to print.
    #[command(flatten)]
    pub display: DisplayArgs,
}

/// Prints the warning flags defined by GCC option files.
pub fn gcc(args: Args, conventions: &GccConventions) -> Result<()> {
    let mut builder = GraphBuilder::new(conventions);

    for path in &args.files {
        let source = read_source(path)?;
        let records = option_records(&source, &conventions.boring_options);
        info!(
            "read {count} options from `{path}`",
            count = records.len(),
            path = path.display()
        );

        builder
            .add_file(&records)
            .with_context(|| format!("failed to add options from `{}`", path.display()))?;
    }

    print_graph(&builder.finish(), args.display.mode())
}
