//! Implementation of the `clang` subcommand.

use std::path::PathBuf;

use anyhow::Context;
use anyhow::Result;
use clap::Parser;
use flagtree_grammar::tablegen;
use flagtree_hierarchy::ClangConventions;
use flagtree_hierarchy::DiagnosticGroups;
use tracing::info;

use super::DisplayArgs;
use super::print_graph;
use super::read_source;

/// Arguments for the `clang` subcommand.
#[derive(Parser, Debug)]
pub struct Args {
    /// The diagnostic groups file to read (for example,
    /// `clang/include/clang/Basic/DiagnosticGroups.td`).
    #[arg(value_name = "GROUPS_FILE")]
    pub file: PathBuf,

    /// Which flags to print.
    #[command(flatten)]
    pub display: DisplayArgs,
}

/// Prints the warning flags defined by a Clang diagnostic groups file.
pub fn clang(args: Args, conventions: &ClangConventions) -> Result<()> {
    let source = read_source(&args.file)?;
    let definitions = tablegen::definitions(&source, &conventions.group_class)
        .with_context(|| format!("failed to parse `{}`", args.file.display()))?;
    info!(
        "read {count} `{class}` definitions from `{path}`",
        count = definitions.len(),
        class = conventions.group_class,
        path = args.file.display()
    );

    let groups = DiagnosticGroups::from_definitions(definitions);
    print_graph(&groups.to_graph(conventions), args.display.mode())
}
