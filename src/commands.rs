//! Implementation of flagtree CLI commands.

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::Context;
use anyhow::Result;
use clap::Args;
use flagtree_hierarchy::DisplayMode;
use flagtree_hierarchy::ReferenceGraph;
use flagtree_hierarchy::Renderer;
use tracing::debug;

pub mod clang;
pub mod gcc;

/// Arguments controlling which flags are printed.
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct DisplayArgs {
    /// Prints only flags that are not enabled by another flag and are not
    /// aliases.
    #[arg(long, conflicts_with = "unique")]
    pub top_level: bool,

    /// Prints every flag once, without the flags it enables.
    #[arg(long)]
    pub unique: bool,
}

impl DisplayArgs {
    /// Gets the display mode selected by the arguments.
    pub fn mode(&self) -> DisplayMode {
        if self.top_level {
            DisplayMode::TopLevel
        } else if self.unique {
            DisplayMode::Unique
        } else {
            DisplayMode::All
        }
    }
}

/// Reads a source file.
fn read_source(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read `{}`", path.display()))
}

/// Renders a graph to standard output.
fn print_graph(graph: &ReferenceGraph, mode: DisplayMode) -> Result<()> {
    let rendering = Renderer::new(graph, mode).render();
    if !rendering.cycles.is_empty() {
        debug!(
            "skipped {count} cyclic references",
            count = rendering.cycles.len()
        );
    }

    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(rendering.text.as_bytes())
        .and_then(|_| stdout.flush())
        .context("failed to write to standard output")
}
