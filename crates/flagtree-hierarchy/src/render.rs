//! Rendering of a [`ReferenceGraph`] as an indented hierarchy.
//!
//! Every flag is printed as a heading line, followed by the flags it enables
//! as comment lines indented by depth:
//!
//! ```text
//! -Wbar
//! -Wfoo
//! #   -Wbar
//! ```

use std::collections::HashSet;

use itertools::Itertools as _;
use tracing::warn;

use crate::ReferenceGraph;

/// The annotation appended to flags that do nothing.
const DUMMY_ANNOTATION: &str = " # DUMMY switch";

/// Which flags to print and how much of the hierarchy to expand.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DisplayMode {
    /// Prints every flag with the flags it enables.
    #[default]
    All,
    /// Prints only flags that are not enabled by another flag and are not
    /// aliases, with the flags they enable.
    TopLevel,
    /// Prints every flag once, without the flags it enables.
    Unique,
}

/// The result of rendering a graph.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Rendering {
    /// The rendered text; every line ends with a newline.
    pub text: String,
    /// The `(flag, child)` edges that were skipped because `child` was
    /// already on the path being expanded.
    pub cycles: Vec<(String, String)>,
}

/// Sorts flag names case-insensitively.
///
/// Names that only differ in case are ordered bytewise so that the result is
/// deterministic.
fn sorted<'a>(names: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    names
        .sorted_by_cached_key(|name| (name.to_lowercase(), *name))
        .collect()
}

/// Renders a [`ReferenceGraph`].
#[derive(Debug)]
pub struct Renderer<'a> {
    /// The graph to render.
    graph: &'a ReferenceGraph,
    /// The display mode.
    mode: DisplayMode,
}

impl<'a> Renderer<'a> {
    /// Creates a new renderer.
    pub fn new(graph: &'a ReferenceGraph, mode: DisplayMode) -> Self {
        Self { graph, mode }
    }

    /// Renders the graph.
    ///
    /// # Examples
    ///
    /// ```
    /// use flagtree_hierarchy::DisplayMode;
    /// use flagtree_hierarchy::ReferenceGraph;
    /// use flagtree_hierarchy::Renderer;
    ///
    /// let mut graph = ReferenceGraph::new();
    /// graph.mark_warning("Wfoo");
    /// graph.mark_warning("Wbar");
    /// graph.add_reference("Wfoo", "Wbar");
    ///
    /// let rendering = Renderer::new(&graph, DisplayMode::All).render();
    /// assert_eq!(rendering.text, "-Wbar\n-Wfoo\n#   -Wbar\n");
    /// ```
    pub fn render(&self) -> Rendering {
        let mut rendering = Rendering::default();

        for flag in sorted(self.graph.nodes()) {
            if self.mode == DisplayMode::TopLevel && !self.graph.is_top_level(flag) {
                continue;
            }

            rendering.text.push_str(&self.heading(flag));
            rendering.text.push('\n');

            if self.mode == DisplayMode::Unique {
                continue;
            }

            let mut path = HashSet::from([flag]);
            self.children(flag, 1, &mut path, &mut rendering);
        }

        rendering
    }

    /// Formats the heading line of a flag.
    fn heading(&self, flag: &str) -> String {
        let mut line = format!("-{flag}");

        let targets = sorted(self.graph.aliases(flag));
        if !targets.is_empty() {
            line.push_str(" = ");
            line.push_str(&targets.iter().map(|t| format!("-{t}")).join(", "));
        }

        line.push_str(self.annotation(flag));
        line
    }

    /// Gets the annotation for a flag.
    fn annotation(&self, flag: &str) -> &'static str {
        if self.graph.is_dummy(flag) {
            DUMMY_ANNOTATION
        } else {
            ""
        }
    }

    /// Renders the flags enabled by `flag` at the given depth.
    ///
    /// `path` holds the flags being expanded above this one; a child already
    /// on the path closes a cycle and is skipped.
    fn children(
        &self,
        flag: &'a str,
        depth: usize,
        path: &mut HashSet<&'a str>,
        rendering: &mut Rendering,
    ) {
        for child in sorted(self.graph.references(flag)) {
            if path.contains(child) {
                warn!("skipping cyclic reference from `-{flag}` to `-{child}`");
                rendering.cycles.push((flag.to_string(), child.to_string()));
                continue;
            }

            rendering.text.push_str(&format!(
                "# {indent}-{child}{annotation}\n",
                indent = "  ".repeat(depth),
                annotation = self.annotation(child)
            ));

            path.insert(child);
            self.children(child, depth + 1, path, rendering);
            path.remove(child);
        }
    }
}
