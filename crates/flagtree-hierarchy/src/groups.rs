//! Clang diagnostic groups.
//!
//! A diagnostic group is a TableGen record such as
//!
//! ```text
//! def Extra : DiagGroup<"extra", [UnusedParameter, SignCompare]>;
//! ```
//!
//! that names a switch (`-Wextra`) and references other group records. The
//! records are aggregated into [`DiagnosticGroups`] and converted into a
//! [`ReferenceGraph`] so that they render like GCC options.

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use flagtree_grammar::tablegen::Definition;
use indexmap::IndexMap;
use tracing::debug;
use tracing::warn;

use crate::ClangConventions;
use crate::ReferenceGraph;

/// The diagnostic groups of a Clang source file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DiagnosticGroups {
    /// The record name of each switch, in source order.
    switch_names: IndexMap<String, Option<String>>,
    /// The switch named by each record.
    switch_classes: BTreeMap<String, String>,
    /// The records referenced by each switch.
    switch_references: BTreeMap<String, Vec<String>>,
    /// Every record referenced by some group.
    referenced: BTreeSet<String>,
}

impl DiagnosticGroups {
    /// Aggregates the given group records.
    ///
    /// Records without a switch name are skipped. A switch defined twice keeps
    /// its last definition.
    pub fn from_definitions(definitions: impl IntoIterator<Item = Definition>) -> Self {
        let mut groups = Self::default();

        for definition in definitions {
            let Some(switch) = definition.switch_name else {
                debug!(
                    "skipping group `{name}` without a switch name",
                    name = definition.name.as_deref().unwrap_or_default()
                );
                continue;
            };

            if let Some(name) = &definition.name {
                groups.switch_classes.insert(name.clone(), switch.clone());
            }

            groups
                .referenced
                .extend(definition.references.iter().cloned());
            groups
                .switch_references
                .insert(switch.clone(), definition.references);
            groups.switch_names.insert(switch, definition.name);
        }

        groups
    }

    /// Gets every switch name in source order.
    pub fn switch_names(&self) -> impl Iterator<Item = &str> {
        self.switch_names.keys().map(String::as_str)
    }

    /// Gets the records referenced by a switch.
    pub fn references(&self, switch: &str) -> &[String] {
        self.switch_references
            .get(switch)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Determines if a switch does nothing.
    ///
    /// A switch does nothing when it is not named by a record and references
    /// no other group.
    pub fn is_dummy(&self, switch: &str) -> bool {
        matches!(self.switch_names.get(switch), Some(None)) && self.references(switch).is_empty()
    }

    /// Determines if a switch is not part of any other group.
    pub fn is_top_level(&self, switch: &str) -> bool {
        match self.switch_names.get(switch) {
            Some(Some(name)) => !self.referenced.contains(name),
            Some(None) => true,
            None => false,
        }
    }

    /// Converts the groups into a [`ReferenceGraph`].
    ///
    /// Each switch becomes a warning flag named with the switch prefix.
    /// References to records that are not groups are dropped with a warning.
    pub fn to_graph(&self, conventions: &ClangConventions) -> ReferenceGraph {
        let prefix = &conventions.switch_prefix;
        let mut graph = ReferenceGraph::new();

        for switch in self.switch_names() {
            let flag = format!("{prefix}{switch}");
            graph.mark_warning(&flag);
            if self.is_dummy(switch) {
                graph.mark_dummy(&flag);
            }

            for reference in self.references(switch) {
                match self.switch_classes.get(reference) {
                    Some(target) => graph.add_reference(&flag, &format!("{prefix}{target}")),
                    None => warn!("skipping unknown group `{reference}` referenced by `-{flag}`"),
                }
            }
        }

        graph
    }
}

#[cfg(test)]
mod tests {
    use flagtree_grammar::tablegen;
    use pretty_assertions::assert_eq;
    use tracing_test::traced_test;

    use super::*;
    use crate::DisplayMode;
    use crate::Renderer;

    const SOURCE: &str = r#"
// Groups referenced before they are defined.
def Extra : DiagGroup<"extra", [UnusedParameter, SignCompare]>;
def UnusedParameter : DiagGroup<"unused-parameter">;
def SignCompare : DiagGroup<"sign-compare">;
def : DiagGroup<"deprecated-writable-strings">;
def : DiagGroup<"all-extra", [Extra]>;
"#;

    fn groups(source: &str) -> DiagnosticGroups {
        DiagnosticGroups::from_definitions(tablegen::definitions(source, "DiagGroup").unwrap())
    }

    #[test]
    fn it_keeps_switches_in_source_order() {
        let groups = groups(SOURCE);
        assert_eq!(
            groups.switch_names().collect::<Vec<_>>(),
            [
                "extra",
                "unused-parameter",
                "sign-compare",
                "deprecated-writable-strings",
                "all-extra"
            ]
        );
        assert_eq!(groups.references("extra"), ["UnusedParameter", "SignCompare"]);
    }

    #[test]
    fn it_detects_dummy_switches() {
        let groups = groups(SOURCE);
        assert!(groups.is_dummy("deprecated-writable-strings"));
        assert!(!groups.is_dummy("sign-compare"));
        assert!(!groups.is_dummy("all-extra"));
    }

    #[test]
    fn it_detects_top_level_switches() {
        let groups = groups(SOURCE);
        assert!(!groups.is_top_level("extra"));
        assert!(!groups.is_top_level("unused-parameter"));
        assert!(groups.is_top_level("all-extra"));
        assert!(groups.is_top_level("deprecated-writable-strings"));
        assert!(!groups.is_top_level("missing"));
    }

    #[test]
    fn it_agrees_with_the_graph_on_top_level_switches() {
        let groups = groups(SOURCE);
        let conventions = ClangConventions::default();
        let graph = groups.to_graph(&conventions);

        for switch in groups.switch_names() {
            assert_eq!(
                groups.is_top_level(switch),
                graph.is_top_level(&format!("W{switch}")),
                "`{switch}`"
            );
        }
    }

    #[test]
    fn it_renders_the_hierarchy() {
        let graph = groups(SOURCE).to_graph(&ClangConventions::default());
        assert_eq!(
            Renderer::new(&graph, DisplayMode::All).render().text,
            "\
-Wall-extra
#   -Wextra
#     -Wsign-compare
#     -Wunused-parameter
-Wdeprecated-writable-strings # DUMMY switch
-Wextra
#   -Wsign-compare
#   -Wunused-parameter
-Wsign-compare
-Wunused-parameter
"
        );
        assert_eq!(
            Renderer::new(&graph, DisplayMode::TopLevel).render().text,
            "\
-Wall-extra
#   -Wextra
#     -Wsign-compare
#     -Wunused-parameter
-Wdeprecated-writable-strings # DUMMY switch
"
        );
    }

    #[test]
    fn it_keeps_empty_switch_names() {
        let graph = groups(
            r#"
def Empty : DiagGroup<"">;
def : DiagGroup<"parent", [Empty]>;
"#,
        )
        .to_graph(&ClangConventions::default());

        assert!(graph.contains("W"));
        assert!(!graph.is_dummy("W"));
        assert_eq!(graph.references("Wparent").collect::<Vec<_>>(), ["W"]);
    }

    #[test]
    #[traced_test]
    fn it_drops_unknown_references() {
        let graph = groups(r#"def Foo : DiagGroup<"foo", [Missing]>;"#)
            .to_graph(&ClangConventions::default());

        assert_eq!(graph.references("Wfoo").count(), 0);
        assert!(logs_contain(
            "skipping unknown group `Missing` referenced by `-Wfoo`"
        ));
    }
}
