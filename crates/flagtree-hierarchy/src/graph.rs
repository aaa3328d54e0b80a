//! The warning flag reference graph.

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use flagtree_grammar::gcc::AttributeExpression;
use flagtree_grammar::gcc::OptionRecord;
use thiserror::Error;
use tracing::debug;
use tracing::warn;

use crate::FlagFacts;
use crate::GccConventions;

/// An error produced while building a [`ReferenceGraph`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GraphError {
    /// Two input files disagree about the alias targets of a flag.
    #[error(
        "conflicting aliases for `-{flag}`: previously `{previous}`, now `{current}`",
        previous = join(.existing),
        current = join(.conflicting)
    )]
    ConflictingAlias {
        /// The aliased flag.
        flag: String,
        /// The targets recorded from earlier files.
        existing: BTreeSet<String>,
        /// The targets found in the current file.
        conflicting: BTreeSet<String>,
    },
}

/// Formats a set of flags for an error message.
fn join(flags: &BTreeSet<String>) -> String {
    flags
        .iter()
        .map(|f| format!("-{f}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// A directed graph of warning flags.
///
/// An edge `a → b` in [`references`](Self::references) means that enabling
/// `a` also enables `b`. Every flag that takes part in any relation is a node,
/// even when no input defined it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReferenceGraph {
    /// Every known flag.
    nodes: BTreeSet<String>,
    /// The flags enabled by each flag.
    references: BTreeMap<String, BTreeSet<String>>,
    /// The flags that enable each flag (the reverse of `references`).
    parents: BTreeMap<String, BTreeSet<String>>,
    /// The alias targets of each flag.
    aliases: BTreeMap<String, BTreeSet<String>>,
    /// The flags known to be warnings.
    warnings: BTreeSet<String>,
    /// The flags known to do nothing.
    dummies: BTreeSet<String>,
}

impl ReferenceGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a flag to the graph.
    pub fn add_node(&mut self, flag: impl Into<String>) {
        self.nodes.insert(flag.into());
    }

    /// Records that `enabler` enables `dependent`.
    pub fn add_reference(&mut self, enabler: &str, dependent: &str) {
        self.add_node(enabler);
        self.add_node(dependent);
        self.references
            .entry(enabler.to_string())
            .or_default()
            .insert(dependent.to_string());
        self.parents
            .entry(dependent.to_string())
            .or_default()
            .insert(enabler.to_string());
    }

    /// Records that `flag` is an alias of `target`.
    pub fn add_alias(&mut self, flag: &str, target: &str) {
        self.add_node(flag);
        self.add_node(target);
        self.aliases
            .entry(flag.to_string())
            .or_default()
            .insert(target.to_string());
    }

    /// Marks a flag as a warning.
    pub fn mark_warning(&mut self, flag: &str) {
        self.add_node(flag);
        self.warnings.insert(flag.to_string());
    }

    /// Marks a flag as doing nothing.
    pub fn mark_dummy(&mut self, flag: &str) {
        self.add_node(flag);
        self.dummies.insert(flag.to_string());
    }

    /// Gets every flag in the graph.
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(String::as_str)
    }

    /// Determines if the graph has no flags.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Determines if a flag is part of the graph.
    pub fn contains(&self, flag: &str) -> bool {
        self.nodes.contains(flag)
    }

    /// Gets the flags enabled by `flag`.
    pub fn references(&self, flag: &str) -> impl Iterator<Item = &str> {
        self.references
            .get(flag)
            .into_iter()
            .flatten()
            .map(String::as_str)
    }

    /// Gets the flags that enable `flag`.
    pub fn parents(&self, flag: &str) -> impl Iterator<Item = &str> {
        self.parents
            .get(flag)
            .into_iter()
            .flatten()
            .map(String::as_str)
    }

    /// Gets the alias targets of `flag`.
    pub fn aliases(&self, flag: &str) -> impl Iterator<Item = &str> {
        self.aliases
            .get(flag)
            .into_iter()
            .flatten()
            .map(String::as_str)
    }

    /// Determines if `flag` is an alias of another flag.
    pub fn is_alias(&self, flag: &str) -> bool {
        self.aliases.get(flag).is_some_and(|t| !t.is_empty())
    }

    /// Determines if `flag` is a warning.
    pub fn is_warning(&self, flag: &str) -> bool {
        self.warnings.contains(flag)
    }

    /// Determines if `flag` does nothing.
    pub fn is_dummy(&self, flag: &str) -> bool {
        self.dummies.contains(flag)
    }

    /// Determines if `flag` is a top-level flag.
    ///
    /// A top-level flag is not an alias of another flag and is not enabled by
    /// any other flag.
    pub fn is_top_level(&self, flag: &str) -> bool {
        !self.is_alias(flag) && self.parents.get(flag).is_none_or(|p| p.is_empty())
    }
}

/// The facts gathered from a single option file.
#[derive(Debug, Default)]
struct FileFacts {
    /// The facts of every warning or dummy option, in file order.
    options: Vec<(String, FlagFacts)>,
    /// The alias targets of every option.
    aliases: BTreeMap<String, BTreeSet<String>>,
}

/// Builds a [`ReferenceGraph`] from GCC option files.
#[derive(Debug)]
pub struct GraphBuilder<'a> {
    /// The conventions used to interpret options.
    conventions: &'a GccConventions,
    /// The graph being built.
    graph: ReferenceGraph,
}

impl<'a> GraphBuilder<'a> {
    /// Creates a new builder seeded with the conventional umbrella flags.
    pub fn new(conventions: &'a GccConventions) -> Self {
        let mut graph = ReferenceGraph::new();
        for flag in &conventions.seed_flags {
            graph.mark_warning(flag);
        }

        Self { conventions, graph }
    }

    /// Adds the records of one option file to the graph.
    ///
    /// Options that are neither warnings nor dummies are skipped. Attribute
    /// lines that cannot be parsed are skipped with a warning.
    ///
    /// Returns an error if the file gives a flag alias targets that differ
    /// from the ones recorded from an earlier file; the graph is left
    /// unchanged in that case.
    pub fn add_file(&mut self, records: &[OptionRecord]) -> Result<(), GraphError> {
        let facts = self.interpret(records);

        for (flag, targets) in &facts.aliases {
            if let Some(existing) = self.graph.aliases.get(flag)
                && existing != targets
            {
                return Err(GraphError::ConflictingAlias {
                    flag: flag.clone(),
                    existing: existing.clone(),
                    conflicting: targets.clone(),
                });
            }
        }

        for (name, facts) in &facts.options {
            self.graph.add_node(name.as_str());
            if facts.is_warning {
                self.graph.mark_warning(name);
            }

            if facts.is_dummy {
                self.graph.mark_dummy(name);
            }

            for enabler in &facts.enablers {
                self.graph.add_reference(enabler, name);
            }
        }

        for (flag, targets) in &facts.aliases {
            for target in targets {
                self.graph.add_alias(flag, target);
            }
        }

        debug!(
            "added {count} options from {total} records",
            count = facts.options.len(),
            total = records.len()
        );
        Ok(())
    }

    /// Interprets the records of one file.
    fn interpret(&self, records: &[OptionRecord]) -> FileFacts {
        let mut file = FileFacts::default();

        for record in records {
            let expression = match AttributeExpression::parse(&record.attributes) {
                Ok(expression) => expression,
                Err(e) => {
                    warn!("skipping option `{name}`: {e}", name = record.name);
                    continue;
                }
            };

            let facts = FlagFacts::interpret(&record.name, &expression, self.conventions);
            if !facts.is_warning && !facts.is_dummy {
                debug!("`{name}` is not a warning", name = record.name);
                continue;
            }

            if let Some(target) = &facts.alias_target {
                file.aliases
                    .entry(record.name.clone())
                    .or_default()
                    .insert(target.clone());
            }

            file.options.push((record.name.clone(), facts));
        }

        file
    }

    /// Finishes building and returns the graph.
    pub fn finish(self) -> ReferenceGraph {
        self.graph
    }
}
