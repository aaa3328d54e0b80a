//! Warning flag dependency graphs.
//!
//! This crate turns the records produced by [`flagtree_grammar`] into a
//! [`ReferenceGraph`] and renders it as an indented hierarchy:
//!
//! * [`facts`] interprets the attribute line of a GCC option.
//! * [`graph`] folds the facts of every option file into one graph.
//! * [`groups`] converts Clang diagnostic groups into the same graph.
//! * [`render`] prints the graph.
//!
//! The conventions that steer interpretation (exclusion lists, seed flags,
//! prefixes) live in [`conventions`] and are passed explicitly.

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![warn(rust_2021_compatibility)]
#![warn(missing_debug_implementations)]
#![warn(clippy::missing_docs_in_private_items)]
#![warn(rustdoc::broken_intra_doc_links)]

pub mod conventions;
pub mod facts;
pub mod graph;
pub mod groups;
pub mod render;

pub use conventions::ClangConventions;
pub use conventions::GccConventions;
pub use facts::FlagFacts;
pub use graph::GraphBuilder;
pub use graph::GraphError;
pub use graph::ReferenceGraph;
pub use groups::DiagnosticGroups;
pub use render::DisplayMode;
pub use render::Renderer;
pub use render::Rendering;
