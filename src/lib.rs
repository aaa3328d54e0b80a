//! Prints the hierarchy of compiler warning flags.
//!
//! The `gcc` command reads GCC option definition files (`*.opt`) and the
//! `clang` command reads Clang's `DiagnosticGroups.td`. Both print every
//! warning flag followed by the flags it enables:
//!
//! ```text
//! -Wall
//! #   -Wunused
//! #     -Wunused-variable
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![warn(rust_2021_compatibility)]
#![warn(missing_debug_implementations)]
#![warn(clippy::missing_docs_in_private_items)]
#![warn(rustdoc::broken_intra_doc_links)]

pub mod commands;
pub mod config;
