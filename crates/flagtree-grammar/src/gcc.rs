//! GCC option definition files.
//!
//! An option file is a sequence of blocks separated by blank lines. Each block
//! starts with the option name, followed by a single line of attributes and a
//! free-text description:
//!
//! ```text
//! Wunused-variable
//! Common Var(warn_unused_variable) Warning EnabledBy(Wunused)
//! Warn when a variable is unused.
//! ```

#![allow(missing_docs)]

use pest_derive::Parser;

mod blocks;
mod expression;

pub use blocks::OptionRecord;
pub use blocks::option_records;
pub use expression::Argument;
pub use expression::AttributeExpression;
pub use expression::Term;

/// A pest [`pest::Parser`] for the attribute line of a GCC option.
///
/// **Note:** most users want [`AttributeExpression::parse`], which
/// materializes the parse tree into a stable shape.
#[derive(Debug, Parser)]
#[grammar = "gcc/options.pest"]
pub struct Parser;
