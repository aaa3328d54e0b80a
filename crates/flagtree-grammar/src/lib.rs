//! Parse trees for the compiler metadata formats read by `flagtree`, built
//! with [`pest`](https://pest.rs).
//!
//! Two formats are supported:
//!
//! * [`gcc`]: GCC option definition files (`*.opt`). The file is first split
//!   into [`OptionRecord`](gcc::OptionRecord)s by a line-oriented state
//!   machine, then the attribute line of every record is parsed into an
//!   [`AttributeExpression`](gcc::AttributeExpression).
//! * [`tablegen`]: the subset of LLVM TableGen used by Clang's diagnostic
//!   group definitions.

use thiserror::Error;

pub mod gcc;
pub mod tablegen;

/// An error produced while parsing one of the supported formats.
#[derive(Debug, Error)]
pub enum Error {
    /// The attribute line of a GCC option could not be parsed.
    #[error("failed to parse option attributes `{text}`")]
    Attributes {
        /// The attribute text that failed to parse.
        text: String,
        /// The underlying pest error.
        #[source]
        source: Box<pest::error::Error<gcc::Rule>>,
    },

    /// A TableGen source could not be parsed.
    #[error("failed to parse TableGen source")]
    TableGen(#[source] Box<pest::error::Error<tablegen::Rule>>),
}

/// A [`Result`](std::result::Result) with an [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
