//! LLVM TableGen definitions.
//!
//! Only records are parsed structurally; `class` and `multiclass` declarations
//! and record bodies are skipped. The result of parsing a file is the list of
//! [`Definition`]s that instantiate a given class, in source order.

#![allow(missing_docs)]

use pest::Parser as _;
use pest::iterators::Pair;
use pest_derive::Parser;
use tracing::debug;

use crate::Error;
use crate::Result;

/// A pest [`pest::Parser`] for the TableGen subset.
#[derive(Debug, Parser)]
#[grammar = "tablegen/tablegen.pest"]
pub struct Parser;

/// A record instantiating the requested class.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Definition {
    /// The record name; anonymous records (`def : ...`) have none.
    pub name: Option<String>,
    /// The first string argument of the class instantiation, unquoted.
    ///
    /// For diagnostic groups this is the switch name without the `-W`
    /// prefix; it may be empty.
    pub switch_name: Option<String>,
    /// The identifiers referenced by the class arguments, in source order.
    pub references: Vec<String>,
}

/// Parses a TableGen source and returns every record that instantiates
/// `class_name`.
///
/// # Examples
///
/// ```
/// use flagtree_grammar::tablegen;
///
/// let definitions = tablegen::definitions(
///     r#"def Extra : DiagGroup<"extra", [UnusedParameter]>;"#,
///     "DiagGroup",
/// )?;
///
/// assert_eq!(definitions.len(), 1);
/// assert_eq!(definitions[0].name.as_deref(), Some("Extra"));
/// assert_eq!(definitions[0].switch_name.as_deref(), Some("extra"));
/// assert_eq!(definitions[0].references, ["UnusedParameter"]);
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn definitions(source: &str, class_name: &str) -> Result<Vec<Definition>> {
    let mut pairs =
        Parser::parse(Rule::file, source).map_err(|e| Error::TableGen(Box::new(e)))?;

    let mut definitions = Vec::new();
    if let Some(file) = pairs.next() {
        collect(file, class_name, &mut definitions);
    }

    debug!(
        "found {count} `{class_name}` definitions",
        count = definitions.len()
    );
    Ok(definitions)
}

/// Collects matching definitions from the statements below `pair`.
fn collect(pair: Pair<'_, Rule>, class_name: &str, definitions: &mut Vec<Definition>) {
    for child in pair.into_inner() {
        match child.as_rule() {
            Rule::definition => {
                if let Some(definition) = definition(child, class_name) {
                    definitions.push(definition);
                }
            }
            Rule::let_statement | Rule::let_scope => collect(child, class_name, definitions),
            _ => {}
        }
    }
}

/// Converts a `definition` pair if its class list instantiates `class_name`.
fn definition(pair: Pair<'_, Rule>, class_name: &str) -> Option<Definition> {
    let mut name = None;
    let mut instance = None;

    for child in pair.into_inner() {
        match child.as_rule() {
            Rule::definition_name => name = Some(child.as_str().to_string()),
            Rule::class_list => {
                instance = child.into_inner().find(|reference| {
                    reference
                        .clone()
                        .into_inner()
                        .next()
                        .is_some_and(|id| id.as_str() == class_name)
                });
            }
            _ => {}
        }
    }

    let instance = instance?;
    let mut switch_name = None;
    let mut references = Vec::new();

    if let Some(arguments) = instance
        .into_inner()
        .find(|p| p.as_rule() == Rule::template_arguments)
    {
        for value in arguments.into_inner() {
            if switch_name.is_none()
                && let Some(text) = string_value(&value)
            {
                switch_name = Some(text);
                continue;
            }

            identifiers(value, &mut references);
        }
    }

    Some(Definition {
        name,
        switch_name,
        references,
    })
}

/// Gets the unquoted text of a `value` pair holding a string literal.
fn string_value(value: &Pair<'_, Rule>) -> Option<String> {
    let inner = value.clone().into_inner().next()?;
    if inner.as_rule() != Rule::string {
        return None;
    }

    let text = inner.as_str();
    Some(text[1..text.len() - 1].to_string())
}

/// Collects the record identifiers referenced by a `value` pair.
///
/// Inline class instantiations (`Foo<...>`) are not references to a record and
/// are skipped.
fn identifiers(pair: Pair<'_, Rule>, references: &mut Vec<String>) {
    match pair.as_rule() {
        Rule::class_value => {
            let mut inner = pair.into_inner();
            let Some(identifier) = inner.next() else {
                return;
            };

            if inner.all(|p| p.as_rule() != Rule::template_arguments) {
                references.push(identifier.as_str().to_string());
            }
        }
        Rule::value | Rule::list | Rule::paste => {
            for child in pair.into_inner() {
                identifiers(child, references);
            }
        }
        _ => {}
    }
}
