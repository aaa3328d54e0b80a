//! The materialized form of an option attribute line.

use pest::Parser as _;
use pest::iterators::Pair;

use super::Parser;
use super::Rule;
use crate::Error;
use crate::Result;

/// An argument to a [`Term::Call`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Argument {
    /// A single atom (`Wall`, `1`, `warn_format`, `Wformat=`).
    Atom(String),
    /// Two or more whitespace-separated atoms (`C ObjC C++`).
    List(Vec<String>),
    /// Atoms combined with `||` (`Wall || Wc++-compat`).
    Or(Vec<String>),
    /// Any other argument text, trimmed.
    Raw(String),
}

impl Argument {
    /// Gets the atoms of the argument.
    ///
    /// Raw arguments have no atoms.
    pub fn atoms(&self) -> &[String] {
        match self {
            Self::Atom(atom) => std::slice::from_ref(atom),
            Self::List(atoms) | Self::Or(atoms) => atoms,
            Self::Raw(_) => &[],
        }
    }

    /// Gets the argument if it is a single atom.
    pub fn as_atom(&self) -> Option<&str> {
        match self {
            Self::Atom(atom) => Some(atom),
            _ => None,
        }
    }
}

/// A single term of an attribute line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Term {
    /// A name without arguments (`Warning`, `C++`, `Ignore`).
    Bare(String),
    /// A name applied to arguments (`Var(warn_format)`).
    Call {
        /// The called name.
        name: String,
        /// The positional arguments.
        arguments: Vec<Argument>,
    },
}

impl Term {
    /// Gets the name of the term.
    pub fn name(&self) -> &str {
        match self {
            Self::Bare(name) | Self::Call { name, .. } => name,
        }
    }
}

/// A parsed attribute line.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AttributeExpression {
    /// The terms in source order.
    terms: Vec<Term>,
}

impl AttributeExpression {
    /// Parses an attribute line.
    ///
    /// # Examples
    ///
    /// ```
    /// use flagtree_grammar::gcc::Argument;
    /// use flagtree_grammar::gcc::AttributeExpression;
    /// use flagtree_grammar::gcc::Term;
    ///
    /// let expression = AttributeExpression::parse("C Warning EnabledBy(Wextra)")?;
    /// assert_eq!(
    ///     expression.terms(),
    ///     &[
    ///         Term::Bare(String::from("C")),
    ///         Term::Bare(String::from("Warning")),
    ///         Term::Call {
    ///             name: String::from("EnabledBy"),
    ///             arguments: vec![Argument::Atom(String::from("Wextra"))],
    ///         },
    ///     ]
    /// );
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn parse(text: &str) -> Result<Self> {
        let mut pairs = Parser::parse(Rule::attributes, text).map_err(|e| Error::Attributes {
            text: text.to_string(),
            source: Box::new(e),
        })?;

        let terms = pairs
            .next()
            .map(|root| {
                root.into_inner()
                    .filter(|pair| pair.as_rule() == Rule::term)
                    .map(term)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self { terms })
    }

    /// Creates an expression from already materialized terms.
    pub fn new(terms: Vec<Term>) -> Self {
        Self { terms }
    }

    /// Gets the terms of the expression.
    pub fn terms(&self) -> &[Term] {
        &self.terms
    }
}

/// Materializes a `term` pair.
fn term(pair: Pair<'_, Rule>) -> Term {
    let mut inner = pair.into_inner();
    let name = inner
        .next()
        .map(|name| name.as_str().to_string())
        .unwrap_or_default();

    match inner.next() {
        Some(call) => Term::Call {
            name,
            arguments: call.into_inner().map(argument).collect(),
        },
        None => Term::Bare(name),
    }
}

/// Materializes an argument pair (`or_expression`, `atom_list` or `raw`).
fn argument(pair: Pair<'_, Rule>) -> Argument {
    match pair.as_rule() {
        Rule::or_expression => Argument::Or(atoms(pair)),
        Rule::atom_list => {
            let mut atoms = atoms(pair);
            if atoms.len() == 1 {
                Argument::Atom(atoms.remove(0))
            } else {
                Argument::List(atoms)
            }
        }
        _ => Argument::Raw(pair.as_str().trim().to_string()),
    }
}

/// Collects the `atom` children of a pair.
fn atoms(pair: Pair<'_, Rule>) -> Vec<String> {
    pair.into_inner()
        .filter(|atom| atom.as_rule() == Rule::atom)
        .map(|atom| atom.as_str().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use pest::consumes_to;
    use pest::parses_to;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::gcc::Parser as OptionsParser;

    fn atom(s: &str) -> Argument {
        Argument::Atom(s.to_string())
    }

    fn call(name: &str, arguments: Vec<Argument>) -> Term {
        Term::Call {
            name: name.to_string(),
            arguments,
        }
    }

    #[test]
    fn it_parses_an_or_expression() {
        parses_to! {
            parser: OptionsParser,
            input: "a(x || y)",
            rule: Rule::term,
            tokens: [
                term(0, 9, [
                    name(0, 1),
                    call(1, 9, [
                        or_expression(2, 8, [
                            atom(2, 3),
                            atom(7, 8),
                        ]),
                    ]),
                ])
            ]
        }
    }

    #[test]
    fn it_parses_a_bare_name() {
        parses_to! {
            parser: OptionsParser,
            input: "ObjC++",
            rule: Rule::term,
            tokens: [
                term(0, 6, [
                    name(0, 6),
                ])
            ]
        }
    }

    #[test]
    fn it_materializes_alias_arguments() {
        let expression = AttributeExpression::parse("Warning Alias(Wformat=, 1, 0)").unwrap();
        assert_eq!(
            expression.terms(),
            &[
                Term::Bare("Warning".to_string()),
                call("Alias", vec![atom("Wformat="), atom("1"), atom("0")]),
            ]
        );
    }

    #[test]
    fn it_materializes_lists_and_or_expressions() {
        let expression =
            AttributeExpression::parse("LangEnabledBy(C C++,Wall || Wc++-compat)").unwrap();
        assert_eq!(
            expression.terms(),
            &[call(
                "LangEnabledBy",
                vec![
                    Argument::List(vec!["C".to_string(), "C++".to_string()]),
                    Argument::Or(vec!["Wall".to_string(), "Wc++-compat".to_string()]),
                ]
            )]
        );
    }

    #[test]
    fn it_keeps_free_text_as_raw_arguments() {
        let expression = AttributeExpression::parse(
            "Condition(defined(TARGET_FOO) && X) EnabledBy(Wall && Wextra) Init(1 << 2)",
        )
        .unwrap();
        assert_eq!(
            expression.terms(),
            &[
                call(
                    "Condition",
                    vec![Argument::Raw("defined(TARGET_FOO) && X".to_string())]
                ),
                call(
                    "EnabledBy",
                    vec![Argument::Raw("Wall && Wextra".to_string())]
                ),
                call(
                    "Init",
                    vec![Argument::List(vec![
                        "1".to_string(),
                        "<<".to_string(),
                        "2".to_string()
                    ])]
                ),
            ]
        );
    }

    #[test]
    fn it_keeps_empty_arguments() {
        let expression = AttributeExpression::parse("Alias(Wfoo,,0)").unwrap();
        assert_eq!(
            expression.terms(),
            &[call(
                "Alias",
                vec![atom("Wfoo"), Argument::Raw(String::new()), atom("0")]
            )]
        );
    }

    #[test]
    fn it_tolerates_unbalanced_parentheses() {
        let expression = AttributeExpression::parse("Warning Var(warn_foo").unwrap();
        assert_eq!(
            expression.terms(),
            &[
                Term::Bare("Warning".to_string()),
                Term::Bare("Var".to_string()),
                Term::Bare("warn_foo".to_string()),
            ]
        );
    }

    #[test]
    fn it_parses_an_empty_line() {
        let expression = AttributeExpression::parse("").unwrap();
        assert!(expression.terms().is_empty());
    }
}
