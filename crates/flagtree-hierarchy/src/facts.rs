//! Interpretation of GCC option attributes.
//!
//! An attribute line is visited once per semantic question. Each question has
//! its own [`Visitor`] that only implements the callbacks it cares about:
//!
//! | Visitor           | Question                                      |
//! | ----------------- | --------------------------------------------- |
//! | [`WarningMarker`] | Is there a bare `Warning` attribute?          |
//! | [`DummyMarker`]   | Is there a bare `Ignore` attribute?           |
//! | [`VariableName`]  | Which variable does `Var(...)` assign?        |
//! | [`AliasTarget`]   | Which flag does `Alias(...)` point to?        |
//! | [`Enablers`]      | Which flags enable this one (`EnabledBy`...)? |
//!
//! [`FlagFacts::interpret`] runs all of them and combines the answers.

use std::collections::BTreeSet;

use flagtree_grammar::gcc::Argument;
use flagtree_grammar::gcc::AttributeExpression;
use flagtree_grammar::gcc::Term;

use crate::GccConventions;

/// A trait used to implement an attribute visitor.
///
/// Terms are visited in source order; callbacks default to doing nothing.
#[allow(unused_variables)]
pub trait Visitor {
    /// Visits a bare name such as `Warning` or `C++`.
    fn bare(&mut self, name: &str) {}

    /// Visits a call such as `Var(warn_format)`.
    fn call(&mut self, name: &str, arguments: &[Argument]) {}
}

/// Visits every term of an expression.
pub fn visit<V: Visitor + ?Sized>(expression: &AttributeExpression, visitor: &mut V) {
    for term in expression.terms() {
        match term {
            Term::Bare(name) => visitor.bare(name),
            Term::Call { name, arguments } => visitor.call(name, arguments),
        }
    }
}

/// Detects a bare `Warning` attribute.
#[derive(Debug, Default)]
pub struct WarningMarker {
    /// Whether the marker was seen.
    pub found: bool,
}

impl Visitor for WarningMarker {
    fn bare(&mut self, name: &str) {
        if name == "Warning" {
            self.found = true;
        }
    }
}

/// Detects a bare `Ignore` attribute, marking an option that does nothing.
#[derive(Debug, Default)]
pub struct DummyMarker {
    /// Whether the marker was seen.
    pub found: bool,
}

impl Visitor for DummyMarker {
    fn bare(&mut self, name: &str) {
        if name == "Ignore" {
            self.found = true;
        }
    }
}

/// Finds the variable assigned by `Var(name, ...)`.
#[derive(Debug, Default)]
pub struct VariableName {
    /// The variable name.
    pub name: Option<String>,
}

impl Visitor for VariableName {
    fn call(&mut self, name: &str, arguments: &[Argument]) {
        if name != "Var" {
            return;
        }

        if let Some(variable) = arguments.first().and_then(|a| a.atoms().first()) {
            self.name = Some(variable.clone());
        }
    }
}

/// Finds the target of `Alias(...)`.
///
/// `Alias(Wall)` targets `Wall`. When a second argument is present it is
/// appended to the first: `Alias(Wformat=, 1, 0)` targets `Wformat=1`. Later
/// arguments never take part in the name.
#[derive(Debug, Default)]
pub struct AliasTarget {
    /// The alias target.
    pub target: Option<String>,
}

impl Visitor for AliasTarget {
    fn call(&mut self, name: &str, arguments: &[Argument]) {
        if name != "Alias" {
            return;
        }

        let Some(base) = arguments.first().and_then(|a| a.atoms().first()) else {
            return;
        };

        let mut target = base.clone();
        if let Some(suffix) = arguments.get(1).and_then(|a| a.atoms().first()) {
            target.push_str(suffix);
        }

        self.target = Some(target);
    }
}

/// Collects the flags named by `EnabledBy(...)` and `LangEnabledBy(...)`.
///
/// For `LangEnabledBy` the first argument is the language list and only the
/// second argument names flags.
#[derive(Debug, Default)]
pub struct Enablers {
    /// The enabling flags.
    pub flags: BTreeSet<String>,
}

impl Visitor for Enablers {
    fn call(&mut self, name: &str, arguments: &[Argument]) {
        let argument = match name {
            "EnabledBy" => arguments.first(),
            "LangEnabledBy" => arguments.get(1),
            _ => None,
        };

        if let Some(argument) = argument {
            self.flags.extend(argument.atoms().iter().cloned());
        }
    }
}

/// The facts derived from a single option.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FlagFacts {
    /// Whether the option is a warning.
    pub is_warning: bool,
    /// Whether the option is explicitly inert.
    pub is_dummy: bool,
    /// The variable assigned by the option.
    pub variable: Option<String>,
    /// The flag this option is an alias of.
    pub alias_target: Option<String>,
    /// The flags that enable this option.
    pub enablers: BTreeSet<String>,
}

impl FlagFacts {
    /// Interprets the attributes of the option `name`.
    ///
    /// An option is a warning if it carries a `Warning` attribute, assigns a
    /// warning variable, or (failing both, when the heuristic is enabled) has
    /// a warning flag name.
    ///
    /// # Examples
    ///
    /// ```
    /// use flagtree_grammar::gcc::AttributeExpression;
    /// use flagtree_hierarchy::FlagFacts;
    /// use flagtree_hierarchy::GccConventions;
    ///
    /// let expression = AttributeExpression::parse("C C++ Warning EnabledBy(Wextra)")?;
    /// let facts = FlagFacts::interpret("Wfoo", &expression, &GccConventions::default());
    ///
    /// assert!(facts.is_warning);
    /// assert!(facts.enablers.contains("Wextra"));
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn interpret(
        name: &str,
        expression: &AttributeExpression,
        conventions: &GccConventions,
    ) -> Self {
        let mut warning = WarningMarker::default();
        visit(expression, &mut warning);

        let mut dummy = DummyMarker::default();
        visit(expression, &mut dummy);

        let mut variable = VariableName::default();
        visit(expression, &mut variable);

        let mut alias = AliasTarget::default();
        visit(expression, &mut alias);

        let mut enablers = Enablers::default();
        visit(expression, &mut enablers);

        let warning_variable = variable
            .name
            .as_deref()
            .is_some_and(|v| conventions.is_warning_variable(v));

        let is_warning = warning.found
            || warning_variable
            || (conventions.name_heuristic && conventions.has_warning_name(name));

        Self {
            is_warning,
            is_dummy: dummy.found,
            variable: variable.name,
            alias_target: alias.target,
            enablers: enablers.flags,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn facts(name: &str, attributes: &str) -> FlagFacts {
        let conventions = GccConventions {
            name_heuristic: false,
            ..Default::default()
        };
        let expression = AttributeExpression::parse(attributes).unwrap();
        FlagFacts::interpret(name, &expression, &conventions)
    }

    fn set(flags: &[&str]) -> BTreeSet<String> {
        flags.iter().map(|f| f.to_string()).collect()
    }

    #[test]
    fn it_detects_the_warning_marker() {
        assert!(facts("foo", "C C++ Warning").is_warning);
        assert!(facts("foo", "Warning").is_warning);
        assert!(!facts("foo", "C C++ Joined").is_warning);
    }

    #[test]
    fn it_detects_warning_variables() {
        let warning = facts("foo", "Common Var(warn_unused_variable)");
        assert!(warning.is_warning);
        assert_eq!(warning.variable.as_deref(), Some("warn_unused_variable"));

        let other = facts("foo", "Common Var(flag_syntax_only)");
        assert!(!other.is_warning);
        assert_eq!(other.variable.as_deref(), Some("flag_syntax_only"));
    }

    #[test]
    fn it_falls_back_to_the_flag_name() {
        let expression = AttributeExpression::parse("C Undocumented").unwrap();
        let conventions = GccConventions::default();

        assert!(FlagFacts::interpret("Wold-style", &expression, &conventions).is_warning);
        assert!(!FlagFacts::interpret("Werror", &expression, &conventions).is_warning);
        assert!(!FlagFacts::interpret("fsyntax-only", &expression, &conventions).is_warning);
    }

    #[test]
    fn it_detects_dummies() {
        assert!(facts("Wimport", "Ignore").is_dummy);
        assert!(!facts("Wimport", "Warning").is_dummy);
    }

    #[test]
    fn it_resolves_alias_targets() {
        assert_eq!(
            facts("Wformat", "Warning Alias(Wformat=, 1, 0)")
                .alias_target
                .as_deref(),
            Some("Wformat=1")
        );
        assert_eq!(
            facts("W", "Warning Alias(Wall)").alias_target.as_deref(),
            Some("Wall")
        );
        assert_eq!(
            facts("Wnormalized", "Alias(Wnormalized=,nfc,none)")
                .alias_target
                .as_deref(),
            Some("Wnormalized=nfc")
        );
        assert_eq!(facts("Wfoo", "Warning").alias_target, None);
    }

    #[test]
    fn it_collects_enablers() {
        assert_eq!(facts("Wfoo", "EnabledBy(Wextra)").enablers, set(&["Wextra"]));
        assert_eq!(
            facts("Wfoo", "LangEnabledBy(C C++, Wall || Wc++-compat)").enablers,
            set(&["Wall", "Wc++-compat"])
        );
        assert_eq!(
            facts("Wfoo", "LangEnabledBy(C ObjC,Wall,1,0) EnabledBy(Wextra)").enablers,
            set(&["Wall", "Wextra"])
        );
    }

    #[test]
    fn it_ignores_unknown_functions_and_shapes() {
        let unknown = facts(
            "Wfoo",
            "Warning Foo(Bar) EnabledBy(Wall && Wextra) Init(-1) IntegerRange(0, 2)",
        );
        assert_eq!(
            unknown,
            FlagFacts {
                is_warning: true,
                ..Default::default()
            }
        );
    }
}
