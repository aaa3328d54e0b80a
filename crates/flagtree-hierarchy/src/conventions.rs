//! Conventions used when interpreting compiler metadata.
//!
//! The defaults describe upstream GCC and Clang sources; a configuration file
//! may override any field.

use serde::Deserialize;
use serde::Serialize;

/// Converts a list of string literals to owned strings.
fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

/// Conventions for GCC option files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields, default)]
pub struct GccConventions {
    /// Record names that only declare types or variables and never describe
    /// a flag.
    pub boring_options: Vec<String>,
    /// The prefix of `Var(...)` names that hold a warning setting.
    pub warning_variable_prefix: String,
    /// The prefix of warning flag names.
    pub warning_flag_prefix: String,
    /// Flags that carry the warning prefix but are not warnings.
    pub non_warning_flags: Vec<String>,
    /// Umbrella flags that are part of the graph even when no input file
    /// defines them.
    pub seed_flags: Vec<String>,
    /// Whether a name carrying the warning prefix is a warning even without
    /// a `Warning` attribute or a warning variable.
    pub name_heuristic: bool,
}

impl Default for GccConventions {
    fn default() -> Self {
        Self {
            boring_options: strings(&[
                "Variable",
                "Enum",
                "EnumValue",
                "Language",
                "TargetVariable",
                "TargetSave",
                "HeaderInclude",
                "SourceInclude",
            ]),
            warning_variable_prefix: String::from("warn_"),
            warning_flag_prefix: String::from("W"),
            non_warning_flags: strings(&["Werror", "Werror=", "Wfatal-errors", "Wa,", "Wl,", "Wp,"]),
            seed_flags: strings(&["Wall", "Wextra", "Wpedantic"]),
            name_heuristic: true,
        }
    }
}

impl GccConventions {
    /// Determines if a flag name looks like a warning flag.
    pub fn has_warning_name(&self, name: &str) -> bool {
        name.starts_with(&self.warning_flag_prefix)
            && !self.non_warning_flags.iter().any(|flag| flag == name)
    }

    /// Determines if a `Var(...)` name holds a warning setting.
    pub fn is_warning_variable(&self, variable: &str) -> bool {
        variable.starts_with(&self.warning_variable_prefix)
    }
}

/// Conventions for Clang diagnostic group files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields, default)]
pub struct ClangConventions {
    /// The TableGen class that defines a diagnostic group.
    pub group_class: String,
    /// The prefix prepended to switch names to form flag names.
    pub switch_prefix: String,
}

impl Default for ClangConventions {
    fn default() -> Self {
        Self {
            group_class: String::from("DiagGroup"),
            switch_prefix: String::from("W"),
        }
    }
}
