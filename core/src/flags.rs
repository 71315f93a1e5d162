//! Flag declarations and the per-invocation flag table.
//!
//! A [`FlagSpec`] is fixed when a command is declared. Every invocation of a
//! flagged command builds a fresh [`FlagTable`] from its specs, fills it from
//! the argument vector and hands it to the action by value.
//!
//! A flag is unset exactly when its value is the empty string. There is no
//! separate presence bit, so `-name ""` and an absent flag look the same.

use std::collections::BTreeMap;

use crate::error::FlagParseError;

/// Declaration of one named string flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagSpec {
    /// Flag name without leading dashes.
    pub name: String,
    /// Whether the action refuses to run while this flag is empty.
    pub required: bool,
}

impl FlagSpec {
    /// Declares a flag that must be set before the action runs.
    pub fn required(name: &str) -> Self {
        Self {
            name: name.to_string(),
            required: true,
        }
    }

    /// Declares a flag that may be left empty.
    pub fn optional(name: &str) -> Self {
        Self {
            name: name.to_string(),
            required: false,
        }
    }
}

/// Current value of one flag plus its requirement bit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlagEntry {
    pub value: String,
    pub required: bool,
}

impl FlagEntry {
    pub fn is_set(&self) -> bool {
        !self.value.is_empty()
    }
}

/// Mapping from flag name to [`FlagEntry`], ordered by name.
///
/// # Examples
///
/// ```
/// use cmdtree_core::{FlagSpec, FlagTable};
///
/// let specs = [FlagSpec::required("factory_id"), FlagSpec::optional("page")];
/// let mut table = FlagTable::from_specs(&specs);
/// let args: Vec<String> = ["-factory_id", "f1", "-page=2"].iter().map(|s| s.to_string()).collect();
///
/// assert_eq!(table.parse(&args), Ok(3));
/// assert_eq!(table.value("factory_id"), "f1");
/// assert_eq!(table.value("page"), "2");
/// assert!(table.missing_required().is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlagTable {
    entries: BTreeMap<String, FlagEntry>,
}

impl FlagTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an all-empty table. A repeated name keeps the last declaration.
    pub fn from_specs<'a>(specs: impl IntoIterator<Item = &'a FlagSpec>) -> Self {
        let mut table = Self::new();
        for spec in specs {
            table.declare(&spec.name, spec.required);
        }
        table
    }

    /// Adds (or redeclares) an empty flag.
    pub fn declare(&mut self, name: &str, required: bool) {
        self.entries.insert(
            name.to_string(),
            FlagEntry {
                value: String::new(),
                required,
            },
        );
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&FlagEntry> {
        self.entries.get(name)
    }

    /// Returns the flag value, or `""` for unset and undeclared flags.
    pub fn value(&self, name: &str) -> &str {
        self.entries
            .get(name)
            .map(|entry| entry.value.as_str())
            .unwrap_or("")
    }

    /// Overwrites the value of a declared flag.
    ///
    /// Returns `false` (and changes nothing) when `name` was never declared.
    pub fn set(&mut self, name: &str, value: impl Into<String>) -> bool {
        match self.entries.get_mut(name) {
            Some(entry) => {
                entry.value = value.into();
                true
            }
            None => false,
        }
    }

    pub fn is_set(&self, name: &str) -> bool {
        self.entries.get(name).is_some_and(FlagEntry::is_set)
    }

    /// Removes a flag from the table, returning its entry.
    pub fn remove(&mut self, name: &str) -> Option<FlagEntry> {
        self.entries.remove(name)
    }

    pub fn any_required(&self) -> bool {
        self.entries.values().any(|entry| entry.required)
    }

    /// Names of required flags whose value is still empty.
    pub fn missing_required(&self) -> Vec<String> {
        self.entries
            .iter()
            .filter(|(_, entry)| entry.required && !entry.is_set())
            .map(|(name, _)| name.clone())
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FlagEntry)> {
        self.entries
            .iter()
            .map(|(name, entry)| (name.as_str(), entry))
    }

    /// Name/value pairs of every flag that is set.
    pub fn set_values(&self) -> BTreeMap<String, String> {
        self.entries
            .iter()
            .filter(|(_, entry)| entry.is_set())
            .map(|(name, entry)| (name.clone(), entry.value.clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parses `-key value`, `--key value`, `-key=value` and `--key=value`
    /// tokens into the table.
    ///
    /// Parsing stops at the first token that is not flag-shaped (including a
    /// lone `-`) or right after a `--` terminator. Assignments made before an
    /// error are kept. Returns the number of tokens consumed.
    ///
    /// # Errors
    ///
    /// [`FlagParseError::BadSyntax`] for `---key` or `-=value`,
    /// [`FlagParseError::UnknownFlag`] for undeclared names and
    /// [`FlagParseError::MissingValue`] when a bare `-key` is the last token.
    pub fn parse(&mut self, args: &[String]) -> Result<usize, FlagParseError> {
        let mut idx = 0;

        while idx < args.len() {
            let arg = args[idx].as_str();
            if arg.len() < 2 || !arg.starts_with('-') {
                break;
            }

            let mut body = &arg[1..];
            if let Some(rest) = body.strip_prefix('-') {
                if rest.is_empty() {
                    idx += 1;
                    break;
                }
                body = rest;
            }
            if body.is_empty() || body.starts_with('-') || body.starts_with('=') {
                return Err(FlagParseError::BadSyntax(arg.to_string()));
            }
            idx += 1;

            let (name, inline_value) = match body.split_once('=') {
                Some((name, value)) => (name, Some(value)),
                None => (body, None),
            };
            if !self.contains(name) {
                return Err(FlagParseError::UnknownFlag(name.to_string()));
            }

            let value = match inline_value {
                Some(value) => value.to_string(),
                None => match args.get(idx) {
                    Some(next) => {
                        idx += 1;
                        next.clone()
                    }
                    None => return Err(FlagParseError::MissingValue(name.to_string())),
                },
            };
            self.set(name, value);
        }

        Ok(idx)
    }
}
