//! Side-channel ("additional") flags.
//!
//! These flags live outside the command tree and may appear anywhere in the
//! argument vector. They have to be stripped before tree matching because
//! matching relies on fixed positional depths.

use std::collections::BTreeMap;

use tracing::debug;

/// Declared side-channel flags: name to human-readable description.
///
/// # Examples
///
/// ```
/// use cmdtree_core::SideChannelFlags;
///
/// let flags = SideChannelFlags::new().declare("k", "d");
/// let argv: Vec<String> = ["prog", "--k", "v", "cmd"].iter().map(|s| s.to_string()).collect();
///
/// let extracted = flags.extract(&argv);
/// assert_eq!(extracted.argv, ["prog", "cmd"]);
/// assert_eq!(extracted.value("k"), "v");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SideChannelFlags {
    declared: BTreeMap<String, String>,
}

/// Result of [`SideChannelFlags::extract`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extracted {
    /// Argument vector with the matched flag tokens removed.
    pub argv: Vec<String>,
    /// Value of every declared flag; `""` when absent.
    pub values: BTreeMap<String, String>,
}

impl Extracted {
    pub fn value(&self, name: &str) -> &str {
        self.values.get(name).map(String::as_str).unwrap_or("")
    }
}

impl SideChannelFlags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn declare(mut self, name: &str, description: &str) -> Self {
        self.declared
            .insert(name.to_string(), description.to_string());
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.declared
            .iter()
            .map(|(name, description)| (name.as_str(), description.as_str()))
    }

    pub fn description(&self, name: &str) -> Option<&str> {
        self.declared.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.declared.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declared.is_empty()
    }

    /// Strips the first occurrence of every declared flag from `argv`.
    ///
    /// Recognized shapes are `-name=value`, `--name=value`, and `-name` or
    /// `--name` followed by the value token. A bare `-name` at the end of the
    /// vector is removed with an empty value. Later occurrences of the same
    /// flag stay in the vector.
    pub fn extract(&self, argv: &[String]) -> Extracted {
        let mut remaining = argv.to_vec();
        let mut values = BTreeMap::new();

        for name in self.declared.keys() {
            let (next, value) = strip_first(&remaining, name);
            if next.len() != remaining.len() {
                debug!(flag = %name, value = %value, "Extracted side-channel flag");
            }
            remaining = next;
            values.insert(name.clone(), value);
        }

        Extracted {
            argv: remaining,
            values,
        }
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for SideChannelFlags {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::new(), |flags, (name, description)| {
                flags.declare(name, description)
            })
    }
}

/// Returns `argv` without the first occurrence of `name` (and its value
/// token), together with the extracted value.
fn strip_first(argv: &[String], name: &str) -> (Vec<String>, String) {
    let bare = [format!("-{name}"), format!("--{name}")];
    let inline = [format!("-{name}="), format!("--{name}=")];

    for (idx, token) in argv.iter().enumerate() {
        let inline_value = inline
            .iter()
            .find_map(|prefix| token.strip_prefix(prefix.as_str()));

        let (value, width) = match inline_value {
            Some(value) => (value.to_string(), 1),
            None if bare.contains(token) => match argv.get(idx + 1) {
                Some(next) => (next.clone(), 2),
                None => (String::new(), 1),
            },
            None => continue,
        };

        let cleaned = argv[..idx]
            .iter()
            .chain(&argv[idx + width..])
            .cloned()
            .collect();
        return (cleaned, value);
    }

    (argv.to_vec(), String::new())
}
