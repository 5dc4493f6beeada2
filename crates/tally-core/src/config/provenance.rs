//! Which settings did the user type on the command line?

use crate::config::schema::{Schema, SettingName};
use std::collections::BTreeSet;

const OPTION_PREFIX: &str = "--";

/// Option names explicitly supplied on the command line for one invocation.
///
/// Flags are kept as typed (`--min-size`), unknown ones included; validity is
/// the argument parser's business. The primary positional argument has no
/// flag, so its presence is recorded separately.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Provenance {
    flags: BTreeSet<String>,
    positional: bool,
}

impl Provenance {
    pub fn with_positional(mut self, supplied: bool) -> Self {
        self.positional = supplied;
        self
    }

    pub fn contains_flag(&self, flag: &str) -> bool {
        self.flags.contains(flag)
    }

    pub fn positional_supplied(&self) -> bool {
        self.positional
    }

    pub fn flags(&self) -> impl Iterator<Item = &str> {
        self.flags.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty() && !self.positional
    }

    /// Whether `name` was set explicitly on the command line.
    pub fn is_explicit<N: SettingName>(&self, schema: &Schema<N>, name: N) -> bool {
        if schema.positional == Some(name) {
            return self.positional;
        }
        self.flags.contains(&schema.flag(name))
    }
}

/// Scan raw argument tokens for `--name` / `--name=value` options.
///
/// A bare `--` ends option scanning.
pub fn compute_provenance<S: AsRef<str>>(tokens: &[S]) -> Provenance {
    let mut flags = BTreeSet::new();
    for token in tokens {
        let token = token.as_ref();
        if token == OPTION_PREFIX {
            break;
        }
        if !token.starts_with(OPTION_PREFIX) {
            continue;
        }
        let name = token.split_once('=').map_or(token, |(name, _)| name);
        flags.insert(name.to_string());
    }
    Provenance {
        flags,
        positional: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::tests::{DEMO_SCHEMA, Demo};

    #[test]
    fn test_empty_input() {
        let empty: [&str; 0] = [];
        assert!(compute_provenance(&empty).is_empty());
    }

    #[test]
    fn test_flags_and_inline_values() {
        let provenance = compute_provenance(&["/tmp", "--top", "3", "--min-size=10", "--json"]);
        assert!(provenance.contains_flag("--top"));
        assert!(provenance.contains_flag("--min-size"));
        assert!(provenance.contains_flag("--json"));
        assert!(!provenance.contains_flag("/tmp"));
        assert!(!provenance.contains_flag("3"));
    }

    #[test]
    fn test_unknown_flags_are_recorded() {
        let provenance = compute_provenance(&["--bogus", "--also=1"]);
        let flags: Vec<&str> = provenance.flags().collect();
        assert_eq!(flags, vec!["--also", "--bogus"]);
    }

    #[test]
    fn test_double_dash_ends_options() {
        let provenance = compute_provenance(&["--top", "1", "--", "--json"]);
        assert!(provenance.contains_flag("--top"));
        assert!(!provenance.contains_flag("--json"));
        assert!(!provenance.contains_flag("--"));
    }

    #[test]
    fn test_is_explicit_uses_schema_flags() {
        let provenance = compute_provenance(&["--min-size", "5"]);
        assert!(provenance.is_explicit(&DEMO_SCHEMA, Demo::MinSize));
        assert!(!provenance.is_explicit(&DEMO_SCHEMA, Demo::Top));
    }

    #[test]
    fn test_positional_is_tracked_by_presence() {
        // A flag spelled like the positional's key does not count.
        let provenance = compute_provenance(&["--directory", "x"]);
        assert!(!provenance.is_explicit(&DEMO_SCHEMA, Demo::Directory));

        let provenance = compute_provenance(&["x"]).with_positional(true);
        assert!(provenance.is_explicit(&DEMO_SCHEMA, Demo::Directory));
        assert!(provenance.positional_supplied());
    }
}
