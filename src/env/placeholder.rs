//! `${name}` / `${name:default}` substitution.
//!
//! # Rules
//! - Placeholder names may themselves contain placeholders (`${a${b}}`); the
//!   inner ones are resolved first.
//! - Resolved values are resolved again until no placeholder remains.
//! - A default follows the first `:` and applies only when the name is unknown.
//! - A `${` with no matching `}` is literal text.

use std::collections::HashSet;

use crate::error::{DiagnosticsError, Result};

const PREFIX: &str = "${";
const SUFFIX: u8 = b'}';
const SEPARATOR: char = ':';

/// Resolves placeholders against a lookup function.
#[derive(Debug, Clone, Copy)]
pub struct PlaceholderResolver {
    ignore_unresolvable: bool,
}

impl PlaceholderResolver {
    /// Unknown placeholders without a default are an error.
    pub fn strict() -> Self {
        Self {
            ignore_unresolvable: false,
        }
    }

    /// Unknown placeholders without a default are left verbatim.
    pub fn lenient() -> Self {
        Self {
            ignore_unresolvable: true,
        }
    }

    pub fn resolve<F>(&self, text: &str, lookup: F) -> Result<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut visiting = HashSet::new();
        self.parse(text, &lookup, &mut visiting)
    }

    fn parse<F>(&self, value: &str, lookup: &F, visiting: &mut HashSet<String>) -> Result<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut result = value.to_string();
        let mut start = result.find(PREFIX);

        while let Some(begin) = start {
            let Some(end) = find_placeholder_end(&result, begin) else {
                break;
            };

            let original = result[begin + PREFIX.len()..end].to_string();
            if !visiting.insert(original.clone()) {
                return Err(DiagnosticsError::CircularPlaceholder(original));
            }

            let placeholder = self.parse(&original, lookup, visiting)?;
            let mut resolved = lookup(&placeholder);
            if resolved.is_none() {
                if let Some((name, default)) = placeholder.split_once(SEPARATOR) {
                    resolved = lookup(name).or_else(|| Some(default.to_string()));
                }
            }

            start = match resolved {
                Some(raw) => {
                    let replacement = self.parse(&raw, lookup, visiting)?;
                    result.replace_range(begin..=end, &replacement);
                    let resume = begin + replacement.len();
                    result[resume..].find(PREFIX).map(|i| i + resume)
                }
                None if self.ignore_unresolvable => {
                    let resume = end + 1;
                    result[resume..].find(PREFIX).map(|i| i + resume)
                }
                None => {
                    return Err(DiagnosticsError::UnresolvedPlaceholder {
                        name: placeholder,
                        text: value.to_string(),
                    });
                }
            };

            visiting.remove(&original);
        }

        Ok(result)
    }
}

impl Default for PlaceholderResolver {
    fn default() -> Self {
        Self::strict()
    }
}

/// Index of the `}` closing the placeholder opened at `begin`, honouring nesting.
fn find_placeholder_end(text: &str, begin: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut index = begin + PREFIX.len();
    let mut depth = 0usize;

    while index < bytes.len() {
        if bytes[index] == SUFFIX {
            if depth == 0 {
                return Some(index);
            }
            depth -= 1;
            index += 1;
        } else if bytes[index..].starts_with(PREFIX.as_bytes()) {
            depth += 1;
            index += PREFIX.len();
        } else {
            index += 1;
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn props(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn strict(text: &str, map: &HashMap<String, String>) -> Result<String> {
        PlaceholderResolver::strict().resolve(text, |k| map.get(k).cloned())
    }

    #[test]
    fn test_home_directory_template() {
        let map = props(&[("user.home", "/home/alice")]);
        assert_eq!(
            strict("My home directory is ${user.home}", &map).unwrap(),
            "My home directory is /home/alice"
        );
    }

    #[test]
    fn test_unknown_placeholder_is_error() {
        let err = strict("Hello ${nobody}", &props(&[])).unwrap_err();
        match err {
            DiagnosticsError::UnresolvedPlaceholder { name, text } => {
                assert_eq!(name, "nobody");
                assert_eq!(text, "Hello ${nobody}");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_default_value() {
        let map = props(&[("present", "yes")]);
        assert_eq!(strict("${missing:fallback}", &map).unwrap(), "fallback");
        assert_eq!(strict("${present:fallback}", &map).unwrap(), "yes");
        assert_eq!(strict("[${missing:}]", &map).unwrap(), "[]");
    }

    #[test]
    fn test_literal_text_passes_through() {
        let map = props(&[]);
        assert_eq!(strict("no placeholders here", &map).unwrap(), "no placeholders here");
        assert_eq!(strict("price: $5 {ok}", &map).unwrap(), "price: $5 {ok}");
        assert_eq!(strict("open ${never closed", &map).unwrap(), "open ${never closed");
    }

    #[test]
    fn test_nested_name_and_recursive_value() {
        let map = props(&[
            ("env", "prod"),
            ("db.prod", "${host}:5432"),
            ("host", "db.internal"),
        ]);
        assert_eq!(strict("${db.${env}}", &map).unwrap(), "db.internal:5432");
    }

    #[test]
    fn test_repeated_placeholder() {
        let map = props(&[("x", "1")]);
        assert_eq!(strict("${x}+${x}=2", &map).unwrap(), "1+1=2");
    }

    #[test]
    fn test_multibyte_text_around_placeholders() {
        let map = props(&[("name", "Zoë")]);
        assert_eq!(strict("héllo ${name} ✓", &map).unwrap(), "héllo Zoë ✓");
    }

    #[test]
    fn test_multibyte_text_inside_placeholders() {
        let map = props(&[("clé", "valeur")]);
        assert_eq!(strict("${missing:Zoë}", &map).unwrap(), "Zoë");
        assert_eq!(strict("${clé}", &map).unwrap(), "valeur");
        assert_eq!(strict("open ${never closed é", &map).unwrap(), "open ${never closed é");

        let lenient = PlaceholderResolver::lenient()
            .resolve("${ünknown} ✓", |key| map.get(key).cloned())
            .unwrap();
        assert_eq!(lenient, "${ünknown} ✓");
    }

    #[test]
    fn test_circular_reference() {
        let map = props(&[("a", "${b}"), ("b", "${a}")]);
        assert!(matches!(
            strict("${a}", &map),
            Err(DiagnosticsError::CircularPlaceholder(name)) if name == "a"
        ));
    }

    #[test]
    fn test_lenient_keeps_unknown() {
        let map = props(&[("known", "k")]);
        let resolved = PlaceholderResolver::lenient()
            .resolve("${unknown} and ${known}", |k| map.get(k).cloned())
            .unwrap();
        assert_eq!(resolved, "${unknown} and k");
    }
}
