//! Property sources backing the [`Environment`](super::Environment).

use std::collections::BTreeMap;

/// A named lookup table of string properties.
pub trait PropertySource: Send + Sync + std::fmt::Debug {
    /// Source name, used in logs.
    fn name(&self) -> &str;

    /// Returns the raw (unresolved) value for `key`.
    fn get(&self, key: &str) -> Option<String>;
}

/// An in-memory property source.
#[derive(Debug, Clone, Default)]
pub struct MapSource {
    name: String,
    values: BTreeMap<String, String>,
}

impl MapSource {
    pub fn new(name: impl Into<String>, values: BTreeMap<String, String>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl PropertySource for MapSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}

/// Snapshot of host facts exposed under dotted names.
///
/// Keys: `user.home`, `user.dir`, `user.name`, `tmp.dir`, `os.name`,
/// `os.arch`, `file.separator`. Keys whose value cannot be determined are absent.
pub fn system_properties() -> MapSource {
    let mut values = BTreeMap::new();

    if let Some(home) = dirs::home_dir() {
        values.insert("user.home".to_string(), home.display().to_string());
    }
    if let Ok(cwd) = std::env::current_dir() {
        values.insert("user.dir".to_string(), cwd.display().to_string());
    }
    if let Ok(user) = std::env::var("USER").or_else(|_| std::env::var("USERNAME")) {
        values.insert("user.name".to_string(), user);
    }
    values.insert(
        "tmp.dir".to_string(),
        std::env::temp_dir().display().to_string(),
    );
    values.insert("os.name".to_string(), std::env::consts::OS.to_string());
    values.insert("os.arch".to_string(), std::env::consts::ARCH.to_string());
    values.insert(
        "file.separator".to_string(),
        std::path::MAIN_SEPARATOR.to_string(),
    );

    MapSource::new("systemProperties", values)
}

/// Live view of the process environment variables.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvironmentVariables;

impl PropertySource for EnvironmentVariables {
    fn name(&self) -> &str {
        "systemEnvironment"
    }

    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_source_lookup() {
        let source = MapSource::default().with("a", "1");
        assert_eq!(source.get("a").as_deref(), Some("1"));
        assert_eq!(source.get("b"), None);
        assert_eq!(source.len(), 1);
    }

    #[test]
    fn test_system_properties_has_host_facts() {
        let props = system_properties();
        assert_eq!(props.name(), "systemProperties");
        assert_eq!(props.get("os.name").as_deref(), Some(std::env::consts::OS));
        assert_eq!(
            props.get("file.separator"),
            Some(std::path::MAIN_SEPARATOR.to_string())
        );
        assert!(props.get("tmp.dir").is_some());
    }

    #[test]
    fn test_environment_variables_reads_path() {
        // PATH is set in every CI and dev shell we run in.
        assert!(EnvironmentVariables.get("PATH").is_some());
        assert!(EnvironmentVariables.get("STARTUP_DIAGNOSTICS_SURELY_UNSET").is_none());
    }
}
