use std::path::PathBuf;

use anyhow::{bail, Context};

/// Generator configuration loaded from environment variables.
///
/// All fields have defaults suitable for printing the document to stdout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocgenConfig {
    /// Output file; `None` writes to stdout.
    pub output: Option<PathBuf>,
    /// Pretty-print the JSON document (default: `true`).
    pub pretty: bool,
    /// `info.title` of the document.
    pub title: String,
    /// Prefix prepended to every documented path (default: `/api/v1`).
    pub api_prefix: String,
}

impl Default for DocgenConfig {
    fn default() -> Self {
        Self {
            output: None,
            pretty: true,
            title: "Catalog API".to_string(),
            api_prefix: "/api/v1".to_string(),
        }
    }
}

impl DocgenConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var           | Default        |
    /// |-------------------|----------------|
    /// | `DOCS_OUTPUT`     | stdout         |
    /// | `DOCS_PRETTY`     | `true`         |
    /// | `DOCS_TITLE`      | `Catalog API`  |
    /// | `DOCS_API_PREFIX` | `/api/v1`      |
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let defaults = Self::default();

        let output = lookup("DOCS_OUTPUT")
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);

        let pretty = match lookup("DOCS_PRETTY") {
            Some(raw) => parse_bool(&raw).context("DOCS_PRETTY must be a boolean")?,
            None => defaults.pretty,
        };

        let title = lookup("DOCS_TITLE").unwrap_or(defaults.title);

        let api_prefix = lookup("DOCS_API_PREFIX")
            .map(|p| normalize_prefix(&p))
            .unwrap_or(defaults.api_prefix);

        Ok(Self {
            output,
            pretty,
            title,
            api_prefix,
        })
    }
}

fn parse_bool(raw: &str) -> anyhow::Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("unrecognized boolean '{other}'"),
    }
}

/// Ensure a leading slash and no trailing slash; an empty prefix stays empty.
fn normalize_prefix(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = DocgenConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, DocgenConfig::default());
    }

    #[test]
    fn reads_every_variable() {
        let config = DocgenConfig::from_lookup(lookup(&[
            ("DOCS_OUTPUT", "openapi.json"),
            ("DOCS_PRETTY", "no"),
            ("DOCS_TITLE", "Registrar"),
            ("DOCS_API_PREFIX", "api/v2/"),
        ]))
        .unwrap();
        assert_eq!(config.output, Some(PathBuf::from("openapi.json")));
        assert!(!config.pretty);
        assert_eq!(config.title, "Registrar");
        assert_eq!(config.api_prefix, "/api/v2");
    }

    #[test]
    fn empty_prefix_is_allowed() {
        let config = DocgenConfig::from_lookup(lookup(&[("DOCS_API_PREFIX", "/")])).unwrap();
        assert_eq!(config.api_prefix, "");
    }

    #[test]
    fn invalid_boolean_is_an_error() {
        let err = DocgenConfig::from_lookup(lookup(&[("DOCS_PRETTY", "maybe")])).unwrap_err();
        assert!(err.to_string().contains("DOCS_PRETTY"));
    }
}
