//! Common types shared by sources and selection

use std::fmt;

use serde::Serialize;

/// A module path paired with one of its published versions
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ModuleVersion {
    pub module: String,
    /// Version string as published, usually with a leading `v`
    pub version: String,
}

impl ModuleVersion {
    pub fn new(module: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            version: version.into(),
        }
    }

    /// Builds one `ModuleVersion` per version string, keeping their order
    pub fn from_versions<I, S>(module: &str, versions: I) -> Vec<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        versions
            .into_iter()
            .map(|version| Self::new(module, version))
            .collect()
    }
}

impl fmt::Display for ModuleVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.module, self.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_joins_module_and_version_with_at() {
        let modver = ModuleVersion::new("golang.org/x/text", "v0.14.0");
        assert_eq!(modver.to_string(), "golang.org/x/text@v0.14.0");
    }

    #[test]
    fn from_versions_keeps_order_and_module() {
        let versions = ModuleVersion::from_versions("example.com/sample", ["v1.0.0", "v0.9.0"]);

        assert_eq!(
            versions,
            vec![
                ModuleVersion::new("example.com/sample", "v1.0.0"),
                ModuleVersion::new("example.com/sample", "v0.9.0"),
            ]
        );
    }

    #[test]
    fn serializes_as_module_and_version_fields() {
        let json = serde_json::to_value(ModuleVersion::new("example.com/sample", "v1.2.3")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"module": "example.com/sample", "version": "v1.2.3"})
        );
    }
}
