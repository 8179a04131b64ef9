//! Version source test utilities

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use modver::version::error::SourceError;
use modver::version::source::VersionSource;
use modver::version::types::ModuleVersion;

/// In-memory source that serves fixed version lists and counts fetches
#[derive(Default)]
pub struct StaticSource {
    versions: HashMap<String, Vec<String>>,
    fetches: Mutex<Vec<String>>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_versions(mut self, module: &str, versions: Vec<&str>) -> Self {
        self.versions.insert(
            module.to_string(),
            versions.into_iter().map(|v| v.to_string()).collect(),
        );
        self
    }

    /// Modules fetched so far, in call order
    pub fn fetches(&self) -> Vec<String> {
        self.fetches.lock().unwrap().clone()
    }
}

#[async_trait]
impl VersionSource for StaticSource {
    fn name(&self) -> &'static str {
        "static"
    }

    async fn fetch_all_versions(&self, module: &str) -> Result<Vec<ModuleVersion>, SourceError> {
        self.fetches.lock().unwrap().push(module.to_string());
        match self.versions.get(module) {
            Some(versions) => Ok(ModuleVersion::from_versions(module, versions.iter().cloned())),
            None => Err(SourceError::NotFound(module.to_string())),
        }
    }
}
