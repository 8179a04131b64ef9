//! Source trait for listing the published versions of a module

#[cfg(test)]
use mockall::automock;

use crate::version::error::SourceError;
use crate::version::types::ModuleVersion;

/// Trait for fetching module versions from a toolchain or registry
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait VersionSource: Send + Sync {
    /// Short name of the backend, used in logs
    fn name(&self) -> &'static str;

    /// Fetches all published versions of a module
    ///
    /// # Arguments
    /// * `module` - The module path (e.g., "golang.org/x/text")
    ///
    /// # Returns
    /// * `Ok(Vec<ModuleVersion>)` - Every published version, ordered from oldest to newest
    /// * `Err(SourceError)` - If the fetch fails
    async fn fetch_all_versions(&self, module: &str) -> Result<Vec<ModuleVersion>, SourceError>;
}
