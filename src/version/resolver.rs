//! Version selection over a module's published versions
//!
//! Two selections are offered on top of a [`VersionSource`]:
//! - [`ModuleVersionResolver::filter_version`]: versions matching a constraint, in source order
//! - [`ModuleVersionResolver::latest_version`]: the newest version of each minor line
//!
//! Both expect the source to list versions oldest first and neither sorts.
//! Any source failure or unparseable version aborts the call, so a result is
//! either complete or absent.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::debug;

use crate::version::constraint::Constraints;
use crate::version::error::SelectError;
use crate::version::semver::Version;
use crate::version::source::VersionSource;
use crate::version::types::ModuleVersion;

pub struct ModuleVersionResolver {
    source: Arc<dyn VersionSource>,
}

impl ModuleVersionResolver {
    pub fn new(source: Arc<dyn VersionSource>) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &Arc<dyn VersionSource> {
        &self.source
    }

    /// Returns the versions of `module` satisfying `constraints`, such as `">= v2.0.0"`
    ///
    /// The constraint is parsed before anything is fetched.
    pub async fn filter_version(
        &self,
        module: &str,
        constraints: &str,
    ) -> Result<Vec<ModuleVersion>, SelectError> {
        let constraints = Constraints::parse(constraints)?;
        let all = self.fetch("filter", module).await?;

        let mut matched = Vec::new();
        for modver in all {
            let version = parse(&modver)?;
            if constraints.check(&version) {
                matched.push(modver);
            }
        }

        debug!(
            "{} versions of {} satisfy {}",
            matched.len(),
            module,
            constraints
        );
        Ok(matched)
    }

    /// Returns the latest version of each minor line of `module`, at most `max` of them
    ///
    /// Lines are taken newest first and the result is ordered oldest first.
    pub async fn latest_version(
        &self,
        module: &str,
        max: usize,
    ) -> Result<Vec<ModuleVersion>, SelectError> {
        if max == 0 {
            return Ok(Vec::new());
        }

        let all = self.fetch("latest", module).await?;

        let mut latest = Vec::with_capacity(max.min(all.len()));
        let mut minors = HashSet::new();
        for modver in all.into_iter().rev() {
            let version = parse(&modver)?;
            if !minors.insert(version.minor()) {
                continue;
            }

            latest.push(modver);
            if latest.len() >= max {
                break;
            }
        }
        latest.reverse();

        debug!("Selected {} minor lines of {}", latest.len(), module);
        Ok(latest)
    }

    async fn fetch(
        &self,
        operation: &'static str,
        module: &str,
    ) -> Result<Vec<ModuleVersion>, SelectError> {
        debug!("Listing versions of {} via {}", module, self.source.name());
        self.source
            .fetch_all_versions(module)
            .await
            .map_err(|source| SelectError::Source {
                operation,
                module: module.to_string(),
                source,
            })
    }
}

fn parse(modver: &ModuleVersion) -> Result<Version, SelectError> {
    Version::parse(&modver.version).map_err(|source| SelectError::Version {
        version: modver.version.clone(),
        source,
    })
}
