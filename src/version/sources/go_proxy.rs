//! Go module proxy implementation of the version source

use crate::version::error::SourceError;
use crate::version::semver::Version;
use crate::version::source::VersionSource;
use crate::version::types::ModuleVersion;
use tracing::{debug, warn};

/// Default base URL for Go proxy
pub const DEFAULT_PROXY_URL: &str = "https://proxy.golang.org";

/// Version source backed by the Go module proxy protocol
pub struct GoProxySource {
    client: reqwest::Client,
    base_url: String,
}

impl GoProxySource {
    /// Creates a new GoProxySource with a custom base URL
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent("modver")
                .build()
                .expect("Failed to create HTTP client"),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

impl Default for GoProxySource {
    fn default() -> Self {
        Self::new(DEFAULT_PROXY_URL)
    }
}

#[async_trait::async_trait]
impl VersionSource for GoProxySource {
    fn name(&self) -> &'static str {
        "go-proxy"
    }

    async fn fetch_all_versions(&self, module: &str) -> Result<Vec<ModuleVersion>, SourceError> {
        let url = format!("{}/{}/@v/list", self.base_url, encode_module_path(module));
        debug!("Fetching version list from {}", url);

        let response = self.client.get(&url).send().await?;

        let status = response.status();

        // The proxy answers 404 or 410 for modules it does not know
        if status == reqwest::StatusCode::NOT_FOUND || status == reqwest::StatusCode::GONE {
            return Err(SourceError::NotFound(module.to_string()));
        }

        if !status.is_success() {
            warn!("Go proxy returned status {}: {}", status, url);
            return Err(SourceError::InvalidResponse(format!(
                "Unexpected status: {}",
                status
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| SourceError::InvalidResponse(e.to_string()))?;

        let versions = sort_ascending(body.lines().map(str::trim).filter(|line| !line.is_empty()));
        debug!("Go proxy listed {} versions of {}", versions.len(), module);

        Ok(ModuleVersion::from_versions(module, versions))
    }
}

/// Orders versions oldest first. The list endpoint makes no ordering promise.
///
/// Unparseable entries sort first and are kept so that selection reports them.
fn sort_ascending<'a>(versions: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut parsed: Vec<(Option<Version>, &str)> = versions
        .map(|v| (Version::parse(v).ok(), v))
        .collect();
    parsed.sort_by(|a, b| a.0.cmp(&b.0));
    parsed.into_iter().map(|(_, v)| v.to_string()).collect()
}

/// Encodes a module path for use in proxy URLs.
/// Uppercase letters are escaped as !{lowercase}.
fn encode_module_path(path: &str) -> String {
    let mut result = String::with_capacity(path.len());
    for c in path.chars() {
        if c.is_ascii_uppercase() {
            result.push('!');
            result.push(c.to_ascii_lowercase());
        } else {
            result.push(c);
        }
    }
    result
}
