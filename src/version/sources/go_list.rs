//! Version source backed by the Go toolchain
//!
//! Runs `go list -m -versions -json <module>` inside a throwaway module so the
//! query never touches the caller's own `go.mod`.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use serde::Deserialize;
use tokio::process::Command;
use tracing::debug;

use crate::version::error::SourceError;
use crate::version::source::VersionSource;
use crate::version::types::ModuleVersion;

/// Default Go binary, resolved through `PATH`
pub const DEFAULT_GO_BINARY: &str = "go";

/// Output of `go list -m -versions -json`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ModuleListing {
    /// Absent when the module has no tagged versions
    #[serde(default)]
    versions: Vec<String>,
}

pub struct GoListSource {
    go_binary: PathBuf,
    goproxy: Option<String>,
}

impl GoListSource {
    pub fn new(go_binary: impl Into<PathBuf>) -> Self {
        Self {
            go_binary: go_binary.into(),
            goproxy: None,
        }
    }

    /// Overrides `GOPROXY` for the spawned toolchain
    pub fn with_goproxy(mut self, goproxy: impl Into<String>) -> Self {
        self.goproxy = Some(goproxy.into());
        self
    }

    async fn run(&self, dir: &Path, args: &[&str]) -> Result<Vec<u8>, SourceError> {
        let command = format!("go {}", args.join(" "));
        debug!("Running {} in {:?}", command, dir);

        let mut cmd = Command::new(&self.go_binary);
        cmd.args(args)
            .current_dir(dir)
            .stdin(Stdio::null())
            .kill_on_drop(true);
        if let Some(goproxy) = &self.goproxy {
            cmd.env("GOPROXY", goproxy);
        }

        let output = cmd.output().await.map_err(|source| SourceError::Spawn {
            command: command.clone(),
            source,
        })?;

        if !output.status.success() {
            return Err(SourceError::Command {
                command,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(output.stdout)
    }
}

impl Default for GoListSource {
    fn default() -> Self {
        Self::new(DEFAULT_GO_BINARY)
    }
}

#[async_trait::async_trait]
impl VersionSource for GoListSource {
    fn name(&self) -> &'static str {
        "go-list"
    }

    async fn fetch_all_versions(&self, module: &str) -> Result<Vec<ModuleVersion>, SourceError> {
        // Removed on drop, whichever way this function returns
        let workdir = tempfile::Builder::new()
            .prefix("modver")
            .tempdir()
            .map_err(SourceError::TempDir)?;

        self.run(workdir.path(), &["mod", "init", "tmp"]).await?;
        let stdout = self
            .run(workdir.path(), &["list", "-m", "-versions", "-json", module])
            .await?;

        let versions = parse_listing(&stdout)?;
        debug!("go list found {} versions of {}", versions.len(), module);

        Ok(ModuleVersion::from_versions(module, versions))
    }
}

fn parse_listing(stdout: &[u8]) -> Result<Vec<String>, SourceError> {
    let listing: ModuleListing = serde_json::from_slice(stdout)
        .map_err(|e| SourceError::InvalidResponse(format!("cannot decode JSON: {}", e)))?;
    Ok(listing.versions)
}
