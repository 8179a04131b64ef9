use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("cannot create temporary directory: {0}")]
    TempDir(#[source] std::io::Error),

    #[error("cannot run {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{command}: {stderr}")]
    Command { command: String, stderr: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Module not found: {0}")]
    NotFound(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum VersionError {
    #[error("malformed version: {0}")]
    Invalid(String),

    #[error("invalid pre-release in {version}: {message}")]
    InvalidPrerelease { version: String, message: String },

    #[error("invalid build metadata in {version}: {message}")]
    InvalidBuild { version: String, message: String },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConstraintError {
    #[error("empty constraint")]
    Empty,

    #[error("malformed constraint: {0}")]
    InvalidClause(String),

    #[error("invalid version in constraint {clause}: {source}")]
    InvalidVersion {
        clause: String,
        #[source]
        source: VersionError,
    },
}

/// Errors returned by the selection operations
#[derive(Debug, Error)]
pub enum SelectError {
    #[error("cannot parse constraints: {0}")]
    Constraint(#[from] ConstraintError),

    #[error("{operation}: cannot list versions of {module}: {source}")]
    Source {
        operation: &'static str,
        module: String,
        #[source]
        source: SourceError,
    },

    #[error("cannot parse version {version}: {source}")]
    Version {
        version: String,
        #[source]
        source: VersionError,
    },
}
