//! Version selection layer for Go-style modules
//!
//! This module lists the published versions of a module and selects among
//! them, either by constraint or by taking the newest release of each minor line.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Source    │────▶│  Resolver   │────▶│ Constraint  │
//! │  (fetch)    │     │  (select)   │     │  (filter)   │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!        │                   │
//!        ▼                   ▼
//! ┌─────────────┐     ┌─────────────┐
//! │   Sources   │     │   Semver    │
//! │(go, proxy)  │     │(version cmp)│
//! └─────────────┘     └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`constraint`]: Constraint expressions such as `>= v1.1.0, < v2`
//! - [`error`]: Error types for sources, parsing and selection
//! - [`resolver`]: Constraint filtering and latest-per-minor selection
//! - [`semver`]: Module version parsing and precedence
//! - [`source`]: Source trait for listing published versions
//! - [`sources`]: Concrete sources (Go toolchain, Go module proxy)
//! - [`types`]: Common types like `ModuleVersion`

pub mod constraint;
pub mod error;
pub mod resolver;
pub mod semver;
pub mod source;
pub mod sources;
pub mod types;
