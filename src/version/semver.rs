//! Semantic version parsing and precedence for module versions
//!
//! Module versions are looser than strict semver:
//! - an optional leading `v` (`v1.2.3`)
//! - any number of numeric segments (`v1`, `v1.2`, `v1.2.3.4`)
//! - optional pre-release (`-rc.1`) and build metadata (`+incompatible`)
//!
//! Missing segments are treated as zero, so `v1.2` and `v1.2.0` are equal.
//! Build metadata never takes part in comparisons.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use semver::{BuildMetadata, Prerelease};

use crate::version::error::VersionError;

static VERSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^v?([0-9]+(?:\.[0-9]+)*)(?:-([0-9A-Za-z.\-]+))?(?:\+([0-9A-Za-z.\-]+))?$")
        .unwrap()
});

/// A parsed module version
#[derive(Debug, Clone)]
pub struct Version {
    raw: String,
    segments: Vec<u64>,
    pre: Prerelease,
    build: BuildMetadata,
}

impl Version {
    /// Parse a version string such as `v1.2.3-beta.1+meta`
    pub fn parse(version: &str) -> Result<Self, VersionError> {
        let caps = VERSION_RE
            .captures(version.trim())
            .ok_or_else(|| VersionError::Invalid(version.to_string()))?;

        let segments = caps[1]
            .split('.')
            .map(|segment| {
                segment
                    .parse::<u64>()
                    .map_err(|_| VersionError::Invalid(version.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let pre = match caps.get(2) {
            Some(pre) => {
                Prerelease::new(pre.as_str()).map_err(|e| VersionError::InvalidPrerelease {
                    version: version.to_string(),
                    message: e.to_string(),
                })?
            }
            None => Prerelease::EMPTY,
        };

        let build = match caps.get(3) {
            Some(build) => {
                BuildMetadata::new(build.as_str()).map_err(|e| VersionError::InvalidBuild {
                    version: version.to_string(),
                    message: e.to_string(),
                })?
            }
            None => BuildMetadata::EMPTY,
        };

        Ok(Self {
            raw: version.trim().to_string(),
            segments,
            pre,
            build,
        })
    }

    /// Numeric segment at `index`, zero when the version does not spell it out
    pub fn segment(&self, index: usize) -> u64 {
        self.segments.get(index).copied().unwrap_or(0)
    }

    pub fn major(&self) -> u64 {
        self.segment(0)
    }

    pub fn minor(&self) -> u64 {
        self.segment(1)
    }

    pub fn patch(&self) -> u64 {
        self.segment(2)
    }

    /// Segments exactly as written
    pub fn segments(&self) -> &[u64] {
        &self.segments
    }

    pub fn prerelease(&self) -> &Prerelease {
        &self.pre
    }

    pub fn build(&self) -> &BuildMetadata {
        &self.build
    }

    pub fn is_prerelease(&self) -> bool {
        !self.pre.is_empty()
    }

    /// Compare numeric segments only, padding the shorter side with zeros
    pub fn cmp_segments(&self, other: &Self) -> Ordering {
        let len = self.segments.len().max(other.segments.len());
        (0..len)
            .map(|i| self.segment(i).cmp(&other.segment(i)))
            .find(|ord| ord.is_ne())
            .unwrap_or(Ordering::Equal)
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cmp_segments(other).then_with(|| {
            // A release ranks above any pre-release of the same segments
            match (self.pre.is_empty(), other.pre.is_empty()) {
                (true, true) => Ordering::Equal,
                (true, false) => Ordering::Greater,
                (false, true) => Ordering::Less,
                (false, false) => self.pre.cmp(&other.pre),
            }
        })
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("v1.2.3", &[1, 2, 3], "")]
    #[case("1.2.3", &[1, 2, 3], "")]
    #[case("v1", &[1], "")]
    #[case("v1.2", &[1, 2], "")]
    #[case("v1.2.3.4", &[1, 2, 3, 4], "")]
    #[case("v1.0.0-rc.1", &[1, 0, 0], "rc.1")]
    #[case("v0.0.0-20210101000000-abcdef123456", &[0, 0, 0], "20210101000000-abcdef123456")]
    #[case("v2.0.0+incompatible", &[2, 0, 0], "")]
    fn parse_accepts_module_versions(
        #[case] input: &str,
        #[case] segments: &[u64],
        #[case] pre: &str,
    ) {
        let version = Version::parse(input).unwrap();
        assert_eq!(version.segments(), segments);
        assert_eq!(version.prerelease().as_str(), pre);
        assert_eq!(version.to_string(), input);
    }

    #[rstest]
    #[case("")]
    #[case("v")]
    #[case("latest")]
    #[case("v1..2")]
    #[case("v1.2.")]
    #[case("vv1.2.3")]
    #[case("v1.2.3-")]
    #[case("v1.2.3-rc..1")]
    #[case("v99999999999999999999.0.0")]
    fn parse_rejects_malformed_versions(#[case] input: &str) {
        assert!(Version::parse(input).is_err());
    }

    #[test]
    fn missing_segments_read_as_zero() {
        let version = Version::parse("v1").unwrap();
        assert_eq!(version.major(), 1);
        assert_eq!(version.minor(), 0);
        assert_eq!(version.patch(), 0);
    }

    #[rstest]
    #[case("v1.0.0", "v1.0.1", Ordering::Less)]
    #[case("v1.2.0", "v1.10.0", Ordering::Less)]
    #[case("v2.0.0", "v1.9.9", Ordering::Greater)]
    #[case("v1.2", "v1.2.0", Ordering::Equal)]
    #[case("1.2.3", "v1.2.3", Ordering::Equal)]
    #[case("v1.2.3.1", "v1.2.3", Ordering::Greater)]
    #[case("v1.0.0-rc.1", "v1.0.0", Ordering::Less)]
    #[case("v1.0.0-alpha", "v1.0.0-beta", Ordering::Less)]
    #[case("v1.0.0-rc.2", "v1.0.0-rc.10", Ordering::Less)]
    #[case("v1.0.0-rc.1", "v0.9.9", Ordering::Greater)]
    #[case("v2.0.0+incompatible", "v2.0.0", Ordering::Equal)]
    fn cmp_follows_semantic_precedence(
        #[case] left: &str,
        #[case] right: &str,
        #[case] expected: Ordering,
    ) {
        let left = Version::parse(left).unwrap();
        let right = Version::parse(right).unwrap();
        assert_eq!(left.cmp(&right), expected);
    }
}
