//! Selection tests running the resolver against an in-memory source

mod helper;

use std::sync::Arc;

use helper::StaticSource;
use modver::version::error::{SelectError, SourceError};
use modver::version::resolver::ModuleVersionResolver;
use modver::version::semver::Version;
use modver::version::types::ModuleVersion;

const MODULE: &str = "example.com/sample";

const HISTORY: &[&str] = &[
    "v0.1.0", "v0.1.1", "v0.2.0", "v1.0.0", "v1.0.1", "v1.0.2", "v1.1.0-rc.1", "v1.1.0",
    "v1.1.1", "v1.2.0", "v1.3.0-beta", "v1.3.0", "v1.3.4",
];

fn setup(versions: &[&str]) -> (Arc<StaticSource>, ModuleVersionResolver) {
    let source = Arc::new(StaticSource::new().with_versions(MODULE, versions.to_vec()));
    let resolver = ModuleVersionResolver::new(source.clone());
    (source, resolver)
}

fn versions(result: &[ModuleVersion]) -> Vec<&str> {
    result.iter().map(|v| v.version.as_str()).collect()
}

#[tokio::test]
async fn filter_version_returns_order_preserving_subsequence() {
    let (source, resolver) = setup(HISTORY);

    let result = resolver
        .filter_version(MODULE, ">= v1.0.1, < v1.3.0")
        .await
        .unwrap();

    assert_eq!(versions(&result), vec!["v1.0.1", "v1.0.2", "v1.1.0", "v1.1.1", "v1.2.0"]);
    assert_eq!(source.fetches(), vec![MODULE]);
}

#[tokio::test]
async fn filter_version_partitions_input_by_constraint() {
    let (_, resolver) = setup(HISTORY);
    let constraints = modver::version::constraint::Constraints::parse("~> v1.0").unwrap();

    let result = resolver.filter_version(MODULE, "~> v1.0").await.unwrap();

    let kept: Vec<&str> = versions(&result);
    for version in HISTORY {
        let satisfied = constraints.check(&Version::parse(version).unwrap());
        assert_eq!(kept.contains(version), satisfied, "{version}");
    }
}

#[tokio::test]
async fn latest_version_returns_newest_of_each_minor_line_ascending() {
    let (_, resolver) = setup(HISTORY);

    let result = resolver.latest_version(MODULE, 3).await.unwrap();

    assert_eq!(versions(&result), vec!["v1.1.1", "v1.2.0", "v1.3.4"]);
}

#[tokio::test]
async fn latest_version_never_exceeds_distinct_minor_lines() {
    let (_, resolver) = setup(HISTORY);

    let result = resolver.latest_version(MODULE, 100).await.unwrap();

    // Minor lines are keyed on the minor segment alone, so v1.x shadows v0.x
    assert_eq!(versions(&result), vec!["v1.0.2", "v1.1.1", "v1.2.0", "v1.3.4"]);
    let parsed: Vec<Version> = result
        .iter()
        .map(|v| Version::parse(&v.version).unwrap())
        .collect();
    assert!(parsed.windows(2).all(|pair| pair[0] < pair[1]));
}

#[tokio::test]
async fn latest_version_with_zero_max_skips_the_source() {
    let (source, resolver) = setup(HISTORY);

    let result = resolver.latest_version(MODULE, 0).await.unwrap();

    assert!(result.is_empty());
    assert!(source.fetches().is_empty());
}

#[tokio::test]
async fn unknown_module_surfaces_source_error_with_context() {
    let (_, resolver) = setup(HISTORY);

    let err = resolver
        .latest_version("example.com/unknown", 2)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        SelectError::Source {
            source: SourceError::NotFound(_),
            ..
        }
    ));
    assert!(err.to_string().contains("example.com/unknown"));
}
