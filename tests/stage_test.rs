//! Integration tests for artifact staging
//!
//! Exercises the stager through the library, with assert_fs fixtures.

use assert_fs::prelude::*;
use predicates::prelude::*;

use frontstage::core::stage::stage;

#[test]
fn test_staging_is_idempotent_across_sources() {
    let temp = assert_fs::TempDir::new().unwrap();
    let first = temp.child("dist-a");
    first.child("index.html").write_str("<html>a</html>").unwrap();
    first.child("assets/a.js").write_str("a").unwrap();
    let second = temp.child("dist-b");
    second.child("main.html").write_str("<html>b</html>").unwrap();
    let output = temp.child("staged");

    stage(first.path(), output.path(), &[]).unwrap();
    stage(second.path(), output.path(), &[]).unwrap();

    // Only the second source's contents remain.
    output.child("main.html").assert(predicate::path::exists());
    output.child("index.html").assert(predicate::path::missing());
    output.child("assets").assert(predicate::path::missing());
}

#[test]
fn test_dependency_cache_never_staged() {
    let temp = assert_fs::TempDir::new().unwrap();
    let artifacts = temp.child("dist");
    artifacts.child("index.html").write_str("<html>").unwrap();
    artifacts
        .child("node_modules/left-pad/index.js")
        .write_str("js")
        .unwrap();
    let output = temp.child("staged");

    // Empty exclude list; the cache is still filtered.
    let result = stage(artifacts.path(), output.path(), &[]).unwrap();

    assert_eq!(result.files_copied, 1);
    output.child("index.html").assert(predicate::path::exists());
    output.child("node_modules").assert(predicate::path::missing());
}

#[test]
fn test_exclude_patterns_filter_subtrees() {
    let temp = assert_fs::TempDir::new().unwrap();
    let artifacts = temp.child("dist");
    artifacts.child("index.html").write_str("<html>").unwrap();
    artifacts.child("coverage/lcov.info").write_str("x").unwrap();
    let output = temp.child("staged");

    stage(artifacts.path(), output.path(), &["coverage".to_string()]).unwrap();

    output.child("index.html").assert(predicate::path::exists());
    output.child("coverage").assert(predicate::path::missing());
}

#[test]
fn test_intermediate_directories_created() {
    let temp = assert_fs::TempDir::new().unwrap();
    let artifacts = temp.child("dist");
    artifacts
        .child("deep/nested/tree/file.txt")
        .write_str("x")
        .unwrap();
    let output = temp.child("a/b/c/staged");

    let result = stage(artifacts.path(), output.path(), &[]).unwrap();

    assert_eq!(result.files_copied, 1);
    output
        .child("deep/nested/tree/file.txt")
        .assert(predicate::path::exists());
}
