//! Registry file loading.

#![expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]

use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use example_data::{DEFAULT_REGISTRY_JSON, RegistryError, SeedRegistry};
use rstest::rstest;

fn unique_temp_path(file_name: &str) -> PathBuf {
    static COUNTER: AtomicUsize = AtomicUsize::new(0);
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos())
        .unwrap_or_default();
    let count = COUNTER.fetch_add(1, Ordering::Relaxed);
    std::env::temp_dir().join(format!(
        "example-data-{}-{nanos}-{count}-{file_name}",
        std::process::id()
    ))
}

#[rstest]
fn loads_registry_from_file() {
    let path = unique_temp_path("seeds.json");
    fs::write(&path, DEFAULT_REGISTRY_JSON).expect("write registry");

    let from_file = SeedRegistry::from_file(&path).expect("registry loads");
    let bundled = SeedRegistry::bundled().expect("bundled registry");
    assert_eq!(from_file, bundled);

    fs::remove_file(&path).expect("cleanup");
}

#[rstest]
fn missing_file_reports_its_path() {
    let path = unique_temp_path("missing.json");

    let err = SeedRegistry::from_file(&path).expect_err("missing file");
    match err {
        RegistryError::IoError { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[rstest]
fn malformed_file_is_a_parse_error() {
    let path = unique_temp_path("broken.json");
    fs::write(&path, "{\"version\": 1, \"seeds\": [").expect("write registry");

    let err = SeedRegistry::from_file(&path).expect_err("malformed file");
    assert!(matches!(err, RegistryError::ParseError { .. }));

    fs::remove_file(&path).expect("cleanup");
}
