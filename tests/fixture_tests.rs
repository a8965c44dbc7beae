use canonjava::canonicalize;
use std::fs;
use std::path::{Path, PathBuf};

fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures")
}

/// Canonicalize `fixtures/<name>.java` and compare byte-for-byte with
/// `fixtures/<name>.expected`
fn check_fixture(name: &str) {
    let dir = fixtures_dir();
    let source = fs::read_to_string(dir.join(format!("{}.java", name)))
        .expect("Failed to read fixture source");
    let expected = fs::read_to_string(dir.join(format!("{}.expected", name)))
        .expect("Failed to read expected output");

    let actual = canonicalize(&source).unwrap_or_else(|e| panic!("{}: {}", name, e));

    if actual != expected {
        println!("Canonical output for {}:\n{}", name, actual);
    }
    assert_eq!(actual, expected, "fixture {} does not match", name);
}

#[test]
fn test_arrays_fixture() {
    check_fixture("arrays");
}

#[test]
fn test_math_fixture() {
    check_fixture("math");
}

#[test]
fn test_methods_fixture() {
    check_fixture("methods");
}

#[test]
fn test_control_fixture() {
    check_fixture("control");
}

#[test]
fn test_every_fixture_has_expected_output() {
    let mut sources = 0;
    for entry in fs::read_dir(fixtures_dir()).expect("Failed to list fixtures") {
        let path = entry.expect("Failed to read fixture entry").path();
        if path.extension().is_some_and(|ext| ext == "java") {
            sources += 1;
            assert!(
                path.with_extension("expected").exists(),
                "{} has no .expected file",
                path.display()
            );
        }
    }
    assert!(sources >= 4);
}
