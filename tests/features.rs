//! End-to-end tests for common-line extraction and supplements on fixture directories.

use std::fs;
use std::path::Path;

use anyhow::Result;
use refdiff::{
    create_supplements, extract_common, FeatureSet, FixtureError, SupplementOptions, TailPolicy,
};
use tempfile::TempDir;

const COMMON_LINE: &str = "pkg syscall, const ETHERTYPE_PAE = 34958";
const COMMON: &str = "intersec.txt";
const GLOB: &str = "case_*.txt";

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("refdiff=debug")
        .with_test_writer()
        .try_init();
}

fn write(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).expect("Failed to write fixture");
}

fn fixture_dir() -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp dir");
    write(
        dir.path(),
        "case_1.txt",
        &format!("pkg os, func Getpid() int\n{COMMON_LINE}\npkg syscall, func Getuid() int\n"),
    );
    write(
        dir.path(),
        "case_2.txt",
        &format!("pkg net, type Conn interface\n{COMMON_LINE}\npkg syscall, func Getuid() int"),
    );
    write(
        dir.path(),
        "case_3.txt",
        &format!("{COMMON_LINE}\npkg unicode, const MaxRune = 1114111\n"),
    );
    dir
}

#[test]
fn extracts_common_line() -> Result<()> {
    init_tracing();
    let dir = fixture_dir();
    let common = extract_common(dir.path(), GLOB, COMMON)?;
    assert_eq!(common.lines(), [COMMON_LINE]);
    assert_eq!(fs::read_to_string(dir.path().join(COMMON))?, COMMON_LINE);
    Ok(())
}

#[test]
fn three_sets_intersect_to_one() -> Result<()> {
    let dir = TempDir::new()?;
    write(dir.path(), "case_a.txt", "A\nB\nC");
    write(dir.path(), "case_b.txt", "D\nC\nB\n");
    write(dir.path(), "case_c.txt", "E\nD\nC");
    let common = extract_common(dir.path(), GLOB, COMMON)?;
    assert_eq!(common.lines(), ["C"]);
    Ok(())
}

#[test]
fn single_file_is_its_own_intersection() -> Result<()> {
    let dir = TempDir::new()?;
    write(dir.path(), "case_1.txt", "b\na\n");
    extract_common(dir.path(), GLOB, COMMON)?;
    assert_eq!(fs::read_to_string(dir.path().join(COMMON))?, "a\nb");
    Ok(())
}

#[test]
fn rerun_with_own_output_is_stable() -> Result<()> {
    let dir = fixture_dir();
    let first = extract_common(dir.path(), GLOB, "case_common.txt")?;
    let second = extract_common(dir.path(), GLOB, "case_common.txt")?;
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn intersection_is_in_every_file() -> Result<()> {
    let dir = fixture_dir();
    let common = extract_common(dir.path(), GLOB, COMMON)?;
    for name in ["case_1.txt", "case_2.txt", "case_3.txt"] {
        let set = FeatureSet::load(&dir.path().join(name))?;
        assert!(common.lines().iter().all(|line| set.lines().contains(line)));
    }
    Ok(())
}

#[test]
fn file_exhausted_before_accumulator() -> Result<()> {
    let dir = TempDir::new()?;
    write(dir.path(), "case_1.txt", "a\nb\nc\nd");
    write(dir.path(), "case_2.txt", "a\nb");
    let common = extract_common(dir.path(), GLOB, COMMON)?;
    assert_eq!(common.len(), 2);
    Ok(())
}

#[test]
fn empty_file_stops_extraction() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "case_1.txt", COMMON_LINE);
    write(dir.path(), "case_2.txt", "");

    let err = extract_common(dir.path(), GLOB, "not_created").unwrap_err();
    assert!(matches!(err, FixtureError::EmptyInput { .. }));
    assert!(!dir.path().join("not_created").exists());
}

#[test]
fn nothing_in_common() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "case_1.txt", COMMON_LINE);
    write(dir.path(), "case_2.txt", "nothing in common");
    write(dir.path(), "case_3.txt", COMMON_LINE);

    let err = extract_common(dir.path(), GLOB, "not_created").unwrap_err();
    match err {
        FixtureError::EmptyIntersection { path } => {
            assert_eq!(path, dir.path().join("case_2.txt"))
        }
        other => panic!("unexpected {other:?}"),
    }
    assert!(!dir.path().join("not_created").exists());
}

#[test]
fn no_file_matched() {
    let dir = TempDir::new().unwrap();
    let err = extract_common(dir.path(), "notfound", "not_created").unwrap_err();
    assert!(err.is_not_found());
    assert!(!dir.path().join("not_created").exists());
}

#[test]
fn supplements_remove_common_line() -> Result<()> {
    init_tracing();
    let dir = fixture_dir();
    let before = FeatureSet::load(&dir.path().join("case_1.txt"))?;
    extract_common(dir.path(), GLOB, COMMON)?;

    let written = create_supplements(dir.path(), GLOB, COMMON, &SupplementOptions::default())?;
    assert_eq!(written.len(), 3);

    let after = FeatureSet::load(&dir.path().join("case_1.txt"))?;
    assert_eq!(after.len(), before.len() - 1);
    assert!(!after.lines().iter().any(|line| line == COMMON_LINE));
    Ok(())
}

#[test]
fn supplement_and_baseline_rebuild_target() -> Result<()> {
    let dir = TempDir::new()?;
    write(dir.path(), "base.txt", "Y\nX");
    write(dir.path(), "case_1.txt", "Z\nY\nX\nW\n");
    create_supplements(dir.path(), GLOB, "base.txt", &SupplementOptions::default())?;
    assert_eq!(fs::read_to_string(dir.path().join("case_1.txt"))?, "W\nZ");
    Ok(())
}

#[test]
fn strict_tail_policy() -> Result<()> {
    let dir = TempDir::new()?;
    write(dir.path(), "base.txt", "X\nY");
    write(dir.path(), "case_1.txt", "W\nX\nY\nZ");
    let opts = SupplementOptions {
        tail: TailPolicy::Drop,
    };
    create_supplements(dir.path(), GLOB, "base.txt", &opts)?;
    assert_eq!(fs::read_to_string(dir.path().join("case_1.txt"))?, "W");
    Ok(())
}

#[test]
fn baseline_as_its_own_target_becomes_empty() -> Result<()> {
    let dir = TempDir::new()?;
    write(dir.path(), COMMON, COMMON_LINE);
    let written = create_supplements(dir.path(), COMMON, COMMON, &SupplementOptions::default())?;
    assert_eq!(written[0].1, 0);
    assert_eq!(fs::read(dir.path().join(COMMON))?.len(), 0);
    Ok(())
}

#[test]
fn empty_baseline_is_rejected() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), COMMON, "");
    let err = create_supplements(dir.path(), COMMON, COMMON, &SupplementOptions::default())
        .unwrap_err();
    assert!(matches!(err, FixtureError::EmptyInput { .. }));
}

#[test]
fn missing_baseline_line_is_named() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), COMMON, COMMON_LINE);
    // sorted before and after the common line
    for content in ["an unknown line", "software"] {
        write(dir.path(), "case_1.txt", content);
        let err = create_supplements(dir.path(), GLOB, COMMON, &SupplementOptions::default())
            .unwrap_err();
        match err {
            FixtureError::MissingBaselineFeature { line, .. } => assert_eq!(line, COMMON_LINE),
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(
            fs::read_to_string(dir.path().join("case_1.txt")).unwrap(),
            content
        );
    }
}

#[test]
fn earlier_rewrites_are_kept_on_failure() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "base.txt", "b");
    write(dir.path(), "case_1.txt", "a\nb");
    write(dir.path(), "case_2.txt", "c");

    let err = create_supplements(dir.path(), GLOB, "base.txt", &SupplementOptions::default())
        .unwrap_err();
    assert!(matches!(err, FixtureError::MissingBaselineFeature { .. }));
    assert_eq!(
        fs::read_to_string(dir.path().join("case_1.txt")).unwrap(),
        "a"
    );
}

#[test]
fn supplements_without_targets() {
    let dir = TempDir::new().unwrap();
    let err = create_supplements(dir.path(), "not_exist", COMMON, &SupplementOptions::default())
        .unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn dot_prefixed_pattern_selects_same_group() -> Result<()> {
    let dir = fixture_dir();
    let common = extract_common(dir.path(), &format!("./{GLOB}"), "out.txt")?;
    assert_eq!(common.lines(), [COMMON_LINE]);
    Ok(())
}
