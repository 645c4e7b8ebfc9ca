/*
 * config_tests.rs
 * Copyright (c) 2025 Databricks Education Team
 *
 * Loading build files from disk.
 */

use bdc_config::{BuildVariables, ConfigError};
use indexmap::IndexMap;
use pretty_assertions::assert_eq;
use std::io::Write;
use tempfile::NamedTempFile;

fn write_build(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_from_path() {
    let file = write_build(
        r#"
variables:
  course_name: Databricks Delta
notebooks:
  - src: Lessons/03-Streaming.scala
    dest: "$course_name/${source_path_no_ext}_${lang}.scala"
"#,
    );

    let build = BuildVariables::from_path(file.path()).unwrap();
    let dest = build
        .expand_destination(&IndexMap::new(), &build.notebooks[0])
        .unwrap();
    assert_eq!(dest, "Databricks Delta/Lessons/03-Streaming_Scala.scala");
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("build.yaml");
    match BuildVariables::from_path(&missing) {
        Err(ConfigError::Io { path, .. }) => assert_eq!(path, missing),
        other => panic!("expected an I/O error, got {:?}", other),
    }
}

#[test]
fn test_invalid_yaml() {
    let file = write_build("variables: [unclosed\n");
    assert!(matches!(
        BuildVariables::from_path(file.path()),
        Err(ConfigError::Yaml(_))
    ));
}

#[test]
fn test_invalid_variable_name() {
    let file = write_build("variables:\n  bad-name: x\n");
    match BuildVariables::from_path(file.path()) {
        Err(ConfigError::InvalidVariableName { name, section }) => {
            assert_eq!(name, "bad-name");
            assert_eq!(section, "variables");
        }
        other => panic!("expected InvalidVariableName, got {:?}", other),
    }
}

#[test]
fn test_non_scalar_variable() {
    let file = write_build(
        "notebooks:\n  - src: a.py\n    dest: x\n    variables:\n      list: [1, 2]\n",
    );
    match BuildVariables::from_path(file.path()) {
        Err(ConfigError::NonScalarVariable { name, section }) => {
            assert_eq!(name, "list");
            assert_eq!(section, "notebook \"a.py\"");
        }
        other => panic!("expected NonScalarVariable, got {:?}", other),
    }
}

#[test]
fn test_missing_destination() {
    let file = write_build("notebooks:\n  - src: a.py\n");
    assert!(matches!(
        BuildVariables::from_path(file.path()),
        Err(ConfigError::MissingDestination { .. })
    ));
}

#[test]
fn test_bad_skip_value() {
    let file = write_build("notebooks:\n  - src: a.py\n    dest: x\n    skip: sometimes\n");
    match BuildVariables::from_path(file.path()) {
        Err(ConfigError::BadBoolean { value }) => assert_eq!(value, "sometimes"),
        other => panic!("expected BadBoolean, got {:?}", other),
    }
}

#[test]
fn test_skip_values() {
    let file = write_build(
        "notebooks:\n  - src: a.py\n    dest: x\n    skip: YES\n  - src: b.py\n    dest: x\n    skip: 0\n",
    );
    let build = BuildVariables::from_path(file.path()).unwrap();
    assert!(build.notebooks[0].skip);
    assert!(!build.notebooks[1].skip);
}
