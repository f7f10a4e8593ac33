use std::io::Write;
use std::path::PathBuf;

use csair_lib::{load_dataset, Error, ErrorKind, QueryService, Result};
use tempfile::NamedTempFile;

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures/csair_sample.json")
}

fn temp_dataset(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    file.write_all(contents.as_bytes()).expect("write dataset");
    file
}

#[test]
fn load_fixture_records() -> Result<()> {
    let dataset = load_dataset(&fixture_path())?;

    assert_eq!(dataset.metros.len(), 7, "fixture should have 7 metros");
    assert_eq!(dataset.routes.len(), 6, "fixture should have 6 routes");
    assert_eq!(dataset.data_sources.len(), 3);

    let first = &dataset.routes[0];
    assert_eq!(first.ports, ["SCL".to_string(), "LIM".to_string()]);
    assert_eq!(first.distance, 2453.0);
    Ok(())
}

#[test]
fn missing_file_is_reported() {
    let path = fixture_path().with_file_name("does_not_exist.json");
    let err = QueryService::load(&path).expect_err("file is missing");

    assert!(matches!(err, Error::DatasetNotFound { .. }));
    assert_eq!(err.kind(), ErrorKind::Load);
}

#[test]
fn missing_metros_section_is_reported() {
    let file = temp_dataset(r#"{"routes": [{"ports": ["SCL", "LIM"], "distance": 2453}]}"#);
    let err = load_dataset(file.path()).expect_err("metros missing");

    assert!(matches!(err, Error::MissingSection { key: "metros" }));
    assert!(err.to_string().contains("metros"));
}

#[test]
fn malformed_document_is_reported() {
    let file = temp_dataset(r#"{"metros": [], "routes": ["#);
    let err = load_dataset(file.path()).expect_err("truncated JSON");

    assert_eq!(err.kind(), ErrorKind::Load);
}

#[test]
fn self_loop_fails_the_whole_load() {
    let file = temp_dataset(r#"{"metros": [], "routes": [{"ports": ["SCL", "SCL"], "distance": 10}]}"#);
    let err = QueryService::load(file.path()).expect_err("self loop");

    assert!(matches!(err, Error::SelfLoop { ref code } if code == "SCL"));
    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[test]
fn duplicate_metro_code_fails_the_whole_load() {
    let metro = r#"{
        "code": "SCL", "name": "Santiago", "country": "CL",
        "continent": "South America", "timezone": -4,
        "coordinates": {"S": 33, "W": 71}, "population": 6000000, "region": 1
    }"#;
    let renamed = metro.replace("Santiago", "Santiago de Chile");
    let document = format!(r#"{{"metros": [{metro}, {renamed}], "routes": []}}"#);
    let file = temp_dataset(&document);

    let err = QueryService::load(file.path()).expect_err("duplicate code");
    assert!(matches!(err, Error::DuplicateCode { ref code } if code == "SCL"));
}

#[test]
fn negative_distance_is_a_validation_error() {
    let file = temp_dataset(r#"{"metros": [], "routes": [{"ports": ["SCL", "LIM"], "distance": -1}]}"#);
    let err = QueryService::load(file.path()).expect_err("negative distance");

    assert!(matches!(err, Error::InvalidDistance { .. }));
    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[test]
fn duplicate_metro_name_fails_the_whole_load() {
    let metro = r#"{
        "code": "SCL", "name": "Santiago", "country": "CL",
        "continent": "South America", "timezone": -4,
        "coordinates": {"S": 33, "W": 71}, "population": 6000000, "region": 1
    }"#;
    let recoded = metro.replace("SCL", "STI");
    let document = format!(r#"{{"metros": [{metro}, {recoded}], "routes": []}}"#);
    let file = temp_dataset(&document);

    let err = QueryService::load(file.path()).expect_err("duplicate name");
    assert!(matches!(err, Error::DuplicateName { ref name } if name == "Santiago"));
    assert_eq!(err.kind(), ErrorKind::Validation);
}
