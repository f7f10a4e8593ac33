use std::path::PathBuf;

use csair_lib::{load_dataset, CityDirectory, Error, ErrorKind, Region};

fn fixture_directory() -> CityDirectory {
    let path =
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures/csair_sample.json");
    let dataset = load_dataset(&path).expect("fixture loads");
    CityDirectory::from_records(&dataset.metros).expect("fixture metros are valid")
}

#[test]
fn encode_and_decode_round_trip() {
    let directory = fixture_directory();

    for metro in directory.metros() {
        let code = directory.encode(&metro.name).expect("known name");
        assert_eq!(code, metro.code);
        assert_eq!(directory.decode(code).expect("known code"), metro.name);
    }
}

#[test]
fn names_are_sorted_alphabetically() {
    let directory = fixture_directory();
    let names: Vec<&str> = directory.all_names().into_iter().collect();

    assert_eq!(
        names,
        vec![
            "Bogota",
            "Lagos",
            "Lima",
            "London",
            "Los Angeles",
            "Mexico City",
            "Santiago"
        ]
    );
}

#[test]
fn metros_iterate_in_code_order() {
    let directory = fixture_directory();
    let codes: Vec<&str> = directory.metros().map(|metro| metro.code.as_str()).collect();

    assert_eq!(codes, vec!["BOG", "LAX", "LIM", "LON", "LOS", "MEX", "SCL"]);
}

#[test]
fn metro_metadata_is_available() {
    let directory = fixture_directory();
    let lagos = directory.metro_for("LOS").expect("Lagos is registered");

    assert_eq!(lagos.name, "Lagos");
    assert_eq!(lagos.region, Region::Africa);
    assert_eq!(lagos.coordinates_label(), "6°N, 3°E");
    assert_eq!(lagos.timezone_label(), "GMT +1");
}

#[test]
fn unknown_name_suggests_similar_cities() {
    let directory = fixture_directory();
    let err = directory.encode("Santiagoo").expect_err("typo");

    assert_eq!(err.kind(), ErrorKind::NotFound);
    let message = err.to_string();
    assert!(message.contains("unknown city name"), "{message}");
    assert!(message.contains("Did you mean"), "{message}");
    assert!(message.contains("Santiago"), "{message}");
}

#[test]
fn unknown_code_is_not_found() {
    let directory = fixture_directory();

    let err = directory.decode("XXX").expect_err("unknown code");
    assert!(matches!(err, Error::UnknownCode { ref code } if code == "XXX"));
    assert!(directory.metro_for("XXX").is_err());
}

#[test]
fn fuzzy_matches_respect_limit() {
    let directory = fixture_directory();

    let matches = directory.fuzzy_name_matches("Lo", 1);
    assert!(matches.len() <= 1);
}
