//! End-to-end tests for the query subcommands against the sample fixture.

use std::path::PathBuf;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;

fn fixture_data() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../docs/fixtures/csair_sample.json")
        .canonicalize()
        .expect("fixture dataset present")
}

fn cli() -> Command {
    let mut cmd = cargo_bin_cmd!("csair-cli");
    cmd.env("RUST_LOG", "error")
        .env_remove("CSAIR_DATA_FILE")
        .arg("--data-file")
        .arg(fixture_data());
    cmd
}

#[test]
fn lists_cities_alphabetically() {
    cli().arg("cities").assert().success().stdout(
        "Bogota\nLagos\nLima\nLondon\nLos Angeles\nMexico City\nSantiago\n",
    );
}

#[test]
fn info_reports_requested_field() {
    cli()
        .args(["info", "--city", "Mexico City", "--field", "timezone"])
        .assert()
        .success()
        .stdout("GMT -6\n");

    cli()
        .args(["info", "--city", "Santiago", "--field", "5"])
        .assert()
        .success()
        .stdout("33°S, 71°W\n");
}

#[test]
fn info_unknown_field_lists_closest_cities() {
    cli()
        .args(["info", "--city", "Lima", "--field", "whatever"])
        .assert()
        .success()
        .stdout(contains("Santiago (SCL) - 2453 miles"))
        .stdout(contains("Bogota (BOG) - 1879 miles"));
}

#[test]
fn unknown_city_fails_with_suggestion() {
    cli()
        .args(["closest", "--city", "Bogata"])
        .assert()
        .failure()
        .stderr(contains("unknown city name: Bogata"))
        .stderr(contains("Bogota"));
}

#[test]
fn longest_and_shortest_flights() {
    cli()
        .arg("longest")
        .assert()
        .success()
        .stdout("Longest flight: Los Angeles (LAX) - London (LON): 5446 miles\n");

    cli()
        .arg("shortest")
        .assert()
        .success()
        .stdout("Shortest flight: Mexico City (MEX) - Los Angeles (LAX): 1568 miles\n");
}

#[test]
fn averages() {
    cli()
        .arg("average-distance")
        .assert()
        .success()
        .stdout("Average flight distance: 3191 miles\n");

    cli()
        .arg("average-population")
        .assert()
        .success()
        .stdout("Average population of CSAir cities: 9992857 inhabitants\n");
}

#[test]
fn hubs_and_map_url() {
    cli()
        .arg("hubs")
        .assert()
        .success()
        .stdout(contains("Cities with most CSAir connections (3):"))
        .stdout(contains("Lima (LIM)"))
        .stdout(contains("Mexico City (MEX)"));

    cli().arg("map-url").assert().success().stdout(
        "http://www.gcmap.com/mapui?P=BOG-LIM,+BOG-MEX,+LAX-LON,+LAX-MEX,+LIM-MEX,+LIM-SCL\n",
    );
}

#[test]
fn flight_time_from_distance() {
    cli()
        .args(["flight-time", "--distance", "1000"])
        .assert()
        .success()
        .stdout("Estimated flight time: 1.87 hours\n");
}

#[test]
fn flight_time_requires_direct_route() {
    cli()
        .args(["flight-time", "--from", "SCL", "--to", "LON"])
        .assert()
        .failure()
        .stderr(contains("no direct route between SCL and LON"));
}

#[test]
fn stats_json_output() {
    let output = cli()
        .args(["--format", "json", "stats"])
        .output()
        .expect("command runs");
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(json["city_count"], 7);
    assert_eq!(json["route_count"], 6);
    assert_eq!(json["average_distance"], 3191);
    assert_eq!(json["smallest_city"]["city"]["code"], "LAX");
}

#[test]
fn graph_dump_lists_every_city() {
    cli()
        .arg("graph")
        .assert()
        .success()
        .stdout(contains("{Graph}"))
        .stdout(contains("{SCL => {LIM: 2453}}"));
}

#[test]
fn missing_data_file_fails() {
    let mut cmd = cargo_bin_cmd!("csair-cli");
    cmd.env("RUST_LOG", "error")
        .args(["--data-file", "/nonexistent/map_data.json", "cities"])
        .assert()
        .failure()
        .stderr(contains("failed to load CSAir data").and(contains("dataset not found")));
}

#[test]
fn data_file_from_environment() {
    let mut cmd = cargo_bin_cmd!("csair-cli");
    cmd.env("RUST_LOG", "error")
        .env("CSAIR_DATA_FILE", fixture_data())
        .arg("biggest")
        .assert()
        .success()
        .stdout("Biggest city: Mexico City (MEX): 23400000 inhabitants\n");
}
