use assert_cmd::prelude::*;
use predicates::prelude::*;
use serde_json::json;
use std::process::Command;
use tokio::runtime::Runtime;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn serve(p: &str, resp: ResponseTemplate) -> (Runtime, MockServer) {
    let rt = Runtime::new().unwrap();
    let server = rt.block_on(MockServer::start());
    rt.block_on(
        Mock::given(method("GET"))
            .and(path(p))
            .respond_with(resp)
            .mount(&server),
    );
    (rt, server)
}

#[test]
fn cli_shows_help() {
    let mut cmd = Command::cargo_bin("popio").unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("popio"));
}

#[test]
fn cli_rejects_unknown_sex() {
    let mut cmd = Command::cargo_bin("popio").unwrap();
    cmd.args([
        "life",
        "--sex",
        "robot",
        "--country",
        "Peru",
        "total",
        "--dob",
        "1990-01-01",
    ]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("invalid sex"));
}

#[test]
fn cli_prints_rank() {
    let (_rt, server) = serve(
        "/1.0/wp-rank/1990-05-17/female/United%20Kingdom/today",
        ResponseTemplate::new(200).set_body_json(json!({"rank": 42})),
    );
    let mut cmd = Command::cargo_bin("popio").unwrap();
    cmd.args([
        "--base-url",
        &format!("{}/1.0", server.uri()),
        "rank",
        "--dob",
        "1990-05-17",
        "--sex",
        "female",
        "--country",
        "United Kingdom",
        "today",
    ]);
    cmd.assert().success().stdout("42\n");
}

#[test]
fn cli_exits_with_service_detail() {
    let (_rt, server) = serve(
        "/1.0/population/Atlantis/today-and-tomorrow",
        ResponseTemplate::new(400)
            .set_body_json(json!({"detail": "Atlantis is an invalid value for the parameter \"country\""})),
    );
    let mut cmd = Command::cargo_bin("popio").unwrap();
    cmd.args([
        "--base-url",
        &format!("{}/1.0", server.uri()),
        "population",
        "--country",
        "Atlantis",
        "today",
    ]);
    cmd.assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr("Atlantis is an invalid value for the parameter \"country\"\n");
}

#[test]
fn cli_exits_with_url_on_malformed_body() {
    let (_rt, server) = serve(
        "/1.0/countries",
        ResponseTemplate::new(200).set_body_string("not json at all"),
    );
    let base = format!("{}/1.0", server.uri());
    let mut cmd = Command::cargo_bin("popio").unwrap();
    cmd.args(["--base-url", &base, "countries"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains(format!("{base}/countries")))
        .stderr(predicate::str::contains("not json at all"));
}
