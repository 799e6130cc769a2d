use assert_fs::prelude::*;
use predicates::prelude::*;

#[test]
fn validate_accepts_well_formed_payload() {
    let yaml = r#"
deals:
  - name: Expansion - Northern Corp
    amount: 120000
    winProbability: 0.6
    expectedCloseDate: 2025-11-15
  - name: Net-new - Horizon Labs
    amount: 80000
    winProbability: 0.35
    expectedCloseDate: 2025-12-01T10:00:00Z
"#;
    let input_file = assert_fs::NamedTempFile::new("pipeline.yaml").unwrap();
    input_file.write_str(yaml).unwrap();

    let mut cmd = assert_cmd::cargo_bin_cmd!("pipeline-forecast");
    cmd.args(["validate", "-i", input_file.path().to_str().unwrap()]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Payload is valid: 2 deals"));
}

#[test]
fn validate_lists_every_issue() {
    let json = r#"{
        "deals": [
            {"name": "", "amount": -1, "winProbability": 0.5, "expectedCloseDate": "2025-02-30"}
        ],
        "config": {"histogramBinCount": 2, "colour": "blue"}
    }"#;
    let input_file = assert_fs::NamedTempFile::new("pipeline.json").unwrap();
    input_file.write_str(json).unwrap();

    let mut cmd = assert_cmd::cargo_bin_cmd!("pipeline-forecast");
    cmd.args(["validate", "-i", input_file.path().to_str().unwrap()]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("deals.0.name [too_small]"))
        .stderr(predicate::str::contains("deals.0.amount [too_small]"))
        .stderr(predicate::str::contains("deals.0.expectedCloseDate [invalid_date]"))
        .stderr(predicate::str::contains("config [unrecognized_keys]: unrecognized keys: colour"))
        .stderr(predicate::str::contains(
            "config.histogramBinCount [too_small]: histogramBinCount must be at least 5",
        ));
}

#[test]
fn validate_reports_unparseable_file() {
    let input_file = assert_fs::NamedTempFile::new("pipeline.json").unwrap();
    input_file.write_str("{ deals: ").unwrap();

    let mut cmd = assert_cmd::cargo_bin_cmd!("pipeline-forecast");
    cmd.args(["validate", "-i", input_file.path().to_str().unwrap()]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse request json"));
}
