use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tracegrid_testing::TestWorld;

#[test]
fn test_columns_lists_every_name() {
    let world = TestWorld::new();
    let mut cmd = cargo_bin_cmd!("tracegrid");
    world.configure_command(&mut cmd).arg("columns");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("name"))
        .stdout(predicate::str::contains("feedback"))
        .stdout(predicate::str::contains("enrichment:<kind>"));
}

#[test]
fn test_columns_json() {
    let world = TestWorld::new();
    let result = world.run(&["columns", "--format", "json"]).unwrap();
    assert!(result.success());

    let json = result.json().unwrap();
    let entries = json.as_array().unwrap();
    assert_eq!(entries.len(), 13);
    assert!(entries.iter().all(|entry| entry["description"].is_string()));
}
