use std::path::Path;
use tagfinder::decompose;
use tagfinder_test_support::{check_scenario, load_scenarios};

#[test]
fn scenario_table() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("scenarios.toml");
    let file = load_scenarios(&path);
    assert!(!file.scenarios.is_empty(), "no scenarios in {path:?}");

    let failures: Vec<String> = file
        .scenarios
        .iter()
        .filter_map(|scenario| check_scenario(scenario, &decompose(&scenario.input)).err())
        .collect();
    assert!(
        failures.is_empty(),
        "{} scenario(s) failed:\n{}",
        failures.len(),
        failures.join("\n\n")
    );
}
