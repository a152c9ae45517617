use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tagfinder::{Decomposition, TagDescriptor};

pub use tagfinder::snapshot::escape_text;

pub const SCENARIOS_FORMAT_V1: &str = "tagfinder-scenarios-v1";

pub fn diff_lines(expected: &[String], actual: &[String]) -> String {
    let max = expected.len().max(actual.len());
    let mut out = String::new();
    use std::fmt::Write;
    let mut mismatch = None;
    let missing = "<missing>";
    for i in 0..max {
        let left = expected.get(i).map(String::as_str).unwrap_or(missing);
        let right = actual.get(i).map(String::as_str).unwrap_or(missing);
        if left != right {
            mismatch = Some(i);
            break;
        }
    }
    if let Some(i) = mismatch {
        let start = i.saturating_sub(2);
        let end = (i + 3).min(max);
        let _ = writeln!(
            &mut out,
            "first mismatch at line {} (showing {}..={}):",
            i + 1,
            start + 1,
            end
        );
        for line_idx in start..end {
            let left = expected
                .get(line_idx)
                .map(String::as_str)
                .unwrap_or(missing);
            let right = actual.get(line_idx).map(String::as_str).unwrap_or(missing);
            let marker = if line_idx == i { ">" } else { " " };
            let _ = writeln!(&mut out, "{marker} {:>4}  expected: {left}", line_idx + 1);
            let _ = writeln!(&mut out, "{marker} {:>4}    actual: {right}", line_idx + 1);
        }
    }
    let _ = writeln!(
        &mut out,
        "expected {} lines, actual {} lines",
        expected.len(),
        actual.len()
    );
    out
}

/// Table of decomposition scenarios, stored as TOML.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct ScenarioFile {
    pub format: String,
    #[serde(rename = "scenario")]
    pub scenarios: Vec<Scenario>,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct Scenario {
    pub name: String,
    pub input: String,
    #[serde(default)]
    pub contents: Option<Vec<String>>,
    #[serde(default)]
    pub tags: Vec<ExpectedTag>,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct ExpectedTag {
    pub tag: String,
    pub index: usize,
    #[serde(default, rename = "void")]
    pub void_element: bool,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    #[serde(default)]
    pub classes: Vec<String>,
}

impl ExpectedTag {
    pub fn matches(&self, actual: &TagDescriptor) -> bool {
        self.tag == actual.tag
            && self.index == actual.index
            && self.void_element == actual.void_element
            && self.attributes == actual.attributes
            && self.classes == actual.classes
    }
}

pub fn load_scenarios(path: &Path) -> ScenarioFile {
    let content = fs::read_to_string(path)
        .unwrap_or_else(|err| panic!("failed to read scenarios {path:?}: {err}"));
    let file: ScenarioFile = toml::from_str(&content)
        .unwrap_or_else(|err| panic!("failed to parse scenarios {path:?}: {err}"));
    assert_eq!(
        file.format, SCENARIOS_FORMAT_V1,
        "unsupported scenario format in {path:?}"
    );
    let mut names: Vec<&str> = file.scenarios.iter().map(|s| s.name.as_str()).collect();
    names.sort_unstable();
    if let Some(pair) = names.windows(2).find(|pair| pair[0] == pair[1]) {
        panic!("duplicate scenario '{}' in {path:?}", pair[0]);
    }
    file
}

/// Checks `actual` against a scenario, returning a readable report on mismatch.
pub fn check_scenario(scenario: &Scenario, actual: &Decomposition) -> Result<(), String> {
    if let Some(contents) = &scenario.contents
        && contents != &actual.contents
    {
        let expected: Vec<String> = contents.iter().map(|c| escape_text(c)).collect();
        let got: Vec<String> = actual.contents.iter().map(|c| escape_text(c)).collect();
        return Err(format!(
            "contents mismatch in scenario '{}'\n{}",
            scenario.name,
            diff_lines(&expected, &got)
        ));
    }
    if scenario.tags.len() != actual.tags.len() {
        return Err(format!(
            "scenario '{}' expected {} tags, got {}: {:?}",
            scenario.name,
            scenario.tags.len(),
            actual.tags.len(),
            actual.tags
        ));
    }
    for (k, (expected, got)) in scenario.tags.iter().zip(&actual.tags).enumerate() {
        if !expected.matches(got) {
            return Err(format!(
                "tag #{k} mismatch in scenario '{}'\nexpected: {expected:?}\n  actual: {got:?}",
                scenario.name
            ));
        }
    }
    Ok(())
}

/// Serializes a decomposition with the crate's `serde` field names.
pub fn to_json_value(decomposition: &Decomposition) -> serde_json::Value {
    let tags: Vec<serde_json::Value> = decomposition
        .tags
        .iter()
        .map(|tag| {
            let mut object = serde_json::Map::new();
            object.insert("tag".into(), tag.tag.clone().into());
            object.insert("index".into(), tag.index.into());
            if tag.void_element {
                object.insert("voidElement".into(), true.into());
            }
            object.insert(
                "attributes".into(),
                serde_json::Value::Object(
                    tag.attributes
                        .iter()
                        .map(|(k, v)| (k.clone(), v.clone().into()))
                        .collect(),
                ),
            );
            object.insert("classes".into(), tag.classes.clone().into());
            serde_json::Value::Object(object)
        })
        .collect();
    serde_json::json!({
        "contents": decomposition.contents,
        "tags": tags,
    })
}
