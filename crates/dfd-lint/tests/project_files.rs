use dfd_lint::project::load_catalog;
use dfd_lint::{check, rename_input, rename_labels, render_text, LintConfig, Project};
use dfd_test_utils::sensitivity_catalog;
use pretty_assertions::assert_eq;
use std::io::Write;
use tempfile::NamedTempFile;

const PROJECT: &str = r#"{
  "catalog": [
    { "id": "sensitivity", "name": "Sensitivity", "values": [
      { "id": "sensitivity-low", "text": "Low" },
      { "id": "sensitivity-high", "text": "High" }
    ] },
    { "id": "location", "name": "Location", "values": [
      { "id": "location-eu", "text": "EU" },
      { "id": "location-us", "text": "US" }
    ] }
  ],
  "ports": [
    {
      "name": "process.out",
      "inputs": ["personal", "history", null],
      "behavior": "forward personal, history\nset Sensitivity.High = personal.Sensitivity.High && !history.Location.US"
    },
    {
      "name": "report.out",
      "inputs": ["summary"],
      "behavior": "forward summary, summary\nset Location.Mars = summary.Location.EU"
    }
  ]
}"#;

fn write(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn check_project_file() {
    let file = write(PROJECT);
    let project = Project::load(file.path()).unwrap();
    let outcome = check(&project, &LintConfig::default());

    assert_eq!(outcome.reports[0].diagnostics.len(), 0);
    let messages: Vec<&str> = outcome.reports[1].diagnostics.iter().map(|d| d.message.as_str()).collect();
    assert_eq!(
        messages,
        vec![
            "duplicate input: summary",
            "duplicate input: summary",
            "unknown label value of label type Location: Mars",
        ]
    );

    let behaviors: Vec<&str> = project.ports.iter().map(|p| p.behavior.as_str()).collect();
    let text = render_text(&outcome.reports, &behaviors);
    assert!(text.starts_with("report.out:1:9: duplicate input: summary\n  forward summary, summary\n          ^^^^^^^\n"));
}

#[test]
fn config_file_controls_failure() {
    let project = Project::from_json(PROJECT).unwrap();
    let config_file = write("fail_on_diagnostics = false\n");
    let config = LintConfig::load(config_file.path()).unwrap();
    let outcome = check(&project, &config);
    assert_eq!(outcome.diagnostic_count(), 3);
    assert!(!outcome.fails(&config));
}

#[test]
fn rename_input_writes_valid_project() {
    let project = Project::from_json(PROJECT).unwrap();
    let outcome = rename_input(&project, "history", "archive");
    assert_eq!(outcome.changed, vec!["process.out".to_string()]);

    let reloaded = Project::from_json(&outcome.project.to_json().unwrap()).unwrap();
    assert_eq!(
        reloaded.ports[0].behavior,
        "forward personal, archive\nset Sensitivity.High = personal.Sensitivity.High && !archive.Location.US"
    );
    assert!(check(&reloaded, &LintConfig::default()).reports[0].diagnostics.is_empty());
}

#[test]
fn rename_labels_against_snapshot_file() {
    let previous = write(&serde_json::to_string(&sensitivity_catalog()).unwrap());
    let previous = load_catalog(previous.path()).unwrap();

    let mut project = Project::from_json(PROJECT).unwrap();
    let location = "location".into();
    project.catalog.rename_type(&location, "Region").unwrap();
    project.catalog.rename_value(&location, &"location-eu".into(), "Europe").unwrap();

    let outcome = rename_labels(&project, &previous);
    assert_eq!(outcome.changed, vec!["process.out".to_string(), "report.out".to_string()]);
    assert_eq!(
        outcome.project.ports[1].behavior,
        "forward summary, summary\nset Region.Mars = summary.Region.Europe"
    );
}

#[test]
fn missing_file_has_context() {
    let err = Project::load(std::path::Path::new("/nonexistent/project.json")).unwrap_err();
    assert!(format!("{err:#}").contains("reading /nonexistent/project.json"));
}
