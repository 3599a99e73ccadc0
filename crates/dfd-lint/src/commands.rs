//! Linter commands
//!
//! Each command works on an in-memory [`Project`]; reading files and printing
//! results is left to the binary.

use crate::config::LintConfig;
use crate::project::Project;
use crate::report::PortReport;
use dfd_behavior::{BehaviorRefactorer, BehaviorUpdate, BehaviorValidator};
use dfd_model::{AvailableInputs, InputRename, LabelRenames, LabelTypeCatalog};

/// Result of `check`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOutcome {
    /// One report per port, in project order
    pub reports: Vec<PortReport>,
}

impl CheckOutcome {
    /// Total number of diagnostics
    #[must_use]
    pub fn diagnostic_count(&self) -> usize {
        self.reports.iter().map(|r| r.diagnostics.len()).sum()
    }

    /// Reports that contain at least one diagnostic
    pub fn failing(&self) -> impl Iterator<Item = &PortReport> + '_ {
        self.reports.iter().filter(|r| !r.diagnostics.is_empty())
    }

    /// Whether the run should fail under `config`
    #[must_use]
    pub fn fails(&self, config: &LintConfig) -> bool {
        config.fail_on_diagnostics && self.diagnostic_count() > 0
    }
}

/// Result of a rename command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameOutcome {
    /// Rewritten project
    pub project: Project,
    /// Names of the ports whose behavior changed
    pub changed: Vec<String>,
}

/// Validate every port of a project
#[must_use]
pub fn check(project: &Project, config: &LintConfig) -> CheckOutcome {
    let validator = BehaviorValidator::with_config(config.validator.clone());
    let catalog = (!project.catalog.is_empty()).then_some(&project.catalog);
    let reports: Vec<PortReport> = project
        .ports
        .iter()
        .map(|port| PortReport {
            port: port.name.clone(),
            diagnostics: validator.validate_with(&port.behavior, &port.inputs, catalog),
        })
        .collect();
    let outcome = CheckOutcome { reports };
    tracing::info!(
        "Checked {} ports, {} diagnostics",
        project.ports.len(),
        outcome.diagnostic_count()
    );
    outcome
}

/// Rename an input everywhere it is available
///
/// Only ports that list `from` among their inputs are affected: the input
/// entry itself is renamed and the behavior text rewritten.
#[must_use]
pub fn rename_input(project: &Project, from: &str, to: &str) -> RenameOutcome {
    let mut project = project.clone();
    let Some(rename) = InputRename::detect(Some(from), Some(to)) else {
        return RenameOutcome {
            project,
            changed: Vec::new(),
        };
    };

    let fed: Vec<usize> = project
        .ports
        .iter()
        .enumerate()
        .filter(|(_, port)| port.inputs.contains(&rename.old_name))
        .map(|(i, _)| i)
        .collect();
    let updates = BehaviorRefactorer::new().input_rename_updates(
        fed.iter().map(|&i| (i, project.ports[i].behavior.as_str())),
        &rename,
    );

    for i in fed {
        let inputs = &mut project.ports[i].inputs;
        *inputs = inputs
            .entries()
            .iter()
            .map(|entry| match entry {
                Some(name) if name.trim() == rename.old_name => Some(rename.new_name.clone()),
                other => other.clone(),
            })
            .collect::<AvailableInputs>();
    }
    let changed = apply(&mut project, updates);
    tracing::info!(
        "Renamed input {} -> {} in {} ports",
        rename.old_name,
        rename.new_name,
        changed.len()
    );
    RenameOutcome { project, changed }
}

/// Rewrite behavior after the catalog changed from `previous` to the
/// project's catalog
#[must_use]
pub fn rename_labels(project: &Project, previous: &LabelTypeCatalog) -> RenameOutcome {
    let mut project = project.clone();
    let renames = LabelRenames::diff(previous, &project.catalog);
    if renames.is_empty() {
        tracing::info!("No label renames between catalogs");
        return RenameOutcome {
            project,
            changed: Vec::new(),
        };
    }

    let ports: Vec<(usize, &str)> = project
        .ports
        .iter()
        .enumerate()
        .map(|(i, port)| (i, port.behavior.as_str()))
        .collect();
    let updates = BehaviorRefactorer::new().label_rename_updates(ports, &renames);
    let changed = apply(&mut project, updates);
    tracing::info!(
        "Applied {} type and {} value renames to {} ports",
        renames.types.len(),
        renames.values.len(),
        changed.len()
    );
    RenameOutcome { project, changed }
}

fn apply(project: &mut Project, updates: Vec<BehaviorUpdate<usize>>) -> Vec<String> {
    updates
        .into_iter()
        .map(|update| {
            let port = &mut project.ports[update.port];
            port.behavior = update.behavior;
            port.name.clone()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::PortSpec;
    use dfd_behavior::DiagnosticKind;
    use dfd_model::{LabelType, LabelValue};

    fn catalog(type_name: &str, high: &str) -> LabelTypeCatalog {
        LabelTypeCatalog::from_types(vec![LabelType::with_id("t1", type_name)
            .value(LabelValue::with_id("lo", "Low"))
            .value(LabelValue::with_id("hi", high))])
        .unwrap()
    }

    fn project() -> Project {
        Project {
            catalog: catalog("Sensitivity", "High"),
            ports: vec![
                PortSpec::new(
                    "process.out",
                    AvailableInputs::new(vec![Some("personal".into()), None]),
                    "forward personal\nset Sensitivity.High = personal.Sensitivity.High",
                ),
                PortSpec::new(
                    "store.out",
                    AvailableInputs::from_names(["history"]),
                    "forward personal",
                ),
            ],
        }
    }

    #[test]
    fn check_reports_per_port() {
        let outcome = check(&project(), &LintConfig::default());
        assert_eq!(outcome.reports.len(), 2);
        assert!(outcome.reports[0].diagnostics.is_empty());
        assert_eq!(outcome.diagnostic_count(), 1);
        let failing: Vec<&str> = outcome.failing().map(|r| r.port.as_str()).collect();
        assert_eq!(failing, vec!["store.out"]);
        assert!(matches!(
            outcome.reports[1].diagnostics[0].kind,
            DiagnosticKind::UnknownInput { .. }
        ));
        assert!(outcome.fails(&LintConfig::default()));
        assert!(!outcome.fails(&LintConfig::default().with_fail_on_diagnostics(false)));
    }

    #[test]
    fn rename_input_only_touches_fed_ports() {
        let outcome = rename_input(&project(), "personal", "contact");
        assert_eq!(outcome.changed, vec!["process.out".to_string()]);
        let ports = &outcome.project.ports;
        assert_eq!(
            ports[0].behavior,
            "forward contact\nset Sensitivity.High = contact.Sensitivity.High"
        );
        assert_eq!(ports[0].inputs.entries(), &[Some("contact".to_string()), None]);
        assert_eq!(ports[1].behavior, "forward personal");
    }

    #[test]
    fn rename_input_to_same_name_is_noop() {
        let outcome = rename_input(&project(), "personal", "personal");
        assert!(outcome.changed.is_empty());
        assert_eq!(outcome.project, project());
    }

    #[test]
    fn rename_labels_from_previous_catalog() {
        let mut current = project();
        current.catalog = catalog("Secrecy", "Top");
        let outcome = rename_labels(&current, &catalog("Sensitivity", "High"));
        assert_eq!(outcome.changed, vec!["process.out".to_string()]);
        assert_eq!(
            outcome.project.ports[0].behavior,
            "forward personal\nset Secrecy.Top = personal.Secrecy.Top"
        );
    }

    #[test]
    fn unchanged_catalog_renames_nothing() {
        let current = project();
        let outcome = rename_labels(&current, &current.catalog);
        assert!(outcome.changed.is_empty());
        assert_eq!(outcome.project, current);
    }
}
