//! Rename propagation over a [`DataFlowGraph`]
//!
//! Glue between rename detection in the model and the text rewrite in
//! [`BehaviorRefactorer`]: apply the edit, find the affected output ports,
//! store their rewritten behavior.

use crate::error::BehaviorError;
use crate::refactor::{BehaviorRefactorer, BehaviorUpdate};
use dfd_model::{DataFlowGraph, EdgeId, LabelRenames, LabelTypeCatalog, PortId};

/// Relabel an edge and rewrite the behavior of every port fed by it
///
/// Returns the ports whose behavior changed. Setting a label on a previously
/// unlabeled edge (or clearing one) is not a rename and changes no behavior.
///
/// # Errors
/// Unknown edge, or an edge entering a port that is not attached to a node
pub fn propagate_input_rename(
    graph: &mut DataFlowGraph,
    edge: EdgeId,
    label: Option<&str>,
) -> Result<Vec<PortId>, BehaviorError> {
    let Some(rename) = graph.set_edge_label(edge, label)? else {
        return Ok(Vec::new());
    };
    let ports = graph.ports_fed_by(edge)?;
    let behaviors = snapshot(graph, &ports)?;
    let updates = BehaviorRefactorer::new().input_rename_updates(behaviors, &rename);
    tracing::debug!(
        "Input rename {} -> {} updated {} ports",
        rename.old_name,
        rename.new_name,
        updates.len()
    );
    store(graph, updates)
}

/// Rewrite every output port after the catalog changed from `previous` to
/// `current`
///
/// # Errors
/// When a listed output port cannot be read back from the graph
pub fn propagate_label_renames(
    graph: &mut DataFlowGraph,
    previous: &LabelTypeCatalog,
    current: &LabelTypeCatalog,
) -> Result<Vec<PortId>, BehaviorError> {
    let renames = LabelRenames::diff(previous, current);
    if renames.is_empty() {
        return Ok(Vec::new());
    }
    let ports: Vec<PortId> = graph.output_ports().collect();
    let behaviors = snapshot(graph, &ports)?;
    let updates = BehaviorRefactorer::new().label_rename_updates(behaviors, &renames);
    tracing::debug!(
        "{} type and {} value renames updated {} ports",
        renames.types.len(),
        renames.values.len(),
        updates.len()
    );
    store(graph, updates)
}

fn snapshot(graph: &DataFlowGraph, ports: &[PortId]) -> Result<Vec<(PortId, String)>, BehaviorError> {
    ports
        .iter()
        .map(|&port| Ok((port, graph.behavior(port)?.to_string())))
        .collect()
}

fn store(graph: &mut DataFlowGraph, updates: Vec<BehaviorUpdate<PortId>>) -> Result<Vec<PortId>, BehaviorError> {
    let mut changed = Vec::with_capacity(updates.len());
    for update in updates {
        graph.set_behavior(update.port, update.behavior)?;
        changed.push(update.port);
    }
    Ok(changed)
}
