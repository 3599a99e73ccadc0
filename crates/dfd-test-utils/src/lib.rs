//! Testing utilities for the DFD behavior workspace
//!
//! Shared catalogs, symbol tables and graphs.

#![allow(missing_docs)]

use dfd_model::{AvailableInputs, DataFlowGraph, EdgeId, LabelType, LabelTypeCatalog, LabelValue, PortId, PortKind};

/// `Sensitivity { Low, High }` and `Location { EU, US }` with fixed ids
pub fn sensitivity_catalog() -> LabelTypeCatalog {
    LabelTypeCatalog::from_types(vec![
        LabelType::with_id("sensitivity", "Sensitivity")
            .value(LabelValue::with_id("sensitivity-low", "Low"))
            .value(LabelValue::with_id("sensitivity-high", "High")),
        LabelType::with_id("location", "Location")
            .value(LabelValue::with_id("location-eu", "EU"))
            .value(LabelValue::with_id("location-us", "US")),
    ])
    .unwrap()
}

pub fn inputs(names: &[&str]) -> AvailableInputs {
    AvailableInputs::from_names(names.iter().copied())
}

/// `customer --personal--> process`, `database --history--> process`,
/// plus an unlabeled edge `database --> process`
#[derive(Debug, Clone)]
pub struct ProcessGraph {
    pub graph: DataFlowGraph,
    pub personal: EdgeId,
    pub history: EdgeId,
    pub process_out: PortId,
    pub customer_out: PortId,
}

pub fn process_graph() -> ProcessGraph {
    let mut graph = DataFlowGraph::new();
    let customer = graph.add_node("customer");
    let database = graph.add_node("database");
    let process = graph.add_node("process");

    let customer_out = graph.add_port(customer, PortKind::Output).unwrap();
    let database_out = graph.add_port(database, PortKind::Output).unwrap();
    let process_in = graph.add_port(process, PortKind::Input).unwrap();
    let process_in2 = graph.add_port(process, PortKind::Input).unwrap();
    let process_out = graph.add_port(process, PortKind::Output).unwrap();

    let personal = graph.connect(customer_out, process_in, Some("personal")).unwrap();
    let history = graph.connect(database_out, process_in2, Some("history")).unwrap();
    graph.connect(database_out, process_in2, None).unwrap();

    ProcessGraph {
        graph,
        personal,
        history,
        process_out,
        customer_out,
    }
}
