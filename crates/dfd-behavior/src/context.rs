//! Symbol tables for validation
//!
//! A [`PortContext`] supplies what one output port may reference: the
//! available inputs of its node and the label-type catalog.

use crate::error::BehaviorError;
use dfd_model::{AvailableInputs, DataFlowGraph, LabelTypeCatalog, PortId};

/// Symbol table of one output port
pub trait PortContext {
    /// Inputs the port may reference
    ///
    /// # Errors
    /// When the port cannot be resolved to a node. This is a bug in the
    /// caller, not a problem with the behavior text.
    fn available_inputs(&self) -> Result<AvailableInputs, BehaviorError>;

    /// Label-type catalog, if one is configured
    fn label_types(&self) -> Option<&LabelTypeCatalog>;
}

/// Context built from an explicit symbol table
#[derive(Debug, Clone, Default)]
pub struct StaticContext<'a> {
    inputs: AvailableInputs,
    catalog: Option<&'a LabelTypeCatalog>,
}

impl<'a> StaticContext<'a> {
    /// Create context
    #[inline]
    #[must_use]
    pub fn new(inputs: AvailableInputs, catalog: Option<&'a LabelTypeCatalog>) -> Self {
        Self { inputs, catalog }
    }
}

impl PortContext for StaticContext<'_> {
    fn available_inputs(&self) -> Result<AvailableInputs, BehaviorError> {
        Ok(self.inputs.clone())
    }

    fn label_types(&self) -> Option<&LabelTypeCatalog> {
        self.catalog
    }
}

/// Context of a port inside a [`DataFlowGraph`]
#[derive(Debug, Clone, Copy)]
pub struct GraphContext<'a> {
    graph: &'a DataFlowGraph,
    catalog: Option<&'a LabelTypeCatalog>,
    port: PortId,
}

impl<'a> GraphContext<'a> {
    /// Create context for `port`
    #[inline]
    #[must_use]
    pub fn new(graph: &'a DataFlowGraph, catalog: Option<&'a LabelTypeCatalog>, port: PortId) -> Self {
        Self { graph, catalog, port }
    }
}

impl PortContext for GraphContext<'_> {
    fn available_inputs(&self) -> Result<AvailableInputs, BehaviorError> {
        Ok(self.graph.available_inputs(self.port)?)
    }

    fn label_types(&self) -> Option<&LabelTypeCatalog> {
        self.catalog
    }
}
