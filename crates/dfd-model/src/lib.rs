//! DFD Model
//!
//! Symbol sources for DFD behavior analysis.
//!
//! # Overview
//!
//! - **LabelTypeCatalog**: label types and their values, with stable ids
//! - **DataFlowGraph**: nodes, ports and labeled edges; derives the
//!   [`AvailableInputs`] of an output port
//! - **LabelRenames / InputRename**: rename descriptors, detected by diffing
//!   catalog snapshots or edge label edits
//!
//! # Example
//!
//! ```rust
//! use dfd_model::{DataFlowGraph, PortKind};
//!
//! let mut graph = DataFlowGraph::new();
//! let source = graph.add_node("source");
//! let sink = graph.add_node("sink");
//! let out = graph.add_port(source, PortKind::Output).unwrap();
//! let input = graph.add_port(sink, PortKind::Input).unwrap();
//! let sink_out = graph.add_port(sink, PortKind::Output).unwrap();
//! graph.connect(out, input, Some("personal")).unwrap();
//!
//! assert!(graph.available_inputs(sink_out).unwrap().contains("personal"));
//! ```

#![warn(missing_docs)]

pub mod catalog;
pub mod graph;
pub mod ident;
pub mod rename;

// Re-exports
pub use catalog::{CatalogError, LabelType, LabelTypeCatalog, LabelTypeId, LabelValue, LabelValueId};
pub use graph::{AvailableInputs, DataFlowGraph, Edge, EdgeId, GraphError, NodeId, PortId, PortKind};
pub use ident::{is_ident_char, is_identifier};
pub use rename::{InputRename, LabelRenames, LabelTypeRename, LabelValueRename};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for model operations
    pub use crate::{
        AvailableInputs, DataFlowGraph, InputRename, LabelRenames, LabelType, LabelTypeCatalog, LabelValue,
        PortId, PortKind,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
