//! In-memory data-flow graph
//!
//! Just enough of a DFD to derive the symbol table of an output port: nodes
//! own ports, edges run from an output port to an input port and carry an
//! optional label naming the data that flows along them. The labels of the
//! edges entering a node are the inputs its output ports may reference.

use crate::rename::InputRename;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use uuid::Uuid;

/// Node identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(pub Uuid);

/// Port identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PortId(pub Uuid);

/// Edge identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EdgeId(pub Uuid);

impl NodeId {
    /// Generate new node ID
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl PortId {
    /// Generate new port ID
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl EdgeId {
    /// Generate new edge ID
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for PortId {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for EdgeId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for NodeId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "node:{}", self.0)
    }
}

impl Display for PortId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "port:{}", self.0)
    }
}

impl Display for EdgeId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "edge:{}", self.0)
    }
}

/// Direction of a port
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortKind {
    /// Receives data from an edge
    Input,
    /// Emits data; owns behavior text
    Output,
}

/// Inputs an output port may reference
///
/// Entries are in edge order. `None` stands for an unlabeled edge: it never
/// matches a name but still counts as a connection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AvailableInputs {
    inputs: Vec<Option<String>>,
}

impl AvailableInputs {
    /// Wrap raw entries
    #[inline]
    #[must_use]
    pub fn new(inputs: Vec<Option<String>>) -> Self {
        Self { inputs }
    }

    /// Build from names only (no unlabeled edges)
    #[must_use]
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        names.into_iter().map(|n| Some(n.into())).collect()
    }

    /// All entries, including unlabeled ones
    #[inline]
    #[must_use]
    pub fn entries(&self) -> &[Option<String>] {
        &self.inputs
    }

    /// Named entries only
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.inputs.iter().filter_map(|i| i.as_deref())
    }

    /// Whether `name` is one of the named entries (exact, case-sensitive)
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names().any(|n| n == name)
    }

    /// Number of unlabeled edges
    #[must_use]
    pub fn unnamed_count(&self) -> usize {
        self.inputs.iter().filter(|i| i.is_none()).count()
    }

    /// Number of entries
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    /// Whether there are no entries
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }
}

impl FromIterator<Option<String>> for AvailableInputs {
    fn from_iter<T: IntoIterator<Item = Option<String>>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[derive(Debug, Clone)]
struct NodeEntry {
    name: String,
    ports: Vec<PortId>,
}

#[derive(Debug, Clone)]
struct PortEntry {
    node: Option<NodeId>,
    kind: PortKind,
    behavior: String,
}

/// Connection from an output port to an input port
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    /// Output port the data leaves
    pub source: PortId,
    /// Input port the data enters
    pub target: PortId,
    /// Name of the data; `None` when unlabeled
    pub label: Option<String>,
}

/// Data-flow graph
#[derive(Debug, Clone, Default)]
pub struct DataFlowGraph {
    nodes: IndexMap<NodeId, NodeEntry>,
    ports: IndexMap<PortId, PortEntry>,
    edges: IndexMap<EdgeId, Edge>,
}

impl DataFlowGraph {
    /// Create empty graph
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node
    pub fn add_node(&mut self, name: impl Into<String>) -> NodeId {
        let id = NodeId::new();
        self.nodes.insert(
            id,
            NodeEntry {
                name: name.into(),
                ports: Vec::new(),
            },
        );
        id
    }

    /// Node display name
    #[must_use]
    pub fn node_name(&self, node: NodeId) -> Option<&str> {
        self.nodes.get(&node).map(|n| n.name.as_str())
    }

    /// Add a port to a node
    ///
    /// # Errors
    /// `UnknownNode`
    pub fn add_port(&mut self, node: NodeId, kind: PortKind) -> Result<PortId, GraphError> {
        let entry = self.nodes.get_mut(&node).ok_or(GraphError::UnknownNode(node))?;
        let id = PortId::new();
        entry.ports.push(id);
        self.ports.insert(
            id,
            PortEntry {
                node: Some(node),
                kind,
                behavior: String::new(),
            },
        );
        Ok(id)
    }

    /// Add a port that belongs to no node
    ///
    /// Such a port exists transiently while an editor moves it between nodes;
    /// asking for its available inputs is an error.
    pub fn add_detached_port(&mut self, kind: PortKind) -> PortId {
        let id = PortId::new();
        self.ports.insert(
            id,
            PortEntry {
                node: None,
                kind,
                behavior: String::new(),
            },
        );
        id
    }

    /// Connect an output port to an input port
    ///
    /// # Errors
    /// `UnknownPort` or `PortKindMismatch`
    pub fn connect(&mut self, source: PortId, target: PortId, label: Option<&str>) -> Result<EdgeId, GraphError> {
        self.expect_kind(source, PortKind::Output)?;
        self.expect_kind(target, PortKind::Input)?;
        let id = EdgeId::new();
        self.edges.insert(
            id,
            Edge {
                source,
                target,
                label: label.map(str::to_string),
            },
        );
        Ok(id)
    }

    /// Remove a node with its ports and every edge touching them
    ///
    /// # Errors
    /// `UnknownNode`
    pub fn remove_node(&mut self, node: NodeId) -> Result<(), GraphError> {
        let entry = self.nodes.shift_remove(&node).ok_or(GraphError::UnknownNode(node))?;
        for port in &entry.ports {
            self.ports.shift_remove(port);
        }
        self.edges
            .retain(|_, e| !entry.ports.contains(&e.source) && !entry.ports.contains(&e.target));
        Ok(())
    }

    /// Edge by id
    #[must_use]
    pub fn edge(&self, edge: EdgeId) -> Option<&Edge> {
        self.edges.get(&edge)
    }

    /// Node owning a port
    ///
    /// # Errors
    /// `UnknownPort` or `DetachedPort`
    pub fn node_of(&self, port: PortId) -> Result<NodeId, GraphError> {
        self.port(port)?.node.ok_or(GraphError::DetachedPort(port))
    }

    /// Inputs the given port may reference
    ///
    /// Labels of all edges entering input ports of the port's node, in edge
    /// insertion order. Blank labels count as unlabeled.
    ///
    /// # Errors
    /// `UnknownPort` or `DetachedPort`
    pub fn available_inputs(&self, port: PortId) -> Result<AvailableInputs, GraphError> {
        let node = self.node_of(port)?;
        Ok(self
            .edges
            .values()
            .filter(|e| {
                self.ports
                    .get(&e.target)
                    .is_some_and(|p| p.node == Some(node) && p.kind == PortKind::Input)
            })
            .map(|e| e.label.as_deref().map(str::trim).filter(|l| !l.is_empty()).map(str::to_string))
            .collect())
    }

    /// Behavior text of an output port
    ///
    /// # Errors
    /// `UnknownPort` or `NotAnOutputPort`
    pub fn behavior(&self, port: PortId) -> Result<&str, GraphError> {
        self.expect_kind(port, PortKind::Output)?;
        Ok(&self.port(port)?.behavior)
    }

    /// Replace the behavior text of an output port
    ///
    /// # Errors
    /// `UnknownPort` or `NotAnOutputPort`
    pub fn set_behavior(&mut self, port: PortId, behavior: impl Into<String>) -> Result<(), GraphError> {
        self.expect_kind(port, PortKind::Output)?;
        let entry = self.ports.get_mut(&port).ok_or(GraphError::UnknownPort(port))?;
        entry.behavior = behavior.into();
        Ok(())
    }

    /// All output ports, attached or not, in creation order
    pub fn output_ports(&self) -> impl Iterator<Item = PortId> + '_ {
        self.ports
            .iter()
            .filter(|(_, p)| p.kind == PortKind::Output)
            .map(|(id, _)| *id)
    }

    /// Change an edge label
    ///
    /// Returns the input rename the edit amounts to, if any.
    ///
    /// # Errors
    /// `UnknownEdge`
    pub fn set_edge_label(&mut self, edge: EdgeId, label: Option<&str>) -> Result<Option<InputRename>, GraphError> {
        let entry = self.edges.get_mut(&edge).ok_or(GraphError::UnknownEdge(edge))?;
        let rename = InputRename::detect(entry.label.as_deref(), label);
        entry.label = label.map(str::to_string);
        Ok(rename)
    }

    /// Output ports whose available inputs include the edge's label
    ///
    /// # Errors
    /// `UnknownEdge`, or `DetachedPort` when the edge enters a detached port
    pub fn ports_fed_by(&self, edge: EdgeId) -> Result<Vec<PortId>, GraphError> {
        let target = self.edges.get(&edge).ok_or(GraphError::UnknownEdge(edge))?.target;
        let node = self.node_of(target)?;
        Ok(self
            .nodes
            .get(&node)
            .map(|n| {
                n.ports
                    .iter()
                    .copied()
                    .filter(|p| self.ports.get(p).is_some_and(|e| e.kind == PortKind::Output))
                    .collect()
            })
            .unwrap_or_default())
    }

    fn port(&self, port: PortId) -> Result<&PortEntry, GraphError> {
        self.ports.get(&port).ok_or(GraphError::UnknownPort(port))
    }

    fn expect_kind(&self, port: PortId, kind: PortKind) -> Result<(), GraphError> {
        let actual = self.port(port)?.kind;
        if actual == kind {
            Ok(())
        } else {
            Err(match kind {
                PortKind::Output => GraphError::NotAnOutputPort(port),
                PortKind::Input => GraphError::NotAnInputPort(port),
            })
        }
    }
}

/// Graph lookup and mutation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// Node id not present
    #[error("unknown node: {0}")]
    UnknownNode(NodeId),

    /// Port id not present
    #[error("unknown port: {0}")]
    UnknownPort(PortId),

    /// Edge id not present
    #[error("unknown edge: {0}")]
    UnknownEdge(EdgeId),

    /// Port is not attached to any node
    #[error("{0} is not attached to a node")]
    DetachedPort(PortId),

    /// Operation needs an output port
    #[error("{0} is not an output port")]
    NotAnOutputPort(PortId),

    /// Operation needs an input port
    #[error("{0} is not an input port")]
    NotAnInputPort(PortId),
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixture {
        graph: DataFlowGraph,
        out: PortId,
        edge_a: EdgeId,
    }

    /// `source --a--> proc`, `source --(none)--> proc`, `other --b--> sink`
    fn fixture() -> Fixture {
        let mut graph = DataFlowGraph::new();
        let source = graph.add_node("source");
        let proc = graph.add_node("proc");
        let other = graph.add_node("other");
        let sink = graph.add_node("sink");

        let source_out = graph.add_port(source, PortKind::Output).unwrap();
        let proc_in1 = graph.add_port(proc, PortKind::Input).unwrap();
        let proc_in2 = graph.add_port(proc, PortKind::Input).unwrap();
        let out = graph.add_port(proc, PortKind::Output).unwrap();
        let other_out = graph.add_port(other, PortKind::Output).unwrap();
        let sink_in = graph.add_port(sink, PortKind::Input).unwrap();

        let edge_a = graph.connect(source_out, proc_in1, Some("a")).unwrap();
        graph.connect(source_out, proc_in2, None).unwrap();
        graph.connect(other_out, sink_in, Some("b")).unwrap();

        Fixture { graph, out, edge_a }
    }

    #[test]
    fn available_inputs_come_from_own_node() {
        let f = fixture();
        let inputs = f.graph.available_inputs(f.out).unwrap();
        assert_eq!(inputs.entries(), &[Some("a".to_string()), None]);
        assert!(inputs.contains("a"));
        assert!(!inputs.contains("b"));
        assert_eq!(inputs.unnamed_count(), 1);
    }

    #[test]
    fn blank_label_counts_as_unlabeled() {
        let mut f = fixture();
        f.graph.set_edge_label(f.edge_a, Some("  ")).unwrap();
        let inputs = f.graph.available_inputs(f.out).unwrap();
        assert_eq!(inputs.unnamed_count(), 2);
    }

    #[test]
    fn detached_port_has_no_inputs() {
        let mut graph = DataFlowGraph::new();
        let port = graph.add_detached_port(PortKind::Output);
        assert_eq!(graph.available_inputs(port), Err(GraphError::DetachedPort(port)));
        assert!(matches!(
            graph.available_inputs(PortId::new()),
            Err(GraphError::UnknownPort(_))
        ));
    }

    #[test]
    fn behavior_only_on_output_ports() {
        let mut graph = DataFlowGraph::new();
        let node = graph.add_node("n");
        let input = graph.add_port(node, PortKind::Input).unwrap();
        let output = graph.add_port(node, PortKind::Output).unwrap();
        graph.set_behavior(output, "forward a").unwrap();
        assert_eq!(graph.behavior(output).unwrap(), "forward a");
        assert_eq!(graph.set_behavior(input, "x"), Err(GraphError::NotAnOutputPort(input)));
    }

    #[test]
    fn connect_checks_direction() {
        let mut graph = DataFlowGraph::new();
        let node = graph.add_node("n");
        let input = graph.add_port(node, PortKind::Input).unwrap();
        let output = graph.add_port(node, PortKind::Output).unwrap();
        assert_eq!(graph.connect(input, output, None), Err(GraphError::NotAnOutputPort(input)));
    }

    #[test]
    fn edge_label_edit_reports_rename() {
        let mut f = fixture();
        let rename = f.graph.set_edge_label(f.edge_a, Some("renamed")).unwrap();
        assert_eq!(rename, Some(InputRename::new("a", "renamed")));
        assert_eq!(f.graph.edge(f.edge_a).unwrap().label.as_deref(), Some("renamed"));
        assert_eq!(f.graph.ports_fed_by(f.edge_a).unwrap(), vec![f.out]);
    }

    #[test]
    fn remove_node_drops_edges() {
        let mut f = fixture();
        let source = f.graph.node_of(f.graph.edge(f.edge_a).unwrap().source).unwrap();
        f.graph.remove_node(source).unwrap();
        assert!(f.graph.edge(f.edge_a).is_none());
        assert!(f.graph.available_inputs(f.out).unwrap().is_empty());
    }
}
