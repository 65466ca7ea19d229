use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::node::{Appearance, Node};
use crate::style::{ArrowShape, ClusterStyle, EdgeStyle, NodeShape};
use crate::trace::{TraceOptions, Tracer};
use crate::utils::{address_of, hash_combine, hash_str};
use crate::visualize::Visualize;

/// Stable key of a traced value; doubles as the DOT node id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identity(u64);

impl Identity {
    pub const fn from_raw(raw: u64) -> Self {
        Identity(raw)
    }

    /// Address of `value` mixed with its concrete type, so a struct and a field
    /// stored at offset zero do not collide.
    pub fn of<T: ?Sized>(value: &T) -> Self {
        let address = address_of(value) as u64;
        Identity(hash_combine(address, hash_str(std::any::type_name::<T>())))
    }

    pub fn combine(self, index: u64) -> Self {
        Identity(hash_combine(self.0, index))
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arrow {
    pub source: Identity,
    pub source_port: Option<String>,
    pub destination: Identity,
    pub destination_port: Option<String>,
    pub shape: ArrowShape,
    pub style: EdgeStyle,
}

impl Arrow {
    pub fn new(source: Identity, destination: Identity) -> Self {
        Self {
            source,
            source_port: None,
            destination,
            destination_port: None,
            shape: ArrowShape::default(),
            style: EdgeStyle::default(),
        }
    }

    pub fn from_port(mut self, port: impl Into<String>) -> Self {
        self.source_port = Some(port.into());
        self
    }

    pub fn to_port(mut self, port: impl Into<String>) -> Self {
        self.destination_port = Some(port.into());
        self
    }

    pub fn with_shape(mut self, shape: ArrowShape) -> Self {
        self.shape = shape;
        self
    }

    pub fn with_style(mut self, style: EdgeStyle) -> Self {
        self.style = style;
        self
    }
}

/// Nodes that should be laid out on the same rank.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RankConstraint {
    pub node_ids: Vec<Identity>,
    pub requested_rank: i32,
}

impl RankConstraint {
    pub fn new(requested_rank: i32) -> Self {
        Self {
            node_ids: Vec::new(),
            requested_rank,
        }
    }
}

/// Graph-wide attributes. The graph itself is the outermost cluster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphAttributes {
    pub label: Option<String>,
    pub color: Option<String>,
    pub style: ClusterStyle,
    /// Default node appearance, also the baseline node attributes are diffed against.
    pub node: Appearance,
}

impl Default for GraphAttributes {
    fn default() -> Self {
        Self {
            label: None,
            color: None,
            style: ClusterStyle::default(),
            node: Appearance {
                shape: NodeShape::Plaintext,
                ..Appearance::default()
            },
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: BTreeMap<Identity, Node>,
    edges: Vec<Arrow>,
    rank_constraints: Vec<RankConstraint>,
    pub attributes: GraphAttributes,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_attributes(attributes: GraphAttributes) -> Self {
        Self {
            attributes,
            ..Self::default()
        }
    }

    pub fn has_node(&self, id: Identity) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn node(&self, id: Identity) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Nodes in ascending id order.
    pub fn nodes(&self) -> impl Iterator<Item = (Identity, &Node)> {
        self.nodes.iter().map(|(id, node)| (*id, node))
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edges(&self) -> &[Arrow] {
        &self.edges
    }

    pub fn rank_constraints(&self) -> &[RankConstraint] {
        &self.rank_constraints
    }

    /// Inserts or replaces the node stored under `id`, returning the replaced node.
    pub fn add_node(&mut self, id: Identity, node: impl Into<Node>) -> Option<Node> {
        self.nodes.insert(id, node.into())
    }

    pub fn add_edge(&mut self, arrow: Arrow) -> &mut Arrow {
        self.edges.push(arrow);
        let last = self.edges.len() - 1;
        &mut self.edges[last]
    }

    /// Appends `arrow` unless a structurally equal arrow is already present.
    pub fn add_unique_edge(&mut self, arrow: Arrow) -> Option<&mut Arrow> {
        if self.edges.contains(&arrow) {
            return None;
        }
        Some(self.add_edge(arrow))
    }

    pub fn add_rank_constraint(&mut self, constraint: RankConstraint) {
        self.rank_constraints.push(constraint);
    }

    /// Traces `value` into this graph with default options.
    pub fn trace(&mut self, value: &dyn Visualize) -> Result<Identity> {
        self.trace_with(value, TraceOptions::default())
    }

    /// Traces `value` into this graph. On error the graph is restored to its
    /// state before the call.
    pub fn trace_with(&mut self, value: &dyn Visualize, options: TraceOptions) -> Result<Identity> {
        let edges = self.edges.len();
        let rank_constraints = self.rank_constraints.len();

        let mut tracer = Tracer::new(self, options);
        let result = tracer.visit(value);
        let changes = tracer.into_changes();

        if result.is_err() {
            for (id, previous) in changes.into_iter().rev() {
                match previous {
                    Some(node) => self.nodes.insert(id, node),
                    None => self.nodes.remove(&id),
                };
            }
            self.edges.truncate(edges);
            self.rank_constraints.truncate(rank_constraints);
        }
        result
    }

    pub fn to_dot(&self) -> String {
        crate::dot::render(self)
    }
}
