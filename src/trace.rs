use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::error::{Error, Result};
use crate::graph::{Arrow, Graph, Identity, RankConstraint};
use crate::node::{Node, TableNode};
use crate::style::EdgeStyle;
use crate::table::{Cell, Row, RowItem, Table};
use crate::utils::{address_of, escape_html, hex_address};
use crate::visualize::{DisplayMode, Sequence, SequenceKind, Shape, Visualize};

pub const DEFAULT_MAX_DEPTH: usize = 256;

const HEADER_WIDTH: u32 = 8;

// Remaining stack below which a traversal step moves to a fresh segment.
#[cfg(not(target_arch = "wasm32"))]
const STACK_RED_ZONE: usize = 128 * 1024;
#[cfg(not(target_arch = "wasm32"))]
const STACK_SEGMENT: usize = 2 * 1024 * 1024;

#[cfg(not(target_arch = "wasm32"))]
fn with_stack<R>(step: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(STACK_RED_ZONE, STACK_SEGMENT, step)
}

#[cfg(target_arch = "wasm32")]
fn with_stack<R>(step: impl FnOnce() -> R) -> R {
    step()
}

/// How linked sequences such as `LinkedList` are drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListLayout {
    /// One node per element, chained through `H` ports.
    #[default]
    Chain,
    /// A single table, like contiguous sequences.
    Table,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraceOptions {
    pub max_depth: usize,
    pub linked_lists: ListLayout,
    /// Number of chained list elements placed on one rank.
    pub list_rank_group: Option<usize>,
}

impl Default for TraceOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            linked_lists: ListLayout::default(),
            list_rank_group: None,
        }
    }
}

/// Walks a value and records one node per distinct identity in a [`Graph`].
///
/// Identities are reserved before children are visited, so cyclic structures
/// terminate and produce self loops or back edges instead of recursing forever.
pub struct Tracer<'g> {
    graph: &'g mut Graph,
    options: TraceOptions,
    reserved: HashSet<Identity>,
    changes: Vec<(Identity, Option<Node>)>,
    depth: usize,
}

impl<'g> Tracer<'g> {
    pub fn new(graph: &'g mut Graph, options: TraceOptions) -> Self {
        Self {
            graph,
            options,
            reserved: HashSet::new(),
            changes: Vec::new(),
            depth: 0,
        }
    }

    pub fn options(&self) -> &TraceOptions {
        &self.options
    }

    pub fn graph(&self) -> &Graph {
        self.graph
    }

    /// Nodes this tracer wrote, in write order, each with the node it replaced.
    pub fn into_changes(self) -> Vec<(Identity, Option<Node>)> {
        self.changes
    }

    pub fn visit(&mut self, value: &dyn Visualize) -> Result<Identity> {
        let id = value.identity();
        self.visit_as(value, id)
    }

    /// Visits `value` under an explicit identity. Returns immediately when the
    /// identity is already known.
    pub fn visit_as(&mut self, value: &dyn Visualize, id: Identity) -> Result<Identity> {
        if self.reserved.contains(&id) || self.graph.has_node(id) {
            trace!(%id, "identity already traced");
            return Ok(id);
        }

        self.reserved.insert(id);
        let type_name = value.type_name();
        self.descend(&type_name)?;
        let node = with_stack(|| self.build(value, id, &type_name));
        self.depth -= 1;

        let node = node?;
        debug!(%id, type_name = %type_name, "traced node");
        self.insert(id, node);
        Ok(id)
    }

    fn insert(&mut self, id: Identity, node: TableNode) {
        let previous = self.graph.add_node(id, node);
        self.changes.push((id, previous));
    }

    fn descend(&mut self, type_name: &str) -> Result<()> {
        if self.depth >= self.options.max_depth {
            warn!(limit = self.options.max_depth, type_name, "depth limit reached");
            return Err(Error::DepthLimit {
                limit: self.options.max_depth,
                type_name: type_name.to_string(),
            });
        }
        self.depth += 1;
        Ok(())
    }

    fn build(&mut self, value: &dyn Visualize, id: Identity, type_name: &str) -> Result<TableNode> {
        match value.shape() {
            Shape::Scalar(text) => Ok(TableNode::new()
                .with_row([type_header(type_name), address_cell(value)])
                .with_row([Cell::text(text).spanning_columns(2)])),
            Shape::Pointer(target) => {
                let target_cell = match target {
                    Some(target) => {
                        let target_id = self.visit(&*target)?;
                        self.graph
                            .add_unique_edge(Arrow::new(id, target_id).from_port("ptr"));
                        address_cell(&*target)
                    }
                    None => Cell::text("null"),
                };
                Ok(TableNode::new()
                    .with_row([type_header(type_name), address_cell(value)])
                    .with_row([target_cell.spanning_columns(2).with_port("ptr")]))
            }
            Shape::Sequence(sequence)
                if sequence.kind.is_linked() && self.options.linked_lists == ListLayout::Chain =>
            {
                self.build_chain(value, id, type_name, sequence)
            }
            Shape::Sequence(sequence) => {
                let mut node = TableNode::new()
                    .with_row(container_header(type_name, value, sequence.elements.len()));
                if sequence.elements.is_empty() {
                    node.add_row([Cell::text("Empty").spanning_columns(HEADER_WIDTH)]);
                    return Ok(node);
                }

                let mut values = Row::new();
                for (index, element) in sequence.elements.iter().enumerate() {
                    values.push(self.place(id, index.to_string(), &**element, None, Some(index))?);
                }
                node.add_row([RowItem::from("Values: "), RowItem::from(values)]);
                Ok(node)
            }
            Shape::Map(entries) => {
                let mut node =
                    TableNode::new().with_row(container_header(type_name, value, entries.len()));
                if entries.is_empty() {
                    node.add_row([Cell::text("Empty").spanning_columns(HEADER_WIDTH)]);
                    return Ok(node);
                }

                for (index, (key, entry)) in entries.iter().enumerate() {
                    let key_cell = self.place(id, format!("k{index}"), &**key, None, Some(index))?;
                    let value_cell =
                        self.place(id, format!("v{index}"), &**entry, None, Some(index))?;
                    node.add_row([key_cell, value_cell]);
                }
                Ok(node)
            }
            Shape::Record(fields) => {
                let mut node =
                    TableNode::new().with_row([type_header(type_name), address_cell(value)]);
                for (index, field) in fields.iter().enumerate() {
                    if !field.visible {
                        continue;
                    }
                    let cell = self.place(id, index.to_string(), &*field.value, field.display, None)?;
                    node.add_row([Cell::text(&field.name), cell]);
                }
                Ok(node)
            }
        }
    }

    /// Per-element nodes for linked sequences. Element nodes hang off the
    /// container header and link to each other through their `H` ports.
    fn build_chain(
        &mut self,
        value: &dyn Visualize,
        id: Identity,
        type_name: &str,
        sequence: Sequence<'_>,
    ) -> Result<TableNode> {
        let length = sequence.elements.len();
        let [type_cell, address, length_cell] = container_header(type_name, value, length);
        if length == 0 {
            return Ok(TableNode::new()
                .with_row([type_cell, address, length_cell])
                .with_row([Cell::text("Empty list").spanning_columns(HEADER_WIDTH)]));
        }
        let header = [type_cell.with_port("H"), address, length_cell];

        let mut element_ids = Vec::with_capacity(length);
        for (index, element) in sequence.elements.iter().enumerate() {
            let element_id = id.combine(index as u64);
            let value_cell = self.place(element_id, "V".to_string(), &**element, None, Some(index))?;
            let element_node = TableNode::new()
                .with_row([type_header(&element.type_name())
                    .spanning_columns(2)
                    .with_port("H")])
                .with_row([Cell::text(format!("Index: {index}")), address_cell(&**element)])
                .with_row([value_cell.spanning_columns(2)]);
            self.insert(element_id, element_node);
            element_ids.push(element_id);
        }

        self.graph
            .add_edge(Arrow::new(id, element_ids[0]).from_port("H").to_port("H"));
        for pair in element_ids.windows(2) {
            self.graph
                .add_edge(Arrow::new(pair[0], pair[1]).from_port("H").to_port("H"));
            if sequence.kind == SequenceKind::DoublyLinked {
                self.graph
                    .add_edge(Arrow::new(pair[1], pair[0]).from_port("H").to_port("H"));
            }
        }

        if let Some(group) = self.options.list_rank_group.filter(|group| *group > 0) {
            for (rank, chunk) in element_ids.chunks(group).enumerate() {
                let mut constraint = RankConstraint::new(rank as i32 + 1);
                constraint.node_ids.extend_from_slice(chunk);
                self.graph.add_rank_constraint(constraint);
            }
        }

        Ok(TableNode::new().with_row(header))
    }

    /// Produces the cell for `value` inside node `owner`. Edge display modes
    /// trace the value (or a pointer's referent) into its own node and connect
    /// it from `port`.
    fn place(
        &mut self,
        owner: Identity,
        port: String,
        value: &dyn Visualize,
        mode: Option<DisplayMode>,
        index: Option<usize>,
    ) -> Result<Cell> {
        let shape = value.shape();
        let mode = mode.unwrap_or_else(|| DisplayMode::for_shape(&shape));
        let style = match mode {
            DisplayMode::Inline => return Ok(self.inline_cell(owner, &port, shape)?.with_port(port)),
            DisplayMode::PointerEdge => EdgeStyle::Normal,
            DisplayMode::CompositionEdge => EdgeStyle::Dashed,
        };

        let (target_id, label) = match shape {
            Shape::Pointer(None) => return Ok(Cell::text("null").with_port(port)),
            Shape::Pointer(Some(target)) => (self.visit(&*target)?, address_cell(&*target)),
            _ => {
                let label = match index {
                    Some(index) => Cell::text(index),
                    None => address_cell(value),
                };
                let id = match index {
                    Some(index) => value.identity().combine(index as u64),
                    None => value.identity(),
                };
                (self.visit_as(value, id)?, label)
            }
        };

        self.graph.add_unique_edge(
            Arrow::new(owner, target_id)
                .from_port(port.clone())
                .with_style(style),
        );
        Ok(label.with_port(port))
    }

    fn inline_cell(
        &mut self,
        owner: Identity,
        port: &str,
        shape: Shape<'_>,
    ) -> Result<Cell> {
        let table = match shape {
            Shape::Scalar(text) => return Ok(Cell::text(text)),
            Shape::Pointer(None) => return Ok(Cell::text("null")),
            Shape::Pointer(Some(target)) => return Ok(address_cell(&*target)),
            Shape::Sequence(sequence) => {
                let mut row = Row::new();
                for (index, element) in sequence.elements.iter().enumerate() {
                    row.push(self.nested(owner, port, index, &**element, None)?);
                }
                if row.cells.is_empty() {
                    row.push("Empty");
                }
                Table::new().with_row([row])
            }
            Shape::Map(entries) => {
                let mut table = Table::new();
                for (index, (key, entry)) in entries.iter().enumerate() {
                    let key_cell = self.nested(owner, port, 2 * index, &**key, None)?;
                    let value_cell = self.nested(owner, port, 2 * index + 1, &**entry, None)?;
                    table.add_row([key_cell, value_cell]);
                }
                if table.is_empty() {
                    table.add_row(["Empty"]);
                }
                table
            }
            Shape::Record(fields) => {
                let mut table = Table::new();
                for (index, field) in fields.iter().enumerate() {
                    if !field.visible {
                        continue;
                    }
                    let cell = self.nested(owner, port, index, &*field.value, field.display)?;
                    table.add_row([Cell::text(&field.name), cell]);
                }
                table
            }
        };

        if table.is_empty() {
            return Ok(Cell::empty());
        }
        Ok(Cell::table(table))
    }

    fn nested(
        &mut self,
        owner: Identity,
        port: &str,
        index: usize,
        value: &dyn Visualize,
        mode: Option<DisplayMode>,
    ) -> Result<Cell> {
        self.descend(&value.type_name())?;
        let cell =
            with_stack(|| self.place(owner, format!("{port}_{index}"), value, mode, Some(index)));
        self.depth -= 1;
        cell
    }
}

fn type_header(type_name: &str) -> Cell {
    Cell::markup(format!("<b>{}</b>&nbsp;&nbsp;&nbsp;", escape_html(type_name)))
}

fn address_cell(value: &dyn Visualize) -> Cell {
    Cell::text(hex_address(address_of(value)))
}

fn container_header(type_name: &str, value: &dyn Visualize, length: usize) -> [Cell; 3] {
    [
        type_header(type_name).spanning_columns(4),
        address_cell(value).spanning_columns(2),
        Cell::text(format!("Length: {length}")).spanning_columns(2),
    ]
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::{BTreeMap, LinkedList};
    use std::rc::{Rc, Weak};

    use super::*;
    use crate::node::Node;
    use crate::visualize::Field;

    fn html(graph: &Graph, id: Identity) -> String {
        match graph.node(id) {
            Some(Node::Table(node)) => node.table.to_html(),
            None => panic!("node {id} missing"),
        }
    }

    fn rows(graph: &Graph, id: Identity) -> usize {
        match graph.node(id) {
            Some(Node::Table(node)) => node.table.rows().len(),
            None => 0,
        }
    }

    #[test]
    fn scalar_becomes_a_two_row_node() {
        let value = 42_i32;
        let mut graph = Graph::new();
        let id = graph.trace(&value).unwrap();

        assert_eq!(id, Identity::of(&value));
        assert_eq!(graph.node_count(), 1);
        assert_eq!(rows(&graph, id), 2);
        assert!(graph.edges().is_empty());

        let html = html(&graph, id);
        assert!(html.contains("<b>i32</b>"));
        assert!(html.contains(&hex_address(address_of(&value))));
        assert!(html.contains("<td colspan=\"2\">42</td>"));
    }

    #[test]
    fn visiting_twice_is_idempotent() {
        let values = vec![1, 2, 3];
        let mut graph = Graph::new();
        let first = graph.trace(&values).unwrap();
        let nodes = graph.node_count();
        let edges = graph.edges().len();

        let second = graph.trace(&values).unwrap();
        assert_eq!(first, second);
        assert_eq!(graph.node_count(), nodes);
        assert_eq!(graph.edges().len(), edges);
    }

    struct Looped {
        label: i32,
        myself: Weak<Looped>,
    }
    crate::impl_visualize_record!(Looped { label, myself });

    #[test]
    fn self_reference_terminates_with_a_self_loop() {
        let looped = Rc::new_cyclic(|me| Looped {
            label: 1,
            myself: me.clone(),
        });
        let mut graph = Graph::new();
        let id = graph.trace(&*looped).unwrap();

        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.edges().len(), 1);
        let edge = &graph.edges()[0];
        assert_eq!((edge.source, edge.destination), (id, id));
        assert_eq!(edge.source_port.as_deref(), Some("1"));
        assert_eq!(looped.label, 1);
    }

    #[test]
    fn shared_referent_is_traced_once() {
        let shared = Rc::new(5_u8);
        let values = vec![shared.clone(), shared.clone()];
        let mut graph = Graph::new();
        let id = graph.trace(&values).unwrap();

        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edges().len(), 2);
        let target = Identity::of(&*shared);
        assert!(graph.edges().iter().all(|edge| edge.source == id && edge.destination == target));
        let ports: Vec<_> = graph.edges().iter().map(|edge| edge.source_port.clone()).collect();
        assert_eq!(ports, vec![Some("0".to_string()), Some("1".to_string())]);
    }

    #[test]
    fn empty_container_keeps_its_own_identity() {
        let values: Vec<i32> = Vec::new();
        let mut graph = Graph::new();
        let id = graph.trace(&values).unwrap();

        assert_eq!(id, Identity::of(&values));
        assert_eq!(graph.node_count(), 1);
        let html = html(&graph, id);
        assert!(html.contains("Length: 0"));
        assert!(html.contains("<td colspan=\"8\">Empty</td>"));
    }

    #[test]
    fn non_empty_container_returns_its_own_identity() {
        let values = vec![vec![1], vec![2]];
        let mut graph = Graph::new();
        let id = graph.trace(&values).unwrap();

        assert_eq!(id, Identity::of(&values));
        assert_eq!(graph.node_count(), 3);
        assert!(graph.edges().iter().all(|edge| edge.style == EdgeStyle::Dashed));
    }

    #[test]
    fn inline_elements_share_the_values_row() {
        let values = [7, 8, 9];
        let mut graph = Graph::new();
        let id = graph.trace(&values).unwrap();

        let html = html(&graph, id);
        assert!(html.contains("<td>Values: </td><td port=\"0\">7</td>"));
        assert!(html.contains("Length: 3"));
        assert!(graph.edges().is_empty());
    }

    struct Link {
        next: Option<Box<Link>>,
    }
    crate::impl_visualize_record!(Link { next });

    fn chain(length: usize) -> Link {
        let mut head = Link { next: None };
        for _ in 1..length {
            head = Link {
                next: Some(Box::new(head)),
            };
        }
        head
    }

    #[test]
    fn deep_structures_hit_the_depth_limit() {
        let head = chain(40);
        let options = TraceOptions {
            max_depth: 16,
            ..TraceOptions::default()
        };

        let err = Graph::new().trace_with(&head, options).unwrap_err();
        assert!(matches!(err, Error::DepthLimit { limit: 16, .. }));

        let mut graph = Graph::new();
        let options = TraceOptions {
            max_depth: 64,
            ..TraceOptions::default()
        };
        graph.trace_with(&head, options).unwrap();
        assert_eq!(graph.node_count(), 40);
        assert_eq!(graph.edges().len(), 39);
        assert_eq!(TraceOptions::default().max_depth, DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn default_depth_fits_a_test_thread() {
        let mut graph = Graph::new();
        graph.trace(&chain(DEFAULT_MAX_DEPTH - 1)).unwrap();
        assert_eq!(graph.node_count(), DEFAULT_MAX_DEPTH - 1);

        let err = Graph::new()
            .trace(&chain(DEFAULT_MAX_DEPTH + 50))
            .unwrap_err();
        assert!(matches!(
            err,
            Error::DepthLimit {
                limit: DEFAULT_MAX_DEPTH,
                ..
            }
        ));
    }

    #[test]
    fn failed_trace_leaves_the_graph_untouched() {
        let mut graph = Graph::new();
        let kept = 7_u8;
        let kept_id = graph.trace(&kept).unwrap();
        let shallow = vec![1, 2];
        graph.trace(&shallow).unwrap();
        let before = graph.to_dot();

        let mixed = vec![Box::new(chain(1)), Box::new(chain(10))];
        let options = TraceOptions {
            max_depth: 5,
            ..TraceOptions::default()
        };
        assert!(graph.trace_with(&mixed, options).is_err());

        assert_eq!(graph.node_count(), 2);
        assert!(graph.has_node(kept_id));
        assert!(graph.edges().is_empty());
        assert_eq!(graph.to_dot(), before);
    }

    #[test]
    fn maps_draw_one_row_per_entry() {
        let mut scores = BTreeMap::new();
        scores.insert("ada", vec![90, 95]);
        scores.insert("alan", vec![88]);

        let mut graph = Graph::new();
        let id = graph.trace(&scores).unwrap();

        assert_eq!(id, Identity::of(&scores));
        assert_eq!(graph.node_count(), 3);
        assert_eq!(rows(&graph, id), 3);

        let html = html(&graph, id);
        assert!(html.contains("Length: 2"));
        assert!(html.contains("<td port=\"k0\">ada</td>"));
        assert!(html.contains("<td port=\"k1\">alan</td>"));
        assert!(html.contains("<td port=\"v1\">1</td>"));

        let ports: Vec<_> = graph
            .edges()
            .iter()
            .map(|edge| edge.source_port.as_deref().unwrap_or_default())
            .collect();
        assert_eq!(ports, vec!["v0", "v1"]);
        assert!(graph.edges().iter().all(|edge| edge.source == id && edge.style == EdgeStyle::Dashed));
        assert_eq!(graph.edges()[0].destination, Identity::of(&scores["ada"]).combine(0));
    }

    #[test]
    fn empty_map_is_marked() {
        let empty: BTreeMap<String, u8> = BTreeMap::new();
        let mut graph = Graph::new();
        let id = graph.trace(&empty).unwrap();

        assert_eq!(graph.node_count(), 1);
        assert!(graph.edges().is_empty());
        let html = html(&graph, id);
        assert!(html.contains("Length: 0"));
        assert!(html.contains("<td colspan=\"8\">Empty</td>"));
    }

    #[test]
    fn linked_lists_render_as_chains() {
        let list: LinkedList<i32> = [1, 2, 3].into_iter().collect();
        let options = TraceOptions {
            list_rank_group: Some(2),
            ..TraceOptions::default()
        };
        let mut graph = Graph::new();
        let id = graph.trace_with(&list, options).unwrap();

        assert_eq!(graph.node_count(), 4);
        let first = id.combine(0);
        assert!(html(&graph, first).contains("Index: 0"));

        let links: Vec<(Identity, Identity)> = graph
            .edges()
            .iter()
            .map(|edge| (edge.source, edge.destination))
            .collect();
        assert_eq!(
            links,
            vec![
                (id, first),
                (first, id.combine(1)),
                (id.combine(1), first),
                (id.combine(1), id.combine(2)),
                (id.combine(2), id.combine(1)),
            ]
        );

        let ranks: Vec<(i32, usize)> = graph
            .rank_constraints()
            .iter()
            .map(|constraint| (constraint.requested_rank, constraint.node_ids.len()))
            .collect();
        assert_eq!(ranks, vec![(1, 2), (2, 1)]);
    }

    #[test]
    fn linked_lists_can_use_the_table_layout() {
        let list: LinkedList<i32> = [1, 2].into_iter().collect();
        let options = TraceOptions {
            linked_lists: ListLayout::Table,
            ..TraceOptions::default()
        };
        let mut graph = Graph::new();
        graph.trace_with(&list, options).unwrap();

        assert_eq!(graph.node_count(), 1);
        assert!(graph.edges().is_empty());
    }

    #[test]
    fn empty_chain_is_marked() {
        let list: LinkedList<u8> = LinkedList::new();
        let mut graph = Graph::new();
        let id = graph.trace(&list).unwrap();

        assert_eq!(graph.node_count(), 1);
        assert!(html(&graph, id).contains("Empty list"));
    }

    struct Profile {
        name: String,
        scores: Vec<u32>,
        tags: Vec<String>,
        secret: String,
    }

    impl Visualize for Profile {
        fn shape(&self) -> Shape<'_> {
            Shape::Record(vec![
                Field::new("name", &self.name),
                Field::new("scores", &self.scores).display(DisplayMode::Inline),
                Field::new("tags", &self.tags),
                Field::new("secret", &self.secret).visible(false),
            ])
        }
    }

    #[test]
    fn record_fields_follow_their_display_modes() {
        let profile = Profile {
            name: "ada".to_string(),
            scores: vec![3, 4],
            tags: vec!["x".to_string()],
            secret: "hidden-token".to_string(),
        };
        let mut graph = Graph::new();
        let id = graph.trace(&profile).unwrap();

        assert_eq!(graph.node_count(), 2);
        assert_eq!(rows(&graph, id), 4);

        let html = html(&graph, id);
        assert_eq!(html.matches("<table").count(), 2);
        assert!(html.contains("<td port=\"1_0\">3</td>"));
        assert!(!html.contains("hidden-token"));

        let edge = &graph.edges()[0];
        assert_eq!(edge.source_port.as_deref(), Some("2"));
        assert_eq!(edge.style, EdgeStyle::Dashed);
        assert_eq!(edge.destination, Identity::of(&profile.tags));
    }

    #[test]
    fn null_pointers_have_no_edges() {
        let missing: Option<Box<i32>> = None;
        let mut graph = Graph::new();
        let id = graph.trace(&missing).unwrap();

        assert!(graph.edges().is_empty());
        assert!(html(&graph, id).contains("port=\"ptr\">null</td>"));
    }

    #[test]
    fn refcell_contents_are_traced_through_the_guard() {
        let cell = RefCell::new(String::from("inside"));
        let mut graph = Graph::new();
        let id = graph.trace(&cell).unwrap();

        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edges()[0].source, id);
        assert_eq!(graph.edges()[0].source_port.as_deref(), Some("ptr"));
        assert!(cell.try_borrow_mut().is_ok());
    }
}
