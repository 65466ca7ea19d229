use std::fmt::Write as FmtWrite;

use crate::graph::{Arrow, Graph};
use crate::node::Appearance;
use crate::style::{ArrowShape, ClusterStyle, EdgeStyle};
use crate::utils::quote_attribute;

/// Serializes `graph` as a Graphviz digraph.
pub fn render(graph: &Graph) -> String {
    let mut out = String::from("digraph G {\n");
    let attributes = &graph.attributes;

    if let Some(color) = &attributes.color {
        let _ = writeln!(out, "color={};", quote_attribute(color));
    }
    if let Some(label) = &attributes.label {
        let _ = writeln!(out, "label={};", quote_attribute(label));
    }
    if attributes.style != ClusterStyle::Normal {
        let _ = writeln!(out, "style={};", attributes.style.dot_token());
    }

    let node_defaults = attributes.node.diff_against(&Appearance::default());
    if !node_defaults.is_empty() {
        let _ = writeln!(out, "node[{}];", node_defaults.trim_end_matches(','));
    }

    for (id, node) in graph.nodes() {
        let _ = writeln!(out, "{id}{};", node.render_structure(&attributes.node));
    }

    for arrow in graph.edges() {
        write_arrow(&mut out, arrow);
    }

    for constraint in graph.rank_constraints() {
        if constraint.node_ids.is_empty() {
            continue;
        }
        out.push_str("{rank=same;");
        for id in &constraint.node_ids {
            let _ = write!(out, "{id};");
        }
        out.push_str("}\n");
    }

    out.push_str("}\n");
    out
}

fn write_arrow(out: &mut String, arrow: &Arrow) {
    let _ = write!(out, "{}", arrow.source);
    if let Some(port) = &arrow.source_port {
        let _ = write!(out, ":{}", port_id(port));
    }
    let _ = write!(out, " -> {}", arrow.destination);
    if let Some(port) = &arrow.destination_port {
        let _ = write!(out, ":{}", port_id(port));
    }

    let mut attributes = Vec::new();
    if arrow.shape != ArrowShape::default() {
        attributes.push(format!("arrowhead={}", arrow.shape));
    }
    if arrow.style != EdgeStyle::default() {
        attributes.push(format!("style={}", arrow.style.dot_token()));
    }
    if !attributes.is_empty() {
        let _ = write!(out, "[{}]", attributes.join(","));
    }
    out.push_str(";\n");
}

/// Ports that are not plain DOT identifiers or numerals get quoted.
fn port_id(port: &str) -> String {
    let identifier = port
        .chars()
        .next()
        .is_some_and(|first| first.is_ascii_alphabetic() || first == '_')
        && port.chars().all(|ch| ch.is_ascii_alphanumeric() || ch == '_');
    let numeral = !port.is_empty() && port.chars().all(|ch| ch.is_ascii_digit());

    if identifier || numeral {
        port.to_string()
    } else {
        quote_attribute(port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{GraphAttributes, Identity, RankConstraint};
    use crate::node::TableNode;
    use crate::style::NodeShape;
    use crate::table::Cell;

    fn node(text: &str) -> TableNode {
        TableNode::new().with_row([Cell::text(text)])
    }

    #[test]
    fn empty_graph_only_declares_node_defaults() {
        assert_eq!(render(&Graph::new()), "digraph G {\nnode[shape=plaintext];\n}\n");
    }

    #[test]
    fn scalar_graph_has_no_edges() {
        let value = 42_i32;
        let mut graph = Graph::new();
        let id = graph.trace(&value).unwrap();

        let dot = graph.to_dot();
        assert!(dot.contains(&format!("{id}[label=<\n\t<table")));
        assert!(dot.contains(">42</td>"));
        assert!(!dot.contains("->"));
    }

    #[test]
    fn node_attributes_are_diffed_against_graph_default() {
        let mut graph = Graph::with_attributes(GraphAttributes {
            label: Some("demo \"one\"".to_string()),
            color: Some("red".to_string()),
            style: ClusterStyle::Rounded,
            ..GraphAttributes::default()
        });
        graph.add_node(Identity::from_raw(1), node("plain"));
        let mut boxed = node("boxed");
        boxed.appearance.shape = NodeShape::Box;
        graph.add_node(Identity::from_raw(2), boxed);

        let dot = render(&graph);
        assert!(dot.starts_with(
            "digraph G {\ncolor=\"red\";\nlabel=\"demo \\\"one\\\"\";\nstyle=rounded;\nnode[shape=plaintext];\n"
        ));
        assert!(dot.contains("\n1[label=<\n\t<table"));
        assert!(dot.contains("\n2[shape=box,label=<\n\t<table"));
        assert!(dot.ends_with("}\n"));
    }

    #[test]
    fn trailing_backslash_keeps_the_label_terminated() {
        let graph = Graph::with_attributes(GraphAttributes {
            label: Some(r"C:\tmp\".to_string()),
            ..GraphAttributes::default()
        });
        assert!(render(&graph).contains(r#"label="C:\\tmp\\";"#));
    }

    #[test]
    fn edges_emit_only_non_default_attributes() {
        let mut graph = Graph::new();
        let a = Identity::from_raw(10);
        let b = Identity::from_raw(20);
        graph.add_edge(Arrow::new(a, b));
        graph.add_edge(Arrow::new(a, b).from_port("ptr").to_port("H"));
        graph.add_edge(
            Arrow::new(a, b)
                .from_port("1_0")
                .with_style(EdgeStyle::Dashed)
                .with_shape(ArrowShape::ODot),
        );

        let dot = render(&graph);
        assert!(dot.contains("\n10 -> 20;\n"));
        assert!(dot.contains("\n10:ptr -> 20:H;\n"));
        assert!(dot.contains("\n10:\"1_0\" -> 20[arrowhead=odot,style=dashed];\n"));
    }

    #[test]
    fn rank_constraints_skip_empty_groups() {
        let mut graph = Graph::new();
        let mut constraint = RankConstraint::new(1);
        constraint.node_ids = vec![Identity::from_raw(3), Identity::from_raw(4)];
        graph.add_rank_constraint(constraint);
        graph.add_rank_constraint(RankConstraint::new(2));

        let dot = render(&graph);
        assert!(dot.contains("{rank=same;3;4;}\n"));
        assert_eq!(dot.matches("rank=same").count(), 1);
    }

    #[test]
    fn nodes_are_written_in_id_order() {
        let mut graph = Graph::new();
        graph.add_node(Identity::from_raw(9), node("b"));
        graph.add_node(Identity::from_raw(5), node("a"));

        let dot = render(&graph);
        let first = dot.find("\n5[").unwrap();
        let second = dot.find("\n9[").unwrap();
        assert!(first < second);
    }

    #[test]
    fn cell_text_is_escaped() {
        let mut graph = Graph::new();
        graph.add_node(Identity::from_raw(1), node("Vec<&str>"));
        assert!(render(&graph).contains("<td>Vec&lt;&amp;str&gt;</td>"));
    }
}
