//! Turn in-memory Rust values into Graphviz diagrams.
//!
//! ```
//! use structviz::{Graph, impl_visualize_record};
//!
//! struct Employee {
//!     name: String,
//!     skills: Vec<String>,
//! }
//!
//! impl_visualize_record!(Employee { name, skills });
//!
//! let employee = Employee {
//!     name: "Ada".to_string(),
//!     skills: vec!["math".to_string()],
//! };
//! let mut graph = Graph::new();
//! graph.trace(&employee)?;
//! assert!(graph.to_dot().starts_with("digraph G {"));
//! # Ok::<(), structviz::Error>(())
//! ```

pub mod config;
pub mod dot;
pub mod error;
pub mod graph;
pub mod node;
pub mod style;
pub mod table;
pub mod trace;
pub mod utils;
pub mod visualize;

pub use config::Config;
pub use error::{Error, Result};
pub use graph::{Arrow, Graph, GraphAttributes, Identity, RankConstraint};
pub use node::{Appearance, Node, TableNode};
pub use style::{ArrowShape, ClusterStyle, EdgeStyle, NodeShape, NodeStyle, UnknownName};
pub use table::{Cell, CellValue, Row, RowItem, Table};
pub use trace::{ListLayout, TraceOptions, Tracer};
pub use visualize::{DisplayMode, Field, Handle, Sequence, SequenceKind, Shape, Visualize};

/// Traces `value` with default settings and returns its DOT rendering.
pub fn to_dot(value: &dyn Visualize) -> Result<String> {
    to_dot_with(value, &Config::default())
}

pub fn to_dot_with(value: &dyn Visualize, config: &Config) -> Result<String> {
    let mut graph = Graph::with_attributes(config.graph.clone());
    graph.trace_with(value, config.trace.clone())?;
    Ok(graph.to_dot())
}
