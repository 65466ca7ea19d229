use serde::{Deserialize, Serialize};

use crate::style::{NodeShape, NodeStyle};
use crate::table::{RowItem, Table};
use crate::utils::quote_attribute;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Appearance {
    pub shape: NodeShape,
    pub style: NodeStyle,
    pub color: String,
}

impl Appearance {
    /// Attribute tokens for every field that differs from `default`, each
    /// followed by a comma.
    pub fn diff_against(&self, default: &Appearance) -> String {
        let mut attributes = String::new();

        if self.shape != default.shape {
            attributes.push_str("shape=");
            attributes.push_str(self.shape.as_str());
            attributes.push(',');
        }

        if self.style != default.style {
            attributes.push_str("style=");
            attributes.push_str(self.style.dot_token());
            attributes.push(',');
        }

        if self.color != default.color {
            attributes.push_str("color=");
            attributes.push_str(&quote_attribute(&self.color));
            attributes.push(',');
        }

        attributes
    }
}

/// A node whose label is an HTML-like table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableNode {
    pub appearance: Appearance,
    pub table: Table,
}

impl Default for TableNode {
    fn default() -> Self {
        // The table draws its own borders.
        Self {
            appearance: Appearance {
                shape: NodeShape::Plaintext,
                ..Appearance::default()
            },
            table: Table::default(),
        }
    }
}

impl TableNode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_row<I, T>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<RowItem>,
    {
        self.table.add_row(items);
        self
    }

    pub fn add_row<I, T>(&mut self, items: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<RowItem>,
    {
        self.table.add_row(items);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Table(TableNode),
}

impl Node {
    pub fn appearance(&self) -> &Appearance {
        match self {
            Node::Table(node) => &node.appearance,
        }
    }

    /// The bracketed attribute list that follows the node id in DOT output.
    pub fn render_structure(&self, default: &Appearance) -> String {
        match self {
            Node::Table(node) => format!(
                "[{}label=<\n\t{}>]",
                node.appearance.diff_against(default),
                node.table.to_html()
            ),
        }
    }
}

impl From<TableNode> for Node {
    fn from(value: TableNode) -> Self {
        Node::Table(value)
    }
}
