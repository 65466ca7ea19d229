use std::fmt::Write as FmtWrite;

use crate::utils::escape_html;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellValue {
    /// Plain text, escaped when the table is rendered.
    Text(String),
    /// Trusted HTML-like markup inserted verbatim.
    Markup(String),
    Table(Box<Table>),
}

impl Default for CellValue {
    fn default() -> Self {
        CellValue::Text(String::new())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub value: CellValue,
    pub port: Option<String>,
    pub column_span: u32,
    pub row_span: u32,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            value: CellValue::default(),
            port: None,
            column_span: Cell::DEFAULT_SPAN,
            row_span: Cell::DEFAULT_SPAN,
        }
    }
}

impl Cell {
    pub const DEFAULT_SPAN: u32 = 1;

    pub fn new(value: CellValue) -> Self {
        Self {
            value,
            ..Self::default()
        }
    }

    pub fn text(value: impl ToString) -> Self {
        Self::new(CellValue::Text(value.to_string()))
    }

    pub fn markup(markup: impl Into<String>) -> Self {
        Self::new(CellValue::Markup(markup.into()))
    }

    pub fn table(table: Table) -> Self {
        Self::new(CellValue::Table(Box::new(table)))
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_port(mut self, port: impl Into<String>) -> Self {
        self.port = Some(port.into());
        self
    }

    pub fn spanning_columns(mut self, span: u32) -> Self {
        self.column_span = span.max(1);
        self
    }

    pub fn spanning_rows(mut self, span: u32) -> Self {
        self.row_span = span.max(1);
        self
    }

    fn to_html(&self, out: &mut String) {
        out.push_str("<td");
        if self.row_span != Cell::DEFAULT_SPAN {
            let _ = write!(out, " rowspan=\"{}\"", self.row_span);
        }
        if self.column_span != Cell::DEFAULT_SPAN {
            let _ = write!(out, " colspan=\"{}\"", self.column_span);
        }
        if let Some(port) = &self.port {
            let _ = write!(out, " port=\"{}\"", escape_html(port));
        }
        out.push('>');
        match &self.value {
            CellValue::Text(text) => out.push_str(&escape_html(text)),
            CellValue::Markup(markup) => out.push_str(markup),
            CellValue::Table(table) => table.write_html(out),
        }
        out.push_str("</td>");
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::text(value)
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::new(CellValue::Text(value))
    }
}

impl From<Table> for Cell {
    fn from(value: Table) -> Self {
        Cell::table(value)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    pub cells: Vec<Cell>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, cell: impl Into<Cell>) {
        self.cells.push(cell.into());
    }

    pub fn width(&self) -> usize {
        self.cells.iter().map(|cell| cell.column_span as usize).sum()
    }
}

impl FromIterator<Cell> for Row {
    fn from_iter<I: IntoIterator<Item = Cell>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}

/// One positional argument of [`Table::add_row`].
#[derive(Debug, Clone)]
pub enum RowItem {
    Cell(Cell),
    Row(Row),
}

impl From<Cell> for RowItem {
    fn from(value: Cell) -> Self {
        RowItem::Cell(value)
    }
}

impl From<Row> for RowItem {
    fn from(value: Row) -> Self {
        RowItem::Row(value)
    }
}

impl From<&str> for RowItem {
    fn from(value: &str) -> Self {
        RowItem::Cell(value.into())
    }
}

impl From<String> for RowItem {
    fn from(value: String) -> Self {
        RowItem::Cell(value.into())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    rows: Vec<Row>,
    pub cell_border: u32,
    pub cell_spacing: u32,
    pub table_border: u32,
}

impl Default for Table {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            cell_border: 1,
            cell_spacing: 0,
            table_border: 0,
        }
    }
}

/// Table rows after padding: every row spans the same number of columns.
pub type Layout<'a> = Vec<Vec<&'a Cell>>;

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a row. Whole rows passed as items are spliced in place.
    pub fn add_row<I, T>(&mut self, items: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<RowItem>,
    {
        let mut row = Row::new();
        for item in items {
            match item.into() {
                RowItem::Cell(cell) => row.cells.push(cell),
                RowItem::Row(other) => row.cells.extend(other.cells),
            }
        }
        self.rows.push(row);
    }

    pub fn with_row<I, T>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<RowItem>,
    {
        self.add_row(items);
        self
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn max_width(&self) -> usize {
        self.rows.iter().map(Row::width).max().unwrap_or(0)
    }

    pub fn generate_layout(&self) -> Layout<'_> {
        static PADDING: Cell = Cell {
            value: CellValue::Text(String::new()),
            port: None,
            column_span: Cell::DEFAULT_SPAN,
            row_span: Cell::DEFAULT_SPAN,
        };

        let max_width = self.max_width();
        self.rows
            .iter()
            .map(|row| {
                let mut cells: Vec<&Cell> = row.cells.iter().collect();
                let missing = max_width.saturating_sub(row.width());
                cells.extend(std::iter::repeat_n(&PADDING, missing));
                cells
            })
            .collect()
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        if self.rows.is_empty() {
            return;
        }

        let _ = write!(
            out,
            "<table border=\"{}\" cellborder=\"{}\" cellspacing=\"{}\">",
            self.table_border, self.cell_border, self.cell_spacing
        );
        for row in self.generate_layout() {
            out.push_str("<tr>");
            for cell in row {
                cell.to_html(out);
            }
            out.push_str("</tr>");
        }
        out.push_str("</table>");
    }
}
