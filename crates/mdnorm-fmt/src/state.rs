//! Per-construct state kept outside the context stack.

use mdnorm_tree::Alignment;

use crate::escape::table_cell;

/// Narrowest rendered column, so the delimiter row always has `---`.
const MIN_COLUMN_WIDTH: usize = 3;

/// Cells of a table collected while its subtree is walked.
///
/// Column widths depend on every row, so a table can only be laid out once
/// it has been exited.
#[derive(Debug, Default)]
pub(crate) struct TableState {
    /// Column alignments from the delimiter row.
    alignments: Vec<Alignment>,
    /// Header row cells.
    head: Vec<String>,
    /// Body rows.
    rows: Vec<Vec<String>>,
    /// Cells of the row being collected.
    current: Vec<String>,
}

impl TableState {
    pub(crate) fn new(alignments: Vec<Alignment>) -> Self {
        Self {
            alignments,
            ..Self::default()
        }
    }

    /// Add a rendered cell to the current row.
    pub(crate) fn push_cell(&mut self, text: &str) {
        self.current.push(table_cell(text.trim()).into_owned());
    }

    /// Finish the header row.
    pub(crate) fn end_head(&mut self) {
        self.head = std::mem::take(&mut self.current);
    }

    /// Finish a body row.
    pub(crate) fn end_row(&mut self) {
        self.rows.push(std::mem::take(&mut self.current));
    }

    /// Lay the table out, each line prefixed with `indent`.
    ///
    /// The result has no trailing newline.
    pub(crate) fn render(&self, indent: &str) -> String {
        let columns = self
            .rows
            .iter()
            .map(Vec::len)
            .chain([self.head.len(), self.alignments.len()])
            .max()
            .unwrap_or(0);
        let mut widths = vec![MIN_COLUMN_WIDTH; columns];
        for row in std::iter::once(&self.head).chain(&self.rows) {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let mut lines = Vec::with_capacity(self.rows.len() + 2);
        lines.push(self.render_row(indent, &self.head, &widths));
        lines.push(self.render_delimiter(indent, &widths));
        for row in &self.rows {
            lines.push(self.render_row(indent, row, &widths));
        }
        lines.join("\n")
    }

    fn alignment(&self, column: usize) -> Alignment {
        self.alignments.get(column).copied().unwrap_or_default()
    }

    fn render_row(&self, indent: &str, cells: &[String], widths: &[usize]) -> String {
        let mut line = format!("{indent}|");
        for (column, width) in widths.iter().enumerate() {
            let cell = cells.get(column).map_or("", String::as_str);
            let padding = width - cell.chars().count();
            let (left, right) = match self.alignment(column) {
                Alignment::None | Alignment::Left => (0, padding),
                Alignment::Right => (padding, 0),
                Alignment::Center => (padding / 2, padding - padding / 2),
            };
            line.push(' ');
            line.push_str(&" ".repeat(left));
            line.push_str(cell);
            line.push_str(&" ".repeat(right));
            line.push_str(" |");
        }
        line
    }

    fn render_delimiter(&self, indent: &str, widths: &[usize]) -> String {
        let mut line = format!("{indent}|");
        for (column, width) in widths.iter().enumerate() {
            let alignment = self.alignment(column);
            let left = matches!(alignment, Alignment::Left | Alignment::Center);
            let right = matches!(alignment, Alignment::Right | Alignment::Center);
            line.push(if left { ':' } else { '-' });
            line.push_str(&"-".repeat(*width));
            line.push(if right { ':' } else { '-' });
            line.push('|');
        }
        line
    }
}
