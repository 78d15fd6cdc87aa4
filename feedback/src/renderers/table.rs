use comfy_table::{
    modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Attribute, Cell, CellAlignment, Color,
    ContentArrangement, Table, TableComponent,
};

/// Builder for consistently styled terminal tables
#[derive(Clone)]
pub struct TableBuilder {
    table: Table,
}

/// Table styling presets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableStyle {
    /// Bordered grid for tiles and breakdowns
    Grid,
    /// Minimal borders for long response lists
    List,
}

impl TableBuilder {
    pub fn new() -> Self {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .apply_modifier(UTF8_ROUND_CORNERS)
            .set_content_arrangement(ContentArrangement::Dynamic);

        Self { table }
    }

    pub fn with_style(style: TableStyle) -> Self {
        let mut builder = Self::new();
        builder.apply_style(style);
        builder
    }

    pub fn apply_style(&mut self, style: TableStyle) -> &mut Self {
        match style {
            TableStyle::Grid => {}
            TableStyle::List => {
                self.table
                    .remove_style(TableComponent::HorizontalLines)
                    .remove_style(TableComponent::LeftBorderIntersections)
                    .remove_style(TableComponent::RightBorderIntersections)
                    .remove_style(TableComponent::MiddleIntersections);
            }
        }
        self
    }

    pub fn headers<I, S>(&mut self, headers: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let header_cells: Vec<Cell> = headers
            .into_iter()
            .map(|h| Cell::new(h.into()).add_attribute(Attribute::Bold))
            .collect();

        self.table.set_header(header_cells);
        self
    }

    pub fn row<I, S>(&mut self, cells: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let row_cells: Vec<Cell> = cells.into_iter().map(|cell| Cell::new(cell.into())).collect();

        self.table.add_row(row_cells);
        self
    }

    pub fn styled_row(&mut self, cells: Vec<Cell>) -> &mut Self {
        self.table.add_row(cells);
        self
    }

    /// Right-align a numeric column
    pub fn align_right(&mut self, column: usize) -> &mut Self {
        if let Some(column) = self.table.column_mut(column) {
            column.set_cell_alignment(CellAlignment::Right);
        }
        self
    }

    pub fn build(self) -> String {
        self.table.to_string()
    }
}

impl Default for TableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Cell coloured by sentiment: green for good, yellow for middling, red for poor
pub fn tone_cell<S: Into<String>>(text: S, color: Option<Color>) -> Cell {
    let cell = Cell::new(text.into());
    match color {
        Some(color) => cell.fg(color),
        None => cell,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_contains_rows() {
        let mut builder = TableBuilder::with_style(TableStyle::List);
        builder.headers(vec!["Aspect", "Up"]);
        builder.row(vec!["Instructions", "50%"]);
        builder.align_right(1);

        let table = builder.build();
        assert!(table.contains("Aspect"));
        assert!(table.contains("Instructions"));
    }
}
