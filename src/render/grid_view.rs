// Grid View
// Renders the data grid: banded header rows plus demo row data

use ratatui::{
    layout::{Constraint, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::columns::Column;
use crate::core::chooser_config::compiled;
use crate::core::App;
use crate::ui::Styles;

/// Render the grid table
pub fn render_grid(f: &mut Frame, app: &App, area: Rect) {
    let leaves = app.visible_leaf_columns();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Styles::border_unfocused())
        .title(Span::styled(compiled::APP_TITLE, Styles::header()));

    if leaves.is_empty() {
        let empty = Paragraph::new("All columns are hidden").block(block);
        f.render_widget(empty, area);
        return;
    }

    let has_bands = leaves.iter().any(|column| column.owner_band.is_some());

    let header = Row::new(leaves.iter().enumerate().map(|(idx, column)| {
        let caption_style = if idx == app.grid_cursor {
            Styles::column_focused()
        } else {
            Styles::column_header()
        };

        let mut lines = Vec::new();
        if has_bands {
            lines.push(Line::styled(band_caption(app, column), Styles::band_header()));
        }
        lines.push(Line::styled(column.caption.clone(), caption_style));

        Cell::from(Text::from(lines))
    }))
    .height(if has_bands { 2 } else { 1 });

    let rows: Vec<Row> = app
        .rows
        .iter()
        .map(|record| {
            Row::new(leaves.iter().map(|column| {
                let value = column
                    .data_field
                    .as_deref()
                    .and_then(|field| record.get(field))
                    .cloned()
                    .unwrap_or_default();
                Cell::from(value)
            }))
        })
        .collect();

    let widths: Vec<Constraint> = leaves
        .iter()
        .map(|_| Constraint::Ratio(1, leaves.len() as u32))
        .collect();

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .column_spacing(1);
    f.render_widget(table, area);
}

/// Top-level band caption above a leaf column, empty for unbanded columns
fn band_caption(app: &App, column: &Column) -> String {
    let mut owner = column.owner_band;
    let mut caption = String::new();

    while let Some(index) = owner {
        match app.engine.column(index) {
            Some(band) => {
                caption = band.caption.clone();
                owner = band.owner_band;
            }
            None => break,
        }
    }

    caption
}
