use crate::model::{row_cells, Customer, TABLE_HEADER};
use crate::widgets::chrome::panel_block;
use ratatui::prelude::*;
use ratatui::widgets::*;

/// Results table for List/Query. The table is fully rebuilt from the
/// result set on every draw; rows are never reused across calls.
pub fn draw_results(
    f: &mut Frame,
    area: Rect,
    results: &[Customer],
    cursor: usize,
    focused: bool,
) {
    let header = Row::new(
        TABLE_HEADER
            .iter()
            .map(|h| Cell::from(*h).style(crate::theme::text_active_bold())),
    )
    .height(1);
    let rows = results
        .iter()
        .map(|c| Row::new(row_cells(c).map(Cell::from)));
    let widths = [
        Constraint::Length(6),
        Constraint::Min(10),
        Constraint::Min(10),
        Constraint::Length(7),
        Constraint::Min(12),
    ];
    let title = format!("Results ({})", results.len());
    let table = Table::new(rows, widths)
        .header(header)
        .block(panel_block(&title, focused))
        .row_highlight_style(crate::theme::list_cursor_style());
    let mut ts = TableState::default();
    if focused && !results.is_empty() {
        ts.select(Some(cursor.min(results.len() - 1)));
    }
    f.render_stateful_widget(table, area, &mut ts);
}

/// Plain-text rendering of the result set for the clipboard.
pub fn copy_text(results: &[Customer]) -> String {
    let mut out = vec![TABLE_HEADER.join("\t")];
    for c in results {
        out.push(row_cells(c).join("\t"));
    }
    out.join("\n")
}
