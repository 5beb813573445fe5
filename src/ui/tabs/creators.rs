//! Creator list tab - shows which VA manages each creator account.

use ratatui::{
    layout::{Constraint, Rect},
    widgets::{Block, Borders, Cell, Row, Table},
    Frame,
};

use crate::app::App;
use crate::ui::styles;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let header = Row::new([Cell::from("Creator"), Cell::from("Managed by")])
        .style(styles::title_style())
        .height(1);

    let rows: Vec<Row> = app
        .data
        .creators
        .iter()
        .enumerate()
        .map(|(i, creator)| {
            let style = if i == app.creator_selection {
                styles::selected_style()
            } else {
                styles::list_item_style()
            };

            let managed_by = creator
                .assigned_va_id
                .map(|id| app.va_name(id))
                .unwrap_or_else(|| "unassigned".to_string());

            Row::new([Cell::from(creator.name.clone()), Cell::from(managed_by)]).style(style)
        })
        .collect();

    let widths = [Constraint::Percentage(50), Constraint::Percentage(50)];

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .title(format!(" Creators ({}) ", app.data.creators.len()))
            .title_style(styles::muted_style())
            .borders(Borders::ALL)
            .border_style(styles::border_style(true)),
    );

    frame.render_widget(table, area);
}
