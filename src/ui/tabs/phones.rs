//! Phone inventory tab.

use ratatui::{
    layout::{Constraint, Rect},
    widgets::{Block, Borders, Cell, Row, Table},
    Frame,
};

use crate::app::App;
use crate::ui::styles;
use crate::utils::{format_phone, truncate_string};

/// Notes longer than this are truncated in the table cell
const NOTES_MAX_LEN: usize = 40;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let header = Row::new([
        Cell::from("Number"),
        Cell::from("Assigned to"),
        Cell::from("Apple ID"),
        Cell::from("Proxy"),
        Cell::from("Notes"),
    ])
    .style(styles::title_style())
    .height(1);

    let rows: Vec<Row> = app
        .data
        .phones
        .iter()
        .enumerate()
        .map(|(i, phone)| {
            let style = if i == app.phone_selection {
                styles::selected_style()
            } else {
                styles::list_item_style()
            };

            let assigned = phone
                .assigned_to_va_id
                .map(|id| app.va_name(id))
                .unwrap_or_else(|| "unassigned".to_string());

            let proxy = match (&phone.proxy_ip, phone.proxy_port) {
                (Some(ip), Some(port)) => format!("{}:{}", ip, port),
                (Some(ip), None) => ip.clone(),
                _ => "-".to_string(),
            };

            Row::new([
                Cell::from(format_phone(&phone.phone_number)),
                Cell::from(assigned),
                Cell::from(phone.apple_id_email.clone().unwrap_or_else(|| "-".to_string())),
                Cell::from(proxy),
                Cell::from(truncate_string(
                    phone.notes.as_deref().unwrap_or_default(),
                    NOTES_MAX_LEN,
                )),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(16),
        Constraint::Percentage(25),
        Constraint::Fill(2),
        Constraint::Fill(2),
        Constraint::Fill(3),
    ];

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .title(format!(" Phones ({}) ", app.data.phones.len()))
            .title_style(styles::muted_style())
            .borders(Borders::ALL)
            .border_style(styles::border_style(true)),
    );

    frame.render_widget(table, area);
}
