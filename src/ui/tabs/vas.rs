//! VA roster tab - table of active VAs with a detail pane.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::app::App;
use crate::ui::styles;
use crate::utils::format_date;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    render_table(frame, app, chunks[0]);
    render_detail(frame, app, chunks[1]);
}

fn render_table(frame: &mut Frame, app: &App, area: Rect) {
    let vas = app.filtered_vas();

    let header = Row::new([
        Cell::from("Name"),
        Cell::from("Telegram"),
        Cell::from("Type"),
        Cell::from("Started"),
    ])
    .style(styles::title_style())
    .height(1);

    let rows: Vec<Row> = vas
        .iter()
        .enumerate()
        .map(|(i, va)| {
            let style = if i == app.va_selection {
                styles::selected_style()
            } else {
                styles::list_item_style()
            };

            let started = va
                .onboarding_date
                .map(|d| d.format("%b %d, %Y").to_string())
                .unwrap_or_else(|| "-".to_string());

            Row::new([
                Cell::from(va.full_name.clone()),
                Cell::from(format!("@{}", va.telegram_handle)),
                Cell::from(va.va_type.clone()),
                Cell::from(started),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Percentage(35),
        Constraint::Fill(2),
        Constraint::Fill(1),
        Constraint::Length(13),
    ];

    let title = if app.search_query.is_empty() {
        format!(" VAs ({}) ", vas.len())
    } else {
        format!(" VAs ({}) - filter: {} ", vas.len(), app.search_query)
    };

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .title(title)
            .title_style(styles::muted_style())
            .borders(Borders::ALL)
            .border_style(styles::border_style(true)),
    );

    frame.render_widget(table, area);
}

fn render_detail(frame: &mut Frame, app: &App, area: Rect) {
    let mut lines: Vec<Line> = Vec::new();

    if let Some(va) = app.selected_va() {
        lines.push(Line::from(vec![
            Span::styled("Name:     ", styles::muted_style()),
            Span::styled(va.full_name.clone(), styles::highlight_style()),
        ]));
        lines.push(Line::from(vec![
            Span::styled("Telegram: ", styles::muted_style()),
            Span::raw(format!("@{}", va.telegram_handle)),
        ]));
        lines.push(Line::from(vec![
            Span::styled("Type:     ", styles::muted_style()),
            Span::raw(va.va_type.clone()),
        ]));
        lines.push(Line::from(vec![
            Span::styled("Status:   ", styles::muted_style()),
            Span::raw(va.status.to_string()),
        ]));
        if let Some(date) = va.onboarding_date {
            lines.push(Line::from(vec![
                Span::styled("Started:  ", styles::muted_style()),
                Span::raw(format_date(&date.to_string())),
            ]));
        }

        // Assigned resources from the other cached lists
        let phones: Vec<String> = app
            .data
            .phones
            .iter()
            .filter(|p| p.assigned_to_va_id == Some(va.id))
            .map(|p| crate::utils::format_phone(&p.phone_number))
            .collect();
        if !phones.is_empty() {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled("Phones", styles::title_style())));
            for number in phones {
                lines.push(Line::from(format!("  {}", number)));
            }
        }

        let creators: Vec<&str> = app
            .data
            .creators
            .iter()
            .filter(|c| c.assigned_va_id == Some(va.id))
            .map(|c| c.name.as_str())
            .collect();
        if !creators.is_empty() {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled("Creators", styles::title_style())));
            for name in creators {
                lines.push(Line::from(format!("  {}", name)));
            }
        }

        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("[o]", styles::help_key_style()),
            Span::raw(" complete onboarding  "),
            Span::styled("[x]", styles::help_key_style()),
            Span::raw(" offboard"),
        ]));
    } else {
        lines.push(Line::from(Span::styled(
            "No VA selected",
            styles::muted_style(),
        )));
    }

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .title(" Detail ")
            .title_style(styles::muted_style())
            .borders(Borders::ALL)
            .border_style(styles::border_style(false)),
    );

    frame.render_widget(paragraph, area);
}
