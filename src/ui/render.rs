use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::{App, AppState, Tab};

use super::modals;
use super::styles;
use super::tabs::{creators, phones, vas};

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Length(3), // Tabs
            Constraint::Min(10),   // Main content
            Constraint::Length(2), // Status bar
        ])
        .split(frame.area());

    render_title_bar(frame, app, chunks[0]);
    render_tabs(frame, app, chunks[1]);
    render_main_content(frame, app, chunks[2]);
    render_status_bar(frame, app, chunks[3]);

    // Render overlays
    match app.state {
        AppState::Onboarding => modals::render_onboarding_modal(frame, app),
        AppState::Offboarding => modals::render_offboard_modal(frame, app),
        AppState::ShowingHelp => render_help_overlay(frame),
        AppState::ConfirmingQuit => render_quit_overlay(frame),
        _ => {}
    }
}

fn render_title_bar(frame: &mut Frame, _app: &App, area: Rect) {
    let title = "  VA Ops";
    let help_hint = "[?] Help";

    let title_line = Line::from(vec![
        Span::styled(title, styles::title_style()),
        Span::raw(" ".repeat(
            area.width
                .saturating_sub(title.len() as u16 + help_hint.len() as u16 + 4)
                as usize,
        )),
        Span::styled(help_hint, styles::muted_style()),
    ]);

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::muted_style());

    frame.render_widget(Paragraph::new(title_line).block(block), area);
}

fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let tabs = [
        ("[1] VAs", Tab::Vas),
        ("[2] Phones", Tab::Phones),
        ("[3] Creators", Tab::Creators),
    ];

    let mut spans = vec![Span::raw(" ")];
    for (i, (label, tab)) in tabs.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" | ", styles::muted_style()));
        }
        if app.current_tab == *tab {
            spans.push(Span::styled(*label, styles::tab_style(true)));
        } else {
            spans.push(Span::styled(*label, styles::muted_style()));
        }
    }

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::muted_style());

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn render_main_content(frame: &mut Frame, app: &App, area: Rect) {
    match app.current_tab {
        Tab::Vas => vas::render(frame, app, area),
        Tab::Phones => phones::render(frame, app, area),
        Tab::Creators => creators::render(frame, app, area),
    }
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let left = if matches!(app.state, AppState::Searching) {
        Line::from(vec![
            Span::styled(" /", styles::search_style()),
            Span::styled(app.search_query.clone(), styles::search_style()),
            Span::raw("_"),
        ])
    } else if let Some(ref toast) = app.toast {
        Line::from(Span::styled(
            format!(" {} ", toast.text),
            styles::toast_style(toast.kind),
        ))
    } else {
        Line::from(Span::raw(format!(
            " {} VAs | {} phones | {} creators ",
            app.data.vas.len(),
            app.data.phones.len(),
            app.data.creators.len()
        )))
    };

    let shortcuts = "[/] filter | [u]pdate | [q]uit ";
    let left_width: usize = left.spans.iter().map(|s| s.content.len()).sum();
    let padding = (area.width as usize).saturating_sub(left_width + shortcuts.len());

    let mut spans = left.spans;
    spans.push(Span::raw(" ".repeat(padding)));
    spans.push(Span::styled(shortcuts, styles::muted_style()));

    let paragraph = Paragraph::new(Line::from(spans)).style(styles::status_bar_style());
    frame.render_widget(paragraph, area);
}

fn render_help_overlay(frame: &mut Frame) {
    let area = centered_rect_fixed(52, 16, frame.area());
    frame.render_widget(Clear, area);

    let entries: [(&str, &str); 10] = [
        ("1/2/3", "Switch tab"),
        ("j/k, arrows", "Move selection"),
        ("/", "Filter the VA roster"),
        ("o", "Complete onboarding for selected VA"),
        ("x", "Offboard selected VA"),
        ("u", "Reload lists from the backend"),
        ("Tab / Shift-Tab", "Next / previous form field"),
        ("Space", "Toggle checkbox / cycle choice"),
        ("Esc", "Close modal or overlay"),
        ("q", "Quit"),
    ];

    let mut lines = vec![Line::from(""), Line::from("")];
    for (key, desc) in entries {
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled(format!("{:<16}", key), styles::help_key_style()),
            Span::styled(desc, styles::help_desc_style()),
        ]));
    }

    let block = Block::default()
        .title(" Help ")
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(true));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_quit_overlay(frame: &mut Frame) {
    let area = centered_rect_fixed(34, 5, frame.area());
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::raw("  Quit VA Ops? [y/n]")),
    ];

    let block = Block::default()
        .title(" Confirm ")
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(true));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Centered rect with a fixed size, clamped to the frame
pub fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
