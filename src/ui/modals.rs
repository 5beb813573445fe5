//! Modal overlays for the onboarding and offboarding workflows.
//!
//! Each modal shows a read-only summary of the VA being acted on, the
//! form fields with the focused one highlighted, and a submit row that
//! reads "Saving..." while a call is in flight.

use ratatui::{
    layout::Alignment,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::App;
use crate::forms::{OffboardField, OnboardingField, SearchSelect};
use crate::models::Va;
use crate::utils::format_date;

use super::render::centered_rect_fixed;
use super::styles;

/// Rows of select options shown below the filter line
const SELECT_WINDOW: usize = 5;

pub fn render_onboarding_modal(frame: &mut Frame, app: &App) {
    let Some(form) = app.onboarding_form.as_ref() else {
        return;
    };
    let va = app.data.vas.iter().find(|v| v.id == form.va_id);

    let mut lines: Vec<Line> = Vec::new();
    if let Some(va) = va {
        push_summary(&mut lines, va, false);
    }
    lines.push(Line::from(""));

    let focus = form.focus;
    lines.push(checkbox_line(
        "Apple code provided",
        form.apple_code_provided,
        focus == OnboardingField::AppleCode,
    ));
    lines.push(checkbox_line(
        "Proxy configured",
        form.proxy_configured,
        focus == OnboardingField::ProxyConfigured,
    ));
    lines.push(checkbox_line(
        "Training materials provided",
        form.training_materials_provided,
        focus == OnboardingField::Training,
    ));
    lines.push(choice_line(
        "Phone",
        form.phone_type.label(),
        focus == OnboardingField::PhoneType,
    ));

    if form.shows_transfer_section() {
        push_select(
            &mut lines,
            "Transfer phone from",
            &form.transfer_select,
            focus == OnboardingField::PhoneFromVa,
        );
    }

    if form.shows_phone_details() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "  New phone details",
            styles::title_style(),
        )));
        lines.push(text_line("Number*", &form.phone_number, focus == OnboardingField::PhoneNumber));
        lines.push(text_line(
            "Handout date",
            &form.handout_date,
            focus == OnboardingField::HandoutDate,
        ));
        lines.push(text_line(
            "Apple ID email",
            &form.apple_id_email,
            focus == OnboardingField::AppleIdEmail,
        ));
        lines.push(masked_line(
            "Apple ID password",
            &form.apple_id_password,
            focus == OnboardingField::AppleIdPassword,
        ));
        lines.push(text_line("Proxy IP", &form.proxy_ip, focus == OnboardingField::ProxyIp));
        lines.push(text_line("Proxy port", &form.proxy_port, focus == OnboardingField::ProxyPort));
        lines.push(text_line(
            "Proxy username",
            &form.proxy_username,
            focus == OnboardingField::ProxyUsername,
        ));
        lines.push(masked_line(
            "Proxy password",
            &form.proxy_password,
            focus == OnboardingField::ProxyPassword,
        ));
        lines.push(text_line("Notes", &form.phone_notes, focus == OnboardingField::PhoneNotes));
    }

    lines.push(Line::from(""));
    lines.push(submit_line(app, focus == OnboardingField::Submit));

    render_modal_frame(frame, " Complete Onboarding ", lines);
}

pub fn render_offboard_modal(frame: &mut Frame, app: &App) {
    let Some(form) = app.offboard_form.as_ref() else {
        return;
    };
    let va = app.data.vas.iter().find(|v| v.id == form.va_id);

    let mut lines: Vec<Line> = Vec::new();
    if let Some(va) = va {
        push_summary(&mut lines, va, true);
    }
    lines.push(Line::from(""));

    let focus = form.focus;
    lines.push(text_line("Reason*", &form.reason, focus == OffboardField::Reason));
    lines.push(text_line(
        "Details",
        &form.reason_details,
        focus == OffboardField::ReasonDetails,
    ));
    lines.push(text_line(
        "Final payment",
        &form.final_payment,
        focus == OffboardField::FinalPayment,
    ));
    lines.push(choice_line(
        "Phone",
        form.phone_handling.label(),
        focus == OffboardField::PhoneHandling,
    ));

    if form.shows_transfer_section() {
        push_select(
            &mut lines,
            "Transfer phone to",
            &form.transfer_select,
            focus == OffboardField::TransferTo,
        );
    }

    lines.push(text_line("Notes", &form.notes, focus == OffboardField::Notes));
    lines.push(text_line(
        "Offboarded by",
        &form.offboarded_by,
        focus == OffboardField::OffboardedBy,
    ));

    lines.push(Line::from(""));
    lines.push(submit_line(app, focus == OffboardField::Submit));

    render_modal_frame(frame, " Offboard VA ", lines);
}

fn render_modal_frame(frame: &mut Frame, title: &str, lines: Vec<Line>) {
    let height = (lines.len() as u16).saturating_add(2);
    let area = centered_rect_fixed(60, height, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(title)
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(true));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn push_summary(lines: &mut Vec<Line>, va: &Va, include_status: bool) {
    lines.push(Line::from(vec![
        Span::styled("  Name:     ", styles::muted_style()),
        Span::styled(va.full_name.clone(), styles::highlight_style()),
    ]));
    lines.push(Line::from(vec![
        Span::styled("  Telegram: ", styles::muted_style()),
        Span::raw(format!("@{}", va.telegram_handle)),
    ]));
    lines.push(Line::from(vec![
        Span::styled("  Type:     ", styles::muted_style()),
        Span::raw(va.va_type.clone()),
    ]));
    if let Some(date) = va.onboarding_date {
        lines.push(Line::from(vec![
            Span::styled("  Started:  ", styles::muted_style()),
            Span::raw(format_date(&date.to_string())),
        ]));
    }
    if include_status {
        lines.push(Line::from(vec![
            Span::styled("  Status:   ", styles::muted_style()),
            Span::raw(va.status.to_string()),
        ]));
    }
}

fn checkbox_line(label: &str, checked: bool, focused: bool) -> Line<'static> {
    let mark = if checked { "[x]" } else { "[ ]" };
    Line::from(Span::styled(
        format!("  {} {}", mark, label),
        styles::field_style(focused),
    ))
}

fn choice_line(label: &str, value: &str, focused: bool) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {}: ", label), styles::muted_style()),
        Span::styled(format!("< {} >", value), styles::field_style(focused)),
    ])
}

fn text_line(label: &str, value: &str, focused: bool) -> Line<'static> {
    let shown = if focused {
        format!("{}_", value)
    } else {
        value.to_string()
    };
    Line::from(vec![
        Span::styled(format!("  {:<18}", label), styles::muted_style()),
        Span::styled(shown, styles::field_style(focused)),
    ])
}

fn masked_line(label: &str, value: &str, focused: bool) -> Line<'static> {
    let masked = "*".repeat(value.chars().count());
    text_line(label, &masked, focused)
}

fn push_select(lines: &mut Vec<Line>, label: &str, select: &SearchSelect, focused: bool) {
    let chosen = select.selected_label().unwrap_or("-");
    lines.push(Line::from(vec![
        Span::styled(format!("  {}: ", label), styles::muted_style()),
        Span::styled(chosen.to_string(), styles::field_style(focused)),
    ]));

    // Filter line and candidate window only while the select has focus
    if focused {
        lines.push(Line::from(vec![
            Span::styled("    search: ", styles::muted_style()),
            Span::styled(format!("{}_", select.query), styles::search_style()),
        ]));

        let visible = select.visible_options();
        let cursor = select.cursor();
        let start = cursor.saturating_sub(SELECT_WINDOW - 1);
        for (i, option) in visible.iter().enumerate().skip(start).take(SELECT_WINDOW) {
            let style = if i == cursor {
                styles::selected_style()
            } else if option.label.ends_with("(Archived)") {
                styles::archived_style()
            } else {
                styles::list_item_style()
            };
            lines.push(Line::from(Span::styled(
                format!("    {}", option.label),
                style,
            )));
        }
    }
}

fn submit_line(app: &App, focused: bool) -> Line<'static> {
    let label = if app.submit_in_flight {
        "  Saving..."
    } else {
        "  [ Submit ]"
    };
    let style = if app.submit_in_flight {
        styles::muted_style()
    } else {
        styles::field_style(focused)
    };
    Line::from(Span::styled(label.to_string(), style)).alignment(Alignment::Left)
}
