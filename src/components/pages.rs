// ABOUTME: Form page rendering - one field list per wizard step, plus the
// request summary shown on the review page

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::app::state::AppState;
use crate::schema::{options, FieldId, FieldKind, FormValues};
use crate::wizard::{self, WizardStep};

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    if state.controller.step() == WizardStep::Review {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(area);
        render_fields(frame, chunks[0], state);
        render_summary(frame, chunks[1], state);
    } else {
        render_fields(frame, area, state);
    }
}

fn render_fields(frame: &mut Frame, area: Rect, state: &AppState) {
    let fields = state.visible_fields();
    let mut lines: Vec<Line> = Vec::new();

    if fields.is_empty() {
        lines.push(Line::from(Span::styled(
            "Billing is on file for this client - nothing to fill here.",
            Style::default().fg(Color::Gray),
        )));
    }

    for (index, field) in fields.iter().enumerate() {
        let selected = index == state.selected_field;
        lines.push(field_line(*field, selected, state));
        if let Some(message) = state
            .validation
            .as_ref()
            .and_then(|errors| errors.message_for(*field))
        {
            lines.push(Line::from(Span::styled(
                format!("    ⚠ {}", message),
                Style::default().fg(Color::Red),
            )));
        }
        if selected {
            if let Some(hint) = suggestion_hint(*field) {
                lines.push(Line::from(Span::styled(
                    format!("    {}", hint),
                    Style::default().fg(Color::DarkGray),
                )));
            }
        }
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", state.controller.step().title()))
        .border_style(Style::default().fg(Color::DarkGray));

    frame.render_widget(Paragraph::new(lines).block(block).wrap(Wrap { trim: false }), area);
}

fn field_line(field: FieldId, selected: bool, state: &AppState) -> Line<'static> {
    let label_style = if selected {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };

    let raw_value = if selected && state.selected_field_is_text() {
        state.edit_buffer.clone()
    } else {
        state.controller.values().get(field).display()
    };

    let value = match field.kind() {
        FieldKind::Service => {
            let label = state.controller.values().service_type.label().to_string();
            if selected {
                format!("◄ {} ►", label)
            } else {
                label
            }
        }
        FieldKind::Flag => format!("[{}]", raw_value),
        _ => raw_value,
    };

    let marker = if selected { "▸ " } else { "  " };
    let cursor = if selected && state.selected_field_is_text() { "▏" } else { "" };

    Line::from(vec![
        Span::styled(format!("{}{:<28}", marker, field.label()), label_style),
        Span::styled(format!("{}{}", value, cursor), Style::default().fg(Color::White)),
    ])
}

/// Review summary. Fields whose conditional section does not apply are
/// omitted even when they still hold stale values.
fn render_summary(frame: &mut Frame, area: Rect, state: &AppState) {
    let values = state.controller.values();
    let mut lines: Vec<Line> = Vec::new();

    section(&mut lines, "Organization");
    entry(&mut lines, "Organization", &values.org_name);
    entry(&mut lines, "Requestor", &values.requestor_name);
    if values.has_account {
        entry(&mut lines, "Client ID", &values.client_id);
    }

    section(&mut lines, "Service");
    entry(&mut lines, "Type", values.service_type.label());
    entry(&mut lines, "Languages", &values.languages.join(", "));
    if wizard::vri_section_visible(values) {
        let link = if values.vri_rlc_provides_link {
            "Provided by us".to_string()
        } else if values.vri_link.is_empty() {
            String::new()
        } else {
            values.vri_link.clone()
        };
        entry(&mut lines, "Video link", &link);
    }

    section(&mut lines, "Appointment");
    entry(&mut lines, "Date", &values.date);
    entry(&mut lines, "Time", &appointment_time(values));
    entry(&mut lines, "Duration", &values.duration);
    entry(&mut lines, "Address", &values.address);

    section(&mut lines, "Contacts");
    entry(&mut lines, "Point of contact", &values.point_of_contact);
    entry(&mut lines, "Provider", &values.provider_name);
    entry(&mut lines, "Comments", &values.comments);

    lines.push(Line::default());
    if state.controller.can_submit() {
        lines.push(Line::from(Span::styled(
            "Press Enter to submit this request",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Your request ")
        .border_style(Style::default().fg(Color::DarkGray));

    frame.render_widget(Paragraph::new(lines).block(block).wrap(Wrap { trim: true }), area);
}

/// Option hints for fields that have a canonical value list. Free text is
/// still accepted everywhere.
fn suggestion_hint(field: FieldId) -> Option<String> {
    match field {
        FieldId::Timezone => Some(
            options::TIMEZONE_OPTIONS
                .iter()
                .map(|(value, _)| *value)
                .collect::<Vec<_>>()
                .join("  "),
        ),
        FieldId::Duration => Some(
            options::DURATION_OPTIONS
                .iter()
                .map(|(value, _)| *value)
                .collect::<Vec<_>>()
                .join("  "),
        ),
        FieldId::Preference => Some(
            options::PREFERENCE_OPTIONS
                .iter()
                .map(|(value, _)| *value)
                .collect::<Vec<_>>()
                .join("  "),
        ),
        FieldId::Languages => Some(format!(
            "e.g. {}",
            options::LANGUAGE_SUGGESTIONS[..4].join(", ")
        )),
        _ => None,
    }
}

fn appointment_time(values: &FormValues) -> String {
    match (values.time.is_empty(), values.timezone.is_empty()) {
        (true, _) => String::new(),
        (false, true) => values.time.clone(),
        (false, false) => format!("{} {}", values.time, values.timezone),
    }
}

fn section(lines: &mut Vec<Line<'static>>, title: &'static str) {
    if !lines.is_empty() {
        lines.push(Line::default());
    }
    lines.push(Line::from(Span::styled(
        title,
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    )));
}

fn entry(lines: &mut Vec<Line<'static>>, label: &'static str, value: &str) {
    let display = if value.trim().is_empty() { "—" } else { value };
    lines.push(Line::from(vec![
        Span::styled(format!("  {:<18}", label), Style::default().fg(Color::Gray)),
        Span::styled(display.to_string(), Style::default().fg(Color::White)),
    ]));
}
