// ABOUTME: Horizontal step indicator showing wizard progress

use ratatui::{prelude::*, widgets::Paragraph};

use crate::wizard::WizardStep;

pub fn render(frame: &mut Frame, area: Rect, current: WizardStep) {
    let mut spans = Vec::new();

    for step in WizardStep::all() {
        let is_current = *step == current;
        let done = step.number() < current.number();

        let marker = if done { "✓".to_string() } else { step.number().to_string() };
        let style = if is_current {
            Style::default().fg(Color::Black).bg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else if done {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        spans.push(Span::styled(format!(" {} {} ", marker, step.title()), style));
        if !step.is_final() {
            spans.push(Span::styled(" → ", Style::default().fg(Color::DarkGray)));
        }
    }

    let lines = vec![
        Line::from(spans),
        Line::from(Span::styled(
            current.description(),
            Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC),
        )),
    ];

    frame.render_widget(Paragraph::new(lines), area);
}
