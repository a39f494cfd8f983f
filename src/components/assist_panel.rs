// ABOUTME: AI assist panel - free-text input that replaces the stepped form
// while assist mode is on

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::app::state::AppState;

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Instructions
            Constraint::Min(5),    // Input
            Constraint::Length(2), // Error banner
        ])
        .split(area);

    let instructions = Paragraph::new(vec![
        Line::from(Span::styled(
            "✨ AI Assisted Form Fill",
            Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
        )),
        Line::from("Paste the appointment details and the assistant will fill the form."),
        Line::from(Span::styled(
            "Do not include PHI such as patient names, dates of birth, or MRNs.",
            Style::default().fg(Color::Yellow),
        )),
    ])
    .wrap(Wrap { trim: true });
    frame.render_widget(instructions, chunks[0]);

    let input_style = if state.is_parsing {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::White)
    };
    let input = Paragraph::new(format!("{}▏", state.assist_input))
        .style(input_style)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Details to parse ")
                .border_style(Style::default().fg(Color::Magenta)),
        );
    frame.render_widget(input, chunks[1]);

    if let Some(error) = &state.assist_error {
        let banner = Paragraph::new(error.as_str())
            .style(Style::default().fg(Color::Red))
            .wrap(Wrap { trim: true });
        frame.render_widget(banner, chunks[2]);
    }
}
