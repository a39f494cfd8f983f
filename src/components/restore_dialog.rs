// ABOUTME: Restore-draft dialog shown at startup when a saved draft exists

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::app::state::AppState;

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let Some(dialog) = &state.restore_dialog else {
        return;
    };

    let dialog_width = 54.min(area.width.saturating_sub(4));
    let dialog_height = 8;
    let dialog_area = Rect {
        x: (area.width.saturating_sub(dialog_width)) / 2,
        y: (area.height.saturating_sub(dialog_height)) / 2,
        width: dialog_width,
        height: dialog_height,
    };

    // Clear only the dialog area so the form stays visible behind it
    frame.render_widget(Clear, dialog_area);

    let block = Block::default()
        .title(" Saved draft found ")
        .borders(Borders::ALL)
        .style(Style::default().bg(Color::Black));
    frame.render_widget(block, dialog_area);

    let inner = Rect {
        x: dialog_area.x + 1,
        y: dialog_area.y + 1,
        width: dialog_area.width - 2,
        height: dialog_area.height - 2,
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(2)])
        .split(inner);

    let message = Paragraph::new(
        "You have an unfinished quote request. Resume where you left off, or start fresh and discard it?",
    )
    .wrap(Wrap { trim: true })
    .style(Style::default().fg(Color::White));
    frame.render_widget(message, chunks[0]);

    let buttons = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);

    let selected = Style::default().fg(Color::Black).bg(Color::White);
    let unselected = Style::default().fg(Color::White);

    let resume = Paragraph::new("Resume")
        .style(if dialog.selected_option { selected } else { unselected })
        .alignment(Alignment::Center);
    frame.render_widget(resume, buttons[0]);

    let fresh = Paragraph::new("Start fresh")
        .style(if dialog.selected_option { unselected } else { selected })
        .alignment(Alignment::Center);
    frame.render_widget(fresh, buttons[1]);
}
