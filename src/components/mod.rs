// ABOUTME: TUI components for quoteflow - layout shell plus the pieces it
// composes: step indicator, form pages, assist panel, restore dialog

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

pub mod assist_panel;
pub mod pages;
pub mod restore_dialog;
pub mod step_indicator;

use crate::app::state::{AppState, NoticeLevel};

pub struct LayoutComponent;

impl LayoutComponent {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, state: &mut AppState) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4), // Title + step indicator
                Constraint::Min(6),    // Page body
                Constraint::Length(2), // Key hints
                Constraint::Length(1), // Status line
            ])
            .split(frame.size());

        self.render_header(frame, chunks[0], state);

        if state.controller.assist_mode() {
            assist_panel::render(frame, chunks[1], state);
        } else {
            pages::render(frame, chunks[1], state);
        }

        self.render_hints(frame, chunks[2], state);
        self.render_status(frame, chunks[3], state);

        restore_dialog::render(frame, frame.size(), state);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Length(3)])
            .split(area);

        let title = Paragraph::new(Line::from(vec![
            Span::styled(
                " QuoteFlow ",
                Style::default().fg(Color::Black).bg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::raw(" Request an interpretation quote"),
        ]));
        frame.render_widget(title, chunks[0]);

        // The stepper is hidden while the assist panel replaces the form
        if !state.controller.assist_mode() {
            step_indicator::render(frame, chunks[1], state.controller.step());
        }
    }

    fn render_hints(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let hints = if state.restore_dialog.is_some() {
            "←/→ choose   Enter confirm   Esc keep draft but start fresh"
        } else if state.controller.assist_mode() {
            "Type or paste details   Enter parse   Esc back to the form"
        } else if state.controller.can_submit() {
            "Enter submit   ^B back   ^S save draft   ^E AI fill   ^R reset   Esc quit"
        } else {
            "Tab/↑↓ fields   ^N/^B pages   ^S save draft   ^E AI fill   ^R reset   Esc quit"
        };

        let bar = Paragraph::new(hints).style(Style::default().fg(Color::DarkGray)).block(
            Block::default().borders(Borders::TOP).border_style(Style::default().fg(Color::DarkGray)),
        );
        frame.render_widget(bar, area);
    }

    fn render_status(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let (text, style) = if state.is_parsing {
            (
                "Parsing with AI assist...".to_string(),
                Style::default().fg(Color::Yellow),
            )
        } else if state.is_submitting {
            (
                "Submitting request...".to_string(),
                Style::default().fg(Color::Yellow),
            )
        } else if let Some(notification) = &state.notification {
            let color = match notification.level {
                NoticeLevel::Success => Color::Green,
                NoticeLevel::Error => Color::Red,
                NoticeLevel::Info => Color::Cyan,
            };
            (notification.text.clone(), Style::default().fg(color))
        } else if let Some(receipt) = &state.last_receipt {
            (
                format!("Last request submitted, reference {}", receipt.reference),
                Style::default().fg(Color::DarkGray),
            )
        } else if state.controller.has_saved_draft() {
            (
                "Draft saved locally".to_string(),
                Style::default().fg(Color::DarkGray),
            )
        } else {
            (String::new(), Style::default())
        };

        frame.render_widget(Paragraph::new(text).style(style), area);
    }
}

impl Default for LayoutComponent {
    fn default() -> Self {
        Self::new()
    }
}
