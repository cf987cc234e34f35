//! Confirmation view shown after a submission is delivered

use crate::app::App;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let Some(receipt) = app.state.receipt.as_ref() else {
        return;
    };

    // Center a fixed-height card
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(12),
            Constraint::Min(0),
        ])
        .split(area);
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(64),
            Constraint::Min(0),
        ])
        .split(rows[1]);

    let label = Style::default().fg(Color::DarkGray);
    let entry = |name: &'static str, value: String| {
        Line::from(vec![Span::styled(format!("{name:<20}"), label), Span::raw(value)])
    };

    let lines = vec![
        entry("Identificador", receipt.id.to_string()),
        entry(
            "Fecha de envío",
            receipt.submitted_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        ),
        entry("Solicitante", receipt.requester_name.clone()),
        entry("Título", receipt.request_title.clone()),
        entry("Archivos adjuntos", receipt.attachment_count.to_string()),
        entry("Entregada a", receipt.sink.to_string()),
        Line::from(""),
        Line::from(vec![
            Span::raw("Presione "),
            Span::styled(
                "Enter",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" para registrar otra solicitud"),
        ]),
    ];

    let block = Block::default()
        .title(" Solicitud enviada ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));
    frame.render_widget(Paragraph::new(lines).block(block), columns[1]);
}
