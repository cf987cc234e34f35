//! Layout components (header, status bar)

use crate::app::App;
use crate::platform::{RESET_SHORTCUT, SUBMIT_SHORTCUT};
use crate::state::{FieldKind, IntakeForm, View};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const TITLE: &str = "Formulario de Requerimientos Técnicos - Datos Abiertos";
const QUIT_HINT: &str = " ^C:salir ";

/// Split the screen into header and content, reserving the bottom line for the status bar
pub fn create_layout(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    (chunks[0], chunks[1])
}

pub fn draw_header(frame: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(Span::styled(
        TITLE,
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(header, area);
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let status_area = Rect {
        x: 0,
        y: area.height.saturating_sub(1),
        width: area.width,
        height: 1,
    };

    let mut spans = vec![Span::styled(
        format!(" {}", view_hints(&app.state.current_view, &app.state.form)),
        Style::default().fg(Color::Gray),
    )];

    if let Some(msg) = &app.status_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg, Style::default().fg(Color::Green)));
    }

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, status_area);

    // Quit hint on the right
    let quit_width = QUIT_HINT.len() as u16;
    let quit_area = Rect {
        x: area.width.saturating_sub(quit_width),
        y: area.height.saturating_sub(1),
        width: quit_width.min(area.width),
        height: 1,
    };
    let quit_widget =
        Paragraph::new(QUIT_HINT).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit_widget, quit_area);
}

/// Keyboard hints for the current view and focus
fn view_hints(view: &View, form: &IntakeForm) -> String {
    match view {
        View::Receipt => "Enter/n:nueva solicitud  q:salir".to_string(),
        View::Form if form.is_actions_focused() => {
            "↑/↓:botón  Enter:ejecutar  Tab:formulario".to_string()
        }
        View::Form => {
            let focus_hint = match form.active_kind() {
                Some(FieldKind::Files) => "Enter:adjuntar  ↑/↓:lista  Supr:quitar",
                Some(FieldKind::MultiSelect) => "←/→:opción  Espacio:marcar",
                Some(FieldKind::YesNo) => "s/n  ←/→:opción",
                Some(kind) if kind.has_options() => "←/→:opción",
                Some(FieldKind::Multiline) => "Enter:nueva línea",
                _ => "Enter:siguiente",
            };
            format!(
                "Tab:siguiente  {focus_hint}  {SUBMIT_SHORTCUT}:enviar  {RESET_SHORTCUT}:limpiar  Esc:acciones"
            )
        }
    }
}
