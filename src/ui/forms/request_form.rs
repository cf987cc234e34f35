//! Request form rendering: numbered sections, scrolling and the action panel

use super::field_renderer::{draw_field, field_height, NESTED_INDENT};
use crate::app::App;
use crate::request::Field;
use crate::state::{FormAction, FormField, FormFocus, IntakeForm, Section};
use crate::ui::components::{render_action_button, BUTTON_HEIGHT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Blank rows above a section heading (except the first)
const SECTION_GAP: u16 = 1;

/// A block of the form in virtual (unscrolled) coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RowContent {
    Heading(&'static str),
    Field(Field),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Row {
    content: RowContent,
    y: u16,
    height: u16,
}

/// Lay out headings and visible fields top to bottom
fn layout_rows(form: &IntakeForm) -> Vec<Row> {
    let mut rows = Vec::new();
    let mut y: u16 = 0;
    let mut section: Option<Section> = None;

    for field in form.focusable_fields() {
        let descriptor = FormField::for_field(field);
        if section != Some(descriptor.section) {
            section = Some(descriptor.section);
            if let Some(title) = descriptor.section.title() {
                if !rows.is_empty() {
                    y = y.saturating_add(SECTION_GAP);
                }
                rows.push(Row {
                    content: RowContent::Heading(title),
                    y,
                    height: 1,
                });
                y = y.saturating_add(1);
            } else if !rows.is_empty() {
                y = y.saturating_add(SECTION_GAP);
            }
        }

        let height = field_height(&descriptor, form);
        rows.push(Row {
            content: RowContent::Field(field),
            y,
            height,
        });
        y = y.saturating_add(height);
    }
    rows
}

/// First virtual row shown, chosen so the focused field is fully visible.
/// A section heading directly above the focused field is kept in view too.
fn scroll_offset(rows: &[Row], focus: FormFocus, viewport: u16) -> u16 {
    let total = rows.last().map(|r| r.y.saturating_add(r.height)).unwrap_or(0);
    let max_offset = total.saturating_sub(viewport);

    let FormFocus::Field(field) = focus else {
        return max_offset;
    };
    let Some(index) = rows
        .iter()
        .position(|r| r.content == RowContent::Field(field))
    else {
        return 0;
    };

    let target = rows[index];
    let top = match index.checked_sub(1).map(|i| rows[i]) {
        Some(Row {
            content: RowContent::Heading(_),
            y,
            ..
        }) => y,
        _ => target.y,
    };
    let bottom = target.y.saturating_add(target.height);

    if bottom <= viewport {
        0
    } else {
        (bottom - viewport).min(top).min(max_offset)
    }
}

/// Draw the request form with its action panel
pub fn draw_request_form(frame: &mut Frame, area: Rect, app: &App) {
    // Split into form (left) and action panel (right)
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(40),    // Form area
            Constraint::Length(22), // Action panel
        ])
        .split(area);

    draw_fields(frame, chunks[0], &app.state.form);
    draw_action_panel(frame, chunks[1], &app.state.form);
}

fn draw_fields(frame: &mut Frame, area: Rect, form: &IntakeForm) {
    let border_color = if form.is_actions_focused() {
        Color::DarkGray
    } else {
        Color::Cyan
    };
    let block = Block::default()
        .title(" Solicitud ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let viewport = Rect {
        x: inner.x + 1,
        width: inner.width.saturating_sub(2),
        ..inner
    };
    let rows = layout_rows(form);
    let offset = scroll_offset(&rows, form.focus, viewport.height);

    for row in rows {
        let Some(y) = row.y.checked_sub(offset) else {
            continue;
        };
        let room = viewport.height.saturating_sub(y);
        // Rows taller than the whole viewport are clipped, the rest must fit
        let height = if row.height > viewport.height {
            room
        } else {
            row.height
        };
        if height == 0 || height > room {
            break;
        }
        let row_area = Rect {
            y: viewport.y + y,
            height,
            ..viewport
        };

        match row.content {
            RowContent::Heading(title) => {
                let heading = Paragraph::new(Line::from(Span::styled(
                    title,
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                )));
                frame.render_widget(heading, row_area);
            }
            RowContent::Field(field) => {
                let descriptor = FormField::for_field(field);
                let field_area = if descriptor.is_nested() {
                    Rect {
                        x: row_area.x + NESTED_INDENT,
                        width: row_area.width.saturating_sub(NESTED_INDENT),
                        ..row_area
                    }
                } else {
                    row_area
                };
                draw_field(frame, field_area, &descriptor, form);
            }
        }
    }
}

fn draw_action_panel(frame: &mut Frame, area: Rect, form: &IntakeForm) {
    let is_focused = form.is_actions_focused();
    let border_color = if is_focused {
        Color::Cyan
    } else {
        Color::DarkGray
    };

    let block = Block::default()
        .title(" Acciones ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(BUTTON_HEIGHT), // Enviar
            Constraint::Length(BUTTON_HEIGHT), // Limpiar
            Constraint::Length(1),
            Constraint::Min(0), // Error summary
        ])
        .split(inner);

    for (i, action) in FormAction::ALL.iter().enumerate() {
        let accent = match action {
            FormAction::Submit => Color::Green,
            FormAction::Reset => Color::Gray,
        };
        render_action_button(
            frame,
            chunks[i],
            action.label(),
            is_focused && form.selected_button == i,
            true,
            Some(accent),
        );
    }

    if !form.errors.is_empty() {
        let summary = Paragraph::new(vec![
            Line::from(Span::styled(
                format!("{} error(es)", form.errors.len()),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Revise los campos marcados",
                Style::default().fg(Color::DarkGray),
            )),
        ])
        .wrap(Wrap { trim: true });
        frame.render_widget(summary, chunks[3]);
    }
}
