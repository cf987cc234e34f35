//! Field rendering utilities for forms

use crate::request::{is_required, SelectOption};
use crate::state::{FieldKind, FormField, IntakeForm};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Inner lines of a multi-line text box
const MULTILINE_ROWS: u16 = 4;
const CURSOR: &str = "▌";
/// Indentation of fields shown under a controlling question
pub const NESTED_INDENT: u16 = 2;

fn list_rows(count: usize) -> u16 {
    u16::try_from(count).unwrap_or(u16::MAX)
}

/// Rows a field occupies, including its inline error line
pub fn field_height(descriptor: &FormField, form: &IntakeForm) -> u16 {
    let inner = match descriptor.kind {
        FieldKind::Multiline => MULTILINE_ROWS,
        FieldKind::MultiSelect => list_rows(form.catalog.data_types.len()).max(1),
        FieldKind::Files => list_rows(form.request.attachments.len()).saturating_add(1),
        _ => 1,
    };
    let error = u16::from(form.error_for(descriptor.field).is_some());
    inner.saturating_add(2).saturating_add(error)
}

/// Lines to skip so `highlighted` is the last of `visible` inner lines
fn list_scroll(highlighted: Option<usize>, visible: usize) -> u16 {
    match highlighted {
        Some(line) if visible > 0 && line >= visible => list_rows(line + 1 - visible),
        _ => 0,
    }
}

/// Draw a field box with its inline error below it
pub fn draw_field(frame: &mut Frame, area: Rect, descriptor: &FormField, form: &IntakeForm) {
    let is_active = form.is_focused(descriptor.field);
    let error = form.error_for(descriptor.field);

    let border_color = if is_active {
        Color::Cyan
    } else if error.is_some() {
        Color::Red
    } else {
        Color::DarkGray
    };

    let mut title = format!(" {} ", descriptor.label);
    if is_required(&form.request, descriptor.field) {
        title.push_str("* ");
    }

    let lines = match descriptor.kind {
        FieldKind::Text | FieldKind::Multiline => text_lines(descriptor, form, is_active),
        FieldKind::Choice | FieldKind::YesNo => vec![radio_line(descriptor, form, is_active)],
        FieldKind::MultiSelect => checkbox_lines(form, is_active),
        FieldKind::Select => vec![select_line(form, is_active)],
        FieldKind::Files => file_lines(descriptor, form, is_active),
    };

    // A box clipped by the viewport scrolls to keep the highlighted line
    let highlighted = match descriptor.kind {
        FieldKind::MultiSelect if is_active => Some(form.option_cursor),
        FieldKind::Files if is_active => Some(form.attachment_cursor.map_or(0, |i| i + 1)),
        _ => None,
    };

    let box_height = area.height.saturating_sub(u16::from(error.is_some()));
    let skip = list_scroll(highlighted, usize::from(box_height.saturating_sub(2)));
    let box_area = Rect {
        height: box_height,
        ..area
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));
    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .scroll((skip, 0))
            .block(block),
        box_area,
    );

    if let Some(message) = error {
        let error_area = Rect {
            y: area.y.saturating_add(box_height),
            height: 1,
            ..area
        };
        let line = Line::from(Span::styled(
            format!(" {message}"),
            Style::default().fg(Color::Red),
        ));
        frame.render_widget(Paragraph::new(line), error_area);
    }
}

fn cursor_span() -> Span<'static> {
    Span::styled(CURSOR, Style::default().fg(Color::Cyan))
}

fn placeholder_span(text: &str) -> Span<'static> {
    Span::styled(
        text.to_string(),
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC),
    )
}

fn text_lines(descriptor: &FormField, form: &IntakeForm, is_active: bool) -> Vec<Line<'static>> {
    let value = descriptor.display_value(&form.request);
    let style = if is_active {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::Gray)
    };

    let mut lines: Vec<Line> = if value.is_empty() {
        match descriptor.placeholder {
            Some(text) if !is_active => vec![Line::from(placeholder_span(text))],
            _ => Vec::new(),
        }
    } else {
        value
            .split('\n')
            .map(|l| Line::from(Span::styled(l.to_string(), style)))
            .collect()
    };

    // Keep the tail of long multi-line values in view while typing
    if descriptor.is_multiline() && is_active {
        let keep = MULTILINE_ROWS as usize;
        if lines.len() > keep {
            lines.drain(..lines.len() - keep);
        }
    }

    if is_active {
        match lines.last_mut() {
            Some(last) => last.spans.push(cursor_span()),
            None => lines.push(Line::from(cursor_span())),
        }
    }
    lines
}

/// Style for one option: the highlighted one stands out while focused
fn option_style(is_active: bool, highlighted: bool, chosen: bool) -> Style {
    if is_active && highlighted {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else if chosen {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

fn radio_line(descriptor: &FormField, form: &IntakeForm, is_active: bool) -> Line<'static> {
    let current = descriptor.display_value(&form.request);
    let mut spans = Vec::new();
    for (i, label) in descriptor.radio_labels().into_iter().enumerate() {
        let chosen = current == label;
        let mark = if chosen { "(•)" } else { "( )" };
        let style = option_style(is_active, form.option_cursor == i, chosen);
        spans.push(Span::styled(format!("{mark} {label}"), style));
        spans.push(Span::raw("   "));
    }
    Line::from(spans)
}

fn checkbox_lines(form: &IntakeForm, is_active: bool) -> Vec<Line<'static>> {
    if form.catalog.data_types.is_empty() {
        return vec![Line::from(placeholder_span("Sin opciones configuradas"))];
    }
    form.catalog
        .data_types
        .iter()
        .enumerate()
        .map(|(i, option)| {
            let chosen = form.request.data_type.contains(option);
            let mark = if chosen { "[x]" } else { "[ ]" };
            let style = option_style(is_active, form.option_cursor == i, chosen);
            Line::from(Span::styled(format!("{mark} {}", option.label), style))
        })
        .collect()
}

fn select_line(form: &IntakeForm, is_active: bool) -> Line<'static> {
    match form.request.data_frequency.as_ref() {
        Some(SelectOption { label, .. }) if is_active => Line::from(vec![
            Span::styled("◀ ", Style::default().fg(Color::Cyan)),
            Span::styled(label.clone(), option_style(true, true, true)),
            Span::styled(" ▶", Style::default().fg(Color::Cyan)),
        ]),
        Some(SelectOption { label, .. }) => {
            Line::from(Span::styled(label.clone(), Style::default().fg(Color::Gray)))
        }
        None if is_active => Line::from(vec![
            Span::styled("◀ ", Style::default().fg(Color::Cyan)),
            placeholder_span("Seleccione"),
            Span::styled(" ▶", Style::default().fg(Color::Cyan)),
        ]),
        None => Line::from(placeholder_span("Seleccione")),
    }
}

fn file_lines(descriptor: &FormField, form: &IntakeForm, is_active: bool) -> Vec<Line<'static>> {
    let input = if form.pending_path.is_empty() {
        let mut spans = vec![Span::styled("+ ", Style::default().fg(Color::DarkGray))];
        if is_active {
            spans.push(cursor_span());
        }
        if let Some(text) = descriptor.placeholder {
            spans.push(placeholder_span(text));
        }
        Line::from(spans)
    } else {
        let mut spans = vec![
            Span::styled("+ ", Style::default().fg(Color::DarkGray)),
            Span::raw(form.pending_path.clone()),
        ];
        if is_active {
            spans.push(cursor_span());
        }
        Line::from(spans)
    };

    let mut lines = vec![input];
    for (i, file) in form.request.attachments.files().iter().enumerate() {
        let highlighted = is_active && form.attachment_cursor == Some(i);
        let style = if highlighted {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::REVERSED)
        } else {
            Style::default().fg(Color::Gray)
        };
        lines.push(Line::from(Span::styled(format!("• {}", file.name), style)));
    }
    lines
}
