use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Padding, Paragraph};
use ratatui::Frame;

use super::theme::{self, Theme};
use crate::app::TextBuffer;
use crate::form::{FormField, JobForm};

/// Render the add/edit job dialog centered in `area`.
pub fn render_form(f: &mut Frame, area: Rect, form: &JobForm, nerd_font: bool) {
    let lines = form_lines(form, nerd_font);
    // 2 border rows + 2 padding rows
    let height = lines.len() as u16 + 4;
    let dialog = super::centered_rect(area, 60, 0, 50, height);

    f.render_widget(Clear, dialog);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Theme::FG))
        .title(Span::styled(
            format!(" {} ", form.title()),
            Style::default().fg(Theme::FG).add_modifier(Modifier::BOLD),
        ))
        .padding(Padding::new(2, 2, 1, 1));

    let inner = block.inner(dialog);
    f.render_widget(block, dialog);
    f.render_widget(Paragraph::new(lines), inner);
}

/// Label, value and optional error line per field, then the key footer.
pub(crate) fn form_lines(form: &JobForm, nerd_font: bool) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for field in FormField::ALL {
        let focused = form.focus == field;
        let label_style = if focused {
            Style::default().fg(Theme::FG).add_modifier(Modifier::BOLD)
        } else {
            Theme::dim_style()
        };
        let marker = if field.required() { " *" } else { "" };
        lines.push(Line::from(Span::styled(format!("{}{marker}", field.label()), label_style)));

        match form.buffer(field) {
            Some(buf) => lines.extend(text_lines(buf, field.placeholder(), focused)),
            None => lines.push(status_line(form, focused, nerd_font)),
        }

        if let Some(err) = form.error.as_ref().filter(|e| e.field() == field) {
            lines.push(Line::from(Span::styled(
                format!("  {err}"),
                Style::default().fg(Theme::STATUS_ERROR),
            )));
        }
    }
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("Enter", Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(" save  ", Theme::dim_style()),
        Span::styled("Tab", Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(" next field  ", Theme::dim_style()),
        Span::styled("Esc", Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(" cancel", Theme::dim_style()),
    ]));
    lines
}

/// Input lines, one per line of the value; the focused field shows a block
/// cursor.
fn text_lines(buf: &TextBuffer, placeholder: &'static str, focused: bool) -> Vec<Line<'static>> {
    let cursor = Style::default().add_modifier(Modifier::REVERSED);
    if buf.input.is_empty() {
        let mut spans = vec![Span::raw("  ")];
        if focused {
            spans.push(Span::styled(" ", cursor));
        }
        spans.push(Span::styled(placeholder, Theme::dim_style().add_modifier(Modifier::ITALIC)));
        return vec![Line::from(spans)];
    }
    if !focused {
        return buf.input.split('\n').map(|l| Line::from(format!("  {l}"))).collect();
    }

    let (before, under, after) = buf.split_at_cursor();
    let mut rows = vec![vec![Span::raw("  ")]];
    push_text(&mut rows, before);
    match under {
        // Cursor sits on a line break: draw it at the end of its row.
        Some('\n') => {
            push_span(&mut rows, Span::styled(" ", cursor));
            rows.push(vec![Span::raw("  ")]);
        }
        Some(c) => push_span(&mut rows, Span::styled(c.to_string(), cursor)),
        None => push_span(&mut rows, Span::styled(" ", cursor)),
    }
    push_text(&mut rows, after);
    rows.into_iter().map(Line::from).collect()
}

fn push_span(rows: &mut [Vec<Span<'static>>], span: Span<'static>) {
    if let Some(row) = rows.last_mut() {
        row.push(span);
    }
}

fn push_text(rows: &mut Vec<Vec<Span<'static>>>, text: &str) {
    for (i, part) in text.split('\n').enumerate() {
        if i > 0 {
            rows.push(vec![Span::raw("  ")]);
        }
        if !part.is_empty() {
            push_span(rows, Span::raw(part.to_string()));
        }
    }
}

fn status_line(form: &JobForm, focused: bool, nerd_font: bool) -> Line<'static> {
    let icons = theme::icons(nerd_font);
    let color = Theme::status_color(form.status);
    let arrows = if focused { Theme::status_style() } else { Theme::dim_style() };
    Line::from(vec![
        Span::raw("  "),
        Span::styled(icons.prev, arrows),
        Span::styled(
            format!(" {} ", form.status.title()),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        Span::styled(icons.next, arrows),
    ])
}
