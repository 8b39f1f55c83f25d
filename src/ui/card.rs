use chrono::{DateTime, Utc};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};
use ratatui::Frame;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use super::theme::{Icons, Theme};
use crate::jobs::age::{format_age, format_date};
use crate::jobs::Job;

/// How a card is drawn relative to the selection and an active drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardLook {
    Normal,
    Selected,
    /// Slot of the card currently being dragged.
    DragSource,
    /// Floating copy following the pointer.
    Ghost,
}

/// Per-render options for a card.
pub struct CardOpts<'a> {
    pub look: CardLook,
    pub expanded: bool,
    pub now: DateTime<Utc>,
    pub date_format: &'a str,
    pub icons: &'static Icons,
}

/// Icon plus one space in front of each detail line.
const LABEL_WIDTH: usize = 2;

/// Rows a card `width` columns wide occupies, borders included.
pub fn card_height(job: &Job, expanded: bool, width: u16) -> u16 {
    let mut lines = 3; // position, company, location
    if job.salary.is_some() {
        lines += 1;
    }
    if expanded {
        lines += 2; // added, updated
        let avail = detail_width(width.saturating_sub(2) as usize);
        for text in [&job.notes, &job.link].into_iter().flatten() {
            lines += wrap(text, avail).len() as u16;
        }
    }
    lines + 2
}

fn detail_width(inner_width: usize) -> usize {
    inner_width.saturating_sub(LABEL_WIDTH)
}

/// Break `text` into rows at most `width` columns wide. Line breaks in the
/// text are kept and words longer than a row are split between graphemes.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut rows = Vec::new();
    for para in text.split('\n') {
        let mut row = String::new();
        let mut row_width = 0;
        for word in para.split_word_bounds() {
            let w = word.width();
            if row_width > 0 && row_width + w > width {
                rows.push(row.trim_end().to_string());
                row.clear();
                row_width = 0;
                if word.trim().is_empty() {
                    continue;
                }
            }
            if w <= width {
                row.push_str(word);
                row_width += w;
                continue;
            }
            for g in word.graphemes(true) {
                let gw = g.width();
                if row_width > 0 && row_width + gw > width {
                    rows.push(std::mem::take(&mut row));
                    row_width = 0;
                }
                row.push_str(g);
                row_width += gw;
            }
        }
        rows.push(row.trim_end().to_string());
    }
    rows
}

/// Truncate `text` to `max_width` display columns, appending '…' when cut.
pub fn truncate(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }
    let avail = max_width - 1;
    let mut width = 0;
    let mut out: String = text
        .graphemes(true)
        .take_while(|g| {
            width += g.width();
            width <= avail
        })
        .collect();
    out.push('…');
    out
}

/// Draw `job` into `area`. Returns the rect of the delete glyph, when drawn.
pub fn render_card(f: &mut Frame, area: Rect, job: &Job, opts: &CardOpts) -> Option<Rect> {
    if area.width < 6 || area.height < 3 {
        return None;
    }

    let accent = Theme::status_color(job.status);
    let (border_type, border_style, text_mod) = match opts.look {
        CardLook::Normal => (BorderType::Rounded, Style::default().fg(Theme::CARD_BORDER), Modifier::empty()),
        CardLook::Selected => (
            BorderType::Thick,
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
            Modifier::empty(),
        ),
        CardLook::DragSource => (BorderType::Rounded, Theme::dim_style(), Modifier::DIM),
        CardLook::Ghost => (
            BorderType::Double,
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
            Modifier::empty(),
        ),
    };

    if opts.look == CardLook::Ghost {
        f.render_widget(Clear, area);
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(border_type)
        .border_style(border_style);
    let inner = block.inner(area);
    f.render_widget(block, area);

    if inner.height == 0 || inner.width < 4 {
        return None;
    }

    let icons = opts.icons;
    let dim = Theme::dim_style().add_modifier(text_mod);
    let text = Style::default().fg(Theme::FG).add_modifier(text_mod);
    let width = inner.width as usize;

    // Line 1: handle, position, age, delete glyph on the right
    let age = format_age(job.date_added, opts.now);
    let handle = format!("{} ", icons.handle);
    let right_width = age.width() + 1 + icons.delete.width();
    let title_avail = width.saturating_sub(handle.width() + right_width + 1);
    let title = truncate(&job.position, title_avail);
    let padding = width.saturating_sub(handle.width() + title.width() + right_width);
    let show_delete = opts.look != CardLook::Ghost && opts.look != CardLook::DragSource;

    let mut lines = vec![Line::from(vec![
        Span::styled(handle, dim),
        Span::styled(title, text.add_modifier(Modifier::BOLD)),
        Span::raw(" ".repeat(padding)),
        Span::styled(age, dim),
        Span::raw(" "),
        Span::styled(
            if show_delete { icons.delete } else { " " },
            Style::default().fg(Theme::DELETE).add_modifier(text_mod),
        ),
    ])];

    let detail = |icon: &str, value: &str, style: Style| {
        let label = format!("{icon} ");
        let avail = width.saturating_sub(label.width());
        Line::from(vec![
            Span::styled(label, dim),
            Span::styled(truncate(value, avail), style),
        ])
    };

    lines.push(detail(icons.company, &job.company, text));
    lines.push(detail(icons.location, &job.location, dim));
    if let Some(ref salary) = job.salary {
        lines.push(detail(icons.salary, salary, text));
    }

    if opts.expanded {
        let link_style = Style::default().fg(Theme::LINK).add_modifier(Modifier::UNDERLINED | text_mod);
        let wrapped = [(icons.notes, &job.notes, dim), (icons.link, &job.link, link_style)];
        for (icon, value, style) in wrapped {
            let Some(value) = value else {
                continue;
            };
            for (i, row) in wrap(value, detail_width(width)).into_iter().enumerate() {
                let label = if i == 0 { format!("{icon} ") } else { " ".repeat(LABEL_WIDTH) };
                lines.push(Line::from(vec![Span::styled(label, dim), Span::styled(row, style)]));
            }
        }
        lines.push(Line::from(Span::styled(
            truncate(&format!("Added {}", format_date(job.date_added, opts.date_format)), width),
            dim,
        )));
        lines.push(Line::from(Span::styled(
            truncate(&format!("Updated {}", format_date(job.last_updated, opts.date_format)), width),
            dim,
        )));
    }

    f.render_widget(Paragraph::new(lines), inner);

    show_delete.then(|| {
        let w = icons.delete.width() as u16;
        Rect::new(inner.x + inner.width - w, inner.y, w, 1)
    })
}
