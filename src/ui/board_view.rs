use chrono::{DateTime, Utc};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::symbols::border;
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, BorderType, Borders, Padding, Paragraph, Scrollbar, ScrollbarOrientation,
    ScrollbarState,
};
use ratatui::Frame;

use super::card::{card_height, render_card, CardLook, CardOpts};
use super::theme::{self, Theme};
use super::{Hit, HitMap};
use crate::app::AppState;
use crate::jobs::store::JobStore;
use crate::jobs::{Job, JobStatus};

const DASHED: border::Set = border::Set {
    top_left: "╭",
    top_right: "╮",
    bottom_left: "╰",
    bottom_right: "╯",
    vertical_left: "╎",
    vertical_right: "╎",
    horizontal_top: "╌",
    horizontal_bottom: "╌",
};

/// First card index to draw so that `selected` is fully visible.
///
/// `heights` are the card heights in display order; `avail` is the number of
/// rows the column offers.
pub(crate) fn scroll_offset(heights: &[u16], selected: usize, avail: u16) -> usize {
    if heights.is_empty() {
        return 0;
    }
    let selected = selected.min(heights.len() - 1);
    let mut offset = 0;
    while offset < selected
        && heights[offset..=selected].iter().map(|h| *h as u32).sum::<u32>() > avail as u32
    {
        offset += 1;
    }
    offset
}

/// Split the board into the five fixed columns.
pub(crate) fn column_areas(area: Rect) -> Vec<Rect> {
    let n = JobStatus::ALL.len() as u32;
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints(JobStatus::ALL.map(|_| Constraint::Ratio(1, n)))
        .split(area)
        .to_vec()
}

pub fn render_board(
    f: &mut Frame,
    area: Rect,
    store: &JobStore,
    state: &AppState,
    now: DateTime<Utc>,
    hits: &mut HitMap,
) {
    for (status, col_area) in JobStatus::ALL.into_iter().zip(column_areas(area)) {
        let jobs = store.jobs_with_status(status);
        render_column(f, col_area, status, &jobs, state, now, hits);
    }
}

fn render_column(
    f: &mut Frame,
    area: Rect,
    status: JobStatus,
    jobs: &[&Job],
    state: &AppState,
    now: DateTime<Utc>,
    hits: &mut HitMap,
) {
    let is_focused = state.focused_status() == status;
    let is_hover = state.drag.hover() == Some(status);
    let accent = Theme::status_color(status);

    let header_line = Line::from(vec![
        Span::styled(
            format!(" {} ", status.title()),
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("({}) ", jobs.len()), Style::default().fg(accent)),
    ]);

    let border_style = if is_hover {
        Style::default().fg(Theme::DROP_HOVER).add_modifier(Modifier::BOLD)
    } else if is_focused {
        Style::default().fg(Theme::COLUMN_BORDER).add_modifier(Modifier::BOLD)
    } else {
        Theme::dim_style()
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .border_type(if is_hover { BorderType::Double } else { BorderType::Rounded })
        .title(header_line)
        .padding(Padding::new(1, 1, 0, 0));

    let inner = block.inner(area);
    f.render_widget(block, area);
    hits.push(area, Hit::Column(status));

    if inner.height == 0 || inner.width == 0 {
        return;
    }

    if jobs.is_empty() {
        render_placeholder(f, inner);
        return;
    }

    let heights: Vec<u16> = jobs
        .iter()
        .map(|job| card_height(job, state.is_expanded(&job.id), inner.width))
        .collect();
    let selected = if is_focused { state.selected_card } else { 0 };
    let offset = scroll_offset(&heights, selected, inner.height);

    let icons = theme::icons(state.ui.nerd_font);
    let dragged = state.drag.active_id();
    let bottom = inner.y + inner.height;
    let mut y = inner.y;

    for (idx, job) in jobs.iter().enumerate().skip(offset) {
        let remaining = bottom.saturating_sub(y);
        if remaining < 3 {
            break;
        }
        let card_area = Rect::new(inner.x, y, inner.width, heights[idx].min(remaining));

        let look = if dragged == Some(&job.id) {
            CardLook::DragSource
        } else if is_focused && idx == state.selected_card {
            CardLook::Selected
        } else {
            CardLook::Normal
        };
        let opts = CardOpts {
            look,
            expanded: state.is_expanded(&job.id),
            now,
            date_format: &state.ui.date_format,
            icons,
        };

        hits.push(card_area, Hit::Card(job.id.clone()));
        if let Some(delete) = render_card(f, card_area, job, &opts) {
            hits.push(delete, Hit::DeleteJob(job.id.clone()));
        }
        y += card_area.height;
    }

    let total: u32 = heights.iter().map(|h| *h as u32).sum();
    if total > inner.height as u32 {
        let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight);
        let mut scrollbar_state = ScrollbarState::new(jobs.len()).position(offset);
        f.render_stateful_widget(scrollbar, area, &mut scrollbar_state);
    }
}

fn render_placeholder(f: &mut Frame, inner: Rect) {
    let height = inner.height.min(3);
    let area = Rect::new(inner.x, inner.y, inner.width, height);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_set(DASHED)
        .border_style(Theme::dim_style());
    let text = Paragraph::new(Line::from(Span::styled("Drop jobs here", Theme::dim_style())))
        .centered()
        .block(block);
    f.render_widget(text, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scroll_offset_zero_when_everything_fits() {
        assert_eq!(scroll_offset(&[5, 5, 5], 2, 15), 0);
        assert_eq!(scroll_offset(&[], 3, 10), 0);
    }

    #[test]
    fn scroll_offset_keeps_selected_visible() {
        // 10 rows, cards of 5: selecting the third needs one card scrolled off
        assert_eq!(scroll_offset(&[5, 5, 5], 2, 10), 1);
        assert_eq!(scroll_offset(&[5, 5, 5, 5], 3, 10), 2);
    }

    #[test]
    fn scroll_offset_accounts_for_expanded_cards() {
        // an expanded first card pushes the second out of view
        assert_eq!(scroll_offset(&[9, 5], 1, 10), 1);
        assert_eq!(scroll_offset(&[9, 5], 0, 10), 0);
    }

    #[test]
    fn scroll_offset_oversized_card_is_its_own_top() {
        assert_eq!(scroll_offset(&[5, 20], 1, 10), 1);
    }

    #[test]
    fn scroll_offset_clamps_selected_index() {
        assert_eq!(scroll_offset(&[5, 5, 5], 99, 10), 1);
    }

    #[test]
    fn column_areas_cover_board() {
        let areas = column_areas(Rect::new(0, 0, 100, 20));
        assert_eq!(areas.len(), 5);
        assert!(areas.iter().all(|a| a.width == 20 && a.height == 20));
        assert_eq!(areas[4].x, 80);
    }
}
