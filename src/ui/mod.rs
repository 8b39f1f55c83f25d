pub mod board_view;
pub mod card;
pub mod form_dialog;
pub mod help;
pub mod input_modal;
pub mod status_bar;
pub mod theme;

use chrono::{DateTime, Utc};
use ratatui::layout::{Constraint, Direction, Layout, Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

use crate::app::{AppState, Mode};
use crate::drag::{DropTarget, DropTargets};
use crate::jobs::store::JobStore;
use crate::jobs::{JobId, JobStatus};
use card::{card_height, render_card, CardLook, CardOpts};
use theme::Theme;

/// Create a centered rect within `area` using percentage-based sizing with minimums.
pub fn centered_rect(area: Rect, w_pct: u16, h_pct: u16, min_w: u16, min_h: u16) -> Rect {
    let width = (area.width * w_pct / 100).max(min_w).min(area.width);
    let height = (area.height * h_pct / 100).max(min_h).min(area.height);
    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height - height) / 2;
    Rect::new(x, y, width, height)
}

/// Clickable or droppable region recorded during a render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Hit {
    AddButton,
    DeleteJob(JobId),
    Card(JobId),
    Column(JobStatus),
}

/// Regions of the last rendered frame, in paint order.
#[derive(Debug, Clone, Default)]
pub struct HitMap {
    regions: Vec<(Rect, Hit)>,
}

impl HitMap {
    pub fn push(&mut self, rect: Rect, hit: Hit) {
        if rect.width > 0 && rect.height > 0 {
            self.regions.push((rect, hit));
        }
    }

    /// Topmost region under the point; later pushes paint over earlier ones.
    pub fn hit(&self, x: u16, y: u16) -> Option<&Hit> {
        let pos = Position::new(x, y);
        self.regions
            .iter()
            .rev()
            .find(|(rect, _)| rect.contains(pos))
            .map(|(_, hit)| hit)
    }

    pub fn column_rect(&self, status: JobStatus) -> Option<Rect> {
        self.regions
            .iter()
            .find(|(_, hit)| *hit == Hit::Column(status))
            .map(|(rect, _)| *rect)
    }
}

impl DropTargets for HitMap {
    fn drop_target(&self, x: u16, y: u16) -> Option<DropTarget> {
        match self.hit(x, y)? {
            Hit::Card(id) | Hit::DeleteJob(id) => Some(DropTarget::Card(id.clone())),
            Hit::Column(status) => Some(DropTarget::Column(*status)),
            Hit::AddButton => None,
        }
    }
}

/// Draw the whole screen and return the hit map of what was drawn.
pub fn render(f: &mut Frame, store: &JobStore, state: &AppState, now: DateTime<Utc>) -> HitMap {
    let mut hits = HitMap::default();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1), Constraint::Length(1)])
        .split(f.area());

    render_header(f, chunks[0], state, &mut hits);
    board_view::render_board(f, chunks[1], store, state, now, &mut hits);
    status_bar::render_status_bar(f, chunks[2], store, state);
    render_ghost(f, chunks[1], store, state, now, &hits);

    // Overlays
    match &state.mode {
        Mode::Goto => input_modal::render_hint_popup(f, chunks[1], &state.mode),
        Mode::Form { form } => form_dialog::render_form(f, f.area(), form, state.ui.nerd_font),
        Mode::Help => help::render_help(f, f.area()),
        Mode::Normal | Mode::Confirm { .. } => {}
    }

    hits
}

fn render_header(f: &mut Frame, area: Rect, state: &AppState, hits: &mut HitMap) {
    let icons = theme::icons(state.ui.nerd_font);
    let title = " Job Tracker";
    let button = format!("[{} Add Job]", icons.add);
    let button_width = button.width() as u16;
    let pad = (area.width as usize).saturating_sub(title.width() + button.width() + 1);

    let line = Line::from(vec![
        Span::styled(
            title,
            Style::default().fg(Theme::HEADER_TITLE).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" ".repeat(pad)),
        Span::styled(
            button,
            Style::default().fg(Theme::ADD_BUTTON).add_modifier(Modifier::BOLD),
        ),
    ]);
    f.render_widget(Paragraph::new(line), area);

    if area.width > button_width {
        let x = area.x + area.width - button_width - 1;
        hits.push(Rect::new(x, area.y, button_width, 1), Hit::AddButton);
    }
}

/// Floating copy of the dragged card. Follows the pointer during a mouse drag
/// and sits at the top of the hovered column during a keyboard drag.
fn render_ghost(
    f: &mut Frame,
    board: Rect,
    store: &JobStore,
    state: &AppState,
    now: DateTime<Utc>,
    hits: &HitMap,
) {
    let Some(job) = state.drag.active_id().and_then(|id| store.get(id)) else {
        return;
    };
    let width = board.width / JobStatus::ALL.len() as u16;
    let height = card_height(job, false, width);

    let (x, y) = match state.drag.pointer() {
        Some((px, py)) => (px.saturating_sub(width / 2), py),
        None => match state.drag.hover().and_then(|s| hits.column_rect(s)) {
            Some(col) => (col.x + 1, col.y + 1),
            None => return,
        },
    };

    // Keep the ghost inside the board
    let width = width.min(board.width);
    let height = height.min(board.height);
    let x = x.clamp(board.x, board.x + board.width - width);
    let y = y.clamp(board.y, board.y + board.height - height);

    let opts = CardOpts {
        look: CardLook::Ghost,
        expanded: false,
        now,
        date_format: &state.ui.date_format,
        icons: theme::icons(state.ui.nerd_font),
    };
    render_card(f, Rect::new(x, y, width, height), job, &opts);
}
