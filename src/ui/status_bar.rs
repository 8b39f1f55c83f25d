use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

use super::theme::Theme;
use crate::app::{AppState, Mode, NotificationLevel};
use crate::jobs::store::JobStore;

pub fn render_status_bar(f: &mut Frame, area: Rect, store: &JobStore, state: &AppState) {
    // Confirm takes over the entire bar
    if let Mode::Confirm { prompt, .. } = &state.mode {
        let line = Line::from(Span::styled(format!(" {prompt} (y/n) "), Theme::badge_style()));
        f.render_widget(Paragraph::new(line).style(Theme::status_style()), area);
        return;
    }

    let left = build_left_zone(store, state);
    let right = build_right_zone(store, state);

    let left_width: usize = left.iter().map(|s| s.content.width()).sum();
    let right_width: usize = right.iter().map(|s| s.content.width()).sum();
    let center_avail = (area.width as usize).saturating_sub(left_width + right_width);
    let center = build_center_zone(state, center_avail);

    let mut spans = left;
    spans.extend(center);
    spans.extend(right);

    let paragraph = Paragraph::new(Line::from(spans)).style(Theme::status_style());
    f.render_widget(paragraph, area);
}

pub(crate) fn mode_name(state: &AppState) -> &'static str {
    if state.drag.is_active() {
        return "DRAG";
    }
    match &state.mode {
        Mode::Normal => "NORMAL",
        Mode::Goto => "GOTO",
        Mode::Form { .. } => "FORM",
        Mode::Help => "HELP",
        Mode::Confirm { .. } => "CONFIRM",
    }
}

/// Mode badge, plus the drop target while dragging.
fn build_left_zone(store: &JobStore, state: &AppState) -> Vec<Span<'static>> {
    let mut spans = vec![
        Span::styled(format!(" {} ", mode_name(state)), Theme::badge_style()),
        Span::raw(" "),
    ];
    if let Some(job) = state.drag.active_id().and_then(|id| store.get(id)) {
        let target = state
            .drag
            .hover()
            .map(|s| s.title())
            .unwrap_or("nowhere");
        spans.push(Span::styled(
            format!("{} → {target} ", job.company),
            Style::default().fg(Theme::FG),
        ));
    } else {
        spans.push(Span::styled(format!("{} jobs ", store.len()), Theme::dim_style()));
    }
    spans
}

/// Focused column name with the selection position.
fn build_right_zone(store: &JobStore, state: &AppState) -> Vec<Span<'static>> {
    let status = state.focused_status();
    let count = store.count_by_status(status);
    let pos = if count > 0 {
        format!(" {}/{}", state.selected_card + 1, count)
    } else {
        " 0".to_string()
    };
    vec![
        Span::styled(status.title().to_string(), Style::default().fg(Theme::status_color(status))),
        Span::styled(pos, Style::default().fg(Theme::FG)),
        Span::raw(" "),
    ]
}

/// Notification text centered in the available width.
fn build_center_zone(state: &AppState, avail_width: usize) -> Vec<Span<'_>> {
    let Some(ref notif) = state.notification else {
        return vec![Span::raw(" ".repeat(avail_width))];
    };
    let color = match state.notification_level {
        NotificationLevel::Info => Theme::FG,
        NotificationLevel::Error => Theme::STATUS_ERROR,
    };
    let notif_width = notif.width();
    if notif_width >= avail_width {
        let truncated = super::card::truncate(notif, avail_width);
        return vec![Span::styled(truncated, Style::default().fg(color))];
    }

    let pad_total = avail_width - notif_width;
    let pad_left = pad_total / 2;
    vec![
        Span::raw(" ".repeat(pad_left)),
        Span::styled(notif.as_str(), Style::default().fg(color)),
        Span::raw(" ".repeat(pad_total - pad_left)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UiConfig;
    use crate::jobs::NewJob;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn bar(store: &JobStore, state: &AppState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 1)).unwrap();
        terminal
            .draw(|f| render_status_bar(f, f.area(), store, state))
            .unwrap();
        let buf = terminal.backend().buffer().clone();
        (0..buf.area.width).map(|x| buf[(x, 0)].symbol().to_string()).collect()
    }

    #[test]
    fn normal_mode_shows_badge_and_position() {
        let mut store = JobStore::new();
        store.add_job(NewJob::new("Acme", "Engineer", "Remote"));
        store.add_job(NewJob::new("Globex", "Analyst", "Berlin"));
        let mut state = AppState::new(UiConfig::default());
        state.selected_card = 1;

        let text = bar(&store, &state);

        assert!(text.starts_with(" NORMAL "));
        assert!(text.contains("2 jobs"));
        assert!(text.trim_end().ends_with("Wishlist 2/2"));
    }

    #[test]
    fn drag_badge_names_target() {
        let mut store = JobStore::new();
        let id = store.add_job(NewJob::new("Acme", "Engineer", "Remote"));
        let mut state = AppState::new(UiConfig::default());
        state.drag.begin(id, Some(crate::jobs::JobStatus::Offer), None);

        let text = bar(&store, &state);

        assert!(text.starts_with(" DRAG "));
        assert!(text.contains("Acme → Offer"));
    }

    #[test]
    fn notification_is_shown() {
        let store = JobStore::new();
        let mut state = AppState::new(UiConfig::default());
        state.notify_error("Company is required");
        assert!(bar(&store, &state).contains("Company is required"));
    }
}
