use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use super::theme::Theme;
use crate::app::Mode;
use crate::input::keymap;

/// Render the minor-mode hint popup (shown for g).
pub fn render_hint_popup(f: &mut Frame, area: Rect, mode: &Mode) {
    let bindings = match mode {
        Mode::Goto => keymap::goto_bindings(),
        _ => return,
    };

    let max_key_len = bindings.iter().map(|b| b.key.len()).max().unwrap_or(0);
    let max_desc_len = bindings.iter().map(|b| b.description.len()).max().unwrap_or(0);
    let popup_width = (max_key_len + max_desc_len + 7).min(area.width as usize) as u16;
    let popup_height = (bindings.len() as u16 + 2).min(area.height);

    let x = area.x + area.width.saturating_sub(popup_width);
    let y = area.y + area.height.saturating_sub(popup_height);
    let popup_area = Rect::new(x, y, popup_width, popup_height);

    f.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(ratatui::widgets::BorderType::Rounded)
        .border_style(Style::default().fg(Theme::FG))
        .title(Span::styled(
            " goto ",
            Style::default().fg(Theme::FG).add_modifier(Modifier::BOLD),
        ));

    let inner = block.inner(popup_area);
    f.render_widget(block, popup_area);

    for (i, binding) in bindings.iter().enumerate().take(inner.height as usize) {
        let line = Line::from(vec![
            Span::raw(" "),
            Span::styled(
                format!("{:>width$}", binding.key, width = max_key_len),
                Style::default().fg(Theme::HINT_KEY).add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(binding.description, Style::default().fg(Theme::HINT_DESC)),
        ]);
        f.render_widget(
            Paragraph::new(line),
            Rect::new(inner.x, inner.y + i as u16, inner.width, 1),
        );
    }
}
