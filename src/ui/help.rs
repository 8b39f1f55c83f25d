use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap};
use ratatui::Frame;

use super::theme::Theme;

/// (heading, [(keys, description)])
const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Board",
        &[
            ("h / l", "Switch columns"),
            ("j / k", "Move between cards"),
            ("Enter", "Expand / collapse card"),
            ("a", "Add job"),
            ("e", "Edit job"),
            ("d", "Delete job"),
            ("H / L", "Move job left/right"),
            ("g", "Goto (1-5 column, g first, e last)"),
            ("?", "This help"),
            ("q", "Quit"),
        ],
    ),
    (
        "Drag (m)",
        &[
            ("h / l", "Choose target column"),
            ("Enter", "Drop"),
            ("Esc", "Cancel"),
        ],
    ),
    (
        "Mouse",
        &[
            ("click", "Expand / collapse card"),
            ("drag", "Move card to another column"),
            ("x", "Delete card"),
        ],
    ),
    (
        "Form",
        &[
            ("Tab / S-Tab", "Next / previous field"),
            ("< / >", "Change status"),
            ("Alt-Enter", "New line in notes (or Ctrl-J)"),
            ("Enter", "Save"),
            ("Esc", "Cancel"),
        ],
    ),
];

pub fn render_help(f: &mut Frame, area: Rect) {
    let panel_area = super::centered_rect(area, 60, 85, 50, 24);

    f.render_widget(Clear, panel_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(ratatui::widgets::BorderType::Rounded)
        .border_style(Style::default().fg(Theme::FG))
        .title(Span::styled(
            " Job Tracker Help ",
            Style::default().fg(Theme::FG).add_modifier(Modifier::BOLD),
        ))
        .padding(Padding::new(2, 2, 1, 1));

    let inner = block.inner(panel_area);
    f.render_widget(block, panel_area);

    if inner.height == 0 {
        return;
    }

    let paragraph = Paragraph::new(help_lines()).wrap(Wrap { trim: false });
    f.render_widget(paragraph, inner);
}

fn help_lines() -> Vec<Line<'static>> {
    let key = Style::default().fg(Theme::FG).add_modifier(Modifier::BOLD);
    let dim = Theme::dim_style();
    let heading = Style::default()
        .fg(Theme::FG)
        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED);

    let mut lines = Vec::new();
    for (title, bindings) in SECTIONS {
        lines.push(Line::from(Span::styled(*title, heading)));
        for (keys, desc) in *bindings {
            lines.push(Line::from(vec![
                Span::styled(format!("  {keys:<12}"), key),
                Span::styled(*desc, dim),
            ]));
        }
        lines.push(Line::from(""));
    }
    lines.push(Line::from(Span::styled("Press Esc to close", key)));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn help_mentions_drag_keys() {
        let text: Vec<String> = help_lines()
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect();
        assert!(text.iter().any(|l| l.starts_with("Drag")));
        assert!(text.iter().any(|l| l.contains("Choose target column")));
        assert_eq!(text.last().map(String::as_str), Some("Press Esc to close"));
    }
}
