use ratatui::style::{Color, Modifier, Style};

use crate::jobs::JobStatus;

/// Color theme for jobdeck.
///
/// Text and chrome use the terminal's default foreground color (Color::Reset).
/// Only status accents, the drag hover highlight and errors get color.
pub struct Theme;

impl Theme {
    // Base
    pub const FG: Color = Color::Reset;
    pub const DIM: Color = Color::DarkGray;

    // Header
    pub const HEADER_TITLE: Color = Color::Reset;
    pub const ADD_BUTTON: Color = Color::Cyan;

    // Column
    pub const COLUMN_BORDER: Color = Color::Reset;
    pub const DROP_HOVER: Color = Color::Cyan;

    // Card
    pub const CARD_BORDER: Color = Color::Reset;
    pub const DELETE: Color = Color::Red;
    pub const LINK: Color = Color::Blue;

    // Status bar
    pub const STATUS_ERROR: Color = Color::Red;

    // Hint popup
    pub const HINT_KEY: Color = Color::Reset;
    pub const HINT_DESC: Color = Color::Reset;

    pub fn dim_style() -> Style {
        Style::default().fg(Self::DIM)
    }

    pub fn status_style() -> Style {
        Style::default().fg(Self::FG)
    }

    /// Reversed bold badge used for mode names and prompts.
    pub fn badge_style() -> Style {
        Style::default()
            .fg(Self::FG)
            .add_modifier(Modifier::BOLD | Modifier::REVERSED)
    }

    /// Accent color for a pipeline stage.
    pub fn status_color(status: JobStatus) -> Color {
        match status {
            JobStatus::Wishlist => Color::Magenta,
            JobStatus::Applied => Color::Blue,
            JobStatus::Interview => Color::Yellow,
            JobStatus::Offer => Color::Green,
            JobStatus::Rejected => Color::Red,
        }
    }
}

/// Glyph set used on cards and in the header.
pub struct Icons {
    pub handle: &'static str,
    pub delete: &'static str,
    pub company: &'static str,
    pub location: &'static str,
    pub salary: &'static str,
    pub link: &'static str,
    pub notes: &'static str,
    pub add: &'static str,
    pub prev: &'static str,
    pub next: &'static str,
}

static ASCII: Icons = Icons {
    handle: "::",
    delete: "x",
    company: "@",
    location: ">",
    salary: "$",
    link: "~",
    notes: "#",
    add: "+",
    prev: "<",
    next: ">",
};

static NERD: Icons = Icons {
    handle: "\u{f0dc}",   // nf-fa-sort
    delete: "\u{f00d}",   // nf-fa-times
    company: "\u{f1ad}",  // nf-fa-building
    location: "\u{f041}", // nf-fa-map_marker
    salary: "\u{f155}",   // nf-fa-dollar
    link: "\u{f0c1}",     // nf-fa-link
    notes: "\u{f249}",    // nf-fa-sticky_note
    add: "\u{f067}",      // nf-fa-plus
    prev: "\u{25c0}",
    next: "\u{25b6}",
};

pub fn icons(nerd_font: bool) -> &'static Icons {
    if nerd_font {
        &NERD
    } else {
        &ASCII
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_status_has_distinct_accent() {
        let colors: Vec<Color> = JobStatus::ALL.iter().map(|s| Theme::status_color(*s)).collect();
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn ascii_icons_are_plain_ascii() {
        let i = icons(false);
        for glyph in [i.handle, i.delete, i.company, i.location, i.salary, i.link, i.notes, i.add] {
            assert!(glyph.is_ascii(), "{glyph:?}");
        }
    }
}
