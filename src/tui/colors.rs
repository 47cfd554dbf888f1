use ratatui::style::Color;

/// Colors for one theme
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub background: Color,
    pub text: Color,
    pub muted: Color,
    pub accent: Color,
    pub title: Color,
    pub score: Color,
    pub error: Color,
    pub bar_bg: Color,
    pub bar_fg: Color,
    pub selection_bg: Color,
    pub mark_bg: Color,
    pub mark_fg: Color,
    pub chip_bg: Color,
}

impl Palette {
    pub fn dark() -> Self {
        Self {
            background: Color::Rgb(17, 24, 39),
            text: Color::Rgb(229, 231, 235),
            muted: Color::Rgb(156, 163, 175),
            accent: Color::Cyan,
            title: Color::Rgb(147, 197, 253),
            score: Color::Rgb(74, 222, 128),
            error: Color::Rgb(248, 113, 113),
            bar_bg: Color::Rgb(40, 40, 50),
            bar_fg: Color::White,
            selection_bg: Color::Rgb(60, 60, 80),
            mark_bg: Color::Rgb(133, 77, 14),
            mark_fg: Color::Rgb(254, 240, 138),
            chip_bg: Color::Rgb(55, 65, 81),
        }
    }

    pub fn light() -> Self {
        Self {
            background: Color::Rgb(249, 250, 251),
            text: Color::Rgb(31, 41, 55),
            muted: Color::Rgb(75, 85, 99),
            accent: Color::Rgb(29, 78, 216),
            title: Color::Rgb(30, 64, 175),
            score: Color::Rgb(21, 128, 61),
            error: Color::Rgb(220, 38, 38),
            bar_bg: Color::Rgb(0, 95, 135),
            bar_fg: Color::White,
            selection_bg: Color::Rgb(219, 234, 254),
            mark_bg: Color::Rgb(254, 240, 138),
            mark_fg: Color::Black,
            chip_bg: Color::Rgb(229, 231, 235),
        }
    }

    pub fn for_mode(dark_mode: bool) -> Self {
        if dark_mode {
            Self::dark()
        } else {
            Self::light()
        }
    }
}

/// Theme toggle label, naming the mode a toggle would switch to
pub fn toggle_label(dark_mode: bool) -> &'static str {
    if dark_mode {
        "\u{2600}\u{FE0F} Light" // sun
    } else {
        "\u{1F319} Dark" // crescent moon
    }
}
