use ratatui::style::{Color, Modifier, Style};
use todos_core::config::canonical_theme_name;

const COLOR_TEXT: Color = Color::Rgb(234, 236, 239);
const COLOR_MUTED: Color = Color::Rgb(119, 119, 119);
const COLOR_SELECTED_BG: Color = Color::Rgb(52, 56, 60);
const COLOR_ACCENT_DEFAULT: Color = Color::Rgb(175, 47, 47);
const COLOR_ACCENT_NOIR: Color = Color::Rgb(255, 135, 0);
const COLOR_ACCENT_SOLARIZED: Color = Color::Rgb(135, 175, 135);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub accent: Color,
    pub text: Color,
    pub muted: Color,
    pub selected_bg: Color,
}

impl Theme {
    pub fn from_name(name: Option<&str>) -> Self {
        let accent = match name.and_then(canonical_theme_name).as_deref() {
            Some("noir") => COLOR_ACCENT_NOIR,
            Some("solarized") => COLOR_ACCENT_SOLARIZED,
            _ => COLOR_ACCENT_DEFAULT,
        };
        Self {
            accent,
            text: COLOR_TEXT,
            muted: COLOR_MUTED,
            selected_bg: COLOR_SELECTED_BG,
        }
    }

    pub fn title(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    pub fn text(&self) -> Style {
        Style::default().fg(self.text)
    }

    pub fn muted(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn completed_text(&self) -> Style {
        self.muted().add_modifier(Modifier::CROSSED_OUT)
    }

    pub fn border(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.accent)
        } else {
            self.muted()
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_name(None)
    }
}
