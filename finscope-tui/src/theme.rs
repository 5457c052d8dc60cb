//! Light and dark colour palettes.
//!
//! # Color Palette
//! - **Background**: base surface (charcoal in dark mode, paper white in light)
//! - **Accent**: focus, highlights, panel titles
//! - **Positive / Warning / Negative**: low / medium / high anomaly severity
//! - **Muted**: hints, axis labels, disabled text

use ratatui::style::{Color, Modifier, Style};

use finscope_core::render::ChartSeries;
use finscope_core::{SeverityLevel, ThemeMode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub accent: Color,
    pub positive: Color,
    pub negative: Color,
    pub warning: Color,
    pub neutral: Color,
    pub muted: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self::light()
    }
}

impl Palette {
    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Light => Self::light(),
            ThemeMode::Dark => Self::dark(),
        }
    }

    pub fn dark() -> Self {
        Self {
            background: Color::Rgb(18, 18, 20),
            accent: Color::Rgb(0, 200, 230),
            positive: Color::Rgb(0, 220, 120),
            negative: Color::Rgb(255, 82, 82),
            warning: Color::Rgb(255, 152, 0),
            neutral: Color::Rgb(147, 112, 219),
            muted: Color::Rgb(120, 130, 150),
            text_primary: Color::Rgb(235, 235, 235),
            text_secondary: Color::Rgb(170, 170, 170),
        }
    }

    pub fn light() -> Self {
        Self {
            background: Color::Rgb(248, 248, 245),
            accent: Color::Rgb(21, 101, 192),
            positive: Color::Rgb(46, 125, 50),
            negative: Color::Rgb(198, 40, 40),
            warning: Color::Rgb(230, 81, 0),
            neutral: Color::Rgb(94, 53, 177),
            muted: Color::Rgb(110, 110, 120),
            text_primary: Color::Rgb(25, 25, 30),
            text_secondary: Color::Rgb(80, 80, 90),
        }
    }

    /// Base style: primary text on the background.
    pub fn base(&self) -> Style {
        Style::default().fg(self.text_primary).bg(self.background)
    }

    pub fn text(&self) -> Style {
        Style::default().fg(self.text_primary)
    }

    pub fn secondary(&self) -> Style {
        Style::default().fg(self.text_secondary)
    }

    pub fn muted(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn accent(&self) -> Style {
        Style::default().fg(self.accent)
    }

    pub fn accent_bold(&self) -> Style {
        self.accent().add_modifier(Modifier::BOLD)
    }

    pub fn warning(&self) -> Style {
        Style::default().fg(self.warning)
    }

    pub fn negative(&self) -> Style {
        Style::default().fg(self.negative)
    }

    pub fn panel_border(&self, active: bool) -> Style {
        if active {
            self.accent()
        } else {
            self.muted()
        }
    }

    pub fn panel_title(&self, active: bool) -> Style {
        if active {
            self.accent_bold()
        } else {
            self.muted()
        }
    }

    /// Colour for an anomaly card's border and badge.
    pub fn severity_color(&self, level: SeverityLevel) -> Color {
        match level {
            SeverityLevel::High => self.negative,
            SeverityLevel::Medium => self.warning,
            SeverityLevel::Low => self.positive,
            SeverityLevel::Unknown => self.neutral,
        }
    }

    /// Chart line colours are fixed per series and identical in both modes.
    pub fn series_color(series: &ChartSeries) -> Color {
        let (r, g, b) = series.rgb();
        Color::Rgb(r, g, b)
    }
}
