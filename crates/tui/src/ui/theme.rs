use ratatui::style::Color;

use engine::Urgency;

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub background: Color,
    pub panel: Color,
    pub text: Color,
    pub dim: Color,
    pub accent: Color,
    pub border: Color,
    pub positive: Color,
    pub warning: Color,
    pub error: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: Color::Rgb(8, 12, 16),
            panel: Color::Rgb(20, 26, 32),
            text: Color::Rgb(220, 220, 220),
            dim: Color::Rgb(140, 140, 140),
            accent: Color::Rgb(80, 160, 160),
            border: Color::Rgb(60, 70, 80),
            positive: Color::Rgb(90, 180, 110),
            warning: Color::Rgb(220, 170, 60),
            error: Color::Rgb(200, 80, 80),
        }
    }
}

impl Theme {
    /// Badge colour for an expiry band. Overdue and critical share red.
    pub fn urgency(&self, urgency: Urgency) -> Color {
        match urgency {
            Urgency::Overdue | Urgency::Critical => self.error,
            Urgency::Warning => self.warning,
            Urgency::Normal => self.positive,
        }
    }
}
