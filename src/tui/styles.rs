use ratatui::style::{Color, Modifier, Style};

/// Colors used by the table viewer
#[derive(Debug, Clone)]
pub struct Theme {
    pub primary: Color,
    pub text: Color,
    pub text_dim: Color,
    pub text_bright: Color,

    /// Header row and status bar
    pub header: Color,
    /// Every other table row
    pub stripe: Color,
    pub cursor: Color,

    pub border: Color,
    pub border_focused: Color,

    pub error: Color,
    pub info: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::light_on_dark()
    }
}

impl Theme {
    pub fn light_on_dark() -> Self {
        Self {
            primary: Color::Rgb(59, 130, 246),     // Blue-500
            text: Color::Rgb(226, 232, 240),       // Slate-200
            text_dim: Color::Rgb(148, 163, 184),   // Slate-400
            text_bright: Color::Rgb(255, 255, 255),

            header: Color::Rgb(30, 58, 138),       // Blue-900
            stripe: Color::Rgb(30, 41, 59),        // Slate-800
            cursor: Color::Rgb(37, 99, 235),       // Blue-600

            border: Color::Rgb(71, 85, 105),       // Slate-600
            border_focused: Color::Rgb(59, 130, 246),

            error: Color::Rgb(239, 68, 68),        // Red-500
            info: Color::Rgb(245, 158, 11),        // Amber-500
        }
    }

    pub fn text_style(&self) -> Style {
        Style::default().fg(self.text)
    }

    pub fn dim_style(&self) -> Style {
        Style::default().fg(self.text_dim)
    }

    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    pub fn focused_border_style(&self) -> Style {
        Style::default()
            .fg(self.border_focused)
            .add_modifier(Modifier::BOLD)
    }

    pub fn header_style(&self) -> Style {
        Style::default()
            .fg(self.text_bright)
            .bg(self.header)
            .add_modifier(Modifier::BOLD)
    }

    pub fn row_style(&self, index: usize) -> Style {
        if index % 2 == 0 {
            Style::default().fg(self.text).bg(self.stripe)
        } else {
            Style::default().fg(self.text)
        }
    }

    pub fn cursor_style(&self) -> Style {
        Style::default()
            .bg(self.cursor)
            .fg(self.text_bright)
            .add_modifier(Modifier::BOLD)
    }

    /// Page button for the active page
    pub fn active_button_style(&self) -> Style {
        Style::default()
            .bg(self.primary)
            .fg(self.text_bright)
            .add_modifier(Modifier::BOLD)
    }

    pub fn button_style(&self) -> Style {
        Style::default().fg(self.primary)
    }

    pub fn disabled_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    pub fn error_style(&self) -> Style {
        Style::default()
            .fg(self.error)
            .add_modifier(Modifier::BOLD)
    }

    pub fn status_bar_style(&self) -> Style {
        Style::default().fg(self.text).bg(self.header)
    }

    pub fn info_style(&self) -> Style {
        Style::default().fg(self.info)
    }
}
