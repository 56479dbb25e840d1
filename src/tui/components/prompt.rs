//! Small numeric input popup ("Select Rows", "Go to page").

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::tui::{styles::Theme, utils::layout::centered_rect, Frame};

/// Outcome of feeding a key to the prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptResult {
    Editing,
    Submitted(u32),
    Cancelled,
}

#[derive(Debug, Clone)]
pub struct NumberPrompt {
    title: &'static str,
    placeholder: &'static str,
    input: String,
    error: Option<&'static str>,
}

const MAX_DIGITS: usize = 9;

impl NumberPrompt {
    pub fn new(title: &'static str, placeholder: &'static str) -> Self {
        Self {
            title,
            placeholder,
            input: String::new(),
            error: None,
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> PromptResult {
        match key.code {
            KeyCode::Char(c) if c.is_ascii_digit() => {
                if self.input.len() < MAX_DIGITS {
                    self.input.push(c);
                }
                self.error = None;
                PromptResult::Editing
            }
            KeyCode::Backspace => {
                self.input.pop();
                self.error = None;
                PromptResult::Editing
            }
            KeyCode::Enter => match self.input.parse::<u32>() {
                Ok(value) if value > 0 => PromptResult::Submitted(value),
                _ => {
                    self.error = Some("Enter a number greater than 0");
                    PromptResult::Editing
                }
            },
            KeyCode::Esc => PromptResult::Cancelled,
            _ => PromptResult::Editing,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let popup = centered_rect(40, 6, area);

        let input_line = if self.input.is_empty() {
            Line::from(vec![
                Span::styled(self.placeholder, theme.dim_style()),
                Span::styled("_", theme.text_style()),
            ])
        } else {
            Line::from(vec![
                Span::styled(self.input.clone(), theme.text_style()),
                Span::styled("_", theme.text_style()),
            ])
        };

        let hint = match self.error {
            Some(error) => Line::from(Span::styled(error, theme.error_style())),
            None => Line::from(Span::styled("Enter to submit · Esc to close", theme.dim_style())),
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme.focused_border_style())
            .title(format!(" {} ", self.title));

        frame.render_widget(Clear, popup);
        frame.render_widget(
            Paragraph::new(vec![input_line, Line::from(""), hint]).block(block),
            popup,
        );
    }
}
