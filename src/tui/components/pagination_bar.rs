//! Prev / page buttons / Next row under the table.

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};
use unicode_width::UnicodeWidthStr;

use crate::tui::{styles::Theme, Frame};

/// What a click on part of the bar means
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarTarget {
    Prev,
    Next,
    Page(u32),
}

/// A clickable region of the bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BarButton {
    pub area: Rect,
    pub target: BarTarget,
}

const PREV_LABEL: &str = "◀ Prev";
const NEXT_LABEL: &str = "Next ▶";
const GAP: &str = "  ";

#[derive(Debug)]
pub struct PaginationBar<'a> {
    visible: &'a [u32],
    active: u32,
    total_pages: u32,
}

impl<'a> PaginationBar<'a> {
    pub fn new(visible: &'a [u32], active: u32, total_pages: u32) -> Self {
        Self {
            visible,
            active,
            total_pages,
        }
    }

    /// Button labels in display order; gaps between them are implied
    fn labels(&self) -> Vec<(String, BarTarget)> {
        let mut labels = Vec::with_capacity(self.visible.len() + 2);
        labels.push((PREV_LABEL.to_string(), BarTarget::Prev));
        labels.extend(
            self.visible
                .iter()
                .map(|&page| (format!(" {} ", page), BarTarget::Page(page))),
        );
        labels.push((NEXT_LABEL.to_string(), BarTarget::Next));
        labels
    }

    /// Lay the buttons out centered on the first row of `area`
    pub fn buttons(&self, area: Rect) -> Vec<BarButton> {
        let labels = self.labels();
        let total_width: usize = labels.iter().map(|(l, _)| l.width()).sum::<usize>()
            + GAP.width() * labels.len().saturating_sub(1);

        let mut x = area.x + (area.width.saturating_sub(total_width as u16)) / 2;
        let right = area.x.saturating_add(area.width);

        let mut buttons = Vec::with_capacity(labels.len());
        for (label, target) in labels {
            let width = (label.width() as u16).min(right.saturating_sub(x));
            if width == 0 {
                break;
            }
            buttons.push(BarButton {
                area: Rect::new(x, area.y, width, 1),
                target,
            });
            x = x.saturating_add(width + GAP.width() as u16);
        }
        buttons
    }

    fn span_for(&self, label: String, target: BarTarget, theme: &Theme) -> Span<'static> {
        let style = match target {
            BarTarget::Prev if self.active <= 1 => theme.disabled_style(),
            BarTarget::Next if self.active >= self.total_pages => theme.disabled_style(),
            BarTarget::Page(page) if page == self.active => theme.active_button_style(),
            _ => theme.button_style(),
        };
        Span::styled(label, style)
    }

    /// Draw the bar and return its clickable regions
    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) -> Vec<BarButton> {
        let buttons = self.buttons(area);
        let Some(first) = buttons.first() else {
            return buttons;
        };

        let mut spans = Vec::new();
        for (i, (label, target)) in self.labels().into_iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(GAP));
            }
            spans.push(self.span_for(label, target, theme));
        }

        let line_area = Rect::new(
            first.area.x,
            area.y,
            area.width.saturating_sub(first.area.x - area.x),
            1,
        );
        frame.render_widget(Paragraph::new(Line::from(spans)), line_area);
        buttons
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buttons_are_centered_and_ordered() {
        let visible = [1, 2, 3];
        let bar = PaginationBar::new(&visible, 2, 50);
        let buttons = bar.buttons(Rect::new(0, 5, 80, 1));

        let targets: Vec<BarTarget> = buttons.iter().map(|b| b.target).collect();
        assert_eq!(
            targets,
            vec![
                BarTarget::Prev,
                BarTarget::Page(1),
                BarTarget::Page(2),
                BarTarget::Page(3),
                BarTarget::Next
            ]
        );

        // 6 + 3 + 3 + 3 + 6 columns of labels plus 4 gaps of 2
        let width = 21 + 8;
        assert_eq!(buttons[0].area, Rect::new((80 - width) / 2, 5, 6, 1));
        assert_eq!(buttons[1].area.x, buttons[0].area.x + 8);
        assert!(buttons.iter().all(|b| b.area.y == 5));
    }

    #[test]
    fn test_multi_digit_pages_are_wider() {
        let visible = [99, 100];
        let bar = PaginationBar::new(&visible, 99, 200);
        let buttons = bar.buttons(Rect::new(0, 0, 80, 1));

        assert_eq!(buttons[1].area.width, 4);
        assert_eq!(buttons[2].area.width, 5);
    }

    #[test]
    fn test_narrow_area_drops_buttons_that_do_not_fit() {
        let visible: Vec<u32> = (1..=10).collect();
        let bar = PaginationBar::new(&visible, 1, 50);
        let buttons = bar.buttons(Rect::new(0, 0, 20, 1));

        assert!(buttons.len() < 12);
        assert!(buttons.iter().all(|b| b.area.x + b.area.width <= 20));
    }
}
