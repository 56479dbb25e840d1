//! The artwork table with its checkbox column.

use ratatui::{
    layout::{Alignment, Constraint, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Wrap},
};

use crate::api::COLUMN_HEADERS;
use crate::tui::{styles::Theme, Frame};
use crate::viewer::{LoadStatus, ViewerState};

const CHECKED: &str = "[x]";
const UNCHECKED: &str = "[ ]";
const HIGHLIGHT_SYMBOL: &str = "▶ ";

/// Width of the checkbox column including the highlight symbol
pub const CHECKBOX_COLUMNS: u16 = 2 + 3;

fn widths() -> [Constraint; 7] {
    [
        Constraint::Length(3),
        Constraint::Percentage(20),
        Constraint::Percentage(15),
        Constraint::Percentage(25),
        Constraint::Percentage(20),
        Constraint::Percentage(10),
        Constraint::Percentage(10),
    ]
}

fn checkbox(checked: bool) -> &'static str {
    if checked {
        CHECKED
    } else {
        UNCHECKED
    }
}

/// Draw the table (or its loading / error placeholder) into `area`.
///
/// Returns the region occupied by data rows so mouse clicks can be mapped
/// back to row indexes.
pub fn render_table(
    frame: &mut Frame,
    area: Rect,
    state: &ViewerState,
    table_state: &mut TableState,
    theme: &Theme,
) -> Rect {
    let title = match (state.current_page(), state.status()) {
        (_, LoadStatus::Loading { page }) => format!(" Artworks · loading page {} ", page),
        (Some(page), _) => format!(
            " Artworks · page {} of {} ",
            page.pagination.current_page, page.pagination.total_pages
        ),
        (None, _) => " Artworks ".to_string(),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_style())
        .title(title);

    match state.status() {
        LoadStatus::Loading { .. } => {
            render_message(frame, area, block, vec![Line::from("Loading...")], theme);
            return Rect::default();
        }
        LoadStatus::Failed { page, message } => {
            let lines = vec![
                Line::from(Span::styled(format!("Failed to load page {}", page), theme.error_style())),
                Line::from(Span::styled(message.clone(), theme.text_style())),
                Line::from(""),
                Line::from(Span::styled("Press r to retry", theme.info_style())),
            ];
            render_message(frame, area, block, lines, theme);
            return Rect::default();
        }
        LoadStatus::Idle => {}
    }

    let rows = state.rows();
    if rows.is_empty() {
        render_message(frame, area, block, vec![Line::from("No artworks on this page")], theme);
        return Rect::default();
    }

    let mut header_cells = vec![Cell::from(checkbox(state.all_selected()))];
    header_cells.extend(COLUMN_HEADERS.iter().enumerate().map(|(i, h)| {
        // clicking the header right of the checkbox opens the select-rows popup
        if i == 0 {
            Cell::from(format!("▾ {}", h))
        } else {
            Cell::from(*h)
        }
    }));
    let header = Row::new(header_cells).style(theme.header_style());

    let selection = state.selection();
    let body = rows.iter().enumerate().map(|(i, artwork)| {
        let mut cells = vec![Cell::from(checkbox(selection.contains(artwork.id)))];
        cells.extend(artwork.columns().into_iter().map(Cell::from));
        Row::new(cells).style(theme.row_style(i))
    });

    let table = Table::new(body, widths())
        .header(header)
        .block(block)
        .column_spacing(1)
        .highlight_style(theme.cursor_style())
        .highlight_symbol(HIGHLIGHT_SYMBOL);

    table_state.select(Some(state.cursor()));
    frame.render_stateful_widget(table, area, table_state);

    // inside the border, below the header row
    Rect::new(
        area.x + 1,
        area.y + 2,
        area.width.saturating_sub(2),
        area.height.saturating_sub(3),
    )
}

fn render_message(frame: &mut Frame, area: Rect, block: Block<'_>, lines: Vec<Line<'_>>, theme: &Theme) {
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let top_padding = inner.height.saturating_sub(lines.len() as u16) / 2;
    let text_area = Rect::new(
        inner.x,
        inner.y + top_padding,
        inner.width,
        inner.height.saturating_sub(top_padding),
    );
    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .style(theme.text_style())
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, text_area);
}
