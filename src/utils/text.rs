// Text helpers for terminal output

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// String and table formatting utilities
pub mod string {
    use super::*;

    /// Truncate text to at most `max_width` terminal columns, ending in an ellipsis when cut
    pub fn truncate(text: &str, max_width: usize) -> String {
        if text.width() <= max_width {
            return text.to_string();
        }
        if max_width == 0 {
            return String::new();
        }

        let mut result = String::new();
        let mut used = 0;
        for ch in text.chars() {
            let w = ch.width().unwrap_or(0);
            if used + w > max_width - 1 {
                break;
            }
            result.push(ch);
            used += w;
        }
        result.push('…');
        result
    }

    /// Pad `text` with spaces up to `width` terminal columns
    pub fn pad(text: &str, width: usize) -> String {
        let fill = width.saturating_sub(text.width());
        format!("{}{}", text, " ".repeat(fill))
    }

    /// Format a table with aligned columns, cutting cells wider than `max_cell`
    pub fn format_table(headers: &[&str], rows: &[Vec<String>], max_cell: usize) -> String {
        if headers.is_empty() {
            return String::new();
        }

        let cells: Vec<Vec<String>> = rows
            .iter()
            .map(|row| row.iter().map(|c| truncate(c, max_cell)).collect())
            .collect();

        let mut widths = headers.iter().map(|h| h.width()).collect::<Vec<_>>();
        for row in &cells {
            for (i, cell) in row.iter().enumerate() {
                if i < widths.len() {
                    widths[i] = widths[i].max(cell.width());
                }
            }
        }

        let mut result = String::new();

        let header_row = headers
            .iter()
            .enumerate()
            .map(|(i, header)| pad(header, widths[i]))
            .collect::<Vec<_>>()
            .join(" | ");
        result.push_str(header_row.trim_end());
        result.push('\n');

        let separator = widths
            .iter()
            .map(|&width| "-".repeat(width))
            .collect::<Vec<_>>()
            .join("-|-");
        result.push_str(&separator);
        result.push('\n');

        for row in &cells {
            let formatted_row = row
                .iter()
                .enumerate()
                .map(|(i, cell)| pad(cell, widths.get(i).copied().unwrap_or(0)))
                .collect::<Vec<_>>()
                .join(" | ");
            result.push_str(formatted_row.trim_end());
            result.push('\n');
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::string::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Nighthawks", 20), "Nighthawks");
        assert_eq!(truncate("Nighthawks", 6), "Night…");
        assert_eq!(truncate("Nighthawks", 0), "");
    }

    #[test]
    fn test_truncate_counts_wide_characters() {
        // each CJK character is two columns wide
        assert_eq!(truncate("富嶽三十六景", 5), "富嶽…");
    }

    #[test]
    fn test_format_table_aligns_columns() {
        let rows = vec![
            vec!["1".to_string(), "Water Lilies".to_string()],
            vec!["22".to_string(), "The Bedroom".to_string()],
        ];
        let table = format_table(&["ID", "Title"], &rows, 40);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines[0], "ID | Title");
        assert_eq!(lines[1], "---|-------------");
        assert_eq!(lines[2], "1  | Water Lilies");
        assert_eq!(lines[3], "22 | The Bedroom");
    }
}
