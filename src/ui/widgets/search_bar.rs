use crate::data::SearchResult;
use crate::format;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, Widget},
};

/// Single-line text input with a placeholder
pub struct SearchBox<'a> {
    query: &'a str,
    placeholder: &'a str,
    focused: bool,
    loading: bool,
}

impl<'a> SearchBox<'a> {
    pub fn new(query: &'a str, focused: bool) -> Self {
        Self {
            query,
            placeholder: "Search cryptocurrencies...",
            focused,
            loading: false,
        }
    }

    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = placeholder;
        self
    }

    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }
}

impl Widget for SearchBox<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border = if self.focused { Color::Cyan } else { Color::DarkGray };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border));

        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width < 4 || inner.height < 1 {
            return;
        }

        let spinner = if self.loading { " …" } else { "" };
        let width = inner.width.saturating_sub(2 + spinner.len() as u16) as usize;

        if self.query.is_empty() && !self.focused {
            buf.set_stringn(
                inner.x + 1,
                inner.y,
                self.placeholder,
                width,
                Style::default().fg(Color::DarkGray),
            );
            return;
        }

        // Keep the tail of long queries visible
        let chars: Vec<char> = self.query.chars().collect();
        let visible: String = chars[chars.len().saturating_sub(width.saturating_sub(1))..]
            .iter()
            .collect();
        let cursor = if self.focused { "▏" } else { "" };
        buf.set_stringn(
            inner.x + 1,
            inner.y,
            format!("{}{}", visible, cursor),
            width,
            Style::default().fg(Color::White),
        );

        if self.loading {
            buf.set_string(
                inner.x + inner.width - 2,
                inner.y,
                "…",
                Style::default().fg(Color::Yellow),
            );
        }
    }
}

/// Results popup rendered over whatever lies below the search box
pub struct SearchDropdown<'a> {
    results: &'a [SearchResult],
    selected: usize,
    loading: bool,
}

impl<'a> SearchDropdown<'a> {
    pub fn new(results: &'a [SearchResult], selected: usize, loading: bool) -> Self {
        Self {
            results,
            selected,
            loading,
        }
    }

    /// Rows needed including borders
    pub fn height(&self) -> u16 {
        self.results.len().max(1) as u16 + 2
    }
}

impl Widget for SearchDropdown<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .style(Style::default().bg(Color::Black));

        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width < 10 || inner.height < 1 {
            return;
        }

        if self.loading && self.results.is_empty() {
            buf.set_string(inner.x + 1, inner.y, "Searching...", Style::default().fg(Color::DarkGray));
            return;
        }
        if self.results.is_empty() {
            buf.set_string(inner.x + 1, inner.y, "No results found", Style::default().fg(Color::DarkGray));
            return;
        }

        for (i, result) in self.results.iter().enumerate() {
            let y = inner.y + i as u16;
            if y >= inner.y + inner.height {
                break;
            }

            let style = if i == self.selected {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };

            let rank = format::rank(result.rank);
            let line = format!(
                "{:<width$} {:>6}",
                format!("{} ({})", result.name, result.symbol.to_uppercase()),
                rank,
                width = inner.width.saturating_sub(9) as usize
            );
            buf.set_stringn(inner.x + 1, y, &line, inner.width.saturating_sub(1) as usize, style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(buf: &Buffer) -> String {
        buf.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn test_placeholder_when_blurred_and_empty() {
        let area = Rect::new(0, 0, 40, 3);
        let mut buf = Buffer::empty(area);
        SearchBox::new("", false).render(area, &mut buf);
        assert!(text(&buf).contains("Search cryptocurrencies"));
    }

    #[test]
    fn test_dropdown_rows() {
        let results = vec![
            SearchResult {
                id: "bitcoin".into(),
                name: "Bitcoin".into(),
                symbol: "btc".into(),
                thumb: String::new(),
                rank: Some(1),
            },
            SearchResult {
                id: "bitcoin-cash".into(),
                name: "Bitcoin Cash".into(),
                symbol: "bch".into(),
                thumb: String::new(),
                rank: None,
            },
        ];
        let dropdown = SearchDropdown::new(&results, 1, false);
        assert_eq!(dropdown.height(), 4);

        let area = Rect::new(0, 0, 40, 4);
        let mut buf = Buffer::empty(area);
        dropdown.render(area, &mut buf);
        let rendered = text(&buf);
        assert!(rendered.contains("Bitcoin (BTC)"));
        assert!(rendered.contains("Bitcoin Cash (BCH)"));
        assert!(rendered.contains("N/A"));
    }

    #[test]
    fn test_empty_results_message() {
        let area = Rect::new(0, 0, 30, 3);
        let mut buf = Buffer::empty(area);
        SearchDropdown::new(&[], 0, false).render(area, &mut buf);
        assert!(text(&buf).contains("No results found"));
    }
}
