//! Help overlay listing the keybindings

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};

const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "NAVIGATION",
        &[
            ("1 2 3 4", "Home, Cryptocurrencies, Compare, Search"),
            ("↑ ↓", "Move selection"),
            ("Enter", "Open the selected coin"),
            ("Esc / Bksp", "Go back"),
        ],
    ),
    (
        "SEARCH",
        &[
            ("/", "Focus the search box"),
            ("Enter", "Open highlighted result, or search page"),
            ("Esc", "Leave the search box (query is kept)"),
            ("e", "Edit the query on the search page"),
        ],
    ),
    (
        "COINS",
        &[
            ("f", "Filter by name or symbol"),
            ("s", "Sort by next column"),
            ("r", "Reverse the sort direction"),
            ("Space", "Add to / remove from comparison"),
            ("← →", "Change chart timeframe"),
        ],
    ),
    (
        "OTHER",
        &[("?", "Show this help"), ("q", "Quit")],
    ),
];

/// Help overlay widget
pub struct HelpOverlay;

impl HelpOverlay {
    pub fn new() -> Self {
        Self
    }

    fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
        let [_, middle, _] = Layout::vertical([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .areas(r);

        let [_, center, _] = Layout::horizontal([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .areas(middle);
        center
    }

    fn lines() -> Vec<Line<'static>> {
        let header_style = Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD);
        let key_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        let desc_style = Style::default().fg(Color::White);

        let mut lines = Vec::new();
        for (header, bindings) in SECTIONS {
            lines.push(Line::from(Span::styled(*header, header_style)));
            for (key, desc) in *bindings {
                lines.push(Line::from(vec![
                    Span::styled(format!("  {:<12}", key), key_style),
                    Span::styled(*desc, desc_style),
                ]));
            }
            lines.push(Line::from(""));
        }
        lines.push(Line::from(Span::styled(
            "Press any key to close this help",
            Style::default().fg(Color::DarkGray),
        )));
        lines
    }
}

impl Default for HelpOverlay {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for HelpOverlay {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let dialog_area = Self::centered_rect(60, 80, area);

        Clear.render(dialog_area, buf);

        let block = Block::default()
            .title(" Help - Keybindings ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .style(Style::default().bg(Color::Black));

        Paragraph::new(Self::lines())
            .block(block)
            .wrap(Wrap { trim: false })
            .render(dialog_area, buf);
    }
}
