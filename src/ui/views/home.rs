//! Home view - welcome banner and the top coins

use super::{ViewRenderer, ViewState};
use crate::ui::widgets::CoinTable;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub struct HomeView;

impl HomeView {
    pub fn new() -> Self {
        Self
    }
}

impl Default for HomeView {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewRenderer for HomeView {
    fn render(&self, f: &mut Frame, area: Rect, state: &ViewState) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Banner
                Constraint::Min(6),    // Top coins
            ])
            .split(area);

        let banner = vec![
            Line::from(Span::styled(
                "Explore the World of Cryptocurrency",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Live prices, detailed charts and side-by-side comparisons",
                Style::default().fg(Color::DarkGray),
            )),
        ];
        f.render_widget(
            Paragraph::new(banner).alignment(Alignment::Center),
            chunks[0],
        );

        let table = CoinTable::new("Top Cryptocurrencies", state.home.coins())
            .selected(state.home.selected())
            .compared(state.compare.selection().ids());
        f.render_widget(table, chunks[1]);
    }
}
