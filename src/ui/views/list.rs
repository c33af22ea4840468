//! Coin list view - filterable, sortable market table

use super::{ViewRenderer, ViewState};
use crate::ui::input::TextTarget;
use crate::ui::widgets::{CoinTable, SearchBox};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};

pub struct ListView;

impl ListView {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ListView {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewRenderer for ListView {
    fn render(&self, f: &mut Frame, area: Rect, state: &ViewState) {
        let list = state.list;

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(6)])
            .split(area);

        let header = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(40), Constraint::Min(10)])
            .split(chunks[0]);

        let filter = SearchBox::new(
            list.filter(),
            state.input.is_editing(TextTarget::ListFilter),
        )
        .placeholder("f: filter by name or symbol");
        f.render_widget(filter, header[0]);

        let (key, direction) = list.sort();
        let hint = format!(
            " Sorted by {} {}   s: next column  r: reverse  Space: compare",
            key.label(),
            direction.arrow()
        );
        f.render_widget(
            Paragraph::new(hint).style(Style::default().fg(Color::DarkGray)),
            Rect {
                y: header[1].y + 1,
                height: 1,
                ..header[1]
            },
        );

        let table = CoinTable::new("Cryptocurrencies", list.coins())
            .rows(list.visible())
            .selected(list.selected())
            .sort(key, direction)
            .compared(state.compare.selection().ids());
        f.render_widget(table, chunks[1]);
    }
}
