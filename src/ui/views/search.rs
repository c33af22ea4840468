//! Search view - full-page search with suggestions and popular coins

use super::{ViewRenderer, ViewState};
use crate::format;
use crate::pages::search::{SearchStatus, POPULAR, SUGGESTIONS};
use crate::ui::input::TextTarget;
use crate::ui::widgets::SearchBox;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Row, Table},
    Frame,
};

pub struct SearchView;

impl SearchView {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SearchView {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewRenderer for SearchView {
    fn render(&self, f: &mut Frame, area: Rect, state: &ViewState) {
        let page = state.search;
        let search = page.search();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Query
                Constraint::Min(6),    // Results
                Constraint::Length(4), // Popular
            ])
            .split(area);

        let query = SearchBox::new(search.query(), state.input.is_editing(TextTarget::SearchPage))
            .placeholder("e: type a name or symbol (Bitcoin, BTC, Ethereum...)")
            .loading(search.is_loading());
        f.render_widget(query, chunks[0]);

        let block = Block::default()
            .title(" Search Results ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));
        let dim = Style::default().fg(Color::DarkGray);

        match page.status() {
            SearchStatus::Prompt => {
                let mut spans = vec![Span::styled("Try: ", dim)];
                for (i, term) in SUGGESTIONS.iter().enumerate() {
                    let style = if i == page.suggestion() {
                        Style::default()
                            .fg(Color::Black)
                            .bg(Color::Cyan)
                            .add_modifier(Modifier::BOLD)
                    } else {
                        Style::default().fg(Color::White)
                    };
                    spans.push(Span::styled(format!(" {} ", term), style));
                    spans.push(Span::raw(" "));
                }
                let lines = vec![
                    Line::from(Span::styled("Enter a search term to find cryptocurrencies", dim)),
                    Line::from(""),
                    Line::from(spans),
                ];
                f.render_widget(Paragraph::new(lines).block(block), chunks[1]);
            }
            SearchStatus::Searching => {
                f.render_widget(Paragraph::new(Span::styled("Searching...", dim)).block(block), chunks[1]);
            }
            SearchStatus::NoResults => {
                let lines = vec![
                    Line::from(format!("No results found for \"{}\"", search.query().trim())),
                    Line::from(Span::styled(
                        "Try a different search term or check the spelling",
                        dim,
                    )),
                ];
                f.render_widget(Paragraph::new(lines).block(block), chunks[1]);
            }
            SearchStatus::Results => {
                let rows = search.results().iter().enumerate().map(|(i, r)| {
                    let style = if i == search.selected() {
                        Style::default().bg(Color::DarkGray)
                    } else {
                        Style::default()
                    };
                    Row::new(vec![
                        r.name.clone(),
                        r.symbol.to_uppercase(),
                        format::rank(r.rank),
                    ])
                    .style(style)
                });
                let header = Row::new(vec!["COIN", "SYMBOL", "RANK"]).style(
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                );
                let table = Table::new(
                    rows,
                    [
                        Constraint::Percentage(50),
                        Constraint::Percentage(25),
                        Constraint::Percentage(25),
                    ],
                )
                .header(header)
                .block(block);
                f.render_widget(table, chunks[1]);
            }
        }

        let popular: Vec<Span> = POPULAR
            .iter()
            .flat_map(|(_, name, ticker)| {
                [
                    Span::styled(format!("{} ", name), Style::default().fg(Color::White)),
                    Span::styled(format!("{}   ", ticker), dim),
                ]
            })
            .collect();
        let popular_block = Block::default()
            .title(" Popular Searches ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));
        f.render_widget(
            Paragraph::new(Line::from(popular)).block(popular_block),
            chunks[2],
        );
    }
}
