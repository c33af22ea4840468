//! Details view - chart, statistics, about text and links for one coin

use super::{ViewRenderer, ViewState};
use crate::format;
use crate::pages::{DetailsPage, Remote};
use crate::ui::charts::PriceChart;
use crate::ui::widgets::{StatsPanel, TimeframeSelector};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use rust_decimal::Decimal;

pub struct DetailsView;

impl DetailsView {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DetailsView {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewRenderer for DetailsView {
    fn render(&self, f: &mut Frame, area: Rect, state: &ViewState) {
        let page = state.details;

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),      // Title
                Constraint::Length(1),      // Timeframe selector
                Constraint::Percentage(45), // Chart
                Constraint::Min(8),         // Stats + about
            ])
            .split(area);

        render_title(f, chunks[0], page, state);
        f.render_widget(TimeframeSelector::new(page.timeframe()), chunks[1]);

        let name = page
            .detail()
            .ready()
            .map(|d| d.summary.name.clone())
            .unwrap_or_else(|| page.id().to_string());
        f.render_widget(
            PriceChart::new(page.history(), &name, page.timeframe().label()),
            chunks[2],
        );

        let bottom = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(33),
                Constraint::Percentage(33),
                Constraint::Percentage(34),
            ])
            .split(chunks[3]);

        let loading = page.detail().is_loading();
        let general = page.general_stats();
        let additional = page.additional_stats();
        f.render_widget(StatsPanel::new("General Statistics", &general, loading), bottom[0]);
        f.render_widget(
            StatsPanel::new("Additional Statistics", &additional, loading),
            bottom[1],
        );
        render_about(f, bottom[2], page);
    }
}

fn render_title(f: &mut Frame, area: Rect, page: &DetailsPage, state: &ViewState) {
    let line = match page.detail() {
        Remote::Ready(detail) => {
            let s = &detail.summary;
            let change_color = match s.change_24h {
                Some(c) if c >= Decimal::ZERO => Color::Green,
                Some(_) => Color::Red,
                None => Color::DarkGray,
            };
            let compared = if state.compare.selection().contains(&s.id) {
                "  ● in comparison"
            } else {
                "  Space: add to comparison"
            };
            Line::from(vec![
                Span::styled(
                    format!(" {} ({}) ", s.name, s.ticker()),
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(format!("{} ", format::rank(s.rank)), Style::default().fg(Color::DarkGray)),
                Span::styled(format::usd(s.price), Style::default().fg(Color::White)),
                Span::raw(" "),
                Span::styled(format::percent(s.change_24h), Style::default().fg(change_color)),
                Span::styled(compared, Style::default().fg(Color::DarkGray)),
            ])
        }
        Remote::Unavailable => Line::from(Span::styled(
            format!(" {}: data unavailable", page.id()),
            Style::default().fg(Color::Red),
        )),
        Remote::Idle | Remote::Loading => Line::from(Span::styled(
            format!(" Loading {}...", page.id()),
            Style::default().fg(Color::DarkGray),
        )),
    };
    f.render_widget(Paragraph::new(line), area);
}

fn render_about(f: &mut Frame, area: Rect, page: &DetailsPage) {
    let mut lines = Vec::new();
    if let Some(about) = page.about() {
        lines.push(Line::from(about.to_string()));
        lines.push(Line::from(""));
    }
    for (label, url) in page.links() {
        lines.push(Line::from(vec![
            Span::styled(format!("{}: ", label), Style::default().fg(Color::DarkGray)),
            Span::styled(url, Style::default().fg(Color::Cyan)),
        ]));
    }
    if lines.is_empty() {
        lines.push(Line::from(Span::styled(
            "No information available",
            Style::default().fg(Color::DarkGray),
        )));
    }

    let block = Block::default()
        .title(" About ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    f.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        area,
    );
}
