//! Compare view - coin picker on the left, shared chart on the right

use super::{ViewRenderer, ViewState};
use crate::compare::palette_color;
use crate::ui::charts::ComparisonChartWidget;
use crate::ui::widgets::{CoinTable, TimeframeSelector};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub struct CompareView;

impl CompareView {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CompareView {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewRenderer for CompareView {
    fn render(&self, f: &mut Frame, area: Rect, state: &ViewState) {
        let page = state.compare;

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
            .split(area);

        let picker = CoinTable::new("Select Cryptocurrencies (Space)", page.coins())
            .selected(page.cursor())
            .compared(page.selection().ids());
        f.render_widget(picker, columns[0]);

        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Selected coins
                Constraint::Length(1), // Timeframe
                Constraint::Min(8),    // Chart
            ])
            .split(columns[1]);

        let selection = page.selection();
        let mut spans = vec![Span::styled(
            format!(" Selected {}/{}: ", selection.len(), selection.max()),
            Style::default().fg(Color::DarkGray),
        )];
        for (i, id) in selection.ids().iter().enumerate() {
            let color = palette_color(i);
            spans.push(Span::styled(
                format!("■ {} ", page.display_name(id)),
                Style::default()
                    .fg(Color::Rgb(color.r, color.g, color.b))
                    .add_modifier(Modifier::BOLD),
            ));
        }
        f.render_widget(Paragraph::new(Line::from(spans)), right[0]);

        f.render_widget(TimeframeSelector::new(page.timeframe()), right[1]);
        f.render_widget(
            ComparisonChartWidget::new(page.chart(), page.timeframe().label()),
            right[2],
        );
    }
}
