use crate::chart::ChartSeries;
use crate::compare::{ComparisonChart, SeriesColor};
use crate::pages::Remote;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    symbols::Marker,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, LegendPosition, Widget},
};

pub const CHART_UNAVAILABLE: &str = "Chart data unavailable";

fn rgb(color: SeriesColor) -> Color {
    Color::Rgb(color.r, color.g, color.b)
}

fn chart_block(title: &str) -> Block<'_> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
}

/// Centered grey message inside an already drawn block
fn render_message(inner: Rect, buf: &mut Buffer, msg: &str) {
    if inner.width == 0 || inner.height == 0 {
        return;
    }
    let x = inner.x + inner.width.saturating_sub(msg.len() as u16) / 2;
    let y = inner.y + inner.height / 2;
    buf.set_stringn(x, y, msg, inner.width as usize, Style::default().fg(Color::DarkGray));
}

/// Three x-axis labels: first, middle, last
fn axis_labels(labels: &[String]) -> Vec<Span<'static>> {
    match labels.len() {
        0 => Vec::new(),
        1 => vec![Span::raw(labels[0].clone())],
        n => vec![
            Span::raw(labels[0].clone()),
            Span::raw(labels[n / 2].clone()),
            Span::raw(labels[n - 1].clone()),
        ],
    }
}

fn price_labels(min: f64, max: f64) -> Vec<Span<'static>> {
    let mid = min + (max - min) / 2.0;
    [min, mid, max]
        .into_iter()
        .map(|p| {
            if max - min >= 10.0 {
                Span::raw(format!("{:.0}", p))
            } else {
                Span::raw(format!("{:.4}", p))
            }
        })
        .collect()
}

/// Single-coin price line
pub struct PriceChart<'a> {
    series: &'a Remote<ChartSeries>,
    title: String,
}

impl<'a> PriceChart<'a> {
    pub fn new(series: &'a Remote<ChartSeries>, name: &str, timeframe_label: &str) -> Self {
        Self {
            series,
            title: format!(" {} Price ({}) ", name, timeframe_label),
        }
    }
}

impl Widget for PriceChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = chart_block(&self.title);

        let series = match self.series {
            Remote::Ready(series) if !series.is_empty() => series,
            Remote::Idle | Remote::Loading => {
                let inner = block.inner(area);
                block.render(area, buf);
                render_message(inner, buf, "Loading chart...");
                return;
            }
            _ => {
                let inner = block.inner(area);
                block.render(area, buf);
                render_message(inner, buf, CHART_UNAVAILABLE);
                return;
            }
        };

        let Some((min, max)) = series.bounds() else {
            return;
        };

        let points = series.points();
        let rising = series.values.last() >= series.values.first();
        let color = if rising { Color::Green } else { Color::Red };

        let dataset = Dataset::default()
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(color))
            .data(&points);

        let chart = Chart::new(vec![dataset])
            .block(block)
            .x_axis(
                Axis::default()
                    .style(Style::default().fg(Color::DarkGray))
                    .bounds([0.0, (series.len().saturating_sub(1)).max(1) as f64])
                    .labels(axis_labels(&series.labels)),
            )
            .y_axis(
                Axis::default()
                    .style(Style::default().fg(Color::DarkGray))
                    .bounds([min, max])
                    .labels(price_labels(min, max)),
            );

        chart.render(area, buf);
    }
}

/// One line per compared coin on a shared axis
pub struct ComparisonChartWidget<'a> {
    chart: &'a Remote<ComparisonChart>,
    title: String,
}

impl<'a> ComparisonChartWidget<'a> {
    pub fn new(chart: &'a Remote<ComparisonChart>, timeframe_label: &str) -> Self {
        Self {
            chart,
            title: format!(" Price Comparison ({}) ", timeframe_label),
        }
    }
}

impl Widget for ComparisonChartWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = chart_block(&self.title);

        let chart = match self.chart {
            Remote::Ready(chart) => chart,
            Remote::Idle => {
                let inner = block.inner(area);
                block.render(area, buf);
                render_message(inner, buf, "Select cryptocurrencies to compare");
                return;
            }
            Remote::Loading => {
                let inner = block.inner(area);
                block.render(area, buf);
                render_message(inner, buf, "Loading comparison...");
                return;
            }
            Remote::Unavailable => {
                let inner = block.inner(area);
                block.render(area, buf);
                render_message(inner, buf, CHART_UNAVAILABLE);
                return;
            }
        };

        let Some((min, max)) = chart.bounds() else {
            let inner = block.inner(area);
            block.render(area, buf);
            render_message(inner, buf, CHART_UNAVAILABLE);
            return;
        };

        let lines: Vec<(String, Color, Vec<(f64, f64)>)> = chart
            .datasets
            .iter()
            .map(|d| {
                let name = if d.is_empty() {
                    format!("{} (unavailable)", d.label)
                } else {
                    d.label.clone()
                };
                (name, rgb(d.color), d.points())
            })
            .collect();

        let datasets = lines
            .iter()
            .map(|(name, color, points)| {
                Dataset::default()
                    .name(name.clone())
                    .marker(Marker::Braille)
                    .graph_type(GraphType::Line)
                    .style(Style::default().fg(*color))
                    .data(points)
            })
            .collect();

        let widget = Chart::new(datasets)
            .block(block)
            .legend_position(Some(LegendPosition::TopLeft))
            .x_axis(
                Axis::default()
                    .style(Style::default().fg(Color::DarkGray))
                    .bounds([0.0, (chart.labels.len().saturating_sub(1)).max(1) as f64])
                    .labels(axis_labels(&chart.labels)),
            )
            .y_axis(
                Axis::default()
                    .style(Style::default().fg(Color::DarkGray))
                    .bounds([min, max])
                    .labels(price_labels(min, max)),
            );

        widget.render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer_text(buf: &Buffer) -> String {
        buf.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn test_axis_labels() {
        let labels: Vec<String> = (0..5).map(|i| format!("t{}", i)).collect();
        let spans = axis_labels(&labels);
        let text: Vec<&str> = spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, vec!["t0", "t2", "t4"]);
        assert!(axis_labels(&[]).is_empty());
    }

    #[test]
    fn test_unavailable_placeholder() {
        let area = Rect::new(0, 0, 40, 8);
        let mut buf = Buffer::empty(area);
        let series = Remote::Unavailable;
        PriceChart::new(&series, "Bitcoin", "7D").render(area, &mut buf);
        assert!(buffer_text(&buf).contains(CHART_UNAVAILABLE));
    }

    #[test]
    fn test_comparison_idle_prompt() {
        let area = Rect::new(0, 0, 50, 8);
        let mut buf = Buffer::empty(area);
        let chart = Remote::Idle;
        ComparisonChartWidget::new(&chart, "30D").render(area, &mut buf);
        assert!(buffer_text(&buf).contains("Select cryptocurrencies to compare"));
    }

    #[test]
    fn test_renders_series() {
        let area = Rect::new(0, 0, 60, 12);
        let mut buf = Buffer::empty(area);
        let series = Remote::Ready(ChartSeries {
            labels: vec!["Jan 1".into(), "Jan 2".into(), "Jan 3".into()],
            values: vec![100.0, 120.0, 110.0],
        });
        PriceChart::new(&series, "Bitcoin", "7D").render(area, &mut buf);
        let text = buffer_text(&buf);
        assert!(text.contains("Bitcoin Price"));
        assert!(text.contains("Jan 1"));
    }
}
