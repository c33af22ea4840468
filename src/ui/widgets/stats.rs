use crate::pages::StatRow;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Widget},
};

/// Titled name/value list
pub struct StatsPanel<'a> {
    title: String,
    rows: &'a [StatRow],
    loading: bool,
}

impl<'a> StatsPanel<'a> {
    pub fn new(title: &str, rows: &'a [StatRow], loading: bool) -> Self {
        Self {
            title: format!(" {} ", title),
            rows,
            loading,
        }
    }
}

impl Widget for StatsPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(self.title.as_str())
            .title_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));

        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width < 20 || inner.height < 1 {
            return;
        }

        if self.rows.is_empty() {
            let msg = if self.loading { "Loading..." } else { "Data unavailable" };
            buf.set_string(inner.x + 1, inner.y, msg, Style::default().fg(Color::DarkGray));
            return;
        }

        let name_width = self
            .rows
            .iter()
            .map(|r| r.name.len())
            .max()
            .unwrap_or(0) as u16
            + 2;

        for (i, row) in self.rows.iter().enumerate() {
            let y = inner.y + i as u16;
            if y >= inner.y + inner.height {
                break;
            }
            buf.set_string(inner.x + 1, y, row.name, Style::default().fg(Color::DarkGray));

            let value_color = if row.value.starts_with('+') {
                Color::Green
            } else if row.value.starts_with('-') {
                Color::Red
            } else {
                Color::White
            };
            let x = inner.x + 1 + name_width;
            if x < inner.x + inner.width {
                buf.set_stringn(
                    x,
                    y,
                    &row.value,
                    (inner.x + inner.width - x) as usize,
                    Style::default().fg(value_color),
                );
            }
        }
    }
}
