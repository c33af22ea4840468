use crate::data::CoinSummary;
use crate::format;
use crate::pages::{Remote, SortDirection, SortKey};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Widget},
};
use rust_decimal::Decimal;

const COLUMNS: [(&str, Option<SortKey>, u16); 6] = [
    ("RANK", Some(SortKey::Rank), 7),
    ("COIN", None, 24),
    ("PRICE", Some(SortKey::Price), 16),
    ("24H", Some(SortKey::Change24h), 10),
    ("MARKET CAP", Some(SortKey::MarketCap), 14),
    ("VOLUME", Some(SortKey::Volume), 14),
];

/// Market table. Rows marked for comparison get a `●`.
pub struct CoinTable<'a> {
    title: String,
    state: RowsState<'a>,
    selected: Option<usize>,
    sort: Option<(SortKey, SortDirection)>,
    compared: &'a [String],
}

enum RowsState<'a> {
    Loading,
    Unavailable,
    Rows(Vec<&'a CoinSummary>),
}

impl<'a> CoinTable<'a> {
    pub fn new(title: &str, coins: &'a Remote<Vec<CoinSummary>>) -> Self {
        let state = match coins {
            Remote::Ready(coins) => RowsState::Rows(coins.iter().collect()),
            Remote::Unavailable => RowsState::Unavailable,
            Remote::Idle | Remote::Loading => RowsState::Loading,
        };
        Self {
            title: format!(" {} ", title),
            state,
            selected: None,
            sort: None,
            compared: &[],
        }
    }

    /// Show these rows instead of the full listing (filtered or sorted)
    pub fn rows(mut self, rows: Vec<&'a CoinSummary>) -> Self {
        if let RowsState::Rows(_) = self.state {
            self.state = RowsState::Rows(rows);
        }
        self
    }

    pub fn selected(mut self, selected: usize) -> Self {
        self.selected = Some(selected);
        self
    }

    pub fn sort(mut self, key: SortKey, direction: SortDirection) -> Self {
        self.sort = Some((key, direction));
        self
    }

    pub fn compared(mut self, ids: &'a [String]) -> Self {
        self.compared = ids;
        self
    }
}

impl Widget for CoinTable<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(self.title.as_str())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));

        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width < 30 || inner.height < 3 {
            return;
        }

        let rows = match self.state {
            RowsState::Rows(rows) => rows,
            RowsState::Loading => {
                centered(inner, buf, "Loading...");
                return;
            }
            RowsState::Unavailable => {
                centered(inner, buf, "Data unavailable");
                return;
            }
        };

        if rows.is_empty() {
            centered(inner, buf, "No cryptocurrencies match");
            return;
        }

        // Header
        let header_style = Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD);
        let mut x_offset = inner.x + 2;
        for (name, key, width) in COLUMNS {
            if x_offset >= inner.x + inner.width {
                break;
            }
            let label = match (self.sort, key) {
                (Some((sorted, direction)), Some(key)) if sorted == key => {
                    format!("{} {}", name, direction.arrow())
                }
                _ => name.to_string(),
            };
            let room = (inner.x + inner.width - x_offset) as usize;
            buf.set_stringn(x_offset, inner.y, &label, room, header_style);
            x_offset += width;
        }

        // Keep the selected row on screen
        let visible = (inner.height - 1) as usize;
        let first = match self.selected {
            Some(sel) if sel >= visible => sel + 1 - visible,
            _ => 0,
        };

        for (i, coin) in rows.iter().enumerate().skip(first).take(visible) {
            let y = inner.y + 1 + (i - first) as u16;
            let is_selected = self.selected == Some(i);

            let base = if is_selected {
                Style::default().bg(Color::DarkGray)
            } else {
                Style::default()
            };
            if is_selected {
                buf.set_style(Rect::new(inner.x, y, inner.width, 1), base);
            }

            if self.compared.iter().any(|id| *id == coin.id) {
                buf.set_string(inner.x, y, "●", base.fg(Color::Cyan));
            }

            let change_color = match coin.change_24h {
                Some(c) if c >= Decimal::ZERO => Color::Green,
                Some(_) => Color::Red,
                None => Color::DarkGray,
            };

            let cells = [
                (format::rank(coin.rank), Color::DarkGray),
                (format!("{} {}", coin.name, coin.ticker()), Color::White),
                (format::usd(coin.price), Color::White),
                (format::percent(coin.change_24h), change_color),
                (format::usd_compact(coin.market_cap), Color::DarkGray),
                (format::usd_compact(coin.total_volume), Color::DarkGray),
            ];

            let mut x_offset = inner.x + 2;
            for ((text, color), (_, _, width)) in cells.iter().zip(COLUMNS) {
                if x_offset >= inner.x + inner.width {
                    break;
                }
                let room = ((inner.x + inner.width - x_offset) as usize).min(width as usize - 1);
                buf.set_stringn(x_offset, y, text, room, base.fg(*color));
                x_offset += width;
            }
        }
    }
}

fn centered(inner: Rect, buf: &mut Buffer, msg: &str) {
    let x = inner.x + inner.width.saturating_sub(msg.len() as u16) / 2;
    let y = inner.y + inner.height / 2;
    buf.set_string(x, y, msg, Style::default().fg(Color::DarkGray));
}
