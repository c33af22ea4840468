use crate::ui::input::Route;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Widget},
};

/// Top bar: app title and route tabs
pub struct NavBar<'a> {
    route: &'a Route,
}

impl<'a> NavBar<'a> {
    pub fn new(route: &'a Route) -> Self {
        Self { route }
    }
}

impl Widget for NavBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(" Cryptoverse ")
            .title_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));

        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width < 20 || inner.height < 1 {
            return;
        }

        let active = self.route.shortcut();
        let mut x = inner.x + 1;
        for (key, title) in Route::tabs() {
            let label = format!("[{}] {}", key, title);
            if x + label.len() as u16 >= inner.x + inner.width {
                break;
            }
            let style = if active == Some(key) {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            buf.set_string(x, inner.y, &label, style);
            x += label.len() as u16 + 3;
        }

        // Detail pages have no tab; name the coin instead
        if let Route::Coin(id) = self.route {
            let label = format!("» {}", id);
            if x + label.chars().count() as u16 <= inner.x + inner.width {
                buf.set_string(x, inner.y, &label, Style::default().fg(Color::Yellow));
            }
        }
    }
}

/// Bottom line: latest notice, or a key hint
pub struct NoticeLine<'a> {
    notice: Option<&'a str>,
    can_go_back: bool,
}

impl<'a> NoticeLine<'a> {
    pub fn new(notice: Option<&'a str>, can_go_back: bool) -> Self {
        Self {
            notice,
            can_go_back,
        }
    }
}

impl Widget for NoticeLine<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }
        match self.notice {
            Some(msg) => {
                buf.set_stringn(
                    area.x + 1,
                    area.y,
                    msg,
                    area.width.saturating_sub(1) as usize,
                    Style::default().fg(Color::Yellow),
                );
            }
            None => {
                let hint = if self.can_go_back {
                    "? help  / search  Esc back  q quit"
                } else {
                    "? help  / search  q quit"
                };
                buf.set_stringn(
                    area.x + 1,
                    area.y,
                    hint,
                    area.width.saturating_sub(1) as usize,
                    Style::default().fg(Color::DarkGray),
                );
            }
        }
    }
}
