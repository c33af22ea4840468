use crate::data::Timeframe;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::Widget,
};

/// Row of timeframe buttons with the active one highlighted
pub struct TimeframeSelector {
    active: Timeframe,
}

impl TimeframeSelector {
    pub fn new(active: Timeframe) -> Self {
        Self { active }
    }
}

impl Widget for TimeframeSelector {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }
        let mut x = area.x + 1;
        for timeframe in Timeframe::ALL {
            let label = format!(" {} ", timeframe.label());
            if x + label.len() as u16 > area.x + area.width {
                break;
            }
            let style = if timeframe == self.active {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            buf.set_string(x, area.y, &label, style);
            x += label.len() as u16 + 1;
        }
        let hint = "←/→ timeframe";
        if x + hint.len() as u16 + 2 <= area.x + area.width {
            buf.set_string(x + 2, area.y, hint, Style::default().fg(Color::DarkGray));
        }
    }
}
