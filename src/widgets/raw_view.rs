use crate::widgets::chrome::panel_block;
use crossterm::event::KeyCode;
use ratatui::prelude::*;
use ratatui::widgets::*;

/// Scrollable view of the last response body, pretty-printed. Toggled from
/// the main view with `j`.
#[derive(Default)]
pub struct RawView {
    text: Option<String>,
    scroll_y: u16,
    wrap: bool,
    last_viewport_h: u16,
}

impl RawView {
    pub fn set_text(&mut self, text: String) {
        self.text = Some(text);
        self.scroll_y = 0;
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn render(&mut self, f: &mut Frame, area: Rect, focused: bool) {
        let mut lines: Vec<Line> = vec![Line::from(Span::styled(
            "Press j to go back  •  w toggles wrap",
            crate::theme::text_muted(),
        ))];
        match &self.text {
            Some(text) => {
                for l in text.lines() {
                    lines.push(Line::from(l.to_string()));
                }
            }
            None => lines.push(Line::from(Span::styled(
                "No response yet",
                crate::theme::text_muted(),
            ))),
        }
        self.last_viewport_h = area.height.saturating_sub(2);
        let total = lines.len() as u16;
        let max_scroll = total.saturating_sub(self.last_viewport_h);
        if self.scroll_y > max_scroll {
            self.scroll_y = max_scroll;
        }
        let block = panel_block("Last Response", focused);
        let p = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: !self.wrap })
            .scroll((self.scroll_y, 0));
        f.render_widget(p, area);
    }

    pub fn on_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Up => {
                if self.scroll_y > 0 {
                    self.scroll_y -= 1;
                }
            }
            KeyCode::Down => {
                self.scroll_y = self.scroll_y.saturating_add(1);
            }
            KeyCode::PageUp => {
                let step = self.last_viewport_h;
                self.scroll_y = self.scroll_y.saturating_sub(step);
            }
            KeyCode::PageDown => {
                let step = self.last_viewport_h;
                self.scroll_y = self.scroll_y.saturating_add(step);
            }
            KeyCode::Home => {
                self.scroll_y = 0;
            }
            KeyCode::End => {
                let total = self
                    .text
                    .as_ref()
                    .map(|t| t.lines().count() as u16 + 1)
                    .unwrap_or(2);
                self.scroll_y = total.saturating_sub(self.last_viewport_h);
            }
            KeyCode::Char('w') | KeyCode::Char('W') => {
                self.wrap = !self.wrap;
            }
            _ => {}
        }
    }
}
