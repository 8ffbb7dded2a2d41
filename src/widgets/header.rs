use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::ui::AppState;

pub fn draw_header(f: &mut Frame, area: Rect, state: &AppState) {
    let border = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(if state.loading > 0 {
            state.theme.accent
        } else {
            state.theme.muted
        }));
    let inner = border.inner(area);
    f.render_widget(border, area);

    let title = state.config.header.clone().unwrap_or_else(|| "crm-tui".into());
    let line = Line::from(vec![
        Span::styled(
            title,
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(state.base_url.clone(), crate::theme::text_muted()),
    ]);
    let p = Paragraph::new(line).alignment(Alignment::Center);
    f.render_widget(p, inner);
}
