use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::*;

use crate::ui::AppState;

/// One-line footer: spinner while a call is in flight, the flash message
/// (the page's status area), then key help.
pub fn draw_footer_combined(f: &mut Frame, area: Rect, state: &AppState, help_text: &str) {
    let mut spans: Vec<Span> = Vec::new();
    if state.loading > 0 {
        let spinner = ["⠋", "⠙", "⠸", "⠴", "⠦", "⠇"][state.tick as usize % 6];
        let label = state
            .last_action
            .map(|a| a.label())
            .unwrap_or("Working");
        spans.push(Span::raw(format!(" {spinner} {label}...")));
        spans.push(Span::raw("  |  "));
    }
    if let Some(flash) = &state.flash {
        let color = crate::theme::flash_color(flash.level);
        let tag = match flash.level {
            crate::ui::FlashLevel::Success => "[OK]",
            crate::ui::FlashLevel::Error => "[ERROR]",
            crate::ui::FlashLevel::Info => "[INFO]",
        };
        spans.push(Span::styled(
            format!("{tag} "),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(
            format!("{}  |  ", flash.text),
            Style::default().fg(color),
        ));
    }
    spans.push(Span::styled(
        help_text.to_string(),
        Style::default().fg(Color::DarkGray),
    ));
    let p = Paragraph::new(Line::from(spans));
    f.render_widget(p, area);
}
