use crate::app::Action;
use crate::ui::AppState;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Tabs};

/// Action bar: one tab per action, F1..F9, last-invoked action highlighted.
pub fn draw_action_bar(f: &mut Frame, area: Rect, state: &AppState) {
    let theme = &state.theme;
    let current = state
        .last_action
        .and_then(|a| Action::ALL.iter().position(|x| *x == a))
        .unwrap_or(usize::MAX);

    let mut titles: Vec<Line> = Vec::new();
    for (i, action) in Action::ALL.iter().enumerate() {
        let is_selected = i == current;
        let fn_key = format!("F{}", i + 1);

        let text_style = if is_selected {
            Style::default()
                .fg(theme.selected)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.muted)
        };
        let key_style = if is_selected {
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.muted)
        };

        // Tab shape: [F1] Create
        titles.push(Line::from(vec![
            Span::styled("[", Style::default().fg(theme.frame)),
            Span::styled(fn_key, key_style),
            Span::styled("]", Style::default().fg(theme.frame)),
            Span::raw(" "),
            Span::styled(action.label(), text_style),
        ]));
    }

    let tabs = Tabs::new(titles)
        .select(if current == usize::MAX { 0 } else { current })
        .style(Style::default().fg(theme.fg))
        .highlight_style(
            Style::default()
                .fg(theme.selected)
                .add_modifier(Modifier::BOLD),
        )
        .divider(Span::styled(" │ ", Style::default().fg(theme.frame)));

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(theme.frame));

    f.render_widget(tabs.block(block), area);
}

/// F1..F9 map straight onto the action list.
pub fn action_for_function_key(key_num: u8) -> Option<Action> {
    let index = key_num.checked_sub(1)? as usize;
    Action::ALL.get(index).copied()
}
