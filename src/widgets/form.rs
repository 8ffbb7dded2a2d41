use crate::model::FormData;
use crate::widgets::chrome::panel_block;
use crossterm::event::KeyCode;
use ratatui::prelude::*;
use ratatui::widgets::*;

/// The five customer fields, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Id,
    FirstName,
    LastName,
    Status,
    Address,
}

pub const FIELD_COUNT: usize = 5;

impl Field {
    pub const ALL: [Field; FIELD_COUNT] = [
        Field::Id,
        Field::FirstName,
        Field::LastName,
        Field::Status,
        Field::Address,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Field::Id => "Id",
            Field::FirstName => "First Name",
            Field::LastName => "Last Name",
            Field::Status => "Status",
            Field::Address => "Address",
        }
    }
}

/// Selector values for the status field; the empty option means unset.
pub const STATUS_OPTIONS: [&str; 3] = ["", "true", "false"];

/// Cursor and editing state for the form pane. The field values themselves
/// live in `FormData` so the reducer can be tested without a UI harness.
#[derive(Debug, Clone, Default)]
pub struct FormView {
    pub cursor: usize,
    pub editing: bool,
    pub status_cursor: usize,
    // Value before the current edit; restored on Esc
    backup: String,
}

pub fn field_value<'a>(data: &'a FormData, field: Field) -> &'a String {
    match field {
        Field::Id => &data.id,
        Field::FirstName => &data.first_name,
        Field::LastName => &data.last_name,
        Field::Status => &data.status,
        Field::Address => &data.address,
    }
}

fn field_value_mut<'a>(data: &'a mut FormData, field: Field) -> &'a mut String {
    match field {
        Field::Id => &mut data.id,
        Field::FirstName => &mut data.first_name,
        Field::LastName => &mut data.last_name,
        Field::Status => &mut data.status,
        Field::Address => &mut data.address,
    }
}

pub fn handle_form_key(data: &mut FormData, view: &mut FormView, key: KeyCode) {
    let field = Field::ALL[view.cursor.min(FIELD_COUNT - 1)];
    if view.editing {
        match field {
            Field::Status => match key {
                KeyCode::Up => {
                    if view.status_cursor > 0 {
                        view.status_cursor -= 1;
                    }
                }
                KeyCode::Down => {
                    if view.status_cursor + 1 < STATUS_OPTIONS.len() {
                        view.status_cursor += 1;
                    }
                }
                KeyCode::Enter => {
                    data.status = STATUS_OPTIONS[view.status_cursor].to_string();
                    view.editing = false;
                }
                KeyCode::Esc => {
                    view.editing = false;
                }
                _ => {}
            },
            _ => match key {
                KeyCode::Char(ch) => {
                    field_value_mut(data, field).push(ch);
                }
                KeyCode::Backspace => {
                    field_value_mut(data, field).pop();
                }
                KeyCode::Enter => {
                    view.editing = false;
                }
                KeyCode::Esc => {
                    *field_value_mut(data, field) = view.backup.clone();
                    view.editing = false;
                }
                _ => {}
            },
        }
    } else {
        match key {
            KeyCode::Up => {
                if view.cursor > 0 {
                    view.cursor -= 1;
                }
            }
            KeyCode::Down => {
                if view.cursor + 1 < FIELD_COUNT {
                    view.cursor += 1;
                }
            }
            KeyCode::Enter => {
                view.editing = true;
                match field {
                    Field::Status => {
                        view.status_cursor = STATUS_OPTIONS
                            .iter()
                            .position(|o| *o == data.status)
                            .unwrap_or(0);
                    }
                    _ => view.backup = field_value(data, field).clone(),
                }
            }
            _ => {}
        }
    }
}

pub fn draw_form(
    f: &mut Frame,
    area: Rect,
    data: &FormData,
    view: &FormView,
    highlight: bool,
    cursor_on: bool,
) {
    let mut lines: Vec<Line> = Vec::new();
    for (i, field) in Field::ALL.iter().enumerate() {
        let sel = if i == view.cursor { '›' } else { ' ' };
        let selected = i == view.cursor;
        let value_style = if selected {
            if view.editing {
                crate::theme::text_editing_bold()
            } else {
                crate::theme::text_active_bold()
            }
        } else {
            Style::default()
        };
        match field {
            Field::Status => {
                let summary = if data.status.is_empty() {
                    "(unset)".to_string()
                } else {
                    data.status.clone()
                };
                lines.push(Line::from(vec![
                    Span::raw(format!("{sel} {}: ", field.label())),
                    Span::styled(summary, value_style),
                ]));
                // Options list while editing this field
                if view.editing && selected {
                    for (oi, opt) in STATUS_OPTIONS.iter().enumerate() {
                        let mark = if *opt == data.status { "(•)" } else { "( )" };
                        let cur = if oi == view.status_cursor { '›' } else { ' ' };
                        let shown = if opt.is_empty() { "(unset)" } else { opt };
                        let st = if oi == view.status_cursor {
                            crate::theme::list_cursor_style()
                        } else {
                            crate::theme::text_muted()
                        };
                        lines.push(Line::from(Span::styled(
                            format!("  {cur} {mark} {shown}"),
                            st,
                        )));
                    }
                }
            }
            _ => {
                let mut val = field_value(data, *field).clone();
                if view.editing && selected && cursor_on {
                    val.push('▏');
                }
                lines.push(Line::from(vec![
                    Span::raw(format!("{sel} {}: ", field.label())),
                    Span::styled(val, value_style),
                ]));
            }
        }
    }
    let title = if view.editing {
        "Customer — editing"
    } else {
        "Customer"
    };
    let block = panel_block(title, highlight);
    let p = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    f.render_widget(p, area);
}

/// Plain-text rendering of the form for the clipboard.
pub fn copy_text(data: &FormData) -> String {
    Field::ALL
        .iter()
        .map(|field| format!("{}: {}", field.label(), field_value(data, *field)))
        .collect::<Vec<_>>()
        .join("\n")
}
