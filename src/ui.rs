use crate::app::{update, Action, AppMsg, Effect};
use crate::model::{AppConfig, Customer, FormData};
use crate::services::api::{resolve_base_url, spawn_request, ApiClient, ApiEvent};
use crate::widgets::form::{draw_form, handle_form_key, FormView};
use crate::widgets::results::draw_results;
use crate::widgets::status_bar::draw_footer_combined;
use anyhow::{anyhow, Context, Result};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyModifiers,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::prelude::*;
use ratatui::widgets::*;
use std::collections::VecDeque;
use std::fs;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::{Duration, Instant};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlashLevel {
    Info,
    Success,
    Error,
}

/// The single status-message area under the panes.
#[derive(Debug)]
pub struct Flash {
    pub text: String,
    pub level: FlashLevel,
}

#[derive(Default, Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum Focus {
    #[default]
    Form,
    Results,
}

#[derive(Default, Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum View {
    #[default]
    Main,
    Raw,
}

#[derive(Default)]
pub(crate) struct AppState {
    pub(crate) config: AppConfig,
    pub(crate) base_url: String,
    pub(crate) form: FormData,
    pub(crate) form_view: FormView,
    pub(crate) results: Vec<Customer>,
    pub(crate) results_cursor: usize,
    pub(crate) flash: Option<Flash>,
    pub(crate) focus: Focus,
    pub(crate) view: View,
    pub(crate) last_action: Option<Action>,
    // In-flight call count; drives the spinner only. Calls are never
    // queued or cancelled, so responses may race and the last one wins.
    pub(crate) loading: usize,
    pub(crate) tick: u64,
    pub(crate) raw: crate::widgets::raw_view::RawView,
    client: Option<ApiClient>,
    tx: Option<Sender<ApiEvent>>,
    rx: Option<Receiver<ApiEvent>>,
    pub(crate) theme: crate::theme::Theme,
    // Debug log (rendered in the bottom debug pane)
    pub(crate) debug_log: VecDeque<String>,
}

impl AppState {
    pub fn dbg(&mut self, msg: impl Into<String>) {
        const MAX_LOG_LINES: usize = 200;
        if self.debug_log.len() >= MAX_LOG_LINES {
            self.debug_log.pop_front();
        }
        self.debug_log.push_back(msg.into());
    }

    pub(crate) fn flash_success(&mut self, text: impl Into<String>) {
        self.flash = Some(Flash {
            text: text.into(),
            level: FlashLevel::Success,
        });
    }

    pub(crate) fn flash_error(&mut self, text: impl Into<String>) {
        self.flash = Some(Flash {
            text: text.into(),
            level: FlashLevel::Error,
        });
    }

    pub(crate) fn flash_info(&mut self, text: impl Into<String>) {
        self.flash = Some(Flash {
            text: text.into(),
            level: FlashLevel::Info,
        });
    }
}

fn run_effects(state: &mut AppState, effects: Vec<Effect>) {
    for eff in effects {
        match eff {
            Effect::CallApi { action, request } => {
                state.dbg(format!("{} {}", request.method(), request.path()));
                let (Some(client), Some(tx)) = (state.client.clone(), state.tx.clone()) else {
                    continue;
                };
                state.loading += 1;
                spawn_request(client, action, request, tx);
            }
        }
    }
}

fn invoke(state: &mut AppState, action: Action) {
    let effects = update(state, AppMsg::Invoke(action));
    run_effects(state, effects);
}

fn drain_api_events(state: &mut AppState) {
    let mut drained: Vec<ApiEvent> = Vec::new();
    if let Some(rx) = &state.rx {
        while let Ok(ev) = rx.try_recv() {
            drained.push(ev);
        }
    }
    for ev in drained {
        state.loading = state.loading.saturating_sub(1);
        if let Some(raw) = ev.raw {
            state.raw.set_text(raw);
        }
        let effects = update(
            state,
            AppMsg::Completed {
                action: ev.action,
                outcome: ev.outcome,
            },
        );
        run_effects(state, effects);
    }
}

fn env_flag(name: &str) -> bool {
    std::env::var(name)
        .ok()
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true") || v.eq_ignore_ascii_case("yes"))
        .unwrap_or(false)
}

fn config_path() -> Option<PathBuf> {
    if let Ok(p) = std::env::var("CRM_TUI_CONFIG") {
        if !p.is_empty() {
            return Some(PathBuf::from(p));
        }
    }
    let local = PathBuf::from("crm-tui.yaml");
    if local.exists() {
        return Some(local);
    }
    None
}

fn load_config() -> Result<AppConfig> {
    let Some(path) = config_path() else {
        return Ok(AppConfig::default());
    };
    let s = fs::read_to_string(&path).with_context(|| format!("reading {path:?}"))?;
    let cfg: AppConfig =
        serde_yaml::from_str(&s).with_context(|| format!("parsing {path:?}"))?;
    if let Err(e) = crate::model::validate_app_config(&cfg) {
        return Err(anyhow!("invalid config {path:?}: {e}"));
    }
    Ok(cfg)
}

pub fn run() -> Result<()> {
    let cfg = load_config()?;
    let base_url = resolve_base_url(&cfg.base_url);
    let mut state = AppState {
        config: cfg,
        client: Some(ApiClient::new(base_url.clone())),
        base_url,
        theme: crate::theme::Theme::synthwave_dark(),
        ..Default::default()
    };
    let (tx, rx) = mpsc::channel::<ApiEvent>();
    state.tx = Some(tx);
    state.rx = Some(rx);

    // Headless smoke mode
    let headless = env_flag("CRM_TUI_HEADLESS");
    let headless_ticks: u64 = std::env::var("CRM_TUI_TICKS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(10);
    let headless_action: Option<String> = std::env::var("CRM_TUI_HEADLESS_ACTION").ok();
    let headless_summary = env_flag("CRM_TUI_SMOKE_SUMMARY");
    if headless {
        let backend = ratatui::backend::TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend)?;
        let tick_rate = Duration::from_millis(200);
        let mut last_tick = Instant::now();
        let mut action_done = false;
        for _ in 0..headless_ticks {
            if !action_done {
                if let Some(name) = headless_action.as_deref() {
                    if let Some(action) = Action::from_name(name) {
                        invoke(&mut state, action);
                    }
                    action_done = true;
                }
            }
            terminal.draw(|f| ui(f, &mut state))?;
            drain_api_events(&mut state);
            if last_tick.elapsed() >= tick_rate {
                state.tick = state.tick.wrapping_add(1);
                last_tick = Instant::now();
            }
            std::thread::sleep(tick_rate);
        }
        if headless_summary {
            let ok = !matches!(
                &state.flash,
                Some(f) if f.level == FlashLevel::Error
            );
            let summary = serde_json::json!({
                "ok": ok,
                "view": format!("{:?}", state.view),
                "results": state.results.len(),
                "flash": state.flash.as_ref().map(|f| f.text.clone()),
                "action_done": action_done,
            });
            println!("{summary}");
        }
        return Ok(());
    }

    // Setup terminal (interactive)
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    let tick_rate = Duration::from_millis(200);
    let mut last_tick = Instant::now();
    let res = loop {
        terminal.draw(|f| ui(f, &mut state))?;
        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_millis(0));
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if !handle_key(&mut state, key) {
                    break Ok(());
                }
            }
        }
        drain_api_events(&mut state);
        if last_tick.elapsed() >= tick_rate {
            state.tick = state.tick.wrapping_add(1);
            last_tick = Instant::now();
        }
    };
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    res
}

/// Route one key press. Returns false to quit.
fn handle_key(state: &mut AppState, key: KeyEvent) -> bool {
    // While a form field is being edited, every key belongs to the editor
    if state.focus == Focus::Form && state.view == View::Main && state.form_view.editing {
        handle_form_key(&mut state.form, &mut state.form_view, key.code);
        return true;
    }
    match key.code {
        KeyCode::F(n) if (1..=9).contains(&n) => {
            if let Some(action) = crate::widgets::actions::action_for_function_key(n) {
                invoke(state, action);
            }
        }
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            copy_focused_to_clipboard(state);
        }
        KeyCode::Char('q') => return false,
        KeyCode::Char('j') | KeyCode::Char('J') => {
            state.view = match state.view {
                View::Main => View::Raw,
                View::Raw => View::Main,
            };
        }
        KeyCode::Esc if state.view == View::Raw => {
            state.view = View::Main;
        }
        KeyCode::Tab if state.view == View::Main => {
            state.focus = match state.focus {
                Focus::Form => Focus::Results,
                Focus::Results => Focus::Form,
            };
        }
        code => match state.view {
            View::Raw => state.raw.on_key(code),
            View::Main => match state.focus {
                Focus::Form => handle_form_key(&mut state.form, &mut state.form_view, code),
                Focus::Results => handle_results_key(state, code),
            },
        },
    }
    true
}

fn handle_results_key(state: &mut AppState, code: KeyCode) {
    match code {
        KeyCode::Up => {
            if state.results_cursor > 0 {
                state.results_cursor -= 1;
            }
        }
        KeyCode::Down => {
            if state.results_cursor + 1 < state.results.len() {
                state.results_cursor += 1;
            }
        }
        KeyCode::Enter => {
            // Load the selected row into the form
            if let Some(c) = state.results.get(state.results_cursor).cloned() {
                state.form.populate(&c);
            }
        }
        _ => {}
    }
}

fn copy_focused_to_clipboard(state: &mut AppState) {
    let content = match state.view {
        View::Raw => state.raw.text().unwrap_or_default().to_string(),
        View::Main => match state.focus {
            Focus::Form => crate::widgets::form::copy_text(&state.form),
            Focus::Results => crate::widgets::results::copy_text(&state.results),
        },
    };
    if content.is_empty() {
        return;
    }
    if let Ok(mut clipboard) = arboard::Clipboard::new() {
        let _ = clipboard.set_text(&content);
        state.flash_info("Copied to clipboard!");
    }
}

fn ui(f: &mut Frame, state: &mut AppState) {
    // Fill entire screen with theme background
    let screen = f.area();
    let bg = Block::default().style(Style::default().bg(state.theme.bg));
    f.render_widget(bg, screen);

    const DEBUG_H: u16 = 4;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Header
            Constraint::Length(2), // Action bar
            Constraint::Min(0),    // Main content
            Constraint::Length(DEBUG_H),
            Constraint::Length(1), // Footer
        ])
        .split(screen);

    crate::widgets::header::draw_header(f, chunks[0], state);
    crate::widgets::actions::draw_action_bar(f, chunks[1], state);

    match state.view {
        View::Raw => state.raw.render(f, chunks[2], true),
        View::Main => {
            let panes = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
                .split(chunks[2]);
            let cursor_on = state.tick % 2 == 0;
            draw_form(
                f,
                panes[0],
                &state.form,
                &state.form_view,
                state.focus == Focus::Form,
                cursor_on,
            );
            draw_results(
                f,
                panes[1],
                &state.results,
                state.results_cursor,
                state.focus == Focus::Results,
            );
        }
    }

    draw_debug(f, chunks[3], state);

    let help_text = match (state.view, state.focus) {
        (View::Raw, _) => "↑/↓ scroll  PgUp/PgDn  Home/End  w wrap  j back  q quit",
        (View::Main, Focus::Form) => {
            "↑/↓ field  Enter edit  Tab results  F1-F9 actions  j raw  q quit"
        }
        (View::Main, Focus::Results) => {
            "↑/↓ row  Enter load into form  Tab form  F1-F9 actions  j raw  q quit"
        }
    };
    draw_footer_combined(f, chunks[4], state, help_text);
}

fn draw_debug(f: &mut Frame, area: Rect, state: &AppState) {
    let b = Block::default()
        .borders(Borders::TOP)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            "Debug",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        ));
    let h = area.height as usize;
    let mut lines: Vec<Line> = Vec::new();
    let total = state.debug_log.len();
    let start = total.saturating_sub(h);
    for s in state.debug_log.iter().skip(start) {
        lines.push(Line::raw(s.clone()));
    }
    let p = Paragraph::new(lines)
        .style(Style::default().fg(Color::Gray))
        .block(b)
        .wrap(Wrap { trim: true });
    f.render_widget(p, area);
}
