mod charts;
mod export;
mod help;
mod state;

use crate::api::ApiClient;
use crate::cli::Cli;
use crate::export::ExportKind;
use crate::model::{RunEvent, RunResult};
use crate::orchestrator::{self, RunState, UiCommand};
use crate::params::{ParamField, ParamsStore};
use crate::view::Severity;
use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Tabs},
    Terminal,
};
use state::{push_wrapped_status_kv, UiState};
use std::sync::Arc;
use std::{io, time::Duration, time::Instant};
use tokio::sync::mpsc;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

const TAB_COUNT: usize = 3;

/// What the input loop should do after a key press.
#[derive(Debug)]
enum KeyAction {
    None,
    Send(UiCommand),
    Quit,
}

pub async fn run(args: Cli) -> Result<()> {
    // Unbounded channels avoid backpressure between the UI thread and the runtime.
    let (event_tx, event_rx) = mpsc::unbounded_channel::<RunEvent>();
    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel::<UiCommand>();

    let client = ApiClient::new(&crate::cli::build_client_config(&args))?;
    let store = crate::cli::build_params_store(&args, &client).await?;
    let initial = args.run_on_launch.then(|| store.current());

    // TUI runs in a dedicated thread to keep all blocking I/O out of the Tokio runtime.
    let ui_args = args.clone();
    let ui_handle = std::thread::spawn(move || run_threaded(ui_args, store, event_rx, cmd_tx));

    let res = orchestrator::run_controller(client, initial, event_tx, cmd_rx).await;

    let join_res = tokio::task::spawn_blocking(move || ui_handle.join()).await;
    if let Ok(joined) = join_res {
        match joined {
            Ok(Ok(())) => {}
            Ok(Err(e)) => return Err(e),
            Err(_) => return Err(anyhow::anyhow!("TUI thread panicked")),
        }
    }

    res
}

/// Run the TUI loop on a dedicated thread.
pub fn run_threaded(
    args: Cli,
    params: ParamsStore,
    mut event_rx: UnboundedReceiver<RunEvent>,
    cmd_tx: UnboundedSender<UiCommand>,
) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).ok();

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;
    terminal.clear().ok();

    // UiState is owned by the UI thread only; no cross-thread mutation.
    let mut state = UiState {
        params,
        output_dir: args.output_dir.clone(),
        ..Default::default()
    };

    let tick_rate = Duration::from_millis(100);
    let mut last_tick = Instant::now();

    let res = loop {
        while let Ok(ev) = event_rx.try_recv() {
            match ev {
                RunEvent::RunSucceeded { result } => {
                    handle_run_succeeded(&args, &mut state, result);
                }
                other => apply_event(&mut state, other),
            }
        }

        if last_tick.elapsed() >= tick_rate {
            terminal.draw(|f| draw(f.area(), f, &state)).ok();
            last_tick = Instant::now();
        }

        // Poll input with a short timeout to avoid blocking the render loop.
        if event::poll(Duration::from_millis(10)).unwrap_or(false) {
            if let Ok(Event::Key(k)) = event::read() {
                if k.kind != KeyEventKind::Press {
                    continue;
                }
                match handle_key(&mut state, k) {
                    KeyAction::None => {}
                    KeyAction::Send(cmd) => {
                        let _ = cmd_tx.send(cmd);
                    }
                    KeyAction::Quit => {
                        let _ = cmd_tx.send(UiCommand::Quit);
                        break Ok(());
                    }
                }
            }
        }
    };

    disable_raw_mode().ok();
    let mut stdout = io::stdout();
    execute!(stdout, LeaveAlternateScreen).ok();
    res
}

fn apply_event(state: &mut UiState, ev: RunEvent) {
    match ev {
        RunEvent::PresetsLoaded { presets } => {
            state.info = format!("Loaded {} preset(s)", presets.len());
            state.params.set_presets(presets);
            state.preset_selected = 0;
        }
        RunEvent::ServiceHealth { reachable } => {
            state.service_reachable = Some(reachable);
            if !reachable {
                state.info = "Service not reachable; runs will fail until it is up".into();
            }
        }
        RunEvent::RunStarted { params } => {
            state.run_state = RunState::Running;
            state.run_started = Some(Instant::now());
            state.result = None;
            state.error = None;
            state.sync_view();
            state.info = format!(
                "Running: G={}, N={}, p_m={}, k={}",
                params.max_generations,
                params.population_size,
                params.mutation_rate,
                params.tournament_size
            );
        }
        RunEvent::RunSucceeded { result } => {
            state.run_state = RunState::Succeeded;
            state.info = format!("Run finished: fitness {}", result.evaluation.fitness);
            state.result = Some(result);
            state.sync_view();
        }
        RunEvent::RunFailed { message } => {
            state.run_state = RunState::Failed;
            state.info = format!("Run failed: {message}");
            state.error = Some(message);
            state.result = None;
            state.sync_view();
        }
        RunEvent::Info(msg) => state.info = msg,
    }
}

/// Apply a finished run, then any exports requested on the command line.
fn handle_run_succeeded(args: &Cli, state: &mut UiState, result: Arc<RunResult>) {
    apply_event(state, RunEvent::RunSucceeded {
        result: Arc::clone(&result),
    });
    let processed = orchestrator::process_run_completion(args, &result);
    if let Some(path) = processed.exported.last() {
        state.last_exported_path = Some(path.to_string_lossy().to_string());
    }
    if !processed.export_messages.is_empty() {
        state.info = processed.export_messages.join("; ");
    }
}

fn handle_key(state: &mut UiState, k: KeyEvent) -> KeyAction {
    if k.modifiers.contains(KeyModifiers::CONTROL) && k.code == KeyCode::Char('c') {
        return KeyAction::Quit;
    }
    if state.editing.is_some() {
        handle_edit_key(state, k.code);
        return KeyAction::None;
    }

    match (k.modifiers, k.code) {
        (_, KeyCode::Char('q')) => return KeyAction::Quit,
        (_, KeyCode::Char('r')) => {
            if state.run_state == RunState::Running {
                state.info = "A run is already in progress".into();
            } else {
                let params = state.params.current();
                let outside = params.out_of_range();
                state.info = if outside.is_empty() {
                    "Run requested…".into()
                } else {
                    format!(
                        "Run requested… (outside accepted range: {})",
                        outside.join(", ")
                    )
                };
                return KeyAction::Send(UiCommand::Run(params));
            }
        }
        (_, KeyCode::Char('d')) => export::export_current(state, ExportKind::Document),
        (_, KeyCode::Char('x')) => export::export_current(state, ExportKind::Spreadsheet),
        (_, KeyCode::Char('y')) => export::copy_exported_path(state),
        (_, KeyCode::Char('p')) => {
            let idx = state.preset_selected;
            match state.params.apply_preset_at(idx) {
                Some(_) => {
                    state.info = format!(
                        "Applied preset {}: {}",
                        idx + 1,
                        state.params.presets()[idx].label()
                    );
                }
                None => state.info = "No presets loaded".into(),
            }
        }
        (_, KeyCode::Left) => {
            let n = state.params.presets().len();
            if n > 0 {
                state.preset_selected = (state.preset_selected + n - 1) % n;
            }
        }
        (_, KeyCode::Right) => {
            let n = state.params.presets().len();
            if n > 0 {
                state.preset_selected = (state.preset_selected + 1) % n;
            }
        }
        (_, KeyCode::Tab) => state.tab = (state.tab + 1) % TAB_COUNT,
        (_, KeyCode::Char('?')) => state.tab = 2,
        (_, KeyCode::Up) | (_, KeyCode::Char('k')) => match state.tab {
            0 => state.selected_field = state.selected_field.saturating_sub(1),
            1 => state.table_scroll = state.table_scroll.saturating_sub(1),
            _ => {}
        },
        (_, KeyCode::Down) | (_, KeyCode::Char('j')) => match state.tab {
            0 => {
                state.selected_field = (state.selected_field + 1).min(ParamField::ALL.len() - 1)
            }
            1 => {
                if state.table_scroll + 1 < state.table_len() {
                    state.table_scroll += 1;
                }
            }
            _ => {}
        },
        (_, KeyCode::Enter) => {
            if state.tab == 0 {
                let field = state.selected();
                state.editing = Some(field.value_of(&state.params.current()));
                state.info = format!("Editing {} (Enter to commit, Esc to cancel)", field.label());
            }
        }
        _ => {}
    }
    KeyAction::None
}

fn handle_edit_key(state: &mut UiState, code: KeyCode) {
    let Some(buf) = state.editing.as_mut() else {
        return;
    };
    match code {
        KeyCode::Char(c) => buf.push(c),
        KeyCode::Backspace => {
            buf.pop();
        }
        KeyCode::Esc => {
            state.editing = None;
            state.info = "Edit cancelled".into();
        }
        KeyCode::Enter => {
            let raw = state.editing.take().unwrap_or_default();
            let field = state.selected();
            state.info = match state.params.set_field(field, &raw) {
                Ok(()) => format!(
                    "{} = {}",
                    field.label(),
                    field.value_of(&state.params.current())
                ),
                Err(e) => e.to_string(),
            };
        }
        _ => {}
    }
}

fn draw(area: Rect, f: &mut ratatui::Frame, state: &UiState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)].as_ref())
        .split(area);

    let tabs = Tabs::new(vec![
        Line::from("Dashboard"),
        Line::from("Schedule"),
        Line::from("Help"),
    ])
    .select(state.tab)
    .block(Block::default().borders(Borders::ALL).title("schedule-cli"))
    .highlight_style(Style::default().fg(Color::Yellow));
    f.render_widget(tabs, chunks[0]);

    match state.tab {
        0 => draw_dashboard(chunks[1], f, state),
        1 => draw_schedule(chunks[1], f, state),
        _ => help::draw_help(chunks[1], f),
    }
}

fn draw_dashboard(area: Rect, f: &mut ratatui::Frame, state: &UiState) {
    let main = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(9), // Parameters + run summary
                Constraint::Min(6),    // Chart + violations
                Constraint::Length(6), // Status
            ]
            .as_ref(),
        )
        .split(area);

    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)].as_ref())
        .split(main[0]);
    draw_parameters(top[0], f, state);
    draw_run_summary(top[1], f, state);

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)].as_ref())
        .split(main[1]);
    let stats = state
        .result
        .as_ref()
        .and_then(|r| crate::metrics::compute_convergence(&r.fitness_history));
    charts::draw_convergence_chart(f, middle[0], state.view(), stats);
    draw_violations(middle[1], f, state);

    draw_status(main[2], f, state);
}

fn draw_parameters(area: Rect, f: &mut ratatui::Frame, state: &UiState) {
    let current = state.params.current();
    let outside = current.out_of_range();
    let mut lines: Vec<Line> = Vec::new();

    for (i, field) in ParamField::ALL.iter().enumerate() {
        let selected = i == state.selected_field;
        let value = match (&state.editing, selected) {
            (Some(buf), true) => format!("{buf}▏"),
            _ => field.value_of(&current),
        };
        let marker = if selected { "▶ " } else { "  " };
        let value_style = if outside.contains(&field.name()) {
            Style::default().fg(Color::Red)
        } else if selected && state.editing.is_some() {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        lines.push(Line::from(vec![
            Span::raw(marker),
            Span::styled(format!("{:<22}", field.label()), Style::default().fg(Color::Gray)),
            Span::styled(value, value_style),
        ]));
    }

    lines.push(Line::from(""));
    let presets = state.params.presets();
    if presets.is_empty() {
        lines.push(Line::from(Span::styled(
            "Presets: none loaded",
            Style::default().fg(Color::DarkGray),
        )));
    } else {
        let idx = state.preset_selected.min(presets.len() - 1);
        lines.push(Line::from(vec![
            Span::styled(
                format!("Preset {}/{}: ", idx + 1, presets.len()),
                Style::default().fg(Color::Gray),
            ),
            Span::raw(presets[idx].label()),
        ]));
    }

    let p = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Parameters"));
    f.render_widget(p, area);
}

fn draw_run_summary(area: Rect, f: &mut ratatui::Frame, state: &UiState) {
    let (state_text, state_color) = match state.run_state {
        RunState::Idle => ("Idle".to_string(), Color::Gray),
        RunState::Running => {
            let secs = state.run_started.map(|t| t.elapsed().as_secs()).unwrap_or(0);
            (format!("Running ({secs}s)"), Color::Yellow)
        }
        RunState::Succeeded => ("Succeeded".to_string(), Color::Green),
        RunState::Failed => ("Failed".to_string(), Color::Red),
    };
    let service = match state.service_reachable {
        Some(true) => Span::styled("reachable", Style::default().fg(Color::Green)),
        Some(false) => Span::styled("unreachable", Style::default().fg(Color::Red)),
        None => Span::styled("checking…", Style::default().fg(Color::DarkGray)),
    };

    let mut lines = vec![
        Line::from(vec![
            Span::styled("State: ", Style::default().fg(Color::Gray)),
            Span::styled(state_text, Style::default().fg(state_color)),
        ]),
        Line::from(vec![
            Span::styled("Service: ", Style::default().fg(Color::Gray)),
            service,
        ]),
    ];

    if let Some(view) = state.view() {
        let s = &view.summary;
        lines.push(Line::from(vec![
            Span::styled("Fitness: ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("{}", s.fitness),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]));
        lines.push(Line::from(vec![
            Span::styled("Violations: ", Style::default().fg(Color::Gray)),
            Span::styled(format!("hard {}", s.hard_count), Style::default().fg(Color::Red)),
            Span::raw(" | "),
            Span::styled(format!("soft {}", s.soft_count), Style::default().fg(Color::Yellow)),
        ]));
        if let Some((ok, message)) = s.schedule_check.as_ref() {
            let color = if *ok { Color::Green } else { Color::Red };
            lines.push(Line::from(vec![
                Span::styled("Schedule: ", Style::default().fg(Color::Gray)),
                Span::styled(message.clone(), Style::default().fg(color)),
            ]));
        }
    }

    let p = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Run"));
    f.render_widget(p, area);
}

fn draw_violations(area: Rect, f: &mut ratatui::Frame, state: &UiState) {
    let lines: Vec<Line> = match state.view() {
        Some(view) if view.summary.violations.is_empty() => {
            vec![Line::from(Span::styled(
                "No violations",
                Style::default().fg(Color::Green),
            ))]
        }
        Some(view) => view
            .summary
            .violations
            .iter()
            .map(|v| {
                let (tag, color) = match v.severity {
                    Severity::Hard => ("H ", Color::Red),
                    Severity::Soft => ("S ", Color::Yellow),
                };
                Line::from(vec![
                    Span::styled(tag, Style::default().fg(color)),
                    Span::raw(v.text.clone()),
                ])
            })
            .collect(),
        None => vec![Line::from(Span::styled(
            "-",
            Style::default().fg(Color::DarkGray),
        ))],
    };
    let p = Paragraph::new(lines)
        .wrap(ratatui::widgets::Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Violations"));
    f.render_widget(p, area);
}

fn draw_status(area: Rect, f: &mut ratatui::Frame, state: &UiState) {
    let mut lines: Vec<Line<'static>> = Vec::new();
    push_wrapped_status_kv(&mut lines, "Info", &state.info, area.width);
    if let Some(err) = state.error.as_deref() {
        push_wrapped_status_kv(&mut lines, "Error", err, area.width);
    }
    if let Some(view) = state.view() {
        push_wrapped_status_kv(&mut lines, "Summary", &view.summary.summary_text, area.width);
        push_wrapped_status_kv(&mut lines, "Note", &view.summary.explanation, area.width);
    }
    let p = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Status"));
    f.render_widget(p, area);
}

fn draw_schedule(area: Rect, f: &mut ratatui::Frame, state: &UiState) {
    let Some(view) = state.view() else {
        let p = Paragraph::new(Line::from(Span::styled(
            "No completed run yet. Press r to run.",
            Style::default().fg(Color::DarkGray),
        )))
        .block(Block::default().borders(Borders::ALL).title("Schedule"));
        f.render_widget(p, area);
        return;
    };

    let header = Row::new(
        crate::view::TABLE_HEADER
            .iter()
            .map(|h| Cell::from(*h).style(Style::default().add_modifier(Modifier::BOLD))),
    );
    let rows = view
        .table
        .iter()
        .skip(state.table_scroll)
        .map(|r| Row::new(r.cells().map(|c| Cell::from(c.to_string()))));
    let widths = [
        Constraint::Percentage(14),
        Constraint::Percentage(30),
        Constraint::Percentage(24),
        Constraint::Percentage(12),
        Constraint::Percentage(20),
    ];
    let title = format!(
        "Schedule ({} rows, {}/{})",
        view.table.len(),
        (state.table_scroll + 1).min(view.table.len()),
        view.table.len()
    );
    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(table, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Parameters, Preset};
    use crate::view::tests::sample_result;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(state: &mut UiState, text: &str) {
        for c in text.chars() {
            handle_key(state, key(KeyCode::Char(c)));
        }
    }

    fn state_in(dir: &std::path::Path) -> UiState {
        UiState {
            output_dir: dir.to_path_buf(),
            ..Default::default()
        }
    }

    #[test]
    fn export_keys_without_result_write_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state_in(dir.path());

        handle_key(&mut state, key(KeyCode::Char('d')));
        assert_eq!(state.info, export::NOTHING_TO_EXPORT);
        handle_key(&mut state, key(KeyCode::Char('x')));
        assert_eq!(state.info, export::NOTHING_TO_EXPORT);

        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
        assert!(state.last_exported_path.is_none());
    }

    #[test]
    fn export_key_with_result_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state_in(dir.path());
        apply_event(
            &mut state,
            RunEvent::RunSucceeded {
                result: Arc::new(sample_result()),
            },
        );

        handle_key(&mut state, key(KeyCode::Char('x')));
        let path = state.last_exported_path.clone().expect("exported path");
        assert!(path.ends_with(".xlsx"));
        assert!(std::path::Path::new(&path).exists());
        assert!(state.info.starts_with("Exported XLSX"));
    }

    #[test]
    fn run_key_sends_current_parameters_once() {
        let mut state = UiState::default();
        match handle_key(&mut state, key(KeyCode::Char('r'))) {
            KeyAction::Send(UiCommand::Run(p)) => assert_eq!(p, Parameters::default()),
            other => panic!("unexpected {other:?}"),
        }

        apply_event(
            &mut state,
            RunEvent::RunStarted {
                params: Parameters::default(),
            },
        );
        assert!(matches!(
            handle_key(&mut state, key(KeyCode::Char('r'))),
            KeyAction::None
        ));
        assert!(state.info.contains("already in progress"));
    }

    #[test]
    fn out_of_range_values_are_still_sent() {
        let mut state = UiState::default();
        state.selected_field = 3;
        handle_key(&mut state, key(KeyCode::Enter));
        handle_key(&mut state, key(KeyCode::Backspace));
        type_text(&mut state, "99");
        handle_key(&mut state, key(KeyCode::Enter));

        match handle_key(&mut state, key(KeyCode::Char('r'))) {
            KeyAction::Send(UiCommand::Run(p)) => assert_eq!(p.tournament_size, 99),
            other => panic!("unexpected {other:?}"),
        }
        assert!(state.info.contains("tournament_size"));
    }

    #[test]
    fn invalid_edit_leaves_parameters_unchanged() {
        let mut state = UiState::default();
        handle_key(&mut state, key(KeyCode::Down));
        handle_key(&mut state, key(KeyCode::Enter));
        assert_eq!(state.editing.as_deref(), Some("60"));

        // 'q' is text while editing, not quit.
        handle_key(&mut state, key(KeyCode::Backspace));
        handle_key(&mut state, key(KeyCode::Backspace));
        type_text(&mut state, "abq");
        handle_key(&mut state, key(KeyCode::Enter));
        assert!(state.editing.is_none());
        assert_eq!(state.params.current(), Parameters::default());
        assert!(state.info.contains("population_size"));

        handle_key(&mut state, key(KeyCode::Enter));
        handle_key(&mut state, key(KeyCode::Backspace));
        handle_key(&mut state, key(KeyCode::Backspace));
        type_text(&mut state, "120");
        handle_key(&mut state, key(KeyCode::Esc));
        assert_eq!(state.params.current().population_size, 60);

        handle_key(&mut state, key(KeyCode::Enter));
        handle_key(&mut state, key(KeyCode::Backspace));
        handle_key(&mut state, key(KeyCode::Backspace));
        type_text(&mut state, "120");
        handle_key(&mut state, key(KeyCode::Enter));
        assert_eq!(state.params.current().population_size, 120);
    }

    #[test]
    fn preset_selection_wraps_and_applies() {
        let mut state = UiState::default();
        handle_key(&mut state, key(KeyCode::Char('p')));
        assert_eq!(state.info, "No presets loaded");

        let presets = vec![
            Preset {
                max_generations: 200,
                population_size: 60,
                mutation_rate: 0.2,
                tournament_size: 3,
            },
            Preset {
                max_generations: 800,
                population_size: 80,
                mutation_rate: 0.1,
                tournament_size: 5,
            },
        ];
        apply_event(&mut state, RunEvent::PresetsLoaded { presets });
        handle_key(&mut state, key(KeyCode::Left));
        assert_eq!(state.preset_selected, 1);
        handle_key(&mut state, key(KeyCode::Char('p')));
        assert_eq!(state.params.current().max_generations, 800);
        handle_key(&mut state, key(KeyCode::Right));
        assert_eq!(state.preset_selected, 0);
    }

    #[test]
    fn run_events_drive_result_slot() {
        let mut state = UiState::default();
        apply_event(
            &mut state,
            RunEvent::RunSucceeded {
                result: Arc::new(sample_result()),
            },
        );
        assert_eq!(state.run_state, RunState::Succeeded);
        assert_eq!(state.table_len(), 3);

        apply_event(
            &mut state,
            RunEvent::RunStarted {
                params: Parameters::default(),
            },
        );
        assert!(state.result.is_none());
        assert!(state.view().is_none());

        apply_event(
            &mut state,
            RunEvent::RunFailed {
                message: "invalid population_size".into(),
            },
        );
        assert_eq!(state.run_state, RunState::Failed);
        assert_eq!(state.error.as_deref(), Some("invalid population_size"));
        assert!(state.view().is_none());
    }

    #[test]
    fn quit_keys() {
        let mut state = UiState::default();
        assert!(matches!(
            handle_key(&mut state, key(KeyCode::Char('q'))),
            KeyAction::Quit
        ));
        state.editing = Some(String::new());
        assert!(matches!(
            handle_key(
                &mut state,
                KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)
            ),
            KeyAction::Quit
        ));
    }
}
