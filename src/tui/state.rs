use crate::model::RunResult;
use crate::orchestrator::RunState;
use crate::params::{ParamField, ParamsStore};
use crate::view::{ResultView, ResultViewer};
use ratatui::{
    style::Color,
    style::Style,
    text::{Line, Span},
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

pub(crate) struct UiState {
    pub tab: usize,
    pub info: String,

    pub params: ParamsStore,
    pub selected_field: usize,
    /// Text being typed for the selected field, if editing
    pub editing: Option<String>,
    pub preset_selected: usize,

    // Mirror of the controller's state, driven by events
    pub run_state: RunState,
    pub run_started: Option<Instant>,
    pub result: Option<Arc<RunResult>>,
    pub error: Option<String>,
    pub viewer: ResultViewer,

    pub service_reachable: Option<bool>,
    pub table_scroll: usize,
    pub output_dir: PathBuf,
    pub last_exported_path: Option<String>,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            tab: 0,
            info: String::new(),
            params: ParamsStore::default(),
            selected_field: 0,
            editing: None,
            preset_selected: 0,
            run_state: RunState::Idle,
            run_started: None,
            result: None,
            error: None,
            viewer: ResultViewer::default(),
            service_reachable: None,
            table_scroll: 0,
            output_dir: PathBuf::from("."),
            last_exported_path: None,
        }
    }
}

impl UiState {
    pub fn selected(&self) -> ParamField {
        ParamField::ALL[self.selected_field.min(ParamField::ALL.len() - 1)]
    }

    pub fn view(&self) -> Option<&ResultView> {
        self.viewer.view()
    }

    /// Re-project after the result slot changed.
    pub fn sync_view(&mut self) {
        let revision = self.viewer.revision();
        self.viewer.sync(self.result.as_ref());
        if self.viewer.revision() != revision {
            self.table_scroll = 0;
        }
    }

    pub fn table_len(&self) -> usize {
        self.view().map(|v| v.table.len()).unwrap_or(0)
    }
}

pub fn push_wrapped_status_kv(
    out: &mut Vec<Line<'static>>,
    label: &str,
    value: &str,
    status_area_width: u16,
) {
    let value = value.trim();
    if value.is_empty() {
        return;
    }

    // Account for borders (2 chars on each side)
    let usable_width = status_area_width.saturating_sub(4).max(1);
    let label_text = format!("{label}:");
    let label_width = label_text.chars().count() as u16;

    let value_chars: Vec<char> = value.chars().collect();
    let mut remaining = value_chars.as_slice();
    let mut first = true;

    while !remaining.is_empty() {
        let line_width = if first {
            usable_width.saturating_sub(label_width + 1).max(1)
        } else {
            usable_width.saturating_sub(2).max(1)
        };

        let chars_to_take = (remaining.len() as u16).min(line_width) as usize;
        let (line_chars, rest) = remaining.split_at(chars_to_take);
        let line_text: String = line_chars.iter().collect();

        if first {
            out.push(Line::from(vec![
                Span::styled(label_text.clone(), Style::default().fg(Color::Gray)),
                Span::raw(" "),
                Span::raw(line_text),
            ]));
            first = false;
        } else {
            out.push(Line::from(vec![Span::raw("  "), Span::raw(line_text)]));
        }

        remaining = rest;
    }
}
