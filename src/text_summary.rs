//! Text summary builder for CLI output.
//!
//! Formats the summary projection, convergence statistics and the schedule
//! table as human-readable lines for text mode.

use crate::metrics;
use crate::model::RunResult;
use crate::view::{ResultView, ScheduleRow, Severity, TABLE_HEADER};

/// Pre-formatted lines for text output.
pub(crate) struct TextSummary {
    pub lines: Vec<String>,
}

/// Build a text summary from a result and its projections.
pub(crate) fn build_text_summary(result: &RunResult, view: &ResultView) -> TextSummary {
    let mut lines = Vec::new();
    let s = &view.summary;

    lines.push(format!("Fitness: {}", s.fitness));
    lines.push(format!(
        "Violations: hard {} | soft {}",
        s.hard_count, s.soft_count
    ));
    for v in &s.violations {
        let tag = match v.severity {
            Severity::Hard => "hard",
            Severity::Soft => "soft",
        };
        lines.push(format!("  [{tag}] {}", v.text));
    }

    let p = &result.params_used;
    lines.push(format!(
        "Parameters: G={}, N={}, p_m={}, k={}",
        p.max_generations, p.population_size, p.mutation_rate, p.tournament_size
    ));

    if let Some(c) = metrics::compute_convergence(&result.fitness_history) {
        lines.push(format!(
            "Convergence: {:.1} -> {:.1} over {} generations (best at {}, flat for {})",
            c.initial,
            c.best,
            result.fitness_history.len(),
            c.best_generation,
            c.plateau
        ));
    }

    if let Some((ok, message)) = s.schedule_check.as_ref() {
        let status = if *ok { "OK" } else { "MISMATCH" };
        lines.push(format!("Schedule check: {status} - {message}"));
    }

    if !s.summary_text.trim().is_empty() {
        lines.push(format!("Summary: {}", s.summary_text));
    }
    if !s.explanation.trim().is_empty() {
        lines.push(format!("Note: {}", s.explanation));
    }

    lines.push(String::new());
    lines.extend(format_table(&view.table));

    TextSummary { lines }
}

/// Left-aligned columns sized to the widest cell.
fn format_table(rows: &[ScheduleRow]) -> Vec<String> {
    let mut widths = TABLE_HEADER.map(|h| h.chars().count());
    for row in rows {
        for (w, cell) in widths.iter_mut().zip(row.cells()) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let render = |cells: [&str; 5]| {
        cells
            .iter()
            .zip(widths)
            .map(|(c, w)| format!("{:<w$}", c, w = w))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = Vec::with_capacity(rows.len() + 2);
    out.push(render(TABLE_HEADER));
    out.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("  "),
    );
    out.extend(rows.iter().map(|r| render(r.cells())));
    out
}
