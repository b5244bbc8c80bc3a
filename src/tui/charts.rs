use ratatui::{
    layout::Rect,
    style::Color,
    style::Style,
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

use crate::metrics::{self, ConvergenceStats};
use crate::view::ResultView;

/// Best-so-far fitness per generation.
pub fn draw_convergence_chart(
    f: &mut Frame,
    area: Rect,
    view: Option<&ResultView>,
    stats: Option<ConvergenceStats>,
) {
    let title = match stats {
        Some(c) => format!(
            "Convergence: {:.1} -> {:.1} (+{:.1}, best at gen {}, flat {})",
            c.initial, c.best, c.improvement, c.best_generation, c.plateau
        ),
        None => "Convergence (best fitness per generation)".to_string(),
    };
    let block = Block::default().borders(Borders::ALL).title(title);

    let points = match view {
        Some(v) if !v.chart.is_empty() => &v.chart,
        _ => {
            let p = Paragraph::new(Line::from(Span::styled(
                "No fitness history yet",
                Style::default().fg(Color::DarkGray),
            )))
            .block(block);
            f.render_widget(p, area);
            return;
        }
    };

    let x_max = points.last().map(|(x, _)| *x).unwrap_or(0.0).max(1.0);
    let [y_min, y_max] = metrics::y_axis_bounds(points);

    let ds = Dataset::default()
        .graph_type(GraphType::Line)
        .marker(symbols::Marker::Braille)
        .style(Style::default().fg(Color::Green))
        .data(points);

    let chart = Chart::new(vec![ds])
        .block(block)
        .x_axis(
            Axis::default()
                .title("generation")
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, x_max])
                .labels(vec![
                    Span::raw("0"),
                    Span::raw(format!("{:.0}", x_max / 2.0)),
                    Span::raw(format!("{:.0}", x_max)),
                ]),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(Color::Gray))
                .bounds([y_min, y_max])
                .labels(vec![
                    Span::raw(format!("{:.1}", y_min)),
                    Span::raw(format!("{:.1}", (y_min + y_max) / 2.0)),
                    Span::raw(format!("{:.1}", y_max)),
                ]),
        );
    f.render_widget(chart, area);
}
