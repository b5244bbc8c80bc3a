use ratatui::{
    layout::Rect,
    style::Color,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

fn key_line(key: &'static str, pad: usize, action: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::raw("  "),
        Span::styled(key, Style::default().fg(Color::Magenta)),
        Span::raw(" ".repeat(pad)),
        Span::raw(action),
    ])
}

pub fn draw_help(area: Rect, f: &mut Frame) {
    let p = Paragraph::new(vec![
        Line::from("Keybinds:"),
        Line::from(vec![
            Span::raw("  "),
            Span::styled("q", Style::default().fg(Color::Magenta)),
            Span::raw(" / "),
            Span::styled("Ctrl-C", Style::default().fg(Color::Magenta)),
            Span::raw("  Quit"),
        ]),
        key_line("r", 11, "Run with current parameters"),
        key_line("d", 11, "Export schedule as PDF"),
        key_line("x", 11, "Export schedule as XLSX"),
        key_line("y", 11, "Copy exported path to clipboard"),
        key_line("tab", 9, "Switch tabs"),
        key_line("?", 11, "Show this help"),
        Line::from(""),
        Line::from("Dashboard tab:"),
        key_line("↑/↓", 9, "Select parameter"),
        key_line("Enter", 7, "Edit / commit parameter"),
        key_line("Esc", 9, "Cancel edit"),
        key_line("←/→", 9, "Select preset"),
        key_line("p", 11, "Apply selected preset"),
        Line::from(""),
        Line::from("Schedule tab:"),
        key_line("↑/↓", 9, "Scroll"),
        Line::from(""),
        Line::from("Values outside the service's accepted ranges are sent as-is;"),
        Line::from("the service reports which field it rejected."),
    ])
    .block(Block::default().borders(Borders::ALL).title("Help"));
    f.render_widget(p, area);
}
