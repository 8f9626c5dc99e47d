use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::Line,
    widgets::{Block, Borders, Paragraph},
};

use crate::{app::commands::record_line, domain::cycle::Cycle, ui::theme::Theme};

/// Newest readings first, as many as fit.
pub fn render(frame: &mut Frame, area: Rect, cycle: Option<&Cycle>, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Records")
        .border_style(Style::default().fg(theme.border))
        .style(Style::default().fg(theme.text).bg(theme.surface));

    let lines = match cycle {
        Some(cycle) if !cycle.records.is_empty() => {
            let mut records = cycle.records.iter().collect::<Vec<_>>();
            records.sort_by_key(|record| std::cmp::Reverse(record.cycle_day));
            records
                .into_iter()
                .map(|record| Line::from(record_line(record)))
                .collect()
        }
        Some(_) => vec![Line::styled(
            "No records yet. Add one with `basal add --date YYYY-MM-DD --temp 36.5`.",
            Style::default().fg(theme.muted_text),
        )],
        None => Vec::new(),
    };

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
