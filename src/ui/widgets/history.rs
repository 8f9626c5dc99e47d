use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, List, ListItem, ListState},
};

use crate::{
    app::commands::{NO_CYCLES_MESSAGE, cycle_summary_line},
    domain::cycle::Cycle,
    ui::theme::Theme,
};

pub fn render(frame: &mut Frame, area: Rect, cycles: &[Cycle], cursor: usize, theme: &Theme) {
    frame.render_widget(Clear, area);

    let panel_style = Style::default()
        .fg(theme.popup_text)
        .bg(theme.popup_surface);
    let block = Block::default()
        .title("History")
        .title_bottom(Line::from(" Up/Down select · Enter open · Esc close ").right_aligned())
        .borders(Borders::ALL)
        .style(panel_style)
        .border_style(Style::default().fg(theme.popup_border));

    if cycles.is_empty() {
        let list = List::new(vec![ListItem::new(NO_CYCLES_MESSAGE)])
            .style(panel_style)
            .block(block);
        frame.render_widget(list, area);
        return;
    }

    let items = cycles
        .iter()
        .map(|cycle| ListItem::new(cycle_summary_line(cycle)))
        .collect::<Vec<_>>();
    let mut list_state = ListState::default().with_selected(Some(cursor.min(cycles.len() - 1)));
    let list = List::new(items)
        .style(panel_style)
        .highlight_style(
            Style::default()
                .fg(theme.highlight)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("› ")
        .block(block);
    // The list state scrolls the selection into view.
    frame.render_stateful_widget(list, area, &mut list_state);
}
