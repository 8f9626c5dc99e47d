use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::ui::theme::Theme;

pub fn render(frame: &mut Frame, area: Rect, theme: &Theme) {
    frame.render_widget(Clear, area);

    let panel_style = Style::default()
        .fg(theme.popup_text)
        .bg(theme.popup_surface);
    let block = Block::default()
        .title("Help")
        .borders(Borders::ALL)
        .style(panel_style)
        .border_style(
            Style::default()
                .fg(theme.popup_border)
                .bg(theme.popup_surface),
        );
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let text = Paragraph::new(help_lines(theme))
        .style(panel_style)
        .wrap(Wrap { trim: true });
    frame.render_widget(text, inner);
}

fn help_lines(theme: &Theme) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    push_section(
        &mut lines,
        theme,
        "Global",
        [
            "q quit  |  Ctrl+C immediate quit",
            "r reload from disk  |  m toggle 5-day / full chart",
            "h cycle history  |  ? toggle help",
        ],
    );
    push_section(
        &mut lines,
        theme,
        "Chart",
        [
            "<-/-> step through readings  |  hover or click a marker",
            "e / Enter open the full cycle  |  Esc close",
        ],
    );
    push_section(
        &mut lines,
        theme,
        "Recording",
        [
            "basal add --date YYYY-MM-DD --temp 36.45",
            "basal new-cycle --start YYYY-MM-DD",
        ],
    );
    lines.push(Line::from(Span::styled(
        "Esc / ? closes this help",
        Style::default()
            .fg(theme.muted_text)
            .add_modifier(Modifier::BOLD),
    )));
    lines
}

fn push_section<const N: usize>(
    lines: &mut Vec<Line<'static>>,
    theme: &Theme,
    title: &'static str,
    body: [&'static str; N],
) {
    lines.push(Line::from(Span::styled(
        title,
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD),
    )));
    lines.extend(body.into_iter().map(Line::from));
    lines.push(Line::from(""));
}
