pub mod layout;
pub mod theme;
pub mod widgets;

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::{
    app::state::{AppMode, AppState},
    domain::{
        dates::{DateStyle, calculate_cycle_day, format_date},
        plot::ChartModel,
        timeline::DisplayMode,
    },
    ui::{
        layout::{centered_rect, dashboard_layout, expanded_chart_area},
        widgets::chart::ChartWidget,
    },
};

const MIN_WIDTH: u16 = 40;
const MIN_HEIGHT: u16 = 22;

pub fn render(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let warning = Paragraph::new(format!(
            "Terminal too small. Resize to at least {MIN_WIDTH}x{MIN_HEIGHT}."
        ))
        .block(Block::default().borders(Borders::ALL).title("basal"));
        frame.render_widget(warning, area);
        return;
    }

    let layout = dashboard_layout(area);
    render_header(frame, layout.header, state);
    render_dashboard_chart(frame, layout.chart, state);
    widgets::records::render(frame, layout.records, state.current_cycle(), &state.theme);
    render_status(frame, layout.status, state);

    match state.mode {
        AppMode::ExpandedChart => render_expanded_chart(frame, expanded_chart_area(area), state),
        AppMode::History => widgets::history::render(
            frame,
            centered_rect(80, 60, area),
            &state.cycles,
            state.history_cursor,
            &state.theme,
        ),
        AppMode::Help => widgets::help::render(frame, centered_rect(70, 70, area), &state.theme),
        AppMode::Dashboard | AppMode::Quit => {}
    }
}

fn render_header(frame: &mut Frame, area: Rect, state: &AppState) {
    let theme = &state.theme;
    let lines = match state.current_cycle() {
        Some(cycle) => {
            let mut title = vec![
                Span::styled(
                    format!("Cycle {}", cycle.id),
                    Style::default()
                        .fg(theme.accent)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!(
                        "  started {}",
                        format_date(Some(cycle.start_date), DateStyle::Long)
                    ),
                    Style::default().fg(theme.text),
                ),
            ];
            if let Some(day) =
                calculate_cycle_day(Some(state.today), Some(cycle.start_date)).filter(|d| *d >= 1)
            {
                title.push(Span::styled(
                    format!("  ·  today is day {day}"),
                    Style::default().fg(theme.info),
                ));
            }
            vec![Line::from(title)]
        }
        None => vec![Line::styled(
            "No cycle yet. Start one with `basal new-cycle --start YYYY-MM-DD`.",
            Style::default().fg(theme.muted_text),
        )],
    };
    frame.render_widget(
        Paragraph::new(lines).style(Style::default().bg(theme.surface)),
        area,
    );
}

fn render_dashboard_chart(frame: &mut Frame, area: Rect, state: &AppState) {
    let Some(model) = dashboard_model(state) else {
        let block = Block::default()
            .borders(Borders::ALL)
            .title("Temperature")
            .border_style(Style::default().fg(state.theme.border));
        frame.render_widget(block, area);
        return;
    };
    let title = match state.settings.display_mode {
        DisplayMode::Short => "Temperature · last 5 days",
        DisplayMode::Full => "Temperature · full cycle",
    };
    let hint = model.is_expandable().then_some("e: full cycle");
    let selected = (state.mode == AppMode::Dashboard)
        .then_some(state.tooltip)
        .flatten();
    frame.render_widget(
        ChartWidget {
            model: &model,
            title: title.to_string(),
            hint,
            selected,
            theme: state.theme,
        },
        area,
    );
}

/// The dashboard keeps its own window underneath the expanded overlay.
fn dashboard_model(state: &AppState) -> Option<ChartModel<'_>> {
    state.current_cycle().map(|cycle| {
        ChartModel::new(cycle, state.settings.display_mode, false, state.scale)
    })
}

fn render_expanded_chart(frame: &mut Frame, area: Rect, state: &AppState) {
    let Some(model) = state.chart_model() else {
        return;
    };
    frame.render_widget(Clear, area);
    frame.render_widget(
        ChartWidget {
            model: &model,
            title: "Temperature · full cycle".to_string(),
            hint: Some("Esc: close"),
            selected: state.tooltip,
            theme: state.theme,
        },
        area,
    );
}

fn render_status(frame: &mut Frame, area: Rect, state: &AppState) {
    let theme = &state.theme;
    let line = match &state.status {
        Some(status) => Line::styled(status.clone(), Style::default().fg(theme.warning)),
        None => Line::styled(
            "? help · h history · m 5-day/full · ←/→ readings · r reload · q quit",
            Style::default().fg(theme.muted_text),
        ),
    };
    frame.render_widget(
        Paragraph::new(line).style(Style::default().bg(theme.surface)),
        area,
    );
}
