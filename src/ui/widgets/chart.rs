use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    symbols::Marker,
    text::Line,
    widgets::{
        Block, Borders, Clear, Paragraph, Widget,
        canvas::{Canvas, Line as Stroke, Points},
    },
};

use crate::{
    domain::{
        dates::{DateStyle, format_date},
        plot::{
            ChartModel, GridWeight, LABEL_WIDTH, PLOT_HEIGHT, PathSegment, Plot, VisiblePoint,
            view_width,
        },
        timeline::TimelineEntry,
    },
    export::NO_DATA_MESSAGE,
    ui::{
        layout::{ChartLayout, panel_inner},
        theme::Theme,
    },
};

const MARKER: &str = "●";
const ROW_TITLES: [&str; 4] = ["Date", "Day", "Look", "Feel"];

/// Temperature chart for one window of a cycle, drawn inside a bordered panel.
pub struct ChartWidget<'m, 'a> {
    pub model: &'m ChartModel<'a>,
    pub title: String,
    pub hint: Option<&'static str>,
    pub selected: Option<usize>,
    pub theme: Theme,
}

impl Widget for ChartWidget<'_, '_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut block = Block::default()
            .borders(Borders::ALL)
            .title(self.title.clone())
            .border_style(Style::default().fg(self.theme.border))
            .style(Style::default().fg(self.theme.text).bg(self.theme.surface));
        if let Some(hint) = self.hint {
            block = block.title_bottom(Line::from(format!(" {hint} ")).right_aligned());
        }
        let inner = block.inner(area);
        block.render(area, buf);

        let window = self.model.window();
        match self.model.plot() {
            Plot::NoData => render_empty(inner, buf, &self.theme),
            Plot::Points { points, segments } => {
                let layout = ChartLayout::new(inner, window.len());
                if layout.plot.width == 0 || layout.plot.height == 0 {
                    return;
                }
                render_canvas(&layout, buf, self.model, &segments, &self.theme);
                render_gutter(&layout, buf, self.model, &self.theme);
                render_markers(&layout, buf, &points, self.selected, &self.theme);
                render_label_rows(&layout, buf, window, &self.theme);
                if let Some(point) = self.selected.and_then(|idx| points.get(idx)?.as_ref()) {
                    render_tooltip(&layout, buf, point, &self.theme);
                }
            }
        }
    }
}

/// Index of the plotted point under terminal cell (`x`, `y`) of a chart drawn in `area`.
pub fn point_at(area: Rect, model: &ChartModel<'_>, x: u16, y: u16) -> Option<usize> {
    let window = model.window();
    let Plot::Points { points, .. } = model.plot() else {
        return None;
    };
    let layout = ChartLayout::new(panel_inner(area), window.len());
    let column = layout.column_at(x)?;
    let point = points.get(column)?.as_ref()?;
    let row = layout.row_for(point.y, PLOT_HEIGHT);
    (y.abs_diff(row) <= 1).then_some(column)
}

/// Window indices that carry a reading, left to right.
pub fn plotted_indices(model: &ChartModel<'_>) -> Vec<usize> {
    model
        .window()
        .iter()
        .enumerate()
        .filter(|(_, entry)| entry.temperature().is_some())
        .map(|(idx, _)| idx)
        .collect()
}

fn render_empty(area: Rect, buf: &mut Buffer, theme: &Theme) {
    if area.height == 0 {
        return;
    }
    let middle = Rect::new(area.x, area.y + area.height / 2, area.width, 1);
    Paragraph::new(NO_DATA_MESSAGE)
        .alignment(Alignment::Center)
        .style(Style::default().fg(theme.muted_text))
        .render(middle, buf);
}

fn render_canvas(
    layout: &ChartLayout,
    buf: &mut Buffer,
    model: &ChartModel<'_>,
    segments: &[PathSegment],
    theme: &Theme,
) {
    let right = view_width(layout.columns);
    let gridlines = model.scale.gridlines();
    let flip = |y: f64| PLOT_HEIGHT - y;

    Canvas::default()
        .marker(Marker::Braille)
        .background_color(theme.surface)
        .x_bounds([LABEL_WIDTH, right])
        .y_bounds([0.0, PLOT_HEIGHT])
        .paint(|ctx| {
            for line in gridlines.iter().filter(|g| g.weight.is_labelled()) {
                let color = match line.weight {
                    GridWeight::Whole => theme.grid_major,
                    _ => theme.grid_minor,
                };
                ctx.draw(&Stroke::new(LABEL_WIDTH, flip(line.y), right, flip(line.y), color));
            }
            ctx.layer();
            for segment in segments {
                if let [(x, y)] = segment.points.as_slice() {
                    ctx.draw(&Points {
                        coords: &[(*x, flip(*y))],
                        color: theme.line,
                    });
                }
                for pair in segment.points.windows(2) {
                    let ((x1, y1), (x2, y2)) = (pair[0], pair[1]);
                    ctx.draw(&Stroke::new(x1, flip(y1), x2, flip(y2), theme.line));
                }
            }
        })
        .render(layout.plot, buf);
}

fn render_gutter(layout: &ChartLayout, buf: &mut Buffer, model: &ChartModel<'_>, theme: &Theme) {
    let style = Style::default().fg(theme.muted_text);
    let mut last_row = None;
    for line in model.scale.gridlines().iter().rev() {
        if !line.weight.is_labelled() || !(0.0..=PLOT_HEIGHT).contains(&line.y) {
            continue;
        }
        let row = layout.row_for(line.y, PLOT_HEIGHT);
        if last_row == Some(row) {
            continue;
        }
        last_row = Some(row);
        buf.set_string(layout.gutter.x, row, format!("{:>5.1}", line.temperature), style);
    }
    for (offset, title) in ROW_TITLES.iter().enumerate().take(usize::from(layout.labels.height)) {
        buf.set_string(
            layout.gutter.x,
            layout.labels.y + offset as u16,
            title,
            style.add_modifier(Modifier::BOLD),
        );
    }
}

fn render_markers(
    layout: &ChartLayout,
    buf: &mut Buffer,
    points: &[Option<VisiblePoint<'_, '_>>],
    selected: Option<usize>,
    theme: &Theme,
) {
    for point in points.iter().flatten() {
        let x = layout.column_center(point.index);
        let y = layout.row_for(point.y, PLOT_HEIGHT);
        let style = if selected == Some(point.index) {
            Style::default()
                .fg(theme.highlight)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.marker)
        };
        if let Some(cell) = buf.cell_mut((x, y)) {
            cell.set_symbol(MARKER).set_style(style);
        }
    }
}

fn render_label_rows(
    layout: &ChartLayout,
    buf: &mut Buffer,
    window: &[TimelineEntry<'_>],
    theme: &Theme,
) {
    let styles = [
        Style::default().fg(theme.text),
        Style::default().fg(theme.accent),
        Style::default().fg(theme.muted_text),
        Style::default().fg(theme.muted_text),
    ];
    let stride = label_stride(layout);

    for (offset, style) in styles.iter().enumerate().take(usize::from(layout.labels.height)) {
        let y = layout.labels.y + offset as u16;
        for (idx, entry) in window.iter().enumerate().step_by(stride) {
            let start = layout.column_start(idx);
            let end = layout.column_start((idx + stride).min(window.len()));
            let width = usize::from(end - start).saturating_sub(1);
            if width == 0 {
                continue;
            }
            let text = fit(&row_label(offset, entry), width);
            let pad = (width - text.chars().count()) / 2;
            buf.set_string(start + pad as u16, y, text, *style);
        }
    }
}

fn row_label(row: usize, entry: &TimelineEntry<'_>) -> String {
    match row {
        0 => format_date(entry.date(), DateStyle::DayMonth),
        1 => entry.cycle_day().to_string(),
        2 => entry.mucus_appearance().unwrap_or("-").to_string(),
        _ => entry.mucus_sensation().unwrap_or("-").to_string(),
    }
}

/// Label every `stride`th column so a date always fits.
fn label_stride(layout: &ChartLayout) -> usize {
    const WIDEST_DATE: usize = 6;
    let per_column = usize::from(layout.plot.width) / layout.columns.max(1);
    if per_column >= WIDEST_DATE {
        1
    } else {
        WIDEST_DATE.div_ceil(per_column.max(1))
    }
}

fn fit(text: &str, width: usize) -> String {
    text.chars().take(width).collect()
}

fn render_tooltip(layout: &ChartLayout, buf: &mut Buffer, point: &VisiblePoint<'_, '_>, theme: &Theme) {
    let text = point.tooltip();
    let width = (text.chars().count() as u16 + 4).min(layout.plot.width);
    let height = 3_u16.min(layout.plot.height);
    let anchor_x = layout.column_center(point.index);
    let anchor_y = layout.row_for(point.y, PLOT_HEIGHT);

    let max_x = layout.plot.right().saturating_sub(width);
    let x = anchor_x.saturating_sub(width / 2).clamp(layout.plot.x, max_x.max(layout.plot.x));
    let y = if anchor_y >= layout.plot.y + height {
        anchor_y - height
    } else {
        (anchor_y + 1).min(layout.plot.bottom().saturating_sub(height))
    };
    let area = Rect::new(x, y, width, height);

    Clear.render(area, buf);
    Paragraph::new(text)
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(theme.popup_text)
                .bg(theme.popup_surface),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.popup_border)),
        )
        .render(area, buf);
}
