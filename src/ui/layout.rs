use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    widgets::{Block, Borders},
};

/// Width of the temperature label gutter, in cells.
pub const GUTTER_WIDTH: u16 = 7;
/// Date, cycle day, appearance and sensation rows under the plot.
pub const LABEL_ROWS: u16 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardLayout {
    pub header: Rect,
    pub chart: Rect,
    pub records: Rect,
    pub status: Rect,
}

#[must_use]
pub fn dashboard_layout(area: Rect) -> DashboardLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(12),
            Constraint::Length(7),
            Constraint::Length(1),
        ])
        .split(area);
    DashboardLayout {
        header: chunks[0],
        chart: chunks[1],
        records: chunks[2],
        status: chunks[3],
    }
}

/// Area of the full-cycle overlay.
#[must_use]
pub fn expanded_chart_area(area: Rect) -> Rect {
    centered_rect(96, 80, area)
}

/// Inside of a bordered panel.
#[must_use]
pub fn panel_inner(area: Rect) -> Rect {
    Block::default().borders(Borders::ALL).inner(area)
}

pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Cell geometry of a chart drawn inside `area`.
///
/// The plot band spans the day columns evenly; the gutter holds the y labels
/// and the row titles of the label rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartLayout {
    pub gutter: Rect,
    pub plot: Rect,
    pub labels: Rect,
    pub columns: usize,
}

impl ChartLayout {
    #[must_use]
    pub fn new(area: Rect, columns: usize) -> Self {
        let label_height = LABEL_ROWS.min(area.height);
        let plot_height = area.height - label_height;
        let gutter_width = GUTTER_WIDTH.min(area.width);
        let plot_width = area.width - gutter_width;
        Self {
            gutter: Rect::new(area.x, area.y, gutter_width, plot_height),
            plot: Rect::new(area.x + gutter_width, area.y, plot_width, plot_height),
            labels: Rect::new(area.x + gutter_width, area.y + plot_height, plot_width, label_height),
            columns,
        }
    }

    /// First cell of column `index`.
    #[must_use]
    pub fn column_start(&self, index: usize) -> u16 {
        let offset = (index * usize::from(self.plot.width)) / self.columns.max(1);
        self.plot.x + offset as u16
    }

    /// Cells available to column `index`.
    #[must_use]
    pub fn column_width(&self, index: usize) -> u16 {
        self.column_start(index + 1) - self.column_start(index)
    }

    /// Cell holding the centre of column `index`.
    #[must_use]
    pub fn column_center(&self, index: usize) -> u16 {
        let doubled = (2 * index + 1) * usize::from(self.plot.width) / (2 * self.columns.max(1));
        self.plot.x + (doubled as u16).min(self.plot.width.saturating_sub(1))
    }

    /// Column under terminal column `x`, if `x` is inside the plot.
    #[must_use]
    pub fn column_at(&self, x: u16) -> Option<usize> {
        if self.columns == 0 || x < self.plot.x || x >= self.plot.right() {
            return None;
        }
        let offset = usize::from(x - self.plot.x);
        Some((offset * self.columns / usize::from(self.plot.width)).min(self.columns - 1))
    }

    /// Terminal row for a y coordinate of the chart view box.
    #[must_use]
    pub fn row_for(&self, y: f64, view_height: f64) -> u16 {
        if self.plot.height == 0 {
            return self.plot.y;
        }
        let rows = f64::from(self.plot.height);
        let offset = (y / view_height * rows).floor().clamp(0.0, rows - 1.0);
        self.plot.y + offset as u16
    }
}
