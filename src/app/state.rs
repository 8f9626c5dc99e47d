use std::path::PathBuf;

use anyhow::Result;
use chrono::NaiveDate;
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::{
    app::{
        events::AppEvent,
        settings::{RuntimeSettings, save_runtime_settings},
        tracker::Tracker,
    },
    data::store::CycleStore,
    domain::{
        cycle::Cycle,
        plot::{ChartModel, TemperatureScale},
        timeline::DisplayMode,
    },
    ui::{
        layout::{dashboard_layout, expanded_chart_area},
        theme::Theme,
        widgets::chart::{plotted_indices, point_at},
    },
};

mod input;

use input::{Step, command_char, step_selection};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    Dashboard,
    ExpandedChart,
    History,
    Help,
    Quit,
}

#[derive(Debug)]
pub struct AppState {
    pub mode: AppMode,
    pub running: bool,
    pub settings: RuntimeSettings,
    pub settings_path: Option<PathBuf>,
    pub scale: TemperatureScale,
    pub theme: Theme,
    pub cycles: Vec<Cycle>,
    pub selected_cycle: usize,
    pub history_cursor: usize,
    /// Window index of the reading whose tooltip is showing.
    pub tooltip: Option<usize>,
    pub status: Option<String>,
    pub today: NaiveDate,
    /// Last drawn terminal area, used to hit-test mouse events.
    pub viewport: Rect,
}

impl AppState {
    pub fn new(
        settings: RuntimeSettings,
        settings_path: Option<PathBuf>,
        theme: Theme,
        today: NaiveDate,
    ) -> Self {
        let scale = settings.scale();
        Self {
            mode: AppMode::Dashboard,
            running: true,
            settings,
            settings_path,
            scale,
            theme,
            cycles: Vec::new(),
            selected_cycle: 0,
            history_cursor: 0,
            tooltip: None,
            status: None,
            today,
            viewport: Rect::default(),
        }
    }

    pub fn current_cycle(&self) -> Option<&Cycle> {
        self.cycles.get(self.selected_cycle)
    }

    /// Chart for the current cycle: the dashboard window, or the whole
    /// timeline while the expanded overlay is open.
    pub fn chart_model(&self) -> Option<ChartModel<'_>> {
        let force_full = self.mode == AppMode::ExpandedChart;
        self.current_cycle()
            .map(|cycle| ChartModel::new(cycle, self.settings.display_mode, force_full, self.scale))
    }

    /// Screen area of the chart that currently takes input.
    pub fn chart_area(&self) -> Rect {
        if self.mode == AppMode::ExpandedChart {
            expanded_chart_area(self.viewport)
        } else {
            dashboard_layout(self.viewport).chart
        }
    }

    pub async fn handle_event<S: CycleStore>(
        &mut self,
        event: AppEvent,
        tx: &mpsc::Sender<AppEvent>,
        tracker: &Tracker<S>,
    ) -> Result<()> {
        match event {
            AppEvent::Bootstrap | AppEvent::Reload => self.reload(tracker),
            AppEvent::Input(event) => self.handle_input(event, tx).await?,
            AppEvent::Quit => self.mode = AppMode::Quit,
        }
        Ok(())
    }

    /// Re-reads cycles from the store, keeping the selected cycle when it still exists.
    pub fn reload<S: CycleStore>(&mut self, tracker: &Tracker<S>) {
        let selected_id = self.current_cycle().map(|cycle| cycle.id.clone());
        match tracker.cycles() {
            Ok(cycles) => {
                self.selected_cycle = selected_id
                    .and_then(|id| cycles.iter().position(|cycle| cycle.id == id))
                    .unwrap_or(0);
                info!(count = cycles.len(), user = %tracker.user(), "loaded cycles");
                self.cycles = cycles;
                self.tooltip = None;
                self.status = None;
            }
            Err(err) => {
                warn!(error = %err, "reloading cycles failed");
                self.status = Some(format!("Could not read cycles: {err}"));
            }
        }
    }

    async fn handle_input(&mut self, event: Event, tx: &mpsc::Sender<AppEvent>) -> Result<()> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key, tx).await?,
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Resize(width, height) => {
                self.viewport = Rect::new(0, 0, width, height);
            }
            _ => {}
        }
        Ok(())
    }

    async fn handle_key(&mut self, key: KeyEvent, tx: &mpsc::Sender<AppEvent>) -> Result<()> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            tx.send(AppEvent::Quit).await?;
            return Ok(());
        }

        match self.mode {
            AppMode::Help => {
                if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::F(1)) {
                    self.mode = AppMode::Dashboard;
                }
            }
            AppMode::History => self.handle_history_key(key),
            AppMode::ExpandedChart => match key.code {
                KeyCode::Esc | KeyCode::Char('e') => self.close_expanded(),
                KeyCode::Left => self.step_tooltip(Step::Back),
                KeyCode::Right => self.step_tooltip(Step::Forward),
                _ if command_char(key) == Some('q') => tx.send(AppEvent::Quit).await?,
                _ => {}
            },
            AppMode::Dashboard => match key.code {
                KeyCode::Esc => tx.send(AppEvent::Quit).await?,
                KeyCode::Enter => self.open_expanded(),
                KeyCode::Left => self.step_tooltip(Step::Back),
                KeyCode::Right => self.step_tooltip(Step::Forward),
                KeyCode::F(1) => self.mode = AppMode::Help,
                _ => match command_char(key) {
                    Some('q') => tx.send(AppEvent::Quit).await?,
                    Some('e') => self.open_expanded(),
                    Some('h') => {
                        self.history_cursor = self.selected_cycle;
                        self.mode = AppMode::History;
                    }
                    Some('m') => self.toggle_display_mode(),
                    Some('r') => tx.send(AppEvent::Reload).await?,
                    Some('?') => self.mode = AppMode::Help,
                    _ => {}
                },
            },
            AppMode::Quit => {}
        }
        Ok(())
    }

    fn handle_history_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up => self.history_cursor = self.history_cursor.saturating_sub(1),
            KeyCode::Down => {
                let last = self.cycles.len().saturating_sub(1);
                self.history_cursor = (self.history_cursor + 1).min(last);
            }
            KeyCode::Enter => {
                if self.history_cursor < self.cycles.len() {
                    self.selected_cycle = self.history_cursor;
                    self.tooltip = None;
                }
                self.mode = AppMode::Dashboard;
            }
            KeyCode::Esc => self.mode = AppMode::Dashboard,
            _ if command_char(key) == Some('h') => self.mode = AppMode::Dashboard,
            _ => {}
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        if !matches!(self.mode, AppMode::Dashboard | AppMode::ExpandedChart) {
            return;
        }
        let hovering = matches!(
            mouse.kind,
            MouseEventKind::Moved | MouseEventKind::Down(MouseButton::Left)
        );
        if !hovering {
            return;
        }
        let area = self.chart_area();
        self.tooltip = self
            .chart_model()
            .and_then(|model| point_at(area, &model, mouse.column, mouse.row));
    }

    fn open_expanded(&mut self) {
        let expandable = self.chart_model().map(|model| model.is_expandable());
        match expandable {
            Some(true) => {
                self.mode = AppMode::ExpandedChart;
                self.tooltip = None;
            }
            Some(false) => self.status = Some("The chart already shows the full cycle.".to_string()),
            None => {}
        }
    }

    fn close_expanded(&mut self) {
        self.mode = AppMode::Dashboard;
        self.tooltip = None;
    }

    fn step_tooltip(&mut self, step: Step) {
        let indices = self
            .chart_model()
            .map(|model| plotted_indices(&model))
            .unwrap_or_default();
        self.tooltip = step_selection(&indices, self.tooltip, step);
    }

    fn toggle_display_mode(&mut self) {
        self.settings.display_mode = match self.settings.display_mode {
            DisplayMode::Short => DisplayMode::Full,
            DisplayMode::Full => DisplayMode::Short,
        };
        self.tooltip = None;
        self.status = Some(match self.settings.display_mode {
            DisplayMode::Short => "Showing the last 5 days.".to_string(),
            DisplayMode::Full => "Showing the full cycle.".to_string(),
        });

        if let Some(path) = &self.settings_path
            && let Err(err) = save_runtime_settings(path, &self.settings)
        {
            warn!(error = %err, "saving settings failed");
            self.status = Some(format!("Could not save settings: {err}"));
        }
    }
}
