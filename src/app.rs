use std::sync::Arc;

use ratatui::layout::{Position, Rect};
use tokio::sync::watch;

use crate::animator::FlingAnimator;
use crate::catalog::{AppCatalog, AppEntry};
use crate::clock::Clock;
use crate::config::Config;
use crate::error::GestureResult;
use crate::events::{Action, CellPosition};
use crate::layout::{GridGeometry, GridParams, TerminalLabels};
use crate::log;
use crate::scroll::{PointerEvent, PointerKind, ScrollGestureReducer, ScrollState, SharedScrollState};
use crate::tui;

/// Press that may turn out to be a tap
#[derive(Debug, Clone, Copy)]
struct Press {
    cell: CellPosition,
    moved: bool,
}

pub struct App {
    pub config: Config,
    pub clock: Arc<dyn Clock>,
    pub state: SharedScrollState,
    pub reducer: ScrollGestureReducer,
    pub catalog: AppCatalog,
    pub labels: TerminalLabels,
    pub params: GridParams,
    /// Grid area from the last layout pass
    pub grid_area: Rect,
    pub geometry: GridGeometry,
    geometry_tx: watch::Sender<GridGeometry>,
    /// Scroll offset to draw, as published by the animator
    pub offset: i32,
    pub selected: Option<usize>,
    press: Option<Press>,
    pub last_pointer_x: f32,
    pub last_pointer_cell: CellPosition,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: Config, clock: Arc<dyn Clock>) -> Self {
        let state = SharedScrollState::new();
        let reducer =
            ScrollGestureReducer::new(state.clone(), clock.clone(), config.max_fling_velocity());
        let catalog = AppCatalog::new(state.clone());
        let labels = TerminalLabels {
            cell_width_px: config.cell_width_px(),
            cell_height_px: config.cell_height_px(),
        };
        let params = GridParams::measure(&labels, labels.cell_width_px, std::iter::empty());
        let geometry = GridGeometry {
            tile_width: params.tile_width(),
            rows: 1,
            viewport_width: 0,
        };
        let (geometry_tx, _) = watch::channel(geometry);

        Self {
            config,
            clock,
            state,
            reducer,
            catalog,
            labels,
            params,
            grid_area: Rect::default(),
            geometry,
            geometry_tx,
            offset: 0,
            selected: None,
            press: None,
            last_pointer_x: 0.0,
            last_pointer_cell: CellPosition { column: 0, row: 0 },
            should_quit: false,
        }
    }

    /// Build the renderer-side animator and the channel it draws offsets to.
    pub fn animator(&self) -> (FlingAnimator, watch::Receiver<i32>) {
        let (offset_tx, offset_rx) = watch::channel(self.offset);
        let animator = FlingAnimator::new(
            self.state.clone(),
            self.clock.clone(),
            self.config.fling_deceleration(),
            self.geometry_tx.subscribe(),
            offset_tx,
        );
        (animator, offset_rx)
    }

    pub fn snapshot(&self) -> ScrollState {
        self.state.snapshot()
    }

    pub fn set_apps(&mut self, apps: Vec<AppEntry>) {
        self.selected = None;
        self.catalog.set_apps(apps);
    }

    /// Re-measure tiles after the application list changed.
    pub fn rebuild_params(&mut self) {
        self.params = GridParams::measure(
            &self.labels,
            self.labels.cell_width_px,
            self.catalog.apps().iter().map(|a| a.name.as_str()),
        );
        log::log(&format!(
            "grid rebuilt for {} icons: bubble {}x{}",
            self.catalog.len(),
            self.params.bubble_width,
            self.params.bubble_height
        ));
        self.refresh_geometry();
    }

    /// Recompute the grid area for a frame of `area` and share the geometry.
    pub fn update_layout(&mut self, area: Rect) {
        let [_, grid, _] = tui::ui::split(area);
        self.grid_area = grid;
        self.refresh_geometry();
    }

    fn refresh_geometry(&mut self) {
        let geometry = GridGeometry {
            tile_width: self.params.tile_width(),
            rows: (self.grid_area.height / self.tile_height_cells()).max(1) as u32,
            viewport_width: self.grid_area.width as u32 * self.labels.cell_width_px as u32,
        };
        self.geometry = geometry;
        self.geometry_tx.send_if_modified(|current| {
            if *current == geometry {
                false
            } else {
                *current = geometry;
                true
            }
        });
    }

    pub fn tile_width_cells(&self) -> u16 {
        (self.params.tile_width() / self.labels.cell_width_px as u32) as u16
    }

    /// Icon line plus caption lines.
    pub fn tile_height_cells(&self) -> u16 {
        (self.params.bubble_bitmap_height / self.labels.cell_height_px as u32) as u16 + 1
    }

    /// Displayed offset in whole cells.
    pub fn offset_cells(&self) -> i32 {
        self.offset.div_euclid(self.labels.cell_width_px as i32)
    }

    pub fn column_to_px(&self, column: u16) -> f32 {
        column as f32 * self.labels.cell_width_px as f32
    }

    pub fn grid_contains(&self, cell: CellPosition) -> bool {
        self.grid_area.contains(Position::new(cell.column, cell.row))
    }

    /// Index of the icon drawn at `cell`, if any.
    pub fn tile_at(&self, cell: CellPosition) -> Option<usize> {
        if !self.grid_contains(cell) {
            return None;
        }
        let tile_width = self.tile_width_cells().max(1) as i32;
        let rel_x = (cell.column - self.grid_area.x) as i32 - self.offset_cells();
        if rel_x < 0 {
            return None;
        }
        let row = ((cell.row - self.grid_area.y) / self.tile_height_cells().max(1)) as u32;
        if row >= self.geometry.rows {
            return None;
        }
        let column = (rel_x / tile_width) as u32;
        let index = (column * self.geometry.rows + row) as usize;
        (index < self.catalog.len()).then_some(index)
    }

    pub fn selected_app(&self) -> Option<&AppEntry> {
        self.selected.and_then(|i| self.catalog.apps().get(i))
    }

    /// Apply an action. Gesture protocol errors are returned unchanged.
    pub fn apply(&mut self, action: Action) -> GestureResult<()> {
        match action {
            Action::None => {}
            Action::Quit => self.should_quit = true,
            Action::Pointer { event, cell } => {
                self.dispatch(event, cell).inspect_err(|e| {
                    log::log(&format!("rejected {} while {:?}: {}", event.kind, e.phase(), e));
                })?
            }
            Action::RestartDrag { event, cell } => {
                log::log("press arrived during a drag; cancelling the stale drag");
                let cancel = PointerEvent::cancel(self.last_pointer_x, event.time_ms);
                self.dispatch(cancel, self.last_pointer_cell)?;
                self.dispatch(event, cell)?;
            }
        }
        Ok(())
    }

    fn dispatch(&mut self, event: PointerEvent, cell: CellPosition) -> GestureResult<()> {
        let state = self.reducer.handle(event)?;

        match event.kind {
            PointerKind::Start => {
                self.press = Some(Press { cell, moved: false });
            }
            PointerKind::Move | PointerKind::Outside => {
                if let Some(press) = self.press.as_mut() {
                    press.moved |= press.cell != cell;
                }
            }
            PointerKind::Up => {
                if let Some(press) = self.press.take().filter(|p| !p.moved) {
                    self.selected = self.tile_at(press.cell);
                    if let Some(app) = self.selected_app() {
                        log::log_event(&format!("selected {}", app.name));
                    }
                }
            }
            PointerKind::Cancel => self.press = None,
        }
        if event.kind.is_release() {
            log::log_state(&event.kind.to_string(), &state);
        }

        self.last_pointer_x = event.x as f32;
        self.last_pointer_cell = cell;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::error::GestureError;

    fn app_with(names: &[&str]) -> (App, ManualClock) {
        let clock = ManualClock::at(0);
        let mut app = App::new(Config::default(), Arc::new(clock.clone()));
        app.set_apps(names.iter().map(|n| AppEntry::new(*n)).collect());
        app.rebuild_params();
        app.update_layout(Rect::new(0, 0, 80, 18));
        (app, clock)
    }

    fn pointer(event: PointerEvent, column: u16, row: u16) -> Action {
        Action::Pointer {
            event,
            cell: CellPosition { column, row },
        }
    }

    #[test]
    fn test_layout_geometry() {
        let (app, _) = app_with(&["Files", "Clock"]);
        // Title and status lines take one row each
        assert_eq!(app.grid_area, Rect::new(0, 1, 80, 16));
        assert_eq!(app.tile_height_cells(), 4);
        assert_eq!(app.geometry.rows, 4);
        assert_eq!(app.geometry.viewport_width, 640);
        assert_eq!(app.tile_width_cells(), 8);
    }

    #[test]
    fn test_drag_updates_shared_state() {
        let (mut app, _) = app_with(&["Files"]);

        app.apply(pointer(PointerEvent::start(400.0, 0), 50, 3)).unwrap();
        app.apply(pointer(PointerEvent::moved(320.0, 16), 40, 3)).unwrap();
        app.apply(pointer(PointerEvent::outside(240.0, 32), 30, 0)).unwrap();

        assert_eq!(app.snapshot().scroll_x, -160);
        assert!(app.reducer.is_dragging());
    }

    #[test]
    fn test_tap_selects_tile() {
        let names: Vec<String> = (0..20).map(|i| format!("App {i}")).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let (mut app, _) = app_with(&refs);

        // Second column, second row
        let column = app.tile_width_cells() + 1;
        app.apply(pointer(PointerEvent::start(column as f32 * 8.0, 0), column, 6)).unwrap();
        app.apply(pointer(PointerEvent::up(column as f32 * 8.0, 40), column, 6)).unwrap();

        assert_eq!(app.selected, Some(5));
        assert_eq!(app.selected_app().map(|a| a.name.as_str()), Some("App 5"));
    }

    #[test]
    fn test_drag_does_not_select() {
        let (mut app, _) = app_with(&["Files", "Clock"]);

        app.apply(pointer(PointerEvent::start(16.0, 0), 2, 2)).unwrap();
        app.apply(pointer(PointerEvent::moved(40.0, 10), 5, 2)).unwrap();
        app.apply(pointer(PointerEvent::up(40.0, 20), 5, 2)).unwrap();

        assert_eq!(app.selected, None);
    }

    #[test]
    fn test_tile_at_respects_offset() {
        let names: Vec<String> = (0..40).map(|i| format!("App {i}")).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let (mut app, _) = app_with(&refs);

        let cell = CellPosition { column: 1, row: 1 };
        assert_eq!(app.tile_at(cell), Some(0));

        // Scrolled left by one tile: the second column is now first
        app.offset = -(app.params.tile_width() as i32);
        assert_eq!(app.tile_at(cell), Some(4));

        // Outside the grid
        assert_eq!(app.tile_at(CellPosition { column: 1, row: 0 }), None);
    }

    #[test]
    fn test_restart_drag_cancels_stale_gesture() {
        let (mut app, clock) = app_with(&["Files"]);

        app.apply(pointer(PointerEvent::start(100.0, 0), 12, 2)).unwrap();
        app.apply(pointer(PointerEvent::moved(60.0, 10), 7, 2)).unwrap();
        clock.set(30);
        app.apply(Action::RestartDrag {
            event: PointerEvent::start(200.0, 30),
            cell: CellPosition { column: 25, row: 2 },
        })
        .unwrap();

        let state = app.snapshot();
        assert!(app.reducer.is_dragging());
        assert_eq!(state.fling_time_ms, 30);
        assert_eq!(state.fling_velocity_x, 0);
        assert_eq!(state.current_scroll_x, -40);
    }

    #[test]
    fn test_protocol_errors_surface() {
        let (mut app, _) = app_with(&["Files"]);
        let err = app
            .apply(pointer(PointerEvent::up(0.0, 0), 0, 2))
            .unwrap_err();
        assert_eq!(err, GestureError::NotDragging { kind: PointerKind::Up });
    }

    #[test]
    fn test_set_apps_clears_selection() {
        let (mut app, _) = app_with(&["Files"]);
        app.selected = Some(0);
        app.set_apps(vec![AppEntry::new("Maps")]);
        assert_eq!(app.selected, None);
        assert_eq!(app.snapshot().icon_count, 1);
    }
}
