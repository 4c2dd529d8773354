use std::cell::Cell;
use std::rc::Rc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use gridscroll_core::scroll::Clock;
use gridscroll_core::{
    AppConfig, Disposition, EventKind, InputEvent, ScrollEngine, ScrollEvent, SystemClock, TargetOffset,
    TaskQueue, ViewportRole,
};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use tracing::debug;

use crate::adapter::{self, CellMetrics};
use crate::event::AppEvent;
use crate::table::{DemoTable, SharedOffset, TableGeometry, NAME_WIDTH};
use crate::theme::Theme;

/// Rows moved per vertical wheel notch
const ROWS_PER_NOTCH: usize = 3;

/// Screen areas of the table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableLayout {
    pub header_name: Rect,
    pub header: Rect,
    pub names: Rect,
    pub body: Rect,
    pub scrollbar: Rect,
    pub status: Rect,
}

impl TableLayout {
    /// Header row, body, proxy scrollbar and status bar, top to bottom
    pub fn split(area: Rect) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(1),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(area);

        let columns = [Constraint::Length(NAME_WIDTH), Constraint::Min(1)];
        let header = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(columns)
            .split(rows[0]);
        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(columns)
            .split(rows[1]);
        let scrollbar = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(columns)
            .split(rows[2]);

        Self {
            header_name: header[0],
            header: header[1],
            names: body[0],
            body: body[1],
            scrollbar: scrollbar[1],
            status: rows[3],
        }
    }
}

/// Terminal demo state: one engine driving header, body and scrollbar
pub struct App<C: Clock = SystemClock> {
    pub engine: ScrollEngine<TaskQueue<C>>,
    pub table: DemoTable,
    pub theme: Theme,
    pub metrics: CellMetrics,
    pub layout: TableLayout,
    pub header: SharedOffset,
    pub body: SharedOffset,
    pub proxy: SharedOffset,
    /// First body row on screen; vertical scrolling belongs to the terminal
    pub row_offset: usize,
    pub status_message: Option<String>,
    pub should_quit: bool,
    geometry: TableGeometry,
    last_signal: Rc<Cell<Option<EventKind>>>,
    drag_input: bool,
    measured: bool,
    /// Last row of a mouse drag, for vertical drags handed back by the engine
    drag_row: Option<u16>,
}

impl App<SystemClock> {
    pub fn new(config: &AppConfig) -> gridscroll_core::Result<Self> {
        Self::with_clock(config, SystemClock::new())
    }
}

impl<C: Clock> App<C> {
    pub fn with_clock(config: &AppConfig, clock: C) -> gridscroll_core::Result<Self> {
        let table = DemoTable::from_config(&config.ui);
        let metrics = CellMetrics::from_cell_px(config.ui.cell_px);
        let geometry = TableGeometry::new(table.clone(), metrics);
        let scheduler = TaskQueue::with_frame_interval(clock, config.ui.frame_interval());
        let mut engine =
            ScrollEngine::new(config.scroll.clone(), scheduler, Box::new(geometry.clone()))?;

        let header = SharedOffset::new();
        let body = SharedOffset::new();
        let proxy = SharedOffset::new();
        engine.attach_viewport(ViewportRole::Header, header.viewport());
        engine.attach_viewport(ViewportRole::Body, body.viewport());
        engine.attach_viewport(ViewportRole::ProxyScrollbar, proxy.viewport());

        let last_signal = Rc::new(Cell::new(None));
        for kind in [
            EventKind::ScrollStart,
            EventKind::ScrollEnd,
            EventKind::ScrollCancel,
            EventKind::Refresh,
        ] {
            let signal = last_signal.clone();
            engine.on(
                kind,
                Box::new(move |event: &ScrollEvent| signal.set(Some(event.kind))),
            );
        }

        Ok(Self {
            engine,
            table,
            theme: Theme::default(),
            metrics,
            layout: TableLayout::default(),
            header,
            body,
            proxy,
            row_offset: 0,
            status_message: None,
            should_quit: false,
            geometry,
            last_signal,
            drag_input: true,
            measured: false,
            drag_row: None,
        })
    }

    /// Adopt a new layout, re-measuring the engine when the body changed size
    ///
    /// The first measurement applies at once; later ones go through the
    /// engine's resize debounce.
    pub fn set_layout(&mut self, layout: TableLayout) {
        self.layout = layout;
        if self.geometry.set_area(layout.body.width, layout.body.height) {
            if self.measured {
                self.engine.handle_event(&InputEvent::Resize);
            } else {
                self.engine.refresh();
                self.measured = true;
            }
        }
        self.clamp_rows();
    }

    /// Fire due frames and timers
    pub fn tick(&mut self) -> usize {
        self.engine.pump()
    }

    /// Whether the loop should poll at frame rate
    pub fn needs_frames(&self) -> bool {
        self.engine.scheduler().pending() > 0
    }

    pub fn last_signal(&self) -> Option<EventKind> {
        self.last_signal.get()
    }

    pub fn drag_input(&self) -> bool {
        self.drag_input
    }

    pub fn visible_rows(&self) -> usize {
        self.layout.body.height as usize
    }

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Key(key) => self.handle_key(key),
            AppEvent::Mouse(mouse) => self.handle_mouse(mouse),
            // The next draw measures the new size
            AppEvent::Resize(_, _) => {}
            AppEvent::Tick => {}
        }
        self.tick();
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('j') => self.scroll_rows(1),
            KeyCode::Char('k') => self.scroll_rows(-1),
            KeyCode::Char('r') => {
                self.engine.refresh();
                self.status_message = Some("Refreshed".to_string());
            }
            KeyCode::Char('e') => {
                if self.engine.state().enabled {
                    self.engine.disable();
                    self.status_message = Some("Scrolling disabled".to_string());
                } else {
                    self.engine.enable();
                    self.status_message = Some("Scrolling enabled".to_string());
                }
            }
            KeyCode::Char('m') => {
                self.drag_input = !self.drag_input;
                if self.drag_input {
                    self.engine.enable_mouse_events();
                } else {
                    self.engine.disable_mouse_events();
                }
                self.status_message = Some(format!(
                    "Mouse drag {}",
                    if self.drag_input { "on" } else { "off" }
                ));
            }
            KeyCode::Char(c @ '1'..='9') => {
                let target = format!("col-{}", c as usize - '1' as usize);
                self.engine
                    .scroll_to_target(&target, None, TargetOffset::Center, TargetOffset::None);
            }
            _ => {
                if let Some(input) = adapter::key_input(&key) {
                    self.status_message = None;
                    if self.engine.handle_event(&input) != Disposition::IGNORED {
                        return;
                    }
                    // Up and Down have no table axis; they move the rows
                    match key.code {
                        KeyCode::Up => self.scroll_rows(-1),
                        KeyCode::Down => self.scroll_rows(1),
                        _ => {}
                    }
                }
            }
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        if self.on_scrollbar(&mouse) {
            if let MouseEventKind::Down(MouseButton::Left) | MouseEventKind::Drag(MouseButton::Left) =
                mouse.kind
            {
                self.scrollbar_seek(mouse.column);
                return;
            }
        }

        if let Some((dx, dy)) = adapter::wheel_lines(&mouse) {
            // Vertical notches scroll the page, horizontal ones the table
            if dx == 0.0 {
                self.scroll_rows(dy as isize * ROWS_PER_NOTCH as isize);
            } else {
                self.engine.handle_event(&adapter::wheel_event(dx, dy));
            }
            return;
        }

        let Some(input) = adapter::mouse_input(&mouse, &self.metrics) else {
            return;
        };
        let disposition = self.engine.handle_event(&input);

        match mouse.kind {
            MouseEventKind::Down(_) => self.drag_row = Some(mouse.row),
            MouseEventKind::Drag(_) => {
                // A vertical drag was handed back: scroll the rows instead
                if !disposition.handled {
                    if let Some(last) = self.drag_row {
                        self.scroll_rows(last as isize - mouse.row as isize);
                    }
                }
                self.drag_row = Some(mouse.row);
            }
            MouseEventKind::Up(_) => self.drag_row = None,
            _ => {}
        }
    }

    fn on_scrollbar(&self, mouse: &MouseEvent) -> bool {
        let area = self.layout.scrollbar;
        mouse.row == area.y && mouse.column >= area.x && mouse.column < area.x + area.width
    }

    /// Jump the proxy scrollbar to `column`, as a native scrollbar would
    fn scrollbar_seek(&mut self, column: u16) {
        let area = self.layout.scrollbar;
        let span = area.width.saturating_sub(1).max(1) as f64;
        let ratio = ((column.saturating_sub(area.x)) as f64 / span).clamp(0.0, 1.0);
        let max_left = -self.engine.state().max_scroll_x;
        let scroll_left = (ratio * max_left).round();
        debug!(scroll_left, "proxy scrollbar moved");
        self.engine.proxy_scrolled(scroll_left);
    }

    pub fn scroll_rows(&mut self, delta: isize) {
        self.row_offset = self.row_offset.saturating_add_signed(delta);
        self.clamp_rows();
    }

    fn clamp_rows(&mut self) {
        let max = self.table.rows.saturating_sub(self.visible_rows());
        self.row_offset = self.row_offset.min(max);
    }

    /// Horizontal offset of a view in whole cells
    pub fn columns_scrolled(&self, offset: &SharedOffset) -> usize {
        self.metrics.columns(offset.left())
    }
}
