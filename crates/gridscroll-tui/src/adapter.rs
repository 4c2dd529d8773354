//! Terminal events to engine input
//!
//! The terminal reports positions in cells; the engine works in logical
//! pixels. [`CellMetrics`] converts between the two.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use gridscroll_core::input::wheel::DELTA_MODE_LINE;
use gridscroll_core::input::{EventTarget, RawWheelEvent};
use gridscroll_core::{InputEvent, PointerKind};

/// Tag reported for presses on table cells
const CELL_TAG: &str = "TD";

/// Pixel size of one terminal cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellMetrics {
    pub width: f64,
    pub height: f64,
}

impl CellMetrics {
    /// Terminal cells are about twice as tall as they are wide
    pub fn from_cell_px(cell_px: f64) -> Self {
        let width = if cell_px > 0.0 { cell_px } else { 1.0 };
        Self {
            width,
            height: width * 2.0,
        }
    }

    pub fn to_px(&self, column: u16, row: u16) -> (f64, f64) {
        (column as f64 * self.width, row as f64 * self.height)
    }

    /// Whole cells covered by a horizontal pixel offset
    pub fn columns(&self, px: f64) -> usize {
        (px / self.width).round().max(0.0) as usize
    }
}

/// Key code the engine's key bindings use for a navigation key
pub fn key_code(key: &KeyEvent) -> Option<u32> {
    let code = match key.code {
        KeyCode::PageUp => 33,
        KeyCode::PageDown => 34,
        KeyCode::End => 35,
        KeyCode::Home => 36,
        KeyCode::Left => 37,
        KeyCode::Up => 38,
        KeyCode::Right => 39,
        KeyCode::Down => 40,
        _ => return None,
    };
    Some(code)
}

pub fn key_input(key: &KeyEvent) -> Option<InputEvent> {
    key_code(key).map(|code| InputEvent::Key { code })
}

fn button_index(button: MouseButton) -> u8 {
    match button {
        MouseButton::Left => 0,
        MouseButton::Middle => 1,
        MouseButton::Right => 2,
    }
}

/// Wheel notch as `(dx, dy)` lines
///
/// Shift turns a vertical notch into a horizontal one, the way desktop
/// browsers do.
pub fn wheel_lines(mouse: &MouseEvent) -> Option<(f64, f64)> {
    let (dx, dy) = match mouse.kind {
        MouseEventKind::ScrollDown => (0.0, 1.0),
        MouseEventKind::ScrollUp => (0.0, -1.0),
        MouseEventKind::ScrollRight => (1.0, 0.0),
        MouseEventKind::ScrollLeft => (-1.0, 0.0),
        _ => return None,
    };
    if mouse.modifiers.contains(KeyModifiers::SHIFT) {
        Some((dy, dx))
    } else {
        Some((dx, dy))
    }
}

pub fn wheel_event(dx: f64, dy: f64) -> InputEvent {
    InputEvent::Wheel(RawWheelEvent::deltas(dx, dy, DELTA_MODE_LINE))
}

/// Convert a mouse event; plain pointer motion has no engine meaning
pub fn mouse_input(mouse: &MouseEvent, metrics: &CellMetrics) -> Option<InputEvent> {
    let (x, y) = metrics.to_px(mouse.column, mouse.row);
    match mouse.kind {
        MouseEventKind::Down(button) => Some(InputEvent::Press {
            kind: PointerKind::Mouse,
            x,
            y,
            button: button_index(button),
            target: EventTarget::tag(CELL_TAG),
        }),
        MouseEventKind::Drag(_) => Some(InputEvent::Move {
            kind: PointerKind::Mouse,
            x,
            y,
        }),
        MouseEventKind::Up(_) => Some(InputEvent::Release {
            kind: PointerKind::Mouse,
            target: EventTarget::tag(CELL_TAG),
        }),
        MouseEventKind::Moved => None,
        _ => wheel_lines(mouse).map(|(dx, dy)| wheel_event(dx, dy)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventKind, KeyEventState};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_navigation_key_codes() {
        assert_eq!(key_code(&key(KeyCode::PageDown)), Some(34));
        assert_eq!(key_code(&key(KeyCode::Left)), Some(37));
        assert_eq!(key_code(&key(KeyCode::Down)), Some(40));
        assert_eq!(key_code(&key(KeyCode::Char('x'))), None);
        assert_eq!(key_input(&key(KeyCode::Home)), Some(InputEvent::Key { code: 36 }));
    }

    #[test]
    fn test_press_scaled_to_pixels() {
        let metrics = CellMetrics::from_cell_px(10.0);
        let event = mouse_input(&mouse(MouseEventKind::Down(MouseButton::Right), 4, 3), &metrics);
        match event {
            Some(InputEvent::Press { kind, x, y, button, .. }) => {
                assert_eq!(kind, PointerKind::Mouse);
                assert_eq!((x, y), (40.0, 60.0));
                assert_eq!(button, 2);
            }
            other => panic!("expected a press, got {:?}", other),
        }
    }

    #[test]
    fn test_drag_and_release() {
        let metrics = CellMetrics::from_cell_px(10.0);
        assert_eq!(
            mouse_input(&mouse(MouseEventKind::Drag(MouseButton::Left), 1, 1), &metrics),
            Some(InputEvent::Move {
                kind: PointerKind::Mouse,
                x: 10.0,
                y: 20.0
            })
        );
        assert!(matches!(
            mouse_input(&mouse(MouseEventKind::Up(MouseButton::Left), 1, 1), &metrics),
            Some(InputEvent::Release { .. })
        ));
        assert_eq!(mouse_input(&mouse(MouseEventKind::Moved, 1, 1), &metrics), None);
    }

    #[test]
    fn test_shift_wheel_scrolls_horizontally() {
        let mut event = mouse(MouseEventKind::ScrollDown, 0, 0);
        assert_eq!(wheel_lines(&event), Some((0.0, 1.0)));
        event.modifiers = KeyModifiers::SHIFT;
        assert_eq!(wheel_lines(&event), Some((1.0, 0.0)));

        let metrics = CellMetrics::from_cell_px(10.0);
        match mouse_input(&event, &metrics) {
            Some(InputEvent::Wheel(raw)) => {
                assert_eq!(raw.delta_x, Some(1.0));
                assert_eq!(raw.delta_mode, Some(DELTA_MODE_LINE));
            }
            other => panic!("expected a wheel event, got {:?}", other),
        }
    }

    #[test]
    fn test_cell_metrics() {
        let metrics = CellMetrics::from_cell_px(0.0);
        assert_eq!(metrics.width, 1.0);
        let metrics = CellMetrics::from_cell_px(10.0);
        assert_eq!(metrics.columns(146.0), 15);
        assert_eq!(metrics.columns(-5.0), 0);
    }
}
