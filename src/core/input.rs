use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};

/// Pointer drag and scroll accumulated between frames, consumed by the orbit camera
#[derive(Debug, Clone, Default)]
pub struct PointerState {
    dragging: bool,
    /// Current mouse position (relative to window)
    position: Option<(f32, f32)>,
    /// Drag movement since last reset
    drag_delta: (f32, f32),
    /// Scroll lines since last reset
    scroll_delta: f32,
}

impl PointerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a Winit WindowEvent and update internal state
    pub fn process_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                self.dragging = *state == ElementState::Pressed;
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.move_to(position.x as f32, position.y as f32);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                self.scroll_delta += match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(p) => p.y as f32 / 40.0,
                };
            }
            WindowEvent::CursorLeft { .. } => {
                self.dragging = false;
                self.position = None;
            }
            _ => {}
        }
    }

    fn move_to(&mut self, x: f32, y: f32) {
        if let (true, Some((old_x, old_y))) = (self.dragging, self.position) {
            self.drag_delta.0 += x - old_x;
            self.drag_delta.1 += y - old_y;
        }
        self.position = Some((x, y));
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn drag_delta(&self) -> (f32, f32) {
        self.drag_delta
    }

    pub fn scroll_delta(&self) -> f32 {
        self.scroll_delta
    }

    /// Clear per-frame deltas (position and drag state persist)
    pub fn reset_deltas(&mut self) {
        self.drag_delta = (0.0, 0.0);
        self.scroll_delta = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_pointer_empty() {
        let pointer = PointerState::new();
        assert!(!pointer.is_dragging());
        assert_eq!(pointer.drag_delta(), (0.0, 0.0));
        assert_eq!(pointer.scroll_delta(), 0.0);
    }

    #[test]
    fn test_moves_without_drag_do_not_accumulate() {
        let mut pointer = PointerState::new();
        pointer.move_to(10.0, 10.0);
        pointer.move_to(30.0, 5.0);
        assert_eq!(pointer.drag_delta(), (0.0, 0.0));
    }

    #[test]
    fn test_drag_accumulates_and_resets() {
        let mut pointer = PointerState::new();
        pointer.move_to(10.0, 10.0);
        pointer.dragging = true;
        pointer.move_to(15.0, 8.0);
        pointer.move_to(20.0, 8.0);
        assert_eq!(pointer.drag_delta(), (10.0, -2.0));

        pointer.reset_deltas();
        assert_eq!(pointer.drag_delta(), (0.0, 0.0));
        assert!(pointer.is_dragging());
    }
}
