use sdl2::EventPump;
use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::mouse::MouseButton;
use std::collections::HashSet;

/// A discrete input event collected during one frame
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// The window was asked to close
    Quit,
    KeyDown(Keycode),
    /// Text typed since the last frame (already composed by SDL)
    Text(String),
    /// Left mouse button pressed at logical coordinates
    Click { x: i32, y: i32 },
}

/// Everything a loop needs to know about input for a single tick
///
/// Discrete events arrive in the order SDL delivered them; `held` is the
/// keyboard state sampled after the events were drained.
#[derive(Debug, Clone, Default)]
pub struct InputSnapshot {
    pub events: Vec<InputEvent>,
    pub held: HashSet<Keycode>,
    pub pointer: (i32, i32),
}

impl InputSnapshot {
    pub fn quit_requested(&self) -> bool {
        self.events.iter().any(|e| matches!(e, InputEvent::Quit))
    }

    /// True if `key` went down this frame
    pub fn key_pressed(&self, key: Keycode) -> bool {
        self.keys_pressed().any(|k| k == key)
    }

    /// Keys that went down this frame, in order
    pub fn keys_pressed(&self) -> impl Iterator<Item = Keycode> + '_ {
        self.events.iter().filter_map(|e| match e {
            InputEvent::KeyDown(key) => Some(*key),
            _ => None,
        })
    }

    /// True while `key` is held down
    pub fn is_held(&self, key: Keycode) -> bool {
        self.held.contains(&key)
    }

    /// -1, 0 or 1 depending on which of two opposing keys is held
    pub fn axis(&self, negative: Keycode, positive: Keycode) -> i32 {
        i32::from(self.is_held(positive)) - i32::from(self.is_held(negative))
    }

    /// Left-click positions this frame, in order
    pub fn clicks(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.events.iter().filter_map(|e| match e {
            InputEvent::Click { x, y } => Some((*x, *y)),
            _ => None,
        })
    }
}

/// Builders for hand-made snapshots in tests
#[cfg(test)]
impl InputSnapshot {
    pub fn with_key_down(mut self, key: Keycode) -> Self {
        self.events.push(InputEvent::KeyDown(key));
        self
    }

    pub fn with_held(mut self, key: Keycode) -> Self {
        self.held.insert(key);
        self
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.events.push(InputEvent::Text(text.to_string()));
        self
    }

    pub fn with_click(mut self, x: i32, y: i32) -> Self {
        self.events.push(InputEvent::Click { x, y });
        self.pointer = (x, y);
        self
    }

    pub fn with_quit(mut self) -> Self {
        self.events.push(InputEvent::Quit);
        self
    }
}

/// InputSystem turns SDL2 events into [`InputSnapshot`]s
///
/// It remembers the last pointer position across frames because SDL only
/// reports it when the mouse moves.
pub struct InputSystem {
    pointer: (i32, i32),
}

impl InputSystem {
    pub fn new() -> Self {
        InputSystem { pointer: (0, 0) }
    }

    /// Drain all pending SDL2 events and sample the keyboard
    pub fn poll(&mut self, event_pump: &mut EventPump) -> InputSnapshot {
        let mut events = Vec::new();

        for event in event_pump.poll_iter() {
            match event {
                Event::Quit { .. } => events.push(InputEvent::Quit),
                Event::KeyDown {
                    keycode: Some(key),
                    ..
                } => events.push(InputEvent::KeyDown(key)),
                Event::TextInput { text, .. } => events.push(InputEvent::Text(text)),
                Event::MouseButtonDown {
                    mouse_btn: MouseButton::Left,
                    x,
                    y,
                    ..
                } => {
                    self.pointer = (x, y);
                    events.push(InputEvent::Click { x, y });
                }
                Event::MouseMotion { x, y, .. } => {
                    self.pointer = (x, y);
                }
                _ => {}
            }
        }

        let held = event_pump
            .keyboard_state()
            .pressed_scancodes()
            .filter_map(Keycode::from_scancode)
            .collect();

        InputSnapshot {
            events,
            held,
            pointer: self.pointer,
        }
    }
}

impl Default for InputSystem {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_snapshot() {
        let input = InputSnapshot::default();
        assert!(!input.quit_requested());
        assert!(!input.key_pressed(Keycode::Return));
        assert_eq!(input.clicks().count(), 0);
        assert_eq!(input.axis(Keycode::Left, Keycode::Right), 0);
    }

    #[test]
    fn test_quit_is_detected_among_other_events() {
        let input = InputSnapshot::default()
            .with_key_down(Keycode::Up)
            .with_quit()
            .with_click(3, 4);
        assert!(input.quit_requested());
        assert!(input.key_pressed(Keycode::Up));
        assert_eq!(input.clicks().collect::<Vec<_>>(), vec![(3, 4)]);
    }

    #[test]
    fn test_axis_cancels_when_both_held() {
        let input = InputSnapshot::default().with_held(Keycode::Left);
        assert_eq!(input.axis(Keycode::Left, Keycode::Right), -1);

        let input = input.with_held(Keycode::Right);
        assert_eq!(input.axis(Keycode::Left, Keycode::Right), 0);
    }

    #[test]
    fn test_keys_pressed_keep_order() {
        let input = InputSnapshot::default()
            .with_key_down(Keycode::Down)
            .with_text("x")
            .with_key_down(Keycode::Return);
        let keys: Vec<_> = input.keys_pressed().collect();
        assert_eq!(keys, vec![Keycode::Down, Keycode::Return]);
    }
}
