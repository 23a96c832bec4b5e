//! Tagged-action input binding maps.
//!
//! Keys and mouse buttons are bound to a game-defined action value; dispatch
//! is a plain lookup, with the most recent binding for a given code winning.
//! Press and release maps are independent, mirroring the separate
//! `bind_key` / `bind_key_up` registration calls.

use std::collections::HashMap;

use winit::event::MouseButton;
use winit::keyboard::KeyCode;

/// Binding maps from input codes to tagged actions.
#[derive(Debug)]
pub struct InputBindings<A> {
    key_down: HashMap<KeyCode, A>,
    key_up: HashMap<KeyCode, A>,
    clicks: HashMap<MouseButton, A>,
}

impl<A> Default for InputBindings<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> InputBindings<A> {
    /// Creates an empty set of bindings.
    pub fn new() -> Self {
        Self {
            key_down: HashMap::new(),
            key_up: HashMap::new(),
            clicks: HashMap::new(),
        }
    }
}

impl<A: Copy> InputBindings<A> {
    /// Binds a key press to `action`. Rebinding a key overwrites the
    /// previous action.
    pub fn bind_key(&mut self, key: KeyCode, action: A) {
        self.key_down.insert(key, action);
    }

    /// Binds each key in `keys` to the same press action.
    pub fn bind_keys(&mut self, keys: &[KeyCode], action: A) {
        for &key in keys {
            self.bind_key(key, action);
        }
    }

    /// Binds a key release to `action`, independent of any press binding.
    pub fn bind_key_up(&mut self, key: KeyCode, action: A) {
        self.key_up.insert(key, action);
    }

    /// Binds a mouse button press to `action`.
    pub fn bind_click(&mut self, button: MouseButton, action: A) {
        self.clicks.insert(button, action);
    }

    /// Action bound to a key press, if any.
    pub fn key_down_action(&self, key: KeyCode) -> Option<A> {
        self.key_down.get(&key).copied()
    }

    /// Action bound to a key release, if any.
    pub fn key_up_action(&self, key: KeyCode) -> Option<A> {
        self.key_up.get(&key).copied()
    }

    /// Action bound to a mouse button, if any.
    pub fn click_action(&self, button: MouseButton) -> Option<A> {
        self.clicks.get(&button).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Action {
        First,
        Second,
    }

    #[test]
    fn unbound_inputs_dispatch_nothing() {
        let bindings: InputBindings<Action> = InputBindings::new();
        assert_eq!(bindings.key_down_action(KeyCode::Space), None);
        assert_eq!(bindings.key_up_action(KeyCode::Space), None);
        assert_eq!(bindings.click_action(MouseButton::Left), None);
    }

    #[test]
    fn last_binding_for_a_code_wins() {
        let mut bindings = InputBindings::new();
        bindings.bind_key(KeyCode::Space, Action::First);
        bindings.bind_key(KeyCode::Space, Action::Second);
        assert_eq!(bindings.key_down_action(KeyCode::Space), Some(Action::Second));

        bindings.bind_click(MouseButton::Left, Action::First);
        bindings.bind_click(MouseButton::Left, Action::Second);
        assert_eq!(bindings.click_action(MouseButton::Left), Some(Action::Second));
    }

    #[test]
    fn press_and_release_maps_are_independent() {
        let mut bindings = InputBindings::new();
        bindings.bind_key(KeyCode::KeyA, Action::First);
        assert_eq!(bindings.key_down_action(KeyCode::KeyA), Some(Action::First));
        assert_eq!(bindings.key_up_action(KeyCode::KeyA), None);

        bindings.bind_key_up(KeyCode::KeyA, Action::Second);
        assert_eq!(bindings.key_down_action(KeyCode::KeyA), Some(Action::First));
        assert_eq!(bindings.key_up_action(KeyCode::KeyA), Some(Action::Second));
    }

    #[test]
    fn bind_keys_registers_every_key_in_the_list() {
        let mut bindings = InputBindings::new();
        bindings.bind_keys(&[KeyCode::ArrowLeft, KeyCode::KeyA], Action::First);
        assert_eq!(
            bindings.key_down_action(KeyCode::ArrowLeft),
            Some(Action::First)
        );
        assert_eq!(bindings.key_down_action(KeyCode::KeyA), Some(Action::First));
        assert_eq!(bindings.key_down_action(KeyCode::KeyD), None);
    }
}
