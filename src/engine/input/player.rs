// Per-player input state management

use super::action::{Action, InputEvent};
use super::queue::InputQueue;
use crate::core::math;
use std::collections::HashSet;

/// Axis magnitude below which movement counts as released
pub const MOVE_DEADZONE: f32 = 0.1;

/// Input state for a single player
///
/// Input sources feed edges in through `press`/`release` or `push_event` at any
/// time. The frame tick drains them with `drain_events`, which is also the
/// only point where the polled state (`move_axis`, `sprint_held`) changes.
#[derive(Debug)]
pub struct PlayerInput {
    /// Player ID (0-3 for up to 4 players)
    player_id: usize,

    /// Digital actions currently held on the device
    pressed: HashSet<Action>,

    /// Last axis reported by the source, tracked even while disabled
    raw_axis: f32,

    /// Polled state as of the last drain
    move_axis: f32,
    sprint_held: bool,
    jump_held: bool,

    /// Edges received since the last drain
    queue: InputQueue,

    /// Whether input is currently ignored (external push window)
    disabled: bool,
    disabled_remaining: f32,
}

impl PlayerInput {
    /// Create a new player input state
    pub fn new(player_id: usize) -> Self {
        Self {
            player_id,
            pressed: HashSet::new(),
            raw_axis: 0.0,
            move_axis: 0.0,
            sprint_held: false,
            jump_held: false,
            queue: InputQueue::new(),
            disabled: false,
            disabled_remaining: 0.0,
        }
    }

    /// Get the player ID
    pub fn player_id(&self) -> usize {
        self.player_id
    }

    /// Register a digital action press
    pub fn press(&mut self, action: Action) {
        if self.pressed.insert(action) {
            let event = match action {
                Action::MoveLeft | Action::MoveRight => InputEvent::movement(self.direction()),
                Action::Sprint => InputEvent::Sprint(true),
                Action::Jump => InputEvent::JumpPressed,
            };
            self.push_event(event);
        }
    }

    /// Register a digital action release
    pub fn release(&mut self, action: Action) {
        if self.pressed.remove(&action) {
            let event = match action {
                Action::MoveLeft | Action::MoveRight => InputEvent::movement(self.direction()),
                Action::Sprint => InputEvent::Sprint(false),
                Action::Jump => InputEvent::JumpReleased,
            };
            self.push_event(event);
        }
    }

    /// Accept an edge from an input source
    ///
    /// Move axes are clamped to [-1, 1] and non-finite axes read as released.
    /// Edges received while input is disabled are dropped.
    pub fn push_event(&mut self, event: InputEvent) {
        let event = match event {
            InputEvent::Move(axis) if axis.is_finite() => InputEvent::movement(axis),
            InputEvent::Move(_) => InputEvent::Move(0.0),
            other => other,
        };

        if let InputEvent::Move(axis) = event {
            self.raw_axis = axis;
        }

        if self.disabled {
            log::trace!("Player {} input disabled, dropping {:?}", self.player_id, event);
            return;
        }

        self.queue.push(event);
    }

    /// Take all pending edges and fold them into the polled state
    pub fn drain_events(&mut self) -> Vec<InputEvent> {
        let events = self.queue.drain();
        for event in &events {
            match *event {
                InputEvent::Move(axis) => self.move_axis = axis,
                InputEvent::Sprint(held) => self.sprint_held = held,
                InputEvent::JumpPressed => self.jump_held = true,
                InputEvent::JumpReleased => self.jump_held = false,
            }
        }
        events
    }

    /// Ignore all input for `duration` seconds
    ///
    /// Pending edges are discarded and every held control is released, so the
    /// next tick sees the character let go of the controls.
    pub fn disable_for(&mut self, duration: f32) {
        if !self.disabled {
            self.queue.clear();
            if self.move_axis != 0.0 {
                self.queue.push(InputEvent::Move(0.0));
            }
            if self.sprint_held {
                self.queue.push(InputEvent::Sprint(false));
            }
            if self.jump_held {
                self.queue.push(InputEvent::JumpReleased);
            }
            self.disabled = true;
        }
        self.disabled_remaining = self.disabled_remaining.max(duration);
    }

    /// Advance the disable window (called once per frame before draining)
    pub fn update(&mut self, dt: f32) {
        if !self.disabled {
            return;
        }

        self.disabled_remaining = math::decay(self.disabled_remaining, dt);
        if self.disabled_remaining <= 0.0 {
            self.disabled = false;
            log::debug!("Player {} input re-enabled", self.player_id);

            // A direction still held is announced again, buttons are not
            if self.raw_axis.abs() > MOVE_DEADZONE {
                self.queue.push(InputEvent::Move(self.raw_axis));
            }
        }
    }

    /// Check whether input is currently accepted
    pub fn is_enabled(&self) -> bool {
        !self.disabled
    }

    /// Polled horizontal axis in [-1, 1]
    pub fn move_axis(&self) -> f32 {
        self.move_axis
    }

    /// Check if movement input is actuated
    pub fn is_moving(&self) -> bool {
        self.move_axis.abs() > MOVE_DEADZONE
    }

    /// Check if sprint is held
    pub fn sprint_held(&self) -> bool {
        self.sprint_held
    }

    /// Check if jump is held
    pub fn jump_held(&self) -> bool {
        self.jump_held
    }

    /// Reset all input state
    pub fn reset(&mut self) {
        self.pressed.clear();
        self.raw_axis = 0.0;
        self.move_axis = 0.0;
        self.sprint_held = false;
        self.jump_held = false;
        self.queue.clear();
        self.disabled = false;
        self.disabled_remaining = 0.0;
    }

    /// Horizontal direction from the held digital actions
    fn direction(&self) -> f32 {
        let mut horizontal = 0.0;
        if self.pressed.contains(&Action::MoveLeft) {
            horizontal -= 1.0;
        }
        if self.pressed.contains(&Action::MoveRight) {
            horizontal += 1.0;
        }
        horizontal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_input_creation() {
        let input = PlayerInput::new(0);
        assert_eq!(input.player_id(), 0);
        assert!(input.is_enabled());
        assert!(!input.is_moving());
    }

    #[test]
    fn test_press_produces_edges() {
        let mut input = PlayerInput::new(0);
        input.press(Action::MoveRight);
        input.press(Action::Jump);

        assert_eq!(
            input.drain_events(),
            vec![InputEvent::Move(1.0), InputEvent::JumpPressed]
        );
        assert_eq!(input.move_axis(), 1.0);
        assert!(input.jump_held());
    }

    #[test]
    fn test_polled_state_changes_only_on_drain() {
        let mut input = PlayerInput::new(0);
        input.press(Action::MoveLeft);
        assert_eq!(input.move_axis(), 0.0);

        input.drain_events();
        assert_eq!(input.move_axis(), -1.0);
    }

    #[test]
    fn test_opposite_directions_cancel() {
        let mut input = PlayerInput::new(0);
        input.press(Action::MoveLeft);
        input.press(Action::MoveRight);
        input.drain_events();
        assert_eq!(input.move_axis(), 0.0);

        input.release(Action::MoveLeft);
        input.drain_events();
        assert_eq!(input.move_axis(), 1.0);
    }

    #[test]
    fn test_push_event_clamps_axis() {
        let mut input = PlayerInput::new(0);
        input.push_event(InputEvent::Move(5.0));
        assert_eq!(input.drain_events(), vec![InputEvent::Move(1.0)]);
        assert_eq!(input.move_axis(), 1.0);

        input.push_event(InputEvent::Move(-3.0));
        input.drain_events();
        assert_eq!(input.move_axis(), -1.0);

        input.push_event(InputEvent::Move(0.5));
        input.drain_events();
        assert_eq!(input.move_axis(), 0.5);
    }

    #[test]
    fn test_non_finite_axis_reads_as_released() {
        let mut input = PlayerInput::new(0);
        input.push_event(InputEvent::Move(1.0));
        input.drain_events();

        input.push_event(InputEvent::Move(f32::NAN));
        assert_eq!(input.drain_events(), vec![InputEvent::Move(0.0)]);
        assert!(!input.is_moving());

        input.push_event(InputEvent::Move(f32::INFINITY));
        input.drain_events();
        assert_eq!(input.move_axis(), 0.0);
    }

    #[test]
    fn test_repeated_press_is_single_edge() {
        let mut input = PlayerInput::new(0);
        input.press(Action::Jump);
        input.press(Action::Jump);
        assert_eq!(input.drain_events().len(), 1);
    }

    #[test]
    fn test_release_unpressed_action() {
        let mut input = PlayerInput::new(0);
        input.release(Action::Jump);
        assert!(input.drain_events().is_empty());
    }

    #[test]
    fn test_disable_releases_held_controls() {
        let mut input = PlayerInput::new(0);
        input.push_event(InputEvent::Move(1.0));
        input.push_event(InputEvent::Sprint(true));
        input.drain_events();

        input.disable_for(0.5);
        assert!(!input.is_enabled());
        assert_eq!(
            input.drain_events(),
            vec![InputEvent::Move(0.0), InputEvent::Sprint(false)]
        );
        assert!(!input.is_moving());
        assert!(!input.sprint_held());
    }

    #[test]
    fn test_disabled_input_is_dropped() {
        let mut input = PlayerInput::new(0);
        input.disable_for(0.5);
        input.drain_events();

        input.push_event(InputEvent::JumpPressed);
        assert!(input.drain_events().is_empty());
    }

    #[test]
    fn test_reenable_announces_held_direction() {
        let mut input = PlayerInput::new(0);
        input.disable_for(0.25);
        input.drain_events();

        input.press(Action::MoveRight);
        input.update(0.125);
        assert!(!input.is_enabled());
        assert!(input.drain_events().is_empty());

        input.update(0.125);
        assert!(input.is_enabled());
        assert_eq!(input.drain_events(), vec![InputEvent::Move(1.0)]);
    }

    #[test]
    fn test_reset() {
        let mut input = PlayerInput::new(0);
        input.press(Action::Jump);
        input.press(Action::MoveRight);
        input.drain_events();
        input.reset();

        assert!(!input.jump_held());
        assert!(!input.is_moving());
        assert!(input.drain_events().is_empty());
    }
}
