// Character state machine

use std::fmt;

/// Represents the current locomotion state of a character
///
/// Exactly one state is active per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CharacterState {
    /// Standing still
    #[default]
    Idle,
    /// Moving horizontally at run speed
    Running,
    /// Moving horizontally at sprint speed, draining stamina
    Sprinting,
    /// Jump requested or rising after a jump
    Jumping,
    /// Jump released while moving downward
    Falling,
    /// Airborne against a wall with downward speed capped
    WallSlide,
    /// Jumping off a wall this frame
    WallSlideJump,
}

impl CharacterState {
    /// Short lowercase name, used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Sprinting => "sprinting",
            Self::Jumping => "jumping",
            Self::Falling => "falling",
            Self::WallSlide => "wall_slide",
            Self::WallSlideJump => "wall_slide_jump",
        }
    }
}

impl fmt::Display for CharacterState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Tracks the active state plus transition bookkeeping
#[derive(Debug)]
pub struct CharacterStateMachine {
    current_state: CharacterState,
    previous_state: CharacterState,
    state_time: f32,
}

impl Default for CharacterStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl CharacterStateMachine {
    pub fn new() -> Self {
        Self {
            current_state: CharacterState::Idle,
            previous_state: CharacterState::Idle,
            state_time: 0.0,
        }
    }

    /// Get the current state
    pub fn state(&self) -> CharacterState {
        self.current_state
    }

    /// Get the previous state
    pub fn previous_state(&self) -> CharacterState {
        self.previous_state
    }

    /// Get time spent in current state
    pub fn state_time(&self) -> f32 {
        self.state_time
    }

    /// Transition to a new state (no-op if already there)
    pub fn transition(&mut self, new_state: CharacterState) {
        if self.current_state != new_state {
            log::debug!("State {} -> {}", self.current_state, new_state);
            self.previous_state = self.current_state;
            self.current_state = new_state;
            self.state_time = 0.0;
        }
    }

    /// Advance the time-in-state counter (called every frame)
    pub fn tick(&mut self, dt: f32) {
        self.state_time += dt;
    }

    /// Back to `Idle` with no history, as on respawn
    pub fn reset(&mut self) {
        self.current_state = CharacterState::Idle;
        self.previous_state = CharacterState::Idle;
        self.state_time = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let sm = CharacterStateMachine::new();
        assert_eq!(sm.state(), CharacterState::Idle);
    }

    #[test]
    fn test_state_transition() {
        let mut sm = CharacterStateMachine::new();
        sm.transition(CharacterState::Running);
        assert_eq!(sm.state(), CharacterState::Running);
        assert_eq!(sm.previous_state(), CharacterState::Idle);
    }

    #[test]
    fn test_same_state_transition_keeps_time() {
        let mut sm = CharacterStateMachine::new();
        sm.transition(CharacterState::Running);
        sm.tick(0.5);
        sm.transition(CharacterState::Running);
        assert_eq!(sm.state_time(), 0.5);
        assert_eq!(sm.previous_state(), CharacterState::Idle);
    }

    #[test]
    fn test_transition_resets_time() {
        let mut sm = CharacterStateMachine::new();
        sm.tick(0.25);
        sm.transition(CharacterState::Jumping);
        assert_eq!(sm.state_time(), 0.0);
    }

    #[test]
    fn test_reset() {
        let mut sm = CharacterStateMachine::new();
        sm.transition(CharacterState::WallSlide);
        sm.reset();
        assert_eq!(sm.state(), CharacterState::Idle);
        assert_eq!(sm.previous_state(), CharacterState::Idle);
    }

    #[test]
    fn test_display() {
        assert_eq!(CharacterState::WallSlideJump.to_string(), "wall_slide_jump");
    }
}
