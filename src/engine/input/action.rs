// Game action definitions and the edge events they produce

/// Represents all locomotion-relevant in-game actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveLeft,
    MoveRight,
    Sprint,
    Jump,
}

/// An input edge, as delivered by an input source
///
/// Edges arrive asynchronously relative to the frame tick and are queued until
/// the next tick drains them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Horizontal move axis changed; `0.0` means movement was released
    Move(f32),
    /// Sprint modifier pressed or released
    Sprint(bool),
    JumpPressed,
    JumpReleased,
}

impl InputEvent {
    /// Build a move edge, clamping the axis to [-1, 1]
    pub fn movement(axis: f32) -> Self {
        Self::Move(axis.clamp(-1.0, 1.0))
    }
}
