// Input handling system
//
// Input sources deliver edges (move axis changes, sprint and jump presses and
// releases) whenever they happen. Edges are queued per player and drained at
// the start of that player's next frame tick.
//
// ## Architecture
//
// - `action`: Game actions and the edge events they produce
// - `queue`: FIFO of edges waiting for the next tick
// - `player`: Per-player polled state and the input-disable window
//
// ## Usage Example
//
// ```rust
// use platformer_locomotion::engine::input::{Action, PlayerInput};
//
// let mut input = PlayerInput::new(0);
//
// // Whenever the device reports something
// input.press(Action::Jump);
//
// // At the start of the frame tick
// for edge in input.drain_events() {
//     // Apply the edge to the character
// }
// ```

pub mod action;
pub mod player;
pub mod queue;

// Re-export commonly used types
pub use action::{Action, InputEvent};
pub use player::{PlayerInput, MOVE_DEADZONE};
pub use queue::InputQueue;
