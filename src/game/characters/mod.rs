// Character system
//
// This module contains everything related to playable characters:
// - Locomotion state machine with jump grace windows and wall movement
// - Stamina, hit reaction and health collaborators
// - Environment sensing against the physics world
// - Character composition, spawning and management

pub mod animation;
pub mod body;
pub mod character;
pub mod health;
pub mod knockback;
pub mod locomotion;
pub mod sensor;
pub mod stamina;
pub mod state;
pub mod stats;

#[cfg(test)]
pub(crate) mod testing;

use thiserror::Error;

// Re-export commonly used types
pub use animation::{AnimationSignals, AnimationSink};
pub use body::CharacterBody;
pub use character::{Character, CharacterBuilder, CharacterId, CharacterManager};
pub use health::{DamageOutcome, Health};
pub use knockback::HitReaction;
pub use locomotion::LocomotionAgent;
pub use sensor::{EnvironmentSensor, PhysicsSensor, SensorConfig, SensorSnapshot, WallContact};
pub use stamina::StaminaPool;
pub use state::{CharacterState, CharacterStateMachine};
pub use stats::{CharacterStats, BASE_STATS};

/// Errors raised while assembling a character
#[derive(Debug, Error, PartialEq)]
pub enum SetupError {
    #[error("character has no environment sensor configured")]
    MissingSensor,

    #[error("invalid stat {name}: {value}")]
    InvalidStat { name: &'static str, value: f32 },

    #[error("max_jumps must be at least 1")]
    ZeroJumps,

    #[error("character body is missing from the physics world")]
    MissingBody,
}
