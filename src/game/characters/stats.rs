// Character stats - one tuning table shared by every character
//
// Values are in world units and seconds. Construction validates them once;
// the per-frame code assumes they are sane.

use glam::Vec2;

use super::SetupError;

/// Movement and jump tuning
#[derive(Debug, Clone, PartialEq)]
pub struct LocomotionStats {
    /// Horizontal running speed (units/second)
    pub move_speed: f32,
    /// Speed multiplier applied while sprinting
    pub sprint_multiplier: f32,
    /// Vertical takeoff speed, also the wall-jump speed
    pub jump_force: f32,
    /// Jumps available between landings, including the grounded one
    pub max_jumps: u8,
    /// Grace window after leaving the ground (seconds)
    pub coyote_time: f32,
    /// Grace window for a jump pressed before it becomes possible (seconds)
    pub jump_buffer: f32,
    /// Extra gravity factor while falling
    pub fall_multiplier: f32,
    /// Extra gravity factor while rising with jump released
    pub low_jump_multiplier: f32,
    /// Stamina spent per jump or wall jump
    pub stamina_jump_cost: f32,
    /// Maximum downward speed while wall sliding
    pub wall_fall_speed: f32,
    /// Wall-slide lockout after a wall jump (seconds)
    pub wall_jump_lock_duration: f32,
}

/// Stamina pool tuning
#[derive(Debug, Clone, PartialEq)]
pub struct StaminaStats {
    pub max: f32,
    /// Passive regeneration per second
    pub regen_rate: f32,
    /// Continuous spend per second (sprinting)
    pub spend_rate: f32,
}

/// Hit-reaction tuning
#[derive(Debug, Clone, PartialEq)]
pub struct KnockbackStats {
    /// Velocity assigned on knockback; x is pointed away from facing
    pub force: Vec2,
    /// How long horizontal control is withheld (seconds)
    pub duration: f32,
    /// Length of the sprite flash cue (seconds)
    pub flash_duration: f32,
}

/// Complete character tuning
#[derive(Debug, Clone, PartialEq)]
pub struct CharacterStats {
    pub locomotion: LocomotionStats,
    pub stamina: StaminaStats,
    pub knockback: KnockbackStats,

    /// Base health points
    pub max_health: i32,

    // Dimensions (for physics collider)
    /// Character width in world units
    pub width: f32,
    /// Character height in world units
    pub height: f32,
}

/// Default tuning for every character
pub const BASE_STATS: CharacterStats = CharacterStats {
    locomotion: LocomotionStats {
        move_speed: 5.0,
        sprint_multiplier: 1.5,
        jump_force: 7.0,
        max_jumps: 2,
        coyote_time: 0.12,
        jump_buffer: 0.12,
        fall_multiplier: 2.2,
        low_jump_multiplier: 2.0,
        stamina_jump_cost: 4.0,
        wall_fall_speed: 0.5,
        wall_jump_lock_duration: 0.15,
    },
    stamina: StaminaStats {
        max: 100.0,
        regen_rate: 5.0,
        spend_rate: 7.0,
    },
    knockback: KnockbackStats {
        force: Vec2::new(10.0, 5.0),
        duration: 1.0,
        flash_duration: 0.1,
    },
    max_health: 100,
    width: 1.0,
    height: 2.0,
};

impl Default for CharacterStats {
    fn default() -> Self {
        BASE_STATS
    }
}

impl CharacterStats {
    /// Get the standard character stats
    pub fn standard() -> Self {
        BASE_STATS
    }

    /// Reject tunings the simulation cannot run with
    pub fn validate(&self) -> Result<(), SetupError> {
        let loco = &self.locomotion;
        let non_negative = [
            ("move_speed", loco.move_speed),
            ("sprint_multiplier", loco.sprint_multiplier),
            ("jump_force", loco.jump_force),
            ("coyote_time", loco.coyote_time),
            ("jump_buffer", loco.jump_buffer),
            ("fall_multiplier", loco.fall_multiplier),
            ("low_jump_multiplier", loco.low_jump_multiplier),
            ("stamina_jump_cost", loco.stamina_jump_cost),
            ("wall_fall_speed", loco.wall_fall_speed),
            ("wall_jump_lock_duration", loco.wall_jump_lock_duration),
            ("stamina.regen_rate", self.stamina.regen_rate),
            ("stamina.spend_rate", self.stamina.spend_rate),
            ("knockback.duration", self.knockback.duration),
            ("knockback.flash_duration", self.knockback.flash_duration),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(SetupError::InvalidStat { name, value });
            }
        }

        let positive = [
            ("stamina.max", self.stamina.max),
            ("width", self.width),
            ("height", self.height),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(SetupError::InvalidStat { name, value });
            }
        }

        if !self.knockback.force.is_finite() {
            return Err(SetupError::InvalidStat {
                name: "knockback.force",
                value: self.knockback.force.x,
            });
        }

        if loco.max_jumps == 0 {
            return Err(SetupError::ZeroJumps);
        }

        if self.max_health <= 0 {
            return Err(SetupError::InvalidStat {
                name: "max_health",
                value: self.max_health as f32,
            });
        }

        Ok(())
    }
}
