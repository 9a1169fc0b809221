// Hit reaction: knockback window and sprite flash

use glam::Vec2;

use super::body::CharacterBody;
use super::stats::KnockbackStats;
use crate::core::math;

/// Short-lived reaction to a non-lethal hit
///
/// Knockback moves between two combinations of flags:
/// ready `(knocked = false, can_be_knocked = true)` and
/// active `(knocked = true, can_be_knocked = false)`.
/// While active, locomotion must leave horizontal velocity alone.
#[derive(Debug, Clone)]
pub struct HitReaction {
    is_knocked: bool,
    can_be_knocked: bool,
    knock_remaining: f32,
    force: Vec2,
    duration: f32,

    // Flash is purely visual and runs independently of knockback
    flash_remaining: f32,
    flash_duration: f32,
}

impl HitReaction {
    pub fn new(stats: &KnockbackStats) -> Self {
        Self {
            is_knocked: false,
            can_be_knocked: true,
            knock_remaining: 0.0,
            force: stats.force,
            duration: stats.duration,
            flash_remaining: 0.0,
            flash_duration: stats.flash_duration,
        }
    }

    /// Knock the character away from where it faces
    ///
    /// Assigns `(force.x * -facing_sign, force.y)` as the new velocity. Returns
    /// false and changes nothing if a knockback window is already running.
    pub fn knockback(&mut self, facing_sign: f32, body: &mut dyn CharacterBody) -> bool {
        if self.is_knocked || !self.can_be_knocked {
            return false;
        }

        self.is_knocked = true;
        self.can_be_knocked = false;
        self.knock_remaining = self.duration;

        let away = if facing_sign < 0.0 { 1.0 } else { -1.0 };
        body.set_velocity(Vec2::new(self.force.x * away, self.force.y));

        log::debug!("Knockback started for {:.2}s", self.duration);
        true
    }

    /// Start (or restart) the sprite flash cue
    pub fn sprite_flash(&mut self) {
        self.flash_remaining = self.flash_duration;
    }

    /// Advance both timers (called every frame)
    pub fn update(&mut self, dt: f32) {
        self.flash_remaining = math::decay(self.flash_remaining, dt);

        if self.is_knocked {
            self.knock_remaining = math::decay(self.knock_remaining, dt);
            if self.knock_remaining <= 0.0 {
                self.is_knocked = false;
                self.can_be_knocked = true;
                log::debug!("Knockback ended");
            }
        }
    }

    pub fn is_knocked(&self) -> bool {
        self.is_knocked
    }

    pub fn can_be_knocked(&self) -> bool {
        self.can_be_knocked
    }

    pub fn is_flashing(&self) -> bool {
        self.flash_remaining > 0.0
    }

    /// Back to the ready state with no flash running
    pub fn reset(&mut self) {
        self.is_knocked = false;
        self.can_be_knocked = true;
        self.knock_remaining = 0.0;
        self.flash_remaining = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::characters::stats::BASE_STATS;
    use crate::game::characters::testing::TestBody;

    fn reaction() -> HitReaction {
        HitReaction::new(&BASE_STATS.knockback)
    }

    #[test]
    fn test_initial_state_is_ready() {
        let hit = reaction();
        assert!(!hit.is_knocked());
        assert!(hit.can_be_knocked());
        assert!(!hit.is_flashing());
    }

    #[test]
    fn test_knockback_sets_velocity_away_from_facing() {
        let mut hit = reaction();
        let mut body = TestBody::with_velocity(Vec2::new(3.0, -2.0));

        assert!(hit.knockback(1.0, &mut body));
        assert_eq!(body.velocity, Vec2::new(-10.0, 5.0));
        assert!(hit.is_knocked());
        assert!(!hit.can_be_knocked());

        let mut hit = reaction();
        hit.knockback(-1.0, &mut body);
        assert_eq!(body.velocity, Vec2::new(10.0, 5.0));
    }

    #[test]
    fn test_knockback_while_knocked_is_noop() {
        let mut hit = reaction();
        let mut body = TestBody::default();
        hit.knockback(1.0, &mut body);
        hit.update(0.25);

        body.velocity = Vec2::new(-4.0, 1.0);
        assert!(!hit.knockback(-1.0, &mut body));
        assert_eq!(body.velocity, Vec2::new(-4.0, 1.0));
        assert!(hit.is_knocked());
        assert!(!hit.can_be_knocked());
    }

    #[test]
    fn test_knockback_lasts_exactly_duration() {
        let mut hit = reaction();
        let mut body = TestBody::default();
        hit.knockback(1.0, &mut body);

        hit.update(0.5);
        assert!(hit.is_knocked());
        hit.update(0.25);
        assert!(hit.is_knocked());
        hit.update(0.25);
        assert!(!hit.is_knocked());
        assert!(hit.can_be_knocked());
    }

    #[test]
    fn test_knockback_rearms_after_window() {
        let mut hit = reaction();
        let mut body = TestBody::default();
        hit.knockback(1.0, &mut body);
        hit.update(1.0);
        assert!(hit.knockback(1.0, &mut body));
    }

    #[test]
    fn test_flash_is_independent() {
        let mut hit = reaction();
        let mut body = TestBody::default();

        hit.sprite_flash();
        assert!(hit.is_flashing());
        assert!(!hit.is_knocked());

        hit.knockback(1.0, &mut body);
        hit.update(0.125);
        assert!(!hit.is_flashing());
        assert!(hit.is_knocked());
    }

    #[test]
    fn test_reset() {
        let mut hit = reaction();
        let mut body = TestBody::default();
        hit.knockback(1.0, &mut body);
        hit.sprite_flash();
        hit.reset();

        assert!(!hit.is_knocked());
        assert!(hit.can_be_knocked());
        assert!(!hit.is_flashing());
    }
}
