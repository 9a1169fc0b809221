// Respawn sequence: fade out, relocate, fade in

use crate::core::math;

/// Screen fade speed in alpha per second
pub const DEFAULT_FADE_SPEED: f32 = 0.5;

/// Where a respawn sequence currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RespawnPhase {
    /// Screen going dark
    FadingOut,
    /// Screen fully dark; the character is moved back this tick
    Relocating,
    /// Screen coming back
    FadingIn,
    Finished,
}

/// Timer-driven respawn flow for one dead character
///
/// `alpha` is the fader opacity a presentation layer would draw.
#[derive(Debug, Clone)]
pub struct RespawnSequence {
    phase: RespawnPhase,
    alpha: f32,
    fade_speed: f32,
}

impl RespawnSequence {
    pub fn new(fade_speed: f32) -> Self {
        Self {
            phase: RespawnPhase::FadingOut,
            alpha: 0.0,
            fade_speed: fade_speed.max(f32::EPSILON),
        }
    }

    /// Advance the fade and return the phase reached
    ///
    /// `Relocating` is returned for exactly one tick.
    pub fn update(&mut self, dt: f32) -> RespawnPhase {
        let step = self.fade_speed * dt;
        self.phase = match self.phase {
            RespawnPhase::FadingOut => {
                self.alpha = math::move_towards(self.alpha, 1.0, step);
                if self.alpha >= 1.0 {
                    RespawnPhase::Relocating
                } else {
                    RespawnPhase::FadingOut
                }
            }
            RespawnPhase::Relocating | RespawnPhase::FadingIn => {
                self.alpha = math::move_towards(self.alpha, 0.0, step);
                if self.alpha <= 0.0 {
                    RespawnPhase::Finished
                } else {
                    RespawnPhase::FadingIn
                }
            }
            RespawnPhase::Finished => RespawnPhase::Finished,
        };
        self.phase
    }

    pub fn phase(&self) -> RespawnPhase {
        self.phase
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn is_finished(&self) -> bool {
        self.phase == RespawnPhase::Finished
    }
}

impl Default for RespawnSequence {
    fn default() -> Self {
        Self::new(DEFAULT_FADE_SPEED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_phases_in_order() {
        let mut sequence = RespawnSequence::new(4.0);
        assert_eq!(sequence.phase(), RespawnPhase::FadingOut);

        assert_eq!(sequence.update(0.125), RespawnPhase::FadingOut);
        assert_relative_eq!(sequence.alpha(), 0.5);
        assert_eq!(sequence.update(0.125), RespawnPhase::Relocating);
        assert_relative_eq!(sequence.alpha(), 1.0);

        assert_eq!(sequence.update(0.125), RespawnPhase::FadingIn);
        assert_eq!(sequence.update(0.125), RespawnPhase::Finished);
        assert_eq!(sequence.alpha(), 0.0);
        assert!(sequence.is_finished());
    }

    #[test]
    fn test_relocating_reported_once() {
        let mut sequence = RespawnSequence::new(100.0);
        let phases: Vec<_> = (0..4).map(|_| sequence.update(0.1)).collect();
        assert_eq!(
            phases,
            vec![
                RespawnPhase::Relocating,
                RespawnPhase::Finished,
                RespawnPhase::Finished,
                RespawnPhase::Finished,
            ]
        );
    }

    #[test]
    fn test_zero_dt_holds_phase() {
        let mut sequence = RespawnSequence::default();
        assert_eq!(sequence.update(0.0), RespawnPhase::FadingOut);
        assert_eq!(sequence.alpha(), 0.0);
    }
}
