// Stamina pool: bounded resource with passive regeneration

use super::stats::StaminaStats;

/// Stamina consumed by sprinting and jumping
///
/// `current` always stays within `[0, max]`.
#[derive(Debug, Clone)]
pub struct StaminaPool {
    current: f32,
    max: f32,
    regen_rate: f32,
    spend_rate: f32,
}

impl StaminaPool {
    /// Create a full pool
    pub fn new(stats: &StaminaStats) -> Self {
        Self {
            current: stats.max,
            max: stats.max,
            regen_rate: stats.regen_rate,
            spend_rate: stats.spend_rate,
        }
    }

    /// Current stamina
    pub fn current(&self) -> f32 {
        self.current
    }

    /// Maximum stamina
    pub fn max(&self) -> f32 {
        self.max
    }

    /// Check whether anything is left to spend
    pub fn has_charge(&self) -> bool {
        self.current > 0.0
    }

    /// Spend a fixed amount, flooring at zero. No-op when already empty.
    pub fn spend(&mut self, amount: f32) {
        if self.current <= 0.0 {
            return;
        }
        self.current = (self.current - amount.max(0.0)).max(0.0);
    }

    /// Spend at the continuous rate for `dt` seconds
    pub fn spend_for(&mut self, dt: f32) {
        self.spend(self.spend_rate * dt);
    }

    /// Passive regeneration for `dt` seconds, capped at max
    pub fn regenerate(&mut self, dt: f32) {
        self.regenerate_amount(self.regen_rate * dt);
    }

    /// One-shot regeneration (pickups), capped at max
    pub fn regenerate_amount(&mut self, amount: f32) {
        if self.current >= self.max {
            return;
        }
        self.current = (self.current + amount.max(0.0)).min(self.max);
    }

    /// Refill to max
    pub fn refill(&mut self) {
        self.current = self.max;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::characters::stats::BASE_STATS;
    use approx::assert_relative_eq;

    fn pool() -> StaminaPool {
        StaminaPool::new(&BASE_STATS.stamina)
    }

    #[test]
    fn test_starts_full() {
        let pool = pool();
        assert_eq!(pool.current(), 100.0);
        assert!(pool.has_charge());
    }

    #[test]
    fn test_spend_fixed_amount() {
        let mut pool = pool();
        pool.spend(4.0);
        assert_relative_eq!(pool.current(), 96.0);
    }

    #[test]
    fn test_spend_floors_at_zero() {
        let mut pool = pool();
        pool.spend(250.0);
        assert_eq!(pool.current(), 0.0);
        assert!(!pool.has_charge());

        // Empty pool ignores further spends
        pool.spend(1.0);
        assert_eq!(pool.current(), 0.0);
    }

    #[test]
    fn test_spend_for_uses_rate() {
        let mut pool = pool();
        pool.spend_for(0.5);
        assert_relative_eq!(pool.current(), 96.5);
    }

    #[test]
    fn test_regenerate_caps_at_max() {
        let mut pool = pool();
        pool.spend(1.0);
        pool.regenerate(10.0);
        assert_eq!(pool.current(), 100.0);
    }

    #[test]
    fn test_regenerate_rate() {
        let mut pool = pool();
        pool.spend(50.0);
        pool.regenerate(2.0);
        assert_relative_eq!(pool.current(), 60.0);
    }

    #[test]
    fn test_regenerate_amount() {
        let mut pool = pool();
        pool.spend(10.0);
        pool.regenerate_amount(1.0);
        assert_relative_eq!(pool.current(), 91.0);
    }

    #[test]
    fn test_stays_in_bounds_over_mixed_sequence() {
        let mut pool = pool();
        let ops: [(bool, f32); 8] = [
            (true, 30.0),
            (false, 5.0),
            (true, 200.0),
            (false, 0.5),
            (true, 0.01),
            (false, 100.0),
            (true, 7.5),
            (false, 3.0),
        ];
        for (spend, amount) in ops {
            if spend {
                pool.spend(amount);
            } else {
                pool.regenerate(amount);
            }
            assert!(pool.current() >= 0.0 && pool.current() <= pool.max());
        }
    }
}
