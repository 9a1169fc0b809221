// Health points

/// Result of applying damage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Damage taken, still alive
    Hurt,
    /// This hit brought health to zero
    Died,
    /// Already dead or no damage dealt
    Ignored,
}

/// Integer health pool, floored at zero
#[derive(Debug, Clone)]
pub struct Health {
    current: i32,
    max: i32,
}

impl Health {
    pub fn new(max: i32) -> Self {
        let max = max.max(1);
        Self { current: max, max }
    }

    pub fn take_damage(&mut self, amount: i32) -> DamageOutcome {
        if self.is_dead() || amount <= 0 {
            return DamageOutcome::Ignored;
        }

        self.current = (self.current - amount).max(0);
        if self.current == 0 {
            DamageOutcome::Died
        } else {
            DamageOutcome::Hurt
        }
    }

    /// Restore health up to max. The dead are not healed.
    pub fn heal(&mut self, amount: i32) {
        if self.is_dead() {
            return;
        }
        self.current = (self.current + amount.max(0)).min(self.max);
    }

    pub fn refill(&mut self) {
        self.current = self.max;
    }

    pub fn current(&self) -> i32 {
        self.current
    }

    pub fn max(&self) -> i32 {
        self.max
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0
    }
}
