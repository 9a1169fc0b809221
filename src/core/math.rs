// Math utilities and helper functions

/// Count a timer down by `dt`, never going below zero
pub fn decay(timer: f32, dt: f32) -> f32 {
    (timer - dt).max(0.0)
}

/// Move `current` towards `target` by at most `max_delta`
pub fn move_towards(current: f32, target: f32, max_delta: f32) -> f32 {
    if (target - current).abs() <= max_delta {
        target
    } else {
        current + (target - current).signum() * max_delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_decay() {
        assert_relative_eq!(decay(0.5, 0.25), 0.25);
        assert_eq!(decay(0.1, 0.5), 0.0);
        assert_eq!(decay(0.0, 0.016), 0.0);
    }

    #[test]
    fn test_move_towards() {
        assert_eq!(move_towards(0.0, 1.0, 0.25), 0.25);
        assert_eq!(move_towards(0.9, 1.0, 0.25), 1.0);
        assert_eq!(move_towards(1.0, 0.0, 0.5), 0.5);
        assert_eq!(move_towards(0.5, 0.5, 0.1), 0.5);
    }
}
