// Test double for the physics body

use glam::Vec2;

use super::body::CharacterBody;

/// In-memory body with unit mass and no integration
#[derive(Debug, Clone)]
pub struct TestBody {
    pub velocity: Vec2,
    pub gravity_scale: f32,
}

impl Default for TestBody {
    fn default() -> Self {
        Self {
            velocity: Vec2::ZERO,
            gravity_scale: 1.0,
        }
    }
}

impl TestBody {
    pub fn with_velocity(velocity: Vec2) -> Self {
        Self {
            velocity,
            ..Default::default()
        }
    }
}

impl CharacterBody for TestBody {
    fn velocity(&self) -> Vec2 {
        self.velocity
    }

    fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    fn gravity_scale(&self) -> f32 {
        self.gravity_scale
    }

    fn set_gravity_scale(&mut self, scale: f32) {
        self.gravity_scale = scale;
    }

    fn apply_impulse(&mut self, impulse: Vec2) {
        self.velocity += impulse;
    }
}
