// Locomotion agent: the movement state machine
//
// Two entry points run at two rates:
// - `update` once per rendered frame: applies queued input edges, resolves
//   landing/wall/timer state, then runs the active state's velocity behavior.
// - `fixed_update` once per physics step: consumes a buffered jump and shapes
//   gravity for snappier arcs.
//
// The agent never moves the body itself; it assigns velocity and lets the
// physics step integrate. While the hit reaction is knocked, every velocity
// write keeps the body's current horizontal component.

use glam::Vec2;

use super::animation::AnimationSignals;
use super::body::CharacterBody;
use super::knockback::HitReaction;
use super::sensor::EnvironmentSensor;
use super::stamina::StaminaPool;
use super::state::{CharacterState, CharacterStateMachine};
use super::stats::LocomotionStats;
use crate::core::math;
use crate::engine::input::{InputEvent, PlayerInput, MOVE_DEADZONE};

/// Vertical speed band treated as "not moving vertically" by gravity shaping
const VERTICAL_DEADBAND: f32 = 0.01;

/// Highest vertical speed at which wall contact starts a wall slide
const WALL_SLIDE_ENTRY_SPEED: f32 = 0.01;

/// Horizontal speed above which the character counts as moving that way
const MOVING_SPEED: f32 = 0.1;

/// Wall normals with a smaller x component fall back to facing
const WALL_NORMAL_EPSILON: f32 = 0.001;

/// Movement state machine for one character
///
/// Owns the jump budget, grace timers and facing, and is wired to its stamina
/// pool and hit reaction at construction.
#[derive(Debug)]
pub struct LocomotionAgent {
    stats: LocomotionStats,
    state_machine: CharacterStateMachine,
    stamina: StaminaPool,
    hit_reaction: HitReaction,

    /// Jumps left before the next landing, in [0, max_jumps]
    remaining_jumps: u8,
    /// Ground contact as of the last frame tick
    is_grounded: bool,
    coyote_timer: f32,
    jump_buffer_timer: f32,
    wall_lock_timer: f32,
    /// Jump button held; releasing early shortens the jump
    jump_held: bool,
    /// A jump press was applied during the current frame tick
    jump_pressed_this_frame: bool,
    /// +1 facing right, -1 facing left
    facing_sign: f32,
    /// x of the most recent wall normal, preferred for wall-jump direction
    last_wall_normal_x: f32,
    /// Gravity scale restored when sliding or jumping off a wall
    base_gravity_scale: f32,
}

impl LocomotionAgent {
    pub fn new(stats: LocomotionStats, stamina: StaminaPool, hit_reaction: HitReaction) -> Self {
        let remaining_jumps = stats.max_jumps;
        Self {
            stats,
            state_machine: CharacterStateMachine::new(),
            stamina,
            hit_reaction,
            remaining_jumps,
            is_grounded: false,
            coyote_timer: 0.0,
            jump_buffer_timer: 0.0,
            wall_lock_timer: 0.0,
            jump_held: false,
            jump_pressed_this_frame: false,
            facing_sign: 1.0,
            last_wall_normal_x: 0.0,
            base_gravity_scale: 1.0,
        }
    }

    /// Set the gravity scale wall states restore the body to
    pub fn with_base_gravity_scale(mut self, scale: f32) -> Self {
        self.base_gravity_scale = scale;
        self
    }

    /// Frame tick
    ///
    /// Order matters: input edges first, then state resolution (so a landing
    /// overrides whatever an edge asked for this frame), then state behavior.
    pub fn update(
        &mut self,
        dt: f32,
        input: &mut PlayerInput,
        sensor: &dyn EnvironmentSensor,
        body: &mut dyn CharacterBody,
    ) -> AnimationSignals {
        self.hit_reaction.update(dt);
        self.state_machine.tick(dt);

        for event in input.drain_events() {
            self.apply_input(event, sensor, body);
        }

        self.resolve(dt, input, sensor, body.velocity().y);
        self.run_state(dt, input, body);

        self.stamina.regenerate(dt);
        self.jump_pressed_this_frame = false;

        self.signals(body)
    }

    /// Physics tick: consume a buffered jump, then shape gravity
    pub fn fixed_update(&mut self, dt: f32, gravity: Vec2, body: &mut dyn CharacterBody) {
        if self.jump_buffer_timer > 0.0 && self.can_jump_now() {
            self.do_jump(body);
            // Grace window and buffer are spent together
            self.jump_buffer_timer = 0.0;
            self.coyote_timer = 0.0;
        }

        if self.state() == CharacterState::WallSlide {
            return;
        }

        let mut velocity = body.velocity();
        let gravity_y = gravity.y * body.gravity_scale();
        if velocity.y < -VERTICAL_DEADBAND {
            velocity.y += gravity_y * (self.stats.fall_multiplier - 1.0) * dt;
        } else if velocity.y > VERTICAL_DEADBAND && !self.jump_held {
            velocity.y += gravity_y * (self.stats.low_jump_multiplier - 1.0) * dt;
        }
        self.set_velocity(body, velocity);
    }

    /// Start a knockback away from the current facing
    pub fn knockback(&mut self, body: &mut dyn CharacterBody) -> bool {
        self.hit_reaction.knockback(self.facing_sign, body)
    }

    /// Forget all transient state, as after a respawn
    pub fn reset(&mut self) {
        self.state_machine.reset();
        self.hit_reaction.reset();
        self.remaining_jumps = self.stats.max_jumps;
        self.is_grounded = false;
        self.coyote_timer = 0.0;
        self.jump_buffer_timer = 0.0;
        self.wall_lock_timer = 0.0;
        self.jump_held = false;
        self.jump_pressed_this_frame = false;
        self.last_wall_normal_x = 0.0;
    }

    fn apply_input(
        &mut self,
        event: InputEvent,
        sensor: &dyn EnvironmentSensor,
        body: &dyn CharacterBody,
    ) {
        match event {
            InputEvent::Move(axis) => {
                self.state_machine.transition(if axis.abs() > MOVE_DEADZONE {
                    CharacterState::Running
                } else {
                    CharacterState::Idle
                });
            }
            InputEvent::Sprint(true) => self.state_machine.transition(CharacterState::Sprinting),
            InputEvent::Sprint(false) => self.state_machine.transition(CharacterState::Running),
            InputEvent::JumpPressed => {
                self.jump_held = true;
                self.jump_pressed_this_frame = true;
                self.jump_buffer_timer = self.stats.jump_buffer;
                self.state_machine.transition(CharacterState::Jumping);
            }
            InputEvent::JumpReleased => {
                self.jump_held = false;
                let velocity = body.velocity();
                if sensor.is_grounded() && velocity.x > MOVING_SPEED {
                    self.state_machine.transition(CharacterState::Running);
                }
                if velocity.y < 0.0 {
                    self.state_machine.transition(CharacterState::Falling);
                }
            }
        }
    }

    fn resolve(
        &mut self,
        dt: f32,
        input: &PlayerInput,
        sensor: &dyn EnvironmentSensor,
        velocity_y: f32,
    ) {
        let was_grounded = self.is_grounded;
        self.is_grounded = sensor.is_grounded();

        if self.is_grounded && !was_grounded {
            self.remaining_jumps = self.stats.max_jumps;
            self.state_machine.transition(if input.is_moving() {
                CharacterState::Running
            } else {
                CharacterState::Idle
            });
        }

        self.wall_lock_timer = math::decay(self.wall_lock_timer, dt);

        if !self.is_grounded && self.wall_lock_timer <= 0.0 {
            if let Some(contact) = sensor.wall_contact(self.facing_sign) {
                self.last_wall_normal_x = contact.normal_x;
                if velocity_y <= WALL_SLIDE_ENTRY_SPEED {
                    self.state_machine.transition(CharacterState::WallSlide);
                }
                if self.jump_pressed_this_frame {
                    self.state_machine.transition(CharacterState::WallSlideJump);
                }
            }
        }

        self.coyote_timer = if self.is_grounded {
            self.stats.coyote_time
        } else {
            math::decay(self.coyote_timer, dt)
        };
        self.jump_buffer_timer = math::decay(self.jump_buffer_timer, dt);
    }

    fn run_state(&mut self, dt: f32, input: &PlayerInput, body: &mut dyn CharacterBody) {
        let velocity = body.velocity();
        match self.state() {
            CharacterState::Idle => self.move_horizontally(body, 0.0),
            CharacterState::Running => {
                self.move_horizontally(body, input.move_axis() * self.stats.move_speed)
            }
            CharacterState::Sprinting => {
                if self.stamina.has_charge() && input.sprint_held() {
                    self.stamina.spend_for(dt);
                    let speed =
                        input.move_axis() * self.stats.move_speed * self.stats.sprint_multiplier;
                    self.move_horizontally(body, speed);
                }
            }
            // Driven by jump consumption and gravity shaping in the physics tick
            CharacterState::Jumping | CharacterState::Falling => {}
            CharacterState::WallSlide => {
                body.set_gravity_scale(self.base_gravity_scale);
                let capped = velocity.y.max(-self.stats.wall_fall_speed.abs());
                self.set_velocity(body, Vec2::new(velocity.x, capped));
            }
            CharacterState::WallSlideJump => self.wall_jump(body),
        }
    }

    fn wall_jump(&mut self, body: &mut dyn CharacterBody) {
        self.jump_held = true;

        if !self.stamina.has_charge() {
            // Enters the jump state without leaving the wall. The next frame's
            // wall check puts the character back into a slide.
            log::debug!("Wall jump denied: out of stamina");
            self.state_machine.transition(CharacterState::Jumping);
            return;
        }
        self.stamina.spend(self.stats.stamina_jump_cost);

        let away = if self.last_wall_normal_x.abs() > WALL_NORMAL_EPSILON {
            self.last_wall_normal_x
        } else {
            -self.facing_sign
        };
        let direction = Vec2::new(away, 1.0).normalize();

        body.set_gravity_scale(self.base_gravity_scale);
        self.set_velocity(body, direction * self.stats.jump_force);

        self.wall_lock_timer = self.stats.wall_jump_lock_duration;
        self.state_machine.transition(CharacterState::Jumping);
        log::debug!("Wall jump towards x = {:.2}", away);
    }

    fn can_jump_now(&self) -> bool {
        self.coyote_timer > 0.0 || self.remaining_jumps > 0
    }

    fn do_jump(&mut self, body: &mut dyn CharacterBody) {
        if !self.stamina.has_charge() {
            log::debug!("Jump denied: out of stamina");
            return;
        }
        self.stamina.spend(self.stats.stamina_jump_cost);

        // Clean takeoff: vertical speed replaced, horizontal untouched
        let velocity = body.velocity();
        self.set_velocity(body, Vec2::new(velocity.x, self.stats.jump_force));

        self.remaining_jumps = if self.is_grounded {
            self.stats.max_jumps.saturating_sub(1)
        } else {
            self.remaining_jumps.saturating_sub(1)
        };
        log::debug!("Jump consumed, {} left", self.remaining_jumps);
    }

    /// Set horizontal speed from input and update facing
    fn move_horizontally(&mut self, body: &mut dyn CharacterBody, speed_x: f32) {
        let velocity = body.velocity();
        if self.set_velocity(body, Vec2::new(speed_x, velocity.y)) {
            if speed_x > MOVING_SPEED {
                self.facing_sign = 1.0;
            } else if speed_x < -MOVING_SPEED {
                self.facing_sign = -1.0;
            }
        }
    }

    /// Write velocity unless knocked, in which case only y is taken.
    /// Returns whether the horizontal component was written.
    fn set_velocity(&self, body: &mut dyn CharacterBody, velocity: Vec2) -> bool {
        if self.hit_reaction.is_knocked() {
            let current = body.velocity();
            body.set_velocity(Vec2::new(current.x, velocity.y));
            return false;
        }
        body.set_velocity(velocity);
        true
    }

    fn signals(&self, body: &dyn CharacterBody) -> AnimationSignals {
        let velocity = body.velocity();
        AnimationSignals {
            horizontal_speed: velocity.x,
            vertical_speed: velocity.y,
            grounded: self.is_grounded,
            wall_sliding: self.state() == CharacterState::WallSlide,
            facing_sign: self.facing_sign,
            flashing: self.hit_reaction.is_flashing(),
        }
    }

    pub fn state(&self) -> CharacterState {
        self.state_machine.state()
    }

    pub fn state_machine(&self) -> &CharacterStateMachine {
        &self.state_machine
    }

    pub fn stats(&self) -> &LocomotionStats {
        &self.stats
    }

    pub fn remaining_jumps(&self) -> u8 {
        self.remaining_jumps
    }

    pub fn is_grounded(&self) -> bool {
        self.is_grounded
    }

    pub fn coyote_timer(&self) -> f32 {
        self.coyote_timer
    }

    pub fn jump_buffer_timer(&self) -> f32 {
        self.jump_buffer_timer
    }

    pub fn wall_lock_timer(&self) -> f32 {
        self.wall_lock_timer
    }

    pub fn jump_held(&self) -> bool {
        self.jump_held
    }

    pub fn facing_sign(&self) -> f32 {
        self.facing_sign
    }

    pub fn stamina(&self) -> &StaminaPool {
        &self.stamina
    }

    pub fn stamina_mut(&mut self) -> &mut StaminaPool {
        &mut self.stamina
    }

    pub fn hit_reaction(&self) -> &HitReaction {
        &self.hit_reaction
    }

    pub fn hit_reaction_mut(&mut self) -> &mut HitReaction {
        &mut self.hit_reaction
    }
}
