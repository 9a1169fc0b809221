// Character entity and management

use glam::Vec2;

use crate::engine::input::PlayerInput;
use crate::engine::physics::{
    body::presets, from_vector, to_vector, ColliderHandle, PhysicsWorld, RigidBodyHandle,
};
use crate::game::respawn::{RespawnPhase, RespawnSequence, DEFAULT_FADE_SPEED};

use super::animation::AnimationSink;
use super::body::CharacterBody;
use super::health::{DamageOutcome, Health};
use super::knockback::HitReaction;
use super::locomotion::LocomotionAgent;
use super::sensor::{PhysicsSensor, SensorConfig, SensorSnapshot};
use super::stamina::StaminaPool;
use super::state::CharacterState;
use super::stats::CharacterStats;
use super::SetupError;

/// Unique identifier for a character
pub type CharacterId = u32;

/// A player-controlled character: locomotion, health and input wired to one
/// physics body
#[derive(Debug)]
pub struct Character {
    /// Unique identifier
    pub id: CharacterId,
    /// Character name (for display)
    pub name: String,
    /// Player index controlling this character (0-3, or None for AI)
    pub player_index: Option<usize>,

    // Physics
    /// Handle to the character's rigid body in the physics world
    pub body_handle: RigidBodyHandle,
    /// Handle to the character's collider
    pub collider_handle: ColliderHandle,

    stats: CharacterStats,
    agent: LocomotionAgent,
    health: Health,
    input: PlayerInput,
    sensor: SensorConfig,

    /// Inactive characters are dead and skip every tick
    active: bool,
    /// Where the next respawn puts the character
    spawn_point: Vec2,
}

impl Character {
    /// Frame tick: sense, run locomotion and publish animation signals
    pub fn update(&mut self, physics: &mut PhysicsWorld, dt: f32, sink: &mut dyn AnimationSink) {
        if !self.active {
            return;
        }

        self.input.update(dt);

        let snapshot = SensorSnapshot::capture(
            &PhysicsSensor::new(physics, self.body_handle, &self.sensor),
            self.agent.facing_sign(),
        );

        let Some(body) = physics.get_rigid_body_mut(self.body_handle) else {
            log::warn!("Character {} has no rigid body, skipping update", self.id);
            return;
        };

        let signals = self.agent.update(dt, &mut self.input, &snapshot, body);
        sink.receive(self.id, signals);
    }

    /// Physics tick: jump consumption and gravity shaping
    pub fn fixed_update(&mut self, physics: &mut PhysicsWorld, dt: f32) {
        if !self.active {
            return;
        }

        let gravity = from_vector(&physics.gravity());
        let Some(body) = physics.get_rigid_body_mut(self.body_handle) else {
            log::warn!("Character {} has no rigid body, skipping physics", self.id);
            return;
        };

        self.agent.fixed_update(dt, gravity, body);
    }

    /// Apply damage
    ///
    /// A surviving character is knocked back and flashes. A lethal hit
    /// deactivates the character until it is respawned.
    pub fn take_damage(&mut self, physics: &mut PhysicsWorld, amount: i32) -> DamageOutcome {
        let outcome = self.health.take_damage(amount);
        match outcome {
            DamageOutcome::Hurt => {
                if let Some(body) = physics.get_rigid_body_mut(self.body_handle) {
                    self.agent.knockback(body);
                }
                self.agent.hit_reaction_mut().sprite_flash();
                log::debug!(
                    "{} took {} damage, {} left",
                    self.name,
                    amount,
                    self.health.current()
                );
            }
            DamageOutcome::Died => {
                log::info!("{} has died", self.name);
                self.deactivate(physics);
            }
            DamageOutcome::Ignored => {}
        }
        outcome
    }

    /// External push (bounce pads, traps)
    ///
    /// Input is ignored for `duration` seconds and `impulse` is applied once.
    pub fn push(&mut self, physics: &mut PhysicsWorld, impulse: Vec2, duration: f32) {
        if !self.active {
            return;
        }

        self.input.disable_for(duration);
        if let Some(body) = physics.get_rigid_body_mut(self.body_handle) {
            CharacterBody::apply_impulse(body, impulse);
        }
        log::debug!("{} pushed by {:?} for {:.2}s", self.name, impulse, duration);
    }

    /// Bring the character back at its spawn point with a clean slate
    pub fn respawn(&mut self, physics: &mut PhysicsWorld) {
        if let Some(body) = physics.get_rigid_body_mut(self.body_handle) {
            body.set_translation(to_vector(self.spawn_point), true);
            body.set_linvel(to_vector(Vec2::ZERO), true);
            body.set_enabled(true);
        }

        self.agent.reset();
        self.health.refill();
        self.input.reset();
        self.active = true;

        log::info!("{} respawned at {:?}", self.name, self.spawn_point);
    }

    /// Take the character out of the simulation
    pub fn deactivate(&mut self, physics: &mut PhysicsWorld) {
        self.active = false;
        if let Some(body) = physics.get_rigid_body_mut(self.body_handle) {
            body.set_linvel(to_vector(Vec2::ZERO), false);
            body.set_enabled(false);
        }
    }

    pub fn heal(&mut self, amount: i32) {
        self.health.heal(amount);
    }

    pub fn regenerate_stamina(&mut self, amount: f32) {
        self.agent.stamina_mut().regenerate_amount(amount);
    }

    /// Move the respawn point (checkpoints)
    pub fn set_spawn_point(&mut self, point: Vec2) {
        self.spawn_point = point;
    }

    pub fn spawn_point(&self) -> Vec2 {
        self.spawn_point
    }

    /// Get character's current position
    pub fn position(&self, physics: &PhysicsWorld) -> Option<Vec2> {
        physics
            .get_rigid_body(self.body_handle)
            .map(|body| from_vector(body.translation()))
    }

    /// Get character's current velocity
    pub fn velocity(&self, physics: &PhysicsWorld) -> Option<Vec2> {
        physics
            .get_rigid_body(self.body_handle)
            .map(|body| from_vector(body.linvel()))
    }

    pub fn state(&self) -> CharacterState {
        self.agent.state()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_alive(&self) -> bool {
        !self.health.is_dead()
    }

    pub fn stats(&self) -> &CharacterStats {
        &self.stats
    }

    pub fn agent(&self) -> &LocomotionAgent {
        &self.agent
    }

    pub fn health(&self) -> &Health {
        &self.health
    }

    pub fn input(&self) -> &PlayerInput {
        &self.input
    }

    /// Input sources feed edges in through here
    pub fn input_mut(&mut self) -> &mut PlayerInput {
        &mut self.input
    }
}

/// Assembles a character and adds its body to the physics world
///
/// The sensor configuration is required; everything else has a default.
#[derive(Debug, Clone)]
pub struct CharacterBuilder {
    name: String,
    player_index: Option<usize>,
    stats: CharacterStats,
    sensor: Option<SensorConfig>,
    spawn_point: Vec2,
}

impl CharacterBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            player_index: None,
            stats: CharacterStats::standard(),
            sensor: None,
            spawn_point: Vec2::ZERO,
        }
    }

    pub fn player_index(mut self, index: usize) -> Self {
        self.player_index = Some(index);
        self
    }

    pub fn stats(mut self, stats: CharacterStats) -> Self {
        self.stats = stats;
        self
    }

    pub fn sensor(mut self, config: SensorConfig) -> Self {
        self.sensor = Some(config);
        self
    }

    /// Sensor checks sized to the character's collider
    pub fn fitted_sensor(self) -> Self {
        let config = SensorConfig::for_dimensions(self.stats.width, self.stats.height);
        self.sensor(config)
    }

    pub fn spawn_point(mut self, point: Vec2) -> Self {
        self.spawn_point = point;
        self
    }

    /// Validate the setup, then create the body and collider
    ///
    /// Nothing is added to the physics world when validation fails.
    pub fn build(self, id: CharacterId, physics: &mut PhysicsWorld) -> Result<Character, SetupError> {
        self.stats.validate()?;
        let sensor = self.sensor.ok_or(SetupError::MissingSensor)?;
        sensor.validate()?;

        let body_handle = physics.add_rigid_body(presets::character_body(
            self.spawn_point.x,
            self.spawn_point.y,
        ));
        let collider = presets::character_collider(self.stats.width, self.stats.height);
        let collider_handle = physics.add_collider(collider, body_handle);

        let base_gravity_scale = physics
            .get_rigid_body(body_handle)
            .map(|body| body.gravity_scale())
            .ok_or(SetupError::MissingBody)?;

        let agent = LocomotionAgent::new(
            self.stats.locomotion.clone(),
            StaminaPool::new(&self.stats.stamina),
            HitReaction::new(&self.stats.knockback),
        )
        .with_base_gravity_scale(base_gravity_scale);

        log::debug!("Built character {} ({}) at {:?}", id, self.name, self.spawn_point);

        Ok(Character {
            id,
            name: self.name,
            player_index: self.player_index,
            body_handle,
            collider_handle,
            health: Health::new(self.stats.max_health),
            input: PlayerInput::new(self.player_index.unwrap_or(0)),
            stats: self.stats,
            agent,
            sensor,
            active: true,
            spawn_point: self.spawn_point,
        })
    }
}

/// Manages all characters in the game
#[derive(Debug)]
pub struct CharacterManager {
    characters: Vec<Character>,
    next_id: CharacterId,
    respawns: Vec<(CharacterId, RespawnSequence)>,
    fade_speed: f32,
}

impl Default for CharacterManager {
    fn default() -> Self {
        Self::new()
    }
}

impl CharacterManager {
    pub fn new() -> Self {
        Self::with_fade_speed(DEFAULT_FADE_SPEED)
    }

    /// Manager whose respawn fades run at `fade_speed` alpha per second
    pub fn with_fade_speed(fade_speed: f32) -> Self {
        Self {
            characters: Vec::new(),
            next_id: 0,
            respawns: Vec::new(),
            fade_speed,
        }
    }

    /// Spawn a new character
    pub fn spawn(
        &mut self,
        builder: CharacterBuilder,
        physics: &mut PhysicsWorld,
    ) -> Result<CharacterId, SetupError> {
        let id = self.next_id;
        let character = builder.build(id, physics)?;
        self.next_id += 1;

        log::info!("Spawned {} as character {}", character.name, id);
        self.characters.push(character);
        Ok(id)
    }

    /// Get a character by ID
    pub fn get(&self, id: CharacterId) -> Option<&Character> {
        self.characters.iter().find(|c| c.id == id)
    }

    /// Get a mutable character by ID
    pub fn get_mut(&mut self, id: CharacterId) -> Option<&mut Character> {
        self.characters.iter_mut().find(|c| c.id == id)
    }

    /// Get a mutable character by player index
    pub fn get_by_player_mut(&mut self, player_index: usize) -> Option<&mut Character> {
        self.characters
            .iter_mut()
            .find(|c| c.player_index == Some(player_index))
    }

    /// Get all characters
    pub fn all(&self) -> &[Character] {
        &self.characters
    }

    /// Damage a character; a death starts its respawn sequence
    pub fn take_damage(
        &mut self,
        id: CharacterId,
        amount: i32,
        physics: &mut PhysicsWorld,
    ) -> Option<DamageOutcome> {
        let outcome = self.get_mut(id)?.take_damage(physics, amount);
        if outcome == DamageOutcome::Died {
            self.start_respawn(id);
        }
        Some(outcome)
    }

    /// Frame tick for every character, then advance respawn fades
    pub fn update(&mut self, physics: &mut PhysicsWorld, dt: f32, sink: &mut dyn AnimationSink) {
        for character in &mut self.characters {
            character.update(physics, dt, sink);
        }

        // Characters killed directly through `Character::take_damage`
        let dead: Vec<CharacterId> = self
            .characters
            .iter()
            .filter(|c| !c.is_alive())
            .map(|c| c.id)
            .collect();
        for id in dead {
            self.start_respawn(id);
        }

        let mut relocate = Vec::new();
        for (id, sequence) in &mut self.respawns {
            if sequence.update(dt) == RespawnPhase::Relocating {
                relocate.push(*id);
            }
        }
        for id in relocate {
            if let Some(character) = self.get_mut(id) {
                character.respawn(physics);
            }
        }
        self.respawns.retain(|(_, sequence)| !sequence.is_finished());
    }

    /// Physics tick for every character
    pub fn fixed_update(&mut self, physics: &mut PhysicsWorld, dt: f32) {
        for character in &mut self.characters {
            character.fixed_update(physics, dt);
        }
    }

    /// Darkest fader opacity across running respawns, 0 when none
    pub fn fade_alpha(&self) -> f32 {
        self.respawns
            .iter()
            .map(|(_, sequence)| sequence.alpha())
            .fold(0.0, f32::max)
    }

    /// Check if a respawn is running for the character
    pub fn is_respawning(&self, id: CharacterId) -> bool {
        self.respawns.iter().any(|(respawning, _)| *respawning == id)
    }

    /// Remove a character and its body
    pub fn remove(&mut self, id: CharacterId, physics: &mut PhysicsWorld) -> Option<Character> {
        let pos = self.characters.iter().position(|c| c.id == id)?;
        let character = self.characters.remove(pos);
        physics.remove_rigid_body(character.body_handle);
        self.respawns.retain(|(respawning, _)| *respawning != id);
        Some(character)
    }

    /// Get the number of characters
    pub fn count(&self) -> usize {
        self.characters.len()
    }

    fn start_respawn(&mut self, id: CharacterId) {
        if self.is_respawning(id) {
            return;
        }
        log::info!("Starting respawn for character {}", id);
        self.respawns
            .push((id, RespawnSequence::new(self.fade_speed)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::input::Action;
    use crate::game::characters::animation::AnimationSignals;
    use approx::assert_relative_eq;

    const DT: f32 = 1.0 / 60.0;

    /// Floor top at y = 0
    fn test_world() -> PhysicsWorld {
        let mut world = PhysicsWorld::new();
        let floor = world.add_rigid_body(presets::terrain_body(0.0, -0.5));
        world.add_collider(presets::terrain_collider(40.0, 1.0), floor);
        world
    }

    fn hero() -> CharacterBuilder {
        CharacterBuilder::new("Hero")
            .player_index(0)
            .fitted_sensor()
            .spawn_point(Vec2::new(0.0, 1.5))
    }

    fn run(manager: &mut CharacterManager, world: &mut PhysicsWorld, frames: usize) {
        for _ in 0..frames {
            manager.update(world, DT, &mut ());
            manager.fixed_update(world, DT);
            world.step();
        }
    }

    fn settled() -> (CharacterManager, PhysicsWorld, CharacterId) {
        let mut world = test_world();
        let mut manager = CharacterManager::with_fade_speed(10.0);
        let id = manager.spawn(hero(), &mut world).expect("valid setup");
        run(&mut manager, &mut world, 90);
        (manager, world, id)
    }

    #[test]
    fn test_missing_sensor_is_rejected() {
        let mut world = test_world();
        let result = CharacterBuilder::new("Hero").build(0, &mut world);
        assert_eq!(result.err(), Some(SetupError::MissingSensor));
    }

    #[test]
    fn test_invalid_stats_are_rejected() {
        let mut world = test_world();
        let mut stats = CharacterStats::standard();
        stats.locomotion.jump_force = f32::NAN;
        let result = hero().stats(stats).build(0, &mut world);
        assert!(matches!(
            result,
            Err(SetupError::InvalidStat {
                name: "jump_force",
                ..
            })
        ));
    }

    #[test]
    fn test_failed_spawn_does_not_consume_id() {
        let mut world = test_world();
        let mut manager = CharacterManager::new();
        assert!(manager
            .spawn(CharacterBuilder::new("Broken"), &mut world)
            .is_err());
        assert_eq!(manager.spawn(hero(), &mut world), Ok(0));
        assert_eq!(manager.count(), 1);
    }

    #[test]
    fn test_character_lands_on_floor() {
        let (manager, _world, id) = settled();
        let character = manager.get(id).expect("spawned");
        assert!(character.agent().is_grounded());
        assert_eq!(character.state(), CharacterState::Idle);
    }

    #[test]
    fn test_jump_leaves_the_ground() {
        let (mut manager, mut world, id) = settled();
        let start = manager.get(id).and_then(|c| c.position(&world)).expect("body");

        manager
            .get_mut(id)
            .expect("spawned")
            .input_mut()
            .press(Action::Jump);
        run(&mut manager, &mut world, 10);

        let character = manager.get(id).expect("spawned");
        let position = character.position(&world).expect("body");
        assert!(position.y > start.y + 0.3);
        assert!(!character.agent().is_grounded());
        assert_eq!(character.agent().remaining_jumps(), 1);
    }

    #[test]
    fn test_running_moves_right() {
        let (mut manager, mut world, id) = settled();
        manager
            .get_mut(id)
            .expect("spawned")
            .input_mut()
            .press(Action::MoveRight);
        run(&mut manager, &mut world, 30);

        let character = manager.get(id).expect("spawned");
        assert_eq!(character.state(), CharacterState::Running);
        assert!(character.position(&world).expect("body").x > 1.0);
    }

    #[test]
    fn test_signals_reach_sink() {
        let (mut manager, mut world, id) = settled();
        let mut sink: Vec<(CharacterId, AnimationSignals)> = Vec::new();
        manager.update(&mut world, DT, &mut sink);

        assert_eq!(sink.len(), 1);
        assert_eq!(sink[0].0, id);
        assert!(sink[0].1.grounded);
    }

    #[test]
    fn test_hurt_knocks_back_and_flashes() {
        let (mut manager, mut world, id) = settled();
        assert_eq!(
            manager.take_damage(id, 10, &mut world),
            Some(DamageOutcome::Hurt)
        );

        let character = manager.get(id).expect("spawned");
        let velocity = character.velocity(&world).expect("body");
        assert_relative_eq!(velocity.x, -character.stats().knockback.force.x);
        assert!(character.agent().hit_reaction().is_knocked());
        assert!(character.agent().hit_reaction().is_flashing());
        assert_eq!(character.health().current(), 90);
    }

    #[test]
    fn test_death_and_respawn_cycle() {
        let (mut manager, mut world, id) = settled();
        manager
            .get_mut(id)
            .expect("spawned")
            .set_spawn_point(Vec2::new(5.0, 1.5));

        assert_eq!(
            manager.take_damage(id, 1000, &mut world),
            Some(DamageOutcome::Died)
        );
        assert!(!manager.get(id).expect("spawned").is_active());
        assert!(manager.is_respawning(id));

        // Dead characters ignore further damage
        assert_eq!(
            manager.take_damage(id, 10, &mut world),
            Some(DamageOutcome::Ignored)
        );

        run(&mut manager, &mut world, 3);
        assert!(manager.fade_alpha() > 0.0);

        run(&mut manager, &mut world, 30);
        let character = manager.get(id).expect("spawned");
        assert!(character.is_active());
        assert_eq!(character.health().current(), character.stats().max_health);
        assert_eq!(character.state(), CharacterState::Idle);
        assert!(!manager.is_respawning(id));
        assert_eq!(manager.fade_alpha(), 0.0);

        let position = character.position(&world).expect("body");
        assert_relative_eq!(position.x, 5.0, epsilon = 0.01);
    }

    #[test]
    fn test_inactive_character_is_not_ticked() {
        let (mut manager, mut world, id) = settled();
        manager
            .get_mut(id)
            .expect("spawned")
            .deactivate(&mut world);

        let mut sink: Vec<(CharacterId, AnimationSignals)> = Vec::new();
        manager.update(&mut world, DT, &mut sink);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_push_disables_input_and_applies_impulse() {
        let (mut manager, mut world, id) = settled();
        let character = manager.get_mut(id).expect("spawned");
        character.push(&mut world, Vec2::new(0.0, 20.0), 0.5);

        assert!(!character.input().is_enabled());
        assert!(character.velocity(&world).expect("body").y > 0.0);

        // Presses during the window are dropped
        character.input_mut().press(Action::MoveRight);
        run(&mut manager, &mut world, 10);
        assert_ne!(
            manager.get(id).expect("spawned").state(),
            CharacterState::Running
        );

        // Still holding right when the window closes
        run(&mut manager, &mut world, 30);
        let character = manager.get(id).expect("spawned");
        assert!(character.input().is_enabled());
        assert!(character.input().is_moving());
    }

    #[test]
    fn test_push_impulse_is_velocity_change() {
        let (mut manager, mut world, id) = settled();
        let character = manager.get_mut(id).expect("spawned");
        let before = character.velocity(&world).expect("body");

        character.push(&mut world, Vec2::new(0.0, 10.0), 0.5);
        let after = character.velocity(&world).expect("body");
        assert_relative_eq!(after.y - before.y, 10.0, epsilon = 1e-3);
        assert_relative_eq!(after.x, before.x, epsilon = 1e-3);
    }

    #[test]
    fn test_pickups() {
        let (mut manager, mut world, id) = settled();
        manager.take_damage(id, 40, &mut world);

        let character = manager.get_mut(id).expect("spawned");
        character.heal(25);
        assert_eq!(character.health().current(), 85);

        character.regenerate_stamina(1000.0);
        assert_eq!(
            character.agent().stamina().current(),
            character.agent().stamina().max()
        );
    }

    #[test]
    fn test_lookup_by_player_index() {
        let (mut manager, mut world, id) = settled();
        let ai = manager
            .spawn(
                CharacterBuilder::new("Drone")
                    .fitted_sensor()
                    .spawn_point(Vec2::new(4.0, 1.5)),
                &mut world,
            )
            .expect("valid setup");

        assert_eq!(manager.get_by_player_mut(0).map(|c| c.id), Some(id));
        assert!(manager.get_by_player_mut(1).is_none());
        assert_eq!(manager.get(ai).and_then(|c| c.player_index), None);
    }

    #[test]
    fn test_remove_character() {
        let (mut manager, mut world, id) = settled();
        let removed = manager.remove(id, &mut world).expect("spawned");
        assert_eq!(removed.name, "Hero");
        assert!(world.get_rigid_body(removed.body_handle).is_none());
        assert_eq!(manager.count(), 0);
    }
}
