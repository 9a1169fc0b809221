// Animation signals emitted for the presentation layer

/// Values an animator needs to pick and blend clips
///
/// Emitted once per frame tick. Nothing flows back into locomotion.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AnimationSignals {
    pub horizontal_speed: f32,
    pub vertical_speed: f32,
    pub grounded: bool,
    pub wall_sliding: bool,
    /// +1 facing right, -1 facing left (sprite flip)
    pub facing_sign: f32,
    /// Sprite flash cue active
    pub flashing: bool,
}

impl AnimationSignals {
    /// Check if the sprite should be drawn mirrored
    pub fn flip_horizontal(&self) -> bool {
        self.facing_sign < 0.0
    }
}

/// Consumer of per-frame animation signals
pub trait AnimationSink {
    fn receive(&mut self, id: u32, signals: AnimationSignals);
}

/// Records every emission, in order
impl AnimationSink for Vec<(u32, AnimationSignals)> {
    fn receive(&mut self, id: u32, signals: AnimationSignals) {
        self.push((id, signals));
    }
}

/// Discards every emission
impl AnimationSink for () {
    fn receive(&mut self, _id: u32, _signals: AnimationSignals) {}
}
