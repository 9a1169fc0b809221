// 2D platformer locomotion core
//
// - `core`: math helpers shared by everything else
// - `engine`: fixed-step timing, rapier physics world, per-player input
// - `game`: characters (locomotion, stamina, hit reaction, health) and respawning

pub mod core;
pub mod engine;
pub mod game;
