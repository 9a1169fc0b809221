// Gameplay: characters and the respawn flow

pub mod characters;
pub mod respawn;
