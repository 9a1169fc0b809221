use rapier2d::prelude::*;

/// Collision groups for filtering what objects can collide with each other
///
/// `Terrain` doubles as the ground layer: ground checks and wall rays only
/// ever report terrain contacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionGroups {
    /// Default group - interacts with everything
    Default = 0b0000_0001,

    /// Player characters
    Character = 0b0000_0010,

    /// Level geometry: floors, walls, platforms
    Terrain = 0b0000_0100,
}

impl CollisionGroups {
    /// Convert to rapier2d's InteractionGroups
    pub fn to_interaction_groups(self) -> InteractionGroups {
        let memberships = Group::from_bits_truncate(self as u32);

        let filter = match self {
            // Characters stand on terrain, never on each other
            CollisionGroups::Character => Group::from_bits_truncate(CollisionGroups::Terrain as u32),

            CollisionGroups::Terrain => Group::from_bits_truncate(
                CollisionGroups::Character as u32 | CollisionGroups::Terrain as u32,
            ),

            CollisionGroups::Default => Group::ALL,
        };

        InteractionGroups::new(memberships, filter)
    }

    /// Groups for a scene query that should only see this group
    pub fn query_only(self) -> InteractionGroups {
        InteractionGroups::new(Group::ALL, Group::from_bits_truncate(self as u32))
    }
}
