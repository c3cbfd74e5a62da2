// Domain layer: core simulation types and rules.

pub mod errors;
pub mod items;
pub mod names;
pub mod state;
pub mod store;
pub mod systems;
pub mod tuning;
pub mod vec2;

pub use errors::{FireRejection, JoinError};
pub use items::ItemKind;
pub use state::{
    DangerZone, Item, LeaderboardEntry, Player, PlayerId, PlayerInput, PlayerSnapshot, Projectile,
    WorldSnapshot,
};
pub use store::{EntityStore, Mutation};
pub use tuning::Tuning;
pub use vec2::Vec2;
