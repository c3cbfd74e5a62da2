// Simulation engines. Each reads the store and returns proposed mutations.

pub mod collision;
pub mod movement;
pub mod progression;
pub mod projectiles;
pub mod spawner;
