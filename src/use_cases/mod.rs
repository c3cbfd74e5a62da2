// Use cases layer: the tick scheduler and the tasks around it.

pub mod arena;
pub mod game;
pub mod sink;
pub mod types;
pub mod world;

pub use arena::{ArenaHandle, ArenaSettings, spawn_arena};
pub use sink::{SnapshotSink, sink_task};
pub use types::{GameEvent, PlayerNotice, WorldUpdate};
pub use world::{TickOutcome, World};
