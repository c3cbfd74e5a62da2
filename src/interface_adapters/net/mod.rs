// Network adapter modules split by client sockets vs read-only HTTP routes.

pub mod client;
pub mod query;

pub use client::{spawn_arena_serializer, ws_handler};
pub use query::{leaderboard_handler, snapshot_handler};
