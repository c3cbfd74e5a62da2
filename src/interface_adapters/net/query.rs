// Read-only HTTP routes over the latest committed snapshot.

use crate::interface_adapters::protocol::{LeaderboardEntryDto, WorldUpdateDto};
use crate::interface_adapters::state::AppState;

use axum::{
    extract::{Json, State},
    response::IntoResponse,
};
use std::sync::Arc;

pub async fn leaderboard_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let snapshot = state.arena.latest_snapshot();
    let entries: Vec<LeaderboardEntryDto> = snapshot
        .leaderboard
        .iter()
        .map(LeaderboardEntryDto::from)
        .collect();
    Json(entries)
}

pub async fn snapshot_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let snapshot = state.arena.latest_snapshot();
    Json(WorldUpdateDto::from(snapshot.as_ref()))
}
