use crate::use_cases::ArenaHandle;

#[derive(Clone)]
pub struct AppState {
    // Channels into and out of the arena world task.
    pub arena: ArenaHandle,
}
