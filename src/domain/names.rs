use super::errors::JoinError;

const MIN_NAME_LEN: usize = 3;
const MAX_NAME_LEN: usize = 15;
const MAX_PLAYER_ID_LEN: usize = 64;

/// Checks the display-name contract the identity layer promises: 3-15 chars of `[A-Za-z0-9_]`.
pub fn validate_player_name(value: &str) -> Result<String, JoinError> {
    let len = value.chars().count();
    if !(MIN_NAME_LEN..=MAX_NAME_LEN).contains(&len) {
        return Err(JoinError::InvalidName);
    }
    if !value.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(JoinError::InvalidName);
    }
    Ok(value.to_string())
}

pub fn validate_player_id(value: &str) -> Result<String, JoinError> {
    let id = value.trim();
    if id.is_empty() || id.len() > MAX_PLAYER_ID_LEN {
        return Err(JoinError::InvalidPlayerId);
    }
    Ok(id.to_string())
}
