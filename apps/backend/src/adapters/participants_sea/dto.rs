//! DTOs for participants_sea adapter.

/// DTO for creating a participant. `username` is already normalized.
#[derive(Debug, Clone)]
pub struct ParticipantCreate {
    pub username: String,
}

impl ParticipantCreate {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
        }
    }
}
