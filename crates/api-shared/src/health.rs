use crate::pb::MessageRes;

/// Static liveness payloads shared by every API surface.
#[derive(Clone)]
pub struct HealthService;

impl HealthService {
    /// Creates a new instance of HealthService.
    pub fn new() -> Self {
        Self
    }

    /// Payload for `GET /`.
    pub fn root() -> MessageRes {
        MessageRes {
            message: "Wedding Invitation Backend is running".into(),
        }
    }

    /// Payload for `GET /api/hello`.
    pub fn hello() -> MessageRes {
        MessageRes {
            message: "Hello from the backend API!".into(),
        }
    }
}

impl Default for HealthService {
    fn default() -> Self {
        Self::new()
    }
}
