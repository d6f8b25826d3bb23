use super::chat::SendError;

/// Handler failure taxonomy.
///
/// Every variant is converted at the router boundary to an inline reply
/// (with a corrective hint where one exists) or a silent drop for
/// best-effort paths. None of these is fatal to the event loop.
#[derive(Debug)]
pub enum RouterError {
    /// Malformed argument; carries the hint shown to the user.
    Validation(String),
    /// A game is already running in this channel.
    AdmissionConflict,
    /// No game to act on, or the wrong game kind for the action.
    NotFound(String),
    /// Non-admin invoking an admin-gated command.
    PermissionDenied,
    /// Message delivery failed; best-effort paths swallow this.
    Send(SendError),
    /// Record store or other collaborator failure.
    Internal(anyhow::Error),
}

impl std::fmt::Display for RouterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(hint) => write!(f, "validation: {}", hint),
            Self::AdmissionConflict => write!(f, "a game is already running"),
            Self::NotFound(what) => write!(f, "not found: {}", what),
            Self::PermissionDenied => write!(f, "permission denied"),
            Self::Send(e) => write!(f, "{}", e),
            Self::Internal(e) => write!(f, "internal: {}", e),
        }
    }
}

impl std::error::Error for RouterError {}

impl From<SendError> for RouterError {
    fn from(e: SendError) -> Self {
        Self::Send(e)
    }
}

impl From<anyhow::Error> for RouterError {
    fn from(e: anyhow::Error) -> Self {
        Self::Internal(e)
    }
}
