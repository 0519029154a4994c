use std::fmt;

/// Inconsistent state found while locking the current piece.
///
/// Fatal for the session: the orchestrator forces game over when it sees one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockError {
    NoActivePiece,
    NoNextPiece,
}

impl LockError {
    pub fn code(self) -> &'static str {
        match self {
            LockError::NoActivePiece => "no_active_piece",
            LockError::NoNextPiece => "no_next_piece",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            LockError::NoActivePiece => "lock requested without a current piece",
            LockError::NoNextPiece => "no next piece to promote after lock",
        }
    }
}

impl fmt::Display for LockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for LockError {}
