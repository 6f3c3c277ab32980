use thiserror::Error;

/// Reasons an input is rejected by the game core.
///
/// None of these are fatal: a rejected move leaves every session object
/// exactly as it was, and the caller simply does nothing this frame.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HandplayError {
    #[error("square ({row}, {col}) is outside the 3x3 board")]
    OutOfBounds { row: usize, col: usize },

    #[error("square ({row}, {col}) is already occupied")]
    Occupied { row: usize, col: usize },

    #[error("game is already over")]
    GameOver,

    #[error("session finished after {rounds} rounds")]
    SessionFinished { rounds: u32 },

    #[error("input not accepted during the {0} phase")]
    WrongPhase(&'static str),

    #[error("invalid landmark buffer: {0}")]
    InvalidLandmarks(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("cannot parse {kind} from {input:?}")]
    Parse { kind: &'static str, input: String },

    #[error("cannot write {kind}: {reason}")]
    Serialize { kind: &'static str, reason: String },
}

/// Convenience Result type for handplay operations
pub type Result<T> = std::result::Result<T, HandplayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let parse = HandplayError::Parse {
            kind: "frame trace",
            input: "[".into(),
        };
        assert_eq!(parse.to_string(), "cannot parse frame trace from \"[\"");

        let write = HandplayError::Serialize {
            kind: "frame trace",
            reason: "key must be a string".into(),
        };
        assert_eq!(write.to_string(), "cannot write frame trace: key must be a string");
        assert_ne!(parse, write);
    }
}
