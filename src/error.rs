/// Errors raised by the game models.
///
/// Construction errors (`InvalidDimension`) surface once, at construction.
/// Usage errors (`OutOfBounds`, `InvalidGeometry`) leave model state
/// untouched. `IllegalReversal` is a disallowed player action: interactive
/// callers should drop the input and keep the previous direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    InvalidDimension {
        width: usize,
        height: usize,
        reason: &'static str,
    },
    OutOfBounds {
        row: usize,
        col: usize,
    },
    InvalidGeometry {
        from: (i32, i32),
        to: (i32, i32),
    },
    IllegalReversal,
}

impl std::fmt::Display for GameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameError::InvalidDimension {
                width,
                height,
                reason,
            } => {
                write!(f, "Invalid dimensions {}x{}: {}", width, height, reason)
            }
            GameError::OutOfBounds { row, col } => {
                write!(f, "Cell ({}, {}) is outside the grid", row, col)
            }
            GameError::InvalidGeometry { from, to } => {
                write!(
                    f,
                    "Segment ({}, {}) -> ({}, {}) is not axis-aligned",
                    from.0, from.1, to.0, to.1
                )
            }
            GameError::IllegalReversal => {
                write!(f, "Impossible to reverse last movement")
            }
        }
    }
}

impl std::error::Error for GameError {}
