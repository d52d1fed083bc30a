use thiserror::Error;

/// Failures surfaced by the simulator.
///
/// Degenerate numeric input (a zero or negative ripple radius) is not an
/// error; those calls simply leave the grid untouched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    #[error("invalid simulator configuration: {reason}")]
    Construction { reason: String },
    #[error("cell ({i}, {j}) is outside the {width}x{height} grid")]
    OutOfRange {
        i: usize,
        j: usize,
        width: usize,
        height: usize,
    },
    #[error("buffer holds {actual} floats but {expected} are required")]
    BufferLength { expected: usize, actual: usize },
    #[error("vertex offset {offset} does not fit in a stride of {stride}")]
    VertexLayout { stride: usize, offset: usize },
}

impl SimError {
    pub(crate) fn construction(reason: impl Into<String>) -> Self {
        SimError::Construction {
            reason: reason.into(),
        }
    }
}

pub type SimResult<T> = Result<T, SimError>;
