//! Error types for gemm calls.

use thiserror::Error;

/// Errors that can occur while setting up a gemm call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// An argument violated the BLAS calling convention. `position` is the
    /// 1-based parameter number in the C prototype.
    #[error("On entry to {routine} parameter number {position} ({name}) had an illegal value")]
    InvalidParameter {
        routine: &'static str,
        position: u32,
        name: &'static str,
    },

    /// A matrix pointer was null while its contents were needed.
    #[error("On entry to {routine} parameter number {position} ({name}) was a null pointer")]
    NullPointer {
        routine: &'static str,
        position: u32,
        name: &'static str,
    },

    /// An integer did not name a member of a flag enumeration.
    #[error("{value} is not a valid {kind} flag")]
    InvalidFlag { kind: &'static str, value: u32 },

    /// A slice is shorter than the matrix it is supposed to hold.
    #[error("buffer too small: matrix needs {required} elements, got {actual}")]
    BufferTooSmall { required: usize, actual: usize },

    /// The shapes of the operands do not chain.
    #[error("invalid matrix dimensions: {0}")]
    DimensionMismatch(String),

    /// A matrix view is not contiguous along either axis.
    #[error("one of the strides must be 1 (contiguous), got {0:?}")]
    NonContiguous([usize; 2]),

    /// Conjugation without transposition has no BLAS flag.
    #[error("a conjugated operand must also be transposed")]
    UnsupportedConjugate,

    /// A dimension is too large, either for the C `int` of the calling convention
    /// or for the element count of a buffer.
    #[error("dimension {0} is out of range")]
    Overflow(usize),
}

impl Error {
    pub(crate) fn invalid(routine: &'static str, position: u32, name: &'static str) -> Self {
        Error::InvalidParameter {
            routine,
            position,
            name,
        }
    }

    /// The 1-based parameter number for errors raised by the BLAS style entry points.
    pub fn position(&self) -> Option<u32> {
        match self {
            Error::InvalidParameter { position, .. } | Error::NullPointer { position, .. } => {
                Some(*position)
            }
            _ => None,
        }
    }
}

/// Result type for gemm calls.
pub type Result<T> = std::result::Result<T, Error>;
