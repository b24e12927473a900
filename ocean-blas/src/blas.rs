use std::fmt::Debug;
use std::ops::{Add, Mul};

use num_complex::{Complex32, Complex64};
use num_traits::{One, Zero};

use crate::error::{Error, Result};

pub mod cpu;
pub mod reference;

pub use cpu::CpuContext;
pub use reference::ReferenceContext;

/// Storage order of every matrix in a gemm call
#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Order {
    /// Rows are contiguous, the leading dimension steps between rows
    RowMajor = 0,
    /// Columns are contiguous, the leading dimension steps between columns
    ColMajor = 1,
}

impl TryFrom<u32> for Order {
    type Error = Error;

    fn try_from(value: u32) -> Result<Self> {
        match value {
            0 => Ok(Order::RowMajor),
            1 => Ok(Order::ColMajor),
            value => Err(Error::InvalidFlag {
                kind: "order",
                value,
            }),
        }
    }
}

#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatrixOp {
    NoTrans = b'N',
    Trans = b'T',
    ConjTrans = b'C',
}

impl MatrixOp {
    pub fn is_transposed(self) -> bool {
        !matches!(self, MatrixOp::NoTrans)
    }

    pub fn is_conjugated(self) -> bool {
        matches!(self, MatrixOp::ConjTrans)
    }
}

impl TryFrom<u32> for MatrixOp {
    type Error = Error;

    fn try_from(value: u32) -> Result<Self> {
        match value {
            0 => Ok(MatrixOp::NoTrans),
            1 => Ok(MatrixOp::Trans),
            2 => Ok(MatrixOp::ConjTrans),
            value => Err(Error::InvalidFlag {
                kind: "transpose",
                value,
            }),
        }
    }
}

/// An element type the gemm routines are defined over
pub trait Scalar:
    Copy
    + Debug
    + PartialEq
    + Zero
    + One
    + Add<Output = Self>
    + Mul<Output = Self>
    + Send
    + Sync
    + 'static
{
    /// Name of the matching C routine, used in diagnostics
    const ROUTINE: &'static str;

    /// Complex conjugate. The identity for real types.
    fn conj(self) -> Self;
}

macro_rules! impl_real {
    ($float:ty => $routine:literal) => {
        impl Scalar for $float {
            const ROUTINE: &'static str = $routine;

            #[inline(always)]
            fn conj(self) -> Self {
                self
            }
        }
    };
}

macro_rules! impl_complex {
    ($complex:ty => $routine:literal) => {
        impl Scalar for $complex {
            const ROUTINE: &'static str = $routine;

            #[inline(always)]
            fn conj(self) -> Self {
                <$complex>::conj(&self)
            }
        }
    };
}

impl_real!(f32 => "OCBLAS_SGEMM");
impl_real!(f64 => "OCBLAS_DGEMM");
impl_complex!(Complex32 => "OCBLAS_CGEMM");
impl_complex!(Complex64 => "OCBLAS_ZGEMM");

/// A context needed for running BLAS operations
pub trait BLASContext: Clone {
    /// Human readable name of the backend behind this context
    const NAME: &'static str;
}

/// A type that can be matrix multiplied
pub trait GEMM<C: BLASContext>: Scalar {
    #[allow(clippy::too_many_arguments)]
    /// Computes `C := alpha*op(A)*op(B) + beta*C`.
    ///
    /// Callers have already validated the arguments, and `m`, `n`, `k` are non-zero
    /// and `alpha` is non-zero. When `beta` is zero, `c` must not be read.
    ///
    /// # Safety
    /// `a`, `b` and `c` must be valid for the extents described by the dimensions
    /// and leading dimensions, and `c` must not overlap `a` or `b`. Some backends
    /// call across an FFI barrier and perform no checks of their own.
    unsafe fn gemm(
        ctx: C,
        order: Order,
        transa: MatrixOp,
        transb: MatrixOp,
        m: usize,
        n: usize,
        k: usize,
        alpha: Self,
        a: *const Self,
        lda: usize,
        b: *const Self,
        ldb: usize,
        beta: Self,
        c: *mut Self,
        ldc: usize,
    );
}
