/// Traits and implementations of BLAS providers
pub mod blas;

/// Error types shared by every entry point
pub mod error;

/// Argument validation and dispatch for the BLAS style gemm
pub mod gemm;

/// Stride and leading dimension arithmetic
pub mod layout;

/// Borrowed matrix views and the safe gemm front-end
pub mod matrix;

pub use blas::{BLASContext, CpuContext, MatrixOp, Order, ReferenceContext, Scalar, GEMM};
pub use error::{Error, Result};
pub use gemm::{cgemm, dgemm, gemm_checked, gemm_raw, sgemm, zgemm};
pub use matrix::{gemm, gemm_ctx, Matrix, MatrixView, MatrixViewMut};

pub use num_complex::{Complex32, Complex64};
