use super::BLASContext;

#[cfg(feature = "blas-sys")]
#[allow(clippy::module_inception)]
mod blas_sys;

#[cfg(all(feature = "matrixmultiply", not(feature = "blas-sys")))]
mod matmul;

/// The compiled-in CPU backend.
///
/// A system BLAS (through `blas-src`) wins over `matrixmultiply`. With neither
/// enabled, calls fall through to [`ReferenceContext`](super::ReferenceContext).
#[derive(Clone, Copy, Debug, Default)]
pub struct CpuContext;

impl BLASContext for CpuContext {
    #[cfg(feature = "blas-sys")]
    const NAME: &'static str = "blas-sys";

    #[cfg(all(feature = "matrixmultiply", not(feature = "blas-sys")))]
    const NAME: &'static str = "matrixmultiply";

    #[cfg(not(any(feature = "matrixmultiply", feature = "blas-sys")))]
    const NAME: &'static str = "reference";
}

#[cfg(not(any(feature = "matrixmultiply", feature = "blas-sys")))]
mod fallback {
    use super::CpuContext;
    use crate::blas::{MatrixOp, Order, ReferenceContext, Scalar, GEMM};

    impl<F: Scalar> GEMM<CpuContext> for F {
        unsafe fn gemm(
            _ctx: CpuContext,
            order: Order,
            transa: MatrixOp,
            transb: MatrixOp,
            m: usize,
            n: usize,
            k: usize,
            alpha: F,
            a: *const F,
            lda: usize,
            b: *const F,
            ldb: usize,
            beta: F,
            c: *mut F,
            ldc: usize,
        ) {
            <F as GEMM<ReferenceContext>>::gemm(
                ReferenceContext,
                order,
                transa,
                transb,
                m,
                n,
                k,
                alpha,
                a,
                lda,
                b,
                ldb,
                beta,
                c,
                ldc,
            )
        }
    }
}
