use num_complex::{Complex32, Complex64};
use num_traits::{One, Zero};

use crate::blas::{BLASContext, CpuContext, MatrixOp, Order, Scalar, GEMM};
use crate::error::{Error, Result};
use crate::layout::{min_ld, offset, strides};

/// Decodes the three flag arguments of a C call, reporting positions 1 to 3.
pub fn parse_flags(
    routine: &'static str,
    order: u32,
    transa: u32,
    transb: u32,
) -> Result<(Order, MatrixOp, MatrixOp)> {
    let order = Order::try_from(order).map_err(|_| Error::invalid(routine, 1, "order"))?;
    let transa = MatrixOp::try_from(transa).map_err(|_| Error::invalid(routine, 2, "transA"))?;
    let transb = MatrixOp::try_from(transb).map_err(|_| Error::invalid(routine, 3, "transB"))?;
    Ok((order, transa, transb))
}

fn dim(routine: &'static str, position: u32, name: &'static str, value: i32) -> Result<usize> {
    usize::try_from(value).map_err(|_| Error::invalid(routine, position, name))
}

fn lead(
    routine: &'static str,
    position: u32,
    name: &'static str,
    value: i32,
    min: usize,
) -> Result<usize> {
    match usize::try_from(value) {
        Ok(ld) if ld >= min => Ok(ld),
        _ => Err(Error::invalid(routine, position, name)),
    }
}

/// `C := beta*C`, writing exact zeros when `beta == 0`.
unsafe fn scale<F: Scalar>(order: Order, m: usize, n: usize, beta: F, c: *mut F, ldc: usize) {
    let sc = strides(order, MatrixOp::NoTrans, ldc);
    for j in 0..n {
        for i in 0..m {
            let dst = c.offset(offset(sc, i, j));
            *dst = if beta.is_zero() {
                F::zero()
            } else {
                beta * *dst
            };
        }
    }
}

/// Dimensions of a call that passed [`validate`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Dims {
    m: usize,
    n: usize,
    k: usize,
    lda: usize,
    ldb: usize,
    ldc: usize,
}

/// Checks positions 4 to 14 in the order of the C prototype.
///
/// `has_alpha` and `has_beta` tell whether the scalars at positions 7 and 12 were
/// supplied. They can only be missing when passed by pointer.
#[allow(clippy::too_many_arguments)]
pub fn validate(
    routine: &'static str,
    order: Order,
    transa: MatrixOp,
    transb: MatrixOp,
    m: i32,
    n: i32,
    k: i32,
    has_alpha: bool,
    lda: i32,
    ldb: i32,
    has_beta: bool,
    ldc: i32,
) -> Result<Dims> {
    let m = dim(routine, 4, "m", m)?;
    let n = dim(routine, 5, "n", n)?;
    let k = dim(routine, 6, "k", k)?;
    if !has_alpha {
        return Err(Error::invalid(routine, 7, "alpha"));
    }
    let lda = lead(routine, 9, "lda", lda, min_ld(order, transa, m, k))?;
    let ldb = lead(routine, 11, "ldb", ldb, min_ld(order, transb, k, n))?;
    if !has_beta {
        return Err(Error::invalid(routine, 12, "beta"));
    }
    let ldc = lead(routine, 14, "ldc", ldc, min_ld(order, MatrixOp::NoTrans, m, n))?;
    Ok(Dims {
        m,
        n,
        k,
        lda,
        ldb,
        ldc,
    })
}

/// Computes `C := alpha*op(A)*op(B) + beta*C` with BLAS argument conventions.
///
/// Arguments are checked in the order of the C prototype and the first bad one is
/// reported by its 1-based position. `C` is left untouched on error.
///
/// # Safety
/// When the call is not a quick return, `a`, `b` and `c` must point to buffers
/// covering the extents implied by the dimensions and leading dimensions, and `c`
/// must not overlap `a` or `b`.
#[allow(clippy::too_many_arguments)]
pub unsafe fn gemm_raw<F: GEMM<C>, C: BLASContext>(
    ctx: C,
    order: Order,
    transa: MatrixOp,
    transb: MatrixOp,
    m: i32,
    n: i32,
    k: i32,
    alpha: F,
    a: *const F,
    lda: i32,
    b: *const F,
    ldb: i32,
    beta: F,
    c: *mut F,
    ldc: i32,
) -> Result<()> {
    let dims = validate(
        F::ROUTINE,
        order,
        transa,
        transb,
        m,
        n,
        k,
        true,
        lda,
        ldb,
        true,
        ldc,
    )?;
    gemm_checked(ctx, order, transa, transb, dims, alpha, a, b, beta, c)
}

/// The part of [`gemm_raw`] that follows [`validate`]: quick returns, null checks
/// on the matrices, and dispatch.
///
/// # Safety
/// See [`gemm_raw`].
#[allow(clippy::too_many_arguments)]
pub unsafe fn gemm_checked<F: GEMM<C>, C: BLASContext>(
    ctx: C,
    order: Order,
    transa: MatrixOp,
    transb: MatrixOp,
    dims: Dims,
    alpha: F,
    a: *const F,
    b: *const F,
    beta: F,
    c: *mut F,
) -> Result<()> {
    let routine = F::ROUTINE;
    let Dims {
        m,
        n,
        k,
        lda,
        ldb,
        ldc,
    } = dims;

    if m == 0 || n == 0 {
        log::debug!("{routine}: empty result ({m}x{n}), nothing to do");
        return Ok(());
    }

    let no_product = alpha.is_zero() || k == 0;
    if no_product && beta.is_one() {
        log::debug!("{routine}: alpha == 0 or k == 0 with beta == 1, nothing to do");
        return Ok(());
    }

    if c.is_null() {
        return Err(Error::NullPointer {
            routine,
            position: 13,
            name: "C",
        });
    }

    if no_product {
        log::debug!("{routine}: alpha == 0 or k == 0, scaling C by beta");
        scale(order, m, n, beta, c, ldc);
        return Ok(());
    }

    if a.is_null() {
        return Err(Error::NullPointer {
            routine,
            position: 8,
            name: "A",
        });
    }
    if b.is_null() {
        return Err(Error::NullPointer {
            routine,
            position: 10,
            name: "B",
        });
    }

    log::trace!(
        "{routine} [{}] {order:?} {transa:?}x{transb:?} m={m} n={n} k={k} lda={lda} ldb={ldb} ldc={ldc}",
        C::NAME,
    );

    F::gemm(
        ctx, order, transa, transb, m, n, k, alpha, a, lda, b, ldb, beta, c, ldc,
    );
    Ok(())
}

macro_rules! typed_gemm {
    ($(#[$doc:meta])* $name:ident: $float:ty) => {
        $(#[$doc])*
        ///
        /// # Safety
        /// See [`gemm_raw`].
        #[allow(clippy::too_many_arguments)]
        pub unsafe fn $name(
            order: Order,
            transa: MatrixOp,
            transb: MatrixOp,
            m: i32,
            n: i32,
            k: i32,
            alpha: $float,
            a: *const $float,
            lda: i32,
            b: *const $float,
            ldb: i32,
            beta: $float,
            c: *mut $float,
            ldc: i32,
        ) -> Result<()> {
            gemm_raw(
                CpuContext, order, transa, transb, m, n, k, alpha, a, lda, b, ldb, beta, c, ldc,
            )
        }
    };
}

typed_gemm!(
    /// Single precision real gemm on the default CPU backend.
    sgemm: f32
);
typed_gemm!(
    /// Double precision real gemm on the default CPU backend.
    dgemm: f64
);
typed_gemm!(
    /// Single precision complex gemm on the default CPU backend.
    cgemm: Complex32
);
typed_gemm!(
    /// Double precision complex gemm on the default CPU backend.
    zgemm: Complex64
);
