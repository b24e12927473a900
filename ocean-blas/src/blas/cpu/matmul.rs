use matrixmultiply::{cgemm, dgemm, sgemm, zgemm, CGemmOption};
use num_complex::{Complex32, Complex64};

use crate::blas::{MatrixOp, Order, Scalar, GEMM};
use crate::layout::{offset, strides};

use super::CpuContext;

macro_rules! impl_gemm_real {
    ($float:ty => $gemm:path) => {
        impl GEMM<CpuContext> for $float {
            unsafe fn gemm(
                _ctx: CpuContext,
                order: Order,
                transa: MatrixOp,
                transb: MatrixOp,
                m: usize,
                n: usize,
                k: usize,
                alpha: $float,
                a: *const $float,
                lda: usize,
                b: *const $float,
                ldb: usize,
                beta: $float,
                c: *mut $float,
                ldc: usize,
            ) {
                // conjugation is the identity on reals
                let sa = strides(order, transa, lda);
                let sb = strides(order, transb, ldb);
                let sc = strides(order, MatrixOp::NoTrans, ldc);

                $gemm(
                    m, k, n, alpha, a, sa[0], sa[1], b, sb[0], sb[1], beta, c, sc[0], sc[1],
                )
            }
        }
    };
}

impl_gemm_real!(f32 => sgemm);
impl_gemm_real!(f64 => dgemm);

/// Strides of `op(X)`, packing a conjugated copy first when the op asks for one.
///
/// matrixmultiply has no conjugation option, so a conjugated operand is packed
/// as `op(X)` itself in column major order.
unsafe fn operand<F: Scalar>(
    x: *const F,
    order: Order,
    op: MatrixOp,
    ld: usize,
    rows: usize,
    cols: usize,
) -> (Option<Vec<F>>, [isize; 2]) {
    let s = strides(order, op, ld);
    if !op.is_conjugated() {
        return (None, s);
    }

    let mut packed = Vec::with_capacity(rows * cols);
    for j in 0..cols {
        for i in 0..rows {
            packed.push((*x.offset(offset(s, i, j))).conj());
        }
    }
    (Some(packed), [1, rows as isize])
}

macro_rules! impl_gemm_complex {
    ($complex:ty, $raw:ty => $gemm:path) => {
        impl GEMM<CpuContext> for $complex {
            unsafe fn gemm(
                _ctx: CpuContext,
                order: Order,
                transa: MatrixOp,
                transb: MatrixOp,
                m: usize,
                n: usize,
                k: usize,
                alpha: $complex,
                a: *const $complex,
                lda: usize,
                b: *const $complex,
                ldb: usize,
                beta: $complex,
                c: *mut $complex,
                ldc: usize,
            ) {
                let (packed_a, sa) = operand(a, order, transa, lda, m, k);
                let (packed_b, sb) = operand(b, order, transb, ldb, k, n);
                let sc = strides(order, MatrixOp::NoTrans, ldc);

                let a = packed_a.as_ref().map_or(a, |v| v.as_ptr());
                let b = packed_b.as_ref().map_or(b, |v| v.as_ptr());

                // num-complex is #[repr(C)] { re, im }, the same layout as [T; 2]
                $gemm(
                    CGemmOption::Standard,
                    CGemmOption::Standard,
                    m,
                    k,
                    n,
                    [alpha.re, alpha.im],
                    a as *const $raw,
                    sa[0],
                    sa[1],
                    b as *const $raw,
                    sb[0],
                    sb[1],
                    [beta.re, beta.im],
                    c as *mut $raw,
                    sc[0],
                    sc[1],
                )
            }
        }
    };
}

impl_gemm_complex!(Complex32, [f32; 2] => cgemm);
impl_gemm_complex!(Complex64, [f64; 2] => zgemm);
