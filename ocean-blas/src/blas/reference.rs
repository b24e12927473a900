use num_traits::Zero;

use crate::layout::{offset, strides};

use super::{BLASContext, MatrixOp, Order, Scalar, GEMM};

/// Plain triple loop over strided views. Slow, but easy to trust.
#[derive(Clone, Copy, Debug, Default)]
pub struct ReferenceContext;

impl BLASContext for ReferenceContext {
    const NAME: &'static str = "reference";
}

impl<F: Scalar> GEMM<ReferenceContext> for F {
    unsafe fn gemm(
        _ctx: ReferenceContext,
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
        let sa = strides(order, transa, lda);
        let sb = strides(order, transb, ldb);
        let sc = strides(order, MatrixOp::NoTrans, ldc);

        let load = |ptr: *const F, s: [isize; 2], i: usize, j: usize, op: MatrixOp| {
            let x = *ptr.offset(offset(s, i, j));
            if op.is_conjugated() {
                x.conj()
            } else {
                x
            }
        };

        for j in 0..n {
            for i in 0..m {
                let mut acc = F::zero();
                for p in 0..k {
                    acc = acc + load(a, sa, i, p, transa) * load(b, sb, p, j, transb);
                }

                let dst = c.offset(offset(sc, i, j));
                *dst = if beta.is_zero() {
                    alpha * acc
                } else {
                    alpha * acc + beta * *dst
                };
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use num_complex::Complex64;

    use super::ReferenceContext;
    use crate::blas::{MatrixOp, Order, GEMM};

    #[test]
    fn matmul() {
        //     0 1
        // A = 2 3
        //     4 5

        // B = 0 1
        //     2 3

        // column major (read each column first)
        let a = [0., 2., 4., 1., 3., 5.];
        let b = [0., 2., 1., 3.];
        let mut c = [0.; 6];

        //           2  3
        // C = AB =  6 11
        //          10 19

        unsafe {
            f64::gemm(
                ReferenceContext,
                Order::ColMajor,
                MatrixOp::NoTrans,
                MatrixOp::NoTrans,
                3,
                2,
                2,
                1.,
                a.as_ptr(),
                3,
                b.as_ptr(),
                2,
                0.,
                c.as_mut_ptr(),
                3,
            );
        }
        assert_eq!(c, [2., 6., 10., 3., 11., 19.]);
    }

    #[test]
    fn beta_zero_ignores_nan() {
        let a = [1.0f32, 2.0];
        let b = [3.0f32, 4.0];
        let mut c = [f32::NAN];

        // 1x2 * 2x1, row major
        unsafe {
            f32::gemm(
                ReferenceContext,
                Order::RowMajor,
                MatrixOp::NoTrans,
                MatrixOp::NoTrans,
                1,
                1,
                2,
                2.,
                a.as_ptr(),
                2,
                b.as_ptr(),
                1,
                0.,
                c.as_mut_ptr(),
                1,
            );
        }
        assert_eq!(c, [22.0]);
    }

    #[test]
    fn conj_trans() {
        // A is 2x1 column major, op(A) = A^H is 1x2
        let a = [Complex64::new(1., 1.), Complex64::new(0., 2.)];
        // B is 2x1
        let b = [Complex64::new(1., 0.), Complex64::new(0., 1.)];
        let mut c = [Complex64::new(1., 0.)];

        // A^H B = (1-i)*1 + (-2i)*(i) = 1 - i + 2 = 3 - i
        // C = 1 * (3 - i) + 1 * 1 = 4 - i
        unsafe {
            Complex64::gemm(
                ReferenceContext,
                Order::ColMajor,
                MatrixOp::ConjTrans,
                MatrixOp::NoTrans,
                1,
                1,
                2,
                Complex64::new(1., 0.),
                a.as_ptr(),
                2,
                b.as_ptr(),
                2,
                Complex64::new(1., 0.),
                c.as_mut_ptr(),
                1,
            );
        }
        assert_eq!(c, [Complex64::new(4., -1.)]);
    }
}
