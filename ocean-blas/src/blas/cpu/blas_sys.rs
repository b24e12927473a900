extern crate blas_src;
extern crate blas_sys;

use std::os::raw::{c_char, c_int};

use num_complex::{Complex32, Complex64};

use crate::blas::{MatrixOp, Order, GEMM};

use super::CpuContext;

macro_rules! impl_gemm {
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
                // fortran is column major. a row major C is the column major C^T = op(B)^T op(A)^T
                let (transa, transb, m, n, a, lda, b, ldb) = match order {
                    Order::ColMajor => (transa, transb, m, n, a, lda, b, ldb),
                    Order::RowMajor => (transb, transa, n, m, b, ldb, a, lda),
                };

                $gemm(
                    &(transa as c_char),
                    &(transb as c_char),
                    &(m as c_int),
                    &(n as c_int),
                    &(k as c_int),
                    &alpha as *const $float as *const _,
                    a as *const _,
                    &(lda as c_int),
                    b as *const _,
                    &(ldb as c_int),
                    &beta as *const $float as *const _,
                    c as *mut _,
                    &(ldc as c_int),
                );
            }
        }
    };
}

impl_gemm!(f32 => blas_sys::sgemm_);
impl_gemm!(f64 => blas_sys::dgemm_);
impl_gemm!(Complex32 => blas_sys::cgemm_);
impl_gemm!(Complex64 => blas_sys::zgemm_);
