//! C ABI for the ocean-blas gemm routines.
//!
//! The exported symbols match `include/ocean_blas.h`. Invalid arguments are
//! reported through the `log` facade and the per-thread error slot read by
//! [`ocblas_get_last_error`]; the output matrix is left untouched.
#![allow(non_camel_case_types, non_upper_case_globals, non_snake_case)]

use std::cell::Cell;
use std::ffi::{c_void, CStr, CString};
use std::os::raw::{c_char, c_int, c_uint};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::OnceLock;

use ocean_blas::{
    gemm::{parse_flags, validate},
    gemm_checked, gemm_raw, BLASContext, Complex32, Complex64, CpuContext, Result, Scalar,
};

/// Storage order, `typedef enum { OcBlasRowMajor, OcBlasColMajor } OcBlas_Order`
pub type OcBlas_Order = c_uint;
pub const OcBlasRowMajor: OcBlas_Order = 0;
pub const OcBlasColMajor: OcBlas_Order = 1;

/// Operand transform, `typedef enum { OcBlasNoTrans, OcBlasTrans, OcBlasConjTrans } OcBlas_Transpose`
pub type OcBlas_Transpose = c_uint;
pub const OcBlasNoTrans: OcBlas_Transpose = 0;
pub const OcBlasTrans: OcBlas_Transpose = 1;
pub const OcBlasConjTrans: OcBlas_Transpose = 2;

/// Error slot value for a call that panicked internally.
pub const OCBLAS_INTERNAL_ERROR: c_int = -1;

thread_local! {
    static LAST_ERROR: Cell<c_int> = Cell::new(0);
}

fn set_last_error(code: c_int) {
    LAST_ERROR.with(|e| e.set(code));
}

/// Runs one exported call, turning errors and panics into the error slot.
fn guard(routine: &'static str, call: impl FnOnce() -> Result<()>) {
    match catch_unwind(AssertUnwindSafe(call)) {
        Ok(Ok(())) => set_last_error(0),
        Ok(Err(err)) => {
            log::error!("{err}");
            set_last_error(err.position().map_or(OCBLAS_INTERNAL_ERROR, |p| p as c_int));
        }
        Err(_) => {
            log::error!("{routine} panicked");
            set_last_error(OCBLAS_INTERNAL_ERROR);
        }
    }
}

macro_rules! export_real {
    ($name:ident: $float:ty) => {
        /// # Safety
        /// `ptrA`, `ptrB` and `ptrC` must cover the matrices described by the
        /// dimensions and leading dimensions, and `ptrC` must not overlap the inputs.
        #[no_mangle]
        pub unsafe extern "C" fn $name(
            order: OcBlas_Order,
            transA: OcBlas_Transpose,
            transB: OcBlas_Transpose,
            m: c_int,
            n: c_int,
            k: c_int,
            alpha: $float,
            ptrA: *const $float,
            lda: c_int,
            ptrB: *const $float,
            ldb: c_int,
            beta: $float,
            ptrC: *mut $float,
            ldc: c_int,
        ) {
            let routine = <$float as Scalar>::ROUTINE;
            guard(routine, || {
                let (order, transa, transb) = parse_flags(routine, order, transA, transB)?;
                gemm_raw(
                    CpuContext, order, transa, transb, m, n, k, alpha, ptrA, lda, ptrB, ldb,
                    beta, ptrC, ldc,
                )
            })
        }
    };
}

macro_rules! export_complex {
    ($name:ident: $complex:ty) => {
        /// `alpha` and `beta` point at one complex value, `ptrA`, `ptrB` and `ptrC` at
        /// interleaved real and imaginary parts.
        ///
        /// # Safety
        /// `ptrA`, `ptrB` and `ptrC` must cover the matrices described by the
        /// dimensions and leading dimensions, and `ptrC` must not overlap the inputs.
        #[no_mangle]
        pub unsafe extern "C" fn $name(
            order: OcBlas_Order,
            transA: OcBlas_Transpose,
            transB: OcBlas_Transpose,
            m: c_int,
            n: c_int,
            k: c_int,
            alpha: *const c_void,
            ptrA: *const c_void,
            lda: c_int,
            ptrB: *const c_void,
            ldb: c_int,
            beta: *const c_void,
            ptrC: *mut c_void,
            ldc: c_int,
        ) {
            let routine = <$complex as Scalar>::ROUTINE;
            guard(routine, || {
                let (order, transa, transb) = parse_flags(routine, order, transA, transB)?;
                let dims = validate(
                    routine,
                    order,
                    transa,
                    transb,
                    m,
                    n,
                    k,
                    !alpha.is_null(),
                    lda,
                    ldb,
                    !beta.is_null(),
                    ldc,
                )?;
                // both scalars were checked for null above
                let alpha = *(alpha as *const $complex);
                let beta = *(beta as *const $complex);
                gemm_checked(
                    CpuContext,
                    order,
                    transa,
                    transb,
                    dims,
                    alpha,
                    ptrA as *const $complex,
                    ptrB as *const $complex,
                    beta,
                    ptrC as *mut $complex,
                )
            })
        }
    };
}

export_real!(ocblas_sgemm: f32);
export_real!(ocblas_dgemm: f64);
export_complex!(ocblas_cgemm: Complex32);
export_complex!(ocblas_zgemm: Complex64);

/// Parameter number that made the last call on this thread fail, 0 after a successful
/// call, or [`OCBLAS_INTERNAL_ERROR`].
#[no_mangle]
pub extern "C" fn ocblas_get_last_error() -> c_int {
    LAST_ERROR.with(|e| e.get())
}

/// Resets the error slot of the calling thread.
#[no_mangle]
pub extern "C" fn ocblas_clear_error() {
    set_last_error(0);
}

/// Name of the compiled-in backend as a static NUL-terminated string.
#[no_mangle]
pub extern "C" fn ocblas_backend() -> *const c_char {
    static NAME: OnceLock<CString> = OnceLock::new();
    NAME.get_or_init(|| CString::new(CpuContext::NAME).unwrap_or_default())
        .as_ptr()
}

/// The backend name without going through a C string.
pub fn backend() -> &'static CStr {
    // Safety: ocblas_backend returns a pointer into a static CString
    unsafe { CStr::from_ptr(ocblas_backend()) }
}
