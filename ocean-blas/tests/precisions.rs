use approx::assert_relative_eq;
use ocean_blas::{
    cgemm, dgemm, gemm_raw, sgemm, zgemm, Complex32, Complex64, MatrixOp, Order,
    ReferenceContext, Result,
};

const ORDERS: [Order; 2] = [Order::RowMajor, Order::ColMajor];
const OPS: [MatrixOp; 3] = [MatrixOp::NoTrans, MatrixOp::Trans, MatrixOp::ConjTrans];

/// Leading dimensions with a little padding so strides are exercised.
fn lds(order: Order, ta: MatrixOp, tb: MatrixOp, m: usize, n: usize, k: usize) -> [usize; 3] {
    let pick = |op: MatrixOp, rows: usize, cols: usize| {
        let [r, c] = if op.is_transposed() { [cols, rows] } else { [rows, cols] };
        match order {
            Order::ColMajor => r + 1,
            Order::RowMajor => c + 1,
        }
    };
    [pick(ta, m, k), pick(tb, k, n), pick(MatrixOp::NoTrans, m, n)]
}

fn buffer<T>(rows: usize, cols: usize, ld: usize, order: Order, f: impl Fn(usize) -> T) -> Vec<T> {
    let outer = match order {
        Order::ColMajor => cols,
        Order::RowMajor => rows,
    };
    (0..outer * ld).map(f).collect()
}

macro_rules! check_against_reference {
    ($name:ident, $float:ty, $entry:path, $gen:expr, $alpha:expr, $beta:expr, $cmp:expr) => {
        #[test]
        fn $name() {
            let (m, n, k) = (7, 6, 9);
            let gen = $gen;
            for order in ORDERS {
                for ta in OPS {
                    for tb in OPS {
                        let [lda, ldb, ldc] = lds(order, ta, tb, m, n, k);
                        let (ar, ac) = if ta.is_transposed() { (k, m) } else { (m, k) };
                        let (br, bc) = if tb.is_transposed() { (n, k) } else { (k, n) };
                        let a: Vec<$float> = buffer(ar, ac, lda, order, |i| gen(i));
                        let b: Vec<$float> = buffer(br, bc, ldb, order, |i| gen(i * 3 + 1));
                        let c: Vec<$float> = buffer(m, n, ldc, order, |i| gen(i + 5));

                        let mut got = c.clone();
                        let mut want = c;
                        let res: Result<()> = unsafe {
                            $entry(
                                order, ta, tb, m as i32, n as i32, k as i32, $alpha,
                                a.as_ptr(), lda as i32, b.as_ptr(), ldb as i32, $beta,
                                got.as_mut_ptr(), ldc as i32,
                            )
                        };
                        res.unwrap();
                        unsafe {
                            gemm_raw(
                                ReferenceContext, order, ta, tb, m as i32, n as i32, k as i32,
                                $alpha, a.as_ptr(), lda as i32, b.as_ptr(), ldb as i32, $beta,
                                want.as_mut_ptr(), ldc as i32,
                            )
                            .unwrap();
                        }

                        for (x, y) in got.iter().zip(&want) {
                            $cmp(*x, *y);
                        }
                    }
                }
            }
        }
    };
}

check_against_reference!(
    single_real,
    f32,
    sgemm,
    |i: usize| ((i * 7) % 11) as f32 * 0.5 - 2.0,
    0.75,
    -1.0,
    |x: f32, y: f32| assert_relative_eq!(x, y, epsilon = 1e-3)
);

check_against_reference!(
    double_real,
    f64,
    dgemm,
    |i: usize| ((i * 5) % 13) as f64 - 6.0,
    2.0,
    0.5,
    |x: f64, y: f64| assert_relative_eq!(x, y, epsilon = 1e-9)
);

check_against_reference!(
    single_complex,
    Complex32,
    cgemm,
    |i: usize| Complex32::new((i % 5) as f32 - 2.0, (i % 3) as f32 * 0.5),
    Complex32::new(1.0, -0.5),
    Complex32::new(0.0, 1.0),
    |x: Complex32, y: Complex32| {
        assert_relative_eq!(x.re, y.re, epsilon = 1e-3);
        assert_relative_eq!(x.im, y.im, epsilon = 1e-3);
    }
);

check_against_reference!(
    double_complex,
    Complex64,
    zgemm,
    |i: usize| Complex64::new((i % 7) as f64 * 0.25, 1.0 - (i % 4) as f64),
    Complex64::new(-1.5, 2.0),
    Complex64::new(0.0, 0.0),
    |x: Complex64, y: Complex64| {
        assert_relative_eq!(x.re, y.re, epsilon = 1e-9);
        assert_relative_eq!(x.im, y.im, epsilon = 1e-9);
    }
);

#[test]
fn leading_dimension_error_names_parameter() {
    let a = [0.0f64; 16];
    let mut c = [0.0f64; 16];
    let err = unsafe {
        dgemm(
            Order::RowMajor,
            MatrixOp::NoTrans,
            MatrixOp::Trans,
            4,
            4,
            3,
            1.0,
            a.as_ptr(),
            3,
            a.as_ptr(),
            2,
            0.0,
            c.as_mut_ptr(),
            4,
        )
    }
    .unwrap_err();
    assert_eq!(err.position(), Some(11));
    assert_eq!(
        err.to_string(),
        "On entry to OCBLAS_DGEMM parameter number 11 (ldb) had an illegal value"
    );
    assert_eq!(c, [0.0; 16]);
}
