use crate::blas::{MatrixOp, Order};

/// Row and column strides of `op(X)` inside a buffer stored in `order` with leading dimension `ld`.
pub fn strides(order: Order, trans: MatrixOp, ld: usize) -> [isize; 2] {
    let mut s = match order {
        Order::ColMajor => [1, ld as isize],
        Order::RowMajor => [ld as isize, 1],
    };
    if trans.is_transposed() {
        s.rotate_left(1);
    }
    s
}

/// Shape of the stored matrix that backs a `rows x cols` `op(X)`.
pub fn stored_shape(trans: MatrixOp, rows: usize, cols: usize) -> [usize; 2] {
    if trans.is_transposed() {
        [cols, rows]
    } else {
        [rows, cols]
    }
}

/// Smallest legal leading dimension for the matrix backing a `rows x cols` `op(X)`.
pub fn min_ld(order: Order, trans: MatrixOp, rows: usize, cols: usize) -> usize {
    let [r, c] = stored_shape(trans, rows, cols);
    let inner = match order {
        Order::ColMajor => r,
        Order::RowMajor => c,
    };
    inner.max(1)
}

/// Number of elements, from the base pointer, that a `rows x cols` `op(X)` can touch.
///
/// `None` when that count does not fit in a `usize`.
pub fn required_len(
    order: Order,
    trans: MatrixOp,
    rows: usize,
    cols: usize,
    ld: usize,
) -> Option<usize> {
    let [r, c] = stored_shape(trans, rows, cols);
    if r == 0 || c == 0 {
        return Some(0);
    }
    let (inner, outer) = match order {
        Order::ColMajor => (r, c),
        Order::RowMajor => (c, r),
    };
    (outer - 1).checked_mul(ld)?.checked_add(inner)
}

#[inline(always)]
pub(crate) fn offset(s: [isize; 2], i: usize, j: usize) -> isize {
    i as isize * s[0] + j as isize * s[1]
}
