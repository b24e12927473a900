use crate::{
    blas::{BLASContext, CpuContext, MatrixOp, Order, Scalar, GEMM},
    error::{Error, Result},
    gemm::gemm_raw,
    layout::{min_ld, required_len},
};

/// A borrowed 2-dimensional matrix, Like `&[T]` is to `Vec<T>`
#[derive(Debug)]
pub struct MatrixView<'a, T> {
    data: &'a [T],
    shape: [usize; 2],
    strides: [usize; 2],
    conj: bool,
}

// manual impls, a derive would require `T: Clone`
impl<T> Clone for MatrixView<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for MatrixView<'_, T> {}

/// A mutably borrowed 2-dimensional matrix, Like `&mut [T]` is to `Vec<T>`
#[derive(Debug)]
pub struct MatrixViewMut<'a, T> {
    data: &'a mut [T],
    shape: [usize; 2],
    strides: [usize; 2],
}

/// An owned column major matrix
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<T> {
    data: Vec<T>,
    shape: [usize; 2],
}

fn checked_strides(len: usize, shape: [usize; 2], order: Order, ld: usize) -> Result<[usize; 2]> {
    let [rows, cols] = shape;
    let min = min_ld(order, MatrixOp::NoTrans, rows, cols);
    if ld < min {
        return Err(Error::DimensionMismatch(format!(
            "leading dimension {ld} is smaller than {min} for a {rows}x{cols} matrix"
        )));
    }

    let required =
        required_len(order, MatrixOp::NoTrans, rows, cols, ld).ok_or(Error::Overflow(ld))?;
    if len < required {
        return Err(Error::BufferTooSmall {
            required,
            actual: len,
        });
    }

    Ok(match order {
        Order::ColMajor => [1, ld],
        Order::RowMajor => [ld, 1],
    })
}

impl<'a, T> MatrixView<'a, T> {
    /// View `data` as a `[rows, cols]` matrix with an explicit leading dimension.
    pub fn with_ld(data: &'a [T], shape: [usize; 2], order: Order, ld: usize) -> Result<Self> {
        let strides = checked_strides(data.len(), shape, order, ld)?;
        Ok(Self {
            data,
            shape,
            strides,
            conj: false,
        })
    }

    /// View `data` as a tightly packed column major matrix
    pub fn col_major(data: &'a [T], shape: [usize; 2]) -> Result<Self> {
        Self::with_ld(data, shape, Order::ColMajor, shape[0].max(1))
    }

    /// View `data` as a tightly packed row major matrix
    pub fn row_major(data: &'a [T], shape: [usize; 2]) -> Result<Self> {
        Self::with_ld(data, shape, Order::RowMajor, shape[1].max(1))
    }

    pub fn shape(&self) -> [usize; 2] {
        self.shape
    }

    /// Transpose the view. No data is moved.
    #[must_use]
    pub fn t(&self) -> Self {
        let [r, c] = self.shape;
        let [sr, sc] = self.strides;
        Self {
            data: self.data,
            shape: [c, r],
            strides: [sc, sr],
            conj: self.conj,
        }
    }

    /// Conjugate transpose of the view. No data is moved.
    #[must_use]
    pub fn h(&self) -> Self {
        let mut t = self.t();
        t.conj = !t.conj;
        t
    }

    /// Multiply two matrices together.
    pub fn dot(&self, rhs: MatrixView<T>) -> Result<Matrix<T>>
    where
        T: GEMM<CpuContext>,
    {
        self.dot_using(rhs, CpuContext)
    }

    /// Multiply two matrices together, using the specified [`BLASContext`]
    pub fn dot_using<C: BLASContext>(&self, rhs: MatrixView<T>, ctx: C) -> Result<Matrix<T>>
    where
        T: GEMM<C>,
    {
        let rows = self.shape[0];
        let cols = rhs.shape[1];
        let mut out = Matrix::zeros([rows, cols])?;
        gemm_ctx(ctx, T::one(), *self, rhs, T::zero(), out.view_mut())?;
        Ok(out)
    }
}

impl<'a, T> MatrixViewMut<'a, T> {
    /// View `data` as a `[rows, cols]` matrix with an explicit leading dimension.
    pub fn with_ld(data: &'a mut [T], shape: [usize; 2], order: Order, ld: usize) -> Result<Self> {
        let strides = checked_strides(data.len(), shape, order, ld)?;
        Ok(Self {
            data,
            shape,
            strides,
        })
    }

    /// View `data` as a tightly packed column major matrix
    pub fn col_major(data: &'a mut [T], shape: [usize; 2]) -> Result<Self> {
        let ld = shape[0].max(1);
        Self::with_ld(data, shape, Order::ColMajor, ld)
    }

    /// View `data` as a tightly packed row major matrix
    pub fn row_major(data: &'a mut [T], shape: [usize; 2]) -> Result<Self> {
        let ld = shape[1].max(1);
        Self::with_ld(data, shape, Order::RowMajor, ld)
    }

    pub fn shape(&self) -> [usize; 2] {
        self.shape
    }
}

fn elements([rows, cols]: [usize; 2]) -> Result<usize> {
    rows.checked_mul(cols)
        .ok_or_else(|| Error::Overflow(rows.max(cols)))
}

impl<T: Scalar> Matrix<T> {
    pub fn zeros(shape: [usize; 2]) -> Result<Self> {
        Ok(Self {
            data: vec![T::zero(); elements(shape)?],
            shape,
        })
    }
}

impl<T> Matrix<T> {
    /// Take ownership of column major `data`.
    pub fn from_shape(shape: [usize; 2], data: Vec<T>) -> Result<Self> {
        if data.len() != elements(shape)? {
            return Err(Error::DimensionMismatch(format!(
                "{} elements cannot form a {}x{} matrix",
                data.len(),
                shape[0],
                shape[1]
            )));
        }
        Ok(Self { data, shape })
    }

    pub fn shape(&self) -> [usize; 2] {
        self.shape
    }

    pub fn view(&self) -> MatrixView<T> {
        MatrixView {
            data: &self.data,
            shape: self.shape,
            strides: [1, self.shape[0].max(1)],
            conj: false,
        }
    }

    pub fn view_mut(&mut self) -> MatrixViewMut<T> {
        MatrixViewMut {
            strides: [1, self.shape[0].max(1)],
            data: &mut self.data,
            shape: self.shape,
        }
    }

    pub fn into_inner(self) -> Vec<T> {
        self.data
    }
}

fn to_int(x: usize) -> Result<i32> {
    i32::try_from(x).map_err(|_| Error::Overflow(x))
}

/// Work out the BLAS flag and leading dimension that describe a view in `order`.
fn lead(
    order: Order,
    shape: [usize; 2],
    strides: [usize; 2],
    conj: bool,
) -> Result<(MatrixOp, usize)> {
    let (inner, outer) = match order {
        Order::ColMajor => (0, 1),
        Order::RowMajor => (1, 0),
    };
    let plain = strides[inner] == 1 || shape[inner] <= 1;
    let transposed = strides[outer] == 1 || shape[outer] <= 1;

    let (op, ld, extent) = match (conj, plain, transposed) {
        (true, _, true) => (MatrixOp::ConjTrans, strides[inner], shape[inner]),
        (true, true, false) => return Err(Error::UnsupportedConjugate),
        (false, true, _) => (MatrixOp::NoTrans, strides[outer], shape[outer]),
        (false, false, true) => (MatrixOp::Trans, strides[inner], shape[inner]),
        (_, false, false) => return Err(Error::NonContiguous(strides)),
    };

    // the leading dimension is never stepped over a single row or column
    let [rows, cols] = shape;
    let ld = if extent <= 1 {
        ld.max(min_ld(order, op, rows, cols))
    } else {
        ld
    };
    Ok((op, ld))
}

/// `C := alpha*A*B + beta*C` on the default CPU backend.
///
/// Transposition and conjugation are taken from the views, see [`MatrixView::t`] and
/// [`MatrixView::h`].
pub fn gemm<F: GEMM<CpuContext>>(
    alpha: F,
    a: MatrixView<F>,
    b: MatrixView<F>,
    beta: F,
    c: MatrixViewMut<F>,
) -> Result<()> {
    gemm_ctx(CpuContext, alpha, a, b, beta, c)
}

/// `C := alpha*A*B + beta*C` using the specified [`BLASContext`]
pub fn gemm_ctx<F: GEMM<C>, C: BLASContext>(
    ctx: C,
    alpha: F,
    a: MatrixView<F>,
    b: MatrixView<F>,
    beta: F,
    mut c: MatrixViewMut<F>,
) -> Result<()> {
    let [rowsa, colsa] = a.shape;
    let [rowsb, colsb] = b.shape;
    let [rowsc, colsc] = c.shape;
    if rowsa != rowsc || colsb != colsc || colsa != rowsb {
        return Err(Error::DimensionMismatch(format!(
            "cannot multiply {rowsa}x{colsa} by {rowsb}x{colsb} into {rowsc}x{colsc}"
        )));
    }

    // the order is whichever way C is laid out, C itself is never transposed
    let order = if c.strides[0] == 1 {
        Order::ColMajor
    } else if c.strides[1] == 1 {
        Order::RowMajor
    } else {
        return Err(Error::NonContiguous(c.strides));
    };
    let (_, ldc) = lead(order, c.shape, c.strides, false)?;
    let (transa, lda) = lead(order, a.shape, a.strides, a.conj)?;
    let (transb, ldb) = lead(order, b.shape, b.strides, b.conj)?;

    // Safety:
    // every view was checked against its buffer on construction, and the borrow
    // checker keeps `c` apart from `a` and `b`
    unsafe {
        gemm_raw(
            ctx,
            order,
            transa,
            transb,
            to_int(rowsa)?,
            to_int(colsb)?,
            to_int(colsa)?,
            alpha,
            a.data.as_ptr(),
            to_int(lda)?,
            b.data.as_ptr(),
            to_int(ldb)?,
            beta,
            c.data.as_mut_ptr(),
            to_int(ldc)?,
        )
    }
}
