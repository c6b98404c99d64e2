use std::fmt;
use std::sync::Arc;

use crate::error::{or_panic, LinalgError, Result};
use crate::ops;
use crate::trace::{BinOp, Event, Id, Kind, Operand, Origin, Side};
use crate::tracker::Tracker;
use crate::Vector;

/// Square `dimension x dimension` matrix stored row-major.
pub struct Matrix {
    inner: Vec<f64>,
    dim: usize,
    id: Id,
    tracker: Arc<Tracker>,
}

impl Matrix {
    /// Panics if the dimension cannot be allocated; see [`Matrix::try_new_in`].
    pub fn new(dimension: usize) -> Self {
        Self::new_in(dimension, &Tracker::global())
    }

    pub fn new_in(dimension: usize, tracker: &Arc<Tracker>) -> Self {
        or_panic(Self::try_new_in(dimension, tracker))
    }

    pub fn try_new_in(dimension: usize, tracker: &Arc<Tracker>) -> Result<Self> {
        Ok(Self::from_raw(zeroed(dimension)?, dimension, tracker))
    }

    pub fn empty() -> Self {
        Self::empty_in(&Tracker::global())
    }

    pub fn empty_in(tracker: &Arc<Tracker>) -> Self {
        Self::with_origin(Vec::new(), 0, tracker, Origin::Default)
    }

    pub fn identity(dimension: usize) -> Self {
        Self::identity_in(dimension, &Tracker::global())
    }

    /// Panics if the dimension cannot be allocated; see [`Matrix::try_identity_in`].
    pub fn identity_in(dimension: usize, tracker: &Arc<Tracker>) -> Self {
        or_panic(Self::try_identity_in(dimension, tracker))
    }

    pub fn try_identity_in(dimension: usize, tracker: &Arc<Tracker>) -> Result<Self> {
        let mut inner = zeroed(dimension)?;
        for i in 0..dimension {
            inner[i * dimension + i] = 1.0;
        }

        Ok(Self::from_raw(inner, dimension, tracker))
    }

    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self> {
        Self::from_rows_in(rows, &Tracker::global())
    }

    /// Builds a matrix from literal rows, which must form a square grid.
    pub fn from_rows_in<R: AsRef<[f64]>>(rows: &[R], tracker: &Arc<Tracker>) -> Result<Self> {
        let dimension = rows.len();

        for (row, values) in rows.iter().enumerate() {
            let len = values.as_ref().len();
            if len != dimension {
                return Err(LinalgError::RaggedRow { row, len, dimension });
            }
        }

        let inner = rows.iter().flat_map(|r| r.as_ref().iter().copied()).collect();
        Ok(Self::from_raw(inner, dimension, tracker))
    }

    fn from_raw(inner: Vec<f64>, dim: usize, tracker: &Arc<Tracker>) -> Self {
        Self::with_origin(inner, dim, tracker, Origin::Sized(dim))
    }

    fn with_origin(inner: Vec<f64>, dim: usize, tracker: &Arc<Tracker>, origin: Origin) -> Self {
        let id = tracker.register(Kind::Matrix, origin);
        Self { inner, dim, id, tracker: Arc::clone(tracker) }
    }

    /// Matrices created so far in the global tracker.
    pub fn created() -> usize {
        Tracker::global().matrices_created()
    }

    pub fn dimension(&self) -> usize {
        self.dim
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn tracker(&self) -> &Arc<Tracker> {
        &self.tracker
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.inner
    }

    pub fn row(&self, row: usize) -> Result<&[f64]> {
        if row >= self.dim {
            return Err(LinalgError::IndexOutOfRange { index: row, dimension: self.dim });
        }

        Ok(&self.inner[row * self.dim..(row + 1) * self.dim])
    }

    pub fn rows(&self) -> std::slice::Chunks<'_, f64> {
        self.inner.chunks(self.dim.max(1))
    }

    fn operand(&self) -> Operand {
        Operand { kind: Kind::Matrix, id: self.id }
    }

    fn offset(&self, row: usize, col: usize) -> Result<usize> {
        if row >= self.dim || col >= self.dim {
            return Err(LinalgError::CellOutOfRange { row, col, dimension: self.dim });
        }

        Ok(row * self.dim + col)
    }

    pub fn get(&self, row: usize, col: usize) -> Result<&f64> {
        let offset = self.offset(row, col)?;
        Ok(&self.inner[offset])
    }

    pub fn get_mut(&mut self, row: usize, col: usize) -> Result<&mut f64> {
        let offset = self.offset(row, col)?;
        Ok(&mut self.inner[offset])
    }

    pub fn checked_add(&self, rhs: &Matrix) -> Result<Matrix> {
        LinalgError::check_dims("add", self.dim, rhs.dim)?;
        self.binary(BinOp::Add, rhs.operand());
        Ok(Self::from_raw(ops::add(&self.inner, &rhs.inner), self.dim, &self.tracker))
    }

    pub fn checked_sub(&self, rhs: &Matrix) -> Result<Matrix> {
        LinalgError::check_dims("sub", self.dim, rhs.dim)?;
        self.binary(BinOp::Sub, rhs.operand());
        Ok(Self::from_raw(ops::sub(&self.inner, &rhs.inner), self.dim, &self.tracker))
    }

    pub fn checked_mul(&self, rhs: &Matrix) -> Result<Matrix> {
        LinalgError::check_dims("mul", self.dim, rhs.dim)?;
        self.binary(BinOp::Mul, rhs.operand());
        Ok(Self::from_raw(ops::matmul(&self.inner, &rhs.inner, self.dim), self.dim, &self.tracker))
    }

    /// The result is a vector registered in this matrix's tracker.
    pub fn checked_mul_vector(&self, rhs: &Vector) -> Result<Vector> {
        LinalgError::check_dims("mul", self.dim, rhs.dimension())?;
        self.binary(BinOp::Mul, rhs.operand());
        Ok(Vector::from_raw(ops::matvec(&self.inner, rhs.as_slice(), self.dim), &self.tracker))
    }

    pub fn negate(&self) -> Matrix {
        self.tracker.emit(Event::Negate(self.operand()));
        Self::from_raw(ops::neg(&self.inner), self.dim, &self.tracker)
    }

    pub fn scale(&self, k: f64) -> Matrix {
        self.scaled(k, Side::Right)
    }

    fn scaled(&self, factor: f64, side: Side) -> Matrix {
        self.tracker.emit(Event::Scale { operand: self.operand(), factor, side });
        Self::from_raw(ops::scale(&self.inner, factor), self.dim, &self.tracker)
    }

    pub fn assign(&mut self, other: &Matrix) {
        self.tracker.emit(Event::Assign { target: self.operand(), source: other.operand() });
        self.dim = other.dim;
        self.inner.clone_from(&other.inner);
    }

    fn binary(&self, op: BinOp, rhs: Operand) {
        self.tracker.emit(Event::Binary { op, lhs: self.operand(), rhs });
    }
}

/// Zero-filled `dimension x dimension` buffer, or `InvalidDimension` when
/// the element count or its byte size cannot be allocated.
fn zeroed(dimension: usize) -> Result<Vec<f64>> {
    let invalid = || LinalgError::InvalidDimension { dimension };
    let len = dimension.checked_mul(dimension).ok_or_else(invalid)?;

    let mut inner = Vec::new();
    inner.try_reserve_exact(len).map_err(|_| invalid())?;
    inner.resize(len, 0.0);

    Ok(inner)
}

impl Default for Matrix {
    fn default() -> Self {
        Self::empty()
    }
}

impl Clone for Matrix {
    fn clone(&self) -> Self {
        Self::with_origin(self.inner.clone(), self.dim, &self.tracker, Origin::Copy(self.id))
    }

    fn clone_from(&mut self, source: &Self) {
        self.assign(source);
    }
}

impl Drop for Matrix {
    fn drop(&mut self) {
        self.tracker.release(self.operand());
    }
}

impl PartialEq for Matrix {
    fn eq(&self, other: &Self) -> bool {
        self.dim == other.dim && self.inner == other.inner
    }
}

impl fmt::Debug for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Matrix")
            .field("id", &self.id)
            .field("dim", &self.dim)
            .field("inner", &self.inner)
            .finish()
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for (j, x) in row.iter().enumerate() {
                if j > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{x}")?;
            }
        }

        Ok(())
    }
}

impl std::ops::Index<(usize, usize)> for Matrix {
    type Output = f64;
    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        or_panic(self.get(row, col))
    }
}

impl std::ops::IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut Self::Output {
        or_panic(self.get_mut(row, col))
    }
}

impl std::ops::Add<&Matrix> for &Matrix {
    type Output = Matrix;
    fn add(self, rhs: &Matrix) -> Self::Output {
        or_panic(self.checked_add(rhs))
    }
}

impl std::ops::Add<Matrix> for Matrix {
    type Output = Matrix;
    fn add(self, rhs: Matrix) -> Self::Output {
        &self + &rhs
    }
}

impl std::ops::Sub<&Matrix> for &Matrix {
    type Output = Matrix;
    fn sub(self, rhs: &Matrix) -> Self::Output {
        or_panic(self.checked_sub(rhs))
    }
}

impl std::ops::Sub<Matrix> for Matrix {
    type Output = Matrix;
    fn sub(self, rhs: Matrix) -> Self::Output {
        &self - &rhs
    }
}

impl std::ops::Neg for &Matrix {
    type Output = Matrix;
    fn neg(self) -> Self::Output {
        self.negate()
    }
}

impl std::ops::Neg for Matrix {
    type Output = Matrix;
    fn neg(self) -> Self::Output {
        self.negate()
    }
}

impl std::ops::Mul<&Matrix> for &Matrix {
    type Output = Matrix;
    fn mul(self, rhs: &Matrix) -> Self::Output {
        or_panic(self.checked_mul(rhs))
    }
}

impl std::ops::Mul<Matrix> for Matrix {
    type Output = Matrix;
    fn mul(self, rhs: Matrix) -> Self::Output {
        &self * &rhs
    }
}

impl std::ops::Mul<&Vector> for &Matrix {
    type Output = Vector;
    fn mul(self, rhs: &Vector) -> Self::Output {
        or_panic(self.checked_mul_vector(rhs))
    }
}

impl std::ops::Mul<Vector> for Matrix {
    type Output = Vector;
    fn mul(self, rhs: Vector) -> Self::Output {
        &self * &rhs
    }
}

impl std::ops::Mul<f64> for &Matrix {
    type Output = Matrix;
    fn mul(self, rhs: f64) -> Self::Output {
        self.scaled(rhs, Side::Right)
    }
}

impl std::ops::Mul<f64> for Matrix {
    type Output = Matrix;
    fn mul(self, rhs: f64) -> Self::Output {
        self.scaled(rhs, Side::Right)
    }
}

impl std::ops::Mul<&Matrix> for f64 {
    type Output = Matrix;
    fn mul(self, rhs: &Matrix) -> Self::Output {
        rhs.scaled(self, Side::Left)
    }
}

impl std::ops::Mul<Matrix> for f64 {
    type Output = Matrix;
    fn mul(self, rhs: Matrix) -> Self::Output {
        rhs.scaled(self, Side::Left)
    }
}
