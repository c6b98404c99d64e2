use std::fmt;
use std::sync::Arc;

use crate::error::{or_panic, LinalgError, Result};
use crate::ops;
use crate::trace::{BinOp, Event, Id, Kind, Operand, Origin, Side};
use crate::tracker::Tracker;

/// Dense vector of `f64` with a dimension fixed at creation.
///
/// Each instance gets a fresh identity from its [`Tracker`] on construction,
/// including clones, and reports every operator applied to it.
pub struct Vector {
    inner: Vec<f64>,
    id: Id,
    tracker: Arc<Tracker>,
}

impl Vector {
    pub fn new(dimension: usize) -> Self {
        Self::new_in(dimension, &Tracker::global())
    }

    pub fn new_in(dimension: usize, tracker: &Arc<Tracker>) -> Self {
        Self::from_raw(vec![0.0; dimension], tracker)
    }

    pub fn empty() -> Self {
        Self::empty_in(&Tracker::global())
    }

    pub fn empty_in(tracker: &Arc<Tracker>) -> Self {
        Self::with_origin(Vec::new(), tracker, Origin::Default)
    }

    pub fn from_vec(values: Vec<f64>) -> Self {
        Self::from_vec_in(values, &Tracker::global())
    }

    pub fn from_vec_in(values: Vec<f64>, tracker: &Arc<Tracker>) -> Self {
        Self::from_raw(values, tracker)
    }

    pub(crate) fn from_raw(inner: Vec<f64>, tracker: &Arc<Tracker>) -> Self {
        let origin = Origin::Sized(inner.len());
        Self::with_origin(inner, tracker, origin)
    }

    fn with_origin(inner: Vec<f64>, tracker: &Arc<Tracker>, origin: Origin) -> Self {
        let id = tracker.register(Kind::Vector, origin);
        Self { inner, id, tracker: Arc::clone(tracker) }
    }

    /// Vectors created so far in the global tracker.
    pub fn created() -> usize {
        Tracker::global().vectors_created()
    }

    pub fn dimension(&self) -> usize {
        self.inner.len()
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

    pub fn iter(&self) -> std::slice::Iter<'_, f64> {
        self.inner.iter()
    }

    pub(crate) fn operand(&self) -> Operand {
        Operand { kind: Kind::Vector, id: self.id }
    }

    pub fn get(&self, index: usize) -> Result<&f64> {
        let dimension = self.dimension();
        self.inner.get(index).ok_or(LinalgError::IndexOutOfRange { index, dimension })
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut f64> {
        let dimension = self.dimension();
        self.inner.get_mut(index).ok_or(LinalgError::IndexOutOfRange { index, dimension })
    }

    pub fn checked_add(&self, rhs: &Vector) -> Result<Vector> {
        LinalgError::check_dims("add", self.dimension(), rhs.dimension())?;
        self.binary(BinOp::Add, rhs);
        Ok(Self::from_raw(ops::add(&self.inner, &rhs.inner), &self.tracker))
    }

    pub fn checked_sub(&self, rhs: &Vector) -> Result<Vector> {
        LinalgError::check_dims("sub", self.dimension(), rhs.dimension())?;
        self.binary(BinOp::Sub, rhs);
        Ok(Self::from_raw(ops::sub(&self.inner, &rhs.inner), &self.tracker))
    }

    pub fn checked_dot(&self, rhs: &Vector) -> Result<f64> {
        LinalgError::check_dims("dot", self.dimension(), rhs.dimension())?;
        self.binary(BinOp::Dot, rhs);
        Ok(ops::dot(&self.inner, &rhs.inner))
    }

    /// Panics if the dimensions differ; see [`Vector::checked_dot`].
    pub fn dot(&self, rhs: &Vector) -> f64 {
        or_panic(self.checked_dot(rhs))
    }

    pub fn negate(&self) -> Vector {
        self.tracker.emit(Event::Negate(self.operand()));
        Self::from_raw(ops::neg(&self.inner), &self.tracker)
    }

    pub fn scale(&self, k: f64) -> Vector {
        self.scaled(k, Side::Right)
    }

    fn scaled(&self, factor: f64, side: Side) -> Vector {
        self.tracker.emit(Event::Scale { operand: self.operand(), factor, side });
        Self::from_raw(ops::scale(&self.inner, factor), &self.tracker)
    }

    /// Replaces dimension and contents with a copy of `other`'s. The
    /// identity of `self` is kept.
    pub fn assign(&mut self, other: &Vector) {
        self.tracker.emit(Event::Assign { target: self.operand(), source: other.operand() });
        self.inner.clone_from(&other.inner);
    }

    fn binary(&self, op: BinOp, rhs: &Vector) {
        self.tracker.emit(Event::Binary { op, lhs: self.operand(), rhs: rhs.operand() });
    }
}

impl Default for Vector {
    fn default() -> Self {
        Self::empty()
    }
}

impl Clone for Vector {
    fn clone(&self) -> Self {
        Self::with_origin(self.inner.clone(), &self.tracker, Origin::Copy(self.id))
    }

    fn clone_from(&mut self, source: &Self) {
        self.assign(source);
    }
}

impl Drop for Vector {
    fn drop(&mut self) {
        self.tracker.release(self.operand());
    }
}

/// Compares contents only; identities never take part.
impl PartialEq for Vector {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl fmt::Debug for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Vector").field("id", &self.id).field("inner", &self.inner).finish()
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, x) in self.inner.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{x}")?;
        }
        write!(f, "]")
    }
}

impl From<Vec<f64>> for Vector {
    fn from(values: Vec<f64>) -> Self {
        Self::from_vec(values)
    }
}

impl From<&[f64]> for Vector {
    fn from(values: &[f64]) -> Self {
        Self::from_vec(values.to_vec())
    }
}

impl std::ops::Index<usize> for Vector {
    type Output = f64;
    fn index(&self, index: usize) -> &Self::Output {
        or_panic(self.get(index))
    }
}

impl std::ops::IndexMut<usize> for Vector {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        or_panic(self.get_mut(index))
    }
}

impl std::ops::Add<&Vector> for &Vector {
    type Output = Vector;
    fn add(self, rhs: &Vector) -> Self::Output {
        or_panic(self.checked_add(rhs))
    }
}

impl std::ops::Add<Vector> for Vector {
    type Output = Vector;
    fn add(self, rhs: Vector) -> Self::Output {
        &self + &rhs
    }
}

impl std::ops::Sub<&Vector> for &Vector {
    type Output = Vector;
    fn sub(self, rhs: &Vector) -> Self::Output {
        or_panic(self.checked_sub(rhs))
    }
}

impl std::ops::Sub<Vector> for Vector {
    type Output = Vector;
    fn sub(self, rhs: Vector) -> Self::Output {
        &self - &rhs
    }
}

impl std::ops::Neg for &Vector {
    type Output = Vector;
    fn neg(self) -> Self::Output {
        self.negate()
    }
}

impl std::ops::Neg for Vector {
    type Output = Vector;
    fn neg(self) -> Self::Output {
        self.negate()
    }
}

/// Dot product.
impl std::ops::Mul<&Vector> for &Vector {
    type Output = f64;
    fn mul(self, rhs: &Vector) -> Self::Output {
        self.dot(rhs)
    }
}

impl std::ops::Mul<f64> for &Vector {
    type Output = Vector;
    fn mul(self, rhs: f64) -> Self::Output {
        self.scaled(rhs, Side::Right)
    }
}

impl std::ops::Mul<f64> for Vector {
    type Output = Vector;
    fn mul(self, rhs: f64) -> Self::Output {
        self.scaled(rhs, Side::Right)
    }
}

impl std::ops::Mul<&Vector> for f64 {
    type Output = Vector;
    fn mul(self, rhs: &Vector) -> Self::Output {
        rhs.scaled(self, Side::Left)
    }
}

impl std::ops::Mul<Vector> for f64 {
    type Output = Vector;
    fn mul(self, rhs: Vector) -> Self::Output {
        rhs.scaled(self, Side::Left)
    }
}
