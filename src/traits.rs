use core::fmt::Debug;
use num_traits::{Float, Num, NumCast, One, Zero};

/// Trait for types that can be stored in a matrix buffer.
///
/// Blanket-implemented for all types satisfying the bounds.
/// Covers `f32`, `f64`, and all integer types.
pub trait Scalar: Copy + PartialEq + Debug + Zero + One + Num {}

impl<T: Copy + PartialEq + Debug + Zero + One + Num> Scalar for T {}

/// Trait for floating-point matrix elements.
///
/// Required by everything that needs `sqrt`, `abs` or an epsilon
/// (decompositions, solvers, norms, estimators). Implemented for `f32`
/// and `f64`; `f32` is the reference precision of the crate.
pub trait FloatScalar: Scalar + Float {
    /// Convert a numeric literal into `Self`.
    ///
    /// Lossless or correctly rounded for `f32` and `f64`; any other type
    /// that cannot represent `v` yields NaN rather than panicking.
    #[inline]
    fn lit(v: f64) -> Self {
        <Self as NumCast>::from(v).unwrap_or_else(Self::nan)
    }

    /// Convert a dimension or iteration count into `Self`.
    #[inline]
    fn from_count(n: usize) -> Self {
        <Self as NumCast>::from(n).unwrap_or_else(Self::nan)
    }
}

impl<T: Scalar + Float> FloatScalar for T {}
