use alloc::vec;

use crate::linalg::LinalgError;
use crate::matrix::{check_len, identity, mul, norm, NormKind};
use crate::traits::FloatScalar;

/// Hard cap on the number of series terms in [`expm`].
pub const MAX_EXPM_TERMS: usize = 200;

/// Matrix exponential `e^A` of an `n × n` matrix by its Taylor series.
///
/// Terms `F_k = A F_{k-1} / k` are summed until adding the next one no
/// longer changes the sum in floating point, i.e. `‖(E + F) - E‖₁ == 0`.
/// No scaling and squaring is done, so large `‖A‖` costs more terms and
/// loses accuracy.
///
/// # Errors
///
/// [`LinalgError::ConvergenceFailure`] if the increment is still nonzero
/// after [`MAX_EXPM_TERMS`] terms.
///
/// ```
/// use ctrlkit::linalg::expm;
///
/// let a = [0.0_f64, 0.0, 0.0, 0.0];
/// let mut e = [0.0; 4];
/// expm(&mut e, &a, 2).unwrap();
/// assert_eq!(e, [1.0, 0.0, 0.0, 1.0]);
/// ```
pub fn expm<T: FloatScalar>(e: &mut [T], a: &[T], n: usize) -> Result<(), LinalgError> {
    check_len(a, n, n)?;
    check_len(e, n, n)?;

    let nn = n * n;
    let mut sum = vec![T::zero(); nn];
    let mut term = identity::<T>(n);
    let mut scratch = vec![T::zero(); nn];

    for k in 1..=MAX_EXPM_TERMS {
        for (s, &f) in sum.iter_mut().zip(term.iter()) {
            *s = *s + f;
        }

        mul(&mut scratch, a, &term, n, n, n, n)?;
        let kf = T::from_count(k);
        for (f, &t) in term.iter_mut().zip(scratch.iter()) {
            *f = t / kf;
        }

        // Increment as seen by the running sum
        for ((d, &s), &f) in scratch.iter_mut().zip(sum.iter()).zip(term.iter()) {
            *d = (s + f) - s;
        }
        if norm(&scratch, n, n, NormKind::L1)? == T::zero() {
            e[..nn].copy_from_slice(&sum);
            return Ok(());
        }
    }

    log::warn!("expm: series still changing after {} terms", MAX_EXPM_TERMS);
    Err(LinalgError::ConvergenceFailure)
}

/// [`expm`] writing the result back into `a`.
pub fn expm_in_place<T: FloatScalar>(a: &mut [T], n: usize) -> Result<(), LinalgError> {
    check_len(a, n, n)?;
    let src = a[..n * n].to_vec();
    expm(a, &src, n)
}
