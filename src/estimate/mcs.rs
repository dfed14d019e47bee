use super::EstimateError;
use crate::traits::FloatScalar;

/// Histogram layout check shared by the Monte Carlo routines.
fn check_histogram<T>(p: &[T], column_p: usize, row_x: usize) -> Result<(), EstimateError> {
    if column_p == 0 || row_x == 0 || p.len() < 2 * row_x * column_p {
        return Err(EstimateError::InvalidDimensions);
    }
    Ok(())
}

/// Bin one sample vector into the Monte Carlo histogram `p`.
///
/// `p` is `2·row_x × column_p`. Component `x[i]` lands in row `i` when it is
/// non-negative and in row `row_x + i` otherwise, at column
/// `round(|x[i]| · index_factor)`. Samples whose column falls outside the
/// histogram, and NaNs, are dropped.
///
/// # Errors
///
/// [`EstimateError::InvalidDimensions`] on a zero dimension, a short buffer
/// or a non-positive `index_factor`.
pub fn mcs_collect<T: FloatScalar>(
    p: &mut [T],
    column_p: usize,
    x: &[T],
    row_x: usize,
    index_factor: T,
) -> Result<(), EstimateError> {
    check_histogram(p, column_p, row_x)?;
    if x.len() < row_x || index_factor.is_nan() || index_factor <= T::zero() {
        return Err(EstimateError::InvalidDimensions);
    }

    for (i, &xi) in x[..row_x].iter().enumerate() {
        let row = if xi < T::zero() { row_x + i } else { i };
        let Some(col) = (xi.abs() * index_factor).round().to_usize() else {
            continue;
        };
        if col < column_p {
            let cell = &mut p[row * column_p + col];
            *cell = *cell + T::one();
        }
    }
    Ok(())
}

/// Most frequent value of every component seen by [`mcs_collect`].
///
/// For each `i` the fullest bin across the non-negative row and the
/// negative row wins; ties go to the non-negative side and then to the
/// smaller magnitude. `x[i]` receives the bin centre `±column / index_factor`,
/// or zero when nothing was collected for that component.
///
/// # Errors
///
/// As [`mcs_collect`].
///
/// ```
/// use ctrlkit::estimate::{mcs_collect, mcs_estimate};
///
/// let mut p = [0.0_f64; 2 * 2 * 40];
/// for x in [[1.0, -2.0], [1.1, -2.0], [1.0, -1.9]] {
///     mcs_collect(&mut p, 40, &x, 2, 10.0).unwrap();
/// }
/// let mut x = [0.0; 2];
/// mcs_estimate(&p, 40, &mut x, 2, 10.0).unwrap();
/// assert_eq!(x, [1.0, -2.0]);
/// ```
pub fn mcs_estimate<T: FloatScalar>(
    p: &[T],
    column_p: usize,
    x: &mut [T],
    row_x: usize,
    index_factor: T,
) -> Result<(), EstimateError> {
    check_histogram(p, column_p, row_x)?;
    if x.len() < row_x || index_factor.is_nan() || index_factor <= T::zero() {
        return Err(EstimateError::InvalidDimensions);
    }

    for i in 0..row_x {
        let positive = &p[i * column_p..(i + 1) * column_p];
        let negative = &p[(row_x + i) * column_p..(row_x + i + 1) * column_p];

        let mut best = T::zero();
        let mut value = T::zero();
        for (sign, row) in [(T::one(), positive), (-T::one(), negative)] {
            for (col, &count) in row.iter().enumerate() {
                if count > best {
                    best = count;
                    value = sign * T::from_count(col) / index_factor;
                }
            }
        }
        x[i] = value;
    }
    Ok(())
}

/// Empty the histogram before a new collection run.
///
/// # Errors
///
/// [`EstimateError::InvalidDimensions`] on a zero dimension or short buffer.
pub fn mcs_clean<T: FloatScalar>(
    p: &mut [T],
    column_p: usize,
    row_x: usize,
) -> Result<(), EstimateError> {
    check_histogram(p, column_p, row_x)?;
    p[..2 * row_x * column_p].fill(T::zero());
    Ok(())
}
