use crate::linalg::LinalgError;
use crate::matrix::check_len;
use crate::traits::FloatScalar;

/// Build a block Hankel matrix from the rows of `V`.
///
/// `V` is `row_v × col_v`, `H` is `row_h × col_h` with `row_h` a multiple
/// of `row_v`. Block `i`, row `j` of `H` holds `V[j, i + shift ..]`,
/// truncated at the end of `V` and zero-padded to `col_h` columns.
///
/// # Errors
///
/// [`LinalgError::InvalidDimensions`] if `row_v == 0` or `row_h` is not a
/// multiple of `row_v`.
///
/// ```
/// use ctrlkit::linalg::hankel;
///
/// let v = [1.0_f32, 2.0, 3.0, 4.0];
/// let mut h = [0.0_f32; 6];
/// hankel(&v, &mut h, 1, 4, 3, 2, 1).unwrap();
/// assert_eq!(h, [2.0, 3.0, 3.0, 4.0, 4.0, 0.0]);
/// ```
pub fn hankel<T: FloatScalar>(
    v: &[T],
    h: &mut [T],
    row_v: usize,
    col_v: usize,
    row_h: usize,
    col_h: usize,
    shift: usize,
) -> Result<(), LinalgError> {
    if row_v == 0 || row_h % row_v != 0 {
        return Err(LinalgError::InvalidDimensions);
    }
    check_len(v, row_v, col_v)?;
    check_len(h, row_h, col_h)?;

    h[..row_h * col_h].fill(T::zero());
    for i in 0..row_h / row_v {
        for j in 0..row_v {
            let dst = (i * row_v + j) * col_h;
            for c in 0..col_h {
                let src = i + shift + c;
                if src >= col_v {
                    break;
                }
                h[dst + c] = v[j * col_v + src];
            }
        }
    }
    Ok(())
}

/// Solve the lower-triangular Toeplitz system for Markov parameters.
///
/// Each of the `rows` channels is an independent input/output record of
/// length `cols`; `g` receives the impulse response that maps `u` to `y`:
/// `g[i] = (y[i] - Σ_{j<i} u[i-j] g[j]) / u[0]`.
///
/// # Errors
///
/// [`LinalgError::Singular`] if a channel's first input sample is zero.
pub fn linsolve_markov<T: FloatScalar>(
    g: &mut [T],
    y: &[T],
    u: &[T],
    rows: usize,
    cols: usize,
) -> Result<(), LinalgError> {
    check_len(g, rows, cols)?;
    check_len(y, rows, cols)?;
    check_len(u, rows, cols)?;

    g[..rows * cols].fill(T::zero());
    for k in 0..rows {
        let base = k * cols;
        let u0 = u[base];
        if u0 == T::zero() {
            return Err(LinalgError::Singular);
        }
        for i in 0..cols {
            let mut sum = T::zero();
            for j in 0..i {
                sum = sum + u[base + i - j] * g[base + j];
            }
            g[base + i] = (y[base + i] - sum) / u0;
        }
    }
    Ok(())
}
