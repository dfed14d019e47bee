use alloc::vec;
use alloc::vec::Vec;

use super::SysidError;
use crate::linalg::{hankel, linsolve_markov, svd_golub_reinsch, LinalgError};
use crate::matrix::check_len;
use crate::traits::FloatScalar;

/// Observer/Kalman identification of Markov parameters.
///
/// Each of the `rows` channels of `y` and `u` is an independent record of
/// `cols` samples; `g` receives the impulse response that maps `u` to `y`
/// channel by channel.
///
/// # Errors
///
/// [`SysidError::Linalg`] with [`LinalgError::Singular`] if a channel's
/// first input sample is zero.
///
/// ```
/// use ctrlkit::sysid::okid;
///
/// // Step response of y[k] = 0.5 y[k-1] + u[k-1]
/// let u = [1.0_f64; 4];
/// let y = [0.0, 1.0, 1.5, 1.75];
/// let mut g = [0.0; 4];
/// okid(&mut g, &y, &u, 1, 4).unwrap();
/// assert_eq!(g, [0.0, 1.0, 0.5, 0.25]);
/// ```
pub fn okid<T: FloatScalar>(
    g: &mut [T],
    y: &[T],
    u: &[T],
    rows: usize,
    cols: usize,
) -> Result<(), SysidError> {
    linsolve_markov(g, y, u, rows, cols)?;
    Ok(())
}

/// Eigensystem realization of a discrete model from input/output records.
///
/// Markov parameters from [`okid`] fill two block Hankel matrices `H₀`
/// (shift 1) and `H₁` (shift 2) of `io_rows · io_cols/2` rows and
/// `io_cols/2` columns. With the Golub-Reinsch SVD `H₀ = U S Vᵀ` truncated
/// to the leading `row_a` singular values:
///
/// ```text
/// A = S^-½ Uᵀ H₁ V S^-½      (row_a × row_a)
/// B = S^½ Vᵀ                 (row_a × io_rows, leading columns)
/// C = U S^½                  (io_rows × row_a, leading rows)
/// ```
///
/// # Errors
///
/// - [`SysidError::InvalidDimensions`] if any dimension is zero, `row_a`
///   or `io_rows` exceeds `io_cols / 2`, or a buffer is short.
/// - [`SysidError::Linalg`] with [`LinalgError::Singular`] if a retained
///   singular value is below `T::epsilon()`, or any error from the Markov
///   solve or the SVD.
#[allow(clippy::too_many_arguments)]
pub fn okid_era<T: FloatScalar>(
    a: &mut [T],
    b: &mut [T],
    c: &mut [T],
    row_a: usize,
    y: &[T],
    u: &[T],
    io_rows: usize,
    io_cols: usize,
) -> Result<(), SysidError> {
    let col_h = io_cols / 2;
    let row_h = io_rows * col_h;
    if row_a == 0 || io_rows == 0 || col_h == 0 || row_a > col_h || io_rows > col_h {
        return Err(SysidError::InvalidDimensions);
    }
    if check_len(a, row_a, row_a).is_err()
        || check_len(b, row_a, io_rows).is_err()
        || check_len(c, io_rows, row_a).is_err()
        || check_len(y, io_rows, io_cols).is_err()
        || check_len(u, io_rows, io_cols).is_err()
    {
        return Err(SysidError::InvalidDimensions);
    }

    let mut g = vec![T::zero(); io_rows * io_cols];
    okid(&mut g, y, u, io_rows, io_cols)?;

    let mut h0 = vec![T::zero(); row_h * col_h];
    hankel(&g, &mut h0, io_rows, io_cols, row_h, col_h, 1)?;

    let mut uu = vec![T::zero(); row_h * col_h];
    let mut s = vec![T::zero(); col_h];
    let mut v = vec![T::zero(); col_h * col_h];
    svd_golub_reinsch(&h0, row_h, col_h, &mut uu, &mut s, &mut v)?;

    if s[..row_a].iter().any(|&si| si < T::epsilon()) {
        log::warn!("okid_era: zero singular value within order {}", row_a);
        return Err(LinalgError::Singular.into());
    }
    let root: Vec<T> = s[..row_a].iter().map(|&si| si.sqrt()).collect();

    for j in 0..io_rows {
        for i in 0..row_a {
            c[j * row_a + i] = uu[j * col_h + i] * root[i];
        }
    }
    for i in 0..row_a {
        for j in 0..io_rows {
            b[i * io_rows + j] = root[i] * v[j * col_h + i];
        }
    }

    let mut h1 = vec![T::zero(); row_h * col_h];
    hankel(&g, &mut h1, io_rows, io_cols, row_h, col_h, 2)?;

    // H₁ V over the retained columns
    let mut h1v = vec![T::zero(); row_h * row_a];
    for p in 0..row_h {
        for k in 0..row_a {
            let mut acc = T::zero();
            for q in 0..col_h {
                acc = acc + h1[p * col_h + q] * v[q * col_h + k];
            }
            h1v[p * row_a + k] = acc;
        }
    }
    for i in 0..row_a {
        for k in 0..row_a {
            let mut acc = T::zero();
            for p in 0..row_h {
                acc = acc + uu[p * col_h + i] * h1v[p * row_a + k];
            }
            a[i * row_a + k] = acc / (root[i] * root[k]);
        }
    }
    Ok(())
}
