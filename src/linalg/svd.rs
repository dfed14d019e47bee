//! Singular value decompositions.
//!
//! Two variants are provided:
//!
//! - [`svd_jacobi_one_sided`]: square matrices, a fixed number of one-sided
//!   Jacobi sweeps. Cheap and predictable on small systems.
//! - [`svd_golub_reinsch`]: tall or square matrices, Householder
//!   bidiagonalization followed by implicit-shift Givens QR.
//!
//! Both return `A = U diag(S) Vᵀ` with `S` sorted in decreasing order.

use alloc::vec;

use crate::linalg::LinalgError;
use crate::matrix::{check_len, identity, tran};
use crate::traits::FloatScalar;

/// Iteration cap per singular value in [`svd_golub_reinsch`], and the sweep
/// count [`pinv`] and the matrix 2-norm use for the Jacobi variant.
pub const MAX_ITERATION_COUNT_SVD: usize = 30;

// ── One-sided Jacobi ────────────────────────────────────────────────

/// One-sided Jacobi SVD of a square `n × n` matrix.
///
/// Runs exactly `max_iter` sweeps over every column pair `i < j`; there is
/// no convergence test. `u`, `s` and `v` receive `n × n`, `n` and `n × n`
/// values. A column whose singular value is zero is left zero in `U`.
///
/// ```
/// use ctrlkit::linalg::{svd_jacobi_one_sided, MAX_ITERATION_COUNT_SVD};
///
/// let a = [2.0_f32, 0.0, 0.0, 3.0];
/// let (mut u, mut s, mut v) = ([0.0_f32; 4], [0.0_f32; 2], [0.0_f32; 4]);
/// svd_jacobi_one_sided(&a, 2, MAX_ITERATION_COUNT_SVD, &mut u, &mut s, &mut v).unwrap();
/// assert_eq!(s, [3.0, 2.0]);
/// ```
pub fn svd_jacobi_one_sided<T: FloatScalar>(
    a: &[T],
    n: usize,
    max_iter: usize,
    u: &mut [T],
    s: &mut [T],
    v: &mut [T],
) -> Result<(), LinalgError> {
    check_len(a, n, n)?;
    check_len(u, n, n)?;
    check_len(v, n, n)?;
    if s.len() < n {
        return Err(LinalgError::DimensionMismatch);
    }

    let mut w = a[..n * n].to_vec();
    v[..n * n].copy_from_slice(&identity::<T>(n));

    for _ in 0..max_iter {
        for i in 0..n {
            for j in (i + 1)..n {
                let mut alpha = T::zero();
                let mut beta = T::zero();
                let mut gamma = T::zero();
                for k in 0..n {
                    let wi = w[k * n + i];
                    let wj = w[k * n + j];
                    alpha = alpha + wi * wi;
                    beta = beta + wj * wj;
                    gamma = gamma + wi * wj;
                }
                // Already orthogonal
                if gamma == T::zero() {
                    continue;
                }

                let zeta = (beta - alpha) / (T::lit(2.0) * gamma);
                let sign = if zeta < T::zero() { -T::one() } else { T::one() };
                let t = sign / (sign * zeta + (T::one() + zeta * zeta).sqrt());
                let cs = T::one() / (T::one() + t * t).sqrt();
                let sn = cs * t;

                for k in 0..n {
                    let tmp = w[k * n + i];
                    w[k * n + i] = cs * tmp - sn * w[k * n + j];
                    w[k * n + j] = sn * tmp + cs * w[k * n + j];
                }
                for k in 0..n {
                    let tmp = v[k * n + i];
                    v[k * n + i] = cs * tmp - sn * v[k * n + j];
                    v[k * n + j] = sn * tmp + cs * v[k * n + j];
                }
            }
        }
    }

    // Column norms through hypot so large entries do not overflow
    for j in 0..n {
        let mut acc = T::zero();
        for i in 0..n {
            acc = acc.hypot(w[i * n + j]);
        }
        s[j] = acc;
    }

    // Bubble sort, descending, carrying columns of W and V
    for p in 0..n.saturating_sub(1) {
        for j in 0..(n - p - 1) {
            if s[j] < s[j + 1] {
                s.swap(j, j + 1);
                for i in 0..n {
                    v.swap(i * n + j, i * n + j + 1);
                    w.swap(i * n + j, i * n + j + 1);
                }
            }
        }
    }

    for i in 0..n {
        for j in 0..n {
            u[i * n + j] = if s[j] == T::zero() {
                T::zero()
            } else {
                w[i * n + j] / s[j]
            };
        }
    }
    Ok(())
}

// ── Golub-Reinsch ───────────────────────────────────────────────────

/// Golub-Reinsch SVD of a `rows × cols` matrix with `rows ≥ cols`.
///
/// `u` is `rows × cols` (thin), `s` has `cols` entries and `v` is
/// `cols × cols`.
///
/// # Errors
///
/// - [`LinalgError::InvalidDimensions`] if `rows < cols` or `cols == 0`.
/// - [`LinalgError::ConvergenceFailure`] if a singular value needs more
///   than [`MAX_ITERATION_COUNT_SVD`] QR sweeps.
pub fn svd_golub_reinsch<T: FloatScalar>(
    a: &[T],
    rows: usize,
    cols: usize,
    u: &mut [T],
    s: &mut [T],
    v: &mut [T],
) -> Result<(), LinalgError> {
    if rows < cols || cols == 0 {
        return Err(LinalgError::InvalidDimensions);
    }
    check_len(a, rows, cols)?;
    check_len(u, rows, cols)?;
    check_len(v, cols, cols)?;
    if s.len() < cols {
        return Err(LinalgError::DimensionMismatch);
    }

    let mut superdiag = vec![T::zero(); cols];
    bidiagonalize(a, rows, cols, u, v, s, &mut superdiag);
    givens_diagonalize(rows, cols, u, v, s, &mut superdiag)?;
    sort_decreasing(rows, cols, s, u, v);
    Ok(())
}

/// Householder reduction `A = U B Vᵀ` with `B` upper bidiagonal.
///
/// On return `u` and `v` hold the accumulated orthogonal factors, `diag`
/// and `superdiag` the bidiagonal (`superdiag[0]` is always zero).
fn bidiagonalize<T: FloatScalar>(
    a: &[T],
    rows: usize,
    cols: usize,
    u: &mut [T],
    v: &mut [T],
    diag: &mut [T],
    superdiag: &mut [T],
) {
    let nc = cols;
    u[..rows * nc].copy_from_slice(&a[..rows * nc]);

    diag[0] = T::zero();
    let mut s = T::zero();
    let mut scale = T::zero();

    for i in 0..nc {
        let ip1 = i + 1;
        superdiag[i] = scale * s;

        // Column transform
        scale = T::zero();
        for j in i..rows {
            scale = scale + u[j * nc + i].abs();
        }
        if scale > T::zero() {
            let mut s2 = T::zero();
            for j in i..rows {
                u[j * nc + i] = u[j * nc + i] / scale;
                s2 = s2 + u[j * nc + i] * u[j * nc + i];
            }
            s = if u[i * nc + i] < T::zero() { s2.sqrt() } else { -s2.sqrt() };
            let half_norm_squared = u[i * nc + i] * s - s2;
            u[i * nc + i] = u[i * nc + i] - s;

            for j in ip1..nc {
                let mut si = T::zero();
                for k in i..rows {
                    si = si + u[k * nc + i] * u[k * nc + j];
                }
                si = si / half_norm_squared;
                for k in i..rows {
                    u[k * nc + j] = u[k * nc + j] + si * u[k * nc + i];
                }
            }
        }
        for j in i..rows {
            u[j * nc + i] = u[j * nc + i] * scale;
        }
        diag[i] = s * scale;

        // Row transform
        s = T::zero();
        scale = T::zero();
        if i == nc - 1 {
            continue;
        }
        for j in ip1..nc {
            scale = scale + u[i * nc + j].abs();
        }
        if scale > T::zero() {
            let mut s2 = T::zero();
            for j in ip1..nc {
                u[i * nc + j] = u[i * nc + j] / scale;
                s2 = s2 + u[i * nc + j] * u[i * nc + j];
            }
            s = if u[i * nc + ip1] < T::zero() { s2.sqrt() } else { -s2.sqrt() };
            let half_norm_squared = u[i * nc + ip1] * s - s2;
            u[i * nc + ip1] = u[i * nc + ip1] - s;

            for k in ip1..nc {
                superdiag[k] = u[i * nc + k] / half_norm_squared;
            }
            for j in ip1..rows {
                let mut si = T::zero();
                for k in ip1..nc {
                    si = si + u[i * nc + k] * u[j * nc + k];
                }
                for k in ip1..nc {
                    u[j * nc + k] = u[j * nc + k] + si * superdiag[k];
                }
            }
            for k in ip1..nc {
                u[i * nc + k] = u[i * nc + k] * scale;
            }
        }
    }

    // Accumulate V from the row reflectors
    v[..nc * nc].fill(T::zero());
    v[(nc - 1) * nc + nc - 1] = T::one();
    let mut s = superdiag[nc - 1];
    for i in (0..nc - 1).rev() {
        let ip1 = i + 1;
        if s != T::zero() {
            for j in ip1..nc {
                v[j * nc + i] = (u[i * nc + j] / u[i * nc + ip1]) / s;
            }
            for j in ip1..nc {
                let mut si = T::zero();
                for k in ip1..nc {
                    si = si + u[i * nc + k] * v[k * nc + j];
                }
                for k in ip1..nc {
                    v[k * nc + j] = v[k * nc + j] + si * v[k * nc + i];
                }
            }
        }
        for j in ip1..nc {
            v[i * nc + j] = T::zero();
            v[j * nc + i] = T::zero();
        }
        v[i * nc + i] = T::one();
        s = superdiag[i];
    }

    // Accumulate U from the column reflectors
    for i in (0..nc).rev() {
        let ip1 = i + 1;
        let s = diag[i];
        for j in ip1..nc {
            u[i * nc + j] = T::zero();
        }
        if s != T::zero() {
            for j in ip1..nc {
                let mut si = T::zero();
                for k in ip1..rows {
                    si = si + u[k * nc + i] * u[k * nc + j];
                }
                si = (si / u[i * nc + i]) / s;
                for k in i..rows {
                    u[k * nc + j] = u[k * nc + j] + si * u[k * nc + i];
                }
            }
            for j in i..rows {
                u[j * nc + i] = u[j * nc + i] / s;
            }
        } else {
            for j in i..rows {
                u[j * nc + i] = T::zero();
            }
        }
        u[i * nc + i] = u[i * nc + i] + T::one();
    }
}

/// Rotate columns `p` and `q` of a `rows × stride` buffer:
/// `(x, y) ← (x c + y s, -x s + y c)`.
fn rotate_columns<T: FloatScalar>(
    m: &mut [T],
    rows: usize,
    stride: usize,
    p: usize,
    q: usize,
    c: T,
    s: T,
) {
    for j in 0..rows {
        let x = m[j * stride + p];
        let y = m[j * stride + q];
        m[j * stride + p] = x * c + y * s;
        m[j * stride + q] = -x * s + y * c;
    }
}

/// Implicit-shift QR on the bidiagonal until every superdiagonal entry is
/// negligible.
fn givens_diagonalize<T: FloatScalar>(
    rows: usize,
    cols: usize,
    u: &mut [T],
    v: &mut [T],
    diag: &mut [T],
    superdiag: &mut [T],
) -> Result<(), LinalgError> {
    let mut x = T::zero();
    for i in 0..cols {
        let y = diag[i].abs() + superdiag[i].abs();
        if x < y {
            x = y;
        }
    }
    let epsilon = x * T::epsilon();

    for k in (0..cols).rev() {
        let mut iteration_count = 0;
        loop {
            // Find the top of the unreduced block ending at k
            let mut rotation = true;
            let mut m = k;
            loop {
                if superdiag[m].abs() <= epsilon {
                    rotation = false;
                    break;
                }
                if m == 0 {
                    rotation = false;
                    break;
                }
                if diag[m - 1].abs() <= epsilon {
                    break;
                }
                m -= 1;
            }

            // diag[m - 1] is negligible: chase superdiag[m] out
            if rotation {
                let mut c = T::zero();
                let mut s = T::one();
                for i in m..=k {
                    let f = s * superdiag[i];
                    superdiag[i] = superdiag[i] * c;
                    if f.abs() <= epsilon {
                        break;
                    }
                    let g = diag[i];
                    let h = (f * f + g * g).sqrt();
                    diag[i] = h;
                    c = g / h;
                    s = -f / h;
                    rotate_columns(u, rows, cols, m - 1, i, c, s);
                }
            }

            let z = diag[k];
            if m == k {
                if z < T::zero() {
                    diag[k] = -z;
                    for j in 0..cols {
                        v[j * cols + k] = -v[j * cols + k];
                    }
                }
                break;
            }
            if iteration_count >= MAX_ITERATION_COUNT_SVD {
                log::warn!(
                    "svd_golub_reinsch: singular value {} did not converge in {} iterations",
                    k,
                    MAX_ITERATION_COUNT_SVD
                );
                return Err(LinalgError::ConvergenceFailure);
            }
            iteration_count += 1;

            // Wilkinson shift from the trailing 2x2
            let mut x = diag[m];
            let mut y = diag[k - 1];
            let mut g = superdiag[k - 1];
            let mut h = superdiag[k];
            let mut f = ((y - z) * (y + z) + (g - h) * (g + h)) / (T::lit(2.0) * h * y);
            g = (f * f + T::one()).sqrt();
            if f < T::zero() {
                g = -g;
            }
            f = ((x - z) * (x + z) + h * (y / (f + g) - h)) / x;

            let mut c = T::one();
            let mut s = T::one();
            for i in (m + 1)..=k {
                g = superdiag[i];
                y = diag[i];
                h = s * g;
                g = g * c;
                let mut z = (f * f + h * h).sqrt();
                superdiag[i - 1] = z;
                c = f / z;
                s = h / z;
                f = x * c + g * s;
                g = -x * s + g * c;
                h = y * s;
                y = y * c;
                rotate_columns(v, cols, cols, i - 1, i, c, s);

                z = (f * f + h * h).sqrt();
                diag[i - 1] = z;
                if z != T::zero() {
                    c = f / z;
                    s = h / z;
                }
                f = c * g + s * y;
                x = -s * g + c * y;
                rotate_columns(u, rows, cols, i - 1, i, c, s);
            }
            superdiag[m] = T::zero();
            superdiag[k] = f;
            diag[k] = x;
        }
    }
    Ok(())
}

/// Selection sort of the singular values, carrying columns of `U` and `V`.
fn sort_decreasing<T: FloatScalar>(rows: usize, cols: usize, s: &mut [T], u: &mut [T], v: &mut [T]) {
    for i in 0..cols.saturating_sub(1) {
        let mut max_index = i;
        for j in (i + 1)..cols {
            if s[j] > s[max_index] {
                max_index = j;
            }
        }
        if max_index == i {
            continue;
        }
        s.swap(i, max_index);
        for j in 0..rows {
            u.swap(j * cols + i, j * cols + max_index);
        }
        for j in 0..cols {
            v.swap(j * cols + i, j * cols + max_index);
        }
    }
}

// ── Pseudo-inverse ──────────────────────────────────────────────────

/// Moore-Penrose pseudo-inverse `A⁺ = V diag(1/S) Uᵀ`, written `cols × rows`
/// into `ai`.
///
/// Square input uses [`svd_jacobi_one_sided`], anything else
/// [`svd_golub_reinsch`]. A wide matrix is handled through its transpose.
/// Singular values at or below `max(rows, cols) · ε · s_max` are treated as
/// zero and contribute nothing, so a rank-deficient input gets the
/// pseudo-inverse of its numerical rank.
pub fn pinv<T: FloatScalar>(
    ai: &mut [T],
    a: &[T],
    rows: usize,
    cols: usize,
) -> Result<(), LinalgError> {
    check_len(a, rows, cols)?;
    check_len(ai, cols, rows)?;

    if rows < cols {
        let mut at = vec![T::zero(); rows * cols];
        tran(&mut at, a, rows, cols)?;
        let mut pt = vec![T::zero(); rows * cols];
        pinv(&mut pt, &at, cols, rows)?;
        return tran(ai, &pt, rows, cols);
    }

    let mut u = vec![T::zero(); rows * cols];
    let mut s = vec![T::zero(); cols];
    let mut v = vec![T::zero(); cols * cols];
    if rows == cols {
        svd_jacobi_one_sided(a, rows, MAX_ITERATION_COUNT_SVD, &mut u, &mut s, &mut v)?;
    } else {
        svd_golub_reinsch(a, rows, cols, &mut u, &mut s, &mut v)?;
    }

    let tol = pinv_tolerance(&s, rows);
    for sv in s.iter_mut() {
        *sv = if *sv <= tol { T::zero() } else { T::one() / *sv };
    }

    // ai = V * diag(1/S) * Uᵀ
    for i in 0..cols {
        for j in 0..rows {
            let mut acc = T::zero();
            for k in 0..cols {
                acc = acc + v[i * cols + k] * s[k] * u[j * cols + k];
            }
            ai[i * rows + j] = acc;
        }
    }
    Ok(())
}

/// Numerical-rank cutoff for [`pinv`]. `rows` is the larger dimension.
fn pinv_tolerance<T: FloatScalar>(s: &[T], rows: usize) -> T {
    let s_max = s.iter().fold(T::zero(), |m, &v| m.max(v));
    T::from_count(rows) * T::epsilon() * s_max
}
