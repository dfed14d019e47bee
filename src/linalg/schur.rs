use crate::linalg::{balance, hessenberg, LinalgError};
use crate::matrix::check_len;
use crate::traits::FloatScalar;

/// Francis double-shift QR iteration on an upper Hessenberg matrix.
///
/// Transforms `h` to real Schur form (quasi-upper-triangular) in place.
/// Real eigenvalues end up as 1×1 diagonal blocks, complex conjugate pairs
/// as 2×2 blocks.
fn francis_qr<T: FloatScalar>(h: &mut [T], n: usize, max_iter: usize) -> Result<(), LinalgError> {
    if n <= 1 {
        return Ok(());
    }
    let at = |h: &[T], i: usize, j: usize| h[i * n + j];

    let eps = T::epsilon();
    let mut iter = 0usize;
    let mut p = n; // active submatrix is h[0..p, 0..p]

    while p > 2 {
        // Deflation: check if h[p-1, p-2] is negligible
        let tol = eps * (at(h, p - 2, p - 2).abs() + at(h, p - 1, p - 1).abs());
        if at(h, p - 1, p - 2).abs() <= tol {
            h[(p - 1) * n + p - 2] = T::zero();
            p -= 1;
            continue;
        }

        // 2×2 block at the bottom
        let tol2 = eps * (at(h, p - 3, p - 3).abs() + at(h, p - 2, p - 2).abs());
        if at(h, p - 2, p - 3).abs() <= tol2 {
            h[(p - 2) * n + p - 3] = T::zero();
            p -= 2;
            continue;
        }

        iter += 1;
        if iter > max_iter {
            log::warn!("eig: Francis QR did not converge in {} iterations", max_iter);
            return Err(LinalgError::ConvergenceFailure);
        }

        // Start of the active unreduced block
        let mut lo = p - 1;
        while lo > 0 {
            let tol_lo = eps * (at(h, lo - 1, lo - 1).abs() + at(h, lo, lo).abs());
            if at(h, lo, lo - 1).abs() <= tol_lo {
                h[lo * n + lo - 1] = T::zero();
                break;
            }
            lo -= 1;
        }

        // Exceptional shift every 10 iterations
        let (s, t) = if iter % 10 == 0 {
            let w = at(h, p - 1, p - 2).abs() + at(h, p - 2, p - 3).abs();
            (w + w, w * w)
        } else {
            let a11 = at(h, p - 2, p - 2);
            let a12 = at(h, p - 2, p - 1);
            let a21 = at(h, p - 1, p - 2);
            let a22 = at(h, p - 1, p - 1);
            (a11 + a22, a11 * a22 - a12 * a21)
        };

        // First column of H² - sH + tI
        let h00 = at(h, lo, lo);
        let h10 = at(h, lo + 1, lo);
        let h01 = at(h, lo, lo + 1);
        let h11 = at(h, lo + 1, lo + 1);

        let mut x = h00 * h00 + h01 * h10 - s * h00 + t;
        let mut y = h10 * (h00 + h11 - s);
        let mut z = if lo + 2 < p {
            h10 * at(h, lo + 2, lo + 1)
        } else {
            T::zero()
        };

        // Chase the bulge
        for k in lo..(p - 1) {
            let use3 = k + 2 < p;
            let (v1, v2, tau) = if use3 {
                householder3(x, y, z)
            } else {
                let (v1, tau) = householder2(x, y);
                (v1, T::zero(), tau)
            };

            let col_start = if k > lo { k - 1 } else { k };
            for j in col_start..n {
                let mut dot = h[k * n + j] + v1 * h[(k + 1) * n + j];
                if use3 {
                    dot = dot + v2 * h[(k + 2) * n + j];
                }
                dot = tau * dot;
                h[k * n + j] = h[k * n + j] - dot;
                h[(k + 1) * n + j] = h[(k + 1) * n + j] - dot * v1;
                if use3 {
                    h[(k + 2) * n + j] = h[(k + 2) * n + j] - dot * v2;
                }
            }

            let row_end = if use3 { (k + 4).min(p) } else { p };
            for i in 0..row_end {
                let mut dot = h[i * n + k] + v1 * h[i * n + k + 1];
                if use3 {
                    dot = dot + v2 * h[i * n + k + 2];
                }
                dot = tau * dot;
                h[i * n + k] = h[i * n + k] - dot;
                h[i * n + k + 1] = h[i * n + k + 1] - dot * v1;
                if use3 {
                    h[i * n + k + 2] = h[i * n + k + 2] - dot * v2;
                }
            }

            if k + 3 < p {
                x = at(h, k + 1, k);
                y = at(h, k + 2, k);
                z = at(h, k + 3, k);
            } else if k + 2 < p {
                x = at(h, k + 1, k);
                y = at(h, k + 2, k);
                z = T::zero();
            }
        }

        // Flush bulge residue below the subdiagonal
        for i in 0..n {
            for j in 0..i.saturating_sub(1) {
                if at(h, i, j).abs() < eps * (at(h, i, i).abs() + at(h, j, j).abs()) {
                    h[i * n + j] = T::zero();
                }
            }
        }
    }

    if p == 2 {
        let tol = eps * (at(h, 0, 0).abs() + at(h, 1, 1).abs());
        if at(h, 1, 0).abs() <= tol {
            h[n] = T::zero();
        }
    }
    Ok(())
}

/// 3-element Householder with implicit leading 1: returns `(v1, v2, tau)`.
#[inline]
fn householder3<T: FloatScalar>(x: T, y: T, z: T) -> (T, T, T) {
    let norm = (x * x + y * y + z * z).sqrt();
    if norm <= T::epsilon() {
        return (T::zero(), T::zero(), T::zero());
    }
    let u0 = if x >= T::zero() { x + norm } else { x - norm };
    let v1 = y / u0;
    let v2 = z / u0;
    (v1, v2, T::lit(2.0) / (T::one() + v1 * v1 + v2 * v2))
}

/// 2-element Householder with implicit leading 1: returns `(v1, tau)`.
#[inline]
fn householder2<T: FloatScalar>(x: T, y: T) -> (T, T) {
    let norm = (x * x + y * y).sqrt();
    if norm <= T::epsilon() {
        return (T::zero(), T::zero());
    }
    let u0 = if x >= T::zero() { x + norm } else { x - norm };
    let v1 = y / u0;
    (v1, T::lit(2.0) / (T::one() + v1 * v1))
}

/// Eigenvalues of a general real `n × n` matrix.
///
/// The matrix is copied, balanced, reduced to Hessenberg form and driven
/// to real Schur form by Francis QR (at most `30 n` iterations). Real parts
/// go to `wr`, imaginary parts to `wi`; a complex pair is written as
/// `(re, +im)` followed by `(re, -im)`. `a` is not modified.
///
/// # Errors
///
/// [`LinalgError::ConvergenceFailure`] from balancing or from the QR
/// iteration.
///
/// ```
/// use ctrlkit::linalg::eig;
///
/// // 90° rotation: ±i
/// let a = [0.0_f64, -1.0, 1.0, 0.0];
/// let (mut wr, mut wi) = ([0.0; 2], [0.0; 2]);
/// eig(&a, &mut wr, &mut wi, 2).unwrap();
/// assert!(wr[0].abs() < 1e-12);
/// assert!((wi[0] - 1.0).abs() < 1e-12);
/// assert!((wi[1] + 1.0).abs() < 1e-12);
/// ```
pub fn eig<T: FloatScalar>(
    a: &[T],
    wr: &mut [T],
    wi: &mut [T],
    n: usize,
) -> Result<(), LinalgError> {
    check_len(a, n, n)?;
    if wr.len() < n || wi.len() < n {
        return Err(LinalgError::DimensionMismatch);
    }

    let mut h = a[..n * n].to_vec();
    balance(&mut h, n)?;
    hessenberg(&mut h, n)?;
    francis_qr(&mut h, n, 30 * n)?;

    wr[..n].fill(T::zero());
    wi[..n].fill(T::zero());
    let half = T::lit(0.5);
    let mut i = 0;
    while i < n {
        if i + 1 < n && h[(i + 1) * n + i] != T::zero() {
            let p = h[i * n + i];
            let q = h[i * n + i + 1];
            let r = h[(i + 1) * n + i];
            let s = h[(i + 1) * n + i + 1];

            let tr = (p + s) * half;
            let disc = tr * tr - (p * s - q * r);
            if disc >= T::zero() {
                let sq = disc.sqrt();
                wr[i] = tr + sq;
                wr[i + 1] = tr - sq;
            } else {
                let sq = (-disc).sqrt();
                wr[i] = tr;
                wr[i + 1] = tr;
                wi[i] = sq;
                wi[i + 1] = -sq;
            }
            i += 2;
        } else {
            wr[i] = h[i * n + i];
            i += 1;
        }
    }
    Ok(())
}

/// [`eig`] returning `Complex<T>` values.
#[cfg(feature = "complex")]
pub fn eig_complex<T: FloatScalar>(
    a: &[T],
    w: &mut [num_complex::Complex<T>],
    n: usize,
) -> Result<(), LinalgError> {
    if w.len() < n {
        return Err(LinalgError::DimensionMismatch);
    }
    let mut wr = alloc::vec![T::zero(); n];
    let mut wi = alloc::vec![T::zero(); n];
    eig(a, &mut wr, &mut wi, n)?;
    for (out, (&re, &im)) in w.iter_mut().zip(wr.iter().zip(wi.iter())) {
        *out = num_complex::Complex::new(re, im);
    }
    Ok(())
}
