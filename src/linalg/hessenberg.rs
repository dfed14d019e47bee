use crate::linalg::LinalgError;
use crate::matrix::check_len;
use crate::traits::FloatScalar;

/// Reduce a square `n × n` matrix to upper Hessenberg form in place.
///
/// Householder similarity transforms `H = P A P` are applied from both
/// sides, so the eigenvalues are preserved. The transform itself is not
/// kept. Entries below the first subdiagonal are set to exactly zero.
pub fn hessenberg<T: FloatScalar>(a: &mut [T], n: usize) -> Result<(), LinalgError> {
    check_len(a, n, n)?;
    let mut v = alloc::vec![T::zero(); n];

    for k in 0..n.saturating_sub(2) {
        let mut norm_sq = T::zero();
        for i in (k + 1)..n {
            norm_sq = norm_sq + a[i * n + k] * a[i * n + k];
        }
        if norm_sq <= T::epsilon() * T::epsilon() {
            continue;
        }

        let norm = norm_sq.sqrt();
        let ak1k = a[(k + 1) * n + k];
        let sigma = if ak1k < T::zero() { -norm } else { norm };
        let v0 = ak1k + sigma;

        // v = [1, a[k+2..n, k] / v0], H = I - tau v vᵀ
        v[k + 1] = T::one();
        for i in (k + 2)..n {
            v[i] = a[i * n + k] / v0;
        }
        let tau = v0 / sigma;

        // Left: rows k+1.. of columns k+1..
        for j in (k + 1)..n {
            let mut dot = T::zero();
            for i in (k + 1)..n {
                dot = dot + v[i] * a[i * n + j];
            }
            dot = dot * tau;
            for i in (k + 1)..n {
                a[i * n + j] = a[i * n + j] - dot * v[i];
            }
        }

        // Right: all rows, columns k+1..
        for i in 0..n {
            let mut dot = T::zero();
            for j in (k + 1)..n {
                dot = dot + a[i * n + j] * v[j];
            }
            dot = dot * tau;
            for j in (k + 1)..n {
                a[i * n + j] = a[i * n + j] - dot * v[j];
            }
        }

        a[(k + 1) * n + k] = -sigma;
        for i in (k + 2)..n {
            a[i * n + k] = T::zero();
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structure_and_invariants() {
        let orig = [
            4.0_f64, 1.0, -2.0, 2.0, //
            1.0, 2.0, 0.0, 1.0, //
            -2.0, 0.0, 3.0, -2.0, //
            2.0, 1.0, -2.0, -1.0,
        ];
        let mut h = orig;
        hessenberg(&mut h, 4).unwrap();

        for i in 2..4 {
            for j in 0..(i - 1) {
                assert_eq!(h[i * 4 + j], 0.0, "H[{},{}]", i, j);
            }
        }

        // Orthogonal similarity preserves the trace and the Frobenius norm
        let trace = |m: &[f64]| (0..4).map(|i| m[i * 4 + i]).sum::<f64>();
        let frob = |m: &[f64]| m.iter().map(|x| x * x).sum::<f64>();
        assert!((trace(&h) - trace(&orig)).abs() < 1e-10);
        assert!((frob(&h) - frob(&orig)).abs() < 1e-9);
    }

    #[test]
    fn small_matrices_unchanged() {
        let mut a = [1.0_f32, 2.0, 3.0, 4.0];
        hessenberg(&mut a, 2).unwrap();
        assert_eq!(a, [1.0, 2.0, 3.0, 4.0]);
    }
}
