use alloc::vec;
use alloc::vec::Vec;

use super::{LinprogResult, LinprogStatus, Objective, OptimError};
use crate::traits::FloatScalar;

/// Dense simplex tableau for `max cᵀx, A x ≤ b, x ≥ 0` with slack basis.
///
/// Layout is `(m + 1) × (n + m + 1)`: constraint rows `[A | I | b]`
/// followed by the objective row `[-c | 0 | value]`.
struct Tableau<T> {
    t: Vec<T>,
    m: usize,
    n: usize,
    basis: Vec<usize>,
}

impl<T: FloatScalar> Tableau<T> {
    fn new(c: &[T], a: &[T], b: &[T], m: usize, n: usize, transpose: bool) -> Self {
        let width = n + m + 1;
        let mut t = vec![T::zero(); (m + 1) * width];
        for i in 0..m {
            for j in 0..n {
                // The dual reads A column-wise
                t[i * width + j] = if transpose { a[j * m + i] } else { a[i * n + j] };
            }
            t[i * width + n + i] = T::one();
            t[i * width + width - 1] = b[i];
        }
        for j in 0..n {
            t[m * width + j] = -c[j];
        }
        Self {
            t,
            m,
            n,
            basis: (n..n + m).collect(),
        }
    }

    fn width(&self) -> usize {
        self.n + self.m + 1
    }

    fn at(&self, i: usize, j: usize) -> T {
        self.t[i * self.width() + j]
    }

    /// Most negative objective-row entry, if any.
    fn entering(&self) -> Option<usize> {
        let mut best = None;
        let mut min = T::zero();
        for j in 0..(self.n + self.m) {
            let v = self.at(self.m, j);
            if v < min {
                min = v;
                best = Some(j);
            }
        }
        best
    }

    /// Minimum-ratio row over positive entries of column `col`.
    fn leaving(&self, col: usize) -> Option<usize> {
        let rhs = self.width() - 1;
        let mut best = None;
        let mut min_ratio = T::infinity();
        for i in 0..self.m {
            let a = self.at(i, col);
            if a > T::zero() {
                let ratio = self.at(i, rhs) / a;
                if ratio < min_ratio {
                    min_ratio = ratio;
                    best = Some(i);
                }
            }
        }
        best
    }

    fn pivot(&mut self, row: usize, col: usize) {
        let w = self.width();
        let p = self.at(row, col);
        for j in 0..w {
            self.t[row * w + j] = self.t[row * w + j] / p;
        }
        for i in 0..=self.m {
            if i == row {
                continue;
            }
            let factor = self.t[i * w + col];
            if factor == T::zero() {
                continue;
            }
            for j in 0..w {
                self.t[i * w + j] = self.t[i * w + j] - factor * self.t[row * w + j];
            }
        }
        self.basis[row] = col;
    }

    fn solve(&mut self, iteration_limit: usize) -> (usize, LinprogStatus) {
        let mut iterations = 0;
        loop {
            let Some(col) = self.entering() else {
                log::debug!("linprog: optimal after {} pivots", iterations);
                return (iterations, LinprogStatus::Optimal);
            };
            if iterations >= iteration_limit {
                log::warn!("linprog: iteration limit {} reached", iteration_limit);
                return (iterations, LinprogStatus::IterationLimit);
            }
            let Some(row) = self.leaving(col) else {
                log::warn!("linprog: unbounded along column {}", col);
                return (iterations, LinprogStatus::Unbounded);
            };
            self.pivot(row, col);
            iterations += 1;
        }
    }
}

/// Solve a linear program by the tableau simplex method.
///
/// `a` is `rows × cols`, `b` has `rows` entries, `c` and `x` have `cols`.
///
/// - [`Objective::Maximize`]: `max cᵀx` subject to `A x ≤ b`, `x ≥ 0`.
///   The slack basis is the starting point, so `b` must be non-negative.
/// - [`Objective::Minimize`]: `min cᵀx` subject to `A x ≥ b`, `x ≥ 0`.
///   The dual `max bᵀy, Aᵀy ≤ c` is solved (so `c` must be non-negative)
///   and `x` is read from the objective row under the dual slack columns.
///
/// At most `iteration_limit` pivots are made; the entering column is the
/// most negative reduced cost. `x` always receives the current basic
/// solution, even when the status is not [`LinprogStatus::Optimal`].
pub fn linprog<T: FloatScalar>(
    c: &[T],
    a: &[T],
    b: &[T],
    x: &mut [T],
    rows: usize,
    cols: usize,
    objective: Objective,
    iteration_limit: usize,
) -> Result<LinprogResult<T>, OptimError> {
    if rows == 0 || cols == 0 {
        return Err(OptimError::InvalidDimensions);
    }
    if a.len() < rows * cols || b.len() < rows || c.len() < cols || x.len() < cols {
        return Err(OptimError::InvalidDimensions);
    }

    match objective {
        Objective::Maximize => {
            let mut tab = Tableau::new(c, a, b, rows, cols, false);
            let (iterations, status) = tab.solve(iteration_limit);
            let rhs = tab.width() - 1;
            x[..cols].fill(T::zero());
            for (i, &var) in tab.basis.iter().enumerate() {
                if var < cols {
                    x[var] = tab.at(i, rhs);
                }
            }
            Ok(LinprogResult {
                value: tab.at(rows, rhs),
                iterations,
                status,
            })
        }
        Objective::Minimize => {
            // Dual has `rows` variables and `cols` constraints
            let mut tab = Tableau::new(b, a, c, cols, rows, true);
            let (iterations, status) = tab.solve(iteration_limit);
            let rhs = tab.width() - 1;
            for j in 0..cols {
                x[j] = tab.at(cols, rows + j);
            }
            Ok(LinprogResult {
                value: tab.at(cols, rhs),
                iterations,
                status,
            })
        }
    }
}
