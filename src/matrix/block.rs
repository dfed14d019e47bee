use crate::linalg::LinalgError;
use crate::matrix::check_len;
use crate::traits::Scalar;

// ── Concatenation ───────────────────────────────────────────────────

/// Concatenate two matrices.
///
/// With `vertical` set, `C = [A; B]` (`(row_a + row_b) × column_a`, requires
/// `column_a == column_b`). Otherwise `C = [A, B]`
/// (`row_a × (column_a + column_b)`, requires `row_a == row_b`).
///
/// ```
/// use ctrlkit::matrix::cat;
/// let a = [1.0_f32, 2.0, 3.0, 4.0];
/// let b = [5.0_f32, 6.0];
/// let mut c = [0.0_f32; 6];
/// cat(&mut c, &a, &b, false, 2, 2, 2, 1).unwrap();
/// assert_eq!(c, [1.0, 2.0, 5.0, 3.0, 4.0, 6.0]);
/// ```
#[allow(clippy::too_many_arguments)]
pub fn cat<T: Scalar>(
    c: &mut [T],
    a: &[T],
    b: &[T],
    vertical: bool,
    row_a: usize,
    column_a: usize,
    row_b: usize,
    column_b: usize,
) -> Result<(), LinalgError> {
    check_len(a, row_a, column_a)?;
    check_len(b, row_b, column_b)?;
    if vertical {
        if column_a != column_b {
            return Err(LinalgError::DimensionMismatch);
        }
        check_len(c, row_a + row_b, column_a)?;
        let na = row_a * column_a;
        c[..na].copy_from_slice(&a[..na]);
        c[na..na + row_b * column_b].copy_from_slice(&b[..row_b * column_b]);
    } else {
        if row_a != row_b {
            return Err(LinalgError::DimensionMismatch);
        }
        let column_c = column_a + column_b;
        check_len(c, row_a, column_c)?;
        for i in 0..row_a {
            let row = &mut c[i * column_c..(i + 1) * column_c];
            row[..column_a].copy_from_slice(&a[i * column_a..(i + 1) * column_a]);
            row[column_a..].copy_from_slice(&b[i * column_b..(i + 1) * column_b]);
        }
    }
    Ok(())
}

// ── Block extraction & insertion ────────────────────────────────────

/// Crop the `row_b × column_b` block of `A` starting at
/// `(start_row, start_column)` into `B`.
///
/// `A` is `row × column`.
#[allow(clippy::too_many_arguments)]
pub fn cut<T: Scalar>(
    b: &mut [T],
    a: &[T],
    row: usize,
    column: usize,
    start_row: usize,
    start_column: usize,
    row_b: usize,
    column_b: usize,
) -> Result<(), LinalgError> {
    check_len(a, row, column)?;
    check_len(b, row_b, column_b)?;
    if start_row + row_b > row || start_column + column_b > column {
        return Err(LinalgError::DimensionMismatch);
    }
    for i in 0..row_b {
        let src = (start_row + i) * column + start_column;
        b[i * column_b..(i + 1) * column_b].copy_from_slice(&a[src..src + column_b]);
    }
    Ok(())
}

/// Write the `row_a × column_a` matrix `A` into `B` (`row_b × column_b`)
/// with its top-left corner at `(start_row, start_column)`.
#[allow(clippy::too_many_arguments)]
pub fn insert<T: Scalar>(
    b: &mut [T],
    a: &[T],
    row_a: usize,
    column_a: usize,
    row_b: usize,
    column_b: usize,
    start_row: usize,
    start_column: usize,
) -> Result<(), LinalgError> {
    check_len(a, row_a, column_a)?;
    check_len(b, row_b, column_b)?;
    if start_row + row_a > row_b || start_column + column_a > column_b {
        return Err(LinalgError::DimensionMismatch);
    }
    for i in 0..row_a {
        let dst = (start_row + i) * column_b + start_column;
        b[dst..dst + column_a].copy_from_slice(&a[i * column_a..(i + 1) * column_a]);
    }
    Ok(())
}
