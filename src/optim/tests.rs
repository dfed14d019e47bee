use super::*;

const TOL: f64 = 1e-9;

fn assert_near(a: f64, b: f64, tol: f64, msg: &str) {
    assert!(
        (a - b).abs() < tol,
        "{}: {} vs {} (diff {})",
        msg,
        a,
        b,
        (a - b).abs()
    );
}

// ── Maximize ────────────────────────────────────────────────────────

#[test]
fn textbook_maximization() {
    // max 3x + 5y  s.t.  x ≤ 4, 2y ≤ 12, 3x + 2y ≤ 18
    let c = [3.0, 5.0];
    let a = [1.0, 0.0, 0.0, 2.0, 3.0, 2.0];
    let b = [4.0, 12.0, 18.0];
    let mut x = [0.0; 2];
    let res = linprog(&c, &a, &b, &mut x, 3, 2, Objective::Maximize, 20).unwrap();
    assert_eq!(res.status, LinprogStatus::Optimal);
    assert_eq!(res.iterations, 2);
    assert_near(x[0], 2.0, TOL, "x");
    assert_near(x[1], 6.0, TOL, "y");
    assert_near(res.value, 36.0, TOL, "objective");
}

#[test]
fn maximization_in_single_precision() {
    let c = [3.0_f32, 5.0];
    let a = [1.0_f32, 0.0, 0.0, 2.0, 3.0, 2.0];
    let b = [4.0_f32, 12.0, 18.0];
    let mut x = [0.0_f32; 2];
    let res = linprog(&c, &a, &b, &mut x, 3, 2, Objective::Maximize, 20).unwrap();
    assert_eq!(res.status, LinprogStatus::Optimal);
    assert!((x[0] - 2.0).abs() < 1e-5);
    assert!((x[1] - 6.0).abs() < 1e-5);
}

#[test]
fn iteration_limit_keeps_partial_solution() {
    let c = [3.0, 5.0];
    let a = [1.0, 0.0, 0.0, 2.0, 3.0, 2.0];
    let b = [4.0, 12.0, 18.0];
    let mut x = [0.0; 2];
    let res = linprog(&c, &a, &b, &mut x, 3, 2, Objective::Maximize, 1).unwrap();
    assert_eq!(res.status, LinprogStatus::IterationLimit);
    assert_eq!(res.iterations, 1);
    // First pivot brings y in at its bound 2y ≤ 12
    assert_near(x[0], 0.0, TOL, "x");
    assert_near(x[1], 6.0, TOL, "y");
    assert_near(res.value, 30.0, TOL, "objective");
}

#[test]
fn unbounded_direction_is_reported() {
    // max x + y  s.t.  x - y ≤ 1
    let c = [1.0, 1.0];
    let a = [1.0, -1.0];
    let b = [1.0];
    let mut x = [0.0; 2];
    let res = linprog(&c, &a, &b, &mut x, 1, 2, Objective::Maximize, 20).unwrap();
    assert_eq!(res.status, LinprogStatus::Unbounded);
}

// ── Minimize ────────────────────────────────────────────────────────

#[test]
fn textbook_minimization_through_dual() {
    // min 0.12x + 0.15y  s.t.  60x + 60y ≥ 300, 12x + 6y ≥ 36, 10x + 30y ≥ 90
    let c = [0.12, 0.15];
    let a = [60.0, 60.0, 12.0, 6.0, 10.0, 30.0];
    let b = [300.0, 36.0, 90.0];
    let mut x = [0.0; 2];
    let res = linprog(&c, &a, &b, &mut x, 3, 2, Objective::Minimize, 20).unwrap();
    assert_eq!(res.status, LinprogStatus::Optimal);
    assert_near(x[0], 3.0, 1e-9, "x");
    assert_near(x[1], 2.0, 1e-9, "y");
    assert_near(res.value, 0.66, 1e-12, "objective");
}

// ── Arguments ───────────────────────────────────────────────────────

#[test]
fn rejects_bad_dimensions() {
    let mut x = [0.0; 2];
    assert_eq!(
        linprog(&[1.0, 1.0], &[1.0], &[1.0], &mut x, 1, 2, Objective::Maximize, 5).unwrap_err(),
        OptimError::InvalidDimensions
    );
    assert_eq!(
        linprog::<f64>(&[], &[], &[], &mut x, 0, 0, Objective::Minimize, 5).unwrap_err(),
        OptimError::InvalidDimensions
    );
}
