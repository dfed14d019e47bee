use super::*;
use crate::linalg::LinalgError;
use crate::stats::GaussianGenerator;
use rand::rngs::StdRng;
use rand::SeedableRng;

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

fn excitation(t: usize) -> f64 {
    let t = t as f64;
    (0.3 * t).sin() + 0.5 * (1.7 * t).sin()
}

// ── RLS ─────────────────────────────────────────────────────────────

#[test]
fn rls_first_order_arx() {
    let mut rls = Rls::new(1, 1, 0, 1000.0_f64, 1.0).unwrap();
    let (mut y_prev, mut u_prev) = (0.0, 0.0);
    for t in 0..100 {
        let u = excitation(t);
        let y = 0.7 * y_prev + 0.5 * u_prev;
        rls.update(u, y);
        y_prev = y;
        u_prev = u;
    }
    assert_near(rls.theta()[0], -0.7, 1e-4, "a1");
    assert_near(rls.theta()[1], 0.5, 1e-4, "b1");
}

#[test]
fn rls_second_order_arx() {
    let mut rls = Rls::new(2, 2, 0, 1000.0_f64, 1.0).unwrap();
    let (mut y1, mut y2, mut u1, mut u2) = (0.0, 0.0, 0.0, 0.0);
    for t in 0..200 {
        let u = excitation(t) + 0.2 * (2.9 * t as f64).sin();
        let y = 1.2 * y1 - 0.35 * y2 + 0.4 * u1 + 0.1 * u2;
        rls.update(u, y);
        y2 = y1;
        y1 = y;
        u2 = u1;
        u1 = u;
    }
    let expected = [-1.2, 0.35, 0.4, 0.1];
    for (i, (&got, &want)) in rls.theta().iter().zip(expected.iter()).enumerate() {
        assert_near(got, want, 1e-3, &format!("theta[{}]", i));
    }
}

#[test]
fn rls_without_output_lags() {
    // FIR model: the empty output segment must not shadow the inputs
    let mut rls = Rls::new(0, 2, 0, 1000.0_f64, 1.0).unwrap();
    let (mut u1, mut u2) = (0.0, 0.0);
    for t in 0..100 {
        let u = excitation(t);
        rls.update(u, 0.3 * u1 + 0.2 * u2);
        u2 = u1;
        u1 = u;
    }
    assert_near(rls.theta()[0], 0.3, 1e-4, "b1");
    assert_near(rls.theta()[1], 0.2, 1e-4, "b2");
}

#[test]
fn rls_error_segment_holds_previous_residual() {
    let mut rls = Rls::new(1, 1, 1, 100.0_f64, 1.0).unwrap();
    rls.update(1.0, 0.5);
    let e = rls.update(-1.0, 0.8);
    rls.update(0.5, 0.1);
    assert_eq!(rls.regressor()[0], -0.8);
    assert_eq!(rls.regressor()[1], -1.0);
    assert_eq!(rls.regressor()[2], e);
}

#[test]
fn rls_forgetting_tracks_parameter_change() {
    let run = |lambda: f64| {
        let mut rls = Rls::new(1, 1, 0, 1000.0, lambda).unwrap();
        let (mut y_prev, mut u_prev) = (0.0, 0.0);
        for t in 0..200 {
            let u = excitation(t);
            let b = if t < 100 { 0.5 } else { 1.0 };
            let y = 0.7 * y_prev + b * u_prev;
            rls.update(u, y);
            y_prev = y;
            u_prev = u;
        }
        rls.theta()[1]
    };
    assert_near(run(0.9), 1.0, 1e-3, "forgetting");
    // Without forgetting the old gain still drags the estimate
    assert!((run(1.0) - 1.0).abs() > 0.1);
}

#[test]
fn rls_reset_reproduces_trajectory() {
    let mut rls = Rls::new(2, 1, 1, 500.0_f64, 0.98).unwrap();
    let record = |rls: &mut Rls<f64>| {
        let mut out = Vec::new();
        let mut y = 0.0;
        for t in 0..30 {
            let u = excitation(t);
            y = 0.6 * y + u;
            rls.update(u, y);
            out.extend_from_slice(rls.theta());
        }
        out
    };
    let first = record(&mut rls);
    rls.reset();
    let second = record(&mut rls);
    assert_eq!(first, second);
}

#[test]
fn rls_first_update_seeds_covariance() {
    let mut rls = Rls::new(1, 1, 0, 10.0_f64, 1.0).unwrap();
    let e = rls.update(1.0, 2.0);
    // Zero regressor: no correction, P = pq I
    assert_eq!(e, 2.0);
    assert_eq!(rls.theta(), &[0.0, 0.0]);
    assert_eq!(rls.covariance(), &[10.0, 0.0, 0.0, 10.0]);
}

#[test]
fn rls_empty_model_rejected() {
    assert_eq!(
        Rls::new(0, 0, 0, 1.0_f64, 1.0).unwrap_err(),
        SysidError::InvalidDimensions
    );
}

// ── OKID / ERA ──────────────────────────────────────────────────────

#[test]
fn okid_two_channels() {
    // Channel 0: impulse through 0.5; channel 1: doubled step through 0.8
    let u = [1.0_f64, 0.0, 0.0, 0.0, 2.0, 2.0, 2.0, 2.0];
    let y = [0.0, 1.0, 0.5, 0.25, 0.0, 2.0, 3.6, 4.88];
    let mut g = [0.0; 8];
    okid(&mut g, &y, &u, 2, 4).unwrap();
    let expected = [0.0, 1.0, 0.5, 0.25, 0.0, 1.0, 0.8, 0.64];
    for (i, (&a, &b)) in g.iter().zip(expected.iter()).enumerate() {
        assert_near(a, b, 1e-12, &format!("g[{}]", i));
    }
}

#[test]
fn okid_zero_first_input() {
    let mut g = [0.0_f64; 3];
    assert_eq!(
        okid(&mut g, &[1.0, 2.0, 3.0], &[0.0, 1.0, 1.0], 1, 3),
        Err(SysidError::Linalg(LinalgError::Singular))
    );
}

fn impulse(len: usize) -> Vec<f64> {
    let mut u = vec![0.0; len];
    u[0] = 1.0;
    u
}

#[test]
fn era_first_order_pole() {
    let n = 20;
    let mut y = vec![0.0_f64; n];
    for k in 1..n {
        y[k] = 0.5_f64.powi(k as i32 - 1);
    }
    let (mut a, mut b, mut c) = ([0.0; 1], [0.0; 1], [0.0; 1]);
    okid_era(&mut a, &mut b, &mut c, 1, &y, &impulse(n), 1, n).unwrap();
    assert_near(a[0], 0.5, 1e-10, "pole");
    assert_near(c[0] * b[0], 1.0, 1e-10, "CB");
}

#[test]
fn era_second_order_realization() {
    let n = 20;
    let mut y = vec![0.0_f64; n];
    for k in 1..n {
        let e = k as i32 - 1;
        y[k] = 0.6_f64.powi(e) - 0.5 * 0.3_f64.powi(e);
    }
    let (mut a, mut b, mut c) = ([0.0; 4], [0.0; 2], [0.0; 2]);
    okid_era(&mut a, &mut b, &mut c, 2, &y, &impulse(n), 1, n).unwrap();

    // Poles 0.6 and 0.3 through the characteristic polynomial
    assert_near(a[0] + a[3], 0.9, 1e-5, "trace");
    assert_near(a[0] * a[3] - a[1] * a[2], 0.18, 1e-5, "det");

    let cb = c[0] * b[0] + c[1] * b[1];
    let ab = [a[0] * b[0] + a[1] * b[1], a[2] * b[0] + a[3] * b[1]];
    let cab = c[0] * ab[0] + c[1] * ab[1];
    assert_near(cb, 0.5, 1e-6, "CB");
    assert_near(cab, 0.45, 1e-6, "CAB");
}

#[test]
fn era_order_beyond_data_rejected() {
    let y = [0.0_f64, 1.0, 0.5, 0.25];
    let u = impulse(4);
    let (mut a, mut b, mut c) = ([0.0; 9], [0.0; 3], [0.0; 3]);
    assert_eq!(
        okid_era(&mut a, &mut b, &mut c, 3, &y, &u, 1, 4),
        Err(SysidError::InvalidDimensions)
    );
    assert_eq!(
        okid_era(&mut a, &mut b, &mut c, 0, &y, &u, 1, 4),
        Err(SysidError::InvalidDimensions)
    );
    assert_eq!(
        okid_era(&mut a, &mut b, &mut c, 1, &y, &u, 1, 1),
        Err(SysidError::InvalidDimensions)
    );
}

#[test]
fn era_of_silent_plant_is_singular() {
    let y = [0.0_f64; 8];
    let (mut a, mut b, mut c) = ([0.0; 1], [0.0; 1], [0.0; 1]);
    assert_eq!(
        okid_era(&mut a, &mut b, &mut c, 1, &y, &impulse(8), 1, 8),
        Err(SysidError::Linalg(LinalgError::Singular))
    );
}

// ── SR-UKF parameter estimation ─────────────────────────────────────

fn hydraulic(d: &mut [f64], x: &[f64], w: &[f64]) {
    d[0] = w[0] * (x[1] - x[0]).sqrt();
    d[1] = w[1] * x[1];
    d[2] = w[2] * x[2];
}

#[test]
fn srukf_id_hydraulic_model() {
    let eye = [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0];
    let re = [0.1, 0.0, 0.0, 0.0, 0.1, 0.0, 0.0, 0.0, 0.1];
    let x = [4.4_f64, 6.2, 1.0];

    let mut gen: GaussianGenerator<StdRng, f64> = GaussianGenerator::new(StdRng::seed_from_u64(3));
    let mut id = SrUkfId::new(&[0.0; 3], &eye);
    for _ in 0..100 {
        let d = [5.0 + 0.1 * gen.sample(0.0, 1.0), x[1], x[2]];
        id.step(&d, &x, &re, hydraulic).unwrap();
    }

    let w = id.params();
    assert_near(w[1], 1.0, 2e-3, "w1");
    assert_near(w[2], 1.0, 2e-3, "w2");
    let mut d = [0.0; 3];
    hydraulic(&mut d, &x, w);
    assert_near(d[0], 5.0, 0.4, "flow");
}

#[test]
fn srukf_id_forgetting_inflates_factor() {
    // Uninformative measurement: only the inflation changes Sw
    let mut id = SrUkfId::new(&[1.0_f64], &[0.5]).with_forgetting(0.25);
    id.step(&[0.0], &[], &[1e12], |d, _, _| d[0] = 0.0).unwrap();
    assert_near(id.sqrt_covariance()[0], 1.0, 1e-9, "sw");
    assert_near(id.params()[0], 1.0, 1e-12, "w");
}

#[test]
fn srukf_id_rejects_short_buffers() {
    let mut id = SrUkfId::new(&[0.0_f64, 0.0], &[1.0, 0.0, 0.0, 1.0]);
    let r = id.step(&[0.0], &[], &[1.0, 0.0, 0.0, 1.0], |d, _, w| d.copy_from_slice(w));
    assert_eq!(r, Err(SysidError::InvalidDimensions));

    let mut empty = SrUkfId::<f64>::new(&[], &[]);
    assert_eq!(
        empty.step(&[], &[], &[], |_, _, _| {}),
        Err(SysidError::InvalidDimensions)
    );
}
