use super::unscented::{sigma_points, sqrt_covariance, weighted_mean, Weights};
use super::*;
use crate::linalg::chol;
use crate::stats::GaussianGenerator;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn approx_eq(a: f64, b: f64, tol: f64) {
    assert!(
        (a - b).abs() < tol,
        "expected {} ≈ {} (diff = {}, tol = {})",
        a,
        b,
        (a - b).abs(),
        tol
    );
}

// ── Sigma-point helpers ─────────────────────────────────────────────

#[test]
fn mean_weights_sum_to_one() {
    for &(l, alpha, kappa) in &[(1, 0.1, 0.0), (3, 0.1, 0.0), (4, 1.0, -1.0), (2, 0.5, 1.0)] {
        let w = Weights::<f64>::new(l, alpha, 2.0, kappa);
        let sum: f64 = w.wm.iter().sum();
        approx_eq(sum, 1.0, 1e-9);
        assert_eq!(w.wm.len(), 2 * l + 1);
    }
}

#[test]
fn linear_propagation_recovers_covariance() {
    // S Sᵀ of F-mapped sigma points plus noise is F P Fᵀ + Q
    let p = [2.0_f64, 0.5, 0.5, 1.0];
    let f = [1.0_f64, 0.1, 0.0, 1.0];
    let q = [0.1_f64, 0.0, 0.0, 0.2];
    let mut s = [0.0; 4];
    chol(&p, &mut s, 2).unwrap();

    let w = Weights::new(2, 1.0, 2.0, 0.0);
    let mut pts = [0.0; 10];
    sigma_points(&mut pts, &[1.0, -1.0], &s, w.gamma, 2);
    let mut mapped = [0.0; 10];
    for j in 0..5 {
        mapped[j] = f[0] * pts[j] + f[1] * pts[5 + j];
        mapped[5 + j] = f[2] * pts[j] + f[3] * pts[5 + j];
    }
    let mut mean = [0.0; 2];
    weighted_mean(&mut mean, &mapped, &w.wm, 2);
    approx_eq(mean[0], 0.9, 1e-12);
    approx_eq(mean[1], -1.0, 1e-12);

    let mut sx = [0.0; 4];
    sqrt_covariance(&mut sx, &mapped, &mean, &q, &w.wc, 2).unwrap();
    assert_eq!(sx[1], 0.0);

    // F P Fᵀ + Q
    let expected = [2.0 + 0.1 + 0.01 + 0.1, 0.5 + 0.1, 0.5 + 0.1, 1.0 + 0.2];
    for i in 0..2 {
        for j in 0..2 {
            let got = sx[i * 2] * sx[j * 2] + sx[i * 2 + 1] * sx[j * 2 + 1];
            approx_eq(got, expected[i * 2 + j], 1e-10);
        }
    }
}

// ── SR-UKF ──────────────────────────────────────────────────────────

#[test]
fn srukf_scalar_linear_step() {
    // x⁺ = 0.8 x: prior spread F P Fᵀ = 0.64
    let mut ukf = SrUkf::new(&[1.0_f64], &[1.0]).with_alpha(0.5);
    ukf.step(&[1.0], &[], &[0.25], &[0.04], |next, x, _| next[0] = 0.8 * x[0])
        .unwrap();

    let k = 0.64 / (0.64 + 0.25);
    approx_eq(ukf.state()[0], 0.8 + k * 0.2, 1e-12);
    approx_eq(ukf.covariance()[0], 0.64 + 0.04 - k * k * 0.89, 1e-12);
}

#[test]
fn srukf_forwards_input() {
    let mut ukf = SrUkf::new(&[0.0_f64, 0.0], &[1.0, 0.0, 0.0, 1.0]);
    let noise = [1e-2, 0.0, 0.0, 1e-2];
    ukf.step(&[1.0, 2.0], &[1.0, 2.0], &noise, &noise, |next, x, u| {
        next[0] = x[0] + u[0];
        next[1] = x[1] + u[1];
    })
    .unwrap();
    // Prediction already equals the measurement
    approx_eq(ukf.state()[0], 1.0, 1e-9);
    approx_eq(ukf.state()[1], 2.0, 1e-9);
}

#[test]
fn srukf_factor_stays_lower_triangular() {
    let mut ukf = SrUkf::new(&[0.0_f64, 1.0, 0.0], &[1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0])
        .with_alpha(0.3)
        .with_beta(2.0);
    let eye = [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0];
    for k in 0..10 {
        let y = [0.1 * k as f64, 1.0, 0.0];
        ukf.step(&y, &[], &eye, &eye, |next, x, _| {
            next[0] = x[0] + 0.1 * x[1];
            next[1] = x[1];
            next[2] = 0.5 * x[2];
        })
        .unwrap();
    }
    let s = ukf.sqrt_covariance();
    assert_eq!(s[1], 0.0);
    assert_eq!(s[2], 0.0);
    assert_eq!(s[5], 0.0);
    let p = ukf.covariance();
    for i in 0..3 {
        assert!(p[i * 3 + i] > 0.0);
        approx_eq(p[i * 3 + (i + 1) % 3], p[((i + 1) % 3) * 3 + i], 1e-12);
    }
}

#[test]
fn srukf_tracks_nonlinear_chain() {
    // Three-state chain with a bilinear last state and sinusoidal disturbance
    let transition = |next: &mut [f64], x: &[f64], _u: &[f64]| {
        next[0] = x[1];
        next[1] = x[2];
        next[2] = 0.05 * x[0] * (x[1] + x[2]);
    };
    let eye = [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0];
    let phase = [90.0_f64, 180.0, 140.0];
    let (r, q) = (0.1, 0.01);

    let mut gen: GaussianGenerator<StdRng, f64> = GaussianGenerator::new(StdRng::seed_from_u64(7));
    let mut ukf = SrUkf::new(&[0.0, 0.0, 1.0], &eye).with_alpha(0.1).with_beta(2.0);
    let mut x = [0.0_f64; 3];
    let mut next = [0.0_f64; 3];
    let (mut est_err, mut meas_err) = (0.0, 0.0);

    for i in 0..200 {
        let mut y = [0.0; 3];
        for j in 0..3 {
            y[j] = x[j] + r * gen.sample(0.0, 1.0);
        }
        ukf.step(&y, &[], &eye, &eye, transition).unwrap();

        if i >= 100 {
            for j in 0..3 {
                est_err += (ukf.state()[j] - x[j]).abs();
                meas_err += (y[j] - x[j]).abs();
            }
        }

        transition(&mut next, &x, &[]);
        for j in 0..3 {
            x[j] = next[j] + q * 0.1 * (i as f64 + phase[j]).sin();
        }
    }
    assert!(est_err < 0.6 * meas_err, "estimate {} vs measurement {}", est_err, meas_err);
}

#[test]
fn srukf_rejects_short_buffers() {
    let mut ukf = SrUkf::new(&[0.0_f64, 0.0], &[1.0, 0.0, 0.0]);
    let eye = [1.0, 0.0, 0.0, 1.0];
    let r = ukf.step(&[0.0, 0.0], &[], &eye, &eye, |n, x, _| n.copy_from_slice(x));
    assert_eq!(r, Err(EstimateError::InvalidDimensions));

    let mut empty = SrUkf::<f64>::new(&[], &[]);
    let r = empty.step(&[], &[], &[], &[], |_, _, _| {});
    assert_eq!(r, Err(EstimateError::InvalidDimensions));
}

#[test]
fn srukf_degenerate_innovation_reported() {
    // No prior spread and no measurement noise: Sy Syᵀ collapses
    let mut ukf = SrUkf::new(&[0.0_f64, 0.0], &[0.0; 4]);
    let eye = [1.0, 0.0, 0.0, 1.0];
    let singular = [0.0, 0.0, 0.0, 0.0];
    let r = ukf.step(&[0.0, 0.0], &[], &singular, &eye, |n, x, _| n.copy_from_slice(x));
    assert!(matches!(r, Err(EstimateError::Linalg(_))));
    // Untouched on failure
    assert_eq!(ukf.state(), &[0.0, 0.0]);
}

// ── filtfilt ────────────────────────────────────────────────────────

#[test]
fn filtfilt_passes_constant() {
    let t: Vec<f64> = (0..50).map(|i| i as f64 * 0.1).collect();
    let y = vec![3.5_f64; 50];
    let mut out = vec![0.0; 50];
    filtfilt(&mut out, &y, &t, 0.7).unwrap();
    for &v in &out {
        approx_eq(v, 3.5, 1e-12);
    }
}

#[test]
fn filtfilt_attenuates_ripple_without_lag() {
    let t: Vec<f64> = (0..200).map(|i| i as f64 * 0.01).collect();
    let y: Vec<f64> = (0..200)
        .map(|i| t[i] + if i % 2 == 0 { 0.05 } else { -0.05 })
        .collect();
    let mut out = vec![0.0; 200];
    filtfilt(&mut out, &y, &t, 0.1).unwrap();

    // Interior points sit on the ramp; a single forward pass would lag by ~K
    for i in 50..150 {
        approx_eq(out[i], t[i], 5e-3);
    }
}

#[test]
fn filtfilt_single_sample_rejected() {
    let mut out = [0.0_f32; 1];
    assert_eq!(
        filtfilt(&mut out, &[1.0], &[0.0], 1.0),
        Err(EstimateError::InvalidDimensions)
    );
    let mut out = [0.0_f32; 1];
    assert_eq!(
        filtfilt(&mut out, &[1.0, 2.0], &[0.0, 1.0], 1.0),
        Err(EstimateError::InvalidDimensions)
    );
}

// ── Monte Carlo histogram ───────────────────────────────────────────

#[test]
fn mcs_finds_modes_of_gaussian_vector() {
    const ROWS: usize = 3;
    const COLS: usize = 200;
    let means = [20.0_f64, -4.0, 6.0];
    let mut gen: GaussianGenerator<StdRng, f64> = GaussianGenerator::new(StdRng::seed_from_u64(21));
    let mut p = vec![0.0_f64; 2 * ROWS * COLS];
    mcs_clean(&mut p, COLS, ROWS).unwrap();

    let mut x = [0.0; ROWS];
    for _ in 0..50_000 {
        for (xi, &mu) in x.iter_mut().zip(means.iter()) {
            *xi = gen.sample(mu, 1.0);
        }
        mcs_collect(&mut p, COLS, &x, ROWS, 5.0).unwrap();
    }
    mcs_estimate(&p, COLS, &mut x, ROWS, 5.0).unwrap();
    for (&est, &mu) in x.iter().zip(means.iter()) {
        approx_eq(est, mu, 0.5);
    }

    mcs_clean(&mut p, COLS, ROWS).unwrap();
    assert!(p.iter().all(|&v| v == 0.0));
}

#[test]
fn mcs_drops_samples_outside_histogram() {
    let mut p = [0.0_f32; 2 * 10];
    mcs_collect(&mut p, 10, &[1.5], 1, 10.0).unwrap();
    mcs_collect(&mut p, 10, &[-3.0], 1, 10.0).unwrap();
    mcs_collect(&mut p, 10, &[f32::NAN], 1, 10.0).unwrap();
    assert!(p.iter().all(|&v| v == 0.0));

    mcs_collect(&mut p, 10, &[-0.3], 1, 10.0).unwrap();
    assert_eq!(p[10 + 3], 1.0);
    let mut x = [9.0_f32];
    mcs_estimate(&p, 10, &mut x, 1, 10.0).unwrap();
    assert!((x[0] + 0.3).abs() < 1e-6);
}

#[test]
fn mcs_empty_histogram_estimates_zero() {
    let p = [0.0_f64; 2 * 2 * 8];
    let mut x = [1.0, -1.0];
    mcs_estimate(&p, 8, &mut x, 2, 4.0).unwrap();
    assert_eq!(x, [0.0, 0.0]);
}

#[test]
fn mcs_rejects_bad_layout() {
    let mut p = [0.0_f64; 10];
    assert_eq!(
        mcs_collect(&mut p, 10, &[1.0], 1, 1.0),
        Err(EstimateError::InvalidDimensions)
    );
    let mut p = [0.0_f64; 20];
    assert_eq!(
        mcs_collect(&mut p, 10, &[1.0], 1, 0.0),
        Err(EstimateError::InvalidDimensions)
    );
    assert_eq!(mcs_clean(&mut p, 0, 1), Err(EstimateError::InvalidDimensions));
}
