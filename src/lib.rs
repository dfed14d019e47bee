//! # ctrlkit
//!
//! Dense linear algebra, control, estimation and system identification for
//! small real-valued systems, no-std compatible (with `alloc`).
//!
//! Matrices are flat row-major slices with explicit dimensions: element
//! `(i, j)` of an `r × c` matrix is `a[i * c + j]`. Every routine works on
//! caller buffers, checks their lengths against the dimensions it is given
//! and reports problems through a `Result` instead of panicking.
//!
//! ## Quick start
//!
//! ```
//! use ctrlkit::linalg::linsolve_lup;
//!
//! // Solve A x = b
//! let a = [2.0_f64, 1.0, -1.0, -3.0, -1.0, 2.0, -2.0, 1.0, 2.0];
//! let b = [8.0, -11.0, -3.0];
//! let mut x = [0.0; 3];
//! linsolve_lup(&a, &mut x, &b, 3).unwrap();
//! assert!((x[0] - 2.0).abs() < 1e-12);
//! assert!((x[1] - 3.0).abs() < 1e-12);
//! assert!((x[2] + 1.0).abs() < 1e-12);
//! ```
//!
//! ## Modules
//!
//! - [`matrix`]: element-wise arithmetic, multiplication, transpose, block
//!   copies (`cat`, `cut`, `insert`), norms and sums.
//! - [`linalg`]: LU with partial pivoting, Cholesky with rank-one
//!   update/downdate, Householder QR, SVD (one-sided Jacobi and
//!   Golub-Reinsch), pseudo-inverse, balancing, Hessenberg reduction, real
//!   eigenvalues, symmetric eigen-decomposition, matrix exponential,
//!   discrete Lyapunov equation, block Hankel construction and a damped
//!   solver for square nonlinear systems.
//! - [`control`]: Kalman observer step, continuous-to-discrete conversion,
//!   LQI with anti-windup, linear-programming MPC, MRAC, a discrete
//!   stability test and polynomial-to-state-space conversion.
//! - [`optim`]: dense simplex linear programming.
//! - [`estimate`]: square-root unscented Kalman filter, zero-phase
//!   smoothing and a Monte Carlo histogram estimator.
//! - [`sysid`]: recursive least squares, OKID/ERA and square-root UKF
//!   parameter estimation.
//! - [`stats`]: Gaussian random generation and small descriptive
//!   statistics.
//! - [`traits`]: [`Scalar`] and [`FloatScalar`] element bounds.
//!
//! ## Logging
//!
//! Numerical fall-backs and failures are reported through the [`log`]
//! facade (`warn!` for patched pivots, iteration limits and unbounded
//! programs; `debug!` for expected events). No logger is installed by the
//! crate.
//!
//! ## Cargo features
//!
//! | Feature   | Default | Description |
//! |-----------|---------|-------------|
//! | `std`     | yes     | Hardware float via std, `std::error::Error` impls |
//! | `complex` | no      | [`linalg::eig_complex`] returning `Complex<T>` via `num-complex` |
//! | `all`     | no      | `std` + `complex` |
//!
//! Without `std` the crate is `no_std` and needs a global allocator for
//! its scratch buffers; float functions then come from `libm`.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod control;
pub mod estimate;
pub mod linalg;
pub mod matrix;
pub mod optim;
pub mod stats;
pub mod sysid;
pub mod traits;

pub use traits::{FloatScalar, Scalar};

#[cfg(feature = "complex")]
pub use num_complex::Complex;
