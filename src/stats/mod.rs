//! Random signal generation and small descriptive statistics.
//!
//! - [`GaussianGenerator`]: normally distributed samples from any
//!   [`rand::RngCore`], by the polar Box-Muller method
//! - [`mean`], [`stddev`]: sample mean and (n − 1) standard deviation
//! - [`sign`], [`saturation`], [`constrain`]: scalar and element-wise clamps
//!
//! ```
//! use ctrlkit::stats::{mean, stddev};
//!
//! let x = [2.0_f64, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
//! assert_eq!(mean(&x), 5.0);
//! assert!((stddev(&x) - 2.138089935).abs() < 1e-9);
//! ```

mod descriptive;
mod gaussian;


pub use descriptive::{constrain, mean, saturation, sign, stddev};
pub use gaussian::GaussianGenerator;
