//! Library of cubic spline interpolation in Hermite form.
//! A spline is fitted once over samples with strictly increasing x values and
//! then answers value, first derivative and definite integral queries.
//! Queries outside of the fitted range return zero instead of extrapolating.
//!
//! # Example
//! ```
//! use spline_interp::Spline;
//! use assert_approx_eq::assert_approx_eq;
//!
//! let x = vec![0.0_f64, 1.0, 2.0];
//! let y = vec![0.0, 1.0, 0.0];
//! let spline = Spline::new(x, y).unwrap();
//!
//! assert_approx_eq!(0.6875, spline.evaluate(0.5), 1e-12);
//! assert_approx_eq!(1.25, spline.total_integral(), 1e-12);
//! assert_approx_eq!(0.0, spline.evaluate(3.0), 1e-12);
//! ```

mod spline;
mod tridiagonal;

pub use spline::Spline;
