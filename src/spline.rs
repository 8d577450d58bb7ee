use std::{error::Error, fmt::Display, mem};

use nalgebra::{convert, RealField};

use crate::tridiagonal;

/// Piecewise cubic curve interpolating samples with strictly increasing x
/// values.
///
/// Fitting solves a tridiagonal system for the slope of the curve at every
/// sample and stores each segment in Hermite form. All queries take `&self`,
/// so a fitted spline can be shared between threads; re-fitting takes
/// `&mut self`.
pub struct Spline<T> {
    x: Vec<T>,
    y: Vec<T>,
    a: Vec<T>,
    b: Vec<T>,
}

impl<T: RealField + Copy> Spline<T> {
    /// Creates a spline interpolating the `(x, y)` samples.
    ///
    /// The resulting curve passes through every sample exactly and has a
    /// continuous first derivative.
    ///
    /// # Example
    /// ```
    /// use spline_interp::Spline;
    /// use assert_approx_eq::assert_approx_eq;
    ///
    /// let spline = Spline::new(vec![0.0_f64, 1.0, 2.0], vec![0.0, 1.0, 0.0]).unwrap();
    ///
    /// assert_approx_eq!(0.6875, spline.evaluate(0.5), 1e-12);
    /// assert_approx_eq!(0.0, spline.evaluate(2.5), 1e-12);
    /// ```
    ///
    /// # Errors
    /// Returns error if `x` and `y` differ in length, hold fewer than 2
    /// samples or if `x` values are not strictly increasing.
    /// ```
    /// use spline_interp::Spline;
    ///
    /// let spline = Spline::new(vec![0.0, 1.0, 1.0], vec![2.0, 0.0, 1.0]);
    /// assert!(spline.is_err());
    /// ```
    pub fn new(x: Vec<T>, y: Vec<T>) -> Result<Self, Box<dyn Error>> {
        let mut spline = Spline {
            x: Vec::new(),
            y: Vec::new(),
            a: Vec::new(),
            b: Vec::new(),
        };

        spline.fit(x, y)?;
        return Ok(spline);
    }

    /// Re-fits the spline to a new set of samples.
    ///
    /// Validation happens before anything is replaced, so a failed call
    /// leaves the previous curve untouched.
    ///
    /// # Example
    /// ```
    /// use spline_interp::Spline;
    /// use assert_approx_eq::assert_approx_eq;
    ///
    /// let mut spline = Spline::new(vec![0.0_f64, 1.0], vec![0.0, 2.0]).unwrap();
    /// assert_approx_eq!(1.0, spline.evaluate(0.5), 1e-12);
    ///
    /// spline.fit(vec![0.0, 2.0], vec![4.0, 0.0]).unwrap();
    /// assert_approx_eq!(2.0, spline.evaluate(1.0), 1e-12);
    ///
    /// assert!(spline.fit(vec![1.0, 1.0], vec![0.0, 0.0]).is_err());
    /// assert_approx_eq!(2.0, spline.evaluate(1.0), 1e-12);
    /// ```
    ///
    /// # Errors
    /// Fails under the same conditions as [`new`](Spline::new).
    pub fn fit(&mut self, x: Vec<T>, y: Vec<T>) -> Result<(), Box<dyn Error>> {
        Self::check_samples(&x, &y)?;

        self.x = x;
        self.y = y;
        self.compute_coefficients();
        Ok(())
    }

    /// Returns the value of the curve at `x`.
    ///
    /// `x` outside of `[min_x, max_x]` yields exactly zero; the curve is
    /// never extrapolated.
    pub fn evaluate(&self, x: T) -> T {
        if self.out_of_domain(x) {
            return convert(0.0);
        }

        let one: T = convert(1.0);
        let i = self.locate(x);
        let t = (x - self.x[i - 1]) / (self.x[i] - self.x[i - 1]);

        (one - t) * self.y[i - 1]
            + t * self.y[i]
            + t * (one - t) * (self.a[i - 1] * (one - t) + self.b[i - 1] * t)
    }

    /// Returns the first derivative of the curve at `x`.
    ///
    /// Follows the same domain policy as [`evaluate`](Spline::evaluate):
    /// outside of `[min_x, max_x]` the result is exactly zero.
    pub fn derivative(&self, x: T) -> T {
        if self.out_of_domain(x) {
            return convert(0.0);
        }

        let one: T = convert(1.0);
        let two: T = convert(2.0);
        let i = self.locate(x);
        let h = self.x[i] - self.x[i - 1];
        let t = (x - self.x[i - 1]) / h;
        let a = self.a[i - 1];
        let b = self.b[i - 1];

        (self.y[i] - self.y[i - 1]) / h
            + (one - two * t) * (a * (one - t) + b * t) / h
            + t * (one - t) * (b - a) / h
    }

    /// Returns the definite integral of the curve between `lower` and
    /// `upper`.
    ///
    /// The bounds may be given in either order; a reversed range negates the
    /// result. Both bounds are clamped into `[min_x, max_x]`, so anything
    /// outside of the curve domain contributes nothing.
    pub fn integral(&self, lower: T, upper: T) -> T {
        let one: T = convert(1.0);

        let (mut lo, mut hi) = (lower, upper);
        let mut sign = one;
        if lo > hi {
            mem::swap(&mut lo, &mut hi);
            sign = -one;
        }

        let lo = self.clamp_to_domain(lo);
        let hi = self.clamp_to_domain(hi);

        let li = self.locate(lo);
        let ui = self.locate(hi);

        let mut area: T = convert(0.0);

        // whole segments strictly between the two bound segments
        for i in li..(ui - 1) {
            area += self.segment_area(i);
        }

        let t_hi = (hi - self.x[ui - 1]) / (self.x[ui] - self.x[ui - 1]);
        area += self.partial_segment_area(ui - 1, t_hi);

        let t_lo = (lo - self.x[li - 1]) / (self.x[li] - self.x[li - 1]);
        area -= self.partial_segment_area(li - 1, t_lo);

        if li != ui {
            // lower bound's segment was only subtracted, add it back whole
            area += self.segment_area(li - 1);
        }

        sign * area
    }

    /// Returns the integral of the curve over its whole domain.
    pub fn total_integral(&self) -> T {
        self.integral(self.x[0], self.x[self.x.len() - 1])
    }

    /// Returns the smallest x value covered by the curve.
    pub fn min_x(&self) -> T {
        self.x[0]
    }

    /// Returns the largest x value covered by the curve.
    pub fn max_x(&self) -> T {
        self.x[self.x.len() - 1]
    }

    fn check_samples(x: &[T], y: &[T]) -> Result<(), Box<dyn Error>> {
        if x.len() != y.len() {
            return Err(Box::new(SplineError(
                "x and y vectors must have equal lengths".to_string(),
            )));
        }

        if x.len() < 2 {
            return Err(Box::new(SplineError(
                "Spline must have at least 2 samples".to_string(),
            )));
        }

        // a NaN abscissa fails the comparison and is rejected as well
        if x.windows(2).any(|w| !(w[0] < w[1])) {
            return Err(Box::new(SplineError(
                "Sample x values must be strictly increasing".to_string(),
            )));
        }

        Ok(())
    }

    fn compute_coefficients(&mut self) {
        let n = self.x.len();
        let zero: T = convert(0.0);
        let one: T = convert(1.0);
        let two: T = convert(2.0);
        let three: T = convert(3.0);

        let mut sub = Vec::with_capacity(n);
        let mut diag = Vec::with_capacity(n);
        let mut sup = Vec::with_capacity(n);
        let mut rhs = Vec::with_capacity(n);

        // slope system with natural end conditions; its diagonal dominance
        // satisfies the solver precondition
        for i in 0..n {
            if i == 0 {
                let h = self.x[1] - self.x[0];
                sub.push(zero);
                diag.push(two / h);
                sup.push(one / h);
                rhs.push(three * (self.y[1] - self.y[0]) / h.powi(2));
            } else if i == n - 1 {
                let h = self.x[i] - self.x[i - 1];
                sub.push(one / h);
                diag.push(two / h);
                sup.push(zero);
                rhs.push(three * (self.y[i] - self.y[i - 1]) / h.powi(2));
            } else {
                let h_lo = self.x[i] - self.x[i - 1];
                let h_hi = self.x[i + 1] - self.x[i];
                sub.push(one / h_lo);
                diag.push(two / h_lo + two / h_hi);
                sup.push(one / h_hi);
                rhs.push(
                    three
                        * ((self.y[i] - self.y[i - 1]) / h_lo.powi(2)
                            + (self.y[i + 1] - self.y[i]) / h_hi.powi(2)),
                );
            }
        }

        let slopes = tridiagonal::solve(&sub, &diag, &sup, &rhs);

        self.a = Vec::with_capacity(n - 1);
        self.b = Vec::with_capacity(n - 1);

        for i in 0..n - 1 {
            let h = self.x[i + 1] - self.x[i];
            let dy = self.y[i + 1] - self.y[i];
            self.a.push(slopes[i] * h - dy);
            self.b.push(dy - slopes[i + 1] * h);
        }
    }

    fn out_of_domain(&self, x: T) -> bool {
        x < self.x[0] || x > self.x[self.x.len() - 1]
    }

    /// Pulls `v` into `[min_x, max_x]`. A NaN value fails both comparisons
    /// and passes through unchanged.
    fn clamp_to_domain(&self, v: T) -> T {
        if v < self.x[0] {
            return self.x[0];
        }
        if v > self.x[self.x.len() - 1] {
            return self.x[self.x.len() - 1];
        }
        v
    }

    /// Smallest index `i` in `[1, n-1]` with `x[i] >= x`, the right knot of
    /// the segment holding `x`. Only valid for in-domain arguments.
    fn locate(&self, x: T) -> usize {
        let size = self.x.len();
        let mut min = 0;
        let mut max = size - 1;

        while max - min > 1 {
            let mid = (min + max) / 2;
            if x <= self.x[mid] {
                max = mid;
            } else {
                min = mid;
            }
        }
        return max;
    }

    fn segment_area(&self, i: usize) -> T {
        let half: T = convert(0.5);
        let twelfth: T = convert(1.0 / 12.0);

        let h = self.x[i + 1] - self.x[i];
        h * (half * (self.y[i] + self.y[i + 1]) + twelfth * (self.a[i] + self.b[i]))
    }

    /// Area under segment `i` from its left knot up to local coordinate `t`,
    /// the closed-form antiderivative of the Hermite blend.
    fn partial_segment_area(&self, i: usize, t: T) -> T {
        let half: T = convert(0.5);
        let third: T = convert(1.0 / 3.0);
        let quarter: T = convert(0.25);
        let two_thirds: T = convert(2.0 / 3.0);

        let h = self.x[i + 1] - self.x[i];
        let t2 = t * t;
        let t3 = t2 * t;
        let t4 = t3 * t;

        h * ((t - half * t2) * self.y[i]
            + half * t2 * self.y[i + 1]
            + self.a[i] * (half * t2 - two_thirds * t3 + quarter * t4)
            + self.b[i] * (third * t3 - quarter * t4))
    }
}

#[derive(Debug)]
struct SplineError(String);

impl Display for SplineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error in Spline: {}", self.0)
    }
}

impl Error for SplineError {}
