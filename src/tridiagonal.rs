use nalgebra::RealField;

/// Solves a tridiagonal linear system with the Thomas algorithm.
///
/// `sub`, `diag`, `sup` and `rhs` each hold one entry per matrix row, so
/// `sub[0]` and `sup[n-1]` lie outside the matrix and are expected to be zero.
/// The sweep does not pivot: the system must be diagonally dominant or
/// otherwise guarantee nonzero pivots, a near-zero pivot silently corrupts
/// the solution.
pub fn solve<T: RealField + Copy>(sub: &[T], diag: &[T], sup: &[T], rhs: &[T]) -> Vec<T> {
    let n = diag.len();
    debug_assert_eq!(n, sub.len());
    debug_assert_eq!(n, sup.len());
    debug_assert_eq!(n, rhs.len());

    let mut c_star = Vec::with_capacity(n);
    let mut d_star = Vec::with_capacity(n);

    c_star.push(sup[0] / diag[0]);
    d_star.push(rhs[0] / diag[0]);

    for i in 1..n {
        let pivot = diag[i] - sub[i] * c_star[i - 1];
        c_star.push(sup[i] / pivot);
        d_star.push((rhs[i] - sub[i] * d_star[i - 1]) / pivot);
    }

    // back substitution, in place on d_star
    for i in (0..n - 1).rev() {
        d_star[i] = d_star[i] - c_star[i] * d_star[i + 1];
    }

    d_star
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;

    use super::*;

    #[test]
    fn single_row() {
        let solution = solve(&[0.0_f64], &[4.0], &[0.0], &[8.0]);
        assert_eq!(1, solution.len());
        assert_approx_eq!(solution[0], 2.0, 1e-12);
    }

    #[test]
    fn identity_system() {
        let eps = 1e-12;

        let sub = vec![0.0_f64, 0.0, 0.0];
        let diag = vec![1.0, 1.0, 1.0];
        let sup = vec![0.0, 0.0, 0.0];
        let rhs = vec![1.0, -2.0, 3.0];

        let solution = solve(&sub, &diag, &sup, &rhs);

        assert_approx_eq!(solution[0], 1.0, eps);
        assert_approx_eq!(solution[1], -2.0, eps);
        assert_approx_eq!(solution[2], 3.0, eps);
    }

    #[test]
    fn laplacian_system() {
        // rows [-1, 2, -1] with rhs [1, 0, 0, 1] have the constant solution
        let eps = 1e-12;

        let sub = vec![0.0_f64, -1.0, -1.0, -1.0];
        let diag = vec![2.0, 2.0, 2.0, 2.0];
        let sup = vec![-1.0, -1.0, -1.0, 0.0];
        let rhs = vec![1.0, 0.0, 0.0, 1.0];

        let solution = solve(&sub, &diag, &sup, &rhs);

        for value in solution {
            assert_approx_eq!(value, 1.0, eps);
        }
    }

    #[test]
    fn uneven_dominant_system_residual() {
        let eps = 1e-12;

        let sub = vec![0.0_f64, 1.0, 2.0, 0.5];
        let diag = vec![4.0, 5.0, 6.5, 3.0];
        let sup = vec![2.0, 1.5, 1.0, 0.0];
        let rhs = vec![6.0, 7.5, -9.0, 3.5];

        let solution = solve(&sub, &diag, &sup, &rhs);

        let n = diag.len();
        for i in 0..n {
            let mut row = diag[i] * solution[i];
            if i > 0 {
                row += sub[i] * solution[i - 1];
            }
            if i < n - 1 {
                row += sup[i] * solution[i + 1];
            }
            assert_approx_eq!(row, rhs[i], eps);
        }
    }
}
