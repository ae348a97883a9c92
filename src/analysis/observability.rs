//! Observability diagnostics for the linearized arterial model.
//!
//! With arterial pressure as the sole output the observability matrix is
//! O = [C; C A]. Rank deficiency is a finding about the model, not a
//! software fault, so it is reported with the computed rank and tolerance
//! rather than raised.

use nalgebra::{Matrix2, Matrix3, Vector3, SVD};

use super::LinearModel;

/// Summary of the observability check for (A, C).
#[derive(Debug, Clone)]
pub struct ObservabilityReport {
    /// The stacked observability matrix [C; C A].
    pub matrix: Matrix2<f64>,
    /// Numerical rank from the singular values.
    pub rank: usize,
    /// State dimension the rank is compared against.
    pub state_dim: usize,
    /// Determinant (the matrix is square for a single output).
    pub determinant: f64,
    /// 2-norm condition number (infinite when singular).
    pub condition: f64,
    /// Singular-value cutoff used for the rank decision.
    pub tolerance: f64,
    /// Continuous-time observability Gramian, when the Lyapunov equation
    /// is solvable (the state matrix is Hurwitz for any valid parameter
    /// set, so this is only `None` for degenerate inputs).
    pub gramian: Option<Matrix2<f64>>,
    /// Eigenvalues of the Gramian, sorted descending. Their spread grades
    /// *how* observable each direction is, beyond the binary rank.
    pub gramian_eigenvalues: Option<[f64; 2]>,
}

impl ObservabilityReport {
    /// True when the rank reaches the full state dimension.
    pub fn is_observable(&self) -> bool {
        self.rank == self.state_dim
    }
}

/// Build the observability matrix [C; C A].
pub fn observability_matrix(model: &LinearModel) -> Matrix2<f64> {
    let c = model.c;
    let ca = model.c * model.a;
    Matrix2::from_rows(&[c, ca])
}

/// Continuous-time observability Gramian: the symmetric solution of
///
///   A^T W + W A + C^T C = 0
///
/// which exists (unique, positive semidefinite) when A is Hurwitz. For a
/// 2x2 state matrix the Lyapunov equation is a linear 3x3 system in the
/// entries (w11, w12, w22); returns `None` when that system is singular.
pub fn observability_gramian(model: &LinearModel) -> Option<Matrix2<f64>> {
    let a = model.a;
    let q = model.c.transpose() * model.c;

    let lhs = Matrix3::new(
        2.0 * a[(0, 0)],
        2.0 * a[(1, 0)],
        0.0,
        a[(0, 1)],
        a[(0, 0)] + a[(1, 1)],
        a[(1, 0)],
        0.0,
        2.0 * a[(0, 1)],
        2.0 * a[(1, 1)],
    );
    let rhs = Vector3::new(-q[(0, 0)], -q[(0, 1)], -q[(1, 1)]);

    let w = lhs.lu().solve(&rhs)?;
    Some(Matrix2::new(w[0], w[1], w[1], w[2]))
}

/// Compute rank, determinant and condition number of the observability
/// matrix by SVD.
///
/// `tolerance` is the singular-value cutoff; when `None`, the standard
/// `dim * sigma_max * f64::EPSILON` is used.
pub fn observability(model: &LinearModel, tolerance: Option<f64>) -> ObservabilityReport {
    let matrix = observability_matrix(model);
    let svd = SVD::new(matrix, false, false);
    let sigma = svd.singular_values;
    let sigma_max = sigma.iter().cloned().fold(0.0_f64, f64::max);
    let sigma_min = sigma.iter().cloned().fold(f64::MAX, f64::min);

    let tol = tolerance.unwrap_or(2.0 * sigma_max * f64::EPSILON);
    let rank = sigma.iter().filter(|&&s| s > tol).count();
    let condition = if sigma_min > 0.0 {
        sigma_max / sigma_min
    } else {
        f64::INFINITY
    };

    let gramian = observability_gramian(model);
    let gramian_eigenvalues = gramian.map(|w| {
        let eig = w.symmetric_eigenvalues();
        [eig[0].max(eig[1]), eig[0].min(eig[1])]
    });

    ObservabilityReport {
        matrix,
        rank,
        state_dim: 2,
        determinant: matrix.determinant(),
        condition,
        tolerance: tol,
        gramian,
        gramian_eigenvalues,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::OperatingPoint;
    use crate::model::StateVector;
    use crate::params::healthy;
    use approx::assert_relative_eq;

    fn model_for(params: &crate::ParameterSet) -> LinearModel {
        let op = OperatingPoint {
            state: StateVector::new(10.0, 95.0, 85.0),
            q_aortic: 85.0,
        };
        LinearModel::build(&op, params).unwrap()
    }

    #[test]
    fn observability_matrix_stacks_c_and_ca() {
        let p = healthy();
        let m = model_for(&p);
        let o = observability_matrix(&m);
        // Row 0 is C = [1, 0]; row 1 is the first row of A.
        assert_eq!(o[(0, 0)], 1.0);
        assert_eq!(o[(0, 1)], 0.0);
        assert_relative_eq!(o[(1, 1)], -1.0 / p.c_art, epsilon = 1e-12);
    }

    #[test]
    fn healthy_arterial_model_is_fully_observable() {
        let p = healthy();
        let report = observability(&model_for(&p), None);
        assert_eq!(report.rank, 2);
        assert!(report.is_observable());
        assert!(report.determinant.abs() > 0.0);
        assert!(report.condition.is_finite());
    }

    #[test]
    fn gramian_solves_the_lyapunov_equation() {
        let p = healthy();
        let m = model_for(&p);
        let w = observability_gramian(&m).unwrap();
        let residual = m.a.transpose() * w + w * m.a + m.c.transpose() * m.c;
        let scale = w.norm() * m.a.norm();
        assert!(residual.norm() < 1e-12 * scale, "residual {residual}");
    }

    #[test]
    fn healthy_gramian_is_positive_definite() {
        let p = healthy();
        let report = observability(&model_for(&p), None);
        let eigs = report.gramian_eigenvalues.unwrap();
        assert!(eigs[0] >= eigs[1], "eigenvalues not sorted: {eigs:?}");
        assert!(eigs[1] > 0.0, "Gramian not positive definite: {eigs:?}");
    }

    #[test]
    fn coarse_tolerance_reports_deficiency_as_data() {
        let p = healthy();
        // A cutoff above every singular value forces rank 0; the report
        // carries the finding instead of erroring.
        let report = observability(&model_for(&p), Some(f64::MAX));
        assert_eq!(report.rank, 0);
        assert!(!report.is_observable());
    }

    #[test]
    fn zero_inertance_is_a_configuration_error_upstream() {
        let mut p = healthy();
        p.i_art = 0.0;
        let op = OperatingPoint {
            state: StateVector::new(10.0, 95.0, 85.0),
            q_aortic: 85.0,
        };
        assert!(LinearModel::build(&op, &p).is_err());
    }
}
