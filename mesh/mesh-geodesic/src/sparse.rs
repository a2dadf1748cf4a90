//! Sparse matrix assembly and the conjugate gradient solver.
//!
//! Matrices are assembled from `(row, col, value)` triplets in COO form and
//! converted to CSR; duplicate entries are summed by the conversion, which
//! is how per-face contributions accumulate.

use nalgebra::DVector;
use nalgebra_sparse::{CooMatrix, CsrMatrix};
use tracing::debug;

use crate::error::{GeodesicError, GeodesicResult};

/// Build a CSR matrix from triplets, summing duplicates.
pub fn from_triplets(
    nrows: usize,
    ncols: usize,
    triplets: impl IntoIterator<Item = (usize, usize, f64)>,
) -> CsrMatrix<f64> {
    let mut coo = CooMatrix::new(nrows, ncols);
    for (row, col, val) in triplets {
        if val != 0.0 {
            coo.push(row, col, val);
        }
    }
    CsrMatrix::from(&coo)
}

/// Compute `m * v`.
pub fn mul_vec(m: &CsrMatrix<f64>, v: &DVector<f64>) -> DVector<f64> {
    let mut result = DVector::zeros(m.nrows());
    for (row_idx, row) in m.row_iter().enumerate() {
        let mut sum = 0.0;
        for (&col_idx, &val) in row.col_indices().iter().zip(row.values()) {
            sum += val * v[col_idx];
        }
        result[row_idx] = sum;
    }
    result
}

/// Diagonal of a square matrix; absent entries are zero.
pub fn diagonal(m: &CsrMatrix<f64>) -> DVector<f64> {
    let mut diag = DVector::zeros(m.nrows());
    for (row_idx, row) in m.row_iter().enumerate() {
        for (&col_idx, &val) in row.col_indices().iter().zip(row.values()) {
            if col_idx == row_idx {
                diag[row_idx] += val;
            }
        }
    }
    diag
}

/// Linear system settings for [`conjugate_gradient`].
#[derive(Debug, Clone, Copy)]
pub struct CgSettings {
    /// Relative residual `|r| / |b|` to reach.
    pub tolerance: f64,
    /// Iteration cap.
    pub max_iterations: usize,
    /// Name reported in errors and logs.
    pub stage: &'static str,
}

/// Solve `a x = b` for symmetric positive definite `a`.
///
/// Jacobi (diagonal) preconditioned conjugate gradient starting from zero.
///
/// # Errors
///
/// - [`GeodesicError::NonFinite`] when `b` or an iterate is not finite
/// - [`GeodesicError::SolverDiverged`] when the tolerance is not reached
///   within the iteration cap, or the matrix is found not to be positive
///   definite
pub fn conjugate_gradient(
    a: &CsrMatrix<f64>,
    b: &DVector<f64>,
    settings: CgSettings,
) -> GeodesicResult<DVector<f64>> {
    let n = b.len();
    if b.iter().any(|v| !v.is_finite()) {
        return Err(GeodesicError::NonFinite {
            context: settings.stage,
        });
    }

    let b_norm = b.norm();
    let mut x = DVector::zeros(n);
    if b_norm == 0.0 {
        return Ok(x);
    }

    let inv_diag = diagonal(a).map(|d| if d.abs() > f64::MIN_POSITIVE { d.recip() } else { 1.0 });

    let mut r = b.clone();
    let mut z = r.component_mul(&inv_diag);
    let mut p = z.clone();
    let mut rz = r.dot(&z);
    let mut residual = 1.0;

    for iteration in 0..settings.max_iterations {
        residual = r.norm() / b_norm;
        if !residual.is_finite() {
            return Err(GeodesicError::NonFinite {
                context: settings.stage,
            });
        }
        if residual <= settings.tolerance {
            debug!(stage = settings.stage, iteration, residual, "Conjugate gradient converged");
            return Ok(x);
        }

        let ap = mul_vec(a, &p);
        let pap = p.dot(&ap);
        if pap <= 0.0 {
            break;
        }
        let alpha = rz / pap;

        x.axpy(alpha, &p, 1.0);
        r.axpy(-alpha, &ap, 1.0);

        z = r.component_mul(&inv_diag);
        let rz_new = r.dot(&z);
        let beta = rz_new / rz;
        rz = rz_new;

        p.axpy(1.0, &z, beta);
    }

    residual = r.norm() / b_norm;
    if residual <= settings.tolerance {
        return Ok(x);
    }

    Err(GeodesicError::SolverDiverged {
        stage: settings.stage,
        iterations: settings.max_iterations,
        residual,
    })
}
