//! Dense matrix kernels shared by the conversion engines.

use nalgebra::DMatrix;

use crate::{error::Error, Float};

/// 8-point Gauss–Legendre nodes on [0, 1].
const GL_NODES: [Float; 8] = [
    0.019855071751231856,
    0.101666761293186630,
    0.237233795041835510,
    0.408282678752175100,
    0.591717321247824900,
    0.762766204958164500,
    0.898333238706813400,
    0.980144928248768100,
];

/// Matching Gauss–Legendre weights on [0, 1].
const GL_WEIGHTS: [Float; 8] = [
    0.050614268145188130,
    0.111190517226687230,
    0.156853322938943650,
    0.181341891689181000,
    0.181341891689181000,
    0.156853322938943650,
    0.111190517226687230,
    0.050614268145188130,
];

/// Principal matrix square root by the Denman–Beavers iteration.
///
/// Converges quadratically for matrices with no eigenvalues on the closed
/// negative real axis, which is the relevant case for zero-order-hold
/// transition matrices.
pub(crate) fn sqrtm(a: &DMatrix<Float>) -> Result<DMatrix<Float>, Error> {
    let n = a.nrows();
    let mut y = a.clone();
    let mut z = DMatrix::identity(n, n);
    let tol = Float::EPSILON * 16.0;
    for _ in 0..64 {
        let y_inv = y
            .clone()
            .try_inverse()
            .ok_or_else(|| Error::Numerical("singular iterate in matrix square root".into()))?;
        let z_inv = z
            .clone()
            .try_inverse()
            .ok_or_else(|| Error::Numerical("singular iterate in matrix square root".into()))?;
        let y_next = (&y + z_inv) * 0.5;
        let z_next = (&z + y_inv) * 0.5;
        let delta = (&y_next - &y).norm();
        y = y_next;
        z = z_next;
        if delta <= tol * y.norm() {
            return Ok(y);
        }
    }
    // The iteration stagnated; accept the iterate only if it is a root.
    let residual = (&y * &y - a).norm();
    if residual <= tol.sqrt() * a.norm().max(1.0) {
        Ok(y)
    } else {
        Err(Error::Numerical("matrix square root did not converge".into()))
    }
}

/// Principal matrix logarithm by inverse scaling-and-squaring.
///
/// Square roots are taken until the iterate T is within 1/4 of the identity
/// in Frobenius norm, `log(I + X)` is evaluated with the 8-point
/// Gauss–Legendre form `sum_i w_i X (I + x_i X)^{-1}`, and the result is
/// scaled back by `2^k`.
pub(crate) fn logm(a: &DMatrix<Float>) -> Result<DMatrix<Float>, Error> {
    let n = a.nrows();
    let eye = DMatrix::identity(n, n);
    let mut t = a.clone();
    let mut k = 0u32;
    while (&t - &eye).norm() > 0.25 {
        if k >= 40 {
            return Err(Error::Numerical("matrix logarithm did not converge".into()));
        }
        t = sqrtm(&t)?;
        k += 1;
    }
    let x = &t - &eye;
    let mut log_t = DMatrix::zeros(n, n);
    for (node, weight) in GL_NODES.iter().zip(GL_WEIGHTS.iter()) {
        let m = &eye + &x * *node;
        let term = m
            .lu()
            .solve(&x)
            .ok_or_else(|| Error::Numerical("singular resolvent in matrix logarithm".into()))?;
        log_t += term * *weight;
    }
    Ok(log_t * ((1u64 << k) as Float))
}
