//! System norms: Gramians, Hankel singular values, and the worst-case L1
//! response.

use nalgebra::{DMatrix, DVector};

use crate::{
    discrete::{cont2discrete, Method},
    error::Error,
    system::LinearSystem,
    Float,
};

/// Solve the continuous Lyapunov equation `A X + X A^T + Q = 0` by Kronecker
/// vectorization. Inputs are small dense matrices, so the n^2 × n^2 solve is
/// acceptable.
fn lyap(a: &DMatrix<Float>, q: &DMatrix<Float>) -> Result<DMatrix<Float>, Error> {
    let n = a.nrows();
    let eye = DMatrix::identity(n, n);
    let lhs = eye.kronecker(a) + a.kronecker(&eye);
    let rhs = DVector::from_column_slice(q.as_slice()) * -1.0;
    let x = lhs
        .lu()
        .solve(&rhs)
        .ok_or_else(|| Error::Numerical("singular Lyapunov operator".into()))?;
    Ok(DMatrix::from_column_slice(n, n, x.as_slice()))
}

/// Solve the discrete Lyapunov (Stein) equation `A X A^T - X + Q = 0`.
fn dlyap(a: &DMatrix<Float>, q: &DMatrix<Float>) -> Result<DMatrix<Float>, Error> {
    let n = a.nrows();
    let lhs = DMatrix::identity(n * n, n * n) - a.kronecker(a);
    let rhs = DVector::from_column_slice(q.as_slice());
    let x = lhs
        .lu()
        .solve(&rhs)
        .ok_or_else(|| Error::Numerical("singular Stein operator".into()))?;
    Ok(DMatrix::from_column_slice(n, n, x.as_slice()))
}

/// Controllability Gramian of a stable system.
pub fn control_gram(sys: &LinearSystem) -> Result<DMatrix<Float>, Error> {
    if !sys.is_stable() {
        return Err(Error::Unstable);
    }
    let (a, b, _, _) = sys.ss();
    let q = b * b.transpose();
    if sys.is_analog() {
        lyap(a, &q)
    } else {
        dlyap(a, &q)
    }
}

/// Observability Gramian of a stable system.
pub fn observe_gram(sys: &LinearSystem) -> Result<DMatrix<Float>, Error> {
    if !sys.is_stable() {
        return Err(Error::Unstable);
    }
    let (a, _, c, _) = sys.ss();
    let q = c.transpose() * c;
    let at = a.transpose();
    if sys.is_analog() {
        lyap(&at, &q)
    } else {
        dlyap(&at, &q)
    }
}

/// Hankel singular values of a stable system, largest first.
///
/// These are the square roots of the eigenvalues of `P Q`, computed through
/// the symmetric product `P^{1/2} Q P^{1/2}` so the eigenproblem stays
/// symmetric positive semidefinite.
pub fn hankel(sys: &LinearSystem) -> Result<DVector<Float>, Error> {
    let p = control_gram(sys)?;
    let q = observe_gram(sys)?;

    let pe = p.symmetric_eigen();
    let roots = pe.eigenvalues.map(|v| if v > 0.0 { v.sqrt() } else { 0.0 });
    let sqrt_p = &pe.eigenvectors * DMatrix::from_diagonal(&roots) * pe.eigenvectors.transpose();

    let m = &sqrt_p * q * &sqrt_p;
    let mut sv: Vec<Float> = m
        .symmetric_eigen()
        .eigenvalues
        .iter()
        .map(|&v| if v > 0.0 { v.sqrt() } else { 0.0 })
        .collect();
    sv.sort_by(|x, y| y.total_cmp(x));
    Ok(DVector::from_vec(sv))
}

/// Diagnostics from the L1 norm estimator.
#[derive(Clone, Copy, Debug)]
pub struct L1NormInfo {
    /// Impulse-response samples used at the accepted resolution.
    pub steps: usize,
    /// Sampling interval of the accepted estimate (1 for discrete systems).
    pub dt: Float,
    /// Difference between the last two refinement levels.
    pub abstol: Float,
}

/// Estimate the L1 norm of a stable SISO system: the worst-case peak output
/// under any input bounded in [-1, 1], `∫|h(t)| dt + |D|` (continuous) or
/// `Σ|h[k]| + |D|` (discrete).
///
/// Continuous systems are sampled under zero-order hold and the integral is
/// accumulated by the trapezoid rule; the timestep is halved until the
/// estimate moves by less than `rtol` relative or the sample budget
/// `max_length` is exhausted, whichever comes first.
pub fn l1_norm(
    sys: &LinearSystem,
    rtol: Float,
    max_length: usize,
) -> Result<(Float, L1NormInfo), Error> {
    if sys.inputs() != 1 || sys.outputs() != 1 {
        return Err(Error::SisoRequired {
            inputs: sys.inputs(),
            outputs: sys.outputs(),
        });
    }
    if !sys.is_stable() {
        return Err(Error::Unstable);
    }
    let (a, b, c, d) = sys.ss();
    let feedthrough = d[(0, 0)].abs();

    if !sys.is_analog() {
        // Direct accumulation of the Markov parameters |C A^k B|, with a
        // geometric tail estimate from the spectral radius.
        let rho = sys.poles().iter().map(|p| p.norm()).fold(0.0, Float::max);
        let mut x = b.column(0).into_owned();
        let mut total = 0.0;
        let mut steps = 0;
        while steps < max_length {
            total += (c * &x)[0].abs();
            x = a * &x;
            steps += 1;
            let tail = c.norm() * x.norm() / (1.0 - rho);
            if tail <= rtol * total.max(Float::EPSILON) {
                break;
            }
        }
        let value = total + feedthrough;
        return Ok((
            value,
            L1NormInfo {
                steps,
                dt: 1.0,
                abstol: rtol * value,
            },
        ));
    }

    let poles = sys.poles();
    let fastest = poles
        .iter()
        .map(|p| p.norm())
        .fold(0.0, Float::max)
        .max(Float::EPSILON);
    let slowest_decay = poles.iter().map(|p| -p.re).fold(Float::INFINITY, Float::min);
    // span long enough for the impulse envelope to decay below rtol
    let horizon = -(rtol.min(1e-3)).ln() / slowest_decay;

    let mut dt = (1.0 / (8.0 * fastest)).min(horizon);
    let mut prev: Option<(Float, usize)> = None;
    loop {
        let steps = ((horizon / dt).ceil() as usize).clamp(2, max_length.max(2));
        let disc = cont2discrete(sys, dt, Method::Zoh, None)?;
        let (ad, _, _, _) = disc.ss();

        // x_k = e^{A k dt} B, so the sampled impulse response is C x_k
        let mut x = b.column(0).into_owned();
        let mut total = 0.0;
        let mut first = 0.0;
        let mut last = 0.0;
        for k in 0..=steps {
            let y = (c * &x)[0].abs();
            if k == 0 {
                first = y;
            }
            last = y;
            total += y;
            x = ad * &x;
        }
        let value = dt * (total - 0.5 * (first + last)) + feedthrough;

        if let Some((prev_value, _)) = prev {
            let abstol = (value - prev_value).abs();
            if abstol <= rtol * value.abs().max(Float::EPSILON) {
                return Ok((value, L1NormInfo { steps, dt, abstol }));
            }
        }
        if (horizon / (0.5 * dt)) > max_length as Float {
            // cannot refine further within the sample budget
            let abstol = prev.map(|(p, _)| (value - p).abs()).unwrap_or(value);
            return Ok((value, L1NormInfo { steps, dt, abstol }));
        }
        prev = Some((value, steps));
        dt *= 0.5;
    }
}
