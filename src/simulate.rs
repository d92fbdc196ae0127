//! Time-domain simulation of discrete-time systems.

use nalgebra::{DMatrix, DVector};

use crate::{
    discrete::{cont2discrete, Method},
    error::Error,
    system::LinearSystem,
    Float,
};

/// Output and state trajectories from [`dlsim`], one row per sample.
#[derive(Clone, Debug)]
pub struct DlsimResult {
    /// Outputs, `steps × p`.
    pub y: DMatrix<Float>,
    /// States, `steps × n`.
    pub x: DMatrix<Float>,
}

/// Forced response of a discrete-time system to the input sequence `u`
/// (`steps × m`, one row per sample), starting from `x0` (zero when absent).
pub fn dlsim(
    sys: &LinearSystem,
    u: &DMatrix<Float>,
    x0: Option<&DVector<Float>>,
) -> Result<DlsimResult, Error> {
    if sys.is_analog() {
        return Err(Error::DiscreteRequired);
    }
    let (a, b, c, d) = sys.ss();
    let n = sys.order();
    if u.ncols() != sys.inputs() {
        return Err(Error::ShapeMismatch("input columns must match the system inputs"));
    }
    let mut x = match x0 {
        Some(x0) if x0.len() != n => {
            return Err(Error::ShapeMismatch("initial state length must match the state dimension"))
        }
        Some(x0) => x0.clone(),
        None => DVector::zeros(n),
    };

    let steps = u.nrows();
    let mut y = DMatrix::zeros(steps, sys.outputs());
    let mut xs = DMatrix::zeros(steps, n);
    for k in 0..steps {
        let uk = u.row(k).transpose();
        let yk = c * &x + d * &uk;
        y.row_mut(k).copy_from(&yk.transpose());
        xs.row_mut(k).copy_from(&x.transpose());
        x = a * &x + b * &uk;
    }
    Ok(DlsimResult { y, x: xs })
}

/// Unit-step response over `steps` samples. Continuous systems are
/// zero-order-hold discretized at `dt` first; `dt` is ignored for systems
/// that are already discrete.
pub fn step_response(sys: &LinearSystem, dt: Float, steps: usize) -> Result<DlsimResult, Error> {
    let disc;
    let sys = if sys.is_analog() {
        disc = cont2discrete(sys, dt, Method::Zoh, None)?;
        &disc
    } else {
        sys
    };
    let u = DMatrix::from_element(steps, sys.inputs(), 1.0);
    dlsim(sys, &u, None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulator_response() {
        // x[k+1] = 0.5 x[k] + u[k], y = x: step response converges to 2
        let sys = LinearSystem::new(
            DMatrix::from_element(1, 1, 0.5),
            DMatrix::from_element(1, 1, 1.0),
            DMatrix::from_element(1, 1, 1.0),
            DMatrix::zeros(1, 1),
            false,
        )
        .unwrap();
        let out = step_response(&sys, 1.0, 64).unwrap();
        let last = out.y[(63, 0)];
        assert!((last - 2.0).abs() < 1e-9);
    }

    #[test]
    fn analog_systems_are_rejected() {
        let sys = LinearSystem::new(
            DMatrix::from_element(1, 1, -1.0),
            DMatrix::from_element(1, 1, 1.0),
            DMatrix::from_element(1, 1, 1.0),
            DMatrix::zeros(1, 1),
            true,
        )
        .unwrap();
        let u = DMatrix::zeros(4, 1);
        assert!(matches!(dlsim(&sys, &u, None), Err(Error::DiscreteRequired)));
    }
}
