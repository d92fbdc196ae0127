//! Canonical realizations, transfer-function extraction, and per-state
//! decomposition.

use nalgebra::DMatrix;

use crate::{error::Error, system::LinearSystem, Float};

/// Transfer-function coefficients of a SISO system, `(num, den)`, both of
/// length n+1 in descending powers with `den` monic.
///
/// Uses the Faddeev–LeVerrier recurrence, which yields the characteristic
/// polynomial and the expansion of `adj(sI - A)` in one pass:
///
/// ```text
/// R_0 = I,  a_k = -tr(A R_{k-1}) / k,  R_k = A R_{k-1} + a_k I
/// num_k = C R_{k-1} B + D a_k
/// ```
pub fn sys2tf(sys: &LinearSystem) -> Result<(Vec<Float>, Vec<Float>), Error> {
    if sys.inputs() != 1 || sys.outputs() != 1 {
        return Err(Error::SisoRequired {
            inputs: sys.inputs(),
            outputs: sys.outputs(),
        });
    }
    let (a, b, c, d) = sys.ss();
    let n = sys.order();
    let d0 = d[(0, 0)];

    let mut r = DMatrix::identity(n, n);
    let mut num = Vec::with_capacity(n + 1);
    let mut den = Vec::with_capacity(n + 1);
    num.push(d0);
    den.push(1.0);
    for k in 1..=n {
        let cb = (c * &r * b)[(0, 0)];
        let m = a * &r;
        let ak = -m.trace() / (k as Float);
        num.push(cb + d0 * ak);
        den.push(ak);
        r = m + DMatrix::identity(n, n) * ak;
    }
    Ok((num, den))
}

/// Realize `sys` in controllable (phase-variable) canonical form, or in
/// observable canonical form (the dual realization) when
/// `controllable = false`. SISO only; the time domain is preserved.
pub fn canonical(sys: &LinearSystem, controllable: bool) -> Result<LinearSystem, Error> {
    let (num, den) = sys2tf(sys)?;
    let n = sys.order();
    // split off the direct feedthrough so the remainder is strictly proper
    let d0 = num[0];
    let rest: Vec<Float> = num[1..]
        .iter()
        .zip(&den[1..])
        .map(|(ni, ai)| ni - d0 * ai)
        .collect();

    let mut a = DMatrix::zeros(n, n);
    for j in 0..n {
        a[(0, j)] = -den[j + 1];
    }
    for i in 1..n {
        a[(i, i - 1)] = 1.0;
    }
    let mut b = DMatrix::zeros(n, 1);
    b[(0, 0)] = 1.0;
    let c = DMatrix::from_row_slice(1, n, &rest);
    let d = DMatrix::from_element(1, 1, d0);

    if controllable {
        LinearSystem::new(a, b, c, d, sys.is_analog())
    } else {
        LinearSystem::new(a.transpose(), c.transpose(), b.transpose(), d, sys.is_analog())
    }
}

/// Split `sys` into one subsystem per state, each driven by the full input
/// but reading out a single state directly (`C = e_i^T`, `D = 0`). The
/// combined responses reconstruct the full state trajectory; the pieces are
/// what the per-state norm estimators bound.
pub fn decompose_states(sys: &LinearSystem) -> Vec<LinearSystem> {
    let (a, b, _, _) = sys.ss();
    let n = sys.order();
    let m = sys.inputs();
    (0..n)
        .map(|i| {
            let mut c = DMatrix::zeros(1, n);
            c[(0, i)] = 1.0;
            LinearSystem::from_parts(a.clone(), b.clone(), c, DMatrix::zeros(1, m), sys.is_analog())
        })
        .collect()
}
