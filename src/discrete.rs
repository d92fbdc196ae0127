//! Conversion of state-space systems between continuous and discrete time.

use std::str::FromStr;

use nalgebra::DMatrix;

use crate::{error::Error, linalg::logm, system::LinearSystem, Float};

/// Discretization / continuization method.
///
/// The generalized bilinear transform (`Gbt`) interpolates between forward
/// Euler (`alpha = 0`), Tustin (`alpha = 0.5`), and backward Euler
/// (`alpha = 1`); the named variants are fixed-alpha aliases. `Zoh` is the
/// exact zero-order-hold equivalence via the matrix exponential (forward)
/// and its principal logarithm (inverse).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Zoh,
    Gbt,
    Bilinear,
    Euler,
    BackwardDiff,
}

impl Method {
    /// Resolve the GBT weight for this method, or `None` for the zoh branch.
    /// The caller-supplied alpha is consulted only by `Gbt` and must lie in
    /// [0, 1].
    fn resolve_alpha(self, alpha: Option<Float>) -> Result<Option<Float>, Error> {
        match self {
            Method::Zoh => Ok(None),
            Method::Gbt => match alpha {
                Some(a) if (0.0..=1.0).contains(&a) => Ok(Some(a)),
                _ => Err(Error::InvalidAlpha(alpha)),
            },
            Method::Bilinear => Ok(Some(0.5)),
            Method::Euler => Ok(Some(0.0)),
            Method::BackwardDiff => Ok(Some(1.0)),
        }
    }
}

impl FromStr for Method {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s {
            "zoh" => Ok(Method::Zoh),
            "gbt" => Ok(Method::Gbt),
            "bilinear" | "tustin" => Ok(Method::Bilinear),
            "euler" | "forward_diff" => Ok(Method::Euler),
            "backward_diff" => Ok(Method::BackwardDiff),
            _ => Err(Error::UnknownMethod(s.to_string())),
        }
    }
}

/// Discretize a continuous-time system with timestep `dt`.
///
/// For the GBT family with weight `a` this computes
///
/// ```text
/// Ad = (I - a dt A)^{-1} (I + (1 - a) dt A)      Bd = (I - a dt A)^{-1} dt B
/// Cd = C (I - a dt A)^{-1}                       Dd = D + a C Bd
/// ```
///
/// and for `Zoh` the top rows of `expm(dt [[A, B], [0, 0]])`. The matrices
/// of an already-discrete input are converted as given, without further
/// validation.
pub fn cont2discrete(
    sys: &LinearSystem,
    dt: Float,
    method: Method,
    alpha: Option<Float>,
) -> Result<LinearSystem, Error> {
    if dt <= 0.0 {
        return Err(Error::InvalidTimestep(dt));
    }
    let alpha = method.resolve_alpha(alpha)?;
    let (a, b, c, d) = sys.ss();
    let n = sys.order();

    let (ad, bd, cd, dd) = match alpha {
        Some(al) => {
            let eye = DMatrix::identity(n, n);
            let ima = &eye - a * (al * dt);
            let lu = ima.clone().lu();
            let ad = lu
                .solve(&(&eye + a * ((1.0 - al) * dt)))
                .ok_or_else(|| Error::Numerical("singular (I - alpha dt A)".into()))?;
            let bd = lu
                .solve(&(b * dt))
                .ok_or_else(|| Error::Numerical("singular (I - alpha dt A)".into()))?;
            let cd = ima
                .transpose()
                .lu()
                .solve(&c.transpose())
                .ok_or_else(|| Error::Numerical("singular (I - alpha dt A)".into()))?
                .transpose();
            let dd = d + (c * &bd) * al;
            (ad, bd, cd, dd)
        }
        None => {
            // zoh: exponential of the input-augmented block matrix
            let m = sys.inputs();
            let mut aug = DMatrix::zeros(n + m, n + m);
            aug.view_mut((0, 0), (n, n)).copy_from(a);
            aug.view_mut((0, n), (n, m)).copy_from(b);
            let ms = (aug * dt).exp();
            let ad = ms.view((0, 0), (n, n)).into_owned();
            let bd = ms.view((0, n), (n, m)).into_owned();
            (ad, bd, c.clone(), d.clone())
        }
    };

    LinearSystem::new(ad, bd, cd, dd, false)
}

/// Undo a discretization, recovering the continuous-time system that `sys`
/// is the `method`-discretization of at timestep `dt`.
///
/// `Zoh` takes the principal matrix logarithm of the augmented block
/// `[[Ad, Bd], [0, I]]` and divides by `dt`; the output equation is
/// algebraic and passes through unchanged. The GBT family solves the
/// transform equations in reverse. Eigenvalues of `Ad` on the closed
/// negative real axis have no principal logarithm and surface as
/// [`Error::Numerical`].
pub fn discrete2cont(
    sys: &LinearSystem,
    dt: Float,
    method: Method,
    alpha: Option<Float>,
) -> Result<LinearSystem, Error> {
    if dt <= 0.0 {
        return Err(Error::InvalidTimestep(dt));
    }
    let alpha = method.resolve_alpha(alpha)?;
    let (ad, bd, cd, dd) = sys.ss();
    let n = sys.order();

    match alpha {
        Some(al) => {
            let eye = DMatrix::identity(n, n);
            // Ar = ((alpha dt Ad^T + (1 - alpha) dt I) \ (Ad^T - I))^T
            let lhs = ad.transpose() * (al * dt) + &eye * ((1.0 - al) * dt);
            let ar = lhs
                .lu()
                .solve(&(ad.transpose() - &eye))
                .ok_or_else(|| Error::Numerical("singular generalized bilinear transform".into()))?
                .transpose();
            let m = &eye - &ar * (al * dt);
            let br = (&m * bd) / dt;
            let cr = cd * &m;
            let dr = dd - (&cr * bd) * al;
            LinearSystem::new(ar, br, cr, dr, true)
        }
        None => {
            let m = sys.inputs();
            let mut aug = DMatrix::zeros(n + m, n + m);
            aug.view_mut((0, 0), (n, n)).copy_from(ad);
            aug.view_mut((0, n), (n, m)).copy_from(bd);
            aug.view_mut((n, n), (m, m))
                .copy_from(&DMatrix::identity(m, m));
            let e = logm(&aug)? / dt;
            let ar = e.view((0, 0), (n, n)).into_owned();
            let br = e.view((0, n), (n, m)).into_owned();
            LinearSystem::new(ar, br, cd.clone(), dd.clone(), true)
        }
    }
}
