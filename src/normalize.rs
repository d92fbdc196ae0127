//! State scaling and normalization strategies.

use bon::Builder;
use nalgebra::DVector;

use crate::{
    canonical::{canonical, decompose_states},
    error::Error,
    norms::{hankel, l1_norm},
    system::LinearSystem,
    Float,
};

/// Target state radii: a scalar broadcast over every state, or one entry per
/// state. Conversions via [`Into`] let callers pass `Float`, slices, or
/// arrays without caring which.
#[derive(Clone, Copy, Debug)]
pub enum Radii<'a> {
    Scalar(Float),
    Vector(&'a [Float]),
}

impl From<Float> for Radii<'_> {
    fn from(val: Float) -> Self {
        Radii::Scalar(val)
    }
}

impl<'a> From<&'a [Float]> for Radii<'a> {
    fn from(val: &'a [Float]) -> Self {
        Radii::Vector(val)
    }
}

impl<'a> From<&'a Vec<Float>> for Radii<'a> {
    fn from(val: &'a Vec<Float>) -> Self {
        Radii::Vector(val.as_slice())
    }
}

impl<'a, const N: usize> From<&'a [Float; N]> for Radii<'a> {
    fn from(val: &'a [Float; N]) -> Self {
        Radii::Vector(val)
    }
}

impl Radii<'_> {
    /// Broadcast to one entry per state, validating length and positivity
    /// (the similarity transform `diag(r)` must be invertible).
    fn resolve(&self, n: usize) -> Result<DVector<Float>, Error> {
        let r = match self {
            Radii::Scalar(v) => DVector::from_element(n, *v),
            Radii::Vector(vs) => {
                if vs.len() != n {
                    return Err(Error::RadiiLength { len: vs.len(), n });
                }
                DVector::from_column_slice(vs)
            }
        };
        for &v in r.iter() {
            if !v.is_finite() || v <= 0.0 {
                return Err(Error::InvalidRadii(v));
            }
        }
        Ok(r)
    }
}

/// Rescale the state basis of `sys` by the diagonal similarity transform
/// `T = diag(radii)`:
///
/// ```text
/// A' = T^{-1} A T,   B' = T^{-1} B,   C' = C T,   D' = D
/// ```
///
/// The input/output transfer behavior is mathematically invariant; only the
/// internal dynamic range of each state changes. The time domain is
/// preserved.
pub fn scale_state<'a>(
    sys: &LinearSystem,
    radii: impl Into<Radii<'a>>,
) -> Result<LinearSystem, Error> {
    let n = sys.order();
    let r = radii.into().resolve(n)?;
    let (a, b, c, d) = sys.ss();

    let mut a2 = a.clone();
    for i in 0..n {
        for j in 0..n {
            a2[(i, j)] = a[(i, j)] * r[j] / r[i];
        }
    }
    let mut b2 = b.clone();
    for i in 0..n {
        for j in 0..sys.inputs() {
            b2[(i, j)] = b[(i, j)] / r[i];
        }
    }
    let mut c2 = c.clone();
    for i in 0..sys.outputs() {
        for j in 0..n {
            c2[(i, j)] = c[(i, j)] * r[j];
        }
    }
    Ok(LinearSystem::from_parts(a2, b2, c2, d.clone(), sys.is_analog()))
}

/// Tunables for the [`Normalizer::L1Norm`] strategy, governing the
/// precision/cost trade-off of the underlying estimator.
#[derive(Builder, Clone, Copy, Debug, PartialEq)]
pub struct L1NormSettings {
    /// Relative tolerance of the L1 norm estimate.
    #[builder(default = 1e-6)]
    pub rtol: Float,
    /// Maximum impulse-response samples per subsystem.
    #[builder(default = 1 << 18)]
    pub max_length: usize,
}

impl Default for L1NormSettings {
    fn default() -> Self {
        L1NormSettings::builder().build()
    }
}

/// Radii actually applied by a normalization, for the estimation strategies;
/// the canonical pass-through strategies report nothing.
#[derive(Clone, Debug, Default)]
pub struct NormalizeInfo {
    pub radii: Option<DVector<Float>>,
}

/// State normalization strategies, dispatched through [`Normalizer::normalize`].
///
/// `Controllable` and `Observable` realize the system in the requested
/// canonical form and apply the caller's radii as-is. `HankelNorm` and
/// `L1Norm` estimate, per decomposed state subsystem, how large that state
/// can get under unit-bounded input, and fold the estimate into the radii:
///
/// - `HankelNorm` bounds the worst case by twice the sum of the subsystem's
///   Hankel singular values (Khaisongkram & Banjerdpongchai 2007).
/// - `L1Norm` estimates the worst case directly as the subsystem's L1 norm,
///   which is tight even for full-spectrum inputs.
///
/// Each subsystem bound is derived independently; the shared Gramian work is
/// recomputed per state, a deliberate simplicity trade-off.
#[derive(Clone, Debug)]
pub enum Normalizer {
    Controllable,
    Observable,
    HankelNorm,
    L1Norm(L1NormSettings),
}

impl Normalizer {
    /// Normalize `sys` toward the target `radii`, returning the rescaled
    /// system and the diagnostics for what was applied.
    pub fn normalize<'a>(
        &self,
        sys: &LinearSystem,
        radii: impl Into<Radii<'a>>,
    ) -> Result<(LinearSystem, NormalizeInfo), Error> {
        let radii = radii.into();
        match self {
            Normalizer::Controllable => {
                let sys = scale_state(&canonical(sys, true)?, radii)?;
                Ok((sys, NormalizeInfo::default()))
            }
            Normalizer::Observable => {
                let sys = scale_state(&canonical(sys, false)?, radii)?;
                Ok((sys, NormalizeInfo::default()))
            }
            Normalizer::HankelNorm => {
                let mut estimates = Vec::with_capacity(sys.order());
                for sub in decompose_states(sys) {
                    estimates.push(2.0 * hankel(&sub)?.sum());
                }
                Self::scale_estimated(sys, radii, estimates)
            }
            Normalizer::L1Norm(settings) => {
                let mut estimates = Vec::with_capacity(sys.order());
                for sub in decompose_states(sys) {
                    let (value, _) = l1_norm(&sub, settings.rtol, settings.max_length)?;
                    estimates.push(value);
                }
                Self::scale_estimated(sys, radii, estimates)
            }
        }
    }

    fn scale_estimated(
        sys: &LinearSystem,
        radii: Radii<'_>,
        estimates: Vec<Float>,
    ) -> Result<(LinearSystem, NormalizeInfo), Error> {
        let applied = radii
            .resolve(sys.order())?
            .component_mul(&DVector::from_vec(estimates));
        let scaled = scale_state(sys, applied.as_slice())?;
        Ok((
            scaled,
            NormalizeInfo {
                radii: Some(applied),
            },
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::DMatrix;

    fn first_order(a: Float, b: Float) -> LinearSystem {
        LinearSystem::new(
            DMatrix::from_element(1, 1, a),
            DMatrix::from_element(1, 1, b),
            DMatrix::from_element(1, 1, 1.0),
            DMatrix::zeros(1, 1),
            true,
        )
        .unwrap()
    }

    #[test]
    fn scalar_radii_broadcast() {
        let sys = first_order(-1.0, 2.0);
        let scaled = scale_state(&sys, 2.0).unwrap();
        let (a, b, c, d) = scaled.ss();
        assert!((a[(0, 0)] + 1.0).abs() < 1e-14);
        assert!((b[(0, 0)] - 1.0).abs() < 1e-14);
        assert!((c[(0, 0)] - 2.0).abs() < 1e-14);
        assert!(d[(0, 0)].abs() < 1e-14);
        assert!(scaled.is_analog());
    }

    #[test]
    fn vector_radii_must_match_dimension() {
        let sys = first_order(-1.0, 1.0);
        let err = scale_state(&sys, &[1.0, 2.0][..]);
        assert!(matches!(err, Err(Error::RadiiLength { len: 2, n: 1 })));
    }

    #[test]
    fn nonpositive_radii_are_rejected() {
        let sys = first_order(-1.0, 1.0);
        assert!(matches!(scale_state(&sys, 0.0), Err(Error::InvalidRadii(_))));
        assert!(matches!(
            scale_state(&sys, &[-1.0][..]),
            Err(Error::InvalidRadii(_))
        ));
    }

    #[test]
    fn l1_settings_defaults() {
        let settings = L1NormSettings::default();
        assert_eq!(settings.max_length, 1 << 18);
        assert!((settings.rtol - 1e-6).abs() < 1e-18);
    }
}
