//! State-space container for linear time-invariant systems.

use nalgebra::{Complex, DMatrix, DVector};

use crate::{error::Error, Float};

/// An LTI system in state-space form,
///
/// ```text
/// continuous:  dx/dt = A x + B u        discrete:  x[k+1] = A x[k] + B u[k]
///              y     = C x + D u                   y[k]   = C x[k] + D u[k]
/// ```
///
/// with `A` n×n, `B` n×m, `C` p×n, `D` p×m, and a flag recording which time
/// domain the matrices live in. Instances are immutable; every transform in
/// this crate returns a fresh system and never aliases its input.
#[derive(Clone, Debug, PartialEq)]
pub struct LinearSystem {
    a: DMatrix<Float>,
    b: DMatrix<Float>,
    c: DMatrix<Float>,
    d: DMatrix<Float>,
    analog: bool,
}

impl LinearSystem {
    /// Build a system from its four matrices, validating the shape
    /// invariants. `analog = true` marks a continuous-time system.
    pub fn new(
        a: DMatrix<Float>,
        b: DMatrix<Float>,
        c: DMatrix<Float>,
        d: DMatrix<Float>,
        analog: bool,
    ) -> Result<Self, Error> {
        if a.nrows() != a.ncols() {
            return Err(Error::ShapeMismatch("A must be square"));
        }
        if b.nrows() != a.nrows() {
            return Err(Error::ShapeMismatch("B must have one row per state"));
        }
        if c.ncols() != a.nrows() {
            return Err(Error::ShapeMismatch("C must have one column per state"));
        }
        if d.nrows() != c.nrows() {
            return Err(Error::ShapeMismatch("D must have one row per output"));
        }
        if d.ncols() != b.ncols() {
            return Err(Error::ShapeMismatch("D must have one column per input"));
        }
        Ok(Self { a, b, c, d, analog })
    }

    /// Internal constructor for matrices whose shapes are valid by
    /// construction.
    pub(crate) fn from_parts(
        a: DMatrix<Float>,
        b: DMatrix<Float>,
        c: DMatrix<Float>,
        d: DMatrix<Float>,
        analog: bool,
    ) -> Self {
        debug_assert_eq!(a.nrows(), a.ncols());
        debug_assert_eq!(b.nrows(), a.nrows());
        debug_assert_eq!(c.ncols(), a.nrows());
        debug_assert_eq!(d.nrows(), c.nrows());
        debug_assert_eq!(d.ncols(), b.ncols());
        Self { a, b, c, d, analog }
    }

    /// The (A, B, C, D) quadruple.
    pub fn ss(&self) -> (&DMatrix<Float>, &DMatrix<Float>, &DMatrix<Float>, &DMatrix<Float>) {
        (&self.a, &self.b, &self.c, &self.d)
    }

    /// Number of states n.
    pub fn order(&self) -> usize {
        self.a.nrows()
    }

    /// Number of inputs m.
    pub fn inputs(&self) -> usize {
        self.b.ncols()
    }

    /// Number of outputs p.
    pub fn outputs(&self) -> usize {
        self.c.nrows()
    }

    /// Whether the system is continuous-time.
    pub fn is_analog(&self) -> bool {
        self.analog
    }

    /// Poles of the system (eigenvalues of A).
    pub fn poles(&self) -> DVector<Complex<Float>> {
        self.a.clone().complex_eigenvalues()
    }

    /// Asymptotic stability: every pole strictly in the open left half-plane
    /// (continuous) or strictly inside the unit circle (discrete).
    pub fn is_stable(&self) -> bool {
        self.poles().iter().all(|p| {
            if self.analog {
                p.re < 0.0
            } else {
                p.norm() < 1.0
            }
        })
    }

    /// Evaluate the p×m transfer matrix `C (sI - A)^{-1} B + D` at a complex
    /// point — a frequency `s = jw` for continuous systems, a point on the
    /// z-plane for discrete ones.
    pub fn evaluate(&self, s: Complex<Float>) -> Result<DMatrix<Complex<Float>>, Error> {
        let n = self.order();
        let ac = self.a.map(|v| Complex::new(v, 0.0));
        let bc = self.b.map(|v| Complex::new(v, 0.0));
        let cc = self.c.map(|v| Complex::new(v, 0.0));
        let dc = self.d.map(|v| Complex::new(v, 0.0));
        let lhs = DMatrix::from_diagonal_element(n, n, s) - ac;
        let x = lhs
            .lu()
            .solve(&bc)
            .ok_or_else(|| Error::Numerical("evaluation point is a pole of the system".into()))?;
        Ok(cc * x + dc)
    }
}
