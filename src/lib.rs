//! Analysis and transformation of linear time-invariant (LTI) state-space
//! systems, for mapping continuous-time dynamics onto clocked substrates.
//!
//! Two tightly coupled capabilities make up the core:
//!
//! - **Discretization**: [`cont2discrete`] / [`discrete2cont`] convert a
//!   system across the continuous/discrete boundary under a selectable
//!   [`Method`] — the generalized bilinear transform family (forward Euler,
//!   Tustin, backward Euler, or any weight in between) and exact zero-order
//!   hold via the matrix exponential/logarithm duality.
//! - **Normalization**: [`scale_state`] and the [`Normalizer`] strategies
//!   rescale the internal state basis so that no state exceeds a target
//!   operating radius under bounded input, using Hankel singular value or
//!   worst-case L1 response bounds. The input/output transfer behavior is
//!   left unchanged.

mod canonical;
mod discrete;
mod error;
mod linalg;
mod normalize;
mod norms;
mod simulate;
mod system;

pub mod prelude;

pub use nalgebra;

pub use canonical::{canonical, decompose_states, sys2tf};
pub use discrete::{cont2discrete, discrete2cont, Method};
pub use error::Error;
pub use normalize::{scale_state, L1NormSettings, NormalizeInfo, Normalizer, Radii};
pub use norms::{control_gram, hankel, l1_norm, observe_gram, L1NormInfo};
pub use simulate::{dlsim, step_response, DlsimResult};
pub use system::LinearSystem;

// Prevent selecting two incompatible float precision features at once.
#[cfg(all(feature = "f32", feature = "f64"))]
compile_error!(
    "features 'f32' and 'f64' cannot both be enabled; pick exactly one Float precision feature"
);

/// Scalar precision used throughout the crate, selected by feature.
#[cfg(feature = "f32")]
pub type Float = f32;
#[cfg(feature = "f64")]
pub type Float = f64;
