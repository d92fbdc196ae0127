//! Convenient prelude: import the most commonly used types and functions.
//!
//! Bring this into scope with:
//!
//! ```rust
//! use ltisys::prelude::*;
//! ```

pub use crate::{
    canonical::{canonical, decompose_states, sys2tf},
    discrete::{cont2discrete, discrete2cont, Method},
    error::Error,
    normalize::{scale_state, L1NormSettings, NormalizeInfo, Normalizer, Radii},
    norms::{control_gram, hankel, l1_norm, observe_gram, L1NormInfo},
    simulate::{dlsim, step_response, DlsimResult},
    system::LinearSystem,
    Float,
};
