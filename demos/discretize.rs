//! # Demo: Discretizing a damped oscillator
//!
//! Maps `H(s) = (s + 2) / (s^2 + 0.8 s + 1)` onto a 10 ms clock under
//! zero-order hold and Tustin, then inverts the zoh map to show the round
//! trip is exact.

use ltisys::nalgebra::DMatrix;
use ltisys::prelude::*;

fn main() -> Result<(), Error> {
    let sys = LinearSystem::new(
        DMatrix::from_row_slice(2, 2, &[-0.8, -1.0, 1.0, 0.0]),
        DMatrix::from_row_slice(2, 1, &[1.0, 0.0]),
        DMatrix::from_row_slice(1, 2, &[1.0, 2.0]),
        DMatrix::zeros(1, 1),
        true,
    )?;
    let dt = 0.01;

    println!("continuous poles: {:.4}", sys.poles());

    for (name, method) in [("zoh", Method::Zoh), ("tustin", Method::Bilinear)] {
        let disc = cont2discrete(&sys, dt, method, None)?;
        println!("{:>7} poles:    {:.6}", name, disc.poles());
    }

    let disc = cont2discrete(&sys, dt, Method::Zoh, None)?;
    let back = discrete2cont(&disc, dt, Method::Zoh, None)?;
    let (a0, _, _, _) = sys.ss();
    let (a1, _, _, _) = back.ss();
    println!("zoh round-trip error in A: {:.3e}", (a0 - a1).norm());

    Ok(())
}
