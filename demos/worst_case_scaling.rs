//! # Demo: Worst-case state scaling
//!
//! A slow first-order filter driven by a unit step overshoots any radius-1
//! state budget by 4x. The Hankel and L1 normalizers rescale the state basis
//! so the worst case fits exactly, without touching the transfer function.

use ltisys::nalgebra::DMatrix;
use ltisys::prelude::*;

fn main() -> Result<(), Error> {
    let sys = LinearSystem::new(
        DMatrix::from_element(1, 1, -0.25),
        DMatrix::from_element(1, 1, 1.0),
        DMatrix::from_element(1, 1, 1.0),
        DMatrix::zeros(1, 1),
        true,
    )?;

    let raw = step_response(&sys, 0.02, 4096)?;
    println!("raw state peak: {:.4}", peak(&raw));

    let strategies: [(&str, Normalizer); 2] = [
        ("hankel", Normalizer::HankelNorm),
        (
            "l1",
            Normalizer::L1Norm(L1NormSettings::builder().rtol(1e-8).build()),
        ),
    ];
    for (name, strategy) in strategies {
        let (normed, info) = strategy.normalize(&sys, 1.0)?;
        let out = step_response(&normed, 0.02, 4096)?;
        println!(
            "{:>6}: applied radii = {:.6}, state peak = {:.4}",
            name,
            info.radii.as_ref().map(|r| r[0]).unwrap_or(1.0),
            peak(&out),
        );
    }

    Ok(())
}

fn peak(out: &DlsimResult) -> Float {
    out.x.iter().fold(0.0, |acc, &v| acc.max(v.abs()))
}
