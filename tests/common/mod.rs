//! Shared helpers for the integration suites.

#![allow(dead_code)]

use ltisys::nalgebra::{Complex, DMatrix};
use ltisys::prelude::*;

/// Single-state continuous system `dx = a x + b u`, `y = c x + d u`.
pub fn first_order(a: Float, b: Float, c: Float, d: Float) -> LinearSystem {
    LinearSystem::new(
        DMatrix::from_element(1, 1, a),
        DMatrix::from_element(1, 1, b),
        DMatrix::from_element(1, 1, c),
        DMatrix::from_element(1, 1, d),
        true,
    )
    .unwrap()
}

/// Damped oscillator `H(s) = (s + 2) / (s^2 + 0.8 s + 1)` in controllable
/// canonical form.
pub fn oscillator() -> LinearSystem {
    LinearSystem::new(
        DMatrix::from_row_slice(2, 2, &[-0.8, -1.0, 1.0, 0.0]),
        DMatrix::from_row_slice(2, 1, &[1.0, 0.0]),
        DMatrix::from_row_slice(1, 2, &[1.0, 2.0]),
        DMatrix::zeros(1, 1),
        true,
    )
    .unwrap()
}

/// Largest transfer-function deviation between two SISO systems over a
/// fixed frequency grid (rad/s for analog systems, rad/sample for digital).
pub fn max_tf_deviation(x: &LinearSystem, y: &LinearSystem) -> Float {
    assert_eq!(x.is_analog(), y.is_analog());
    let freqs = [0.0, 0.1, 0.3, 0.7, 1.3, 2.9, 10.0];
    freqs
        .iter()
        .map(|&w| {
            let s = if x.is_analog() {
                Complex::new(0.0, w)
            } else {
                Complex::new(0.0, w).exp()
            };
            let hx = x.evaluate(s).unwrap()[(0, 0)];
            let hy = y.evaluate(s).unwrap()[(0, 0)];
            (hx - hy).norm()
        })
        .fold(0.0, Float::max)
}

/// Entrywise comparison of two systems' matrices.
pub fn assert_systems_close(x: &LinearSystem, y: &LinearSystem, tol: Float) {
    let (ax, bx, cx, dx) = x.ss();
    let (ay, by, cy, dy) = y.ss();
    assert!((ax - ay).norm() < tol, "A deviates: {} vs {}", ax, ay);
    assert!((bx - by).norm() < tol, "B deviates: {} vs {}", bx, by);
    assert!((cx - cy).norm() < tol, "C deviates: {} vs {}", cx, cy);
    assert!((dx - dy).norm() < tol, "D deviates: {} vs {}", dx, dy);
}
