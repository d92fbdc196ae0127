use ltisys::prelude::*;

mod common;
use common::{first_order, max_tf_deviation, oscillator};

#[test]
fn scale_state_leaves_the_transfer_function_alone() {
    let sys = oscillator();
    for radii in [&[2.0, 0.5][..], &[10.0, 10.0][..], &[0.01, 3.7][..]] {
        let scaled = scale_state(&sys, radii).unwrap();
        assert!(scaled.is_analog());
        assert!(max_tf_deviation(&sys, &scaled) < 1e-10);
    }
}

#[test]
fn scale_state_is_a_diagonal_similarity() {
    let sys = first_order(-1.0, 2.0, 3.0, 0.5);
    let scaled = scale_state(&sys, 2.0).unwrap();
    let (a, b, c, d) = scaled.ss();
    assert!((a[(0, 0)] + 1.0).abs() < 1e-14);
    assert!((b[(0, 0)] - 1.0).abs() < 1e-14);
    assert!((c[(0, 0)] - 6.0).abs() < 1e-14);
    // D is untouched
    assert!((d[(0, 0)] - 0.5).abs() < 1e-14);
}

#[test]
fn radii_shape_is_validated() {
    let sys = oscillator();
    assert!(matches!(
        scale_state(&sys, &[1.0, 2.0, 3.0][..]),
        Err(Error::RadiiLength { len: 3, n: 2 })
    ));
    assert!(matches!(
        scale_state(&sys, &[1.0][..]),
        Err(Error::RadiiLength { len: 1, n: 2 })
    ));
    assert!(matches!(
        scale_state(&sys, -2.0),
        Err(Error::InvalidRadii(_))
    ));
}

#[test]
fn canonical_strategies_pass_radii_through() {
    let sys = oscillator();
    for strategy in [Normalizer::Controllable, Normalizer::Observable] {
        let (normed, info) = strategy.normalize(&sys, 1.0).unwrap();
        assert!(info.radii.is_none());
        // realization changed, transfer behavior did not
        assert!(max_tf_deviation(&sys, &normed) < 1e-9);
    }
}

#[test]
fn estimation_strategies_bound_the_step_response() {
    // raw state reaches 1/0.25 = 4 under a unit step, well past radius 1
    let sys = first_order(-0.25, 1.0, 1.0, 0.0);

    for strategy in [
        Normalizer::HankelNorm,
        Normalizer::L1Norm(L1NormSettings::default()),
    ] {
        let (normed, info) = strategy.normalize(&sys, 1.0).unwrap();
        let applied = info.radii.expect("estimation strategies report radii");
        // the worst-case bound for e^{-t/4} is 4 for both estimators
        assert!((applied[0] - 4.0).abs() < 1e-2, "radii = {}", applied[0]);

        let out = step_response(&normed, 0.02, 2048).unwrap();
        let peak = out.x.iter().fold(0.0 as Float, |acc, &v| acc.max(v.abs()));
        assert!(peak <= 1.0 + 1e-4, "state peak {} exceeds radius", peak);
        // the bound is tight for this system, so the state should get close
        assert!(peak > 0.9, "state peak {} suspiciously small", peak);

        // normalization must not change the observable behavior
        assert!(max_tf_deviation(&sys, &normed) < 1e-9);
    }
}

#[test]
fn pass_through_strategies_do_not_enforce_the_bound() {
    let sys = first_order(-0.25, 1.0, 1.0, 0.0);
    let (normed, _) = Normalizer::Controllable.normalize(&sys, 1.0).unwrap();
    let out = step_response(&normed, 0.02, 2048).unwrap();
    let peak = out.x.iter().fold(0.0 as Float, |acc, &v| acc.max(v.abs()));
    assert!(peak > 3.5, "canonical pass-through should overshoot, got {}", peak);
}

#[test]
fn caller_radii_compose_with_the_estimates() {
    let sys = first_order(-1.0, 2.0, 1.0, 0.0);
    // HankelNorm estimate for this system is exactly 2 sigma = 2
    let (_, info) = Normalizer::HankelNorm.normalize(&sys, 3.0).unwrap();
    let applied = info.radii.unwrap();
    assert!((applied[0] - 6.0).abs() < 1e-8);
}

#[test]
fn normalization_of_unstable_systems_fails() {
    let sys = first_order(0.5, 1.0, 1.0, 0.0);
    assert!(matches!(
        Normalizer::HankelNorm.normalize(&sys, 1.0),
        Err(Error::Unstable)
    ));
    assert!(matches!(
        Normalizer::L1Norm(L1NormSettings::default()).normalize(&sys, 1.0),
        Err(Error::Unstable)
    ));
}

#[test]
fn normalize_and_discretize_commute_on_the_transfer_function() {
    let sys = oscillator();
    let dt = 0.1;

    let (normed, _) = Normalizer::HankelNorm.normalize(&sys, 1.0).unwrap();
    let disc_then_norm = {
        let disc = cont2discrete(&sys, dt, Method::Zoh, None).unwrap();
        Normalizer::HankelNorm.normalize(&disc, 1.0).unwrap().0
    };
    let norm_then_disc = cont2discrete(&normed, dt, Method::Zoh, None).unwrap();

    assert!(max_tf_deviation(&disc_then_norm, &norm_then_disc) < 1e-9);
}
