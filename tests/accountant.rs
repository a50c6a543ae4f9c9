//! End-to-end accounting scenarios.

use fourier_accountant::prelude::*;
use proptest::prelude::*;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn moderate_params() -> AccountantParams {
    AccountantParams::default()
        .with_sigma(2.0)
        .with_q(0.05)
        .with_ncomp(100.0)
        .with_grid(1 << 15, 15.0)
}

fn epsilon(params: AccountantParams, relation: NeighboringRelation) -> f64 {
    let acct = FourierAccountant::new(params).expect("accountant");
    acct.compute_epsilon(relation).expect("epsilon")
}

#[test]
fn reference_scenario_converges() {
    init_logging();
    // sigma=2, q=0.01, ncomp=1e4, delta=1e-6, nx=1e6, l=20.
    let params = AccountantParams::default();
    let acct = FourierAccountant::new(params).expect("accountant");

    let eps = acct.epsilon_remove_add().expect("epsilon");
    assert!(eps.is_finite());
    assert!(eps > 0.0 && eps < 10.0, "eps = {eps}");

    // The solver stops when |delta(eps) - target| <= 1e-10.
    let delta = acct
        .compute_delta(NeighboringRelation::AddOrRemoveOne, eps)
        .expect("delta");
    assert!((delta - params.target_delta).abs() <= 1e-9);
}

#[test]
fn epsilon_decreases_with_target_delta() {
    init_logging();
    let strict = epsilon(
        moderate_params().with_target_delta(1e-7),
        NeighboringRelation::AddOrRemoveOne,
    );
    let loose = epsilon(
        moderate_params().with_target_delta(1e-5),
        NeighboringRelation::AddOrRemoveOne,
    );
    assert!(strict > loose, "strict = {strict}, loose = {loose}");
}

#[test]
fn epsilon_grows_with_composition_count() {
    init_logging();
    let few = epsilon(
        moderate_params().with_ncomp(100.0),
        NeighboringRelation::ReplaceOne,
    );
    let many = epsilon(
        moderate_params().with_ncomp(200.0),
        NeighboringRelation::ReplaceOne,
    );
    assert!(many >= few, "few = {few}, many = {many}");
}

#[test]
fn substitution_dominates_remove_add() {
    init_logging();
    let remove_add = epsilon(moderate_params(), NeighboringRelation::AddOrRemoveOne);
    let substitution = epsilon(moderate_params(), NeighboringRelation::ReplaceOne);
    assert!(
        substitution >= remove_add,
        "substitution = {substitution}, remove_add = {remove_add}"
    );
}

#[test]
fn epsilon_converges_under_grid_refinement() {
    init_logging();
    let base = AccountantParams::default()
        .with_sigma(2.0)
        .with_q(0.02)
        .with_ncomp(50.0);
    let coarse = epsilon(
        base.with_grid(1 << 17, 12.0),
        NeighboringRelation::AddOrRemoveOne,
    );
    let fine = epsilon(
        base.with_grid(1 << 18, 12.0),
        NeighboringRelation::AddOrRemoveOne,
    );
    assert!(coarse.is_finite() && fine.is_finite());
    assert!(
        (coarse - fine).abs() < 1e-3,
        "coarse = {coarse}, fine = {fine}"
    );
}

#[test]
fn narrow_window_exhausts_the_domain() {
    init_logging();
    // A heavily composed mechanism cannot be represented on [-1, 1].
    let params = AccountantParams::default()
        .with_sigma(1.0)
        .with_q(0.5)
        .with_ncomp(1e6)
        .with_grid(1 << 16, 1.0);
    let eps = epsilon(params, NeighboringRelation::AddOrRemoveOne);
    assert!(eps.is_infinite());
}

#[test]
fn fractional_composition_counts_interpolate() {
    init_logging();
    // At large composition counts the spectrum of the composed density is
    // smooth, so fractional powers land between their integer neighbors.
    let few = epsilon(
        moderate_params().with_ncomp(100.0),
        NeighboringRelation::AddOrRemoveOne,
    );
    let half = epsilon(
        moderate_params().with_ncomp(100.5),
        NeighboringRelation::AddOrRemoveOne,
    );
    let more = epsilon(
        moderate_params().with_ncomp(101.0),
        NeighboringRelation::AddOrRemoveOne,
    );
    assert!(few.is_finite() && half.is_finite() && more.is_finite());
    assert!(few <= half && half <= more, "{few} / {half} / {more}");
}

#[test]
fn oscillating_newton_iterate_is_reported_as_an_error() {
    init_logging();
    // A small fractional composition count leaves oscillatory artifacts in
    // the composed density; with a target delta at the artifact amplitude
    // the iterate cycles without converging, which must surface as the
    // iteration-cap error rather than a hang or a bogus epsilon.
    let params = AccountantParams::default()
        .with_sigma(1.5)
        .with_q(0.05)
        .with_ncomp(2.5)
        .with_grid(1 << 14, 12.0);
    let acct = FourierAccountant::new(params).expect("accountant");
    match acct.epsilon_remove_add() {
        Err(AccountantError::NumericalError { .. }) => {}
        other => panic!("expected an iteration-cap error, got {other:?}"),
    }
}

#[test]
fn repeated_invocations_are_bit_identical() {
    init_logging();
    let first = epsilon(moderate_params(), NeighboringRelation::AddOrRemoveOne);
    let second = epsilon(moderate_params(), NeighboringRelation::AddOrRemoveOne);
    assert_eq!(first.to_bits(), second.to_bits());
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 8, .. ProptestConfig::default() })]

    #[test]
    fn larger_delta_never_raises_epsilon(
        sigma in 1.0f64..3.0,
        q in 0.01f64..0.3,
        ncomp in 1.0f64..50.0,
        delta_lo in 1e-7f64..1e-5,
    ) {
        let base = AccountantParams::default()
            .with_sigma(sigma)
            .with_q(q)
            .with_ncomp(ncomp)
            .with_grid(4096, 10.0);
        let strict = epsilon(
            base.with_target_delta(delta_lo),
            NeighboringRelation::AddOrRemoveOne,
        );
        let loose = epsilon(
            base.with_target_delta(delta_lo * 100.0),
            NeighboringRelation::AddOrRemoveOne,
        );
        prop_assert!(strict >= loose - 1e-6);
    }

    #[test]
    fn more_compositions_never_lower_epsilon(
        sigma in 1.0f64..3.0,
        q in 0.01f64..0.3,
        ncomp in 1.0f64..50.0,
    ) {
        let base = AccountantParams::default()
            .with_sigma(sigma)
            .with_q(q)
            .with_grid(4096, 10.0);
        let few = epsilon(base.with_ncomp(ncomp), NeighboringRelation::AddOrRemoveOne);
        let many = epsilon(
            base.with_ncomp(2.0 * ncomp),
            NeighboringRelation::AddOrRemoveOne,
        );
        prop_assert!(many >= few - 1e-6);
    }

    #[test]
    fn substitution_is_the_harder_relation(
        sigma in 1.0f64..3.0,
        q in 0.01f64..0.3,
        ncomp in 1.0f64..50.0,
    ) {
        let params = AccountantParams::default()
            .with_sigma(sigma)
            .with_q(q)
            .with_ncomp(ncomp)
            .with_grid(4096, 10.0);
        let remove_add = epsilon(params, NeighboringRelation::AddOrRemoveOne);
        let substitution = epsilon(params, NeighboringRelation::ReplaceOne);
        prop_assert!(substitution >= remove_add - 1e-6);
    }
}
